use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TRICK_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("trick is not complete ({0} of 4 cards played)")]
    Incomplete(usize),
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
    #[error("degenerate trick: {0}")]
    Degenerate(String),
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(TRICK_SIZE),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == TRICK_SIZE
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Seat holding the highest card of the lead suit.
    ///
    /// Four distinct seats each hold distinct cards, so a tie cannot occur; a trick that
    /// repeats a card or a seat is reported as degenerate rather than resolved.
    pub fn winner(&self) -> Result<PlayerPosition, TrickError> {
        if !self.is_complete() {
            return Err(TrickError::Incomplete(self.plays.len()));
        }
        for (i, play) in self.plays.iter().enumerate() {
            if self.plays[i + 1..].iter().any(|other| other.card == play.card) {
                return Err(TrickError::Degenerate(format!("{} played twice", play.card)));
            }
            if self.plays[i + 1..]
                .iter()
                .any(|other| other.position == play.position)
            {
                return Err(TrickError::Degenerate(format!(
                    "{} played more than once",
                    play.position
                )));
            }
        }
        let lead_suit = self.plays[0].card.suit;
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead_suit)
            .max_by(|a, b| a.card.rank.cmp(&b.card.rank))
            .map(|play| play.position)
            .ok_or_else(|| TrickError::Degenerate("no card of the lead suit".to_string()))
    }

    pub fn penalty_total(&self) -> u32 {
        self.plays
            .iter()
            .map(|play| play.card.penalty_value())
            .sum()
    }

    /// Whether any heart or the queen of spades appears in the trick.
    pub fn contains_penalty(&self) -> bool {
        self.plays.iter().any(|play| play.card.is_penalty())
    }
}
