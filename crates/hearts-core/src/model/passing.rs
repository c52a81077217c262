use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};
use std::array;
use thiserror::Error;

pub const PASS_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassingDirection {
    Left,
    Right,
    Across,
    Hold,
}

impl PassingDirection {
    pub const CYCLE: [PassingDirection; 4] = [
        PassingDirection::Left,
        PassingDirection::Right,
        PassingDirection::Across,
        PassingDirection::Hold,
    ];

    /// Direction for a 1-based round number: left, right, across, hold, repeating.
    pub const fn for_round(round_number: u32) -> PassingDirection {
        let index = (round_number.saturating_sub(1) % 4) as usize;
        Self::CYCLE[index]
    }

    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn target(self, seat: PlayerPosition) -> PlayerPosition {
        match self {
            PassingDirection::Left => seat.next(),
            PassingDirection::Right => seat.previous(),
            PassingDirection::Across => seat.opposite(),
            PassingDirection::Hold => seat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Left => "Left",
            PassingDirection::Right => "Right",
            PassingDirection::Across => "Across",
            PassingDirection::Hold => "Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PassingError {
    #[error("this round does not pass cards")]
    DirectionDoesNotPass,
    #[error("{0} already submitted a pass")]
    AlreadySubmitted(PlayerPosition),
    #[error("{seat} does not hold {card}")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("{seat} selected {card} more than once")]
    DuplicateCard { seat: PlayerPosition, card: Card },
    #[error("not every seat has submitted a pass")]
    Incomplete,
}

/// Collects the three-card selections of every seat, then moves them all at once.
#[derive(Debug, Clone)]
pub struct PassingState {
    direction: PassingDirection,
    submissions: [Option<[Card; PASS_SIZE]>; 4],
}

impl PassingState {
    pub fn new(direction: PassingDirection) -> Self {
        Self {
            direction,
            submissions: array::from_fn(|_| None),
        }
    }

    pub fn direction(&self) -> PassingDirection {
        self.direction
    }

    /// Records a selection after checking it against the giver's hand. The hand is untouched.
    pub fn submit(
        &mut self,
        seat: PlayerPosition,
        cards: [Card; PASS_SIZE],
        hand: &Hand,
    ) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if self.submissions[seat.index()].is_some() {
            return Err(PassingError::AlreadySubmitted(seat));
        }

        for (i, card) in cards.iter().enumerate() {
            if !hand.contains(*card) {
                return Err(PassingError::CardNotInHand { seat, card: *card });
            }
            if cards[..i].contains(card) {
                return Err(PassingError::DuplicateCard { seat, card: *card });
            }
        }

        self.submissions[seat.index()] = Some(cards);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.submissions
            .iter()
            .all(|submission| submission.is_some())
    }

    /// Removes every selection from its giver, then hands it to the receiver.
    ///
    /// `hands` is indexed by seat. Nothing is touched unless all four selections are present
    /// and still held by their givers.
    pub fn apply(self, mut hands: [&mut Hand; 4]) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        let mut selections = [[Card::TWO_OF_CLUBS; PASS_SIZE]; 4];
        for seat in PlayerPosition::LOOP {
            let cards = self.submissions[seat.index()].ok_or(PassingError::Incomplete)?;
            if let Some(card) = cards.iter().find(|c| !hands[seat.index()].contains(**c)) {
                return Err(PassingError::CardNotInHand { seat, card: *card });
            }
            selections[seat.index()] = cards;
        }

        for seat in PlayerPosition::LOOP {
            for card in selections[seat.index()] {
                hands[seat.index()].remove(card);
            }
        }
        for seat in PlayerPosition::LOOP {
            let target = self.direction.target(seat);
            for card in selections[seat.index()] {
                hands[target.index()].add(card);
            }
        }

        Ok(())
    }
}
