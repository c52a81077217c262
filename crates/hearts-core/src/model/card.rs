use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid suit index: {0}")]
    InvalidSuit(usize),
    #[error("invalid rank index: {0}")]
    InvalidRank(usize),
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);
    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from raw indices (suit 0..=3, rank 0..=12).
    pub fn from_indices(suit: usize, rank: usize) -> Result<Self, CardError> {
        let suit = Suit::from_index(suit).ok_or(CardError::InvalidSuit(suit))?;
        let rank = Rank::from_index(rank).ok_or(CardError::InvalidRank(rank))?;
        Ok(Self::new(rank, suit))
    }

    pub const fn is_penalty(self) -> bool {
        self.suit.is_heart() || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub fn penalty_value(self) -> u32 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit.is_heart() {
            1
        } else {
            0
        }
    }

    /// Long form used by the terminal prompts ("Q of Spades").
    pub fn long_name(self) -> String {
        format!("{} of {}", self.rank, self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
