use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// The suit whose cards score a point each and may not be led until broken.
    pub const PENALTY: Suit = Suit::Hearts;

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_heart(self) -> bool {
        matches!(self, Suit::Hearts)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Clubs.to_string(), "C");
        assert_eq!(Suit::Hearts.to_string(), "H");
    }

    #[test]
    fn index_follows_table_order() {
        for (i, suit) in Suit::ALL.into_iter().enumerate() {
            assert_eq!(suit.index(), i);
            assert_eq!(Suit::from_index(i), Some(suit));
        }
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn penalty_suit_is_hearts() {
        assert!(Suit::PENALTY.is_heart());
        assert_eq!(Suit::PENALTY.index(), 2);
    }
}
