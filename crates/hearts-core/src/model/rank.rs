use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank. The discriminant is the zero-based rank index (two is 0, ace is 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ORDERED.len() {
            Some(Self::ORDERED[index])
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face value as printed on the card (two is 2, ace is 14).
    pub const fn value(self) -> u8 {
        self as u8 + 2
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn index_follows_ordered() {
        for (i, rank) in Rank::ORDERED.into_iter().enumerate() {
            assert_eq!(rank.index(), i);
            assert_eq!(Rank::from_index(i), Some(rank));
        }
        assert_eq!(Rank::from_index(13), None);
    }

    #[test]
    fn value_is_face_value() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
    }
}
