use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    pub const fn previous(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::West,
            PlayerPosition::East => PlayerPosition::North,
            PlayerPosition::South => PlayerPosition::East,
            PlayerPosition::West => PlayerPosition::South,
        }
    }

    pub const fn opposite(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

/// Per-seat card state: the hand and the pile of cards captured this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    name: String,
    hand: Hand,
    captured: Vec<Card>,
}

impl Seat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            captured: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn receive_hand(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
    }

    pub fn captured(&self) -> &[Card] {
        &self.captured
    }

    pub fn capture(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.captured.extend(cards);
    }

    pub fn clear_captured(&mut self) {
        self.captured.clear();
    }

    /// Penalty points in the captured pile: one per heart, thirteen for the queen of spades.
    pub fn round_score(&self) -> u32 {
        self.captured.iter().map(|card| card.penalty_value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Seat};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn neighbours_wrap_around_the_table() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.next().previous(), seat);
            assert_eq!(seat.opposite().opposite(), seat);
            assert_eq!(seat.next().next(), seat.opposite());
        }
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn indices_match_loop_order() {
        for (i, seat) in PlayerPosition::LOOP.into_iter().enumerate() {
            assert_eq!(seat.index(), i);
        }
    }

    #[test]
    fn round_score_counts_hearts_and_queen() {
        let mut seat = Seat::new("Random Player 1");
        seat.capture([
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::QUEEN_OF_SPADES,
            Card::new(Rank::King, Suit::Clubs),
        ]);
        assert_eq!(seat.round_score(), 15);
        seat.clear_captured();
        assert_eq!(seat.round_score(), 0);
    }
}
