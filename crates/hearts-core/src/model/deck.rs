use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Suits in [`Suit::ALL`] order, ranks two to ace within each suit.
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ORDERED.map(|rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        Self::shuffled(&mut StdRng::seed_from_u64(seed))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck front to back into `hand_count` consecutive groups of `hand_size`.
    ///
    /// Returns `None` when the deck cannot cover `hand_count * hand_size` cards.
    pub fn deal(&self, hand_count: usize, hand_size: usize) -> Option<Vec<Vec<Card>>> {
        if hand_count.checked_mul(hand_size)? > self.cards.len() {
            return None;
        }
        if hand_size == 0 {
            return Some(vec![Vec::new(); hand_count]);
        }
        Some(
            self.cards
                .chunks(hand_size)
                .take(hand_count)
                .map(|chunk| chunk.to_vec())
                .collect(),
        )
    }
}
