use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// A seat's cards, kept sorted by suit then rank. That order is "hand order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    /// Inserts `card` at its hand-order position.
    pub fn add(&mut self, card: Card) {
        let at = self
            .cards
            .partition_point(|held| Self::order_key(held) < Self::order_key(&card));
        self.cards.insert(at, card);
    }

    /// Returns false when the card was not held.
    pub fn remove(&mut self, card: Card) -> bool {
        let Some(at) = self.cards.iter().position(|held| *held == card) else {
            return false;
        };
        self.cards.remove(at);
        true
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    pub fn only_hearts(&self) -> bool {
        self.cards.iter().all(|c| c.suit.is_heart())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn order_key(card: &Card) -> (Suit, Rank) {
        (card.suit, card.rank)
    }

    fn sort(&mut self) {
        self.cards.sort_unstable_by_key(Self::order_key);
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn passed_cards_land_in_hand_order() {
        let mut hand = Hand::with_cards(vec![
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Diamonds),
        ]);
        hand.add(Card::new(Rank::Queen, Suit::Clubs));
        hand.add(Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(
            hand.cards(),
            [
                Card::new(Rank::Four, Suit::Clubs),
                Card::new(Rank::Queen, Suit::Clubs),
                Card::new(Rank::Ten, Suit::Diamonds),
                Card::new(Rank::Two, Suit::Hearts),
                Card::new(Rank::Jack, Suit::Hearts),
            ]
        );
    }

    #[test]
    fn removing_a_missing_card_leaves_the_hand_alone() {
        let mut hand = Hand::with_cards(vec![Card::TWO_OF_CLUBS, Card::QUEEN_OF_SPADES]);
        assert!(!hand.remove(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(hand.len(), 2);
        assert!(hand.remove(Card::QUEEN_OF_SPADES));
        assert!(!hand.contains(Card::QUEEN_OF_SPADES));
        assert!(hand.remove(Card::TWO_OF_CLUBS));
        assert!(hand.is_empty());
    }

    #[test]
    fn suit_queries() {
        let mut hand = Hand::with_cards(vec![
            Card::new(Rank::Six, Suit::Hearts),
            Card::new(Rank::King, Suit::Hearts),
        ]);
        assert!(hand.only_hearts());
        assert!(!hand.has_suit(Suit::Spades));
        hand.add(Card::new(Rank::Three, Suit::Spades));
        assert!(!hand.only_hearts());
        assert!(hand.has_suit(Suit::Spades));
    }
}
