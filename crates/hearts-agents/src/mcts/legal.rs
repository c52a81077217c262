use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::suit::Suit;

/// Cards the agent may play, in hand order.
///
/// Following the lead suit is mandatory when possible. Leading a heart needs either broken
/// hearts or a hand with nothing else.
pub fn valid_moves(hand: &Hand, lead_suit: Option<Suit>, penalty_unlocked: bool) -> Vec<Card> {
    let cards = hand.cards();
    if let Some(lead) = lead_suit {
        let following: Vec<Card> = cards.iter().copied().filter(|c| c.suit == lead).collect();
        return if following.is_empty() {
            cards.to_vec()
        } else {
            following
        };
    }
    if penalty_unlocked {
        return cards.to_vec();
    }
    let safe: Vec<Card> = cards
        .iter()
        .copied()
        .filter(|c| c.suit != Suit::Hearts)
        .collect();
    if safe.is_empty() { cards.to_vec() } else { safe }
}

#[cfg(test)]
mod tests {
    use super::valid_moves;
    use hearts_core::model::card::Card;
    use hearts_core::model::hand::Hand;
    use hearts_core::model::rank::Rank;
    use hearts_core::model::suit::Suit;

    #[test]
    fn all_hearts_hand_may_lead_hearts() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Three, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Hearts),
        ]);
        assert_eq!(valid_moves(&hand, None, false).len(), 2);
    }

    #[test]
    fn void_in_lead_suit_frees_every_card() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Three, Suit::Hearts),
            Card::QUEEN_OF_SPADES,
        ]);
        assert_eq!(valid_moves(&hand, Some(Suit::Clubs), false).len(), 2);
        assert_eq!(
            valid_moves(&hand, Some(Suit::Spades), false),
            vec![Card::QUEEN_OF_SPADES]
        );
    }

    #[test]
    fn empty_hand_has_no_moves() {
        assert!(valid_moves(&Hand::new(), None, true).is_empty());
    }
}
