//! Card-play legality shared by the table and every seat policy that asks the table.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalPlay {
    #[error("must follow {0}")]
    MustFollowSuit(Suit),
    #[error("hearts cannot be led until broken")]
    HeartsNotBroken,
    #[error("the first trick must open with the two of clubs")]
    MustPlayOpeningCard,
}

/// Cards in `hand` that may be played given the trick's lead suit and the hearts-broken flag.
///
/// The opener may not lead a heart before hearts are broken unless the hand holds nothing
/// else. Followers must follow the lead suit when able and may play anything otherwise.
/// The result keeps hand order.
pub fn legal_moves(hand: &Hand, lead_suit: Option<Suit>, penalty_unlocked: bool) -> Vec<Card> {
    match lead_suit {
        Some(lead) if hand.has_suit(lead) => {
            hand.iter().copied().filter(|c| c.suit == lead).collect()
        }
        Some(_) => hand.cards().to_vec(),
        None if penalty_unlocked || hand.only_hearts() => hand.cards().to_vec(),
        None => hand.iter().copied().filter(|c| !c.suit.is_heart()).collect(),
    }
}

/// Checks a single card against [`legal_moves`] and reports why it is rejected.
///
/// The caller is responsible for checking that `card` is held.
pub fn check_play(
    hand: &Hand,
    card: Card,
    lead_suit: Option<Suit>,
    penalty_unlocked: bool,
) -> Result<(), IllegalPlay> {
    match lead_suit {
        Some(lead) if card.suit != lead && hand.has_suit(lead) => {
            Err(IllegalPlay::MustFollowSuit(lead))
        }
        None if card.suit.is_heart() && !penalty_unlocked && !hand.only_hearts() => {
            Err(IllegalPlay::HeartsNotBroken)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{IllegalPlay, check_play, legal_moves};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn mixed_hand() -> Hand {
        Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Diamonds),
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::King, Suit::Hearts),
            Card::QUEEN_OF_SPADES,
        ])
    }

    #[test]
    fn followers_must_follow_held_lead_suit() {
        let hand = mixed_hand();
        let moves = legal_moves(&hand, Some(Suit::Hearts), false);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|c| c.suit == Suit::Hearts));
        assert_eq!(
            check_play(&hand, Card::QUEEN_OF_SPADES, Some(Suit::Hearts), false),
            Err(IllegalPlay::MustFollowSuit(Suit::Hearts))
        );
    }

    #[test]
    fn void_followers_may_play_anything() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::QUEEN_OF_SPADES,
        ]);
        assert_eq!(legal_moves(&hand, Some(Suit::Clubs), false).len(), 2);
        assert!(check_play(&hand, Card::QUEEN_OF_SPADES, Some(Suit::Clubs), false).is_ok());
    }

    #[test]
    fn opener_cannot_lead_hearts_before_broken() {
        let hand = mixed_hand();
        let moves = legal_moves(&hand, None, false);
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|c| !c.suit.is_heart()));
        assert_eq!(
            check_play(&hand, Card::new(Rank::Two, Suit::Hearts), None, false),
            Err(IllegalPlay::HeartsNotBroken)
        );
    }

    #[test]
    fn opener_may_lead_hearts_once_broken_or_forced() {
        let hand = mixed_hand();
        assert_eq!(legal_moves(&hand, None, true), hand.cards().to_vec());

        let all_hearts = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Hearts),
        ]);
        assert_eq!(legal_moves(&all_hearts, None, false).len(), 2);
        assert!(check_play(&all_hearts, Card::new(Rank::Ace, Suit::Hearts), None, false).is_ok());
    }

    #[test]
    fn empty_hand_has_no_moves() {
        assert!(legal_moves(&Hand::new(), None, false).is_empty());
        assert!(legal_moves(&Hand::new(), Some(Suit::Spades), true).is_empty());
    }
}
