use crate::error::GameError;
use crate::game::table::Table;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::{PASS_SIZE, PassingDirection};
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use thiserror::Error;

/// What a seat is allowed to see when it is asked for a card.
pub struct PlayView<'a> {
    pub seat: PlayerPosition,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub legal: &'a [Card],
    pub trick: &'a Trick,
    pub lead_suit: Option<Suit>,
    pub penalty_unlocked: bool,
    pub round_number: u32,
    pub trick_number: u8,
}

/// What a seat sees while choosing the cards it passes.
pub struct PassView<'a> {
    pub seat: PlayerPosition,
    pub name: &'a str,
    pub hand: &'a Hand,
    pub direction: PassingDirection,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("hand is empty")]
    EmptyHand,
    #[error("no legal card to play")]
    NoLegalMoves,
    #[error("hand holds fewer than three cards to pass")]
    ShortHand,
    #[error("input closed before a card was chosen")]
    InputClosed,
    #[error("simulated play failed: {0}")]
    Simulation(#[source] Box<GameError>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decision capability attached to each seat.
///
/// Simple policies only implement [`SeatPolicy::choose_card`] and see the restricted
/// [`PlayView`]. Policies that simulate override [`SeatPolicy::choose_card_with_table`],
/// which the table always calls and which receives the full table state.
pub trait SeatPolicy: Send {
    /// Choose one card from `view.legal`.
    fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError>;

    /// Entry point used by the game loop. Defaults to the restricted view.
    fn choose_card_with_table(
        &mut self,
        table: &Table,
        seat: PlayerPosition,
    ) -> Result<Card, PolicyError> {
        let legal = table.legal_moves_for(seat);
        let view = table.play_view(seat, &legal);
        self.choose_card(&view)
    }

    /// Choose three cards to pass. Defaults to the first three in hand order.
    fn choose_pass(&mut self, view: &PassView<'_>) -> Result<[Card; PASS_SIZE], PolicyError> {
        match view.hand.cards() {
            [a, b, c, ..] => Ok([*a, *b, *c]),
            _ => Err(PolicyError::ShortHand),
        }
    }

    /// Short label for logs.
    fn kind(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::{PassView, PolicyError, SeatPolicy};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::passing::PassingDirection;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    struct FirstLegal;

    impl SeatPolicy for FirstLegal {
        fn choose_card(&mut self, view: &super::PlayView<'_>) -> Result<Card, PolicyError> {
            view.legal.first().copied().ok_or(PolicyError::NoLegalMoves)
        }

        fn kind(&self) -> &'static str {
            "first-legal"
        }
    }

    #[test]
    fn default_pass_takes_first_three_in_hand_order() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Five, Suit::Clubs),
            Card::new(Rank::Three, Suit::Diamonds),
        ]);
        let view = PassView {
            seat: PlayerPosition::North,
            name: "Player 1",
            hand: &hand,
            direction: PassingDirection::Left,
        };
        let cards = FirstLegal.choose_pass(&view).unwrap();
        assert_eq!(
            cards,
            [
                Card::new(Rank::Five, Suit::Clubs),
                Card::new(Rank::Three, Suit::Diamonds),
                Card::new(Rank::Two, Suit::Hearts),
            ]
        );
    }

    #[test]
    fn default_pass_rejects_short_hands() {
        let hand = Hand::with_cards(vec![Card::TWO_OF_CLUBS]);
        let view = PassView {
            seat: PlayerPosition::East,
            name: "Player 2",
            hand: &hand,
            direction: PassingDirection::Right,
        };
        assert!(matches!(
            FirstLegal.choose_pass(&view),
            Err(PolicyError::ShortHand)
        ));
    }
}
