use crate::game::table::RoundPhase;
use crate::model::card::Card;
use crate::model::passing::PassingError;
use crate::model::player::PlayerPosition;
use crate::model::rules::IllegalPlay;
use crate::model::trick::TrickError;
use crate::policy::PolicyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{seat} does not hold {card}")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("{seat} cannot play {card}: {reason}")]
    IllegalPlay {
        seat: PlayerPosition,
        card: Card,
        reason: IllegalPlay,
    },
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("operation not allowed while the round is {0:?}")]
    WrongPhase(RoundPhase),
    #[error("no seat holds the two of clubs after the deal")]
    MissingOpeningCard,
    #[error("deck cannot deal {hand_size} cards to {hands} seats")]
    ShortDeck { hands: usize, hand_size: usize },
    #[error(transparent)]
    Passing(#[from] PassingError),
    #[error(transparent)]
    Trick(#[from] TrickError),
    #[error("{seat} failed to choose a card: {source}")]
    Policy {
        seat: PlayerPosition,
        #[source]
        source: PolicyError,
    },
}
