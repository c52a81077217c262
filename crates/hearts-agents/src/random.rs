use hearts_core::model::card::Card;
use hearts_core::policy::{PlayView, PolicyError, SeatPolicy};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Plays a uniformly random legal card.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatPolicy for RandomPolicy {
    fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError> {
        if view.hand.is_empty() {
            return Err(PolicyError::EmptyHand);
        }
        view.legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(PolicyError::NoLegalMoves)
    }

    fn kind(&self) -> &'static str {
        "random"
    }
}
