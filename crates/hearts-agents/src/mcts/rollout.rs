use super::config::{MctsConfig, RolloutHorizon};
use hearts_core::error::GameError;
use hearts_core::game::table::{PlayOutcome, Table};
use hearts_core::model::card::Card;
use hearts_core::model::player::PlayerPosition;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutOutcome {
    /// The first card `seat` played in the rollout.
    pub first_card: Card,
    pub score: u32,
    pub success: bool,
}

/// Seed for rollout `index` of a search seeded with `base`.
pub fn rollout_seed(base: u64, index: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = base ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Plays a clone of `table` forward with uniformly random legal cards for every seat.
///
/// `seat` must be the seat to play. Returns `Ok(None)` when nothing could be played.
pub fn run(
    table: &Table,
    seat: PlayerPosition,
    config: &MctsConfig,
    seed: u64,
) -> Result<Option<RolloutOutcome>, GameError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut sim = table.clone();
    if config.determinize {
        sim.redeal_hidden(seat, &mut rng);
    }

    let mut first_card = None;
    while let Some(next) = sim.next_to_play() {
        let legal = sim.legal_moves_for(next);
        let Some(&card) = legal.choose(&mut rng) else {
            break;
        };
        if next == seat && first_card.is_none() {
            first_card = Some(card);
        }

        match sim.apply_play(next, card)? {
            PlayOutcome::Played => {}
            PlayOutcome::TrickCompleted { .. } => {
                if config.horizon == RolloutHorizon::EndOfTrick && first_card.is_some() {
                    break;
                }
            }
            PlayOutcome::RoundCompleted { .. } => break,
        }
    }

    Ok(first_card.map(|first_card| {
        let score = sim.round_penalty(seat);
        RolloutOutcome {
            first_card,
            score,
            success: score < config.success_threshold,
        }
    }))
}
