//! Flat Monte Carlo tree search over the agent's next card.
//!
//! Every decision runs a batch of random rollouts from a clone of the table and credits the
//! first card the agent played in each one, keyed by the decision point it was played from.
//! The statistics table lives as long as the agent, so returning to the same decision point
//! picks up where the earlier search stopped.

pub mod config;
pub mod legal;
pub mod rollout;
pub mod stats;

pub use config::{MctsConfig, RolloutHorizon, SearchBudget};
pub use stats::{DecisionPoint, NodeStats, SearchStats, StateKey, StatsTable};

use hearts_core::error::GameError;
use hearts_core::game::table::Table;
use hearts_core::model::card::Card;
use hearts_core::model::player::PlayerPosition;
use hearts_core::policy::{PlayView, PolicyError, SeatPolicy};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum MctsError {
    #[error("invalid MCTS setting `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },
    #[error("failed to start rollout workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Upper-confidence pick among `legal`, in the order given, from the counts kept for `decision`.
///
/// Unvisited cards score infinity. Ties keep the earlier card. Returns `None` only when
/// `legal` is empty.
pub fn select_card(
    stats: &StatsTable,
    seat: PlayerPosition,
    decision: DecisionPoint,
    legal: &[Card],
    exploration: f64,
) -> Option<Card> {
    let total = stats.total_visits() as f64;
    let mut best: Option<(Card, f64)> = None;
    for &card in legal {
        let score = match stats.get(&StateKey::new(seat, decision, card)) {
            Some(node) if node.visits > 0 => {
                node.win_rate() + exploration * (total.ln() / node.visits as f64).sqrt()
            }
            _ => f64::INFINITY,
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((card, score));
        }
    }
    best.map(|(card, _)| card)
}

pub struct MctsAgent {
    config: MctsConfig,
    stats: StatsTable,
    pool: Option<rayon::ThreadPool>,
    base_seed: u64,
    decisions: u64,
    last_search: Option<SearchStats>,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Result<Self, MctsError> {
        if let Some((field, message)) = config.invalid_field() {
            return Err(MctsError::InvalidConfig { field, message });
        }
        let pool = if config.workers > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.workers)
                    .thread_name(|index| format!("mcts-rollout-{index}"))
                    .build()?,
            )
        } else {
            None
        };
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            stats: StatsTable::new(),
            pool,
            base_seed,
            decisions: 0,
            last_search: None,
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    pub fn last_search(&self) -> Option<&SearchStats> {
        self.last_search.as_ref()
    }

    /// Runs rollouts from `table` for `seat` and picks a card. The table is never modified.
    pub fn decide_move(
        &mut self,
        table: &Table,
        seat: PlayerPosition,
    ) -> Result<Card, PolicyError> {
        let hand = table.seat(seat).hand();
        if hand.is_empty() {
            return Err(PolicyError::EmptyHand);
        }
        let legal = if table.opening_card_required() && hand.contains(Card::TWO_OF_CLUBS) {
            vec![Card::TWO_OF_CLUBS]
        } else {
            legal::valid_moves(hand, table.lead_suit(), table.penalty_unlocked())
        };
        if let [only] = legal.as_slice() {
            return Ok(*only);
        }

        let decision = DecisionPoint::from_view(&table.play_view(seat, &legal));
        let search = self
            .search(table, seat, decision)
            .map_err(|err| PolicyError::Simulation(Box::new(err)))?;
        let choice = select_card(&self.stats, seat, decision, &legal, self.config.exploration)
            .ok_or(PolicyError::NoLegalMoves)?;

        event!(
            target: "hearts_agents::mcts",
            Level::DEBUG,
            seat = %seat,
            round = table.round_number(),
            trick = table.trick_number(),
            legal = legal.len(),
            rollouts = search.rollouts,
            failed = search.failed_rollouts,
            success_rate = search.success_rate(),
            elapsed_us = search.elapsed_us,
            table_size = search.table_size,
            chosen = %choice,
            "search complete"
        );
        self.last_search = Some(search);
        Ok(choice)
    }

    /// Stops recording at the first engine error and returns it once the workers are done.
    fn search(
        &mut self,
        table: &Table,
        seat: PlayerPosition,
        decision: DecisionPoint,
    ) -> Result<SearchStats, GameError> {
        let start = Instant::now();
        let seed = rollout::rollout_seed(self.base_seed, self.decisions);
        self.decisions += 1;

        let stats = &self.stats;
        let config = &self.config;
        let completed = AtomicU32::new(0);
        let failed = AtomicU32::new(0);
        let successes = AtomicU32::new(0);
        let error: Mutex<Option<GameError>> = Mutex::new(None);

        let run_one = |index: u64| {
            match rollout::run(table, seat, config, rollout::rollout_seed(seed, index)) {
                Ok(Some(outcome)) => {
                    let key = StateKey::new(seat, decision, outcome.first_card);
                    stats.record(key, outcome.success);
                    completed.fetch_add(1, Ordering::Relaxed);
                    if outcome.success {
                        successes.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Ok(None) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    error.lock().get_or_insert(err);
                }
            }
        };

        match (config.budget(), self.pool.as_ref()) {
            (SearchBudget::Iterations(n), None) => {
                (0..u64::from(n)).for_each(run_one);
            }
            (SearchBudget::Iterations(n), Some(pool)) => {
                pool.install(|| (0..u64::from(n)).into_par_iter().for_each(run_one));
            }
            (SearchBudget::Deadline(budget), pool) => {
                let deadline = start + budget;
                let next = AtomicU64::new(0);
                let worker = |_: usize| loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index > 0 && (Instant::now() >= deadline || error.lock().is_some()) {
                        break;
                    }
                    run_one(index);
                };
                match pool {
                    Some(pool) => {
                        let workers = pool.current_num_threads();
                        pool.install(|| (0..workers).into_par_iter().for_each(worker));
                    }
                    None => worker(0),
                }
            }
        }

        if let Some(err) = error.into_inner() {
            return Err(err);
        }
        Ok(SearchStats {
            rollouts: completed.into_inner(),
            failed_rollouts: failed.into_inner(),
            successes: successes.into_inner(),
            elapsed_us: start.elapsed().as_micros() as u64,
            table_size: self.stats.len(),
        })
    }
}

impl SeatPolicy for MctsAgent {
    /// Without the table there is nothing to simulate, so this falls back to the statistics.
    fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError> {
        if view.hand.is_empty() {
            return Err(PolicyError::EmptyHand);
        }
        let decision = DecisionPoint::from_view(view);
        select_card(&self.stats, view.seat, decision, view.legal, self.config.exploration)
            .ok_or(PolicyError::NoLegalMoves)
    }

    fn choose_card_with_table(
        &mut self,
        table: &Table,
        seat: PlayerPosition,
    ) -> Result<Card, PolicyError> {
        self.decide_move(table, seat)
    }

    fn kind(&self) -> &'static str {
        "mcts"
    }
}
