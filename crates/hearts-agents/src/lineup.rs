use crate::manual::ManualPolicy;
use crate::mcts::{MctsAgent, MctsConfig, MctsError};
use crate::random::RandomPolicy;
use hearts_core::game::engine::SeatEntry;
use hearts_core::policy::SeatPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SEATS: usize = 4;

/// Who takes the seats left over after the MCTS and random players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    #[default]
    Manual,
    Random,
}

#[derive(Debug, Error)]
pub enum LineupError {
    #[error("{requested} seats requested but a table has only four")]
    TooManySeats { requested: usize },
    #[error(transparent)]
    Agent(#[from] MctsError),
}

/// Seat mix for one game. Seats fill in order: MCTS, random, then manual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lineup {
    pub mcts: usize,
    pub random: usize,
    pub manual: usize,
}

impl Lineup {
    pub fn new(mcts: usize, random: usize, manual: usize) -> Result<Self, LineupError> {
        let lineup = Self {
            mcts,
            random,
            manual,
        };
        lineup.validate()?;
        Ok(lineup)
    }

    pub fn validate(&self) -> Result<(), LineupError> {
        let requested = self.mcts + self.random + self.manual;
        if requested > SEATS {
            return Err(LineupError::TooManySeats { requested });
        }
        Ok(())
    }

    /// Extra seats that `fill` will take.
    pub fn open_seats(&self) -> usize {
        SEATS.saturating_sub(self.mcts + self.random + self.manual)
    }

    /// Builds the four seats with stdin/stdout for manual players.
    pub fn build(
        &self,
        config: &MctsConfig,
        fill: FillPolicy,
    ) -> Result<[SeatEntry; SEATS], LineupError> {
        self.build_with(config, fill, || Box::new(ManualPolicy::stdio()))
    }

    /// Like [`Lineup::build`] with a custom constructor for manual seats.
    ///
    /// Each MCTS seat gets its own agent. Seeded configs give each agent and random seat a
    /// distinct seed derived from the base.
    pub fn build_with<F>(
        &self,
        config: &MctsConfig,
        fill: FillPolicy,
        mut manual: F,
    ) -> Result<[SeatEntry; SEATS], LineupError>
    where
        F: FnMut() -> Box<dyn SeatPolicy>,
    {
        self.validate()?;
        let (random, manual_count) = match fill {
            FillPolicy::Manual => (self.random, self.manual + self.open_seats()),
            FillPolicy::Random => (self.random + self.open_seats(), self.manual),
        };

        let mut entries = Vec::with_capacity(SEATS);
        for i in 0..self.mcts {
            let mut seat_config = config.clone();
            if let Some(seed) = config.seed {
                seat_config.seed = Some(seed.wrapping_add(i as u64));
            }
            entries.push(SeatEntry::new(
                format!("MCTS Player {}", i + 1),
                Box::new(MctsAgent::new(seat_config)?),
            ));
        }
        for i in 0..random {
            let policy = match config.seed {
                Some(seed) => RandomPolicy::seeded(seed.wrapping_add(100 + i as u64)),
                None => RandomPolicy::new(),
            };
            entries.push(SeatEntry::new(
                format!("Random Player {}", i + 1),
                Box::new(policy),
            ));
        }
        for i in 0..manual_count {
            entries.push(SeatEntry::new(format!("Player {}", i + 1), manual()));
        }

        let requested = entries.len();
        entries
            .try_into()
            .map_err(|_| LineupError::TooManySeats { requested })
    }
}

#[cfg(test)]
mod tests {
    use super::{FillPolicy, Lineup, LineupError};
    use crate::mcts::MctsConfig;
    use crate::random::RandomPolicy;

    #[test]
    fn more_than_four_seats_is_rejected() {
        assert!(matches!(
            Lineup::new(3, 2, 0),
            Err(LineupError::TooManySeats { requested: 5 })
        ));
        assert!(Lineup::new(1, 3, 0).is_ok());
    }

    #[test]
    fn seats_are_ordered_and_named_by_kind() {
        let lineup = Lineup::new(1, 2, 0).unwrap();
        let seats = lineup
            .build_with(
                &MctsConfig::default().with_simulations(10),
                FillPolicy::Manual,
                || Box::new(RandomPolicy::seeded(0)),
            )
            .unwrap();
        let names: Vec<&str> = seats.iter().map(|seat| seat.name.as_str()).collect();
        assert_eq!(
            names,
            ["MCTS Player 1", "Random Player 1", "Random Player 2", "Player 1"]
        );
        assert_eq!(seats[0].policy.kind(), "mcts");
        assert_eq!(seats[1].policy.kind(), "random");
    }

    #[test]
    fn random_fill_takes_open_seats() {
        let lineup = Lineup::new(2, 0, 0).unwrap();
        assert_eq!(lineup.open_seats(), 2);
        let seats = lineup
            .build_with(
                &MctsConfig::default().with_simulations(10).with_seed(4),
                FillPolicy::Random,
                || panic!("no manual seats expected"),
            )
            .unwrap();
        let kinds: Vec<&str> = seats.iter().map(|seat| seat.policy.kind()).collect();
        assert_eq!(kinds, ["mcts", "mcts", "random", "random"]);
        assert_eq!(seats[3].name, "Random Player 2");
    }

    #[test]
    fn bad_agent_settings_surface_through_the_lineup() {
        let lineup = Lineup::new(1, 0, 0).unwrap();
        let result = lineup.build_with(
            &MctsConfig::default().with_simulations(0),
            FillPolicy::Random,
            || Box::new(RandomPolicy::seeded(0)),
        );
        assert!(matches!(result, Err(LineupError::Agent(_))));
    }
}
