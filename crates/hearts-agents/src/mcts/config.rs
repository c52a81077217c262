use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How far a rollout plays before it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RolloutHorizon {
    #[default]
    EndOfRound,
    EndOfTrick,
}

/// When a search stops starting new rollouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    Iterations(u32),
    Deadline(Duration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Rollouts per decision when no time budget is set.
    pub simulations: u32,
    /// UCB exploration constant.
    pub exploration: f64,
    /// A rollout counts as a win when the agent's round score is strictly below this.
    pub success_threshold: u32,
    pub horizon: RolloutHorizon,
    /// Wall-clock budget per decision. Overrides `simulations` when set.
    pub time_budget_ms: Option<u64>,
    pub workers: usize,
    /// Redeal cards the agent cannot see before each rollout.
    pub determinize: bool,
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            exploration: 1.5,
            success_threshold: 5,
            horizon: RolloutHorizon::EndOfRound,
            time_budget_ms: None,
            workers: 1,
            determinize: true,
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_horizon(mut self, horizon: RolloutHorizon) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis() as u64);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_determinize(mut self, determinize: bool) -> Self {
        self.determinize = determinize;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn budget(&self) -> SearchBudget {
        match self.time_budget_ms {
            Some(ms) => SearchBudget::Deadline(Duration::from_millis(ms)),
            None => SearchBudget::Iterations(self.simulations),
        }
    }

    /// Returns the name of the first field that cannot drive a search.
    pub fn invalid_field(&self) -> Option<(&'static str, String)> {
        if self.time_budget_ms.is_none() && self.simulations == 0 {
            return Some(("simulations", "must be at least 1".to_string()));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Some((
                "exploration",
                format!("must be a non-negative number, got {}", self.exploration),
            ));
        }
        if self.workers == 0 {
            return Some(("workers", "must be at least 1".to_string()));
        }
        if self.time_budget_ms == Some(0) {
            return Some(("time_budget_ms", "must be positive when set".to_string()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{MctsConfig, RolloutHorizon, SearchBudget};
    use std::time::Duration;

    #[test]
    fn defaults_match_documented_values() {
        let config = MctsConfig::default();
        assert_eq!(config.simulations, 1000);
        assert!((config.exploration - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.success_threshold, 5);
        assert_eq!(config.horizon, RolloutHorizon::EndOfRound);
        assert_eq!(config.workers, 1);
        assert!(config.determinize);
        assert_eq!(config.budget(), SearchBudget::Iterations(1000));
        assert!(config.invalid_field().is_none());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = MctsConfig::default()
            .with_simulations(50)
            .with_exploration(0.7)
            .with_horizon(RolloutHorizon::EndOfTrick)
            .with_time_budget(Duration::from_millis(250))
            .with_seed(3);
        assert_eq!(config.simulations, 50);
        assert_eq!(config.horizon, RolloutHorizon::EndOfTrick);
        assert_eq!(config.seed, Some(3));
        assert_eq!(
            config.budget(),
            SearchBudget::Deadline(Duration::from_millis(250))
        );
    }

    #[test]
    fn rejects_unusable_values() {
        let zero = MctsConfig::default().with_simulations(0);
        assert_eq!(zero.invalid_field().map(|(field, _)| field), Some("simulations"));

        let negative = MctsConfig::default().with_exploration(-1.0);
        assert_eq!(
            negative.invalid_field().map(|(field, _)| field),
            Some("exploration")
        );

        let no_workers = MctsConfig::default().with_workers(0);
        assert_eq!(no_workers.invalid_field().map(|(field, _)| field), Some("workers"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: MctsConfig =
            serde_json::from_str(r#"{"simulations": 20, "horizon": "end-of-trick"}"#).unwrap();
        assert_eq!(config.simulations, 20);
        assert_eq!(config.horizon, RolloutHorizon::EndOfTrick);
        assert_eq!(config.success_threshold, 5);
    }
}
