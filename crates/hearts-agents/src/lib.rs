pub mod lineup;
pub mod manual;
pub mod mcts;
pub mod random;

pub use lineup::{FillPolicy, Lineup, LineupError};
pub use manual::ManualPolicy;
pub use mcts::{DecisionPoint, MctsAgent, MctsConfig, MctsError, RolloutHorizon, SearchStats};
pub use random::RandomPolicy;
