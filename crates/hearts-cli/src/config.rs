use hearts_agents::{FillPolicy, Lineup, MctsConfig};
use hearts_core::game::engine::DEFAULT_TARGET_SCORE;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Game settings loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub seats: SeatsConfig,
    pub mcts: MctsConfig,
    pub game: RulesConfig,
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    ///
    /// Values are not validated here, so command-line overrides can still repair them. Call
    /// [`GameConfig::validate`] once everything has been applied.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
            source,
            path: path_buf,
        })
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.seats.validate()?;
        if let Some((field, message)) = self.mcts.invalid_field() {
            return Err(ValidationError::InvalidField {
                field: format!("mcts.{field}"),
                message,
            });
        }
        self.game.validate()?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".into(),
                message: format!("unknown level '{}'", self.logging.level),
            });
        }
        Ok(())
    }

    pub fn lineup(&self) -> Lineup {
        Lineup {
            mcts: self.seats.mcts,
            random: self.seats.random,
            manual: self.seats.manual,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeatsConfig {
    pub mcts: usize,
    pub random: usize,
    pub manual: usize,
    /// Who takes the seats nobody asked for.
    pub fill: FillPolicy,
}

impl Default for SeatsConfig {
    fn default() -> Self {
        Self {
            mcts: 1,
            random: 3,
            manual: 0,
            fill: FillPolicy::Manual,
        }
    }
}

impl SeatsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let requested = self.mcts + self.random + self.manual;
        if requested > 4 {
            return Err(ValidationError::InvalidField {
                field: "seats".into(),
                message: format!("{requested} seats requested but a table has only four"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub target_score: u32,
    /// Seed for dealing. Random when unset.
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
        }
    }
}

impl RulesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.target_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "game.target_score".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_agents::RolloutHorizon;

    const FULL_YAML: &str = r#"
seats:
  mcts: 2
  random: 1
  fill: random
mcts:
  simulations: 64
  exploration: 1.2
  horizon: end-of-trick
  workers: 2
  seed: 9
game:
  target_score: 50
  seed: 1234
logging:
  level: "debug"
  json: true
"#;

    #[test]
    fn loads_and_validates_full_config() {
        let mut cfg: GameConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.seats.mcts, 2);
        assert_eq!(cfg.seats.manual, 0);
        assert_eq!(cfg.seats.fill, FillPolicy::Random);
        assert_eq!(cfg.mcts.simulations, 64);
        assert_eq!(cfg.mcts.horizon, RolloutHorizon::EndOfTrick);
        assert_eq!(cfg.mcts.success_threshold, 5);
        assert_eq!(cfg.game.target_score, 50);
        assert_eq!(cfg.game.seed, Some(1234));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert!(cfg.logging.json);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: GameConfig = serde_yaml::from_str("{}").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.lineup(), Lineup { mcts: 1, random: 3, manual: 0 });
        assert_eq!(cfg.game.target_score, 100);
    }

    #[test]
    fn rejects_crowded_tables() {
        let mut cfg: GameConfig =
            serde_yaml::from_str("seats:\n  mcts: 3\n  random: 2\n").expect("parse yaml");
        let err = cfg.validate().expect_err("too many seats");
        assert!(err.to_string().starts_with("seats:"));
    }

    #[test]
    fn rejects_bad_agent_and_logging_fields() {
        let mut cfg: GameConfig =
            serde_yaml::from_str("mcts:\n  workers: 0\n").expect("parse yaml");
        let ValidationError::InvalidField { field, .. } = cfg.validate().unwrap_err();
        assert_eq!(field, "mcts.workers");

        let mut cfg: GameConfig =
            serde_yaml::from_str("logging:\n  level: loud\n").expect("parse yaml");
        let ValidationError::InvalidField { field, .. } = cfg.validate().unwrap_err();
        assert_eq!(field, "logging.level");
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let mut cfg: GameConfig =
            serde_yaml::from_str("logging:\n  level: \"  \"\n").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn from_path_reports_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "seats: [1, 2").expect("write");
        let err = GameConfig::from_path(&path).expect_err("parse failure");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            GameConfig::from_path(&missing),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn crowded_file_loads_and_can_be_fixed_before_validation() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("crowded.yaml");
        std::fs::write(&path, "seats:\n  mcts: 3\n  random: 2\n").expect("write");

        let mut cfg = GameConfig::from_path(&path).expect("loads without validating");
        assert_eq!(cfg.lineup(), Lineup { mcts: 3, random: 2, manual: 0 });
        cfg.seats.random = 1;
        cfg.validate().expect("four seats after the override");
    }
}
