pub mod error;
pub mod game;
pub mod model;
pub mod policy;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "hearts"
    }

    pub const fn description() -> &'static str {
        "Four-seat Hearts with Monte Carlo tree search players"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
