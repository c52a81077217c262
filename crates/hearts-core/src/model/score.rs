use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// Cumulative penalty points per seat, indexed by [`PlayerPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub fn add_penalty(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] += points;
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    /// Lowest total; ties go to the earlier seat.
    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .min_by_key(|seat| self.score(*seat))
            .unwrap_or(PlayerPosition::North)
    }

    pub fn max_score(&self) -> u32 {
        self.totals.iter().copied().max().unwrap_or(0)
    }

    pub fn apply_round(&mut self, penalties: [u32; 4]) {
        for seat in PlayerPosition::LOOP.iter().copied() {
            self.add_penalty(seat, penalties[seat.index()]);
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
