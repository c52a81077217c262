use hearts_core::game::engine::{GameOutcome, RoundSummary};
use hearts_core::game::table::Table;
use hearts_core::model::player::PlayerPosition;
use std::fmt::Write;

/// Per-round block printed after every round.
pub fn render_round(table: &Table, summary: &RoundSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {} (pass {}), led by {}",
        summary.round_number,
        summary.direction.as_str().to_lowercase(),
        table.seat(summary.leader).name()
    );
    for seat in PlayerPosition::LOOP {
        let _ = writeln!(
            out,
            "  {:<16} +{:>2}  total {:>3}",
            table.seat(seat).name(),
            summary.penalties[seat.index()],
            summary.totals[seat.index()]
        );
    }
    out
}

pub fn render_outcome(table: &Table, outcome: &GameOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Final scores after {} rounds:", outcome.rounds_played);
    for seat in PlayerPosition::LOOP {
        let _ = writeln!(
            out,
            "  {:<16} {:>3}",
            table.seat(seat).name(),
            outcome.scores[seat.index()]
        );
    }
    let _ = writeln!(
        out,
        "Winner: {} with {} points",
        outcome.winner_name,
        outcome.scores[outcome.winner.index()]
    );
    out
}
