use super::table::{RoundPhase, Table};
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// Readable view of a [`Table`], with cards rendered as short strings ("QS", "10H").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSnapshot {
    pub round_number: u32,
    pub trick_number: u8,
    pub phase: RoundPhase,
    pub penalty_unlocked: bool,
    pub lead_suit: Option<String>,
    pub next_to_play: Option<PlayerPosition>,
    pub current_trick: Vec<(PlayerPosition, String)>,
    pub seats: Vec<SeatSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatSnapshot {
    pub position: PlayerPosition,
    pub name: String,
    pub hand: Vec<String>,
    pub captured: Vec<String>,
    pub round_points: u32,
    pub total_score: u32,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let seats = PlayerPosition::LOOP
            .iter()
            .map(|&position| {
                let seat = table.seat(position);
                SeatSnapshot {
                    position,
                    name: seat.name().to_string(),
                    hand: seat.hand().iter().map(ToString::to_string).collect(),
                    captured: seat.captured().iter().map(ToString::to_string).collect(),
                    round_points: seat.round_score(),
                    total_score: table.scores().score(position),
                }
            })
            .collect();

        TableSnapshot {
            round_number: table.round_number(),
            trick_number: table.trick_number(),
            phase: table.phase(),
            penalty_unlocked: table.penalty_unlocked(),
            lead_suit: table.lead_suit().map(|suit| suit.name().to_string()),
            next_to_play: table.next_to_play(),
            current_trick: table
                .current_trick()
                .plays()
                .iter()
                .map(|play| (play.position, play.card.to_string()))
                .collect(),
            seats,
        }
    }

    pub fn to_json(table: &Table) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(table))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
