use hearts_core::model::card::Card;
use hearts_core::model::player::PlayerPosition;
use hearts_core::model::suit::Suit;
use hearts_core::policy::PlayView;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bit `13 * suit + rank` of a 52-card set.
pub fn card_bit(card: Card) -> u64 {
    1 << (card.suit.index() * 13 + card.rank.index())
}

fn card_set(cards: impl IntoIterator<Item = Card>) -> u64 {
    cards.into_iter().fold(0, |set, card| set | card_bit(card))
}

/// What the acting seat knows when it has to play: its own cards and the trick in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecisionPoint {
    /// Cards held, as a [`card_bit`] set.
    pub hand: u64,
    /// Cards already on the table this trick.
    pub trick: u64,
    pub lead_suit: Option<Suit>,
    pub penalty_unlocked: bool,
    pub trick_number: u8,
}

impl DecisionPoint {
    pub fn from_view(view: &PlayView<'_>) -> Self {
        Self {
            hand: card_set(view.hand.iter().copied()),
            trick: card_set(view.trick.cards()),
            lead_suit: view.lead_suit,
            penalty_unlocked: view.penalty_unlocked,
            trick_number: view.trick_number,
        }
    }
}

/// A decision point of one seat together with the first card that seat played from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub seat: PlayerPosition,
    pub decision: DecisionPoint,
    pub card: Card,
}

impl StateKey {
    pub const fn new(seat: PlayerPosition, decision: DecisionPoint, card: Card) -> Self {
        Self {
            seat,
            decision,
            card,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeStats {
    pub wins: u64,
    pub visits: u64,
}

impl NodeStats {
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }
}

/// Win/visit counts shared by every rollout of one agent, kept for the whole game.
#[derive(Debug, Default)]
pub struct StatsTable {
    nodes: RwLock<HashMap<StateKey, NodeStats>>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one visit, and one win when `success` is set, in a single write.
    pub fn record(&self, key: StateKey, success: bool) {
        let mut nodes = self.nodes.write();
        let entry = nodes.entry(key).or_default();
        entry.visits += 1;
        if success {
            entry.wins += 1;
        }
    }

    pub fn insert(&self, key: StateKey, stats: NodeStats) {
        self.nodes.write().insert(key, stats);
    }

    pub fn get(&self, key: &StateKey) -> Option<NodeStats> {
        self.nodes.read().get(key).copied()
    }

    pub fn total_visits(&self) -> u64 {
        self.nodes.read().values().map(|node| node.visits).sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Copy of every entry, sorted by key for stable comparisons.
    pub fn entries(&self) -> Vec<(StateKey, NodeStats)> {
        let mut entries: Vec<_> = self
            .nodes
            .read()
            .iter()
            .map(|(key, stats)| (*key, *stats))
            .collect();
        entries.sort_by_key(|(key, _)| (key.seat, key.decision, key.card.suit, key.card.rank));
        entries
    }
}

/// Summary of one decision's search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub rollouts: u32,
    pub failed_rollouts: u32,
    pub successes: u32,
    pub elapsed_us: u64,
    pub table_size: usize,
}

impl SearchStats {
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.successes as f64 / self.rollouts as f64
        }
    }
}
