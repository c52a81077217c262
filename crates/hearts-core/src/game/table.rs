use crate::error::GameError;
use crate::game::serialization::TableSnapshot;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::passing::{PASS_SIZE, PassingDirection, PassingState};
use crate::model::player::{PlayerPosition, Seat};
use crate::model::rules::{self, IllegalPlay};
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use crate::policy::{PassView, PlayView};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const HAND_SIZE: usize = 13;
pub const TRICKS_PER_ROUND: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No cards dealt yet, or the previous round has been scored.
    Idle,
    Passing,
    Playing,
    /// All thirteen tricks taken; scores not yet added to the board.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted {
        winner: PlayerPosition,
        penalties: u32,
    },
    RoundCompleted {
        winner: PlayerPosition,
        penalties: u32,
    },
}

/// Complete table state for one game: seats, the trick in progress, round counters and the
/// cumulative score board.
///
/// Everything is owned by value, so `clone()` yields an independent sandbox that rollouts can
/// advance with [`Table::apply_play`] without touching the live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    seats: [Seat; 4],
    current_trick: Trick,
    penalty_unlocked: bool,
    tricks_completed: u8,
    round_number: u32,
    phase: RoundPhase,
    opening_pending: bool,
    scores: ScoreBoard,
}

impl Table {
    pub fn new(names: [String; 4]) -> Self {
        Self {
            seats: names.map(Seat::new),
            current_trick: Trick::new(PlayerPosition::North),
            penalty_unlocked: false,
            tricks_completed: 0,
            round_number: 0,
            phase: RoundPhase::Idle,
            opening_pending: false,
            scores: ScoreBoard::new(),
        }
    }

    /// Sets up the first round with explicit hands, skipping the shuffle.
    pub fn from_hands(names: [String; 4], hands: [Vec<Card>; 4]) -> Self {
        let mut table = Self::new(names);
        for (seat, cards) in table.seats.iter_mut().zip(hands) {
            seat.receive_hand(cards);
        }
        table.round_number = 1;
        table.phase = RoundPhase::Passing;
        table
    }

    pub fn seat(&self, position: PlayerPosition) -> &Seat {
        &self.seats[position.index()]
    }

    pub fn seats(&self) -> &[Seat; 4] {
        &self.seats
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.current_trick.lead_suit()
    }

    pub fn penalty_unlocked(&self) -> bool {
        self.penalty_unlocked
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn tricks_completed(&self) -> u8 {
        self.tricks_completed
    }

    /// 1-based number of the trick being played.
    pub fn trick_number(&self) -> u8 {
        (self.tricks_completed + 1).min(TRICKS_PER_ROUND)
    }

    pub fn is_round_complete(&self) -> bool {
        matches!(self.phase, RoundPhase::Complete)
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn passing_direction(&self) -> PassingDirection {
        PassingDirection::for_round(self.round_number)
    }

    /// Whether the next card must be the two of clubs (first trick of the first round).
    pub fn opening_card_required(&self) -> bool {
        self.opening_pending && self.current_trick.is_empty()
    }

    pub fn forced_opening_holder(&self) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|pos| self.seats[pos.index()].hand().contains(Card::TWO_OF_CLUBS))
    }

    pub fn next_to_play(&self) -> Option<PlayerPosition> {
        match self.phase {
            RoundPhase::Playing => Some(self.current_trick.expected_position()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(self)
    }

    /// Cards in hands, captured piles and the current trick. Always 52 once dealt.
    pub fn total_cards(&self) -> usize {
        self.seats
            .iter()
            .map(|seat| seat.hand().len() + seat.captured().len())
            .sum::<usize>()
            + self.current_trick.len()
    }

    /// Starts the next round: clears captured piles and deals thirteen cards to every seat.
    pub fn deal(&mut self, deck: &Deck) -> Result<(), GameError> {
        if !matches!(self.phase, RoundPhase::Idle) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let hands = deck.deal(4, HAND_SIZE).ok_or(GameError::ShortDeck {
            hands: 4,
            hand_size: HAND_SIZE,
        })?;
        for (seat, cards) in self.seats.iter_mut().zip(hands) {
            seat.clear_captured();
            seat.receive_hand(cards);
        }
        self.round_number += 1;
        self.current_trick = Trick::new(PlayerPosition::North);
        self.penalty_unlocked = false;
        self.tricks_completed = 0;
        self.opening_pending = false;
        self.phase = RoundPhase::Passing;
        Ok(())
    }

    /// Moves every seat's three selected cards according to this round's direction.
    ///
    /// `selections` is indexed by seat. All selections are validated before any card moves.
    pub fn apply_passes(
        &mut self,
        selections: [[Card; PASS_SIZE]; 4],
    ) -> Result<(), GameError> {
        if !matches!(self.phase, RoundPhase::Passing) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let mut state = PassingState::new(self.passing_direction());
        for position in PlayerPosition::LOOP {
            state.submit(
                position,
                selections[position.index()],
                self.seats[position.index()].hand(),
            )?;
        }
        state.apply(self.seats.each_mut().map(Seat::hand_mut))?;
        Ok(())
    }

    /// Ends the pass phase and hands the lead to the holder of the two of clubs.
    pub fn start_play(&mut self) -> Result<PlayerPosition, GameError> {
        if !matches!(self.phase, RoundPhase::Passing) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let leader = self
            .forced_opening_holder()
            .ok_or(GameError::MissingOpeningCard)?;
        self.current_trick = Trick::new(leader);
        self.opening_pending = self.round_number == 1;
        self.phase = RoundPhase::Playing;
        Ok(leader)
    }

    pub fn legal_moves_for(&self, position: PlayerPosition) -> Vec<Card> {
        let hand = self.seats[position.index()].hand();
        if self.opening_card_required() && hand.contains(Card::TWO_OF_CLUBS) {
            return vec![Card::TWO_OF_CLUBS];
        }
        rules::legal_moves(hand, self.lead_suit(), self.penalty_unlocked)
    }

    pub fn play_view<'a>(&'a self, position: PlayerPosition, legal: &'a [Card]) -> PlayView<'a> {
        let seat = &self.seats[position.index()];
        PlayView {
            seat: position,
            name: seat.name(),
            hand: seat.hand(),
            legal,
            trick: &self.current_trick,
            lead_suit: self.lead_suit(),
            penalty_unlocked: self.penalty_unlocked,
            round_number: self.round_number,
            trick_number: self.trick_number(),
        }
    }

    pub fn pass_view(&self, position: PlayerPosition) -> PassView<'_> {
        let seat = &self.seats[position.index()];
        PassView {
            seat: position,
            name: seat.name(),
            hand: seat.hand(),
            direction: self.passing_direction(),
        }
    }

    /// Plays `card` for `position`, resolving the trick when it is the fourth card.
    ///
    /// Turn order, possession and legality are all checked before anything changes.
    pub fn apply_play(
        &mut self,
        position: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, GameError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let expected = self.current_trick.expected_position();
        if expected != position {
            return Err(GameError::OutOfTurn {
                expected,
                actual: position,
            });
        }
        let hand = self.seats[position.index()].hand();
        if !hand.contains(card) {
            return Err(GameError::CardNotInHand {
                seat: position,
                card,
            });
        }
        if self.opening_card_required() {
            if card != Card::TWO_OF_CLUBS {
                return Err(GameError::IllegalPlay {
                    seat: position,
                    card,
                    reason: IllegalPlay::MustPlayOpeningCard,
                });
            }
        } else {
            rules::check_play(hand, card, self.lead_suit(), self.penalty_unlocked).map_err(
                |reason| GameError::IllegalPlay {
                    seat: position,
                    card,
                    reason,
                },
            )?;
        }

        self.current_trick.play(position, card)?;
        self.seats[position.index()].hand_mut().remove(card);
        self.opening_pending = false;
        if card.is_penalty() {
            self.penalty_unlocked = true;
        }

        if self.current_trick.is_complete() {
            self.resolve_trick()
        } else {
            Ok(PlayOutcome::Played)
        }
    }

    pub fn determine_trick_winner(&self) -> Result<PlayerPosition, GameError> {
        Ok(self.current_trick.winner()?)
    }

    fn resolve_trick(&mut self) -> Result<PlayOutcome, GameError> {
        let winner = self.determine_trick_winner()?;
        if self.current_trick.contains_penalty() {
            self.penalty_unlocked = true;
        }
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        let penalties = finished.penalty_total();
        self.seats[winner.index()].capture(finished.cards());
        self.tricks_completed += 1;

        if self.tricks_completed >= TRICKS_PER_ROUND {
            self.phase = RoundPhase::Complete;
            Ok(PlayOutcome::RoundCompleted { winner, penalties })
        } else {
            Ok(PlayOutcome::TrickCompleted { winner, penalties })
        }
    }

    pub fn round_penalty(&self, position: PlayerPosition) -> u32 {
        self.seats[position.index()].round_score()
    }

    pub fn round_penalties(&self) -> [u32; 4] {
        PlayerPosition::LOOP.map(|pos| self.round_penalty(pos))
    }

    /// Adds this round's penalties to the score board and returns them.
    pub fn update_scores(&mut self) -> Result<[u32; 4], GameError> {
        if !matches!(self.phase, RoundPhase::Complete) {
            return Err(GameError::WrongPhase(self.phase));
        }
        let penalties = self.round_penalties();
        self.scores.apply_round(penalties);
        self.phase = RoundPhase::Idle;
        Ok(penalties)
    }

    /// Shuffles every card `viewer` cannot see back into the other seats, keeping each
    /// seat's hand size.
    pub fn redeal_hidden<R: Rng + ?Sized>(&mut self, viewer: PlayerPosition, rng: &mut R) {
        let others: Vec<PlayerPosition> = PlayerPosition::LOOP
            .iter()
            .copied()
            .filter(|pos| *pos != viewer)
            .collect();
        let mut pool: Vec<Card> = others
            .iter()
            .flat_map(|pos| self.seats[pos.index()].hand().cards().to_vec())
            .collect();
        pool.shuffle(rng);
        for pos in others {
            let seat = &mut self.seats[pos.index()];
            let count = seat.hand().len();
            let cards = pool.split_off(pool.len() - count);
            seat.receive_hand(cards);
        }
    }
}
