use crate::error::GameError;
use crate::game::table::{PlayOutcome, TRICKS_PER_ROUND, Table};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::passing::{PASS_SIZE, PassingDirection};
use crate::model::player::PlayerPosition;
use crate::model::trick::Play;
use crate::policy::SeatPolicy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

pub const DEFAULT_TARGET_SCORE: u32 = 100;

/// A named seat and the policy that plays for it.
pub struct SeatEntry {
    pub name: String,
    pub policy: Box<dyn SeatPolicy>,
}

impl SeatEntry {
    pub fn new(name: impl Into<String>, policy: Box<dyn SeatPolicy>) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickSummary {
    pub trick_number: u8,
    pub plays: Vec<Play>,
    pub winner: PlayerPosition,
    pub penalties: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_number: u32,
    pub direction: PassingDirection,
    pub leader: PlayerPosition,
    pub penalties: [u32; 4],
    pub totals: [u32; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: PlayerPosition,
    pub winner_name: String,
    pub scores: [u32; 4],
    pub rounds_played: u32,
}

/// Runs rounds of Hearts on a [`Table`], asking each seat's policy for passes and plays.
pub struct HeartsGame {
    table: Table,
    policies: [Box<dyn SeatPolicy>; 4],
    rng: StdRng,
    target_score: u32,
}

impl HeartsGame {
    pub fn new(seats: [SeatEntry; 4], seed: u64) -> Self {
        let mut names: [String; 4] = Default::default();
        let policies = {
            let mut index = 0;
            seats.map(|entry| {
                names[index] = entry.name;
                index += 1;
                entry.policy
            })
        };
        Self {
            table: Table::new(names),
            policies,
            rng: StdRng::seed_from_u64(seed),
            target_score: DEFAULT_TARGET_SCORE,
        }
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score.max(1);
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn is_over(&self) -> bool {
        self.table.scores().max_score() >= self.target_score
    }

    pub fn policy_kind(&self, seat: PlayerPosition) -> &'static str {
        self.policies[seat.index()].kind()
    }

    /// Deals, passes, plays thirteen tricks and adds the round's penalties to the totals.
    pub fn start_round(&mut self) -> Result<RoundSummary, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.table.deal(&deck)?;
        let round_number = self.table.round_number();
        let direction = self.table.passing_direction();
        info!(round = round_number, direction = direction.as_str(), "starting round");

        self.pass_cards()?;
        let leader = self.table.start_play()?;
        info!(
            round = round_number,
            leader = %leader,
            name = self.table.seat(leader).name(),
            "two of clubs holder leads"
        );

        for _ in 0..TRICKS_PER_ROUND {
            self.play_trick()?;
        }

        let penalties = self.table.update_scores()?;
        let totals = *self.table.scores().standings();
        info!(round = round_number, ?penalties, ?totals, "round scored");

        Ok(RoundSummary {
            round_number,
            direction,
            leader,
            penalties,
            totals,
        })
    }

    /// Collects three cards from every seat and swaps them; a no-op on hold rounds.
    pub fn pass_cards(&mut self) -> Result<(), GameError> {
        let direction = self.table.passing_direction();
        if !direction.requires_selection() {
            debug!(round = self.table.round_number(), "hold round, no passing");
            return Ok(());
        }

        let mut selections = [[Card::TWO_OF_CLUBS; PASS_SIZE]; 4];
        for seat in PlayerPosition::LOOP {
            let view = self.table.pass_view(seat);
            selections[seat.index()] = self.policies[seat.index()]
                .choose_pass(&view)
                .map_err(|source| GameError::Policy { seat, source })?;
        }
        self.table.apply_passes(selections)?;
        debug!(direction = direction.as_str(), "cards passed");
        Ok(())
    }

    /// Plays one full trick in rotation from the current leader.
    pub fn play_trick(&mut self) -> Result<TrickSummary, GameError> {
        let trick_number = self.table.trick_number();
        let mut plays = Vec::with_capacity(4);
        loop {
            let seat = self
                .table
                .next_to_play()
                .ok_or(GameError::WrongPhase(self.table.phase()))?;

            let card = if self.table.opening_card_required()
                && self.table.seat(seat).hand().contains(Card::TWO_OF_CLUBS)
            {
                Card::TWO_OF_CLUBS
            } else {
                self.policies[seat.index()]
                    .choose_card_with_table(&self.table, seat)
                    .map_err(|source| GameError::Policy { seat, source })?
            };

            let outcome = self.table.apply_play(seat, card)?;
            plays.push(Play {
                position: seat,
                card,
            });

            match outcome {
                PlayOutcome::Played => continue,
                PlayOutcome::TrickCompleted { winner, penalties }
                | PlayOutcome::RoundCompleted { winner, penalties } => {
                    debug!(
                        trick = trick_number,
                        winner = %winner,
                        penalties,
                        cards = %plays
                            .iter()
                            .map(|play| play.card.to_string())
                            .collect::<Vec<_>>()
                            .join(" "),
                        "trick taken"
                    );
                    return Ok(TrickSummary {
                        trick_number,
                        plays,
                        winner,
                        penalties,
                    });
                }
            }
        }
    }

    /// Plays rounds until any seat reaches the target score. The lowest total wins.
    pub fn start_game(&mut self) -> Result<GameOutcome, GameError> {
        while !self.is_over() {
            self.start_round()?;
        }
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> GameOutcome {
        let scores = self.table.scores();
        let winner = scores.leading_player();
        GameOutcome {
            winner,
            winner_name: self.table.seat(winner).name().to_string(),
            scores: *scores.standings(),
            rounds_played: self.table.round_number(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeartsGame, SeatEntry};
    use crate::error::GameError;
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::policy::{PlayView, PolicyError, SeatPolicy};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plays the highest legal card and counts how often it was asked.
    struct LastLegal {
        asked: Arc<AtomicUsize>,
    }

    impl SeatPolicy for LastLegal {
        fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            view.legal.last().copied().ok_or(PolicyError::NoLegalMoves)
        }

        fn kind(&self) -> &'static str {
            "last-legal"
        }
    }

    /// Ignores the legal list and plays the first card in hand.
    struct Reckless;

    impl SeatPolicy for Reckless {
        fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError> {
            view.hand.cards().first().copied().ok_or(PolicyError::EmptyHand)
        }

        fn kind(&self) -> &'static str {
            "reckless"
        }
    }

    fn game(seed: u64) -> (HeartsGame, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        let seats = [1, 2, 3, 4].map(|n| {
            SeatEntry::new(
                format!("Player {n}"),
                Box::new(LastLegal {
                    asked: Arc::clone(&asked),
                }),
            )
        });
        (HeartsGame::new(seats, seed), asked)
    }

    #[test]
    fn round_empties_hands_and_distributes_26_points() {
        let (mut game, asked) = game(8);
        let summary = game.start_round().unwrap();

        for seat in PlayerPosition::LOOP {
            assert!(game.table().seat(seat).hand().is_empty());
        }
        assert_eq!(summary.penalties.iter().sum::<u32>(), 26);
        assert_eq!(summary.totals, summary.penalties);
        // 52 plays, one of them the forced two of clubs.
        assert_eq!(asked.load(Ordering::SeqCst), 51);
    }

    #[test]
    fn first_trick_opens_with_two_of_clubs_regardless_of_policy() {
        let (mut game, _) = game(17);
        game.table.deal(&crate::model::deck::Deck::shuffled_with_seed(17)).unwrap();
        game.pass_cards().unwrap();
        let holder = game.table.start_play().unwrap();

        let trick = game.play_trick().unwrap();
        assert_eq!(trick.trick_number, 1);
        assert_eq!(trick.plays[0].position, holder);
        assert_eq!(trick.plays[0].card, Card::TWO_OF_CLUBS);
    }

    #[test]
    fn illegal_policy_choice_surfaces_as_error() {
        let seats = [1, 2, 3, 4].map(|n| SeatEntry::new(format!("P{n}"), Box::new(Reckless)));
        let mut game = HeartsGame::new(seats, 3);
        match game.start_round() {
            Err(GameError::IllegalPlay { .. }) | Err(GameError::CardNotInHand { .. }) => {}
            other => panic!("expected an illegal play error, got {other:?}"),
        }
    }

    #[test]
    fn game_runs_until_target_and_lowest_score_wins() {
        let (game, _) = game(99);
        let mut game = game.with_target_score(40);
        let outcome = game.start_game().unwrap();

        assert!(outcome.scores.iter().any(|&score| score >= 40));
        assert_eq!(
            outcome.scores[outcome.winner.index()],
            *outcome.scores.iter().min().unwrap()
        );
        assert_eq!(outcome.rounds_played, game.table().round_number());
        assert!(game.is_over());
    }
}
