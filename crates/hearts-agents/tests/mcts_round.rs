use hearts_agents::{FillPolicy, Lineup, MctsAgent, MctsConfig, RandomPolicy};
use hearts_core::game::engine::{HeartsGame, SeatEntry};
use hearts_core::model::player::PlayerPosition;
use hearts_core::policy::SeatPolicy;

fn one_agent_three_random(config: MctsConfig, seed: u64) -> HeartsGame {
    let lineup = Lineup::new(1, 3, 0).expect("valid lineup");
    let seats = lineup
        .build_with(&config, FillPolicy::Random, || {
            Box::new(RandomPolicy::seeded(0))
        })
        .expect("seats");
    HeartsGame::new(seats, seed)
}

#[test]
fn one_agent_and_three_random_players_finish_a_round() {
    let config = MctsConfig::default().with_simulations(12).with_seed(17);
    let mut game = one_agent_three_random(config, 5);

    let summary = game.start_round().expect("round completes");

    for seat in PlayerPosition::LOOP {
        assert!(game.table().seat(seat).hand().is_empty());
    }
    assert_eq!(summary.penalties.iter().sum::<u32>(), 26);
    assert!(summary.totals.iter().any(|&score| score > 0));
    assert_eq!(game.table().seat(PlayerPosition::North).name(), "MCTS Player 1");
    assert_eq!(game.policy_kind(PlayerPosition::North), "mcts");
}

#[test]
fn end_of_trick_horizon_with_workers_plays_a_round() {
    let config = MctsConfig::default()
        .with_simulations(16)
        .with_workers(2)
        .with_horizon(hearts_agents::RolloutHorizon::EndOfTrick)
        .with_determinize(false)
        .with_seed(3);
    let mut game = one_agent_three_random(config, 11);
    let summary = game.start_round().expect("round completes");
    assert_eq!(summary.penalties.iter().sum::<u32>(), 26);
}

#[test]
fn seeded_games_replay_identically() {
    let run = || {
        let config = MctsConfig::default().with_simulations(10).with_seed(8);
        let mut game = one_agent_three_random(config, 21).with_target_score(30);
        game.start_game().expect("game completes")
    };
    assert_eq!(run(), run());
}

#[test]
fn agent_only_sees_a_clone_of_the_table() {
    let agent = MctsAgent::new(MctsConfig::default().with_simulations(10).with_seed(1))
        .expect("agent");
    let seats: [SeatEntry; 4] = [
        SeatEntry::new("MCTS Player 1", Box::new(agent) as Box<dyn SeatPolicy>),
        SeatEntry::new("Random Player 1", Box::new(RandomPolicy::seeded(1))),
        SeatEntry::new("Random Player 2", Box::new(RandomPolicy::seeded(2))),
        SeatEntry::new("Random Player 3", Box::new(RandomPolicy::seeded(3))),
    ];
    let mut game = HeartsGame::new(seats, 2);
    game.start_round().expect("round completes");
    assert_eq!(game.table().total_cards(), 52);
}
