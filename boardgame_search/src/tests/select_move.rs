use boardgame::rand::{rngs::SmallRng, Rng, SeedableRng};
use proptest::prelude::*;

use super::*;

#[test]
fn test_minimax_always_finds_the_winning_column() {
    let game = one_winning_column();
    for depth in 1..=4 {
        for seed in 0..10 {
            let config = SearchConfig::minimax(depth).with_seed(Some(seed));
            assert_eq!(Some(ConnectFourMove(3)), select_move(&game, &config).unwrap(), "depth {depth}");
        }
    }
    // without a seed as well
    assert_eq!(
        Some(ConnectFourMove(3)),
        select_move(&game, &SearchConfig::minimax(2)).unwrap()
    );
}

#[test]
fn test_mcts_almost_always_finds_the_winning_column() {
    let game = one_winning_column();
    const TRIALS: u64 = 40;
    let found = (0..TRIALS)
        .filter(|&seed| {
            let config = SearchConfig::mcts(50)
                .with_exploration_constant(1.4)
                .with_seed(Some(seed));
            select_move(&game, &config).unwrap() == Some(ConnectFourMove(3))
        })
        .count() as u64;
    assert!(found * 100 >= 95 * TRIALS, "found {found}/{TRIALS}");
}

#[test]
fn test_blocks_the_only_threat() {
    // X to move must block O in column 0
    let game = ConnectFour::from_rows(
        &[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            "O . . . . . .",
            "O . . . . . .",
            "O X . . . X X",
        ],
        4,
    )
    .unwrap();
    assert_eq!(PlayerId::PlayerFirst, game.to_move());
    for seed in 0..5 {
        let config = SearchConfig::minimax(2).with_seed(Some(seed));
        assert_eq!(Some(ConnectFourMove(0)), select_move(&game, &config).unwrap());
    }
}

#[test]
fn test_terminal_state_gives_none() {
    let game = finished_connect_four();
    for config in [
        SearchConfig::minimax(1),
        SearchConfig::minimax(5).with_alpha_beta(false),
        SearchConfig::mcts(1),
        SearchConfig::mcts(100).with_rollout_cutoff(Some(3)),
    ] {
        assert_eq!(None, select_move(&game, &config).unwrap(), "{config:?}");
    }
}

#[test]
fn test_no_actions_gives_none() {
    let game = TreeGame::new(3, 0, vec![2]);
    assert_eq!(None, select_move(&game, &SearchConfig::minimax(3)).unwrap());
    assert_eq!(None, select_move(&game, &SearchConfig::mcts(3)).unwrap());
}

#[test]
fn test_invalid_config_is_reported_before_searching() {
    let game = finished_connect_four();
    assert_eq!(
        Err(SearchError::InvalidConfig(ConfigError::ZeroDepth)),
        select_move(&game, &SearchConfig::minimax(0))
    );
    assert_eq!(
        Err(SearchError::InvalidConfig(ConfigError::ZeroIterations)),
        select_move(&game, &SearchConfig::mcts(0))
    );
    assert!(matches!(
        select_move(&game, &SearchConfig::mcts(10).with_exploration_constant(f32::NAN)),
        Err(SearchError::InvalidConfig(ConfigError::InvalidExploration(..)))
    ));
}

#[test]
fn test_seeded_select_move_is_deterministic() {
    let game = ConnectFour::default();
    let config = SearchConfig::mcts(100).with_seed(Some(1234));
    let first = select_move(&game, &config).unwrap();
    for _ in 0..3 {
        assert_eq!(first, select_move(&game, &config).unwrap());
    }
}

#[test]
fn test_generic_search_reports_full_result() {
    let game = one_winning_column();
    let mut search = SearchConfig::minimax(3).with_seed(Some(0)).make_search::<ConnectFour>();
    let res = search.search(&game, game.to_move()).unwrap();
    assert_eq!(Some(ConnectFourMove(3)), res.best_action());
    assert_eq!(Eval::win(1), res.eval);
    assert_eq!(3, res.counter.last_depth);
}

prop_compose! {
    fn arb_position()(seed in any::<u64>(), steps in 0usize..42) -> ConnectFour {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = ConnectFour::default();
        for _ in 0..steps {
            let actions = game.actions();
            if actions.is_empty() {
                break;
            }
            game.advance(actions[rng.gen_range(0..actions.len())]).unwrap();
        }
        game
    }
}

fn arb_search_config() -> impl Strategy<Value = SearchConfig> {
    prop_oneof![
        (1u8..=3, any::<bool>()).prop_map(|(depth, alpha_beta)| SearchConfig::minimax(depth).with_alpha_beta(alpha_beta)),
        (1u32..=60, 0f32..3.0, proptest::option::of(0u32..10)).prop_map(|(iterations, c, cutoff)| {
            SearchConfig::mcts(iterations)
                .with_exploration_constant(c)
                .with_rollout_cutoff(cutoff)
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn selected_action_is_legal(game in arb_position(), config in arb_search_config(), seed in any::<u64>()) {
        let config = config.with_seed(Some(seed));
        let selected = select_move(&game, &config).unwrap();
        let actions = game.actions();
        match selected {
            Some(action) => prop_assert!(actions.contains(&action)),
            None => prop_assert!(actions.is_empty()),
        }
    }
}
