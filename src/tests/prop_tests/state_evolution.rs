use super::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        max_local_rejects: 2 * CASES,
        max_global_rejects: 2 * CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn actions_should_be_performable_with_ok_result(game in arb_reachable_connect_four_any_shape()) {
        for action in game.actions() {
            let mut game1 = game.clone();
            if let Err(e) = game1.advance(action) {
                dbg!(&game);
                dbg!(&action);
                dbg!(&e);
                panic!("Action is not performable.");
            }
            prop_assert_eq!(game.plies() + 1, game1.plies());
        }
    }

    #[test]
    fn columns_outside_actions_are_rejected(game in arb_reachable_connect_four(), col in 0u8..10) {
        let actions = game.actions();
        let mut game1 = game.clone();
        let res = game1.advance(ConnectFourMove(col));
        prop_assert_eq!(actions.contains(&ConnectFourMove(col)), res.is_ok());
        if res.is_err() {
            prop_assert_eq!(&game, &game1);
        }
    }

    #[test]
    fn eval_is_anti_symmetric(game in arb_reachable_connect_four_any_shape(), player_id in arb_player_id()) {
        prop_assert_eq!(game.eval(player_id), -game.eval(player_id.opposite()));
    }

    #[test]
    fn players_alternate(game in arb_reachable_connect_four()) {
        prop_assume!(!game.is_terminal(), "must be in progress");
        let expected = if game.plies() % 2 == 0 { PlayerId::PlayerFirst } else { PlayerId::PlayerSecond };
        prop_assert_eq!(expected, game.to_move());
    }

    #[test]
    fn finished_games_have_no_actions(game in arb_finished_connect_four()) {
        prop_assert!(game.is_terminal());
        prop_assert!(game.actions().is_empty());
        if let Some(winner) = game.outcome().winner() {
            // the winner made the last move
            prop_assert_eq!(winner.opposite(), game.to_move());
        }
    }

    #[test]
    fn reparsed_diagram_matches(game in arb_reachable_connect_four()) {
        let diagram = game.to_string();
        let rows: Vec<&str> = diagram.lines().collect();
        let parsed = ConnectFour::from_rows(&rows, game.connect()).unwrap();
        prop_assert_eq!(game.outcome(), parsed.outcome());
        prop_assert_eq!(game.to_move(), parsed.to_move());
        prop_assert_eq!(game.actions(), parsed.actions());
    }
}
