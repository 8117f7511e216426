use super::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn connect_four_serialize_json(game in arb_reachable_connect_four()) {
        let ser = serde_json::to_string_pretty(&game).unwrap();
        let game1: ConnectFour = serde_json::from_str(&ser).unwrap();
        prop_assert_eq!(game, game1);
    }
}
