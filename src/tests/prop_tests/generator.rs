use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::prelude::*;

pub fn arb_player_id() -> impl Strategy<Value = PlayerId> {
    prop_oneof![Just(PlayerId::PlayerFirst), Just(PlayerId::PlayerSecond)]
}

prop_compose! {
    /// Board dimensions that are accepted by `ConnectFour::new`.
    pub fn arb_board_shape()(rows in 2u8..=7, cols in 2u8..=8)(rows in Just(rows), cols in Just(cols), connect in 2..=rows.max(cols).min(5)) -> (u8, u8, u8) {
        (rows, cols, connect)
    }
}

/// Play up to `steps` uniformly random legal moves, stopping early when the game is decided.
pub fn random_playout(mut game: ConnectFour, steps: usize, seed: u64) -> ConnectFour {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..steps {
        let actions = game.actions();
        if actions.is_empty() {
            break;
        }
        game.advance(actions[rng.gen_range(0..actions.len())]).unwrap();
    }
    game
}

prop_compose! {
    pub fn arb_reachable_connect_four()(seed in any::<u64>(), steps in 0usize..42) -> ConnectFour {
        random_playout(ConnectFour::default(), steps, seed)
    }
}

prop_compose! {
    pub fn arb_reachable_connect_four_any_shape()((rows, cols, connect) in arb_board_shape(), seed in any::<u64>(), steps in 0usize..64) -> ConnectFour {
        random_playout(ConnectFour::new(rows, cols, connect).unwrap(), steps, seed)
    }
}

prop_compose! {
    pub fn arb_finished_connect_four()(seed in any::<u64>()) -> ConnectFour {
        random_playout(ConnectFour::default(), usize::MAX, seed)
    }
}
