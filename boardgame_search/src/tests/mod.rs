use boardgame::prelude::*;

use crate::{
    mcts::{MCTSConfig, MCTS},
    minimax::{MinimaxConfig, MinimaxSearch},
    *,
};

use games::*;



pub mod select_move;

/// O to move on a four row board. Column 3 completes a vertical line for O
/// and is the only winning move; X threatens column 4.
fn one_winning_column() -> ConnectFour {
    ConnectFour::from_rows(
        &[
            ". . . . . . .",
            "X O X O X O X",
            "X O X O X O X",
            "O X O O X X O",
        ],
        4,
    )
    .unwrap()
}

/// A finished game won by X.
fn finished_connect_four() -> ConnectFour {
    let mut game = ConnectFour::default();
    for col in [0, 1, 0, 1, 0, 1, 0] {
        game.advance(ConnectFourMove(col)).unwrap();
    }
    assert!(game.is_terminal());
    game
}
