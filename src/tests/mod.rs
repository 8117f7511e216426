use crate::prelude::*;


pub mod prop_tests;

/// Play the columns in order, panicking on illegal moves.
fn play(game: &mut ConnectFour, cols: &[u8]) {
    for &col in cols {
        game.advance(ConnectFourMove(col)).unwrap();
    }
}
