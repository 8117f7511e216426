#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Module containing collection datatypes used by this crate.
pub mod data_structures;

/// Game trait implemented by every game that can be searched, plus the
/// evaluation type shared with the search algorithms.
pub mod game_tree_search;

/// Game implementations.
pub mod games;

pub mod types;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` create
pub use rand;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::data_structures::ActionList;
    pub use crate::game_tree_search::{Eval, Game, HV};
    pub use crate::games::connect_four::{ConnectFour, ConnectFourError, ConnectFourMove};
    pub use crate::types::{outcome::Outcome, player_id::PlayerId};
}

#[cfg(test)]
mod tests;
