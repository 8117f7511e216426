#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

pub use boardgame::game_tree_search::*;
pub use boardgame::types::{Outcome, PlayerId};

mod types;
pub use types::*;

mod error;
pub use error::*;

/// Implementation for Monte-Carlo Tree Search
pub mod mcts;

/// Implementation for minimax search
pub mod minimax;

/// Configuration-driven entry point that picks and runs one of the engines.
pub mod driver;

pub use driver::{select_move, GenericSearch, SearchAlgorithm, SearchConfig};

#[cfg(test)]
mod tests;
