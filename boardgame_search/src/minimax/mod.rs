pub mod search;

pub use crate::minimax::search::{MinimaxConfig, MinimaxSearch};
