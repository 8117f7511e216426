mod eval;
mod game_trait;

pub use eval::*;
pub use game_trait::*;
