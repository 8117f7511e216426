pub mod outcome;
pub mod player_id;

pub use outcome::Outcome;
pub use player_id::PlayerId;
