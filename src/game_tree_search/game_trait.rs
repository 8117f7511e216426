use std::fmt::Debug;

use crate::types::{outcome::Outcome, player_id::PlayerId};

use super::Eval;

/// Two-player, zero-sum, perfect information game that can be searched.
///
/// Implementations are value types: searches clone the position and call
/// [`Game::advance`] on the copy, never on the caller's position.
pub trait Game: Debug + Clone {
    type Action: Copy + Debug + PartialEq + Eq;
    type Actions: IntoIterator<Item = Self::Action>;
    type Error: Debug;

    /// The player to move. A move that lets the same player move again
    /// (such as a capture chain) leaves this unchanged; searches never infer
    /// the player to move from the number of plies played.
    fn to_move(&self) -> PlayerId;

    /// All legal actions in a deterministic order. Forced-move rules
    /// (mandatory captures) must already be applied. Empty when the game is
    /// over or the player to move cannot act.
    fn actions(&self) -> Self::Actions;

    /// Apply an action in place. Actions not returned by [`Game::actions`]
    /// must be rejected with an error and leave `self` unchanged.
    fn advance(&mut self, action: Self::Action) -> Result<(), Self::Error>;

    /// Result of the game, `Outcome::InProgress` unless terminal.
    fn outcome(&self) -> Outcome;

    /// Heuristic evaluation from the point of view of `player_id`.
    /// Must satisfy `eval(p) == -eval(p.opposite())`.
    fn eval(&self, player_id: PlayerId) -> Eval;

    #[inline]
    fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }

    /// Successor position, leaving `self` untouched.
    #[inline]
    fn apply(&self, action: Self::Action) -> Result<Self, Self::Error> {
        let mut next = self.clone();
        next.advance(action)?;
        Ok(next)
    }
}
