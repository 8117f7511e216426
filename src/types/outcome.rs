use std::fmt::Display;

use super::player_id::PlayerId;

/// Result of a game. Only `InProgress` is reported for non-terminal positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The given player won.
    Win(PlayerId),
    /// The given player lost.
    Loss(PlayerId),
    Draw,
    #[default]
    InProgress,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(p) => f.write_fmt(format_args!("{p} wins")),
            Outcome::Loss(p) => f.write_fmt(format_args!("{p} loses")),
            Outcome::Draw => f.write_str("Draw"),
            Outcome::InProgress => f.write_str("In progress"),
        }
    }
}

impl Outcome {
    #[inline]
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    #[inline]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Win(p) => Some(p),
            Outcome::Loss(p) => Some(p.opposite()),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// Reward in `[-1, 1]` from the point of view of `perspective`:
    /// +1 for a win, -1 for a loss, 0 for a draw or an undecided game.
    #[inline]
    pub fn reward(self, perspective: PlayerId) -> f32 {
        match self.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_is_win_for_opponent() {
        let outcome = Outcome::Loss(PlayerId::PlayerFirst);
        assert_eq!(Some(PlayerId::PlayerSecond), outcome.winner());
        assert_eq!(-1.0, outcome.reward(PlayerId::PlayerFirst));
        assert_eq!(1.0, outcome.reward(PlayerId::PlayerSecond));
    }

    #[test]
    fn test_undecided_rewards_are_zero() {
        for outcome in [Outcome::Draw, Outcome::InProgress] {
            for p in PlayerId::VALUES {
                assert_eq!(0.0, outcome.reward(p));
            }
        }
        assert!(Outcome::Draw.is_decided());
        assert!(!Outcome::InProgress.is_decided());
    }
}
