use std::fmt::Debug;

/// Problems with a search configuration, reported before any search starts.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("minimax search depth must be positive")]
    ZeroDepth,
    #[error("MCTS iteration count must be positive")]
    ZeroIterations,
    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f32),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The game rejected an action it listed as legal.
    #[error("game rejected action {action}: {reason}")]
    IllegalAction { action: String, reason: String },
}

impl SearchError {
    pub fn illegal_action<A: Debug, E: Debug>(action: A, err: E) -> Self {
        Self::IllegalAction {
            action: format!("{action:?}"),
            reason: format!("{err:?}"),
        }
    }
}
