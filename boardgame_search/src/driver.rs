use std::{fmt::Display, str::FromStr};

use tracing::debug;

use boardgame::rand::{rngs::SmallRng, SeedableRng};

use crate::{
    mcts::{MCTSConfig, MCTS},
    minimax::{MinimaxConfig, MinimaxSearch},
    *,
};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchAlgorithm {
    #[default]
    Minimax,
    MCTS,
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "mcts" => Ok(Self::MCTS),
            _ => Err(format!("unknown search algorithm {s:?}, expected minimax or mcts")),
        }
    }
}

impl Display for SearchAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimax => write!(f, "minimax"),
            Self::MCTS => write!(f, "mcts"),
        }
    }
}

/// Everything needed to pick a move: which engine to run and its parameters.
/// Parameters of the engine that is not selected are ignored.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: SearchAlgorithm,
    /// Minimax: search depth in plies
    pub depth: u8,
    /// MCTS: number of iterations
    pub iterations: u32,
    /// MCTS: UCT exploration constant
    pub exploration_constant: f32,
    /// MCTS: max. plies per random playout
    pub rollout_cutoff: Option<u32>,
    /// Minimax: alpha-beta pruning
    pub alpha_beta: bool,
    pub limits: Option<SearchLimits>,
    /// Seed for the search's random choices. Fresh entropy when `None`.
    pub seed: Option<u64>,
    pub debug: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let minimax = MinimaxConfig::default();
        let mcts = MCTSConfig::default();
        Self {
            algorithm: SearchAlgorithm::Minimax,
            depth: minimax.depth,
            iterations: mcts.iterations,
            exploration_constant: mcts.exploration_constant,
            rollout_cutoff: mcts.rollout_cutoff,
            alpha_beta: minimax.alpha_beta,
            limits: None,
            seed: None,
            debug: false,
        }
    }
}

impl SearchConfig {
    pub fn minimax(depth: u8) -> Self {
        Self {
            algorithm: SearchAlgorithm::Minimax,
            depth,
            ..Default::default()
        }
    }

    pub fn mcts(iterations: u32) -> Self {
        Self {
            algorithm: SearchAlgorithm::MCTS,
            iterations,
            ..Default::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_exploration_constant(mut self, exploration_constant: f32) -> Self {
        self.exploration_constant = exploration_constant;
        self
    }

    pub fn with_rollout_cutoff(mut self, rollout_cutoff: Option<u32>) -> Self {
        self.rollout_cutoff = rollout_cutoff;
        self
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    pub fn with_limits(mut self, limits: Option<SearchLimits>) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn minimax_config(&self) -> MinimaxConfig {
        MinimaxConfig {
            depth: self.depth,
            alpha_beta: self.alpha_beta,
            limits: self.limits,
            debug: self.debug,
        }
    }

    pub fn mcts_config(&self) -> MCTSConfig {
        MCTSConfig {
            iterations: self.iterations,
            exploration_constant: self.exploration_constant,
            rollout_cutoff: self.rollout_cutoff,
            limits: self.limits,
            debug: self.debug,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.exploration_constant;
        if !c.is_finite() || c < 0.0 {
            return Err(ConfigError::InvalidExploration(c));
        }
        match self.algorithm {
            SearchAlgorithm::Minimax => self.minimax_config().validate(),
            SearchAlgorithm::MCTS => self.mcts_config().validate(),
        }
    }

    fn make_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    pub fn make_search<G: Game>(&self) -> GenericSearch<G> {
        let rng = self.make_rng();
        match self.algorithm {
            SearchAlgorithm::Minimax => {
                GenericSearch::Minimax(MinimaxSearch::new_with_rng(self.minimax_config(), rng))
            }
            SearchAlgorithm::MCTS => GenericSearch::MCTS(MCTS::new_with_selection_policy_and_rng(
                self.mcts_config(),
                Default::default(),
                rng,
            )),
        }
    }
}

pub enum GenericSearch<G: Game> {
    Minimax(MinimaxSearch<G>),
    MCTS(MCTS<G>),
}

impl<G: Game> GameTreeSearch<G> for GenericSearch<G> {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> Result<SearchResult<G>, SearchError> {
        match self {
            Self::Minimax(s) => s.search(position, maximize_player),
            Self::MCTS(s) => s.search(position, maximize_player),
        }
    }
}

/// Pick a move for the player to move in `state`.
///
/// The configuration is validated before anything else. Returns `Ok(None)`
/// when the game is over or the player to move has no legal actions.
pub fn select_move<G: Game>(state: &G, config: &SearchConfig) -> Result<Option<G::Action>, SearchError> {
    config.validate()?;
    if state.is_terminal() {
        return Ok(None);
    }
    let mut search = config.make_search::<G>();
    let res = search.search(state, state.to_move())?;
    debug!(algorithm = %config.algorithm, action = ?res.best_action(), eval = ?res.eval, "select_move");
    Ok(res.best_action())
}
