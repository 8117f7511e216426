use std::ops::Add;

use instant::Instant;

use boardgame::prelude::*;

use crate::SearchError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of states visited through game state advancements.
    pub states_visited: u64,
    /// Number of times a position was scored: minimax leaves and finished rollouts.
    pub evals: u64,
    /// Number of times the pruning condition has been reached.
    pub prunes: u64,
    /// Completed MCTS iterations.
    pub iterations: u64,
    /// Last finished depth for iterative deepening
    pub last_depth: u8,
}

impl SearchCounter {
    pub const ZERO: SearchCounter = SearchCounter {
        states_visited: 0,
        evals: 0,
        prunes: 0,
        iterations: 0,
        last_depth: 0,
    };

    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.prunes += c.prunes;
        self.iterations += c.iterations;
        self.last_depth = self.last_depth.max(c.last_depth);
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = 1e3 * (self.states_visited as f64) / (dt_ns.max(1) as f64);
        format!("dt={dt_ms:.2}ms rate={rate:.4} Mstates/s")
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult<G: Game> {
    /// Principal Variation. The first action is the one to play.
    pub pv: Vec<G::Action>,
    pub eval: Eval,
    pub counter: SearchCounter,
}

impl<G: Game> Default for SearchResult<G> {
    fn default() -> Self {
        SearchResult::new(vec![], Eval::MIN, Default::default())
    }
}

impl<G: Game> SearchResult<G> {
    #[inline]
    pub fn new(pv: Vec<G::Action>, eval: Eval, counter: SearchCounter) -> Self {
        SearchResult { pv, eval, counter }
    }

    #[inline]
    pub fn best_action(&self) -> Option<G::Action> {
        self.pv.first().copied()
    }
}

pub trait GameTreeSearch<G: Game> {
    /// Search `position` and report the evaluation from the point of view of `maximize_player`.
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> Result<SearchResult<G>, SearchError>;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_time_ms: Option<u128>,
    pub max_positions: Option<u64>,
}

impl SearchLimits {
    pub fn should_terminate(&self, start_time: Instant, positions_searched: u64) -> bool {
        if let Some(max_time_ms) = self.max_time_ms {
            if start_time.elapsed().as_millis() >= max_time_ms {
                return true;
            }
        }
        if let Some(max_positions) = self.max_positions {
            return positions_searched >= max_positions;
        }

        false
    }
}

/// Clone-and-advance, turning a rejected action into a `SearchError`.
#[inline]
pub(crate) fn apply_action<G: Game>(game: &G, action: G::Action) -> Result<G, SearchError> {
    game.apply(action)
        .map_err(|err| SearchError::illegal_action(action, err))
}
