use std::rc::Rc;

use atree::{Arena, Token};
use instant::Instant;
use itertools::Itertools;
use tracing::{debug, trace};

use boardgame::{
    data_structures::ActionList,
    rand::{rngs::SmallRng, Rng, SeedableRng},
};

use crate::*;

pub mod policy;
use policy::*;

pub mod debug;
pub use debug::*;

/// Tree node. `player` is the player who made the move into this node, and
/// rewards stored here are from that player's point of view.
#[derive(Debug, Clone)]
pub struct NodeData<G: Game> {
    pub state: G,
    pub action: Option<G::Action>,
    pub parent: Option<Token>,
    pub player: PlayerId,
    pub visits: u32,
    /// Sum of rewards in `[-1, 1]` over all visits.
    pub value: f32,
    /// Legal actions without a child node yet.
    pub untried: ActionList<G::Action>,
}

impl<G: Game> NodeData<G> {
    pub fn new(state: G, action: Option<G::Action>, parent: Option<Token>, player: PlayerId) -> Self {
        let untried = if state.is_terminal() {
            Default::default()
        } else {
            state.actions().into_iter().collect()
        };
        Self {
            state,
            action,
            parent,
            player,
            visits: 0,
            value: 0.0,
            untried,
        }
    }

    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f32
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MCTSConfig {
    pub iterations: u32,
    /// The `C` in `value / visits + C * sqrt(ln(parent.visits) / visits)`.
    pub exploration_constant: f32,
    /// Max. plies per random playout, unlimited if `None`.
    pub rollout_cutoff: Option<u32>,
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 1.4,
            rollout_cutoff: None,
            limits: None,
            debug: false,
        }
    }
}

impl MCTSConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        let c = self.exploration_constant;
        if !c.is_finite() || c < 0.0 {
            return Err(ConfigError::InvalidExploration(c));
        }
        Ok(())
    }
}

/// Statistics of a root child after a search.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChildStats<A> {
    pub action: A,
    pub visits: u32,
    pub value: f32,
}

impl<A> ChildStats<A> {
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f32
        }
    }
}

/// Score of an undecided position from the sign of its heuristic evaluation.
fn resolve_by_eval<G: Game>(game: &G) -> Outcome {
    let player = game.to_move();
    match game.eval(player).cmp(&Eval::ZERO) {
        std::cmp::Ordering::Greater => Outcome::Win(player),
        std::cmp::Ordering::Less => Outcome::Loss(player),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// Monte-Carlo Tree Search with uniformly random playouts. A fresh tree is
/// built on every search; the last one is kept for inspection.
#[derive(Debug)]
pub struct MCTS<G: Game, S: SelectionPolicy<G> = Uct, R: Rng = SmallRng> {
    pub config: MCTSConfig,
    pub tree: Arena<NodeData<G>>,
    pub root: Option<Token>,
    pub selection_policy: S,
    rng: R,
}

impl<G: Game> MCTS<G> {
    pub fn new(config: MCTSConfig) -> Self {
        Self::new_with_selection_policy_and_rng(config, Uct, SmallRng::from_entropy())
    }

    pub fn new_with_seed(config: MCTSConfig, seed: u64) -> Self {
        Self::new_with_selection_policy_and_rng(config, Uct, SmallRng::seed_from_u64(seed))
    }
}

impl<G: Game, S: SelectionPolicy<G>, R: Rng> MCTS<G, S, R> {
    pub fn new_with_selection_policy_and_rng(config: MCTSConfig, selection_policy: S, rng: R) -> Self {
        Self {
            config,
            tree: Arena::<NodeData<G>>::new(),
            root: None,
            selection_policy,
            rng,
        }
    }

    fn init(&mut self, init: G) -> Token {
        let player = init.to_move().opposite();
        let root = NodeData::new(init, None, None, player);
        let (tree, root_token) = Arena::<NodeData<G>>::with_data(root);
        self.tree = tree;
        self.root = Some(root_token);
        root_token
    }

    /// Descend from `token` through fully expanded, undecided nodes.
    fn select(&self, token: Token) -> Token {
        let mut token = token;
        loop {
            let Some(node) = self.tree.get(token) else {
                return token;
            };
            let parent = &node.data;
            if !parent.untried.is_empty() || parent.state.is_terminal() {
                return token;
            }
            let ctx = SelectionPolicyContext {
                config: &self.config,
                parent,
            };
            let mut best: Option<(Priority, Token)> = None;
            for child in node.children(&self.tree) {
                let priority = self.selection_policy.priority(&ctx, &child.data);
                if best.map_or(true, |(best_priority, _)| priority.total_cmp(&best_priority).is_gt()) {
                    best = Some((priority, child.token()));
                }
            }
            match best {
                Some((_, child)) => token = child,
                None => return token,
            }
        }
    }

    /// Add a child for one random untried action of `token` and return it.
    /// Nodes without untried actions are returned unchanged.
    fn expand(&mut self, token: Token) -> Result<Token, SearchError> {
        let Some(node) = self.tree.get_mut(token) else {
            return Ok(token);
        };
        let data = &mut node.data;
        if data.untried.is_empty() || data.state.is_terminal() {
            return Ok(token);
        }
        let action = data.untried.swap_remove(self.rng.gen_range(0..data.untried.len()));
        let player = data.state.to_move();
        let state = apply_action(&data.state, action)?;
        let child = NodeData::new(state, Some(action), Some(token), player);
        Ok(token.append(&mut self.tree, child))
    }

    fn random_playout(&mut self, mut game: G) -> Result<(Outcome, u64), SearchError> {
        let mut steps = 0u64;
        loop {
            if game.is_terminal() {
                return Ok((game.outcome(), steps));
            }
            if self
                .config
                .rollout_cutoff
                .is_some_and(|cutoff| steps >= cutoff as u64)
            {
                break;
            }
            let actions: ActionList<G::Action> = game.actions().into_iter().collect();
            if actions.is_empty() {
                break;
            }
            let action = actions[self.rng.gen_range(0..actions.len())];
            game.advance(action)
                .map_err(|err| SearchError::illegal_action(action, err))?;
            steps += 1;
        }
        Ok((resolve_by_eval(&game), steps))
    }

    /// Follow parent links from `token` to the root, crediting every node
    /// from the point of view of the player who moved into it.
    fn backpropagate(&mut self, token: Token, outcome: Outcome) {
        let mut current = Some(token);
        while let Some(token) = current {
            let Some(node) = self.tree.get_mut(token) else {
                break;
            };
            let data = &mut node.data;
            data.visits += 1;
            data.value += outcome.reward(data.player);
            current = data.parent;
        }
    }

    /// One selection, expansion, simulation and backpropagation step.
    /// Returns the number of states visited.
    fn iteration(&mut self, root: Token) -> Result<u64, SearchError> {
        let selected = self.select(root);
        let leaf = self.expand(selected)?;
        let Some(state) = self.tree.get(leaf).map(|node| node.data.state.clone()) else {
            return Ok(0);
        };
        let (outcome, steps) = self.random_playout(state)?;
        trace!(expanded = leaf != selected, steps, %outcome, "MCTS simulation complete");
        self.backpropagate(leaf, outcome);
        Ok(steps + (leaf != selected) as u64)
    }

    /// Most visited child, ties broken by mean value and then by expansion order.
    fn get_best_child(&self, token: Token) -> Option<&atree::Node<NodeData<G>>> {
        let node = self.tree.get(token)?;
        let mut best: Option<&atree::Node<NodeData<G>>> = None;
        for child in node.children(&self.tree) {
            let better = match best {
                None => true,
                Some(b) => {
                    let (c, b) = (&child.data, &b.data);
                    c.visits > b.visits || (c.visits == b.visits && c.mean_value() > b.mean_value())
                }
            };
            if better {
                best = Some(child);
            }
        }
        best
    }

    pub fn get_pv(&self, token: Token) -> Vec<G::Action> {
        let mut pv = vec![];
        let mut token = token;
        while let Some(child) = self.get_best_child(token) {
            let Some(action) = child.data.action else { break };
            if child.data.visits == 0 {
                break;
            }
            pv.push(action);
            token = child.token();
        }
        pv
    }

    /// Statistics of the root's children from the last search, in expansion order.
    pub fn root_stats(&self) -> Vec<ChildStats<G::Action>> {
        let Some(root) = self.root.and_then(|token| self.tree.get(token)) else {
            return vec![];
        };
        root.children(&self.tree)
            .filter_map(|child| {
                Some(ChildStats {
                    action: child.data.action?,
                    visits: child.data.visits,
                    value: child.data.value,
                })
            })
            .collect()
    }
}

impl<G: Game, S: SelectionPolicy<G>, R: Rng> GameTreeSearch<G> for MCTS<G, S, R> {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> Result<SearchResult<G>, SearchError> {
        self.config.validate()?;
        let root = self.init(position.clone());
        let has_actions = self.tree.get(root).is_some_and(|node| !node.data.untried.is_empty());
        if !has_actions {
            return Ok(Default::default());
        }

        let t0 = Instant::now();
        let mut counter = SearchCounter::default();
        while counter.iterations < self.config.iterations as u64 {
            if let Some(limits) = &self.config.limits {
                if counter.iterations > 0 && limits.should_terminate(t0, counter.states_visited) {
                    break;
                }
            }
            counter.states_visited += self.iteration(root)?;
            counter.iterations += 1;
            counter.evals += 1;
        }

        let pv = self.get_pv(root);
        let mean = self
            .get_best_child(root)
            .map(|child| child.data.mean_value())
            .unwrap_or_default();
        let eval = Eval::from_heuristic((1e3 * mean).round() as HV);
        let eval = if position.to_move() == maximize_player { eval } else { -eval };

        debug!(
            iterations = counter.iterations,
            states_visited = counter.states_visited,
            best = ?pv.first(),
            mean,
            "MCTS: {}",
            counter.summary(t0.elapsed().as_nanos())
        );
        if self.config.debug {
            self.print_tree(root, 0, 2, self.config.iterations / 50);
            debug!(pv = ?pv, "MCTS principal variation");
        }
        Ok(SearchResult::new(pv, eval, counter))
    }
}
