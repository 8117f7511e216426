use std::marker::PhantomData;

use instant::Instant;
use itertools::Itertools;
use tracing::{debug, trace};

use boardgame::rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use crate::*;

/// Principal variation: `action` followed by `rest`.
#[inline]
fn cons<A>(action: A, mut rest: Vec<A>) -> Vec<A> {
    rest.insert(0, action);
    rest
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimaxConfig {
    pub depth: u8,
    /// Disable to explore every branch. Results are identical, only slower.
    pub alpha_beta: bool,
    /// Enables iterative deepening, returning the deepest completed result on expiry.
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            alpha_beta: true,
            limits: None,
            debug: false,
        }
    }
}

impl MinimaxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

struct SearchContext {
    pub config: MinimaxConfig,
    pub counter: SearchCounter,
    pub start_time: Instant,
    /// Set once the limits are exceeded. Values computed afterwards are partial.
    pub aborted: bool,
}

impl SearchContext {
    #[inline]
    pub fn should_terminate(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let Some(limits) = &self.config.limits else {
            return false;
        };
        self.aborted = limits.should_terminate(self.start_time, self.counter.states_visited);
        self.aborted
    }
}

/// Value of a leaf from the point of view of `maximize_player`.
#[inline]
fn eval_position<G: Game>(game: &G, maximize_player: PlayerId, ply: u8) -> Eval {
    match game.outcome() {
        Outcome::InProgress => game.eval(maximize_player),
        outcome => match outcome.winner() {
            Some(winner) if winner == maximize_player => Eval::win(ply),
            Some(..) => Eval::lose(ply),
            None => Eval::ZERO,
        },
    }
}

/// Fail-soft alpha-beta. The returned value is from the point of view of
/// `maximize_player`, which is always the player to move once the frame
/// is set up.
fn minimax<G: Game>(
    game: &G,
    maximize_player: PlayerId,
    ab: (Eval, Eval),
    depth: u8,
    ply: u8,
    ctx: &mut SearchContext,
) -> Result<(Eval, Vec<G::Action>), SearchError> {
    if game.is_terminal() || depth == 0 || ctx.should_terminate() {
        ctx.counter.evals += 1;
        return Ok((eval_position(game, maximize_player, ply), vec![]));
    }

    let player = game.to_move();

    let (mut alpha, beta) = ab;
    if player != maximize_player {
        let (e, pv) = minimax(game, maximize_player.opposite(), (-beta, -alpha), depth, ply, ctx)?;
        return Ok((-e, pv));
    }

    let mut actions = game.actions().into_iter().peekable();
    if actions.peek().is_none() {
        ctx.counter.evals += 1;
        return Ok((eval_position(game, maximize_player, ply), vec![]));
    }

    let mut best = Eval::MIN;
    let mut pv = vec![];
    for action in actions {
        let next = apply_action(game, action)?;
        ctx.counter.states_visited += 1;
        let (eval, pv_rest) = minimax(&next, maximize_player, (alpha, beta), depth - 1, ply + 1, ctx)?;

        if eval > best {
            best = eval;
            pv = cons(action, pv_rest);
        }

        if eval > alpha {
            alpha = eval;
        }

        if ctx.config.alpha_beta && alpha >= beta {
            ctx.counter.prunes += 1;
            break;
        }
    }

    Ok((best, pv))
}

/// Search every root action and pick uniformly among the best ones.
/// Returns `None` if there are no legal actions. `first` is searched before
/// the other actions when it is legal.
fn minimax_root<G: Game, R: Rng>(
    game: &G,
    depth: u8,
    first: Option<G::Action>,
    ctx: &mut SearchContext,
    rng: &mut R,
) -> Result<Option<(Eval, Vec<G::Action>)>, SearchError> {
    let player = game.to_move();
    let mut actions = game.actions().into_iter().collect_vec();
    if actions.is_empty() {
        return Ok(None);
    }
    if let Some(i) = first.and_then(|first| actions.iter().position(|a| *a == first)) {
        actions[..=i].rotate_right(1);
    }

    let mut best = Eval::MIN;
    let mut best_lines: Vec<Vec<G::Action>> = vec![];
    for (i, action) in actions.into_iter().enumerate() {
        if i > 0 && ctx.should_terminate() {
            break;
        }

        let next = apply_action(game, action)?;
        ctx.counter.states_visited += 1;
        // Opening the window just below `best` keeps values equal to `best` exact.
        let window = if i == 0 || !ctx.config.alpha_beta {
            (Eval::MIN, Eval::MAX)
        } else {
            (best.minus_one(), Eval::MAX)
        };
        let (eval, pv_rest) = minimax(&next, player, window, depth - 1, 1, ctx)?;
        trace!(?action, ?eval, depth, "root action");

        if eval > best {
            best = eval;
            best_lines.clear();
        }
        if eval == best {
            best_lines.push(cons(action, pv_rest));
        }
    }

    Ok(best_lines.choose(rng).map(|pv| (best, pv.clone())))
}

fn minimax_iterative_deepening<G: Game, R: Rng>(
    game: &G,
    config: MinimaxConfig,
    rng: &mut R,
) -> Result<SearchResult<G>, SearchError> {
    let mut ctx = SearchContext {
        config,
        counter: SearchCounter::default(),
        start_time: Instant::now(),
        aborted: false,
    };
    let depth0 = if config.limits.is_some() { 1 } else { config.depth };
    let mut found: Option<(Eval, Vec<G::Action>)> = None;
    for current_depth in depth0..=config.depth {
        let first = found.as_ref().and_then(|(_, pv)| pv.first().copied());
        let Some((eval, pv)) = minimax_root(game, current_depth, first, &mut ctx, rng)? else {
            break;
        };
        if ctx.aborted {
            found.get_or_insert((eval, pv));
            break;
        }

        ctx.counter.last_depth = current_depth;
        if config.debug {
            debug!(depth = current_depth, ?eval, pv = ?pv, "minimax depth completed");
        } else {
            trace!(depth = current_depth, ?eval, pv = ?pv, "minimax depth completed");
        }
        let decided = eval.is_decisive();
        found = Some((eval, pv));
        // deeper searches cannot change a forced result
        if decided {
            break;
        }
    }

    let counter = ctx.counter;
    debug!(
        states_visited = counter.states_visited,
        evals = counter.evals,
        prunes = counter.prunes,
        last_depth = counter.last_depth,
        "minimax: {}",
        counter.summary(ctx.start_time.elapsed().as_nanos())
    );
    Ok(match found {
        Some((eval, pv)) => SearchResult::new(pv, eval, counter),
        None => SearchResult {
            counter,
            ..Default::default()
        },
    })
}

/// Depth-limited minimax with alpha-beta pruning. Ties at the root are
/// broken uniformly at random with the search's own RNG.
pub struct MinimaxSearch<G: Game, R: Rng = SmallRng> {
    pub config: MinimaxConfig,
    rng: R,
    _game: PhantomData<fn() -> G>,
}

impl<G: Game> MinimaxSearch<G> {
    pub fn new(config: MinimaxConfig) -> Self {
        Self::new_with_rng(config, SmallRng::from_entropy())
    }

    pub fn new_with_seed(config: MinimaxConfig, seed: u64) -> Self {
        Self::new_with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<G: Game, R: Rng> MinimaxSearch<G, R> {
    pub fn new_with_rng(config: MinimaxConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            _game: PhantomData,
        }
    }
}

impl<G: Game, R: Rng> GameTreeSearch<G> for MinimaxSearch<G, R> {
    fn search(&mut self, position: &G, maximize_player: PlayerId) -> Result<SearchResult<G>, SearchError> {
        self.config.validate()?;
        let mut res = minimax_iterative_deepening(position, self.config, &mut self.rng)?;
        if !res.pv.is_empty() && position.to_move() != maximize_player {
            res.eval = -res.eval;
        }
        Ok(res)
    }
}
