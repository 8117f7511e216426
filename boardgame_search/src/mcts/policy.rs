use std::cmp::Ordering;

use super::*;

/// Selection score of a child node. A child that was never visited ranks
/// above every finite score.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Priority {
    Unvisited,
    Score(f32),
}

impl Priority {
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unvisited, Self::Unvisited) => Ordering::Equal,
            (Self::Unvisited, Self::Score(..)) => Ordering::Greater,
            (Self::Score(..), Self::Unvisited) => Ordering::Less,
            (Self::Score(a), Self::Score(b)) => a.total_cmp(b),
        }
    }
}

pub struct SelectionPolicyContext<'a, G: Game> {
    pub config: &'a MCTSConfig,
    pub parent: &'a NodeData<G>,
}

/// Trait for customizing the MCTS selection phase: the child with the
/// highest priority is descended into.
///
/// See also: <https://en.wikipedia.org/wiki/Monte_Carlo_tree_search#Exploration_and_exploitation>
pub trait SelectionPolicy<G: Game> {
    fn priority(&self, ctx: &SelectionPolicyContext<G>, child: &NodeData<G>) -> Priority;
}

/// Upper Confidence bound applied to Trees:
/// `value / visits + C * sqrt(ln(parent.visits) / visits)`.
#[derive(Debug, Default, Copy, Clone)]
pub struct Uct;

impl<G: Game> SelectionPolicy<G> for Uct {
    fn priority(&self, ctx: &SelectionPolicyContext<G>, child: &NodeData<G>) -> Priority {
        if child.visits == 0 {
            return Priority::Unvisited;
        }
        let n_parent = ctx.parent.visits.max(1) as f32;
        let exploration = ctx.config.exploration_constant * (n_parent.ln() / child.visits as f32).sqrt();
        Priority::Score(child.mean_value() + exploration)
    }
}

/// Pure exploitation, ignores the exploration constant.
#[derive(Debug, Default, Copy, Clone)]
pub struct Greedy;

impl<G: Game> SelectionPolicy<G> for Greedy {
    fn priority(&self, _: &SelectionPolicyContext<G>, child: &NodeData<G>) -> Priority {
        if child.visits == 0 {
            Priority::Unvisited
        } else {
            Priority::Score(child.mean_value())
        }
    }
}
