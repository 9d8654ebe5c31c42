//! Best-first graph search over quantized states.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, info};

use crate::action::{Action, ActionModel};
use crate::quantizer::Quantizer;
use crate::state::{DiscreteState, StateVertex};

/// Container of states awaiting expansion. The expansion strategy is fixed by
/// the pop order; the shipped implementation is FIFO, giving breadth-first
/// search.
pub trait Frontier {
    fn push(&mut self, state: StateVertex);
    fn pop(&mut self) -> Option<StateVertex>;
    fn is_empty(&self) -> bool;
}

/// FIFO frontier: breadth-first expansion, minimum-hop paths in the
/// discretized graph.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<StateVertex>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, state: StateVertex) {
        self.queue.push_back(state);
    }

    fn pop(&mut self) -> Option<StateVertex> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// One element of a reconstructed plan. The first element carries the start
/// state and no action; every later element carries the edge taken to reach
/// its state.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub state: StateVertex,
    pub action: Option<Action>,
}

/// A plan and its accumulated global-time cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub path: Vec<PathNode>,
    pub total_cost: f64,
}

/// Graph search over quantized states with at-most-once visitation.
///
/// Ties break by insertion order as produced by the action model, so two runs
/// with identical inputs produce identical results.
pub struct Solver<M, F> {
    model: M,
    quantizer: Quantizer,
    frontier: F,
    max_cost: Option<f64>,
}

impl<M, F> Solver<M, F>
where
    M: ActionModel,
    F: Frontier,
{
    pub fn new(model: M, quantizer: Quantizer, frontier: F) -> Self {
        Self {
            model,
            quantizer,
            frontier,
            max_cost: None,
        }
    }

    /// Stop expanding states whose accumulated cost has reached `limit`.
    pub fn with_max_cost(mut self, limit: f64) -> Self {
        self.max_cost = Some(limit);
        self
    }

    /// Search from `start` until `is_goal` holds on a popped state. Returns
    /// `None` when the frontier exhausts under the horizon.
    pub fn solve<G>(&mut self, start: StateVertex, is_goal: G) -> Option<SolverResult>
    where
        G: Fn(&StateVertex) -> bool,
    {
        let mut visited: HashSet<DiscreteState> = HashSet::new();
        let mut parent: HashMap<DiscreteState, (StateVertex, Action)> = HashMap::new();
        let mut cost: HashMap<DiscreteState, f64> = HashMap::new();

        let start_key = self.quantizer.quantize(&start);
        visited.insert(start_key.clone());
        cost.insert(start_key, 0.0);
        self.frontier.push(start);

        let mut expanded: usize = 0;
        while let Some(current) = self.frontier.pop() {
            if is_goal(&current) {
                info!(
                    "goal reached at t={:.3} after {} expansions",
                    current.global_time, expanded
                );
                return Some(self.reconstruct(current, &parent));
            }
            let current_key = self.quantizer.quantize(&current);
            let cost_here = cost.get(&current_key).copied().unwrap_or(0.0);
            if self.max_cost.is_some_and(|limit| cost_here >= limit) {
                continue;
            }
            expanded += 1;
            for action in self.model.enumerate(&current) {
                let Some(successor) = self.model.apply(&current, &action) else {
                    continue;
                };
                let key = self.quantizer.quantize(&successor);
                if visited.contains(&key) {
                    continue;
                }
                visited.insert(key.clone());
                cost.insert(key.clone(), cost_here + action.cost());
                parent.insert(key, (current.clone(), action));
                self.frontier.push(successor);
            }
        }
        debug!("frontier exhausted after {expanded} expansions");
        None
    }

    /// Walk the parent map back from the goal. The start vertex is never
    /// inserted into the parent map, which is what terminates the walk.
    fn reconstruct(
        &self,
        goal: StateVertex,
        parent: &HashMap<DiscreteState, (StateVertex, Action)>,
    ) -> SolverResult {
        let mut nodes = Vec::new();
        let mut cursor = goal;
        loop {
            let key = self.quantizer.quantize(&cursor);
            match parent.get(&key) {
                Some((previous, action)) => {
                    nodes.push(PathNode {
                        state: cursor,
                        action: Some(action.clone()),
                    });
                    cursor = previous.clone();
                }
                None => {
                    nodes.push(PathNode {
                        state: cursor,
                        action: None,
                    });
                    break;
                }
            }
        }
        nodes.reverse();
        let total_cost = nodes
            .iter()
            .filter_map(|node| node.action.as_ref())
            .map(Action::cost)
            .sum();
        SolverResult {
            path: nodes,
            total_cost,
        }
    }
}
