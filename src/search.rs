// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{CostFunction, Frontier, Graph, Node};

/// Recommended number of allowed node expansions in [find_route]
/// before [RouteError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Additional controls for [find_route].
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions<'a> {
    /// Limits how many nodes may be expanded before returning
    /// [RouteError::StepLimitExceeded].
    pub step_limit: usize,

    /// Checked once per search step; once set, the search stops with [RouteError::Cancelled].
    pub cancel: Option<&'a AtomicBool>,
}

impl Default for SearchOptions<'_> {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            cancel: None,
        }
    }
}

/// Error conditions which may occur during [find_route].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The start or end nodes don't exist in a graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// All nodes reachable from the start were visited without reaching the end.
    #[error("no route found")]
    NoPathFound,

    /// Route search has exceeded its limit of steps.
    #[error("step limit exceeded")]
    StepLimitExceeded,

    /// Route search was interrupted through [SearchOptions::cancel].
    #[error("route search cancelled")]
    Cancelled,

    /// The cost function priced an edge with a negative or non-finite value.
    #[error("invalid cost of edge {from} - {to}: {cost}")]
    InvalidEdgeCost { from: String, to: String, cost: f64 },
}

/// Cheapest itinerary between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Sum of costs of all edges along `path`.
    pub cost: f64,

    /// Ids of the visited nodes, from the start to the end (both inclusive).
    pub path: Vec<String>,
}

/// Partial path held in the [Frontier]. Only the last hop is kept,
/// full paths are rebuilt from finalized hops once the end is reached.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    at: &'a Node,
    came_from: &'a str,
}

fn reconstruct_path<'a>(came_from: &HashMap<&str, &'a str>, mut last: &'a str) -> Vec<String> {
    let mut path = vec![last.to_string()];

    while let Some(&nd) = came_from.get(last) {
        path.push(nd.to_string());
        last = nd;
    }

    path.reverse();
    path
}

/// Pushes a [Candidate] for every unvisited neighbor of `at` onto the `queue`.
fn expand<'a, F: CostFunction>(
    g: &'a Graph<F>,
    queue: &mut Frontier<Candidate<'a>>,
    visited: &HashSet<&str>,
    at: &'a Node,
    cost: f64,
) -> Result<(), RouteError> {
    for neighbor_id in g.neighbors(&at.id) {
        if visited.contains(neighbor_id) {
            continue;
        }

        // Check if the referred node exists
        if let Some(neighbor) = g.get_node(neighbor_id) {
            let edge_cost = g.cache().get_or_compute(at, neighbor);
            if !(edge_cost >= 0.0 && edge_cost.is_finite()) {
                return Err(RouteError::InvalidEdgeCost {
                    from: at.id.clone(),
                    to: neighbor.id.clone(),
                    cost: edge_cost,
                });
            }

            queue.push(
                cost + edge_cost,
                Candidate {
                    at: neighbor,
                    came_from: &at.id,
                },
            );
        }
    }

    Ok(())
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the cheapest [Route] between two nodes in the provided graph.
///
/// Edge costs come from the graph's [CostCache](crate::CostCache), so repeated searches
/// over the same graph never price an edge twice. Routes of equal cost are resolved
/// deterministically: the [Frontier] pops candidates with equal costs in insertion order,
/// and neighbors are expanded in ascending id order.
///
/// Searching from a node to itself returns a zero-cost, single-node route.
/// [RouteError::NoPathFound] is returned if the end is not reachable from the start,
/// and [RouteError::InvalidEdgeCost] if an expanded edge has a negative or non-finite cost.
///
/// `options.step_limit` limits how many nodes may be expanded during the search
/// before returning [RouteError::StepLimitExceeded]; the recommended value is
/// [DEFAULT_STEP_LIMIT]. `options.cancel` can be raised from another thread
/// to abort a long-running search with [RouteError::Cancelled].
pub fn find_route<F: CostFunction>(
    g: &Graph<F>,
    from_id: &str,
    to_id: &str,
    options: &SearchOptions<'_>,
) -> Result<Route, RouteError> {
    let from = g
        .get_node(from_id)
        .ok_or_else(|| RouteError::UnknownNode(from_id.to_string()))?;
    let to = g
        .get_node(to_id)
        .ok_or_else(|| RouteError::UnknownNode(to_id.to_string()))?;

    if from.id == to.id {
        return Ok(Route {
            cost: 0.0,
            path: vec![from.id.clone()],
        });
    }

    let mut queue: Frontier<Candidate> = Frontier::new();
    let mut came_from: HashMap<&str, &str> = HashMap::default();
    let mut visited: HashSet<&str> = HashSet::default();
    let mut steps: usize = 0;

    visited.insert(&from.id);
    expand(g, &mut queue, &visited, from, 0.0)?;

    while let Some((cost, item)) = queue.try_pop() {
        if options.cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return Err(RouteError::Cancelled);
        }

        // A cheaper path to this node was already finalized
        if visited.contains(item.at.id.as_str()) {
            continue;
        }

        came_from.insert(&item.at.id, item.came_from);

        if item.at.id == to.id {
            log::debug!(
                "found route {} -> {} with cost {} after {} steps",
                from.id,
                to.id,
                cost,
                steps,
            );
            return Ok(Route {
                cost,
                path: reconstruct_path(&came_from, &to.id),
            });
        }

        steps += 1;
        if steps > options.step_limit {
            return Err(RouteError::StepLimitExceeded);
        }

        log::trace!("expanding {} (cost {})", item.at.id, cost);
        visited.insert(&item.at.id);
        expand(g, &mut queue, &visited, item.at, cost)?;
    }

    log::debug!("no route {} -> {} after {} steps", from.id, to.id, steps);
    Err(RouteError::NoPathFound)
}
