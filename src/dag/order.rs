// src/dag/order.rs

//! Cycle detection and deterministic topological ordering.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dag::graph::DagGraph;
use crate::task::TaskId;

/// The dependency graph is not acyclic.
///
/// `tasks` lists every task that sits on a cycle (members of a strongly
/// connected component with more than one node, or with a self-edge), in
/// store order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cycle detected in task dependencies involving {}", .tasks.join(", "))]
pub struct CycleError {
    pub tasks: Vec<TaskId>,
}

impl DagGraph {
    /// Kahn's algorithm. Among tasks that are ready at the same time the one
    /// inserted first into the store wins, so identical input always yields
    /// the identical order.
    pub fn topological_order(&self) -> Result<Vec<TaskId>, CycleError> {
        let graph = self.inner();

        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|n| graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order: Vec<TaskId> = Vec::with_capacity(graph.node_count());

        while let Some(Reverse(node)) = ready.pop() {
            order.push(graph[node].clone());
            for next in graph.neighbors_directed(node, Direction::Outgoing) {
                let deg = &mut in_degree[next.index()];
                *deg -= 1;
                if *deg == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < graph.node_count() {
            let err = self.cycle_error();
            warn!(tasks = ?err.tasks, "dependency cycle detected");
            return Err(err);
        }

        debug!(tasks = order.len(), "topological order computed");
        Ok(order)
    }

    /// `true` when a topological order exists.
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_ok()
    }

    fn cycle_error(&self) -> CycleError {
        let graph = self.inner();
        let mut members: Vec<NodeIndex> = tarjan_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .collect();
        members.sort();

        CycleError {
            tasks: members.into_iter().map(|n| graph[n].clone()).collect(),
        }
    }
}
