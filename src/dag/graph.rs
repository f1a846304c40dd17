// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::store::TaskStore;
use crate::task::TaskId;

/// Counters collected while deriving the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Dependency entries naming an id that is not in the store.
    pub dropped_references: usize,
}

/// Dependency graph derived from a [`TaskStore`].
///
/// One node per task, in store order, and one edge `dependency -> dependent`
/// per dependency entry whose target exists. The graph is rebuilt from
/// scratch on every call and holds no state of its own; it is not assumed to
/// be acyclic (see [`DagGraph::topological_order`]).
#[derive(Debug, Clone)]
pub struct DagGraph {
    graph: DiGraph<TaskId, ()>,
    index: HashMap<TaskId, NodeIndex>,
    dropped_references: usize,
}

impl DagGraph {
    pub fn from_store(store: &TaskStore) -> Self {
        let mut graph: DiGraph<TaskId, ()> = DiGraph::with_capacity(store.len(), store.len());
        let mut index: HashMap<TaskId, NodeIndex> = HashMap::with_capacity(store.len());

        // First pass: nodes, so node indices follow store order.
        for task in store.iter() {
            let node = graph.add_node(task.id.clone());
            index.insert(task.id.clone(), node);
        }

        // Second pass: edges dep -> task. Unknown ids are dropped.
        let mut dropped_references = 0;
        for task in store.iter() {
            let to = index[&task.id];
            for dep in task.dependencies.iter() {
                match index.get(dep) {
                    Some(&from) => {
                        graph.update_edge(from, to, ());
                    }
                    None => {
                        dropped_references += 1;
                        debug!(task = %task.id, dependency = %dep, "dropping reference to unknown task");
                    }
                }
            }
        }

        Self {
            graph,
            index,
            dropped_references,
        }
    }

    /// All task ids in store order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Immediate dependencies of a task that exist in the store, in store order.
    pub fn dependencies_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Immediate dependents of a task, in store order.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Outgoing)
    }

    /// Whether the edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Every edge as `(dependency, dependent)`.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            dropped_references: self.dropped_references,
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<TaskId, ()> {
        &self.graph
    }

    fn neighbours(&self, id: &str, dir: Direction) -> Vec<&str> {
        let Some(&node) = self.index.get(id) else {
            return Vec::new();
        };
        let mut nodes: Vec<NodeIndex> = self.graph.neighbors_directed(node, dir).collect();
        nodes.sort();
        nodes.dedup();
        nodes.into_iter().map(|n| self.graph[n].as_str()).collect()
    }
}
