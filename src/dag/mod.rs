// src/dag/mod.rs

//! Dependency graph over tasks.
//!
//! - [`graph`] derives the directed graph from a task store.
//! - [`order`] detects cycles and produces the processing order.

pub mod graph;
pub mod order;

pub use graph::{DagGraph, GraphStats};
pub use order::CycleError;
