// src/schedule/mod.rs

//! Effort/duration resolution and date propagation.
//!
//! - [`estimate`] maps complexity to effort and effort to duration.
//! - [`propagate`] walks a topological order and fills in planned dates.
//!
//! [`reschedule`] chains the whole pipeline over a store.

pub mod estimate;
pub mod propagate;

use tracing::info;

use crate::dag::DagGraph;
use crate::errors::Result;
use crate::store::TaskStore;
use crate::types::FixedDatePolicy;

pub use estimate::{DAILY_CAPACITY_HOURS, Estimate, duration_for_effort, resolve_all, resolve_task};
pub use propagate::{PropagationReport, propagate};

/// Build graph → topological order → resolve estimates → propagate dates.
///
/// All or nothing: on a cycle this returns [`crate::errors::PlanError::DagCycle`]
/// before anything in `store` is touched.
pub fn reschedule(store: &mut TaskStore, policy: FixedDatePolicy) -> Result<PropagationReport> {
    let graph = DagGraph::from_store(store);
    let order = graph.topological_order()?;

    let resolved = resolve_all(store);
    let report = propagate(store, &graph, &order, policy);

    info!(
        tasks = store.len(),
        edges = graph.stats().edges,
        resolved,
        rescheduled = report.rescheduled.len(),
        unscheduled = report.unscheduled.len(),
        "schedule propagated"
    );

    Ok(report)
}
