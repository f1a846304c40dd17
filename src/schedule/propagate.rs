// src/schedule/propagate.rs

//! Forward date propagation over a topological order.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::dag::DagGraph;
use crate::schedule::estimate::finish_for;
use crate::store::TaskStore;
use crate::task::TaskId;
use crate::types::FixedDatePolicy;

/// What one propagation pass did, task by task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// The processing order that was used.
    pub order: Vec<TaskId>,
    /// Tasks whose planned dates were written (and differ from before).
    pub rescheduled: Vec<TaskId>,
    /// Tasks with dependencies whose existing planned dates were kept.
    pub kept_fixed: Vec<TaskId>,
    /// Tasks with dependencies none of which has a planned finish yet.
    pub unscheduled: Vec<TaskId>,
}

impl PropagationReport {
    /// At least one task got new planned dates.
    pub fn changed(&self) -> bool {
        !self.rescheduled.is_empty()
    }
}

/// Walk `order` once and derive planned dates from dependency finishes.
///
/// `order` must be a topological order of `graph` so that every dependency
/// is final before its dependents are visited.
pub fn propagate(
    store: &mut TaskStore,
    graph: &DagGraph,
    order: &[TaskId],
    policy: FixedDatePolicy,
) -> PropagationReport {
    let mut report = PropagationReport {
        order: order.to_vec(),
        ..PropagationReport::default()
    };

    for id in order {
        let deps = graph.dependencies_of(id);
        if deps.is_empty() {
            continue;
        }

        let dependency_finish: Option<NaiveDate> = deps
            .iter()
            .filter_map(|dep| store.get(dep).and_then(|t| t.planned_finish))
            .max();

        let Some(dependency_finish) = dependency_finish else {
            debug!(task = %id, "no dependency has a planned finish yet; leaving unscheduled");
            report.unscheduled.push(id.clone());
            continue;
        };

        let Some(task) = store.get_mut(id) else {
            continue;
        };

        if let (Some(start), Some(_)) = (task.planned_start, task.planned_finish) {
            let keep = match policy {
                FixedDatePolicy::Keep => true,
                FixedDatePolicy::Shift => start > dependency_finish,
            };
            if keep {
                debug!(task = %id, ?policy, "planned dates already fixed; skipping");
                report.kept_fixed.push(id.clone());
                continue;
            }
        }

        let start = dependency_finish.checked_add_days(Days::new(1));
        let finish = start.and_then(|s| finish_for(s, task.effective_duration()));
        let (Some(start), Some(finish)) = (start, finish) else {
            warn!(task = %id, %dependency_finish, "planned dates out of calendar range; leaving unscheduled");
            report.unscheduled.push(id.clone());
            continue;
        };

        if task.planned_start != Some(start) || task.planned_finish != Some(finish) {
            debug!(task = %id, %start, %finish, "rescheduled from dependencies");
            task.planned_start = Some(start);
            task.planned_finish = Some(finish);
            report.rescheduled.push(id.clone());
        }
    }

    report
}
