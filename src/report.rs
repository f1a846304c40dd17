// src/report.rs

//! Read-time views over a task store: display status and plan statistics.
//!
//! Nothing here writes back into the store.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::store::TaskStore;
use crate::task::Task;
use crate::types::{DisplayStatus, TaskStatus};

/// Status as shown to a reader.
///
/// `Delayed` when the task is not completed and its planned finish is
/// before `today`; otherwise the stored status.
pub fn display_status(task: &Task, today: NaiveDate) -> DisplayStatus {
    match (task.status, task.planned_finish) {
        (TaskStatus::Completed, _) => DisplayStatus::Completed,
        (_, Some(finish)) if finish < today => DisplayStatus::Delayed,
        (status, _) => status.into(),
    }
}

/// Headline numbers for one plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSummary {
    pub total_tasks: usize,
    /// Distinct non-empty owners.
    pub unique_owners: usize,
    // Counted by display status: a delayed task is not also in progress.
    pub completed: usize,
    pub in_progress: usize,
    pub yet_to_start: usize,
    pub delayed: usize,
    /// Tasks with both planned dates.
    pub scheduled: usize,
    pub unscheduled: usize,
    pub total_effort_hours: f64,
    /// Tasks with a non-blank comment.
    pub with_comments: usize,
    /// Tasks with a non-blank reference link.
    pub with_ref_links: usize,
    pub earliest_start: Option<NaiveDate>,
    pub latest_finish: Option<NaiveDate>,
}

impl PlanSummary {
    pub fn from_store(store: &TaskStore, today: NaiveDate) -> Self {
        let mut summary = PlanSummary {
            total_tasks: store.len(),
            ..PlanSummary::default()
        };
        let mut owners: BTreeSet<&str> = BTreeSet::new();

        for task in store.iter() {
            let owner = task.owner.trim();
            if !owner.is_empty() {
                owners.insert(owner);
            }

            match display_status(task, today) {
                DisplayStatus::Completed => summary.completed += 1,
                DisplayStatus::InProgress => summary.in_progress += 1,
                DisplayStatus::YetToStart => summary.yet_to_start += 1,
                DisplayStatus::Delayed => summary.delayed += 1,
            }

            if task.has_fixed_dates() {
                summary.scheduled += 1;
            } else {
                summary.unscheduled += 1;
            }

            summary.total_effort_hours += task.effort_hours.unwrap_or(0.0);
            if !task.comment.trim().is_empty() {
                summary.with_comments += 1;
            }
            if !task.ref_link.trim().is_empty() {
                summary.with_ref_links += 1;
            }

            if let Some(start) = task.planned_start {
                summary.earliest_start = Some(summary.earliest_start.map_or(start, |s| s.min(start)));
            }
            if let Some(finish) = task.planned_finish {
                summary.latest_finish = Some(summary.latest_finish.map_or(finish, |f| f.max(finish)));
            }
        }

        summary.unique_owners = owners.len();
        summary
    }
}
