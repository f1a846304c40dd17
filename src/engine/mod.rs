// src/engine/mod.rs

//! Mutation entry point for the scheduling engine.
//!
//! Every change to a task arrives as one [`TaskEdit`] `(task_id, field,
//! value)`. The field decides what cascades:
//! - `complexity`: re-resolve effort/duration for that task only
//! - planned dates and `dependencies`: rebuild graph, sort, propagate over
//!   the whole store
//! - anything else: write the field, nothing more
//!
//! The pure per-field handlers live in [`edit_handlers`]; [`core`] holds the
//! owned [`PlanEngine`] wrapper.

use std::fmt;
use std::str::FromStr;

use crate::dag::CycleError;
use crate::errors::PlanError;
use crate::schedule::{Estimate, PropagationReport};
use crate::task::TaskId;
use crate::types::FixedDatePolicy;

/// Editable columns of a task record. `id` is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Name,
    Phase,
    Site,
    Owner,
    Status,
    Complexity,
    EffortHours,
    DurationDays,
    PlannedStart,
    PlannedFinish,
    ActualStart,
    ActualFinish,
    Dependencies,
    Comment,
    RefLink,
}

/// Follow-up work an edit to a field requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    None,
    Reestimate,
    Reschedule,
}

impl TaskField {
    pub fn cascade(&self) -> Cascade {
        match self {
            TaskField::Complexity => Cascade::Reestimate,
            TaskField::PlannedStart | TaskField::PlannedFinish | TaskField::Dependencies => {
                Cascade::Reschedule
            }
            _ => Cascade::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskField::Name => "name",
            TaskField::Phase => "phase",
            TaskField::Site => "site",
            TaskField::Owner => "owner",
            TaskField::Status => "status",
            TaskField::Complexity => "complexity",
            TaskField::EffortHours => "effort_hours",
            TaskField::DurationDays => "duration_days",
            TaskField::PlannedStart => "planned_start",
            TaskField::PlannedFinish => "planned_finish",
            TaskField::ActualStart => "actual_start",
            TaskField::ActualFinish => "actual_finish",
            TaskField::Dependencies => "dependencies",
            TaskField::Comment => "comment",
            TaskField::RefLink => "ref_link",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskField {
    type Err = PlanError;

    /// Accepts snake_case names and the column headers used by the
    /// dashboard ("Planned Start", "Effort Hours", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "name" | "task" => Ok(TaskField::Name),
            "phase" => Ok(TaskField::Phase),
            "site" => Ok(TaskField::Site),
            "owner" => Ok(TaskField::Owner),
            "status" => Ok(TaskField::Status),
            "complexity" => Ok(TaskField::Complexity),
            "effort_hours" | "effort" => Ok(TaskField::EffortHours),
            "duration_days" | "duration" => Ok(TaskField::DurationDays),
            "planned_start" => Ok(TaskField::PlannedStart),
            "planned_finish" => Ok(TaskField::PlannedFinish),
            "actual_start" => Ok(TaskField::ActualStart),
            "actual_finish" => Ok(TaskField::ActualFinish),
            "dependencies" | "depends_on" => Ok(TaskField::Dependencies),
            "comment" | "comments" => Ok(TaskField::Comment),
            "ref_link" | "link" => Ok(TaskField::RefLink),
            "id" | "task_id" => Err(PlanError::invalid_value(
                "field",
                s,
                "task id cannot be edited",
            )),
            _ => Err(PlanError::invalid_value("field", s, "unknown task field")),
        }
    }
}

/// One field edit against one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub task_id: TaskId,
    pub field: TaskField,
    /// Textual value; empty clears optional fields.
    pub value: String,
}

impl TaskEdit {
    pub fn new(task_id: impl Into<TaskId>, field: TaskField, value: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            field,
            value: value.into(),
        }
    }
}

/// Result of applying a [`TaskEdit`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// No task with that id; the store is untouched.
    UnknownTarget,
    /// The field was written; nothing cascaded.
    Updated,
    /// The edit was not applied (the store is untouched).
    Ignored { reason: String },
    /// Complexity written and effort/duration re-resolved for the task.
    Reestimated {
        estimate: Estimate,
        /// The planned finish moved to match the new duration.
        finish_realigned: bool,
    },
    /// Field written and the whole store re-propagated.
    Rescheduled(PropagationReport),
    /// Field written, but the dependency graph has a cycle so no dates were
    /// recomputed.
    CycleDetected(CycleError),
}

/// Options shared by every edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub fixed_date_policy: FixedDatePolicy,
}

pub mod core;
pub mod edit_handlers;

pub use self::core::{PlanEngine, apply_edit};
