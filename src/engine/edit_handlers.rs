// src/engine/edit_handlers.rs

//! Per-field edit logic.
//!
//! Values are parsed before anything is written, so a rejected value never
//! leaves a half-applied edit behind.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::engine::{EditOutcome, TaskField};
use crate::errors::{PlanError, Result};
use crate::schedule::estimate::{inclusive_span_days, realign_finish, resolve_task};
use crate::schedule::reschedule;
use crate::store::TaskStore;
use crate::task::{Dependencies, Task};
use crate::types::{Complexity, FixedDatePolicy, TaskStatus};

/// A parsed edit value, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    Text(String),
    Status(TaskStatus),
    Complexity(Option<Complexity>),
    Effort(Option<f64>),
    Duration(Option<u32>),
    Date(Option<NaiveDate>),
    Dependencies(Dependencies),
}

pub(crate) fn parse_value(field: TaskField, value: &str) -> Result<FieldValue> {
    let trimmed = value.trim();
    let invalid = |reason: String| PlanError::invalid_value(field.as_str(), value, reason);

    let parsed = match field {
        TaskField::Name
        | TaskField::Phase
        | TaskField::Site
        | TaskField::Owner
        | TaskField::Comment
        | TaskField::RefLink => FieldValue::Text(value.to_string()),
        TaskField::Status => FieldValue::Status(trimmed.parse().map_err(invalid)?),
        TaskField::Complexity if trimmed.is_empty() => FieldValue::Complexity(None),
        TaskField::Complexity => FieldValue::Complexity(Some(trimmed.parse().map_err(invalid)?)),
        TaskField::EffortHours if trimmed.is_empty() => FieldValue::Effort(None),
        TaskField::EffortHours => {
            let hours: f64 = trimmed.parse().map_err(|e| invalid(format!("{e}")))?;
            if !hours.is_finite() || hours < 0.0 {
                return Err(invalid("effort must be a non-negative number".to_string()));
            }
            FieldValue::Effort(Some(hours))
        }
        TaskField::DurationDays if trimmed.is_empty() => FieldValue::Duration(None),
        TaskField::DurationDays => {
            let days: u32 = trimmed.parse().map_err(|e| invalid(format!("{e}")))?;
            if days == 0 {
                return Err(invalid("duration must be at least one day".to_string()));
            }
            FieldValue::Duration(Some(days))
        }
        TaskField::PlannedStart
        | TaskField::PlannedFinish
        | TaskField::ActualStart
        | TaskField::ActualFinish => {
            if trimmed.is_empty() {
                FieldValue::Date(None)
            } else {
                let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map_err(|e| invalid(format!("expected YYYY-MM-DD ({e})")))?;
                FieldValue::Date(Some(date))
            }
        }
        TaskField::Dependencies => FieldValue::Dependencies(Dependencies::parse(value)),
    };

    Ok(parsed)
}

/// Why an otherwise valid edit is refused, if it is.
pub(crate) fn refusal(task: &Task, field: TaskField) -> Option<String> {
    match field {
        TaskField::EffortHours | TaskField::DurationDays if task.is_estimation_driven() => Some(
            format!(
                "{} is derived from complexity on estimation-driven task '{}'",
                field, task.id
            ),
        ),
        _ => None,
    }
}

/// Reject a planned date that would put the finish before the start.
pub(crate) fn check_planned_range(
    task: &Task,
    field: TaskField,
    value: &FieldValue,
    raw: &str,
) -> Result<()> {
    let (start, finish) = match (field, value) {
        (TaskField::PlannedStart, FieldValue::Date(Some(start))) => (*start, task.planned_finish),
        (TaskField::PlannedFinish, FieldValue::Date(Some(finish))) => match task.planned_start {
            Some(start) => (start, Some(*finish)),
            None => return Ok(()),
        },
        _ => return Ok(()),
    };
    match finish {
        Some(finish) if finish < start => Err(PlanError::invalid_value(
            field.as_str(),
            raw,
            format!("planned finish {finish} would fall before planned start {start}"),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn write_value(task: &mut Task, value: FieldValue, field: TaskField) {
    match (field, value) {
        (TaskField::Name, FieldValue::Text(v)) => task.name = v,
        (TaskField::Phase, FieldValue::Text(v)) => task.phase = v,
        (TaskField::Site, FieldValue::Text(v)) => task.site = v,
        (TaskField::Owner, FieldValue::Text(v)) => task.owner = v,
        (TaskField::Comment, FieldValue::Text(v)) => task.comment = v,
        (TaskField::RefLink, FieldValue::Text(v)) => task.ref_link = v,
        (_, FieldValue::Status(v)) => task.status = v,
        (_, FieldValue::Complexity(v)) => task.complexity = v,
        (_, FieldValue::Effort(v)) => task.effort_hours = v,
        (_, FieldValue::Duration(v)) => task.duration_days = v,
        (TaskField::PlannedStart, FieldValue::Date(v)) => task.planned_start = v,
        (TaskField::PlannedFinish, FieldValue::Date(v)) => task.planned_finish = v,
        (TaskField::ActualStart, FieldValue::Date(v)) => task.actual_start = v,
        (TaskField::ActualFinish, FieldValue::Date(v)) => task.actual_finish = v,
        (_, FieldValue::Dependencies(v)) => task.dependencies = v,
        (field, value) => {
            warn!(%field, ?value, "value does not match field; ignoring");
        }
    }
}

/// Complexity edit: re-resolve this task only and keep its planned finish in
/// step with the new duration.
pub fn handle_reestimate(task: &mut Task) -> EditOutcome {
    let estimate = resolve_task(task);
    let finish_realigned = task.is_estimation_driven() && realign_finish(task);
    debug!(
        task = %task.id,
        effort_hours = ?estimate.effort_hours,
        duration_days = estimate.duration_days,
        finish_realigned,
        "re-estimated after complexity edit"
    );
    EditOutcome::Reestimated {
        estimate,
        finish_realigned,
    }
}

/// Date or dependency edit: the whole store is re-propagated.
///
/// A manually planned task whose two planned dates are now both set takes
/// its duration from that span.
pub fn handle_reschedule(
    store: &mut TaskStore,
    task_id: &str,
    field: TaskField,
    policy: FixedDatePolicy,
) -> Result<EditOutcome> {
    if matches!(field, TaskField::PlannedStart | TaskField::PlannedFinish) {
        if let Some(task) = store.get_mut(task_id) {
            if let (false, Some(start), Some(finish)) =
                (task.is_estimation_driven(), task.planned_start, task.planned_finish)
            {
                if let Some(span) = inclusive_span_days(start, finish) {
                    task.duration_days = Some(span);
                }
            }
        }
    }

    match reschedule(store, policy) {
        Ok(report) => Ok(EditOutcome::Rescheduled(report)),
        Err(PlanError::DagCycle(cycle)) => {
            warn!(task = %task_id, %field, error = %cycle, "edit stored but dates not recomputed");
            Ok(EditOutcome::CycleDetected(cycle))
        }
        Err(e) => Err(e),
    }
}
