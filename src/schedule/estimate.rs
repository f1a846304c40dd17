// src/schedule/estimate.rs

//! Effort and duration resolution.

use chrono::NaiveDate;
use tracing::debug;

use crate::store::TaskStore;
use crate::task::Task;

/// Working hours in one calendar day.
pub const DAILY_CAPACITY_HOURS: f64 = 8.0;

/// Resolved effort/duration pair for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub effort_hours: Option<f64>,
    pub duration_days: u32,
}

/// `ceil(effort / capacity)`, at least one day.
pub fn duration_for_effort(effort_hours: f64) -> u32 {
    let days = (effort_hours / DAILY_CAPACITY_HOURS).ceil();
    if days.is_finite() && days >= 1.0 {
        days as u32
    } else {
        1
    }
}

/// Inclusive number of calendar days from `start` to `finish`.
///
/// `None` when `finish` is before `start`.
pub fn inclusive_span_days(start: NaiveDate, finish: NaiveDate) -> Option<u32> {
    let days = (finish - start).num_days() + 1;
    u32::try_from(days).ok().filter(|d| *d >= 1)
}

/// Resolve effort and duration for a single task, writing the result back.
///
/// - Estimation-driven: effort comes from the complexity lookup and the
///   duration from the effort.
/// - Otherwise: an explicitly supplied duration is kept; a missing one is
///   taken from the inclusive planned span, or one day.
pub fn resolve_task(task: &mut Task) -> Estimate {
    match task.complexity {
        Some(complexity) => {
            let effort = complexity.effort_hours();
            task.effort_hours = Some(effort);
            task.duration_days = Some(duration_for_effort(effort));
        }
        None => {
            let supplied = task.duration_days.filter(|d| *d >= 1);
            task.duration_days = Some(supplied.unwrap_or_else(|| planned_span_or_one(task)));
        }
    }

    Estimate {
        effort_hours: task.effort_hours,
        duration_days: task.effective_duration(),
    }
}

/// Resolve every task in the store. Returns how many tasks changed.
pub fn resolve_all(store: &mut TaskStore) -> usize {
    let mut changed = 0;
    for task in store.tasks_mut() {
        let before = (task.effort_hours, task.duration_days);
        resolve_task(task);
        if before != (task.effort_hours, task.duration_days) {
            debug!(
                task = %task.id,
                effort_hours = ?task.effort_hours,
                duration_days = ?task.duration_days,
                "resolved effort/duration"
            );
            changed += 1;
        }
    }
    changed
}

/// Set `planned_finish` from `planned_start` and the current duration.
///
/// No-op when the task has no planned start. Returns whether the finish
/// date changed.
pub fn realign_finish(task: &mut Task) -> bool {
    let Some(start) = task.planned_start else {
        return false;
    };
    let finish = finish_for(start, task.effective_duration());
    if finish.is_some() && finish != task.planned_finish {
        task.planned_finish = finish;
        true
    } else {
        false
    }
}

/// Last day of a task that starts on `start` and lasts `duration_days`.
pub fn finish_for(start: NaiveDate, duration_days: u32) -> Option<NaiveDate> {
    start.checked_add_days(chrono::Days::new(u64::from(duration_days.saturating_sub(1))))
}

fn planned_span_or_one(task: &Task) -> u32 {
    match (task.planned_start, task.planned_finish) {
        (Some(start), Some(finish)) => inclusive_span_days(start, finish).unwrap_or(1),
        _ => 1,
    }
}
