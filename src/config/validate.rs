// src/config/validate.rs

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{PlanError, Result};
use crate::store::TaskStore;
use crate::task::Task;

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PlanError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        let store = TaskStore::from_tasks(raw.task)?;
        Ok(PlanFile::new_unchecked(raw.config, store))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_tasks(plan)?;
    for task in plan.task.iter() {
        validate_task(task)?;
    }
    Ok(())
}

fn ensure_has_tasks(plan: &RawPlanFile) -> Result<()> {
    if plan.task.is_empty() {
        return Err(PlanError::ConfigError(
            "plan must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

// Duplicate ids are caught by `TaskStore::from_tasks`. Unknown dependency ids
// and cycles are allowed here on purpose.
fn validate_task(task: &Task) -> Result<()> {
    if task.id.trim().is_empty() {
        return Err(PlanError::ConfigError(
            "task with an empty id".to_string(),
        ));
    }
    if task.id.trim() != task.id || task.id.contains(',') {
        return Err(PlanError::ConfigError(format!(
            "task id '{}' must not contain commas or surrounding whitespace",
            task.id
        )));
    }

    if let Some(effort) = task.effort_hours {
        if !effort.is_finite() || effort < 0.0 {
            return Err(PlanError::ConfigError(format!(
                "task '{}' has invalid effort_hours {} (must be >= 0)",
                task.id, effort
            )));
        }
    }

    if task.duration_days == Some(0) {
        return Err(PlanError::ConfigError(format!(
            "task '{}' has duration_days = 0 (must be >= 1)",
            task.id
        )));
    }

    if let (Some(start), Some(finish)) = (task.planned_start, task.planned_finish) {
        if finish < start {
            return Err(PlanError::ConfigError(format!(
                "task '{}' finishes ({}) before it starts ({})",
                task.id, finish, start
            )));
        }
    }

    Ok(())
}
