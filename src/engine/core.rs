// src/engine/core.rs

//! Owned engine wrapper around a task store.
//!
//! Synchronous and deterministic: no channels, no IO. The store is owned by
//! the engine value (or borrowed mutably by [`apply_edit`]); nothing is
//! global.

use tracing::{debug, info};

use crate::dag::DagGraph;
use crate::engine::edit_handlers::{
    check_planned_range, handle_reestimate, handle_reschedule, parse_value, refusal,
    write_value,
};
use crate::engine::{Cascade, EditOutcome, EngineOptions, TaskEdit};
use crate::errors::Result;
use crate::schedule::{PropagationReport, reschedule};
use crate::store::TaskStore;

/// Apply one edit to `store`.
///
/// - unknown `task_id`: [`EditOutcome::UnknownTarget`], store untouched
/// - unparsable value, or a planned date that would finish before it
///   starts: `Err(InvalidFieldValue)`, store untouched
/// - otherwise the field is written and the cascade for that field runs
pub fn apply_edit(
    store: &mut TaskStore,
    edit: &TaskEdit,
    options: &EngineOptions,
) -> Result<EditOutcome> {
    let Some(task) = store.get_mut(&edit.task_id) else {
        debug!(task = %edit.task_id, field = %edit.field, "edit for unknown task; ignoring");
        return Ok(EditOutcome::UnknownTarget);
    };

    let value = parse_value(edit.field, &edit.value)?;

    if let Some(reason) = refusal(task, edit.field) {
        tracing::warn!(task = %edit.task_id, field = %edit.field, %reason, "edit ignored");
        return Ok(EditOutcome::Ignored { reason });
    }

    check_planned_range(task, edit.field, &value, &edit.value)?;
    write_value(task, value, edit.field);
    info!(task = %edit.task_id, field = %edit.field, value = %edit.value, "task edited");

    match edit.field.cascade() {
        Cascade::None => Ok(EditOutcome::Updated),
        Cascade::Reestimate => Ok(handle_reestimate(task)),
        Cascade::Reschedule => handle_reschedule(
            store,
            &edit.task_id,
            edit.field,
            options.fixed_date_policy,
        ),
    }
}

/// A task store plus the options every operation runs with.
#[derive(Debug, Clone)]
pub struct PlanEngine {
    store: TaskStore,
    options: EngineOptions,
}

impl PlanEngine {
    pub fn new(store: TaskStore, options: EngineOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    /// Freshly derived dependency graph of the current store.
    pub fn graph(&self) -> DagGraph {
        DagGraph::from_store(&self.store)
    }

    /// Run the full pipeline over every task.
    pub fn reschedule(&mut self) -> Result<PropagationReport> {
        reschedule(&mut self.store, self.options.fixed_date_policy)
    }

    pub fn apply_edit(&mut self, edit: &TaskEdit) -> Result<EditOutcome> {
        apply_edit(&mut self.store, edit, &self.options)
    }
}
