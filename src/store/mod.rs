// src/store/mod.rs

//! Ordered collection of tasks keyed by id.
//!
//! Insertion order is the tie-break for everything downstream (graph node
//! order, topological order, report rows), so it is preserved exactly.
//!
//! - [`seed`] builds the demo/template plan a new project starts from.

pub mod seed;

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{PlanError, Result};
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, rejecting duplicate ids.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        let mut store = Self::new();
        for task in tasks {
            store.insert(task)?;
        }
        Ok(store)
    }

    /// Append a task. Ids are unique; a second task with the same id is a
    /// configuration error and leaves the store untouched.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.index.contains_key(&task.id) {
            return Err(PlanError::ConfigError(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    /// Mutable access stays inside the crate so the id/index pairing can't
    /// be broken by renaming a task.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        match self.index.get(id) {
            Some(&i) => self.tasks.get_mut(i),
            None => None,
        }
    }

    pub(crate) fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.iter_mut()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Insertion position of a task.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Bulk delete. Individual deletion is not offered.
    pub fn clear(&mut self) {
        debug!(removed = self.tasks.len(), "clearing task store");
        self.tasks.clear();
        self.index.clear();
    }

    /// Replace every task with a copy of `template`.
    pub fn reset_to(&mut self, template: &TaskStore) {
        debug!(tasks = template.len(), "resetting task store to template");
        self.tasks = template.tasks.clone();
        self.index = template.index.clone();
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
