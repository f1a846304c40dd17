#![allow(dead_code)]

use plandag::store::TaskStore;
use plandag::task::{Dependencies, Task};
use plandag::types::{Complexity, TaskStatus};

use crate::date;

/// Builder for `TaskStore` to simplify test setup.
pub struct StoreBuilder {
    tasks: Vec<Task>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> TaskStore {
        TaskStore::from_tasks(self.tasks).expect("Failed to build valid store from builder")
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self { task: Task::new(id) }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.task.owner = owner.to_string();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.task.complexity = Some(complexity);
        self
    }

    pub fn effort(mut self, hours: f64) -> Self {
        self.task.effort_hours = Some(hours);
        self
    }

    pub fn duration(mut self, days: u32) -> Self {
        self.task.duration_days = Some(days);
        self
    }

    pub fn start(mut self, start: &str) -> Self {
        self.task.planned_start = Some(date(start));
        self
    }

    pub fn finish(mut self, finish: &str) -> Self {
        self.task.planned_finish = Some(date(finish));
        self
    }

    pub fn planned(self, start: &str, finish: &str) -> Self {
        self.start(start).finish(finish)
    }

    /// Comma-separated dependency list, as a collaborator would send it.
    pub fn after(mut self, deps: &str) -> Self {
        self.task.dependencies = Dependencies::parse(deps);
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.task.comment = comment.to_string();
        self
    }

    pub fn ref_link(mut self, link: &str) -> Self {
        self.task.ref_link = link.to_string();
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
