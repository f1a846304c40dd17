// src/store/seed.rs

//! Demo delivery plan used as the template for new projects.

use chrono::NaiveDate;

use crate::errors::Result;
use crate::store::TaskStore;
use crate::task::{Dependencies, Task};
use crate::types::{Complexity, TaskStatus};

fn task(id: &str, name: &str, phase: &str, owner: &str) -> Task {
    Task {
        name: name.to_string(),
        phase: phase.to_string(),
        site: "First Site".to_string(),
        owner: owner.to_string(),
        ..Task::new(id)
    }
}

/// Design → development → testing → go-live for a single site.
///
/// Only the design task carries dates; everything downstream is left for
/// propagation to fill in.
pub fn demo_plan() -> Result<TaskStore> {
    let design = Task {
        status: TaskStatus::Completed,
        effort_hours: Some(48.0),
        planned_start: NaiveDate::from_ymd_opt(2025, 1, 15),
        planned_finish: NaiveDate::from_ymd_opt(2025, 1, 22),
        comment: "Signed off by the customer".to_string(),
        ref_link: "design/solution-design.pdf".to_string(),
        ..task("D001", "Solution design sign-off", "Design", "Program Manager")
    };

    let provisioning = Task {
        status: TaskStatus::InProgress,
        duration_days: Some(3),
        dependencies: Dependencies::parse("D001"),
        ..task("P001", "Provision environments", "Infrastructure", "FE-DevOps")
    };

    let backend = Task {
        complexity: Some(Complexity::Complex),
        dependencies: Dependencies::parse("D001"),
        ..task("T001", "Backend integration", "Development", "Developer")
    };

    let frontend = Task {
        complexity: Some(Complexity::Medium),
        dependencies: Dependencies::parse("D001"),
        ..task("T002", "Site configuration screens", "Development", "Developer")
    };

    let testing = Task {
        complexity: Some(Complexity::Simple),
        dependencies: Dependencies::parse("P001, T001, T002"),
        ..task("Q001", "User acceptance testing", "Testing", "QA Lead")
    };

    let go_live = Task {
        duration_days: Some(1),
        dependencies: Dependencies::parse("Q001"),
        ..task("G001", "Go-live", "Deployment", "Program Manager")
    };

    TaskStore::from_tasks([design, provisioning, backend, frontend, testing, go_live])
}
