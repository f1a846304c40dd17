#![allow(dead_code)]

pub use plandag_test_utils::builders;
pub use plandag_test_utils::{date, init_tracing};

use plandag::store::TaskStore;

use crate::common::builders::{StoreBuilder, TaskBuilder};

/// `D001` (done, 2025-01-15..2025-01-22) feeding whatever `extra` adds.
pub fn design_then(extra: Vec<plandag::task::Task>) -> TaskStore {
    let mut builder = StoreBuilder::new().with_task(
        TaskBuilder::new("D001")
            .name("Design")
            .planned("2025-01-15", "2025-01-22")
            .build(),
    );
    for task in extra {
        builder = builder.with_task(task);
    }
    builder.build()
}
