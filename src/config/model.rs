// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;
use crate::store::TaskStore;
use crate::task::Task;
use crate::types::FixedDatePolicy;

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// fixed_date_policy = "keep"
///
/// [[task]]
/// id = "D001"
/// planned_start = "2025-01-15"
/// planned_finish = "2025-01-22"
///
/// [[task]]
/// id = "T001"
/// complexity = "Complex"
/// dependencies = "D001"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlanFile {
    /// Scheduling behaviour from `[config]`.
    #[serde(default)]
    pub config: PlanSettings,

    /// All task records from `[[task]]`, in file order.
    #[serde(default)]
    pub task: Vec<Task>,
}

/// `[config]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// `"keep"` (default) or `"shift"`; see [`FixedDatePolicy`].
    #[serde(default)]
    pub fixed_date_policy: FixedDatePolicy,

    /// Run the propagation pipeline right after loading.
    #[serde(default = "default_propagate_on_load")]
    pub propagate_on_load: bool,
}

fn default_propagate_on_load() -> bool {
    true
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            fixed_date_policy: FixedDatePolicy::default(),
            propagate_on_load: default_propagate_on_load(),
        }
    }
}

impl From<&PlanSettings> for EngineOptions {
    fn from(settings: &PlanSettings) -> Self {
        EngineOptions {
            fixed_date_policy: settings.fixed_date_policy,
        }
    }
}

/// A validated plan: settings plus a task store with unique ids.
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub settings: PlanSettings,
    pub store: TaskStore,
}

impl PlanFile {
    /// Assemble without validation; prefer `PlanFile::try_from(raw)`.
    pub(crate) fn new_unchecked(settings: PlanSettings, store: TaskStore) -> Self {
        Self { settings, store }
    }

    /// Back to the serializable shape.
    pub fn to_raw(&self) -> RawPlanFile {
        RawPlanFile {
            config: self.settings,
            task: self.store.tasks().to_vec(),
        }
    }
}
