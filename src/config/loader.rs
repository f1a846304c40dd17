// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::Result;

/// Load a plan file from a given path and return the raw `RawPlanFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let plan: RawPlanFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), tasks = plan.task.len(), "plan file parsed");

    Ok(plan)
}

/// Load a plan file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one task,
///   - unique, well-formed ids,
///   - sane effort/duration/planned ranges.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    let plan = PlanFile::try_from(raw)?;
    Ok(plan)
}

/// Write a plan back to disk as TOML.
pub fn save_to_path(path: impl AsRef<Path>, plan: &PlanFile) -> Result<()> {
    let path = path.as_ref();
    let contents = toml::to_string(&plan.to_raw())?;
    fs::write(path, contents)?;
    debug!(path = %path.display(), tasks = plan.store.len(), "plan file written");
    Ok(())
}

/// Default plan file: `Plan.toml` in the current working directory.
pub fn default_plan_path() -> PathBuf {
    PathBuf::from("Plan.toml")
}
