// src/config/mod.rs

//! Plan file loading, validation and saving.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load/save a plan file on disk (`loader.rs`).
//! - Validate record-level invariants (`validate.rs`).
//!
//! A cyclic dependency graph is *not* a load error: such a plan can still be
//! stored and displayed, it just can't be propagated.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_plan_path, load_and_validate, load_from_path, save_to_path};
pub use model::{PlanFile, PlanSettings, RawPlanFile};
