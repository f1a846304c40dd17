// src/types.rs

//! Closed enumerations for the string-typed columns of a task record.
//!
//! Values coming from a collaborator (plan file, edit triple) are parsed
//! strictly: an unknown value is an error, never a silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lower-case, collapse `_`/`-`/runs of whitespace into a single space.
fn normalise(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stored lifecycle state of a task.
///
/// "Delayed" is deliberately absent: it is a read-time view, see
/// [`crate::report::display_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskStatus {
    Completed,
    InProgress,
    YetToStart,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::YetToStart
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::YetToStart => "Yet to Start",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "completed" => Ok(TaskStatus::Completed),
            "in progress" => Ok(TaskStatus::InProgress),
            "yet to start" => Ok(TaskStatus::YetToStart),
            "delayed" => Err(
                "\"Delayed\" is derived from the planned finish date and cannot be stored"
                    .to_string(),
            ),
            other => Err(format!(
                "invalid status: {other} (expected \"Completed\", \"In Progress\" or \"Yet to Start\")"
            )),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Complexity classification of an estimation-driven task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Medium, Complexity::Complex];

    /// Fixed effort lookup in hours.
    pub fn effort_hours(&self) -> f64 {
        match self {
            Complexity::Simple => 16.0,
            Complexity::Medium => 40.0,
            Complexity::Complex => 80.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Medium => "Medium",
            Complexity::Complex => "Complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "simple" => Ok(Complexity::Simple),
            "medium" => Ok(Complexity::Medium),
            "complex" => Ok(Complexity::Complex),
            other => Err(format!(
                "invalid complexity: {other} (expected \"Simple\", \"Medium\" or \"Complex\")"
            )),
        }
    }
}

impl TryFrom<String> for Complexity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Complexity> for String {
    fn from(complexity: Complexity) -> Self {
        complexity.as_str().to_string()
    }
}

/// What propagation does with a task whose planned start and finish are
/// both already set.
///
/// - `Keep`: the existing dates always win; the task is skipped.
/// - `Shift`: the existing dates are kept only while the planned start is
///   strictly after every dependency's finish; otherwise the task is
///   rescheduled from the latest dependency finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedDatePolicy {
    Keep,
    Shift,
}

impl Default for FixedDatePolicy {
    fn default() -> Self {
        FixedDatePolicy::Keep
    }
}

impl FromStr for FixedDatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(FixedDatePolicy::Keep),
            "shift" => Ok(FixedDatePolicy::Shift),
            other => Err(format!(
                "invalid fixed_date_policy: {other} (expected \"keep\" or \"shift\")"
            )),
        }
    }
}

/// Status as shown to a reader: the stored status, or `Delayed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    Completed,
    InProgress,
    YetToStart,
    Delayed,
}

impl From<TaskStatus> for DisplayStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => DisplayStatus::Completed,
            TaskStatus::InProgress => DisplayStatus::InProgress,
            TaskStatus::YetToStart => DisplayStatus::YetToStart,
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::Completed => f.write_str("Completed"),
            DisplayStatus::InProgress => f.write_str("In Progress"),
            DisplayStatus::YetToStart => f.write_str("Yet to Start"),
            DisplayStatus::Delayed => f.write_str("Delayed"),
        }
    }
}
