// src/task.rs

//! The task record exchanged with collaborators.
//!
//! This is the stable tabular shape at the engine boundary: one record per
//! task, keyed by `id`. Dates are written as ISO `YYYY-MM-DD` strings and
//! read from either strings or native TOML dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Complexity, TaskStatus};

/// Canonical task identifier type used throughout the engine.
pub type TaskId = String;

/// A unit of schedulable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier; graph node key. Never changes after creation.
    pub id: TaskId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phase: String,

    #[serde(default)]
    pub site: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub status: TaskStatus,

    /// Present only on estimation-driven tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,

    /// Derived from `complexity` for estimation-driven tasks, free-entered
    /// otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_hours: Option<f64>,

    /// `None` until supplied or resolved; see [`Task::effective_duration`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,

    #[serde(default, with = "plan_date", skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<NaiveDate>,

    #[serde(default, with = "plan_date", skip_serializing_if = "Option::is_none")]
    pub planned_finish: Option<NaiveDate>,

    #[serde(default, with = "plan_date", skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<NaiveDate>,

    #[serde(default, with = "plan_date", skip_serializing_if = "Option::is_none")]
    pub actual_finish: Option<NaiveDate>,

    /// Tasks this one waits for.
    #[serde(default, skip_serializing_if = "Dependencies::is_empty")]
    pub dependencies: Dependencies,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    /// Reference document or URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ref_link: String,
}

impl Task {
    /// A bare task with only an id; everything else defaulted.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            phase: String::new(),
            site: String::new(),
            owner: String::new(),
            status: TaskStatus::default(),
            complexity: None,
            effort_hours: None,
            duration_days: None,
            planned_start: None,
            planned_finish: None,
            actual_start: None,
            actual_finish: None,
            dependencies: Dependencies::default(),
            comment: String::new(),
            ref_link: String::new(),
        }
    }

    /// Effort and duration are derived from `complexity` for these tasks.
    pub fn is_estimation_driven(&self) -> bool {
        self.complexity.is_some()
    }

    /// Stored duration, never less than one day.
    pub fn effective_duration(&self) -> u32 {
        self.duration_days.filter(|d| *d >= 1).unwrap_or(1)
    }

    /// Both planned dates are set.
    pub fn has_fixed_dates(&self) -> bool {
        self.planned_start.is_some() && self.planned_finish.is_some()
    }
}

/// Ordered, duplicate-free list of task ids a task depends on.
///
/// Textual form is comma-separated (`"D001, P001"`). Entries are trimmed and
/// empty entries dropped. Whether an id actually exists is decided by the
/// graph builder, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DependenciesRepr", into = "String")]
pub struct Dependencies(Vec<TaskId>);

impl Dependencies {
    pub fn parse(text: &str) -> Self {
        Self::from_ids(text.split(','))
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<TaskId> = Vec::new();
        for raw in ids {
            let id = raw.as_ref().trim();
            if id.is_empty() || out.iter().any(|existing| existing == id) {
                continue;
            }
            out.push(id.to_string());
        }
        Self(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|d| d == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TaskId] {
        &self.0
    }
}

impl std::fmt::Display for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl From<Dependencies> for String {
    fn from(deps: Dependencies) -> Self {
        deps.to_string()
    }
}

/// Collaborators send either `"A, B"` or `["A", "B"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DependenciesRepr {
    Text(String),
    List(Vec<String>),
}

impl From<DependenciesRepr> for Dependencies {
    fn from(repr: DependenciesRepr) -> Self {
        match repr {
            DependenciesRepr::Text(text) => Dependencies::parse(&text),
            DependenciesRepr::List(ids) => Dependencies::from_ids(ids),
        }
    }
}

/// Optional dates that accept `"2025-01-15"` as well as a bare TOML
/// `2025-01-15`. A TOML datetime with a time part is rejected.
mod plan_date {
    use std::fmt;

    use chrono::NaiveDate;
    use serde::de::{self, MapAccess, Visitor, value::MapAccessDeserializer};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use toml::value::Datetime;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        date.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<PlanDate>::deserialize(deserializer).map(|d| d.map(|PlanDate(date)| date))
    }

    struct PlanDate(NaiveDate);

    impl<'de> Deserialize<'de> for PlanDate {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(PlanDateVisitor).map(PlanDate)
        }
    }

    struct PlanDateVisitor;

    impl<'de> Visitor<'de> for PlanDateVisitor {
        type Value = NaiveDate;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a YYYY-MM-DD date")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<NaiveDate, E> {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .map_err(|e| E::custom(format!("invalid date '{v}': {e}")))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<NaiveDate, A::Error> {
            let datetime = Datetime::deserialize(MapAccessDeserializer::new(map))?;
            match (datetime.date, datetime.time) {
                (Some(date), None) => NaiveDate::from_ymd_opt(
                    i32::from(date.year),
                    u32::from(date.month),
                    u32::from(date.day),
                )
                .ok_or_else(|| de::Error::custom(format!("invalid date {datetime}"))),
                _ => Err(de::Error::custom(format!("expected a plain date, got {datetime}"))),
            }
        }
    }
}
