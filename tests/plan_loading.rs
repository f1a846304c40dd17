// tests/plan_loading.rs

mod common;
use crate::common::date;

use std::io::Write;
use tempfile::NamedTempFile;

use plandag::config::{load_and_validate, save_to_path};
use plandag::errors::PlanError;
use plandag::schedule::reschedule;
use plandag::types::{Complexity, FixedDatePolicy, TaskStatus};

fn plan_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_settings_and_tasks_in_file_order() {
    let file = plan_file(
        r#"
[config]
fixed_date_policy = "shift"

[[task]]
id = "D001"
name = "Design"
owner = "Program Manager"
status = "Completed"
planned_start = "2025-01-15"
planned_finish = "2025-01-22"

[[task]]
id = "T001"
name = "Backend"
status = "yet_to_start"
complexity = "Complex"
dependencies = "D001, ZZZ"

[[task]]
id = "Q001"
dependencies = ["T001"]
"#,
    );

    let plan = load_and_validate(file.path()).unwrap();

    assert_eq!(plan.settings.fixed_date_policy, FixedDatePolicy::Shift);
    assert!(plan.settings.propagate_on_load);
    assert_eq!(plan.store.ids().collect::<Vec<_>>(), vec!["D001", "T001", "Q001"]);

    let d = plan.store.get("D001").unwrap();
    assert_eq!(d.status, TaskStatus::Completed);
    assert_eq!(d.planned_finish, Some(date("2025-01-22")));

    let t = plan.store.get("T001").unwrap();
    assert_eq!(t.status, TaskStatus::YetToStart);
    assert_eq!(t.complexity, Some(Complexity::Complex));
    assert_eq!(t.dependencies.as_slice(), &["D001".to_string(), "ZZZ".to_string()]);

    let q = plan.store.get("Q001").unwrap();
    assert!(q.dependencies.contains("T001"));
}

#[test]
fn native_toml_dates_load_like_quoted_ones() {
    let file = plan_file(
        r#"
[[task]]
id = "D001"
name = "Design"
status = "Completed"
planned_start = 2025-01-15
planned_finish = 2025-01-22
actual_start = "2025-01-16"
comment = "Signed off"
ref_link = "design.pdf"
"#,
    );

    let plan = load_and_validate(file.path()).unwrap();

    let d = plan.store.get("D001").unwrap();
    assert_eq!(d.planned_start, Some(date("2025-01-15")));
    assert_eq!(d.planned_finish, Some(date("2025-01-22")));
    assert_eq!(d.actual_start, Some(date("2025-01-16")));
    assert_eq!(d.comment, "Signed off");
    assert_eq!(d.ref_link, "design.pdf");
}

#[test]
fn datetimes_with_a_time_part_are_rejected() {
    let file = plan_file("[[task]]\nid = \"A\"\nplanned_start = 2025-01-15T09:00:00\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(PlanError::TomlError(_))
    ));
}

#[test]
fn cyclic_plan_still_loads() {
    let file = plan_file(
        r#"
[[task]]
id = "A"
dependencies = "B"

[[task]]
id = "B"
dependencies = "A"
"#,
    );

    let mut plan = load_and_validate(file.path()).unwrap();
    let result = reschedule(&mut plan.store, plan.settings.fixed_date_policy);
    assert!(matches!(result, Err(PlanError::DagCycle(_))));
}

#[test]
fn duplicate_ids_are_a_config_error() {
    let file = plan_file(
        r#"
[[task]]
id = "A"

[[task]]
id = "A"
"#,
    );

    match load_and_validate(file.path()) {
        Err(PlanError::ConfigError(msg)) => assert!(msg.contains("duplicate task id 'A'")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn record_level_invariants_are_checked() {
    let cases = [
        ("[[task]]\nid = \"A\"\nduration_days = 0\n", "duration_days = 0"),
        ("[[task]]\nid = \"A\"\neffort_hours = -1.0\n", "invalid effort_hours"),
        (
            "[[task]]\nid = \"A\"\nplanned_start = \"2025-02-01\"\nplanned_finish = \"2025-01-01\"\n",
            "finishes",
        ),
        ("[[task]]\nid = \" \"\n", "empty id"),
        ("[config]\nfixed_date_policy = \"keep\"\n", "at least one"),
    ];

    for (contents, expected) in cases {
        let file = plan_file(contents);
        match load_and_validate(file.path()) {
            Err(PlanError::ConfigError(msg)) => {
                assert!(msg.contains(expected), "{msg:?} should mention {expected:?}")
            }
            other => panic!("expected ConfigError for {contents:?}, got {other:?}"),
        }
    }
}

#[test]
fn unknown_enum_values_fail_to_parse() {
    let file = plan_file("[[task]]\nid = \"A\"\ncomplexity = \"Huge\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(PlanError::TomlError(_))
    ));

    let file = plan_file("[[task]]\nid = \"A\"\nstatus = \"Delayed\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(PlanError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/Plan.toml");
    assert!(matches!(result, Err(PlanError::IoError(_))));
}

#[test]
fn saved_plan_reloads_with_propagated_dates() {
    let file = plan_file(
        r#"
[[task]]
id = "D001"
planned_start = "2025-01-15"
planned_finish = "2025-01-22"

[[task]]
id = "T001"
complexity = "Complex"
dependencies = "D001"
"#,
    );

    let mut plan = load_and_validate(file.path()).unwrap();
    reschedule(&mut plan.store, plan.settings.fixed_date_policy).unwrap();
    save_to_path(file.path(), &plan).unwrap();

    let reloaded = load_and_validate(file.path()).unwrap();
    assert_eq!(reloaded.store, plan.store);
    let t = reloaded.store.get("T001").unwrap();
    assert_eq!(t.planned_finish, Some(date("2025-02-01")));
    assert_eq!(t.effort_hours, Some(80.0));
}
