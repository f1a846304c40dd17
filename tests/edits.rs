// tests/edits.rs

mod common;
use crate::common::builders::{StoreBuilder, TaskBuilder};
use crate::common::{date, design_then, init_tracing};

use plandag::engine::{EditOutcome, EngineOptions, PlanEngine, TaskEdit, TaskField, apply_edit};
use plandag::errors::PlanError;
use plandag::schedule::reschedule;
use plandag::types::{Complexity, FixedDatePolicy, TaskStatus};

fn options() -> EngineOptions {
    EngineOptions::default()
}

#[test]
fn edit_for_unknown_task_is_a_no_op() {
    init_tracing();
    let mut store = design_then(vec![]);
    let before = store.clone();

    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("NOPE", TaskField::Owner, "Someone"),
        &options(),
    )
    .unwrap();

    assert_eq!(outcome, EditOutcome::UnknownTarget);
    assert_eq!(store, before);
}

#[test]
fn invalid_values_are_rejected_without_touching_the_store() {
    let mut store = design_then(vec![
        TaskBuilder::new("T001").complexity(Complexity::Simple).build(),
    ]);
    let before = store.clone();

    let cases = [
        (TaskField::Complexity, "Huge"),
        (TaskField::Status, "Delayed"),
        (TaskField::PlannedStart, "23/01/2025"),
        (TaskField::DurationDays, "0"),
        (TaskField::EffortHours, "-4"),
    ];
    for (field, value) in cases {
        let result = apply_edit(&mut store, &TaskEdit::new("T001", field, value), &options());
        match result {
            Err(PlanError::InvalidFieldValue { field: f, value: v, .. }) => {
                assert_eq!(f, field.as_str());
                assert_eq!(v, value);
            }
            other => panic!("expected InvalidFieldValue for {field}={value}, got {other:?}"),
        }
    }
    assert_eq!(store, before);
}

#[test]
fn planned_date_edit_cannot_reverse_the_range() {
    init_tracing();
    let mut store = design_then(vec![
        TaskBuilder::new("P001").planned("2025-02-01", "2025-02-03").build(),
    ]);
    let before = store.clone();

    let cases = [
        (TaskField::PlannedStart, "2025-03-01"),
        (TaskField::PlannedFinish, "2025-01-31"),
    ];
    for (field, value) in cases {
        let result = apply_edit(&mut store, &TaskEdit::new("P001", field, value), &options());
        assert!(
            matches!(result, Err(PlanError::InvalidFieldValue { .. })),
            "{field}={value} should be rejected, got {result:?}"
        );
    }
    assert_eq!(store, before);

    // A one-day task is still a valid range.
    apply_edit(
        &mut store,
        &TaskEdit::new("P001", TaskField::PlannedStart, "2025-02-03"),
        &options(),
    )
    .unwrap();
    let p = store.get("P001").unwrap();
    assert_eq!(p.planned_start, Some(date("2025-02-03")));
    assert_eq!(p.planned_finish, Some(date("2025-02-03")));
    assert_eq!(p.duration_days, Some(1));
}

#[test]
fn plain_field_edit_does_not_cascade() {
    let mut store = design_then(vec![TaskBuilder::new("P001").after("D001").build()]);

    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("P001", TaskField::Owner, "FE-DevOps"),
        &options(),
    )
    .unwrap();
    apply_edit(
        &mut store,
        &TaskEdit::new("P001", TaskField::Status, "in progress"),
        &options(),
    )
    .unwrap();

    assert_eq!(outcome, EditOutcome::Updated);
    let p = store.get("P001").unwrap();
    assert_eq!(p.owner, "FE-DevOps");
    assert_eq!(p.status, TaskStatus::InProgress);
    assert_eq!(p.planned_start, None);
}

#[test]
fn comment_and_ref_link_are_free_text() {
    let mut store = design_then(vec![TaskBuilder::new("P001").after("D001").build()]);

    for (field, value) in [
        (TaskField::Comment, "Blocked on firewall change"),
        (TaskField::RefLink, "https://wiki.example.com/p001"),
    ] {
        let outcome =
            apply_edit(&mut store, &TaskEdit::new("P001", field, value), &options()).unwrap();
        assert_eq!(outcome, EditOutcome::Updated);
    }

    let p = store.get("P001").unwrap();
    assert_eq!(p.comment, "Blocked on firewall change");
    assert_eq!(p.ref_link, "https://wiki.example.com/p001");

    apply_edit(&mut store, &TaskEdit::new("P001", TaskField::Comment, ""), &options()).unwrap();
    assert!(store.get("P001").unwrap().comment.is_empty());
}

#[test]
fn planned_date_edit_repropagates_the_whole_store() {
    init_tracing();
    let mut store = design_then(vec![
        TaskBuilder::new("P001").duration(2).after("D001").build(),
        TaskBuilder::new("Q001").after("P001").build(),
    ]);

    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("D001", TaskField::PlannedFinish, "2025-01-29"),
        &options(),
    )
    .unwrap();

    let EditOutcome::Rescheduled(report) = outcome else {
        panic!("expected Rescheduled, got {outcome:?}");
    };
    assert_eq!(report.rescheduled, vec!["P001".to_string(), "Q001".to_string()]);

    let d = store.get("D001").unwrap();
    assert_eq!(d.duration_days, Some(15));
    let p = store.get("P001").unwrap();
    assert_eq!(p.planned_start, Some(date("2025-01-30")));
    assert_eq!(p.planned_finish, Some(date("2025-01-31")));
    let q = store.get("Q001").unwrap();
    assert_eq!(q.planned_start, Some(date("2025-02-01")));
}

#[test]
fn dependency_edit_that_closes_a_cycle_is_stored_but_not_propagated() {
    let mut store = design_then(vec![TaskBuilder::new("P001").after("D001").build()]);
    reschedule(&mut store, FixedDatePolicy::Keep).unwrap();
    let dates_before: Vec<_> = store
        .iter()
        .map(|t| (t.planned_start, t.planned_finish))
        .collect();

    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("D001", TaskField::Dependencies, "P001"),
        &options(),
    )
    .unwrap();

    let EditOutcome::CycleDetected(cycle) = outcome else {
        panic!("expected CycleDetected, got {outcome:?}");
    };
    assert_eq!(cycle.tasks, vec!["D001", "P001"]);
    assert!(store.get("D001").unwrap().dependencies.contains("P001"));
    let dates_after: Vec<_> = store
        .iter()
        .map(|t| (t.planned_start, t.planned_finish))
        .collect();
    assert_eq!(dates_before, dates_after);
}

#[test]
fn effort_on_estimation_driven_task_is_ignored() {
    let mut store = design_then(vec![
        TaskBuilder::new("T001").complexity(Complexity::Medium).build(),
    ]);
    reschedule(&mut store, FixedDatePolicy::Keep).unwrap();
    let before = store.clone();

    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("T001", TaskField::EffortHours, "12"),
        &options(),
    )
    .unwrap();

    assert!(matches!(outcome, EditOutcome::Ignored { .. }));
    assert_eq!(store, before);
    assert_eq!(store.get("T001").unwrap().effort_hours, Some(40.0));
}

#[test]
fn effort_on_manual_task_is_free_entry() {
    let mut store = design_then(vec![]);
    let outcome = apply_edit(
        &mut store,
        &TaskEdit::new("D001", TaskField::EffortHours, "12.5"),
        &options(),
    )
    .unwrap();

    assert_eq!(outcome, EditOutcome::Updated);
    assert_eq!(store.get("D001").unwrap().effort_hours, Some(12.5));
}

#[test]
fn setting_and_clearing_complexity() {
    let mut engine = PlanEngine::new(
        StoreBuilder::new()
            .with_task(TaskBuilder::new("T001").effort(3.0).build())
            .build(),
        options(),
    );

    engine
        .apply_edit(&TaskEdit::new("T001", TaskField::Complexity, "medium"))
        .unwrap();
    let t = engine.store().get("T001").unwrap();
    assert!(t.is_estimation_driven());
    assert_eq!(t.effort_hours, Some(40.0));
    assert_eq!(t.duration_days, Some(5));
    // No planned start, so nothing to realign.
    assert_eq!(t.planned_finish, None);

    engine
        .apply_edit(&TaskEdit::new("T001", TaskField::Complexity, ""))
        .unwrap();
    let t = engine.store().get("T001").unwrap();
    assert!(!t.is_estimation_driven());
    assert_eq!(t.effort_hours, Some(40.0));
    assert_eq!(t.duration_days, Some(5));
}

#[test]
fn complexity_edits_keep_effort_in_lockstep() {
    let mut store = StoreBuilder::new()
        .with_task(TaskBuilder::new("T001").complexity(Complexity::Simple).build())
        .build();

    for complexity in Complexity::ALL {
        apply_edit(
            &mut store,
            &TaskEdit::new("T001", TaskField::Complexity, complexity.as_str()),
            &options(),
        )
        .unwrap();
        let t = store.get("T001").unwrap();
        assert_eq!(t.effort_hours, Some(complexity.effort_hours()));
        assert_eq!(
            t.duration_days,
            Some((complexity.effort_hours() / 8.0).ceil() as u32)
        );
    }
}

#[test]
fn field_names_parse_from_column_headers() {
    assert_eq!("Planned Start".parse::<TaskField>().unwrap(), TaskField::PlannedStart);
    assert_eq!("effort_hours".parse::<TaskField>().unwrap(), TaskField::EffortHours);
    assert_eq!("TASK".parse::<TaskField>().unwrap(), TaskField::Name);
    assert_eq!("Comment".parse::<TaskField>().unwrap(), TaskField::Comment);
    assert_eq!("Ref Link".parse::<TaskField>().unwrap(), TaskField::RefLink);
    assert!(matches!(
        "colour".parse::<TaskField>(),
        Err(PlanError::InvalidFieldValue { .. })
    ));
}

#[test]
fn task_id_is_not_an_editable_field() {
    match "id".parse::<TaskField>() {
        Err(PlanError::InvalidFieldValue { field, value, reason }) => {
            assert_eq!(field, "field");
            assert_eq!(value, "id");
            assert!(reason.contains("cannot be edited"), "{reason}");
        }
        other => panic!("expected InvalidFieldValue, got {other:?}"),
    }
}

#[test]
fn clearing_a_date_is_allowed() {
    let mut store = design_then(vec![]);
    apply_edit(
        &mut store,
        &TaskEdit::new("D001", TaskField::ActualStart, "2025-01-16"),
        &options(),
    )
    .unwrap();
    assert_eq!(store.get("D001").unwrap().actual_start, Some(date("2025-01-16")));

    apply_edit(
        &mut store,
        &TaskEdit::new("D001", TaskField::ActualStart, ""),
        &options(),
    )
    .unwrap();
    assert_eq!(store.get("D001").unwrap().actual_start, None);
}
