// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
pub mod schedule;
pub mod store;
pub mod task;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{PlanFile, load_and_validate, save_to_path};
use crate::dag::DagGraph;
use crate::engine::{EditOutcome, EngineOptions, PlanEngine, TaskEdit, TaskField};
use crate::report::{PlanSummary, display_status};
use crate::store::TaskStore;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan loading + validation
/// - an optional single edit
/// - the scheduling pipeline
/// - printing (and optionally saving) the result
pub fn run(args: CliArgs) -> Result<()> {
    let plan_path = PathBuf::from(&args.plan);
    let plan = load_and_validate(&plan_path)
        .with_context(|| format!("loading plan from {}", plan_path.display()))?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    if args.dry_run {
        print_dry_run(&plan.store);
        return Ok(());
    }

    let settings = plan.settings;
    let mut engine = PlanEngine::new(plan.store, EngineOptions::from(&settings));

    if let Some(edit) = parse_edit(args.edit.as_deref())? {
        let outcome = engine.apply_edit(&edit)?;
        report_edit(&edit, &outcome);
    }

    if settings.propagate_on_load {
        match engine.reschedule() {
            Ok(report) if report.changed() => info!(
                rescheduled = report.rescheduled.len(),
                unscheduled = report.unscheduled.len(),
                "plan rescheduled"
            ),
            Ok(_) => debug!("schedule already up to date"),
            Err(errors::PlanError::DagCycle(cycle)) => {
                warn!(error = %cycle, "plan left unscheduled");
                eprintln!("warning: {cycle}; dates were not recomputed");
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_schedule(engine.store(), today);

    if args.write {
        let plan = PlanFile {
            settings,
            store: engine.into_store(),
        };
        save_to_path(&plan_path, &plan)
            .with_context(|| format!("writing plan to {}", plan_path.display()))?;
        info!(path = %plan_path.display(), "plan saved");
    }

    Ok(())
}

fn parse_edit(raw: Option<&[String]>) -> Result<Option<TaskEdit>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let [id, field, value] = raw else {
        return Err(anyhow!("--edit expects exactly three values: ID FIELD VALUE"));
    };
    let field: TaskField = field.parse()?;
    Ok(Some(TaskEdit::new(id.as_str(), field, value.as_str())))
}

fn report_edit(edit: &TaskEdit, outcome: &EditOutcome) {
    match outcome {
        EditOutcome::UnknownTarget => {
            eprintln!("warning: no task '{}'; edit ignored", edit.task_id)
        }
        EditOutcome::Ignored { reason } => eprintln!("warning: {reason}; edit ignored"),
        EditOutcome::CycleDetected(cycle) => {
            eprintln!("warning: {cycle}; edit stored without rescheduling")
        }
        other => debug!(?other, "edit applied"),
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Schedule table plus summary, in store order.
fn print_schedule(store: &TaskStore, today: NaiveDate) {
    println!(
        "{:<8} {:<32} {:<13} {:<9} {:>6} {:>4}  {:<10}  {:<10}  {}",
        "ID", "TASK", "STATUS", "COMPLEX", "HOURS", "DAYS", "START", "FINISH", "DEPENDS ON"
    );
    for task in store.iter() {
        println!(
            "{:<8} {:<32} {:<13} {:<9} {:>6} {:>4}  {:<10}  {:<10}  {}",
            task.id,
            task.name,
            display_status(task, today).to_string(),
            task.complexity.map(|c| c.to_string()).unwrap_or_default(),
            task.effort_hours.map(|h| format!("{h:.0}")).unwrap_or_default(),
            task.effective_duration(),
            fmt_date(task.planned_start),
            fmt_date(task.planned_finish),
            task.dependencies,
        );
    }

    let summary = PlanSummary::from_store(store, today);
    println!();
    println!(
        "tasks: {}  owners: {}  completed: {}  in progress: {}  yet to start: {}  delayed: {}",
        summary.total_tasks,
        summary.unique_owners,
        summary.completed,
        summary.in_progress,
        summary.yet_to_start,
        summary.delayed
    );
    println!(
        "scheduled: {}  unscheduled: {}  effort: {:.0}h  window: {} .. {}",
        summary.scheduled,
        summary.unscheduled,
        summary.total_effort_hours,
        fmt_date(summary.earliest_start),
        fmt_date(summary.latest_finish)
    );
    println!(
        "with comments: {}  with ref links: {}",
        summary.with_comments, summary.with_ref_links
    );
}

/// Dry-run output: graph statistics and processing order (or the cycle).
fn print_dry_run(store: &TaskStore) {
    let graph = DagGraph::from_store(store);
    let stats = graph.stats();

    println!("plandag dry-run");
    println!("  tasks = {}", stats.nodes);
    println!("  edges = {}", stats.edges);
    println!("  dropped references = {}", stats.dropped_references);
    println!();

    match graph.topological_order() {
        Ok(order) => {
            println!("processing order ({}):", order.len());
            for id in order {
                let deps = graph.dependencies_of(&id);
                if deps.is_empty() {
                    println!("  - {id}");
                } else {
                    println!("  - {id}  (after {})", deps.join(", "));
                }
            }
        }
        Err(cycle) => println!("{cycle}"),
    }

    debug!("dry-run complete (nothing changed)");
}
