//! Task management commands for CLI.

use clap::Subcommand;
use smartstudy_core::{ActivityType, Config, Database, Event, NewTask, PlanStore, TaskStatus};

use super::{edit_plan, load_plan, print_event, print_json, CmdResult};

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| {
        format!("unknown status '{s}' (expected pending, in-progress, done or skipped)")
    })
}

fn parse_kind(s: &str) -> Result<ActivityType, String> {
    ActivityType::parse(s)
        .ok_or_else(|| format!("unknown type '{s}' (expected concept, practice or review)"))
}

fn parse_importance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("importance must be between 0 and 1, got {value}"))
    }
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Subject ID the task belongs to
        #[arg(long, default_value = "math")]
        subject: String,
        /// Planned minutes
        #[arg(long, default_value = "30")]
        minutes: u32,
        /// Day offset from today (0 = today)
        #[arg(long, default_value = "0")]
        day: u32,
        /// Activity type: concept, practice or review
        #[arg(long, default_value = "concept", value_parser = parse_kind)]
        kind: ActivityType,
        /// Importance between 0 and 1
        #[arg(long, default_value = "0.5", value_parser = parse_importance)]
        importance: f64,
        /// Explicit task ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks on this day offset
        #[arg(long)]
        day: Option<u32>,
        /// Only tasks with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Only tasks of this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Set a task's status
    Status {
        /// Task ID
        id: String,
        /// pending, in-progress, done or skipped
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Mark a task done and credit its planned minutes
    Complete {
        /// Task ID
        id: String,
    },
    /// Skip a task and drop it from today's timeline
    Skip {
        /// Task ID
        id: String,
    },
    /// Push a task to the next day
    Reschedule {
        /// Task ID
        id: String,
    },
}

/// Credit minutes from a task completion to the focus log.
fn credit_focus(db: &Database, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    let Event::TaskStatusChanged { logged_minutes, .. } = event else {
        return Ok(());
    };
    if *logged_minutes == 0 {
        return Ok(());
    }
    let config = Config::load_or_default();
    let store = PlanStore::new(db);
    let mut timer = store.load_focus(config.focus.duration_min);
    timer.log_minutes(*logged_minutes);
    store.save_focus(&timer)?;
    Ok(())
}

/// Set a status, save the plan, then credit any completed minutes.
fn change_status(id: &str, status: TaskStatus) -> CmdResult {
    let db = Database::open()?;
    let store = PlanStore::new(&db);
    let mut plan = store.load_plan();
    let event = plan.set_status(id, status)?;
    store.save_plan(&plan)?;
    credit_focus(&db, &event)?;
    print_event(&event)
}

pub fn run(action: TaskAction) -> CmdResult {
    match action {
        TaskAction::Add {
            title,
            subject,
            minutes,
            day,
            kind,
            importance,
            id,
        } => edit_plan(|plan| {
            if plan.subject(&subject).is_none() {
                tracing::warn!(subject = %subject, "task added for an unknown subject");
            }
            Ok(plan.add_task(NewTask {
                id,
                planned_minutes: minutes,
                day_offset: day,
                kind,
                importance,
                ..NewTask::new(title, subject)
            })?)
        }),
        TaskAction::List {
            day,
            status,
            subject,
        } => {
            let plan = load_plan()?;
            let tasks: Vec<_> = plan
                .tasks
                .iter()
                .filter(|t| day.map_or(true, |d| t.day_offset == d))
                .filter(|t| status.map_or(true, |s| t.status == s))
                .filter(|t| subject.as_deref().map_or(true, |s| t.subject_id == s))
                .collect();
            print_json(&tasks)
        }
        TaskAction::Get { id } => {
            let plan = load_plan()?;
            match plan.task(&id) {
                Some(task) => print_json(task),
                None => Err(smartstudy_core::CoreError::task_not_found(&id).into()),
            }
        }
        TaskAction::Delete { id } => edit_plan(|plan| Ok(plan.delete_task(&id)?)),
        TaskAction::Status { id, status } => change_status(&id, status),
        TaskAction::Complete { id } => change_status(&id, TaskStatus::Done),
        TaskAction::Skip { id } => edit_plan(|plan| Ok(plan.skip(&id)?)),
        TaskAction::Reschedule { id } => edit_plan(|plan| Ok(plan.reschedule(&id)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parser_accepts_aliases() {
        assert_eq!(parse_status("in_progress"), Ok(TaskStatus::InProgress));
        assert_eq!(parse_status("Done"), Ok(TaskStatus::Done));
        assert!(parse_status("later").is_err());
    }

    #[test]
    fn importance_parser_checks_range() {
        assert_eq!(parse_importance("0.8"), Ok(0.8));
        assert!(parse_importance("1.5").is_err());
        assert!(parse_importance("high").is_err());
    }

    #[test]
    fn kind_parser() {
        assert_eq!(parse_kind("practice"), Ok(ActivityType::Practice));
        assert!(parse_kind("lecture").is_err());
    }
}
