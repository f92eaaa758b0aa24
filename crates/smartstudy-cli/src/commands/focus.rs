use std::time::Duration;

use clap::Subcommand;
use serde::Serialize;
use smartstudy_core::storage::{FocusSessionRecord, FocusStats};
use smartstudy_core::{Config, Database, Event, FocusTimer, PlanStore};

use super::{print_event, print_json, CmdResult};

const FOCUS_TASK_KEY: &str = "smart-study-focus-task";

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start (or resume) a focus session
    Start {
        /// Session length in minutes (applies to an idle timer)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=240))]
        minutes: Option<u64>,
        /// Task the session is spent on
        #[arg(long)]
        task: Option<String>,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Advance the timer to now, logging the session if it has ended
    Tick,
    /// Tick once a second until the session ends
    Run,
    /// Abandon the current session
    Reset,
    /// Print the timer state as JSON
    Status,
    /// Completed session statistics
    Stats {
        /// Number of recent sessions to list
        #[arg(long, default_value = "5")]
        recent: usize,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    #[serde(flatten)]
    stats: FocusStats,
    recent: Vec<FocusSessionRecord>,
}

/// Persist a completed session, attributing it to the focused task if any.
fn record_completion(db: &Database, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    let Event::FocusCompleted {
        session_minutes, at, ..
    } = event
    else {
        return Ok(());
    };
    let task_id = db.kv_get(FOCUS_TASK_KEY)?;
    db.record_focus_session(*session_minutes, task_id.as_deref(), *at)?;
    db.kv_delete(FOCUS_TASK_KEY)?;
    Ok(())
}

/// Save the timer and report what happened.
fn finish(
    db: &Database,
    timer: &FocusTimer,
    event: Option<Event>,
) -> Result<(), Box<dyn std::error::Error>> {
    PlanStore::new(db).save_focus(timer)?;
    match event {
        Some(event) => {
            record_completion(db, &event)?;
            print_event(&event)
        }
        None => print_json(&timer.snapshot()),
    }
}

pub fn run(action: FocusAction) -> CmdResult {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut timer = PlanStore::new(&db).load_focus(config.focus.duration_min);

    // Time spent while no command ran still counts.
    if let Some(done) = timer.tick() {
        record_completion(&db, &done)?;
        eprintln!("{}", done.note());
    }

    match action {
        FocusAction::Start { minutes, task } => {
            if timer.state() == smartstudy_core::TimerState::Idle {
                if let Some(minutes) = minutes {
                    timer.set_duration(minutes);
                }
                match task {
                    Some(task) => db.kv_set(FOCUS_TASK_KEY, &task)?,
                    None => {
                        db.kv_delete(FOCUS_TASK_KEY)?;
                    }
                }
            }
            let event = timer.start();
            finish(&db, &timer, event)
        }
        FocusAction::Pause => {
            let event = timer.pause();
            finish(&db, &timer, event)
        }
        FocusAction::Resume => {
            let event = timer.resume();
            finish(&db, &timer, event)
        }
        FocusAction::Tick | FocusAction::Status => finish(&db, &timer, None),
        FocusAction::Run => {
            if !timer.is_active() {
                let event = timer.start();
                PlanStore::new(&db).save_focus(&timer)?;
                if let Some(event) = &event {
                    eprintln!("{}", event.note());
                }
            }
            loop {
                if let Some(done) = timer.tick() {
                    return finish(&db, &timer, Some(done));
                }
                if !timer.is_active() {
                    return finish(&db, &timer, None);
                }
                PlanStore::new(&db).save_focus(&timer)?;
                eprint!("\r{} ", timer.clock_label());
                std::thread::sleep(Duration::from_secs(1));
            }
        }
        FocusAction::Reset => {
            let event = timer.reset();
            db.kv_delete(FOCUS_TASK_KEY)?;
            finish(&db, &timer, event)
        }
        FocusAction::Stats { recent } => {
            PlanStore::new(&db).save_focus(&timer)?;
            let view = StatsView {
                stats: db.focus_stats_today()?,
                recent: db.recent_focus_sessions(recent)?,
            };
            print_json(&view)
        }
    }
}
