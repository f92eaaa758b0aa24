pub mod config;
pub mod exam;
pub mod focus;
pub mod overview;
pub mod subject;
pub mod task;
pub mod timeline;

use serde::Serialize;
use smartstudy_core::{Database, Event, PlanStore, StudyPlan};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an event as JSON, with its human note on stderr.
pub fn print_event(event: &Event) -> CmdResult {
    eprintln!("{}", event.note());
    print_json(event)
}

/// Load the plan, apply `edit` and save the result.
pub fn edit_plan<F>(edit: F) -> CmdResult
where
    F: FnOnce(&mut StudyPlan) -> Result<Event, Box<dyn std::error::Error>>,
{
    let db = Database::open()?;
    let store = PlanStore::new(&db);
    let mut plan = store.load_plan();
    let event = edit(&mut plan)?;
    store.save_plan(&plan)?;
    print_event(&event)
}

/// Load the plan for a read-only view.
pub fn load_plan() -> Result<StudyPlan, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(PlanStore::new(&db).load_plan())
}
