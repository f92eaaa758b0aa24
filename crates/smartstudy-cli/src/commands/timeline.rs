use clap::Subcommand;
use serde::Serialize;
use smartstudy_core::timeline::total_span;
use smartstudy_core::{Config, Database, PlanStore, TimelineBlock};

use super::{load_plan, print_event, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Show today's timeline blocks
    Show,
    /// Move a task in front of another one
    Move {
        /// Task to move
        dragged: String,
        /// Task it should land in front of
        target: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineView<'a> {
    blocks: Vec<TimelineBlock<'a>>,
    total_minutes: u32,
}

pub fn run(action: TimelineAction) -> CmdResult {
    match action {
        TimelineAction::Show => {
            let config = Config::load_or_default();
            let plan = load_plan()?;
            let blocks = plan.today_blocks(config.scheduler());
            let view = TimelineView {
                total_minutes: total_span(&blocks),
                blocks,
            };
            print_json(&view)
        }
        TimelineAction::Move { dragged, target } => {
            let db = Database::open()?;
            let store = PlanStore::new(&db);
            let mut plan = store.load_plan();
            match plan.reorder(&dragged, &target) {
                Some(event) => {
                    store.save_plan(&plan)?;
                    print_event(&event)
                }
                None => {
                    eprintln!("timeline unchanged");
                    print_json(&plan.timeline_order)
                }
            }
        }
    }
}
