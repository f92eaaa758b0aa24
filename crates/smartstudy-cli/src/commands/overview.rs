//! Read-only planner views: priorities, status board and weekly load.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smartstudy_core::{Board, Config, TodaySummary};

use super::{load_plan, print_json, CmdResult};

pub fn priority(top: Option<usize>, all: bool, now: DateTime<Utc>) -> CmdResult {
    let config = Config::load_or_default();
    let plan = load_plan()?;
    let priority = config.priority_at(now);
    let ranked = if all {
        plan.ranked(priority)
    } else {
        plan.top_priorities(priority, top.unwrap_or(config.priority.top_n))
    };
    print_json(&ranked)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardView<'a> {
    #[serde(flatten)]
    board: Board<'a>,
    today: TodaySummary,
}

pub fn board() -> CmdResult {
    let plan = load_plan()?;
    let view = BoardView {
        board: plan.board(),
        today: plan.today_summary(),
    };
    print_json(&view)
}

pub fn week(days: Option<u32>) -> CmdResult {
    let config = Config::load_or_default();
    let plan = load_plan()?;
    print_json(&plan.weekly_load(days.unwrap_or(config.ui.week_days)))
}
