//! Daily timeline layout.
//!
//! Packs an ordered list of task ids into back-to-back blocks starting at a
//! fixed minute of the day, with a fixed buffer between blocks. Ids that no
//! longer resolve (deleted, skipped or moved to another day) are dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::clock::minutes_to_label;
use crate::plan::Task;

/// 08:10 AM.
pub const DEFAULT_START_MINUTE: u32 = 8 * 60 + 10;
pub const DEFAULT_BUFFER_MINUTES: u32 = 10;

/// Resolves task ids to tasks.
pub trait TaskLookup {
    fn find_task(&self, id: &str) -> Option<&Task>;
}

impl TaskLookup for [Task] {
    fn find_task(&self, id: &str) -> Option<&Task> {
        self.iter().find(|t| t.id == id)
    }
}

impl TaskLookup for Vec<Task> {
    fn find_task(&self, id: &str) -> Option<&Task> {
        self.as_slice().find_task(id)
    }
}

impl TaskLookup for HashMap<String, Task> {
    fn find_task(&self, id: &str) -> Option<&Task> {
        self.get(id)
    }
}

/// Timeline layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minutes since midnight of the first block.
    pub start_minute: u32,
    /// Idle minutes between consecutive blocks.
    pub buffer_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            start_minute: DEFAULT_START_MINUTE,
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
        }
    }
}

/// A task placed on the day's timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBlock<'a> {
    pub id: String,
    pub task: &'a Task,
    pub start_minute: u32,
    pub end_minute: u32,
    pub start: String,
    pub end: String,
}

impl TimelineBlock<'_> {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    /// `"08:10 AM–09:00 AM"`.
    pub fn range_label(&self) -> String {
        format!("{}–{}", self.start, self.end)
    }
}

/// Lays out a day's tasks in the user's order.
#[derive(Debug, Clone, Default)]
pub struct TimelineScheduler {
    config: SchedulerConfig,
}

impl TimelineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Blocks for every id in `order` that resolves to a task accepted by
    /// `day_filter`, in order.
    pub fn layout<'a, L, F>(&self, order: &[String], lookup: &'a L, day_filter: F) -> Vec<TimelineBlock<'a>>
    where
        L: TaskLookup + ?Sized,
        F: Fn(&Task) -> bool,
    {
        let mut cursor = self.config.start_minute;
        let mut blocks = Vec::new();

        for id in order {
            let Some(task) = lookup.find_task(id).filter(|&t| day_filter(t)) else {
                continue;
            };
            let start_minute = cursor;
            let end_minute = start_minute.saturating_add(task.planned_minutes);
            cursor = end_minute.saturating_add(self.config.buffer_minutes);

            blocks.push(TimelineBlock {
                id: task.id.clone(),
                task,
                start_minute,
                end_minute,
                start: minutes_to_label(start_minute),
                end: minutes_to_label(end_minute),
            });
        }

        tracing::debug!(requested = order.len(), placed = blocks.len(), "laid out timeline");
        blocks
    }

    /// Layout restricted to today's tasks.
    pub fn layout_today<'a, L>(&self, order: &[String], lookup: &'a L) -> Vec<TimelineBlock<'a>>
    where
        L: TaskLookup + ?Sized,
    {
        self.layout(order, lookup, Task::is_today)
    }
}

/// Convenience function: lay out with the default buffer from `start_minute`.
pub fn layout<'a, L, F>(
    order: &[String],
    lookup: &'a L,
    day_filter: F,
    start_minute: u32,
) -> Vec<TimelineBlock<'a>>
where
    L: TaskLookup + ?Sized,
    F: Fn(&Task) -> bool,
{
    TimelineScheduler::with_config(SchedulerConfig {
        start_minute,
        ..Default::default()
    })
    .layout(order, lookup, day_filter)
}

/// Total minutes from the first block's start to the last block's end.
pub fn total_span(blocks: &[TimelineBlock<'_>]) -> u32 {
    match (blocks.first(), blocks.last()) {
        (Some(first), Some(last)) => last.end_minute - first.start_minute,
        _ => 0,
    }
}
