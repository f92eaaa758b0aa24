//! Priority ranking and daily timeline layout.
//!
//! This module provides:
//! - Weighted priority scoring and stable ranking of study tasks
//! - Sequential packing of today's tasks into labelled time blocks
//! - Countdown and clock label helpers

mod block;
mod clock;
mod priority;

pub use block::{
    layout, total_span, SchedulerConfig, TaskLookup, TimelineBlock, TimelineScheduler,
    DEFAULT_BUFFER_MINUTES, DEFAULT_START_MINUTE,
};
pub use clock::{countdown, days_until, format_day_label, minutes_to_label, Countdown};
pub use priority::{
    rank, score, PriorityConfig, PriorityScorer, PriorityWeights, RankedTask, ScoreBreakdown,
};
