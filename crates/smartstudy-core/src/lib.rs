//! # smartstudy Core Library
//!
//! This library provides the core logic for the smartstudy study planner.
//! All operations are available through the `smartstudy` CLI; any front end
//! is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Priority scoring**: a weighted sum of difficulty, exam proximity, day
//!   urgency and importance, ranked with a stable sort
//! - **Timeline**: packs today's tasks into labelled blocks in the user's order
//! - **Focus timer**: a wall-clock-based Pomodoro countdown that requires the
//!   caller to periodically invoke `tick()`
//! - **Storage**: SQLite key-value state and TOML-based configuration
//!
//! Scoring, layout and countdowns take the current time as a parameter and
//! never fail on missing data.
//!
//! ## Key Components
//!
//! - [`PriorityScorer`]: Task scoring and ranking
//! - [`TimelineScheduler`]: Daily block layout
//! - [`StudyPlan`]: Subjects, tasks and the edits on them
//! - [`FocusTimer`]: Focus session state machine
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod plan;
pub mod seed;
pub mod storage;
pub mod timeline;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use plan::{
    ActivityType, Board, DayLoad, Difficulty, DifficultyMap, Exam, NewTask, StudyPlan, Subject,
    Task, TaskStatus, TimelineOrder, TodaySummary,
};
pub use storage::{Config, Database, PlanStore};
pub use timeline::{
    countdown, format_day_label, layout, minutes_to_label, rank, score, Countdown, PriorityConfig,
    PriorityScorer, RankedTask, SchedulerConfig, TaskLookup, TimelineBlock, TimelineScheduler,
};
pub use timer::{FocusTimer, TimerState};
