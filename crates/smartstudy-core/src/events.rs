use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::TaskStatus;
use crate::timer::TimerState;

/// Every state change in the planner produces an Event.
/// The CLI prints them; a front end can show [`Event::note`] as a status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    FocusStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    FocusPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    FocusResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    FocusCompleted {
        sessions_completed: u32,
        logged_minutes: u64,
        session_minutes: u64,
        at: DateTime<Utc>,
    },
    FocusReset {
        at: DateTime<Utc>,
    },
    FocusSnapshot {
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        clock: String,
        sessions_completed: u32,
        logged_minutes: u64,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskStatusChanged {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
        /// Planned minutes credited when the task moved to done.
        logged_minutes: u64,
        at: DateTime<Utc>,
    },
    TaskSkipped {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskRescheduled {
        task_id: String,
        day_offset: u32,
        at: DateTime<Utc>,
    },
    SubjectAdded {
        subject_id: String,
        at: DateTime<Utc>,
    },
    SubjectDeleted {
        subject_id: String,
        /// Tasks left pointing at the deleted subject.
        orphaned_tasks: usize,
        at: DateTime<Utc>,
    },
    DifficultyChanged {
        subject_id: String,
        weight: u8,
        at: DateTime<Utc>,
    },
    TimelineReordered {
        order: Vec<String>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// One-line status message for the change.
    pub fn note(&self) -> &'static str {
        match self {
            Self::FocusStarted { .. } => "Focus session started.",
            Self::FocusPaused { .. } => "Focus session paused.",
            Self::FocusResumed { .. } => "Focus session resumed.",
            Self::FocusCompleted { .. } => "Session logged. Tasks re-balanced for recovery time.",
            Self::FocusReset { .. } => "Focus timer reset.",
            Self::FocusSnapshot { .. } => "Focus timer status.",
            Self::TaskAdded { .. } => "New task added. Timeline recalculated.",
            Self::TaskDeleted { .. } => "Task deleted. Plan adjusted.",
            Self::TaskStatusChanged { to: TaskStatus::Done, .. } => {
                "Marked done. Remaining plan re-ordered to keep pace."
            }
            Self::TaskStatusChanged { .. } => "Task status updated. Board refreshed.",
            Self::TaskSkipped { .. } => "Skipped. It stays on the list with lower priority.",
            Self::TaskRescheduled { .. } => "Rescheduled. Timeline reshuffled.",
            Self::SubjectAdded { .. } => "Subject added.",
            Self::SubjectDeleted { .. } => "Subject deleted. Its tasks sink to the bottom.",
            Self::DifficultyChanged { .. } => "Difficulty updated. Priority weights refreshed.",
            Self::TimelineReordered { .. } => "Blocks reordered for today.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::TaskSkipped {
            task_id: "t1".into(),
            at: Utc::now(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "TaskSkipped");
        assert_eq!(value["task_id"], "t1");
    }

    #[test]
    fn done_has_its_own_note() {
        let done = Event::TaskStatusChanged {
            task_id: "t1".into(),
            from: TaskStatus::Pending,
            to: TaskStatus::Done,
            logged_minutes: 30,
            at: Utc::now(),
        };
        let started = Event::TaskStatusChanged {
            task_id: "t1".into(),
            from: TaskStatus::Pending,
            to: TaskStatus::InProgress,
            logged_minutes: 0,
            at: Utc::now(),
        };
        assert_ne!(done.note(), started.note());
    }
}
