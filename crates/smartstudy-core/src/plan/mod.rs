//! Study plan data model and edits.
//!
//! [`StudyPlan`] owns the subjects, tasks, difficulty weights and today's
//! timeline order. Each edit replaces part of the state in one step and
//! returns the [`Event`] describing it.

mod board;
mod exam;
mod order;
mod subject;
mod task;

pub use board::{today_summary, weekly_load, Board, DayLoad, TodaySummary};
pub use exam::{exams, next_exam, Exam, DEFAULT_EXAM_LOCATION};
pub use order::TimelineOrder;
pub use subject::{Difficulty, DifficultyMap, Subject, MAX_DIFFICULTY_WEIGHT, MIN_DIFFICULTY_WEIGHT};
pub use task::{ActivityType, Task, TaskStatus};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::timeline::{
    PriorityConfig, PriorityScorer, RankedTask, SchedulerConfig, TimelineBlock, TimelineScheduler,
};

/// Fields supplied when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Generated when `None`.
    pub id: Option<String>,
    pub title: String,
    pub subject_id: String,
    pub planned_minutes: u32,
    pub day_offset: u32,
    pub kind: ActivityType,
    pub importance: f64,
}

impl NewTask {
    pub fn new(title: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            subject_id: subject_id.into(),
            planned_minutes: 30,
            day_offset: 0,
            kind: ActivityType::Concept,
            importance: 0.5,
        }
    }
}

/// The whole planner state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub difficulty: DifficultyMap,
    #[serde(default)]
    pub timeline_order: TimelineOrder,
}

impl StudyPlan {
    /// Plan with the given subjects, difficulty seeded from their tiers.
    pub fn with_subjects(subjects: Vec<Subject>) -> Self {
        let difficulty = DifficultyMap::from_subjects(&subjects);
        Self {
            subjects,
            tasks: Vec::new(),
            difficulty,
            timeline_order: TimelineOrder::default(),
        }
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::task_not_found(id))
    }

    // ── Subjects ─────────────────────────────────────────────────────

    /// Add a subject and seed its difficulty weight from its tier.
    ///
    /// # Errors
    /// Returns an error if the id or name is blank or the id is taken.
    pub fn add_subject(&mut self, subject: Subject) -> Result<Event> {
        if subject.id.trim().is_empty() {
            return Err(ValidationError::Blank("id".into()).into());
        }
        if subject.name.trim().is_empty() {
            return Err(ValidationError::Blank("name".into()).into());
        }
        if self.subject(&subject.id).is_some() {
            return Err(ValidationError::Duplicate {
                kind: "subject".into(),
                id: subject.id,
            }
            .into());
        }
        if self.difficulty.get(&subject.id).is_none() {
            self.difficulty.set(subject.id.clone(), subject.difficulty.weight())?;
        }
        let subject_id = subject.id.clone();
        self.subjects.push(subject);
        Ok(Event::SubjectAdded {
            subject_id,
            at: Utc::now(),
        })
    }

    /// Remove a subject and its difficulty entry. Its tasks are kept and
    /// rank at the bottom from then on.
    pub fn delete_subject(&mut self, id: &str) -> Result<Event> {
        if self.subject(id).is_none() {
            return Err(CoreError::subject_not_found(id));
        }
        self.subjects.retain(|s| s.id != id);
        self.difficulty.remove(id);
        let orphaned_tasks = self.tasks.iter().filter(|t| t.subject_id == id).count();
        if orphaned_tasks > 0 {
            tracing::warn!(subject = id, orphaned_tasks, "deleted subject still has tasks");
        }
        Ok(Event::SubjectDeleted {
            subject_id: id.to_string(),
            orphaned_tasks,
            at: Utc::now(),
        })
    }

    pub fn set_difficulty(&mut self, subject_id: &str, weight: u8) -> Result<Event> {
        if self.subject(subject_id).is_none() {
            return Err(CoreError::subject_not_found(subject_id));
        }
        self.difficulty.set(subject_id, weight)?;
        Ok(Event::DifficultyChanged {
            subject_id: subject_id.to_string(),
            weight,
            at: Utc::now(),
        })
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a pending task. Today's tasks join the end of the timeline.
    ///
    /// # Errors
    /// Returns an error on a blank title, zero planned minutes or a taken id.
    pub fn add_task(&mut self, new: NewTask) -> Result<Event> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::Blank("title".into()).into());
        }
        if new.planned_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "plannedMinutes".into(),
                message: "must be positive".into(),
            }
            .into());
        }
        let id = new
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("t{}", uuid::Uuid::new_v4().simple()));
        if self.task(&id).is_some() {
            return Err(ValidationError::Duplicate {
                kind: "task".into(),
                id,
            }
            .into());
        }

        let task = Task {
            id: id.clone(),
            title: new.title.trim().to_string(),
            subject_id: new.subject_id,
            planned_minutes: new.planned_minutes,
            day_offset: new.day_offset,
            status: TaskStatus::Pending,
            kind: new.kind,
            importance: new.importance,
        };
        if task.is_today() {
            self.timeline_order.push(id.clone());
        }
        self.tasks.push(task);
        Ok(Event::TaskAdded {
            task_id: id,
            at: Utc::now(),
        })
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Event> {
        if self.task(id).is_none() {
            return Err(CoreError::task_not_found(id));
        }
        self.tasks.retain(|t| t.id != id);
        self.timeline_order.remove(id);
        Ok(Event::TaskDeleted {
            task_id: id.to_string(),
            at: Utc::now(),
        })
    }

    /// Move a task to another status. Moving into `done` credits its
    /// planned minutes (reported in the event).
    ///
    /// Skipped tasks are kept off today's timeline; a today task leaving
    /// `skipped` rejoins it at the end.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Event> {
        let task = self.task_mut(id)?;
        let from = task.status;
        task.status = status;
        let is_today = task.is_today();
        let logged_minutes = if status == TaskStatus::Done && from != TaskStatus::Done {
            u64::from(task.planned_minutes)
        } else {
            0
        };
        if status == TaskStatus::Skipped {
            self.timeline_order.remove(id);
        } else if from == TaskStatus::Skipped && is_today {
            self.timeline_order.push(id);
        }
        Ok(Event::TaskStatusChanged {
            task_id: id.to_string(),
            from,
            to: status,
            logged_minutes,
            at: Utc::now(),
        })
    }

    pub fn complete(&mut self, id: &str) -> Result<Event> {
        self.set_status(id, TaskStatus::Done)
    }

    /// Mark a task skipped and take it off today's timeline.
    pub fn skip(&mut self, id: &str) -> Result<Event> {
        self.task_mut(id)?.status = TaskStatus::Skipped;
        self.timeline_order.remove(id);
        Ok(Event::TaskSkipped {
            task_id: id.to_string(),
            at: Utc::now(),
        })
    }

    /// Push a task to the next day and take it off today's timeline.
    pub fn reschedule(&mut self, id: &str) -> Result<Event> {
        let task = self.task_mut(id)?;
        task.day_offset = task.day_offset.saturating_add(1);
        let day_offset = task.day_offset;
        self.timeline_order.remove(id);
        Ok(Event::TaskRescheduled {
            task_id: id.to_string(),
            day_offset,
            at: Utc::now(),
        })
    }

    /// Drag `dragged` onto `target` in today's timeline.
    pub fn reorder(&mut self, dragged: &str, target: &str) -> Option<Event> {
        if !self.timeline_order.move_before(dragged, target) {
            return None;
        }
        Some(Event::TimelineReordered {
            order: self.timeline_order.ids().to_vec(),
            at: Utc::now(),
        })
    }

    // ── Views ────────────────────────────────────────────────────────

    /// All tasks ranked by priority.
    pub fn ranked(&self, config: PriorityConfig) -> Vec<RankedTask<'_>> {
        PriorityScorer::with_config(config).rank(&self.tasks, &self.subjects, &self.difficulty)
    }

    /// The `n` highest-priority tasks.
    pub fn top_priorities(&self, config: PriorityConfig, n: usize) -> Vec<RankedTask<'_>> {
        let mut ranked = self.ranked(config);
        ranked.truncate(n);
        ranked
    }

    /// Today's timeline in the user's order.
    pub fn today_blocks(&self, config: SchedulerConfig) -> Vec<TimelineBlock<'_>> {
        TimelineScheduler::with_config(config).layout_today(self.timeline_order.ids(), &self.tasks)
    }

    pub fn board(&self) -> Board<'_> {
        Board::from_tasks(&self.tasks)
    }

    pub fn weekly_load(&self, days: u32) -> Vec<DayLoad> {
        weekly_load(&self.tasks, days)
    }

    pub fn today_summary(&self) -> TodaySummary {
        today_summary(&self.tasks)
    }

    pub fn next_exam(&self) -> Option<Exam> {
        next_exam(&self.subjects)
    }
}
