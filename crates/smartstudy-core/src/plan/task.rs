//! Study task types.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a study task.
///
/// The board shows one column per variant. `Skipped` tasks stay in the
/// ranking with a score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    #[serde(alias = "in_progress", alias = "inprogress")]
    InProgress,
    Done,
    Skipped,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in-progress" | "in_progress" | "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// What kind of studying the task involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Concept,
    Practice,
    Review,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Practice => "practice",
            Self::Review => "review",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "concept" => Some(Self::Concept),
            "practice" => Some(Self::Practice),
            "review" => Some(Self::Review),
            _ => None,
        }
    }
}

/// A single study task.
///
/// `subject_id` is a plain key into the subject collection and may dangle
/// after a subject is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub subject_id: String,
    pub planned_minutes: u32,
    /// Days from today; 0 is today.
    #[serde(default)]
    pub day_offset: u32,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Intended range 0.0..=1.0.
    pub importance: f64,
}

impl Task {
    /// A pending concept task for today with neutral importance.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subject_id: impl Into<String>,
        planned_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subject_id: subject_id.into(),
            planned_minutes,
            day_offset: 0,
            status: TaskStatus::Pending,
            kind: ActivityType::Concept,
            importance: 0.5,
        }
    }

    pub fn with_day_offset(mut self, day_offset: u32) -> Self {
        self.day_offset = day_offset;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: ActivityType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }

    pub fn is_today(&self) -> bool {
        self.day_offset == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn status_accepts_aliases() {
        let s: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse("Skipped"), Some(TaskStatus::Skipped));
        assert_eq!(TaskStatus::parse("later"), None);
    }

    #[test]
    fn task_uses_camel_case_keys() {
        let task = Task::new("t1", "Series tests", "math", 50).with_kind(ActivityType::Practice);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["subjectId"], "math");
        assert_eq!(value["plannedMinutes"], 50);
        assert_eq!(value["dayOffset"], 0);
        assert_eq!(value["type"], "practice");
    }

    #[test]
    fn task_parses_stored_record() {
        let raw = r#"{
            "id": "t17",
            "title": "RC timing drills",
            "subjectId": "physics",
            "plannedMinutes": 35,
            "dayOffset": 2,
            "status": "pending",
            "type": "review",
            "importance": 0.7
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.day_offset, 2);
        assert_eq!(task.kind, ActivityType::Review);
        assert!(!task.is_today());
    }
}
