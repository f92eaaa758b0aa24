//! Exams derived from subjects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subject::Subject;
use crate::timeline::{countdown, Countdown};

/// Location shown when a subject has no explicit exam location.
pub const DEFAULT_EXAM_LOCATION: &str = "Main Hall";

/// An exam sitting, derived 1:1 from a subject's exam timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub subject_id: String,
    pub date: DateTime<Utc>,
    pub location: String,
}

impl Exam {
    /// Build the exam for a subject, if it has an exam date.
    pub fn for_subject(subject: &Subject) -> Option<Self> {
        let date = subject.exam?;
        Some(Self {
            subject_id: subject.id.clone(),
            date,
            location: subject
                .exam_location
                .clone()
                .unwrap_or_else(|| DEFAULT_EXAM_LOCATION.to_string()),
        })
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        countdown(self.date, now)
    }
}

/// All exams, in subject order.
pub fn exams(subjects: &[Subject]) -> Vec<Exam> {
    subjects.iter().filter_map(Exam::for_subject).collect()
}

/// The exam with the earliest timestamp, past or future.
///
/// Ties keep the first subject in collection order.
pub fn next_exam(subjects: &[Subject]) -> Option<Exam> {
    subjects
        .iter()
        .filter_map(Exam::for_subject)
        .fold(None, |soonest: Option<Exam>, current| match soonest {
            Some(s) if s.date <= current.date => Some(s),
            _ => Some(current),
        })
}
