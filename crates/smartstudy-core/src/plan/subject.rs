//! Subjects and per-subject difficulty weights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ValidationError;

/// Display tier of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Integer weight used to seed the difficulty map.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse a tier label, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// A subject the student is preparing for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    /// Cumulative progress percent. Not clamped in storage, see [`Subject::progress_pct`].
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub planned_hours: f64,
    #[serde(default)]
    pub spent_hours: f64,
    #[serde(default)]
    pub weak_topics: Vec<String>,
    #[serde(default)]
    pub exam: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exam_location: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty,
            progress: 0.0,
            planned_hours: 0.0,
            spent_hours: 0.0,
            weak_topics: Vec::new(),
            exam: None,
            exam_location: None,
            color: None,
        }
    }

    pub fn with_exam(mut self, exam: DateTime<Utc>) -> Self {
        self.exam = Some(exam);
        self
    }

    pub fn with_exam_location(mut self, location: impl Into<String>) -> Self {
        self.exam_location = Some(location.into());
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_hours(mut self, planned: f64, spent: f64) -> Self {
        self.planned_hours = planned;
        self.spent_hours = spent;
        self
    }

    pub fn with_weak_topic(mut self, topic: impl Into<String>) -> Self {
        self.weak_topics.push(topic.into());
        self
    }

    /// Progress clamped to 0..=100 for display.
    pub fn progress_pct(&self) -> f64 {
        if self.progress.is_nan() {
            return 0.0;
        }
        self.progress.clamp(0.0, 100.0)
    }
}

/// Lowest accepted difficulty weight.
pub const MIN_DIFFICULTY_WEIGHT: u8 = 1;
/// Highest accepted difficulty weight.
pub const MAX_DIFFICULTY_WEIGHT: u8 = 3;

/// User-editable mapping from subject id to difficulty weight.
///
/// The weight is independent of the subject's [`Difficulty`] label once edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyMap {
    weights: HashMap<String, u8>,
}

impl DifficultyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a map from each subject's tier label.
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let weights = subjects
            .iter()
            .map(|s| (s.id.clone(), s.difficulty.weight()))
            .collect();
        Self { weights }
    }

    /// Weight for a subject, or 1 when the subject has no entry.
    pub fn weight_for(&self, subject_id: &str) -> u8 {
        self.weights
            .get(subject_id)
            .copied()
            .unwrap_or(MIN_DIFFICULTY_WEIGHT)
    }

    pub fn get(&self, subject_id: &str) -> Option<u8> {
        self.weights.get(subject_id).copied()
    }

    /// Set a subject's weight.
    ///
    /// # Errors
    /// Returns an error if `weight` is outside `1..=3`.
    pub fn set(&mut self, subject_id: impl Into<String>, weight: u8) -> Result<(), ValidationError> {
        if !(MIN_DIFFICULTY_WEIGHT..=MAX_DIFFICULTY_WEIGHT).contains(&weight) {
            return Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!(
                    "weight must be between {MIN_DIFFICULTY_WEIGHT} and {MAX_DIFFICULTY_WEIGHT}, got {weight}"
                ),
            });
        }
        self.weights.insert(subject_id.into(), weight);
        Ok(())
    }

    pub fn remove(&mut self, subject_id: &str) -> Option<u8> {
        self.weights.remove(subject_id)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
