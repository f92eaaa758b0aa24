//! Task priority scoring.
//!
//! A task's score is a weighted sum of four signals:
//! - Difficulty weight of its subject (1-3, user editable)
//! - Exam proximity (0 when the exam is 30+ days out, 1 when due or overdue)
//! - Day urgency (1 for today, 0 for 5+ days out)
//! - User importance (0-1)
//!
//! Skipped tasks take a fixed penalty. Tasks whose subject no longer exists
//! get a sentinel score below every valid one, so they sink instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::clock::days_until;
use crate::plan::{DifficultyMap, Subject, Task, TaskStatus};

/// Coefficients applied to each signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Multiplier for the difficulty weight (default 0.35)
    pub difficulty: f64,
    /// Multiplier for exam proximity (default 0.35)
    pub exam: f64,
    /// Multiplier for day urgency (default 0.20)
    pub urgency: f64,
    /// Multiplier for task importance (default 0.25)
    pub importance: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            difficulty: 0.35,
            exam: 0.35,
            urgency: 0.20,
            importance: 0.25,
        }
    }
}

/// Priority scoring configuration.
#[derive(Debug, Clone)]
pub struct PriorityConfig {
    pub weights: PriorityWeights,
    /// Reference time for exam proximity.
    pub current_time: DateTime<Utc>,
    /// Exam proximity ramps from 0 to 1 over this many days. Also the
    /// assumed distance when a subject has no exam date.
    pub exam_horizon_days: u32,
    /// Day urgency ramps from 0 to 1 over this many days.
    pub urgency_horizon_days: u32,
    /// Added to the score of skipped tasks.
    pub skipped_penalty: f64,
    /// Score given to tasks whose subject cannot be found.
    pub dangling_score: f64,
}

impl PriorityConfig {
    pub fn at(current_time: DateTime<Utc>) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            weights: PriorityWeights::default(),
            current_time: Utc::now(),
            exam_horizon_days: 30,
            urgency_horizon_days: 5,
            skipped_penalty: -0.4,
            dangling_score: -1.0,
        }
    }
}

/// Every signal that went into a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub score: f64,
    pub exam_weight: f64,
    pub urgency_weight: f64,
    pub difficulty_weight: u8,
    pub status_penalty: f64,
}

/// A task with its computed priority.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTask<'a> {
    pub task: &'a Task,
    pub subject: Option<&'a Subject>,
    pub score: f64,
    pub exam_weight: f64,
    pub urgency_weight: f64,
    pub difficulty_weight: u8,
}

/// Scores and ranks tasks against a fixed reference time.
pub struct PriorityScorer {
    config: PriorityConfig,
}

impl PriorityScorer {
    /// Scorer with default weights, evaluated at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            config: PriorityConfig::at(now),
        }
    }

    pub fn with_config(config: PriorityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Linear ramp from 0 (exam at or beyond the horizon) to 1 (exam now or past).
    pub fn exam_weight(&self, subject: Option<&Subject>) -> f64 {
        let horizon = self.config.exam_horizon_days as f64;
        if horizon <= 0.0 {
            return 0.0;
        }
        let days = subject
            .and_then(|s| s.exam)
            .map(|exam| days_until(exam, self.config.current_time) as f64)
            .unwrap_or(horizon);
        (horizon - days).max(0.0) / horizon
    }

    /// Linear ramp from 1 (today) to 0 (at or beyond the horizon).
    pub fn urgency_weight(&self, task: &Task) -> f64 {
        let horizon = self.config.urgency_horizon_days as f64;
        if horizon <= 0.0 {
            return 0.0;
        }
        (horizon - task.day_offset as f64).max(0.0) / horizon
    }

    fn status_penalty(&self, task: &Task) -> f64 {
        if task.status == TaskStatus::Skipped {
            self.config.skipped_penalty
        } else {
            0.0
        }
    }

    /// Full breakdown for one task.
    ///
    /// `subject` is `None` when the task's subject key dangles; the score is
    /// then the configured sentinel. Importance is clamped to `0..=1`.
    pub fn breakdown(
        &self,
        task: &Task,
        subject: Option<&Subject>,
        difficulty_weight: u8,
    ) -> ScoreBreakdown {
        let exam_weight = self.exam_weight(subject);
        let urgency_weight = self.urgency_weight(task);
        let status_penalty = self.status_penalty(task);

        let score = if subject.is_none() {
            self.config.dangling_score
        } else {
            let w = &self.config.weights;
            w.difficulty * difficulty_weight as f64
                + w.exam * exam_weight
                + w.urgency * urgency_weight
                + w.importance * task.importance.clamp(0.0, 1.0)
                + status_penalty
        };

        ScoreBreakdown {
            score,
            exam_weight,
            urgency_weight,
            difficulty_weight,
            status_penalty,
        }
    }

    pub fn score(&self, task: &Task, subject: Option<&Subject>, difficulty_weight: u8) -> f64 {
        self.breakdown(task, subject, difficulty_weight).score
    }

    /// Score every task and sort descending.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank<'a>(
        &self,
        tasks: &'a [Task],
        subjects: &'a [Subject],
        difficulty: &DifficultyMap,
    ) -> Vec<RankedTask<'a>> {
        let by_id: HashMap<&str, &Subject> =
            subjects.iter().map(|s| (s.id.as_str(), s)).collect();

        let mut ranked: Vec<RankedTask<'a>> = tasks
            .iter()
            .map(|task| {
                let subject = by_id.get(task.subject_id.as_str()).copied();
                let weight = difficulty.weight_for(&task.subject_id);
                let b = self.breakdown(task, subject, weight);
                RankedTask {
                    task,
                    subject,
                    score: b.score,
                    exam_weight: b.exam_weight,
                    urgency_weight: b.urgency_weight,
                    difficulty_weight: b.difficulty_weight,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(tasks = ranked.len(), "ranked tasks");
        ranked
    }
}

/// Convenience function to score a single task at `now`.
pub fn score(
    task: &Task,
    subject: Option<&Subject>,
    difficulty_weight: u8,
    now: DateTime<Utc>,
) -> f64 {
    PriorityScorer::new(now).score(task, subject, difficulty_weight)
}

/// Convenience function to rank tasks at `now` with default weights.
pub fn rank<'a>(
    tasks: &'a [Task],
    subjects: &'a [Subject],
    difficulty: &DifficultyMap,
    now: DateTime<Utc>,
) -> Vec<RankedTask<'a>> {
    PriorityScorer::new(now).rank(tasks, subjects, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Difficulty;
    use chrono::Duration;
    use proptest::prelude::*;

    fn subject_with_exam(id: &str, now: DateTime<Utc>, days: i64) -> Subject {
        Subject::new(id, id, Difficulty::Medium).with_exam(now + Duration::days(days))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn end_to_end_score() {
        let now = Utc::now();
        let subject = Subject::new("math", "Calculus II", Difficulty::Hard).with_exam(now);
        let task = Task::new("t1", "Series tests", "math", 50).with_importance(0.8);

        let s = score(&task, Some(&subject), 3, now);
        assert!(approx(s, 1.80), "expected 1.80, got {s}");
    }

    #[test]
    fn urgency_today_and_far_out() {
        let scorer = PriorityScorer::new(Utc::now());
        let today = Task::new("a", "A", "s", 30);
        let later = Task::new("b", "B", "s", 30).with_day_offset(5);
        let much_later = Task::new("c", "C", "s", 30).with_day_offset(12);
        assert_eq!(scorer.urgency_weight(&today), 1.0);
        assert_eq!(scorer.urgency_weight(&later), 0.0);
        assert_eq!(scorer.urgency_weight(&much_later), 0.0);
        assert!(approx(
            scorer.urgency_weight(&Task::new("d", "D", "s", 30).with_day_offset(2)),
            0.6
        ));
    }

    #[test]
    fn exam_weight_bounds() {
        let now = Utc::now();
        let scorer = PriorityScorer::new(now);
        assert_eq!(scorer.exam_weight(Some(&subject_with_exam("a", now, 0))), 1.0);
        assert_eq!(scorer.exam_weight(Some(&subject_with_exam("b", now, 30))), 0.0);
        assert_eq!(scorer.exam_weight(Some(&subject_with_exam("c", now, 45))), 0.0);
        assert_eq!(scorer.exam_weight(Some(&subject_with_exam("d", now, -3))), 1.0);
        assert!(approx(
            scorer.exam_weight(Some(&subject_with_exam("e", now, 15))),
            0.5
        ));
    }

    #[test]
    fn missing_exam_means_thirty_days() {
        let scorer = PriorityScorer::new(Utc::now());
        let subject = Subject::new("art", "Art", Difficulty::Easy);
        assert_eq!(scorer.exam_weight(Some(&subject)), 0.0);
    }

    #[test]
    fn skipped_tasks_take_penalty() {
        let now = Utc::now();
        let subject = subject_with_exam("s", now, 10);
        let scorer = PriorityScorer::new(now);
        let pending = Task::new("a", "A", "s", 30);
        let skipped = pending.clone().with_status(TaskStatus::Skipped);

        let diff = scorer.score(&pending, Some(&subject), 2) - scorer.score(&skipped, Some(&subject), 2);
        assert!(approx(diff, 0.4));
    }

    #[test]
    fn out_of_range_importance_stays_above_sentinel() {
        let now = Utc::now();
        let subject = Subject::new("s", "S", Difficulty::Easy);
        let worst = Task::new("w", "W", "s", 30)
            .with_day_offset(9)
            .with_status(TaskStatus::Skipped)
            .with_importance(-5.0);
        let s = score(&worst, Some(&subject), 1, now);
        assert!(approx(s, 0.35 - 0.4), "got {s}");
        assert!(s > PriorityConfig::default().dangling_score);

        let eager = Task::new("e", "E", "s", 30).with_importance(7.0);
        let capped = Task::new("c", "C", "s", 30).with_importance(1.0);
        assert_eq!(
            score(&eager, Some(&subject), 1, now),
            score(&capped, Some(&subject), 1, now)
        );
    }

    #[test]
    fn dangling_subject_sinks_to_bottom() {
        let now = Utc::now();
        let subjects = vec![subject_with_exam("math", now, 40)];
        let tasks = vec![
            Task::new("orphan", "Orphan", "deleted", 30).with_importance(1.0),
            Task::new("t1", "Low", "math", 30)
                .with_day_offset(9)
                .with_importance(0.0)
                .with_status(TaskStatus::Skipped),
        ];

        let ranked = rank(&tasks, &subjects, &DifficultyMap::new(), now);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].task.id, "orphan");
        assert_eq!(ranked[1].score, -1.0);
        assert!(ranked[1].subject.is_none());
        assert!(ranked[0].score > -1.0);
    }

    #[test]
    fn rank_uses_difficulty_map() {
        let now = Utc::now();
        let subjects = vec![subject_with_exam("a", now, 40), subject_with_exam("b", now, 40)];
        let tasks = vec![Task::new("ta", "A", "a", 30), Task::new("tb", "B", "b", 30)];
        let mut difficulty = DifficultyMap::new();
        difficulty.set("b", 3).unwrap();

        let ranked = rank(&tasks, &subjects, &difficulty, now);
        assert_eq!(ranked[0].task.id, "tb");
        assert_eq!(ranked[0].difficulty_weight, 3);
        assert_eq!(ranked[1].difficulty_weight, 1);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let now = Utc::now();
        let subjects = vec![subject_with_exam("s", now, 10)];
        let tasks: Vec<Task> = (0..6)
            .map(|i| Task::new(format!("t{i}"), "Same", "s", 30))
            .collect();

        let ranked = rank(&tasks, &subjects, &DifficultyMap::new(), now);
        let ids: Vec<&str> = ranked.iter().map(|r| r.task.id.as_str()).collect();
        assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4", "t5"]);
    }

    #[test]
    fn custom_weights_apply() {
        let now = Utc::now();
        let subject = subject_with_exam("s", now, 40);
        let task = Task::new("a", "A", "s", 30).with_day_offset(9).with_importance(1.0);
        let scorer = PriorityScorer::with_config(PriorityConfig {
            weights: PriorityWeights {
                difficulty: 0.0,
                exam: 0.0,
                urgency: 0.0,
                importance: 2.0,
            },
            ..PriorityConfig::at(now)
        });
        assert!(approx(scorer.score(&task, Some(&subject), 3), 2.0));
    }

    proptest! {
        #[test]
        fn weights_stay_in_unit_range(offset in 0u32..400, exam_days in -400i64..400) {
            let now = Utc::now();
            let scorer = PriorityScorer::new(now);
            let task = Task::new("t", "T", "s", 30).with_day_offset(offset);
            let subject = subject_with_exam("s", now, exam_days);
            let u = scorer.urgency_weight(&task);
            let e = scorer.exam_weight(Some(&subject));
            prop_assert!((0.0..=1.0).contains(&u));
            prop_assert!((0.0..=1.0).contains(&e));
        }

        #[test]
        fn rank_is_sorted_and_stable(
            entries in proptest::collection::vec((0u32..8, 0u8..3, any::<bool>()), 0..40)
        ) {
            let now = Utc::now();
            let subjects = vec![subject_with_exam("s", now, 12)];
            let tasks: Vec<Task> = entries
                .iter()
                .enumerate()
                .map(|(i, (offset, imp, dangling))| {
                    let subject = if *dangling { "gone" } else { "s" };
                    Task::new(format!("t{i}"), "T", subject, 30)
                        .with_day_offset(*offset)
                        .with_importance(*imp as f64 / 2.0)
                })
                .collect();

            let ranked = rank(&tasks, &subjects, &DifficultyMap::new(), now);
            prop_assert_eq!(ranked.len(), tasks.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    let pos = |id: &str| tasks.iter().position(|t| t.id == id).unwrap();
                    prop_assert!(pos(&pair[0].task.id) < pos(&pair[1].task.id));
                }
            }
        }
    }
}
