//! Starter subjects used when nothing has been stored yet.

use chrono::{DateTime, TimeZone, Utc};

use crate::plan::{Difficulty, StudyPlan, Subject};

fn exam_at(year: i32, month: u32, day: u32, hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single()
}

fn subject(
    id: &str,
    name: &str,
    difficulty: Difficulty,
    progress: f64,
    hours: (f64, f64),
    weak_topics: &[&str],
    exam: Option<DateTime<Utc>>,
) -> Subject {
    let mut s = Subject::new(id, name, difficulty)
        .with_progress(progress)
        .with_hours(hours.0, hours.1)
        .with_exam_location("Main Hall");
    s.weak_topics = weak_topics.iter().map(|t| t.to_string()).collect();
    s.exam = exam;
    s
}

pub fn default_subjects() -> Vec<Subject> {
    vec![
        subject(
            "math",
            "Calculus II",
            Difficulty::Hard,
            62.0,
            (12.0, 8.5),
            &["Series tests", "Polar integrals"],
            exam_at(2026, 2, 18, 14),
        ),
        subject(
            "physics",
            "Physics: Circuits",
            Difficulty::Medium,
            54.0,
            (8.0, 5.3),
            &["RC timing", "Wave superposition"],
            exam_at(2026, 2, 12, 9),
        ),
        subject(
            "history",
            "World History",
            Difficulty::Medium,
            71.0,
            (6.0, 4.8),
            &["Cold War motivations"],
            exam_at(2026, 3, 1, 10),
        ),
        subject(
            "chemistry",
            "Organic Chemistry",
            Difficulty::Hard,
            48.0,
            (10.0, 6.1),
            &["Mechanisms", "Spectra reading"],
            exam_at(2026, 2, 25, 16),
        ),
    ]
}

/// Starter plan: the default subjects, no tasks.
pub fn default_plan() -> StudyPlan {
    StudyPlan::with_subjects(default_subjects())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_four_subjects_with_exams() {
        let plan = default_plan();
        assert_eq!(plan.subjects.len(), 4);
        assert!(plan.subjects.iter().all(|s| s.exam.is_some()));
        assert!(plan.tasks.is_empty());
        assert_eq!(plan.difficulty.weight_for("math"), 3);
        assert_eq!(plan.difficulty.weight_for("history"), 2);
        assert_eq!(plan.next_exam().unwrap().subject_id, "physics");
    }
}
