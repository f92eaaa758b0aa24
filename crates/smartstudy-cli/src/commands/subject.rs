use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use smartstudy_core::{countdown, Countdown, Difficulty, Subject};

use super::{edit_plan, load_plan, print_json, CmdResult};

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}' (expected easy, medium or hard)"))
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        /// Subject ID (e.g. "math")
        id: String,
        /// Display name
        name: String,
        /// Difficulty tier: easy, medium or hard
        #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        /// Exam time (RFC 3339)
        #[arg(long)]
        exam: Option<DateTime<Utc>>,
        /// Exam location
        #[arg(long, requires = "exam")]
        location: Option<String>,
        /// Hours planned for the subject
        #[arg(long, default_value = "0")]
        planned_hours: f64,
    },
    /// List subjects with their weights and exam countdowns
    List,
    /// Delete a subject (its tasks are kept)
    Delete {
        /// Subject ID
        id: String,
    },
    /// Set a subject's difficulty weight
    Difficulty {
        /// Subject ID
        id: String,
        /// Weight from 1 (easy) to 3 (hard)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        weight: u8,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRow<'a> {
    #[serde(flatten)]
    subject: &'a Subject,
    difficulty_weight: u8,
    progress_pct: f64,
    exam_in: Option<Countdown>,
}

pub fn run(action: SubjectAction, now: DateTime<Utc>) -> CmdResult {
    match action {
        SubjectAction::Add {
            id,
            name,
            difficulty,
            exam,
            location,
            planned_hours,
        } => edit_plan(|plan| {
            let mut subject = Subject::new(id, name, difficulty).with_hours(planned_hours, 0.0);
            if let Some(exam) = exam {
                subject = subject.with_exam(exam);
            }
            if let Some(location) = location {
                subject = subject.with_exam_location(location);
            }
            Ok(plan.add_subject(subject)?)
        }),
        SubjectAction::List => {
            let plan = load_plan()?;
            let rows: Vec<SubjectRow<'_>> = plan
                .subjects
                .iter()
                .map(|subject| SubjectRow {
                    subject,
                    difficulty_weight: plan.difficulty.weight_for(&subject.id),
                    progress_pct: subject.progress_pct(),
                    exam_in: subject.exam.map(|exam| countdown(exam, now)),
                })
                .collect();
            print_json(&rows)
        }
        SubjectAction::Delete { id } => edit_plan(|plan| Ok(plan.delete_subject(&id)?)),
        SubjectAction::Difficulty { id, weight } => {
            edit_plan(|plan| Ok(plan.set_difficulty(&id, weight)?))
        }
    }
}
