use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use smartstudy_core::plan::exams;
use smartstudy_core::{countdown, Countdown, Exam};

use super::{load_plan, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ExamAction {
    /// The earliest exam and its countdown
    Next,
    /// Every exam with its countdown
    List,
    /// Countdown to an arbitrary time
    Countdown {
        /// Target time (RFC 3339)
        target: DateTime<Utc>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExamRow {
    #[serde(flatten)]
    exam: Exam,
    countdown: Countdown,
}

impl ExamRow {
    fn new(exam: Exam, now: DateTime<Utc>) -> Self {
        let countdown = exam.countdown(now);
        Self { exam, countdown }
    }
}

pub fn run(action: ExamAction, now: DateTime<Utc>) -> CmdResult {
    match action {
        ExamAction::Next => {
            let plan = load_plan()?;
            match plan.next_exam() {
                Some(exam) => print_json(&ExamRow::new(exam, now)),
                None => {
                    eprintln!("no exams scheduled");
                    print_json(&serde_json::Value::Null)
                }
            }
        }
        ExamAction::List => {
            let plan = load_plan()?;
            let rows: Vec<ExamRow> = exams(&plan.subjects)
                .into_iter()
                .map(|exam| ExamRow::new(exam, now))
                .collect();
            print_json(&rows)
        }
        ExamAction::Countdown { target } => print_json(&countdown(target, now)),
    }
}
