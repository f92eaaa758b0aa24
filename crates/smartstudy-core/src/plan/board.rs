//! Read-only views over the task collection: status board, weekly load and
//! today's totals.

use serde::Serialize;

use super::task::{Task, TaskStatus};
use crate::timeline::format_day_label;

/// Tasks grouped into one column per status, in collection order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board<'a> {
    pub pending: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
    pub skipped: Vec<&'a Task>,
}

impl<'a> Board<'a> {
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status).push(task);
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
            TaskStatus::Skipped => &self.skipped,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Skipped => &mut self.skipped,
        }
    }
}

/// Planned hours for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLoad {
    pub day_offset: u32,
    pub label: String,
    /// Rounded to one decimal.
    pub hours: f64,
}

/// Planned hours for each of the next `days` days, starting today.
pub fn weekly_load(tasks: &[Task], days: u32) -> Vec<DayLoad> {
    (0..days)
        .map(|day| {
            let minutes: u64 = tasks
                .iter()
                .filter(|t| t.day_offset == day)
                .map(|t| u64::from(t.planned_minutes))
                .sum();
            DayLoad {
                day_offset: day,
                label: format_day_label(day),
                hours: (minutes as f64 / 60.0 * 10.0).round() / 10.0,
            }
        })
        .collect()
}

/// Totals for today's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub planned_minutes: u64,
    pub total: usize,
    pub completed: usize,
}

pub fn today_summary(tasks: &[Task]) -> TodaySummary {
    tasks
        .iter()
        .filter(|t| t.is_today())
        .fold(TodaySummary { planned_minutes: 0, total: 0, completed: 0 }, |mut acc, t| {
            acc.planned_minutes += u64::from(t.planned_minutes);
            acc.total += 1;
            if t.status == TaskStatus::Done {
                acc.completed += 1;
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("a", "A", "s", 50),
            Task::new("b", "B", "s", 35).with_status(TaskStatus::Done),
            Task::new("c", "C", "s", 45).with_day_offset(1),
            Task::new("d", "D", "s", 20)
                .with_day_offset(3)
                .with_status(TaskStatus::Skipped),
            Task::new("e", "E", "s", 60).with_status(TaskStatus::InProgress),
        ]
    }

    #[test]
    fn board_groups_by_status() {
        let tasks = tasks();
        let board = Board::from_tasks(&tasks);
        assert_eq!(board.pending.len(), 2);
        assert_eq!(board.column(TaskStatus::Done)[0].id, "b");
        assert_eq!(board.column(TaskStatus::Skipped)[0].id, "d");
        assert_eq!(board.in_progress[0].id, "e");
    }

    #[test]
    fn weekly_load_labels_and_hours() {
        let load = weekly_load(&tasks(), 5);
        assert_eq!(load.len(), 5);
        assert_eq!(load[0].label, "Today");
        assert_eq!(load[0].hours, 2.4);
        assert_eq!(load[1].label, "Tomorrow");
        assert_eq!(load[1].hours, 0.8);
        assert_eq!(load[2].hours, 0.0);
        assert_eq!(load[3].label, "+3d");
    }

    #[test]
    fn today_totals() {
        let summary = today_summary(&tasks());
        assert_eq!(
            summary,
            TodaySummary {
                planned_minutes: 145,
                total: 3,
                completed: 1
            }
        );
    }

    #[test]
    fn totals_do_not_overflow_on_huge_tasks() {
        let tasks = vec![
            Task::new("big", "Big", "s", u32::MAX),
            Task::new("small", "Small", "s", 5),
        ];
        let expected = u64::from(u32::MAX) + 5;

        let summary = today_summary(&tasks);
        assert_eq!(summary.planned_minutes, expected);
        assert_eq!(summary.total, 2);

        let load = weekly_load(&tasks, 1);
        let hours = (expected as f64 / 60.0 * 10.0).round() / 10.0;
        assert_eq!(load[0].hours, hours);
    }
}
