//! Planner state kept as JSON values in the kv table.
//!
//! Each collection lives under its own key. A missing or malformed value
//! never fails a load: it is logged and replaced with the default.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::database::Database;
use crate::error::CoreError;
use crate::plan::{DifficultyMap, StudyPlan, Subject, Task, TimelineOrder};
use crate::seed;
use crate::timer::FocusTimer;

pub const TASKS_KEY: &str = "smart-study-tasks";
pub const SUBJECTS_KEY: &str = "smart-study-subjects";
pub const DIFFICULTY_KEY: &str = "smart-study-difficulty";
pub const TIMELINE_KEY: &str = "smart-study-timeline";
pub const FOCUS_KEY: &str = "smart-study-focus";

/// Decode a stored JSON value, falling back to `default` when it is absent
/// or does not parse.
pub fn decode_or_else<T, F>(key: &str, raw: Option<&str>, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(raw) = raw else {
        return default();
    };
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            default()
        }
    }
}

/// Loads and saves a [`StudyPlan`] through a [`Database`].
pub struct PlanStore<'a> {
    db: &'a Database,
}

impl<'a> PlanStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Read a raw value, treating a read failure like a missing value.
    fn raw(&self, key: &str) -> Option<String> {
        match self.db.kv_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.db.kv_set(key, &json)?;
        Ok(())
    }

    /// Load the plan. Missing subjects fall back to the starter set, a
    /// missing difficulty map is seeded from the subjects and a missing
    /// timeline order is rebuilt from today's tasks.
    pub fn load_plan(&self) -> StudyPlan {
        let subjects: Vec<Subject> = decode_or_else(
            SUBJECTS_KEY,
            self.raw(SUBJECTS_KEY).as_deref(),
            seed::default_subjects,
        );
        let tasks: Vec<Task> = decode_or_else(TASKS_KEY, self.raw(TASKS_KEY).as_deref(), Vec::new);
        let difficulty: DifficultyMap = decode_or_else(
            DIFFICULTY_KEY,
            self.raw(DIFFICULTY_KEY).as_deref(),
            || DifficultyMap::from_subjects(&subjects),
        );
        let timeline_order: TimelineOrder = decode_or_else(
            TIMELINE_KEY,
            self.raw(TIMELINE_KEY).as_deref(),
            || TimelineOrder::from_today(&tasks),
        );
        tracing::debug!(
            subjects = subjects.len(),
            tasks = tasks.len(),
            "loaded plan"
        );
        StudyPlan {
            subjects,
            tasks,
            difficulty,
            timeline_order,
        }
    }

    pub fn save_plan(&self, plan: &StudyPlan) -> Result<(), CoreError> {
        self.put(SUBJECTS_KEY, &plan.subjects)?;
        self.put(TASKS_KEY, &plan.tasks)?;
        self.put(DIFFICULTY_KEY, &plan.difficulty)?;
        self.put(TIMELINE_KEY, &plan.timeline_order)?;
        Ok(())
    }

    /// Load the focus timer, or a fresh one of `duration_min` minutes.
    pub fn load_focus(&self, duration_min: u64) -> FocusTimer {
        decode_or_else(FOCUS_KEY, self.raw(FOCUS_KEY).as_deref(), || {
            FocusTimer::new(duration_min)
        })
    }

    pub fn save_focus(&self, timer: &FocusTimer) -> Result<(), CoreError> {
        self.put(FOCUS_KEY, timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::NewTask;

    #[test]
    fn empty_store_loads_seed() {
        let db = Database::open_memory().unwrap();
        let plan = PlanStore::new(&db).load_plan();
        assert_eq!(plan.subjects.len(), 4);
        assert!(plan.tasks.is_empty());
        assert_eq!(plan.difficulty.weight_for("chemistry"), 3);
    }

    #[test]
    fn malformed_values_fall_back() {
        let db = Database::open_memory().unwrap();
        db.kv_set(TASKS_KEY, "{not json").unwrap();
        db.kv_set(DIFFICULTY_KEY, "[1,2,3]").unwrap();
        db.kv_set(SUBJECTS_KEY, "[]").unwrap();

        let plan = PlanStore::new(&db).load_plan();
        assert!(plan.subjects.is_empty());
        assert!(plan.tasks.is_empty());
        assert!(plan.difficulty.is_empty());
    }

    #[test]
    fn save_then_load() {
        let db = Database::open_memory().unwrap();
        let store = PlanStore::new(&db);
        let mut plan = store.load_plan();
        plan.add_task(NewTask {
            id: Some("t1".into()),
            ..NewTask::new("Series tests", "math")
        })
        .unwrap();
        plan.set_difficulty("math", 1).unwrap();
        store.save_plan(&plan).unwrap();

        let loaded = store.load_plan();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.difficulty.weight_for("math"), 1);
        assert_eq!(loaded.timeline_order.ids(), &["t1".to_string()]);
    }

    #[test]
    fn missing_order_rebuilt_from_today() {
        let db = Database::open_memory().unwrap();
        let tasks = vec![
            Task::new("a", "A", "math", 30),
            Task::new("b", "B", "math", 30).with_day_offset(2),
        ];
        db.kv_set(TASKS_KEY, &serde_json::to_string(&tasks).unwrap())
            .unwrap();
        let plan = PlanStore::new(&db).load_plan();
        assert_eq!(plan.timeline_order.ids(), &["a".to_string()]);
    }

    #[test]
    fn focus_timer_persists() {
        let db = Database::open_memory().unwrap();
        let store = PlanStore::new(&db);
        let mut timer = store.load_focus(30);
        assert_eq!(timer.clock_label(), "30:00");
        timer.log_minutes(20);
        store.save_focus(&timer).unwrap();
        assert_eq!(store.load_focus(30).logged_minutes(), 20);
    }
}
