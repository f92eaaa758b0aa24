//! User-controlled ordering of today's timeline.

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Ordered task ids for today's timeline.
///
/// Entries can go stale when tasks are deleted or moved; the scheduler
/// skips those, so the list is never pruned eagerly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineOrder {
    ids: Vec<String>,
}

impl TimelineOrder {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Today's tasks in collection order.
    pub fn from_today(tasks: &[Task]) -> Self {
        Self {
            ids: tasks
                .iter()
                .filter(|t| t.is_today())
                .map(|t| t.id.clone())
                .collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Append an id unless it is already present.
    pub fn push(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Drop an id. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    /// Drag-and-drop insert: take `dragged` out and put it where `target` is.
    ///
    /// No-op when the two are equal or `dragged` is not listed. When `target`
    /// is not listed, `dragged` moves to the very end, after the last id
    /// rather than in front of it. Returns whether the order changed.
    pub fn move_before(&mut self, dragged: &str, target: &str) -> bool {
        if dragged == target || !self.contains(dragged) {
            return false;
        }
        let before = self.ids.clone();
        self.ids.retain(|i| i != dragged);
        let index = self
            .ids
            .iter()
            .position(|i| i == target)
            .unwrap_or(self.ids.len());
        self.ids.insert(index, dragged.to_string());
        self.ids != before
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> TimelineOrder {
        TimelineOrder::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn from_today_keeps_only_day_zero() {
        let tasks = vec![
            Task::new("a", "A", "s", 30),
            Task::new("b", "B", "s", 30).with_day_offset(1),
            Task::new("c", "C", "s", 30),
        ];
        assert_eq!(TimelineOrder::from_today(&tasks), order(&["a", "c"]));
    }

    #[test]
    fn move_later_item_before_earlier() {
        let mut o = order(&["a", "b", "c", "d"]);
        assert!(o.move_before("d", "b"));
        assert_eq!(o, order(&["a", "d", "b", "c"]));
    }

    #[test]
    fn move_earlier_item_onto_later() {
        let mut o = order(&["a", "b", "c", "d"]);
        assert!(o.move_before("a", "c"));
        assert_eq!(o, order(&["b", "a", "c", "d"]));
    }

    #[test]
    fn move_is_noop_for_self_or_unknown() {
        let mut o = order(&["a", "b"]);
        assert!(!o.move_before("a", "a"));
        assert!(!o.move_before("zz", "a"));
        assert_eq!(o, order(&["a", "b"]));
    }

    #[test]
    fn move_to_missing_target_goes_last() {
        let mut o = order(&["a", "b", "c"]);
        assert!(o.move_before("a", "gone"));
        assert_eq!(o, order(&["b", "c", "a"]));
    }

    #[test]
    fn push_and_remove() {
        let mut o = order(&["a"]);
        o.push("a");
        o.push("b");
        assert_eq!(o.len(), 2);
        assert!(o.remove("a"));
        assert!(!o.remove("a"));
        assert_eq!(o, order(&["b"]));
    }
}
