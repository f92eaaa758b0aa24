//! Focus timer implementation.
//!
//! The focus timer is a wall-clock-based countdown. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically
//! (once a second is plenty).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            +-> (session logged) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = FocusTimer::new(25);
//! timer.start();
//! // In a loop:
//! timer.tick(); // Returns Some(Event::FocusCompleted) when the session ends
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default session length in minutes.
pub const DEFAULT_FOCUS_MINUTES: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Pomodoro-style focus countdown with a running tally of completed sessions.
///
/// Operates on wall-clock deltas -- no internal thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    /// Session length in minutes.
    duration_min: u64,
    state: TimerState,
    /// Remaining time in milliseconds for the current session.
    remaining_ms: u64,
    #[serde(default)]
    sessions_completed: u32,
    #[serde(default)]
    logged_minutes: u64,
    /// Timestamp (ms since epoch) of the last start/resume/tick.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl FocusTimer {
    /// Idle timer with a full session ready.
    pub fn new(duration_min: u64) -> Self {
        Self {
            duration_min,
            state: TimerState::Idle,
            remaining_ms: minutes_to_ms(duration_min),
            sessions_completed: 0,
            logged_minutes: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn duration_min(&self) -> u64 {
        self.duration_min
    }

    pub fn total_ms(&self) -> u64 {
        minutes_to_ms(self.duration_min)
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Remaining whole seconds, rounded up so a fresh session shows 25:00.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn logged_minutes(&self) -> u64 {
        self.logged_minutes
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    /// `MM:SS` of the remaining time.
    pub fn clock_label(&self) -> String {
        let secs = self.remaining_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::FocusSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs(),
            total_secs: self.duration_min.saturating_mul(60),
            clock: self.clock_label(),
            sessions_completed: self.sessions_completed,
            logged_minutes: self.logged_minutes,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now_ms);
                Some(Event::FocusStarted {
                    duration_secs: self.duration_min.saturating_mul(60),
                    remaining_secs: self.remaining_secs(),
                    at: epoch_ms_to_datetime(now_ms),
                })
            }
            TimerState::Paused => self.resume_at(now_ms),
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        // Flush elapsed time first; the session may have ended meanwhile.
        if let Some(done) = self.tick_at(now_ms) {
            return Some(done);
        }
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::FocusPaused {
            remaining_secs: self.remaining_secs(),
            at: epoch_ms_to_datetime(now_ms),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        self.last_tick_epoch_ms = Some(now_ms);
        Some(Event::FocusResumed {
            remaining_secs: self.remaining_secs(),
            at: epoch_ms_to_datetime(now_ms),
        })
    }

    /// Flip between running and paused, starting an idle timer.
    pub fn toggle_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause_at(now_ms),
            TimerState::Idle | TimerState::Paused => self.start_at(now_ms),
        }
    }

    /// Abandon the current session without logging it.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self.total_ms();
        Some(Event::FocusReset { at: Utc::now() })
    }

    /// Change the session length. Resets the current session.
    pub fn set_duration(&mut self, duration_min: u64) {
        self.duration_min = duration_min;
        self.reset();
    }

    /// Add study minutes logged outside the timer (e.g. a finished task).
    pub fn log_minutes(&mut self, minutes: u64) {
        self.logged_minutes = self.logged_minutes.saturating_add(minutes);
    }

    /// Call periodically. Returns `Some(Event::FocusCompleted)` when the session ends.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now_ms);
        if self.remaining_ms > 0 {
            return None;
        }

        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;
        self.sessions_completed = self.sessions_completed.saturating_add(1);
        self.log_minutes(self.duration_min);
        self.remaining_ms = self.total_ms();
        tracing::info!(
            sessions = self.sessions_completed,
            logged_minutes = self.logged_minutes,
            "focus session logged"
        );
        Some(Event::FocusCompleted {
            sessions_completed: self.sessions_completed,
            logged_minutes: self.logged_minutes,
            session_minutes: self.duration_min,
            at: epoch_ms_to_datetime(now_ms),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now_ms);
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

fn minutes_to_ms(minutes: u64) -> u64 {
    minutes.saturating_mul(60).saturating_mul(1000)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn epoch_ms_to_datetime(ms: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_767_225_600_000;
    const SEC: u64 = 1000;

    #[test]
    fn fresh_timer_shows_full_session() {
        let timer = FocusTimer::default();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.clock_label(), "25:00");
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = FocusTimer::default();
        assert!(timer.start_at(T0).is_some());
        assert!(timer.is_active());
        assert!(timer.start_at(T0).is_none());

        assert!(timer.pause_at(T0 + 90 * SEC).is_some());
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.clock_label(), "23:30");

        // Time spent paused does not count.
        assert!(timer.resume_at(T0 + 600 * SEC).is_some());
        assert!(timer.tick_at(T0 + 610 * SEC).is_none());
        assert_eq!(timer.remaining_secs(), 25 * 60 - 100);
    }

    #[test]
    fn ticks_count_down_one_second_at_a_time() {
        let mut timer = FocusTimer::new(1);
        timer.start_at(T0);
        for i in 1..60 {
            assert!(timer.tick_at(T0 + i * SEC).is_none());
        }
        assert_eq!(timer.remaining_secs(), 1);
    }

    #[test]
    fn completion_logs_session_and_resets() {
        let mut timer = FocusTimer::default();
        timer.start_at(T0);
        let event = timer.tick_at(T0 + 25 * 60 * SEC);

        match event {
            Some(Event::FocusCompleted {
                sessions_completed,
                logged_minutes,
                ..
            }) => {
                assert_eq!(sessions_completed, 1);
                assert_eq!(logged_minutes, 25);
            }
            other => panic!("expected FocusCompleted, got {other:?}"),
        }
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.clock_label(), "25:00");
        assert!(timer.tick_at(T0 + 26 * 60 * SEC).is_none());
    }

    #[test]
    fn pause_after_expiry_completes_instead() {
        let mut timer = FocusTimer::new(5);
        timer.start_at(T0);
        let event = timer.pause_at(T0 + 10 * 60 * SEC);
        assert!(matches!(event, Some(Event::FocusCompleted { .. })));
        assert_eq!(timer.sessions_completed(), 1);
    }

    #[test]
    fn reset_discards_progress() {
        let mut timer = FocusTimer::default();
        timer.start_at(T0);
        timer.tick_at(T0 + 300 * SEC);
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 25 * 60);
        assert_eq!(timer.sessions_completed(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut timer = FocusTimer::default();
        timer.toggle_at(T0);
        assert_eq!(timer.state(), TimerState::Running);
        timer.toggle_at(T0 + SEC);
        assert_eq!(timer.state(), TimerState::Paused);
        timer.toggle_at(T0 + 2 * SEC);
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn survives_serde_roundtrip_mid_session() {
        let mut timer = FocusTimer::default();
        timer.start_at(T0);
        timer.log_minutes(45);
        let json = serde_json::to_string(&timer).unwrap();
        let mut restored: FocusTimer = serde_json::from_str(&json).unwrap();
        assert!(restored.is_active());
        assert_eq!(restored.logged_minutes(), 45);
        restored.tick_at(T0 + 60 * SEC);
        assert_eq!(restored.remaining_secs(), 24 * 60);
    }
}
