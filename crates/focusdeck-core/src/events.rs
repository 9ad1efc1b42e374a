use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every accepted timer command and every phase completion produces an Event.
/// The rendering layer polls for these; there is no ambient event bus --
/// callers observe transitions through the returned values alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PomodoroStarted {
        phase: TimerPhase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroPaused {
        phase: TimerPhase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero (or was skipped) and the engine moved on.
    PhaseCompleted {
        completed: TimerPhase,
        /// Seconds actually spent in the completed phase. Equal to the
        /// nominal duration for a natural completion, less for a skip.
        elapsed_secs: u64,
        next: TimerPhase,
        completed_work_sessions: u64,
        /// True when the auto-advance policy started the next phase.
        auto_started: bool,
        at: DateTime<Utc>,
    },
    PhaseSelected {
        phase: TimerPhase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroReset {
        phase: TimerPhase,
        at: DateTime<Utc>,
    },
    PomodoroSnapshot {
        phase: TimerPhase,
        phase_label: String,
        remaining_secs: u64,
        formatted_time: String,
        is_running: bool,
        completed_work_sessions: u64,
        progress_percent: u8,
        at: DateTime<Utc>,
    },
    CountdownConfigured {
        hours: u64,
        minutes: u64,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The plain countdown reached zero. It stops; nothing follows.
    CountdownFinished {
        initial_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownSnapshot {
        remaining_secs: u64,
        formatted_time: String,
        is_running: bool,
        progress_percent: u8,
        at: DateTime<Utc>,
    },
}
