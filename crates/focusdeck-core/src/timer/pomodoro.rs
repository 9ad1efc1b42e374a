//! Pomodoro session engine.
//!
//! A tick-driven state machine. It owns no threads and no clock - the caller
//! runs a one-second scheduler and invokes [`PomodoroTimer::tick`] while the
//! timer is running.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//! ```
//!
//! Every Nth (default 4th) completed Work phase earns the long break; every
//! break leads back to Work. A completion pauses at the boundary unless the
//! auto-advance policy is enabled.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::format_clock;
use super::phase::{PhaseDurations, TimerPhase};
use crate::events::Event;

/// Completed work phases between long breaks, unless configured otherwise.
pub const DEFAULT_SESSIONS_BEFORE_LONG_BREAK: u64 = 4;

/// Pomodoro countdown and phase-cycling state machine.
///
/// Every operation is total: commands that are not valid in the current
/// state are ignored and return `None`. Accepted commands return the
/// [`Event`] describing what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    durations: PhaseDurations,
    sessions_before_long_break: u64,
    /// Start the next phase immediately on completion instead of pausing
    /// at the boundary.
    auto_advance: bool,
    phase: TimerPhase,
    remaining_secs: u64,
    is_running: bool,
    completed_work_sessions: u64,
}

impl PomodoroTimer {
    /// Fresh timer in the Work phase, paused, with the default policy
    /// (long break every 4th work session, no auto-advance).
    pub fn new(durations: PhaseDurations) -> Self {
        Self::with_policy(durations, DEFAULT_SESSIONS_BEFORE_LONG_BREAK, false)
    }

    /// Fresh timer with an explicit long-break cadence and advance policy.
    ///
    /// A cadence of 0 is treated as 1.
    pub fn with_policy(
        durations: PhaseDurations,
        sessions_before_long_break: u64,
        auto_advance: bool,
    ) -> Self {
        Self {
            durations,
            sessions_before_long_break: sessions_before_long_break.max(1),
            auto_advance,
            phase: TimerPhase::Work,
            remaining_secs: durations.nominal(TimerPhase::Work),
            is_running: false,
            completed_work_sessions: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions
    }

    /// Nominal duration of the current phase in seconds.
    pub fn nominal_secs(&self) -> u64 {
        self.durations.nominal(self.phase)
    }

    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// Elapsed share of the current phase, rounded, clamped to 0..=100.
    /// A zero-length phase reports 0.
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.nominal_secs(), self.remaining_secs)
    }

    /// Full state snapshot for the rendering layer.
    pub fn snapshot(&self) -> Event {
        Event::PomodoroSnapshot {
            phase: self.phase,
            phase_label: self.phase.label().to_string(),
            remaining_secs: self.remaining_secs,
            formatted_time: self.formatted_time(),
            is_running: self.is_running,
            completed_work_sessions: self.completed_work_sessions,
            progress_percent: self.progress_percent(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. No-op when already running or at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.remaining_secs == 0 {
            return None;
        }
        self.is_running = true;
        Some(Event::PomodoroStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause the countdown. No-op when not running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::PomodoroPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause when running, otherwise start (subject to the start guard).
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// One elapsed second. Ignored while paused. Reaching zero fires the
    /// phase-completion transition.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.is_running = false;
        Some(self.complete_phase(self.nominal_secs()))
    }

    /// Back to the top of the current phase, paused. The completed-session
    /// count is untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.is_running = false;
        self.remaining_secs = self.nominal_secs();
        Some(Event::PomodoroReset {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Back to a fresh Work phase with the session count zeroed.
    pub fn reset_all(&mut self) -> Option<Event> {
        self.is_running = false;
        self.phase = TimerPhase::Work;
        self.remaining_secs = self.nominal_secs();
        self.completed_work_sessions = 0;
        Some(Event::PomodoroReset {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Abandon the rest of the current phase and transition as if it had
    /// run down to zero. A skipped Work phase still counts as completed.
    pub fn skip(&mut self) -> Option<Event> {
        self.is_running = false;
        let elapsed = self.nominal_secs().saturating_sub(self.remaining_secs);
        Some(self.complete_phase(elapsed))
    }

    /// Jump to a phase directly. Rejected while running so an active
    /// countdown is never silently discarded.
    pub fn select_phase(&mut self, phase: TimerPhase) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.phase = phase;
        self.remaining_secs = self.nominal_secs();
        Some(Event::PhaseSelected {
            phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self, elapsed_secs: u64) -> Event {
        let completed = self.phase;
        let next = match completed {
            TimerPhase::Work => {
                self.completed_work_sessions += 1;
                if self.completed_work_sessions % self.sessions_before_long_break == 0 {
                    TimerPhase::LongBreak
                } else {
                    TimerPhase::ShortBreak
                }
            }
            TimerPhase::ShortBreak | TimerPhase::LongBreak => TimerPhase::Work,
        };
        self.phase = next;
        self.remaining_secs = self.durations.nominal(next);
        self.is_running = self.auto_advance && self.remaining_secs > 0;
        Event::PhaseCompleted {
            completed,
            elapsed_secs,
            next,
            completed_work_sessions: self.completed_work_sessions,
            auto_started: self.is_running,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

pub(crate) fn progress_percent(nominal_secs: u64, remaining_secs: u64) -> u8 {
    if nominal_secs == 0 {
        return 0;
    }
    let elapsed = nominal_secs.saturating_sub(remaining_secs);
    // Integer round-half-up of 100 * elapsed / nominal.
    let pct = (elapsed * 100 + nominal_secs / 2) / nominal_secs;
    pct.min(100) as u8
}
