//! Plain single-phase countdown.
//!
//! Same tick contract as the Pomodoro engine but with no phase cycling and
//! no completion counter: reaching zero simply stops.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::format_clock;
use super::pomodoro::progress_percent;
use crate::events::Event;

/// A user-chosen countdown duration as entered: hours and minutes.
///
/// This is the only piece of the plain timer that survives a reload; it is
/// persisted by the caller through the key-value store, never by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSetting {
    pub hours: u64,
    pub minutes: u64,
}

impl CountdownSetting {
    /// Clamp to the input ranges the timer accepts: hours 0..=23,
    /// minutes 0..=59.
    pub fn clamped(self) -> Self {
        Self {
            hours: self.hours.min(23),
            minutes: self.minutes.min(59),
        }
    }

    pub fn total_secs(self) -> u64 {
        let c = self.clamped();
        c.hours * 3600 + c.minutes * 60
    }
}

impl Default for CountdownSetting {
    /// Five minutes.
    fn default() -> Self {
        Self { hours: 0, minutes: 5 }
    }
}

/// Single-shot countdown timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    initial_secs: u64,
    remaining_secs: u64,
    is_running: bool,
}

impl CountdownTimer {
    pub fn new(setting: CountdownSetting) -> Self {
        let initial_secs = setting.total_secs();
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.initial_secs, self.remaining_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            remaining_secs: self.remaining_secs,
            formatted_time: self.formatted_time(),
            is_running: self.is_running,
            progress_percent: self.progress_percent(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the configured duration and reset to it, paused.
    /// Rejected while running, like phase selection on the Pomodoro timer.
    pub fn set_duration(&mut self, setting: CountdownSetting) -> Option<Event> {
        if self.is_running {
            return None;
        }
        let clamped = setting.clamped();
        self.initial_secs = clamped.total_secs();
        self.remaining_secs = self.initial_secs;
        Some(Event::CountdownConfigured {
            hours: clamped.hours,
            minutes: clamped.minutes,
            at: Utc::now(),
        })
    }

    /// No-op when already running or at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.remaining_secs == 0 {
            return None;
        }
        self.is_running = true;
        Some(Event::CountdownStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// One elapsed second. Reaching zero stops the timer; there is no
    /// follow-on transition.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.is_running = false;
        Some(Event::CountdownFinished {
            initial_secs: self.initial_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.is_running = false;
        self.remaining_secs = self.initial_secs;
        Some(Event::CountdownReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(CountdownSetting::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_minutes() {
        let timer = CountdownTimer::default();
        assert_eq!(timer.remaining_secs(), 300);
        assert_eq!(timer.formatted_time(), "05:00");
        assert!(!timer.is_running());
    }

    #[test]
    fn two_minutes_run_to_completion() {
        let mut timer = CountdownTimer::new(CountdownSetting { hours: 0, minutes: 2 });
        timer.start();
        let mut finished = 0;
        for _ in 0..125 {
            if let Some(Event::CountdownFinished { initial_secs, .. }) = timer.tick() {
                finished += 1;
                assert_eq!(initial_secs, 120);
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.progress_percent(), 100);
    }

    #[test]
    fn restart_at_zero_is_rejected() {
        let mut timer = CountdownTimer::new(CountdownSetting { hours: 0, minutes: 1 });
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.start().is_none());
        assert!(!timer.is_running());
    }

    #[test]
    fn reset_restores_configured_duration() {
        let mut timer = CountdownTimer::new(CountdownSetting { hours: 1, minutes: 30 });
        timer.start();
        timer.tick();
        timer.tick();
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 90 * 60);
        assert_eq!(timer.formatted_time(), "01:30:00");
    }

    #[test]
    fn set_duration_rejected_while_running() {
        let mut timer = CountdownTimer::default();
        timer.start();
        assert!(timer
            .set_duration(CountdownSetting { hours: 0, minutes: 10 })
            .is_none());
        assert_eq!(timer.initial_secs(), 300);
    }

    #[test]
    fn setting_clamps_input_ranges() {
        let s = CountdownSetting { hours: 99, minutes: 600 }.clamped();
        assert_eq!(s, CountdownSetting { hours: 23, minutes: 59 });
        assert_eq!(s.total_secs(), 23 * 3600 + 59 * 60);
    }

    #[test]
    fn zero_duration_never_runs() {
        let mut timer = CountdownTimer::new(CountdownSetting { hours: 0, minutes: 0 });
        assert!(timer.start().is_none());
        assert!(timer.tick().is_none());
        assert_eq!(timer.progress_percent(), 0);
    }

    #[test]
    fn toggle_flips_running() {
        let mut timer = CountdownTimer::default();
        timer.toggle();
        assert!(timer.is_running());
        timer.toggle();
        assert!(!timer.is_running());
    }
}
