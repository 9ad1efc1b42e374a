use serde::{Deserialize, Serialize};

/// Phase of a Pomodoro session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerPhase {
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Work => "Focus Time",
            TimerPhase::ShortBreak => "Short Break",
            TimerPhase::LongBreak => "Long Break",
        }
    }
}

/// Nominal phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl PhaseDurations {
    /// Durations in whole minutes, the granularity the config file uses.
    pub fn from_minutes(work_min: u64, short_break_min: u64, long_break_min: u64) -> Self {
        Self {
            work_secs: work_min.saturating_mul(60),
            short_break_secs: short_break_min.saturating_mul(60),
            long_break_secs: long_break_min.saturating_mul(60),
        }
    }

    pub fn nominal(&self, phase: TimerPhase) -> u64 {
        match phase {
            TimerPhase::Work => self.work_secs,
            TimerPhase::ShortBreak => self.short_break_secs,
            TimerPhase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for PhaseDurations {
    /// The classic 25/5/15 split.
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
        }
    }
}
