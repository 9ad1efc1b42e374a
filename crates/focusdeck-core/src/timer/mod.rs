mod countdown;
mod format;
mod phase;
mod pomodoro;

pub use countdown::{CountdownSetting, CountdownTimer};
pub use format::format_clock;
pub use phase::{PhaseDurations, TimerPhase};
pub use pomodoro::{PomodoroTimer, DEFAULT_SESSIONS_BEFORE_LONG_BREAK};
