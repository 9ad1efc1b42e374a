pub mod config;
pub mod countdown;
pub mod pomodoro;
pub mod stats;
