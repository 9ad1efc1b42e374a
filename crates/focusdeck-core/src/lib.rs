//! # FocusDeck Core Library
//!
//! Core business logic for the FocusDeck session timers. The library is
//! CLI-first: every operation is available through a standalone CLI binary,
//! with any GUI shell being a thin rendering layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engines**: tick-driven state machines that own no threads and
//!   no clock - the caller runs a one-second scheduler and invokes `tick()`
//! - **Storage**: SQLite-based session storage plus a key-value store, and
//!   TOML-based configuration
//! - **Events**: every accepted command returns an [`Event`] describing the
//!   transition, so callers observe state changes without an event bus
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: Work/ShortBreak/LongBreak phase-cycling countdown
//! - [`CountdownTimer`]: plain single-shot countdown
//! - [`Database`]: session records, statistics, kv store
//! - [`Config`]: application configuration

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use storage::{Config, Database, SessionRecord, Stats};
pub use timer::{
    format_clock, CountdownSetting, CountdownTimer, PhaseDurations, PomodoroTimer, TimerPhase,
};
