use clap::{Subcommand, ValueEnum};
use focusdeck_core::error::Result;
use focusdeck_core::storage::Database;
use focusdeck_core::{Config, Event, PomodoroTimer, TimerPhase};

const ENGINE_KEY: &str = "pomodoro_timer";

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Pause when running, start when paused
    Toggle,
    /// Apply elapsed seconds (the one-second scheduler calls this)
    Tick {
        /// Seconds elapsed since the last tick
        #[arg(long, default_value = "1")]
        seconds: u64,
    },
    /// Abandon the current phase and move to the next
    Skip,
    /// Back to the top of the current phase
    Reset,
    /// Discard the timer and rebuild it from configuration, with the
    /// session count zeroed
    ResetAll,
    /// Jump to a phase (rejected while running)
    Phase {
        phase: PhaseArg,
    },
    /// Print the current timer state as JSON
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PhaseArg {
    Work,
    ShortBreak,
    LongBreak,
}

impl From<PhaseArg> for TimerPhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Work => TimerPhase::Work,
            PhaseArg::ShortBreak => TimerPhase::ShortBreak,
            PhaseArg::LongBreak => TimerPhase::LongBreak,
        }
    }
}

fn load_engine(db: &Database) -> PomodoroTimer {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<PomodoroTimer>(&json) {
            return engine;
        }
    }
    Config::load_or_default().pomodoro_timer()
}

fn save_engine(db: &Database, engine: &PomodoroTimer) -> Result<()> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

/// Record a completed phase in the session log. Storage trouble degrades to
/// a warning; the timer itself carries on.
fn record_completion(db: &Database, event: &Event) {
    if let Event::PhaseCompleted {
        completed,
        elapsed_secs,
        at,
        ..
    } = event
    {
        // Clamp: huge configured durations must not panic the Duration
        // constructor or the timestamp arithmetic.
        let elapsed = i64::try_from(*elapsed_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1_000);
        let started_at = at
            .checked_sub_signed(chrono::Duration::seconds(elapsed))
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
        if let Err(e) = db.record_session(*completed, *elapsed_secs, started_at, *at) {
            eprintln!("warning: failed to record session: {e}");
        }
    }
}

fn print_event(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: PomodoroAction) -> Result<()> {
    let db = Database::open()?;
    let mut engine = load_engine(&db);

    match action {
        PomodoroAction::Start => match engine.start() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        PomodoroAction::Pause => match engine.pause() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        PomodoroAction::Toggle => match engine.toggle() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        PomodoroAction::Tick { seconds } => {
            for _ in 0..seconds {
                if let Some(event) = engine.tick() {
                    record_completion(&db, &event);
                    print_event(&event)?;
                }
            }
            print_event(&engine.snapshot())?;
        }
        PomodoroAction::Skip => {
            if let Some(event) = engine.skip() {
                record_completion(&db, &event);
                print_event(&event)?;
            }
        }
        PomodoroAction::Reset => {
            engine.reset();
            print_event(&engine.snapshot())?;
        }
        PomodoroAction::ResetAll => {
            // Rebuild instead of resetting in place so duration and policy
            // changes made through `config set` take effect.
            engine = Config::load_or_default().pomodoro_timer();
            print_event(&engine.snapshot())?;
        }
        PomodoroAction::Phase { phase } => match engine.select_phase(phase.into()) {
            Some(event) => print_event(&event)?,
            None => {
                eprintln!("cannot switch phase while the timer is running");
                std::process::exit(1);
            }
        },
        PomodoroAction::Status => {
            print_event(&engine.snapshot())?;
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
