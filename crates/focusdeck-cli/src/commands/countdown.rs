use clap::Subcommand;
use focusdeck_core::error::Result;
use focusdeck_core::storage::Database;
use focusdeck_core::{Config, CountdownSetting, CountdownTimer};

const ENGINE_KEY: &str = "countdown_timer";
/// Only the chosen duration is durable; running state is never part of it.
const DURATION_KEY: &str = "countdown_duration";

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Set the countdown duration (rejected while running)
    Set {
        #[arg(long, default_value = "0")]
        hours: u64,
        #[arg(long)]
        minutes: u64,
    },
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
    /// Stop and restore the configured duration
    Reset,
    /// Discard the timer and rebuild it from the saved duration
    New,
    /// Print the current timer state as JSON
    Status,
}

fn saved_setting(db: &Database) -> Option<CountdownSetting> {
    let json = db.kv_get(DURATION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn fresh_engine(db: &Database) -> CountdownTimer {
    match saved_setting(db) {
        Some(setting) => CountdownTimer::new(setting),
        None => Config::load_or_default().countdown_timer(),
    }
}

fn load_engine(db: &Database) -> CountdownTimer {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<CountdownTimer>(&json) {
            return engine;
        }
    }
    fresh_engine(db)
}

fn save_engine(db: &Database, engine: &CountdownTimer) -> Result<()> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: CountdownAction) -> Result<()> {
    let db = Database::open()?;
    let mut engine = load_engine(&db);

    match action {
        CountdownAction::Set { hours, minutes } => {
            let setting = CountdownSetting { hours, minutes }.clamped();
            match engine.set_duration(setting) {
                Some(event) => {
                    db.kv_set(DURATION_KEY, &serde_json::to_string(&setting)?)?;
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                None => {
                    eprintln!("cannot change the duration while the timer is running");
                    std::process::exit(1);
                }
            }
        }
        CountdownAction::Start => match engine.start() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        CountdownAction::Pause => match engine.pause() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        CountdownAction::Toggle => match engine.toggle() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
        },
        CountdownAction::Tick { seconds } => {
            for _ in 0..seconds {
                if let Some(event) = engine.tick() {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        CountdownAction::Reset => {
            engine.reset();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        CountdownAction::New => {
            engine = fresh_engine(&db);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        CountdownAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
