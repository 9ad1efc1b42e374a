use chrono::{Duration, Utc};
use clap::Subcommand;
use focusdeck_core::error::Result;
use focusdeck_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
    /// Most recently completed sessions
    Recent {
        #[arg(long, default_value = "10")]
        limit: u64,
    },
    /// Delete session records older than the given age. This is the
    /// explicit sweep; nothing prunes automatically.
    Prune {
        #[arg(long)]
        older_than_hours: u64,
    },
}

pub fn run(action: StatsAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        StatsAction::Today => {
            let stats = db.stats_today()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::All => {
            let stats = db.stats_all()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent { limit } => {
            let sessions = db.recent_sessions(limit)?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        StatsAction::Prune { older_than_hours } => {
            // Clamp: an oversized horizon must not panic the Duration
            // constructor or the timestamp arithmetic. A horizon past the
            // representable range predates every record, so nothing matches.
            let hours = i64::try_from(older_than_hours)
                .unwrap_or(i64::MAX)
                .min(i64::MAX / 3_600_000);
            let cutoff = Utc::now()
                .checked_sub_signed(Duration::hours(hours))
                .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
            let removed = db.prune_completed_before(cutoff)?;
            println!("pruned {removed} session(s)");
        }
    }
    Ok(())
}
