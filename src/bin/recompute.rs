use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use log::warn;

use league_stats::cli_args::{flag_value, positional};
use league_stats::league_file::{load_league_file, recompute_all};
use league_stats::{term_log, validate_event_records};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    term_log::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let path = positional(&args, &["--game"])
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/league.json"));
    let league = load_league_file(&path)?;

    let wanted = flag_value(&args, "--game");
    let games = league
        .games
        .iter()
        .filter(|g| wanted.as_deref().is_none_or(|id| g.game_id == id))
        .collect::<Vec<_>>();
    if let Some(id) = wanted.as_deref() {
        if games.is_empty() {
            return Err(anyhow!("game {id} not found in {}", path.display()));
        }
    }

    // Surface every bad record before failing on the first one.
    let mut problems = 0usize;
    for game in &games {
        for err in validate_event_records(&game.events, &game.sides()) {
            warn!("{err}");
            problems += 1;
        }
    }
    if problems > 0 {
        warn!("{problems} invalid event records");
    }

    let results = recompute_all(&games, Utc::now()).context("recompute match results")?;
    let json = serde_json::to_string_pretty(&results).context("serialize match results")?;
    println!("{json}");
    Ok(())
}
