use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};

use league_stats::cli_args::{flag_value, has_flag, positional};
use league_stats::fake_league::generate_league;
use league_stats::league_file::{Scope, load_league_file, recompute_all};
use league_stats::{
    MatchResult, PointRuleTable, TeamStanding, compute_standings, rank_standings,
    rank_standings_with_tiebreak, term_log,
};

const DEFAULT_LEAGUE_FILE: &str = "tests/fixtures/league.json";
const VALUE_FLAGS: &[&str] = &[
    "--season",
    "--phase",
    "--group",
    "--competition",
    "--rules",
];

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    term_log::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let league = if has_flag(&args, "--demo") {
        generate_league(8, Utc::now() - chrono::Duration::days(60), 2026)
    } else {
        let path = positional(&args, VALUE_FLAGS)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEAGUE_FILE));
        load_league_file(&path)?
    };

    let rules_file = flag_value(&args, "--rules").map(PathBuf::from);
    let rules = PointRuleTable::resolve(rules_file.as_deref(), league.rules)?;
    let scope = Scope {
        season: flag_value(&args, "--season"),
        phase: flag_value(&args, "--phase"),
        group: flag_value(&args, "--group"),
        competition: flag_value(&args, "--competition"),
    };

    let games = league.games_in(&scope).collect::<Vec<_>>();
    if games.is_empty() {
        if scope.is_empty() {
            warn!("league has no games");
        } else {
            warn!("no games match scope {scope:?}");
        }
    }
    let results = recompute_all(&games, Utc::now()).context("recompute match results")?;

    let include_unplayed = has_flag(&args, "--include-unplayed");
    let mut counted: Vec<MatchResult> = Vec::with_capacity(results.len());
    let mut skipped = 0usize;
    for result in results {
        if !include_unplayed && !result.is_finished() {
            skipped += 1;
            continue;
        }
        result
            .check_invariants()
            .context("recomputed result failed validation")?;
        counted.push(result);
    }
    if skipped > 0 {
        info!("{skipped} unplayed games left out of the table");
    }

    let standings = compute_standings(&counted, &rules);
    let ranked = if has_flag(&args, "--tiebreak") {
        rank_standings_with_tiebreak(standings)
    } else {
        rank_standings(standings)
    };

    println!(
        "Games: {}  Rules: win +{} / draw +{} / loss -{}",
        counted.len(),
        rules.win_points,
        rules.draw_points,
        rules.loss_points
    );
    print_table(&ranked);
    Ok(())
}

fn print_table(rows: &[TeamStanding]) {
    println!(
        "{:>3}  {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>5} {:>5}",
        "#", "Team", "GP", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for (pos, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+5} {:>5}",
            pos + 1,
            row.team_id,
            row.games_played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_scored,
            row.goals_allowed,
            row.goal_difference(),
            row.points
        );
    }
}
