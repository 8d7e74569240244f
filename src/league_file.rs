use std::borrow::Borrow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AggregateError;
use crate::events::{EventRecord, GameId, TeamId};
use crate::match_result::{MatchResult, MatchSides, compute_match_result_from_records};
use crate::point_rules::PointRuleTable;

/// A league export: optional point rules plus every scheduled game with its events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueFile {
    #[serde(default)]
    pub rules: Option<PointRuleTable>,
    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub game_id: GameId,
    pub host_team_id: TeamId,
    pub guest_team_id: TeamId,
    pub scheduled_start: DateTime<Utc>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl ScheduledGame {
    pub fn sides(&self) -> MatchSides {
        MatchSides::new(
            self.game_id.clone(),
            self.host_team_id.clone(),
            self.guest_team_id.clone(),
        )
    }

    /// Recompute this game's result from its current event set.
    pub fn recompute(&self, now: DateTime<Utc>) -> Result<MatchResult, AggregateError> {
        compute_match_result_from_records(&self.events, &self.sides(), self.scheduled_start, now)
    }
}

/// Season/phase/group/competition selector. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub season: Option<String>,
    pub phase: Option<String>,
    pub group: Option<String>,
    pub competition: Option<String>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.season.is_none()
            && self.phase.is_none()
            && self.group.is_none()
            && self.competition.is_none()
    }

    pub fn matches(&self, game: &ScheduledGame) -> bool {
        tag_matches(&self.season, &game.season)
            && tag_matches(&self.phase, &game.phase)
            && tag_matches(&self.group, &game.group)
            && tag_matches(&self.competition, &game.competition)
    }
}

fn tag_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.as_deref() == Some(w.as_str()),
    }
}

impl LeagueFile {
    pub fn games_in<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a ScheduledGame> + 'a {
        self.games.iter().filter(move |g| scope.matches(g))
    }
}

pub fn load_league_file(path: &Path) -> Result<LeagueFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read league file {}", path.display()))?;
    parse_league_json(&raw).with_context(|| format!("parse league file {}", path.display()))
}

pub fn parse_league_json(raw: &str) -> Result<LeagueFile> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(LeagueFile::default());
    }
    let mut league: LeagueFile = serde_json::from_str(trimmed).context("invalid league json")?;
    // Events nested under a game default to that game's id.
    for game in &mut league.games {
        for event in &mut game.events {
            if event.game_id.is_empty() {
                event.game_id = game.game_id.clone();
            }
        }
    }
    Ok(league)
}

/// Recompute every game in parallel, keeping input order.
///
/// When several games fail, the error of the earliest one is returned.
pub fn recompute_all<G>(games: &[G], now: DateTime<Utc>) -> Result<Vec<MatchResult>, AggregateError>
where
    G: Borrow<ScheduledGame> + Sync,
{
    let results: Vec<Result<MatchResult, AggregateError>> = games
        .par_iter()
        .map(|game| {
            let game: &ScheduledGame = game.borrow();
            game.recompute(now)
        })
        .collect();
    results.into_iter().collect()
}
