use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

pub const WIN_POINTS_ENV: &str = "LEAGUE_WIN_POINTS";
pub const LOSS_POINTS_ENV: &str = "LEAGUE_LOSS_POINTS";
pub const DRAW_POINTS_ENV: &str = "LEAGUE_DRAW_POINTS";

/// Points awarded per outcome, configured at league level.
///
/// `loss_points` is *subtracted* from a team's total on every loss; see
/// [`crate::standings::compute_standings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRuleTable {
    pub win_points: i64,
    pub loss_points: i64,
    pub draw_points: i64,
}

impl Default for PointRuleTable {
    fn default() -> Self {
        Self {
            win_points: 2,
            loss_points: 0,
            draw_points: 1,
        }
    }
}

impl PointRuleTable {
    pub fn new(win_points: i64, loss_points: i64, draw_points: i64) -> Self {
        Self {
            win_points,
            loss_points,
            draw_points,
        }
    }

    /// Defaults overridden by `LEAGUE_WIN_POINTS`, `LEAGUE_LOSS_POINTS` and
    /// `LEAGUE_DRAW_POINTS` when they hold integers.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        Self {
            win_points: points_var(&lookup, WIN_POINTS_ENV, d.win_points),
            loss_points: points_var(&lookup, LOSS_POINTS_ENV, d.loss_points),
            draw_points: points_var(&lookup, DRAW_POINTS_ENV, d.draw_points),
        }
    }

    /// Rules for a run: an explicit rules file wins, then the league's own
    /// table, then [`PointRuleTable::from_env`].
    pub fn resolve(
        rules_file: Option<&Path>,
        league_rules: Option<PointRuleTable>,
    ) -> Result<Self> {
        Self::resolve_with(rules_file, league_rules, |key| env::var(key).ok())
    }

    fn resolve_with(
        rules_file: Option<&Path>,
        league_rules: Option<PointRuleTable>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(path) = rules_file {
            return Self::from_file(path);
        }
        if let Some(rules) = league_rules {
            return Ok(rules);
        }
        Ok(Self::from_lookup(lookup))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read point rules {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse point rules {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw.trim()).context("invalid point rules json")
    }
}

fn points_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: i64) -> i64 {
    let Some(raw) = lookup(key) else {
        return fallback;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            warn!("{key}={trimmed:?} is not an integer, using {fallback}");
            fallback
        }
    }
}
