use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::events::{Side, TeamId};
use crate::match_result::MatchResult;
use crate::point_rules::PointRuleTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_scored: u32,
    pub goals_allowed: u32,
    pub points: i64,
}

impl TeamStanding {
    pub fn new(team_id: impl Into<TeamId>) -> Self {
        Self {
            team_id: team_id.into(),
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            goals_scored: 0,
            goals_allowed: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_scored) - i64::from(self.goals_allowed)
    }

    fn record(&mut self, result: &MatchResult, side: Side, rules: &PointRuleTable) {
        let opp = side.opposite();
        self.games_played += 1;
        self.goals_scored += result.goals(side);
        self.goals_allowed += result.goals(opp);

        if result.won(side) {
            self.wins += 1;
            self.points = self.points.saturating_add(rules.win_points);
        }
        if result.won(opp) {
            self.losses += 1;
            // Loss points are taken off the total, not awarded.
            self.points = self.points.saturating_sub(rules.loss_points);
        }
        if result.draw {
            self.draws += 1;
            self.points = self.points.saturating_add(rules.draw_points);
        }
    }
}

/// Fold match results into one standing per team.
///
/// Entries are created the first time a team is seen and returned in that
/// order. Callers choose which results belong to the scope; nothing is
/// filtered here, including unplayed matches. Point totals saturate at the
/// `i64` bounds instead of overflowing.
pub fn compute_standings(results: &[MatchResult], rules: &PointRuleTable) -> Vec<TeamStanding> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<TeamStanding> = Vec::new();

    for result in results {
        for side in [Side::Host, Side::Guest] {
            let team_id = result.team(side);
            let idx = *index.entry(team_id).or_insert_with(|| {
                table.push(TeamStanding::new(team_id));
                table.len() - 1
            });
            table[idx].record(result, side, rules);
        }
    }

    debug!(
        "standings: {} results folded into {} teams",
        results.len(),
        table.len()
    );
    table
}

/// Order by points, highest first. Teams level on points keep their input order.
pub fn rank_standings(mut standings: Vec<TeamStanding>) -> Vec<TeamStanding> {
    standings.sort_by(|a, b| b.points.cmp(&a.points));
    standings
}

/// Points, then goal difference, then goals scored, all descending.
///
/// The tie-breaks go beyond plain [`rank_standings`]; full ties keep input order.
pub fn rank_standings_with_tiebreak(mut standings: Vec<TeamStanding>) -> Vec<TeamStanding> {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference().cmp(&a.goal_difference()))
            .then(b.goals_scored.cmp(&a.goals_scored))
    });
    standings
}

#[cfg(test)]
mod tests {
    use super::{TeamStanding, rank_standings, rank_standings_with_tiebreak};

    fn standing(id: &str, points: i64, scored: u32, allowed: u32) -> TeamStanding {
        TeamStanding {
            points,
            goals_scored: scored,
            goals_allowed: allowed,
            ..TeamStanding::new(id)
        }
    }

    #[test]
    fn ranking_is_stable_on_equal_points() {
        let ranked = rank_standings(vec![
            standing("A", 3, 0, 5),
            standing("B", 6, 1, 1),
            standing("C", 3, 9, 0),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.team_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn tiebreak_uses_goal_difference_then_goals_scored() {
        let ranked = rank_standings_with_tiebreak(vec![
            standing("A", 3, 2, 2),
            standing("B", 3, 4, 1),
            standing("C", 3, 6, 3),
            standing("D", 4, 0, 0),
            standing("E", 3, 2, 2),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.team_id.as_str()).collect();
        assert_eq!(ids, vec!["D", "C", "B", "A", "E"]);
    }

    #[test]
    fn goal_difference_can_be_negative() {
        assert_eq!(standing("A", 0, 1, 4).goal_difference(), -3);
    }
}
