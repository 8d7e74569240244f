use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::AggregateError;
use crate::events::{EventRecord, EventType, GameEvent, GameId, Side, TeamId};

/// One counter per event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeCounts {
    pub goal: u32,
    pub penalty: u32,
    pub penalty_shot: u32,
    pub save: u32,
    pub face_off: u32,
    pub injury: u32,
}

impl TypeCounts {
    pub fn get(&self, kind: EventType) -> u32 {
        match kind {
            EventType::Goal => self.goal,
            EventType::Penalty => self.penalty,
            EventType::PenaltyShot => self.penalty_shot,
            EventType::Save => self.save,
            EventType::FaceOff => self.face_off,
            EventType::Injury => self.injury,
        }
    }

    fn slot_mut(&mut self, kind: EventType) -> &mut u32 {
        match kind {
            EventType::Goal => &mut self.goal,
            EventType::Penalty => &mut self.penalty,
            EventType::PenaltyShot => &mut self.penalty_shot,
            EventType::Save => &mut self.save,
            EventType::FaceOff => &mut self.face_off,
            EventType::Injury => &mut self.injury,
        }
    }

    pub fn total(&self) -> u32 {
        EventType::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

/// Per-side, per-type counters for a match or a single period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideCounts {
    pub host: TypeCounts,
    pub guest: TypeCounts,
}

impl SideCounts {
    pub fn side(&self, side: Side) -> &TypeCounts {
        match side {
            Side::Host => &self.host,
            Side::Guest => &self.guest,
        }
    }

    pub fn get(&self, side: Side, kind: EventType) -> u32 {
        self.side(side).get(kind)
    }

    pub fn both(&self, kind: EventType) -> u32 {
        self.host.get(kind) + self.guest.get(kind)
    }

    fn bump(&mut self, side: Side, kind: EventType) {
        let counts = match side {
            Side::Host => &mut self.host,
            Side::Guest => &mut self.guest,
        };
        *counts.slot_mut(kind) += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodCounts {
    pub period: u32,
    pub counts: SideCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotPlayed,
    Finished,
}

/// Identity of one match: which team hosts and which one visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSides {
    pub game_id: GameId,
    pub host_team_id: TeamId,
    pub guest_team_id: TeamId,
}

impl MatchSides {
    pub fn new(
        game_id: impl Into<GameId>,
        host_team_id: impl Into<TeamId>,
        guest_team_id: impl Into<TeamId>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            host_team_id: host_team_id.into(),
            guest_team_id: guest_team_id.into(),
        }
    }

    /// Side a team plays on in this match, if it plays at all.
    ///
    /// Host is checked first, so a match whose host and guest share an id
    /// attributes every event to the host.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if team_id == self.host_team_id {
            Some(Side::Host)
        } else if team_id == self.guest_team_id {
            Some(Side::Guest)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Host => &self.host_team_id,
            Side::Guest => &self.guest_team_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub game_id: GameId,
    pub host_team_id: TeamId,
    pub guest_team_id: TeamId,
    pub counts: SideCounts,
    pub periods: Vec<PeriodCounts>,
    pub host_goals: u32,
    pub guest_goals: u32,
    pub host_win: bool,
    pub guest_win: bool,
    pub draw: bool,
    pub status: MatchStatus,
}

impl MatchResult {
    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Host => self.host_goals,
            Side::Guest => self.guest_goals,
        }
    }

    pub fn won(&self, side: Side) -> bool {
        match side {
            Side::Host => self.host_win,
            Side::Guest => self.guest_win,
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Host => &self.host_team_id,
            Side::Guest => &self.guest_team_id,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Verify the outcome flags and goal totals agree with the counters.
    pub fn check_invariants(&self) -> Result<(), AggregateError> {
        let inconsistent = |reason: String| AggregateError::InconsistentResult {
            game_id: self.game_id.clone(),
            reason,
        };

        let flags = [self.host_win, self.guest_win, self.draw]
            .iter()
            .filter(|f| **f)
            .count();
        if flags != 1 {
            return Err(inconsistent(format!(
                "{flags} outcome flags set (host_win={}, guest_win={}, draw={})",
                self.host_win, self.guest_win, self.draw
            )));
        }
        if self.host_goals != self.counts.host.goal || self.guest_goals != self.counts.guest.goal {
            return Err(inconsistent(format!(
                "goals {}-{} disagree with goal counters {}-{}",
                self.host_goals, self.guest_goals, self.counts.host.goal, self.counts.guest.goal
            )));
        }
        let expected = classify(self.host_goals, self.guest_goals);
        if expected != (self.host_win, self.guest_win, self.draw) {
            return Err(inconsistent(format!(
                "outcome flags do not match score {}-{}",
                self.host_goals, self.guest_goals
            )));
        }
        for side in [Side::Host, Side::Guest] {
            for kind in EventType::ALL {
                let per_period: u32 = self.periods.iter().map(|p| p.counts.get(side, kind)).sum();
                if per_period > self.counts.get(side, kind) {
                    return Err(inconsistent(format!(
                        "period {kind} count {per_period} exceeds match count {} for {side:?}",
                        self.counts.get(side, kind)
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Fold one match's events into a fresh [`MatchResult`].
///
/// Every counter starts at zero on each call, so repeated calls over the same
/// events yield equal results. Fails on the first event whose team is neither
/// host nor guest; no partial result is returned.
pub fn compute_match_result(
    events: &[GameEvent],
    game: &MatchSides,
    scheduled_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<MatchResult, AggregateError> {
    let mut counts = SideCounts::default();
    let mut periods: Vec<PeriodCounts> = Vec::new();

    for event in events {
        let Some(side) = game.side_of(&event.team_id) else {
            return Err(AggregateError::MismatchedTeam {
                game_id: game.game_id.clone(),
                event_id: event.event_id.clone(),
                team_id: event.team_id.clone(),
            });
        };
        if !event.game_id.is_empty() && event.game_id != game.game_id {
            warn!(
                "event {} belongs to game {} but is being folded into {}",
                event.event_id, event.game_id, game.game_id
            );
        }

        counts.bump(side, event.event_type);

        if let Some(period) = event.period {
            let period = period.get();
            let idx = match periods.iter().position(|p| p.period == period) {
                Some(idx) => idx,
                None => {
                    periods.push(PeriodCounts {
                        period,
                        counts: SideCounts::default(),
                    });
                    periods.len() - 1
                }
            };
            periods[idx].counts.bump(side, event.event_type);
        }
    }

    periods.sort_by_key(|p| p.period);

    let host_goals = counts.host.goal;
    let guest_goals = counts.guest.goal;
    let (host_win, guest_win, draw) = classify(host_goals, guest_goals);
    let status = if now > scheduled_start {
        MatchStatus::Finished
    } else {
        MatchStatus::NotPlayed
    };

    debug!(
        "game {}: {} events folded, {}-{} ({:?})",
        game.game_id,
        events.len(),
        host_goals,
        guest_goals,
        status
    );

    Ok(MatchResult {
        game_id: game.game_id.clone(),
        host_team_id: game.host_team_id.clone(),
        guest_team_id: game.guest_team_id.clone(),
        counts,
        periods,
        host_goals,
        guest_goals,
        host_win,
        guest_win,
        draw,
        status,
    })
}

/// Same as [`compute_match_result`], starting from wire records.
///
/// Type codes are resolved for every record before any counting, so an
/// unknown code fails the whole match.
pub fn compute_match_result_from_records(
    records: &[EventRecord],
    game: &MatchSides,
    scheduled_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<MatchResult, AggregateError> {
    let events = records
        .iter()
        .map(GameEvent::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    compute_match_result(&events, game, scheduled_start, now)
}

/// Report every per-event problem in `records` instead of stopping at the first.
pub fn validate_event_records(records: &[EventRecord], game: &MatchSides) -> Vec<AggregateError> {
    let mut errors = Vec::new();
    for record in records {
        if EventType::from_code(&record.event_type).is_none() {
            errors.push(AggregateError::UnknownEventType {
                event_id: record.event_id.clone(),
                code: record.event_type.clone(),
            });
        }
        if game.side_of(&record.team_id).is_none() {
            errors.push(AggregateError::MismatchedTeam {
                game_id: game.game_id.clone(),
                event_id: record.event_id.clone(),
                team_id: record.team_id.clone(),
            });
        }
    }
    errors
}

/// (host_win, guest_win, draw) for a final score.
fn classify(host_goals: u32, guest_goals: u32) -> (bool, bool, bool) {
    if host_goals > guest_goals {
        (true, false, false)
    } else if guest_goals > host_goals {
        (false, true, false)
    } else {
        (false, false, true)
    }
}
