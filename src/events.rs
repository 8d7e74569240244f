use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AggregateError;

pub type TeamId = String;
pub type GameId = String;
pub type EventId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    Penalty,
    PenaltyShot,
    Save,
    FaceOff,
    Injury,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Goal,
        EventType::Penalty,
        EventType::PenaltyShot,
        EventType::Save,
        EventType::FaceOff,
        EventType::Injury,
    ];

    /// Parse an externally supplied type code.
    ///
    /// Matching ignores case and the separators `_`, `-` and space, so
    /// `"PENALTY_SHOT"`, `"penaltyShot"` and `"penalty shot"` all resolve to
    /// [`EventType::PenaltyShot`].
    pub fn from_code(raw: &str) -> Option<EventType> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "goal" => Some(EventType::Goal),
            "penalty" => Some(EventType::Penalty),
            "penaltyshot" => Some(EventType::PenaltyShot),
            "save" => Some(EventType::Save),
            "faceoff" => Some(EventType::FaceOff),
            "injury" => Some(EventType::Injury),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            EventType::Goal => "goal",
            EventType::Penalty => "penalty",
            EventType::PenaltyShot => "penalty_shot",
            EventType::Save => "save",
            EventType::FaceOff => "face_off",
            EventType::Injury => "injury",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Host or guest role of a team within one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Host,
    Guest,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Host => Side::Guest,
            Side::Guest => Side::Host,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_id: EventId,
    pub game_id: GameId,
    pub team_id: TeamId,
    pub event_type: EventType,
    #[serde(default, deserialize_with = "period_or_none")]
    pub period: Option<NonZeroU32>,
}

impl GameEvent {
    pub fn new(
        event_id: impl Into<EventId>,
        game_id: impl Into<GameId>,
        team_id: impl Into<TeamId>,
        event_type: EventType,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            game_id: game_id.into(),
            team_id: team_id.into(),
            event_type,
            period: None,
        }
    }

    /// Same event attributed to `period`. A zero period is treated as "no period".
    pub fn in_period(mut self, period: u32) -> Self {
        self.period = NonZeroU32::new(period);
        self
    }
}

/// An event as it arrives from the data API, with the type still a raw code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: EventId,
    #[serde(default)]
    pub game_id: GameId,
    pub team_id: TeamId,
    pub event_type: String,
    #[serde(default, deserialize_with = "period_or_none")]
    pub period: Option<NonZeroU32>,
}

/// Period 0 is read as "no period", the same as [`GameEvent::in_period`].
fn period_or_none<'de, D>(deserializer: D) -> Result<Option<NonZeroU32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.and_then(NonZeroU32::new))
}

impl TryFrom<&EventRecord> for GameEvent {
    type Error = AggregateError;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        let Some(event_type) = EventType::from_code(&record.event_type) else {
            return Err(AggregateError::UnknownEventType {
                event_id: record.event_id.clone(),
                code: record.event_type.clone(),
            });
        };
        Ok(GameEvent {
            event_id: record.event_id.clone(),
            game_id: record.game_id.clone(),
            team_id: record.team_id.clone(),
            event_type,
            period: record.period,
        })
    }
}
