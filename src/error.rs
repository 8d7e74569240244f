use thiserror::Error;

/// Per-event and per-result validation failures raised by the aggregators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("event {event_id} in game {game_id} references team {team_id}, which is neither host nor guest")]
    MismatchedTeam {
        game_id: String,
        event_id: String,
        team_id: String,
    },

    #[error("event {event_id} has unknown event type code {code:?}")]
    UnknownEventType { event_id: String, code: String },

    #[error("match result {game_id} is inconsistent: {reason}")]
    InconsistentResult { game_id: String, reason: String },
}

impl AggregateError {
    /// Id of the offending event, when the failure is tied to a single event.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            AggregateError::MismatchedTeam { event_id, .. } => Some(event_id),
            AggregateError::UnknownEventType { event_id, .. } => Some(event_id),
            AggregateError::InconsistentResult { .. } => None,
        }
    }
}
