//! Statistics engine for a sports league: folds per-game event records into
//! match results and match results into standings.

pub mod cli_args;
pub mod error;
pub mod events;
pub mod fake_league;
pub mod league_file;
pub mod match_result;
pub mod point_rules;
pub mod standings;
pub mod term_log;

pub use error::AggregateError;
pub use events::{EventRecord, EventType, GameEvent, Side};
pub use match_result::{
    MatchResult, MatchSides, MatchStatus, PeriodCounts, SideCounts, TypeCounts,
    compute_match_result, compute_match_result_from_records, validate_event_records,
};
pub use point_rules::PointRuleTable;
pub use standings::{TeamStanding, compute_standings, rank_standings, rank_standings_with_tiebreak};
