use chrono::{DateTime, TimeZone, Utc};

use league_stats::{
    AggregateError, EventRecord, EventType, GameEvent, MatchSides, MatchStatus, Side,
    compute_match_result, compute_match_result_from_records,
};

fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 19, 0, 0).unwrap()
}

fn after_kickoff() -> DateTime<Utc> {
    kickoff() + chrono::Duration::hours(3)
}

fn a_vs_b() -> MatchSides {
    MatchSides::new("g1", "A", "B")
}

fn goal(id: &str, team: &str) -> GameEvent {
    GameEvent::new(id, "g1", team, EventType::Goal)
}

#[test]
fn host_wins_two_one() {
    let events = vec![goal("e1", "A"), goal("e2", "A"), goal("e3", "B")];
    let result = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff())
        .expect("all events belong to the match");

    assert_eq!(result.host_goals, 2);
    assert_eq!(result.guest_goals, 1);
    assert!(result.host_win);
    assert!(!result.guest_win);
    assert!(!result.draw);
    assert_eq!(result.status, MatchStatus::Finished);
}

#[test]
fn guest_win_is_detected() {
    let events = vec![goal("e1", "B"), goal("e2", "B"), goal("e3", "A"), goal("e4", "B")];
    let result = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff()).unwrap();
    assert_eq!((result.host_goals, result.guest_goals), (1, 3));
    assert!(result.guest_win && !result.host_win && !result.draw);
}

#[test]
fn no_events_is_a_scoreless_draw() {
    let result = compute_match_result(&[], &a_vs_b(), kickoff(), after_kickoff()).unwrap();
    assert_eq!(result.host_goals, 0);
    assert_eq!(result.guest_goals, 0);
    assert!(result.draw);
    assert!(!result.host_win);
    assert!(!result.guest_win);
    assert!(result.periods.is_empty());
    assert_eq!(result.counts.host.total() + result.counts.guest.total(), 0);
}

#[test]
fn match_before_kickoff_is_not_played() {
    let before = kickoff() - chrono::Duration::minutes(5);
    let result = compute_match_result(&[goal("e1", "A")], &a_vs_b(), kickoff(), before).unwrap();
    assert_eq!(result.status, MatchStatus::NotPlayed);
    // Counters are still folded; the status only reflects the clock.
    assert_eq!(result.host_goals, 1);
}

#[test]
fn mismatched_team_fails_without_partial_result() {
    let events = vec![goal("e1", "A"), goal("e2", "C"), goal("e3", "B")];
    let err = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff()).unwrap_err();
    assert_eq!(
        err,
        AggregateError::MismatchedTeam {
            game_id: "g1".to_string(),
            event_id: "e2".to_string(),
            team_id: "C".to_string(),
        }
    );
}

#[test]
fn unknown_event_code_fails_from_records() {
    let records = vec![
        EventRecord {
            event_id: "e1".to_string(),
            game_id: "g1".to_string(),
            team_id: "A".to_string(),
            event_type: "goal".to_string(),
            period: None,
        },
        EventRecord {
            event_id: "e2".to_string(),
            game_id: "g1".to_string(),
            team_id: "B".to_string(),
            event_type: "icing".to_string(),
            period: None,
        },
    ];
    let err = compute_match_result_from_records(&records, &a_vs_b(), kickoff(), after_kickoff())
        .unwrap_err();
    assert!(matches!(err, AggregateError::UnknownEventType { ref code, .. } if code == "icing"));
}

#[test]
fn recompute_is_idempotent() {
    let events = vec![
        goal("e1", "A").in_period(1),
        GameEvent::new("e2", "g1", "B", EventType::Penalty).in_period(2),
        GameEvent::new("e3", "g1", "A", EventType::FaceOff),
        goal("e4", "B").in_period(1),
    ];
    let first = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff()).unwrap();
    let second = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn period_breakdown_counts_each_side() {
    let events = vec![
        GameEvent::new("e1", "g1", "A", EventType::Save).in_period(2),
        GameEvent::new("e2", "g1", "B", EventType::Save).in_period(2),
        GameEvent::new("e3", "g1", "B", EventType::Save).in_period(1),
        goal("e4", "A").in_period(2),
    ];
    let result = compute_match_result(&events, &a_vs_b(), kickoff(), after_kickoff()).unwrap();

    assert_eq!(result.periods.len(), 2);
    assert_eq!(result.periods[0].period, 1);
    assert_eq!(result.periods[0].counts.get(Side::Guest, EventType::Save), 1);
    assert_eq!(result.periods[1].period, 2);
    assert_eq!(result.periods[1].counts.get(Side::Host, EventType::Save), 1);
    assert_eq!(result.periods[1].counts.get(Side::Guest, EventType::Save), 1);
    assert_eq!(result.periods[1].counts.get(Side::Host, EventType::Goal), 1);
    assert_eq!(result.counts.both(EventType::Save), 3);
}

#[test]
fn result_serializes_with_snake_case_status() {
    let result = compute_match_result(&[], &a_vs_b(), kickoff(), after_kickoff()).unwrap();
    let json = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(json["status"], "finished");
    assert_eq!(json["counts"]["host"]["penalty_shot"], 0);
}
