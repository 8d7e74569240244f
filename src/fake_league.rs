use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::events::{EventRecord, EventType};
use crate::league_file::{LeagueFile, ScheduledGame};

const PERIODS: u32 = 3;

/// Double round-robin between `teams` synthetic clubs, one game per day from `first_day`.
///
/// The same seed always produces the same league.
pub fn generate_league(teams: usize, first_day: DateTime<Utc>, seed: u64) -> LeagueFile {
    let mut rng = StdRng::seed_from_u64(seed);
    let team_ids: Vec<String> = (1..=teams).map(|n| format!("T{n:02}")).collect();

    let mut games = Vec::new();
    for (h, host) in team_ids.iter().enumerate() {
        for (g, guest) in team_ids.iter().enumerate() {
            if h == g {
                continue;
            }
            let game_id = format!("G{:04}", games.len() + 1);
            let scheduled_start = first_day + ChronoDuration::days(games.len() as i64);
            let events = random_events(&mut rng, &game_id, host, guest);
            games.push(ScheduledGame {
                game_id,
                host_team_id: host.clone(),
                guest_team_id: guest.clone(),
                scheduled_start,
                season: Some("demo".to_string()),
                phase: Some("regular".to_string()),
                group: Some(if h % 2 == 0 { "east" } else { "west" }.to_string()),
                competition: Some("league".to_string()),
                events,
            });
        }
    }

    LeagueFile { rules: None, games }
}

fn random_events(rng: &mut impl Rng, game_id: &str, host: &str, guest: &str) -> Vec<EventRecord> {
    let count = rng.gen_range(4..40);
    (0..count)
        .map(|n| {
            let team = if rng.gen_bool(0.5) { host } else { guest };
            let kind = match rng.gen_range(0..20) {
                0..=2 => EventType::Goal,
                3..=5 => EventType::Penalty,
                6 => EventType::PenaltyShot,
                7..=11 => EventType::Save,
                12..=18 => EventType::FaceOff,
                _ => EventType::Injury,
            };
            // Roughly one in ten events arrives without a period.
            let period = if rng.gen_bool(0.1) {
                None
            } else {
                std::num::NonZeroU32::new(rng.gen_range(1..=PERIODS))
            };
            EventRecord {
                event_id: format!("{game_id}-E{n:03}"),
                game_id: game_id.to_string(),
                team_id: team.to_string(),
                event_type: kind.code().to_string(),
                period,
            }
        })
        .collect()
}
