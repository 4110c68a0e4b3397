//! Match-history analytics: global totals and per-player records.

use crate::models::Match;
use serde::Serialize;
use std::collections::HashMap;

/// Totals across every archived match.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_matches: usize,
    pub total_rounds: usize,
    /// 0.0 when there is no history.
    pub avg_rounds_per_match: f64,
    pub unique_players: usize,
}

/// One player's record, keyed by name since ids are scoped to a single match.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub matches_played: u32,
    pub wins: u32,
    /// Percentage, 0-100.
    pub win_rate: f64,
    pub avg_final_score: f64,
    pub total_rejoins: u32,
    /// Lowest final score.
    pub best_score: i32,
}

pub fn global_stats(history: &[Match]) -> GlobalStats {
    let total_matches = history.len();
    let total_rounds: usize = history.iter().map(|m| m.rounds.len()).sum();
    let avg_rounds_per_match = if total_matches > 0 {
        total_rounds as f64 / total_matches as f64
    } else {
        0.0
    };
    GlobalStats {
        total_matches,
        total_rounds,
        avg_rounds_per_match,
        unique_players: player_stats(history).len(),
    }
}

/// Per-name records, most wins first, then lowest average final score.
pub fn player_stats(history: &[Match]) -> Vec<PlayerRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (u32, u32, i64, u32, i32)> = HashMap::new();

    for m in history {
        for p in &m.players {
            let entry = totals.entry(p.name.clone()).or_insert_with(|| {
                order.push(p.name.clone());
                (0, 0, 0, 0, i32::MAX)
            });
            entry.0 += 1;
            if m.winner_player_id == Some(p.id) {
                entry.1 += 1;
            }
            entry.2 += i64::from(p.score);
            entry.3 += p.rejoin_count;
            entry.4 = entry.4.min(p.score);
        }
    }

    let mut records: Vec<PlayerRecord> = order
        .into_iter()
        .filter_map(|name| {
            let (played, wins, score_sum, rejoins, best) = totals.remove(&name)?;
            Some(PlayerRecord {
                name,
                matches_played: played,
                wins,
                win_rate: f64::from(wins) / f64::from(played) * 100.0,
                avg_final_score: score_sum as f64 / f64::from(played),
                total_rejoins: rejoins,
                best_score: best,
            })
        })
        .collect();

    records.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.avg_final_score.total_cmp(&b.avg_final_score))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerId};
    use chrono::Utc;
    use uuid::Uuid;

    fn finished(players: &[(&str, u64, i32)], winner: u64, rounds: usize) -> Match {
        let round = crate::models::Round {
            round_number: 1,
            scores: Vec::new(),
            timestamp: Utc::now(),
        };
        Match {
            id: Uuid::new_v4(),
            players: players
                .iter()
                .map(|&(name, id, score)| {
                    let mut p = Player::new(PlayerId(id), name);
                    p.score = score;
                    p
                })
                .collect(),
            rounds: vec![round; rounds],
            winner_player_id: Some(PlayerId(winner)),
            started_at: Utc::now(),
            finished_at: Some(Utc::now()),
        }
    }

    #[test]
    fn empty_history_has_zero_average() {
        let stats = global_stats(&[]);
        assert_eq!(stats.total_matches, 0);
        assert_eq!(stats.avg_rounds_per_match, 0.0);
        assert!(player_stats(&[]).is_empty());
    }

    #[test]
    fn records_aggregate_by_name() {
        let history = vec![
            finished(&[("Ana", 0, 40), ("Beto", 1, 120)], 0, 3),
            finished(&[("Ana", 2, 110), ("Beto", 3, 60)], 3, 4),
            finished(&[("Ana", 4, 20), ("Caro", 5, 130)], 4, 2),
        ];
        let stats = global_stats(&history);
        assert_eq!(stats.total_rounds, 9);
        assert_eq!(stats.avg_rounds_per_match, 3.0);
        assert_eq!(stats.unique_players, 3);

        let records = player_stats(&history);
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].wins, 2);
        assert_eq!(records[0].matches_played, 3);
        assert_eq!(records[0].best_score, 20);
        assert_eq!(records[1].name, "Beto");
        assert_eq!(records[1].win_rate, 50.0);
        assert_eq!(records[1].avg_final_score, 90.0);
        assert_eq!(records[2].name, "Caro");
        assert_eq!(records[2].wins, 0);
    }
}
