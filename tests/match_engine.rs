//! Integration tests for the match engine: rounds, eliminations, winners, rejoins, resets.

use loba_counter::{
    MatchEngine, MatchError, MatchState, MemoryStore, Player, SettingsUpdate,
};

fn engine_with(names: &[&str]) -> MatchEngine<MemoryStore> {
    let mut engine = MatchEngine::load(MemoryStore::new());
    for name in names {
        engine.add_player(name).unwrap();
    }
    engine
}

fn scores(engine: &MatchEngine<MemoryStore>) -> Vec<i32> {
    engine.players().iter().map(|p| p.score).collect()
}

fn assert_elimination_invariant(players: &[Player]) {
    for p in players {
        assert_eq!(p.is_eliminated, p.score >= 101, "{} at {}", p.name, p.score);
    }
}

#[test]
fn add_player_preserves_order_and_increasing_ids() {
    let engine = engine_with(&["Ana", "Beto", "Caro"]);
    let names: Vec<_> = engine.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Beto", "Caro"]);
    let ids: Vec<_> = engine.players().iter().map(|p| p.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(engine.state(), MatchState::Open);
}

#[test]
fn round_applies_deltas_without_eliminating_at_100() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[50, 90, 95]).unwrap();
    let before = engine.rounds().len();

    let finished = engine.submit_round(&[10, 0, 5]).unwrap();
    assert!(finished.is_none());

    assert_eq!(scores(&engine), [60, 90, 100]);
    let totals: Vec<_> = engine.players().iter().map(|p| p.round_total).collect();
    assert_eq!(totals, [10, 0, 5]);
    assert_eq!(engine.rounds().len(), before + 1);
    let last = engine.rounds().last().unwrap();
    assert_eq!(last.round_number as usize, before + 1);
    assert!(last.scores.iter().all(|s| !s.eliminated_this_round));
    assert!(engine.players().iter().all(|p| !p.is_eliminated));
    assert!(!engine.is_game_over());
}

#[test]
fn single_survivor_wins_and_match_is_archived() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[20, 101, 30]).unwrap();
    assert!(!engine.is_game_over());

    let archived = engine.submit_round(&[5, 0, 80]).unwrap().cloned();
    assert_elimination_invariant(engine.players());
    assert!(engine.is_game_over());
    assert_eq!(engine.state(), MatchState::Finished);
    assert_eq!(engine.winner().unwrap().name, "Ana");

    let archived = archived.expect("finished match is returned");
    assert_eq!(archived.rounds.len(), 2);
    assert_eq!(archived.winner().unwrap().name, "Ana");
    assert!(archived.finished_at.is_some());
    assert!(archived.rounds[0].scores[1].eliminated_this_round);
    assert!(archived.rounds[1].scores[2].eliminated_this_round);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn everyone_out_lowest_score_wins() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[120, 105, 130]).unwrap();
    assert!(engine.is_game_over());
    let winner = engine.winner().unwrap();
    assert_eq!(winner.score, 105);
    assert_eq!(winner.name, "Beto");
}

#[test]
fn rejoin_takes_highest_active_score() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro", "Dani"]);
    engine.submit_round(&[40, 55, 30, 120]).unwrap();
    assert!(engine.can_rejoin(3));

    engine.rejoin_player(3).unwrap();
    let dani = &engine.players()[3];
    assert_eq!(dani.score, 55);
    assert_eq!(dani.round_total, 55);
    assert_eq!(dani.rejoin_count, 1);
    assert!(dani.rejoined_this_round);
    assert_elimination_invariant(engine.players());
}

#[test]
fn rejoin_flag_is_recorded_then_consumed() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[10, 20, 110]).unwrap();
    engine.rejoin_player(2).unwrap();

    engine.submit_round(&[1, 1, 1]).unwrap();
    let round = engine.rounds().last().unwrap();
    assert!(round.scores[2].rejoined_this_round);
    assert!(!round.scores[0].rejoined_this_round);
    assert!(engine.players().iter().all(|p| !p.rejoined_this_round));
}

#[test]
fn rejoin_when_everyone_is_out_takes_lowest_score() {
    let mut engine = engine_with(&["Ana", "Beto"]);
    engine.submit_round(&[110, 130]).unwrap();
    assert!(engine.is_game_over());

    engine.rejoin_player(1).unwrap();
    let beto = &engine.players()[1];
    assert_eq!(beto.score, 110);
    assert_eq!(beto.rejoin_count, 1);
    assert_elimination_invariant(engine.players());
}

#[test]
fn rejoin_can_reopen_a_finished_match() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[10, 120, 130]).unwrap();
    assert!(engine.is_game_over());
    assert_eq!(engine.history().len(), 1);

    engine.rejoin_player(1).unwrap();
    assert!(!engine.is_game_over());
    assert!(engine.winner().is_none());
    assert_eq!(engine.state(), MatchState::Open);

    // Finishing again replaces the archived snapshot of the same match.
    engine.submit_round(&[0, 200, 0]).unwrap();
    assert!(engine.is_game_over());
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history()[0].rounds.len(), 2);
}

#[test]
fn rejoin_disabled_is_a_no_op() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[10, 20, 110]).unwrap();
    engine.update_settings(SettingsUpdate {
        allow_rejoin: Some(false),
        ..Default::default()
    });
    assert!(!engine.can_rejoin(2));
    assert_eq!(engine.rejoin_player(2), Err(MatchError::RejoinDisabled));
    assert_eq!(engine.players()[2].score, 110);
    assert!(engine.players()[2].is_eliminated);
}

#[test]
fn reset_keeping_players_zeroes_everything() {
    let mut engine = engine_with(&["Ana", "Beto"]);
    engine.submit_round(&[30, 120]).unwrap();
    let old_ids: Vec<_> = engine.players().iter().map(|p| p.id).collect();
    let old_match = engine.session().match_id;

    engine.reset_game(true);
    let names: Vec<_> = engine.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Beto"]);
    for p in engine.players() {
        assert_eq!(p.score, 0);
        assert_eq!(p.round_total, 0);
        assert_eq!(p.rejoin_count, 0);
        assert!(!p.is_eliminated);
        assert!(!p.rejoined_this_round);
        assert!(!old_ids.contains(&p.id));
    }
    assert!(engine.rounds().is_empty());
    assert!(!engine.is_game_over());
    assert!(engine.session().match_id.is_some());
    assert_ne!(engine.session().match_id, old_match);
}

#[test]
fn restart_with_same_players_uses_fresh_ids() {
    let mut engine = engine_with(&["Ana", "Beto"]);
    engine.submit_round(&[10, 150]).unwrap();
    let old_ids: Vec<_> = engine.players().iter().map(|p| p.id).collect();

    engine.reset_game(false);
    assert_eq!(engine.state(), MatchState::Empty);
    assert!(engine.has_last_players());

    engine.restart_with_same_players().unwrap();
    let names: Vec<_> = engine.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Beto"]);
    assert!(engine.players().iter().all(|p| p.score == 0));
    assert!(engine.players().iter().all(|p| !old_ids.contains(&p.id)));
    assert!(engine.rounds().is_empty());
    assert!(!engine.is_game_over());
}

#[test]
fn invalid_operations_leave_state_untouched() {
    let mut engine = MatchEngine::load(MemoryStore::new());
    assert_eq!(engine.submit_round(&[1, 2]).unwrap_err(), MatchError::NoPlayers);
    assert_eq!(
        engine.restart_with_same_players(),
        Err(MatchError::NoPreviousRoster)
    );
    assert!(matches!(
        engine.rejoin_player(0),
        Err(MatchError::PlayerIndexOutOfRange { .. })
    ));
    assert_eq!(engine.add_player(""), Err(MatchError::EmptyName));
    assert_eq!(engine.state(), MatchState::Empty);
    assert!(engine.rounds().is_empty());
}

#[test]
fn history_analytics_track_finished_matches() {
    let mut engine = engine_with(&["Ana", "Beto"]);
    engine.submit_round(&[10, 150]).unwrap();
    engine.reset_game(true);
    engine.submit_round(&[20, 30]).unwrap();
    engine.submit_round(&[90, 0]).unwrap();

    let recent: Vec<_> = engine
        .recent_matches()
        .map(|m| m.winner().unwrap().name.clone())
        .collect();
    assert_eq!(recent, ["Beto", "Ana"]);

    let global = engine.global_stats();
    assert_eq!(global.total_matches, 2);
    assert_eq!(global.total_rounds, 3);
    assert_eq!(global.avg_rounds_per_match, 1.5);

    let records = engine.player_stats();
    assert_eq!(records.len(), 2);
    // One win each; Ana's average (10 + 110) / 2 = 60 beats Beto's (150 + 30) / 2 = 90.
    assert_eq!(records[0].name, "Ana");
    assert_eq!(records[0].wins, 1);
    assert_eq!(records[0].win_rate, 50.0);
    assert_eq!(records[1].best_score, 30);
}

#[test]
fn standings_are_lowest_score_first() {
    let mut engine = engine_with(&["Ana", "Beto", "Caro"]);
    engine.submit_round(&[50, 10, 30]).unwrap();
    let order: Vec<_> = engine.standings().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, ["Beto", "Caro", "Ana"]);
}
