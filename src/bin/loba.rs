//! Console front end for the Loba counter: one command per line on stdin.
//! Run with: cargo run --bin loba
//! State is kept in `.loba/` by default. Override with env: LOBA_DATA_DIR.

use loba_counter::{DirStore, MatchEngine, SettingsUpdate};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  add <name>            add a player
  round <pts> <pts> ..  submit one round, points in roster order
  delete <n>            remove player n
  rejoin <n>            bring eliminated player n back
  reset [keep]          clear the match, optionally keeping the players
  restart               restart with the previous players
  rejoins on|off        allow or forbid rejoining
  keep on|off           default for keeping players after a match
  show                  current scores
  history               finished matches, newest first
  stats                 player rankings
  quit";

fn default_data_dir() -> String {
    ".loba".to_string()
}

/// Non-numeric input counts as 0 points.
fn parse_points(args: &[&str]) -> Vec<i32> {
    args.iter().map(|a| a.parse().unwrap_or(0)).collect()
}

/// 1-based position typed by the user to a roster index.
fn parse_position(arg: Option<&&str>) -> Option<usize> {
    arg?.parse::<usize>().ok()?.checked_sub(1)
}

fn parse_toggle(arg: Option<&&str>) -> Option<bool> {
    match *arg? {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn show(engine: &MatchEngine<DirStore>, out: &mut impl Write) -> io::Result<()> {
    if engine.players().is_empty() {
        return writeln!(out, "no players yet");
    }
    writeln!(out, "round {}", engine.rounds().len())?;
    for (i, p) in engine.players().iter().enumerate() {
        let mut flags = String::new();
        if p.is_eliminated {
            flags.push_str(" [out]");
        }
        if p.rejoin_count > 0 {
            flags.push_str(&format!(" [{}x rejoin]", p.rejoin_count));
        }
        writeln!(
            out,
            "{:>2}. {:<16} {:>4} ({:+}){}",
            i + 1,
            p.name,
            p.score,
            p.round_total,
            flags
        )?;
    }
    if let Some(w) = engine.winner() {
        writeln!(out, "winner: {}", w.name)?;
    }
    Ok(())
}

fn run_command(engine: &mut MatchEngine<DirStore>, line: &str, out: &mut impl Write) -> io::Result<bool> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = words.split_first() else {
        return Ok(true);
    };
    match cmd {
        "add" => {
            if let Err(e) = engine.add_player(&args.join(" ")) {
                writeln!(out, "{}", e)?;
            }
        }
        "round" => {
            let outcome = engine
                .submit_round(&parse_points(args))
                .map(|finished| finished.and_then(|m| m.winner()).map(|p| p.name.clone()));
            match outcome {
                Ok(Some(name)) => writeln!(out, "match over, {} wins", name)?,
                Ok(None) => show(engine, out)?,
                Err(e) => writeln!(out, "{}", e)?,
            }
        }
        "delete" => match parse_position(args.first()) {
            Some(i) => {
                if let Err(e) = engine.delete_player(i) {
                    writeln!(out, "{}", e)?;
                }
            }
            None => writeln!(out, "usage: delete <n>")?,
        },
        "rejoin" => match parse_position(args.first()) {
            Some(i) => {
                if let Err(e) = engine.rejoin_player(i) {
                    writeln!(out, "{}", e)?;
                }
            }
            None => writeln!(out, "usage: rejoin <n>")?,
        },
        "reset" => {
            let keep = match args.first() {
                Some(&"keep") => true,
                Some(_) => false,
                None => engine.is_game_over() && engine.settings().restart_with_same_players,
            };
            engine.reset_game(keep);
        }
        "restart" => {
            if let Err(e) = engine.restart_with_same_players() {
                writeln!(out, "{}", e)?;
            }
        }
        "rejoins" | "keep" => match parse_toggle(args.first()) {
            Some(v) => {
                let update = if cmd == "rejoins" {
                    SettingsUpdate {
                        allow_rejoin: Some(v),
                        ..Default::default()
                    }
                } else {
                    SettingsUpdate {
                        restart_with_same_players: Some(v),
                        ..Default::default()
                    }
                };
                engine.update_settings(update);
            }
            None => writeln!(out, "usage: {} on|off", cmd)?,
        },
        "show" => show(engine, out)?,
        "history" => {
            for m in engine.recent_matches() {
                let name = m.winner().map(|p| p.name.as_str()).unwrap_or("nobody");
                writeln!(
                    out,
                    "{}  {} players, {} rounds, winner {}",
                    m.started_at.format("%Y-%m-%d %H:%M"),
                    m.players.len(),
                    m.rounds.len(),
                    name
                )?;
            }
        }
        "stats" => {
            let g = engine.global_stats();
            writeln!(
                out,
                "{} matches, {} rounds ({:.1} per match)",
                g.total_matches, g.total_rounds, g.avg_rounds_per_match
            )?;
            for r in engine.player_stats() {
                writeln!(
                    out,
                    "{:<16} {} wins / {} played ({:.0}%), avg {:.1}, best {}, rejoins {}",
                    r.name, r.wins, r.matches_played, r.win_rate, r.avg_final_score, r.best_score, r.total_rejoins
                )?;
            }
        }
        "help" => writeln!(out, "{}", HELP)?,
        "quit" | "exit" => return Ok(false),
        _ => writeln!(out, "unknown command, try help")?,
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let data_dir = std::env::var("LOBA_DATA_DIR").unwrap_or_else(|_| default_data_dir());
    log::info!("Using data directory {}", data_dir);
    let mut engine = MatchEngine::load(DirStore::new(data_dir));

    let stdin = io::stdin();
    let mut out = io::stdout();
    show(&engine, &mut out)?;
    for line in stdin.lock().lines() {
        if !run_command(&mut engine, &line?, &mut out)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}
