//! rubbermaze: headless maze driver.
//!
//! Usage:
//!   rubbermaze [config.json]
//!
//! Reads one command per line from stdin:
//!   up | down | left | right   (or w | s | a | d)
//!   soft                       restart navigation on the same maze
//!   hard [rows cols]           discard the maze and generate a new one
//!   dump                       print the grid snapshot as JSON
//!   stats                      print session counters
//!   quit

mod ascii;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use rubbermaze::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use ascii::{render, RenderStyle};

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Maze(#[from] MazeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Soft,
    Hard(Option<(usize, usize)>),
    Dump,
    Stats,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let cmd = match head {
        "soft" => Command::Soft,
        "hard" => {
            let rest: Vec<&str> = parts.by_ref().collect();
            match rest.as_slice() {
                [] => Command::Hard(None),
                [r, c] => {
                    let rows = r.parse().map_err(|_| format!("invalid rows: {r}"))?;
                    let cols = c.parse().map_err(|_| format!("invalid cols: {c}"))?;
                    Command::Hard(Some((rows, cols)))
                }
                _ => return Err("usage: hard [rows cols]".to_string()),
            }
        }
        "dump" => Command::Dump,
        "stats" => Command::Stats,
        "quit" | "exit" | "q" => Command::Quit,
        other => match Direction::from_action_str(other) {
            Some(dir) => Command::Move(dir),
            None => return Err(format!("unknown command: {other}")),
        },
    };
    if parts.next().is_some() {
        return Err(format!("unexpected arguments after '{head}'"));
    }
    Ok(cmd)
}

fn load_config(path: Option<&Path>) -> Result<MazeConfig, CliError> {
    let Some(path) = path else {
        return Ok(MazeConfig::default());
    };
    let text = fs::read_to_string(path)?;
    let cfg: MazeConfig = serde_json::from_str(&text)?;
    info!(path = %path.display(), rows = cfg.rows, cols = cfg.cols, "loaded config");
    Ok(cfg)
}

fn generate(game: &mut MazeGame<TracingSink>) -> Result<(), CliError> {
    let mut steps = 0usize;
    let mut deepest = 0usize;
    let mut gen = game.begin_generation()?;
    while gen.next().is_some() {
        steps += 1;
        deepest = deepest.max(gen.stack_depth());
    }
    let cells = gen.visited();
    drop(gen);
    info!(steps, cells, deepest, "maze generated");
    Ok(())
}

fn describe(outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Moved { to } => format!("moved to ({}, {})", to.row, to.col),
        MoveOutcome::Recovered {
            collision,
            from,
            to,
        } => format!(
            "hit {collision:?} at ({}, {}), recovered to ({}, {})",
            from.row, from.col, to.row, to.col
        ),
        MoveOutcome::Finished => "reached the end".to_string(),
        MoveOutcome::Idle => "nothing to do".to_string(),
    }
}

fn print_usage() {
    eprintln!("rubbermaze: headless maze driver");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  rubbermaze [config.json]");
    eprintln!();
    eprintln!("Commands (stdin): up|down|left|right (w|s|a|d), soft, hard [rows cols], dump, stats, quit");
}

fn run() -> Result<(), CliError> {
    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help" | "help")) {
        print_usage();
        return Ok(());
    }

    let config = load_config(arg.as_deref().map(Path::new))?;
    let style = RenderStyle {
        show_backtrack: config.unwind_backtrack,
        ..RenderStyle::default()
    };
    let mut game = MazeGame::new(config, TracingSink)?;
    generate(&mut game)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render(game.grid(), &style))?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                warn!("{msg}");
                continue;
            }
        };
        debug!(?cmd, "command");

        match cmd {
            Command::Move(dir) => match game.move_agent(dir) {
                Ok(outcome) => writeln!(out, "{}", describe(outcome))?,
                Err(e) => warn!("move rejected: {e}"),
            },
            Command::Soft => game.reset_soft(),
            Command::Hard(size) => match game.reset_hard(size) {
                Ok(()) => generate(&mut game)?,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            },
            Command::Dump => {
                let json = serde_json::to_string_pretty(&game.grid().snapshot())?;
                writeln!(out, "{json}")?;
                match game.recovery_window().as_option() {
                    Some(w) => writeln!(out, "recovery_window={w}")?,
                    None => writeln!(out, "recovery_window=unbounded")?,
                }
                continue;
            }
            Command::Stats => {
                let s = game.stats();
                writeln!(
                    out,
                    "moves={} wall_hits={} runs={}/{} generations={} collision_rate={:.3}",
                    s.moves,
                    s.wall_hits,
                    s.runs_won,
                    s.runs_started,
                    s.generations,
                    s.collision_rate()
                )?;
                continue;
            }
            Command::Quit => break,
        }

        write!(out, "{}", render(game.grid(), &style))?;
        out.flush()?;
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_aliases() {
        assert_eq!(parse_command("up"), Ok(Command::Move(Direction::Up)));
        assert_eq!(parse_command("  a "), Ok(Command::Move(Direction::Left)));
        assert_eq!(parse_command("s"), Ok(Command::Move(Direction::Down)));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parses_hard_reset_sizes() {
        assert_eq!(parse_command("hard"), Ok(Command::Hard(None)));
        assert_eq!(parse_command("hard 4 9"), Ok(Command::Hard(Some((4, 9)))));
        assert!(parse_command("hard 4").is_err());
        assert!(parse_command("hard x 9").is_err());
    }

    #[test]
    fn rejects_unknown_and_trailing_input() {
        assert!(parse_command("jump").is_err());
        assert!(parse_command("up up").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), MazeConfig::default());
    }

    #[test]
    fn describes_recovery() {
        let text = describe(MoveOutcome::Recovered {
            collision: Collision::Wall,
            from: Coord::new(1, 2),
            to: Coord::new(0, 0),
        });
        assert_eq!(text, "hit Wall at (1, 2), recovered to (0, 0)");
    }
}
