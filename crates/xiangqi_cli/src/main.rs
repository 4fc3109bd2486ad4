//! Xiangqi command-line front end.
//!
//! Without a subcommand it speaks a line protocol on stdin/stdout; with
//! `selfplay` it lets the AI play both sides and prints the game.

mod protocol;

use std::env;
use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xiangqi_ai::{AiReply, AiSession, SearchConfig};
use xiangqi_core::{Game, Outcome};

use protocol::{Flow, Protocol};

const DEFAULT_SELFPLAY_PLIES: u32 = 200;

fn print_usage() {
    println!("Xiangqi AI");
    println!();
    println!("Usage:");
    println!("  xiangqi [--config <file.toml>]                    line protocol on stdin/stdout");
    println!("  xiangqi [--config <file.toml>] selfplay [--plies N]  AI against itself");
    println!();
    println!("Protocol commands:");
    println!("  info | isready | newgame | quit");
    println!("  position startpos|fen <fen> [moves <m1> ...]");
    println!("  setoption name <N> value <V>");
    println!("  go [movetime <ms>]");
    println!("  eval | validate | fen");
    println!();
    println!("Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=debug) for more.");
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = SearchConfig::default();
    let mut selfplay = false;
    let mut plies = DEFAULT_SELFPLAY_PLIES;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).context("--config needs a file name")?;
                config = SearchConfig::load(path)
                    .with_context(|| format!("failed to load config from {path}"))?;
                i += 1;
            }
            "--plies" | "-p" => {
                let value = args.get(i + 1).context("--plies needs a number")?;
                plies = value
                    .parse()
                    .with_context(|| format!("invalid ply count '{value}'"))?;
                i += 1;
            }
            "selfplay" => selfplay = true,
            "--help" | "-h" | "help" => {
                print_usage();
                return Ok(());
            }
            other => bail!("unknown argument '{other}', try --help"),
        }
        i += 1;
    }

    if selfplay {
        run_selfplay(config, plies)
    } else {
        run_protocol(config)
    }
}

fn run_protocol(config: SearchConfig) -> Result<()> {
    let mut protocol = Protocol::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if protocol.handle(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn run_selfplay(config: SearchConfig, plies: u32) -> Result<()> {
    info!(plies, strategy = %config.strategy, "starting self-play");
    let mut session = AiSession::new(Game::default(), config);

    for ply in 1..=plies {
        let side = session.game().side_to_move();
        session.request_ai_move()?;
        match session.wait_ai_move()? {
            AiReply::Played(record) => {
                let capture = record
                    .captured
                    .map(|pc| format!(" x{:?}", pc.kind))
                    .unwrap_or_default();
                println!("{ply:>3}. {side} {} {:?}{capture}", record.mv, record.piece.kind);
            }
            AiReply::NoMove | AiReply::Thinking => break,
        }
    }

    match session.game().outcome() {
        Outcome::Checkmate { winner } => println!("checkmate, {winner} wins"),
        Outcome::Ongoing => println!("stopped after {} plies", session.game().history().len()),
    }
    println!("{}", session.game().state().to_fen());
    Ok(())
}
