//! Line protocol loosely modeled on UCI.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use classical_engine::{evaluate_breakdown, piece_safety, EvalBreakdown};
use serde::Serialize;
use tracing::debug;
use xiangqi_ai::{SearchConfig, XiangqiAi};
use xiangqi_core::{
    check_custom_position, sq_to_coord, Engine, Game, GameState, Move, SearchLimits,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Serialize)]
struct EvalReport {
    side: String,
    fen: String,
    breakdown: EvalBreakdown,
    /// Keyed by square, for every piece on the board.
    piece_safety: BTreeMap<String, i32>,
}

pub struct Protocol {
    game: Game,
    ai: XiangqiAi,
}

impl Protocol {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            game: Game::default(),
            ai: XiangqiAi::new(config),
        }
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Handles one command line, writing replies to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(command, "received");

        match command {
            "info" => {
                writeln!(out, "id name {}", self.ai.name())?;
                writeln!(out, "id author {}", self.ai.author())?;
                let config = self.ai.config();
                let options = [
                    format!("TotalTime type spin default {}", config.total_time_ms),
                    format!("MateDepth type spin default {}", config.max_mate_depth),
                    format!(
                        "Strategy type combo default {} var mcts var alpha-beta",
                        config.strategy
                    ),
                    format!("Exploration type string default {}", config.exploration),
                    "Seed type string".to_string(),
                ];
                for option in options {
                    writeln!(out, "option name {option}")?;
                }
                writeln!(out, "ok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "newgame" => {
                self.game = Game::default();
                self.ai.new_game();
            }
            "position" => match parse_position(args) {
                Ok(game) => self.game = game,
                Err(err) => writeln!(out, "info string {err}")?,
            },
            "setoption" => match parse_setoption(args) {
                Some((name, value)) if self.ai.set_option(&name, &value) => {}
                Some((name, value)) => {
                    writeln!(out, "info string cannot set {name} to '{value}'")?
                }
                None => writeln!(out, "info string usage: setoption name <N> value <V>")?,
            },
            "go" => {
                let limits = match parse_movetime(args) {
                    Some(time) => SearchLimits::time(time),
                    None => SearchLimits::default(),
                };
                let result = self.ai.search(self.game.state(), limits);
                match result.best_move {
                    Some(mv) => {
                        writeln!(
                            out,
                            "info depth {} score {} nodes {}",
                            result.depth, result.score, result.nodes
                        )?;
                        writeln!(out, "bestmove {mv}")?;
                    }
                    None => writeln!(out, "bestmove none")?,
                }
            }
            "eval" => {
                let report = self.eval_report();
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            }
            "validate" => match check_custom_position(&self.game.state().board) {
                Ok(()) => writeln!(out, "valid")?,
                Err(err) => writeln!(out, "invalid: {err}")?,
            },
            "fen" => writeln!(out, "{}", self.game.state().to_fen())?,
            "quit" => return Ok(Flow::Quit),
            other => writeln!(out, "info string unknown command '{other}'")?,
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    fn eval_report(&self) -> EvalReport {
        let state = self.game.state();
        let board = &state.board;
        let piece_safety = board
            .squares
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| (sq_to_coord(i as u8), piece_safety(board, i as u8)))
            .collect();
        EvalReport {
            side: state.side_to_move.to_string(),
            fen: state.to_fen(),
            breakdown: evaluate_breakdown(board, state.side_to_move),
            piece_safety,
        }
    }
}

/// `startpos | fen <fields...>` followed by an optional `moves <m1> ...`.
fn parse_position(args: &[&str]) -> Result<Game, String> {
    let split = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(split);

    let state = match setup.split_first() {
        Some((&"startpos", _)) => GameState::startpos(),
        Some((&"fen", fields)) if !fields.is_empty() => {
            GameState::from_fen(&fields.join(" ")).map_err(|e| format!("bad fen: {e}"))?
        }
        _ => return Err("usage: position startpos|fen <fen> [moves ...]".to_string()),
    };

    let mut game = Game::new(state);
    for text in moves.iter().skip(1) {
        let mv = Move::from_coord(text).ok_or_else(|| format!("cannot read move '{text}'"))?;
        game.apply_move(mv).map_err(|e| format!("{text}: {e}"))?;
    }
    Ok(game)
}

/// `name <N...> value <V...>`; both parts may contain spaces.
fn parse_setoption(args: &[&str]) -> Option<(String, String)> {
    let name_at = args.iter().position(|&a| a == "name")?;
    let value_at = args.iter().position(|&a| a == "value")?;
    if value_at <= name_at + 1 {
        return None;
    }
    let name = args[name_at + 1..value_at].join(" ");
    let value = args[value_at + 1..].join(" ");
    Some((name, value))
}

fn parse_movetime(args: &[&str]) -> Option<Duration> {
    let at = args.iter().position(|&a| a == "movetime")?;
    let ms = args.get(at + 1)?.parse().ok()?;
    Some(Duration::from_millis(ms))
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
