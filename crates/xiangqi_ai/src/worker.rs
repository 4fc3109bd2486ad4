//! Background search and the game session that owns it.
//!
//! A search runs on its own thread against a private copy of the position.
//! The only thing that comes back is the chosen move, which the session
//! applies to its authoritative game exactly once.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};
use xiangqi_core::{Game, GameState, Move, MoveRecord};

use crate::config::SearchConfig;
use crate::error::SessionError;
use crate::orchestrator::choose_move;

/// Starts move searches on background threads.
#[derive(Debug, Clone, Default)]
pub struct SearchWorker {
    config: SearchConfig,
}

impl SearchWorker {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Searches a copy of `state`; the answer arrives on the returned handle.
    pub fn spawn(&self, state: &GameState) -> SearchHandle {
        let (tx, rx) = mpsc::channel();
        let thread = self.spawn_with_callback(state, move |mv| {
            if tx.send(mv).is_err() {
                debug!("search result dropped, nobody is waiting");
            }
        });
        SearchHandle {
            receiver: rx,
            thread: Some(thread),
        }
    }

    /// Searches a copy of `state` and hands the move to `callback` on the
    /// worker thread.
    pub fn spawn_with_callback<F>(&self, state: &GameState, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Option<Move>) + Send + 'static,
    {
        let snapshot = state.clone();
        let config = self.config.clone();
        thread::spawn(move || {
            debug!(fen = %snapshot.to_fen(), "search worker started");
            let decision = choose_move(&snapshot, &config);
            debug!(source = ?decision.source, "search worker finished");
            callback(decision.mv);
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Pending,
    Done(Option<Move>),
}

/// Receiving end of one background search.
#[derive(Debug)]
pub struct SearchHandle {
    receiver: Receiver<Option<Move>>,
    thread: Option<JoinHandle<()>>,
}

impl SearchHandle {
    /// Non-blocking check for the result.
    pub fn try_result(&mut self) -> Result<SearchStatus, SessionError> {
        match self.receiver.try_recv() {
            Ok(mv) => {
                self.join();
                Ok(SearchStatus::Done(mv))
            }
            Err(TryRecvError::Empty) => Ok(SearchStatus::Pending),
            Err(TryRecvError::Disconnected) => Err(SessionError::WorkerLost),
        }
    }

    /// Blocks until the worker answers.
    pub fn wait(mut self) -> Result<Option<Move>, SessionError> {
        let mv = self.receiver.recv().map_err(|_| SessionError::WorkerLost)?;
        self.join();
        Ok(mv)
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("search worker panicked after answering");
            }
        }
    }
}

/// What a poll of the AI found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiReply {
    Thinking,
    Played(MoveRecord),
    /// The AI had no legal move.
    NoMove,
}

/// A game in which one side's moves come from background searches.
///
/// While a search is outstanding the game cannot be changed from outside.
#[derive(Debug)]
pub struct AiSession {
    game: Game,
    worker: SearchWorker,
    pending: Option<SearchHandle>,
}

impl AiSession {
    pub fn new(game: Game, config: SearchConfig) -> Self {
        Self {
            game,
            worker: SearchWorker::new(config),
            pending: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &SearchConfig {
        self.worker.config()
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a search for the side to move.
    pub fn request_ai_move(&mut self) -> Result<(), SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::SearchPending);
        }
        info!(side = ?self.game.side_to_move(), ply = self.game.state().ply, "AI thinking");
        self.pending = Some(self.worker.spawn(self.game.state()));
        Ok(())
    }

    /// Applies the AI move if it has arrived.
    pub fn poll_ai_move(&mut self) -> Result<AiReply, SessionError> {
        let handle = self.pending.as_mut().ok_or(SessionError::NoSearch)?;
        let status = handle.try_result();
        match status {
            Ok(SearchStatus::Pending) => Ok(AiReply::Thinking),
            Ok(SearchStatus::Done(mv)) => {
                self.pending = None;
                self.deliver(mv)
            }
            Err(err) => {
                self.pending = None;
                Err(err)
            }
        }
    }

    /// Blocks until the AI move arrives, then applies it.
    pub fn wait_ai_move(&mut self) -> Result<AiReply, SessionError> {
        let handle = self.pending.take().ok_or(SessionError::NoSearch)?;
        let mv = handle.wait()?;
        self.deliver(mv)
    }

    pub fn apply_human_move(&mut self, mv: Move) -> Result<MoveRecord, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::SearchPending);
        }
        Ok(self.game.apply_move(mv)?)
    }

    pub fn undo_move(&mut self) -> Result<MoveRecord, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::SearchPending);
        }
        Ok(self.game.undo_move()?)
    }

    /// Changes a search option for the next request.
    pub fn set_option(&mut self, name: &str, value: &str) -> bool {
        self.worker.config_mut().set_option(name, value)
    }

    fn deliver(&mut self, mv: Option<Move>) -> Result<AiReply, SessionError> {
        let Some(mv) = mv else {
            info!("AI has no legal move");
            return Ok(AiReply::NoMove);
        };
        let record = self.game.apply_move(mv)?;
        info!(%mv, "AI played");
        Ok(AiReply::Played(record))
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
