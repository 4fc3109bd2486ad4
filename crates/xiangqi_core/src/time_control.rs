//! Time control and search limits shared by every engine.
//!
//! A move decision is split into phases (check escape, forced mate, tree
//! search), each with its own sub-deadline carved out of the total budget.
//! Deadlines are cooperative: searches poll `check_time`, and an expired
//! deadline is a normal way for a phase to end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// Engines respect the depth, node and time limits, stopping when any is
/// reached. When time runs out the engine returns the best move found so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum number of nodes (tree-search iterations), None = unbounded
    pub nodes: Option<u64>,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Time controller for checking if search should stop
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            nodes: None,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Create limits with only time constraint (infinite depth).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            nodes: None,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Runs under an existing (possibly already started) time control.
    pub fn with_control(depth: u8, time_control: TimeControl) -> Self {
        Self {
            depth,
            nodes: None,
            move_time: time_control.limit(),
            time_control,
        }
    }

    pub fn with_nodes(mut self, nodes: Option<u64>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Start the time control clock unless it is already running.
    pub fn start(&self) {
        if !self.time_control.is_started() {
            self.time_control.start();
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe time controller that tracks whether search should stop.
///
/// Cheaply cloneable and shareable across threads. A phase control created
/// with [`TimeControl::phase`] also stops when its parent stops.
#[derive(Debug, Clone)]
pub struct TimeControl {
    /// Shared stop flag
    stopped: Arc<AtomicBool>,
    /// Stop flag of the enclosing budget, if any
    parent: Option<Arc<AtomicBool>>,
    /// Start time of the search
    start_time: Arc<RwLock<Option<Instant>>>,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
    /// How often to check the clock (in nodes). Checking every node is wasteful.
    check_interval: u64,
}

impl TimeControl {
    /// Create a new time controller.
    ///
    /// # Arguments
    /// * `time_limit` - Maximum time allowed for search (None = infinite)
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            parent: None,
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            check_interval: 256,
        }
    }

    /// A controller that is already running.
    pub fn started(time_limit: Option<Duration>) -> Self {
        let tc = Self::new(time_limit);
        tc.start();
        tc
    }

    /// A running sub-budget of at most `limit`, never outliving what remains
    /// of `self`.
    pub fn phase(&self, limit: Duration) -> TimeControl {
        let limit = match self.remaining() {
            Some(rest) => limit.min(rest),
            None => limit,
        };
        let mut tc = Self::new(Some(limit));
        tc.parent = Some(Arc::clone(&self.stopped));
        tc.check_interval = self.check_interval;
        tc.start();
        tc
    }

    /// Start the clock. Should be called when search begins.
    pub fn start(&self) {
        *self
            .start_time
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn is_started(&self) -> bool {
        self.start_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Check if search should stop. A fast atomic load.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.load(Ordering::Relaxed))
    }

    /// Check time and update stopped flag if time expired.
    ///
    /// This does the actual clock check. Tight loops should gate it with
    /// `should_check_time`.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = *self.start_time.read().unwrap_or_else(PoisonError::into_inner)
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    /// Returns true every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    pub fn limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
