//! Xiangqi AI
//!
//! Decides one move under a time budget by chaining the search phases:
//! check escapes, forced mates, the configured search strategy and a random
//! fallback. Searches can run on a background thread while a session keeps
//! the authoritative game.

pub mod config;
pub mod error;
pub mod mate;
pub mod orchestrator;
pub mod worker;

pub use config::{SearchConfig, Strategy};
pub use error::{ConfigError, SearchTimedOut, SessionError};
pub use mate::{attack_distance, find_mate_in_n, has_attacker, pieces_near_general, MateSearcher};
pub use orchestrator::{choose_move, Decision, DecisionSource, XiangqiAi};
pub use worker::{AiReply, AiSession, SearchHandle, SearchStatus, SearchWorker};
