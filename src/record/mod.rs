//! Match Records
//!
//! The output side of the simulation. Everything here is built once and
//! then only read.
//!
//! ## Module Structure
//!
//! - `frame`: Per-tick roster snapshot and events
//! - `match_record`: Round/match records and the match assembler
//! - `summary`: Round winners and per-team totals
//! - `validate`: Record property checks and replay verification
//! - `export`: JSON and JSON-lines encodings

pub mod frame;
pub mod match_record;
pub mod summary;
pub mod validate;
pub mod export;

pub use frame::{Frame, PlayerSnapshot};
pub use match_record::{generate_match, MatchRecord, RoundRecord, Simulator, SOURCE_TAG};
pub use summary::{MatchSummary, RoundSummary, TeamStats};
pub use validate::{validate_match, validate_match_with, verify_replay, verify_replay_with, ValidationError};
