//! Game Logic Module
//!
//! Round simulation. Deterministic given the RNG it is handed.
//!
//! ## Module Structure
//!
//! - `config`: Tunables and their defaults
//! - `map`: Map geometry and the map registry
//! - `catalog`: Agent and weapon lists
//! - `player`: Per-round player state and roster construction
//! - `movement`: Euler step toward a lane target
//! - `combat`: Hit, damage and headshot resolution
//! - `events`: DAMAGE / KILL events
//! - `round`: Tick loop state machine

pub mod config;
pub mod map;
pub mod catalog;
pub mod player;
pub mod movement;
pub mod combat;
pub mod events;
pub mod round;

// Re-export key types
pub use config::SimConfig;
pub use map::{MapDef, MapRegistry, Lane};
pub use catalog::Catalog;
pub use player::{PlayerState, PlayerAttributes, Team};
pub use events::CombatEvent;
pub use round::{run_round, EndReason, RoundPhase, RoundState, StepResult};
