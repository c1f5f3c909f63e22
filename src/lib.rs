//! # Tactical Telemetry
//!
//! Deterministic generator of frame-level telemetry for tactical-shooter
//! matches: positions, velocities, view angles, health and combat events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TACTICAL TELEMETRY                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded xorshift32 stream                  │
//! │  ├── vec2.rs     - 2D f64 vector                             │
//! │  └── hash.rs     - Fingerprints and match id derivation      │
//! │                                                              │
//! │  game/           - Round simulation                          │
//! │  ├── config.rs   - Tunables                                  │
//! │  ├── map.rs      - Map geometry and registry                 │
//! │  ├── catalog.rs  - Agents and weapons                        │
//! │  ├── player.rs   - Player state and rosters                  │
//! │  ├── movement.rs - Movement integrator                       │
//! │  ├── combat.rs   - Combat resolver                           │
//! │  ├── events.rs   - DAMAGE / KILL events                      │
//! │  └── round.rs    - Tick loop state machine                   │
//! │                                                              │
//! │  record/         - Output                                    │
//! │  ├── frame.rs    - Per-tick snapshots                        │
//! │  ├── match_record.rs - Match assembler                       │
//! │  ├── summary.rs  - Winners and totals                        │
//! │  ├── validate.rs - Property checks, replay                   │
//! │  └── export.rs   - JSON / JSON lines                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! A match is a pure function of its [`SimConfig`]:
//! - One explicit RNG per match, threaded through every draw
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies
//! - Fixed draw order: roster, duration, POV, then per-tick per-player
//!
//! Two runs with the same configuration produce byte-identical JSON.
//!
//! ```no_run
//! use tactical_telemetry::{generate_match, SimConfig};
//!
//! let record = generate_match(&SimConfig::with_seed(2026))?;
//! println!("{} rounds, fingerprint {}", record.rounds.len(), record.fingerprint()?);
//! # Ok::<(), tactical_telemetry::SimError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod game;
pub mod record;

// Re-export commonly used types
pub use crate::core::rng::XorShiftRng;
pub use crate::core::vec2::Vec2;
pub use error::{SimError, SimResult};
pub use game::config::SimConfig;
pub use game::map::{MapDef, MapRegistry};
pub use game::catalog::Catalog;
pub use game::events::CombatEvent;
pub use record::{generate_match, MatchRecord, MatchSummary, RoundRecord, Simulator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
