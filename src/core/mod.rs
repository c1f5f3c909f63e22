//! Core deterministic primitives.
//!
//! Everything a match draws on: the seeded RNG stream, vector math, and the
//! hashing used to prove two runs produced the same record.

pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rng::XorShiftRng;
pub use hash::{derive_match_id, fingerprint_bytes};
