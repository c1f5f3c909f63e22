//! Match Assembler
//!
//! Runs every round of a match against one RNG stream and wraps the rounds
//! with the match id, provenance tag and tick rate.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::hash::{derive_match_id, fingerprint_bytes};
use crate::core::rng::XorShiftRng;
use crate::error::SimResult;
use crate::game::catalog::Catalog;
use crate::game::config::SimConfig;
use crate::game::map::MapRegistry;
use crate::game::round::run_round;
use crate::record::frame::Frame;

/// Provenance tag written into every match record.
pub const SOURCE_TAG: &str = "tactical-telemetry-sim";

/// One round's recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-based)
    pub round: u32,
    /// Map name
    pub map: String,
    /// Point-of-view player for the whole round
    pub pov: String,
    /// Frames in tick order, starting at the spawn frame
    pub frames: Vec<Frame>,
}

impl RoundRecord {
    /// Final frame of the round.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Number of events across all frames.
    pub fn event_count(&self) -> usize {
        self.frames.iter().map(|f| f.events.len()).sum()
    }
}

/// A complete generated match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Match id (UUID string derived from the generation parameters)
    pub match_id: String,
    /// Generator provenance tag
    pub source: String,
    /// RNG seed the match was generated from
    pub seed: u32,
    /// Ticks per second
    pub tick_rate: u32,
    /// Rounds in order
    pub rounds: Vec<RoundRecord>,
}

impl MatchRecord {
    /// Canonical JSON bytes.
    pub fn to_canonical_json(&self) -> SimResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Hex SHA-256 of the canonical encoding.
    pub fn fingerprint(&self) -> SimResult<String> {
        Ok(fingerprint_bytes(&self.to_canonical_json()?))
    }

    /// Map of the first round.
    pub fn map(&self) -> Option<&str> {
        self.rounds.first().map(|r| r.map.as_str())
    }

    /// Total frames across all rounds.
    pub fn frame_count(&self) -> usize {
        self.rounds.iter().map(|r| r.frames.len()).sum()
    }
}

/// Match generator with injectable maps and catalogs.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: SimConfig,
    registry: MapRegistry,
    catalog: Catalog,
}

impl Simulator {
    /// Create a generator over the given content.
    pub fn new(config: SimConfig, registry: MapRegistry, catalog: Catalog) -> Self {
        Self { config, registry, catalog }
    }

    /// Generator over the built-in maps and catalogs.
    pub fn builtin(config: SimConfig) -> Self {
        Self::new(config, MapRegistry::builtin(), Catalog::default())
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Registered maps.
    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }

    /// Same maps and catalog under another configuration.
    pub fn with_config(&self, config: SimConfig) -> Self {
        Self {
            config,
            registry: self.registry.clone(),
            catalog: self.catalog.clone(),
        }
    }

    /// Same content, different seed.
    pub fn reseeded(&self, seed: u32) -> Self {
        self.with_config(SimConfig {
            seed,
            ..self.config.clone()
        })
    }

    /// Generate the match.
    ///
    /// Configuration and map are checked before the first draw, so a
    /// failure never yields a partial record.
    pub fn run(&self) -> SimResult<MatchRecord> {
        let config = &self.config;
        config.validate()?;
        let map = self.registry.lookup(&config.map)?;
        map.validate()?;

        let mut rng = XorShiftRng::new(config.seed);
        let mut rounds = Vec::with_capacity(config.rounds as usize);
        for number in 1..=config.rounds {
            rounds.push(run_round(number, &mut rng, map, &self.catalog, config)?);
        }

        let record = MatchRecord {
            match_id: derive_match_id(config.seed, &config.map, config.rounds, config.tick_rate).to_string(),
            source: SOURCE_TAG.to_string(),
            seed: config.seed,
            tick_rate: config.tick_rate,
            rounds,
        };

        info!(
            match_id = %record.match_id,
            seed = config.seed,
            map = %config.map,
            rounds = config.rounds,
            frames = record.frame_count(),
            "match generated"
        );

        Ok(record)
    }
}

/// Generate a match with the built-in maps and catalogs.
pub fn generate_match(config: &SimConfig) -> SimResult<MatchRecord> {
    Simulator::builtin(config.clone()).run()
}

// =============================================================================
// TESTS
// =============================================================================
