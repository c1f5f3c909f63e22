//! Simulation Configuration
//!
//! Every tunable the simulation reads. Defaults reproduce the reference
//! match: 24 rounds on Ascent at 16 Hz, 5v5, 4% engagement chance.

use serde::{Serialize, Deserialize};

use crate::error::{SimError, SimResult};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u32 = 2026;

/// Map played when the caller does not name one.
pub const DEFAULT_MAP: &str = "Ascent";

/// Rounds per match.
pub const DEFAULT_ROUNDS: u32 = 24;

/// Simulation tick rate (Hz).
pub const DEFAULT_TICK_RATE: u32 = 16;

/// Highest accepted tick rate (Hz).
pub const MAX_TICK_RATE: u32 = 1000;

/// Roster construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Players per team
    pub team_size: u32,
    /// Health at spawn
    pub starting_health: i32,
    /// Armor at spawn
    pub starting_armor: i32,
    /// Range for skill draws
    pub skill_range: (f64, f64),
    /// Range for aim draws
    pub aim_range: (f64, f64),
    /// Range for reaction draws
    pub reaction_range: (f64, f64),
    /// Fraction of map width team A spawns in, measured from x = 0
    pub spawn_band: (f64, f64),
    /// Pitch range at spawn (degrees)
    pub pitch_range: (f64, f64),
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            team_size: 5,
            starting_health: 100,
            starting_armor: 50,
            skill_range: (0.4, 0.9),
            aim_range: (0.4, 0.95),
            reaction_range: (0.4, 0.9),
            spawn_band: (0.05, 0.25),
            pitch_range: (-10.0, 10.0),
        }
    }
}

/// Movement integrator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Speed of a zero-skill player (units/s)
    pub base_speed: f64,
    /// Extra speed per unit of skill (units/s)
    pub skill_speed: f64,
    /// Direction used when a player already stands on its target
    pub fallback_direction: (f64, f64),
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 220.0,
            skill_speed: 80.0,
            fallback_direction: (1.0, 0.0),
        }
    }
}

/// Combat resolver parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Per-tick, per-player chance of attempting a shot
    pub engagement_chance: f64,
    /// Minimum damage on a hit
    pub damage_min: i32,
    /// Maximum damage on a hit (inclusive)
    pub damage_max: i32,
    /// Distance that costs one full unit of hit probability
    pub range_falloff: f64,
    /// Half-width of the aim error draw
    pub headshot_spread: f64,
    /// Aim error below this is classified as a headshot
    pub headshot_threshold: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            engagement_chance: 0.04,
            damage_min: 30,
            damage_max: 160,
            range_falloff: 12_000.0,
            headshot_spread: 6.0,
            headshot_threshold: 1.0,
        }
    }
}

/// Full configuration for one generated match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed
    pub seed: u32,
    /// Map name, looked up in the registry
    pub map: String,
    /// Number of rounds
    pub rounds: u32,
    /// Ticks per second
    pub tick_rate: u32,
    /// Minimum round duration (seconds)
    pub min_round_secs: u32,
    /// Maximum round duration (seconds, inclusive)
    pub max_round_secs: u32,
    /// Roster parameters
    pub roster: RosterConfig,
    /// Movement parameters
    pub movement: MovementConfig,
    /// Combat parameters
    pub combat: CombatConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            map: DEFAULT_MAP.to_string(),
            rounds: DEFAULT_ROUNDS,
            tick_rate: DEFAULT_TICK_RATE,
            min_round_secs: 60,
            max_round_secs: 100,
            roster: RosterConfig::default(),
            movement: MovementConfig::default(),
            combat: CombatConfig::default(),
        }
    }
}

impl SimConfig {
    /// Default configuration with a specific seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Overlay environment variables on the defaults.
    ///
    /// Reads `SIM_SEED`, `SIM_MAP`, `SIM_ROUNDS`, `SIM_TICK_RATE`.
    pub fn from_env() -> SimResult<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from an arbitrary key lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> SimResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("SIM_SEED") {
            self.seed = parse_env("SIM_SEED", &seed)?;
        }
        if let Some(map) = lookup("SIM_MAP") {
            if !map.trim().is_empty() {
                self.map = map.trim().to_string();
            }
        }
        if let Some(rounds) = lookup("SIM_ROUNDS") {
            self.rounds = parse_env("SIM_ROUNDS", &rounds)?;
        }
        if let Some(rate) = lookup("SIM_TICK_RATE") {
            self.tick_rate = parse_env("SIM_TICK_RATE", &rate)?;
        }
        Ok(())
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.rounds == 0 {
            return Err(SimError::InvalidConfig("rounds must be at least 1".into()));
        }
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(SimError::InvalidConfig(format!(
                "tick_rate {} outside 1..={MAX_TICK_RATE}",
                self.tick_rate
            )));
        }
        if self.min_round_secs == 0 || self.min_round_secs > self.max_round_secs {
            return Err(SimError::InvalidConfig(format!(
                "round duration range {}..={} is empty or zero",
                self.min_round_secs, self.max_round_secs
            )));
        }
        if self.roster.team_size == 0 {
            return Err(SimError::InvalidConfig("team_size must be at least 1".into()));
        }
        if self.combat.damage_min <= 0 || self.combat.damage_min > self.combat.damage_max {
            return Err(SimError::InvalidConfig(format!(
                "damage range {}..={} is invalid",
                self.combat.damage_min, self.combat.damage_max
            )));
        }
        if self.combat.range_falloff <= 0.0 {
            return Err(SimError::InvalidConfig("range_falloff must be positive".into()));
        }
        let (lo, hi) = self.roster.spawn_band;
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(SimError::InvalidConfig(format!("spawn band ({lo}, {hi}) must lie in [0, 1]")));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> SimResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| SimError::InvalidConfig(format!("{key}={raw:?} is not a valid number")))
}

// =============================================================================
// TESTS
// =============================================================================
