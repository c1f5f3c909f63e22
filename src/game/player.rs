//! Player Entity Model
//!
//! Per-player mutable state for one round. A roster is built fresh at every
//! round start and dropped at round end; nothing carries over.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::rng::XorShiftRng;
use crate::core::vec2::Vec2;
use crate::error::{SimError, SimResult};
use crate::game::catalog::Catalog;
use crate::game::config::RosterConfig;
use crate::game::map::MapDef;

// =============================================================================
// TEAM
// =============================================================================

/// Team tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Spawns toward low x
    A,
    /// Spawns toward high x
    B,
}

impl Team {
    /// Both teams in roster order.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// The other team.
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Team tag as it appears in player ids and records.
    pub fn tag(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }

    /// Spawn x-range for this team, given team A's band as fractions of width.
    ///
    /// Team B mirrors team A's band onto the high-x side.
    pub fn spawn_x_range(self, band: (f64, f64), width: f64) -> (f64, f64) {
        let (lo, hi) = band;
        match self {
            Team::A => (lo * width, hi * width),
            Team::B => ((1.0 - hi) * width, (1.0 - lo) * width),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// Behavioral attributes, each in [0, 1]. Fixed for the round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    /// Drives movement speed
    pub skill: f64,
    /// Drives hit probability and headshot classification
    pub aim: f64,
    /// Drawn to keep the roster draw order; not read or exported
    pub reaction: f64,
}

/// State of a single player during a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Stable id, e.g. "A3"
    pub id: String,

    /// Team tag
    pub team: Team,

    /// Agent archetype (cosmetic)
    pub agent: String,

    /// Weapon name (cosmetic, attributed on events)
    pub weapon: String,

    /// Skill/aim/reaction
    pub attributes: PlayerAttributes,

    /// Is player still alive?
    pub alive: bool,

    /// Current health; floored at 0 on death
    pub health: i32,

    /// Current armor
    pub armor: i32,

    /// Position in map units
    pub position: Vec2,

    /// Velocity in units/s
    pub velocity: Vec2,

    /// View yaw in degrees, [0, 360)
    pub yaw: f64,

    /// View pitch in degrees
    pub pitch: f64,
}

impl PlayerState {
    /// Construct a player at a team-biased random start position.
    ///
    /// Draw order: agent, weapon, skill, aim, reaction, x, y, yaw, pitch.
    pub fn spawn(
        id: String,
        team: Team,
        rng: &mut XorShiftRng,
        map: &MapDef,
        catalog: &Catalog,
        roster: &RosterConfig,
    ) -> SimResult<Self> {
        let agent = rng
            .choose(catalog.agents())
            .map_err(|_| SimError::EmptyChoice("agent catalog"))?
            .clone();
        let weapon = rng
            .choose(catalog.weapons())
            .map_err(|_| SimError::EmptyChoice("weapon catalog"))?
            .clone();

        let attributes = PlayerAttributes {
            skill: rng.uniform(roster.skill_range.0, roster.skill_range.1),
            aim: rng.uniform(roster.aim_range.0, roster.aim_range.1),
            reaction: rng.uniform(roster.reaction_range.0, roster.reaction_range.1),
        };

        let (x_lo, x_hi) = team.spawn_x_range(roster.spawn_band, map.width);
        let x = rng.uniform(x_lo, x_hi);
        let y = rng.uniform(0.0, map.height);
        let yaw = rng.uniform(0.0, 360.0);
        let pitch = rng.uniform(roster.pitch_range.0, roster.pitch_range.1);

        Ok(Self {
            id,
            team,
            agent,
            weapon,
            attributes,
            alive: true,
            health: roster.starting_health,
            armor: roster.starting_armor,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            yaw,
            pitch,
        })
    }

    /// Check if this player is an enemy of `other`.
    #[inline]
    pub fn is_enemy_of(&self, other: &PlayerState) -> bool {
        self.team != other.team
    }
}

/// Player id for the `n`th (1-based) member of a team.
pub fn player_id(team: Team, n: u32) -> String {
    format!("{}{}", team.tag(), n)
}

/// Build a fresh roster: team A members first, then team B, each in
/// ascending number. This order is the stable roster order of every frame.
pub fn build_roster(
    rng: &mut XorShiftRng,
    map: &MapDef,
    catalog: &Catalog,
    roster: &RosterConfig,
) -> SimResult<Vec<PlayerState>> {
    let mut players = Vec::with_capacity(roster.team_size as usize * 2);
    for team in Team::ALL {
        for n in 1..=roster.team_size {
            players.push(PlayerState::spawn(player_id(team, n), team, rng, map, catalog, roster)?);
        }
    }
    Ok(players)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_for(seed: u32) -> Vec<PlayerState> {
        let mut rng = XorShiftRng::new(seed);
        build_roster(&mut rng, &MapDef::ascent(), &Catalog::default(), &RosterConfig::default()).unwrap()
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::A.opponent(), Team::B);
        assert_eq!(Team::B.opponent(), Team::A);
    }

    #[test]
    fn test_team_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Team::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&Team::B).unwrap(), "\"B\"");
    }

    #[test]
    fn test_roster_order_and_ids() {
        let players = roster_for(2026);
        let ids: Vec<_> = players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5"]);
        assert_eq!(players.iter().filter(|p| p.team == Team::A).count(), 5);
    }

    #[test]
    fn test_spawn_state() {
        let map = MapDef::ascent();
        for player in roster_for(11) {
            assert!(player.alive);
            assert_eq!(player.health, 100);
            assert_eq!(player.armor, 50);
            assert_eq!(player.velocity, Vec2::ZERO);
            assert!(map.contains(player.position));
            assert!((0.0..360.0).contains(&player.yaw));
            assert!((-10.0..10.0).contains(&player.pitch));

            let a = player.attributes;
            assert!((0.4..0.9).contains(&a.skill));
            assert!((0.4..0.95).contains(&a.aim));
            assert!((0.4..0.9).contains(&a.reaction));
        }
    }

    #[test]
    fn test_team_side_bias() {
        let map = MapDef::ascent();
        for seed in 1..50 {
            for player in roster_for(seed) {
                match player.team {
                    Team::A => assert!(player.position.x <= map.width * 0.25),
                    Team::B => assert!(player.position.x >= map.width * 0.75),
                }
            }
        }
    }

    #[test]
    fn test_roster_determinism() {
        assert_eq!(roster_for(99), roster_for(99));
        assert_ne!(roster_for(99), roster_for(100));
    }

    #[test]
    fn test_loadout_from_catalog() {
        let catalog = Catalog::new(vec!["Only".into()], vec!["Knife".into()]).unwrap();
        let mut rng = XorShiftRng::new(3);
        let players = build_roster(&mut rng, &MapDef::ascent(), &catalog, &RosterConfig::default()).unwrap();
        assert!(players.iter().all(|p| p.agent == "Only" && p.weapon == "Knife"));
    }
}
