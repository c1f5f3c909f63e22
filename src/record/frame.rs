//! Frame Snapshots
//!
//! One frame per simulated tick: the full roster as it stood after the
//! tick plus the events the tick produced. Frames are built once and never
//! mutated afterwards.

use serde::{Serialize, Deserialize};

use crate::game::events::CombatEvent;
use crate::game::player::{PlayerState, Team};

/// One player's observable state inside a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player id
    pub id: String,
    /// Team tag
    pub team: Team,
    /// Agent archetype
    pub agent: String,
    /// Alive flag
    pub alive: bool,
    /// Health
    pub hp: i32,
    /// Armor
    pub armor: i32,
    /// Weapon
    pub weapon: String,
    /// Position x
    pub x: f64,
    /// Position y
    pub y: f64,
    /// Velocity x
    pub vx: f64,
    /// Velocity y
    pub vy: f64,
    /// View yaw (degrees)
    pub yaw: f64,
    /// View pitch (degrees)
    pub pitch: f64,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(player: &PlayerState) -> Self {
        Self {
            id: player.id.clone(),
            team: player.team,
            agent: player.agent.clone(),
            alive: player.alive,
            hp: player.health,
            armor: player.armor,
            weapon: player.weapon.clone(),
            x: player.position.x,
            y: player.position.y,
            vx: player.velocity.x,
            vy: player.velocity.y,
            yaw: player.yaw,
            pitch: player.pitch,
        }
    }
}

/// Snapshot of one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick index within the round (0-based)
    pub frame: u32,
    /// Seconds since round start (`frame / tick_rate`)
    pub time: f64,
    /// Point-of-view player id
    pub pov: String,
    /// Every round participant, in roster order
    pub players: Vec<PlayerSnapshot>,
    /// Events produced during this tick, in emission order
    pub events: Vec<CombatEvent>,
}

impl Frame {
    /// Capture the roster after a tick.
    pub fn capture(
        frame: u32,
        tick_rate: u32,
        pov: &str,
        players: &[PlayerState],
        events: Vec<CombatEvent>,
    ) -> Self {
        Self {
            frame,
            time: frame as f64 / tick_rate as f64,
            pov: pov.to_string(),
            players: players.iter().map(PlayerSnapshot::from).collect(),
            events,
        }
    }

    /// Snapshot of a player by id.
    pub fn player(&self, id: &str) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Living players on a team.
    pub fn alive_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.team == team && p.alive).count()
    }
}
