//! Round Loop
//!
//! Drives one round tick by tick: movement, engagement, combat, death
//! handling, frame recording and the end-of-round check.
//!
//! ```text
//! start() ──► Running ──step()──► Running ──step()──► ... ──► Ended
//!   │                                                           ▲
//!   └─ frame 0 (spawn)            elimination or tick budget ───┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::core::rng::XorShiftRng;
use crate::error::{SimError, SimResult};
use crate::game::catalog::Catalog;
use crate::game::combat::{apply_damage, resolve_shot};
use crate::game::config::SimConfig;
use crate::game::events::CombatEvent;
use crate::game::map::MapDef;
use crate::game::movement::advance;
use crate::game::player::{build_roster, PlayerState, Team};
use crate::record::frame::Frame;
use crate::record::match_record::RoundRecord;

/// Why a round stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum EndReason {
    /// Every player on `eliminated` is dead.
    Elimination {
        /// Team with no living players
        eliminated: Team,
    },
    /// The nominal tick budget ran out.
    TimeExpired,
}

/// Round lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Ticks still being produced
    Running,
    /// No more frames will be produced
    Ended(EndReason),
}

/// Result of one step.
#[derive(Debug, Default)]
pub struct StepResult {
    /// Index of the frame recorded by this step
    pub frame: u32,
    /// DAMAGE events emitted this step
    pub hits: usize,
    /// KILL events emitted this step
    pub kills: usize,
    /// Whether the round ended on this step
    pub round_ended: bool,
}

/// Mutable state of a round in progress.
#[derive(Debug)]
pub struct RoundState<'a> {
    number: u32,
    map: &'a MapDef,
    players: Vec<PlayerState>,
    pov: String,
    tick: u32,
    total_ticks: u32,
    phase: RoundPhase,
    frames: Vec<Frame>,
}

impl<'a> RoundState<'a> {
    /// Start a round: fresh roster, duration, POV, and the spawn frame.
    ///
    /// Draw order: roster, duration, POV.
    pub fn start(
        number: u32,
        rng: &mut XorShiftRng,
        map: &'a MapDef,
        catalog: &Catalog,
        config: &SimConfig,
    ) -> SimResult<Self> {
        map.validate()?;
        let players = build_roster(rng, map, catalog, &config.roster)?;

        let duration_secs = rng.uniform_int(config.min_round_secs as i64, config.max_round_secs as i64) as u32;
        let total_ticks = duration_secs.saturating_mul(config.tick_rate);

        let pov = rng
            .choose(&players)
            .map_err(|_| SimError::EmptyChoice("roster"))?
            .id
            .clone();

        let spawn = Frame::capture(0, config.tick_rate, &pov, &players, Vec::new());

        let mut state = Self {
            number,
            map,
            players,
            pov,
            tick: 0,
            total_ticks,
            phase: RoundPhase::Running,
            frames: Vec::new(),
        };
        state.frames.push(spawn);
        state.check_end();
        Ok(state)
    }

    /// Round number (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Check if more steps will produce frames.
    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Nominal frame budget (`duration * tick_rate`).
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Point-of-view player, fixed for the round.
    pub fn pov(&self) -> &str {
        &self.pov
    }

    /// Players in roster order.
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Living players on a team.
    pub fn alive_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.team == team && p.alive).count()
    }

    /// Simulate one tick and record its frame.
    ///
    /// Each player alive at their turn, in roster order: pick a lane and
    /// step toward its end, roll for an engagement, and on success shoot a
    /// random living enemy. Calling this on an ended round is a no-op.
    pub fn step(&mut self, rng: &mut XorShiftRng, config: &SimConfig) -> SimResult<StepResult> {
        if !self.is_running() {
            return Ok(StepResult {
                frame: self.tick,
                round_ended: true,
                ..StepResult::default()
            });
        }

        self.tick += 1;
        let map = self.map;
        let mut events: Vec<CombatEvent> = Vec::new();
        let mut result = StepResult {
            frame: self.tick,
            ..StepResult::default()
        };

        for idx in 0..self.players.len() {
            if !self.players[idx].alive {
                continue;
            }

            let lane = rng
                .choose(&map.lanes)
                .map_err(|_| SimError::EmptyChoice("lane set"))?;
            let target = lane
                .terminal()
                .ok_or_else(|| SimError::InvalidConfig(format!("lane {} has no waypoints", lane.name)))?;
            advance(&mut self.players[idx], target, &config.movement, config.tick_rate);

            if !rng.chance(config.combat.engagement_chance) {
                continue;
            }

            let attacker = &self.players[idx];
            let enemies: Vec<usize> = self
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.alive && p.is_enemy_of(attacker))
                .map(|(i, _)| i)
                .collect();
            if enemies.is_empty() {
                continue;
            }
            let victim_idx = *rng
                .choose(&enemies)
                .map_err(|_| SimError::EmptyChoice("living enemy set"))?;

            let Some(hit) = resolve_shot(attacker, &self.players[victim_idx], rng, &config.combat) else {
                continue;
            };
            events.push(hit.to_event(attacker, &self.players[victim_idx]));
            result.hits += 1;

            let (attacker_id, weapon) = (attacker.id.clone(), attacker.weapon.clone());
            if apply_damage(&mut self.players[victim_idx], hit.damage) {
                let victim_id = &self.players[victim_idx].id;
                #[cfg(feature = "debug-tracing")]
                tracing::trace!(
                    round = self.number,
                    tick = self.tick,
                    killer = %attacker_id,
                    victim = %victim_id,
                    weapon = %weapon,
                    "kill"
                );
                events.push(CombatEvent::kill(&attacker_id, victim_id, &weapon));
                result.kills += 1;
            }
        }

        self.frames.push(Frame::capture(self.tick, config.tick_rate, &self.pov, &self.players, events));
        self.check_end();
        result.round_ended = !self.is_running();
        Ok(result)
    }

    /// Elimination is checked before the tick budget.
    fn check_end(&mut self) {
        for team in Team::ALL {
            if self.alive_count(team) == 0 {
                self.phase = RoundPhase::Ended(EndReason::Elimination { eliminated: team });
                return;
            }
        }
        if self.tick + 1 >= self.total_ticks {
            self.phase = RoundPhase::Ended(EndReason::TimeExpired);
        }
    }

    /// Package the recorded frames.
    pub fn finish(self) -> RoundRecord {
        RoundRecord {
            round: self.number,
            map: self.map.name.clone(),
            pov: self.pov,
            frames: self.frames,
        }
    }
}

/// Run one round from spawn to its end.
pub fn run_round(
    number: u32,
    rng: &mut XorShiftRng,
    map: &MapDef,
    catalog: &Catalog,
    config: &SimConfig,
) -> SimResult<RoundRecord> {
    let mut state = RoundState::start(number, rng, map, catalog, config)?;
    let mut kills = 0;

    while state.is_running() {
        kills += state.step(rng, config)?.kills;
    }

    debug!(
        round = number,
        frames = state.frames().len(),
        nominal = state.total_ticks(),
        kills,
        phase = ?state.phase(),
        "round complete"
    );

    Ok(state.finish())
}

// =============================================================================
// TESTS
// =============================================================================
