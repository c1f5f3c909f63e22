//! Record Validation
//!
//! Checks a finished match record against the guarantees consumers rely
//! on, and replays a record from its seed to confirm it is reproducible.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::error::{SimError, SimResult};
use crate::game::config::SimConfig;
use crate::game::events::CombatEvent;
use crate::game::map::{MapDef, MapRegistry};
use crate::game::player::Team;
use crate::record::frame::{Frame, PlayerSnapshot};
use crate::record::match_record::{MatchRecord, RoundRecord, Simulator};

/// A violated record property.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Round map is not registered.
    #[error("round {round}: unknown map {map}")]
    UnknownMap { round: u32, map: String },

    /// Round numbers are not 1, 2, 3, ...
    #[error("round {found} recorded at position {expected}")]
    RoundOrder { expected: u32, found: u32 },

    /// Round has no frames.
    #[error("round {round}: no frames")]
    EmptyRound { round: u32 },

    /// Frame index does not match its position.
    #[error("round {round}: frame {found} at position {expected}")]
    FrameOrder { round: u32, expected: u32, found: u32 },

    /// Frame time is not `frame / tick_rate`.
    #[error("round {round} frame {frame}: time {time} does not match tick rate")]
    FrameTime { round: u32, frame: u32, time: f64 },

    /// Frame POV differs from the round POV.
    #[error("round {round} frame {frame}: pov {found} differs from round pov")]
    PovChanged { round: u32, frame: u32, found: String },

    /// Roster is not the stable set of participants.
    #[error("round {round} frame {frame}: roster changed or incomplete")]
    Roster { round: u32, frame: u32 },

    /// Spawn frame has events or non-starting values.
    #[error("round {round}: spawn frame is not a clean snapshot ({detail})")]
    Spawn { round: u32, detail: String },

    /// Player spawned outside the map.
    #[error("round {round}: {player} spawned out of bounds")]
    SpawnOutOfBounds { round: u32, player: String },

    /// Health went up.
    #[error("round {round} frame {frame}: {player} health increased")]
    HealthIncreased { round: u32, frame: u32, player: String },

    /// A dead player changed state.
    #[error("round {round} frame {frame}: {player} changed after death")]
    ChangedAfterDeath { round: u32, frame: u32, player: String },

    /// KILL without the victim being dead, or a death without a KILL.
    #[error("round {round} frame {frame}: kill and death of {player} disagree")]
    KillMismatch { round: u32, frame: u32, player: String },

    /// DAMAGE outside the configured range.
    #[error("round {round} frame {frame}: damage {damage} out of range")]
    DamageOutOfRange { round: u32, frame: u32, damage: u32 },

    /// Event from a dead actor, against a dead or friendly subject.
    #[error("round {round} frame {frame}: {actor} cannot engage {subject}")]
    IllegalEngagement { round: u32, frame: u32, actor: String, subject: String },

    /// Frames continue after a team was wiped.
    #[error("round {round}: frame {frame} recorded after elimination")]
    PastElimination { round: u32, frame: u32 },

    /// Frame count does not fit the duration rules.
    #[error("round {round}: {frames} frames is not a valid round length")]
    Length { round: u32, frames: u32 },
}

/// Check a record against the built-in maps and default limits.
pub fn validate_match(record: &MatchRecord) -> Result<(), ValidationError> {
    let mut config = SimConfig::default();
    config.tick_rate = record.tick_rate;
    validate_match_with(record, &config, &MapRegistry::builtin())
}

/// Check a record against explicit limits and maps.
pub fn validate_match_with(
    record: &MatchRecord,
    config: &SimConfig,
    registry: &MapRegistry,
) -> Result<(), ValidationError> {
    for (i, round) in record.rounds.iter().enumerate() {
        let expected = i as u32 + 1;
        if round.round != expected {
            return Err(ValidationError::RoundOrder { expected, found: round.round });
        }
        let map = registry.lookup(&round.map).map_err(|_| ValidationError::UnknownMap {
            round: round.round,
            map: round.map.clone(),
        })?;
        validate_round(round, record.tick_rate, config, map)?;
    }
    Ok(())
}

fn validate_round(
    round: &RoundRecord,
    tick_rate: u32,
    config: &SimConfig,
    map: &MapDef,
) -> Result<(), ValidationError> {
    let r = round.round;
    let spawn = round.frames.first().ok_or(ValidationError::EmptyRound { round: r })?;
    check_spawn(r, spawn, config, map)?;

    let roster: Vec<(&str, Team)> = spawn.players.iter().map(|p| (p.id.as_str(), p.team)).collect();
    let team_size = config.roster.team_size as usize;
    for team in Team::ALL {
        if roster.iter().filter(|(_, t)| *t == team).count() != team_size {
            return Err(ValidationError::Roster { round: r, frame: 0 });
        }
    }

    let mut previous: Option<&Frame> = None;
    for (i, frame) in round.frames.iter().enumerate() {
        let index = i as u32;
        if frame.frame != index {
            return Err(ValidationError::FrameOrder { round: r, expected: index, found: frame.frame });
        }
        if frame.time != index as f64 / tick_rate as f64 {
            return Err(ValidationError::FrameTime { round: r, frame: index, time: frame.time });
        }
        if frame.pov != round.pov {
            return Err(ValidationError::PovChanged { round: r, frame: index, found: frame.pov.clone() });
        }
        let same_roster = frame.players.len() == roster.len()
            && frame.players.iter().zip(&roster).all(|(p, (id, team))| p.id == *id && p.team == *team);
        if !same_roster {
            return Err(ValidationError::Roster { round: r, frame: index });
        }

        if let Some(prev) = previous {
            if Team::ALL.iter().any(|&t| prev.alive_count(t) == 0) {
                return Err(ValidationError::PastElimination { round: r, frame: index });
            }
            check_transition(r, prev, frame)?;
        }
        check_events(r, frame, config)?;
        previous = Some(frame);
    }

    check_length(round, tick_rate, config)
}

fn check_spawn(round: u32, spawn: &Frame, config: &SimConfig, map: &MapDef) -> Result<(), ValidationError> {
    if !spawn.events.is_empty() {
        return Err(ValidationError::Spawn { round, detail: "events present".into() });
    }
    for p in &spawn.players {
        if !p.alive || p.hp != config.roster.starting_health || p.armor != config.roster.starting_armor {
            return Err(ValidationError::Spawn { round, detail: format!("{} not at full health", p.id) });
        }
        if !(p.x >= 0.0 && p.x <= map.width && p.y >= 0.0 && p.y <= map.height) {
            return Err(ValidationError::SpawnOutOfBounds { round, player: p.id.clone() });
        }
    }
    Ok(())
}

fn check_transition(round: u32, prev: &Frame, frame: &Frame) -> Result<(), ValidationError> {
    check_engagements(round, prev, frame)?;

    for (before, after) in prev.players.iter().zip(&frame.players) {
        if after.hp > before.hp {
            return Err(ValidationError::HealthIncreased { round, frame: frame.frame, player: after.id.clone() });
        }
        if !before.alive && !frozen(before, after) {
            return Err(ValidationError::ChangedAfterDeath { round, frame: frame.frame, player: after.id.clone() });
        }

        let died_now = before.alive && !after.alive;
        let killed_now = frame
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Kill { victim, .. } if *victim == after.id));
        if died_now != killed_now {
            return Err(ValidationError::KillMismatch { round, frame: frame.frame, player: after.id.clone() });
        }
    }
    Ok(())
}

/// Replays the tick's events over the previous frame's alive flags.
/// Actor and subject must both be alive at the event and on opposite teams;
/// a KILL takes its victim out for the rest of the tick.
fn check_engagements(round: u32, prev: &Frame, frame: &Frame) -> Result<(), ValidationError> {
    let mut state: BTreeMap<&str, (Team, bool)> =
        prev.players.iter().map(|p| (p.id.as_str(), (p.team, p.alive))).collect();

    for event in &frame.events {
        let actor = state.get(event.actor()).copied();
        let subject = state.get(event.subject()).copied();
        let legal = matches!(
            (actor, subject),
            (Some((actor_team, true)), Some((subject_team, true))) if actor_team != subject_team
        );
        if !legal {
            return Err(ValidationError::IllegalEngagement {
                round,
                frame: frame.frame,
                actor: event.actor().to_string(),
                subject: event.subject().to_string(),
            });
        }
        if event.is_kill() {
            if let Some(entry) = state.get_mut(event.subject()) {
                entry.1 = false;
            }
        }
    }
    Ok(())
}

fn frozen(before: &PlayerSnapshot, after: &PlayerSnapshot) -> bool {
    !after.alive
        && after.hp == before.hp
        && after.x == before.x
        && after.y == before.y
        && after.vx == before.vx
        && after.vy == before.vy
}

fn check_events(round: u32, frame: &Frame, config: &SimConfig) -> Result<(), ValidationError> {
    let range = config.combat.damage_min..=config.combat.damage_max;
    for event in &frame.events {
        match event {
            CombatEvent::Damage { damage, .. } => {
                if !range.contains(&(*damage as i32)) {
                    return Err(ValidationError::DamageOutOfRange { round, frame: frame.frame, damage: *damage });
                }
            }
            CombatEvent::Kill { victim, .. } => {
                let dead = frame.player(victim).map(|p| !p.alive && p.hp <= 0).unwrap_or(false);
                if !dead {
                    return Err(ValidationError::KillMismatch { round, frame: frame.frame, player: victim.clone() });
                }
            }
        }
    }
    Ok(())
}

/// A round either runs its whole budget or stops at the first wipe.
fn check_length(round: &RoundRecord, tick_rate: u32, config: &SimConfig) -> Result<(), ValidationError> {
    let frames = round.frames.len() as u32;
    let max = config.max_round_secs.saturating_mul(tick_rate);
    let min = config.min_round_secs.saturating_mul(tick_rate);
    let bad = || ValidationError::Length { round: round.round, frames };

    if frames > max {
        return Err(bad());
    }
    let wiped = round
        .last_frame()
        .map(|last| Team::ALL.iter().any(|&t| last.alive_count(t) == 0))
        .unwrap_or(false);
    if !wiped && (frames < min || tick_rate == 0 || frames % tick_rate != 0) {
        return Err(bad());
    }
    Ok(())
}

/// Regenerate a record from its own parameters and compare fingerprints.
///
/// Tunables not carried by the record come from `base`.
pub fn verify_replay(record: &MatchRecord, base: &SimConfig) -> SimResult<bool> {
    verify_replay_with(record, &Simulator::builtin(base.clone()))
}

/// Replay against a simulator's maps and catalog.
pub fn verify_replay_with(record: &MatchRecord, simulator: &Simulator) -> SimResult<bool> {
    let map = record
        .map()
        .ok_or_else(|| SimError::InvalidConfig("record has no rounds to replay".into()))?;

    let config = SimConfig {
        seed: record.seed,
        map: map.to_string(),
        rounds: record.rounds.len() as u32,
        tick_rate: record.tick_rate,
        ..simulator.config().clone()
    };

    let replayed = simulator.with_config(config).run()?;
    Ok(replayed.fingerprint()? == record.fingerprint()?)
}
