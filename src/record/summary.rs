//! Round and Match Summaries
//!
//! Aggregates derived from a finished record: who won each round and why,
//! plus kill, damage and headshot totals per team.

use std::collections::BTreeMap;
use serde::Serialize;

use crate::game::events::CombatEvent;
use crate::game::player::Team;
use crate::game::round::EndReason;
use crate::record::match_record::{MatchRecord, RoundRecord};

/// Per-team combat totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    /// Kills credited to the team
    pub kills: u32,
    /// Raw damage dealt by the team
    pub damage: u64,
    /// Headshot hits by the team
    pub headshots: u32,
    /// Players alive at round end
    pub survivors: u32,
}

/// Outcome of one round.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    /// Round number
    pub round: u32,
    /// Frames recorded
    pub duration_ticks: u32,
    /// Why the round stopped
    pub end_reason: EndReason,
    /// Winning team; `None` on a time-out with equal survivors
    pub winner: Option<Team>,
    /// Team A totals
    pub team_a: TeamStats,
    /// Team B totals
    pub team_b: TeamStats,
}

impl RoundSummary {
    /// Summarize a round record.
    ///
    /// A wiped team loses. On time expiry the team with more survivors
    /// wins and equal counts give no winner.
    pub fn from_round(round: &RoundRecord) -> Self {
        let mut team_of: BTreeMap<&str, Team> = BTreeMap::new();
        if let Some(first) = round.frames.first() {
            for player in &first.players {
                team_of.insert(player.id.as_str(), player.team);
            }
        }

        let mut team_a = TeamStats::default();
        let mut team_b = TeamStats::default();

        for event in round.frames.iter().flat_map(|f| f.events.iter()) {
            let stats = match team_of.get(event.actor()) {
                Some(Team::A) => &mut team_a,
                Some(Team::B) => &mut team_b,
                None => continue,
            };
            match event {
                CombatEvent::Damage { damage, headshot, .. } => {
                    stats.damage += u64::from(*damage);
                    if *headshot {
                        stats.headshots += 1;
                    }
                }
                CombatEvent::Kill { .. } => stats.kills += 1,
            }
        }

        if let Some(last) = round.last_frame() {
            team_a.survivors = last.alive_count(Team::A) as u32;
            team_b.survivors = last.alive_count(Team::B) as u32;
        }

        let end_reason = if team_a.survivors == 0 {
            EndReason::Elimination { eliminated: Team::A }
        } else if team_b.survivors == 0 {
            EndReason::Elimination { eliminated: Team::B }
        } else {
            EndReason::TimeExpired
        };

        let winner = match end_reason {
            EndReason::Elimination { eliminated } => Some(eliminated.opponent()),
            EndReason::TimeExpired => match team_a.survivors.cmp(&team_b.survivors) {
                std::cmp::Ordering::Greater => Some(Team::A),
                std::cmp::Ordering::Less => Some(Team::B),
                std::cmp::Ordering::Equal => None,
            },
        };

        Self {
            round: round.round,
            duration_ticks: round.frames.len() as u32,
            end_reason,
            winner,
            team_a,
            team_b,
        }
    }

    /// Totals for one team.
    pub fn stats(&self, team: Team) -> &TeamStats {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }
}

/// Outcome of a whole match.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Match id
    pub match_id: String,
    /// Rounds won by team A
    pub rounds_won_a: u32,
    /// Rounds won by team B
    pub rounds_won_b: u32,
    /// Rounds with no winner
    pub drawn_rounds: u32,
    /// Total kills
    pub kills: u32,
    /// Total raw damage
    pub damage: u64,
    /// Total headshot hits
    pub headshots: u32,
    /// Total frames
    pub frames: usize,
    /// Per-round breakdown
    pub rounds: Vec<RoundSummary>,
}

impl MatchSummary {
    /// Summarize a match record.
    pub fn from_match(record: &MatchRecord) -> Self {
        let rounds: Vec<RoundSummary> = record.rounds.iter().map(RoundSummary::from_round).collect();

        let mut summary = Self {
            match_id: record.match_id.clone(),
            rounds_won_a: 0,
            rounds_won_b: 0,
            drawn_rounds: 0,
            kills: 0,
            damage: 0,
            headshots: 0,
            frames: record.frame_count(),
            rounds: Vec::new(),
        };

        for round in &rounds {
            match round.winner {
                Some(Team::A) => summary.rounds_won_a += 1,
                Some(Team::B) => summary.rounds_won_b += 1,
                None => summary.drawn_rounds += 1,
            }
            for stats in [&round.team_a, &round.team_b] {
                summary.kills += stats.kills;
                summary.damage += stats.damage;
                summary.headshots += stats.headshots;
            }
        }

        summary.rounds = rounds;
        summary
    }

    /// Team with more round wins.
    pub fn leader(&self) -> Option<Team> {
        match self.rounds_won_a.cmp(&self.rounds_won_b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}
