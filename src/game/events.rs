//! Combat Events
//!
//! Discrete events emitted during a tick. Events are created once and then
//! only read; each frame owns the events of its tick in emission order.

use serde::{Serialize, Deserialize};

/// A combat event.
///
/// Serialized with a `type` tag of `DAMAGE` or `KILL`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum CombatEvent {
    /// A shot connected
    Damage {
        /// Attacker id
        source: String,
        /// Victim id
        target: String,
        /// Attacker's weapon
        weapon: String,
        /// Damage dealt (raw draw, before health floor)
        damage: u32,
        /// Headshot classification
        headshot: bool,
    },

    /// A player was killed
    Kill {
        /// Attacker id
        killer: String,
        /// Victim id
        victim: String,
        /// Attacker's weapon
        weapon: String,
    },
}

impl CombatEvent {
    /// Create a kill event.
    pub fn kill(killer: &str, victim: &str, weapon: &str) -> Self {
        Self::Kill {
            killer: killer.to_string(),
            victim: victim.to_string(),
            weapon: weapon.to_string(),
        }
    }

    /// Player credited with the event.
    pub fn actor(&self) -> &str {
        match self {
            Self::Damage { source, .. } => source,
            Self::Kill { killer, .. } => killer,
        }
    }

    /// Player on the receiving end.
    pub fn subject(&self) -> &str {
        match self {
            Self::Damage { target, .. } => target,
            Self::Kill { victim, .. } => victim,
        }
    }

    /// Check if this is a kill.
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Kill { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_damage_wire_shape() {
        let event = CombatEvent::Damage {
            source: "A1".into(),
            target: "B2".into(),
            weapon: "Vandal".into(),
            damage: 42,
            headshot: true,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "DAMAGE",
                "source": "A1",
                "target": "B2",
                "weapon": "Vandal",
                "damage": 42,
                "headshot": true
            })
        );
    }

    #[test]
    fn test_kill_wire_shape() {
        let event = CombatEvent::kill("B4", "A3", "Operator");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "KILL", "killer": "B4", "victim": "A3", "weapon": "Operator"})
        );
        assert!(event.is_kill());
        assert_eq!(event.actor(), "B4");
        assert_eq!(event.subject(), "A3");
    }

    #[test]
    fn test_parse_from_consumer_json() {
        let event: CombatEvent =
            serde_json::from_str(r#"{"type":"KILL","killer":"A1","victim":"B1","weapon":"Ghost"}"#).unwrap();
        assert_eq!(event, CombatEvent::kill("A1", "B1", "Ghost"));
    }
}
