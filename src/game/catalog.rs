//! Loadout Catalogs
//!
//! Cosmetic content drawn at player construction. Passed into the
//! simulation rather than hard-coded so content can change without
//! touching simulation logic.

use serde::{Serialize, Deserialize};

use crate::error::{SimError, SimResult};

/// Built-in agent archetypes.
pub const DEFAULT_AGENTS: [&str; 10] = [
    "Jett", "Sage", "Viper", "Omen", "Reyna",
    "Sova", "Breach", "Brimstone", "Killjoy", "Phoenix",
];

/// Built-in weapons.
pub const DEFAULT_WEAPONS: [&str; 8] = [
    "Vandal", "Phantom", "Operator", "Sheriff",
    "Spectre", "Guardian", "Bulldog", "Marshal",
];

/// Agent and weapon lists players draw from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    agents: Vec<String>,
    weapons: Vec<String>,
}

impl Catalog {
    /// Build a catalog. Both lists must be non-empty.
    pub fn new(agents: Vec<String>, weapons: Vec<String>) -> SimResult<Self> {
        if agents.is_empty() {
            return Err(SimError::EmptyChoice("agent catalog"));
        }
        if weapons.is_empty() {
            return Err(SimError::EmptyChoice("weapon catalog"));
        }
        Ok(Self { agents, weapons })
    }

    /// Agent archetypes, in draw order.
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Weapons, in draw order.
    pub fn weapons(&self) -> &[String] {
        &self.weapons
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            agents: DEFAULT_AGENTS.iter().map(|s| s.to_string()).collect(),
            weapons: DEFAULT_WEAPONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.agents().len(), DEFAULT_AGENTS.len());
        assert_eq!(catalog.weapons()[0], "Vandal");
    }

    #[test]
    fn test_empty_lists_rejected() {
        assert!(Catalog::new(vec![], vec!["Vandal".into()]).is_err());
        assert!(Catalog::new(vec!["Jett".into()], vec![]).is_err());
        assert!(Catalog::new(vec!["Jett".into()], vec!["Vandal".into()]).is_ok());
    }
}
