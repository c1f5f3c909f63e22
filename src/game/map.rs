//! Map Registry
//!
//! Static map geometry: world bounds, named objective sites and named lanes.
//! Maps are looked up by name; callers can register more at runtime.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::error::{SimError, SimResult};

/// A named polyline players travel along.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Lane name
    pub name: String,
    /// Ordered waypoints (at least two)
    pub waypoints: Vec<Vec2>,
}

impl Lane {
    /// Create a lane from a name and waypoints.
    pub fn new(name: impl Into<String>, waypoints: Vec<Vec2>) -> Self {
        Self {
            name: name.into(),
            waypoints,
        }
    }

    /// Last waypoint. Movement only ever targets this point.
    pub fn terminal(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Immutable geometry of one map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDef {
    /// Map name (registry key)
    pub name: String,
    /// World width; x spans [0, width]
    pub width: f64,
    /// World height; y spans [0, height]
    pub height: f64,
    /// Objective sites by name
    pub sites: BTreeMap<String, Vec2>,
    /// Lanes in declaration order
    pub lanes: Vec<Lane>,
}

impl MapDef {
    /// Check the geometry invariants.
    ///
    /// Bounds must be positive and finite, there must be at least one lane,
    /// and every lane needs at least one segment.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "map {} has invalid bounds {}x{}",
                self.name, self.width, self.height
            )));
        }
        if self.lanes.is_empty() {
            return Err(SimError::EmptyChoice("lane set"));
        }
        for lane in &self.lanes {
            if lane.segment_count() == 0 {
                return Err(SimError::InvalidConfig(format!(
                    "lane {} on map {} needs at least two waypoints",
                    lane.name, self.name
                )));
            }
        }
        Ok(())
    }

    /// Site position by name.
    pub fn site(&self, name: &str) -> Option<Vec2> {
        self.sites.get(name).copied()
    }

    /// Lane by name.
    pub fn lane(&self, name: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.name == name)
    }

    /// Check if a point lies inside the world bounds.
    pub fn contains(&self, point: Vec2) -> bool {
        point.is_within(self.width, self.height)
    }

    /// The built-in "Ascent" layout.
    pub fn ascent() -> Self {
        let sites = BTreeMap::from([
            ("A".to_string(), Vec2::new(230.0, 250.0)),
            ("B".to_string(), Vec2::new(790.0, 270.0)),
            ("Mid".to_string(), Vec2::new(512.0, 520.0)),
        ]);

        let lanes = vec![
            Lane::new("A Main", vec![
                Vec2::new(120.0, 620.0),
                Vec2::new(150.0, 400.0),
                Vec2::new(230.0, 250.0),
            ]),
            Lane::new("A Link", vec![
                Vec2::new(512.0, 520.0),
                Vec2::new(360.0, 330.0),
                Vec2::new(230.0, 250.0),
            ]),
            Lane::new("Mid Courtyard", vec![
                Vec2::new(200.0, 560.0),
                Vec2::new(512.0, 520.0),
            ]),
            Lane::new("Market", vec![
                Vec2::new(512.0, 520.0),
                Vec2::new(660.0, 380.0),
                Vec2::new(790.0, 270.0),
            ]),
            Lane::new("B Main", vec![
                Vec2::new(900.0, 640.0),
                Vec2::new(880.0, 420.0),
                Vec2::new(790.0, 270.0),
            ]),
            Lane::new("Catwalk", vec![
                Vec2::new(820.0, 560.0),
                Vec2::new(512.0, 520.0),
            ]),
        ];

        Self {
            name: "Ascent".to_string(),
            width: 1024.0,
            height: 1024.0,
            sites,
            lanes,
        }
    }
}

/// Maps keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MapRegistry {
    maps: BTreeMap<String, MapDef>,
}

impl MapRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in maps.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let ascent = MapDef::ascent();
        registry.maps.insert(ascent.name.clone(), ascent);
        registry
    }

    /// Add or replace a map after validating it.
    pub fn register(&mut self, map: MapDef) -> SimResult<()> {
        map.validate()?;
        self.maps.insert(map.name.clone(), map);
        Ok(())
    }

    /// Look a map up by exact name.
    pub fn lookup(&self, name: &str) -> SimResult<&MapDef> {
        self.maps
            .get(name)
            .ok_or_else(|| SimError::UnknownMap(name.to_string()))
    }

    /// Registered map names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ascent() {
        let registry = MapRegistry::builtin();
        let ascent = registry.lookup("Ascent").unwrap();
        assert!(ascent.validate().is_ok());
        assert!(ascent.site("A").is_some());
        assert!(ascent.site("B").is_some());
        assert!(ascent.lane("Market").is_some());
    }

    #[test]
    fn test_unknown_map() {
        let registry = MapRegistry::builtin();
        let err = registry.lookup("Atlantis").unwrap_err();
        assert!(matches!(err, SimError::UnknownMap(ref name) if name == "Atlantis"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = MapRegistry::builtin();
        assert!(registry.lookup("ascent").is_err());
    }

    #[test]
    fn test_ascent_geometry_inside_bounds() {
        let ascent = MapDef::ascent();
        for point in ascent.sites.values() {
            assert!(ascent.contains(*point));
        }
        for lane in &ascent.lanes {
            assert!(lane.segment_count() >= 1);
            for point in &lane.waypoints {
                assert!(ascent.contains(*point), "{} leaves the map", lane.name);
            }
        }
    }

    #[test]
    fn test_lane_terminal_is_last_waypoint() {
        let lane = Lane::new("test", vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
        assert_eq!(lane.terminal(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(Lane::new("Empty", Vec::new()).terminal(), None);
    }

    #[test]
    fn test_register_custom_map() {
        let mut registry = MapRegistry::builtin();
        let custom = MapDef {
            name: "Range".to_string(),
            width: 200.0,
            height: 100.0,
            sites: BTreeMap::new(),
            lanes: vec![Lane::new("straight", vec![Vec2::new(0.0, 50.0), Vec2::new(200.0, 50.0)])],
        };
        registry.register(custom).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Ascent", "Range"]);
        assert_eq!(registry.lookup("Range").unwrap().width, 200.0);
    }

    #[test]
    fn test_register_rejects_degenerate_lane() {
        let mut registry = MapRegistry::new();
        let broken = MapDef {
            name: "Broken".to_string(),
            width: 10.0,
            height: 10.0,
            sites: BTreeMap::new(),
            lanes: vec![Lane::new("dot", vec![Vec2::new(1.0, 1.0)])],
        };
        assert!(matches!(registry.register(broken), Err(SimError::InvalidConfig(_))));

        let laneless = MapDef {
            name: "Empty".to_string(),
            width: 10.0,
            height: 10.0,
            sites: BTreeMap::new(),
            lanes: vec![],
        };
        assert!(registry.register(laneless).is_err());
    }

    #[test]
    fn test_map_def_json_roundtrip_shape() {
        let json = serde_json::to_value(MapDef::ascent()).unwrap();
        assert_eq!(json["name"], "Ascent");
        assert!(json["lanes"].as_array().unwrap().len() >= 1);
    }
}
