//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Credit amounts are whole numbers; balances never go negative
pub type Credits = u64;

/// 2D position in map space
pub use glam::DVec2 as Vec2;

/// Location identifier for the sector map
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for a contract
///
/// Built from the tick the contract was generated on plus a salt that the
/// offer board guarantees is unique, so two offers never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId {
    pub tick: Tick,
    pub salt: u32,
}

impl ContractId {
    pub fn new(tick: Tick, salt: u32) -> Self {
        Self { tick, salt }
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}-{}", self.tick, self.salt)
    }
}

impl std::str::FromStr for ContractId {
    type Err = String;

    /// Parses the `C<tick>-<salt>` form produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix('C')
            .or_else(|| s.strip_prefix('c'))
            .ok_or_else(|| format!("contract id must start with 'C': {s}"))?;
        let (tick, salt) = body
            .split_once('-')
            .ok_or_else(|| format!("contract id must look like C<tick>-<salt>: {s}"))?;
        let tick = tick.parse().map_err(|_| format!("bad tick in contract id: {s}"))?;
        let salt = salt.parse().map_err(|_| format!("bad salt in contract id: {s}"))?;
        Ok(Self { tick, salt })
    }
}

/// Political affiliation of locations and contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Faction {
    Neutral,
    Federation,
    MiningGuild,
    FreeTraders,
}

impl Faction {
    pub const ALL: [Faction; 4] = [
        Faction::Neutral,
        Faction::Federation,
        Faction::MiningGuild,
        Faction::FreeTraders,
    ];

    /// Neutral work pays but earns no standing with anyone
    pub fn is_neutral(&self) -> bool {
        matches!(self, Faction::Neutral)
    }
}

/// Risk classification of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Med,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }
}

/// Euclidean distance between two map positions
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_id_display_roundtrip() {
        let id = ContractId::new(1200, 7);
        assert_eq!(id.to_string(), "C1200-7");
        assert_eq!("C1200-7".parse::<ContractId>(), Ok(id));
        assert!("1200-7".parse::<ContractId>().is_err());
        assert!("Cx-7".parse::<ContractId>().is_err());
    }

    #[test]
    fn test_location_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<LocationId, &str> = HashMap::new();
        map.insert(LocationId::new("ceres"), "belt");
        assert_eq!(map.get(&LocationId::from("ceres")), Some(&"belt"));
    }

    #[test]
    fn test_faction_neutral() {
        assert!(Faction::Neutral.is_neutral());
        assert!(!Faction::Federation.is_neutral());
    }

    #[test]
    fn test_distance_is_euclidean() {
        let d = distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
