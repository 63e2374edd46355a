//! Distribution configuration.
//!
//! One immutable value constructed up front and passed to
//! [`distribute`](crate::distribute); the engine never mutates it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pool::PoolSpec;

/// The goal song pin: a song that must be reserved ahead of general
/// allocation, optionally into one specific pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    /// Identifier of the goal song.
    pub song: String,
    /// Pool the goal must land in. `None` lets the engine pick any
    /// compatible pool at random.
    #[serde(default)]
    pub pool: Option<String>,
}

/// Everything one distribution run needs besides the catalog and the RNG.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeConfig {
    /// Pool name -> pool spec.
    pub pools: BTreeMap<String, PoolSpec>,
    /// Pool name -> song identifiers forced into that pool.
    #[serde(default)]
    pub inclusions: BTreeMap<String, Vec<String>>,
    /// Pool name -> song identifiers forbidden from that pool.
    #[serde(default)]
    pub exclusions: BTreeMap<String, Vec<String>>,
    /// Optional goal song pin.
    #[serde(default)]
    pub goal: Option<GoalSpec>,
    /// When true a song may appear in several pools, as long as no two of
    /// those pools share an instrument. When false each song is assigned at
    /// most once, period.
    #[serde(default)]
    pub reuse_across_instruments: bool,
}

impl DistributeConfig {
    /// A configuration with the given pools and everything else empty.
    pub fn new(pools: BTreeMap<String, PoolSpec>) -> Self {
        Self {
            pools,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_defaults() {
        let json = r#"{
            "pools": {
                "lead": {
                    "instrument": "Guitar",
                    "target": 5,
                    "min_difficulty": 0,
                    "max_difficulty": 10
                }
            }
        }"#;
        let config: DistributeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.pools["lead"].target, 5);
        assert!(config.inclusions.is_empty());
        assert!(config.goal.is_none());
        assert!(!config.reuse_across_instruments);
    }

    #[test]
    fn test_unknown_pool_fields_are_rejected() {
        let json = r#"{
            "pools": {
                "lead": {
                    "instrument": "Guitar",
                    "target": 5,
                    "min_difficulty": 0,
                    "max_difficulty": 10,
                    "color": "red"
                }
            }
        }"#;
        assert!(serde_json::from_str::<DistributeConfig>(json).is_err());
    }
}
