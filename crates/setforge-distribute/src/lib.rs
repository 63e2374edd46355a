//! Setforge Song Distribution Engine
//!
//! This crate assigns a catalog of songs into named pools under capacity,
//! instrument, and difficulty-window constraints, deterministically from a
//! caller-seeded RNG. It is the allocation core of the Setforge content
//! randomizer; catalog construction lives in `setforge-catalog` and the host
//! glue lives outside this workspace.
//!
//! # Determinism
//!
//! A distribution is a pure function of its inputs. Every random decision
//! (goal pool choice, candidate shuffles, refill picks) draws from the one
//! RNG the caller supplies, in a fixed phase order, so the same seed always
//! reproduces the same assignment. The engine never creates a seed of its
//! own; [`rng`] holds the helpers callers use to derive per-partition
//! streams from a base seed (BLAKE3 derivation into PCG32).
//!
//! # Example
//!
//! ```
//! use setforge_distribute::{distribute, DistributeConfig, PoolSpec};
//! use setforge_distribute::rng::create_rng;
//! use setforge_catalog::{Catalog, SongRecord};
//! use std::collections::BTreeMap;
//!
//! let mut catalog = Catalog::new();
//! for (id, rating) in [("a", 2u8), ("b", 5), ("c", 9)] {
//!     catalog.insert(
//!         id.to_string(),
//!         SongRecord {
//!             title: id.to_uppercase(),
//!             difficulties: BTreeMap::from([("Guitar".to_string(), rating)]),
//!         },
//!     );
//! }
//!
//! let config = DistributeConfig::new(BTreeMap::from([(
//!     "lead".to_string(),
//!     PoolSpec {
//!         instrument: "Guitar".to_string(),
//!         target: 2,
//!         min_difficulty: 0,
//!         max_difficulty: 10,
//!     },
//! )]));
//!
//! let result = distribute(&config, &catalog, &mut create_rng(42)).unwrap();
//! assert_eq!(result.assignments["lead"].len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`pool`]: Pool specifications and fill priority
//! - [`config`]: The distribution configuration value
//! - [`distributor`]: The four-phase engine
//! - [`partition`]: Instrument partitioning and result merging
//! - [`rng`]: PCG32 construction and BLAKE3 seed derivation
//! - [`validate`]: Configuration validation
//! - [`error`]: Error and warning types

pub mod config;
pub mod distributor;
pub mod error;
pub mod partition;
pub mod pool;
pub mod rng;
pub mod validate;

// Re-export commonly used types at the crate root
pub use config::{DistributeConfig, GoalSpec};
pub use distributor::{distribute, Distribution};
pub use error::{DistributeError, DistributeFailure, DistributeWarning};
pub use partition::{distribute_partitioned, split_pools_by_instrument};
pub use pool::{priority_order, PoolSpec};
