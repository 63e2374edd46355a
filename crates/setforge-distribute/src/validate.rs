//! Configuration validation.

use std::collections::BTreeMap;

use crate::error::DistributeError;
use crate::pool::PoolSpec;

/// Rejects malformed pool specs before any allocation work.
///
/// Inverted difficulty windows are caller mistakes even on inactive pools.
pub fn validate_pools(pools: &BTreeMap<String, PoolSpec>) -> Result<(), DistributeError> {
    for (name, pool) in pools {
        if pool.min_difficulty > pool.max_difficulty {
            return Err(DistributeError::InvalidDifficultyWindow {
                pool: name.clone(),
                min: pool.min_difficulty,
                max: pool.max_difficulty,
            });
        }
    }
    Ok(())
}
