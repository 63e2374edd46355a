//! Instrument partitioning.
//!
//! When songs may be reused across instruments, pools of different
//! instruments are independent sub-problems: running them in one engine call
//! would let one instrument's draw order perturb another's. This module
//! splits the pool mapping into instrument-exclusive groups, runs the engine
//! once per group with an independently derived RNG stream, and merges the
//! results. With reuse disabled everything runs as a single group, since the
//! pools then compete for the same songs.

use std::collections::BTreeMap;

use setforge_catalog::Catalog;

use crate::config::DistributeConfig;
use crate::distributor::{distribute, Distribution};
use crate::error::{DistributeError, DistributeFailure};
use crate::pool::PoolSpec;
use crate::rng::rng_for_partition;

/// Groups a pool mapping by instrument.
pub fn split_pools_by_instrument(
    pools: &BTreeMap<String, PoolSpec>,
) -> BTreeMap<String, BTreeMap<String, PoolSpec>> {
    let mut groups: BTreeMap<String, BTreeMap<String, PoolSpec>> = BTreeMap::new();
    for (name, pool) in pools {
        groups
            .entry(pool.instrument.clone())
            .or_default()
            .insert(name.clone(), pool.clone());
    }
    groups
}

/// Runs the full distribution, partitioned by instrument where the reuse
/// policy allows it.
///
/// Every group runs to completion so a player sees all problems at once;
/// group failures are aggregated into one [`DistributeFailure`]. A free goal
/// song is offered to each group in turn until one places it; if no group
/// can, that is a configuration error of its own.
pub fn distribute_partitioned(
    config: &DistributeConfig,
    catalog: &Catalog,
    base_seed: u32,
) -> Result<Distribution, DistributeFailure> {
    if let Some(goal) = &config.goal {
        if let Some(pool_name) = &goal.pool {
            if !config.pools.get(pool_name).is_some_and(PoolSpec::is_active) {
                return Err(DistributeFailure {
                    errors: vec![DistributeError::UnknownGoalPool {
                        pool: pool_name.clone(),
                    }],
                });
            }
        }
    }

    let groups = if config.reuse_across_instruments {
        split_pools_by_instrument(&config.pools)
    } else {
        BTreeMap::from([("all".to_string(), config.pools.clone())])
    };

    let mut assignments = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut goal_placed = false;

    for (group_name, pools) in &groups {
        let goal = match &config.goal {
            Some(goal) if !goal_placed => match &goal.pool {
                // A pinned goal only concerns the group that owns its pool.
                Some(pool_name) => pools.contains_key(pool_name).then(|| goal.clone()),
                None => Some(goal.clone()),
            },
            _ => None,
        };
        let group_config = DistributeConfig {
            pools: pools.clone(),
            inclusions: restrict_lists(&config.inclusions, pools),
            exclusions: restrict_lists(&config.exclusions, pools),
            goal,
            reuse_across_instruments: config.reuse_across_instruments,
        };

        let mut rng = rng_for_partition(base_seed, group_name);
        match distribute(&group_config, catalog, &mut rng) {
            Ok(result) => {
                goal_placed |= result.goal_placed;
                assignments.extend(result.assignments);
                warnings.extend(result.warnings);
            }
            Err(error) => errors.push(error),
        }
    }

    // Only meaningful when every group ran clean; a failed group may well be
    // the one that would have taken the goal.
    if errors.is_empty() && !goal_placed {
        if let Some(goal) = &config.goal {
            errors.push(DistributeError::GoalUnplaced {
                song: goal.song.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(Distribution {
            assignments,
            goal_placed,
            warnings,
        })
    } else {
        Err(DistributeFailure { errors })
    }
}

/// Keeps only the list entries addressing pools of this group.
fn restrict_lists(
    lists: &BTreeMap<String, Vec<String>>,
    pools: &BTreeMap<String, PoolSpec>,
) -> BTreeMap<String, Vec<String>> {
    lists
        .iter()
        .filter(|(pool_name, _)| pools.contains_key(pool_name.as_str()))
        .map(|(pool_name, list)| (pool_name.clone(), list.clone()))
        .collect()
}
