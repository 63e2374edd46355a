//! The song distribution engine.
//!
//! One call to [`distribute`] runs four ordered phases over a fresh
//! bookkeeping state:
//!
//! 1. **Goal placement** — reserve the goal song before general allocation
//!    can consume its only compatible slot.
//! 2. **Inclusion lists** — force requested songs into their pools ahead of
//!    random fill so they are never crowded out.
//! 3. **Priority-ordered random fill** — serve narrow difficulty windows
//!    first, drawing eligible songs at random from the caller's RNG.
//! 4. **Backfill** — repair any remaining shortage by stealing a compatible
//!    song from a satisfied pool and refilling the donor from the catalog.
//!
//! Two bookkeeping rules hold throughout. A song may never sit in two pools
//! that share an instrument, regardless of configuration. On top of that,
//! when reuse is disabled a song may be assigned at most once in total.
//!
//! All randomness is drawn from the single caller-supplied RNG in phase
//! order, so identical inputs and an identically-seeded RNG reproduce the
//! exact assignment.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use setforge_catalog::Catalog;

use crate::config::DistributeConfig;
use crate::error::{DistributeError, DistributeWarning};
use crate::pool::{priority_order, PoolSpec};
use crate::validate::validate_pools;

/// A completed assignment of songs to pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Pool name -> assigned song identifiers, in placement order. Every
    /// active pool's list length equals its target; inactive pools are
    /// omitted.
    pub assignments: BTreeMap<String, Vec<String>>,
    /// Whether the goal song was placed. Always true when a goal pool was
    /// named (a failure would have been raised instead); with a free goal,
    /// false means no pool in this run could take it and the caller may
    /// retry in another partition.
    pub goal_placed: bool,
    /// Non-fatal observations, currently random-fill shortages that
    /// backfill later repaired.
    pub warnings: Vec<DistributeWarning>,
}

/// Per-run bookkeeping. Created at the start of one distribution call and
/// dropped at the end; nothing survives across calls.
struct AssignmentState<'a> {
    config: &'a DistributeConfig,
    catalog: &'a Catalog,
    assignments: BTreeMap<String, Vec<String>>,
    /// Song id -> instruments under which it is currently assigned.
    assigned_instruments: BTreeMap<String, BTreeSet<String>>,
    /// Every assigned song id; the no-reuse policy checks this set.
    assigned: BTreeSet<String>,
    /// Goal and inclusion placements, which backfill may not steal.
    pinned: BTreeSet<String>,
    goal_placed: bool,
    warnings: Vec<DistributeWarning>,
}

impl<'a> AssignmentState<'a> {
    fn new(config: &'a DistributeConfig, catalog: &'a Catalog) -> Self {
        Self {
            config,
            catalog,
            assignments: BTreeMap::new(),
            assigned_instruments: BTreeMap::new(),
            assigned: BTreeSet::new(),
            pinned: BTreeSet::new(),
            goal_placed: false,
            warnings: Vec::new(),
        }
    }

    fn assigned_count(&self, pool_name: &str) -> usize {
        self.assignments.get(pool_name).map_or(0, Vec::len)
    }

    /// Whether the reuse policy forbids assigning this song again.
    fn consumed(&self, song_id: &str) -> bool {
        if self.config.reuse_across_instruments {
            false
        } else {
            self.assigned.contains(song_id)
        }
    }

    /// The hard rule: a song may never be charted twice for one instrument.
    fn duplicate_instrument(&self, song_id: &str, instrument: &str) -> bool {
        self.assigned_instruments
            .get(song_id)
            .is_some_and(|tags| tags.contains(instrument))
    }

    fn fits(&self, song_id: &str, pool: &PoolSpec) -> bool {
        self.catalog
            .get(song_id)
            .is_some_and(|record| pool.admits(record))
    }

    fn excluded_for(&self, pool_name: &str) -> BTreeSet<String> {
        self.config
            .exclusions
            .get(pool_name)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn place(&mut self, song_id: &str, pool_name: &str, instrument: &str, pin: bool) {
        self.assignments
            .entry(pool_name.to_string())
            .or_default()
            .push(song_id.to_string());
        self.assigned.insert(song_id.to_string());
        self.assigned_instruments
            .entry(song_id.to_string())
            .or_default()
            .insert(instrument.to_string());
        if pin {
            self.pinned.insert(song_id.to_string());
        }
    }

    /// The neutral swap of a steal: the stolen song leaves the donor for
    /// the recipient and the refill keeps the donor whole. Instrument tags
    /// follow the song, so the hard rule stays enforceable afterwards.
    fn transfer(
        &mut self,
        song_id: &str,
        donor_name: &str,
        donor: &PoolSpec,
        recipient_name: &str,
        recipient: &PoolSpec,
        refill_id: &str,
    ) {
        if let Some(donor_list) = self.assignments.get_mut(donor_name) {
            if let Some(pos) = donor_list.iter().position(|s| s == song_id) {
                donor_list.remove(pos);
            }
            donor_list.push(refill_id.to_string());
        }

        if let Some(tags) = self.assigned_instruments.get_mut(song_id) {
            tags.remove(&donor.instrument);
        }
        self.assigned_instruments
            .entry(song_id.to_string())
            .or_default()
            .insert(recipient.instrument.clone());

        self.assigned.insert(refill_id.to_string());
        self.assigned_instruments
            .entry(refill_id.to_string())
            .or_default()
            .insert(donor.instrument.clone());

        self.assignments
            .entry(recipient_name.to_string())
            .or_default()
            .push(song_id.to_string());
    }
}

/// Distributes the catalog into the configured pools.
///
/// Pure given its inputs: the catalog and config are read-only and every
/// random decision comes from `rng`. On failure nothing partial is
/// returned.
///
/// # Example
/// ```
/// use setforge_distribute::{distribute, DistributeConfig, PoolSpec};
/// use setforge_distribute::rng::create_rng;
/// use setforge_catalog::{Catalog, SongRecord};
/// use std::collections::BTreeMap;
///
/// let mut catalog = Catalog::new();
/// catalog.insert(
///     "abc".to_string(),
///     SongRecord {
///         title: "Neon Skyline".to_string(),
///         difficulties: BTreeMap::from([("Guitar".to_string(), 2)]),
///     },
/// );
/// let config = DistributeConfig::new(BTreeMap::from([(
///     "lead".to_string(),
///     PoolSpec {
///         instrument: "Guitar".to_string(),
///         target: 1,
///         min_difficulty: 0,
///         max_difficulty: 10,
///     },
/// )]));
///
/// let result = distribute(&config, &catalog, &mut create_rng(42)).unwrap();
/// assert_eq!(result.assignments["lead"], vec!["abc".to_string()]);
/// ```
pub fn distribute<R: Rng>(
    config: &DistributeConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Distribution, DistributeError> {
    validate_pools(&config.pools)?;

    let order = priority_order(&config.pools);
    let mut state = AssignmentState::new(config, catalog);

    place_goal(&mut state, &order, rng)?;
    for (name, pool) in &order {
        place_inclusions(&mut state, name, pool)?;
    }
    for (name, pool) in &order {
        fill_pool(&mut state, name, pool, rng);
    }
    backfill(&mut state, &order, rng)?;

    Ok(Distribution {
        assignments: state.assignments,
        goal_placed: state.goal_placed,
        warnings: state.warnings,
    })
}

/// Phase 1: reserve the goal song.
fn place_goal<R: Rng>(
    state: &mut AssignmentState<'_>,
    order: &[(&str, &PoolSpec)],
    rng: &mut R,
) -> Result<(), DistributeError> {
    let Some(goal) = state.config.goal.clone() else {
        return Ok(());
    };
    let catalog = state.catalog;
    let Some(record) = catalog.get(&goal.song) else {
        return Err(DistributeError::UnknownGoalSong { song: goal.song });
    };

    if let Some(pool_name) = &goal.pool {
        let Some((name, pool)) = order.iter().find(|(n, _)| *n == pool_name.as_str()) else {
            return Err(DistributeError::UnknownGoalPool {
                pool: pool_name.clone(),
            });
        };
        if !record.supports(&pool.instrument) {
            return Err(DistributeError::GoalInstrumentMismatch {
                song: goal.song,
                pool: pool_name.clone(),
                instrument: pool.instrument.clone(),
            });
        }
        state.place(&goal.song, name, &pool.instrument, true);
        state.goal_placed = true;
    } else {
        // Free goal: pick any compatible pool at random. Not finding one is
        // not an error here; a later partition may still take the song.
        let mut candidates = order.to_vec();
        candidates.shuffle(rng);
        for (name, pool) in candidates {
            if record.supports(&pool.instrument)
                && !state.duplicate_instrument(&goal.song, &pool.instrument)
            {
                state.place(&goal.song, name, &pool.instrument, true);
                state.goal_placed = true;
                break;
            }
        }
    }
    Ok(())
}

/// Phase 2: force inclusion-list songs into their pool, up to remaining
/// capacity. The whole list is validated even where the cap truncates it.
fn place_inclusions(
    state: &mut AssignmentState<'_>,
    pool_name: &str,
    pool: &PoolSpec,
) -> Result<(), DistributeError> {
    let Some(list) = state.config.inclusions.get(pool_name) else {
        return Ok(());
    };
    // De-duplicate, keeping the first occurrence so placement preserves the
    // player's order.
    let list: Vec<String> = {
        let mut seen = BTreeSet::new();
        list.iter()
            .filter(|song| seen.insert(song.as_str()))
            .cloned()
            .collect()
    };

    let catalog = state.catalog;
    let mut remaining = pool.target.saturating_sub(state.assigned_count(pool_name));
    for song_id in &list {
        let Some(record) = catalog.get(song_id) else {
            return Err(DistributeError::UnknownInclusion {
                pool: pool_name.to_string(),
                song: song_id.clone(),
            });
        };
        if !record.supports(&pool.instrument) {
            return Err(DistributeError::InclusionInstrumentMismatch {
                pool: pool_name.to_string(),
                song: song_id.clone(),
                instrument: pool.instrument.clone(),
            });
        }
        if remaining == 0 {
            // The cap quietly truncates; the rest of the list still gets
            // validated above.
            continue;
        }
        if state.consumed(song_id) || state.duplicate_instrument(song_id, &pool.instrument) {
            continue;
        }
        state.place(song_id, pool_name, &pool.instrument, true);
        remaining -= 1;
    }
    Ok(())
}

/// Phase 3: fill remaining capacity with random eligible songs. A shortage
/// is recorded, not raised; backfill gets a chance to repair it.
fn fill_pool<R: Rng>(
    state: &mut AssignmentState<'_>,
    pool_name: &str,
    pool: &PoolSpec,
    rng: &mut R,
) {
    let needed = pool.target.saturating_sub(state.assigned_count(pool_name));
    if needed == 0 {
        return;
    }

    let excluded = state.excluded_for(pool_name);
    let catalog = state.catalog;
    let mut eligible: Vec<String> = catalog
        .iter()
        .filter(|(id, record)| {
            !state.consumed(id)
                && !state.duplicate_instrument(id, &pool.instrument)
                && !excluded.contains(id.as_str())
                && pool.admits(record)
        })
        .map(|(id, _)| id.clone())
        .collect();
    eligible.shuffle(rng);

    if eligible.len() < needed {
        state.warnings.push(DistributeWarning::PoolUnderfilled {
            pool: pool_name.to_string(),
            needed,
            available: eligible.len(),
        });
    }
    for song_id in eligible.iter().take(needed) {
        state.place(song_id, pool_name, &pool.instrument, false);
    }
}

/// Phase 4: repair shortages by stealing from satisfied pools.
fn backfill<R: Rng>(
    state: &mut AssignmentState<'_>,
    order: &[(&str, &PoolSpec)],
    rng: &mut R,
) -> Result<(), DistributeError> {
    for (name, pool) in order {
        while state.assigned_count(name) < pool.target {
            if !steal_one(state, name, pool, order, rng) {
                return Err(DistributeError::PoolShortfall {
                    pool: (*name).to_string(),
                    instrument: pool.instrument.clone(),
                    min: pool.min_difficulty,
                    max: pool.max_difficulty,
                    requested: pool.target,
                    assigned: state.assigned_count(name),
                });
            }
        }
    }
    Ok(())
}

/// One steal attempt for a short pool. Donors are tried in priority order;
/// the first donor song that can legally move and whose donor can be
/// refilled wins.
fn steal_one<R: Rng>(
    state: &mut AssignmentState<'_>,
    recipient_name: &str,
    recipient: &PoolSpec,
    order: &[(&str, &PoolSpec)],
    rng: &mut R,
) -> bool {
    let recipient_excluded = state.excluded_for(recipient_name);
    for (donor_name, donor) in order {
        if *donor_name == recipient_name {
            continue;
        }
        if state.assigned_count(donor_name) < donor.target {
            continue;
        }
        let donor_songs: Vec<String> = state
            .assignments
            .get(*donor_name)
            .cloned()
            .unwrap_or_default();
        for song_id in &donor_songs {
            if state.pinned.contains(song_id) {
                continue;
            }
            if recipient_excluded.contains(song_id) {
                continue;
            }
            if !state.fits(song_id, recipient) {
                continue;
            }
            // Moving within one instrument cannot create a duplicate; a
            // cross-instrument move has to clear the hard rule first.
            if donor.instrument != recipient.instrument
                && state.duplicate_instrument(song_id, &recipient.instrument)
            {
                continue;
            }
            let Some(refill) = find_refill(state, donor_name, donor, rng) else {
                continue;
            };
            state.transfer(song_id, donor_name, donor, recipient_name, recipient, &refill);
            return true;
        }
    }
    false
}

/// A random catalog song that can take the stolen song's place in the
/// donor.
fn find_refill<R: Rng>(
    state: &AssignmentState<'_>,
    donor_name: &str,
    donor: &PoolSpec,
    rng: &mut R,
) -> Option<String> {
    let excluded = state.excluded_for(donor_name);
    let candidates: Vec<&String> = state
        .catalog
        .iter()
        .filter(|(id, record)| {
            !state.consumed(id)
                && !state.duplicate_instrument(id, &donor.instrument)
                && !excluded.contains(id.as_str())
                && donor.admits(record)
        })
        .map(|(id, _)| id)
        .collect();
    candidates.choose(rng).map(|id| (*id).clone())
}
