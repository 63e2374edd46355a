//! End-to-end invariant and determinism checks for the distribution engine.
//!
//! Every successful distribution, whatever the seed, must satisfy the
//! engine's contract: pools exactly at target, every song inside its pool's
//! window, no song charted twice for one instrument, the reuse policy
//! honored, inclusion and exclusion lists respected, and the goal song
//! placed. These tests sweep a spread of seeds over a mixed-instrument
//! catalog and check the full contract each time.

use std::collections::{BTreeMap, BTreeSet};

use setforge_catalog::{Catalog, SongRecord};
use setforge_distribute::rng::rng_for_partition;
use setforge_distribute::{
    distribute, distribute_partitioned, DistributeConfig, Distribution, GoalSpec, PoolSpec,
};

/// Thirty songs with interleaved instrument coverage: all chart Guitar,
/// every second charts Drums, every third charts Bass. Ratings cycle 0-10.
fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..30u32 {
        let mut difficulties = BTreeMap::new();
        difficulties.insert("Guitar".to_string(), ((i * 7) % 11) as u8);
        if i % 2 == 0 {
            difficulties.insert("Drums".to_string(), ((i * 5) % 11) as u8);
        }
        if i % 3 == 0 {
            difficulties.insert("Bass".to_string(), ((i * 3) % 11) as u8);
        }
        catalog.insert(
            format!("s{i:02}"),
            SongRecord {
                title: format!("Track {i:02}"),
                difficulties,
            },
        );
    }
    catalog
}

fn pool(instrument: &str, target: usize, min: u8, max: u8) -> PoolSpec {
    PoolSpec {
        instrument: instrument.to_string(),
        target,
        min_difficulty: min,
        max_difficulty: max,
    }
}

fn fixture_config(reuse: bool) -> DistributeConfig {
    let mut config = DistributeConfig::new(BTreeMap::from([
        ("lead".to_string(), pool("Guitar", 6, 0, 10)),
        ("shred".to_string(), pool("Guitar", 2, 7, 10)),
        ("kit".to_string(), pool("Drums", 4, 0, 10)),
        ("low".to_string(), pool("Bass", 3, 2, 8)),
    ]));
    config
        .inclusions
        .insert("kit".to_string(), vec!["s00".to_string(), "s04".to_string()]);
    config
        .exclusions
        .insert("lead".to_string(), vec!["s01".to_string(), "s02".to_string()]);
    config.goal = Some(GoalSpec {
        song: "s06".to_string(),
        pool: None,
    });
    config.reuse_across_instruments = reuse;
    config
}

/// Asserts the full engine contract on a successful result.
fn assert_contract(config: &DistributeConfig, catalog: &Catalog, result: &Distribution) {
    // Capacity: every active pool exactly at target, inactive pools absent.
    for (name, spec) in &config.pools {
        if spec.target > 0 {
            assert_eq!(
                result.assignments[name].len(),
                spec.target,
                "pool {name} not at target"
            );
        } else {
            assert!(!result.assignments.contains_key(name));
        }
    }

    // Eligibility: every assigned song fits its pool's instrument + window.
    for (name, assigned) in &result.assignments {
        let spec = &config.pools[name];
        for id in assigned {
            let record = catalog.get(id).expect("assigned song must exist");
            assert!(
                spec.admits(record),
                "song {id} does not fit pool {name} ({}, {}-{})",
                spec.instrument,
                spec.min_difficulty,
                spec.max_difficulty
            );
        }
    }

    // Hard rule: no song appears in two pools sharing an instrument.
    let mut charted: BTreeSet<(String, String)> = BTreeSet::new();
    for (name, assigned) in &result.assignments {
        let instrument = &config.pools[name].instrument;
        for id in assigned {
            assert!(
                charted.insert((id.clone(), instrument.clone())),
                "song {id} charted twice for {instrument}"
            );
        }
    }

    // Reuse policy: with reuse disabled a song appears at most once total.
    if !config.reuse_across_instruments {
        let mut seen = BTreeSet::new();
        for assigned in result.assignments.values() {
            for id in assigned {
                assert!(seen.insert(id.clone()), "song {id} reused across pools");
            }
        }
    }

    // Exclusions.
    for (name, excluded) in &config.exclusions {
        if let Some(assigned) = result.assignments.get(name) {
            for id in excluded {
                assert!(!assigned.contains(id), "excluded song {id} in pool {name}");
            }
        }
    }

    // Inclusions.
    for (name, included) in &config.inclusions {
        if let Some(assigned) = result.assignments.get(name) {
            for id in included {
                assert!(assigned.contains(id), "included song {id} missing from {name}");
            }
        }
    }

    // Goal: placed in exactly one pool that charts it.
    if let Some(goal) = &config.goal {
        assert!(result.goal_placed);
        let holders: Vec<&String> = result
            .assignments
            .iter()
            .filter(|(_, assigned)| assigned.contains(&goal.song))
            .map(|(name, _)| name)
            .collect();
        assert!(!holders.is_empty(), "goal song not assigned anywhere");
        if !config.reuse_across_instruments {
            assert_eq!(holders.len(), 1, "goal song in several pools");
        }
    }
}

#[test]
fn contract_holds_across_seeds_without_reuse() {
    let catalog = fixture_catalog();
    let config = fixture_config(false);

    for seed in 0..24 {
        let result = distribute(&config, &catalog, &mut rng_for_partition(seed, "all"))
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert_contract(&config, &catalog, &result);
    }
}

#[test]
fn contract_holds_across_seeds_with_partitioned_reuse() {
    let catalog = fixture_catalog();
    let config = fixture_config(true);

    for seed in 0..24 {
        let result = distribute_partitioned(&config, &catalog, seed)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert_contract(&config, &catalog, &result);
    }
}

#[test]
fn identical_seeds_reproduce_identical_assignments() {
    let catalog = fixture_catalog();

    let config = fixture_config(false);
    let a = distribute(&config, &catalog, &mut rng_for_partition(7, "all")).unwrap();
    let b = distribute(&config, &catalog, &mut rng_for_partition(7, "all")).unwrap();
    assert_eq!(a, b);

    let config = fixture_config(true);
    let a = distribute_partitioned(&config, &catalog, 7).unwrap();
    let b = distribute_partitioned(&config, &catalog, 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn seeds_actually_steer_the_outcome() {
    let catalog = fixture_catalog();
    let config = fixture_config(false);

    let distinct: BTreeSet<BTreeMap<String, Vec<String>>> = (0..16)
        .map(|seed| {
            distribute(&config, &catalog, &mut rng_for_partition(seed, "all"))
                .unwrap()
                .assignments
        })
        .collect();
    assert!(distinct.len() > 1, "every seed produced the same assignment");
}

#[test]
fn partitioned_no_reuse_matches_the_single_call() {
    let catalog = fixture_catalog();
    let config = fixture_config(false);

    let partitioned = distribute_partitioned(&config, &catalog, 11).unwrap();
    let direct = distribute(&config, &catalog, &mut rng_for_partition(11, "all")).unwrap();
    assert_eq!(partitioned, direct);
}
