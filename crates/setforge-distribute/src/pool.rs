//! Pool specifications and fill priority.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use setforge_catalog::SongRecord;

/// One named bucket of songs to fill: a required instrument, a target size,
/// and an inclusive difficulty window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolSpec {
    /// Instrument every assigned song must chart.
    pub instrument: String,
    /// Number of songs the pool must end up with. Zero deactivates the pool.
    pub target: usize,
    /// Lowest admissible rating (inclusive).
    pub min_difficulty: u8,
    /// Highest admissible rating (inclusive).
    pub max_difficulty: u8,
}

impl PoolSpec {
    /// Width of the difficulty window.
    pub fn window(&self) -> u8 {
        self.max_difficulty.saturating_sub(self.min_difficulty)
    }

    /// Pools with a zero target are skipped entirely.
    pub fn is_active(&self) -> bool {
        self.target > 0
    }

    /// The eligibility predicate: the song charts this pool's instrument and
    /// its rating falls inside the window.
    pub fn admits(&self, song: &SongRecord) -> bool {
        song.rating(&self.instrument)
            .is_some_and(|r| self.min_difficulty <= r && r <= self.max_difficulty)
    }
}

/// Active pools in fill order: narrowest difficulty window first (fewest
/// eligible candidates, most likely to starve), larger targets first among
/// equally narrow pools, name as the final tiebreak so the order is total.
pub fn priority_order(pools: &BTreeMap<String, PoolSpec>) -> Vec<(&str, &PoolSpec)> {
    let mut order: Vec<(&str, &PoolSpec)> = pools
        .iter()
        .filter(|(_, pool)| pool.is_active())
        .map(|(name, pool)| (name.as_str(), pool))
        .collect();
    order.sort_by(|(a_name, a), (b_name, b)| {
        a.window()
            .cmp(&b.window())
            .then(b.target.cmp(&a.target))
            .then(a_name.cmp(b_name))
    });
    order
}
