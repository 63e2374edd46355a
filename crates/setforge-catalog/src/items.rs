//! Static item names and weighted filler selection.

use rand::Rng;

use crate::song::display_name;

/// Goal marker placed on the goal song's check.
pub const VICTORY: &str = "Victory";
/// Progression currency for the fame-based goal.
pub const FAME_POINT: &str = "Fame Point";
/// Progression marker locked onto completion checks.
pub const SONG_COMPLETION: &str = "Song Completion";
/// Filler: quarter of a star power bar.
pub const STAR_POWER: &str = "Star Power";
/// Filler: swap one owned song for a random new one.
pub const SWAP_RANDOM: &str = "Swap Song (Random)";
/// Filler: swap one owned song for a chosen new one.
pub const SWAP_PICK: &str = "Swap Song (Pick)";
/// Filler: lower the difficulty or score requirement for one song.
pub const LOWER_DIFFICULTY: &str = "Lower Difficulty";
/// Trap: exits the current song to the menu.
pub const TRAP_RESTART: &str = "Restart Trap";
/// Trap: drains the rock meter.
pub const TRAP_ROCK_METER: &str = "Rock Meter Trap";

/// All statically-known item names: the fixed set above plus one unlock item
/// per instrument (by display name).
pub fn static_item_names(instruments: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = [
        VICTORY,
        FAME_POINT,
        SONG_COMPLETION,
        STAR_POWER,
        SWAP_RANDOM,
        SWAP_PICK,
        LOWER_DIFFICULTY,
        TRAP_RESTART,
        TRAP_ROCK_METER,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    names.extend(instruments.iter().map(|i| display_name(i)));
    names
}

/// A filler item definition with a selection weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedItem {
    pub name: String,
    pub weight: u32,
}

impl WeightedItem {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Picks one item at random, with probability proportional to its weight.
///
/// Returns `None` for an empty list or an all-zero weight table.
pub fn pick_weighted<'a, R: Rng>(
    items: &'a [WeightedItem],
    rng: &mut R,
) -> Option<&'a WeightedItem> {
    let total: u32 = items.iter().map(|item| item.weight).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for item in items {
        if roll < item.weight {
            return Some(item);
        }
        roll -= item.weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_static_item_names_include_instruments() {
        let names = static_item_names(&["Guitar", "ProDrums"]);
        assert!(names.contains(&VICTORY.to_string()));
        assert!(names.contains(&"Guitar".to_string()));
        assert!(names.contains(&"Pro Drums".to_string()));
    }

    #[test]
    fn test_pick_weighted_zero_total() {
        let items = vec![WeightedItem::new(STAR_POWER, 0)];
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(pick_weighted(&items, &mut rng).is_none());
        assert!(pick_weighted(&[], &mut rng).is_none());
    }

    #[test]
    fn test_pick_weighted_only_candidate() {
        let items = vec![
            WeightedItem::new(STAR_POWER, 0),
            WeightedItem::new(TRAP_RESTART, 7),
        ];
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(pick_weighted(&items, &mut rng).unwrap().name, TRAP_RESTART);
        }
    }

    #[test]
    fn test_pick_weighted_is_seeded() {
        let items = vec![
            WeightedItem::new(STAR_POWER, 5),
            WeightedItem::new(SWAP_RANDOM, 5),
            WeightedItem::new(SWAP_PICK, 3),
        ];
        let picks = |seed: u64| {
            let mut rng = Pcg32::seed_from_u64(seed);
            (0..50)
                .map(|_| pick_weighted(&items, &mut rng).unwrap().name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
