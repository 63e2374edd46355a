//! Item and location ID registry construction.
//!
//! Hosts address items and locations by stable numeric IDs, so every
//! generation needs the same catalog to produce the same registry. The
//! registry is built in one explicit pass over an immutable catalog; all ID
//! counters are local to the build call, and two builds of the same inputs
//! agree exactly.
//!
//! Per song the registry carries one column per instrument plus one
//! instrument-agnostic column (keyed by the empty string). Each column gets
//! an unlock item and three locations: two reward checks and a completion
//! check.

use std::collections::BTreeMap;

use crate::items::static_item_names;
use crate::song::{display_name, Catalog};

/// The three location names of one song column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSet {
    pub reward_one: String,
    pub reward_two: String,
    pub completion: String,
}

/// Per-song registry entries, keyed by column: `""` for the
/// instrument-agnostic column, otherwise the raw instrument key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongIds {
    /// Column key -> unlock item name.
    pub unlock_items: BTreeMap<String, String>,
    /// Column key -> location names.
    pub locations: BTreeMap<String, LocationSet>,
}

/// Immutable ID registry derived from a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdTables {
    pub location_name_to_id: BTreeMap<String, u64>,
    pub item_name_to_id: BTreeMap<String, u64>,
    /// Location name -> the song id it belongs to.
    pub location_name_to_song: BTreeMap<String, String>,
    /// Song id -> its registry entries.
    pub songs: BTreeMap<String, SongIds>,
    /// Pack index (1-based) -> pack item name.
    pub song_packs: BTreeMap<u64, String>,
}

impl IdTables {
    /// Builds the registry for a catalog.
    ///
    /// Static items are registered first (IDs from 0), then one unlock item
    /// and three locations per song column in catalog order, then song-pack
    /// items sized to cover every song unlock item at `pack_size` songs per
    /// pack. A `pack_size` below 2 disables packs.
    pub fn build(catalog: &Catalog, instruments: &[&str], pack_size: usize) -> IdTables {
        let mut tables = IdTables::default();

        let mut next_item_id: u64 = 0;
        for name in static_item_names(instruments) {
            tables.item_name_to_id.insert(name, next_item_id);
            next_item_id += 1;
        }

        let mut next_location_id: u64 = 0;
        let mut song_unlock_items: u64 = 0;

        for (song_num, (song_id, record)) in catalog.iter().enumerate() {
            let song_num = song_num as u64 + 1;
            let mut entry = SongIds::default();

            register_column(
                &mut tables,
                &mut entry,
                song_id,
                &record.title,
                "",
                song_num,
                &mut next_item_id,
                &mut next_location_id,
            );
            song_unlock_items += 1;

            for instrument in instruments {
                register_column(
                    &mut tables,
                    &mut entry,
                    song_id,
                    &record.title,
                    instrument,
                    song_num,
                    &mut next_item_id,
                    &mut next_location_id,
                );
                song_unlock_items += 1;
            }

            tables.songs.insert(song_id.clone(), entry);
        }

        if pack_size >= 2 {
            let packs = song_unlock_items.div_ceil(pack_size as u64);
            for pack in 1..=packs {
                let name = format!("Song Pack {pack}");
                tables.song_packs.insert(pack, name.clone());
                tables.item_name_to_id.insert(name, next_item_id);
                next_item_id += 1;
            }
        }

        tables
    }

    /// Looks up the unlock item name for a song's column.
    pub fn unlock_item(&self, song_id: &str, instrument: &str) -> Option<&str> {
        self.songs
            .get(song_id)?
            .unlock_items
            .get(instrument)
            .map(String::as_str)
    }

    /// Looks up the location set for a song's column.
    pub fn locations(&self, song_id: &str, instrument: &str) -> Option<&LocationSet> {
        self.songs.get(song_id)?.locations.get(instrument)
    }
}

#[allow(clippy::too_many_arguments)]
fn register_column(
    tables: &mut IdTables,
    entry: &mut SongIds,
    song_id: &str,
    title: &str,
    column: &str,
    song_num: u64,
    next_item_id: &mut u64,
    next_location_id: &mut u64,
) {
    let suffix = if column.is_empty() {
        String::new()
    } else {
        format!(" ({})", display_name(column))
    };

    let item_name = format!("Song {song_num}: {title}{suffix}");
    entry
        .unlock_items
        .insert(column.to_string(), item_name.clone());
    tables.item_name_to_id.insert(item_name, *next_item_id);
    *next_item_id += 1;

    let set = LocationSet {
        reward_one: format!("Song {song_num}: {title}{suffix} Reward 1"),
        reward_two: format!("Song {song_num}: {title}{suffix} Reward 2"),
        completion: format!("Song {song_num}: {title}{suffix} Completion"),
    };
    for name in [&set.reward_one, &set.reward_two, &set.completion] {
        tables
            .location_name_to_id
            .insert(name.clone(), *next_location_id);
        tables
            .location_name_to_song
            .insert(name.clone(), song_id.to_string());
        *next_location_id += 1;
    }
    entry.locations.insert(column.to_string(), set);
}
