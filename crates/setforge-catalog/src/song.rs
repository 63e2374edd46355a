//! Catalog value types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The full set of candidate songs available for one generation, keyed by
/// opaque song identifier (the export format's content checksum).
///
/// A `BTreeMap` so that iteration order is deterministic and independent of
/// hasher state; the distribution engine iterates catalogs when building
/// candidate lists.
pub type Catalog = BTreeMap<String, SongRecord>;

/// A single song's metadata.
///
/// `difficulties` holds one entry per instrument the song actually charts;
/// absence of an instrument means the song cannot be played on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Display title.
    pub title: String,
    /// Instrument name -> difficulty rating.
    pub difficulties: BTreeMap<String, u8>,
}

impl SongRecord {
    /// Returns true if the song charts the given instrument.
    pub fn supports(&self, instrument: &str) -> bool {
        self.difficulties.contains_key(instrument)
    }

    /// Returns the song's rating for the given instrument, if charted.
    pub fn rating(&self, instrument: &str) -> Option<u8> {
        self.difficulties.get(instrument).copied()
    }
}

/// Expands a camel-cased instrument key into its display form by inserting a
/// space before each interior capital ("ProGuitar" -> "Pro Guitar").
pub fn display_name(instrument: &str) -> String {
    let mut out = String::with_capacity(instrument.len() + 4);
    let mut prev: Option<char> = None;
    for c in instrument.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
