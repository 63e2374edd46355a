//! Setforge Song Catalog Library
//!
//! This crate provides the catalog side of the Setforge content randomizer:
//! the immutable song catalog consumed by the distribution engine, decoding
//! of the external encoded export format, and construction of the item and
//! location ID registries derived from a catalog.
//!
//! # Overview
//!
//! A catalog maps opaque song identifiers (content checksums from the export
//! format) to [`SongRecord`] values carrying a display title and the per
//! instrument difficulty ratings the song actually charts. Catalogs are built
//! once, up front, and passed by reference into everything downstream; no
//! module-level state is involved.
//!
//! # Example
//!
//! ```
//! use setforge_catalog::{Catalog, SongRecord};
//! use std::collections::BTreeMap;
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(
//!     "5d41402abc4b2a76b9719d911017c592".to_string(),
//!     SongRecord {
//!         title: "Neon Skyline".to_string(),
//!         difficulties: BTreeMap::from([("Guitar".to_string(), 2)]),
//!     },
//! );
//!
//! let song = &catalog["5d41402abc4b2a76b9719d911017c592"];
//! assert!(song.supports("Guitar"));
//! assert_eq!(song.rating("Guitar"), Some(2));
//! ```
//!
//! # Modules
//!
//! - [`song`]: Catalog value types
//! - [`export`]: Decoding of the external encoded export format
//! - [`ids`]: Item/location ID registry construction
//! - [`access`]: Declarative location access requirements
//! - [`items`]: Static item names and weighted filler selection
//! - [`error`]: Error types

pub mod access;
pub mod error;
pub mod export;
pub mod ids;
pub mod items;
pub mod song;

// Re-export commonly used types at the crate root
pub use error::CatalogError;
pub use export::decode_song_export;
pub use ids::{IdTables, LocationSet};
pub use song::{display_name, Catalog, SongRecord};
