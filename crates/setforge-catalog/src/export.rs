//! Decoding of the external encoded song export format.
//!
//! Clients export their library as a URL-safe base64 blob wrapping a raw
//! DEFLATE stream of JSON: `{ "<checksum>": { "Title": ..., "Difficulties":
//! { "<instrument>": <rating>, ... } }, ... }`. This module turns such a blob
//! into a [`Catalog`] or reports exactly which stage rejected it.

use std::collections::BTreeMap;
use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::song::{Catalog, SongRecord};

/// One entry of the export JSON. Field names follow the export format's
/// PascalCase; unknown extra fields are tolerated.
#[derive(Debug, Deserialize)]
struct SongExport {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Difficulties")]
    difficulties: BTreeMap<String, u8>,
}

/// Decodes an encoded song export blob into a catalog.
///
/// Stages, in order: URL-safe base64 normalization and decode, raw DEFLATE
/// inflation (32 KiB window, no zlib header), UTF-8 validation, JSON parse.
///
/// # Example
/// ```no_run
/// use setforge_catalog::decode_song_export;
///
/// let catalog = decode_song_export("eJw...")?;
/// println!("{} songs", catalog.len());
/// # Ok::<(), setforge_catalog::CatalogError>(())
/// ```
pub fn decode_song_export(blob: &str) -> Result<Catalog, CatalogError> {
    let compressed = STANDARD.decode(normalize_base64(blob))?;

    let mut decompressed = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut decompressed)
        .map_err(CatalogError::Inflate)?;

    let text = std::str::from_utf8(&decompressed).map_err(|_| CatalogError::Encoding)?;
    let raw: BTreeMap<String, SongExport> = serde_json::from_str(text)?;

    Ok(raw
        .into_iter()
        .map(|(id, entry)| {
            (
                id,
                SongRecord {
                    title: entry.title,
                    difficulties: entry.difficulties,
                },
            )
        })
        .collect())
}

/// Maps the URL-safe base64 alphabet back to the standard one and restores
/// the stripped padding.
fn normalize_base64(blob: &str) -> String {
    let mut s = blob.trim().replace('-', "+").replace('_', "/");
    let rem = s.len() % 4;
    if rem != 0 {
        for _ in rem..4 {
            s.push('=');
        }
    }
    s
}
