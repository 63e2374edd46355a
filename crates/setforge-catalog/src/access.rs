//! Declarative location access requirements.
//!
//! Every location's unlock condition is a plain data row: the items (with
//! counts) a player must hold. One generic predicate evaluates any row
//! against any inventory, so rule construction never captures per-location
//! closures.

use std::collections::BTreeMap;

use crate::ids::IdTables;
use crate::song::display_name;

/// One required item with the number of copies needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub item: String,
    pub count: u32,
}

impl Requirement {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Location name -> requirement rows.
pub type AccessTable = BTreeMap<String, Vec<Requirement>>;

/// Evaluates a requirement row against an inventory lookup.
pub fn satisfied<F>(requirements: &[Requirement], owned: F) -> bool
where
    F: Fn(&str) -> u32,
{
    requirements.iter().all(|req| owned(&req.item) >= req.count)
}

/// Builds the access table for every location in a registry.
///
/// Each song location requires the column's unlock item; instrument columns
/// additionally require that instrument's unlock item.
pub fn build_access_table(tables: &IdTables) -> AccessTable {
    let mut access = AccessTable::new();
    for entry in tables.songs.values() {
        for (column, set) in &entry.locations {
            let mut requirements = Vec::with_capacity(2);
            if !column.is_empty() {
                requirements.push(Requirement::new(display_name(column), 1));
            }
            if let Some(unlock) = entry.unlock_items.get(column) {
                requirements.push(Requirement::new(unlock.clone(), 1));
            }
            for name in [&set.reward_one, &set.reward_two, &set.completion] {
                access.insert(name.clone(), requirements.clone());
            }
        }
    }
    access
}
