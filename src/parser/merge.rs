//! Cross-source merge: combine per-page tables and search shards.
//!
//! The same symbol shows up in several inputs — its page table row, its
//! `all_*` shard row, and its kind-specific shard row — and a header/impl
//! pair yields two rows pointing at the same anchor. Merging collapses them
//! into one entry per (name, page, fragment), keeping the richest facts.

use crate::model::{SymbolEntry, SymbolIndex, SymbolKind};
use std::collections::HashMap;

/// Merge parsed entries into a deduplicated index.
///
/// First-seen order is preserved. A refined kind (anything but `Member`)
/// wins over `Member`; missing scope/signature/defining_file are filled
/// from whichever duplicate carries them.
pub fn merge(sources: Vec<Vec<SymbolEntry>>) -> SymbolIndex {
    let mut keyed: HashMap<(String, String, Option<String>), SymbolEntry> = HashMap::new();
    let mut order: Vec<(String, String, Option<String>)> = Vec::new();

    for entries in sources {
        for entry in entries {
            let key = (
                entry.name.clone(),
                entry.anchor.page.clone(),
                entry.anchor.fragment.clone(),
            );
            match keyed.get_mut(&key) {
                Some(existing) => absorb(existing, entry),
                None => {
                    order.push(key.clone());
                    keyed.insert(key, entry);
                }
            }
        }
    }

    let mut index = SymbolIndex::new();
    for key in order {
        if let Some(entry) = keyed.remove(&key) {
            index.push(entry);
        }
    }
    index
}

/// Fold a duplicate into the already-indexed entry.
fn absorb(existing: &mut SymbolEntry, dup: SymbolEntry) {
    if existing.kind == SymbolKind::Member && dup.kind != SymbolKind::Member {
        existing.kind = dup.kind;
    }
    if existing.scope.is_none() {
        existing.scope = dup.scope;
    }
    if existing.signature.is_none() {
        existing.signature = dup.signature;
    }
    if existing.defining_file.is_none() {
        existing.defining_file = dup.defining_file;
    }
}
