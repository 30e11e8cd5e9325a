//! Parser module — input dispatch by declared variable.
//!
//! The three artifact shapes are told apart by the variable they declare
//! (`NAVTREE`, `searchData`, or a page-specific name), not by filename: a
//! top-level `functions_f.js` chunk and a `search/functions_f.js` shard
//! share a name but not a shape. The filename only contributes the symbol
//! kind of a search shard.

pub mod filetable;
pub mod js;
pub mod merge;
pub mod navtree;
pub mod search;

use crate::model::{NavNode, SymbolEntry, SymbolKind};
use anyhow::{anyhow, Result};
use std::path::Path;

/// Everything one input file can contribute.
#[derive(Debug, Default)]
pub struct Parsed {
    pub entries: Vec<SymbolEntry>,
    pub nav: Option<NavNode>,
}

/// Parse one input file into its contribution.
pub fn parse_file(path: &Path, content: &str) -> Result<Parsed> {
    if path.extension().and_then(|e| e.to_str()) != Some("js") {
        return Err(anyhow!("not a doxygen data file: {}", path.display()));
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let shard_kind = search::kind_for_shard(stem).unwrap_or(SymbolKind::Member);
    interpret_document(content, shard_kind)
}

/// Parse stdin content. With no filename to name a shard kind, search rows
/// index as `Member`.
pub fn parse_stdin(content: &str) -> Result<Parsed> {
    interpret_document(content, SymbolKind::Member)
}

fn interpret_document(content: &str, shard_kind: SymbolKind) -> Result<Parsed> {
    let vars = js::parse_document(content)?;

    if let Some((_, tree)) = vars.iter().find(|(name, _)| name == "NAVTREE") {
        return Ok(Parsed {
            entries: Vec::new(),
            nav: Some(navtree::interpret(tree)?),
        });
    }

    if let Some((_, data)) = vars.iter().find(|(name, _)| name == "searchData") {
        let rows = data
            .as_array()
            .ok_or_else(|| anyhow!("searchData is not an array"))?;
        return Ok(Parsed {
            entries: search::interpret(rows, shard_kind)?,
            nav: None,
        });
    }

    let (name, value) = &vars[0];
    let rows = value
        .as_array()
        .ok_or_else(|| anyhow!("var {} is not a page table", name))?;
    Ok(Parsed {
        entries: filetable::interpret(rows)?,
        nav: None,
    })
}
