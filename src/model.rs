//! Data model for the extracted symbol index — format-agnostic.

use serde::Serialize;
use std::collections::HashMap;

/// Category of an indexed symbol.
///
/// Search shards name the category through their filename prefix; per-page
/// tables only distinguish classes and enums structurally, so their plain
/// rows start out as `Member` until a shard refines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Namespace,
    File,
    Function,
    Variable,
    Typedef,
    Enum,
    Enumerator,
    Define,
    Related,
    Page,
    /// Unrefined member of a page — kind unknown from the source table.
    Member,
}

impl SymbolKind {
    /// Lowercase label used in output and in `--filter` arguments.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Namespace => "namespace",
            SymbolKind::File => "file",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Enum => "enum",
            SymbolKind::Enumerator => "enumerator",
            SymbolKind::Define => "define",
            SymbolKind::Related => "related",
            SymbolKind::Page => "page",
            SymbolKind::Member => "member",
        }
    }

    /// Parse a `--filter` label. Returns None for unknown labels.
    pub fn from_label(label: &str) -> Option<SymbolKind> {
        Some(match label {
            "class" => SymbolKind::Class,
            "namespace" => SymbolKind::Namespace,
            "file" => SymbolKind::File,
            "function" => SymbolKind::Function,
            "variable" => SymbolKind::Variable,
            "typedef" => SymbolKind::Typedef,
            "enum" => SymbolKind::Enum,
            "enumerator" => SymbolKind::Enumerator,
            "define" => SymbolKind::Define,
            "related" => SymbolKind::Related,
            "page" => SymbolKind::Page,
            "member" => SymbolKind::Member,
            _ => return None,
        })
    }
}

/// Documentation location of a symbol: target page plus optional fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    /// Page stem without the `.html` suffix, e.g. `class_bframe`.
    pub page: String,
    /// Fragment hash on that page, e.g. `a6bc366f…`. Absent for rows that
    /// link to a whole page (classes in per-page tables).
    pub fragment: Option<String>,
}

impl Anchor {
    /// Render back to the site-relative href form.
    pub fn href(&self) -> String {
        match &self.fragment {
            Some(frag) => format!("{}.html#{}", self.page, frag),
            None => format!("{}.html", self.page),
        }
    }
}

/// One entry of the symbol index.
///
/// Names are NOT unique: overloads and header/impl re-declarations produce
/// multiple entries sharing a name.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    pub anchor: Anchor,
    /// Owning class or namespace, when the search index names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Declaration text, e.g. `object(string tag)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Source file providing the definition when declared elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defining_file: Option<String>,
}

/// Append-only multimap over symbol entries.
///
/// Entries are pushed once during the build phase and only read afterwards;
/// `by_name` maps a name to every entry carrying it, in insertion order.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    entries: Vec<SymbolEntry>,
    by_name: HashMap<String, Vec<usize>>,
    /// Navigation tree, when a navtree file was among the inputs.
    pub nav: Option<NavNode>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SymbolEntry) {
        self.by_name
            .entry(entry.name.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries named exactly `name`.
    pub fn lookup(&self, name: &str) -> Vec<&SymbolEntry> {
        self.by_name
            .get(name)
            .map(|idxs| idxs.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// All entries whose name contains `needle`, case-insensitively.
    pub fn lookup_contains(&self, needle: &str) -> Vec<&SymbolEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Drop entries not matching the predicate, rebuilding the name map.
    pub fn retain<F: FnMut(&SymbolEntry) -> bool>(&mut self, mut f: F) {
        self.entries.retain(|e| f(e));
        self.by_name.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.by_name.entry(entry.name.clone()).or_default().push(i);
        }
    }
}

/// Node of the site navigation tree.
#[derive(Debug, Clone, Serialize)]
pub struct NavNode {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

/// Symbols grouped under one target page, ready for rendering.
#[derive(Debug, Serialize)]
pub struct PageDoc {
    /// Page stem, e.g. `mg__processing_8h`.
    pub page: String,
    /// Decoded human title, e.g. `mg_processing.h`.
    pub title: String,
    pub entries: Vec<SymbolEntry>,
}

/// Top-level site summary: every page plus the navigation tree.
#[derive(Debug, Serialize)]
pub struct SiteDoc {
    pub title: String,
    pub pages: Vec<PageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<NavNode>,
}

/// One line of the site summary.
#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub page: String,
    pub title: String,
    pub symbols: usize,
}
