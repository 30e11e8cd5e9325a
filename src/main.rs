//! doxidx — extract, query and re-render the symbol index of a
//! Doxygen-generated documentation site.
//!
//! Three modes:
//!
//! - **stdin mode**: `doxidx < mg__processing_8h.js` renders one data file
//! - **file mode**: `doxidx -o out docs/html` rebuilds per-page listings
//!   and a site summary from the whole generated tree
//! - **lookup mode**: `doxidx -l project_update docs/html` queries the
//!   merged index and prints matching entries

mod anchor;
mod model;
mod parser;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use model::{PageDoc, PageSummary, SiteDoc, SymbolEntry, SymbolIndex, SymbolKind};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

#[derive(Parser)]
#[command(
    name = "doxidx",
    about = "Extract, query and re-render the symbol index of a Doxygen-generated site"
)]
struct Cli {
    /// Input .js data files, directories, or glob patterns. If omitted,
    /// reads a single data file from stdin.
    files: Vec<String>,

    /// Output directory (required in file mode)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Look up a symbol by name and print matching entries
    #[arg(short = 'l', long)]
    lookup: Option<String>,

    /// Match lookup names by case-insensitive substring instead of exactly
    #[arg(long)]
    contains: bool,

    /// Filter entries by kind. Prefix with ! to exclude.
    /// Can be specified multiple times. E.g. --filter '!member'
    #[arg(long)]
    filter: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref name) = cli.lookup {
        return lookup_mode(&cli, name);
    }
    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }
    file_mode(&cli)
}

/// stdin mode: read one data file from stdin, render to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let parsed = parser::parse_stdin(&input)?;
    let renderer = render::create_renderer(&cli.format)?;

    if let Some(nav) = parsed.nav {
        let site = SiteDoc {
            title: nav.title.clone(),
            pages: Vec::new(),
            nav: Some(nav),
        };
        print!("{}", renderer.render_site(&site));
        return Ok(());
    }

    let mut index = parser::merge::merge(vec![parsed.entries]);
    filter_entries(&mut index, &cli.filter)?;

    // A single data file targets a single page in practice; title the
    // output after it when that holds.
    let title = match index.entries().first() {
        Some(first) if index.entries().iter().all(|e| e.anchor.page == first.anchor.page) => {
            anchor::decode_page_stem(&first.anchor.page)
        }
        _ => "symbols".to_string(),
    };
    let doc = PageDoc {
        page: String::new(),
        title,
        entries: index.entries().to_vec(),
    };
    print!("{}", renderer.render_page(&doc));
    Ok(())
}

/// file mode: parse all inputs, merge, write per-page listings and a
/// site summary to the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let mut index = build_index(&cli.files)?;
    filter_entries(&mut index, &cli.filter)?;
    if index.is_empty() {
        eprintln!("warning: no symbols indexed");
    }

    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    let pages = group_by_page(index.entries());
    let mut summaries = Vec::with_capacity(pages.len());

    for doc in &pages {
        let out_path = output_dir.join(format!("{}.{}", doc.page, ext));
        fs::write(&out_path, renderer.render_page(doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        summaries.push(PageSummary {
            page: doc.page.clone(),
            title: doc.title.clone(),
            symbols: doc.entries.len(),
        });
    }

    let title = index
        .nav
        .as_ref()
        .map(|n| n.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Symbol index".to_string());
    let site = SiteDoc {
        title,
        pages: summaries,
        nav: index.nav.clone(),
    };
    let index_path = output_dir.join(format!("index.{}", ext));
    fs::write(&index_path, renderer.render_site(&site))
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    Ok(())
}

/// lookup mode: query the merged index and print matches to stdout.
fn lookup_mode(cli: &Cli, name: &str) -> Result<()> {
    if cli.files.is_empty() {
        bail!("--lookup requires input files");
    }
    let mut index = build_index(&cli.files)?;
    filter_entries(&mut index, &cli.filter)?;

    let hits = if cli.contains {
        index.lookup_contains(name)
    } else {
        index.lookup(name)
    };
    if hits.is_empty() {
        bail!("no entries match: {}", name);
    }

    for entry in hits {
        println!("{}", format_hit(entry));
    }
    Ok(())
}

/// One tab-separated lookup result line.
fn format_hit(entry: &SymbolEntry) -> String {
    let mut line = format!(
        "{}\t{}\t{}",
        entry.name,
        entry.kind.label(),
        entry.anchor.href()
    );
    match (&entry.scope, &entry.signature) {
        (Some(scope), Some(sig)) => line.push_str(&format!("\t{}::{}", scope, sig)),
        (Some(scope), None) => line.push_str(&format!("\t{}", scope)),
        (None, Some(sig)) => line.push_str(&format!("\t{}", sig)),
        (None, None) => {}
    }
    if let Some(ref file) = entry.defining_file {
        line.push_str(&format!("\t{}", file));
    }
    line
}

/// Parse every input into entries and merge them into one index.
/// Unparsable inputs warn and are skipped, as long as something parsed.
fn build_index(patterns: &[String]) -> Result<SymbolIndex> {
    let input_files = expand_inputs(patterns)?;

    let mut sources: Vec<Vec<SymbolEntry>> = Vec::new();
    let mut nav = None;
    let mut parsed_any = false;

    for path in &input_files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match parser::parse_file(path, &content) {
            Ok(parsed) => {
                parsed_any = true;
                if !parsed.entries.is_empty() {
                    sources.push(parsed.entries);
                }
                if parsed.nav.is_some() {
                    nav = parsed.nav;
                }
            }
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
            }
        }
    }

    if !parsed_any {
        bail!("no usable input files");
    }

    let mut index = parser::merge::merge(sources);
    index.nav = nav;
    Ok(index)
}

/// Doxygen ships UI scripts next to its data files; skip them when
/// scanning a directory. `navtreedata.js` stays in.
static RE_UI_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(jquery|search|searchdata|dynsections|menu|menudata|navtree|navtreeindex[0-9]*|resize|cookie|clipboard|doxygen-awesome.*)$",
    )
    .unwrap()
});

fn is_ui_script(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| RE_UI_SCRIPT.is_match(stem))
        .unwrap_or(false)
}

/// Expand positional arguments into data file paths.
///
/// A directory contributes its `*.js` files plus those of its `search/`
/// subdirectory; anything else is tried as a literal path and then as a
/// glob pattern.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            scan_dir(path, &mut files)?;
            let search_dir = path.join("search");
            if search_dir.is_dir() {
                scan_dir(&search_dir, &mut files)?;
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Collect the data `.js` files of one directory (non-recursive).
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let p = entry.path();
        if p.is_file()
            && p.extension().and_then(|e| e.to_str()) == Some("js")
            && !is_ui_script(&p)
        {
            files.push(p);
        }
    }
    Ok(())
}

/// Apply `--filter` kind filters to the index.
///
/// Inclusion filters keep entries matching any listed kind; `!kind`
/// filters exclude. Unknown kind labels are an error.
fn filter_entries(index: &mut SymbolIndex, filters: &[String]) -> Result<()> {
    if filters.is_empty() {
        return Ok(());
    }

    let mut include: Vec<SymbolKind> = Vec::new();
    let mut exclude: Vec<SymbolKind> = Vec::new();
    for filter in filters {
        let (label, excluded) = match filter.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (filter.as_str(), false),
        };
        let kind = SymbolKind::from_label(label)
            .with_context(|| format!("unknown kind in --filter: {}", label))?;
        if excluded {
            exclude.push(kind);
        } else {
            include.push(kind);
        }
    }

    index.retain(|entry| {
        if exclude.contains(&entry.kind) {
            return false;
        }
        include.is_empty() || include.contains(&entry.kind)
    });
    Ok(())
}

/// Group index entries into per-page documents, preserving entry order.
fn group_by_page(entries: &[SymbolEntry]) -> Vec<PageDoc> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<SymbolEntry>> = HashMap::new();

    for entry in entries {
        if !grouped.contains_key(&entry.anchor.page) {
            order.push(entry.anchor.page.clone());
        }
        grouped
            .entry(entry.anchor.page.clone())
            .or_default()
            .push(entry.clone());
    }

    order
        .into_iter()
        .filter_map(|page| {
            grouped.remove(&page).map(|entries| PageDoc {
                title: anchor::decode_page_stem(&page),
                page,
                entries,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Anchor;

    fn entry(name: &str, page: &str, kind: SymbolKind) -> SymbolEntry {
        SymbolEntry {
            name: name.to_string(),
            kind,
            anchor: Anchor {
                page: page.to_string(),
                fragment: Some("a1".to_string()),
            },
            scope: None,
            signature: None,
            defining_file: None,
        }
    }

    #[test]
    fn ui_scripts_are_skipped() {
        assert!(is_ui_script(Path::new("html/jquery.js")));
        assert!(is_ui_script(Path::new("html/navtree.js")));
        assert!(is_ui_script(Path::new("html/navtreeindex3.js")));
        assert!(is_ui_script(Path::new("search/search.js")));
        assert!(is_ui_script(Path::new("search/searchdata.js")));
        assert!(!is_ui_script(Path::new("html/navtreedata.js")));
        assert!(!is_ui_script(Path::new("search/functions_f.js")));
        assert!(!is_ui_script(Path::new("html/mg__processing_8h.js")));
    }

    #[test]
    fn filter_includes_and_excludes() {
        let mut index = SymbolIndex::new();
        index.push(entry("f", "p", SymbolKind::Function));
        index.push(entry("m", "p", SymbolKind::Member));
        index.push(entry("d", "p", SymbolKind::Define));

        filter_entries(&mut index, &["!member".to_string()]).unwrap();
        assert_eq!(index.len(), 2);

        filter_entries(&mut index, &["function".to_string()]).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].name, "f");
    }

    #[test]
    fn filter_rejects_unknown_kind() {
        let mut index = SymbolIndex::new();
        assert!(filter_entries(&mut index, &["bogus".to_string()]).is_err());
    }

    #[test]
    fn grouping_preserves_first_seen_page_order() {
        let entries = vec![
            entry("a", "page_b", SymbolKind::Function),
            entry("b", "page_a", SymbolKind::Function),
            entry("c", "page_b", SymbolKind::Function),
        ];
        let pages = group_by_page(&entries);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page, "page_b");
        assert_eq!(pages[0].entries.len(), 2);
        assert_eq!(pages[1].page, "page_a");
    }

    #[test]
    fn hit_line_carries_context() {
        let mut e = entry("tab", "utilities_8h", SymbolKind::Function);
        e.signature = Some("tab(ostream &out)".to_string());
        e.defining_file = Some("utilities.cpp".to_string());
        assert_eq!(
            format_hit(&e),
            "tab\tfunction\tutilities_8h.html#a1\ttab(ostream &out)\tutilities.cpp"
        );
    }
}
