//! Site-search shard interpretation.
//!
//! A shard (`search/functions_f.js`, ...) holds one `searchData` var of rows
//! shaped `[key, [display, match...]]`, each match being `[url, 1, context]`.
//! The key carries a `_<n>` disambiguation suffix and hex escapes; the
//! display name is authoritative, so the key is ignored. The context string
//! packs up to three facts:
//!
//! - `JSvalue` — owning scope only
//! - `JSvalue::object(string tag)` — scope plus signature
//! - `tab(ostream &amp;out):&#160;utilities.cpp` — signature plus the file
//!   that defines the symbol, after a `:&#160;` separator
//! - `molecule_to_map.cpp` — defining file only
//!
//! The symbol kind comes from the shard's filename prefix, not its payload:
//! `functions_f.js` holds functions, `defines_0.js` macros, and so on.

use crate::anchor;
use crate::model::{SymbolEntry, SymbolKind};
use crate::parser::js::JsValue;
use anyhow::{bail, Result};

/// Map a shard filename prefix to the kind of every entry in it.
pub fn kind_for_shard(file_stem: &str) -> Option<SymbolKind> {
    let prefix = file_stem.split('_').next().unwrap_or(file_stem);
    Some(match prefix {
        "all" => SymbolKind::Member,
        "classes" => SymbolKind::Class,
        "namespaces" => SymbolKind::Namespace,
        "files" => SymbolKind::File,
        "functions" => SymbolKind::Function,
        "variables" => SymbolKind::Variable,
        "typedefs" => SymbolKind::Typedef,
        "enums" => SymbolKind::Enum,
        "enumvalues" => SymbolKind::Enumerator,
        "defines" => SymbolKind::Define,
        "related" => SymbolKind::Related,
        "pages" => SymbolKind::Page,
        _ => return None,
    })
}

/// Interpret the rows of one `searchData` var.
pub fn interpret(rows: &[JsValue], kind: SymbolKind) -> Result<Vec<SymbolEntry>> {
    let mut entries = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let Some(cols) = row.as_array() else {
            bail!("row {} is not an array", i);
        };
        if cols.len() != 2 {
            bail!("row {} has {} columns, expected 2", i, cols.len());
        }
        let Some(payload) = cols[1].as_array() else {
            bail!("row {} payload is not an array", i);
        };
        let Some(display) = payload.first().and_then(JsValue::as_str) else {
            bail!("row {} has no display name", i);
        };
        let name = anchor::decode_entities(display);

        for (j, m) in payload[1..].iter().enumerate() {
            let Some(mcols) = m.as_array() else {
                bail!("row {} match {} is not an array", i, j);
            };
            let Some(url) = mcols.first().and_then(JsValue::as_str) else {
                bail!("row {} match {} has no url", i, j);
            };
            let context = mcols.get(2).and_then(JsValue::as_str);
            let (scope, signature, defining_file) = match context {
                Some(ctx) => parse_context(ctx),
                None => (None, None, None),
            };
            entries.push(SymbolEntry {
                name: name.clone(),
                kind,
                anchor: anchor::split_href(url),
                scope,
                signature,
                defining_file,
            });
        }
    }
    Ok(entries)
}

/// Split a raw context string into (scope, signature, defining_file).
///
/// The `:&#160;` separator is matched before entity decoding so a plain
/// colon inside a signature cannot be mistaken for it.
fn parse_context(raw: &str) -> (Option<String>, Option<String>, Option<String>) {
    let (head_raw, file) = match raw.split_once(":&#160;") {
        Some((head, tail)) => (head, Some(anchor::decode_entities(tail))),
        None => (raw, None),
    };
    let head = anchor::decode_entities(head_raw);

    if file.is_none() && looks_like_source_file(&head) {
        return (None, None, Some(head));
    }

    // `Scope::decl(args)` — split on the last `::` outside the arg list
    if let Some(paren) = head.find('(') {
        match head[..paren].rfind("::") {
            Some(sep) => {
                let scope = head[..sep].to_string();
                let sig = head[sep + 2..].to_string();
                (Some(scope), Some(sig), file)
            }
            None => (None, Some(head), file),
        }
    } else if head.is_empty() {
        (None, None, file)
    } else {
        // No argument list: a bare scope like `JSvalue` or `Bsymmetry`
        (Some(head), None, file)
    }
}

const SOURCE_SUFFIXES: &[&str] = &[".cpp", ".cc", ".cxx", ".c", ".h", ".hpp"];

fn looks_like_source_file(text: &str) -> bool {
    !text.contains(' ') && SOURCE_SUFFIXES.iter().any(|s| text.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::js;

    fn rows(input: &str) -> Vec<JsValue> {
        let vars = js::parse_document(input).unwrap();
        vars.into_iter().next().unwrap().1.as_array().unwrap().to_vec()
    }

    #[test]
    fn shard_kinds() {
        assert_eq!(kind_for_shard("functions_f"), Some(SymbolKind::Function));
        assert_eq!(kind_for_shard("defines_0"), Some(SymbolKind::Define));
        assert_eq!(kind_for_shard("all_12"), Some(SymbolKind::Member));
        assert_eq!(kind_for_shard("bogus_1"), None);
    }

    #[test]
    fn overloads_become_separate_entries() {
        let entries = interpret(
            &rows(
                "var searchData=[['object_0',['object',\
                 ['../class_j_svalue.html#a6bc',1,'JSvalue::object()'],\
                 ['../class_j_svalue.html#a008',1,'JSvalue::object(string tag)']]]];",
            ),
            SymbolKind::Function,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "object");
        assert_eq!(entries[0].scope.as_deref(), Some("JSvalue"));
        assert_eq!(entries[0].signature.as_deref(), Some("object()"));
        assert_eq!(entries[1].signature.as_deref(), Some("object(string tag)"));
        assert_eq!(entries[1].anchor.fragment.as_deref(), Some("a008"));
    }

    #[test]
    fn defining_file_split() {
        let entries = interpret(
            &rows(
                "var searchData=[['tab_0',['tab',\
                 ['../utilities_8h.html#a5bd',1,'tab(ostream &amp;out):&#160;utilities.cpp']]]];",
            ),
            SymbolKind::Function,
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scope, None);
        assert_eq!(entries[0].signature.as_deref(), Some("tab(ostream &out)"));
        assert_eq!(entries[0].defining_file.as_deref(), Some("utilities.cpp"));
    }

    #[test]
    fn bare_file_context() {
        let entries = interpret(
            &rows(
                "var searchData=[['one_5fsf_0',['one_sf',\
                 ['../molecule__to__map_8cpp.html#a3e5',1,'molecule_to_map.cpp']]]];",
            ),
            SymbolKind::Function,
        )
        .unwrap();

        assert_eq!(entries[0].name, "one_sf");
        assert_eq!(entries[0].scope, None);
        assert_eq!(
            entries[0].defining_file.as_deref(),
            Some("molecule_to_map.cpp")
        );
    }

    #[test]
    fn bare_scope_context() {
        let entries = interpret(
            &rows(
                "var searchData=[['operations_0',['operations',\
                 ['../struct_bsymmetry.html#a49c',1,'Bsymmetry']]]];",
            ),
            SymbolKind::Variable,
        )
        .unwrap();

        assert_eq!(entries[0].scope.as_deref(), Some("Bsymmetry"));
        assert_eq!(entries[0].signature, None);
        assert_eq!(entries[0].defining_file, None);
    }

    #[test]
    fn entity_heavy_name() {
        let entries = interpret(
            &rows(
                "var searchData=[['x_0',['operator Complex&lt; T2 &gt;',\
                 ['../class_complex.html#af14',1,'Complex']]]];",
            ),
            SymbolKind::Function,
        )
        .unwrap();
        assert_eq!(entries[0].name, "operator Complex< T2 >");
    }
}
