//! Per-page symbol table interpretation.
//!
//! A page table (`mg__processing_8h.js`, `class_bframe.js`, ...) is one var
//! holding rows of `[name, href, third]`. The third element tells the row
//! apart:
//!
//! - string: the row is a compound (class/struct) whose member list lives in
//!   the named child variable
//! - null: a plain member anchored on this page (kind not recoverable here)
//! - array: an enum, with `[name, href, null]` child rows per enumerator

use crate::anchor;
use crate::model::{SymbolEntry, SymbolKind};
use crate::parser::js::JsValue;
use anyhow::{bail, Result};

/// Interpret the rows of a per-page table into index entries.
pub fn interpret(rows: &[JsValue]) -> Result<Vec<SymbolEntry>> {
    let mut entries = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let Some(cols) = row.as_array() else {
            bail!("row {} is not an array", i);
        };
        if cols.len() != 3 {
            bail!("row {} has {} columns, expected 3", i, cols.len());
        }
        let (Some(name), Some(href)) = (cols[0].as_str(), cols[1].as_str()) else {
            bail!("row {} has non-string name or href", i);
        };
        let name = anchor::decode_entities(name);
        let target = anchor::split_href(href);

        match &cols[2] {
            JsValue::Str(_) => entries.push(SymbolEntry {
                name,
                kind: SymbolKind::Class,
                anchor: target,
                scope: None,
                signature: None,
                defining_file: None,
            }),
            JsValue::Null => entries.push(SymbolEntry {
                name,
                kind: SymbolKind::Member,
                anchor: target,
                scope: None,
                signature: None,
                defining_file: None,
            }),
            JsValue::Array(children) => {
                let enum_name = name.clone();
                entries.push(SymbolEntry {
                    name,
                    kind: SymbolKind::Enum,
                    anchor: target,
                    scope: None,
                    signature: None,
                    defining_file: None,
                });
                for (j, child) in children.iter().enumerate() {
                    let Some(ccols) = child.as_array() else {
                        bail!("row {} enumerator {} is not an array", i, j);
                    };
                    let (Some(cname), Some(chref)) =
                        (ccols.first().and_then(JsValue::as_str), ccols.get(1).and_then(JsValue::as_str))
                    else {
                        bail!("row {} enumerator {} is malformed", i, j);
                    };
                    entries.push(SymbolEntry {
                        name: anchor::decode_entities(cname),
                        kind: SymbolKind::Enumerator,
                        anchor: anchor::split_href(chref),
                        scope: Some(enum_name.clone()),
                        signature: None,
                        defining_file: None,
                    });
                }
            }
            JsValue::Num(_) => bail!("row {} has a numeric third column", i),
        }
    }
    Ok(entries)
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
    fn class_member_and_macro_rows() {
        let entries = interpret(&rows(
            r#"var t = [
                [ "Bframe", "class_bframe.html", "class_bframe" ],
                [ "APPLY_CTF", "mg__processing_8h.html#ad0c4", null ]
            ];"#,
        ))
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Bframe");
        assert_eq!(entries[0].kind, SymbolKind::Class);
        assert_eq!(entries[0].anchor.page, "class_bframe");
        assert_eq!(entries[0].anchor.fragment, None);

        assert_eq!(entries[1].kind, SymbolKind::Member);
        assert_eq!(entries[1].anchor.fragment.as_deref(), Some("ad0c4"));
    }

    #[test]
    fn enum_rows_yield_enumerators() {
        let entries = interpret(&rows(
            r#"var t = [
                [ "FOMType", "p.html#a9b82", [
                  [ "NoFOM", "p.html#a9b82a551a", null ],
                  [ "FOM", "p.html#a9b82a065f", null ]
                ] ]
            ];"#,
        ))
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, SymbolKind::Enum);
        assert_eq!(entries[1].kind, SymbolKind::Enumerator);
        assert_eq!(entries[1].scope.as_deref(), Some("FOMType"));
        assert_eq!(entries[2].name, "FOM");
    }

    #[test]
    fn malformed_row_is_an_error() {
        assert!(interpret(&rows(r#"var t = [ [ "x", "y.html" ] ];"#)).is_err());
        assert!(interpret(&rows(r#"var t = [ "flat" ];"#)).is_err());
    }
}
