//! Navigation tree interpretation.
//!
//! `navtreedata.js` declares `NAVTREE` as nested `[title, url, third]`
//! triples. The third element is a child array, null for a leaf, or the name
//! of an external chunk variable (`"annotated_dup"`); external chunks are
//! not guaranteed to be among the inputs, so those nodes become leaves. The
//! file also declares `NAVTREEINDEX` and a couple of message strings, which
//! the caller skips by looking up `NAVTREE` by name.

use crate::anchor;
use crate::model::NavNode;
use crate::parser::js::JsValue;
use anyhow::{bail, Result};

/// Interpret the `NAVTREE` value. Its top level is a list with exactly one
/// root node in practice; extra roots are kept as siblings of a synthetic
/// parent to be safe.
pub fn interpret(value: &JsValue) -> Result<NavNode> {
    let Some(roots) = value.as_array() else {
        bail!("NAVTREE is not an array");
    };
    let mut nodes = Vec::with_capacity(roots.len());
    for root in roots {
        nodes.push(node_from(root)?);
    }
    match nodes.len() {
        0 => bail!("NAVTREE is empty"),
        1 => Ok(nodes.into_iter().next().unwrap()),
        _ => Ok(NavNode {
            title: String::new(),
            url: None,
            children: nodes,
        }),
    }
}

fn node_from(value: &JsValue) -> Result<NavNode> {
    let Some(cols) = value.as_array() else {
        bail!("navtree node is not an array");
    };
    if cols.len() != 3 {
        bail!("navtree node has {} columns, expected 3", cols.len());
    }
    let Some(title) = cols[0].as_str() else {
        bail!("navtree node has a non-string title");
    };
    let url = cols[1].as_str().map(|u| u.to_string());

    let children = match &cols[2] {
        JsValue::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                children.push(node_from(item)?);
            }
            children
        }
        // External chunk reference or explicit leaf
        JsValue::Str(_) | JsValue::Null => Vec::new(),
        JsValue::Num(_) => bail!("navtree node has a numeric child column"),
    };

    Ok(NavNode {
        title: anchor::decode_entities(title),
        url,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::js;

    #[test]
    fn parses_nested_tree() {
        let input = r#"var NAVTREE =
[
  [ "Bsoft", "index.html", [
    [ "Classes", "annotated.html", [
      [ "Class List", "annotated.html", "annotated_dup" ],
      [ "Class Index", "classes.html", null ]
    ] ]
  ] ]
];
var NAVTREEINDEX = [ "a.html" ];"#;
        let vars = js::parse_document(input).unwrap();
        let navtree = vars.iter().find(|(n, _)| n == "NAVTREE").unwrap();
        let root = interpret(&navtree.1).unwrap();

        assert_eq!(root.title, "Bsoft");
        assert_eq!(root.url.as_deref(), Some("index.html"));
        assert_eq!(root.children.len(), 1);
        let classes = &root.children[0];
        assert_eq!(classes.children.len(), 2);
        // External chunk reference renders as a leaf
        assert!(classes.children[0].children.is_empty());
        assert!(classes.children[1].children.is_empty());
    }

    #[test]
    fn rejects_malformed_node() {
        let vars = js::parse_document(r#"var NAVTREE = [ [ "x", "y.html" ] ];"#).unwrap();
        assert!(interpret(&vars[0].1).is_err());
    }
}
