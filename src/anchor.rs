//! Href splitting and Doxygen name decoding.
//!
//! Doxygen escapes identifiers twice on the way into its generated site:
//! HTML entities inside display strings, and a filename-safe escaping for
//! page stems (`mg__processing_8h` for `mg_processing.h`, `class_bframe`
//! for `Bframe`). This module undoes both.

use crate::model::Anchor;

/// Split a site-relative href into page stem and fragment.
///
/// `"../class_bframe.html#a6bc3"` → page `class_bframe`, fragment `a6bc3`.
pub fn split_href(href: &str) -> Anchor {
    let trimmed = href.trim_start_matches("../").trim_start_matches("./");
    let (page_part, fragment) = match trimmed.split_once('#') {
        Some((p, f)) if !f.is_empty() => (p, Some(f.to_string())),
        Some((p, _)) => (p, None),
        None => (trimmed, None),
    };
    let page = page_part.strip_suffix(".html").unwrap_or(page_part);
    Anchor {
        page: page.to_string(),
        fragment,
    }
}

/// Decode the HTML entities Doxygen emits into JS string literals.
///
/// Unknown named entities pass through verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let Some(semi) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                if let Some(num) = entity.strip_prefix('#') {
                    match num.parse::<u32>().ok().and_then(char::from_u32) {
                        // Non-breaking space normalizes to a plain space
                        Some('\u{a0}') => out.push(' '),
                        Some(c) => out.push(c),
                        None => {
                            out.push_str(&rest[..semi + 1]);
                        }
                    }
                } else {
                    out.push_str(&rest[..semi + 1]);
                }
            }
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    out
}

/// Page-kind prefixes Doxygen puts in front of compound page stems.
const PAGE_PREFIXES: &[&str] = &["class_", "struct_", "union_", "interface_", "namespace_"];

/// Decode a page stem into a display title.
///
/// Undoes Doxygen's filename escaping: `__`→`_`, `_8`→`.`, `_1`→`:`,
/// `_2`→`/`, `_3`→`<`, `_4`→`>`, `_x` (lowercase x)→uppercase letter.
/// Compound prefixes (`class_`, `struct_`, ...) are stripped so
/// `class_bframe` decodes to `Bframe`.
pub fn decode_page_stem(stem: &str) -> String {
    let mut body = stem;
    for prefix in PAGE_PREFIXES {
        if stem.starts_with(prefix) {
            // Keep the case marker underscore: "class_bframe" → "_bframe"
            body = &stem[prefix.len() - 1..];
            break;
        }
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('_') => {
                chars.next();
                out.push('_');
            }
            Some('8') => {
                chars.next();
                out.push('.');
            }
            Some('1') => {
                chars.next();
                out.push(':');
            }
            Some('2') => {
                chars.next();
                out.push('/');
            }
            Some('3') => {
                chars.next();
                out.push('<');
            }
            Some('4') => {
                chars.next();
                out.push('>');
            }
            Some(l) if l.is_ascii_lowercase() => {
                chars.next();
                out.push(l.to_ascii_uppercase());
            }
            _ => out.push('_'),
        }
    }
    out
}
