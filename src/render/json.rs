//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the model directly; consumers get the same fields the
//! markdown and HTML renderers show.

use crate::model::{PageDoc, SiteDoc};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_page(&self, doc: &PageDoc) -> String {
        let mut out = serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }

    fn render_site(&self, site: &SiteDoc) -> String {
        let mut out = serde_json::to_string_pretty(site).unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
