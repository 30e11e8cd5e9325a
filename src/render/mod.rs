//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::{PageDoc, SiteDoc};
use anyhow::{anyhow, Result};

/// Trait for rendering the extracted index into a specific output format.
pub trait Renderer {
    /// Render one page's symbol listing.
    fn render_page(&self, doc: &PageDoc) -> String;
    /// Render the site summary (page list plus navigation tree).
    fn render_site(&self, site: &SiteDoc) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown, html, or json",
            format
        )),
    }
}
