//! HTML renderer — standalone page with semantic markup.

use crate::model::{NavNode, PageDoc, SiteDoc, SymbolEntry};
use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_page(&self, doc: &PageDoc) -> String {
        let mut out = String::new();
        push_head(&mut out, &doc.title);

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&doc.title)));

        if !doc.entries.is_empty() {
            out.push_str("<h2>Index</h2>\n<ul>\n");
            for entry in &doc.entries {
                out.push_str(&format!(
                    "  <li><a href=\"{}\">{}</a> <span class=\"kind\">{}</span></li>\n",
                    html_escape(&entry.anchor.href()),
                    html_escape(&entry.name),
                    entry.kind.label()
                ));
            }
            out.push_str("</ul>\n");
        }

        for entry in &doc.entries {
            out.push_str(&render_entry_html(entry));
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn render_site(&self, site: &SiteDoc) -> String {
        let mut out = String::new();
        push_head(&mut out, &site.title);

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&site.title)));

        if let Some(ref nav) = site.nav {
            out.push_str("<h2>Contents</h2>\n");
            render_nav_html(&mut out, nav);
        }

        if !site.pages.is_empty() {
            out.push_str("<h2>Pages</h2>\n<ul>\n");
            for page in &site.pages {
                out.push_str(&format!(
                    "  <li><a href=\"{}.html\">{}</a> ({} symbols)</li>\n",
                    html_escape(&page.page),
                    html_escape(&page.title),
                    page.symbols
                ));
            }
            out.push_str("</ul>\n");
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn push_head(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
    out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
    out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
    out.push_str("dd { margin-left: 1.5em; }\n");
    out.push_str(".kind { display: inline-block; font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; margin-left: 0.5em; background: #e4e4e4; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
}

fn render_entry_html(entry: &SymbolEntry) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<h3>{} <span class=\"kind\">{}</span></h3>\n<dl>\n",
        html_escape(&entry.name),
        entry.kind.label()
    ));
    if let Some(ref scope) = entry.scope {
        out.push_str(&format!(
            "  <dt>Scope</dt><dd><code>{}</code></dd>\n",
            html_escape(scope)
        ));
    }
    if let Some(ref sig) = entry.signature {
        out.push_str(&format!(
            "  <dt>Signature</dt><dd><code>{}</code></dd>\n",
            html_escape(sig)
        ));
    }
    if let Some(ref file) = entry.defining_file {
        out.push_str(&format!(
            "  <dt>Defined in</dt><dd><code>{}</code></dd>\n",
            html_escape(file)
        ));
    }
    out.push_str(&format!(
        "  <dt>Anchor</dt><dd><a href=\"{0}\">{0}</a></dd>\n",
        html_escape(&entry.anchor.href())
    ));
    out.push_str("</dl>\n");
    out
}

fn render_nav_html(out: &mut String, node: &NavNode) {
    out.push_str("<ul>\n");
    match &node.url {
        Some(url) => out.push_str(&format!(
            "  <li><a href=\"{}\">{}</a>",
            html_escape(url),
            html_escape(&node.title)
        )),
        None => out.push_str(&format!("  <li>{}", html_escape(&node.title))),
    }
    if !node.children.is_empty() {
        out.push('\n');
        for child in &node.children {
            render_nav_html(out, child);
        }
    }
    out.push_str("</li>\n</ul>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
