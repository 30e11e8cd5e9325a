//! Markdown renderer — one document per target page plus a site summary.

use crate::model::{NavNode, PageDoc, SiteDoc, SymbolEntry};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_page(&self, doc: &PageDoc) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", doc.title));

        // Table of contents linking into the original site
        if !doc.entries.is_empty() {
            output.push_str("## Index\n\n");
            for entry in &doc.entries {
                output.push_str(&format!(
                    "* [{}]({}) `{}`\n",
                    escape(&entry.name),
                    entry.anchor.href(),
                    entry.kind.label()
                ));
            }
            output.push('\n');
        }

        for entry in &doc.entries {
            output.push_str(&render_entry(entry));
            output.push('\n');
        }

        output
    }

    fn render_site(&self, site: &SiteDoc) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", site.title));

        if let Some(ref nav) = site.nav {
            output.push_str("## Contents\n\n");
            render_nav(&mut output, nav, 0);
            output.push('\n');
        }

        if !site.pages.is_empty() {
            output.push_str("## Pages\n\n");
            for page in &site.pages {
                output.push_str(&format!(
                    "* [{}]({}.html) — {} symbols\n",
                    escape(&page.title),
                    page.page,
                    page.symbols
                ));
            }
            output.push('\n');
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a single index entry's block.
fn render_entry(entry: &SymbolEntry) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}\n", escape(&entry.name)));
    lines.push(format!("* kind: `{}`", entry.kind.label()));
    if let Some(ref scope) = entry.scope {
        lines.push(format!("* scope: `{}`", scope));
    }
    if let Some(ref sig) = entry.signature {
        lines.push(format!("* signature: `{}`", sig));
    }
    if let Some(ref file) = entry.defining_file {
        lines.push(format!("* defined in: `{}`", file));
    }
    lines.push(format!("* anchor: [{0}]({0})", entry.anchor.href()));

    lines.join("\n") + "\n"
}

fn render_nav(out: &mut String, node: &NavNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.url {
        Some(url) => out.push_str(&format!("{}* [{}]({})\n", indent, escape(&node.title), url)),
        None => out.push_str(&format!("{}* {}\n", indent, escape(&node.title))),
    }
    for child in &node.children {
        render_nav(out, child, depth + 1);
    }
}

/// Escape the markdown-significant characters symbol names can carry.
fn escape(text: &str) -> String {
    text.replace('<', "\\<").replace('>', "\\>").replace('*', "\\*")
}
