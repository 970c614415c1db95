//! TypeScript ambient-declaration assembler.
//!
//! Owner blocks come first, in discovery order, each wrapping its sorted
//! members; free-standing declarations follow. Blocks are separated by a
//! blank line and the document ends with a single newline.

use crate::model::*;
use crate::render::declaration::{owner_comment, render_record};
use crate::render::Renderer;
use anyhow::Result;

const INDENT: &str = "  ";

pub struct DtsRenderer;

impl Renderer for DtsRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut blocks: Vec<String> = Vec::new();

        for owner in &doc.owners {
            blocks.push(render_owner(owner));
        }
        for record in &doc.free {
            blocks.push(render_record(record));
        }

        if blocks.is_empty() {
            return Ok(String::new());
        }
        let mut output = blocks.join("\n\n");
        output.push('\n');
        Ok(output)
    }
}

fn render_owner(owner: &Owner) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(comment) = owner_comment(&owner.record) {
        lines.extend(comment);
    }
    // The resolver only registers owners that have a declaration.
    let opener = owner.record.declarations.first().map_or("", String::as_str);
    lines.push(format!("{} {{", opener));

    let members: Vec<String> = owner
        .members
        .iter()
        .map(|m| indent(&render_record(m)))
        .collect();
    if !members.is_empty() {
        lines.push(members.join("\n\n"));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// Indent every non-empty line by one level.
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
