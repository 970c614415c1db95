//! Declaration renderer: one record → doc comment + signature line(s).
//!
//! Output is indent-agnostic; the assembler indents members.

use crate::model::AnnotationRecord;

/// Render a record with at least one declaration. Each overload gets its own
/// copy of the doc comment directly above it.
pub fn render_record(record: &AnnotationRecord) -> String {
    let comment = doc_comment(record);
    let mut lines: Vec<&str> = Vec::new();
    for declaration in &record.declarations {
        if let Some(ref comment) = comment {
            lines.extend(comment.iter().map(String::as_str));
        }
        lines.push(declaration);
    }
    lines.join("\n")
}

/// The `/** ... */` block for a record, or `None` when the record carries
/// nothing to document.
pub fn doc_comment(record: &AnnotationRecord) -> Option<Vec<String>> {
    if record.description.is_none() && record.params.is_empty() && record.returns.is_none() {
        return None;
    }

    let mut lines = vec!["/**".to_string()];
    if let Some(ref desc) = record.description {
        lines.extend(paragraph_lines(desc).map(comment_line));
    }
    for param in &record.params {
        push_tagged(&mut lines, &format!("@param {}", param.name), &param.text);
    }
    if let Some(ref ret) = record.returns {
        push_tagged(&mut lines, "@returns", ret.text.as_deref().unwrap_or(""));
    }
    lines.push(" */".to_string());
    Some(lines)
}

/// Description-only comment used above an owner's opener.
pub fn owner_comment(record: &AnnotationRecord) -> Option<Vec<String>> {
    let desc = record.description.as_deref()?;
    let mut lines = vec!["/**".to_string()];
    lines.extend(paragraph_lines(desc).map(comment_line));
    lines.push(" */".to_string());
    Some(lines)
}

/// Split on line breaks; `\r\n` and `\n` both count as one separator.
fn paragraph_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

fn comment_line(text: &str) -> String {
    if text.is_empty() {
        " *".to_string()
    } else {
        format!(" * {}", text)
    }
}

/// A tag line with its text; extra text lines follow as plain comment lines.
fn push_tagged(lines: &mut Vec<String>, tag: &str, text: &str) {
    let mut parts = paragraph_lines(text);
    let first = parts.next().unwrap_or("");
    if first.is_empty() {
        lines.push(format!(" * {}", tag));
    } else {
        lines.push(format!(" * {} {}", tag, first));
    }
    lines.extend(parts.map(comment_line));
}
