//! Record parser — permissive JSON-ish object followed by free prose.
//!
//! A block body looks like
//!
//! ```text
//! {
//!   "type" : "method",
//!   "class" : "Graphics",
//!   "name" : "setFont12x20",
//!   "params" : [
//!     ["scale","int","If >1 the font will be scaled up"],
//!   ],
//!   "typedef" : "setFont12x20(scale: number): Graphics"
//! }
//! Set the current font
//! ```
//!
//! The object may lack its opening or closing brace, carry trailing commas
//! or `//` comments. Everything after the object is the description unless
//! the object has its own `description` key.

use crate::error::ParseError;
use crate::model::*;
use serde_json::{Map, Value};

/// Parse one block body into a record. Synthetic declarations are not
/// attached here; see `synthetic::attach`.
pub fn parse_record(
    file: &str,
    discovery: Discovery,
    body: &str,
) -> Result<AnnotationRecord, ParseError> {
    let malformed = |reason: String| ParseError::MalformedRecord {
        file: file.to_string(),
        offset: discovery.offset,
        reason,
    };

    let (object, prose) = split_body(body);
    let value: Value = serde_json::from_str(&relax(&object)).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(mut fields) = value else {
        return Err(malformed("expected a key/value object".to_string()));
    };

    let kind = match fields.remove("type") {
        Some(Value::String(tag)) => RecordKind::from_tag(&tag),
        Some(_) => return Err(malformed("\"type\" must be a string".to_string())),
        None => return Err(malformed("missing \"type\"".to_string())),
    };

    let mut record = AnnotationRecord::new(kind, discovery);
    let class = take_string(&mut fields, "class");
    if record.kind.is_owner() {
        record.name = class;
    } else {
        record.owner = class;
        record.name = take_string(&mut fields, "name");
    }
    record.description = take_text(&mut fields, "description")
        .or_else(|| trailing_prose(prose))
        .filter(|d| !d.trim().is_empty());
    record.params = take_params(&mut fields);
    record.returns = take_return(&mut fields);
    record.instance_of = take_string(&mut fields, "instanceof");
    record.declarations = take_declarations(&mut fields);
    record.extra = fields;

    Ok(record)
}

// -- Body splitting -----------------------------------------------------------

enum Extent {
    /// Byte index just past the brace that closes the object.
    Closed(usize),
    /// Text ran out with this many braces still open.
    Open(usize),
}

/// Find where the object ends, skipping string literals and `//` comments.
fn object_extent(src: &str, mut depth: usize) -> Extent {
    let mut chars = src.char_indices().peekable();
    let mut in_string = false;

    while let Some((i, c)) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Extent::Closed(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    Extent::Open(depth)
}

/// Split a block body into a well-formed object source and the prose after it.
fn split_body(body: &str) -> (String, &str) {
    let src = body.trim_start();
    let (prefix, depth) = if src.starts_with('{') { ("", 0) } else { ("{", 1) };

    match object_extent(src, depth) {
        Extent::Closed(end) => (format!("{prefix}{}", &src[..end]), &src[end..]),
        Extent::Open(open) => (format!("{prefix}{src}{}", "}".repeat(open.max(1))), ""),
    }
}

fn trailing_prose(prose: &str) -> Option<String> {
    let text = prose
        .trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// -- Relaxed syntax -----------------------------------------------------------

/// Rewrite the permissive object syntax into strict JSON.
fn relax(src: &str) -> String {
    strip_trailing_commas(&strip_line_comments(src))
}

fn strip_line_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&next| next != '\n') {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

// -- Field extraction ---------------------------------------------------------
//
// Fields of an unexpected shape are left in place so they survive in `extra`.

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// A string, or an array of strings joined with line breaks.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    let text = fields.get(key).and_then(text_of)?;
    fields.remove(key);
    Some(text)
}

fn take_params(fields: &mut Map<String, Value>) -> Vec<Param> {
    let Some(Value::Array(entries)) = fields.get("params") else {
        return Vec::new();
    };
    let params: Vec<Param> = entries
        .iter()
        .filter_map(|entry| {
            let parts = entry.as_array()?;
            Some(Param {
                name: parts.first()?.as_str()?.to_string(),
                type_tag: parts.get(1).and_then(Value::as_str).map(str::to_string),
                text: parts.get(2).and_then(text_of).unwrap_or_default(),
            })
        })
        .collect();
    fields.remove("params");
    params
}

fn take_return(fields: &mut Map<String, Value>) -> Option<ReturnInfo> {
    let parts = fields.get("return")?.as_array()?;
    let info = ReturnInfo {
        type_tag: parts.first()?.as_str()?.to_string(),
        text: parts.get(1).and_then(text_of),
    };
    fields.remove("return");
    Some(info)
}

fn take_declarations(fields: &mut Map<String, Value>) -> Vec<String> {
    let declarations = match fields.get("typedef") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => return Vec::new(),
    };
    fields.remove("typedef");
    declarations
}
