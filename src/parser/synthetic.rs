//! Synthetic declarations for records whose signature is implied by their
//! kind: class headers, event registration functions and global objects.

use crate::model::*;

/// Map a native type tag to the TypeScript type shown for it.
pub fn display_type(tag: Option<&str>) -> &'static str {
    match tag {
        Some("bool") => "boolean",
        Some("int" | "int32" | "float") => "number",
        Some("string") => "string",
        Some("pin") => "Pin",
        _ => "any",
    }
}

/// Derive and attach the declaration for class, event and object records.
/// Other kinds keep whatever `typedef` the source declared.
///
/// On `Err(field)` the required `field` was missing; the record is left
/// without declarations so it is never rendered.
pub fn attach(record: &mut AnnotationRecord) -> Result<(), &'static str> {
    let derived = match record.kind {
        RecordKind::Class => class_header(record),
        RecordKind::Event => event_signature(record),
        RecordKind::Object => object_declaration(record),
        _ => return Ok(()),
    };
    match derived {
        Ok(declaration) => {
            record.declarations = vec![declaration];
            Ok(())
        }
        Err(field) => {
            record.declarations.clear();
            Err(field)
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, &'static str> {
    value.filter(|v| !v.is_empty()).ok_or(field)
}

fn class_header(record: &AnnotationRecord) -> Result<String, &'static str> {
    let name = required(record.name.as_deref(), "class")?;
    Ok(format!("class {name}"))
}

fn event_signature(record: &AnnotationRecord) -> Result<String, &'static str> {
    let name = required(record.name.as_deref(), "name")?;
    let params = record
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, display_type(p.type_tag.as_deref())))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "on(event: '{name}', callback: ({params}) => void): void"
    ))
}

fn object_declaration(record: &AnnotationRecord) -> Result<String, &'static str> {
    let name = required(record.name.as_deref(), "name")?;
    let instance_of = required(record.instance_of.as_deref(), "instanceof")?;
    Ok(format!("declare var {name}: {instance_of}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: RecordKind, name: Option<&str>) -> AnnotationRecord {
        let mut r = AnnotationRecord::new(kind, Discovery::default());
        r.name = name.map(str::to_string);
        r
    }

    #[test]
    fn type_table() {
        assert_eq!(display_type(Some("bool")), "boolean");
        assert_eq!(display_type(Some("int32")), "number");
        assert_eq!(display_type(Some("float")), "number");
        assert_eq!(display_type(Some("string")), "string");
        assert_eq!(display_type(Some("pin")), "Pin");
        assert_eq!(display_type(Some("JsVar")), "any");
        assert_eq!(display_type(None), "any");
    }

    #[test]
    fn class_header_replaces_typedef() {
        let mut r = record(RecordKind::Class, Some("Widget"));
        r.declarations = vec!["stale".to_string()];
        attach(&mut r).unwrap();
        assert_eq!(r.declarations, vec!["class Widget"]);
    }

    #[test]
    fn class_without_name_is_not_rendered() {
        let mut r = record(RecordKind::Class, None);
        assert_eq!(attach(&mut r), Err("class"));
        assert!(r.declarations.is_empty());
    }

    #[test]
    fn event_signature_maps_param_types_without_touching_params() {
        let mut r = record(RecordKind::Event, Some("tap"));
        r.params = vec![
            Param {
                name: "dir".to_string(),
                type_tag: Some("string".to_string()),
                text: "direction".to_string(),
            },
            Param {
                name: "data".to_string(),
                type_tag: Some("JsVar".to_string()),
                text: String::new(),
            },
        ];
        let before = r.params.clone();
        attach(&mut r).unwrap();
        assert_eq!(
            r.declarations,
            vec!["on(event: 'tap', callback: (dir: string, data: any) => void): void"]
        );
        assert_eq!(r.params, before);
    }

    #[test]
    fn event_without_params() {
        let mut r = record(RecordKind::Event, Some("init"));
        attach(&mut r).unwrap();
        assert_eq!(r.declarations, vec!["on(event: 'init', callback: () => void): void"]);
    }

    #[test]
    fn object_declaration_needs_instanceof() {
        let mut r = record(RecordKind::Object, Some("LED1"));
        assert_eq!(attach(&mut r), Err("instanceof"));

        r.instance_of = Some("Pin".to_string());
        attach(&mut r).unwrap();
        assert_eq!(r.declarations, vec!["declare var LED1: Pin"]);
    }

    #[test]
    fn members_keep_declared_typedef() {
        let mut r = record(RecordKind::Method, Some("spin"));
        r.declarations = vec!["spin(): void".to_string()];
        attach(&mut r).unwrap();
        assert_eq!(r.declarations, vec!["spin(): void"]);
    }
}
