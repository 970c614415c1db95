//! Data model for parsed annotation records — format-agnostic.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Position of a record in the scan: file index (sorted input order), then
/// byte offset of the block's sentinel within that file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Discovery {
    pub file: usize,
    pub offset: usize,
}

/// The declared `type` of an annotation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Class,
    Library,
    Object,
    Event,
    Property,
    StaticProperty,
    Constructor,
    Method,
    StaticMethod,
    /// Any other `type` tag (`function`, `variable`, `init`, ...), kept verbatim.
    Other(String),
}

impl RecordKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "class" => RecordKind::Class,
            "library" => RecordKind::Library,
            "object" => RecordKind::Object,
            "event" => RecordKind::Event,
            "property" => RecordKind::Property,
            "staticproperty" => RecordKind::StaticProperty,
            "constructor" => RecordKind::Constructor,
            "method" => RecordKind::Method,
            "staticmethod" => RecordKind::StaticMethod,
            other => RecordKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Library => "library",
            RecordKind::Object => "object",
            RecordKind::Event => "event",
            RecordKind::Property => "property",
            RecordKind::StaticProperty => "staticproperty",
            RecordKind::Constructor => "constructor",
            RecordKind::Method => "method",
            RecordKind::StaticMethod => "staticmethod",
            RecordKind::Other(tag) => tag,
        }
    }

    /// Class and library records own members; every other kind is a member
    /// or a free-standing declaration.
    pub fn is_owner(&self) -> bool {
        matches!(self, RecordKind::Class | RecordKind::Library)
    }
}

impl Serialize for RecordKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One `params` entry: `[name, native-type-tag, text]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// May span several lines when the source gives an array of strings.
    pub text: String,
}

/// The `return` entry: `[native-type-tag, text]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReturnInfo {
    pub type_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A single parsed annotation block.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationRecord {
    pub kind: RecordKind,
    /// Class or library this record belongs to. Always `None` for owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Member identifier, or the owner's own name for class/library records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_of: Option<String>,
    /// Signatures emitted verbatim; more than one means overloads.
    /// Empty means the record is documentation-only and is never rendered.
    pub declarations: Vec<String>,
    /// Fields this tool does not interpret (`generate`, `ifdef`, ...).
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    pub discovery: Discovery,
}

impl AnnotationRecord {
    pub fn new(kind: RecordKind, discovery: Discovery) -> Self {
        AnnotationRecord {
            kind,
            owner: None,
            name: None,
            description: None,
            params: Vec::new(),
            returns: None,
            instance_of: None,
            declarations: Vec::new(),
            extra: Map::new(),
            discovery,
        }
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_renderable(&self) -> bool {
        !self.declarations.is_empty()
    }
}

/// A class or library together with the members attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    #[serde(flatten)]
    pub record: AnnotationRecord,
    pub members: Vec<AnnotationRecord>,
}

/// The resolved model handed to renderers.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    /// Owners in discovery order; members sorted by the member taxonomy.
    pub owners: Vec<Owner>,
    /// Ownerless declarations in discovery order.
    pub free: Vec<AnnotationRecord>,
}
