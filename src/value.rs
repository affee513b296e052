//! Result trees
//!
//! Two renditions of an assembled document: [`Node`] keeps full fidelity
//! (kind tag, raw image and decoded value per leaf), [`PlainValue`] keeps
//! only native values and is what the JSON/YAML projections serialize.
//! Key order is source order in both.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::datetime::DateTime;
use crate::parser::ValueKind;

/// A native value with no source information
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime),
    Array(Vec<PlainValue>),
    Table(Vec<(String, PlainValue)>),
}

impl Serialize for PlainValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlainValue::String(v) => serializer.serialize_str(v),
            PlainValue::Integer(v) => serializer.serialize_i64(*v),
            PlainValue::Float(v) => serializer.serialize_f64(*v),
            PlainValue::Boolean(v) => serializer.serialize_bool(*v),
            PlainValue::DateTime(v) => serializer.serialize_str(&v.to_string()),
            PlainValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PlainValue::Table(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// A decoded leaf that remembers where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicNode {
    pub kind: ValueKind,
    pub image: String,
    pub value: PlainValue,
}

/// The full fidelity document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atomic(AtomicNode),
    Array(Vec<Node>),
    Table(Vec<(String, Node)>),
}

/// Stable tag names for serialized kind fields
fn kind_tag(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::OffsetDateTime => "offset-date-time",
        ValueKind::LocalDateTime => "local-date-time",
        ValueKind::LocalDate => "local-date",
        ValueKind::LocalTime => "local-time",
        ValueKind::String => "string",
        ValueKind::Integer => "integer",
        ValueKind::Float => "float",
        ValueKind::Boolean => "boolean",
        ValueKind::Array => "array",
        ValueKind::InlineTable => "table",
    }
}

struct TableContent<'a>(&'a [(String, Node)]);

impl Serialize for TableContent<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Atomic(atomic) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("kind", kind_tag(atomic.kind))?;
                map.serialize_entry("image", &atomic.image)?;
                map.serialize_entry("value", &atomic.value)?;
                map.end()
            }
            Node::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", "array")?;
                map.serialize_entry("content", items)?;
                map.end()
            }
            Node::Table(entries) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", "table")?;
                map.serialize_entry("content", &TableContent(entries))?;
                map.end()
            }
        }
    }
}

impl Node {
    /// Discards images and kind tags, leaving the plain tree
    pub fn to_plain(&self) -> PlainValue {
        match self {
            Node::Atomic(atomic) => atomic.value.clone(),
            Node::Array(items) => PlainValue::Array(items.iter().map(Node::to_plain).collect()),
            Node::Table(entries) => PlainValue::Table(
                entries
                    .iter()
                    .map(|(key, node)| (key.clone(), node.to_plain()))
                    .collect(),
            ),
        }
    }
}
