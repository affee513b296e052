//! The syntax tree produced by the parser
//!
//! Atomic values keep both the raw source image and the decoded native
//! value so later stages can choose fidelity. Positions are kept where
//! diagnostics need them.

use std::fmt;

use crate::datetime::DateTime;
use crate::lexer::Position;

/// An atomic value: raw image plus decoded native value
#[derive(Debug, Clone, PartialEq)]
pub struct Atomic<T> {
    pub image: String,
    pub value: T,
}

impl<T> Atomic<T> {
    pub fn new(image: impl Into<String>, value: T) -> Self {
        Self { image: image.into(), value }
    }
}

/// One component of a (possibly dotted) key path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub pos: Position,
}

/// A syntactic value
#[derive(Debug, Clone, PartialEq)]
pub enum TomlValue {
    OffsetDateTime(Atomic<DateTime>),
    LocalDateTime(Atomic<DateTime>),
    LocalDate(Atomic<DateTime>),
    LocalTime(Atomic<DateTime>),
    String(Atomic<String>),
    Integer(Atomic<i64>),
    Float(Atomic<f64>),
    Boolean(Atomic<bool>),
    Array(TomlArray),
    InlineTable(TomlInlineTable),
}

impl TomlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TomlValue::OffsetDateTime(_) => ValueKind::OffsetDateTime,
            TomlValue::LocalDateTime(_) => ValueKind::LocalDateTime,
            TomlValue::LocalDate(_) => ValueKind::LocalDate,
            TomlValue::LocalTime(_) => ValueKind::LocalTime,
            TomlValue::String(_) => ValueKind::String,
            TomlValue::Integer(_) => ValueKind::Integer,
            TomlValue::Float(_) => ValueKind::Float,
            TomlValue::Boolean(_) => ValueKind::Boolean,
            TomlValue::Array(_) => ValueKind::Array,
            TomlValue::InlineTable(_) => ValueKind::InlineTable,
        }
    }
}

/// The kind tag of a value, used for array homogeneity checks and for
/// the full fidelity tree. The four date/time kinds are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    String,
    Integer,
    Float,
    Boolean,
    Array,
    InlineTable,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::OffsetDateTime => "offset date-time",
            ValueKind::LocalDateTime => "local date-time",
            ValueKind::LocalDate => "local date",
            ValueKind::LocalTime => "local time",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::InlineTable => "inline table",
        };
        f.write_str(name)
    }
}

/// An ordered `[ … ]` array literal
#[derive(Debug, Clone, PartialEq)]
pub struct TomlArray {
    pub values: Vec<TomlValue>,
    pub pos: Position,
}

/// An ordered `{ … }` inline table literal
#[derive(Debug, Clone, PartialEq)]
pub struct TomlInlineTable {
    pub bindings: Vec<KeyValue>,
    pub pos: Position,
}

/// A `key.path = value` binding
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub keys: Vec<Key>,
    pub value: TomlValue,
    pub pos: Position,
}

/// One top level statement of a document, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelEntry {
    /// `[a.b.c]`
    TableHeader { keys: Vec<Key>, pos: Position },
    /// `[[a.b.c]]`
    TableArrayHeader { keys: Vec<Key>, pos: Position },
    /// `a.b = value`
    KeyValue(KeyValue),
}
