//! Error taxonomy for the three reading stages
//!
//! Every diagnostic the crate produces is a [`TomlError`], tagged by the
//! stage that raised it. Scanning errors end the pipeline before parsing,
//! parse errors before assembly, and the assembler stops at its first
//! semantic conflict.

use std::fmt;

use crate::lexer::{LexError, Position};

/// Any error raised while reading a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TomlError {
    Lex(LexError),
    Parse(ParseError),
    Assembly(AssemblyError),
}

impl fmt::Display for TomlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlError::Lex(err) => err.fmt(f),
            TomlError::Parse(err) => err.fmt(f),
            TomlError::Assembly(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TomlError {}

impl From<LexError> for TomlError {
    fn from(err: LexError) -> Self {
        TomlError::Lex(err)
    }
}

impl From<ParseError> for TomlError {
    fn from(err: ParseError) -> Self {
        TomlError::Parse(err)
    }
}

impl From<AssemblyError> for TomlError {
    fn from(err: AssemblyError) -> Self {
        TomlError::Assembly(err)
    }
}

/// A syntax error: what was found and which token kinds were acceptable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub pos: Position,
    pub message: String,
    pub expected: Vec<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)?;
        if !self.expected.is_empty() {
            write!(f, " (expected {})", self.expected.join(" or "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// How a syntactically valid document violated TOML's structural rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyErrorKind {
    /// A key path runs through a key already bound to an atomic value or
    /// a plain array
    PathAlreadyValue,
    /// The final key of a binding already names a table
    PathAlreadyTable,
    /// The final key of a binding already names a table array
    PathAlreadyTableArray,
    /// A `[table]` header names a table that was already initialized
    /// directly
    DirectRedefinition,
    /// An array mixes element kinds under the strict policy
    ArrayTypeMismatch,
    /// A `[[header]]` tries to extend an array that was defined as a value
    StaticTableArrayConflict,
}

impl fmt::Display for AssemblyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AssemblyErrorKind::PathAlreadyValue => "path runs through a value",
            AssemblyErrorKind::PathAlreadyTable => "key already names a table",
            AssemblyErrorKind::PathAlreadyTableArray => "key already names a table array",
            AssemblyErrorKind::DirectRedefinition => "table was already defined",
            AssemblyErrorKind::ArrayTypeMismatch => "array mixes value types",
            AssemblyErrorKind::StaticTableArrayConflict => {
                "cannot extend an array defined as a value"
            }
        };
        f.write_str(text)
    }
}

/// A structural conflict found while assembling the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyError {
    pub kind: AssemblyErrorKind,
    pub pos: Position,
    /// The key path (or value image) the conflict was found at
    pub image: String,
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at `{}`", self.pos, self.kind, self.image)
    }
}

impl std::error::Error for AssemblyError {}
