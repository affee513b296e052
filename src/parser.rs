//! Syntactic analysis
//!
//! The parser consumes the scanner's token stream with hand-written
//! recursive descent and produces a flat list of top level entries:
//! table headers, table array headers and key/value bindings, in source
//! order. Nesting across entries is the assembler's concern; the parser
//! only nests what the syntax itself nests (arrays and inline tables).

pub mod ast;
pub mod grammar;
pub mod literals;

pub use ast::{Atomic, Key, KeyValue, TomlArray, TomlInlineTable, TomlValue, TopLevelEntry, ValueKind};
pub use grammar::parse_document;
