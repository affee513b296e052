//! # toml-reader
//!
//! A reader for the TOML format: a mode-stack scanner, a recursive
//! descent parser and a document assembler, run in order by
//! [`read_toml`].
//!
//! ```toml
//! [server.alpha]
//! ports = [8001, 8002]
//! ```
//!
//! Each stage can be used on its own: [`lexer::tokenize`] for the token
//! stream, [`parser::parse_document`] for the flat entry list,
//! [`assembler::assemble`] for the document tree.

pub mod assembler;
pub mod datetime;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod value;

pub use assembler::{assemble, ArrayPolicy, RootTable};
pub use datetime::DateTime;
pub use error::{AssemblyError, AssemblyErrorKind, ParseError, TomlError};
pub use lexer::{tokenize, LexError, Position, Span, Token, TokenKind};
pub use parser::{parse_document, TomlValue, TopLevelEntry};
pub use reader::{read_toml, read_toml_with_policy, DocTree, ReadOutcome};
pub use value::{AtomicNode, Node, PlainValue};
