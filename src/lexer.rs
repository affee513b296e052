//! Lexical scanning for the TOML format
//!
//! The scanner is context sensitive: a `[` opens a table header at the top
//! level but an array inside a value, and every quoting delimiter changes
//! which characters are significant until its counterpart is found. Each
//! lexical context is a [`Mode`]; the scanner keeps an explicit stack of
//! modes and dispatches to a per-mode token set (see [`tokens`]).

pub mod scanner;
pub mod tokens;

pub use scanner::{tokenize, LexError};

use std::fmt;

/// A lexical context the scanner can be in. Entering a bracketed or quoted
/// construct pushes a mode, its closing delimiter pops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Top,
    Value,
    Table,
    TableArrayItem,
    Array,
    InlineTable,
    InlineValue,
    BasicString,
    MultiLineBasicString,
    LiteralString,
    MultiLineLiteralString,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Top => "top level",
            Mode::Value => "value",
            Mode::Table => "table header",
            Mode::TableArrayItem => "table array header",
            Mode::Array => "array",
            Mode::InlineTable => "inline table",
            Mode::InlineValue => "inline table value",
            Mode::BasicString => "basic string",
            Mode::MultiLineBasicString => "multi-line basic string",
            Mode::LiteralString => "literal string",
            Mode::MultiLineLiteralString => "multi-line literal string",
        };
        f.write_str(name)
    }
}

/// A position in source text (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The flat classification of every token the scanner can produce,
/// independent of the mode that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    BinaryInteger,
    OctalInteger,
    HexInteger,
    Float,
    Infinity,
    NotANumber,
    Boolean,
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Dot,
    Comma,
    EndOfLine,
    OpenValue,
    CloseValue,
    OpenTable,
    CloseTable,
    OpenTableArrayItem,
    CloseTableArrayItem,
    OpenArray,
    CloseArray,
    OpenInlineTable,
    CloseInlineTable,
    OpenInlineValue,
    CloseInlineValue,
    OpenBasicString,
    CloseBasicString,
    OpenMultiLineBasicString,
    CloseMultiLineBasicString,
    OpenLiteralString,
    CloseLiteralString,
    OpenMultiLineLiteralString,
    CloseMultiLineLiteralString,
    EscapedChar,
    EscapedUnicode,
    StringContent,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::BinaryInteger => "binary integer",
            TokenKind::OctalInteger => "octal integer",
            TokenKind::HexInteger => "hexadecimal integer",
            TokenKind::Float => "float",
            TokenKind::Infinity => "infinity",
            TokenKind::NotANumber => "nan",
            TokenKind::Boolean => "boolean",
            TokenKind::OffsetDateTime => "offset date-time",
            TokenKind::LocalDateTime => "local date-time",
            TokenKind::LocalDate => "local date",
            TokenKind::LocalTime => "local time",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::EndOfLine => "end of line",
            TokenKind::OpenValue => "`=`",
            TokenKind::CloseValue => "end of line",
            TokenKind::OpenTable => "`[`",
            TokenKind::CloseTable => "`]`",
            TokenKind::OpenTableArrayItem => "`[[`",
            TokenKind::CloseTableArrayItem => "`]]`",
            TokenKind::OpenArray => "`[`",
            TokenKind::CloseArray => "`]`",
            TokenKind::OpenInlineTable => "`{`",
            TokenKind::CloseInlineTable => "`}`",
            TokenKind::OpenInlineValue => "`=`",
            TokenKind::CloseInlineValue => "`,` or `}`",
            TokenKind::OpenBasicString => "`\"`",
            TokenKind::CloseBasicString => "`\"`",
            TokenKind::OpenMultiLineBasicString => "`\"\"\"`",
            TokenKind::CloseMultiLineBasicString => "`\"\"\"`",
            TokenKind::OpenLiteralString => "`'`",
            TokenKind::CloseLiteralString => "`'`",
            TokenKind::OpenMultiLineLiteralString => "`'''`",
            TokenKind::CloseMultiLineLiteralString => "`'''`",
            TokenKind::EscapedChar => "escape sequence",
            TokenKind::EscapedUnicode => "unicode escape",
            TokenKind::StringContent => "string content",
        };
        f.write_str(name)
    }
}

/// A classified lexeme: kind, raw source slice and source location.
/// Tokens are immutable, produced once by the scanner and consumed once
/// by the parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub image: &'a str,
    pub span: Span,
    pub pos: Position,
}
