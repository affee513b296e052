//! Per-mode token definitions for the TOML scanner
//!
//! Each lexical mode owns its own logos token enum: the set of patterns
//! that are significant in that mode, in longest-match-then-priority
//! order. Insignificant whitespace and comments are declared as skips so
//! they are recognized but never emitted. The `classify` methods map a
//! mode token to the flat [`TokenKind`] plus the mode transition it
//! triggers.

use logos::Logos;

use super::{Mode, TokenKind};

/// What the scanner does with the mode stack after a token matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModeAction {
    Stay,
    Push(Mode),
    Pop,
    /// `}` seen while scanning an inline table value: closes both the
    /// pending value and the surrounding inline table in one step.
    PopInlinePair,
}

/// Tokens recognized at the top level of a document
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum TopToken {
    #[token("[[")]
    OpenTableArrayItem,
    #[token("[")]
    OpenTable,
    #[regex(r"[A-Za-z0-9_-]+")]
    Identifier,
    #[token("\"")]
    OpenBasicString,
    #[token("'")]
    OpenLiteralString,
    #[token(".")]
    Dot,
    #[token("=")]
    OpenValue,
    #[regex(r"(\r\n|\n)+")]
    EndOfLine,
}

impl TopToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            TopToken::OpenTableArrayItem => {
                (TokenKind::OpenTableArrayItem, ModeAction::Push(Mode::TableArrayItem))
            }
            TopToken::OpenTable => (TokenKind::OpenTable, ModeAction::Push(Mode::Table)),
            TopToken::Identifier => (TokenKind::Identifier, ModeAction::Stay),
            TopToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            TopToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            TopToken::Dot => (TokenKind::Dot, ModeAction::Stay),
            TopToken::OpenValue => (TokenKind::OpenValue, ModeAction::Push(Mode::Value)),
            TopToken::EndOfLine => (TokenKind::EndOfLine, ModeAction::Stay),
        }
    }
}

/// Tokens recognized after `=` at the top level; a newline closes the value
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum ValueToken {
    #[token("\"\"\"")]
    OpenMultiLineBasicString,
    #[token("\"")]
    OpenBasicString,
    #[token("'''")]
    OpenMultiLineLiteralString,
    #[token("'")]
    OpenLiteralString,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?([Zz]|[+-][0-9]{2}:[0-9]{2})", priority = 13)]
    OffsetDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 12)]
    LocalDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}", priority = 11)]
    LocalDate,
    #[regex(r"[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 11)]
    LocalTime,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0+)((\.[0-9](_[0-9]|[0-9])*([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0))?)|([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0)))", priority = 10)]
    Float,
    #[regex(r"[+-]?inf", priority = 10)]
    Infinity,
    #[regex(r"[+-]?nan", priority = 10)]
    NotANumber,
    #[regex(r"0b_?[01](_[01]|[01])*", priority = 9)]
    BinaryInteger,
    #[regex(r"0o_?[0-7](_[0-7]|[0-7])*", priority = 9)]
    OctalInteger,
    #[regex(r"0x_?[0-9A-Fa-f](_[0-9A-Fa-f]|[0-9A-Fa-f])*", priority = 9)]
    HexInteger,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0)", priority = 6)]
    Integer,
    #[regex(r"true|false", priority = 6)]
    Boolean,
    #[token("[")]
    OpenArray,
    #[token("{")]
    OpenInlineTable,
    #[regex(r"(\r\n|\n)+")]
    CloseValue,
}

impl ValueToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            ValueToken::OpenMultiLineBasicString => (
                TokenKind::OpenMultiLineBasicString,
                ModeAction::Push(Mode::MultiLineBasicString),
            ),
            ValueToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            ValueToken::OpenMultiLineLiteralString => (
                TokenKind::OpenMultiLineLiteralString,
                ModeAction::Push(Mode::MultiLineLiteralString),
            ),
            ValueToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            ValueToken::OffsetDateTime => (TokenKind::OffsetDateTime, ModeAction::Stay),
            ValueToken::LocalDateTime => (TokenKind::LocalDateTime, ModeAction::Stay),
            ValueToken::LocalDate => (TokenKind::LocalDate, ModeAction::Stay),
            ValueToken::LocalTime => (TokenKind::LocalTime, ModeAction::Stay),
            ValueToken::Float => (TokenKind::Float, ModeAction::Stay),
            ValueToken::Infinity => (TokenKind::Infinity, ModeAction::Stay),
            ValueToken::NotANumber => (TokenKind::NotANumber, ModeAction::Stay),
            ValueToken::BinaryInteger => (TokenKind::BinaryInteger, ModeAction::Stay),
            ValueToken::OctalInteger => (TokenKind::OctalInteger, ModeAction::Stay),
            ValueToken::HexInteger => (TokenKind::HexInteger, ModeAction::Stay),
            ValueToken::Integer => (TokenKind::Integer, ModeAction::Stay),
            ValueToken::Boolean => (TokenKind::Boolean, ModeAction::Stay),
            ValueToken::OpenArray => (TokenKind::OpenArray, ModeAction::Push(Mode::Array)),
            ValueToken::OpenInlineTable => {
                (TokenKind::OpenInlineTable, ModeAction::Push(Mode::InlineTable))
            }
            ValueToken::CloseValue => (TokenKind::CloseValue, ModeAction::Pop),
        }
    }
}

/// Tokens recognized between `[` and `]` of a table header
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub(crate) enum TableToken {
    #[regex(r"[A-Za-z0-9_-]+")]
    Identifier,
    #[token("\"")]
    OpenBasicString,
    #[token("'")]
    OpenLiteralString,
    #[token(".")]
    Dot,
    #[token("]")]
    CloseTable,
}

impl TableToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            TableToken::Identifier => (TokenKind::Identifier, ModeAction::Stay),
            TableToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            TableToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            TableToken::Dot => (TokenKind::Dot, ModeAction::Stay),
            TableToken::CloseTable => (TokenKind::CloseTable, ModeAction::Pop),
        }
    }
}

/// Tokens recognized between `[[` and `]]` of a table array header
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub(crate) enum TableArrayToken {
    #[regex(r"[A-Za-z0-9_-]+")]
    Identifier,
    #[token("\"")]
    OpenBasicString,
    #[token("'")]
    OpenLiteralString,
    #[token(".")]
    Dot,
    #[token("]]")]
    CloseTableArrayItem,
}

impl TableArrayToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            TableArrayToken::Identifier => (TokenKind::Identifier, ModeAction::Stay),
            TableArrayToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            TableArrayToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            TableArrayToken::Dot => (TokenKind::Dot, ModeAction::Stay),
            TableArrayToken::CloseTableArrayItem => {
                (TokenKind::CloseTableArrayItem, ModeAction::Pop)
            }
        }
    }
}

/// Tokens recognized inside `[` … `]` arrays; newlines and comments are
/// insignificant here
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"\r\n|\n")]
pub(crate) enum ArrayToken {
    #[token("\"\"\"")]
    OpenMultiLineBasicString,
    #[token("\"")]
    OpenBasicString,
    #[token("'''")]
    OpenMultiLineLiteralString,
    #[token("'")]
    OpenLiteralString,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?([Zz]|[+-][0-9]{2}:[0-9]{2})", priority = 13)]
    OffsetDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 12)]
    LocalDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}", priority = 11)]
    LocalDate,
    #[regex(r"[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 11)]
    LocalTime,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0+)((\.[0-9](_[0-9]|[0-9])*([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0))?)|([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0)))", priority = 10)]
    Float,
    #[regex(r"[+-]?inf", priority = 10)]
    Infinity,
    #[regex(r"[+-]?nan", priority = 10)]
    NotANumber,
    #[regex(r"0b_?[01](_[01]|[01])*", priority = 9)]
    BinaryInteger,
    #[regex(r"0o_?[0-7](_[0-7]|[0-7])*", priority = 9)]
    OctalInteger,
    #[regex(r"0x_?[0-9A-Fa-f](_[0-9A-Fa-f]|[0-9A-Fa-f])*", priority = 9)]
    HexInteger,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0)", priority = 6)]
    Integer,
    #[regex(r"true|false", priority = 6)]
    Boolean,
    #[token(",")]
    Comma,
    #[token("[")]
    OpenArray,
    #[token("{")]
    OpenInlineTable,
    #[token("]")]
    CloseArray,
}

impl ArrayToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            ArrayToken::OpenMultiLineBasicString => (
                TokenKind::OpenMultiLineBasicString,
                ModeAction::Push(Mode::MultiLineBasicString),
            ),
            ArrayToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            ArrayToken::OpenMultiLineLiteralString => (
                TokenKind::OpenMultiLineLiteralString,
                ModeAction::Push(Mode::MultiLineLiteralString),
            ),
            ArrayToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            ArrayToken::OffsetDateTime => (TokenKind::OffsetDateTime, ModeAction::Stay),
            ArrayToken::LocalDateTime => (TokenKind::LocalDateTime, ModeAction::Stay),
            ArrayToken::LocalDate => (TokenKind::LocalDate, ModeAction::Stay),
            ArrayToken::LocalTime => (TokenKind::LocalTime, ModeAction::Stay),
            ArrayToken::Float => (TokenKind::Float, ModeAction::Stay),
            ArrayToken::Infinity => (TokenKind::Infinity, ModeAction::Stay),
            ArrayToken::NotANumber => (TokenKind::NotANumber, ModeAction::Stay),
            ArrayToken::BinaryInteger => (TokenKind::BinaryInteger, ModeAction::Stay),
            ArrayToken::OctalInteger => (TokenKind::OctalInteger, ModeAction::Stay),
            ArrayToken::HexInteger => (TokenKind::HexInteger, ModeAction::Stay),
            ArrayToken::Integer => (TokenKind::Integer, ModeAction::Stay),
            ArrayToken::Boolean => (TokenKind::Boolean, ModeAction::Stay),
            ArrayToken::Comma => (TokenKind::Comma, ModeAction::Stay),
            ArrayToken::OpenArray => (TokenKind::OpenArray, ModeAction::Push(Mode::Array)),
            ArrayToken::OpenInlineTable => {
                (TokenKind::OpenInlineTable, ModeAction::Push(Mode::InlineTable))
            }
            ArrayToken::CloseArray => (TokenKind::CloseArray, ModeAction::Pop),
        }
    }
}

/// Tokens recognized inside `{` … `}` between bindings
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum InlineTableToken {
    #[regex(r"[A-Za-z0-9_-]+")]
    Identifier,
    #[token("\"")]
    OpenBasicString,
    #[token("'")]
    OpenLiteralString,
    #[token(".")]
    Dot,
    #[token("=")]
    OpenInlineValue,
    #[token("}")]
    CloseInlineTable,
}

impl InlineTableToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            InlineTableToken::Identifier => (TokenKind::Identifier, ModeAction::Stay),
            InlineTableToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            InlineTableToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            InlineTableToken::Dot => (TokenKind::Dot, ModeAction::Stay),
            InlineTableToken::OpenInlineValue => {
                (TokenKind::OpenInlineValue, ModeAction::Push(Mode::InlineValue))
            }
            InlineTableToken::CloseInlineTable => (TokenKind::CloseInlineTable, ModeAction::Pop),
        }
    }
}

/// Tokens recognized after `=` inside an inline table. A `,` closes just
/// the value; a `}` closes the value and the inline table together.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub(crate) enum InlineValueToken {
    #[token("\"\"\"")]
    OpenMultiLineBasicString,
    #[token("\"")]
    OpenBasicString,
    #[token("'''")]
    OpenMultiLineLiteralString,
    #[token("'")]
    OpenLiteralString,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?([Zz]|[+-][0-9]{2}:[0-9]{2})", priority = 13)]
    OffsetDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 12)]
    LocalDateTime,
    #[regex(r"-?[0-9]{4}-[0-9]{2}-[0-9]{2}", priority = 11)]
    LocalDate,
    #[regex(r"[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?", priority = 11)]
    LocalTime,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0+)((\.[0-9](_[0-9]|[0-9])*([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0))?)|([eE][+-]?(([1-9](_[0-9]|[0-9])*)|0)))", priority = 10)]
    Float,
    #[regex(r"[+-]?inf", priority = 10)]
    Infinity,
    #[regex(r"[+-]?nan", priority = 10)]
    NotANumber,
    #[regex(r"0b_?[01](_[01]|[01])*", priority = 9)]
    BinaryInteger,
    #[regex(r"0o_?[0-7](_[0-7]|[0-7])*", priority = 9)]
    OctalInteger,
    #[regex(r"0x_?[0-9A-Fa-f](_[0-9A-Fa-f]|[0-9A-Fa-f])*", priority = 9)]
    HexInteger,
    #[regex(r"[+-]?(([1-9](_[0-9]|[0-9])*)|0)", priority = 6)]
    Integer,
    #[regex(r"true|false", priority = 6)]
    Boolean,
    #[token("[")]
    OpenArray,
    #[token("{")]
    OpenInlineTable,
    #[token(",")]
    Comma,
    #[token("}")]
    CurlyClose,
}

impl InlineValueToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            InlineValueToken::OpenMultiLineBasicString => (
                TokenKind::OpenMultiLineBasicString,
                ModeAction::Push(Mode::MultiLineBasicString),
            ),
            InlineValueToken::OpenBasicString => {
                (TokenKind::OpenBasicString, ModeAction::Push(Mode::BasicString))
            }
            InlineValueToken::OpenMultiLineLiteralString => (
                TokenKind::OpenMultiLineLiteralString,
                ModeAction::Push(Mode::MultiLineLiteralString),
            ),
            InlineValueToken::OpenLiteralString => {
                (TokenKind::OpenLiteralString, ModeAction::Push(Mode::LiteralString))
            }
            InlineValueToken::OffsetDateTime => (TokenKind::OffsetDateTime, ModeAction::Stay),
            InlineValueToken::LocalDateTime => (TokenKind::LocalDateTime, ModeAction::Stay),
            InlineValueToken::LocalDate => (TokenKind::LocalDate, ModeAction::Stay),
            InlineValueToken::LocalTime => (TokenKind::LocalTime, ModeAction::Stay),
            InlineValueToken::Float => (TokenKind::Float, ModeAction::Stay),
            InlineValueToken::Infinity => (TokenKind::Infinity, ModeAction::Stay),
            InlineValueToken::NotANumber => (TokenKind::NotANumber, ModeAction::Stay),
            InlineValueToken::BinaryInteger => (TokenKind::BinaryInteger, ModeAction::Stay),
            InlineValueToken::OctalInteger => (TokenKind::OctalInteger, ModeAction::Stay),
            InlineValueToken::HexInteger => (TokenKind::HexInteger, ModeAction::Stay),
            InlineValueToken::Integer => (TokenKind::Integer, ModeAction::Stay),
            InlineValueToken::Boolean => (TokenKind::Boolean, ModeAction::Stay),
            InlineValueToken::OpenArray => (TokenKind::OpenArray, ModeAction::Push(Mode::Array)),
            InlineValueToken::OpenInlineTable => {
                (TokenKind::OpenInlineTable, ModeAction::Push(Mode::InlineTable))
            }
            InlineValueToken::Comma => (TokenKind::CloseInlineValue, ModeAction::Pop),
            InlineValueToken::CurlyClose => {
                (TokenKind::CloseInlineTable, ModeAction::PopInlinePair)
            }
        }
    }
}

/// Tokens recognized inside a single-line `"` string
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BasicStringToken {
    #[token("\"")]
    Close,
    #[regex(r#"\\[btnfr"\\]"#)]
    EscapedChar,
    #[regex(r"\\u[0-9A-Fa-f]{4}|\\U[0-9A-Fa-f]{8}")]
    EscapedUnicode,
    #[regex(r#"[^"\\\x00-\x1f\x7f]+"#)]
    Content,
}

impl BasicStringToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            BasicStringToken::Close => (TokenKind::CloseBasicString, ModeAction::Pop),
            BasicStringToken::EscapedChar => (TokenKind::EscapedChar, ModeAction::Stay),
            BasicStringToken::EscapedUnicode => (TokenKind::EscapedUnicode, ModeAction::Stay),
            BasicStringToken::Content => (TokenKind::StringContent, ModeAction::Stay),
        }
    }
}

/// Tokens recognized inside a `"""` string. Bare newlines are content; a
/// backslash at the end of a line elides the following whitespace.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\\[ \t]*(\r\n|\n)[ \t\r\n]*")]
pub(crate) enum MultiLineBasicStringToken {
    #[token("\"\"\"")]
    Close,
    #[regex(r#"\\[btnfr"\\]"#)]
    EscapedChar,
    #[regex(r"\\u[0-9A-Fa-f]{4}|\\U[0-9A-Fa-f]{8}")]
    EscapedUnicode,
    #[regex(r#"[^"\\\x00-\x1f\x7f]+|\n|\r"#)]
    Content,
    #[token("\"")]
    Quote,
}

impl MultiLineBasicStringToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            MultiLineBasicStringToken::Close => {
                (TokenKind::CloseMultiLineBasicString, ModeAction::Pop)
            }
            MultiLineBasicStringToken::EscapedChar => (TokenKind::EscapedChar, ModeAction::Stay),
            MultiLineBasicStringToken::EscapedUnicode => {
                (TokenKind::EscapedUnicode, ModeAction::Stay)
            }
            MultiLineBasicStringToken::Content | MultiLineBasicStringToken::Quote => {
                (TokenKind::StringContent, ModeAction::Stay)
            }
        }
    }
}

/// Tokens recognized inside a single-line `'` string
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralStringToken {
    #[token("'")]
    Close,
    #[regex(r"[^'\x00-\x1f\x7f]+")]
    Content,
}

impl LiteralStringToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            LiteralStringToken::Close => (TokenKind::CloseLiteralString, ModeAction::Pop),
            LiteralStringToken::Content => (TokenKind::StringContent, ModeAction::Stay),
        }
    }
}

/// Tokens recognized inside a `'''` string
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MultiLineLiteralStringToken {
    #[token("'''")]
    Close,
    #[regex(r"[^'\x00-\x1f\x7f]+|\n|\r")]
    Content,
    #[token("'")]
    Quote,
}

impl MultiLineLiteralStringToken {
    pub(crate) fn classify(self) -> (TokenKind, ModeAction) {
        match self {
            MultiLineLiteralStringToken::Close => {
                (TokenKind::CloseMultiLineLiteralString, ModeAction::Pop)
            }
            MultiLineLiteralStringToken::Content | MultiLineLiteralStringToken::Quote => {
                (TokenKind::StringContent, ModeAction::Stay)
            }
        }
    }
}
