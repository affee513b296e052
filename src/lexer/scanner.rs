//! Mode-stack driver for the TOML scanner
//!
//! [`tokenize`] walks the source with whichever per-mode lexer matches the
//! current top of the mode stack, morphing between lexers at every push or
//! pop so position state carries across mode changes. Unicode escapes are
//! range checked here so the parser can decode them unconditionally.

use std::fmt;

use logos::Logos;

use super::tokens::{
    ArrayToken, BasicStringToken, InlineTableToken, InlineValueToken, LiteralStringToken,
    ModeAction, MultiLineBasicStringToken, MultiLineLiteralStringToken, TableArrayToken,
    TableToken, TopToken, ValueToken,
};
use super::{Mode, Position, Span, Token, TokenKind};

/// A scanning failure, located at the character that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub pos: Position,
    pub message: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

impl std::error::Error for LexError {}

/// Incrementally converts byte offsets into line/column positions.
/// Offsets must be requested in non-decreasing order.
struct PositionTracker {
    byte: usize,
    line: usize,
    column: usize,
}

impl PositionTracker {
    fn new() -> Self {
        Self { byte: 0, line: 1, column: 1 }
    }

    fn advance_to(&mut self, text: &str, target: usize) -> Position {
        for ch in text[self.byte..target].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.byte = target;
        Position::new(self.line, self.column)
    }
}

/// The per-mode lexer currently driving the scan
enum ModeLexer<'a> {
    Top(logos::Lexer<'a, TopToken>),
    Value(logos::Lexer<'a, ValueToken>),
    Table(logos::Lexer<'a, TableToken>),
    TableArrayItem(logos::Lexer<'a, TableArrayToken>),
    Array(logos::Lexer<'a, ArrayToken>),
    InlineTable(logos::Lexer<'a, InlineTableToken>),
    InlineValue(logos::Lexer<'a, InlineValueToken>),
    BasicString(logos::Lexer<'a, BasicStringToken>),
    MultiLineBasicString(logos::Lexer<'a, MultiLineBasicStringToken>),
    LiteralString(logos::Lexer<'a, LiteralStringToken>),
    MultiLineLiteralString(logos::Lexer<'a, MultiLineLiteralStringToken>),
}

fn retarget<'a, T>(lex: logos::Lexer<'a, T>, mode: Mode) -> ModeLexer<'a>
where
    T: Logos<'a, Source = str, Extras = ()>,
{
    match mode {
        Mode::Top => ModeLexer::Top(lex.morph()),
        Mode::Value => ModeLexer::Value(lex.morph()),
        Mode::Table => ModeLexer::Table(lex.morph()),
        Mode::TableArrayItem => ModeLexer::TableArrayItem(lex.morph()),
        Mode::Array => ModeLexer::Array(lex.morph()),
        Mode::InlineTable => ModeLexer::InlineTable(lex.morph()),
        Mode::InlineValue => ModeLexer::InlineValue(lex.morph()),
        Mode::BasicString => ModeLexer::BasicString(lex.morph()),
        Mode::MultiLineBasicString => ModeLexer::MultiLineBasicString(lex.morph()),
        Mode::LiteralString => ModeLexer::LiteralString(lex.morph()),
        Mode::MultiLineLiteralString => ModeLexer::MultiLineLiteralString(lex.morph()),
    }
}

impl<'a> ModeLexer<'a> {
    fn new(text: &'a str) -> Self {
        ModeLexer::Top(TopToken::lexer(text))
    }

    fn next(&mut self) -> Option<Result<(TokenKind, ModeAction), ()>> {
        match self {
            ModeLexer::Top(lex) => lex.next().map(|r| r.map(TopToken::classify)),
            ModeLexer::Value(lex) => lex.next().map(|r| r.map(ValueToken::classify)),
            ModeLexer::Table(lex) => lex.next().map(|r| r.map(TableToken::classify)),
            ModeLexer::TableArrayItem(lex) => {
                lex.next().map(|r| r.map(TableArrayToken::classify))
            }
            ModeLexer::Array(lex) => lex.next().map(|r| r.map(ArrayToken::classify)),
            ModeLexer::InlineTable(lex) => lex.next().map(|r| r.map(InlineTableToken::classify)),
            ModeLexer::InlineValue(lex) => lex.next().map(|r| r.map(InlineValueToken::classify)),
            ModeLexer::BasicString(lex) => lex.next().map(|r| r.map(BasicStringToken::classify)),
            ModeLexer::MultiLineBasicString(lex) => {
                lex.next().map(|r| r.map(MultiLineBasicStringToken::classify))
            }
            ModeLexer::LiteralString(lex) => {
                lex.next().map(|r| r.map(LiteralStringToken::classify))
            }
            ModeLexer::MultiLineLiteralString(lex) => {
                lex.next().map(|r| r.map(MultiLineLiteralStringToken::classify))
            }
        }
    }

    fn span(&self) -> std::ops::Range<usize> {
        match self {
            ModeLexer::Top(lex) => lex.span(),
            ModeLexer::Value(lex) => lex.span(),
            ModeLexer::Table(lex) => lex.span(),
            ModeLexer::TableArrayItem(lex) => lex.span(),
            ModeLexer::Array(lex) => lex.span(),
            ModeLexer::InlineTable(lex) => lex.span(),
            ModeLexer::InlineValue(lex) => lex.span(),
            ModeLexer::BasicString(lex) => lex.span(),
            ModeLexer::MultiLineBasicString(lex) => lex.span(),
            ModeLexer::LiteralString(lex) => lex.span(),
            ModeLexer::MultiLineLiteralString(lex) => lex.span(),
        }
    }

    fn slice(&self) -> &'a str {
        match self {
            ModeLexer::Top(lex) => lex.slice(),
            ModeLexer::Value(lex) => lex.slice(),
            ModeLexer::Table(lex) => lex.slice(),
            ModeLexer::TableArrayItem(lex) => lex.slice(),
            ModeLexer::Array(lex) => lex.slice(),
            ModeLexer::InlineTable(lex) => lex.slice(),
            ModeLexer::InlineValue(lex) => lex.slice(),
            ModeLexer::BasicString(lex) => lex.slice(),
            ModeLexer::MultiLineBasicString(lex) => lex.slice(),
            ModeLexer::LiteralString(lex) => lex.slice(),
            ModeLexer::MultiLineLiteralString(lex) => lex.slice(),
        }
    }

    fn morph_to(self, mode: Mode) -> Self {
        match self {
            ModeLexer::Top(lex) => retarget(lex, mode),
            ModeLexer::Value(lex) => retarget(lex, mode),
            ModeLexer::Table(lex) => retarget(lex, mode),
            ModeLexer::TableArrayItem(lex) => retarget(lex, mode),
            ModeLexer::Array(lex) => retarget(lex, mode),
            ModeLexer::InlineTable(lex) => retarget(lex, mode),
            ModeLexer::InlineValue(lex) => retarget(lex, mode),
            ModeLexer::BasicString(lex) => retarget(lex, mode),
            ModeLexer::MultiLineBasicString(lex) => retarget(lex, mode),
            ModeLexer::LiteralString(lex) => retarget(lex, mode),
            ModeLexer::MultiLineLiteralString(lex) => retarget(lex, mode),
        }
    }
}

/// Checks the code point named by a `\uXXXX` / `\UXXXXXXXX` escape image.
/// Surrogates and out-of-range values can never decode to a `char`.
fn check_unicode_escape(image: &str, pos: Position) -> Option<LexError> {
    let digits = &image[2..];
    match u32::from_str_radix(digits, 16) {
        Ok(code) if (0xD800..=0xDFFF).contains(&code) => Some(LexError {
            pos,
            message: format!("unicode escape `{image}` names a surrogate code point"),
        }),
        Ok(code) if code > 0x10FFFF => Some(LexError {
            pos,
            message: format!("unicode escape `{image}` is beyond U+10FFFF"),
        }),
        _ => None,
    }
}

/// Scans `text` into a token stream.
///
/// Errors are accumulated rather than returned early, but an unmatched
/// character stops token production: everything after it would be scanned
/// in the wrong mode.
pub fn tokenize(text: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors: Vec<LexError> = Vec::new();
    let mut stack = vec![Mode::Top];
    let mut lexer = ModeLexer::new(text);
    let mut tracker = PositionTracker::new();

    loop {
        let Some(result) = lexer.next() else { break };
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        let pos = tracker.advance_to(text, range.start);
        let image = lexer.slice();
        let mode = stack.last().copied().unwrap_or(Mode::Top);

        let (kind, action) = match result {
            Ok(classified) => classified,
            Err(()) => {
                let ch = text[range.start..].chars().next().unwrap_or('\u{FFFD}');
                errors.push(LexError {
                    pos,
                    message: format!("unexpected character `{}` in {}", ch.escape_debug(), mode),
                });
                return (tokens, errors);
            }
        };

        if kind == TokenKind::EscapedUnicode {
            if let Some(err) = check_unicode_escape(image, pos) {
                errors.push(err);
            }
        }

        match action {
            ModeAction::Stay => {
                tokens.push(Token { kind, image, span, pos });
            }
            ModeAction::Push(next) => {
                tokens.push(Token { kind, image, span, pos });
                stack.push(next);
                lexer = lexer.morph_to(next);
            }
            ModeAction::Pop => {
                tokens.push(Token { kind, image, span, pos });
                stack.pop();
                let top = stack.last().copied().unwrap_or(Mode::Top);
                lexer = lexer.morph_to(top);
            }
            ModeAction::PopInlinePair => {
                // The `}` terminates the pending binding and the table it
                // belongs to; the binding gets a zero-width close token.
                tokens.push(Token {
                    kind: TokenKind::CloseInlineValue,
                    image: "",
                    span: Span::new(range.start, range.start),
                    pos,
                });
                tokens.push(Token { kind: TokenKind::CloseInlineTable, image, span, pos });
                stack.pop();
                stack.pop();
                let top = stack.last().copied().unwrap_or(Mode::Top);
                lexer = lexer.morph_to(top);
            }
        }
    }

    let final_mode = stack.last().copied().unwrap_or(Mode::Top);
    if final_mode != Mode::Top {
        let pos = tracker.advance_to(text, text.len());
        errors.push(LexError {
            pos,
            message: format!("unterminated {final_mode} at end of input"),
        });
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::super::TokenKind;
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let (tokens, errors) = tokenize(text);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_a_simple_binding() {
        assert_eq!(
            kinds("answer = 42\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenValue,
                TokenKind::Integer,
                TokenKind::CloseValue,
            ]
        );
    }

    #[test]
    fn scans_a_table_header() {
        assert_eq!(
            kinds("[server.alpha]\n"),
            vec![
                TokenKind::OpenTable,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::CloseTable,
                TokenKind::EndOfLine,
            ]
        );
    }

    #[test]
    fn table_array_brackets_win_over_single_brackets() {
        assert_eq!(
            kinds("[[bin]]\n"),
            vec![
                TokenKind::OpenTableArrayItem,
                TokenKind::Identifier,
                TokenKind::CloseTableArrayItem,
                TokenKind::EndOfLine,
            ]
        );
    }

    #[test]
    fn closing_brace_ends_binding_and_inline_table() {
        assert_eq!(
            kinds("p = { x = 1, y = 2 }\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenValue,
                TokenKind::OpenInlineTable,
                TokenKind::Identifier,
                TokenKind::OpenInlineValue,
                TokenKind::Integer,
                TokenKind::CloseInlineValue,
                TokenKind::Identifier,
                TokenKind::OpenInlineValue,
                TokenKind::Integer,
                TokenKind::CloseInlineValue,
                TokenKind::CloseInlineTable,
                TokenKind::CloseValue,
            ]
        );
    }

    #[test]
    fn synthetic_inline_value_close_is_zero_width() {
        let (tokens, errors) = tokenize("p = { x = 1 }\n");
        assert!(errors.is_empty());
        let close = tokens
            .iter()
            .find(|t| t.kind == TokenKind::CloseInlineValue)
            .unwrap();
        assert_eq!(close.image, "");
        assert!(close.span.is_empty());
    }

    #[test]
    fn comma_close_keeps_its_image() {
        let (tokens, _) = tokenize("p = { x = 1, y = 2 }\n");
        let closes: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::CloseInlineValue)
            .map(|t| t.image)
            .collect();
        assert_eq!(closes, vec![",", ""]);
    }

    #[test]
    fn arrays_span_lines_and_allow_comments() {
        assert_eq!(
            kinds("a = [\n  1, # one\n  2,\n]\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenValue,
                TokenKind::OpenArray,
                TokenKind::Integer,
                TokenKind::Comma,
                TokenKind::Integer,
                TokenKind::Comma,
                TokenKind::CloseArray,
                TokenKind::CloseValue,
            ]
        );
    }

    #[test]
    fn string_images_exclude_the_quotes() {
        let (tokens, errors) = tokenize("s = \"ab\\tcd\"\n");
        assert!(errors.is_empty());
        let images: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind, t.image)).collect();
        assert_eq!(
            images,
            vec![
                (TokenKind::Identifier, "s"),
                (TokenKind::OpenValue, "="),
                (TokenKind::OpenBasicString, "\""),
                (TokenKind::StringContent, "ab"),
                (TokenKind::EscapedChar, "\\t"),
                (TokenKind::StringContent, "cd"),
                (TokenKind::CloseBasicString, "\""),
                (TokenKind::CloseValue, "\n"),
            ]
        );
    }

    #[test]
    fn multiline_string_swallows_line_ending_backslash() {
        let (tokens, errors) = tokenize("s = \"\"\"a\\\n   b\"\"\"\n");
        assert!(errors.is_empty());
        let content: String = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::StringContent)
            .map(|t| t.image)
            .collect();
        assert_eq!(content, "ab");
    }

    #[test]
    fn lone_quotes_inside_multiline_strings_are_content() {
        let (tokens, errors) = tokenize("s = \"\"\"she said \"hi\" \"\"\"\n");
        assert!(errors.is_empty());
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::CloseMultiLineBasicString));
    }

    #[test]
    fn numeric_forms() {
        let (tokens, errors) = tokenize("a = 0x_FF\nb = 0b1010\nc = 0o17\nd = 1_000\n");
        assert!(errors.is_empty());
        let nums: Vec<(TokenKind, &str)> = tokens
            .iter()
            .filter(|t| {
                matches!(
                    t.kind,
                    TokenKind::Integer
                        | TokenKind::HexInteger
                        | TokenKind::BinaryInteger
                        | TokenKind::OctalInteger
                )
            })
            .map(|t| (t.kind, t.image))
            .collect();
        assert_eq!(
            nums,
            vec![
                (TokenKind::HexInteger, "0x_FF"),
                (TokenKind::BinaryInteger, "0b1010"),
                (TokenKind::OctalInteger, "0o17"),
                (TokenKind::Integer, "1_000"),
            ]
        );
    }

    #[test]
    fn date_time_tokens_prefer_the_longest_form() {
        let (tokens, _) = tokenize(
            "a = 1979-05-27T07:32:00Z\nb = 1979-05-27T07:32:00\nc = 1979-05-27\nd = 07:32:00\n",
        );
        let kinds: Vec<TokenKind> = tokens
            .iter()
            .filter(|t| {
                matches!(
                    t.kind,
                    TokenKind::OffsetDateTime
                        | TokenKind::LocalDateTime
                        | TokenKind::LocalDate
                        | TokenKind::LocalTime
                )
            })
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OffsetDateTime,
                TokenKind::LocalDateTime,
                TokenKind::LocalDate,
                TokenKind::LocalTime,
            ]
        );
    }

    #[test]
    fn positions_are_one_based_line_and_column() {
        let (tokens, _) = tokenize("a = 1\nbb = 2\n");
        let bb = tokens.iter().find(|t| t.image == "bb").unwrap();
        assert_eq!(bb.pos, Position::new(2, 1));
        let two = tokens.iter().find(|t| t.image == "2").unwrap();
        assert_eq!(two.pos, Position::new(2, 6));
    }

    #[test]
    fn surrogate_escape_is_reported() {
        let (_, errors) = tokenize("s = \"\\uD800\"\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("surrogate"));
    }

    #[test]
    fn out_of_range_escape_is_reported() {
        let (_, errors) = tokenize("s = \"\\U00110000\"\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("U+10FFFF"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, errors) = tokenize("s = \"abc");
        assert!(!errors.is_empty());
        assert!(errors[0].message.contains("unterminated"));
    }

    #[test]
    fn newline_inside_basic_string_stops_the_scan() {
        let (_, errors) = tokenize("s = \"abc\n");
        assert!(!errors.is_empty());
        assert!(errors[0].message.contains("unexpected character"));
    }

    #[test]
    fn control_character_stops_the_scan() {
        let (_, errors) = tokenize("s = \"a\u{0001}b\"\n");
        assert!(!errors.is_empty());
    }
}
