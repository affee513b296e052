//! Recursive-descent grammar over the token stream
//!
//! One entry per top level statement. A syntax error is recorded and the
//! parser resynchronizes at the next line break, so a single pass can
//! report several errors.

use crate::datetime;
use crate::error::ParseError;
use crate::lexer::{Position, Token, TokenKind};

use super::ast::{Atomic, Key, KeyValue, TomlArray, TomlInlineTable, TomlValue, TopLevelEntry};
use super::literals;

/// Parses the whole token stream into top level entries plus any syntax
/// errors found along the way.
pub fn parse_document(tokens: &[Token<'_>]) -> (Vec<TopLevelEntry>, Vec<ParseError>) {
    let mut cursor = Cursor::new(tokens);
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    while !cursor.at_end() {
        if cursor.eat(TokenKind::EndOfLine) {
            continue;
        }
        match parse_entry(&mut cursor) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                errors.push(err);
                cursor.resync();
            }
        }
    }

    (entries, errors)
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.index)
    }

    fn kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.index).copied();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.kind() == Some(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Position of the current token, or just past the last one at EOF
    fn pos(&self) -> Position {
        match self.peek().or_else(|| self.tokens.last()) {
            Some(token) => token.pos,
            None => Position::default(),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        match self.peek().copied() {
            Some(token) if token.kind == kind => {
                self.index += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(&[kind])),
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let message = match self.peek() {
            Some(token) => format!("unexpected {} `{}`", token.kind, token.image),
            None => "unexpected end of input".to_string(),
        };
        ParseError {
            pos: self.pos(),
            message,
            expected: expected.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn decode_error(&self, pos: Position, message: String) -> ParseError {
        ParseError { pos, message, expected: Vec::new() }
    }

    /// Skips forward past the next line break so parsing can continue
    /// with the following statement.
    fn resync(&mut self) {
        while let Some(token) = self.bump() {
            if matches!(token.kind, TokenKind::EndOfLine | TokenKind::CloseValue) {
                break;
            }
        }
    }
}

fn parse_entry(cursor: &mut Cursor<'_, '_>) -> Result<TopLevelEntry, ParseError> {
    match cursor.kind() {
        Some(TokenKind::OpenTable) => {
            let pos = cursor.pos();
            cursor.bump();
            let keys = parse_key_path(cursor)?;
            cursor.expect(TokenKind::CloseTable)?;
            end_of_statement(cursor)?;
            Ok(TopLevelEntry::TableHeader { keys, pos })
        }
        Some(TokenKind::OpenTableArrayItem) => {
            let pos = cursor.pos();
            cursor.bump();
            let keys = parse_key_path(cursor)?;
            cursor.expect(TokenKind::CloseTableArrayItem)?;
            end_of_statement(cursor)?;
            Ok(TopLevelEntry::TableArrayHeader { keys, pos })
        }
        Some(
            TokenKind::Identifier | TokenKind::OpenBasicString | TokenKind::OpenLiteralString,
        ) => {
            let pos = cursor.pos();
            let keys = parse_key_path(cursor)?;
            cursor.expect(TokenKind::OpenValue)?;
            let value = parse_value(cursor)?;
            end_of_binding(cursor)?;
            Ok(TopLevelEntry::KeyValue(KeyValue { keys, value, pos }))
        }
        _ => Err(cursor.unexpected(&[
            TokenKind::Identifier,
            TokenKind::OpenTable,
            TokenKind::OpenTableArrayItem,
        ])),
    }
}

/// A header must be the last thing on its line
fn end_of_statement(cursor: &mut Cursor<'_, '_>) -> Result<(), ParseError> {
    if cursor.at_end() || cursor.eat(TokenKind::EndOfLine) {
        Ok(())
    } else {
        Err(cursor.unexpected(&[TokenKind::EndOfLine]))
    }
}

/// A binding ends at the line break that closed its value mode
fn end_of_binding(cursor: &mut Cursor<'_, '_>) -> Result<(), ParseError> {
    if cursor.at_end() || cursor.eat(TokenKind::CloseValue) {
        Ok(())
    } else {
        Err(cursor.unexpected(&[TokenKind::CloseValue]))
    }
}

fn parse_key_path(cursor: &mut Cursor<'_, '_>) -> Result<Vec<Key>, ParseError> {
    let mut keys = vec![parse_key_component(cursor)?];
    while cursor.eat(TokenKind::Dot) {
        keys.push(parse_key_component(cursor)?);
    }
    Ok(keys)
}

fn parse_key_component(cursor: &mut Cursor<'_, '_>) -> Result<Key, ParseError> {
    match cursor.kind() {
        Some(TokenKind::Identifier) => {
            let pos = cursor.pos();
            let token = cursor.expect(TokenKind::Identifier)?;
            Ok(Key { name: token.image.to_string(), pos })
        }
        Some(open @ (TokenKind::OpenBasicString | TokenKind::OpenLiteralString)) => {
            let pos = cursor.pos();
            let (_, value) = parse_string_body(cursor, open)?;
            Ok(Key { name: value, pos })
        }
        _ => Err(cursor.unexpected(&[
            TokenKind::Identifier,
            TokenKind::OpenBasicString,
            TokenKind::OpenLiteralString,
        ])),
    }
}

fn parse_value(cursor: &mut Cursor<'_, '_>) -> Result<TomlValue, ParseError> {
    let Some(token) = cursor.peek().copied() else {
        return Err(cursor.unexpected(&[TokenKind::Integer]));
    };
    let pos = token.pos;
    let image = token.image;
    match token.kind {
        TokenKind::Integer => {
            cursor.bump();
            let value = literals::parse_integer(image)
                .map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::Integer(Atomic::new(image, value)))
        }
        TokenKind::BinaryInteger => {
            cursor.bump();
            let value =
                literals::parse_radix(image, 2).map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::Integer(Atomic::new(image, value)))
        }
        TokenKind::OctalInteger => {
            cursor.bump();
            let value =
                literals::parse_radix(image, 8).map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::Integer(Atomic::new(image, value)))
        }
        TokenKind::HexInteger => {
            cursor.bump();
            let value =
                literals::parse_radix(image, 16).map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::Integer(Atomic::new(image, value)))
        }
        TokenKind::Float => {
            cursor.bump();
            let value =
                literals::parse_float(image).map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::Float(Atomic::new(image, value)))
        }
        TokenKind::Infinity | TokenKind::NotANumber => {
            cursor.bump();
            Ok(TomlValue::Float(Atomic::new(image, literals::parse_special_float(image))))
        }
        TokenKind::Boolean => {
            cursor.bump();
            Ok(TomlValue::Boolean(Atomic::new(image, image == "true")))
        }
        TokenKind::OffsetDateTime => {
            cursor.bump();
            let value = datetime::parse_offset_date_time(image)
                .map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::OffsetDateTime(Atomic::new(image, value)))
        }
        TokenKind::LocalDateTime => {
            cursor.bump();
            let value = datetime::parse_local_date_time(image)
                .map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::LocalDateTime(Atomic::new(image, value)))
        }
        TokenKind::LocalDate => {
            cursor.bump();
            let value = datetime::parse_local_date(image)
                .map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::LocalDate(Atomic::new(image, value)))
        }
        TokenKind::LocalTime => {
            cursor.bump();
            let value = datetime::parse_local_time(image)
                .map_err(|m| cursor.decode_error(pos, m))?;
            Ok(TomlValue::LocalTime(Atomic::new(image, value)))
        }
        open @ (TokenKind::OpenBasicString
        | TokenKind::OpenMultiLineBasicString
        | TokenKind::OpenLiteralString
        | TokenKind::OpenMultiLineLiteralString) => {
            let (image, value) = parse_string_body(cursor, open)?;
            Ok(TomlValue::String(Atomic { image, value }))
        }
        TokenKind::OpenArray => parse_array(cursor),
        TokenKind::OpenInlineTable => parse_inline_table(cursor),
        _ => Err(cursor.unexpected(&[TokenKind::Integer, TokenKind::OpenBasicString])),
    }
}

/// Collects the inner tokens of a string up to its closing delimiter.
/// Returns the raw image (quotes excluded) and the decoded value. The
/// decoded value of a multi-line string drops a newline directly after
/// the opening delimiter; the image keeps it.
fn parse_string_body(
    cursor: &mut Cursor<'_, '_>,
    open: TokenKind,
) -> Result<(String, String), ParseError> {
    let close = match open {
        TokenKind::OpenBasicString => TokenKind::CloseBasicString,
        TokenKind::OpenMultiLineBasicString => TokenKind::CloseMultiLineBasicString,
        TokenKind::OpenLiteralString => TokenKind::CloseLiteralString,
        _ => TokenKind::CloseMultiLineLiteralString,
    };
    let multiline = matches!(
        open,
        TokenKind::OpenMultiLineBasicString | TokenKind::OpenMultiLineLiteralString
    );
    cursor.expect(open)?;

    let mut image = String::new();
    let mut value = String::new();
    let mut first = true;
    let mut leading_newline = false;
    loop {
        let Some(token) = cursor.peek().copied() else {
            return Err(cursor.unexpected(&[close]));
        };
        if token.kind == close {
            cursor.bump();
            break;
        }
        match token.kind {
            TokenKind::StringContent => {
                if first && (token.image == "\n" || token.image == "\r") {
                    leading_newline = true;
                }
                image.push_str(token.image);
                value.push_str(token.image);
            }
            TokenKind::EscapedChar => {
                image.push_str(token.image);
                let ch = literals::unescape_char(token.image)
                    .map_err(|m| cursor.decode_error(token.pos, m))?;
                value.push(ch);
            }
            TokenKind::EscapedUnicode => {
                image.push_str(token.image);
                let ch = literals::unescape_unicode(token.image)
                    .map_err(|m| cursor.decode_error(token.pos, m))?;
                value.push(ch);
            }
            _ => return Err(cursor.unexpected(&[close])),
        }
        cursor.bump();
        first = false;
    }

    if multiline && leading_newline {
        if value.starts_with("\r\n") {
            value.drain(..2);
        } else {
            value.drain(..1);
        }
    }
    Ok((image, value))
}

/// `[ v, v, … ]`, possibly spanning lines, with one trailing comma allowed
fn parse_array(cursor: &mut Cursor<'_, '_>) -> Result<TomlValue, ParseError> {
    let pos = cursor.pos();
    cursor.expect(TokenKind::OpenArray)?;
    let mut values = Vec::new();
    loop {
        if cursor.kind() == Some(TokenKind::CloseArray) {
            cursor.bump();
            break;
        }
        values.push(parse_value(cursor)?);
        if !cursor.eat(TokenKind::Comma) {
            cursor.expect(TokenKind::CloseArray)?;
            break;
        }
    }
    Ok(TomlValue::Array(TomlArray { values, pos }))
}

/// `{ key = v, key = v }`; the scanner closes the final binding and the
/// table with a paired zero-width token, so a comma always demands a
/// further binding.
fn parse_inline_table(cursor: &mut Cursor<'_, '_>) -> Result<TomlValue, ParseError> {
    let pos = cursor.pos();
    cursor.expect(TokenKind::OpenInlineTable)?;
    let mut bindings = Vec::new();
    if cursor.eat(TokenKind::CloseInlineTable) {
        return Ok(TomlValue::InlineTable(TomlInlineTable { bindings, pos }));
    }
    loop {
        let binding_pos = cursor.pos();
        let keys = parse_key_path(cursor)?;
        cursor.expect(TokenKind::OpenInlineValue)?;
        let value = parse_value(cursor)?;
        bindings.push(KeyValue { keys, value, pos: binding_pos });
        let closer = cursor.expect(TokenKind::CloseInlineValue)?;
        if closer.image == "," {
            continue;
        }
        cursor.expect(TokenKind::CloseInlineTable)?;
        break;
    }
    Ok(TomlValue::InlineTable(TomlInlineTable { bindings, pos }))
}
