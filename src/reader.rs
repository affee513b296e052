//! The reading facade
//!
//! [`read_toml`] runs the three stages in order and stops at the first
//! stage that reports errors: parse results built on bad tokens, or a
//! tree built on bad entries, would only produce confusing follow-up
//! diagnostics.

use std::borrow::Cow;

use crate::assembler::{assemble, ArrayPolicy};
use crate::error::TomlError;
use crate::lexer::tokenize;
use crate::parser::{parse_document, TopLevelEntry};
use crate::value::{Node, PlainValue};

/// The document tree in the requested fidelity
#[derive(Debug, Clone, PartialEq)]
pub enum DocTree {
    Full(Node),
    Plain(PlainValue),
}

impl DocTree {
    /// The plain rendition, whatever fidelity was requested
    pub fn to_plain(&self) -> PlainValue {
        match self {
            DocTree::Full(node) => node.to_plain(),
            DocTree::Plain(plain) => plain.clone(),
        }
    }
}

/// Everything a read produced: the tree when the document was valid, the
/// parsed entries when at least scanning succeeded, and any errors.
#[derive(Debug)]
pub struct ReadOutcome {
    /// `None` exactly when `errors` is non-empty
    pub result: Option<DocTree>,
    /// Top level entries in source order; empty when scanning failed
    pub entries: Vec<TopLevelEntry>,
    pub errors: Vec<TomlError>,
}

impl ReadOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reads a TOML document with the default (strict) array policy.
///
/// With `full_fidelity` the tree keeps kind tags and source images on
/// every leaf; without it the tree holds bare native values.
pub fn read_toml(input: &str, full_fidelity: bool) -> ReadOutcome {
    read_toml_with_policy(input, full_fidelity, ArrayPolicy::default())
}

/// [`read_toml`] with an explicit array homogeneity policy
pub fn read_toml_with_policy(
    input: &str,
    full_fidelity: bool,
    policy: ArrayPolicy,
) -> ReadOutcome {
    // A final line break closes any trailing binding
    let text: Cow<'_, str> = if input.ends_with('\n') {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{input}\n"))
    };

    let (tokens, lex_errors) = tokenize(&text);
    if !lex_errors.is_empty() {
        return ReadOutcome {
            result: None,
            entries: Vec::new(),
            errors: lex_errors.into_iter().map(TomlError::Lex).collect(),
        };
    }

    let (entries, parse_errors) = parse_document(&tokens);
    if !parse_errors.is_empty() {
        return ReadOutcome {
            result: None,
            entries,
            errors: parse_errors.into_iter().map(TomlError::Parse).collect(),
        };
    }

    match assemble(&entries, policy) {
        Ok(doc) => {
            let tree = if full_fidelity {
                DocTree::Full(doc.to_node())
            } else {
                DocTree::Plain(doc.to_plain())
            };
            ReadOutcome { result: Some(tree), entries, errors: Vec::new() }
        }
        Err(err) => ReadOutcome {
            result: None,
            entries,
            errors: vec![TomlError::Assembly(err)],
        },
    }
}
