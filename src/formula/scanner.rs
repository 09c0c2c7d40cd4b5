use std::fmt;

use winnow::combinator::{alt, delimited, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

/// Recognized pieces of formula text. The scanner is advisory: it exists
/// to tell "contains something formula-shaped" from "contains nothing",
/// and skips characters it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A bracketed column reference, inner text as written: `[Revenue]`.
    FieldRef(String),
    /// A word run immediately followed by `(`: `SUM(`.
    FuncHead(String),
    /// A lone closing parenthesis.
    CloseParen,
    /// One of the four arithmetic operators.
    Operator(char),
    /// A run of decimal digits.
    Number(String),
}

/// Raised when the scanner fails outright; converted by the validation
/// boundary into the generic syntax diagnostic.
#[derive(Debug)]
pub(crate) struct ScanError {
    message: String,
}

impl ScanError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan error: {}", self.message)
    }
}

impl std::error::Error for ScanError {}

fn field_ref(input: &mut &str) -> ModalResult<Token> {
    delimited('[', take_while(1.., |c: char| c != ']'), ']')
        .map(|inner: &str| Token::FieldRef(inner.to_owned()))
        .parse_next(input)
}

fn func_head(input: &mut &str) -> ModalResult<Token> {
    (
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
        '(',
    )
        .map(|(name, _): (&str, char)| Token::FuncHead(name.to_owned()))
        .parse_next(input)
}

fn close_paren(input: &mut &str) -> ModalResult<Token> {
    ')'.value(Token::CloseParen).parse_next(input)
}

fn operator(input: &mut &str) -> ModalResult<Token> {
    one_of(['+', '-', '*', '/'])
        .map(Token::Operator)
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<Token> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .map(|digits: &str| Token::Number(digits.to_owned()))
        .parse_next(input)
}

fn token(input: &mut &str) -> ModalResult<Token> {
    alt((field_ref, func_head, close_paren, operator, number)).parse_next(input)
}

/// Scan the whole input, collecting recognized tokens and stepping over
/// everything else one character at a time.
pub(crate) fn scan(input: &str) -> Result<Vec<Token>, ScanError> {
    let raw: Vec<Option<Token>> = repeat(0.., alt((token.map(Some), any.value(None))))
        .parse(input)
        .map_err(|e| ScanError::new(e.to_string()))?;
    Ok(raw.into_iter().flatten().collect())
}
