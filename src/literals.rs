//! Literal translators and the tokenizers built on them.
//!
//! A translator turns the text a literal scanner matched into a value. A
//! tokenizer is a scanner mapped through a translator, producing the
//! [`TokenValue`] that [`Parser::token`] wraps into a [`Token`].
//!
//! [`Token`]: crate::token::Token

use crate::or::or_all;
use crate::parser::Parser;
use crate::scanners;
use crate::token::{Fragment, ScientificNotation, TokenValue};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("integer literal {0} out of range")]
    Overflow(String),
    #[error("illegal char literal {0}")]
    IllegalChar(String),
    #[error("malformed scientific notation {0}")]
    MalformedScientific(String),
}

fn escaped_char(c: char) -> char {
    match c {
        'r' => '\r',
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Content of a `"..."` literal with `\r`, `\n` and `\t` translated; any
/// other escaped character stands for itself
pub fn translate_double_quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = unquote(text).chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped_char(escaped));
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Content of a `'...'` literal with `''` collapsed to `'`
pub fn translate_single_quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = unquote(text).chars();
    while let Some(c) = chars.next() {
        result.push(c);
        if c == '\'' {
            chars.next();
        }
    }
    result
}

/// The character of a `'c'` or `'\c'` literal
pub fn translate_single_quote_char(text: &str) -> Result<char, LiteralError> {
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [_, c, _] => Ok(*c),
        [_, '\\', c, _] => Ok(escaped_char(*c)),
        _ => Err(LiteralError::IllegalChar(text.to_string())),
    }
}

fn to_long(digits: &str, radix: u32, text: &str) -> Result<i64, LiteralError> {
    digits.chars().try_fold(0i64, |n, c| {
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| LiteralError::Overflow(text.to_string()))?;
        n.checked_mul(i64::from(radix))
            .and_then(|n| n.checked_add(i64::from(digit)))
            .ok_or_else(|| LiteralError::Overflow(text.to_string()))
    })
}

pub fn dec_as_long(text: &str) -> Result<i64, LiteralError> {
    to_long(text, 10, text)
}

/// Value of an octal literal; the leading `0` is just another digit
pub fn oct_as_long(text: &str) -> Result<i64, LiteralError> {
    to_long(text, 8, text)
}

/// Value of a `0x` / `0X` literal
pub fn hex_as_long(text: &str) -> Result<i64, LiteralError> {
    let digits = text.get(2..).unwrap_or_default();
    to_long(digits, 16, text)
}

/// Splits `1.5e+3` into significand `1.5` and exponent `3`
pub fn translate_scientific(text: &str) -> Result<ScientificNotation, LiteralError> {
    let (significand, exponent) = text
        .split_once(['e', 'E'])
        .ok_or_else(|| LiteralError::MalformedScientific(text.to_string()))?;
    let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
    Ok(ScientificNotation::new(significand, exponent))
}

pub fn identifier_tokenizer() -> Parser<TokenValue> {
    scanners::identifier().map(|text| Fragment::identifier(text).into())
}

pub fn integer_tokenizer() -> Parser<TokenValue> {
    scanners::integer().map(|text| Fragment::integer(text).into())
}

pub fn decimal_tokenizer() -> Parser<TokenValue> {
    scanners::decimal().map(|text| Fragment::decimal(text).into())
}

pub fn dec_long_tokenizer() -> Parser<TokenValue> {
    scanners::dec_integer().try_map(|text| dec_as_long(&text).map(TokenValue::Long))
}

pub fn oct_long_tokenizer() -> Parser<TokenValue> {
    scanners::oct_integer().try_map(|text| oct_as_long(&text).map(TokenValue::Long))
}

pub fn hex_long_tokenizer() -> Parser<TokenValue> {
    scanners::hex_integer().try_map(|text| hex_as_long(&text).map(TokenValue::Long))
}

/// Hexadecimal, decimal or octal integer as a [`TokenValue::Long`].
/// Hexadecimal goes first so `0x1F` is not read as octal `0`.
pub fn long_tokenizer() -> Parser<TokenValue> {
    or_all(vec![hex_long_tokenizer(), dec_long_tokenizer(), oct_long_tokenizer()])
}

pub fn double_quote_string_tokenizer() -> Parser<TokenValue> {
    scanners::double_quote_string().map(|text| TokenValue::Str(translate_double_quote(&text)))
}

pub fn single_quote_string_tokenizer() -> Parser<TokenValue> {
    scanners::single_quote_string().map(|text| TokenValue::Str(translate_single_quote(&text)))
}

pub fn single_quote_char_tokenizer() -> Parser<TokenValue> {
    scanners::single_quote_char()
        .try_map(|text| translate_single_quote_char(&text).map(TokenValue::Char))
}

pub fn scientific_tokenizer() -> Parser<TokenValue> {
    scanners::scientific_notation()
        .try_map(|text| translate_scientific(&text).map(TokenValue::Scientific))
}
