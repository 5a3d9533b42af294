//! Token-level parsers.
//!
//! These only make sense over the token sequence produced by a lexer; run
//! over characters they report a failure. See [`Parser::from_tokenizer`].

use crate::parser::Parser;
use crate::token::{Fragment, ScientificNotation, Tag, Token, TokenValue};

/// One token accepted by `recognize`, which maps it to the result.
///
/// Reports `name` as missing at the end of the input or when `recognize`
/// declines the token.
pub fn token<U, F>(name: &str, recognize: F) -> Parser<U>
where
    U: 'static,
    F: Fn(&Token) -> Option<U> + Send + Sync + 'static,
{
    let name = name.to_string();
    Parser::from_fn(name.clone(), move |ctx| {
        let tokens = ctx.token_input()?;
        match tokens.get(ctx.at).and_then(|t| recognize(t)) {
            Some(value) => {
                ctx.next();
                Some(value)
            }
            None => {
                ctx.missing(name.as_str());
                None
            }
        }
    })
}

pub fn any_token() -> Parser<Token> {
    token("any token", |t| Some(t.clone()))
}

/// The next token, provided its value is `value`
pub fn token_with_value(value: TokenValue) -> Parser<Token> {
    let name = value.to_string();
    token(&name, move |t| (t.value == value).then(|| t.clone()))
}

fn tags_name(tags: &[Tag]) -> String {
    match tags {
        [] => String::new(),
        [tag] => tag.to_string(),
        _ => {
            let names: Vec<String> = tags.iter().map(Tag::to_string).collect();
            format!("[{}]", names.join(", "))
        }
    }
}

/// Text of a [`Fragment`] token carrying one of `tags`
pub fn fragment(tags: &[Tag]) -> Parser<String> {
    let tags = tags.to_vec();
    token(&tags_name(&tags), move |t| match &t.value {
        TokenValue::Fragment(Fragment { text, tag }) if tags.contains(tag) => Some(text.clone()),
        _ => None,
    })
}

pub fn reserved() -> Parser<String> {
    fragment(&[Tag::Reserved])
}

pub fn identifier() -> Parser<String> {
    fragment(&[Tag::Identifier])
}

pub fn integer_literal() -> Parser<String> {
    fragment(&[Tag::Integer])
}

pub fn decimal_literal() -> Parser<String> {
    fragment(&[Tag::Decimal])
}

pub fn long_literal() -> Parser<i64> {
    token("integer literal", |t| match t.value {
        TokenValue::Long(n) => Some(n),
        _ => None,
    })
}

pub fn string_literal() -> Parser<String> {
    token("string literal", |t| match &t.value {
        TokenValue::Str(s) => Some(s.clone()),
        _ => None,
    })
}

pub fn char_literal() -> Parser<char> {
    token("character literal", |t| match t.value {
        TokenValue::Char(c) => Some(c),
        _ => None,
    })
}

pub fn scientific_literal() -> Parser<ScientificNotation> {
    token("scientific number literal", |t| match &t.value {
        TokenValue::Scientific(n) => Some(n.clone()),
        _ => None,
    })
}

impl Parser<TokenValue> {
    /// Wraps the value into a [`Token`] spanning the characters consumed
    pub fn token(self) -> Parser<Token> {
        let name = self.name().to_string();
        Parser::from_fn(name, move |ctx| {
            let begin = ctx.index();
            let value = self.apply(ctx)?;
            Some(Token::new(begin, ctx.index() - begin, value))
        })
    }
}
