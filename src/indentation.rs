//! Off-side rule: block structure from indentation.
//!
//! The lexer built here keeps line feeds as tokens, then replaces them with
//! zero-width INDENT and OUTDENT tokens wherever the indentation of a line
//! differs from the enclosing block.

use crate::char_predicate::CharPredicate;
use crate::parser::Parser;
use crate::pattern::{self, Pattern};
use crate::scanners::is_char;
use crate::token::{Punctuation, Token, TokenValue};
use crate::tokens::token_with_value;

fn inline_whitespace() -> CharPredicate {
    CharPredicate::new("whitespace", |c| c != '\n' && c.is_whitespace())
}

fn line_continuation() -> Pattern {
    pattern::sequence(vec![
        pattern::is_char('\\'),
        pattern::many(inline_whitespace()),
        pattern::is_char('\n'),
    ])
}

/// Whitespace that does not end a line. A backslash right before a line
/// break joins the two lines.
pub fn whitespaces() -> Parser<()> {
    pattern::many1(inline_whitespace())
        .or(line_continuation())
        .many1()
        .to_scanner("whitespaces")
}

/// Synthesizes INDENT and OUTDENT tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indentation {
    indent: TokenValue,
    outdent: TokenValue,
}

impl Default for Indentation {
    fn default() -> Self {
        Indentation::new(Punctuation::Indent, Punctuation::Outdent)
    }
}

impl Indentation {
    /// Uses `indent` and `outdent` as the values of the synthesized tokens
    pub fn new(indent: impl Into<TokenValue>, outdent: impl Into<TokenValue>) -> Self {
        Indentation {
            indent: indent.into(),
            outdent: outdent.into(),
        }
    }

    pub fn indent(&self) -> Parser<Token> {
        token_with_value(self.indent.clone())
    }

    pub fn outdent(&self) -> Parser<Token> {
        token_with_value(self.outdent.clone())
    }

    /// Lexer for `tokenizer` that skips `delimiter` between tokens and turns
    /// line breaks into indentation tokens. `delimiter` must not consume line
    /// breaks; [`whitespaces`] is the usual choice.
    pub fn lexer<D: 'static>(
        &self,
        tokenizer: Parser<TokenValue>,
        delimiter: Parser<D>,
    ) -> Parser<Vec<Token>> {
        let line_feed = is_char('\n').retn(TokenValue::from(Punctuation::LineFeed));
        let this = self.clone();
        tokenizer
            .or(line_feed)
            .lexer(delimiter)
            .map(move |tokens| this.analyze(&tokens))
    }

    /// Replaces line feed tokens in `tokens` with indentation tokens.
    ///
    /// The indentation of a line is the distance from the line break before
    /// it to its first token; a line holding nothing but a line break has
    /// indentation 0. Each deeper line opens a block with an INDENT, each
    /// shallower one closes blocks with one OUTDENT apiece until an enclosing
    /// block matches. Blocks still open at the end are closed there.
    pub fn analyze(&self, tokens: &[Token]) -> Vec<Token> {
        let Some(last) = tokens.last() else {
            return Vec::new();
        };
        let line_feed = TokenValue::from(Punctuation::LineFeed);
        let mut result = Vec::with_capacity(tokens.len() + tokens.len() / 16);
        let mut stack: Vec<usize> = Vec::new();
        let mut fresh_line = true;
        let mut line_start = 0;
        for token in tokens {
            let is_line_feed = token.value == line_feed;
            if fresh_line {
                let width = if is_line_feed { 0 } else { token.index - line_start };
                self.new_line(token.index, width, &mut stack, &mut result);
            }
            if is_line_feed {
                fresh_line = true;
                line_start = token.end();
            } else {
                fresh_line = false;
                result.push(token.clone());
            }
        }
        let end = last.end();
        for _ in 1..stack.len() {
            result.push(Token::new(end, 0, self.outdent.clone()));
        }
        result
    }

    fn new_line(
        &self,
        index: usize,
        width: usize,
        stack: &mut Vec<usize>,
        result: &mut Vec<Token>,
    ) {
        while let Some(&current) = stack.last() {
            if current < width {
                log::trace!("indent to {width} at index {index}");
                stack.push(width);
                result.push(Token::new(index, 0, self.indent.clone()));
                return;
            }
            if current == width {
                return;
            }
            stack.pop();
            if stack.is_empty() {
                return;
            }
            log::trace!("outdent from {current} at index {index}");
            result.push(Token::new(index, 0, self.outdent.clone()));
        }
        stack.push(width);
    }
}
