//! Lookahead: peeking, negation and conditional continuation.

use crate::context::ParseContext;
use crate::parser::{Apply, Parser};
use crate::primitives::{always, constant, unexpected};

/// Parser combinator that runs a parser and rewinds on success
pub struct Peek<T> {
    parser: Parser<T>,
}

impl<T> Peek<T> {
    pub fn new(parser: Parser<T>) -> Self {
        Peek { parser }
    }
}

impl<T: 'static> Apply<T> for Peek<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        let (at, step) = (ctx.at, ctx.step);
        let value = self.parser.apply(ctx)?;
        ctx.set_at(step, at);
        Some(value)
    }
}

/// Parser combinator that probes a condition with errors suppressed and
/// continues with `consequence` if it held, or rewinds and runs `alternative`
pub struct IfElse<T, U> {
    condition: Parser<T>,
    consequence: Parser<U>,
    alternative: Parser<U>,
}

impl<T: 'static, U: 'static> Apply<U> for IfElse<T, U> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<U> {
        let (at, step) = (ctx.at, ctx.step);
        let latest_child = ctx.latest_child();
        if ctx.with_errors_suppressed(&self.condition).is_some() {
            return self.consequence.apply(ctx);
        }
        ctx.set_at(step, at);
        ctx.set_latest_child(latest_child);
        self.alternative.apply(ctx)
    }
}

impl<T: 'static> Parser<T> {
    /// Runs this parser without consuming input
    pub fn peek(self) -> Parser<T> {
        let name = self.name().to_string();
        Parser::new(name, Peek::new(self))
    }

    /// Runs `consequence` after this parser if it succeeds, otherwise runs
    /// `alternative` from the starting position. Errors of this parser are
    /// never reported.
    pub fn if_else<U: 'static>(self, consequence: Parser<U>, alternative: Parser<U>) -> Parser<U> {
        let name = format!("if {} then {} else {}", self, consequence, alternative);
        Parser::new(
            name,
            IfElse {
                condition: self,
                consequence,
                alternative,
            },
        )
    }

    /// Succeeds without consuming input if this parser fails here; otherwise
    /// reports the parser's name as unexpected
    pub fn not(self) -> Parser<()> {
        let name = self.name().to_string();
        self.not_named(&name)
    }

    /// Like [`Parser::not`], reporting `name` as unexpected
    pub fn not_named(self, name: &str) -> Parser<()> {
        self.peek()
            .if_else(unexpected(name), always())
            .renamed(format!("!{name}"))
    }

    /// This parser, provided `other` does not match right after it
    pub fn not_followed_by<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.followed_by(other.not())
    }

    /// Whether this parser would succeed here. Never consumes input.
    pub fn succeeds(self) -> Parser<bool> {
        self.peek().if_else(constant(true), constant(false))
    }

    /// Whether this parser would fail here. Never consumes input.
    pub fn fails(self) -> Parser<bool> {
        self.peek().if_else(constant(false), constant(true))
    }
}
