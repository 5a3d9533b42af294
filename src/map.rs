use crate::parser::{Apply, Parser};
use crate::context::ParseContext;
use std::fmt::Display;

/// Parser combinator that transforms the output of a parser using a mapping function
pub struct Map<T, F> {
    parser: Parser<T>,
    mapper: F,
}

impl<T, F> Map<T, F> {
    pub fn new(parser: Parser<T>, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<T, U, F> Apply<U> for Map<T, F>
where
    T: 'static,
    F: Fn(T) -> U + Send + Sync,
{
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<U> {
        self.parser.apply(ctx).map(&self.mapper)
    }
}

/// Parser combinator whose mapping function may reject the value.
///
/// A rejection is reported as an unconditional failure at the position where
/// the wrapped parser started.
pub struct TryMap<T, F> {
    parser: Parser<T>,
    mapper: F,
}

impl<T, U, E, F> Apply<U> for TryMap<T, F>
where
    T: 'static,
    E: Display,
    F: Fn(T) -> Result<U, E> + Send + Sync,
{
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<U> {
        let (at, step) = (ctx.at, ctx.step);
        match (self.mapper)(self.parser.apply(ctx)?) {
            Ok(value) => Some(value),
            Err(e) => {
                ctx.set_at(step, at);
                ctx.fail(e.to_string());
                None
            }
        }
    }
}

/// Convenience function to create a Map parser
pub fn map<T, U, F>(parser: Parser<T>, mapper: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    parser.map(mapper)
}

impl<T: 'static> Parser<T> {
    pub fn map<U, F>(self, mapper: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let name = self.name().to_string();
        Parser::new(name, Map::new(self, mapper))
    }

    pub fn try_map<U, E, F>(self, mapper: F) -> Parser<U>
    where
        U: 'static,
        E: Display,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let name = self.name().to_string();
        Parser::new(name, TryMap { parser: self, mapper })
    }

    /// Replaces the result with a clone of `value`
    pub fn retn<U>(self, value: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Discards the result
    pub fn skip(self) -> Parser<()> {
        self.map(|_| ())
    }
}
