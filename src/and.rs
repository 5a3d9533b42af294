use crate::context::ParseContext;
use crate::parser::{Apply, Parser};

/// Parser combinator that runs two parsers in sequence and keeps both results
pub struct And<T, U> {
    first: Parser<T>,
    second: Parser<U>,
}

impl<T, U> And<T, U> {
    pub fn new(first: Parser<T>, second: Parser<U>) -> Self {
        And { first, second }
    }
}

impl<T: 'static, U: 'static> Apply<(T, U)> for And<T, U> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<(T, U)> {
        let first = self.first.apply(ctx)?;
        let second = self.second.apply(ctx)?;
        Some((first, second))
    }
}

/// Parser combinator that feeds a result into a function choosing the next parser
pub struct Bind<T, F> {
    parser: Parser<T>,
    next: F,
}

impl<T, U, F> Apply<U> for Bind<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Parser<U> + Send + Sync,
{
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<U> {
        let value = self.parser.apply(ctx)?;
        (self.next)(value).apply(ctx)
    }
}

/// Convenience function to create an And parser
pub fn and<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<(T, U)> {
    first.and(second)
}

impl<T: 'static> Parser<T> {
    pub fn and<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        let name = format!("{} {}", self, other);
        Parser::new(name, And::new(self, other))
    }

    /// Runs `next` after this parser and keeps only its result
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.and(next).map(|(_, u)| u)
    }

    /// Runs `next` after this parser and keeps only this parser's result
    pub fn followed_by<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        self.and(next).map(|(t, _)| t)
    }

    /// Chooses the next parser from this parser's result
    pub fn bind<U, F>(self, next: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        let name = format!("{} >>= ?", self);
        Parser::new(name, Bind { parser: self, next })
    }
}

/// Runs every parser in order and collects the results
pub fn list<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    let name = parsers
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(" ");
    Parser::from_fn(name, move |ctx| {
        let mut values = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            values.push(parser.apply(ctx)?);
        }
        Some(values)
    })
}

/// A tuple of parsers that can run one after another
pub trait Sequence {
    type Output;

    fn into_parser(self) -> Parser<Self::Output>;
}

macro_rules! impl_sequence {
    ($($p:ident: $t:ident),+) => {
        impl<$($t: 'static),+> Sequence for ($(Parser<$t>,)+) {
            type Output = ($($t,)+);

            fn into_parser(self) -> Parser<Self::Output> {
                let ($($p,)+) = self;
                let name = [$($p.name()),+].join(" ");
                Parser::from_fn(name, move |ctx| {
                    $(let $p = $p.apply(ctx)?;)+
                    Some(($($p,)+))
                })
            }
        }
    };
}

impl_sequence!(a: A, b: B);
impl_sequence!(a: A, b: B, c: C);
impl_sequence!(a: A, b: B, c: C, d: D);
impl_sequence!(a: A, b: B, c: C, d: D, e: E);
impl_sequence!(a: A, b: B, c: C, d: D, e: E, f: F);
impl_sequence!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
impl_sequence!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);

/// Runs a tuple of two to eight parsers in order and returns the tuple of results.
///
/// ```
/// use parsekit::{scanners, sequence};
///
/// let parser = sequence((scanners::is_char('a'), scanners::string("bc").source()))
///     .map(|(_, bc)| bc);
/// assert_eq!(parser.parse("abc").unwrap(), "bc");
/// ```
pub fn sequence<S: Sequence>(parsers: S) -> Parser<S::Output> {
    parsers.into_parser()
}
