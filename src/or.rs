use crate::context::ParseContext;
use crate::parser::{Apply, Parser};

/// Parser combinator that tries each alternative in order until one succeeds.
///
/// Every alternative starts from the same position, no matter how far a
/// failed one got.
pub struct Or<T> {
    alternatives: Vec<Parser<T>>,
}

impl<T> Or<T> {
    pub fn new(alternatives: Vec<Parser<T>>) -> Self {
        Or { alternatives }
    }
}

impl<T: 'static> Apply<T> for Or<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        let (at, step) = (ctx.at, ctx.step);
        let latest_child = ctx.latest_child();
        for alternative in &self.alternatives {
            if let Some(value) = alternative.apply(ctx) {
                return Some(value);
            }
            ctx.set_at(step, at);
            ctx.set_latest_child(latest_child);
        }
        None
    }
}

/// Parser combinator that runs `fallback` only when `parser` failed without
/// getting past its starting position
pub struct Otherwise<T> {
    parser: Parser<T>,
    fallback: Parser<T>,
}

impl<T: 'static> Apply<T> for Otherwise<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        let (at, step) = (ctx.at, ctx.step);
        let latest_child = ctx.latest_child();
        if let Some(value) = self.parser.apply(ctx) {
            return Some(value);
        }
        if ctx.error_at() > at {
            return None;
        }
        ctx.set_at(step, at);
        ctx.set_latest_child(latest_child);
        self.fallback.apply(ctx)
    }
}

/// Convenience function to create an Or parser over two alternatives
pub fn or<T: 'static>(first: Parser<T>, second: Parser<T>) -> Parser<T> {
    first.or(second)
}

/// First successful alternative. An empty list never succeeds.
pub fn or_all<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    match alternatives.len() {
        0 => crate::primitives::never(),
        1 => alternatives.into_iter().next().unwrap_or_else(crate::primitives::never),
        _ => {
            let name = alternatives
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(" | ");
            Parser::new(name, Or::new(alternatives))
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        or_all(vec![self, other])
    }

    /// Like [`Parser::or`], but gives up if this parser's failure got past
    /// the starting position
    pub fn otherwise(self, fallback: Parser<T>) -> Parser<T> {
        let name = format!("{} | {}", self, fallback);
        Parser::new(name, Otherwise { parser: self, fallback })
    }

    /// `Some` result, or `None` without consuming input
    pub fn optional(self) -> Parser<Option<T>> {
        let name = format!("{}?", self);
        self.map(Some).or(crate::primitives::constant_with(|| None)).renamed(name)
    }

    /// The result, or a clone of `default` without consuming input
    pub fn optional_or(self, default: T) -> Parser<T>
    where
        T: Clone + Send + Sync,
    {
        self.or(crate::primitives::constant(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{always, never};
    use crate::scanners::{is_char, string};

    #[test]
    fn test_or_first_succeeds() {
        let parser = or(is_char('a').retn('a'), is_char('b').retn('b'));
        assert_eq!(parser.parse("a").unwrap(), 'a');
    }

    #[test]
    fn test_or_second_succeeds() {
        let parser = or(is_char('a').retn('a'), is_char('b').retn('b'));
        assert_eq!(parser.parse("b").unwrap(), 'b');
    }

    #[test]
    fn test_or_backtracks_partial_match() {
        let parser = string("ab").then(is_char('c')).or(string("abd"));
        assert!(parser.parse("abd").is_ok());
    }

    #[test]
    fn test_or_reports_farthest_failure() {
        let parser = or_all(vec![
            is_char('x'),
            is_char('a').then(is_char('b')).then(is_char('c')),
            is_char('a').then(is_char('b')).then(is_char('d')),
        ]);
        let error = parser.parse("abx").unwrap_err();
        assert_eq!(error.index(), 2);
        assert_eq!(error.details.to_string(), "c or d expected, x encountered.");
    }

    #[test]
    fn test_or_never_identity() {
        let parser = string("ab").source().or(never());
        assert_eq!(parser.parse("ab").unwrap(), "ab");
        assert_eq!(
            parser.parse("ax").unwrap_err().to_string(),
            string("ab").source().parse("ax").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_or_always_never_fails() {
        let parser = is_char('a').or(always());
        assert!(parser.parse("").is_ok());
        assert!(or_all::<()>(Vec::new()).parse("").is_err());
    }

    #[test]
    fn test_otherwise_only_without_progress() {
        let parser = is_char('a').then(is_char('b')).otherwise(is_char('a'));
        assert!(parser.parse("a").is_err());
        let parser = is_char('a').then(is_char('b')).otherwise(is_char('c'));
        assert!(parser.parse("c").is_ok());
    }
}
