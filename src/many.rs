use crate::context::ParseContext;
use crate::parser::{Apply, Parser};

/// Parser combinator that matches at least `min` occurrences of the given parser,
/// then as many more as it can.
///
/// Repetition stops at the first iteration that consumes nothing, so a parser
/// that can match the empty input is safe to repeat. A failed iteration is
/// rewound, even when it consumed input, and the repetition succeeds with the
/// occurrences before it.
pub struct AtLeast<T> {
    parser: Parser<T>,
    min: usize,
}

impl<T> AtLeast<T> {
    pub fn new(parser: Parser<T>, min: usize) -> Self {
        AtLeast { parser, min }
    }
}

impl<T: 'static> Apply<Vec<T>> for AtLeast<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<Vec<T>> {
        let mut values = Vec::new();
        for _ in 0..self.min {
            values.push(self.parser.apply(ctx)?);
        }
        loop {
            let (at, step) = (ctx.at, ctx.step);
            let latest_child = ctx.latest_child();
            match self.parser.apply(ctx) {
                Some(value) => {
                    if ctx.step == step || ctx.at == at {
                        ctx.set_at(step, at);
                        ctx.set_latest_child(latest_child);
                        return Some(values);
                    }
                    values.push(value);
                }
                None => {
                    ctx.set_at(step, at);
                    ctx.set_latest_child(latest_child);
                    return Some(values);
                }
            }
        }
    }
}

/// Parser combinator that matches between `min` and `max` occurrences
pub struct Times<T> {
    parser: Parser<T>,
    min: usize,
    max: usize,
}

impl<T: 'static> Apply<Vec<T>> for Times<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<Vec<T>> {
        let mut values = Vec::new();
        for _ in 0..self.min {
            values.push(self.parser.apply(ctx)?);
        }
        for _ in self.min..self.max {
            let (at, step) = (ctx.at, ctx.step);
            let latest_child = ctx.latest_child();
            match self.parser.apply(ctx) {
                Some(value) => values.push(value),
                None => {
                    ctx.set_at(step, at);
                    ctx.set_latest_child(latest_child);
                    break;
                }
            }
        }
        Some(values)
    }
}

/// Convenience function to create a Many parser
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    parser.many()
}

impl<T: 'static> Parser<T> {
    /// Zero or more occurrences
    pub fn many(self) -> Parser<Vec<T>> {
        self.at_least(0)
    }

    /// One or more occurrences
    pub fn many1(self) -> Parser<Vec<T>> {
        self.at_least(1)
    }

    pub fn at_least(self, min: usize) -> Parser<Vec<T>> {
        let name = match min {
            0 => format!("{}*", self),
            1 => format!("{}+", self),
            _ => format!("{}{{{min},}}", self),
        };
        Parser::new(name, AtLeast::new(self, min))
    }

    /// Exactly `n` occurrences
    pub fn times(self, n: usize) -> Parser<Vec<T>> {
        self.times_range(n, n)
    }

    /// Between `min` and `max` occurrences; `max` below `min` is raised to `min`
    pub fn times_range(self, min: usize, max: usize) -> Parser<Vec<T>> {
        let max = max.max(min);
        let name = format!("{}{{{min},{max}}}", self);
        Parser::new(name, Times { parser: self, min, max })
    }

    pub fn skip_many(self) -> Parser<()> {
        self.many().skip()
    }

    pub fn skip_many1(self) -> Parser<()> {
        self.many1().skip()
    }

    pub fn skip_at_least(self, min: usize) -> Parser<()> {
        self.at_least(min).skip()
    }

    pub fn skip_times(self, n: usize) -> Parser<()> {
        self.times(n).skip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{always, constant};
    use crate::scanners::{is_char, string};

    fn a() -> Parser<char> {
        is_char('a').retn('a')
    }

    #[test]
    fn test_many_zero_matches() {
        let parser = many(a()).followed_by(is_char('x'));
        assert_eq!(parser.parse("x").unwrap(), Vec::<char>::new());
    }

    #[test]
    fn test_many_multiple_matches() {
        let parser = a().many();
        assert_eq!(parser.parse("aaa").unwrap(), vec!['a', 'a', 'a']);
    }

    #[test]
    fn test_many1_requires_one() {
        assert!(a().many1().parse("").is_err());
        assert_eq!(a().many1().parse("a").unwrap(), vec!['a']);
    }

    #[test]
    fn test_many_of_zero_width_terminates() {
        assert_eq!(constant(1).many().parse("").unwrap(), Vec::<i32>::new());
        assert!(always().many().followed_by(a()).parse("a").is_ok());
        let optional_a = a().optional();
        assert_eq!(optional_a.many().parse("aa").unwrap(), vec![Some('a'), Some('a')]);
    }

    #[test]
    fn test_partial_iteration_is_rewound() {
        let pair = is_char('a').then(is_char('b').retn('b'));
        let parser = pair.clone().many().followed_by(is_char('a'));
        assert_eq!(parser.parse("aba").unwrap(), vec!['b']);
        let bounded = pair.times_range(0, 3).followed_by(is_char('a'));
        assert_eq!(bounded.parse("aba").unwrap(), vec!['b']);
    }

    #[test]
    fn test_rewound_iteration_keeps_farthest_error() {
        let pair = is_char('a').then(is_char('b'));
        let error = pair.many().parse("aba").unwrap_err();
        assert_eq!(error.index(), 3);
        assert_eq!(error.details.to_string(), "b expected, EOF encountered.");
    }

    #[test]
    fn test_times() {
        assert_eq!(a().times(2).parse("aa").unwrap().len(), 2);
        assert!(a().times(2).parse("a").is_err());
        assert!(a().times(2).parse("aaa").is_err());
        assert_eq!(a().times_range(1, 3).parse("aa").unwrap().len(), 2);
        assert_eq!(a().times_range(2, 1).parse("aa").unwrap().len(), 2);
    }

    #[test]
    fn test_skip_variants() {
        assert!(string("ab").skip_many().parse("ababab").is_ok());
        assert!(string("ab").skip_at_least(2).parse("ab").is_err());
        assert!(a().skip_times(3).parse("aaa").is_ok());
    }
}
