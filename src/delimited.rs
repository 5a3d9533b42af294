//! Repetition separated or terminated by a delimiter.
//!
//! Delimiters run as delimiters: their errors rank below every other kind and
//! the input they consume does not count as logical progress.

use crate::context::ParseContext;
use crate::parser::{Apply, Parser};
use crate::primitives::constant_with;

/// Parser combinator for the tail of `p (delim p)* delim?`.
///
/// Stops when the delimiter fails, when the element after a delimiter fails
/// (keeping the trailing delimiter) or when a delimiter-element pair consumed
/// no characters at all.
pub struct Delimited<T, D> {
    parser: Parser<T>,
    delimiter: Parser<D>,
}

impl<T, D> Delimited<T, D> {
    pub fn new(parser: Parser<T>, delimiter: Parser<D>) -> Self {
        Delimited { parser, delimiter }
    }
}

impl<T: 'static, D: 'static> Apply<Vec<T>> for Delimited<T, D> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<Vec<T>> {
        let mut values = Vec::new();
        loop {
            let (at0, step0) = (ctx.at, ctx.step);
            if ctx.apply_as_delimiter(&self.delimiter).is_none() {
                ctx.set_at(step0, at0);
                return Some(values);
            }
            let (at1, step1) = (ctx.at, ctx.step);
            let Some(value) = self.parser.apply(ctx) else {
                ctx.set_at(step1, at1);
                return Some(values);
            };
            // physical comparison: delimiters may legitimately match nothing
            if ctx.at == at0 {
                return Some(values);
            }
            values.push(value);
        }
    }
}

fn prepend<T>((first, mut rest): (T, Vec<T>)) -> Vec<T> {
    rest.insert(0, first);
    rest
}

impl<T: 'static> Parser<T> {
    /// Runs this parser as a delimiter
    pub fn as_delimiter(self) -> Parser<T> {
        let name = self.name().to_string();
        Parser::from_fn(name, move |ctx| ctx.apply_as_delimiter(&self))
    }

    /// One or more occurrences separated by `delimiter`
    pub fn sep_by1<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        let rest = delimiter.as_delimiter().then(self.clone()).many();
        self.and(rest).map(prepend)
    }

    /// Zero or more occurrences separated by `delimiter`
    pub fn sep_by<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        self.sep_by1(delimiter).or(constant_with(Vec::new))
    }

    /// One or more occurrences, each followed by `delimiter`
    pub fn end_by1<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        self.followed_by(delimiter.as_delimiter()).many1()
    }

    /// Zero or more occurrences, each followed by `delimiter`
    pub fn end_by<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        self.followed_by(delimiter.as_delimiter()).many()
    }

    /// One or more occurrences separated and optionally ended by `delimiter`
    pub fn sep_end_by1<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        let name = format!("{} sep_end_by1 {}", self, delimiter);
        let rest = Parser::new(name, Delimited::new(self.clone(), delimiter));
        self.and(rest).map(prepend)
    }

    /// Zero or more occurrences separated and optionally ended by `delimiter`
    pub fn sep_end_by<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<T>> {
        self.sep_end_by1(delimiter).or(constant_with(Vec::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::primitives::always;
    use crate::scanners::{digit, is_char};

    fn number() -> Parser<String> {
        digit().many1().source()
    }

    #[test]
    fn test_sep_by() {
        let parser = number().sep_by(is_char(','));
        assert_eq!(parser.parse("1,22,3").unwrap(), vec!["1", "22", "3"]);
        assert_eq!(parser.parse("").unwrap(), Vec::<String>::new());
        assert!(parser.parse("1,").is_err());
    }

    #[test]
    fn test_sep_by1_requires_one() {
        assert!(number().sep_by1(is_char(',')).parse("").is_err());
    }

    #[test]
    fn test_end_by() {
        let parser = number().end_by(is_char(';'));
        assert_eq!(parser.parse("1;2;").unwrap(), vec!["1", "2"]);
        assert!(parser.parse("1;2").is_err());
        assert!(number().end_by1(is_char(';')).parse("").is_err());
    }

    #[test]
    fn test_sep_end_by_allows_trailing_delimiter() {
        let parser = number().sep_end_by(is_char(','));
        assert_eq!(parser.parse("1,2,").unwrap(), vec!["1", "2"]);
        assert_eq!(parser.parse("1,2").unwrap(), vec!["1", "2"]);
        assert_eq!(parser.parse("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_zero_width_delimiter_is_not_a_loop() {
        let parser = number().sep_end_by(always());
        assert_eq!(parser.parse("12").unwrap(), vec!["12"]);
        let letters = is_char('a').source().sep_end_by(always());
        assert_eq!(letters.parse("aaa").unwrap(), vec!["a", "a", "a"]);
    }

    #[test]
    fn test_zero_width_element_after_delimiter_stops() {
        let parser = number().optional().sep_end_by1(always());
        assert_eq!(parser.parse("1").unwrap(), vec![Some("1".to_string())]);
    }

    #[test]
    fn test_delimiter_errors_rank_lowest() {
        let parser = is_char('n')
            .sep_by1(is_char(','))
            .followed_by(is_char(';').or(is_char('.')));
        let error = parser.parse("nx").unwrap_err();
        assert_eq!(error.details.kind, Some(ErrorKind::Missing));
        assert_eq!(error.details.expected, vec![";", "."]);
    }
}
