use crate::parser::Parser;

/// Character range `[begin, end)` of the source covered by a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Span { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// A value together with the source text it was parsed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithSource<T> {
    pub value: T,
    pub source: String,
}

impl<T: 'static> Parser<T> {
    /// Pairs the result with the span it covers.
    ///
    /// On tokens the span runs from the first consumed token to the start of
    /// the next one.
    pub fn spanned(self) -> Parser<(T, Span)> {
        let name = self.name().to_string();
        Parser::from_fn(name, move |ctx| {
            let begin = ctx.index();
            let value = self.apply(ctx)?;
            Some((value, Span::new(begin, ctx.index())))
        })
    }

    /// The source text matched, instead of the result
    pub fn source(self) -> Parser<String> {
        let name = self.name().to_string();
        Parser::from_fn(name, move |ctx| {
            let begin = ctx.index();
            self.apply(ctx)?;
            Some(ctx.source_text(begin, ctx.index()))
        })
    }

    pub fn with_source(self) -> Parser<WithSource<T>> {
        let name = self.name().to_string();
        Parser::from_fn(name, move |ctx| {
            let begin = ctx.index();
            let value = self.apply(ctx)?;
            let source = ctx.source_text(begin, ctx.index());
            Some(WithSource { value, source })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{is_char, string, whitespaces};

    #[test]
    fn test_spanned() {
        let parser = whitespaces().optional().then(string("abc").spanned());
        let ((), span) = parser.parse("  abc").unwrap();
        assert_eq!(span, Span::new(2, 5));
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_source_of_zero_width() {
        let parser = is_char('x').optional().source();
        assert_eq!(parser.parse("").unwrap(), "");
    }

    #[test]
    fn test_with_source() {
        let parser = is_char('a').many().map(|v| v.len()).with_source();
        let parsed = parser.parse("aaa").unwrap();
        assert_eq!(parsed.value, 3);
        assert_eq!(parsed.source, "aaa");
    }
}
