use crate::parser::Parser;

/// Runs `open`, then `parser`, then `close`, and keeps only the result of `parser`
pub fn between<O, T, C>(open: Parser<O>, parser: Parser<T>, close: Parser<C>) -> Parser<T>
where
    O: 'static,
    T: 'static,
    C: 'static,
{
    open.then(parser).followed_by(close)
}

impl<T: 'static> Parser<T> {
    /// This parser enclosed by `open` and `close`
    pub fn between<O: 'static, C: 'static>(self, open: Parser<O>, close: Parser<C>) -> Parser<T> {
        between(open, self, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{digit, is_char, string};

    fn number() -> Parser<i64> {
        digit()
            .many1()
            .source()
            .try_map(|s| s.parse::<i64>())
    }

    #[test]
    fn test_brackets_number() {
        let parser = between(is_char('['), number(), is_char(']'));
        assert_eq!(parser.parse("[42]").unwrap(), 42);
    }

    #[test]
    fn test_parentheses_string() {
        let parser = string("hello").source().between(is_char('('), is_char(')'));
        assert_eq!(parser.parse("(hello)").unwrap(), "hello");
    }

    #[test]
    fn test_missing_open_delimiter_fails() {
        let error = number().between(is_char('{'), is_char('}')).parse("42}").unwrap_err();
        assert_eq!(error.index(), 0);
        assert_eq!(error.details.expected, vec!["{"]);
    }

    #[test]
    fn test_missing_close_delimiter_fails() {
        let error = number().between(is_char('{'), is_char('}')).parse("{42").unwrap_err();
        assert_eq!(error.index(), 3);
    }
}
