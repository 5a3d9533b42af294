use crate::parser::Parser;

impl<T: 'static> Parser<T> {
    /// Repeats this parser as long as `end` does not match, leaving `end`
    /// unconsumed. Fails if `end` never shows up.
    pub fn until<U: 'static>(self, end: Parser<U>) -> Parser<Vec<T>> {
        let name = end.name().to_string();
        end.clone()
            .not_named(&name)
            .then(self)
            .many()
            .followed_by(end.peek())
    }
}

#[cfg(test)]
mod tests {
    use crate::scanners::{any_char, is_char, string};

    #[test]
    fn test_until_stops_before_end() {
        let parser = any_char()
            .source()
            .until(is_char('"'))
            .map(|chars| chars.concat())
            .followed_by(string("\"more"));
        assert_eq!(parser.parse("hello world\"more").unwrap(), "hello world");
    }

    #[test]
    fn test_until_requires_end() {
        let parser = any_char().until(is_char(';'));
        assert!(parser.parse("abc").is_err());
        assert_eq!(any_char().until(is_char(';')).followed_by(is_char(';')).parse(";").unwrap().len(), 0);
    }

    #[test]
    fn test_until_multi_char_end() {
        let parser = any_char().source().until(string("*/")).followed_by(string("*/"));
        assert_eq!(parser.parse("a*b*/").unwrap(), vec!["a", "*", "b"]);
    }
}
