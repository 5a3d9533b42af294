use crate::context::ParseContext;
use crate::parser::{Apply, Parser};
use std::fmt::Debug;

/// Parser combinator that names a parser.
///
/// When the parser fails without consuming input, the failure is reported as
/// the name expected, replacing whatever the parser reported at that position.
/// The name also becomes a node of the parse tree in debug mode.
pub struct Label<T> {
    parser: Parser<T>,
    name: String,
}

impl<T> Label<T> {
    pub fn new(parser: Parser<T>, name: impl Into<String>) -> Self {
        Label {
            parser,
            name: name.into(),
        }
    }
}

impl<T: Debug + 'static> Apply<T> for Label<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        ctx.apply_new_node(&self.parser, &self.name)
    }
}

/// Convenience function to create a Label parser
pub fn label<T: Debug + 'static>(parser: Parser<T>, name: &str) -> Parser<T> {
    parser.label(name)
}

impl<T: Debug + 'static> Parser<T> {
    pub fn label(self, name: &str) -> Parser<T> {
        Parser::new(name, Label::new(self, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Mode;
    use crate::scanners::{digit, is_char};

    fn number() -> Parser<String> {
        digit().many1().source().label("number")
    }

    #[test]
    fn test_label_replaces_missing() {
        let error = number().parse("x").unwrap_err();
        assert_eq!(error.details.to_string(), "number expected, x encountered.");
    }

    #[test]
    fn test_label_keeps_farther_errors() {
        let parser = is_char('(').then(number()).followed_by(is_char(')')).label("group");
        let error = parser.parse("(12").unwrap_err();
        assert_eq!(error.index(), 3);
        assert_eq!(error.details.expected.last().map(String::as_str), Some(")"));
        let error = parser.parse("(x").unwrap_err();
        assert_eq!(error.details.expected, vec!["number"]);
    }

    #[test]
    fn test_label_builds_tree_nodes() {
        let parser = number().followed_by(is_char('+')).and(number()).label("sum");
        let tree = parser.parse_tree("1+23").unwrap();
        let sum = tree.child("sum").unwrap();
        assert_eq!((sum.begin, sum.end), (0, 4));
        assert_eq!(sum.children.len(), 2);
        assert_eq!(sum.children[1].value.as_deref(), Some("\"23\""));
        assert_eq!((sum.children[1].begin, sum.children[1].end), (2, 4));
    }

    #[test]
    fn test_error_tree_drops_failed_node() {
        let parser = number().followed_by(is_char('+')).and(number()).label("sum");
        let error = parser.parse_with("1+", Mode::Debug).unwrap_err();
        let tree = error.parse_tree.unwrap();
        let sum = tree.child("sum").unwrap();
        assert_eq!(sum.children.len(), 1);
        assert_eq!(sum.children[0].value.as_deref(), Some("\"1\""));
        assert_eq!(sum.value, None);
    }
}
