use crate::context::ParseContext;
use crate::parser::{Apply, Parser};

/// Parser combinator that turns a partial match into a clean failure.
///
/// On failure the position is rewound to where the parser started, so
/// enclosing repetitions and alternatives see no consumed input. On success
/// the whole match counts as a single logical step.
pub struct Atomic<T> {
    parser: Parser<T>,
}

impl<T> Atomic<T> {
    pub fn new(parser: Parser<T>) -> Self {
        Atomic { parser }
    }
}

impl<T: 'static> Apply<T> for Atomic<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        let (at, step) = (ctx.at, ctx.step);
        match self.parser.apply(ctx) {
            Some(value) => {
                ctx.step = step + 1;
                Some(value)
            }
            None => {
                ctx.set_at(step, at);
                None
            }
        }
    }
}

/// Convenience function to create an Atomic parser
pub fn atomic<T: 'static>(parser: Parser<T>) -> Parser<T> {
    parser.atomic()
}

impl<T: 'static> Parser<T> {
    pub fn atomic(self) -> Parser<T> {
        let name = self.name().to_string();
        Parser::new(name, Atomic::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{is_char, string};

    #[test]
    fn test_atomic_success_counts_one_step() {
        let parser = atomic(is_char('a').then(is_char('b'))).then(is_char('c'));
        assert!(parser.parse("abc").is_ok());
    }

    #[test]
    fn test_atomic_rewinds_on_failure() {
        let pair = is_char('a').then(is_char('b'));
        let parser = pair.clone().atomic().or(string("ac"));
        assert!(parser.parse("ac").is_ok());
        let parser = pair.atomic().otherwise(string("ac"));
        assert!(parser.parse("ac").is_err());
    }

    #[test]
    fn test_atomic_keeps_farthest_error() {
        let parser = is_char('a').then(is_char('b')).atomic();
        let error = parser.parse("ax").unwrap_err();
        assert_eq!(error.index(), 1);
        assert_eq!(error.details.expected, vec!["b"]);
    }
}
