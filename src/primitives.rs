//! Parsers that consume nothing: constants, explicit failures and position queries.

use crate::context::EOF;
use crate::locator::Location;
use crate::parser::Parser;

/// Parser that succeeds with a clone of `value` without consuming input
pub fn constant<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::from_fn("constant", move |_| Some(value.clone()))
}

/// Parser that succeeds with a freshly built value without consuming input
pub fn constant_with<T, F>(make: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Parser::from_fn("constant", move |_| Some(make()))
}

/// Parser that always succeeds without consuming input
pub fn always() -> Parser<()> {
    Parser::from_fn("always", |_| Some(()))
}

/// Parser that always fails without reporting anything
pub fn never<T: 'static>() -> Parser<T> {
    Parser::from_fn("never", |_| None)
}

/// Parser that fails with an unconditional error carrying `message`
pub fn fail<T: 'static>(message: &str) -> Parser<T> {
    let message = message.to_string();
    Parser::from_fn(format!("fail({message})"), move |ctx| {
        ctx.fail(message.as_str());
        None
    })
}

/// Parser that fails reporting `name` as expected
pub fn expect<T: 'static>(name: &str) -> Parser<T> {
    let name = name.to_string();
    Parser::from_fn(name.clone(), move |ctx| {
        ctx.expected(name.as_str());
        None
    })
}

/// Parser that fails reporting `name` as unexpected
pub fn unexpected<T: 'static>(name: &str) -> Parser<T> {
    let name = name.to_string();
    Parser::from_fn(name.clone(), move |ctx| {
        ctx.unexpected(name.as_str());
        None
    })
}

/// Parser that succeeds only at the end of the input, on either level
pub fn eof() -> Parser<()> {
    Parser::from_fn(EOF, |ctx| {
        if ctx.is_eof() {
            Some(())
        } else {
            ctx.missing(EOF);
            None
        }
    })
}

/// Character index of the current position
pub fn index() -> Parser<usize> {
    Parser::from_fn("index", |ctx| Some(ctx.index()))
}

/// Line and column of the current position
pub fn source_location() -> Parser<Location> {
    Parser::from_fn("location", |ctx| Some(ctx.locate(ctx.index())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::scanners::{is_char, string};

    #[test]
    fn test_constant_and_always() {
        assert_eq!(constant(7).parse("").unwrap(), 7);
        assert!(always().parse("").is_ok());
    }

    #[test]
    fn test_never_reports_nothing_of_its_own() {
        let parser = is_char('a').or(never());
        let error = parser.parse("b").unwrap_err();
        assert_eq!(error.details.expected, vec!["a"]);
    }

    #[test]
    fn test_fail_beats_missing_at_same_position() {
        let parser = is_char('a').or(fail("custom"));
        let error = parser.parse("b").unwrap_err();
        assert_eq!(error.details.kind, Some(ErrorKind::Failure));
        assert_eq!(error.to_string(), "line 1, column 1:\ncustom");
    }

    #[test]
    fn test_expect_and_unexpected() {
        let error = expect::<()>("number").parse("x").unwrap_err();
        assert_eq!(error.details.to_string(), "number expected, x encountered.");
        let error = unexpected::<()>("thing").parse("x").unwrap_err();
        assert_eq!(error.details.to_string(), "unexpected thing.");
    }

    #[test]
    fn test_index_and_location() {
        let parser = string("ab\nc").then(index());
        assert_eq!(parser.parse("ab\nc").unwrap(), 4);
        let parser = string("ab\nc").then(source_location());
        assert_eq!(parser.parse("ab\nc").unwrap(), Location::new(2, 2));
    }

    #[test]
    fn test_eof() {
        assert!(eof().parse("").is_ok());
        let error = is_char('a').followed_by(eof()).parse("ab").unwrap_err();
        assert_eq!(error.index(), 1);
    }
}
