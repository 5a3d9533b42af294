//! Character-level parsers.
//!
//! Scanners recognize characters and produce nothing, or the matched text
//! via [`Parser::source`]. Running one over tokens reports a failure.

use crate::and::sequence;
use crate::char_predicate::{self, CharPredicate};
use crate::context::ParseContext;
use crate::parser::{Apply, Parser};
use crate::pattern::{self, Pattern};

impl Pattern {
    /// Scanner consuming whatever this pattern matches, reporting `name` as
    /// missing on a mismatch
    pub fn to_scanner(self, name: &str) -> Parser<()> {
        let name = name.to_string();
        Parser::from_fn(name.clone(), move |ctx| {
            let (source, end) = ctx.scan_input()?;
            match self.matches_in(source, ctx.at, end) {
                Some(length) => {
                    ctx.advance(length);
                    Some(())
                }
                None => {
                    ctx.missing(name.as_str());
                    None
                }
            }
        })
    }
}

/// One character satisfying `predicate`
pub fn satisfy(predicate: CharPredicate) -> Parser<()> {
    let name = predicate.name().to_string();
    Parser::from_fn(name.clone(), move |ctx| {
        let (source, end) = ctx.scan_input()?;
        if ctx.at < end && predicate.test(source[ctx.at]) {
            ctx.next();
            Some(())
        } else {
            ctx.missing(name.as_str());
            None
        }
    })
}

pub fn is_char(c: char) -> Parser<()> {
    satisfy(char_predicate::is_char(c))
}

pub fn not_char(c: char) -> Parser<()> {
    satisfy(char_predicate::not_char(c))
}

pub fn among(chars: &str) -> Parser<()> {
    let mut iter = chars.chars();
    match (iter.next(), iter.next()) {
        (None, _) => satisfy(char_predicate::never()),
        (Some(c), None) => is_char(c),
        _ => satisfy(char_predicate::among(chars)),
    }
}

pub fn not_among(chars: &str) -> Parser<()> {
    let mut iter = chars.chars();
    match (iter.next(), iter.next()) {
        (None, _) => any_char(),
        (Some(c), None) => not_char(c),
        _ => satisfy(char_predicate::not_among(chars)),
    }
}

pub fn any_char() -> Parser<()> {
    satisfy(char_predicate::always())
}

pub fn digit() -> Parser<()> {
    satisfy(char_predicate::is_digit())
}

pub fn letter() -> Parser<()> {
    satisfy(char_predicate::is_letter())
}

pub fn string(s: &str) -> Parser<()> {
    pattern::string(s).to_scanner(s)
}

pub fn string_case_insensitive(s: &str) -> Parser<()> {
    pattern::string_case_insensitive(s).to_scanner(s)
}

/// Zero or more characters satisfying `predicate`
pub fn many(predicate: CharPredicate) -> Parser<()> {
    let name = format!("{predicate}*");
    pattern::many(predicate).to_scanner(&name)
}

/// One or more characters satisfying `predicate`
pub fn many1(predicate: CharPredicate) -> Parser<()> {
    let name = format!("{predicate}+");
    pattern::many1(predicate).to_scanner(&name)
}

/// One or more whitespace characters
pub fn whitespaces() -> Parser<()> {
    pattern::many1(char_predicate::is_whitespace()).to_scanner("whitespaces")
}

/// `begin` and everything after it up to the end of the line
pub fn line_comment(begin: &str) -> Parser<()> {
    pattern::line_comment(begin).to_scanner(begin)
}

/// Non-nesting comment from `begin` to the first `end`
pub fn block_comment(begin: &str, end: &str) -> Parser<()> {
    pattern::string(begin)
        .next(pattern::not_string(end).many())
        .to_scanner(begin)
        .then(string(end))
}

/// Non-nesting comment built from parsers; `commented` is repeated until `end`
pub fn block_comment_with<B, E, C>(begin: Parser<B>, end: Parser<E>, commented: Parser<C>) -> Parser<()>
where
    B: 'static,
    E: 'static,
    C: 'static,
{
    sequence((begin, end.clone().not().then(commented).skip_many(), end)).skip()
}

pub fn java_line_comment() -> Parser<()> {
    line_comment("//")
}

pub fn sql_line_comment() -> Parser<()> {
    line_comment("--")
}

pub fn haskell_line_comment() -> Parser<()> {
    line_comment("--")
}

pub fn java_block_comment() -> Parser<()> {
    block_comment("/*", "*/")
}

pub fn sql_block_comment() -> Parser<()> {
    block_comment("/*", "*/")
}

pub fn haskell_block_comment() -> Parser<()> {
    block_comment("{-", "-}")
}

/// Whitespace and Java style comments, possibly none
pub fn java_delimiter() -> Parser<()> {
    crate::or::or_all(vec![whitespaces(), java_line_comment(), java_block_comment()]).skip_many()
}

/// Whitespace and SQL style comments, possibly none
pub fn sql_delimiter() -> Parser<()> {
    crate::or::or_all(vec![whitespaces(), sql_line_comment(), sql_block_comment()]).skip_many()
}

/// Whitespace and Haskell style comments, possibly none
pub fn haskell_delimiter() -> Parser<()> {
    crate::or::or_all(vec![whitespaces(), haskell_line_comment(), haskell_block_comment()])
        .skip_many()
}

/// Parser combinator for comments that may contain nested comments
pub struct NestableBlockComment<B, E, C> {
    open: Parser<B>,
    close: Parser<E>,
    commented: Parser<C>,
}

impl<B: 'static, E: 'static, C: 'static> Apply<()> for NestableBlockComment<B, E, C> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<()> {
        self.open.apply(ctx)?;
        let mut level = 1usize;
        while level > 0 {
            let (at, step) = (ctx.at, ctx.step);
            if self.close.apply(ctx).is_some() {
                if ctx.at == at {
                    ctx.fail("closing comment scanner not consuming input");
                    return None;
                }
                level -= 1;
                continue;
            }
            if !ctx.still_there(at, step) {
                return None;
            }
            if self.open.apply(ctx).is_some() {
                if ctx.at == at {
                    ctx.fail("opening comment scanner not consuming input");
                    return None;
                }
                level += 1;
                continue;
            }
            if !ctx.still_there(at, step) {
                return None;
            }
            self.commented.apply(ctx)?;
            if ctx.at == at {
                ctx.fail("commented scanner not consuming input");
                return None;
            }
        }
        Some(())
    }
}

/// Comment from `begin` to the matching `end`, where comments may nest
pub fn nestable_block_comment(begin: &str, end: &str) -> Parser<()> {
    nestable_block_comment_with(string(begin), string(end), any_char())
}

pub fn nestable_block_comment_with<B, E, C>(
    begin: Parser<B>,
    end: Parser<E>,
    commented: Parser<C>,
) -> Parser<()>
where
    B: 'static,
    E: 'static,
    C: 'static,
{
    Parser::new(
        "nestable block comment",
        NestableBlockComment {
            open: begin,
            close: end,
            commented,
        },
    )
}

/// Text from `begin` to the next `end`, quotes included
pub fn quoted(begin: char, end: char) -> Parser<String> {
    pattern::is_char(begin)
        .next(pattern::many(char_predicate::not_char(end)))
        .to_scanner(&begin.to_string())
        .then(is_char(end))
        .source()
}

/// `'...'` where `''` stands for a quote, quotes included
pub fn single_quote_string() -> Parser<String> {
    pattern::not_string("'")
        .or(pattern::string("''"))
        .many()
        .to_scanner("quoted string")
        .between(is_char('\''), is_char('\''))
        .source()
}

/// `"..."` with backslash escapes, quotes included
pub fn double_quote_string() -> Parser<String> {
    pattern::escaped()
        .or(pattern::satisfies(char_predicate::not_char('"')))
        .many()
        .to_scanner("quoted string")
        .between(is_char('"'), is_char('"'))
        .source()
}

/// `'c'` with backslash escapes, quotes included
pub fn single_quote_char() -> Parser<String> {
    pattern::escaped()
        .or(pattern::satisfies(char_predicate::not_char('\'')))
        .to_scanner("quoted char")
        .between(is_char('\''), is_char('\''))
        .source()
}

pub fn identifier() -> Parser<String> {
    pattern::word().to_scanner("word").source()
}

pub fn integer() -> Parser<String> {
    pattern::integer().to_scanner("integer").source()
}

pub fn decimal() -> Parser<String> {
    pattern::decimal().to_scanner("decimal").source()
}

pub fn dec_integer() -> Parser<String> {
    pattern::dec_integer().to_scanner("decimal integer").source()
}

pub fn oct_integer() -> Parser<String> {
    pattern::oct_integer().to_scanner("octal integer").source()
}

pub fn hex_integer() -> Parser<String> {
    pattern::hex_integer().to_scanner("hexadecimal integer").source()
}

pub fn scientific_notation() -> Parser<String> {
    pattern::scientific_notation()
        .to_scanner("scientific notation")
        .source()
}

/// Runs `inner` over exactly the characters matched by `outer`.
///
/// `inner` does not have to consume all of them; the position after a
/// success is always the end of the `outer` match.
pub fn nested_scanner<O: 'static>(outer: Parser<O>, inner: Parser<()>) -> Parser<()> {
    Parser::from_fn("nested scanner", move |ctx| {
        ctx.scan_input()?;
        let from = ctx.at;
        outer.apply(ctx)?;
        ctx.apply_on_range(from, &inner)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::primitives::eof;

    #[test]
    fn test_is_char_reports_missing() {
        let error = is_char('a').parse("b").unwrap_err();
        assert_eq!(error.details.kind, Some(ErrorKind::Missing));
        assert_eq!(error.details.to_string(), "a expected, b encountered.");
        let error = is_char('a').parse("").unwrap_err();
        assert_eq!(error.details.encountered, "EOF");
    }

    #[test]
    fn test_among() {
        assert!(among("+-").parse("-").is_ok());
        assert!(among("").parse("a").is_err());
        assert!(not_among("xy").parse("a").is_ok());
        assert!(not_among("").parse("a").is_ok());
    }

    #[test]
    fn test_string_scanners() {
        assert!(string("foo").parse("foo").is_ok());
        assert_eq!(string("foo").parse("fob").unwrap_err().index(), 0);
        assert!(string_case_insensitive("select").parse("SeLeCt").is_ok());
    }

    #[test]
    fn test_comments() {
        assert!(java_line_comment().parse("// hi").is_ok());
        assert!(java_block_comment().parse("/* a * b */").is_ok());
        assert!(java_block_comment().parse("/* open").is_err());
        assert!(haskell_block_comment().parse("{- x -}").is_ok());
        assert!(block_comment_with(string("<!--"), string("-->"), any_char()).parse("<!-- x -->").is_ok());
    }

    #[test]
    fn test_nestable_block_comment() {
        let comment = nestable_block_comment("/*", "*/");
        assert!(comment.parse("/* a /* b */ c */").is_ok());
        assert!(comment.parse("/* a /* b */").is_err());
    }

    #[test]
    fn test_nestable_block_comment_zero_width_fails() {
        let comment = nestable_block_comment_with(string("("), string(")"), eof());
        let error = comment.parse("(").unwrap_err();
        assert_eq!(error.details.kind, Some(ErrorKind::Failure));
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(single_quote_string().parse("'it''s'").unwrap(), "'it''s'");
        assert_eq!(double_quote_string().parse(r#""a\"b""#).unwrap(), r#""a\"b""#);
        assert_eq!(single_quote_char().parse(r"'\n'").unwrap(), r"'\n'");
        assert_eq!(quoted('<', '>').parse("<abc>").unwrap(), "<abc>");
    }

    #[test]
    fn test_number_scanners() {
        assert_eq!(integer().parse("0123").unwrap(), "0123");
        assert_eq!(decimal().parse("1.5").unwrap(), "1.5");
        assert_eq!(hex_integer().parse("0xFF").unwrap(), "0xFF");
        assert_eq!(oct_integer().parse("017").unwrap(), "017");
        assert!(dec_integer().parse("017").is_err());
        assert_eq!(scientific_notation().parse("1.5e-3").unwrap(), "1.5e-3");
        assert_eq!(identifier().parse("_foo1").unwrap(), "_foo1");
    }

    #[test]
    fn test_delimiters() {
        let parser = java_delimiter().then(identifier());
        assert_eq!(parser.parse("  // c\n /* d */ x").unwrap(), "x");
        assert_eq!(parser.parse("x").unwrap(), "x");
        let parser = haskell_delimiter().then(identifier());
        assert_eq!(parser.parse("-- c\n{- d -} y").unwrap(), "y");
    }

    #[test]
    fn test_nested_scanner() {
        let parser = nested_scanner(quoted('"', '"'), is_char('"').then(string("ab")));
        assert!(parser.parse("\"abc\"").is_ok());
        let parser = nested_scanner(quoted('"', '"'), is_char('"').then(string("abcd")));
        assert!(parser.parse("\"ab\"cd").is_err());
    }
}
