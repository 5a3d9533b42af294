use crate::context::{EOF, ParseContext};
use crate::error::ParseError;
use crate::locator::SourceLocator;
use crate::parse_tree::ParseTree;
use crate::pattern::Source;
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// How a top-level parse runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Production,
    /// Records a trace of labeled parsers so errors carry a partial [`ParseTree`]
    Debug,
}

/// Options for [`Parser::parse_with_options`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: Mode,
    /// Module name rendered in front of error locations
    pub module: Option<String>,
}

impl ParseOptions {
    pub fn new(mode: Mode) -> Self {
        ParseOptions { mode, module: None }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// The step every parser implements.
///
/// On success the context has moved past the consumed input. On failure the
/// position is unspecified and the caller restores it when it backtracks.
pub(crate) trait Apply<T>: Send + Sync {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T>;
}

struct FnApply<F>(F);

impl<T, F> Apply<T> for FnApply<F>
where
    F: Fn(&mut ParseContext<'_>) -> Option<T> + Send + Sync,
{
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        (self.0)(ctx)
    }
}

/// A parser producing values of type `T`.
///
/// Parsers are immutable and cheap to clone; clones share the same
/// implementation. They run over characters or, behind a lexer, over tokens.
pub struct Parser<T> {
    inner: Arc<dyn Apply<T>>,
    name: Arc<str>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<T> fmt::Display for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser").field(&self.name).finish()
    }
}

impl<T: 'static> Parser<T> {
    pub(crate) fn new(name: impl Into<Arc<str>>, apply: impl Apply<T> + 'static) -> Self {
        Parser {
            inner: Arc::new(apply),
            name: name.into(),
        }
    }

    pub(crate) fn from_fn<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>) -> Option<T> + Send + Sync + 'static,
    {
        Parser::new(name, FnApply(f))
    }

    pub(crate) fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        self.inner.apply(ctx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same parser, displayed under another name. Errors are unaffected,
    /// use [`Parser::label`] for that.
    pub fn renamed(self, name: impl Into<Arc<str>>) -> Self {
        Parser {
            inner: self.inner,
            name: name.into(),
        }
    }

    /// Parses the whole of `source`
    pub fn parse(&self, source: &str) -> Result<T, ParseError> {
        self.parse_with_options(source, &ParseOptions::default())
    }

    pub fn parse_with(&self, source: &str, mode: Mode) -> Result<T, ParseError> {
        self.parse_with_options(source, &ParseOptions::new(mode))
    }

    pub fn parse_with_options(&self, source: &str, options: &ParseOptions) -> Result<T, ParseError> {
        self.run(source, options).map(|(value, _)| value)
    }

    /// Parses `source` in debug mode and returns the tree of labeled parsers
    pub fn parse_tree(&self, source: &str) -> Result<ParseTree, ParseError> {
        let (_, tree) = self.run(source, &ParseOptions::new(Mode::Debug))?;
        Ok(tree.unwrap_or_else(|| ParseTree {
            name: "root".to_string(),
            begin: 0,
            end: 0,
            value: None,
            children: Vec::new(),
        }))
    }

    fn run(&self, source: &str, options: &ParseOptions) -> Result<(T, Option<ParseTree>), ParseError> {
        let chars: Vec<char> = source.chars().collect();
        let utf8 = OnceCell::new();
        let locator = RefCell::new(SourceLocator::new());
        let mut ctx = ParseContext::for_chars(Source::new(&chars, &utf8), &locator);
        if options.mode == Mode::Debug {
            ctx.enable_trace("root");
        }

        let result = self.apply(&mut ctx).filter(|_| {
            if ctx.is_eof() {
                true
            } else {
                ctx.missing(EOF);
                false
            }
        });

        match result {
            Some(value) => {
                log::trace!("{} parsed {} characters", self, chars.len());
                Ok((value, ctx.build_parse_tree()))
            }
            None => {
                let details = ctx.render_error();
                let location = ctx.locate(details.index);
                let error = ParseError {
                    module: options.module.clone(),
                    location,
                    details,
                    parse_tree: ctx.build_error_parse_tree(),
                };
                log::debug!("{} failed at index {}: {}", self, error.index(), error.details);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::is_char;

    #[test]
    fn test_parse_requires_full_input() {
        let parser = is_char('a');
        assert!(parser.parse("a").is_ok());

        let error = parser.parse("ab").unwrap_err();
        assert_eq!(error.index(), 1);
        assert_eq!(error.details.expected, vec!["EOF"]);
        assert_eq!(error.to_string(), "line 1, column 2:\nEOF expected, b encountered.");
    }

    #[test]
    fn test_module_prefix() {
        let options = ParseOptions::new(Mode::Production).with_module("m");
        let error = is_char('a').parse_with_options("b", &options).unwrap_err();
        assert!(error.to_string().starts_with("(m) line 1, column 1:"));
        assert!(error.parse_tree.is_none());
    }

    #[test]
    fn test_display_uses_name() {
        let parser = is_char('a').renamed("letter a");
        assert_eq!(parser.to_string(), "letter a");
        assert_eq!(parser.clone().name(), "letter a");
    }
}
