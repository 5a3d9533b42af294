//! The execution context threaded through every parser.
//!
//! A context is a cursor over either characters or tokens plus the single
//! farthest-failure slot for the current parse. Parsers advance `at` (the
//! physical position in the context's own input) and `step` (the logical
//! progress counter, bumped only when input is consumed). Backtracking
//! combinators save and restore both.

use crate::error::{ErrorKind, ParseErrorDetails};
use crate::locator::{Location, SourceLocator};
use crate::parse_tree::ParseTree;
use crate::parser::Parser;
use crate::pattern::Source;
use crate::token::Token;
use crate::trace::{NodeId, Trace};
use std::cell::RefCell;
use std::fmt::Debug;

pub(crate) const EOF: &str = "EOF";

const CHARS_ON_TOKENS: &str = "cannot scan characters on tokens: a character-level parser was used as a token-level parser";
const TOKENS_ON_CHARS: &str = "cannot read tokens from characters: a token-level parser was used without a lexer";

#[derive(Debug, Clone, Copy)]
enum Input<'a> {
    Chars { end: usize },
    Tokens { tokens: &'a [Token], end_index: usize },
}

#[derive(Debug, Clone, Default)]
struct ErrorState {
    /// Position in the context's own input
    at: usize,
    /// Character index in the source
    index: usize,
    kind: Option<ErrorKind>,
    reasons: Vec<String>,
    encountered: Option<String>,
    node: Option<NodeId>,
}

impl ErrorState {
    fn starting_at(at: usize) -> Self {
        ErrorState {
            at,
            index: at,
            ..Default::default()
        }
    }
}

pub(crate) struct ParseContext<'a> {
    source: Source<'a>,
    input: Input<'a>,
    pub(crate) at: usize,
    pub(crate) step: usize,
    error: ErrorState,
    suppressed: bool,
    override_kind: Option<ErrorKind>,
    trace: Option<Trace>,
    locator: &'a RefCell<SourceLocator>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn for_chars(source: Source<'a>, locator: &'a RefCell<SourceLocator>) -> Self {
        ParseContext {
            source,
            input: Input::Chars { end: source.len() },
            at: 0,
            step: 0,
            error: ErrorState::default(),
            suppressed: false,
            override_kind: None,
            trace: None,
            locator,
        }
    }

    pub(crate) fn enable_trace(&mut self, root_name: &str) {
        self.trace = Some(Trace::new(root_name, self.index()));
    }

    /// Character index of the current position
    pub(crate) fn index(&self) -> usize {
        self.to_index(self.at)
    }

    fn to_index(&self, pos: usize) -> usize {
        match self.input {
            Input::Chars { .. } => pos,
            Input::Tokens { tokens, end_index } => tokens.get(pos).map_or(end_index, |t| t.index),
        }
    }

    pub(crate) fn is_eof(&self) -> bool {
        match self.input {
            Input::Chars { end } => self.at >= end,
            Input::Tokens { tokens, .. } => self.at >= tokens.len(),
        }
    }

    fn input_name(&self, pos: usize) -> String {
        match self.input {
            Input::Chars { end } if pos < end => self.source[pos].to_string(),
            Input::Tokens { tokens, .. } => tokens
                .get(pos)
                .map_or_else(|| EOF.to_string(), Token::to_string),
            Input::Chars { .. } => EOF.to_string(),
        }
    }

    /// The whole source and the exclusive end of the scannable range.
    /// Reports a failure when the context runs over tokens.
    pub(crate) fn scan_input(&mut self) -> Option<(Source<'a>, usize)> {
        match self.input {
            Input::Chars { end } => Some((self.source, end)),
            Input::Tokens { .. } => {
                self.fail(CHARS_ON_TOKENS);
                None
            }
        }
    }

    /// The token sequence. Reports a failure when the context runs over characters.
    pub(crate) fn token_input(&mut self) -> Option<&'a [Token]> {
        match self.input {
            Input::Tokens { tokens, .. } => Some(tokens),
            Input::Chars { .. } => {
                self.fail(TOKENS_ON_CHARS);
                None
            }
        }
    }

    /// Source text between two character indices
    pub(crate) fn source_text(&self, begin: usize, end: usize) -> String {
        self.source[begin..end].iter().collect()
    }

    pub(crate) fn locate(&self, index: usize) -> Location {
        self.locator.borrow_mut().locate(self.source.chars(), index)
    }

    pub(crate) fn next(&mut self) {
        self.at += 1;
        self.step += 1;
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.at += n;
        if n > 0 {
            self.step += 1;
        }
    }

    pub(crate) fn set_at(&mut self, step: usize, at: usize) {
        self.step = step;
        self.at = at;
    }

    /// Rewinds to `(at, step)` when no logical progress was made since then
    pub(crate) fn still_there(&mut self, at: usize, step: usize) -> bool {
        if self.step == step {
            self.set_at(step, at);
            true
        } else {
            false
        }
    }

    /// Position of the farthest failure, in this context's own input
    pub(crate) fn error_at(&self) -> usize {
        self.error.at
    }

    fn raise(&mut self, kind: ErrorKind, subject: impl Into<String>) {
        if self.suppressed || self.at < self.error.at {
            return;
        }
        let kind = self.override_kind.unwrap_or(kind);
        if self.at == self.error.at {
            match self.error.kind {
                Some(current) if kind < current => return,
                Some(current) if kind == current => {
                    if kind.is_mergeable() {
                        self.error.reasons.push(subject.into());
                    }
                    return;
                }
                _ => {}
            }
        }
        self.set_error_state(self.at, self.index(), kind);
        self.error.reasons.push(subject.into());
    }

    fn set_error_state(&mut self, at: usize, index: usize, kind: ErrorKind) {
        self.error = ErrorState {
            at,
            index,
            kind: Some(kind),
            reasons: Vec::new(),
            encountered: None,
            node: self.trace.as_ref().map(Trace::current),
        };
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.raise(ErrorKind::Failure, message);
    }

    pub(crate) fn missing(&mut self, what: impl Into<String>) {
        self.raise(ErrorKind::Missing, what);
    }

    pub(crate) fn expected(&mut self, what: impl Into<String>) {
        self.raise(ErrorKind::Expecting, what);
    }

    pub(crate) fn unexpected(&mut self, what: impl Into<String>) {
        self.raise(ErrorKind::Unexpected, what);
    }

    /// Runs `parser` with every error report dropped
    pub(crate) fn with_errors_suppressed<T: 'static>(&mut self, parser: &Parser<T>) -> Option<T> {
        let old = std::mem::replace(&mut self.suppressed, true);
        let result = parser.apply(self);
        self.suppressed = old;
        result
    }

    /// Runs `parser` as a delimiter: its errors are downgraded to
    /// [`ErrorKind::Delimiting`] and its logical step is not counted.
    pub(crate) fn apply_as_delimiter<T: 'static>(&mut self, parser: &Parser<T>) -> Option<T> {
        let old = self.override_kind.replace(ErrorKind::Delimiting);
        let step = self.step;
        let result = parser.apply(self);
        if result.is_some() {
            self.step = step;
        }
        self.override_kind = old;
        result
    }

    /// Runs `parser` as a trace node called `name`. A failure that made no
    /// logical progress is reported as `name` expected.
    pub(crate) fn apply_new_node<T: Debug + 'static>(
        &mut self,
        parser: &Parser<T>,
        name: &str,
    ) -> Option<T> {
        let (physical, logical) = (self.at, self.step);
        let latest_child = self.latest_child();
        let begin = self.index();
        if let Some(trace) = self.trace.as_mut() {
            trace.push(name, begin);
        }
        let result = parser.apply(self);
        if result.is_none() && self.still_there(physical, logical) {
            self.expected(name);
        }
        let end = self.index();
        if let Some(trace) = self.trace.as_mut() {
            match &result {
                Some(value) => {
                    trace.set_current_value(format!("{value:?}"));
                    trace.pop(end);
                }
                None => {
                    trace.pop(end);
                    trace.set_latest_child(latest_child);
                }
            }
        }
        result
    }

    /// Runs a token-level `parser` over `tokens`, which were lexed from the
    /// characters before the current position.
    pub(crate) fn apply_on_tokens<T: 'static>(
        &mut self,
        tokens: &[Token],
        parser: &Parser<T>,
    ) -> Option<T> {
        let end_index = self.index();
        let mut trace = self.trace.take();
        if let Some(trace) = trace.as_mut() {
            trace.start_fresh(tokens.first().map_or(end_index, |t| t.index));
        }
        log::trace!(
            "handing {} tokens to {} (input ends at index {})",
            tokens.len(),
            parser,
            end_index
        );
        let nested = ParseContext {
            source: self.source,
            input: Input::Tokens { tokens, end_index },
            at: 0,
            step: 0,
            error: ErrorState::default(),
            suppressed: false,
            override_kind: None,
            trace,
            locator: self.locator,
        };
        self.apply_nested(parser, nested)
    }

    /// Runs a character-level `parser` over exactly `source[from..at]`
    pub(crate) fn apply_on_range<T: 'static>(&mut self, from: usize, parser: &Parser<T>) -> Option<T> {
        let nested = ParseContext {
            source: self.source,
            input: Input::Chars { end: self.at },
            at: from,
            step: 0,
            error: ErrorState::starting_at(from),
            suppressed: false,
            override_kind: None,
            trace: self.trace.take(),
            locator: self.locator,
        };
        self.apply_nested(parser, nested)
    }

    fn apply_nested<T: 'static>(&mut self, parser: &Parser<T>, mut nested: ParseContext<'_>) -> Option<T> {
        let result = parser.apply(&mut nested);
        self.trace = nested.trace.take();
        match result {
            Some(value) => {
                self.step += nested.step;
                Some(value)
            }
            None => {
                self.at = nested.index();
                if !self.suppressed {
                    // copied unconditionally: the nested failure is the real cause even
                    // when the outer level recorded a farther false alarm, e.g. a lexer
                    // probing past the last token
                    let index = nested.error.index;
                    self.error = ErrorState {
                        at: index,
                        index,
                        kind: nested.error.kind,
                        encountered: Some(nested.encountered()),
                        node: nested.error.node,
                        reasons: std::mem::take(&mut nested.error.reasons),
                    };
                }
                None
            }
        }
    }

    pub(crate) fn latest_child(&self) -> Option<NodeId> {
        self.trace.as_ref().and_then(Trace::latest_child)
    }

    pub(crate) fn set_latest_child(&mut self, child: Option<NodeId>) {
        if let Some(trace) = self.trace.as_mut() {
            trace.set_latest_child(child);
        }
    }

    fn encountered(&self) -> String {
        self.error
            .encountered
            .clone()
            .unwrap_or_else(|| self.input_name(self.error.at))
    }

    pub(crate) fn render_error(&self) -> ParseErrorDetails {
        ParseErrorDetails::new(
            self.error.index,
            self.error.kind,
            &self.error.reasons,
            self.encountered(),
        )
    }

    /// Tree of the successful parse so far
    pub(crate) fn build_parse_tree(&mut self) -> Option<ParseTree> {
        let index = self.index();
        let trace = self.trace.as_mut()?;
        let root = trace.freeze(trace.current(), index);
        Some(trace.to_parse_tree(root))
    }

    /// Tree leading to the farthest failure, without the node that failed
    pub(crate) fn build_error_parse_tree(&mut self) -> Option<ParseTree> {
        let node = self.error.node?;
        let index = self.error.index;
        let trace = self.trace.as_mut()?;
        let parent = trace.orphanize(node);
        let root = trace.freeze(parent, index);
        Some(trace.to_parse_tree(root))
    }
}
