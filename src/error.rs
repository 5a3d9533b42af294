use crate::locator::Location;
use crate::parse_tree::ParseTree;
use std::fmt;
use thiserror::Error;

/// Category of a reported failure.
///
/// When two failures happen at the same position the greater kind wins;
/// equal kinds that are mergeable accumulate their reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Raised inside a delimiter, such as whitespace between tokens
    Delimiting,
    /// Something was present that must not be
    Unexpected,
    /// A primitive parser did not find what it looks for
    Missing,
    /// A labeled parser did not match
    Expecting,
    /// An explicit failure, never overridden at the same position
    Failure,
}

impl ErrorKind {
    pub fn is_mergeable(self) -> bool {
        matches!(
            self,
            ErrorKind::Missing | ErrorKind::Expecting | ErrorKind::Delimiting
        )
    }
}

/// What went wrong at the farthest failure position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorDetails {
    /// Character index of the failure
    pub index: usize,
    pub kind: Option<ErrorKind>,
    /// Rendering of the input found at the failure position, `"EOF"` at the end
    pub encountered: String,
    /// Expected items without duplicates, in the order they were reported
    pub expected: Vec<String>,
    pub unexpected: Option<String>,
    pub failure: Option<String>,
}

impl ParseErrorDetails {
    pub(crate) fn new(
        index: usize,
        kind: Option<ErrorKind>,
        reasons: &[String],
        encountered: String,
    ) -> Self {
        let mut details = ParseErrorDetails {
            index,
            kind,
            encountered,
            expected: Vec::new(),
            unexpected: None,
            failure: None,
        };
        match kind {
            Some(ErrorKind::Unexpected) => details.unexpected = reasons.first().cloned(),
            Some(ErrorKind::Failure) => details.failure = reasons.first().cloned(),
            Some(_) => {
                for reason in reasons {
                    if !details.expected.contains(reason) {
                        details.expected.push(reason.clone());
                    }
                }
            }
            None => {}
        }
        details
    }
}

impl fmt::Display for ParseErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.failure {
            return f.write_str(message);
        }
        if let Some((last, rest)) = self.expected.split_last() {
            if !rest.is_empty() {
                write!(f, "{} or ", rest.join(", "))?;
            }
            return write!(f, "{last} expected, {} encountered.", self.encountered);
        }
        let subject = self.unexpected.as_ref().unwrap_or(&self.encountered);
        write!(f, "unexpected {subject}.")
    }
}

/// Error returned by a failed parse.
///
/// Renders as an optional `(module) ` prefix, the location and the message:
///
/// ```text
/// line 1, column 3:
/// c or d expected, x encountered.
/// ```
#[derive(Debug, Clone)]
pub struct ParseError {
    pub module: Option<String>,
    pub location: Location,
    pub details: ParseErrorDetails,
    /// Partial parse tree up to the failure, only built in debug mode
    pub parse_tree: Option<ParseTree>,
}

impl ParseError {
    /// Character index of the failure
    pub fn index(&self) -> usize {
        self.details.index
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "({module}) ")?;
        }
        write!(f, "{}:\n{}", self.location, self.details)
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while assembling a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("token {0} unavailable")]
    UnknownToken(String),
    #[error("parser reference already set")]
    ReferenceAlreadySet,
}
