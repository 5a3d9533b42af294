//! # parsekit - Parser Combinators
//!
//! Parsers built from small pieces, with backtracking alternatives and
//! error messages that point at the farthest place any alternative got to.
//!
//! Parsing happens on two levels. Scanners work directly on characters.
//! Token-level parsers work on the tokens a lexer produced from those
//! characters, and report errors in terms of the original source. On top of
//! that the library provides:
//!
//! - **Lexicons**: operators, keywords and words turned into tokens, with
//!   overlapping operators tried longest first
//! - **Operator tables**: expression parsers from operator precedences
//! - **Indentation**: INDENT / OUTDENT tokens for off-side rule languages
//! - **Parse trees**: a tree of labeled parsers, for successful parses and
//!   up to the point of failure
//!
//! ```
//! use parsekit::scanners::{digit, is_char};
//!
//! let number = digit().many1().source().label("number");
//! let list = number.sep_by(is_char(',')).between(is_char('['), is_char(']'));
//! assert_eq!(list.parse("[1,22]").unwrap(), vec!["1", "22"]);
//!
//! let error = list.parse("[1,x]").unwrap_err();
//! assert_eq!(error.to_string(), "line 1, column 4:\nnumber expected, x encountered.");
//! ```

pub mod and;
pub mod atomic;
pub mod best;
pub mod between;
pub mod char_predicate;
mod context;
pub mod delimited;
pub mod error;
pub mod indentation;
pub mod infix;
pub mod keywords;
pub mod label;
pub mod lazy;
pub mod lexicon;
pub mod literals;
pub mod locator;
pub mod many;
pub mod map;
pub mod nested;
pub mod not;
pub mod operator_table;
pub mod operators;
pub mod or;
pub mod parse_tree;
pub mod parser;
pub mod pattern;
pub mod position;
pub mod primitives;
pub mod scanners;
pub mod terminals;
pub mod token;
pub mod tokens;
mod trace;
pub mod until;

pub use and::{Sequence, and, list, sequence};
pub use atomic::atomic;
pub use best::{longest, shortest};
pub use between::between;
pub use char_predicate::CharPredicate;
pub use error::{ErrorKind, GrammarError, ParseError, ParseErrorDetails};
pub use indentation::Indentation;
pub use infix::{Binary, Unary};
pub use label::label;
pub use lazy::{Reference, lazy};
pub use lexicon::Lexicon;
pub use locator::{Location, SourceLocator};
pub use operator_table::{Associativity, OperatorTable};
pub use or::{or, or_all};
pub use parse_tree::ParseTree;
pub use parser::{Mode, ParseOptions, Parser};
pub use pattern::Pattern;
pub use position::{Span, WithSource};
pub use primitives::{
    always, constant, constant_with, eof, expect, fail, index, never, source_location, unexpected,
};
pub use terminals::{Terminals, TerminalsBuilder};
pub use token::{Fragment, Punctuation, ScientificNotation, Tag, Token, TokenValue};
