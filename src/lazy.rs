//! Indirection for recursive grammars.

use crate::error::GrammarError;
use crate::parser::Parser;
use once_cell::sync::OnceCell;
use std::sync::Arc;

const UNINITIALIZED: &str = "uninitialized lazy parser reference";

/// A parser that can be used before it is defined.
///
/// Hand out [`Reference::lazy`] while building the grammar, then [`Reference::set`]
/// the real parser exactly once before parsing. A grammar that refers to
/// itself this way forms a reference cycle and is never freed; build such
/// grammars once and keep them.
///
/// ```
/// use parsekit::{Reference, scanners::is_char};
///
/// let nested = Reference::<usize>::new();
/// let parser = nested
///     .lazy()
///     .between(is_char('('), is_char(')'))
///     .map(|depth| depth + 1)
///     .or(parsekit::constant(0));
/// nested.set(parser.clone()).unwrap();
/// assert_eq!(parser.parse("((()))").unwrap(), 3);
/// ```
pub struct Reference<T> {
    cell: Arc<OnceCell<Parser<T>>>,
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Reference {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: 'static> Default for Reference<T> {
    fn default() -> Self {
        Reference::new()
    }
}

impl<T: 'static> Reference<T> {
    pub fn new() -> Self {
        Reference {
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// A parser that delegates to whatever parser is set. Using it before
    /// [`Reference::set`] reports a failure.
    pub fn lazy(&self) -> Parser<T> {
        let cell = Arc::clone(&self.cell);
        Parser::from_fn("lazy", move |ctx| match cell.get() {
            Some(parser) => parser.apply(ctx),
            None => {
                ctx.fail(UNINITIALIZED);
                None
            }
        })
    }

    pub fn set(&self, parser: Parser<T>) -> Result<(), GrammarError> {
        self.cell
            .set(parser)
            .map_err(|_| GrammarError::ReferenceAlreadySet)
    }

    pub fn get(&self) -> Option<&Parser<T>> {
        self.cell.get()
    }
}

/// A parser built by `factory` on first use
pub fn lazy<T, F>(factory: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    let cell = OnceCell::new();
    Parser::from_fn("lazy", move |ctx| cell.get_or_init(&factory).apply(ctx))
}
