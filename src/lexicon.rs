//! A tokenizer paired with the lookup that names its reserved words.

use crate::error::GrammarError;
use crate::and::list;
use crate::or::or_all;
use crate::parser::Parser;
use crate::token::{Token, TokenValue};
use crate::tokens::token_with_value;
use std::fmt;
use std::sync::Arc;

pub(crate) type WordLookup = Arc<dyn Fn(&str) -> Option<TokenValue> + Send + Sync>;

/// A tokenizer together with the token value each of its named words
/// produces. Token-level parsers for those words are looked up by name.
#[derive(Clone)]
pub struct Lexicon {
    words: WordLookup,
    tokenizer: Parser<TokenValue>,
}

impl Lexicon {
    pub fn new<F>(words: F, tokenizer: Parser<TokenValue>) -> Self
    where
        F: Fn(&str) -> Option<TokenValue> + Send + Sync + 'static,
    {
        Lexicon {
            words: Arc::new(words),
            tokenizer,
        }
    }

    pub fn tokenizer(&self) -> Parser<TokenValue> {
        self.tokenizer.clone()
    }

    /// Token value the tokenizer produces for `name`
    pub fn word(&self, name: &str) -> Result<TokenValue, GrammarError> {
        (self.words)(name).ok_or_else(|| GrammarError::UnknownToken(name.to_string()))
    }

    /// Token-level parser for the word `name`
    pub fn token(&self, name: &str) -> Result<Parser<Token>, GrammarError> {
        Ok(token_with_value(self.word(name)?))
    }

    /// Token-level parser for any of `names`. No names never matches.
    pub fn tokens(&self, names: &[&str]) -> Result<Parser<Token>, GrammarError> {
        let parsers = names
            .iter()
            .map(|name| self.token(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(or_all(parsers))
    }

    /// `names` in sequence as one unit, producing and reported as the names
    /// joined by spaces
    pub fn phrase(&self, names: &[&str]) -> Result<Parser<String>, GrammarError> {
        let parsers = names
            .iter()
            .map(|name| self.token(name))
            .collect::<Result<Vec<_>, _>>()?;
        let phrase = names.join(" ");
        Ok(list(parsers).atomic().retn(phrase.clone()).label(&phrase))
    }

    /// Words of `self` take precedence, as does its tokenizer
    pub fn union(self, other: Lexicon) -> Lexicon {
        let (first, second) = (self.words, other.words);
        Lexicon {
            words: Arc::new(move |name: &str| first(name).or_else(|| second(name))),
            tokenizer: self.tokenizer.or(other.tokenizer),
        }
    }
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("tokenizer", &self.tokenizer)
            .finish_non_exhaustive()
    }
}
