//! Operators, keywords and words combined into one lexicon.
//!
//! ```
//! use parsekit::scanners::{identifier, whitespaces};
//! use parsekit::Terminals;
//!
//! let terminals = Terminals::operators(&["+", "+="])
//!     .words(identifier())
//!     .keywords(&["let"])
//!     .build();
//! let parser = terminals
//!     .phrase(&["let", "+="])
//!     .unwrap()
//!     .from_tokenizer(terminals.tokenizer(), whitespaces());
//! assert_eq!(parser.parse("let +=").unwrap(), "let +=");
//! ```

use crate::error::GrammarError;
use crate::keywords::{self, StringCase, WordMap};
use crate::lexicon::Lexicon;
use crate::operators;
use crate::parser::Parser;
use crate::scanners;
use crate::token::{Token, TokenValue};
use std::sync::Arc;

/// A [`Lexicon`] of operators and, once [`Terminals::words`] is configured,
/// keywords and plain words. Operators are tried before words.
#[derive(Debug, Clone)]
pub struct Terminals {
    lexicon: Lexicon,
}

impl Terminals {
    /// Terminals recognizing only `ops`
    pub fn operators<S: AsRef<str>>(ops: &[S]) -> Terminals {
        Terminals {
            lexicon: operators::lexicon(ops),
        }
    }

    /// Starts configuring the words recognized next to the operators
    pub fn words(self, word_scanner: Parser<String>) -> TerminalsBuilder {
        TerminalsBuilder {
            operators: self.lexicon,
            word_scanner,
            keywords: Vec::new(),
            case: StringCase::Sensitive,
            word_map: keywords::identifier_word_map(),
        }
    }

    /// Operators `ops` plus identifiers, `keywords` matched exactly
    pub fn case_sensitive<S: AsRef<str>>(ops: &[S], keywords: &[S]) -> Terminals {
        Terminals::operators(ops)
            .words(scanners::identifier())
            .keywords(keywords)
            .build()
    }

    /// Operators `ops` plus identifiers, `keywords` matched ignoring case
    pub fn case_insensitive<S: AsRef<str>>(ops: &[S], keywords: &[S]) -> Terminals {
        Terminals::operators(ops)
            .words(scanners::identifier())
            .case_insensitive_keywords(keywords)
            .build()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn tokenizer(&self) -> Parser<TokenValue> {
        self.lexicon.tokenizer()
    }

    pub fn token(&self, name: &str) -> Result<Parser<Token>, GrammarError> {
        self.lexicon.token(name)
    }

    pub fn tokens(&self, names: &[&str]) -> Result<Parser<Token>, GrammarError> {
        self.lexicon.tokens(names)
    }

    pub fn phrase(&self, names: &[&str]) -> Result<Parser<String>, GrammarError> {
        self.lexicon.phrase(names)
    }
}

impl From<Terminals> for Lexicon {
    fn from(terminals: Terminals) -> Self {
        terminals.lexicon
    }
}

/// Configures keywords and word tokens on top of a set of operators
pub struct TerminalsBuilder {
    operators: Lexicon,
    word_scanner: Parser<String>,
    keywords: Vec<String>,
    case: StringCase,
    word_map: WordMap,
}

impl TerminalsBuilder {
    /// Keywords matched exactly
    pub fn keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        self.case = StringCase::Sensitive;
        self
    }

    /// Keywords matched ignoring case
    pub fn case_insensitive_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        self.case = StringCase::Insensitive;
        self
    }

    /// Token value of words that are not keywords. Identifier fragments by
    /// default.
    pub fn tokenize_words_with<F>(mut self, word_map: F) -> Self
    where
        F: Fn(&str) -> TokenValue + Send + Sync + 'static,
    {
        self.word_map = Arc::new(word_map);
        self
    }

    pub fn build(self) -> Terminals {
        log::trace!(
            "building terminals with {} keywords ({:?})",
            self.keywords.len(),
            self.case
        );
        let words = keywords::lexicon(
            self.word_scanner,
            self.keywords.as_slice(),
            self.case,
            self.word_map,
        );
        Terminals {
            lexicon: self.operators.union(words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{java_delimiter, string};
    use crate::token::Fragment;
    use crate::tokens;

    fn sql() -> Terminals {
        Terminals::case_insensitive(
            &["=", "<", "<=", "<>", "(", ")", ","],
            &["select", "from", "where"],
        )
    }

    fn lex(terminals: &Terminals, source: &str) -> Vec<TokenValue> {
        let lexer = terminals.tokenizer().lexer(java_delimiter());
        lexer
            .parse(source)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_tokenizes_operators_keywords_and_words() {
        let values = lex(&sql(), "SELECT a<=b<>c FROM t");
        assert_eq!(
            values,
            vec![
                Fragment::reserved("select").into(),
                Fragment::identifier("a").into(),
                Fragment::reserved("<=").into(),
                Fragment::identifier("b").into(),
                Fragment::reserved("<>").into(),
                Fragment::identifier("c").into(),
                Fragment::reserved("from").into(),
                Fragment::identifier("t").into(),
            ]
        );
    }

    #[test]
    fn test_case_sensitive_keywords() {
        let terminals = Terminals::case_sensitive(&["+"], &["Let"]);
        let values = lex(&terminals, "Let let");
        assert_eq!(
            values,
            vec![Fragment::reserved("Let").into(), Fragment::identifier("let").into()]
        );
    }

    #[test]
    fn test_token_lookup() {
        let terminals = sql();
        let parser = terminals
            .token("SELECT")
            .unwrap()
            .then(tokens::identifier().sep_by1(terminals.token(",").unwrap()))
            .from_tokenizer(terminals.tokenizer(), java_delimiter());
        assert_eq!(parser.parse("select a, b").unwrap(), vec!["a", "b"]);
        assert!(terminals.token("update").is_err());
        let error = parser.parse("select from").unwrap_err();
        assert_eq!(error.details.to_string(), "IDENTIFIER expected, from encountered.");
    }

    #[test]
    fn test_tokenize_words_with() {
        let terminals = Terminals::operators(&["$"])
            .words(string("@").then(scanners::identifier()))
            .tokenize_words_with(|word| TokenValue::Str(word.to_string()))
            .build();
        let parser = terminals
            .token("$")
            .unwrap()
            .then(tokens::string_literal())
            .from_tokenizer(terminals.tokenizer(), java_delimiter());
        assert_eq!(parser.parse("$ @name").unwrap(), "name");
    }
}
