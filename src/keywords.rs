//! Keyword classification of scanned words.

use crate::lexicon::Lexicon;
use crate::parser::Parser;
use crate::token::{Fragment, TokenValue};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a scanned word that is not a keyword to its token value
pub type WordMap = Arc<dyn Fn(&str) -> TokenValue + Send + Sync>;

/// Whether keyword lookup ignores case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringCase {
    #[default]
    Sensitive,
    Insensitive,
}

impl StringCase {
    fn to_key(self, word: &str) -> String {
        match self {
            StringCase::Sensitive => word.to_string(),
            StringCase::Insensitive => word.to_lowercase(),
        }
    }
}

/// Words become identifier fragments unless told otherwise
pub fn identifier_word_map() -> WordMap {
    Arc::new(|word: &str| TokenValue::from(Fragment::identifier(word)))
}

/// Lexicon whose tokenizer runs `word_scanner` and turns each keyword into a
/// reserved fragment spelled as declared, and every other word into whatever
/// `default_map` makes of it.
///
/// Keywords that only differ in case collapse to the first one declared when
/// `case` is [`StringCase::Insensitive`].
pub fn lexicon<S: AsRef<str>>(
    word_scanner: Parser<String>,
    keywords: &[S],
    case: StringCase,
    default_map: WordMap,
) -> Lexicon {
    let mut reserved: HashMap<String, TokenValue> = HashMap::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.as_ref();
        reserved
            .entry(case.to_key(keyword))
            .or_insert_with(|| Fragment::reserved(keyword).into());
    }
    let reserved = Arc::new(reserved);
    let lookup = {
        let reserved = Arc::clone(&reserved);
        move |word: &str| reserved.get(&case.to_key(word)).cloned()
    };
    let tokenizer = word_scanner.map(move |word| {
        reserved
            .get(&case.to_key(&word))
            .cloned()
            .unwrap_or_else(|| default_map(&word))
    });
    Lexicon::new(lookup, tokenizer)
}
