//! Operator tokenizing.
//!
//! Operators are tried one at a time in an order where a spelling always
//! comes before any other spelling that is a prefix of it, so `==` is tried
//! before `=` and `=` never cuts `==` short.

use crate::lexicon::Lexicon;
use crate::or::or_all;
use crate::parser::Parser;
use crate::scanners::{is_char, string};
use crate::token::{Fragment, TokenValue};
use std::collections::HashMap;

/// Spellings that extend each other, longest first. A spelling is kept
/// right behind the last entry it is a prefix of.
struct Suite {
    names: Vec<String>,
}

impl Suite {
    fn add(&mut self, name: &str) -> bool {
        let Some(i) = self.names.iter().rposition(|existing| existing.starts_with(name)) else {
            return false;
        };
        if self.names[i].len() != name.len() {
            self.names.insert(i + 1, name.to_string());
        }
        true
    }
}

/// The order operators are tried in: shorter unrelated spellings go first,
/// but any spelling that is a prefix of another goes after it
pub fn sort<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut by_length: Vec<&str> = names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.is_empty())
        .collect();
    by_length.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut suites: Vec<Suite> = Vec::new();
    for name in by_length {
        if !suites.iter_mut().any(|suite| suite.add(name)) {
            suites.push(Suite {
                names: vec![name.to_string()],
            });
        }
    }
    suites.into_iter().rev().flat_map(|suite| suite.names).collect()
}

fn scanner(name: &str) -> Parser<()> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_char(c),
        _ => string(name),
    }
}

/// Lexicon recognizing `names` as reserved fragments
pub fn lexicon<S: AsRef<str>>(names: &[S]) -> Lexicon {
    let ordered = sort(names);
    let mut words = HashMap::with_capacity(ordered.len());
    let mut tokenizers = Vec::with_capacity(ordered.len());
    for name in &ordered {
        let value = TokenValue::from(Fragment::reserved(name.as_str()));
        tokenizers.push(scanner(name).retn(value.clone()));
        words.insert(name.clone(), value);
    }
    Lexicon::new(move |name| words.get(name).cloned(), or_all(tokenizers))
}
