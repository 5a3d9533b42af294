//! Stateless character matchers.
//!
//! A [`Pattern`] inspects `source[begin..end]` and reports how many characters
//! it matched, or `None` on a mismatch. Patterns carry no backtracking state,
//! which makes them the cheapest way to build scanners; see
//! [`Pattern::to_scanner`](crate::scanners).

use crate::char_predicate::{self, CharPredicate};
use once_cell::unsync::OnceCell;
use regex::Regex;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

type Matcher = dyn Fn(Source<'_>, usize, usize) -> Option<usize> + Send + Sync;

/// UTF-8 copy of the input with the byte offset of every character
pub(crate) struct Utf8Text {
    text: String,
    offsets: Vec<usize>,
}

impl Utf8Text {
    fn new(chars: &[char]) -> Self {
        let mut text = String::with_capacity(chars.len());
        let mut offsets = Vec::with_capacity(chars.len() + 1);
        for &c in chars {
            offsets.push(text.len());
            text.push(c);
        }
        offsets.push(text.len());
        Utf8Text { text, offsets }
    }

    fn slice(&self, begin: usize, end: usize) -> &str {
        &self.text[self.offsets[begin]..self.offsets[end]]
    }

    /// Characters in the `bytes` following character `begin`
    fn char_count(&self, begin: usize, bytes: usize) -> usize {
        let target = self.offsets[begin] + bytes;
        self.offsets.partition_point(|&offset| offset < target) - begin
    }
}

/// The characters a pattern runs over.
///
/// Dereferences to the characters. The UTF-8 text that regular expressions
/// match against is built on first use and shared by every later match over
/// the same input.
#[derive(Clone, Copy)]
pub struct Source<'a> {
    chars: &'a [char],
    utf8: &'a OnceCell<Utf8Text>,
}

impl<'a> Source<'a> {
    pub(crate) fn new(chars: &'a [char], utf8: &'a OnceCell<Utf8Text>) -> Self {
        Source { chars, utf8 }
    }

    pub fn chars(&self) -> &'a [char] {
        self.chars
    }

    fn utf8(&self) -> &'a Utf8Text {
        let chars = self.chars;
        self.utf8.get_or_init(|| Utf8Text::new(chars))
    }
}

impl Deref for Source<'_> {
    type Target = [char];

    fn deref(&self) -> &[char] {
        self.chars
    }
}

#[derive(Clone)]
pub struct Pattern {
    matcher: Arc<Matcher>,
    name: Arc<str>,
}

impl Pattern {
    pub fn new<F>(name: impl Into<Arc<str>>, matcher: F) -> Self
    where
        F: Fn(Source<'_>, usize, usize) -> Option<usize> + Send + Sync + 'static,
    {
        Pattern {
            matcher: Arc::new(matcher),
            name: name.into(),
        }
    }

    /// Number of characters matched at `begin`, never reading at or past `end`
    pub fn matches(&self, source: &[char], begin: usize, end: usize) -> Option<usize> {
        let utf8 = OnceCell::new();
        self.matches_in(Source::new(source, &utf8), begin, end)
    }

    /// Like [`Pattern::matches`], sharing the state `source` caches
    pub fn matches_in(&self, source: Source<'_>, begin: usize, end: usize) -> Option<usize> {
        (self.matcher)(source, begin, end)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn next(self, next: Pattern) -> Pattern {
        sequence(vec![self, next])
    }

    pub fn optional(self) -> Pattern {
        let name = format!("{}?", self.name);
        Pattern::new(name, move |src, begin, end| {
            Some(self.matches_in(src, begin, end).unwrap_or(0))
        })
    }

    pub fn many(self) -> Pattern {
        let name = format!("{}*", self.name);
        Pattern::new(name, move |src, begin, end| {
            Some(match_many(&self, src, begin, end))
        })
    }

    pub fn many1(self) -> Pattern {
        self.at_least(1)
    }

    pub fn at_least(self, min: usize) -> Pattern {
        let name = if min > 1 {
            format!("{}{{{min},}}", self.name)
        } else {
            format!("{}+", self.name)
        };
        Pattern::new(name, move |src, begin, end| {
            let head = match_repeat(&self, min, src, begin, end)?;
            Some(head + match_many(&self, src, begin + head, end))
        })
    }

    pub fn at_most(self, max: usize) -> Pattern {
        let name = format!("{}{{0,{max}}}", self.name);
        Pattern::new(name, move |src, begin, end| {
            Some(match_some(&self, max, src, begin, end))
        })
    }

    /// Between `min` and `max` occurrences. `max` below `min` is raised to `min`.
    pub fn times(self, min: usize, max: usize) -> Pattern {
        let max = max.max(min);
        let name = format!("{}{{{min},{max}}}", self.name);
        Pattern::new(name, move |src, begin, end| {
            let head = match_repeat(&self, min, src, begin, end)?;
            Some(head + match_some(&self, max - min, src, begin + head, end))
        })
    }

    /// Exactly `n` occurrences
    pub fn repeat(self, n: usize) -> Pattern {
        let name = format!("{}{{{n}}}", self.name);
        Pattern::new(name, move |src, begin, end| {
            match_repeat(&self, n, src, begin, end)
        })
    }

    /// Matches the empty string where `self` mismatches
    pub fn not(self) -> Pattern {
        let name = format!("!{}", self.name);
        Pattern::new(name, move |src, begin, end| match self.matches_in(src, begin, end) {
            Some(_) => None,
            None => Some(0),
        })
    }

    /// Matches the empty string where `self` matches
    pub fn peek(self) -> Pattern {
        let name = format!("peek {}", self.name);
        Pattern::new(name, move |src, begin, end| {
            self.matches_in(src, begin, end).map(|_| 0)
        })
    }

    pub fn if_else(self, consequence: Pattern, alternative: Pattern) -> Pattern {
        let name = format!("{} ? {} : {}", self.name, consequence.name, alternative.name);
        Pattern::new(name, move |src, begin, end| match self.matches_in(src, begin, end) {
            Some(head) => consequence
                .matches_in(src, begin + head, end)
                .map(|tail| head + tail),
            None => alternative.matches_in(src, begin, end),
        })
    }

    pub fn or(self, other: Pattern) -> Pattern {
        or(vec![self, other])
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.name).finish()
    }
}

fn match_many(pattern: &Pattern, src: Source<'_>, begin: usize, end: usize) -> usize {
    let mut at = begin;
    // a zero-length match would repeat forever, so it ends the loop
    while let Some(len) = pattern.matches_in(src, at, end).filter(|&len| len > 0) {
        at += len;
    }
    at - begin
}

fn match_some(
    pattern: &Pattern,
    max: usize,
    src: Source<'_>,
    begin: usize,
    end: usize,
) -> usize {
    let mut at = begin;
    for _ in 0..max {
        match pattern.matches_in(src, at, end) {
            Some(len) => at += len,
            None => break,
        }
    }
    at - begin
}

fn match_repeat(
    pattern: &Pattern,
    n: usize,
    src: Source<'_>,
    begin: usize,
    end: usize,
) -> Option<usize> {
    let mut at = begin;
    for _ in 0..n {
        at += pattern.matches_in(src, at, end)?;
    }
    Some(at - begin)
}

pub fn always() -> Pattern {
    Pattern::new("", |_, _, _| Some(0))
}

pub fn never() -> Pattern {
    Pattern::new("<>", |_, _, _| None)
}

/// At least `n` characters remain
pub fn has_at_least(n: usize) -> Pattern {
    Pattern::new(format!(".{{{n},}}"), move |_, begin, end| {
        (begin + n <= end).then_some(n)
    })
}

/// Exactly `n` characters remain
pub fn has_exact(n: usize) -> Pattern {
    Pattern::new(format!(".{{{n}}}"), move |_, begin, end| {
        (begin + n == end).then_some(n)
    })
}

pub fn any_char() -> Pattern {
    has_at_least(1)
}

pub fn eof() -> Pattern {
    has_exact(0)
}

pub fn satisfies(predicate: CharPredicate) -> Pattern {
    Pattern::new(predicate.name().to_string(), move |src, begin, end| {
        (begin < end && predicate.test(src[begin])).then_some(1)
    })
}

pub fn is_char(c: char) -> Pattern {
    satisfies(char_predicate::is_char(c))
}

pub fn range(low: char, high: char) -> Pattern {
    satisfies(char_predicate::range(low, high))
}

pub fn among(chars: &str) -> Pattern {
    satisfies(char_predicate::among(chars))
}

/// Zero or more characters satisfying `predicate`
pub fn many(predicate: CharPredicate) -> Pattern {
    satisfies(predicate).many()
}

pub fn many1(predicate: CharPredicate) -> Pattern {
    satisfies(predicate).many1()
}

pub fn string(s: &str) -> Pattern {
    let expected: Vec<char> = s.chars().collect();
    Pattern::new(s, move |src, begin, end| {
        let len = expected.len();
        (end.saturating_sub(begin) >= len && src[begin..begin + len] == expected[..])
            .then_some(len)
    })
}

pub fn string_case_insensitive(s: &str) -> Pattern {
    let expected: Vec<char> = s.chars().collect();
    Pattern::new(s.to_uppercase(), move |src, begin, end| {
        let len = expected.len();
        if end.saturating_sub(begin) < len {
            return None;
        }
        src[begin..begin + len]
            .iter()
            .zip(&expected)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
            .then_some(len)
    })
}

/// One character, provided `s` does not start here
pub fn not_string(s: &str) -> Pattern {
    let excluded: Vec<char> = s.chars().collect();
    Pattern::new(format!("!({s})"), move |src, begin, end| {
        if begin >= end {
            return None;
        }
        let len = excluded.len();
        let starts_here = end - begin >= len && src[begin..begin + len] == excluded[..];
        (!starts_here).then_some(1)
    })
}

pub fn sequence(patterns: Vec<Pattern>) -> Pattern {
    let name: String = patterns.iter().map(|p| p.name()).collect();
    Pattern::new(name, move |src, begin, end| {
        let mut at = begin;
        for pattern in &patterns {
            at += pattern.matches_in(src, at, end)?;
        }
        Some(at - begin)
    })
}

/// First matching alternative
pub fn or(patterns: Vec<Pattern>) -> Pattern {
    let name = format!(
        "({})",
        patterns.iter().map(|p| p.name()).collect::<Vec<_>>().join(" | ")
    );
    Pattern::new(name, move |src, begin, end| {
        patterns.iter().find_map(|p| p.matches_in(src, begin, end))
    })
}

/// Every pattern must match; the longest match length wins
pub fn and(patterns: Vec<Pattern>) -> Pattern {
    let name = format!(
        "({})",
        patterns.iter().map(|p| p.name()).collect::<Vec<_>>().join(" & ")
    );
    Pattern::new(name, move |src, begin, end| {
        let mut longest = 0;
        for pattern in &patterns {
            longest = longest.max(pattern.matches_in(src, begin, end)?);
        }
        Some(longest)
    })
}

pub fn longest(patterns: Vec<Pattern>) -> Pattern {
    Pattern::new("longest", move |src, begin, end| {
        patterns.iter().filter_map(|p| p.matches_in(src, begin, end)).max()
    })
}

pub fn shortest(patterns: Vec<Pattern>) -> Pattern {
    Pattern::new("shortest", move |src, begin, end| {
        patterns.iter().filter_map(|p| p.matches_in(src, begin, end)).min()
    })
}

/// Anchored regular expression match.
///
/// Returns `Err` when `expr` does not compile.
pub fn regex(expr: &str) -> Result<Pattern, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{expr})"))?;
    Ok(Pattern::new(expr, move |src, begin, end| {
        if begin > end {
            return None;
        }
        let utf8 = src.utf8();
        anchored
            .find(utf8.slice(begin, end))
            .map(|m| utf8.char_count(begin, m.end()))
    }))
}

pub fn line_comment(begin: &str) -> Pattern {
    string(begin).next(many(char_predicate::not_char('\n')))
}

/// One or more digits
pub fn integer() -> Pattern {
    many1(char_predicate::is_digit())
}

/// `123`, `123.`, `123.45` or `.45`
pub fn decimal() -> Pattern {
    let strict = integer().next(is_char('.').next(many(char_predicate::is_digit())).optional());
    let fraction = is_char('.').next(integer());
    strict.or(fraction)
}

/// An ASCII letter or underscore followed by letters, digits and underscores
pub fn word() -> Pattern {
    satisfies(char_predicate::is_alpha_()).next(many(char_predicate::is_alpha_numeric_()))
}

pub fn dec_integer() -> Pattern {
    range('1', '9').next(many(char_predicate::is_digit()))
}

pub fn oct_integer() -> Pattern {
    is_char('0').next(many(char_predicate::range('0', '7')))
}

pub fn hex_integer() -> Pattern {
    string("0x")
        .or(string("0X"))
        .next(many1(char_predicate::is_hex_digit()))
}

pub fn scientific_notation() -> Pattern {
    sequence(vec![decimal(), among("eE"), among("+-").optional(), integer()])
}

/// A backslash followed by any character
pub fn escaped() -> Pattern {
    is_char('\\').next(any_char())
}
