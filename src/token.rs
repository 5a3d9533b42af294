use std::borrow::Cow;
use std::fmt;

/// Classification attached to a [`Fragment`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Keywords and operators
    Reserved,
    Identifier,
    Integer,
    Decimal,
    Custom(Cow<'static, str>),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Reserved => f.write_str("RESERVED"),
            Tag::Identifier => f.write_str("IDENTIFIER"),
            Tag::Integer => f.write_str("INTEGER"),
            Tag::Decimal => f.write_str("DECIMAL"),
            Tag::Custom(name) => f.write_str(name),
        }
    }
}

/// A piece of source text together with its [`Tag`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub text: String,
    pub tag: Tag,
}

impl Fragment {
    pub fn new(text: impl Into<String>, tag: Tag) -> Self {
        Fragment {
            text: text.into(),
            tag,
        }
    }

    pub fn reserved(text: impl Into<String>) -> Self {
        Fragment::new(text, Tag::Reserved)
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Fragment::new(text, Tag::Identifier)
    }

    pub fn integer(text: impl Into<String>) -> Self {
        Fragment::new(text, Tag::Integer)
    }

    pub fn decimal(text: impl Into<String>) -> Self {
        Fragment::new(text, Tag::Decimal)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A number in scientific notation, kept as text so range checks are left to the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScientificNotation {
    pub significand: String,
    pub exponent: String,
}

impl ScientificNotation {
    pub fn new(significand: impl Into<String>, exponent: impl Into<String>) -> Self {
        ScientificNotation {
            significand: significand.into(),
            exponent: exponent.into(),
        }
    }
}

impl fmt::Display for ScientificNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}E{}", self.significand, self.exponent)
    }
}

/// Layout tokens synthesized by the indentation processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Indent,
    Outdent,
    LineFeed,
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Punctuation::Indent => f.write_str("INDENT"),
            Punctuation::Outdent => f.write_str("OUTDENT"),
            Punctuation::LineFeed => f.write_str("LF"),
        }
    }
}

/// The value a tokenizer produces for one token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenValue {
    Fragment(Fragment),
    Long(i64),
    Str(String),
    Char(char),
    Scientific(ScientificNotation),
    Punctuation(Punctuation),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Fragment(fragment) => fmt::Display::fmt(fragment, f),
            TokenValue::Long(n) => write!(f, "{n}"),
            TokenValue::Str(s) => f.write_str(s),
            TokenValue::Char(c) => write!(f, "{c}"),
            TokenValue::Scientific(n) => fmt::Display::fmt(n, f),
            TokenValue::Punctuation(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl From<Fragment> for TokenValue {
    fn from(fragment: Fragment) -> Self {
        TokenValue::Fragment(fragment)
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Long(n)
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::Str(s)
    }
}

impl From<char> for TokenValue {
    fn from(c: char) -> Self {
        TokenValue::Char(c)
    }
}

impl From<ScientificNotation> for TokenValue {
    fn from(n: ScientificNotation) -> Self {
        TokenValue::Scientific(n)
    }
}

impl From<Punctuation> for TokenValue {
    fn from(p: Punctuation) -> Self {
        TokenValue::Punctuation(p)
    }
}

/// A lexed token: where it starts in the source, how many characters it spans
/// and what it means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub index: usize,
    pub length: usize,
    pub value: TokenValue,
}

impl Token {
    pub fn new(index: usize, length: usize, value: impl Into<TokenValue>) -> Self {
        Token {
            index,
            length,
            value: value.into(),
        }
    }

    /// Index just past the token
    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
