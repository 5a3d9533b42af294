use std::fmt;
use std::sync::Arc;

/// A named test on a single character
#[derive(Clone)]
pub struct CharPredicate {
    test: Arc<dyn Fn(char) -> bool + Send + Sync>,
    name: Arc<str>,
}

impl CharPredicate {
    pub fn new<F>(name: impl Into<Arc<str>>, test: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        CharPredicate {
            test: Arc::new(test),
            name: name.into(),
        }
    }

    pub fn test(&self, c: char) -> bool {
        (self.test)(c)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn and(self, other: CharPredicate) -> CharPredicate {
        let name = format!("{} and {}", self.name, other.name);
        CharPredicate::new(name, move |c| self.test(c) && other.test(c))
    }

    pub fn or(self, other: CharPredicate) -> CharPredicate {
        let name = format!("{} or {}", self.name, other.name);
        CharPredicate::new(name, move |c| self.test(c) || other.test(c))
    }

    pub fn negate(self) -> CharPredicate {
        let name = format!("^{}", self.name);
        CharPredicate::new(name, move |c| !self.test(c))
    }
}

impl fmt::Display for CharPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for CharPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharPredicate").field(&self.name).finish()
    }
}

pub fn is_char(expected: char) -> CharPredicate {
    CharPredicate::new(expected.to_string(), move |c| c == expected)
}

pub fn not_char(excluded: char) -> CharPredicate {
    CharPredicate::new(format!("^{excluded}"), move |c| c != excluded)
}

pub fn range(low: char, high: char) -> CharPredicate {
    CharPredicate::new(format!("[{low}-{high}]"), move |c| (low..=high).contains(&c))
}

pub fn among(chars: &str) -> CharPredicate {
    let set: Vec<char> = chars.chars().collect();
    CharPredicate::new(format!("[{chars}]"), move |c| set.contains(&c))
}

pub fn not_among(chars: &str) -> CharPredicate {
    let set: Vec<char> = chars.chars().collect();
    CharPredicate::new(format!("^[{chars}]"), move |c| !set.contains(&c))
}

pub fn always() -> CharPredicate {
    CharPredicate::new("any character", |_| true)
}

pub fn never() -> CharPredicate {
    CharPredicate::new("none", |_| false)
}

pub fn is_digit() -> CharPredicate {
    CharPredicate::new("[0-9]", |c| c.is_ascii_digit())
}

pub fn is_hex_digit() -> CharPredicate {
    CharPredicate::new("[0-9a-fA-F]", |c| c.is_ascii_hexdigit())
}

pub fn is_letter() -> CharPredicate {
    CharPredicate::new("letter", char::is_alphabetic)
}

pub fn is_upper_case() -> CharPredicate {
    CharPredicate::new("uppercase", char::is_uppercase)
}

pub fn is_lower_case() -> CharPredicate {
    CharPredicate::new("lowercase", char::is_lowercase)
}

pub fn is_whitespace() -> CharPredicate {
    CharPredicate::new("whitespace", char::is_whitespace)
}

pub fn is_alpha() -> CharPredicate {
    CharPredicate::new("[a-zA-Z]", |c| c.is_ascii_alphabetic())
}

/// ASCII letter or underscore
pub fn is_alpha_() -> CharPredicate {
    CharPredicate::new("[a-zA-Z_]", |c| c.is_ascii_alphabetic() || c == '_')
}

pub fn is_alpha_numeric() -> CharPredicate {
    CharPredicate::new("[0-9a-zA-Z]", |c| c.is_ascii_alphanumeric())
}

/// ASCII letter, digit or underscore
pub fn is_alpha_numeric_() -> CharPredicate {
    CharPredicate::new("[0-9a-zA-Z_]", |c| c.is_ascii_alphanumeric() || c == '_')
}
