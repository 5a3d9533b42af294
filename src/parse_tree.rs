use std::fmt;

/// Syntactic structure of a parse, made of labeled parsers only.
///
/// Produced by [`Parser::parse_tree`](crate::Parser::parse_tree) or attached to
/// a [`ParseError`](crate::ParseError) when parsing in
/// [`Mode::Debug`](crate::Mode::Debug).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub name: String,
    pub begin: usize,
    pub end: usize,
    /// Debug rendering of the node's result, `None` if the node never completed
    pub value: Option<String>,
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&ParseTree> {
        self.children.iter().find(|c| c.name == name)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{} [{}, {})", "", self.name, self.begin, self.end, indent = depth * 2)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
