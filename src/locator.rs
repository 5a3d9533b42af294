use std::fmt;

const LINE_BREAK: char = '\n';

/// A 1-based line and column in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Maps character offsets to [`Location`]s.
///
/// The locator remembers every line break it has scanned past. Queries below
/// the scanned frontier are answered with a binary search over the known line
/// breaks; queries beyond it scan forward from the frontier and extend the
/// cache. A forward parse therefore pays for each character once, while
/// backtracking queries for earlier offsets stay logarithmic.
///
/// The locator does not own the text. Every call must be given the same
/// source slice.
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
    line_breaks: Vec<usize>,
    next_index: usize,
    next_column: usize,
}

impl SourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locates `index` in `source`. `index == source.len()` is the end of input.
    pub fn locate(&mut self, source: &[char], index: usize) -> Location {
        if index < self.next_index {
            self.lookup(index)
        } else {
            self.scan_to(source, index)
        }
    }

    fn lookup(&self, index: usize) -> Location {
        let line = self.line_breaks.partition_point(|&brk| brk < index);
        if line == 0 {
            return location(0, index);
        }
        let previous_break = self.line_breaks[line - 1];
        location(line, index - previous_break - 1)
    }

    fn scan_to(&mut self, source: &[char], index: usize) -> Location {
        let index = index.min(source.len());
        let eof = index == source.len();
        let mut column = self.next_column;
        let last = if eof { index } else { index + 1 };
        for (i, &c) in source.iter().enumerate().take(last).skip(self.next_index) {
            if c == LINE_BREAK {
                self.line_breaks.push(i);
                column = 0;
            } else {
                column += 1;
            }
        }
        self.next_index = last;
        self.next_column = column;

        let lines = self.line_breaks.len();
        if eof {
            return location(lines, column);
        }
        if column == 0 {
            // the character at `index` is itself a line break
            return self.line_break_location(lines - 1);
        }
        location(lines, column - 1)
    }

    fn line_break_location(&self, line: usize) -> Location {
        let brk = self.line_breaks[line];
        let column = if line == 0 {
            brk
        } else {
            brk - self.line_breaks[line - 1] - 1
        };
        location(line, column)
    }
}

fn location(line: usize, column: usize) -> Location {
    Location::new(line + 1, column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_locate_first_line() {
        let source = chars("abc");
        let mut locator = SourceLocator::new();
        assert_eq!(locator.locate(&source, 0), Location::new(1, 1));
        assert_eq!(locator.locate(&source, 2), Location::new(1, 3));
    }

    #[test]
    fn test_locate_line_break_itself() {
        let source = chars("ab\ncd");
        let mut locator = SourceLocator::new();
        assert_eq!(locator.locate(&source, 2), Location::new(1, 3));
        assert_eq!(locator.locate(&source, 3), Location::new(2, 1));
    }

    #[test]
    fn test_locate_end_of_input() {
        let source = chars("ab\ncd");
        let mut locator = SourceLocator::new();
        assert_eq!(locator.locate(&source, 5), Location::new(2, 3));
        let empty: Vec<char> = Vec::new();
        assert_eq!(SourceLocator::new().locate(&empty, 0), Location::new(1, 1));
    }

    #[test]
    fn test_locate_backwards_uses_cache() {
        let source = chars("a\nbb\nccc\n");
        let mut locator = SourceLocator::new();
        assert_eq!(locator.locate(&source, 7), Location::new(3, 3));
        assert_eq!(locator.locate(&source, 0), Location::new(1, 1));
        assert_eq!(locator.locate(&source, 1), Location::new(1, 2));
        assert_eq!(locator.locate(&source, 3), Location::new(2, 2));
        assert_eq!(locator.locate(&source, 4), Location::new(2, 3));
        assert_eq!(locator.locate(&source, 9), Location::new(4, 1));
    }

    #[test]
    fn test_locate_repeated_query() {
        let source = chars("x\ny");
        let mut locator = SourceLocator::new();
        assert_eq!(locator.locate(&source, 2), Location::new(2, 1));
        assert_eq!(locator.locate(&source, 2), Location::new(2, 1));
    }
}
