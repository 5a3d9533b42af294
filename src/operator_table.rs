//! Expression parsers from a table of operators.
//!
//! ```
//! use parsekit::infix::{binary, unary};
//! use parsekit::scanners::{digit, is_char};
//! use parsekit::OperatorTable;
//!
//! let number = digit().many1().source().map(|s| s.parse::<i64>().unwrap_or(0));
//! let expr = OperatorTable::new()
//!     .infixl(is_char('+').retn(binary(|a: i64, b: i64| a + b)), 10)
//!     .infixl(is_char('*').retn(binary(|a: i64, b: i64| a * b)), 20)
//!     .prefix(is_char('-').retn(unary(|n: i64| -n)), 30)
//!     .build(number);
//! assert_eq!(expr.parse("1+2*-3").unwrap(), -5);
//! ```

use crate::infix::{Binary, Unary};
use crate::or::or_all;
use crate::parser::Parser;

/// How operators at one precedence level combine. Declaration order is the
/// order the levels are wrapped in when precedences tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Associativity {
    Prefix,
    Postfix,
    Left,
    NonAssociative,
    Right,
}

enum OperatorParser<T> {
    Unary(Parser<Unary<T>>),
    Binary(Parser<Binary<T>>),
}

struct Operator<T> {
    parser: OperatorParser<T>,
    precedence: i32,
    associativity: Associativity,
}

/// Operators with precedences, higher binding tighter.
///
/// Operators sharing both precedence and associativity are alternatives at
/// one level, tried in the order they were added.
pub struct OperatorTable<T> {
    operators: Vec<Operator<T>>,
}

impl<T: 'static> Default for OperatorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> OperatorTable<T> {
    pub fn new() -> Self {
        OperatorTable {
            operators: Vec::new(),
        }
    }

    fn unary(
        mut self,
        parser: Parser<Unary<T>>,
        precedence: i32,
        associativity: Associativity,
    ) -> Self {
        self.operators.push(Operator {
            parser: OperatorParser::Unary(parser),
            precedence,
            associativity,
        });
        self
    }

    fn binary(
        mut self,
        parser: Parser<Binary<T>>,
        precedence: i32,
        associativity: Associativity,
    ) -> Self {
        self.operators.push(Operator {
            parser: OperatorParser::Binary(parser),
            precedence,
            associativity,
        });
        self
    }

    pub fn prefix(self, parser: Parser<Unary<T>>, precedence: i32) -> Self {
        self.unary(parser, precedence, Associativity::Prefix)
    }

    pub fn postfix(self, parser: Parser<Unary<T>>, precedence: i32) -> Self {
        self.unary(parser, precedence, Associativity::Postfix)
    }

    pub fn infixl(self, parser: Parser<Binary<T>>, precedence: i32) -> Self {
        self.binary(parser, precedence, Associativity::Left)
    }

    pub fn infixn(self, parser: Parser<Binary<T>>, precedence: i32) -> Self {
        self.binary(parser, precedence, Associativity::NonAssociative)
    }

    pub fn infixr(self, parser: Parser<Binary<T>>, precedence: i32) -> Self {
        self.binary(parser, precedence, Associativity::Right)
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Expression parser over `operand`. An empty table returns `operand`
    /// itself.
    pub fn build(self, operand: Parser<T>) -> Parser<T> {
        let mut operators = self.operators;
        operators.sort_by(|a, b| {
            b.precedence
                .cmp(&a.precedence)
                .then(a.associativity.cmp(&b.associativity))
        });

        let mut expression = operand;
        let mut remaining = operators.into_iter().peekable();
        while let Some(first) = remaining.next() {
            let level = (first.precedence, first.associativity);
            let mut run = vec![first.parser];
            while let Some(next) =
                remaining.next_if(|op| (op.precedence, op.associativity) == level)
            {
                run.push(next.parser);
            }
            log::trace!(
                "operator level {} ({:?}) with {} alternatives",
                level.0,
                level.1,
                run.len()
            );
            expression = wrap(expression, level.1, run);
        }
        expression
    }
}

fn wrap<T: 'static>(
    operand: Parser<T>,
    associativity: Associativity,
    run: Vec<OperatorParser<T>>,
) -> Parser<T> {
    let unary = || {
        or_all(
            run.iter()
                .filter_map(|op| match op {
                    OperatorParser::Unary(p) => Some(p.clone()),
                    OperatorParser::Binary(_) => None,
                })
                .collect(),
        )
    };
    let binary = || {
        or_all(
            run.iter()
                .filter_map(|op| match op {
                    OperatorParser::Binary(p) => Some(p.clone()),
                    OperatorParser::Unary(_) => None,
                })
                .collect(),
        )
    };
    match associativity {
        Associativity::Prefix => operand.prefix(unary()),
        Associativity::Postfix => operand.postfix(unary()),
        Associativity::Left => operand.infixl(binary()),
        Associativity::NonAssociative => operand.infixn(binary()),
        Associativity::Right => operand.infixr(binary()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infix::{binary, unary};
    use crate::scanners::{digit, is_char};

    fn number() -> Parser<i64> {
        digit().many1().source().map(|s| s.parse::<i64>().unwrap_or(0))
    }

    fn op(c: char, f: fn(i64, i64) -> i64) -> Parser<Binary<i64>> {
        is_char(c).retn(binary(f))
    }

    fn arithmetic() -> Parser<i64> {
        OperatorTable::new()
            .infixl(op('+', |a, b| a + b), 10)
            .infixl(op('-', |a, b| a - b), 10)
            .infixl(op('*', |a, b| a * b), 20)
            .infixr(op('^', |a, b| a.pow(b as u32)), 30)
            .prefix(is_char('-').retn(unary(|n: i64| -n)), 40)
            .postfix(is_char('!').retn(unary(|n: i64| (1..=n).product())), 50)
            .build(number())
    }

    #[test]
    fn test_precedence_and_associativity() {
        let expr = arithmetic();
        assert_eq!(expr.parse("1+2*3").unwrap(), 7);
        assert_eq!(expr.parse("10-4-3").unwrap(), 3);
        assert_eq!(expr.parse("2^3^2").unwrap(), 512);
        assert_eq!(expr.parse("2*3!").unwrap(), 12);
    }

    #[test]
    fn test_unary_and_binary_minus_share_a_symbol() {
        let expr = arithmetic();
        assert_eq!(expr.parse("-2*-3").unwrap(), 6);
        assert_eq!(expr.parse("5--1").unwrap(), 6);
    }

    #[test]
    fn test_same_precedence_prefix_wraps_first() {
        let expr = OperatorTable::new()
            .infixl(op('-', |a, b| a - b), 10)
            .prefix(is_char('-').retn(unary(|n: i64| -n)), 10)
            .build(number());
        assert_eq!(expr.parse("-1-2").unwrap(), -3);
    }

    #[test]
    fn test_non_associative_level() {
        let expr = OperatorTable::new()
            .infixn(op('=', |a, b| i64::from(a == b)), 5)
            .infixl(op('+', |a, b| a + b), 10)
            .build(number());
        assert_eq!(expr.parse("1+1=2").unwrap(), 1);
        assert!(expr.parse("1=1=1").is_err());
    }

    #[test]
    fn test_empty_table_is_identity() {
        let table = OperatorTable::<i64>::new();
        assert!(table.is_empty());
        let operand = number().renamed("operand");
        let expr = table.build(operand.clone());
        assert_eq!(expr.name(), "operand");
        assert_eq!(expr.parse("42").unwrap(), 42);
        assert_eq!(
            expr.parse("4x").unwrap_err().to_string(),
            operand.parse("4x").unwrap_err().to_string()
        );
    }
}
