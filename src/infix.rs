//! Prefix, postfix and binary operator application.
//!
//! Operator parsers produce the function to apply; the operand parser
//! produces the values.

use crate::and::sequence;
use crate::parser::Parser;
use std::sync::Arc;

/// Function produced by a prefix or postfix operator
pub type Unary<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Function produced by a binary operator
pub type Binary<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// Wraps a closure as a [`Unary`] operator function
pub fn unary<T, F>(f: F) -> Unary<T>
where
    F: Fn(T) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure as a [`Binary`] operator function
pub fn binary<T, F>(f: F) -> Binary<T>
where
    F: Fn(T, T) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

impl<T: 'static> Parser<T> {
    /// Any number of prefix operators before this parser, applied right to left
    pub fn prefix(self, op: Parser<Unary<T>>) -> Parser<T> {
        let name = self.name().to_string();
        sequence((op.many(), self))
            .map(|(ops, operand)| ops.into_iter().rev().fold(operand, |acc, f| f(acc)))
            .renamed(name)
    }

    /// Any number of postfix operators after this parser, applied left to right
    pub fn postfix(self, op: Parser<Unary<T>>) -> Parser<T> {
        let name = self.name().to_string();
        sequence((self, op.many()))
            .map(|(operand, ops)| ops.into_iter().fold(operand, |acc, f| f(acc)))
            .renamed(name)
    }

    /// Left-associative binary operator: `a op b op c` is `(a op b) op c`
    pub fn infixl(self, op: Parser<Binary<T>>) -> Parser<T> {
        let name = self.name().to_string();
        let rhs = op.and(self.clone()).many();
        sequence((self, rhs))
            .map(|(first, rest)| rest.into_iter().fold(first, |acc, (f, rhs)| f(acc, rhs)))
            .renamed(name)
    }

    /// Right-associative binary operator: `a op b op c` is `a op (b op c)`
    pub fn infixr(self, op: Parser<Binary<T>>) -> Parser<T> {
        let name = self.name().to_string();
        let rhs = op.and(self.clone()).many();
        sequence((self, rhs))
            .map(|(first, rest)| fold_right(first, rest))
            .renamed(name)
    }

    /// Non-associative binary operator: at most one application
    pub fn infixn(self, op: Parser<Binary<T>>) -> Parser<T> {
        let name = self.name().to_string();
        let rhs = op.and(self.clone()).optional();
        sequence((self, rhs))
            .map(|(lhs, rest)| match rest {
                Some((f, rhs)) => f(lhs, rhs),
                None => lhs,
            })
            .renamed(name)
    }
}

fn fold_right<T>(first: T, mut rest: Vec<(Binary<T>, T)>) -> T {
    let Some((mut op, mut acc)) = rest.pop() else {
        return first;
    };
    while let Some((previous, lhs)) = rest.pop() {
        acc = op(lhs, acc);
        op = previous;
    }
    op(first, acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{digit, is_char};

    fn number() -> Parser<i64> {
        digit().source().map(|s| s.parse::<i64>().unwrap_or(0))
    }

    fn minus() -> Parser<Binary<i64>> {
        is_char('-').retn(binary(|a: i64, b: i64| a - b))
    }

    fn power() -> Parser<Binary<i64>> {
        is_char('^').retn(binary(|a: i64, b: i64| a.pow(b as u32)))
    }

    #[test]
    fn test_infixl() {
        assert_eq!(number().infixl(minus()).parse("9-3-2").unwrap(), 4);
    }

    #[test]
    fn test_infixr() {
        assert_eq!(number().infixr(minus()).parse("9-3-2").unwrap(), 8);
        assert_eq!(number().infixr(power()).parse("2^3^2").unwrap(), 512);
        assert_eq!(number().infixr(power()).parse("7").unwrap(), 7);
    }

    #[test]
    fn test_infixn() {
        let parser = number().infixn(minus());
        assert_eq!(parser.parse("9-3").unwrap(), 6);
        assert!(parser.parse("9-3-2").is_err());
    }

    #[test]
    fn test_prefix_postfix() {
        let neg = is_char('-').retn(unary(|n: i64| -n));
        let double = is_char('!').retn(unary(|n: i64| n * 2));
        assert_eq!(number().prefix(neg.clone()).parse("--5").unwrap(), 5);
        assert_eq!(number().postfix(double.clone()).parse("3!!").unwrap(), 12);
        let inc = is_char('+').retn(unary(|n: i64| n + 1));
        assert_eq!(number().prefix(neg.or(double)).parse("-!3").unwrap(), -6);
        assert_eq!(number().postfix(inc).parse("3").unwrap(), 3);
    }

    #[test]
    fn test_dangling_operator_is_left_unconsumed() {
        let error = number().infixl(minus()).parse("9-").unwrap_err();
        assert_eq!(error.index(), 2);
    }
}
