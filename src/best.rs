use crate::context::ParseContext;
use crate::parser::{Apply, Parser};
use std::cmp::Ordering;

/// Parser combinator that runs every alternative from the same starting point
/// and keeps the one that stopped farthest (or nearest).
///
/// Ties go to the alternative declared first.
pub struct Best<T> {
    alternatives: Vec<Parser<T>>,
    preferred: Ordering,
}

impl<T> Best<T> {
    pub fn new(alternatives: Vec<Parser<T>>, preferred: Ordering) -> Self {
        Best {
            alternatives,
            preferred,
        }
    }
}

impl<T: 'static> Apply<T> for Best<T> {
    fn apply(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        let (at, step) = (ctx.at, ctx.step);
        let latest_child = ctx.latest_child();
        let mut best = None;
        for alternative in &self.alternatives {
            ctx.set_at(step, at);
            ctx.set_latest_child(latest_child);
            let Some(value) = alternative.apply(ctx) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((_, best_at, _, _)) => ctx.at.cmp(best_at) == self.preferred,
            };
            if better {
                best = Some((value, ctx.at, ctx.step, ctx.latest_child()));
            }
        }
        let (value, best_at, best_step, best_child) = best?;
        ctx.set_at(best_step, best_at);
        ctx.set_latest_child(best_child);
        Some(value)
    }
}

/// Alternative that consumes the most input
pub fn longest<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    Parser::new("longest", Best::new(alternatives, Ordering::Greater))
}

/// Alternative that consumes the least input
pub fn shortest<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    Parser::new("shortest", Best::new(alternatives, Ordering::Less))
}

impl<T: 'static> Parser<T> {
    /// The longer match of this parser and `other`
    pub fn longer(self, other: Parser<T>) -> Parser<T> {
        longest(vec![self, other])
    }

    /// The shorter match of this parser and `other`
    pub fn shorter(self, other: Parser<T>) -> Parser<T> {
        shortest(vec![self, other])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::index;
    use crate::scanners::string;

    #[test]
    fn test_longest_picks_farthest() {
        let parser = longest(vec![string("ab").retn(1), string("abc").retn(2)]);
        assert_eq!(parser.parse("abc").unwrap(), 2);
    }

    #[test]
    fn test_shortest_leaves_rest() {
        let parser = shortest(vec![string("ab").retn(1), string("abc").retn(2)]);
        assert_eq!(parser.and(index()).parse("abc").unwrap_err().index(), 2);
        let parser = shortest(vec![string("ab").retn(1), string("abc").retn(2)])
            .and(index())
            .followed_by(string("c"));
        assert_eq!(parser.parse("abc").unwrap(), (1, 2));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let parser = string("ab").retn('x').longer(string("ab").retn('y'));
        assert_eq!(parser.parse("ab").unwrap(), 'x');
        let parser = string("ab").retn('x').shorter(string("ab").retn('y'));
        assert_eq!(parser.parse("ab").unwrap(), 'x');
    }

    #[test]
    fn test_failures_are_skipped() {
        let parser = longest(vec![string("zz").retn(0), string("a").retn(1)]);
        assert_eq!(parser.parse("a").unwrap(), 1);
        assert!(longest(vec![string("zz").retn(0)]).parse("a").is_err());
    }
}
