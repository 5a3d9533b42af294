//! Hand-off from the character level to the token level.

use crate::parser::Parser;
use crate::primitives::eof;
use crate::token::{Token, TokenValue};

impl Parser<TokenValue> {
    /// Lexer running this tokenizer repeatedly, skipping `delimiter` before,
    /// between and after tokens. The delimiter is optional everywhere so
    /// adjacent tokens need no separation.
    pub fn lexer<D: 'static>(self, delimiter: Parser<D>) -> Parser<Vec<Token>> {
        let delimiter = delimiter.optional();
        delimiter.clone().then(self.token().sep_end_by(delimiter))
    }
}

impl<T: 'static> Parser<T> {
    /// Runs this token-level parser over the tokens `lexer` produces. All
    /// tokens must be consumed.
    pub fn from_lexer(self, lexer: Parser<Vec<Token>>) -> Parser<T> {
        let name = self.name().to_string();
        let parser = self.followed_by(eof());
        Parser::from_fn(name, move |ctx| {
            let tokens = lexer.apply(ctx)?;
            ctx.apply_on_tokens(&tokens, &parser)
        })
    }

    /// Shorthand for `from_lexer(tokenizer.lexer(delimiter))`
    pub fn from_tokenizer<D: 'static>(self, tokenizer: Parser<TokenValue>, delimiter: Parser<D>) -> Parser<T> {
        self.from_lexer(tokenizer.lexer(delimiter))
    }
}
