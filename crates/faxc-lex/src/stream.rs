//! A read cursor over a finished token record array (§4.10).
//!
//! The scanner itself never reads back what it wrote; `TokenStream` is
//! the collaborator a parser (out of scope here) drives instead.

use faxc_util::source::Location;

use crate::token::{TokenInfo, TokenKind};

/// Index arithmetic over a completed `Vec<TokenInfo>`. Out-of-range
/// access is a caller precondition, not an error — the original treats
/// running off the end of the buffer as undefined, since a well-formed
/// token stream always ends with `EOF` and no well-behaved caller
/// advances past it.
pub struct TokenStream<'a> {
    tokens: &'a [TokenInfo],
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [TokenInfo]) -> Self {
        Self { tokens, position: 0 }
    }

    /// The kind of the token at the cursor.
    pub fn current(&self) -> TokenKind {
        self.tokens[self.position].kind
    }

    /// The auxiliary index of the token at the cursor: an interner
    /// handle, or, for a bracket opener, the distance to its closer.
    pub fn current_index(&self) -> i32 {
        self.tokens[self.position].aux
    }

    /// The source location of the token at the cursor.
    pub fn current_location(&self) -> Location {
        self.tokens[self.position].location
    }

    /// The full token record at the cursor.
    pub fn current_token(&self) -> TokenInfo {
        self.tokens[self.position]
    }

    /// Moves the cursor forward by one token.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Moves the cursor forward by `n` tokens.
    pub fn skip(&mut self, n: usize) {
        self.position += n;
    }

    /// Moves the cursor to an absolute index, e.g. one previously read
    /// with [`TokenStream::position`] — or an opener's distance added to
    /// its own index, to jump straight past a bracketed span.
    pub fn rewind_to(&mut self, position: usize) {
        self.position = position;
    }

    /// The cursor's current index into the token array.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the cursor sits on the final `EOF` token.
    pub fn at_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SimpleBuilder;
    use crate::scanner::Scanner;
    use faxc_util::arena::Zone;

    #[test]
    fn advance_walks_token_by_token() {
        let zone = Zone::new();
        let mut builder = SimpleBuilder::new(&zone);
        let tokens = Scanner::new(b"a b", Location::from_raw(0), &mut builder).scan();
        let mut stream = TokenStream::new(&tokens);
        assert_eq!(stream.current(), TokenKind::Identifier);
        stream.advance();
        assert_eq!(stream.current(), TokenKind::Identifier);
        stream.advance();
        assert!(stream.at_eof());
    }

    #[test]
    fn rewind_to_jumps_past_a_bracketed_span() {
        let zone = Zone::new();
        let mut builder = SimpleBuilder::new(&zone);
        let tokens = Scanner::new(b"a<b>c", Location::from_raw(0), &mut builder).scan();
        let mut stream = TokenStream::new(&tokens);
        stream.advance(); // now on `<`
        let opener_index = stream.position();
        let distance = stream.current_index();
        stream.rewind_to(opener_index + distance as usize);
        assert_eq!(stream.current(), TokenKind::Gt);
    }

    #[test]
    fn skip_moves_by_n() {
        let zone = Zone::new();
        let mut builder = SimpleBuilder::new(&zone);
        let tokens = Scanner::new(b"a b c", Location::from_raw(0), &mut builder).scan();
        let mut stream = TokenStream::new(&tokens);
        stream.skip(2);
        assert_eq!(stream.current(), TokenKind::Identifier);
        assert_eq!(stream.position(), 2);
    }
}
