//! Identifiers and reserved keywords.

use crate::builder::Builder;
use crate::token::TokenKind;

/// Whether `b` may begin an identifier: a letter, `_`, or `$`.
pub(super) fn is_identifier_start(b: u8) -> bool {
    b == b'_' || b == b'$' || b.is_ascii_alphabetic()
}

/// Whether `b` may continue an identifier. `$` only counts when
/// `allow_dollar` is set — false inside the identifier immediately after
/// a string interpolation `$`, so `"$foo$bar"` reads `foo` as one
/// identifier rather than swallowing the second `$`.
fn is_identifier_part(b: u8, allow_dollar: bool) -> bool {
    b == b'_' || b.is_ascii_alphanumeric() || (allow_dollar && b == b'$')
}

impl<'src, 'zone, 'b, B: Builder<'zone>> super::Scanner<'src, 'zone, 'b, B> {
    /// Scans an identifier or keyword starting at the cursor (which must
    /// already sit on an identifier-start byte) and emits the
    /// corresponding token.
    pub(super) fn scan_identifier(&mut self, allow_dollar: bool) {
        let start = self.current_location();
        let start_pos = self.pos;
        self.pos += 1;
        while is_identifier_part(self.peek(), allow_dollar) {
            self.pos += 1;
        }
        let lexeme = &self.source[start_pos..self.pos];

        let zone = self.builder.zone();
        let trie = self.builder.identifier_trie();
        let leaf = trie.walk(zone, lexeme);
        let mut data = leaf.terminal();

        if data.is_keyword {
            self.add_token(data.keyword, 0, start);
            return;
        }

        if data.handle < 0 {
            let spelling = std::str::from_utf8(lexeme).expect("identifier lexeme is ASCII");
            data.handle = self.builder.register_identifier(spelling);
            leaf.set_terminal(data);
        }

        self.add_token(TokenKind::Identifier, data.handle, start);
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::SimpleBuilder;
    use crate::scanner::Scanner;
    use crate::token::TokenKind;
    use faxc_util::arena::Zone;
    use faxc_util::source::Location;

    macro_rules! scan {
        ($src:expr) => {{
            let zone = Zone::new();
            let mut builder = SimpleBuilder::new(&zone);
            let tokens = Scanner::new($src.as_bytes(), Location::from_raw(0), &mut builder).scan();
            (tokens, builder)
        }};
    }

    #[test]
    fn plain_identifier() {
        let (tokens, builder) = scan!("hello");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(builder.identifier(tokens[0].aux), "hello");
    }

    #[test]
    fn dollar_and_underscore_start_identifiers() {
        let (tokens, builder) = scan!("$x _y");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(builder.identifier(tokens[0].aux), "$x");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(builder.identifier(tokens[1].aux), "_y");
    }

    #[test]
    fn repeated_identifier_shares_handle() {
        let (tokens, _) = scan!("foo foo");
        assert_eq!(tokens[0].aux, tokens[1].aux);
    }

    #[test]
    fn keyword_is_emitted_as_its_own_token() {
        let (tokens, _) = scan!("if");
        assert_eq!(tokens[0].kind, TokenKind::KwIf);
    }

    #[test]
    fn extending_a_keyword_yields_an_identifier() {
        let (tokens, builder) = scan!("ifx");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(builder.identifier(tokens[0].aux), "ifx");
    }
}
