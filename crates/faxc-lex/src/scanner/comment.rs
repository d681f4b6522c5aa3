//! Single-line and nestable multi-line comments.

use faxc_util::diagnostic::DiagnosticCode;

use crate::builder::Builder;

impl<'src, 'zone, 'b, B: Builder<'zone>> super::Scanner<'src, 'zone, 'b, B> {
    /// `//` through end-of-line. Reaching EOF mid-comment just ends the
    /// comment (and the scan) cleanly; it is not an error.
    pub(super) fn scan_line_comment(&mut self) {
        self.pos += 2; // consume "//"
        while !matches!(self.peek(), 0 | b'\n') {
            self.pos += 1;
        }
    }

    /// `/* ... */`, nestable: a `/*` increments depth, a `*/` decrements
    /// it, and the comment ends only once depth returns to zero. Reaching
    /// EOF before that is `Unterminated multiline comment`.
    pub(super) fn scan_block_comment(&mut self) {
        let start = self.current_location();
        self.pos += 2; // consume opening "/*"
        let mut depth: u32 = 1;
        loop {
            match self.peek() {
                0 => {
                    self.report_error(
                        DiagnosticCode::E_LEX_UNTERMINATED_COMMENT,
                        "Unterminated multiline comment".to_string(),
                        start,
                    );
                    return;
                }
                b'/' if self.peek_at(1) == b'*' => {
                    self.pos += 2;
                    depth += 1;
                }
                b'*' if self.peek_at(1) == b'/' => {
                    self.pos += 2;
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => self.pos += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::SimpleBuilder;
    use crate::scanner::Scanner;
    use crate::token::TokenKind;
    use faxc_util::arena::Zone;
    use faxc_util::source::Location;

    fn scan(src: &str) -> Vec<crate::token::TokenInfo> {
        let zone = Zone::new();
        let mut builder = SimpleBuilder::new(&zone);
        Scanner::new(src.as_bytes(), Location::from_raw(0), &mut builder).scan()
    }

    #[test]
    fn line_comment_consumes_through_newline() {
        let tokens = scan("a // trailing\nb");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn line_comment_at_eof_ends_cleanly() {
        let tokens = scan("a // trailing");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn nested_block_comment_requires_matching_depth() {
        let tokens = scan("/* a /* b */ c */d");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let zone = Zone::new();
        let mut builder = SimpleBuilder::new(&zone);
        let tokens = Scanner::new(b"/* never closed", Location::from_raw(0), &mut builder).scan();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(builder.errors().len(), 1);
        assert_eq!(builder.errors()[0].0, faxc_util::diagnostic::DiagnosticCode::E_LEX_UNTERMINATED_COMMENT);
    }
}
