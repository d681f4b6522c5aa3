//! Integer and floating-point literals.
//!
//! Walks the builder's `number_trie` a digit at a time so that repeated
//! occurrences of the same lexeme (a common case in loop bounds, array
//! sizes, etc.) share one interner handle instead of re-registering and
//! re-parsing every time.

use faxc_util::diagnostic::DiagnosticCode;

use crate::builder::Builder;
use crate::token::TokenKind;

impl<'src, 'zone, 'b, B: Builder<'zone>> super::Scanner<'src, 'zone, 'b, B> {
    pub(super) fn scan_number(&mut self) {
        let start = self.current_location();
        let start_pos = self.pos;
        let mut is_double = false;

        if self.peek() == b'.' {
            is_double = true;
            self.pos += 1;
            self.consume_digits();
        } else if self.peek() == b'0' && matches!(self.peek_at(1), b'x' | b'X') {
            self.pos += 2;
            self.consume_hex_digits();
            self.finish_number(start, start_pos, false, true);
            return;
        } else {
            self.consume_digits();
            if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
                is_double = true;
                self.pos += 1;
                self.consume_digits();
            }
        }

        if matches!(self.peek(), b'e' | b'E') {
            let mark = self.pos;
            let mut cursor = self.pos + 1;
            if matches!(self.source.get(cursor).copied(), Some(b'+') | Some(b'-')) {
                cursor += 1;
            }
            if self.source.get(cursor).copied().unwrap_or(0).is_ascii_digit() {
                is_double = true;
                self.pos = cursor;
                self.consume_digits();
            } else {
                self.pos = mark;
            }
        }

        self.finish_number(start, start_pos, is_double, false);
    }

    fn consume_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.pos += 1;
        }
    }

    fn consume_hex_digits(&mut self) {
        while self.peek().is_ascii_hexdigit() {
            self.pos += 1;
        }
    }

    fn finish_number(&mut self, start: faxc_util::source::Location, start_pos: usize, is_double: bool, is_hex: bool) {
        let lexeme = &self.source[start_pos..self.pos];
        let zone = self.builder.zone();
        let trie = self.builder.number_trie();
        let leaf = trie.walk(zone, lexeme);
        let mut data = leaf.terminal();

        if data.handle < 0 {
            let text = std::str::from_utf8(lexeme).expect("number lexeme is ASCII");
            let handle = if is_double {
                let value: f64 = text.parse().unwrap_or(f64::NAN);
                self.builder.register_double(value)
            } else {
                let radix = if is_hex { 16 } else { 10 };
                let digits = if is_hex { &text[2..] } else { text };
                match i64::from_str_radix(digits, radix) {
                    Ok(value) => self.builder.register_integer(value),
                    Err(_) => {
                        self.report_error(
                            DiagnosticCode::E_LEX_INTEGER_OVERFLOW,
                            "Unhandled large integer literal".to_string(),
                            start,
                        );
                        -1
                    }
                }
            };
            data.handle = handle;
            leaf.set_terminal(data);
        }

        if data.handle >= 0 {
            let kind = if is_double { TokenKind::Double } else { TokenKind::Integer };
            self.add_token(kind, data.handle, start);
        }
    }
}
