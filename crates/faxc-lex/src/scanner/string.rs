//! String literals: raw strings, triple-quoted multiline strings,
//! backslash escapes, and `$`/`${...}` interpolation.

use faxc_util::diagnostic::DiagnosticCode;

use crate::builder::Builder;
use crate::token::TokenKind;

fn decode_escape(byte: u8) -> u8 {
    match byte {
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'v' => 0x0B,
        other => other,
    }
}

impl<'src, 'zone, 'b, B: Builder<'zone>> super::Scanner<'src, 'zone, 'b, B> {
    /// Scans a string literal. The cursor sits on `r` (if `is_raw`) or
    /// directly on the opening quote.
    pub(super) fn scan_string(&mut self, is_raw: bool) {
        if is_raw {
            self.pos += 1; // consume the 'r' prefix
        }
        let quote = self.peek();
        let token_start = self.current_location();
        self.pos += 1; // consume the opening quote

        let multiline = self.peek() == quote && self.peek_at(1) == quote;
        if multiline {
            self.pos += 2;
            self.skip_blank_first_line();
        }

        let mut segment_location = self.current_location();
        let mut content_start = self.pos;
        self.string_scratch.clear();
        let mut scratch_active = false;
        let mut interpolated = false;

        loop {
            match self.peek() {
                0 => {
                    self.report_error(
                        DiagnosticCode::E_LEX_UNTERMINATED_STRING,
                        "Unterminated string literal".to_string(),
                        token_start,
                    );
                    return;
                }
                c if c == quote => {
                    if multiline && !(self.peek_at(1) == quote && self.peek_at(2) == quote) {
                        // A lone quote byte inside a triple-quoted string
                        // is just content.
                        if scratch_active {
                            self.string_scratch.push(c);
                        }
                        self.pos += 1;
                        continue;
                    }
                    let value = self.take_segment(content_start, scratch_active);
                    self.pos += if multiline { 3 } else { 1 };
                    let kind = if interpolated { TokenKind::StringInterpolationEnd } else { TokenKind::String };
                    let handle = self.builder.register_string(&value);
                    self.add_token(kind, handle, segment_location);
                    return;
                }
                b'\\' if !is_raw => {
                    if !scratch_active {
                        self.string_scratch.extend_from_slice(&self.source[content_start..self.pos]);
                        scratch_active = true;
                    }
                    let decoded = decode_escape(self.peek_at(1));
                    self.string_scratch.push(decoded);
                    self.pos += 2;
                    content_start = self.pos;
                }
                b'$' if !is_raw => {
                    let value = self.take_segment(content_start, scratch_active);
                    let handle = self.builder.register_string(&value);
                    self.add_token(TokenKind::StringInterpolation, handle, segment_location);
                    interpolated = true;
                    scratch_active = false;
                    self.string_scratch.clear();

                    self.pos += 1; // consume '$'
                    match self.peek() {
                        b'{' => {
                            self.pos += 1; // consume '{'
                            if !self.scan_interpolation_expr() {
                                return;
                            }
                        }
                        c if super::identifier::is_identifier_start(c) => {
                            self.scan_identifier(false);
                        }
                        _ => {
                            self.report_error(
                                DiagnosticCode::E_LEX_BAD_INTERPOLATION,
                                "Bad string interpolation start".to_string(),
                                self.current_location(),
                            );
                            return;
                        }
                    }

                    segment_location = self.current_location();
                    content_start = self.pos;
                }
                _ => {
                    if scratch_active {
                        let b = self.peek();
                        self.string_scratch.push(b);
                    }
                    self.pos += 1;
                }
            }
        }
    }

    /// Returns the accumulated value of the segment running from
    /// `content_start` to the cursor: either the scratch buffer (if an
    /// escape fired within it) or a direct, unescaped copy of the source
    /// slice.
    fn take_segment(&mut self, content_start: usize, scratch_active: bool) -> String {
        let bytes: &[u8] = if scratch_active { &self.string_scratch } else { &self.source[content_start..self.pos] };
        String::from_utf8_lossy(bytes).into_owned()
    }

    /// If the first line after a triple-quote opener contains only
    /// whitespace before a newline, advances the cursor past that
    /// newline.
    fn skip_blank_first_line(&mut self) {
        let mut look = self.pos;
        while matches!(self.source.get(look).copied(), Some(b' ') | Some(b'\t') | Some(b'\r')) {
            look += 1;
        }
        if self.source.get(look).copied() == Some(b'\n') {
            self.pos = look + 1;
        }
    }

    /// Scans tokens for a `${...}` interpolation body until the matching
    /// terminating `}` is reached. Braces that appear as ordinary tokens
    /// within the body (e.g. a nested object literal) are scanned
    /// normally and tracked by a local nesting counter so the terminator
    /// is told apart from them; unlike a literal brace pair, the
    /// terminator itself is never emitted as a token.
    fn scan_interpolation_expr(&mut self) -> bool {
        let mut depth: i32 = 0;
        loop {
            if self.finished {
                return false;
            }
            match self.peek() {
                0 => {
                    self.report_error(
                        DiagnosticCode::E_LEX_UNTERMINATED_STRING,
                        "Unterminated string literal".to_string(),
                        self.current_location(),
                    );
                    return false;
                }
                b'}' if depth == 0 => {
                    self.pos += 1;
                    return true;
                }
                b'{' => {
                    depth += 1;
                    if !self.scan_token() {
                        return false;
                    }
                }
                b'}' => {
                    depth -= 1;
                    if !self.scan_token() {
                        return false;
                    }
                }
                _ => {
                    if !self.scan_token() {
                        return false;
                    }
                }
            }
        }
    }
}
