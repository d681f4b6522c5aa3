//! The streaming lexical scanner: reads one source buffer byte-by-byte
//! and emits a flat [`TokenInfo`] stream, reconciling the bracket-balance
//! stack as it goes.
//!
//! Split by scanned-construct, the way the teacher repo's own lexer
//! splits `lexer/{core,number,identifier,string,comment}.rs`: this file
//! holds the cursor, the top-level entry procedure and the dispatch
//! table; each sibling module owns one kind of lexeme.

mod comment;
mod identifier;
mod number;
mod punctuation;
mod string;

pub use punctuation::PunctuationData;

use faxc_util::diagnostic::DiagnosticCode;
use faxc_util::source::Location;

use crate::bracket_stack::{self, BracketMarker};
use crate::builder::Builder;
use crate::token::{TokenInfo, TokenKind};

/// Reads `source` from `base` onward, driven by a [`Builder`] for
/// interning and error reporting.
///
/// `'src` is the lifetime of the borrowed source bytes, `'zone` the
/// arena backing tokens, tries and copied lexemes, `'b` the lifetime of
/// the mutable borrow of the builder itself (independent of `'zone`: the
/// builder's *tries* live as long as the zone, but the builder value the
/// scanner borrows need not).
pub struct Scanner<'src, 'zone, 'b, B: Builder<'zone>> {
    source: &'src [u8],
    pos: usize,
    base: Location,
    builder: &'b mut B,
    punctuation: punctuation::PunctuationTrie<'zone>,
    tokens: Vec<TokenInfo>,
    bracket_stack: Vec<BracketMarker>,
    finished: bool,
    /// Reusable byte buffer for string literals whose value diverges
    /// from the raw source slice (escapes, interpolation segments).
    string_scratch: Vec<u8>,
}

impl<'src, 'zone, 'b, B: Builder<'zone>> Scanner<'src, 'zone, 'b, B> {
    pub fn new(source: &'src [u8], base: Location, builder: &'b mut B) -> Self {
        let punctuation = punctuation::build(builder.zone());
        Self {
            source,
            pos: 0,
            base,
            builder,
            punctuation,
            tokens: Vec::new(),
            bracket_stack: Vec::new(),
            finished: false,
            string_scratch: Vec::new(),
        }
    }

    /// Runs the scanner to completion: skips a leading BOM and shebang,
    /// then repeatedly calls `scan_token` until it reports no more input,
    /// appending a final `EOF` token. Consumes the scanner, mirroring the
    /// original's `EncodedTokens()`, which hands back the finished buffer
    /// and marks the run complete by clearing the input pointer.
    pub fn scan(mut self) -> Vec<TokenInfo> {
        self.skip_bom();
        if !self.finished {
            self.skip_shebang();
        }
        while self.scan_token() {}
        let eof_location = self.current_location();
        self.add_token(TokenKind::Eof, 0, eof_location);
        self.tokens
    }

    fn skip_bom(&mut self) {
        const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
        if self.source.len() >= 3 && self.source[0..3] == BOM {
            self.pos = 3;
            return;
        }
        if self.source.first() == Some(&0xEF) {
            self.report_error(DiagnosticCode::E_LEX_MALFORMED_BOM, "Malformed UTF-8 BOM".to_string(), self.current_location());
        }
    }

    fn skip_shebang(&mut self) {
        if self.peek() == b'#' {
            while !matches!(self.peek(), 0 | b'\n') {
                self.pos += 1;
            }
        }
    }

    fn scan_token(&mut self) -> bool {
        if self.finished {
            return false;
        }
        match self.peek() {
            0 => false,
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.skip_whitespace();
                true
            }
            b'\'' | b'"' => {
                self.scan_string(false);
                true
            }
            b'.' if self.peek_at(1).is_ascii_digit() => {
                self.scan_number();
                true
            }
            b'/' if self.peek_at(1) == b'/' => {
                self.scan_line_comment();
                true
            }
            b'/' if self.peek_at(1) == b'*' => {
                self.scan_block_comment();
                true
            }
            b'r' if matches!(self.peek_at(1), b'\'' | b'"') => {
                self.scan_string(true);
                true
            }
            c if c.is_ascii_digit() => {
                self.scan_number();
                true
            }
            c if identifier::is_identifier_start(c) => {
                self.scan_identifier(true);
                true
            }
            _ => {
                self.scan_punctuation();
                true
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    // -- cursor -----------------------------------------------------

    /// The byte at the cursor, or `0` past the end — the scanner treats
    /// its input as a null-terminated buffer throughout, so end-of-input
    /// and an embedded NUL are indistinguishable (matching the original).
    fn peek(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn current_location(&self) -> Location {
        self.base + self.pos as u32
    }

    // -- token buffer & bracket stack ---------------------------------

    fn add_token(&mut self, kind: TokenKind, aux: i32, location: Location) -> usize {
        self.tokens.push(TokenInfo::new(kind, aux, location));
        self.tokens.len() - 1
    }

    fn pop_token_begin_marker(&mut self, target: TokenKind) {
        bracket_stack::reconcile(&mut self.bracket_stack, &mut self.tokens, target);
    }

    /// Depth of the bracket stack, used by string interpolation to know
    /// when a synthetic `{` marker it pushed has been popped back off.
    fn bracket_depth(&self) -> usize {
        self.bracket_stack.len()
    }

    // -- error reporting ----------------------------------------------

    /// Reports an error and marks the scan finished: the original never
    /// attempts recovery, so every error path ends here.
    fn report_error(&mut self, code: DiagnosticCode, message: String, location: Location) {
        self.builder.report_error(code, message, location);
        self.finished = true;
    }

    fn report_unrecognized_char(&mut self, location: Location) {
        let byte = self.peek();
        self.report_error(
            DiagnosticCode::E_LEX_UNRECOGNISED_CHAR,
            format!("Unrecognized character: {:#04x}", byte),
            location,
        );
    }
}
