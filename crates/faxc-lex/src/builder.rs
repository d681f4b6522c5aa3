//! The scanner's external collaborator.
//!
//! Interning, source-buffer ownership and diagnostic sinks all live outside
//! the scanner, reached only through this trait — mirroring how the
//! original scanner took a `Builder*` and never touched a string table or a
//! `FILE*` directly. A parser, REPL, or test harness supplies its own
//! implementation; [`SimpleBuilder`] is the in-memory one used by this
//! crate's own tests and benchmarks.
//!
//! `Builder` carries an explicit `'zone` parameter rather than an elided
//! one because its two tries are allocated once (inline, by value) and
//! then grown node-by-node out of the zone for the lifetime of a whole
//! scan — a borrow tied to `&self` would not let callers hold a trie
//! reference across calls that also need `&mut self` (e.g.
//! `register_identifier`).

use faxc_util::arena::Zone;
use faxc_util::diagnostic::{DiagnosticCode, Handler};
use faxc_util::source::Location;
use faxc_util::trie::TrieNode;

use crate::token::TokenKind;

/// Cached metadata a terminal (leaf) trie node carries for number and
/// identifier recognition: an interner handle (`-1` until registered) and,
/// for identifiers, whether the spelling is a reserved keyword.
#[derive(Clone, Copy, Debug)]
pub struct TerminalData {
    pub handle: i32,
    pub is_keyword: bool,
    pub keyword: TokenKind,
}

impl Default for TerminalData {
    fn default() -> Self {
        Self { handle: -1, is_keyword: false, keyword: TokenKind::Eof }
    }
}

/// Everything the scanner needs from outside itself: a place to register
/// literals as they're recognised, a place to report errors, and the two
/// tries (number and identifier) that cache previously-seen lexemes'
/// interner handles across a scan.
pub trait Builder<'zone> {
    /// The arena tokens, tries and interned strings are allocated from.
    fn zone(&self) -> &'zone Zone;

    /// Registers an integer literal's already-parsed value, returning a
    /// handle the scanner stores as the token's auxiliary index.
    fn register_integer(&mut self, value: i64) -> i32;

    /// Registers a floating-point literal's already-parsed value.
    fn register_double(&mut self, value: f64) -> i32;

    /// Registers an identifier spelling, returning a handle. Implementors
    /// typically intern by spelling so repeated identifiers share a
    /// handle.
    fn register_identifier(&mut self, spelling: &str) -> i32;

    /// Registers a (possibly escape-decoded) string literal's contents.
    fn register_string(&mut self, contents: &str) -> i32;

    /// Reports a scanning error at `location`.
    fn report_error(&mut self, code: DiagnosticCode, message: String, location: Location);

    /// The trie used to cache number-lexeme interner handles.
    fn number_trie(&self) -> &TrieNode<'zone, TerminalData>;

    /// The trie used to cache identifier-lexeme interner handles and
    /// keyword classification.
    fn identifier_trie(&self) -> &TrieNode<'zone, TerminalData>;
}

/// An in-memory [`Builder`] that keeps every registered literal in a
/// growable vector and every error in a vector of `(code, message,
/// location)` triples. Used by this crate's own tests and by
/// `benches/lexer_bench.rs`; a real compiler driver would replace this
/// with one backed by its own string interner.
pub struct SimpleBuilder<'zone> {
    zone: &'zone Zone,
    integers: Vec<i64>,
    doubles: Vec<f64>,
    identifiers: Vec<String>,
    strings: Vec<String>,
    errors: Vec<(DiagnosticCode, String, Location)>,
    number_trie: TrieNode<'zone, TerminalData>,
    identifier_trie: TrieNode<'zone, TerminalData>,
}

/// The reserved keywords, pre-registered into every fresh identifier trie
/// so that scanning a spelling that exactly matches one of these yields
/// the keyword's token instead of a plain `IDENTIFIER` (§4.6, P8).
const KEYWORDS: &[TokenKind] = &[
    TokenKind::KwIf,
    TokenKind::KwElse,
    TokenKind::KwWhile,
    TokenKind::KwFor,
    TokenKind::KwFn,
    TokenKind::KwReturn,
    TokenKind::KwLet,
    TokenKind::KwVar,
    TokenKind::KwConst,
    TokenKind::KwClass,
    TokenKind::KwStruct,
    TokenKind::KwEnum,
    TokenKind::KwTrait,
    TokenKind::KwImpl,
    TokenKind::KwTrue,
    TokenKind::KwFalse,
    TokenKind::KwNull,
    TokenKind::KwBreak,
    TokenKind::KwContinue,
    TokenKind::KwImport,
    TokenKind::KwExport,
    TokenKind::KwMatch,
    TokenKind::KwAsync,
    TokenKind::KwAwait,
    TokenKind::KwIn,
    TokenKind::KwNew,
];

impl<'zone> SimpleBuilder<'zone> {
    pub fn new(zone: &'zone Zone) -> Self {
        let identifier_trie = TrieNode::new();
        for &keyword in KEYWORDS {
            let leaf = identifier_trie.walk(zone, keyword.syntax().as_bytes());
            leaf.set_terminal(TerminalData { handle: -1, is_keyword: true, keyword });
        }
        Self {
            zone,
            integers: Vec::new(),
            doubles: Vec::new(),
            identifiers: Vec::new(),
            strings: Vec::new(),
            errors: Vec::new(),
            number_trie: TrieNode::new(),
            identifier_trie,
        }
    }

    pub fn integer(&self, handle: i32) -> i64 {
        self.integers[handle as usize]
    }

    pub fn double(&self, handle: i32) -> f64 {
        self.doubles[handle as usize]
    }

    pub fn identifier(&self, handle: i32) -> &str {
        &self.identifiers[handle as usize]
    }

    pub fn string(&self, handle: i32) -> &str {
        &self.strings[handle as usize]
    }

    pub fn errors(&self) -> &[(DiagnosticCode, String, Location)] {
        &self.errors
    }
}

impl<'zone> Builder<'zone> for SimpleBuilder<'zone> {
    fn zone(&self) -> &'zone Zone {
        self.zone
    }

    fn register_integer(&mut self, value: i64) -> i32 {
        self.integers.push(value);
        (self.integers.len() - 1) as i32
    }

    fn register_double(&mut self, value: f64) -> i32 {
        self.doubles.push(value);
        (self.doubles.len() - 1) as i32
    }

    fn register_identifier(&mut self, spelling: &str) -> i32 {
        if let Some(existing) = self.identifiers.iter().position(|s| s == spelling) {
            return existing as i32;
        }
        self.identifiers.push(spelling.to_string());
        (self.identifiers.len() - 1) as i32
    }

    fn register_string(&mut self, contents: &str) -> i32 {
        self.strings.push(contents.to_string());
        (self.strings.len() - 1) as i32
    }

    fn report_error(&mut self, code: DiagnosticCode, message: String, location: Location) {
        self.errors.push((code, message, location));
    }

    fn number_trie(&self) -> &TrieNode<'zone, TerminalData> {
        &self.number_trie
    }

    fn identifier_trie(&self) -> &TrieNode<'zone, TerminalData> {
        &self.identifier_trie
    }
}

/// Convenience for tests that only care about diagnostics, not handles:
/// routes [`Builder::report_error`] into a shared [`Handler`] as well as
/// the in-memory log.
pub struct HandlerBuilder<'zone, 'h> {
    inner: SimpleBuilder<'zone>,
    handler: &'h Handler,
}

impl<'zone, 'h> HandlerBuilder<'zone, 'h> {
    pub fn new(zone: &'zone Zone, handler: &'h Handler) -> Self {
        Self { inner: SimpleBuilder::new(zone), handler }
    }

    pub fn identifier(&self, handle: i32) -> &str {
        self.inner.identifier(handle)
    }

    pub fn integer(&self, handle: i32) -> i64 {
        self.inner.integer(handle)
    }

    pub fn double(&self, handle: i32) -> f64 {
        self.inner.double(handle)
    }

    pub fn string(&self, handle: i32) -> &str {
        self.inner.string(handle)
    }
}

impl<'zone, 'h> Builder<'zone> for HandlerBuilder<'zone, 'h> {
    fn zone(&self) -> &'zone Zone {
        self.inner.zone()
    }

    fn register_integer(&mut self, value: i64) -> i32 {
        self.inner.register_integer(value)
    }

    fn register_double(&mut self, value: f64) -> i32 {
        self.inner.register_double(value)
    }

    fn register_identifier(&mut self, spelling: &str) -> i32 {
        self.inner.register_identifier(spelling)
    }

    fn register_string(&mut self, contents: &str) -> i32 {
        self.inner.register_string(contents)
    }

    fn report_error(&mut self, code: DiagnosticCode, message: String, location: Location) {
        self.handler
            .build_error(message.clone())
            .code(code)
            .location(location)
            .emit(self.handler);
        self.inner.report_error(code, message, location);
    }

    fn number_trie(&self) -> &TrieNode<'zone, TerminalData> {
        self.inner.number_trie()
    }

    fn identifier_trie(&self) -> &TrieNode<'zone, TerminalData> {
        self.inner.identifier_trie()
    }
}
