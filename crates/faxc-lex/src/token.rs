//! Token kinds and the packed token record the scanner emits.
//!
//! [`TokenKind`] is the fixed, closed enumeration the original called the
//! "token kind table": every entry carries its literal syntax (used once,
//! at construction, to populate the punctuation trie) and a parser
//! precedence (carried through for the out-of-scope parser; the scanner
//! itself never reads it). The macro below mirrors the original's
//! `TOKEN_LIST(T)` x-macro — one riff per token instead of one table per
//! field — so adding a token only means adding one line.
//!
//! Declaration order fixes each variant's discriminant, which is the
//! numeric ordering §4.8's bracket-stack reconciliation relies on to decide
//! whether an unmatched opener should be silently discarded under a
//! stronger closer. `Lt` sits below `LParen`, which sits below `LBrace`,
//! matching the original token table's ordering for these three (the
//! original `tokens.h` enumeration was not part of the retrieved sources;
//! this ordering is chosen to reproduce the worked example in the
//! specification and is recorded as an open question in `DESIGN.md`).

use faxc_util::source::Location;

macro_rules! token_kinds {
    ($($name:ident, $syntax:expr, $prec:expr;)+) => {
        /// A single lexical category. `repr(u8)` so a [`TokenInfo`] can pack
        /// kind and auxiliary index into one word, the way the original
        /// packed `value << 8 | token` into a machine word.
        #[repr(u8)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub enum TokenKind {
            $($name,)+
        }

        impl TokenKind {
            /// The literal spelling used to populate the punctuation trie.
            /// Empty for kinds that are never produced by a direct trie
            /// walk (literals, identifiers, EOF).
            pub fn syntax(self) -> &'static str {
                match self {
                    $(TokenKind::$name => $syntax,)+
                }
            }

            /// Parser precedence. Unused by the scanner; carried through
            /// for the out-of-scope parser exactly as the original table
            /// did.
            pub fn precedence(self) -> i32 {
                match self {
                    $(TokenKind::$name => $prec,)+
                }
            }
        }
    };
}

token_kinds! {
    Eof, "", 0;

    Integer, "", 0;
    Double, "", 0;
    Identifier, "", 0;
    String, "", 0;
    StringInterpolation, "", 0;
    StringInterpolationEnd, "", 0;

    KwIf, "if", 0;
    KwElse, "else", 0;
    KwWhile, "while", 0;
    KwFor, "for", 0;
    KwFn, "fn", 0;
    KwReturn, "return", 0;
    KwLet, "let", 0;
    KwVar, "var", 0;
    KwConst, "const", 0;
    KwClass, "class", 0;
    KwStruct, "struct", 0;
    KwEnum, "enum", 0;
    KwTrait, "trait", 0;
    KwImpl, "impl", 0;
    KwTrue, "true", 0;
    KwFalse, "false", 0;
    KwNull, "null", 0;
    KwBreak, "break", 0;
    KwContinue, "continue", 0;
    KwImport, "import", 0;
    KwExport, "export", 0;
    KwMatch, "match", 0;
    KwAsync, "async", 0;
    KwAwait, "await", 0;
    KwIn, "in", 0;
    KwNew, "new", 0;

    // Bracket-like tokens. Declaration order fixes the numeric ordering
    // used by bracket-stack reconciliation (§4.8): Lt < LParen < LBrace.
    Lt, "<", 40;
    LParen, "(", 0;
    LBrace, "{", 0;

    Gt, ">", 40;
    GtStart, "", 40;
    Shr, ">>", 50;
    RParen, ")", 0;
    RBrace, "}", 0;
    LBracket, "[", 0;
    RBracket, "]", 0;

    Comma, ",", 1;
    Semicolon, ";", 0;
    Colon, ":", 0;
    ColonColon, "::", 0;
    Dot, ".", 80;
    DotDot, "..", 20;
    DotDotDot, "...", 20;
    Arrow, "->", 0;
    FatArrow, "=>", 0;

    Plus, "+", 60;
    Minus, "-", 60;
    Star, "*", 70;
    Slash, "/", 70;
    Percent, "%", 70;

    PlusEq, "+=", 10;
    MinusEq, "-=", 10;
    StarEq, "*=", 10;
    SlashEq, "/=", 10;
    PercentEq, "%=", 10;

    Eq, "=", 10;
    EqEq, "==", 30;
    NotEq, "!=", 30;
    Bang, "!", 0;

    LtEq, "<=", 40;
    GtEq, ">=", 40;

    AndAnd, "&&", 15;
    OrOr, "||", 12;
    Amp, "&", 25;
    Pipe, "|", 22;
    Caret, "^", 27;
    Tilde, "~", 0;

    At, "@", 0;
    Dollar, "$", 0;
    Question, "?", 0;
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::Eof
    }
}

/// Numeric rank of a bracket-opener token, used by bracket-stack
/// reconciliation to decide whether a stray opener below a stronger
/// closer should be discarded (§4.8). Only meaningful for `Lt`, `LParen`
/// and `LBrace`; the discriminant ordering already encodes it, so this is
/// just `self as u8` spelled out for clarity at call sites.
impl TokenKind {
    pub fn bracket_rank(self) -> u8 {
        self as u8
    }
}

/// A scanned token: its kind, a signed auxiliary index, and the source
/// location it started at.
///
/// The auxiliary index carries different things depending on `kind`:
/// the interner handle for `Integer`/`Double`/`Identifier`/`String`-family
/// tokens, and — after bracket-stack reconciliation patches it in — the
/// token-count distance from a bracket opener to its matching closer. This
/// mirrors the original's packed `value << 8 | token` word; here it is two
/// plain fields instead of one bit-packed one, since nothing downstream
/// needs the bit-level layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TokenInfo {
    pub kind: TokenKind,
    pub aux: i32,
    pub location: Location,
}

impl TokenInfo {
    pub fn new(kind: TokenKind, aux: i32, location: Location) -> Self {
        Self { kind, aux, location }
    }
}
