//! Punctuation trie construction and the punctuation dispatch of
//! [`Scanner::scan_token`](super::Scanner).

use faxc_util::arena::Zone;
use faxc_util::trie::TrieNode;

use crate::builder::Builder;
use crate::token::TokenKind;

/// Terminal metadata for a node in the punctuation trie: the token kind
/// recognised at this node (if any), and the bracket tags installed by
/// [`add_pair`].
#[derive(Clone, Copy, Debug)]
pub struct PunctuationData {
    pub terminal: TokenKind,
    pub push: TokenKind,
    pub pop: TokenKind,
}

impl Default for PunctuationData {
    fn default() -> Self {
        Self { terminal: TokenKind::Eof, push: TokenKind::Eof, pop: TokenKind::Eof }
    }
}

impl PunctuationData {
    pub fn has_terminal(self) -> bool {
        self.terminal != TokenKind::Eof
    }
}

pub type PunctuationTrie<'zone> = TrieNode<'zone, PunctuationData>;

/// The closed table of punctuation token kinds and their literal syntax,
/// in the order the punctuation trie is populated. `Shr` is populated
/// like any other entry; the scanner special-cases its kind once
/// recognised, it does not rely on trie-level push/pop tags.
const PUNCTUATION_TABLE: &[TokenKind] = &[
    TokenKind::Lt,
    TokenKind::LParen,
    TokenKind::LBrace,
    TokenKind::Gt,
    TokenKind::Shr,
    TokenKind::RParen,
    TokenKind::RBrace,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Comma,
    TokenKind::Semicolon,
    TokenKind::Colon,
    TokenKind::ColonColon,
    TokenKind::Dot,
    TokenKind::DotDot,
    TokenKind::DotDotDot,
    TokenKind::Arrow,
    TokenKind::FatArrow,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
    TokenKind::PercentEq,
    TokenKind::Eq,
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::Bang,
    TokenKind::LtEq,
    TokenKind::GtEq,
    TokenKind::AndAnd,
    TokenKind::OrOr,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Caret,
    TokenKind::Tilde,
    TokenKind::At,
    TokenKind::Dollar,
    TokenKind::Question,
];

/// Bracket pairs tagged after the table is populated: `(`/`)`, `<`/`>`,
/// `{`/`}`.
const BRACKET_PAIRS: &[(TokenKind, TokenKind)] =
    &[(TokenKind::LParen, TokenKind::RParen), (TokenKind::Lt, TokenKind::Gt), (TokenKind::LBrace, TokenKind::RBrace)];

/// Populates `root` from [`PUNCTUATION_TABLE`], then installs bracket
/// tagging for each pair in [`BRACKET_PAIRS`] via [`add_pair`].
pub fn build<'zone>(zone: &'zone Zone) -> PunctuationTrie<'zone> {
    let root: PunctuationTrie<'zone> = TrieNode::new();
    for &kind in PUNCTUATION_TABLE {
        let syntax = kind.syntax();
        debug_assert!(!syntax.is_empty(), "punctuation table entry with no syntax: {:?}", kind);
        let leaf = root.walk(zone, syntax.as_bytes());
        let mut data = leaf.terminal();
        data.terminal = kind;
        leaf.set_terminal(data);
    }
    for &(open, close) in BRACKET_PAIRS {
        add_pair(&root, zone, open.syntax(), close.syntax());
    }
    root
}

/// Walks to the `open` leaf and sets its `push` to its own terminal token;
/// walks to the `close` leaf and sets its `pop` to the *open* token (not
/// the close token, and not `EOF`) — the reconciliation target a closer
/// reconciles against is always the opener it expects.
fn add_pair<'zone>(root: &PunctuationTrie<'zone>, zone: &'zone Zone, open: &str, close: &str) {
    let open_leaf = root.walk(zone, open.as_bytes());
    let open_token = open_leaf.terminal().terminal;
    let mut open_data = open_leaf.terminal();
    open_data.push = open_token;
    open_leaf.set_terminal(open_data);

    let close_leaf = root.walk(zone, close.as_bytes());
    let mut close_data = close_leaf.terminal();
    close_data.pop = open_token;
    close_leaf.set_terminal(close_data);
}

/// Walks the punctuation trie from `bytes`, descending one byte at a time
/// while a child exists, and returns the longest-matching terminal (and
/// the number of bytes it consumed), if any.
pub fn longest_match(root: &PunctuationTrie<'_>, bytes: &[u8]) -> Option<(PunctuationData, usize)> {
    let mut node = root;
    let mut best = None;
    for (offset, &byte) in bytes.iter().enumerate() {
        match node.lookup_child(byte as u32) {
            Some(child) => node = child,
            None => break,
        }
        let data = node.terminal();
        if data.has_terminal() {
            best = Some((data, offset + 1));
        }
    }
    best
}

impl<'src, 'zone, 'b, B: Builder<'zone>> super::Scanner<'src, 'zone, 'b, B> {
    pub(super) fn scan_punctuation(&mut self) {
        let start = self.current_location();
        let remaining = &self.source[self.pos..];
        match longest_match(&self.punctuation, remaining) {
            None => {
                self.report_unrecognized_char(start);
            }
            Some((data, len)) => {
                self.pos += len;
                if data.terminal == TokenKind::Shr {
                    self.pop_token_begin_marker(TokenKind::Lt);
                    self.add_token(TokenKind::GtStart, 0, start);
                    self.pop_token_begin_marker(TokenKind::Lt);
                    self.add_token(TokenKind::Gt, 0, start);
                    return;
                }
                if data.pop != TokenKind::Eof {
                    self.pop_token_begin_marker(data.pop);
                }
                let index = self.add_token(data.terminal, 0, start);
                if data.push != TokenKind::Eof {
                    crate::bracket_stack::push(&mut self.bracket_stack, data.push, index);
                }
            }
        }
    }
}
