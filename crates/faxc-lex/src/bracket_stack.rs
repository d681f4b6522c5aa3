//! The bracket-balance stack that resolves `<` vs. shift-operator
//! ambiguity and tags opener tokens with the distance to their closer.
//!
//! Matches the original scanner's `PushTokenBeginMarker` /
//! `PopTokenBeginMarker` exactly, including the precedence-based discard
//! loop — this is the one place where a literal translation of the
//! original's control flow matters more than an idiomatic rewrite,
//! because the discard order is genuinely subtle (see the comment on
//! [`reconcile`]).

use crate::token::{TokenInfo, TokenKind};

/// A still-open bracket: the token kind its closer must match, and the
/// index in the token stream of the opener itself.
#[derive(Clone, Copy, Debug)]
pub struct BracketMarker {
    pub token: TokenKind,
    pub index: usize,
}

/// Pushes a marker for a just-emitted opener token.
pub fn push(stack: &mut Vec<BracketMarker>, token: TokenKind, index: usize) {
    stack.push(BracketMarker { token, index });
}

/// Reconciles the bracket stack against a closer expecting `target` (the
/// opener token kind the closer pairs with — e.g. `pop == Lt` for `>`).
///
/// Walks the stack from the top:
/// - a marker matching `target` is popped and its opener's `TokenInfo` is
///   patched with the distance (in tokens) to this point, then the walk
///   stops;
/// - otherwise, if `target` itself is `Lt`, the walk stops leaving the
///   stack untouched — an unmatched `<` is never discarded by another
///   `<`;
/// - otherwise, if the marker on top is anything other than `Lt` and
///   outranks `target`, the walk stops — a stronger unmatched opener is
///   left in place rather than silently eaten;
/// - otherwise the marker is discarded and the walk retries. This is how
///   a stray `<` sitting below a stronger closer (a `)` or `}` that was
///   never going to be a generic) gets silently erased without ever being
///   misclassified as a match.
///
/// `tokens` is the in-progress token buffer; at the time this runs the
/// closer itself has not yet been appended, so `tokens.len()` is exactly
/// the token index the closer will receive.
pub fn reconcile(stack: &mut Vec<BracketMarker>, tokens: &mut [TokenInfo], target: TokenKind) {
    loop {
        let Some(marker) = stack.last().copied() else {
            break;
        };
        if marker.token == target {
            stack.pop();
            let distance = (tokens.len() - marker.index) as i32;
            tokens[marker.index].aux = distance;
            break;
        }
        if target == TokenKind::Lt {
            break;
        }
        if marker.token != TokenKind::Lt && marker.token.bracket_rank() > target.bracket_rank() {
            break;
        }
        stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::source::Location;

    fn tok(kind: TokenKind) -> TokenInfo {
        TokenInfo::new(kind, 0, Location::from_raw(0))
    }

    #[test]
    fn matching_marker_patches_distance() {
        let mut stack = vec![BracketMarker { token: TokenKind::Lt, index: 1 }];
        let mut tokens = vec![tok(TokenKind::Identifier), tok(TokenKind::Lt), tok(TokenKind::Identifier)];
        reconcile(&mut stack, &mut tokens, TokenKind::Lt);
        assert!(stack.is_empty());
        assert_eq!(tokens[1].aux, 2);
    }

    #[test]
    fn non_matching_marker_under_lt_target_is_left_alone() {
        let mut stack = vec![BracketMarker { token: TokenKind::LParen, index: 0 }];
        let mut tokens = vec![tok(TokenKind::LParen)];
        reconcile(&mut stack, &mut tokens, TokenKind::Lt);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].token, TokenKind::LParen);
    }

    #[test]
    fn stray_lt_discarded_under_stronger_closer() {
        // `(` pushed, then a stray `<` pushed, then `)` arrives: the `<`
        // should be silently discarded so the `(` can match.
        let mut stack = vec![
            BracketMarker { token: TokenKind::LParen, index: 0 },
            BracketMarker { token: TokenKind::Lt, index: 1 },
        ];
        let mut tokens = vec![tok(TokenKind::LParen), tok(TokenKind::Lt), tok(TokenKind::Identifier)];
        reconcile(&mut stack, &mut tokens, TokenKind::LParen);
        assert!(stack.is_empty());
        assert_eq!(tokens[0].aux, 3);
    }

    #[test]
    fn stronger_unmatched_opener_halts_the_walk() {
        // A `{` sits below a `<` that's being popped by `>`; `{` outranks
        // `<` so it must NOT be discarded.
        let mut stack = vec![
            BracketMarker { token: TokenKind::LBrace, index: 0 },
            BracketMarker { token: TokenKind::Lt, index: 1 },
        ];
        let mut tokens = vec![tok(TokenKind::LBrace), tok(TokenKind::Lt), tok(TokenKind::Identifier)];
        reconcile(&mut stack, &mut tokens, TokenKind::Lt);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].token, TokenKind::LBrace);
        assert_eq!(tokens[1].aux, 3);
    }
}
