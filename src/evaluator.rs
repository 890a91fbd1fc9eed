//! Single-pass evaluator for filter token streams.
//!
//! Tokens are consumed left to right. Consecutive terms are ANDed, `OR` starts
//! a new branch, `NOT` negates the next term or group and parentheses nest.
//! Malformed input is never an error: stray closers are literal text and
//! groups still open at the end of the stream are closed implicitly.
//!
//! Keywords are recognised by exact, case-sensitive comparison, so callers are
//! expected to lowercase every other unquoted token beforehand (see
//! [`crate::filter::Filter`]).

use tracing::trace;

use crate::matcher::{exact_match_len, TermMatcher};
use crate::types::{Token, SEPARATOR};

/// Running result of the innermost group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupResult {
    Undetermined,
    False,
    True,
    /// An `OR` branch already succeeded; the rest of the group is skipped.
    ShortCircuit,
}

impl GroupResult {
    fn is_true(self) -> bool {
        matches!(self, GroupResult::True | GroupResult::ShortCircuit)
    }

    /// AND a term (or closed sub-group) into the running result.
    fn and(self, value: bool) -> Self {
        match self {
            GroupResult::ShortCircuit => GroupResult::ShortCircuit,
            GroupResult::Undetermined | GroupResult::True => value.into(),
            GroupResult::False => GroupResult::False,
        }
    }
}

impl From<bool> for GroupResult {
    fn from(value: bool) -> Self {
        if value {
            GroupResult::True
        } else {
            GroupResult::False
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    result: GroupResult,
    negate: bool,
}

impl GroupState {
    const FRESH: GroupState = GroupState {
        result: GroupResult::Undetermined,
        negate: false,
    };

    fn skipping(self) -> bool {
        self.result == GroupResult::ShortCircuit
    }

    fn push_value(&mut self, value: bool) {
        let value = value ^ std::mem::take(&mut self.negate);
        self.result = self.result.and(value);
    }
}

/// Parent state saved when a `(` opens a group.
#[derive(Debug, Clone, Copy)]
struct Scope {
    /// The parent's outcome was already fixed; the group is parsed for bracket
    /// balance only and the parent is restored verbatim on close.
    ignored: bool,
    saved: GroupState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    None,
    /// Start/end of string, the separator byte or any non-word byte.
    Word,
    /// Start/end of string or the separator byte only.
    Strict,
}

impl Boundary {
    fn accepts(self, neighbour: Option<u8>) -> bool {
        match (self, neighbour) {
            (Boundary::None, _) | (_, None) => true,
            (_, Some(SEPARATOR)) => true,
            (Boundary::Word, Some(b)) => is_non_word(b),
            (Boundary::Strict, Some(_)) => false,
        }
    }
}

fn is_non_word(b: u8) -> bool {
    matches!(b, 0 | SEPARATOR | b' ' | b'\t' | b'.' | b'/' | b'\\')
}

/// A search term with its anchors stripped off.
#[derive(Debug)]
struct Term<'a> {
    text: &'a [u8],
    left: Boundary,
    right: Boundary,
    /// Quoted whole words always compare bytes directly.
    exact_only: bool,
}

impl<'a> Term<'a> {
    fn parse(token: &'a Token) -> Self {
        let raw = token.text.as_bytes();
        let mut text = raw;
        let mut left = Boundary::None;
        let mut right = Boundary::None;

        match text.first() {
            Some(b' ') => left = Boundary::Word,
            Some(b'^') => left = Boundary::Strict,
            _ => {}
        }
        if left != Boundary::None {
            text = &text[1..];
        }
        match text.last() {
            Some(b' ') => right = Boundary::Word,
            Some(b'$') => right = Boundary::Strict,
            _ => {}
        }
        if right != Boundary::None {
            text = &text[..text.len() - 1];
        }

        if text.is_empty() {
            return Term {
                text: raw,
                left: Boundary::None,
                right: Boundary::None,
                exact_only: false,
            };
        }

        let mut exact_only = false;
        if token.is_quoted() && !text.iter().any(|&b| b == b' ' || b == b'\t') {
            if left == Boundary::None {
                left = Boundary::Word;
            }
            if right == Boundary::None {
                right = Boundary::Word;
            }
            exact_only = true;
        }

        Term {
            text,
            left,
            right,
            exact_only,
        }
    }

    fn found_in(&self, candidate: &[u8], matcher: Option<&dyn TermMatcher>) -> bool {
        let last_offset = match matcher {
            Some(_) => candidate.len(),
            None if candidate.len() >= self.text.len() => candidate.len() - self.text.len() + 1,
            None => return false,
        };

        (0..last_offset).any(|offset| {
            let len = match matcher {
                Some(m) => m.match_len(candidate, offset, self.text),
                None => exact_match_len(candidate, offset, self.text),
            };
            if len == 0 {
                return false;
            }
            match offset.checked_add(len).filter(|&end| end <= candidate.len()) {
                Some(end) => {
                    self.left.accepts(offset.checked_sub(1).map(|i| candidate[i]))
                        && self.right.accepts(candidate.get(end).copied())
                }
                None => false,
            }
        })
    }

    fn found_in_any<S: AsRef<str>>(
        &self,
        candidates: &[S],
        matcher: Option<&dyn TermMatcher>,
    ) -> bool {
        let matcher = if self.exact_only { None } else { matcher };
        candidates
            .iter()
            .any(|c| self.found_in(c.as_ref().as_bytes(), matcher))
    }
}

/// Evaluate `tokens` against `candidates`.
///
/// A term is satisfied when any candidate contains it. A token list with no
/// term or group in it (empty, or only blanks and keywords) matches
/// everything. When `matcher` is given it replaces the direct
/// substring comparison for terms that are not negated and are not quoted
/// whole words.
pub fn evaluate<S: AsRef<str>>(
    candidates: &[S],
    tokens: &[Token],
    matcher: Option<&dyn TermMatcher>,
) -> bool {
    if tokens.is_empty() {
        return true;
    }

    let mut state = GroupState::FRESH;
    let mut scopes: Vec<Scope> = Vec::new();
    let mut evaluated = false;

    for token in tokens {
        let text = token.text.as_str();
        if text.is_empty() {
            continue;
        }

        if !token.is_quoted() {
            match text {
                "(" => {
                    evaluated = true;
                    let ignored = state.skipping()
                        || (state.result == GroupResult::False && !state.negate);
                    scopes.push(Scope {
                        ignored,
                        saved: state,
                    });
                    state = if ignored {
                        GroupState {
                            result: GroupResult::ShortCircuit,
                            negate: false,
                        }
                    } else {
                        GroupState::FRESH
                    };
                    continue;
                }
                ")" if !scopes.is_empty() => {
                    if let Some(scope) = scopes.pop() {
                        state = close_group(scope, state);
                    }
                    continue;
                }
                ")" => trace!("unmatched `)` treated as a literal term"),
                "OR" => {
                    if !state.skipping() {
                        state.result = if state.result == GroupResult::True {
                            GroupResult::ShortCircuit
                        } else {
                            GroupResult::Undetermined
                        };
                    }
                    continue;
                }
                "NOT" => {
                    if !state.skipping() {
                        state.negate = !state.negate;
                    }
                    continue;
                }
                "AND" => continue,
                _ => {}
            }
        }

        if state.skipping() {
            continue;
        }

        evaluated = true;
        let term = Term::parse(token);
        let term_matcher = if state.negate { None } else { matcher };
        state.push_value(term.found_in_any(candidates, term_matcher));
    }

    if !scopes.is_empty() {
        trace!(open = scopes.len(), "closing unbalanced groups at end of query");
    }
    while let Some(scope) = scopes.pop() {
        state = close_group(scope, state);
    }

    !evaluated || state.result.is_true()
}

fn close_group(scope: Scope, inner: GroupState) -> GroupState {
    if scope.ignored {
        return scope.saved;
    }
    let mut parent = scope.saved;
    parent.push_value(inner.result.is_true());
    parent
}
