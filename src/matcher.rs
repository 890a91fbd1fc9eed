//! Substring matching strategies used by the evaluator.

/// Pluggable substring search.
///
/// `match_len` is asked whether `term` matches `candidate` starting at byte
/// `offset` and returns how many candidate bytes the match covers, `0` for no
/// match. The evaluator still checks word boundaries around the reported span.
pub trait TermMatcher {
    fn match_len(&self, candidate: &[u8], offset: usize, term: &[u8]) -> usize;
}

impl<F> TermMatcher for F
where
    F: Fn(&[u8], usize, &[u8]) -> usize,
{
    fn match_len(&self, candidate: &[u8], offset: usize, term: &[u8]) -> usize {
        self(candidate, offset, term)
    }
}

/// Compare one query byte against one candidate byte.
///
/// The query is expected to be lowercased already, candidates are not: a
/// lowercase ASCII letter in the query also accepts its uppercase form, but
/// not the other way around.
#[inline]
pub fn byte_matches(term: u8, candidate: u8) -> bool {
    term == candidate || (term.is_ascii_lowercase() && candidate == term.to_ascii_uppercase())
}

/// Exact comparison of `term` against `candidate[offset..]`.
pub fn exact_match_len(candidate: &[u8], offset: usize, term: &[u8]) -> usize {
    match candidate.get(offset..offset + term.len()) {
        Some(window) if window.iter().zip(term).all(|(&c, &t)| byte_matches(t, c)) => term.len(),
        _ => 0,
    }
}

/// Ignores filler punctuation between term bytes, so `eq8` finds `EQ-8`.
///
/// The first byte must match directly; after that space, tab, `-`, `_` and
/// `.` may be skipped on either side.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseMatcher;

impl LooseMatcher {
    fn is_filler(b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'-' | b'_' | b'.')
    }
}

impl TermMatcher for LooseMatcher {
    fn match_len(&self, candidate: &[u8], offset: usize, term: &[u8]) -> usize {
        let mut i = offset;
        let mut j = 0;
        while j < term.len() {
            match candidate.get(i) {
                Some(&c) if byte_matches(term[j], c) => {
                    i += 1;
                    j += 1;
                }
                _ if j > 0 && Self::is_filler(term[j]) => j += 1,
                Some(&c) if j > 0 && Self::is_filler(c) => i += 1,
                _ => return 0,
            }
        }
        i - offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b'a', b'a', true)]
    #[case(b'a', b'A', true)]
    #[case(b'A', b'a', false)]
    #[case(b'A', b'A', true)]
    #[case(b'1', b'1', true)]
    #[case(b'[', b'{', false)]
    fn compares_bytes_asymmetrically(#[case] term: u8, #[case] cand: u8, #[case] expected: bool) {
        assert_eq!(byte_matches(term, cand), expected);
    }

    #[test]
    fn exact_match_respects_bounds() {
        assert_eq!(exact_match_len(b"xFOOy", 1, b"foo"), 3);
        assert_eq!(exact_match_len(b"xFOOy", 3, b"foo"), 0);
        assert_eq!(exact_match_len(b"fo", 0, b"foo"), 0);
    }

    #[rstest]
    #[case("EQ-8", "eq8", 4)]
    #[case("EQ 8 band", "eq8", 4)]
    #[case("eq8", "eq-8", 3)]
    #[case("xeq", "eq", 0)]
    #[case("e-q", "eq", 3)]
    #[case("-eq", "eq", 0)]
    #[case("eq\t8", "eq8", 4)]
    #[case("EQ8", "e q_8", 3)]
    fn loose_matcher_skips_filler(#[case] cand: &str, #[case] term: &str, #[case] expected: usize) {
        assert_eq!(LooseMatcher.match_len(cand.as_bytes(), 0, term.as_bytes()), expected);
    }

    #[test]
    fn closures_are_matchers() {
        let always_one = |_: &[u8], _: usize, _: &[u8]| 1usize;
        assert_eq!(always_one.match_len(b"abc", 0, b"zzz"), 1);
    }
}
