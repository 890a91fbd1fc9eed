//! Query construction and the convenience matching entry points.
//!
//! A [`Filter`] is parsed once from the text typed into a search box and can
//! then be evaluated against any number of candidate sets.

use tracing::debug;

use crate::evaluator::evaluate;
use crate::matcher::TermMatcher;
use crate::tokenizer::Tokenizer;
use crate::types::Token;

/// A parsed, normalized query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    tokens: Vec<Token>,
}

impl Filter {
    /// Parse `raw` with the default, quote-tolerant tokenizer.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, &Tokenizer::default())
    }

    /// Parse `raw` with a specific tokenizer.
    ///
    /// If tokenizing fails the whole input becomes one literal term, so a
    /// non-empty query never yields an empty filter.
    pub fn parse_with(raw: &str, tokenizer: &Tokenizer) -> Self {
        let mut tokens = match tokenizer.tokenize(raw) {
            Ok(tokens) => tokens,
            Err(err) if !raw.is_empty() => {
                debug!(%err, "tokenizer failed; using the raw query as one term");
                vec![Token::bare(raw)]
            }
            Err(_) => Vec::new(),
        };
        for token in &mut tokens {
            normalize(token);
        }
        Self { tokens }
    }

    /// Wrap tokens that were already split and normalized.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when the filter has no tokens and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        evaluate(candidates, &self.tokens, None)
    }

    pub fn matches_with<S: AsRef<str>>(
        &self,
        candidates: &[S],
        matcher: &dyn TermMatcher,
    ) -> bool {
        evaluate(candidates, &self.tokens, Some(matcher))
    }
}

/// Lowercase unquoted, non-keyword tokens (ASCII only).
fn normalize(token: &mut Token) {
    if !token.is_quoted() && !token.is_keyword() {
        token.text.make_ascii_lowercase();
    }
}

/// Parse `query` into tokens; the flag reports whether any token was found.
pub fn build_filter(query: &str) -> (Vec<Token>, bool) {
    let filter = Filter::parse(query);
    let found = !filter.is_empty();
    (filter.tokens, found)
}

/// Whether `candidates` satisfy `query`. Blank queries match everything.
pub fn matches_filter<S: AsRef<str>>(candidates: &[S], query: &str) -> bool {
    Filter::parse(query).matches(candidates)
}

/// Like [`matches_filter`], with a caller-supplied matching strategy.
pub fn matches_filter_custom<S: AsRef<str>>(
    candidates: &[S],
    query: &str,
    matcher: &dyn TermMatcher,
) -> bool {
    Filter::parse(query).matches_with(candidates, matcher)
}
