//! Error types surfaced by the query tokenizer.

use thiserror::Error;

/// Errors raised while splitting a raw query into tokens.
///
/// The filter builder never propagates these; it falls back to a single
/// literal token instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated quote starting at byte {position} (zero-based)")]
    UnterminatedQuote { position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unterminated_quote() {
        let err = TokenizeError::UnterminatedQuote { position: 4 };
        assert_eq!(
            err.to_string(),
            "unterminated quote starting at byte 4 (zero-based)"
        );
    }
}
