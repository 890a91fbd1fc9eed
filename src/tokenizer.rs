//! Shell-style line splitter producing query tokens.
//!
//! Tokens are separated by ASCII whitespace. A token that starts with `'` or
//! `"` runs to the matching closing quote, keeps any whitespace inside it and
//! remembers which quote character was used.

use crate::errors::TokenizeError;
use crate::types::{QuoteChar, Token};

/// Splitter options.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    pub allow_unterminated_quotes: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            allow_unterminated_quotes: true,
        }
    }
}

impl Tokenizer {
    /// A tokenizer that rejects unterminated quotes.
    pub fn strict() -> Self {
        Self {
            allow_unterminated_quotes: false,
        }
    }

    pub fn tokenize(&self, raw: &str) -> Result<Vec<Token>, TokenizeError> {
        tokenize(raw, self.allow_unterminated_quotes)
    }
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Split `raw` into tokens.
pub fn tokenize(raw: &str, allow_unterminated_quotes: bool) -> Result<Vec<Token>, TokenizeError> {
    let bytes = raw.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if is_space(bytes[pos]) {
            pos += 1;
            continue;
        }

        if let Some(quote) = QuoteChar::from_byte(bytes[pos]) {
            let open = bytes[pos];
            let start = pos + 1;
            match bytes[start..].iter().position(|&b| b == open) {
                Some(len) => {
                    tokens.push(Token::new(&raw[start..start + len], quote));
                    pos = start + len + 1;
                }
                None if allow_unterminated_quotes => {
                    tokens.push(Token::new(&raw[start..], quote));
                    pos = bytes.len();
                }
                None => return Err(TokenizeError::UnterminatedQuote { position: pos }),
            }
            continue;
        }

        let start = pos;
        while pos < bytes.len() && !is_space(bytes[pos]) {
            pos += 1;
        }
        tokens.push(Token::bare(&raw[start..pos]));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[rstest]
    #[case("", &[])]
    #[case("   \t ", &[])]
    #[case("foo bar", &["foo", "bar"])]
    #[case("  foo\tbar  ", &["foo", "bar"])]
    #[case("( a OR b )", &["(", "a", "OR", "b", ")"])]
    #[case("it's", &["it's"])]
    fn splits_on_whitespace(#[case] raw: &str, #[case] expected: &[&str]) {
        let tokens = tokenize(raw, true).unwrap();
        assert_eq!(texts(&tokens), expected);
        assert!(tokens.iter().all(|t| !t.is_quoted()));
    }

    #[test]
    fn records_quote_characters() {
        let tokens = tokenize(r#"a "b c" 'd'"#, true).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::bare("a"),
                Token::new("b c", QuoteChar::Double),
                Token::new("d", QuoteChar::Single),
            ]
        );
    }

    #[test]
    fn keeps_padding_inside_quotes() {
        let tokens = tokenize(r#"" cat ""#, true).unwrap();
        assert_eq!(tokens, vec![Token::new(" cat ", QuoteChar::Double)]);
    }

    #[test]
    fn closing_quote_ends_token() {
        let tokens = tokenize(r#""ab"cd"#, true).unwrap();
        assert_eq!(texts(&tokens), vec!["ab", "cd"]);
    }

    #[test]
    fn tolerates_unterminated_quote_when_allowed() {
        let tokens = tokenize(r#"x "half typed"#, true).unwrap();
        assert_eq!(
            tokens,
            vec![Token::bare("x"), Token::new("half typed", QuoteChar::Double)]
        );
    }

    #[test]
    fn rejects_unterminated_quote_when_strict() {
        let err = Tokenizer::strict().tokenize("x 'oops").unwrap_err();
        assert_eq!(err, TokenizeError::UnterminatedQuote { position: 2 });
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        let tokens = tokenize(r#""""#, true).unwrap();
        assert_eq!(tokens, vec![Token::new("", QuoteChar::Double)]);
    }
}
