//! Core data types shared by the tokenizer, the evaluator and the CLI.

/// Control byte used to mark structural breaks inside a candidate string.
///
/// Strict anchors (`^word`, `word$`) accept it as a boundary, as does the
/// whole-word check.
pub const SEPARATOR: u8 = 1;

/// Which quote character, if any, surrounded a token in the raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteChar {
    #[default]
    None,
    Single,
    Double,
}

impl QuoteChar {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'\'' => Some(QuoteChar::Single),
            b'"' => Some(QuoteChar::Double),
            _ => None,
        }
    }

    pub fn is_quoted(self) -> bool {
        self != QuoteChar::None
    }
}

/// One unit of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quote: QuoteChar,
}

impl Token {
    pub fn new(text: impl Into<String>, quote: QuoteChar) -> Self {
        Self {
            text: text.into(),
            quote,
        }
    }

    /// An unquoted token, as typed.
    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, QuoteChar::None)
    }

    pub fn is_quoted(&self) -> bool {
        self.quote.is_quoted()
    }

    /// True when the token is an unquoted `AND`, `OR` or `NOT`.
    pub fn is_keyword(&self) -> bool {
        !self.is_quoted() && matches!(self.text.as_str(), "AND" | "OR" | "NOT")
    }
}

/// One row of input: the strings a query is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based line (or record) number in the input.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Entry {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Candidate strings for matching.
    ///
    /// With `join_fields` every field is folded into one candidate separated by
    /// [`SEPARATOR`], so `^`/`$` anchors bind to field edges.
    pub fn candidates(&self, join_fields: bool) -> Vec<String> {
        if join_fields {
            let sep = char::from(SEPARATOR).to_string();
            vec![self.fields.join(&sep)]
        } else {
            self.fields.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_sensitive_and_unquoted() {
        assert!(Token::bare("OR").is_keyword());
        assert!(!Token::bare("or").is_keyword());
        assert!(!Token::new("NOT", QuoteChar::Double).is_keyword());
    }

    #[test]
    fn joined_candidates_use_separator() {
        let entry = Entry::new(1, vec!["ReaEQ".into(), "Cockos".into()]);
        assert_eq!(entry.candidates(true), vec!["ReaEQ\u{1}Cockos".to_string()]);
        assert_eq!(entry.candidates(false).len(), 2);
    }
}
