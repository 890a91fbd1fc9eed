//! Boolean search filters over lists of names.
//!
//! A query such as `eq ( cockos OR fabfilter ) NOT "mono"` is split into
//! tokens, normalized and evaluated in one pass against the candidate strings
//! of an item. Terms are case-insensitive substrings; `AND`, `OR`, `NOT`,
//! parentheses, `^`/`$` anchors and whole-word padding refine them. Malformed
//! queries never fail, they are read as literally as possible.

pub mod console;
pub mod display;
mod errors;
mod evaluator;
mod filter;
mod matcher;
pub mod source;
mod tokenizer;
mod types;

pub use errors::TokenizeError;
pub use evaluator::evaluate;
pub use filter::{build_filter, matches_filter, matches_filter_custom, Filter};
pub use matcher::{byte_matches, exact_match_len, LooseMatcher, TermMatcher};
pub use tokenizer::{tokenize, Tokenizer};
pub use types::{Entry, QuoteChar, Token, SEPARATOR};
