//! Console helpers for the interactive search prompt.

use anyhow::Result;
use std::io::{BufRead, Write};

/// Print the banner shown when the interactive prompt starts.
pub fn print_header(entries: usize) {
    println!("Name Filter - interactive search over {entries} entries");
    println!("Terms are ANDed. Use OR, NOT, ( ), ^start, end$ and \"quoted words\".");
    println!("Submit an empty line to quit.\n");
}

/// Show `message` and read one line from `input`.
///
/// Returns `None` at end of input or when the trimmed line is empty.
pub fn prompt<R: BufRead, W: Write>(
    message: &str,
    input: &mut R,
    out: &mut W,
) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_query_per_prompt() {
        let mut input = "  reaeq \n\n".as_bytes();
        let mut out = Vec::new();
        let first = prompt("> ", &mut input, &mut out).unwrap();
        assert_eq!(first.as_deref(), Some("  reaeq "));
        assert_eq!(prompt("> ", &mut input, &mut out).unwrap(), None);
        assert_eq!(prompt("> ", &mut input, &mut out).unwrap(), None);
        assert_eq!(out, b"> > > ");
    }
}
