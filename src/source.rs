//! Loading candidate entries from plain-text or CSV input.
//!
//! Scanning applies the filter while reading so a limit can stop early, the
//! same way a registry walk stops once enough objects were collected.

use anyhow::{Context, Result};
use std::io::{BufRead, Read};
use tracing::debug;

use crate::filter::Filter;
use crate::matcher::TermMatcher;
use crate::types::Entry;

/// How input rows are read and turned into candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Parse input as CSV; otherwise every non-empty line is one entry.
    pub csv: bool,
    /// Skip the first CSV record.
    pub has_headers: bool,
    /// Fold an entry's fields into one separator-joined candidate.
    pub join_fields: bool,
    /// Stop after this many matches (0 = no limit).
    pub limit: usize,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub scanned: usize,
    pub matched: Vec<Entry>,
}

/// Read every entry from `reader`.
pub fn read_entries<R: Read>(reader: R, options: &ScanOptions) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for_each_entry(reader, options, |entry| {
        entries.push(entry);
        true
    })?;
    Ok(entries)
}

/// Read entries from `reader`, keeping those that satisfy `filter`.
pub fn scan_entries<R: Read>(
    reader: R,
    options: &ScanOptions,
    filter: &Filter,
    matcher: Option<&dyn TermMatcher>,
) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    for_each_entry(reader, options, |entry| {
        report.scanned += 1;
        if entry_matches(&entry, options, filter, matcher) {
            report.matched.push(entry);
            if options.limit > 0 && report.matched.len() >= options.limit {
                return false;
            }
        }
        true
    })?;
    debug!(
        scanned = report.scanned,
        matched = report.matched.len(),
        "scan finished"
    );
    Ok(report)
}

/// Keep the entries from an already loaded list that satisfy `filter`.
pub fn filter_entries<'a>(
    entries: &'a [Entry],
    options: &ScanOptions,
    filter: &Filter,
    matcher: Option<&dyn TermMatcher>,
) -> Vec<&'a Entry> {
    let matching = entries
        .iter()
        .filter(|entry| entry_matches(entry, options, filter, matcher));
    if options.limit > 0 {
        matching.take(options.limit).collect()
    } else {
        matching.collect()
    }
}

pub fn entry_matches(
    entry: &Entry,
    options: &ScanOptions,
    filter: &Filter,
    matcher: Option<&dyn TermMatcher>,
) -> bool {
    let candidates = entry.candidates(options.join_fields);
    match matcher {
        Some(m) => filter.matches_with(&candidates, m),
        None => filter.matches(&candidates),
    }
}

/// Feed entries to `visit` until input ends or it returns `false`.
fn for_each_entry<R, F>(reader: R, options: &ScanOptions, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(Entry) -> bool,
{
    if options.csv {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(options.has_headers)
            .flexible(true)
            .from_reader(reader);
        for (index, record) in rdr.records().enumerate() {
            let record =
                record.with_context(|| format!("Failed to read CSV record {}", index + 1))?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            let fields = record.iter().map(str::to_owned).collect();
            if !visit(Entry::new(line, fields)) {
                break;
            }
        }
    } else {
        let buffered = std::io::BufReader::new(reader);
        for (index, line) in buffered.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read input line {}", index + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            if !visit(Entry::new(index + 1, vec![line])) {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LooseMatcher;

    const PLUGINS: &str = "ReaEQ (Cockos)\n\nReaComp (Cockos)\nPro-Q 3 (FabFilter)\n";

    const PLUGINS_CSV: &str = "name,vendor\nReaEQ,Cockos\nReaComp,Cockos\nPro-Q 3,FabFilter\n";

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let entries = read_entries(PLUGINS.as_bytes(), &ScanOptions::default()).unwrap();
        let lines: Vec<usize> = entries.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn scans_plain_text_with_filter() {
        let report = scan_entries(
            PLUGINS.as_bytes(),
            &ScanOptions::default(),
            &Filter::parse("rea NOT comp"),
            None,
        )
        .unwrap();
        assert_eq!(report.scanned, 3);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].fields[0], "ReaEQ (Cockos)");
    }

    #[test]
    fn limit_stops_scanning_early() {
        let options = ScanOptions {
            limit: 1,
            ..ScanOptions::default()
        };
        let report =
            scan_entries(PLUGINS.as_bytes(), &options, &Filter::parse("cockos"), None).unwrap();
        assert_eq!(report.scanned, 1);
        assert_eq!(report.matched.len(), 1);
    }

    #[test]
    fn csv_fields_are_separate_candidates() {
        let options = ScanOptions {
            csv: true,
            has_headers: true,
            ..ScanOptions::default()
        };
        let report = scan_entries(
            PLUGINS_CSV.as_bytes(),
            &options,
            &Filter::parse("^cockos"),
            None,
        )
        .unwrap();
        assert_eq!(report.scanned, 3);
        assert_eq!(report.matched.len(), 2);
    }

    #[test]
    fn joined_fields_anchor_on_field_edges() {
        let options = ScanOptions {
            csv: true,
            has_headers: true,
            join_fields: true,
            ..ScanOptions::default()
        };
        let entries = read_entries(PLUGINS_CSV.as_bytes(), &options).unwrap();
        let hits = filter_entries(&entries, &options, &Filter::parse("eq$ ^cockos"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fields, vec!["ReaEQ", "Cockos"]);
    }

    #[test]
    fn loose_matching_through_scan() {
        let report = scan_entries(
            PLUGINS.as_bytes(),
            &ScanOptions::default(),
            &Filter::parse("proq3"),
            Some(&LooseMatcher),
        )
        .unwrap();
        assert_eq!(report.matched.len(), 1);
    }
}
