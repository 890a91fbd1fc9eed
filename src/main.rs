use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use name_filter::console::{print_header, prompt};
use name_filter::display::{display_results, export, ExportFormat};
use name_filter::source::{filter_entries, read_entries, scan_entries, ScanOptions};
use name_filter::{Filter, LooseMatcher, TermMatcher};

/// Filter lists of names with a small boolean search language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file, one entry per line (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Search query; starts an interactive prompt when omitted
    #[arg(short, long)]
    query: Option<String>,

    /// Read input as CSV, one entry per record
    #[arg(long)]
    csv: bool,

    /// Treat the first CSV record as a header
    #[arg(long, requires = "csv")]
    has_headers: bool,

    /// Match an entry's fields as one separator-joined string
    #[arg(long)]
    join_fields: bool,

    /// Ignore spaces, dashes, underscores and dots between query letters
    #[arg(long)]
    loose: bool,

    /// Limit the number of results (0 = no limit)
    #[arg(short, long, default_value = "0")]
    limit: usize,

    /// Show line numbers and every field of each match
    #[arg(short, long)]
    verbose: bool,

    /// Export the matches to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export file format
    #[arg(long, value_enum, default_value = "txt")]
    format: ExportFormat,
}

impl Args {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            csv: self.csv,
            has_headers: self.has_headers,
            join_fields: self.join_fields,
            limit: self.limit,
        }
    }

    fn open_input(&self) -> Result<Box<dyn Read>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(file))
            }
            _ => Ok(Box::new(io::stdin())),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = args.scan_options();
    let matcher = args.loose.then_some(&LooseMatcher as &dyn TermMatcher);

    match &args.query {
        Some(query) => {
            let filter = Filter::parse(query);
            info!(tokens = filter.tokens().len(), "filter parsed");
            let report = scan_entries(args.open_input()?, &options, &filter, matcher)?;
            let matched: Vec<_> = report.matched.iter().collect();
            display_results(&matched, report.scanned, args.verbose);
            if let Some(path) = &args.export {
                export(&matched, path, args.format)?;
                println!("Exported {} entries to {}", matched.len(), path.display());
            }
        }
        None => run_interactive(&args, &options, matcher)?,
    }

    Ok(())
}

/// Load the input once, then filter it for every query typed at the prompt.
fn run_interactive(
    args: &Args,
    options: &ScanOptions,
    matcher: Option<&dyn TermMatcher>,
) -> Result<()> {
    if !matches!(&args.input, Some(path) if path.as_os_str() != "-") {
        anyhow::bail!("interactive mode needs an input file; pass --query to filter stdin");
    }
    let entries = read_entries(args.open_input()?, options)?;
    print_header(entries.len());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    while let Some(query) = prompt("filter> ", &mut input, &mut out)? {
        let filter = Filter::parse(&query);
        let matched = filter_entries(&entries, options, &filter, matcher);
        display_results(&matched, entries.len(), args.verbose);
        println!();

        if let Some(path) = &args.export {
            // Errors here should not end the session.
            match export(&matched, path, args.format) {
                Ok(()) => println!("Exported {} entries to {}\n", matched.len(), path.display()),
                Err(e) => eprintln!("Export failed: {e:#}\n"),
            }
        }
    }

    Ok(())
}
