mod table_utils;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rowscout::{
    config::{ConfigOverrides, ScanConfig},
    results::ScanResult,
    search, read_header, CsvSource, SearchError,
};
use serde::Serialize;
use std::{
    io::{self, IsTerminal, Write},
    num::NonZeroUsize,
    path::PathBuf,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use table_utils::{escape_cell, format_page_links, format_table, page_links};

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a file
#[derive(Args)]
struct SourceArgs {
    /// Delimited file to search (default from config, else data.csv)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Field delimiter, a single ASCII character ("\t" for tab)
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// Configuration file to load on top of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Args)]
struct CliSearchArgs {
    /// Text to look for in any field, ignoring case; empty matches every row
    #[arg(default_value = "")]
    query: String,

    /// Page of matches to show, starting at 1 (0 is treated as 1)
    #[arg(short = 'p', long, default_value = "1")]
    page: usize,

    /// Matches per page
    #[arg(short = 'n', long)]
    page_size: Option<NonZeroUsize>,

    /// Show only statistics, not matches
    #[arg(short, long)]
    stats: bool,

    /// Print the page as JSON
    #[arg(long, conflicts_with = "stats")]
    json: bool,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a delimited file and show one page of matching rows
    Search(Box<CliSearchArgs>),

    /// List the column names of a delimited file
    Columns {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Serialize)]
struct JsonPage<'a> {
    query: &'a str,
    page: usize,
    page_size: usize,
    total_pages: u64,
    total_matches: u64,
    header: &'a [String],
    records: &'a [Vec<String>],
}

fn main() {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Search(args) => {
            let config = load_config(&args.source, args.page_size)?;
            let page = args.page.max(1);

            let result = search(&config, &args.query, page)?;

            if args.json {
                print_json(&mut out, &result, &args.query, page, &config)?;
            } else {
                print_search_results(&mut out, &result, &args.query, page, &config, args.stats)?;
            }
            out.flush()?;
            Ok(())
        }
        Commands::Columns { source } => {
            let config = load_config(&source, None)?;
            let header = read_header(&CsvSource::from_config(&config)?)?;
            for (i, name) in header.iter().skip(1).enumerate() {
                writeln!(out, "{}. {}", i + 1, escape_cell(name))?;
            }
            out.flush()?;
            Ok(())
        }
    }
}

/// Layers CLI values over the config files, validates, and starts logging
fn load_config(args: &SourceArgs, page_size: Option<NonZeroUsize>) -> Result<ScanConfig> {
    let config = ScanConfig::load_from(args.config.as_deref())?.merge_with_cli(ConfigOverrides {
        file_path: args.file.clone(),
        page_size,
        delimiter: args.delimiter.clone(),
        log_level: args.log_level.clone(),
    });
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| SearchError::config_error(format!("Invalid log level: {}", e)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("Using configuration: {:?}", config);

    Ok(config)
}

fn print_search_results(
    out: &mut impl Write,
    result: &ScanResult,
    query: &str,
    page: usize,
    config: &ScanConfig,
    stats_only: bool,
) -> Result<()> {
    let total_pages = result.total_pages(config.page_size);
    writeln!(
        out,
        "Found {} matches for \"{}\" | Page {} of {}",
        result.total_matches,
        escape_cell(query),
        page,
        total_pages
    )?;
    if stats_only {
        return Ok(());
    }

    if result.is_empty() {
        writeln!(out, "\n{}", "No matching rows on this page".yellow())?;
    } else {
        let mut lines = format_table(&result.header, &result.records).into_iter();
        if let Some(header) = lines.next() {
            writeln!(out, "\n{}", header.bold())?;
            writeln!(out, "{}", "-".repeat(header.chars().count()))?;
        }
        for line in lines {
            writeln!(out, "{}", line)?;
        }
    }

    let links = page_links(page as u64, total_pages, config.link_radius as u64);
    writeln!(out, "\nPages: {}", format_page_links(&links))?;
    Ok(())
}

fn print_json(
    out: &mut impl Write,
    result: &ScanResult,
    query: &str,
    page: usize,
    config: &ScanConfig,
) -> Result<()> {
    let json = JsonPage {
        query,
        page,
        page_size: config.page_size.get(),
        total_pages: result.total_pages(config.page_size),
        total_matches: result.total_matches,
        header: &result.header,
        records: &result.records,
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
