//! postab - Extract positional tables from PDF word dumps
//!
//! Reads the words of one or more pages (as dumped by a PDF text layer),
//! assigns them to named column x-ranges, clusters them into rows and
//! writes the resulting records as JSON or plain text.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use postab_core::ExtractionConfig;
use postab_core::api::{
    BatchOptions, PageTable, combine_pages, extract_page, extract_pages, load_pages, select_page,
};
use postab_core::table::{ColumnSet, ColumnSpec};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Output type for the extracted rows.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// JSON array of records (default)
    #[default]
    Json,
    /// One line per row, grouped by page
    Text,
}

/// Extract tables from PDF pages whose columns exist only as aligned text.
#[derive(Parser, Debug)]
#[command(name = "postab")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON word dump: a word list, a page list, or {"pages": [...]}
    words: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Column and cutoff options ===
    /// Extraction config file (columns, cutoffs, tolerance)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Column as NAME=XMIN:XMAX; repeat in output order. Replaces config columns
    #[arg(long = "column", value_parser = parse_column)]
    columns: Vec<ColumnSpec>,

    /// Words with top above this y are ignored
    #[arg(long = "header-cutoff")]
    header_cutoff: Option<f64>,

    /// Words with top below this y are ignored
    #[arg(long = "footer-cutoff")]
    footer_cutoff: Option<f64>,

    /// Maximum y distance for words to share a row
    #[arg(long = "y-tolerance")]
    y_tolerance: Option<f64>,

    /// Trim the leading space of every cell
    #[arg(long, action = ArgAction::SetTrue)]
    trim: bool,

    /// Write the effective config to this file and continue
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,

    // === Page options ===
    /// Only extract this page (1-indexed)
    #[arg(short = 'p', long)]
    page: Option<usize>,

    /// Worker threads for all-pages extraction (default: available cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Emit every column in every record, empty when unpopulated
    #[arg(long, action = ArgAction::SetTrue)]
    fill: bool,
}

/// Parse `NAME=XMIN:XMAX`.
fn parse_column(s: &str) -> std::result::Result<ColumnSpec, String> {
    let (name, range) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=XMIN:XMAX, got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("column name is empty in {s:?}"));
    }
    let (xmin, xmax) = range
        .split_once(':')
        .ok_or_else(|| format!("expected XMIN:XMAX after '=', got {range:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid float value: {v}"))
    };
    ColumnSpec::new(name, parse(xmin)?, parse(xmax)?).map_err(|e| e.to_string())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Build the config from the file (if any) and command line overrides.
fn build_config(args: &Args) -> Result<ExtractionConfig> {
    let mut config = match args.config {
        Some(ref path) => ExtractionConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ExtractionConfig::default(),
    };
    if !args.columns.is_empty() {
        config.columns = ColumnSet::from_specs(args.columns.iter().cloned());
    }
    if let Some(y) = args.header_cutoff {
        config.header_cutoff = y;
    }
    if let Some(y) = args.footer_cutoff {
        config.footer_cutoff = y;
    }
    if let Some(t) = args.y_tolerance {
        config.y_tolerance = t;
    }
    if args.trim {
        config.trim_cells = true;
    }
    Ok(config)
}

fn write_text<W: Write>(writer: &mut W, tables: &[PageTable]) -> io::Result<()> {
    for page in tables.iter().filter(|p| !p.table.is_empty()) {
        writeln!(writer, "# page {}", page.page_number)?;
        writeln!(writer, "{}", page.table)?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    if let Some(ref path) = args.save_config {
        std::fs::write(path, config.to_json_string()?)
            .with_context(|| format!("failed to write config {}", path.display()))?;
    }
    debug!(columns = config.columns.len(), "effective configuration loaded");

    let pages = load_pages(&args.words)
        .with_context(|| format!("failed to read words from {}", args.words.display()))?;
    let settings = config.settings();

    // A selected page is exported on its own, without the page field.
    let (tables, tag_pages) = match args.page {
        Some(n) => {
            let Some(page) = select_page(&pages, n) else {
                bail!("page {n} not found ({} pages in input)", pages.len());
            };
            (vec![extract_page(page, &config.columns, &settings)?], false)
        }
        None => {
            let options = BatchOptions {
                threads: args.threads,
                ..Default::default()
            };
            (
                extract_pages(&pages, &config.columns, &settings, &options)?,
                true,
            )
        }
    };

    if tables.iter().all(|t| t.table.is_empty()) {
        warn!("no data extracted; check column boundaries and cutoffs");
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    match args.output_type {
        OutputType::Json => {
            let records = if tag_pages {
                combine_pages(&tables, args.fill)
            } else {
                tables
                    .iter()
                    .flat_map(|t| t.table.records(args.fill))
                    .collect()
            };
            serde_json::to_writer_pretty(&mut output, &records)?;
            writeln!(output)?;
        }
        OutputType::Text => write_text(&mut output, &tables)?,
    }

    output.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
