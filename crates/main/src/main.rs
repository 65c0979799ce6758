use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dfc_report::{samples, PaperSize, ReportBuilder, ReportError, SearchResult};
use log::info;

/// Renders Digital Footprint Collector search results as PDF reports.
///
/// Input is the JSON body returned by the backend search endpoint.  Set
/// `RUST_LOG=debug` to trace layout decisions.
#[derive(Parser)]
#[command(author, version, about = "PDF reports for Digital Footprint Collector results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a search result JSON file (`-` for stdin) to a PDF.
    Render {
        /// Path to the search result JSON, or `-` to read stdin.
        input: PathBuf,

        /// Directory the PDF is written to.
        #[arg(short, long, env = "DFC_REPORT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Export date used in the file name (YYYY-MM-DD). Defaults to today (UTC).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Paper size of every page.
        #[arg(long, value_enum, default_value_t = Paper::A4)]
        paper: Paper,

        /// Add an outline entry per section (needs the `bookmarks` feature).
        #[arg(long)]
        bookmarks: bool,
    },

    /// Print the file name a report would be saved under.
    Filename {
        /// Path to the search result JSON, or `-` to read stdin.
        input: PathBuf,

        /// Export date used in the file name (YYYY-MM-DD). Defaults to today (UTC).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Render the bundled username, email and name samples.
    #[command(aliases = ["sample", "demo"])]
    Samples {
        /// Directory the PDFs are written to.
        #[arg(short, long, env = "DFC_REPORT_DIR", default_value = "target/dfc_samples")]
        output_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    A4,
    Letter,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperSize::A4,
            Paper::Letter => PaperSize::Letter,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output_dir,
            date,
            paper,
            bookmarks,
        } => render(&input, &output_dir, date, paper.into(), bookmarks),
        Commands::Filename { input, date } => filename(&input, date),
        Commands::Samples { output_dir } => render_samples(&output_dir),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    dfc_report::parse_export_date(value).map_err(|err| err.to_string())
}

fn read_input(input: &Path) -> Result<SearchResult, ReportError> {
    let json = if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };
    SearchResult::from_json(&json)
}

fn builder(date: Option<NaiveDate>) -> ReportBuilder {
    match date {
        Some(date) => ReportBuilder::new().with_export_date(date),
        None => ReportBuilder::new(),
    }
}

fn render(
    input: &Path,
    output_dir: &Path,
    date: Option<NaiveDate>,
    paper: PaperSize,
    bookmarks: bool,
) -> Result<(), ReportError> {
    if bookmarks && !cfg!(feature = "bookmarks") {
        log::warn!("--bookmarks ignored: built without the `bookmarks` feature");
    }

    let result = read_input(input)?;
    fs::create_dir_all(output_dir)?;
    let path = builder(date)
        .with_paper_size(paper)
        .with_bookmarks(bookmarks)
        .build(&result)?
        .save(output_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn filename(input: &Path, date: Option<NaiveDate>) -> Result<(), ReportError> {
    let result = read_input(input)?;
    let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    println!(
        "{}",
        dfc_report::report_filename(result.kind(), &result.query, date)
    );
    Ok(())
}

fn render_samples(output_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(output_dir)?;
    for sample in samples::all() {
        let path = ReportBuilder::new().build(&sample)?.save(output_dir)?;
        info!("{} sample written", sample.kind());
        println!("{}", path.display());
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
