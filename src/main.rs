//! CLI for zotpub - Fetch and render Zotero publication lists as HTML.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use zotpub::{
    fetch_bibliography, fetch_publications, format_all, load_records, parse_records,
    record::RecordError, render_bare, render_document, render_list, render_section, PubQuery,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Fetch and render Zotero publication lists as HTML
#[derive(Parser)]
#[command(name = "zotpub")]
#[command(version)]
#[command(after_help = "\
Examples:
  zotpub render items.json
  zotpub render items.json --heading Publications -o pubs.html
  curl -s 'https://api.zotero.org/users/24775/publications/items?format=json' | zotpub render -
  zotpub fetch --user 24775 --year 2022 --year 2021")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an already-fetched publications payload
    #[command(after_help = "\
Examples:
  zotpub render items.json
  zotpub render items.jsonl --bare
  echo '[]' | zotpub render - --heading 2022

Accepts Zotero API items (with data envelopes), bare record arrays, or JSONL.")]
    Render {
        /// Input payload file (use '-' for stdin)
        input: PathBuf,

        /// Wrap the list in a section with this heading
        #[arg(long)]
        heading: Option<String>,

        /// Emit one citation per line instead of an HTML list
        #[arg(long)]
        bare: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch publications from the Zotero API and render them
    #[command(after_help = "\
Examples:
  zotpub fetch --user 24775
  zotpub fetch --user 24775 --year 2022 --year 2021
  zotpub fetch --user 24775 --format bib --style apa -o pubs.html

With --year given more than once, one <h2> section is rendered per year,
newest first. --format bib emits the API's own bibliography HTML verbatim.")]
    Fetch {
        /// Numeric Zotero user ID
        #[arg(short, long)]
        user: String,

        /// Item-type filter expression
        #[arg(long, default_value = zotpub::fetch::DEFAULT_ITEM_TYPES)]
        item_type: String,

        /// Sort field
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort direction (asc or desc)
        #[arg(long, default_value = "desc")]
        direction: String,

        /// Page size (the API caps this at 100)
        #[arg(long, default_value_t = 100)]
        limit: u32,

        /// Restrict to a publication year; repeat for one section per year
        #[arg(long)]
        year: Vec<i32>,

        /// Response format: local formatting (json) or API pass-through (bib)
        #[arg(long, value_enum, default_value = "json")]
        format: FetchFormat,

        /// Citation style for --format bib
        #[arg(long, default_value = "apa")]
        style: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FetchFormat {
    /// JSON items, formatted locally
    Json,
    /// Server-rendered bibliography HTML
    Bib,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — payload not valid JSON / JSONL
    Payload(String),
    /// Exit 12 — API request failed
    Fetch(String),
    /// Exit 13 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Payload(_) => 11,
            AppError::Fetch(_) => 12,
            AppError::OutputFile(_) => 13,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::Payload(msg) => {
                write!(
                    f,
                    "{}\n  hint: the payload must be a JSON array of Zotero items (or JSONL, one item per line)",
                    msg
                )
            }
            AppError::Fetch(msg) => {
                write!(
                    f,
                    "{}\n  hint: check the user ID and your network connection",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            heading,
            bare,
            output,
        } => {
            render_command(&input, heading.as_deref(), bare, output.as_deref())?;
        }
        Commands::Fetch {
            user,
            item_type,
            sort,
            direction,
            limit,
            year,
            format,
            style,
            output,
        } => {
            let query = PubQuery {
                user_id: user,
                item_types: item_type,
                sort,
                direction,
                limit,
                q: None,
            };
            fetch_command(query, &year, format, &style, output.as_deref())?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Render a publications payload from a file or stdin.
fn render_command(
    input: &Path,
    heading: Option<&str>,
    bare: bool,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Load the payload (support '-' for stdin)
    let records = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        parse_records(&buf).map_err(|e| AppError::Payload(format!("stdin: {}", e)))?
    } else {
        load_records(input).map_err(|e| match e {
            RecordError::IoError(_) => AppError::InputFile(format!("'{}': {}", input.display(), e)),
            other => AppError::Payload(format!("'{}': {}", input.display(), other)),
        })?
    };

    // 2. Format and render
    let citations = format_all(&records);
    let body = if bare {
        render_bare(&citations)
    } else {
        render_list(&citations)
    };
    let result = match heading {
        Some(h) => render_section(h, &body),
        None => body,
    };

    // 3. Write to file or stdout
    write_output(&result, output)?;
    if let Some(output_path) = output {
        eprintln!(
            "rendered {} publication(s), wrote {}",
            citations.len(),
            output_path.display()
        );
    }

    Ok(())
}

/// Fetch publications from the API and render them.
fn fetch_command(
    query: PubQuery,
    years: &[i32],
    format: FetchFormat,
    style: &str,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let result = if years.is_empty() {
        fetch_body(&query, format, style)?
    } else {
        // One section per year, newest first, like the publications page
        let mut years = years.to_vec();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        let mut sections = Vec::with_capacity(years.len());
        for year in years {
            let body = fetch_body(&query.clone().with_year(year), format, style)?;
            sections.push(render_section(&year.to_string(), &body));
        }
        render_document(&sections)
    };

    write_output(&result, output)?;
    if let Some(output_path) = output {
        eprintln!("wrote {}", output_path.display());
    }

    Ok(())
}

/// One API round trip, rendered according to the requested format.
fn fetch_body(query: &PubQuery, format: FetchFormat, style: &str) -> Result<String, AppError> {
    match format {
        FetchFormat::Json => {
            let records =
                fetch_publications(query).map_err(|e| AppError::Fetch(e.to_string()))?;
            Ok(render_list(&format_all(&records)))
        }
        FetchFormat::Bib => {
            fetch_bibliography(query, style).map_err(|e| AppError::Fetch(e.to_string()))
        }
    }
}

/// Writes the rendered document to a file or stdout.
fn write_output(result: &str, output: Option<&Path>) -> Result<(), AppError> {
    if let Some(output_path) = output {
        std::fs::write(output_path, result)
            .map_err(|e| AppError::OutputFile(format!("'{}': {}", output_path.display(), e)))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", result)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }
    Ok(())
}
