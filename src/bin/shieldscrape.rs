//! Command-line front end: fetch a page with a browser profile (or read it
//! from a file), extract it and print it in the chosen format.
//!
//! Exit status is 0 for a successful or partial extraction, 2 when nothing
//! could be extracted and 1 for errors.

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shieldscrape::fetch::{BrowserProfile, FetchOptions, Fetcher, SUPPORTED_BROWSERS};
use shieldscrape::output::OutputFormat;
use shieldscrape::{extract_bytes_with_options, extract_with_options, ExtractionStatus, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shieldscrape")]
#[command(about = "Fetch pages with a browser profile and extract their content")]
#[command(version)]
struct Cli {
    /// URL to scrape (also the base URL for links when using --input)
    #[arg(required_unless_present = "list_browsers")]
    url: Option<String>,

    /// Browser profile to present (see --list-browsers)
    #[arg(short, long, default_value = "chrome")]
    browser: BrowserProfile,

    /// Output format: rich, json, text or markdown
    #[arg(short, long, default_value = "rich")]
    format: OutputFormat,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Read HTML from FILE (`-` for stdin) instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Extra request header, `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Fetch Reddit URLs as given instead of via old.reddit.com
    #[arg(long)]
    no_old_reddit: bool,

    /// Leave Reddit comments out of the output
    #[arg(long)]
    no_comments: bool,

    /// Drop link-dense lists and blocks from generic pages
    #[arg(long)]
    precision: bool,

    /// List supported browser profiles and exit
    #[arg(long)]
    list_browsers: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shieldscrape={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("header `{raw}` is not in `Name: value` form");
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read HTML from stdin")?;
    } else {
        bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(bytes)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.list_browsers {
        println!("Supported browsers:");
        for browser in SUPPORTED_BROWSERS {
            println!("  - {browser}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let url = cli.url.as_deref().context("a URL is required")?;
    let options = Options {
        include_comments: !cli.no_comments,
        favor_precision: cli.precision,
        ..Options::default()
    };

    let extraction = match &cli.input {
        Some(path) => extract_bytes_with_options(&read_input(path)?, url, &options)?,
        None => {
            let fetch_options = FetchOptions {
                browser: cli.browser,
                timeout: Duration::from_secs(cli.timeout),
                headers: cli
                    .headers
                    .iter()
                    .map(|h| parse_header(h))
                    .collect::<Result<_>>()?,
                prefer_old_reddit: !cli.no_old_reddit,
            };
            let fetcher = Fetcher::new(fetch_options)?;
            tracing::info!(url, browser = %cli.browser, "fetching");
            let page = fetcher
                .fetch(url)
                .with_context(|| format!("failed to fetch {url}"))?;
            extract_with_options(&page.html, &page.url, &options)?
        }
    };
    tracing::info!(
        status = %extraction.status,
        parser = ?extraction.parser,
        links = extraction.document.links.len(),
        "extracted"
    );
    for warning in &extraction.warnings {
        tracing::debug!(%warning, "extraction warning");
    }

    let to_terminal = cli.output.is_none() && io::stdout().is_terminal();
    if !to_terminal {
        colored::control::set_override(false);
    }
    let mut rendered = cli.format.render(&extraction.document)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    if extraction.status == ExtractionStatus::Failed {
        tracing::warn!(url = %extraction.document.url, "nothing could be extracted");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
