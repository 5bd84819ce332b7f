//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_calculator` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading HTML from a file or stdin
//! - Printing results as JSON
//!
//! All core functionality is implemented in the library crate.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;

use seo_calculator::config::DEFAULT_SERVER_PORT;
use seo_calculator::initialization::init_logger_with;
use seo_calculator::{
    estimate_roi_by_id, start_server, AnalysisError, AnalyzeRequest, Analyzer, Calibration,
    Config, Constraint, Intent, PageSource, RequestContext,
};

/// Score a page's SEO signals and recommend remediation plays.
#[derive(Debug, Parser)]
#[command(name = "seo_calculator", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a URL and analyze it
    Analyze {
        /// Page URL (http or https)
        url: String,

        #[command(flatten)]
        options: AnalyzeArgs,
    },
    /// Analyze HTML from a file, or from stdin with `-`
    AnalyzeHtml {
        /// HTML file, or `-` for stdin
        file: PathBuf,

        /// URL the HTML came from, used to resolve relative links
        #[arg(long)]
        base_url: Option<String>,

        #[command(flatten)]
        options: AnalyzeArgs,
    },
    /// Print the ROI range of one play
    Roi {
        /// Play identifier, e.g. `missed_call_booking`
        play: String,

        /// Calibration input, repeatable
        #[arg(long = "calibrate", value_name = "KEY=VALUE", value_parser = parse_calibration)]
        calibrate: Vec<(String, f64)>,
    },
    /// Serve the HTTP API on 127.0.0.1
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_SERVER_PORT, env = "SEO_CALCULATOR_PORT")]
        port: u16,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Declared intent; enables plays and ROI in the output
    #[arg(long)]
    intent: Option<Intent>,

    /// Declared constraint
    #[arg(long)]
    constraint: Option<Constraint>,

    /// ROI calibration input, repeatable (e.g. missed_calls_per_week=25)
    #[arg(long = "calibrate", value_name = "KEY=VALUE", value_parser = parse_calibration)]
    calibrate: Vec<(String, f64)>,

    /// Organization id echoed in the result
    #[arg(long)]
    org_id: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl AnalyzeArgs {
    fn into_request(self, source: PageSource) -> (AnalyzeRequest, bool) {
        let request = AnalyzeRequest {
            source,
            intent: self.intent,
            constraint: self.constraint,
            calibration: self.calibrate.into_iter().collect(),
            context: RequestContext {
                org_id: self.org_id,
            },
        };
        (request, self.pretty)
    }
}

fn parse_calibration(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty calibration key in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("calibration '{key}': {e}"))?;
    Ok((key.to_string(), value))
}

async fn read_html(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut html = String::new();
        tokio::io::stdin()
            .read_to_string(&mut html)
            .await
            .context("Failed to read HTML from stdin")?;
        Ok(html)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read HTML file {}", file.display()))
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Roi { play, calibrate } => {
            let calibration: Calibration = calibrate.into_iter().collect();
            let range = estimate_roi_by_id(&play, &calibration)?;
            print_json(&range, false)
        }
        Command::Serve { port } => {
            let analyzer = Arc::new(Analyzer::new(cli.config)?);
            start_server(port, analyzer).await
        }
        Command::Analyze { url, options } => {
            let analyzer = Analyzer::new(cli.config)?;
            let (request, pretty) = options.into_request(PageSource::Url(url));
            let result = analyzer.analyze(request).await?;
            print_json(&result, pretty)
        }
        Command::AnalyzeHtml {
            file,
            base_url,
            options,
        } => {
            let html = read_html(&file).await?;
            let analyzer = Analyzer::new(cli.config)?;
            let (request, pretty) = options.into_request(PageSource::Html {
                html,
                url: base_url,
            });
            let result = analyzer.analyze(request).await?;
            print_json(&result, pretty)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.config.log_level.clone();
    let log_format = cli.config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("seo_calculator error: {:#}", e);
        if let Some(guidance) = e.downcast_ref::<AnalysisError>().and_then(|a| a.guidance()) {
            eprintln!("hint: {guidance}");
        }
        process::exit(1);
    }
    Ok(())
}
