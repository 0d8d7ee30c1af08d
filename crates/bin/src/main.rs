//! finmetrics CLI binary.
//!
//! Computes financial ratios for a filing at a given market price.

mod config;

use clap::{Parser, Subcommand};
use config::AnalyzeConfig;
use finmetrics::engine::{get_rule, rules};
use finmetrics::output::{
    DEFAULT_REPORT_FILE, ExportFormat, Exporter, TableOrder, render_diagnostics, render_table,
};
use finmetrics::{MarketPrice, Metric, analyze_file, load_record};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "finmetrics")]
#[command(about = "Financial ratio analysis for CSV, XML/XBRL, JSON, and Excel filings", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute every metric for a filing
    Analyze {
        /// Filing to analyze (.csv, .xml, .xbrl, .json, .xlsx, .xls, .ods)
        file: PathBuf,

        /// Current market price per share
        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Write the report to a file (default: financial_metrics.txt)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_REPORT_FILE)]
        output: Option<PathBuf>,

        /// Report format (text, csv, json, pretty-json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: ExportFormat,

        /// Sort the metrics table by name
        #[arg(long)]
        sort_by_name: bool,

        /// Do not print the metrics table
        #[arg(long)]
        quiet: bool,
    },

    /// Show the normalized record for a filing
    Inspect {
        /// Filing to inspect
        file: PathBuf,
    },

    /// List the metric catalog, or describe one metric
    Metrics {
        /// Metric name as printed in reports (e.g. "P/E Ratio")
        name: Option<String>,
    },
}

fn parse_format(name: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(name).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Analyze {
            file,
            price,
            output,
            format,
            sort_by_name,
            quiet,
        } => {
            let price = MarketPrice::new(price)?;
            let config = AnalyzeConfig {
                input: file,
                output,
                format,
                order: if sort_by_name {
                    TableOrder::Name
                } else {
                    TableOrder::Catalog
                },
                quiet,
            };
            analyze(&config, price)?;
        }
        Commands::Inspect { file } => inspect(&file)?,
        Commands::Metrics { name: None } => list_metrics(),
        Commands::Metrics { name: Some(name) } => println!("{}", describe_metric(&name)?),
    }

    Ok(())
}

fn analyze(config: &AnalyzeConfig, price: MarketPrice) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = analyze_file(&config.input, price)?;
    let computation = &analysis.computation;

    if !config.quiet {
        println!("\n╔══════════════════════════════════════════════╗");
        println!("║{:^46}║", "FINANCIAL METRICS");
        println!("╚══════════════════════════════════════════════╝\n");
        println!("Input source: {}\n", analysis.record.source());
        print!("{}", render_table(&computation.metrics, config.order));
        println!("\nErrors & Missing Data:");
        print!("{}", render_diagnostics(&computation.diagnostics));
    }

    if let Some(path) = config.output_path() {
        analysis.report().export_to_file(&path, config.format)?;
        info!(path = %path.display(), format = ?config.format, "Report written");
        if !config.quiet {
            println!("\nReport saved to {}", path.display());
        }
    }

    Ok(())
}

fn inspect(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record = load_record(path)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn describe_metric(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let metric = Metric::from_name(name).ok_or_else(|| format!("Unknown metric: {name}"))?;
    let rule = get_rule(metric);

    let mut lines = vec![
        metric.name().to_string(),
        format!("  Formula:    {}", rule.formula),
        format!("  Fields:     {}", rule.fields.join(", ")),
    ];
    if !rule.depends_on.is_empty() {
        let deps: Vec<&str> = rule.depends_on.iter().map(|m| m.name()).collect();
        lines.push(format!("  Depends on: {}", deps.join(", ")));
    }
    if metric.is_percentage() {
        lines.push("  Unit:       percent".to_string());
    }
    Ok(lines.join("\n"))
}

fn list_metrics() {
    println!("{:<26} Formula", "Metric");
    println!("{}", "-".repeat(80));
    for rule in rules() {
        println!("{:<26} {}", rule.metric.name(), rule.formula);
    }
}
