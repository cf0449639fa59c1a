// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gazette_monitor::delivery::{DeliverySink, LogSink, SmtpMailer};
use gazette_monitor::source::GazetteLocation;
use gazette_monitor::utils::logging::{format_error, format_match, format_success, format_warning};
use gazette_monitor::{
    AutoSource, Config, DigestExporter, DocumentAnalyzer, DocumentSource, Downloader,
    GazetteLocator, MonitorPipeline, PdfTextSource, ReportBuilder, SequentialProbeLocator,
    Validator,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

const PREVIEW_CHARS: usize = 240;

#[derive(Parser)]
#[command(name = "gazette_monitor")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Watches the DOTCE-CE gazette for publications mentioning terms of interest", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the latest edition, analyze it and mail the report
    Run {
        /// Log the report instead of sending it
        #[arg(long)]
        dry_run: bool,

        /// Keep the downloaded PDF after the run
        #[arg(long)]
        keep_pdf: bool,

        /// Write the digest as JSON into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Only resolve the latest available edition
    Latest,

    /// Analyze a local PDF or text file and print the report
    Scan {
        file: PathBuf,

        /// Search term, repeatable; replaces the configured terms
        #[arg(short, long = "term", value_name = "TERM")]
        terms: Vec<String>,

        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    gazette_monitor::utils::logging::init_logger(cli.color, cli.verbose);

    info!("DOTCE-CE gazette monitor");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Run {
            dry_run,
            keep_pdf,
            export,
        } => {
            cmd_run(&config, dry_run, keep_pdf, export, cli.color).await?;
        }
        Commands::Latest => {
            cmd_latest(&config, cli.color).await?;
        }
        Commands::Scan {
            file,
            terms,
            export,
        } => {
            cmd_scan(&config, &file, terms, export)?;
        }
    }

    Ok(())
}

async fn cmd_run(
    config: &Config,
    dry_run: bool,
    keep_pdf: bool,
    export: Option<PathBuf>,
    show_progress: bool,
) -> Result<()> {
    if dry_run {
        info!("Dry run: the report will be logged, not sent");
        execute(config, LogSink, keep_pdf, export, show_progress).await
    } else {
        config
            .require_mail_credentials()
            .context("Mail delivery is not configured")?;
        let mailer = SmtpMailer::new(config.mail.clone());
        execute(config, mailer, keep_pdf, export, show_progress).await
    }
}

async fn execute<D: DeliverySink + Send + Sync + 'static>(
    config: &Config,
    sink: D,
    keep_pdf: bool,
    export: Option<PathBuf>,
    show_progress: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let locator = SequentialProbeLocator::new(config.source.clone())
        .context("Failed to create gazette locator")?
        .with_progress(show_progress);
    let downloader = Downloader::new(
        &config.source.download_dir,
        config.source.download_timeout_secs,
    )
    .context("Failed to create downloader")?;
    let analyzer =
        DocumentAnalyzer::from_config(&config.search).context("Invalid heading patterns")?;
    let exporter = export
        .map(|dir| DigestExporter::new(dir, true))
        .transpose()
        .context("Failed to prepare export directory")?;

    let pipeline = MonitorPipeline::new(
        locator,
        downloader,
        PdfTextSource::new(),
        analyzer,
        ReportBuilder::from_config(&config.report),
        sink,
        config.mail.recipients.clone(),
    )
    .keep_download(keep_pdf || config.source.keep_download)
    .with_exporter(exporter);

    let outcome = pipeline.run().await.context("Monitoring run failed")?;

    match outcome {
        Some(outcome) => {
            let summary = format!(
                "{}: {} matching publication(s) out of {}",
                outcome.document_name,
                outcome.digest.total_matches(),
                outcome.digest.units_scanned
            );
            println!("{}", format_success(&summary));
            if !outcome.delivered {
                println!("{}", format_error("The report could not be delivered"));
            }
        }
        None => {
            println!("{}", format_warning("No gazette edition is available"));
        }
    }

    info!(
        "Run complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn cmd_latest(config: &Config, show_progress: bool) -> Result<()> {
    let locator = SequentialProbeLocator::new(config.source.clone())
        .context("Failed to create gazette locator")?
        .with_progress(show_progress);

    match locator.locate().await.context("Probing failed")? {
        Some(gazette) => {
            println!("{}", format_success(&gazette.name));
            if let GazetteLocation::Remote(url) = &gazette.location {
                println!("  {}", url);
            }
        }
        None => {
            println!(
                "{}",
                format_warning(&format!(
                    "No edition found from number {}",
                    config.source.start_number
                ))
            );
        }
    }

    Ok(())
}

fn cmd_scan(
    config: &Config,
    file: &Path,
    terms: Vec<String>,
    export: Option<PathBuf>,
) -> Result<()> {
    Validator::validate_file_path(file)?;

    let mut search = config.search.clone();
    if !terms.is_empty() {
        search.terms = terms;
    }

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let bytes =
        fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let document = AutoSource.extract(&name, &bytes)?;
    let analyzer = DocumentAnalyzer::from_config(&search).context("Invalid heading patterns")?;
    let digest = analyzer.analyze(&document);

    if let Some(dir) = export {
        DigestExporter::new(dir, true)?.export(&document, &digest)?;
    }

    println!(
        "\n{} publication(s) identified in {}\n",
        digest.units_scanned, name
    );
    println!("{}", "=".repeat(80));

    for result in &digest.results {
        println!(
            "\n{}",
            format_match(result.ordinal + 1, result.line, &result.term_names())
        );
        for line in Validator::truncate_text(&result.text, PREVIEW_CHARS)
            .lines()
            .take(5)
        {
            println!("     {}", line);
        }
    }

    println!("\n{}", "=".repeat(80));
    for count in &digest.counts {
        println!("  {:>4}  {}", count.count, count.term.original);
    }

    let report = ReportBuilder::from_config(&config.report).build(&name, &digest, analyzer.terms());
    println!("\n{}\n", report.subject);
    println!("{}", report.body);

    Ok(())
}
