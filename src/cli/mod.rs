//! # CLI Module
//!
//! Command-line interface for the image canonicalizer.
//!
//! ## Usage
//! ```bash
//! # Rename every image to its content hash, quarantining duplicates
//! photo-canon --mode rename --path ~/Photos
//!
//! # Report similar pairs first, then rename
//! photo-canon --mode similar+rename --path ~/Photos
//!
//! # Everything, with the duplicates kept somewhere specific
//! photo-canon --mode all --path ~/Photos --duplicate-path ~/dupes
//! ```

mod progress;

use clap::{Parser, ValueEnum};
use console::{style, Term};
use photo_canon::core::hasher::HashAlgorithmKind;
use photo_canon::core::pipeline::{CancellationToken, Mode, Pipeline, RunSummary};
use photo_canon::core::reporter::ReportFormat;
use photo_canon::core::scanner::ScanConfig;
use photo_canon::error::Result;
use photo_canon::events::EventChannel;
use photo_canon::{init_tracing_with_writer, Verbosity};
use progress::{ProgressDisplay, ProgressWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Failures listed individually before the rest are summarized
const MAX_LISTED_FAILURES: usize = 20;

/// photo-canon - content-named, deduplicated image trees
#[derive(Parser, Debug)]
#[command(name = "photo-canon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Operation mode: rename, move, organize, similar or all. Combine with
    /// '+' (rename+similar) or by repeating the flag
    #[arg(short, long, required = true, value_name = "MODES")]
    mode: Vec<String>,

    /// Root of the directory tree to process
    #[arg(short, long)]
    path: PathBuf,

    /// Where to put duplicate images [default: <path>~duplicates]
    #[arg(short, long)]
    duplicate_path: Option<PathBuf>,

    /// Subdirectory of the root to leave alone (repeatable)
    #[arg(short, long, value_name = "NAME")]
    skip: Vec<String>,

    /// Similarity report file, written when the similar mode runs
    #[arg(short, long, default_value = "report.html")]
    report: PathBuf,

    /// Similarity report format
    #[arg(long, value_enum, default_value = "html")]
    report_format: ReportFormatArg,

    /// Hash algorithm; changing it changes every canonical name
    #[arg(short, long, value_enum, default_value = "average")]
    algorithm: Algorithm,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Accept extensions in any case (.JPG as well as .jpg)
    #[arg(long)]
    ignore_case: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,

    /// Print collision and rejection details as well
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - canonical names of the classic tool (default)
    Average,
    /// Difference Hash - brightness gradients
    Difference,
    /// Perceptual Hash - DCT based, most robust to edits
    Perceptual,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Difference => HashAlgorithmKind::Difference,
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormatArg {
    /// Standalone page with the images side by side
    Html,
    /// Machine readable
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(format: ReportFormatArg) -> Self {
        match format {
            ReportFormatArg::Html => ReportFormat::Html,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    let display = ProgressDisplay::new(verbosity != Verbosity::Quiet);
    init_tracing_with_writer(verbosity, ProgressWriter::new(display.bar()));

    let modes = parse_modes(&cli.mode)?;

    let token = CancellationToken::new();
    install_interrupt_handler(token.clone());

    let mut builder = Pipeline::builder()
        .root(&cli.path)
        .modes(modes)
        .algorithm(cli.algorithm.into())
        .scan_config(ScanConfig {
            include_hidden: cli.include_hidden,
            case_insensitive_extensions: cli.ignore_case,
            ..ScanConfig::default()
        })
        .report(&cli.report, cli.report_format.into())
        .cancellation(token);

    if let Some(dir) = &cli.duplicate_path {
        builder = builder.duplicate_dir(dir);
    }
    for name in &cli.skip {
        builder = builder.skip(name);
    }

    let pipeline = builder.build()?;

    let (sender, receiver) = EventChannel::new();
    let listener = display.listen(receiver, cli.path.clone());

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal the listener to finish
    drop(sender);
    listener.join().ok();
    display.finish();

    let summary = result?;

    if verbosity != Verbosity::Quiet {
        print_summary(&Term::stdout(), &summary);
    }

    Ok(())
}

fn parse_modes(args: &[String]) -> Result<Vec<Mode>> {
    let mut modes = Vec::new();
    for arg in args {
        modes.extend(Mode::parse_list(arg)?);
    }
    Ok(modes)
}

fn install_interrupt_handler(token: CancellationToken) {
    let result = ctrlc::set_handler(move || {
        if !token.is_cancelled() {
            eprintln!("Interrupted. Finishing the current directory...");
        }
        token.cancel();
    });

    if let Err(e) = result {
        warn!("Ctrl+C handler not installed: {}", e);
    }
}

fn relative<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

fn print_summary(term: &Term, summary: &RunSummary) {
    term.write_line("").ok();

    let headline = if summary.cancelled {
        style("✗ Cancelled").yellow().bold()
    } else {
        style("✓ Done").green().bold()
    };
    let modes: Vec<String> = summary.modes.iter().map(Mode::to_string).collect();
    term.write_line(&format!(
        "{} {} in {:.1}s",
        headline,
        style(modes.join("+")).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line("").ok();

    let rows: [(usize, &str); 8] = [
        (summary.directories, "directories visited"),
        (summary.renamed, "renamed"),
        (summary.unchanged, "already canonical"),
        (summary.quarantined, "moved to quarantine"),
        (summary.deleted, "extra duplicates deleted"),
        (summary.moved, "relocated"),
        (summary.in_place, "already in place"),
        (summary.similar_pairs(), "similar pairs"),
    ];

    for (count, label) in rows {
        if count > 0 {
            term.write_line(&format!("  {} {}", style(count).cyan(), label))
                .ok();
        }
    }

    if let Some(path) = &summary.report_path {
        term.write_line(&format!(
            "  {} {}",
            style("Report:").dim(),
            path.display()
        ))
        .ok();
    }

    let failure_count = summary.failures.len() + summary.scan_errors.len();
    if failure_count == 0 {
        return;
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style(format!("{} problems:", failure_count)).red().bold()
    ))
    .ok();

    for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
        term.write_line(&format!(
            "  {} [{}] {}: {}",
            style("○").red(),
            failure.mode,
            relative(&failure.path, &summary.root),
            failure.error
        ))
        .ok();
    }
    for error in summary.scan_errors.iter().take(MAX_LISTED_FAILURES) {
        term.write_line(&format!("  {} {}", style("○").red(), error))
            .ok();
    }

    if summary.failures.len() > MAX_LISTED_FAILURES
        || summary.scan_errors.len() > MAX_LISTED_FAILURES
    {
        term.write_line(&format!(
            "  {}",
            style("(more in the log above)").dim()
        ))
        .ok();
    }
}
