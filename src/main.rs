//! songsweep - Remove redundant copies of the same song from a music folder.
//!
//! Usage:
//!   songsweep scan [PATH]                 List duplicate groups
//!   songsweep dedupe [PATH] --mode MODE   Resolve and remove duplicates
//!   songsweep shuffle [PATH]              Add random A-Z_ prefixes
//!   songsweep unshuffle [PATH]            Strip those prefixes again
//!   songsweep --help                      Show help

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use songsweep_analyze::{DuplicateReport, PriorityKey, PriorityResolver, ResolutionDecision};
use songsweep_core::DedupeConfig;
use songsweep_ops::{
    PrefixRun, RemovalExecutor, RemovalMode, RemovalRun, RenameOutcome, RunReport, add_shuffle_prefixes,
    strip_shuffle_prefixes, write_json_log, write_text_log,
};
use songsweep_scan::{DirectoryScanner, DuplicateGrouper, resolve_root};

#[derive(Parser)]
#[command(
    name = "songsweep",
    version,
    about = "Find and remove redundant copies of the same song",
    long_about = "songsweep groups audio files named `Title - Artist[_tag].ext` by \
                  normalized title and artist, keeps the best copy of each song \
                  and removes the rest.\n\n\
                  Start with `songsweep dedupe --mode simulate` to see what would go."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List duplicate groups without touching anything
    Scan {
        /// Music directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Keep the best copy of each song and remove the others
    Dedupe {
        /// Music directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// simulate, backup or permanent (prompts when omitted)
        #[arg(short, long, value_parser = RemovalMode::parse)]
        mode: Option<RemovalMode>,

        /// Skip the confirmation for permanent deletion
        #[arg(short, long)]
        yes: bool,

        /// Write JSON and text logs of the run into this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Prefix every audio file with a random letter for name-sorted players
    Shuffle {
        /// Music directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove shuffle prefixes
    Unshuffle {
        /// Music directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan { path, format } => run_scan(&path, format)?,
        Command::Dedupe {
            path,
            mode,
            yes,
            log_dir,
            format,
        } => run_dedupe(&path, mode, yes, log_dir.as_deref(), format)?,
        Command::Shuffle { path, yes } => run_shuffle(&path, yes, false)?,
        Command::Unshuffle { path, yes } => run_shuffle(&path, yes, true)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("songsweep={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Scan, group and resolve the directory at `path`.
fn analyze(path: &Path) -> Result<(DedupeConfig, Vec<ResolutionDecision>)> {
    let root = resolve_root(path).context("Invalid path")?;

    eprintln!("Scanning {}...", root.display());

    let config = DedupeConfig::new(&root);
    let scan = DirectoryScanner::new().scan(&config).context("Scan failed")?;

    for warning in &scan.warnings {
        tracing::warn!(path = %warning.path.display(), kind = ?warning.kind, "{}", warning.message);
    }
    if !scan.warnings.is_empty() {
        eprintln!("{} warning(s) during scan", scan.warnings.len());
    }
    tracing::debug!(
        songs = scan.songs.len(),
        skipped = scan.skipped_files,
        elapsed = ?scan.scan_duration,
        "scan finished"
    );

    let groups = DuplicateGrouper::with_config(config.clone()).group(scan.songs);
    let decisions = PriorityResolver::new().resolve_all(groups);
    tracing::info!(groups = decisions.len(), "resolved duplicate groups");
    Ok((config, decisions))
}

/// List duplicate groups, keeper first.
fn run_scan(path: &Path, format: OutputFormat) -> Result<()> {
    let (_, decisions) = analyze(path)?;
    let report = DuplicateReport::from_decisions(&decisions);

    match format {
        OutputFormat::Text => {
            print_header("Duplicate Song Report");

            if !report.has_duplicates() {
                println!(" No duplicate songs found.");
                return Ok(());
            }

            print!("{}", render_groups(&decisions));

            print_plan(&report);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "summary": report,
                "groups": decisions,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Run the full pipeline and apply the chosen mode.
fn run_dedupe(
    path: &Path,
    mode: Option<RemovalMode>,
    yes: bool,
    log_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let (config, decisions) = analyze(path)?;
    let report = DuplicateReport::from_decisions(&decisions);

    if !report.has_duplicates() {
        eprintln!("No duplicate songs found.");
        return Ok(());
    }

    if matches!(format, OutputFormat::Text) {
        eprint!("{}", render_groups(&decisions));
    }
    print_plan(&report);

    let mode = match mode {
        Some(mode) => mode,
        None => match prompt_mode()? {
            Some(mode) => mode,
            None => {
                eprintln!("Cancelled.");
                return Ok(());
            }
        },
    };

    if mode == RemovalMode::Permanent && !yes {
        let answer = prompt(&format!(
            "Permanently delete {} file(s)? Type YES to continue: ",
            report.files_to_remove
        ))?;
        if answer != "YES" {
            tracing::debug!("permanent deletion not confirmed");
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    tracing::info!(%mode, files = report.files_to_remove, "executing removal");
    let executor = RemovalExecutor::from_config(&config, mode);
    let run = executor.execute(&decisions).context("Removal failed")?;
    tracing::info!(stats = ?run.stats, "removal finished");

    let logs = match log_dir {
        Some(dir) => {
            let run_report = RunReport::new(&config.root, mode, run.stats, &decisions);
            vec![
                write_json_log(dir, &run_report).context("Failed to write JSON log")?,
                write_text_log(dir, &run_report).context("Failed to write text log")?,
            ]
        }
        None => Vec::new(),
    };

    match format {
        OutputFormat::Text => print_run(&run),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run)?),
    }

    for log in &logs {
        eprintln!("Log written to {}", log.display());
    }

    Ok(())
}

/// Add or strip shuffle prefixes.
fn run_shuffle(path: &Path, yes: bool, strip: bool) -> Result<()> {
    let root = resolve_root(path).context("Invalid path")?;
    let config = DedupeConfig::new(&root);

    let action = if strip { "Remove shuffle prefixes from" } else { "Add shuffle prefixes to" };
    if !yes && !confirm(&format!("{action} audio files in {}? [y/n] ", root.display()))? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let run = if strip {
        strip_shuffle_prefixes(&config)
    } else {
        add_shuffle_prefixes(&config, &mut rand::thread_rng())
    }
    .context("Rename failed")?;

    print_prefix_run(&run);
    Ok(())
}

/// Ask for a removal mode. `None` means the user cancelled.
fn prompt_mode() -> Result<Option<RemovalMode>> {
    eprintln!("Choose a mode:");
    eprintln!("  1. simulate  (report only, nothing is touched)");
    eprintln!("  2. backup    (move duplicates into a backup folder)");
    eprintln!("  3. permanent (delete duplicates, cannot be undone)");
    eprintln!("  4. cancel");

    let choice = prompt("Enter 1-4: ")?;
    let mode = match choice.as_str() {
        "1" => Some(RemovalMode::Simulate),
        "2" => Some(RemovalMode::Backup),
        "3" => Some(RemovalMode::Permanent),
        "4" => None,
        other => RemovalMode::parse(other).map(Some)?,
    };
    Ok(mode)
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(question)?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Print `question` to stderr and read one trimmed line from stdin.
fn prompt(question: &str) -> Result<String> {
    eprint!("{question}");
    io::stderr().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        bail!("Prompt aborted: no input on stdin");
    }
    Ok(line.trim().to_string())
}

fn print_header(title: &str) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" {title}");
    println!("{}", "─".repeat(70));
    println!();
}

/// One block per group: keeper first, then removal candidates in order.
fn render_groups(decisions: &[ResolutionDecision]) -> String {
    let mut out = String::new();
    for (i, decision) in decisions.iter().enumerate() {
        out.push_str(&format!(
            " {}. {} - {} ({} copies)\n",
            i + 1,
            decision.keep.song_title,
            decision.keep.artist,
            decision.total_count()
        ));
        let members = std::iter::once(("keep", &decision.keep))
            .chain(decision.remove.iter().map(|song| ("remove", song)));
        for (verdict, song) in members {
            out.push_str(&format!(
                "   [{:<6}] {:<50} {:>8.2} MB  tag: {:<10} score: {}\n",
                verdict,
                truncate(&song.filename, 50),
                song.size_mib(),
                if song.has_quality_tag() { song.quality_tag.as_str() } else { "-" },
                PriorityKey::of(song).score()
            ));
        }
        out.push('\n');
    }
    out
}

fn print_plan(report: &DuplicateReport) {
    eprintln!(
        "Found {} duplicate group(s): {} file(s) to remove, {} to free",
        report.group_count,
        report.files_to_remove,
        format_size(report.bytes_to_remove)
    );
}

fn print_run(run: &RemovalRun) {
    print_header(&format!("Cleanup Summary ({})", run.mode));

    for action in &run.actions {
        if !action.outcome.is_failure() {
            println!("   {}: {}", run.mode.verb(), action.filename);
        }
    }
    println!();

    for (label, value) in run.stats.entries() {
        println!(" {label:<10} {value}");
    }

    if let Some(dir) = &run.backup_dir {
        println!();
        println!(" Backup folder: {}", dir.display());
    }

    if !run.stats.is_success() {
        println!();
        println!(" Failures:");
        for err in run.failures() {
            println!("   {err}");
        }
    }
}

fn print_prefix_run(run: &PrefixRun) {
    println!(
        " {} renamed, {} skipped, {} error(s)",
        run.stats.renamed, run.stats.skipped, run.stats.errors
    );
    for (filename, outcome) in &run.actions {
        if let RenameOutcome::Failed(err) = outcome {
            println!("   {filename}: {}", err.message);
        }
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to at most `max_chars` characters.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }
}
