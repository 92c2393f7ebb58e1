use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use colored::Colorize;

use doc_scout_core::manifest::writer;
use doc_scout_core::{
    aggregate_to_top_dirs, build_doc_structure, classify_candidates, find_project_root,
    resolve_targets, Aggregation, Config, DocScoutError, Result, Scanner,
};

mod args;
mod display;
mod output;

use args::{Cli, Commands, OutputFormat, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { root, skip } => handle_scan(root.as_deref(), &skip),
        Commands::Classify { root, skip, format } => {
            handle_classify(root.as_deref(), &skip, format, cli.verbose)
        }
        Commands::Init { root, skip, force } => {
            handle_init(root.as_deref(), &skip, force, cli.quiet)
        }
        Commands::Resolve { root, targets } => handle_resolve(root.as_deref(), &targets),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Project root: explicit argument or the nearest ancestor of the current
/// directory containing a version-control marker.
fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let start = root.unwrap_or_else(|| Path::new("."));
    if !start.is_dir() {
        return Err(DocScoutError::TargetNotFound {
            path: start.to_path_buf(),
        });
    }
    Ok(find_project_root(start))
}

/// Scanner with layered configuration. A broken config file is reported
/// and ignored rather than fatal.
fn build_scanner(root: &Path) -> Scanner {
    let config = Config::load_layered(root).unwrap_or_else(|e| {
        eprintln!("{} ignoring invalid config: {}", "[WARN]".yellow().bold(), e);
        Config::default()
    });
    Scanner::with_config(root, &config.scan)
}

fn handle_scan(root: Option<&Path>, skip: &[String]) -> Result<()> {
    let root = resolve_root(root)?;
    let report = build_scanner(&root).report(skip);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn classify_project(root: &Path, skip: &[String]) -> Aggregation {
    let candidates = build_scanner(root).candidates(skip);
    let outcome = classify_candidates(root, &candidates);
    aggregate_to_top_dirs(&outcome)
}

fn handle_classify(
    root: Option<&Path>,
    skip: &[String],
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let root = resolve_root(root)?;
    let aggregation = classify_project(&root, skip);

    if verbose {
        eprintln!(
            "{} {}: {} rules, {} specs, {} skipped",
            "[INFO]".cyan().bold(),
            display::format_path(&root),
            aggregation.rules.len(),
            aggregation.specs.len(),
            aggregation.skipped.len()
        );
    }

    match format {
        OutputFormat::DocStructure => {
            if aggregation.is_empty() {
                print!("{}", writer::render_placeholder());
            } else {
                print!("{}", writer::render(&build_doc_structure(&aggregation)));
            }
        }
        OutputFormat::Yaml => {
            if aggregation.is_empty() && aggregation.skipped.is_empty() {
                print!("{}", output::render_yaml_empty());
            } else {
                print!("{}", output::render_yaml(&aggregation));
            }
        }
        OutputFormat::Summary => print!("{}", output::render_summary(&aggregation)),
    }

    Ok(())
}

fn handle_init(root: Option<&Path>, skip: &[String], force: bool, quiet: bool) -> Result<()> {
    let root = resolve_root(root)?;
    let aggregation = classify_project(&root, skip);

    let path = if aggregation.is_empty() {
        writer::write_text(&writer::render_placeholder(), &root, force)?
    } else {
        writer::write(&build_doc_structure(&aggregation), &root, force)?
    };

    if !quiet {
        println!(
            "{} Wrote {}",
            "[OK]".green().bold(),
            display::format_path(&path)
        );
    }
    Ok(())
}

fn handle_resolve(root: Option<&Path>, targets: &[String]) -> Result<()> {
    let root = resolve_root(root)?;

    // Unrecognized flags are swallowed, bare words are targets
    let targets: Vec<String> = targets
        .iter()
        .filter(|t| !t.starts_with("--"))
        .cloned()
        .collect();

    let resolution = resolve_targets(&root, &targets);
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin = "doc-scout";
    let mut out = io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, bin, &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, bin, &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, bin, &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, bin, &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, bin, &mut out),
    }
}
