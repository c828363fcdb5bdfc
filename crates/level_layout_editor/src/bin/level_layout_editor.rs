//! Headless level layout editor
//!
//! Runs editor commands from a script file, or from stdin when no script is
//! given, one command per line:
//!
//! ```text
//! level_layout_editor --catalog catalog.toml --level Mansion build.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use level_layout_editor::preferences::EditorPreferences;
use level_layout_editor::{load_catalog, CommandOutcome, CommandRunner};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "level_layout_editor", version, about = "Place rooms, furniture and borders from editor scripts")]
struct Args {
    /// Template catalog (TOML). Defaults to the one in the preferences.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Folder level files are read from and written to
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Level name used by `save` and `load`
    #[arg(short, long)]
    level: Option<String>,

    /// Overlap tolerance in world units
    #[arg(long)]
    margin: Option<f32>,

    /// Load the level before running the script
    #[arg(long)]
    open: bool,

    /// Remember the catalog, folder and level name for next time
    #[arg(long)]
    remember: bool,

    /// Script with one command per line. Reads stdin when omitted.
    script: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut preferences = EditorPreferences::load();
    if let Some(catalog) = args.catalog {
        preferences.catalog_path = Some(catalog);
    }
    if let Some(levels) = args.levels {
        preferences.levels_folder = levels;
    }
    if let Some(level) = args.level {
        preferences.last_level_name = level;
    }
    if let Some(margin) = args.margin {
        preferences.overlap_margin = margin;
    }

    let catalog_path = preferences
        .catalog_path
        .clone()
        .context("No catalog given; pass --catalog or set catalog_path in the preferences")?;
    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

    let mut runner = CommandRunner::new(preferences.session(catalog), preferences.level_files())
        .with_level_name(preferences.last_level_name.clone());

    if args.open {
        let report = runner
            .load()
            .with_context(|| format!("Failed to open level '{}'", runner.level_name()))?;
        if !report.is_clean() {
            warn!(
                "{} records skipped, {} parents unresolved",
                report.skipped.len(),
                report.unresolved_parents.len()
            );
        }
    }

    let mut failures = 0usize;
    let mut run_line = |number: usize, line: &str| match runner.execute_line(line) {
        Ok(CommandOutcome::Created(id)) => info!("Line {}: created {}", number, id),
        Ok(CommandOutcome::Saved(path)) => info!("Line {}: saved {}", number, path.display()),
        Ok(CommandOutcome::Loaded(report)) => {
            info!("Line {}: loaded {} placeables", number, report.loaded)
        }
        Ok(CommandOutcome::Done) => {}
        Err(e) => {
            error!("Line {}: {}", number, e);
            failures += 1;
        }
    };

    match &args.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            for (index, line) in script.lines().enumerate() {
                run_line(index + 1, line);
            }
        }
        None => {
            for (index, line) in io::stdin().lock().lines().enumerate() {
                let line = line.context("Failed to read stdin")?;
                run_line(index + 1, &line);
            }
        }
    }

    let session = runner.session();
    info!(
        "Finished in {} with {} placeables, {} failed commands",
        session.mode(),
        session.store().len(),
        failures
    );

    if args.remember {
        preferences.last_level_name = runner.level_name().to_string();
        preferences
            .save()
            .context("Failed to save preferences")?;
    }
    Ok(())
}
