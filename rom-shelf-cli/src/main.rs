//! rom-shelf CLI
//!
//! One-shot commands for curating a ROM/emulator game library: inspect
//! a metadata dump, import it into SQLite, download artwork for local
//! ROMs, and generate a library index.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use rom_shelf_artwork::{DownloadOptions, RunLog, load_cores, run_artwork};
use rom_shelf_db::{open_database, store_stats};
use rom_shelf_gamesdb::{ImportProgress, import_dump, load_dump, sketch_file};
use rom_shelf_index::{generate_html, scan_roms, to_json};

mod error;
use error::CliError;

#[derive(Parser)]
#[command(name = "rom-shelf")]
#[command(about = "Curate a ROM library: import metadata, fetch artwork, build an index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a type sketch of a JSON file's shape
    Inspect {
        /// JSON file to sketch
        #[arg(default_value = "database-latest.json")]
        file: PathBuf,
    },

    /// Import a TheGamesDB dump into the library database
    Import {
        /// Dump file to import
        #[arg(long, default_value = "database-latest.json")]
        dump: PathBuf,

        /// Library database path
        #[arg(long, default_value = "games.db")]
        db: PathBuf,
    },

    /// Download cover art and screenshots for ROMs in the core tree
    Artwork {
        /// Library database path
        #[arg(long, default_value = "games.db")]
        db: PathBuf,

        /// Core-tree asset listing systems and their ROM files
        #[arg(long, default_value = "assets.cores.json")]
        cores: PathBuf,

        /// Root directory artwork is written under
        #[arg(long, default_value = "ROMs")]
        roms: PathBuf,

        /// Maximum concurrent downloads per game
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },

    /// Scan the ROM tree and write roms_mapping.json and index.html
    Index {
        /// Root directory to scan
        #[arg(long, default_value = "ROMs")]
        roms: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Import { dump, db } => run_import(&dump, &db),
        Commands::Artwork {
            db,
            cores,
            roms,
            workers,
        } => run_artwork_command(&db, &cores, &roms, workers),
        Commands::Index { roms } => run_index(&roms),
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

// ── inspect ─────────────────────────────────────────────────────────────────

fn run_inspect(file: &PathBuf) -> Result<(), CliError> {
    let sketch = sketch_file(file)?;
    println!();
    println!("Schema for {}:", file.display());
    println!("{}", "=".repeat(40));
    println!("{sketch}");
    Ok(())
}

// ── import ──────────────────────────────────────────────────────────────────

/// Drives an indicatif bar from importer callbacks.
struct BarProgress {
    bar: ProgressBar,
}

impl ImportProgress for BarProgress {
    fn on_game(&self, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
    }

    fn on_phase(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}

fn run_import(dump_path: &PathBuf, db_path: &PathBuf) -> Result<(), CliError> {
    println!("Importing data from {}...", dump_path.display());
    let dump = load_dump(dump_path)?;
    let conn = open_database(db_path)?;

    let bar = ProgressBar::new(dump.data.games.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    let progress = BarProgress { bar: bar.clone() };

    let stats = import_dump(&conn, &dump, Some(&progress))?;
    bar.finish_and_clear();

    if stats.skipped_malformed > 0 {
        println!(
            "{} Skipped {} malformed game record(s)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.skipped_malformed,
        );
    }
    if stats.skipped_bad_refs > 0 {
        println!(
            "{} Skipped {} game(s) referencing an unknown platform",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.skipped_bad_refs,
        );
    }
    if stats.artwork_orphaned > 0 {
        println!(
            "{} Skipped {} artwork row(s) for games not in the dump",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.artwork_orphaned,
        );
    }

    let totals = store_stats(&conn)?;
    println!();
    println!(
        "{}",
        "Database Statistics:".if_supports_color(Stdout, |t| t.bold())
    );
    println!("Total Systems: {}", totals.systems);
    println!("Total Games: {}", totals.games);
    println!("Total Artwork: {}", totals.artwork);
    println!(
        "{} Done!",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

// ── artwork ─────────────────────────────────────────────────────────────────

fn run_artwork_command(
    db_path: &PathBuf,
    cores_path: &PathBuf,
    roms_root: &PathBuf,
    workers: usize,
) -> Result<(), CliError> {
    let cores = load_cores(cores_path)?;
    let conn = open_database(db_path)?;
    let options = DownloadOptions {
        workers,
        ..DownloadOptions::default()
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    let log = rt.block_on(async {
        tokio::select! {
            result = run_artwork(&conn, &cores, roms_root, &options) => result.map(Some),
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Operation cancelled by user");
                Ok(None)
            }
        }
    })?;

    if let Some(log) = log {
        print_artwork_summary(&log);
    }
    Ok(())
}

fn print_artwork_summary(log: &RunLog) {
    let summary = log.summary();
    println!();
    println!(
        "{}",
        "Artwork Summary:".if_supports_color(Stdout, |t| t.bold())
    );
    println!(
        "{} Downloaded: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.downloaded,
    );
    println!("  Already present: {}", summary.skipped_existing);
    println!("  No artwork: {}", summary.no_artwork);
    if summary.unmatched > 0 {
        println!(
            "{} Unmatched: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.unmatched,
        );
    }
    if summary.failed > 0 {
        println!(
            "{} Failed: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.failed,
        );
    }

    let log_path = std::path::Path::new("artwork.log");
    match log.write_to_file(log_path) {
        Ok(()) => println!("Full report written to {}", log_path.display()),
        Err(e) => log::warn!("Could not write {}: {e}", log_path.display()),
    }
}

// ── index ───────────────────────────────────────────────────────────────────

fn run_index(roms_root: &PathBuf) -> Result<(), CliError> {
    if !roms_root.exists() {
        return Err(CliError::runtime(format!(
            "{} directory not found",
            roms_root.display()
        )));
    }

    println!("Scanning {}...", roms_root.display());
    let mapping = scan_roms(roms_root)?;

    std::fs::write("roms_mapping.json", to_json(&mapping)?)?;
    std::fs::write("index.html", generate_html(&mapping))?;

    let total_roms: usize = mapping.values().map(|s| s.count).sum();
    println!();
    println!(
        "{} Found {} ROMs across {} systems",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        total_roms,
        mapping.len(),
    );
    println!("Mapping written to roms_mapping.json");
    println!("HTML index written to index.html");
    Ok(())
}
