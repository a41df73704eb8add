use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use geotagger::config::Settings;
use geotagger::core::bulk::BatchGeotagger;
use geotagger::core::link::extract_from_link;
use geotagger::core::metadata::GeotagEngine;
use geotagger::core::scan::scan_folder;
use geotagger::models::{Coordinate, OperationResult, OperationStatus, OperationSummary};

#[derive(Parser)]
#[command(name = "geotagger", version, about = "Read, write and scan GPS tags in JPEG photos")]
struct Args {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the GPS position stored in a photo
    Read { path: PathBuf },

    /// Write one position into every listed photo
    Tag {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Extract a position from a map link
    Link { url: String },

    /// Extract a position from a map link and write it into every listed photo
    LinkTag {
        url: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List photos in a folder that carry no GPS position
    Scan { dir: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::load_or_default(args.config.as_deref())
        .context("Failed to load settings")?;

    match args.command {
        Command::Read { path } => read(&path, &settings, args.json),
        Command::Tag { lat, lon, paths } => tag(Coordinate::new(lat, lon), &paths, args.json),
        Command::Link { url } => link(&url, &settings, args.json).map(|_| ()),
        Command::LinkTag { url, paths } => {
            let Some(coordinate) = link(&url, &settings, args.json)? else {
                bail!("No valid latitude/longitude found in the link");
            };
            tag(coordinate, &paths, args.json)
        }
        Command::Scan { dir } => scan(&dir, &settings, args.json),
    }
}

fn read(path: &Path, settings: &Settings, json: bool) -> Result<()> {
    let coordinate = GeotagEngine::read_coordinates(path);

    if json {
        println!("{}", serde_json::to_string_pretty(&coordinate)?);
    } else {
        print_coordinate(coordinate, settings.photo_precision);
    }
    Ok(())
}

fn link(url: &str, settings: &Settings, json: bool) -> Result<Option<Coordinate>> {
    let coordinate = extract_from_link(url);

    if json {
        println!("{}", serde_json::to_string_pretty(&coordinate)?);
    } else {
        print_coordinate(coordinate, settings.link_precision);
    }
    Ok(coordinate)
}

fn tag(coordinate: Coordinate, paths: &[PathBuf], json: bool) -> Result<()> {
    if !coordinate.is_in_range() {
        bail!("coordinate out of range: {coordinate}");
    }

    let (tx, rx) = mpsc::channel();
    let results = BatchGeotagger::process(paths, coordinate, tx);
    for event in rx.try_iter() {
        info!(
            "[{}/{}] {} {}",
            event.current,
            event.total,
            event.filename,
            if event.success { "ok" } else { "not tagged" }
        );
    }

    let summary = OperationSummary::from_results(paths.len(), &results);

    if json {
        let report = serde_json::json!({ "results": results, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_failures(&results);
        println!(
            "Geotagging completed: {} tagged, {} failed, {} skipped.",
            summary.succeeded, summary.failed, summary.skipped
        );
    }

    if summary.failed > 0 {
        bail!("{} of {} photos could not be geotagged", summary.failed, summary.total);
    }
    Ok(())
}

fn scan(dir: &Path, settings: &Settings, json: bool) -> Result<()> {
    let report = scan_folder(dir, &settings.extensions)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for path in &report.missing_gps {
        let name = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        println!("{name}");
    }
    println!("File Count: {}", report.count());
    Ok(())
}

fn print_coordinate(coordinate: Option<Coordinate>, precision: usize) {
    match coordinate {
        Some(coordinate) => {
            println!("Latitude: {:.precision$}", coordinate.latitude);
            println!("Longitude: {:.precision$}", coordinate.longitude);
        }
        None => {
            println!("Latitude: NA");
            println!("Longitude: NA");
        }
    }
}

fn print_failures(results: &[OperationResult]) {
    for result in results
        .iter()
        .filter(|result| result.status != OperationStatus::Succeeded)
    {
        println!(
            "{}: {} ({})",
            result.status.label(),
            result.path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
}
