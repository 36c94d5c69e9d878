use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use passmark::{annotations, calibrate, Landmarks};

#[derive(Parser)]
#[command(name = "passmark")]
#[command(
    version,
    about = "Validation harness for passport photo landmark detection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an annotation export and summarize it
    Import {
        /// Path to the VIA-format CSV export
        annotations: PathBuf,
        /// Dump the parsed map as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Compute crown/chin calibration coefficients from ground truth
    Calibrate {
        /// Path to the VIA-format CSV export
        annotations: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Import { annotations, json } => import(&annotations, json),
        Commands::Calibrate { annotations } => calibrate_coefficients(&annotations),
    }
}

fn import(path: &Path, json: bool) -> Result<()> {
    let map = annotations::import_landmarks(path)?;

    if json {
        let dump: BTreeMap<String, &Landmarks> = map
            .iter()
            .map(|(path, lm)| (path.display().to_string(), lm))
            .collect();
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    info!("parsed annotations for {} image(s)", map.len());
    for (image_path, lm) in &map {
        println!(
            "{}: crown=({}, {}) chin=({}, {}) pupils=({}, {})/({}, {})",
            image_path.display(),
            lm.crown.x,
            lm.crown.y,
            lm.chin.x,
            lm.chin.y,
            lm.eye_left_pupil.x,
            lm.eye_left_pupil.y,
            lm.eye_right_pupil.x,
            lm.eye_right_pupil.y,
        );
    }
    Ok(())
}

fn calibrate_coefficients(path: &Path) -> Result<()> {
    let map = annotations::import_landmarks(path)?;
    let records: Vec<Landmarks> = map.into_values().collect();
    info!("calibrating over {} annotated image(s)", records.len());

    let (crown_chin, frown_chin) = calibrate::crown_chin_coefficients(&records)?;
    println!("Chin-crown normalization: {crown_chin}");
    println!("Chin-frown normalization: {frown_chin}");
    Ok(())
}
