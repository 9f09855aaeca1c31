use plant_counter::config::descriptors as descriptor_config;
use plant_counter::descriptors::{self, table};
use plant_counter::image::io::load_mask;
use plant_counter::rows::detect_rows_with;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = descriptor_config::load_config(Path::new(&config_path))?;

    let mask = load_mask(&config.mask)
        .map_err(|e| format!("Failed to load mask {}: {e}", config.mask.display()))?;
    let out = &config.output.table_csv;

    match &config.points {
        Some(points_path) => {
            // Training tables cover every blob, not only those kept by a row.
            let points = table::load_points(points_path).map_err(|e| e.to_string())?;
            let samples = descriptors::training_samples(&mask, config.scale, &points)
                .map_err(|e| e.to_string())?;
            table::save_labeled(out, &samples).map_err(|e| e.to_string())?;
            println!(
                "Labeled {} blobs with {} points; saved to {}",
                samples.len(),
                points.len(),
                out.display()
            );
        }
        None => {
            let detection = detect_rows_with(&mask, config.scale, &config.rows);
            let vectors = descriptors::compute(&detection.blobs, config.scale)
                .map_err(|e| e.to_string())?;
            table::save_descriptors(out, &vectors).map_err(|e| e.to_string())?;
            println!(
                "Detected {} rows; saved {} descriptor rows to {}",
                detection.row_count,
                vectors.len(),
                out.display()
            );
        }
    }
    Ok(())
}

fn usage() -> String {
    "Usage: extract_descriptors <config.json>".to_string()
}
