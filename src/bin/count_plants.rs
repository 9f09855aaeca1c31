use plant_counter::config::count;
use plant_counter::counting::{count_with, CountResult};
use plant_counter::image::io::{load_mask, write_json_file};
use plant_counter::model::CountingModel;
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
    let config = count::load_config(Path::new(&config_path))?;

    let mask = load_mask(&config.mask)
        .map_err(|e| format!("Failed to load mask {}: {e}", config.mask.display()))?;
    let model = CountingModel::load(&config.model)
        .map_err(|e| format!("Failed to load model {}: {e}", config.model.display()))?;

    let result: CountResult =
        count_with(&mask, &model, config.scale, &config.rows).map_err(|e| e.to_string())?;
    write_json_file(&config.output.report_json, &result).map_err(|e| e.to_string())?;

    println!(
        "Counted {} plants in {} rows ({} labeled blobs, {:.3} ms)",
        result.total,
        result.row_count,
        result.labeled_blobs.len(),
        result.latency_ms
    );
    println!("Saved report to {}", config.output.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: count_plants <config.json>".to_string()
}
