use plant_counter::config::train;
use plant_counter::descriptors::table::load_labeled;
use plant_counter::model;
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
    let config = train::load_config(Path::new(&config_path))?;
    if config.tables.is_empty() {
        return Err("Config lists no descriptor tables".to_string());
    }

    let samples = load_labeled(&config.tables).map_err(|e| e.to_string())?;
    let (fitted, quality) = model::fit(&samples).map_err(|e| e.to_string())?;
    fitted
        .save(&config.output.model_json)
        .map_err(|e| e.to_string())?;

    println!(
        "Fitted {} samples from {} tables, R² = {:.4}",
        quality.samples,
        config.tables.len(),
        quality.r_squared
    );
    println!("Saved model to {}", config.output.model_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: train_model <config.json>".to_string()
}
