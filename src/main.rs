use plant_counter::descriptors;
use plant_counter::image::BinaryMask;
use plant_counter::rows::detect_rows;

fn main() {
    env_logger::init();
    // Demo: three rows of five round plants on a 200x150 mask, 10 px/m.
    let scale = 10.0;
    let mut mask = BinaryMask::new(200, 150);
    for cy in [25, 75, 125] {
        for cx in (20..200).step_by(40) {
            mask.fill_disc(cx, cy, 8);
        }
    }

    let det = detect_rows(&mask, scale);
    println!(
        "rows={} blobs={} lines={}",
        det.row_count,
        det.blobs.len(),
        det.lines.len()
    );
    match descriptors::compute(&det.blobs, scale) {
        Ok(vectors) => {
            let area: f64 = vectors.iter().map(|v| v.area_m()).sum();
            println!("total plant area={area:.3} m²");
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}
