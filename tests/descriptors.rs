mod common;

use common::synthetic_mask::{disc_grid, three_by_three};
use plant_counter::contour::extract_blobs;
use plant_counter::descriptors::{self, table};
use plant_counter::image::BinaryMask;
use plant_counter::rows::detect_rows;
use std::f64::consts::PI;

#[test]
fn disc_descriptors_match_circle_geometry() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (r, scale) = (20.0, 10.0);
    let mask = disc_grid(80, 80, &[40], &[40], r as i64);
    let blobs = extract_blobs(&mask);
    assert_eq!(blobs.len(), 1);
    let v = descriptors::compute(&blobs, scale).unwrap()[0];

    let expected_area = PI * r * r / (scale * scale);
    assert!(
        (v.area_m() - expected_area).abs() / expected_area < 0.08,
        "area_m={} expected≈{expected_area}",
        v.area_m()
    );
    assert_eq!(v.aspect_ratio(), 1.0);
    assert!(v.solidity() > 0.95 && v.solidity() <= 1.0, "solidity={}", v.solidity());
    assert!(v.eccentricity() < 0.05, "eccentricity={}", v.eccentricity());
    // Pixel-centre contours sit inside the ideal circle.
    assert!(v.extent() > 0.65 && v.extent() < PI / 4.0, "extent={}", v.extent());
    // No closed curve beats the circle's 4π.
    let c = v.compactness();
    assert!(c >= 4.0 * PI && c < 1.25 * 4.0 * PI, "compactness={c}");
}

#[test]
fn descriptor_bounds_hold_for_mixed_shapes() {
    let mut mask = disc_grid(160, 60, &[20, 60], &[30], 9);
    mask.fill_rect(90, 20, 130, 28);
    // L-shaped blob
    mask.fill_rect(136, 10, 142, 50);
    mask.fill_rect(136, 44, 156, 50);
    let blobs = extract_blobs(&mask);
    assert_eq!(blobs.len(), 4);

    for v in descriptors::compute(&blobs, 25.0).unwrap() {
        assert!(v.extent() > 0.0 && v.extent() <= 1.0, "extent={}", v.extent());
        assert!(v.solidity() > 0.0 && v.solidity() <= 1.0 + 1e-12, "solidity={}", v.solidity());
        assert!(v.convexity() <= 1.0 + 1e-9, "convexity={}", v.convexity());
        assert!((0.0..=1.0).contains(&v.eccentricity()), "eccentricity={}", v.eccentricity());
        assert!(v.area_m() <= v.bbox_area_m());
    }
}

#[test]
fn labeled_samples_count_points_per_blob() {
    let det = detect_rows(&three_by_three(), 10.0);
    let mut points: Vec<[f64; 2]> = [10.0, 50.0, 90.0]
        .iter()
        .flat_map(|&x| [20.0, 60.0, 100.0].map(|y| [x, y]))
        .collect();
    points.push([51.0, 61.0]);
    points.push([30.0, 40.0]);

    let samples = descriptors::compute_labeled(&det.blobs, 10.0, &points).unwrap();
    assert_eq!(samples.len(), 9);
    let total: u32 = samples.iter().map(|s| s.plant_count).sum();
    assert_eq!(total, 10);
    assert_eq!(samples.iter().filter(|s| s.plant_count == 2).count(), 1);

    let unlabeled = descriptors::compute_labeled(&det.blobs, 10.0, &[[0.0, 0.0]]).unwrap();
    assert!(unlabeled.is_empty(), "blobs without points are left out");
}

#[test]
fn labeled_tables_concatenate() {
    let det = detect_rows(&three_by_three(), 10.0);
    let points: Vec<[f64; 2]> = det
        .blobs
        .iter()
        .map(|b| [b.centroid()[0] as f64, b.centroid()[1] as f64])
        .collect();
    let samples = descriptors::compute_labeled(&det.blobs, 10.0, &points).unwrap();

    let dir = std::env::temp_dir().join(format!("plant_counter_tables_{}", std::process::id()));
    let a = dir.join("a.csv");
    let b = dir.join("b.csv");
    table::save_labeled(&a, &samples).unwrap();
    table::save_labeled(&b, &samples[..4]).unwrap();

    let loaded = table::load_labeled(&[&a, &b]).unwrap();
    assert_eq!(loaded.len(), samples.len() + 4);
    assert_eq!(&loaded[..samples.len()], &samples[..]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn training_samples_ignore_row_filtering() {
    let mut mask = BinaryMask::new(120, 60);
    // Bar row with a small blob beneath it inside the bar's horizontal span.
    mask.fill_rect(10, 10, 110, 30);
    mask.fill_disc(60, 36, 3);
    // Blob on the left image border.
    mask.fill_rect(0, 45, 8, 55);
    let points = [[50.0, 20.0], [70.0, 20.0], [60.0, 36.0], [3.0, 50.0]];

    let det = detect_rows(&mask, 10.0);
    assert_eq!(det.blobs.len(), 1, "row filtering keeps only the bar");
    let from_rows = descriptors::compute_labeled(&det.blobs, 10.0, &points).unwrap();
    assert_eq!(from_rows.len(), 1);

    let samples = descriptors::training_samples(&mask, 10.0, &points).unwrap();
    assert_eq!(samples.len(), 3);
    let mut counts: Vec<u32> = samples.iter().map(|s| s.plant_count).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 1, 2]);

    assert!(descriptors::training_samples(&mask, 0.0, &points).is_err());
}
