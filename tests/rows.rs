mod common;

use common::synthetic_mask::{disc_grid, three_by_three};
use plant_counter::image::BinaryMask;
use plant_counter::rows::{detect_rows, detect_rows_with, RowDetectorParams};
use std::collections::HashSet;

#[test]
fn three_rows_of_three_discs() {
    let _ = env_logger::builder().is_test(true).try_init();
    let det = detect_rows(&three_by_three(), 10.0);

    assert_eq!(det.row_count, 3, "rows={:?}", det.rows);
    assert_eq!(det.blobs.len(), 9);
    assert_eq!(det.lines.len(), 6);
    for (row, expected_y) in det.rows.iter().zip([20, 60, 100]) {
        assert_eq!(row.len(), 3, "row at y={expected_y}");
        let xs: Vec<i32> = row.centroids.iter().map(|c| c[0]).collect();
        assert_eq!(xs, vec![10, 50, 90]);
        assert!(row.centroids.iter().all(|c| c[1] == expected_y));
        assert!((row.seed.center - expected_y as f64).abs() < 1e-9);
    }
    let first = det.lines[0];
    assert_eq!((first.x1, first.y1, first.x2, first.y2), (10, 20, 50, 20));
}

#[test]
fn detection_is_deterministic() {
    let mask = three_by_three();
    let a = detect_rows(&mask, 10.0);
    let b = detect_rows(&mask, 10.0);
    assert_eq!(a.row_count, b.row_count);
    assert_eq!(a.lines, b.lines);
    let ids_a: Vec<_> = a.blobs.iter().map(|blob| blob.id).collect();
    let ids_b: Vec<_> = b.blobs.iter().map(|blob| blob.id).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn blank_mask_has_no_rows() {
    let det = detect_rows(&BinaryMask::new(80, 80), 10.0);
    assert_eq!(det.row_count, 0);
    assert!(det.blobs.is_empty());
    assert!(det.lines.is_empty());
}

#[test]
fn weak_rows_fall_below_prominence() {
    // One dense row and one row of a single tiny blob.
    let mut mask = disc_grid(120, 80, &[15, 45, 75, 105], &[20], 8);
    mask.fill_disc(60, 60, 0);
    let det = detect_rows_with(&mask, 10.0, &RowDetectorParams::default());
    assert_eq!(det.row_count, 1);
    assert_eq!(det.blobs.len(), 4);
}

#[test]
fn blob_inside_a_wider_span_is_dropped() {
    // A long bar and a small disc beneath it share the same horizontal span.
    let mut mask = BinaryMask::new(120, 60);
    mask.fill_rect(10, 10, 110, 30);
    mask.fill_disc(60, 36, 3);
    let det = detect_rows(&mask, 10.0);
    assert_eq!(det.row_count, 1);
    assert_eq!(det.blobs.len(), 1, "only the bar survives");
    assert_eq!(det.blobs[0].bbox().w, 100);
}

#[test]
fn blob_shared_by_two_rows_is_reported_once() {
    // Two rows six pixels apart; the small disc at y = 28 lies in both bands
    // and is the leftmost blob of each row.
    let xs_a = [10, 20, 30, 40, 50, 60];
    let xs_b = [15, 25, 35, 45, 55, 65];
    let mut mask = disc_grid(80, 50, &xs_a, &[25], 3);
    for &x in &xs_b {
        mask.fill_disc(x, 31, 3);
    }
    mask.fill_disc(2, 28, 1);

    let det = detect_rows(&mask, 10.0);
    assert_eq!(det.row_count, 2, "seeds={:?}", det.rows.iter().map(|r| r.seed).collect::<Vec<_>>());
    let (a, b) = (&det.rows[0], &det.rows[1]);
    assert_eq!(a.len(), 7);
    assert_eq!(b.len(), 7);
    let shared: Vec<_> = a.blob_ids.iter().filter(|id| b.blob_ids.contains(id)).collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(a.centroids[0], [2, 28]);
    assert_eq!(b.centroids[0], [2, 28]);

    assert_eq!(det.blobs.len(), 13);
    let unique: HashSet<_> = det.blobs.iter().map(|blob| blob.id).collect();
    assert_eq!(unique.len(), det.blobs.len(), "retained blobs must not repeat");
    assert_eq!(det.lines.len(), 12);
}
