//! CSV descriptor tables.
//!
//! Tables start with a header row naming the [`FEATURE_COLUMNS`]; labeled
//! tables append [`TARGET_COLUMN`]. Training reads several tables and
//! concatenates their rows, each file bringing its own header.
//!
//! Annotation points are stored as headerless `x,y` rows.

use super::vector::{
    DescriptorVector, LabeledSample, DESCRIPTOR_LEN, FEATURE_COLUMNS, TARGET_COLUMN,
};
use crate::error::{Error, Result};
use crate::image::io::ensure_parent_dir;
use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub fn write_descriptors<W: Write>(writer: W, rows: &[DescriptorVector]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(FEATURE_COLUMNS)?;
    for row in rows {
        wtr.write_record(row.as_slice().iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_labeled<W: Write>(writer: W, samples: &[LabeledSample]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(FEATURE_COLUMNS.iter().chain(std::iter::once(&TARGET_COLUMN)))?;
    for s in samples {
        let record: Vec<String> = s
            .descriptors
            .as_slice()
            .iter()
            .map(|v| v.to_string())
            .chain(std::iter::once(s.plant_count.to_string()))
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_descriptors(path: &Path, rows: &[DescriptorVector]) -> Result<()> {
    ensure_parent_dir(path)?;
    write_descriptors(File::create(path)?, rows)
}

pub fn save_labeled(path: &Path, samples: &[LabeledSample]) -> Result<()> {
    ensure_parent_dir(path)?;
    write_labeled(File::create(path)?, samples)
}

/// Read an unlabeled table. A trailing target column, if present, is ignored.
pub fn read_descriptors<R: Read>(reader: R, source: &str) -> Result<Vec<DescriptorVector>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let labeled = check_header(rdr.headers()?, source)?;
    let width = DESCRIPTOR_LEN + usize::from(labeled);
    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let values = parse_record(&record?, width, source, line)?;
        rows.push(DescriptorVector::try_from(&values[..DESCRIPTOR_LEN])?);
    }
    Ok(rows)
}

pub fn read_labeled<R: Read>(reader: R, source: &str) -> Result<Vec<LabeledSample>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    if !check_header(rdr.headers()?, source)? {
        return Err(table_error(source, format!("missing {TARGET_COLUMN} column")));
    }
    let mut samples = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let values = parse_record(&record?, DESCRIPTOR_LEN + 1, source, line)?;
        let count = values[DESCRIPTOR_LEN];
        if !(count >= 0.0 && count.fract() == 0.0 && count <= u32::MAX as f64) {
            return Err(table_error(
                source,
                format!("row {}: plant count {count} is not a non-negative integer", line + 1),
            ));
        }
        samples.push(LabeledSample {
            descriptors: DescriptorVector::try_from(&values[..DESCRIPTOR_LEN])?,
            plant_count: count as u32,
        });
    }
    Ok(samples)
}

pub fn load_descriptors(path: &Path) -> Result<Vec<DescriptorVector>> {
    read_descriptors(File::open(path)?, &path.display().to_string())
}

/// Concatenate the rows of several labeled tables.
pub fn load_labeled<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LabeledSample>> {
    let mut all = Vec::new();
    for path in paths {
        let path = path.as_ref();
        all.extend(read_labeled(File::open(path)?, &path.display().to_string())?);
    }
    Ok(all)
}

/// Read headerless `x,y` annotation points.
pub fn read_points<R: Read>(reader: R, source: &str) -> Result<Vec<[f64; 2]>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut points = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let values = parse_record(&record?, 2, source, line)?;
        points.push([values[0], values[1]]);
    }
    Ok(points)
}

pub fn load_points(path: &Path) -> Result<Vec<[f64; 2]>> {
    read_points(File::open(path)?, &path.display().to_string())
}

/// Validate the header; returns whether the target column is present.
fn check_header(header: &StringRecord, source: &str) -> Result<bool> {
    let names: Vec<&str> = header.iter().map(str::trim).collect();
    let labeled = match names.len() {
        n if n == DESCRIPTOR_LEN => false,
        n if n == DESCRIPTOR_LEN + 1 => true,
        n => {
            return Err(table_error(
                source,
                format!("expected {DESCRIPTOR_LEN} or {} columns, found {n}", DESCRIPTOR_LEN + 1),
            ))
        }
    };
    for (found, expected) in names.iter().zip(FEATURE_COLUMNS) {
        if *found != expected {
            return Err(table_error(
                source,
                format!("unexpected column {found:?}, expected {expected:?}"),
            ));
        }
    }
    if labeled && names[DESCRIPTOR_LEN] != TARGET_COLUMN {
        return Err(table_error(
            source,
            format!(
                "unexpected column {:?}, expected {TARGET_COLUMN:?}",
                names[DESCRIPTOR_LEN]
            ),
        ));
    }
    Ok(labeled)
}

fn parse_record(record: &StringRecord, width: usize, source: &str, line: usize) -> Result<Vec<f64>> {
    if record.len() != width {
        return Err(table_error(
            source,
            format!("row {}: expected {width} fields, found {}", line + 1, record.len()),
        ));
    }
    record
        .iter()
        .map(|field| {
            field.trim().parse::<f64>().map_err(|e| {
                table_error(source, format!("row {}: invalid number {field:?}: {e}", line + 1))
            })
        })
        .collect()
}

fn table_error(source: &str, reason: String) -> Error {
    Error::Table {
        path: source.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: f64, count: u32) -> LabeledSample {
        let mut v = [0.0; DESCRIPTOR_LEN];
        for (i, x) in v.iter_mut().enumerate() {
            *x = seed + i as f64 * 0.125;
        }
        LabeledSample {
            descriptors: DescriptorVector(v),
            plant_count: count,
        }
    }

    #[test]
    fn labeled_table_reads_back() {
        let samples = vec![sample(0.1, 1), sample(2.7, 3)];
        let mut buf = Vec::new();
        write_labeled(&mut buf, &samples).expect("write");
        let text = String::from_utf8(buf.clone()).expect("utf8");
        assert!(text.starts_with("AREA_M,AREA_BB_M,PERIMETRO_M"));
        assert!(text.lines().next().unwrap_or("").ends_with(",CANTIDAD_PLANTAS"));
        let back = read_labeled(buf.as_slice(), "mem").expect("read");
        assert_eq!(back, samples);
    }

    #[test]
    fn unlabeled_reader_accepts_labeled_tables() {
        let samples = vec![sample(1.0, 2)];
        let mut buf = Vec::new();
        write_labeled(&mut buf, &samples).expect("write");
        let rows = read_descriptors(buf.as_slice(), "mem").expect("read");
        assert_eq!(rows, vec![samples[0].descriptors]);
    }

    #[test]
    fn labeled_reader_rejects_unlabeled_tables() {
        let mut buf = Vec::new();
        write_descriptors(&mut buf, &[sample(1.0, 2).descriptors]).expect("write");
        let err = read_labeled(buf.as_slice(), "mem").unwrap_err();
        assert!(matches!(err, Error::Table { .. }), "got {err:?}");
    }

    #[test]
    fn wrong_header_is_reported() {
        let csv = "A,B,C,D,E,F,G,H,I,J\n1,2,3,4,5,6,7,8,9,10\n";
        let err = read_descriptors(csv.as_bytes(), "bad.csv").unwrap_err();
        match err {
            Error::Table { path, reason } => {
                assert_eq!(path, "bad.csv");
                assert!(reason.contains("AREA_M"), "reason={reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fractional_count_is_rejected() {
        let header = FEATURE_COLUMNS.join(",") + ",CANTIDAD_PLANTAS";
        let csv = format!("{header}\n1,2,3,4,5,6,7,8,9,10,1.5\n");
        assert!(read_labeled(csv.as_bytes(), "mem").is_err());
    }

    #[test]
    fn points_are_headerless_pairs() {
        let pts = read_points("10,20\n 3 , 4\n".as_bytes(), "pts").expect("points");
        assert_eq!(pts, vec![[10.0, 20.0], [3.0, 4.0]]);
        assert!(read_points("1,2,3\n".as_bytes(), "pts").is_err());
    }
}
