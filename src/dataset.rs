//! MNIST dataset manager: raw labeled pixel records, normalized on demand.
use crate::error::{Error, Result};
use csv::StringRecord;
use ndarray::Array1;
use std::io::Read;

/// Pixels per record (28x28 grey-scale image).
pub const PIXELS: usize = 28 * 28;

/// Digit classes 0 through 9.
pub const CLASSES: usize = 10;

/// Initial subset size selected after a load, capped by the record count.
pub const USED_DATA_SETS_DEFAULT: usize = 5000;

/// One raw labeled sample, immutable once loaded.
#[derive(Debug, Clone)]
struct RawRecord {
    label: u8,
    pixels: Vec<u8>,
}

/// Ordered collection of raw MNIST records with on-demand vectorization.
///
/// Records come from CSV lines `label,p1,...,p784` with the label in 0-9 and
/// intensities in 0-255. Normalized input/target vectors are derived per
/// access and never stored.
#[derive(Debug, Clone, Default)]
pub struct MnistData {
    records: Vec<RawRecord>,
    used_data_sets: usize,
    epochs: usize,
}

impl MnistData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read records from a CSV source, replacing any prior contents.
    ///
    /// All-or-nothing: the first structurally invalid line aborts the load
    /// with [`Error::DataFormat`] and leaves the collection empty. On
    /// success the used subset size is `min(5000, count)` and the epoch
    /// count is 1.
    pub fn load<R: Read>(&mut self, source: R) -> Result<()> {
        self.clear();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let line = index + 1;
            let row = row.map_err(|e| Error::DataFormat {
                line,
                reason: e.to_string(),
            })?;
            records.push(parse_record(line, &row)?);
        }

        log::debug!("loaded {} MNIST records", records.len());
        self.used_data_sets = records.len().min(USED_DATA_SETS_DEFAULT);
        self.epochs = 1;
        self.records = records;
        Ok(())
    }

    /// Empty the collection; subset size and epoch count drop to 0.
    pub fn clear(&mut self) {
        self.records.clear();
        self.used_data_sets = 0;
        self.epochs = 0;
    }

    /// Total loaded record count.
    pub fn count_data(&self) -> usize {
        self.records.len()
    }

    /// Number of records the driver intends to use for the next run.
    pub fn used_data_sets(&self) -> usize {
        self.used_data_sets
    }

    /// Set the subset size, clamped to `[0, count_data]`.
    pub fn set_used_data_sets(&mut self, value: isize) {
        self.used_data_sets = value.clamp(0, self.records.len() as isize) as usize;
    }

    /// Number of passes the driver intends to run.
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Set the epoch count; negative values clamp to 0.
    pub fn set_epochs(&mut self, value: isize) {
        self.epochs = value.max(0) as usize;
    }

    fn get(&self, index: usize) -> Result<&RawRecord> {
        self.records.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.records.len(),
        })
    }

    /// Stored digit label (0-9) of record `index`.
    pub fn number(&self, index: usize) -> Result<u8> {
        Ok(self.get(index)?.label)
    }

    /// Normalized input vector of record `index`: each intensity rescaled to
    /// `0.01 + raw / 255 * 0.99`, so every entry lies in `[0.01, 1.0]`.
    pub fn input(&self, index: usize) -> Result<Array1<f64>> {
        let record = self.get(index)?;
        Ok(record
            .pixels
            .iter()
            .map(|&p| 0.01 + f64::from(p) / 255.0 * 0.99)
            .collect())
    }

    /// Target vector of record `index`: 10 entries of 0.01 with a single
    /// 0.99 at the label's position. Near values instead of exact 0/1 avoid
    /// saturating the sigmoid during training.
    pub fn output(&self, index: usize) -> Result<Array1<f64>> {
        let record = self.get(index)?;
        let mut output = Array1::from_elem(CLASSES, 0.01);
        output[usize::from(record.label)] = 0.99;
        Ok(output)
    }
}

fn parse_record(line: usize, row: &StringRecord) -> Result<RawRecord> {
    if row.len() != PIXELS + 1 {
        return Err(Error::DataFormat {
            line,
            reason: format!("expected {} fields, got {}", PIXELS + 1, row.len()),
        });
    }

    let label: u8 = row[0].trim().parse().map_err(|_| Error::DataFormat {
        line,
        reason: format!("label {:?} is not an integer", &row[0]),
    })?;
    if label > 9 {
        return Err(Error::DataFormat {
            line,
            reason: format!("label {label} outside 0-9"),
        });
    }

    let mut pixels = Vec::with_capacity(PIXELS);
    for field in row.iter().skip(1) {
        // u8 parsing enforces the 0-255 intensity range.
        let value: u8 = field.trim().parse().map_err(|_| Error::DataFormat {
            line,
            reason: format!("intensity {field:?} is not an integer in 0-255"),
        })?;
        pixels.push(value);
    }

    Ok(RawRecord { label, pixels })
}
