//! Heat-pump performance tables on a fixed deci-degree temperature grid.
//!
//! Sparse characterization runs (a handful of `(temperature, value)` points)
//! are resampled onto a dense `0.1 °C` grid so that per-step lookups during a
//! simulation never re-run the characterization. Interior gaps are filled by
//! linear interpolation between the nearest known neighbors; grid points
//! outside the known sample range stay empty and are reported as "no data"
//! rather than extrapolated.

use std::fmt;
use std::io::{self, Read};

/// Fixed-step temperature grid with `0.1 °C` resolution.
///
/// Bounds are inclusive and stored in deci-degrees Celsius, so the grid
/// `[-100, 310]` covers `-10.0 °C` to `31.0 °C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureGrid {
    min_dc: i32,
    max_dc: i32,
}

impl TemperatureGrid {
    /// Creates a grid spanning `[min_dc, max_dc]` deci-degrees, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `min_dc > max_dc`.
    pub fn new(min_dc: i32, max_dc: i32) -> Self {
        assert!(min_dc <= max_dc, "grid bounds must satisfy min <= max");
        Self { min_dc, max_dc }
    }

    /// Default grid for COP tables: `-10.0 °C` to `31.0 °C`.
    pub fn cop_default() -> Self {
        Self::new(-100, 310)
    }

    /// Default grid for offset-converter coefficient tables:
    /// `-10.0 °C` to `20.9 °C`.
    pub fn coefficient_default() -> Self {
        Self::new(-100, 209)
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        (self.max_dc - self.min_dc) as usize + 1
    }

    /// Always `false`; a grid holds at least one point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lower bound in °C.
    pub fn min_c(&self) -> f64 {
        self.min_dc as f64 / 10.0
    }

    /// Upper bound in °C.
    pub fn max_c(&self) -> f64 {
        self.max_dc as f64 / 10.0
    }

    /// Snaps a temperature in °C to the nearest deci-degree key.
    pub fn quantize_c(temp_c: f64) -> i32 {
        (temp_c * 10.0).round() as i32
    }

    /// Returns the slot index for a deci-degree key, or `None` when the key
    /// lies outside the grid bounds.
    pub fn index_of(&self, dc: i32) -> Option<usize> {
        if dc < self.min_dc || dc > self.max_dc {
            None
        } else {
            Some((dc - self.min_dc) as usize)
        }
    }

    /// Temperature in °C at a slot index.
    pub fn temp_c_at(&self, index: usize) -> f64 {
        (self.min_dc + index as i32) as f64 / 10.0
    }
}

/// Resamples sparse `(temperature °C, value)` samples onto `grid`.
///
/// Sample temperatures are quantized to the nearest deci-degree; a sample
/// landing on a grid point keeps its value exactly (later samples win on a
/// quantization collision, samples outside the grid bounds are dropped).
/// Slots strictly between two known samples are filled by linear
/// interpolation; slots outside the known range stay `None`.
pub fn resample(grid: &TemperatureGrid, samples: &[(f64, f64)]) -> Vec<Option<f64>> {
    let mut values: Vec<Option<f64>> = vec![None; grid.len()];

    for &(temp_c, value) in samples {
        if let Some(i) = grid.index_of(TemperatureGrid::quantize_c(temp_c)) {
            values[i] = Some(value);
        }
    }

    fill_gaps(&mut values);
    values
}

/// Linear interpolation over interior `None` runs; known slots are untouched.
fn fill_gaps(values: &mut [Option<f64>]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();

    for pair in known.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let v0 = values[lo].unwrap_or(0.0);
        let v1 = values[hi].unwrap_or(0.0);
        let span = (hi - lo) as f64;
        for g in (lo + 1)..hi {
            let frac = (g - lo) as f64 / span;
            values[g] = Some(v0 + (v1 - v0) * frac);
        }
    }
}

/// Error raised while loading a performance table from CSV.
#[derive(Debug)]
pub enum TableError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// CSV structure could not be parsed.
    Csv(csv::Error),
    /// A required column is missing from the header row.
    MissingColumn(&'static str),
    /// A field failed to parse as a number.
    BadNumber { row: usize, field: String },
    /// The file contained a header but no data rows.
    Empty,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "table error: {e}"),
            TableError::Csv(e) => write!(f, "table error: {e}"),
            TableError::MissingColumn(name) => {
                write!(f, "table error: missing column \"{name}\"")
            }
            TableError::BadNumber { row, field } => {
                write!(f, "table error: row {row}: \"{field}\" is not a number")
            }
            TableError::Empty => write!(f, "table error: no data rows"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        TableError::Csv(e)
    }
}

/// Finds the index of `name` in the header row. The first column holds the
/// temperature index and is never matched by name.
fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(TableError::MissingColumn(name))
}

fn parse_field(record: &csv::StringRecord, col: usize, row: usize) -> Result<f64, TableError> {
    let raw = record.get(col).unwrap_or("");
    raw.trim().parse().map_err(|_| TableError::BadNumber {
        row,
        field: raw.to_string(),
    })
}

/// Dense COP-over-temperature lookup table.
#[derive(Debug, Clone)]
pub struct CopTable {
    grid: TemperatureGrid,
    cop: Vec<Option<f64>>,
}

impl CopTable {
    /// Resamples sparse `(temperature °C, COP)` samples onto the default
    /// COP grid.
    pub fn from_samples(samples: &[(f64, f64)]) -> Self {
        Self::from_samples_on(TemperatureGrid::cop_default(), samples)
    }

    /// Resamples sparse samples onto an explicit grid.
    pub fn from_samples_on(grid: TemperatureGrid, samples: &[(f64, f64)]) -> Self {
        let cop = resample(&grid, samples);
        Self { grid, cop }
    }

    /// Loads a table from CSV with a temperature index in the first column
    /// and a `COP` column.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` on I/O or parse failure, a missing `COP`
    /// column, or an empty file.
    pub fn from_csv(reader: impl Read) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
        let cop_col = column_index(rdr.headers()?, "COP")?;

        let mut samples = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let temp_c = parse_field(&record, 0, i + 1)?;
            let cop = parse_field(&record, cop_col, i + 1)?;
            samples.push((temp_c, cop));
        }
        if samples.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self::from_samples(&samples))
    }

    /// COP at an ambient temperature, or `None` outside the known range.
    pub fn cop_at(&self, temp_c: f64) -> Option<f64> {
        let i = self.grid.index_of(TemperatureGrid::quantize_c(temp_c))?;
        self.cop[i]
    }

    /// The table's grid.
    pub fn grid(&self) -> &TemperatureGrid {
        &self.grid
    }
}

/// Dense slope/offset lookup table for the offset-converter pump model.
///
/// Slope and offset are interpolated independently over the same grid.
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    grid: TemperatureGrid,
    slope: Vec<Option<f64>>,
    offset: Vec<Option<f64>>,
}

impl CoefficientTable {
    /// Resamples sparse `(temperature °C, slope, offset)` samples onto the
    /// default coefficient grid.
    pub fn from_samples(samples: &[(f64, f64, f64)]) -> Self {
        Self::from_samples_on(TemperatureGrid::coefficient_default(), samples)
    }

    /// Resamples sparse samples onto an explicit grid.
    pub fn from_samples_on(grid: TemperatureGrid, samples: &[(f64, f64, f64)]) -> Self {
        let slopes: Vec<(f64, f64)> = samples.iter().map(|&(t, s, _)| (t, s)).collect();
        let offsets: Vec<(f64, f64)> = samples.iter().map(|&(t, _, o)| (t, o)).collect();
        let slope = resample(&grid, &slopes);
        let offset = resample(&grid, &offsets);
        Self {
            grid,
            slope,
            offset,
        }
    }

    /// Loads a table from CSV with a temperature index in the first column
    /// and `slope` and `offset` columns.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` on I/O or parse failure, missing columns, or
    /// an empty file.
    pub fn from_csv(reader: impl Read) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
        let headers = rdr.headers()?;
        let slope_col = column_index(headers, "slope")?;
        let offset_col = column_index(headers, "offset")?;

        let mut samples = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let temp_c = parse_field(&record, 0, i + 1)?;
            let slope = parse_field(&record, slope_col, i + 1)?;
            let offset = parse_field(&record, offset_col, i + 1)?;
            samples.push((temp_c, slope, offset));
        }
        if samples.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self::from_samples(&samples))
    }

    /// `(slope, offset)` at an ambient temperature, or `None` when either
    /// column has no data there.
    pub fn coefficients_at(&self, temp_c: f64) -> Option<(f64, f64)> {
        let i = self.grid.index_of(TemperatureGrid::quantize_c(temp_c))?;
        match (self.slope[i], self.offset[i]) {
            (Some(s), Some(o)) => Some((s, o)),
            _ => None,
        }
    }

    /// The table's grid.
    pub fn grid(&self) -> &TemperatureGrid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_len_and_bounds() {
        let grid = TemperatureGrid::cop_default();
        assert_eq!(grid.len(), 411);
        assert_eq!(grid.min_c(), -10.0);
        assert_eq!(grid.max_c(), 31.0);
    }

    #[test]
    fn grid_index_round_trip() {
        let grid = TemperatureGrid::new(-100, 310);
        assert_eq!(grid.index_of(-100), Some(0));
        assert_eq!(grid.index_of(0), Some(100));
        assert_eq!(grid.index_of(310), Some(410));
        assert_eq!(grid.index_of(-101), None);
        assert_eq!(grid.index_of(311), None);
        assert_eq!(grid.temp_c_at(100), 0.0);
    }

    #[test]
    fn quantize_snaps_to_nearest_deci_degree() {
        assert_eq!(TemperatureGrid::quantize_c(-5.0), -50);
        assert_eq!(TemperatureGrid::quantize_c(0.04), 0);
        assert_eq!(TemperatureGrid::quantize_c(0.06), 1);
        assert_eq!(TemperatureGrid::quantize_c(-0.06), -1);
    }

    #[test]
    fn known_samples_retained_exactly() {
        let table = CopTable::from_samples(&[(-10.0, 2.0), (0.0, 4.0), (20.0, 4.7)]);
        assert_eq!(table.cop_at(-10.0), Some(2.0));
        assert_eq!(table.cop_at(0.0), Some(4.0));
        assert_eq!(table.cop_at(20.0), Some(4.7));
    }

    #[test]
    fn midpoint_interpolation_is_exact() {
        // samples at -10 °C -> 2.0 and 0 °C -> 4.0: COP(-5) must be exactly 3.0
        let table = CopTable::from_samples(&[(-10.0, 2.0), (0.0, 4.0)]);
        assert_eq!(table.cop_at(-5.0), Some(3.0));
    }

    #[test]
    fn interpolated_values_stay_between_neighbors() {
        let table = CopTable::from_samples(&[(-10.0, 2.0), (0.0, 4.0)]);
        let mut dc = -99;
        while dc < 0 {
            let t = dc as f64 / 10.0;
            let cop = table.cop_at(t);
            assert!(cop.is_some(), "interior point {t} should be filled");
            let cop = cop.unwrap_or(0.0);
            assert!((2.0..=4.0).contains(&cop), "COP({t}) = {cop} out of bounds");
            dc += 1;
        }
    }

    #[test]
    fn interpolation_is_monotonic_between_two_samples() {
        let table = CopTable::from_samples(&[(0.0, 4.0), (10.0, 2.0)]);
        let mut prev = f64::INFINITY;
        for dc in 0..=100 {
            let cop = table.cop_at(dc as f64 / 10.0).unwrap_or(f64::NAN);
            assert!(cop <= prev, "descending samples must interpolate descending");
            prev = cop;
        }
    }

    #[test]
    fn no_extrapolation_outside_known_range() {
        let table = CopTable::from_samples(&[(-5.0, 2.5), (10.0, 3.5)]);
        // below the first known sample
        assert_eq!(table.cop_at(-5.1), None);
        assert_eq!(table.cop_at(-10.0), None);
        // above the last known sample
        assert_eq!(table.cop_at(10.1), None);
        assert_eq!(table.cop_at(31.0), None);
        // outside the grid entirely
        assert_eq!(table.cop_at(-40.0), None);
        assert_eq!(table.cop_at(50.0), None);
    }

    #[test]
    fn samples_outside_grid_bounds_are_dropped() {
        let table = CopTable::from_samples(&[(-60.0, 1.0), (0.0, 4.0), (5.0, 4.2)]);
        // the -60 °C sample is off-grid, so nothing below 0 °C is known
        assert_eq!(table.cop_at(-1.0), None);
        assert_eq!(table.cop_at(0.0), Some(4.0));
    }

    #[test]
    fn single_sample_fills_only_its_own_slot() {
        let table = CopTable::from_samples(&[(7.0, 3.5)]);
        assert_eq!(table.cop_at(7.0), Some(3.5));
        assert_eq!(table.cop_at(6.9), None);
        assert_eq!(table.cop_at(7.1), None);
    }

    #[test]
    fn cop_table_from_csv() {
        let data = "\
,COP
-10.0,2.0
0.0,4.0
10.0,4.5
";
        let table = CopTable::from_csv(data.as_bytes());
        assert!(table.is_ok(), "csv should parse: {:?}", table.err());
        let table = table.unwrap_or_else(|_| CopTable::from_samples(&[]));
        assert_eq!(table.cop_at(-10.0), Some(2.0));
        assert_eq!(table.cop_at(-5.0), Some(3.0));
        assert_eq!(table.cop_at(10.0), Some(4.5));
        assert_eq!(table.cop_at(10.1), None);
    }

    #[test]
    fn cop_csv_missing_column_is_an_error() {
        let data = ",cop_value\n0.0,4.0\n";
        let err = CopTable::from_csv(data.as_bytes());
        assert!(matches!(err, Err(TableError::MissingColumn("COP"))));
    }

    #[test]
    fn cop_csv_bad_number_is_an_error() {
        let data = ",COP\n0.0,four\n";
        let err = CopTable::from_csv(data.as_bytes());
        assert!(matches!(err, Err(TableError::BadNumber { row: 1, .. })));
    }

    #[test]
    fn cop_csv_empty_is_an_error() {
        let data = ",COP\n";
        let err = CopTable::from_csv(data.as_bytes());
        assert!(matches!(err, Err(TableError::Empty)));
    }

    #[test]
    fn coefficient_columns_interpolate_independently() {
        let table =
            CoefficientTable::from_samples(&[(0.0, 2.0, -1.0), (10.0, 4.0, -3.0)]);
        assert_eq!(table.coefficients_at(0.0), Some((2.0, -1.0)));
        assert_eq!(table.coefficients_at(5.0), Some((3.0, -2.0)));
        assert_eq!(table.coefficients_at(10.0), Some((4.0, -3.0)));
        assert_eq!(table.coefficients_at(10.1), None);
    }

    #[test]
    fn coefficient_table_from_csv() {
        let data = "\
,slope,offset
-10.0,2.4,-0.6
0.0,3.0,-0.8
20.0,4.2,-1.2
";
        let table = CoefficientTable::from_csv(data.as_bytes());
        assert!(table.is_ok(), "csv should parse: {:?}", table.err());
        let table = table.unwrap_or_else(|_| CoefficientTable::from_samples(&[]));
        let mid = table.coefficients_at(-5.0);
        assert!(mid.is_some());
        let (slope, offset) = mid.unwrap_or((0.0, 0.0));
        assert!((slope - 2.7).abs() < 1e-12);
        assert!((offset - (-0.7)).abs() < 1e-12);
    }

    #[test]
    fn coefficient_grid_is_shorter_than_cop_grid() {
        assert_eq!(TemperatureGrid::coefficient_default().max_c(), 20.9);
        assert!(
            TemperatureGrid::coefficient_default().len()
                < TemperatureGrid::cop_default().len()
        );
    }
}
