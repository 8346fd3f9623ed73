//! Ambient temperature inputs: station files and synthetic profiles.
//!
//! Hourly station statistics arrive as whitespace-delimited text with a
//! header row naming the columns (`#Jahr Monat Tag Stunde ... T_Mid ...`).
//! Year, month, day, and hour are combined into one timestamp key; `T_Mid`
//! is the ambient temperature in °C.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use chrono::{NaiveDate, NaiveDateTime};

/// Error raised while parsing a weather file.
#[derive(Debug)]
pub enum WeatherError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The header row is missing a required column.
    MissingColumn(&'static str),
    /// A data row could not be parsed.
    BadRow { line: usize, message: String },
    /// Timestamps are not strictly increasing.
    NonMonotonic { line: usize },
    /// The file contained a header but no data rows.
    Empty,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::Io(e) => write!(f, "weather error: {e}"),
            WeatherError::MissingColumn(name) => {
                write!(f, "weather error: missing column \"{name}\"")
            }
            WeatherError::BadRow { line, message } => {
                write!(f, "weather error: line {line}: {message}")
            }
            WeatherError::NonMonotonic { line } => {
                write!(f, "weather error: line {line}: timestamp not increasing")
            }
            WeatherError::Empty => write!(f, "weather error: no data rows"),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<io::Error> for WeatherError {
    fn from(e: io::Error) -> Self {
        WeatherError::Io(e)
    }
}

/// Time-indexed ambient temperature readings with strictly increasing
/// timestamps.
#[derive(Debug, Clone)]
pub struct TemperatureSeries {
    timestamps: Vec<NaiveDateTime>,
    temps_c: Vec<f64>,
}

/// Column names required in an hourly station file.
const COLUMN_YEAR: &str = "Jahr";
const COLUMN_MONTH: &str = "Monat";
const COLUMN_DAY: &str = "Tag";
const COLUMN_HOUR: &str = "Stunde";
const COLUMN_TEMP: &str = "T_Mid";

fn find_column(header: &[&str], name: &'static str) -> Result<usize, WeatherError> {
    header
        .iter()
        .position(|h| h.trim_start_matches('#') == name)
        .ok_or(WeatherError::MissingColumn(name))
}

fn parse_number<T: std::str::FromStr>(
    fields: &[&str],
    col: usize,
    line: usize,
) -> Result<T, WeatherError> {
    let raw = fields.get(col).copied().unwrap_or("");
    raw.parse().map_err(|_| WeatherError::BadRow {
        line,
        message: format!("\"{raw}\" is not a number"),
    })
}

impl TemperatureSeries {
    /// Builds a series from parallel timestamp/temperature vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    pub fn new(timestamps: Vec<NaiveDateTime>, temps_c: Vec<f64>) -> Self {
        assert_eq!(timestamps.len(), temps_c.len());
        Self {
            timestamps,
            temps_c,
        }
    }

    /// Parses whitespace-delimited hourly station statistics.
    ///
    /// # Errors
    ///
    /// Returns a `WeatherError` on I/O failure, missing columns, malformed
    /// rows, non-increasing timestamps, or an empty file.
    pub fn from_hourly_stats(reader: impl Read) -> Result<Self, WeatherError> {
        let mut lines = BufReader::new(reader).lines();

        let header_line = match lines.next() {
            Some(line) => line?,
            None => return Err(WeatherError::Empty),
        };
        let header: Vec<&str> = header_line.split_whitespace().collect();
        let year_col = find_column(&header, COLUMN_YEAR)?;
        let month_col = find_column(&header, COLUMN_MONTH)?;
        let day_col = find_column(&header, COLUMN_DAY)?;
        let hour_col = find_column(&header, COLUMN_HOUR)?;
        let temp_col = find_column(&header, COLUMN_TEMP)?;

        let mut timestamps = Vec::new();
        let mut temps_c = Vec::new();

        for (i, line) in lines.enumerate() {
            let line = line?;
            let line_no = i + 2; // 1-based, after the header
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();

            let year: i32 = parse_number(&fields, year_col, line_no)?;
            let month: u32 = parse_number(&fields, month_col, line_no)?;
            let day: u32 = parse_number(&fields, day_col, line_no)?;
            let hour: u32 = parse_number(&fields, hour_col, line_no)?;
            let temp_c: f64 = parse_number(&fields, temp_col, line_no)?;

            let timestamp = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .ok_or(WeatherError::BadRow {
                    line: line_no,
                    message: format!("invalid date {year}-{month}-{day} {hour}:00"),
                })?;

            if let Some(prev) = timestamps.last()
                && *prev >= timestamp
            {
                return Err(WeatherError::NonMonotonic { line: line_no });
            }

            timestamps.push(timestamp);
            temps_c.push(temp_c);
        }

        if timestamps.is_empty() {
            return Err(WeatherError::Empty);
        }

        Ok(Self {
            timestamps,
            temps_c,
        })
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.temps_c.len()
    }

    /// `true` when the series holds no readings.
    pub fn is_empty(&self) -> bool {
        self.temps_c.is_empty()
    }

    /// All readings in °C, one per timestamp.
    pub fn temps_c(&self) -> &[f64] {
        &self.temps_c
    }

    /// Reading timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Per-interval temperatures for simulation.
    ///
    /// N readings delimit N−1 intervals; each interval uses the temperature
    /// at its start, so the final reading only closes the last interval.
    pub fn interval_temps(&self) -> &[f64] {
        if self.temps_c.len() < 2 {
            &[]
        } else {
            &self.temps_c[..self.temps_c.len() - 1]
        }
    }
}

/// Deterministic sinusoidal temperature profile for file-less scenarios.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticWeather {
    /// Mean temperature (°C).
    pub mean_c: f64,
    /// Amplitude of the sinusoidal swing (°C).
    pub amplitude_c: f64,
    /// Steps per full period.
    pub period_steps: usize,
    /// Phase offset in radians.
    pub phase_rad: f64,
}

impl SyntheticWeather {
    /// Creates a profile; `period_steps` is clamped to at least 1.
    pub fn new(mean_c: f64, amplitude_c: f64, period_steps: usize, phase_rad: f64) -> Self {
        Self {
            mean_c,
            amplitude_c,
            period_steps: period_steps.max(1),
            phase_rad,
        }
    }

    /// Ambient temperature at a timestep.
    pub fn temp_c(&self, timestep: usize) -> f64 {
        let pos = (timestep % self.period_steps) as f64 / self.period_steps as f64;
        let angle = 2.0 * std::f64::consts::PI * pos + self.phase_rad;
        self.mean_c + self.amplitude_c * angle.sin()
    }

    /// Generates one interval temperature per step.
    pub fn generate(&self, steps: usize) -> Vec<f64> {
        (0..steps).map(|t| self.temp_c(t)).collect()
    }
}
