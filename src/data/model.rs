use std::collections::BTreeSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

/// Column names of the joined Spotify/YouTube export that the dashboard
/// relies on. The loader keeps every source column, whatever its name;
/// these constants only pin the ones the pages address directly.
pub mod col {
    pub const TRACK: &str = "Track";
    pub const ARTIST: &str = "Artist";
    pub const ALBUM: &str = "Album";
    pub const ALBUM_TYPE: &str = "Album_type";
    pub const DANCEABILITY: &str = "Danceability";
    pub const ENERGY: &str = "Energy";
    pub const VALENCE: &str = "Valence";
    pub const INSTRUMENTALNESS: &str = "Instrumentalness";
    pub const LIVENESS: &str = "Liveness";
    pub const TEMPO: &str = "Tempo";
    pub const STREAM: &str = "Stream";
    pub const KEY: &str = "Key";
    pub const DURATION_MS: &str = "Duration_ms";
    pub const CHANNEL: &str = "Channel";
    pub const LICENSED: &str = "Licensed";
    pub const OFFICIAL_VIDEO: &str = "official_video";
}

/// Placeholder stored in text columns where the source had no value.
/// Numeric columns use `f64::NAN` instead.
pub const MISSING_TEXT: &str = "nan";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Recoverable, user-correctable data-access failures. Load failures are
/// fatal and use `anyhow` in the loader instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("column '{0}' not found")]
    UnknownColumn(String),
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
    #[error("column '{0}' is not categorical")]
    NotCategorical(String),
}

// ---------------------------------------------------------------------------
// Column – one typed column of the table
// ---------------------------------------------------------------------------

/// A single column, coerced to one concrete representation at load time.
#[derive(Debug, Clone)]
pub enum Column {
    /// 64-bit floats; missing values are `NaN`.
    Float(Vec<f64>),
    /// 64-bit integers; only inferred when every cell is present.
    Int(Vec<i64>),
    /// Everything else, stringified; missing values are [`MISSING_TEXT`].
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Float(_) | Column::Int(_))
    }

    /// Short dtype tag shown on the details page.
    pub fn dtype(&self) -> &'static str {
        match self {
            Column::Float(_) => "float64",
            Column::Int(_) => "int64",
            Column::Text(_) => "text",
        }
    }

    /// Number of missing cells (NaN floats, `"nan"` texts).
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Float(v) => v.iter().filter(|x| x.is_nan()).count(),
            Column::Int(_) => 0,
            Column::Text(v) => v.iter().filter(|s| s.as_str() == MISSING_TEXT).count(),
        }
    }

    /// Cell rendered for table display.
    pub fn value_text(&self, row: usize) -> String {
        match self {
            Column::Float(v) => {
                let x = v[row];
                if x.is_nan() {
                    "NaN".to_string()
                } else if x.fract() == 0.0 && x.abs() < 1e15 {
                    format!("{x:.0}")
                } else {
                    format!("{x:.3}")
                }
            }
            Column::Int(v) => v[row].to_string(),
            Column::Text(v) => v[row].clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// TrackTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The canonical in-memory table: one entry in `columns` per source column,
/// all of equal length. Built once by the loader and never mutated; every
/// page works on borrowed views or derived index vectors.
#[derive(Debug, Clone)]
pub struct TrackTable {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl TrackTable {
    pub fn new(names: Vec<String>, columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        TrackTable {
            names,
            columns,
            n_rows,
        }
    }

    /// Number of track records.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Ordered column names, as in the source file.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.column_index(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    pub fn column_at(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Numeric view of a column: floats as-is, integers widened to `f64`.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, DataError> {
        match self.column(name)? {
            Column::Float(v) => Ok(v.clone()),
            Column::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            Column::Text(_) => Err(DataError::NotNumeric(name.to_string())),
        }
    }

    /// Borrowed text view of a categorical column.
    pub fn text(&self, name: &str) -> Result<&[String], DataError> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            _ => Err(DataError::NotCategorical(name.to_string())),
        }
    }

    /// Names of all numeric (float or int) columns, in table order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.is_numeric())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Sorted distinct values of a text column.
    pub fn unique_text_values(&self, name: &str) -> Result<Vec<String>, DataError> {
        let values = self.text(name)?;
        let set: BTreeSet<&String> = values.iter().collect();
        Ok(set.into_iter().cloned().collect())
    }

    /// Number of distinct values in a text column.
    pub fn unique_count(&self, name: &str) -> Result<usize, DataError> {
        let values = self.text(name)?;
        Ok(values.iter().collect::<BTreeSet<_>>().len())
    }

    /// (float, int, text) column counts for the details page.
    pub fn dtype_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for c in &self.columns {
            match c {
                Column::Float(_) => counts.0 += 1,
                Column::Int(_) => counts.1 += 1,
                Column::Text(_) => counts.2 += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> TrackTable {
        TrackTable::new(
            vec![
                "Track".into(),
                "Stream".into(),
                "Energy".into(),
                "Album_type".into(),
            ],
            vec![
                Column::Text(vec!["a".into(), MISSING_TEXT.into(), "c".into()]),
                Column::Int(vec![10, 20, 30]),
                Column::Float(vec![0.5, f64::NAN, 0.9]),
                Column::Text(vec!["album".into(), "single".into(), "album".into()]),
            ],
        )
    }

    #[test]
    fn numeric_widens_ints_and_keeps_floats() {
        let t = small_table();
        assert_eq!(t.numeric("Stream").unwrap(), vec![10.0, 20.0, 30.0]);
        let energy = t.numeric("Energy").unwrap();
        assert_eq!(energy[0], 0.5);
        assert!(energy[1].is_nan());
    }

    #[test]
    fn numeric_rejects_text_columns() {
        let t = small_table();
        assert_eq!(
            t.numeric("Track"),
            Err(DataError::NotNumeric("Track".into()))
        );
        assert_eq!(
            t.numeric("Missing"),
            Err(DataError::UnknownColumn("Missing".into()))
        );
    }

    #[test]
    fn missing_counts_per_representation() {
        let t = small_table();
        assert_eq!(t.column("Track").unwrap().missing_count(), 1);
        assert_eq!(t.column("Stream").unwrap().missing_count(), 0);
        assert_eq!(t.column("Energy").unwrap().missing_count(), 1);
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let t = small_table();
        assert_eq!(
            t.unique_text_values("Album_type").unwrap(),
            vec!["album".to_string(), "single".to_string()]
        );
        assert_eq!(t.unique_count("Album_type").unwrap(), 2);
    }

    #[test]
    fn value_text_formats_by_dtype() {
        let t = small_table();
        let energy = t.column("Energy").unwrap();
        assert_eq!(energy.value_text(0), "0.500");
        assert_eq!(energy.value_text(1), "NaN");
        assert_eq!(t.column("Stream").unwrap().value_text(2), "30");
    }

    #[test]
    fn numeric_column_names_follow_table_order() {
        let t = small_table();
        assert_eq!(t.numeric_column_names(), vec!["Stream", "Energy"]);
        assert_eq!(t.dtype_counts(), (1, 1, 2));
    }
}
