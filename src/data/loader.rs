use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{col, Column, TrackTable, MISSING_TEXT};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Tokens treated as a missing value when coercing a column. These are the
/// markers pandas writes into this export for absent YouTube/Spotify data.
const NA_TOKENS: [&str; 6] = ["", "nan", "NaN", "NA", "N/A", "null"];

/// Load the joined Spotify/YouTube export into a [`TrackTable`].
///
/// * header names are trimmed of surrounding whitespace
/// * the first column is the exported row index and is discarded
/// * every remaining column is coerced to one concrete type; coercion is
///   tolerant and never drops a row (unparseable cells become a missing
///   marker instead)
///
/// Called once at startup; any error here is fatal for the whole session.
pub fn load_table(path: &Path) -> Result<TrackTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.len() < 2 {
        bail!("expected a row-index column plus data columns, got {} column(s)", headers.len());
    }

    // Skip the index column everywhere below.
    let names: Vec<String> = headers.iter().skip(1).cloned().collect();
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); names.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (i, cell) in raw.iter_mut().enumerate() {
            cell.push(record.get(i + 1).unwrap_or("").to_string());
        }
    }

    let columns: Vec<Column> = raw.into_iter().map(infer_column).collect();
    let table = TrackTable::new(names, columns);
    validate_schema(&table)?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell.trim())
}

/// Pick the concrete representation for one raw column.
///
/// * every cell present and parseable as `i64` → `Int`
/// * otherwise every non-missing cell parseable as `f64` → `Float`
///   (missing → NaN; an integer column with gaps lands here)
/// * otherwise → `Text` (missing → [`MISSING_TEXT`])
fn infer_column(raw: Vec<String>) -> Column {
    let mut all_int = true;
    let mut all_float = true;
    let mut any_missing = false;

    for cell in &raw {
        let cell = cell.trim();
        if is_missing(cell) {
            any_missing = true;
            continue;
        }
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && cell.parse::<f64>().is_err() {
            all_float = false;
            break;
        }
    }

    if all_int && !any_missing {
        Column::Int(
            raw.iter()
                .map(|c| c.trim().parse::<i64>().unwrap_or_default())
                .collect(),
        )
    } else if all_float {
        Column::Float(
            raw.iter()
                .map(|c| {
                    let c = c.trim();
                    if is_missing(c) {
                        f64::NAN
                    } else {
                        c.parse::<f64>().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        )
    } else {
        Column::Text(
            raw.into_iter()
                .map(|c| {
                    if is_missing(c.trim()) {
                        MISSING_TEXT.to_string()
                    } else {
                        c
                    }
                })
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

/// The columns every page depends on. A source without them is malformed
/// and must not be served at all.
fn validate_schema(table: &TrackTable) -> Result<()> {
    for name in [col::TRACK, col::ARTIST, col::ALBUM] {
        if table.column(name).is_err() {
            bail!("dataset is missing required column '{name}'");
        }
    }
    for name in [
        col::DANCEABILITY,
        col::ENERGY,
        col::VALENCE,
        col::INSTRUMENTALNESS,
        col::LIVENESS,
        col::STREAM,
    ] {
        match table.column(name) {
            Err(_) => bail!("dataset is missing required column '{name}'"),
            Ok(c) if !c.is_numeric() => {
                bail!("required column '{name}' is not numeric")
            }
            Ok(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = ",Track, Artist ,Album,Danceability,Energy,Valence,Instrumentalness,Liveness,Stream";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn trims_headers_and_discards_the_index_column() {
        let file = write_csv(&[
            HEADER,
            "0,Song A,Artist A,Album A,0.5,0.6,0.7,0.0,0.1,1000",
        ]);
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.column_index("Artist").is_some());
        assert!(table.column_index("").is_none());
        assert_eq!(table.n_columns(), 9);
    }

    #[test]
    fn fully_present_integer_column_loads_as_int() {
        let file = write_csv(&[
            HEADER,
            "0,a,x,al,0.5,0.6,0.7,0.0,0.1,1000",
            "1,b,y,al,0.6,0.7,0.8,0.0,0.1,2000",
        ]);
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.column("Stream").unwrap().dtype(), "int64");
    }

    #[test]
    fn integer_column_with_gaps_promotes_to_float_with_nan() {
        let file = write_csv(&[
            HEADER,
            "0,a,x,al,0.5,0.6,0.7,0.0,0.1,1000",
            "1,b,y,al,0.6,0.7,0.8,0.0,0.1,",
        ]);
        let table = load_table(file.path()).unwrap();
        let stream = table.column("Stream").unwrap();
        assert_eq!(stream.dtype(), "float64");
        assert_eq!(stream.missing_count(), 1);
        let values = table.numeric("Stream").unwrap();
        assert_eq!(values[0], 1000.0);
        assert!(values[1].is_nan());
    }

    #[test]
    fn na_tokens_coerce_to_missing_not_errors() {
        let file = write_csv(&[
            HEADER,
            "0,a,x,al,NaN,0.6,0.7,0.0,0.1,10",
            "1,b,y,al,N/A,0.7,0.8,0.0,0.1,20",
            "2,c,z,al,0.3,0.8,0.9,0.0,0.1,30",
        ]);
        let table = load_table(file.path()).unwrap();
        let dance = table.numeric("Danceability").unwrap();
        assert!(dance[0].is_nan());
        assert!(dance[1].is_nan());
        assert_eq!(dance[2], 0.3);
        // No row was dropped along the way.
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn mixed_column_becomes_text_with_explicit_missing_marker() {
        let file = write_csv(&[
            ",Track,Artist,Album,Danceability,Energy,Valence,Instrumentalness,Liveness,Stream,Licensed",
            "0,a,x,al,0.5,0.6,0.7,0.0,0.1,10,True",
            "1,b,y,al,0.6,0.7,0.8,0.0,0.1,20,",
        ]);
        let table = load_table(file.path()).unwrap();
        let licensed = table.text("Licensed").unwrap();
        assert_eq!(licensed, &["True".to_string(), MISSING_TEXT.to_string()]);
    }

    #[test]
    fn float_columns_are_homogeneous_f64() {
        let file = write_csv(&[
            HEADER,
            "0,a,x,al,0.5,0.6,0.7,0.0,0.1,10",
            "1,b,y,al,1,0.7,0.8,0.0,0.1,20",
        ]);
        let table = load_table(file.path()).unwrap();
        // "1" mixed in with "0.5" still yields a single float column.
        match table.column("Danceability").unwrap() {
            Column::Float(v) => assert_eq!(v, &[0.5, 1.0]),
            other => panic!("expected float column, got {}", other.dtype()),
        }
    }

    #[test]
    fn missing_required_column_fails_the_load() {
        let file = write_csv(&[",Track,Artist,Album", "0,a,x,al"]);
        let err = load_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Danceability"));
    }

    #[test]
    fn non_numeric_required_column_fails_the_load() {
        let file = write_csv(&[
            HEADER,
            "0,a,x,al,loud,0.6,0.7,0.0,0.1,10",
        ]);
        let err = load_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Danceability"));
    }

    #[test]
    fn unreadable_path_is_fatal() {
        assert!(load_table(Path::new("/nonexistent/data_set.csv")).is_err());
    }
}
