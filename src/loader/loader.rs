use std::{fs::File, io::Read, path::Path};

use log::{info, warn};
use serde::Deserialize;

use crate::{
    error::{LoadError, RecordError},
    parser::hours::HoursParser,
    store::store::RestaurantRecord,
};

#[derive(Deserialize)]
struct HoursRow {
    #[serde(rename = "Restaurant Name")]
    name: String,
    #[serde(rename = "Hours")]
    hours: String,
}

/// A row that could not be read or whose hours could not be parsed, left out
/// of the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub line: u64,
    pub name: String,
    pub error: RecordError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<RestaurantRecord>,
    pub failures: Vec<RecordFailure>,
}

impl LoadReport {
    fn skip(&mut self, line: u64, name: String, error: RecordError) {
        warn!("Skipping '{}' on line {}: {}", name, line, error);
        self.failures.push(RecordFailure { line, name, error });
    }
}

/// Errors confined to a single row. Anything else means the file itself
/// cannot be read any further.
fn is_row_error(error: &csv::Error) -> bool {
    matches!(
        error.kind(),
        csv::ErrorKind::Utf8 { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Deserialize { .. }
    )
}

/// Reads the restaurants CSV at `path`. See [`load_reader`].
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    parser: &HoursParser,
    strict: bool,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    info!("Loading opening hours from {:?}", path);
    load_reader(File::open(path)?, parser, strict)
}

/// Parses every `Restaurant Name`,`Hours` row.
///
/// With `strict` unset a row that cannot be read (missing field, invalid
/// UTF-8) or whose hours cannot be parsed is skipped and recorded in the
/// report's failures, and the rest of the file still loads. With `strict` set
/// the first such row aborts the load. I/O errors and an unreadable header
/// always abort.
pub fn load_reader<R: Read>(
    input: R,
    parser: &HoursParser,
    strict: bool,
) -> Result<LoadReport, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut report = LoadReport::default();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if !strict && is_row_error(&err) => {
                let line = err.position().map_or(0, |position| position.line());
                report.skip(line, String::new(), RecordError::Row(err.to_string()));
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let line = record.position().map_or(0, |position| position.line());

        let row: HoursRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) if !strict => {
                let name = record.get(0).unwrap_or_default().to_string();
                report.skip(line, name, RecordError::Row(err.to_string()));
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        match parser.parse(&row.hours) {
            Ok(schedule) => report.records.push((row.name, schedule)),
            Err(error) if strict => {
                return Err(LoadError::Record {
                    line,
                    name: row.name,
                    source: error.into(),
                })
            }
            Err(error) => report.skip(line, row.name, error.into()),
        }
    }

    info!(
        "Parsed {} restaurants, skipped {}",
        report.records.len(),
        report.failures.len()
    );
    Ok(report)
}
