use thiserror::Error;

/// A single hours segment or time token that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid 12-hour time '{0}'")]
    InvalidTime(String),

    #[error("unknown day abbreviation '{0}'")]
    UnknownDay(String),

    #[error("no days found in segment '{0}'")]
    EmptyDaySet(String),

    #[error("no time range found in segment '{0}'")]
    MissingTimeRange(String),

    #[error("no closing time in segment '{0}'")]
    MissingCloseTime(String),
}

/// Why one CSV row was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    Hours(#[from] ParseError),

    #[error("unreadable row: {0}")]
    Row(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not get a database connection: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("schedule snapshot lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read hours file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("record '{name}' on line {line}: {source}")]
    Record {
        line: u64,
        name: String,
        source: RecordError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not deserialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name} has an invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}
