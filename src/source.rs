use std::path::PathBuf;

use polars::prelude::*;

use crate::error::{PressureError, Result};
use crate::schema::{activity, region};

/// Narrow interface between the pipeline and wherever the records live.
///
/// The core stages only ever see an in-memory [`DataFrame`]; anything that
/// knows about files, paths, or formats stays behind this trait.
pub trait SourceLoader {
    fn load(&self) -> Result<DataFrame>;
}

/// Pandas-style housekeeping index column left behind by CSV round-trips.
const HOUSEKEEPING_INDEX: &str = "Unnamed: 0";

/// CSV-backed source for transaction records.
///
/// Reads every column as String, trims whitespace from column names,
/// drops the housekeeping index column if present, then casts the known
/// activity counters to Float64 with empty cells treated as zero.
pub struct CsvSource {
    base_path: PathBuf,
    filename: String,
}

impl CsvSource {
    pub fn new(base_path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            filename: filename.into(),
        }
    }

    fn read_csv_as_strings(&self) -> Result<DataFrame> {
        let path = self.base_path.join(&self.filename);
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        if df.column(HOUSEKEEPING_INDEX).is_ok() {
            let _ = df.drop_in_place(HOUSEKEEPING_INDEX)?;
        }

        Ok(df)
    }
}

impl SourceLoader for CsvSource {
    fn load(&self) -> Result<DataFrame> {
        let df = self.read_csv_as_strings()?;
        require_columns(&df, &[region::STATE, region::DISTRICT])?;

        let known_counters = [
            activity::TOTAL_ENROLMENTS,
            activity::DEMO_ACTIVITY,
            activity::BIO_ACTIVITY,
            activity::DEMO_AGE_5_17,
            activity::DEMO_AGE_17_PLUS,
            activity::BIO_AGE_5_17,
            activity::BIO_AGE_17_PLUS,
        ];
        let present: Vec<Expr> = known_counters
            .iter()
            .filter(|c| df.column(c).is_ok())
            .map(|c| col(*c).cast(DataType::Float64).fill_null(lit(0.0)))
            .collect();

        let df = df.lazy().with_columns(present).collect()?;
        Ok(df)
    }
}

/// Schema check shared by every stage: missing required columns are a
/// fatal configuration error, never silently recovered from.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &name in required {
        if df.column(name).is_err() {
            return Err(PressureError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_columns_reports_first_missing() {
        let df = df!(
            region::STATE => ["Kerala"],
            region::DISTRICT => ["Idukki"],
        )
        .unwrap();

        assert!(require_columns(&df, &[region::STATE, region::DISTRICT]).is_ok());

        let err = require_columns(&df, &[activity::TOTAL_ENROLMENTS]).unwrap_err();
        match err {
            PressureError::MissingColumn(name) => assert_eq!(name, activity::TOTAL_ENROLMENTS),
            other => panic!("unexpected error: {other}"),
        }
    }
}
