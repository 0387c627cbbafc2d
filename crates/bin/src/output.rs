//! Table output.

use polars::prelude::*;
use std::error::Error;
use std::io::Write;
use std::path::Path;

/// Write a report table as CSV with a header row.
///
/// Supports the column types of report tables: String, UInt32 and Float64.
pub(crate) fn write_csv<W: Write>(df: &DataFrame, writer: W) -> Result<(), Box<dyn Error>> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;

    let columns = df.get_columns();
    let mut record = Vec::with_capacity(columns.len());
    for row in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(cell(column, row)?);
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a report table to a CSV file at `path`.
pub(crate) fn write_csv_file(df: &DataFrame, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    write_csv(df, file)
}

fn cell(column: &Column, row: usize) -> Result<String, Box<dyn Error>> {
    let text = match column.dtype() {
        DataType::String => column.str()?.get(row).map(str::to_string),
        DataType::UInt32 => column.u32()?.get(row).map(|v| v.to_string()),
        DataType::Float64 => column.f64()?.get(row).map(|v| v.to_string()),
        other => {
            return Err(format!("Unsupported column type {} in {}", other, column.name()).into());
        }
    };
    Ok(text.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new("code".into(), vec!["600000", "000001"]).into(),
            Series::new("date".into(), vec![20230331u32, 20230630]).into(),
            Series::new("1".into(), vec![0.5, 0.0]).into(),
            Series::new("2".into(), vec![1250000.0, -3.25]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "code,date,1,2\n600000,20230331,0.5,1250000\n000001,20230630,0,-3.25\n"
        );
    }

    #[test]
    fn test_write_csv_empty_table() {
        let df = sample().head(Some(0));
        let mut out = Vec::new();
        write_csv(&df, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "code,date,1,2\n");
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports.csv");
        write_csv_file(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("code,date,1,2\n600000"));
    }

    #[test]
    fn test_rejects_other_types() {
        let df = DataFrame::new(vec![Series::new("flag".into(), vec![true]).into()]).unwrap();
        assert!(write_csv(&df, Vec::new()).is_err());
    }
}
