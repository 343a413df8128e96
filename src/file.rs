// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::rows_to_string;
use crate::store::{Dataset, TableSink};

/// Write every table of `sink` as `<out_dir>/<table>.<ext>`.
/// Returns the paths written, parent tables first.
pub fn export_tables(sink: &TableSink, export: &ExportOptions) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    ensure_directory(&export.out_dir)?;
    let mut written = Vec::with_capacity(5);
    for (name, data) in sink.tables() {
        let path = export.out_dir.join(format!("{name}.{}", export.format.ext()));
        write_table(&path, data, export)?;
        logd!("Export: {} rows → {}", data.rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// One table in the configured format.
pub fn write_table(path: &Path, data: &Dataset, export: &ExportOptions) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let contents = match export.format {
        ExportFormat::Json => serde_json::to_string_pretty(&table_to_json(data))?,
        ExportFormat::Csv | ExportFormat::Tsv => {
            let sep = export.format.delimiter().ok_or("format has no delimiter")?;
            rows_to_string(&data.headers, &data.rows, export.include_headers, sep)
        }
    };
    fs::write(path, contents)?;
    Ok(())
}

/// Rows as objects keyed by column name; empty cells become `null`.
/// Tables without headers come out as arrays of arrays.
pub fn table_to_json(data: &Dataset) -> Value {
    let cell = |c: &String| if c.is_empty() { Value::Null } else { Value::String(c.clone()) };
    let rows = data.rows.iter().map(|r| match &data.headers {
        Some(h) => {
            let obj: Map<String, Value> = h.iter().cloned().zip(r.iter().map(cell)).collect();
            Value::Object(obj)
        }
        None => Value::Array(r.iter().map(cell).collect()),
    });
    Value::Array(rows.collect())
}

/// Any serialisable value as pretty JSON (run reports).
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
