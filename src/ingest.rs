use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::IngestError;
use crate::models::{CellValue, RawRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(IngestError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

pub fn load_path(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let format = InputFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    let rows = match format {
        InputFormat::Csv => read_csv(file)?,
        InputFormat::Json => read_json(file)?,
    };
    info!(path = %path.display(), rows = rows.len(), "loaded export");
    Ok(rows)
}

/// Reads a delimited export; `;` is used when it outnumbers `,` on the header line.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<RawRow>, IngestError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let content = content.trim_start_matches('\u{feff}');

    let header_line = content.lines().next().unwrap_or_default();
    let delimiter = if header_line.matches(';').count() > header_line.matches(',').count() {
        b';'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), csv_cell(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn csv_cell(value: &str) -> CellValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => CellValue::Number(number),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(IngestError::NotAnArray(json_kind(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(header, value)| (header, json_cell(value)))
                .collect()),
            _ => Err(IngestError::NotAnObject(index)),
        })
        .collect()
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::String(text) => CellValue::Text(text),
        Value::Number(number) => number
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(number.to_string())),
        other => CellValue::Text(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
