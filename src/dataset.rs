use anyhow::Context;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::utils::InsightError;

static MISSING: RawValue = RawValue::Missing;

/// Cell contents treated as missing when reading a table
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell.trim())
}

/// A single table cell, decoded once at load time
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RawValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Decode a textual cell: NA tokens become `Missing`, finite numbers become `Numeric`
    pub fn from_cell(cell: &str) -> Self {
        if is_na(cell) {
            return RawValue::Missing;
        }
        match cell.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Numeric(n),
            _ => RawValue::Text(cell.to_string()),
        }
    }

    /// Decode a cell of a column that is known to hold text
    pub fn text_cell(cell: &str) -> Self {
        if is_na(cell) {
            RawValue::Missing
        } else {
            RawValue::Text(cell.to_string())
        }
    }

    /// Decode a JSON value
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Missing,
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Numeric),
            serde_json::Value::String(s) => RawValue::from_cell(&s),
            other => RawValue::Text(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    /// Render the value as a categorical label
    pub fn as_label(&self) -> Option<String> {
        match self {
            RawValue::Numeric(n) => Some(n.to_string()),
            RawValue::Text(s) => Some(s.trim().to_string()),
            RawValue::Missing => None,
        }
    }
}

/// A single table row with named cells
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataPoint {
    pub fields: HashMap<String, RawValue>,
}

impl DataPoint {
    /// Create a new data point
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a cell to the data point
    pub fn add_field(&mut self, key: String, value: RawValue) {
        self.fields.insert(key, value);
    }

    /// Get a cell; columns absent from this row read as `Missing`
    pub fn get_field(&self, key: &str) -> &RawValue {
        self.fields.get(key).unwrap_or(&MISSING)
    }
}

impl Default for DataPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded table
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub name: String,
    /// Header columns declared by the source, in file order
    pub columns: Vec<String>,
    pub data: Vec<DataPoint>,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Add a row to the dataset
    pub fn add_point(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get all unique field names across the header and all rows
    pub fn get_field_names(&self) -> Vec<String> {
        let mut fields: std::collections::HashSet<String> = self.columns.iter().cloned().collect();
        for point in &self.data {
            for key in point.fields.keys() {
                fields.insert(key.clone());
            }
        }
        let mut result: Vec<String> = fields.into_iter().collect();
        result.sort();
        result
    }

    /// Fail with `MissingColumn` for the first required column the table lacks
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), InsightError> {
        let names = self.get_field_names();
        for column in columns {
            if !names.iter().any(|name| name == column) {
                return Err(InsightError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Load dataset from a file, picking the parser by extension
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read input table {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::from_csv(name, &content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(name, &content),
            _ => Err(InsightError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }

    /// Load dataset from CSV
    ///
    /// Types are inferred per column: a column is numeric only when every non-missing
    /// cell parses as a number, otherwise all of its cells are kept as text.
    pub fn from_csv(name: String, csv_data: &str) -> crate::Result<Self> {
        let mut dataset = Dataset::new(name);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let headers = reader.headers().context("failed to read CSV header")?.clone();
        dataset.columns = headers.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            records.push(result.with_context(|| format!("malformed CSV record {}", row + 1))?);
        }

        let numeric: Vec<bool> = (0..headers.len())
            .map(|i| {
                records
                    .iter()
                    .filter_map(|record| record.get(i))
                    .filter(|cell| !is_na(cell))
                    .all(|cell| cell.trim().parse::<f64>().is_ok())
            })
            .collect();

        for record in &records {
            let mut point = DataPoint::new();
            for (i, field) in record.iter().enumerate() {
                if let Some(header) = headers.get(i) {
                    let value = if numeric[i] {
                        RawValue::from_cell(field)
                    } else {
                        RawValue::text_cell(field)
                    };
                    point.add_field(header.to_string(), value);
                }
            }
            dataset.add_point(point);
        }

        Ok(dataset)
    }

    /// Load dataset from JSON array of objects
    pub fn from_json(name: String, json_data: &str) -> crate::Result<Self> {
        let mut dataset = Dataset::new(name);
        let data: Vec<HashMap<String, serde_json::Value>> =
            serde_json::from_str(json_data).context("input JSON must be an array of objects")?;

        for item in data {
            let mut point = DataPoint::new();
            for (key, value) in item {
                point.add_field(key, RawValue::from_json(value));
            }
            dataset.add_point(point);
        }

        Ok(dataset)
    }
}
