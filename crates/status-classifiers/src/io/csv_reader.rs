//! Delimited customer table reader with one-hot encoding of categorical columns.
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;

/// Configuration for reading the customer table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Feature columns, in output order before encoding
    pub feature_columns: Vec<String>,
    /// Column holding the categorical status label
    pub label_column: String,
    /// Single ASCII field separator
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            feature_columns: vec![
                "recency".to_string(),
                "frequency".to_string(),
                "weeks_since_signup".to_string(),
            ],
            label_column: "status".to_string(),
            delimiter: ',',
        }
    }
}

/// How one raw column becomes encoded feature columns.
enum ColumnEncoding {
    Numeric(Vec<f64>),
    /// Sorted distinct categories
    OneHot(Vec<String>),
}

/// Read a CSV file into a `Dataset`.
pub fn read_dataset<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Dataset> {
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;
    read_dataset_from_reader(file, config)
        .with_context(|| format!("Failed to load dataset: {}", path.as_ref().display()))
}

/// Read delimited text from any reader into a `Dataset`.
///
/// Columns whose every value parses as a number stay numeric; any other
/// column is expanded into `{column}_{value}` indicator columns placed after
/// the numeric ones, with categories in lexicographic order.
pub fn read_dataset_from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Dataset> {
    if !config.delimiter.is_ascii() {
        bail!("Delimiter {:?} is not a single ASCII character", config.delimiter);
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read header row")?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found in header", name))
    };
    let feature_idx = config
        .feature_columns
        .iter()
        .map(|c| column_index(c))
        .collect::<Result<Vec<_>>>()?;
    let label_idx = column_index(&config.label_column)?;

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); feature_idx.len()];
    let mut labels: Vec<String> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read record {}", line + 1))?;
        for (col, &idx) in feature_idx.iter().enumerate() {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Record {} is missing column {}", line + 1, idx))?;
            raw[col].push(value.to_string());
        }
        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Record {} is missing the label column", line + 1))?;
        labels.push(label.to_string());
    }

    if labels.is_empty() {
        bail!("No data rows found");
    }

    let encodings: Vec<ColumnEncoding> = raw
        .iter()
        .map(|values| {
            match values.iter().map(|v| v.parse::<f64>()).collect::<std::result::Result<Vec<_>, _>>() {
                Ok(numbers) => ColumnEncoding::Numeric(numbers),
                Err(_) => {
                    let mut categories = values.clone();
                    categories.sort();
                    categories.dedup();
                    ColumnEncoding::OneHot(categories)
                }
            }
        })
        .collect();

    let mut feature_names = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();
    for (name, encoding) in config.feature_columns.iter().zip(&encodings) {
        if let ColumnEncoding::Numeric(numbers) = encoding {
            feature_names.push(name.clone());
            columns.push(numbers.clone());
        }
    }
    for ((name, encoding), values) in config.feature_columns.iter().zip(&encodings).zip(&raw) {
        if let ColumnEncoding::OneHot(categories) = encoding {
            for category in categories {
                feature_names.push(format!("{}_{}", name, category));
                columns.push(
                    values
                        .iter()
                        .map(|v| if v == category { 1.0 } else { 0.0 })
                        .collect(),
                );
            }
        }
    }

    let n_samples = labels.len();
    let n_features = columns.len();
    let features = Array2::from_shape_fn((n_samples, n_features), |(r, c)| columns[c][r]);

    log::debug!(
        "Loaded {} rows with {} encoded features: {:?}",
        n_samples,
        n_features,
        feature_names
    );

    Ok(Dataset::from_labels(features, &labels, feature_names)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_columns_pass_through() {
        let text = "recency,frequency,weeks_since_signup,status\n1,2,3,active\n4,5,6,churned\n";
        let ds = read_dataset_from_reader(text.as_bytes(), &LoaderConfig::default()).unwrap();
        assert_eq!(ds.feature_names, vec!["recency", "frequency", "weeks_since_signup"]);
        assert_eq!(ds.features.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(ds.labels, vec![0, 1]);
    }

    #[test]
    fn text_columns_become_indicators_after_numeric_ones() {
        let text = "recency,frequency,weeks_since_signup,status\n\
                    1,2,over 20,active\n\
                    4,5,0-5,churned\n\
                    7,8,over 20,active\n";
        let ds = read_dataset_from_reader(text.as_bytes(), &LoaderConfig::default()).unwrap();
        assert_eq!(
            ds.feature_names,
            vec![
                "recency",
                "frequency",
                "weeks_since_signup_0-5",
                "weeks_since_signup_over 20"
            ]
        );
        assert_eq!(ds.features.row(0).to_vec(), vec![1.0, 2.0, 0.0, 1.0]);
        assert_eq!(ds.features.row(1).to_vec(), vec![4.0, 5.0, 1.0, 0.0]);
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "recency,frequency,status\n1,2,active\n";
        let err = read_dataset_from_reader(text.as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("weeks_since_signup"));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let config = LoaderConfig {
            delimiter: '§',
            ..LoaderConfig::default()
        };
        let err = read_dataset_from_reader("a".as_bytes(), &config).unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }

    #[test]
    fn header_only_file_is_rejected() {
        let text = "recency,frequency,weeks_since_signup,status\n";
        assert!(read_dataset_from_reader(text.as_bytes(), &LoaderConfig::default()).is_err());
    }
}
