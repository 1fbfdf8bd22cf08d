//! Feature vector assembly
//!
//! Concatenates a fixed ordered list of record columns into one numeric
//! vector per row, producing the matrix consumed by the regression model.

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::data::record::{PlantRecord, LABEL_COLUMN};

/// Errors that can occur while assembling feature vectors
#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("unknown input column: {0}")]
    UnknownColumn(String),

    #[error("non-finite value in column {column} at row {row}")]
    InvalidValue { row: usize, column: String },
}

/// What to do with rows containing non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidPolicy {
    /// Pass non-finite values through unchanged.
    #[default]
    Keep,
    /// Drop rows containing non-finite values.
    Skip,
    /// Fail on the first non-finite value.
    Error,
}

/// Assembles an ordered list of columns into a feature matrix.
#[derive(Debug, Clone)]
pub struct VectorAssembler {
    input_cols: Vec<String>,
    policy: InvalidPolicy,
}

impl VectorAssembler {
    /// Create an assembler over `input_cols`, in order.
    pub fn new<S: AsRef<str>>(input_cols: &[S]) -> Self {
        Self {
            input_cols: input_cols.iter().map(|s| s.as_ref().to_string()).collect(),
            policy: InvalidPolicy::default(),
        }
    }

    /// Set the policy for non-finite values.
    pub fn with_invalid_policy(mut self, policy: InvalidPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Length of every assembled vector.
    pub fn output_len(&self) -> usize {
        self.input_cols.len()
    }

    /// Build the feature matrix, one row per record.
    ///
    /// Pure transform: the input records are not modified. Under
    /// [`InvalidPolicy::Skip`] the output may have fewer rows than the
    /// input; under the other policies row counts always match.
    pub fn transform(&self, records: &[PlantRecord]) -> Result<Array2<f64>, AssemblerError> {
        let width = self.input_cols.len();
        let mut values = Vec::with_capacity(records.len() * width);
        let mut rows = 0usize;

        for (row, record) in records.iter().enumerate() {
            let mut vector = Vec::with_capacity(width);
            for name in &self.input_cols {
                let value = record
                    .field(name)
                    .ok_or_else(|| AssemblerError::UnknownColumn(name.clone()))?;
                vector.push(value);
            }

            if let Some(bad) = vector.iter().position(|v| !v.is_finite()) {
                match self.policy {
                    InvalidPolicy::Keep => {}
                    InvalidPolicy::Skip => continue,
                    InvalidPolicy::Error => {
                        return Err(AssemblerError::InvalidValue {
                            row,
                            column: self.input_cols[bad].clone(),
                        });
                    }
                }
            }

            values.extend_from_slice(&vector);
            rows += 1;
        }

        Ok(Array2::from_shape_vec((rows, width), values)
            .expect("row-major buffer matches the assembled shape"))
    }
}

/// Extract the label column as a vector.
pub fn labels(records: &[PlantRecord]) -> Array1<f64> {
    debug_assert!(records.iter().all(|r| r.field(LABEL_COLUMN).is_some()));
    Array1::from_iter(records.iter().map(|r| r.power))
}
