//! End-to-end training pipeline
//!
//! Load → clean → split → assemble → fit → predict → evaluate, as one
//! batch run with fail-fast semantics at every step.

use std::path::PathBuf;

use anyhow::{bail, Result};
use ndarray::Axis;
use tracing::info;

use crate::data::record::FEATURE_COLUMNS;
use crate::data::source::PlantDataSource;
use crate::data::split::train_test_split;
use crate::features::assembler::{labels, VectorAssembler};
use crate::metrics::regression::RegressionMetrics;
use crate::models::linear::LinearRegression;

/// Pipeline parameters with their canonical defaults.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the power plant CSV.
    pub data_path: PathBuf,
    /// Seed for the train/test split.
    pub seed: u64,
    /// Fraction of cleaned rows used for training.
    pub train_fraction: f64,
    /// Gradient-descent epochs.
    pub max_iter: usize,
    /// L2 regularization strength.
    pub reg_param: f64,
    /// Gradient-descent step size.
    pub learning_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/power_plant.csv"),
            seed: 12345,
            train_fraction: 0.8,
            max_iter: 10,
            reg_param: 0.3,
            learning_rate: 0.1,
        }
    }
}

/// One evaluated test row: assembled features, model output, actual label.
#[derive(Debug, Clone)]
pub struct PredictionRecord {
    pub features: Vec<f64>,
    pub prediction: f64,
    pub true_label: f64,
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub raw_rows: usize,
    pub clean_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub model_summary: String,
    pub metrics: RegressionMetrics,
    pub predictions: Vec<PredictionRecord>,
}

/// Run the full pipeline once.
pub async fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    info!(path = %config.data_path.display(), "loading dataset");
    let source = PlantDataSource::from_csv(&config.data_path).await?;
    let raw_rows = source.raw_count().await?;
    let records = source.clean_records().await?;
    let clean_rows = records.len();
    info!(raw_rows, clean_rows, "dataset loaded");
    if records.is_empty() {
        bail!("dataset contains no usable rows");
    }

    let (train, test) = train_test_split(&records, config.train_fraction, config.seed)?;
    info!(
        train = train.len(),
        test = test.len(),
        seed = config.seed,
        "split dataset"
    );

    let assembler = VectorAssembler::new(&FEATURE_COLUMNS);
    let x_train = assembler.transform(&train)?;
    let y_train = labels(&train);
    let x_test = assembler.transform(&test)?;
    let y_test = labels(&test);

    let estimator = LinearRegression::new()
        .with_max_iter(config.max_iter)
        .with_reg_param(config.reg_param)
        .with_learning_rate(config.learning_rate)
        .with_feature_names(FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect());
    let model = estimator.fit(&x_train, &y_train)?;
    info!(
        max_iter = config.max_iter,
        reg_param = config.reg_param,
        "model fitted"
    );

    let predicted = model.predict(&x_test)?;
    let metrics = RegressionMetrics::calculate(&y_test, &predicted);
    info!(rmse = metrics.rmse, "evaluated on held-out rows");

    let predictions = x_test
        .axis_iter(Axis(0))
        .zip(predicted.iter())
        .zip(y_test.iter())
        .map(|((features, &prediction), &true_label)| PredictionRecord {
            features: features.to_vec(),
            prediction,
            true_label,
        })
        .collect();

    Ok(PipelineReport {
        raw_rows,
        clean_rows,
        train_rows: train.len(),
        test_rows: test.len(),
        model_summary: model.summary(),
        metrics,
        predictions,
    })
}
