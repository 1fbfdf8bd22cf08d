//! Read-only exploration queries over the typed table
//!
//! Everything here is a SQL round trip; nothing is cached or mutated.

use anyhow::{Context, Result};
use datafusion::arrow::array::{Array, Float64Array, Int64Array};
use datafusion::arrow::util::pretty::pretty_format_batches;

use super::record::{COLUMNS, FEATURE_COLUMNS, LABEL_COLUMN};
use super::source::{PlantDataSource, TABLE};

/// Descriptive statistics for one column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-column count / mean / stddev / min / max.
pub async fn describe(source: &PlantDataSource) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::with_capacity(COLUMNS.len());

    for column in COLUMNS {
        let query = format!(
            "SELECT COUNT({column}), AVG({column}), STDDEV({column}), \
             MIN({column}), MAX({column}) FROM {TABLE}"
        );
        let batches = source.sql(&query).await?;
        let batch = batches
            .first()
            .with_context(|| format!("no statistics returned for {column}"))?;

        let count = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("COUNT did not return an integer column")?
            .value(0) as usize;
        let mut stats = [0.0; 4];
        for (i, stat) in stats.iter_mut().enumerate() {
            *stat = batch
                .column(i + 1)
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("statistic is not a double column")?
                .value(0);
        }

        summaries.push(ColumnSummary {
            column: column.to_string(),
            count,
            mean: stats[0],
            stddev: stats[1],
            min: stats[2],
            max: stats[3],
        });
    }

    Ok(summaries)
}

/// Pearson correlation of each feature column with the label.
pub async fn label_correlations(source: &PlantDataSource) -> Result<Vec<(String, f64)>> {
    let mut correlations = Vec::with_capacity(FEATURE_COLUMNS.len());

    for feature in FEATURE_COLUMNS {
        let query = format!("SELECT CORR({feature}, {LABEL_COLUMN}) FROM {TABLE}");
        let batches = source.sql(&query).await?;
        let batch = batches
            .first()
            .with_context(|| format!("no correlation returned for {feature}"))?;
        let value = batch
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("CORR did not return a double column")?
            .value(0);

        correlations.push((feature.to_string(), value));
    }

    Ok(correlations)
}

/// First `limit` rows of the typed table as a text table.
pub async fn preview(source: &PlantDataSource, limit: usize) -> Result<String> {
    let batches = source
        .sql(&format!("SELECT * FROM {TABLE} LIMIT {limit}"))
        .await?;
    Ok(pretty_format_batches(&batches)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::write_sample_csv;

    async fn sample_source(dir: &tempfile::TempDir) -> PlantDataSource {
        let path = dir.path().join("plant.csv");
        write_sample_csv(&path, 200, 7).unwrap();
        PlantDataSource::from_csv(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_describe_covers_every_column() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source(&dir).await;

        let summaries = describe(&source).await.unwrap();
        assert_eq!(summaries.len(), COLUMNS.len());
        for summary in &summaries {
            assert_eq!(summary.count, 200);
            assert!(summary.min <= summary.mean && summary.mean <= summary.max);
            assert!(summary.stddev >= 0.0);
        }
    }

    #[tokio::test]
    async fn test_temperature_correlates_negatively_with_power() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source(&dir).await;

        let correlations = label_correlations(&source).await.unwrap();
        assert_eq!(correlations.len(), FEATURE_COLUMNS.len());
        for (_, r) in &correlations {
            assert!((-1.0..=1.0).contains(r));
        }
        // The plant produces less power on hot days.
        let (_, temperature_r) = &correlations[0];
        assert!(*temperature_r < 0.0);
    }

    #[tokio::test]
    async fn test_preview_renders_a_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = sample_source(&dir).await;

        let table = preview(&source, 5).await.unwrap();
        assert!(table.contains("temperature"));
        assert!(table.contains("power"));
    }
}
