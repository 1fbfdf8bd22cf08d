//! SQL-backed access to the power plant CSV
//!
//! The raw file is registered with an explicit all-string schema (no
//! inference), then exposed through a typed view that casts every column
//! to double. Values that do not parse become NULL in the view and are
//! dropped by [`PlantDataSource::clean_records`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use datafusion::arrow::array::{Array, Float64Array, Int64Array};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::{CsvReadOptions, SessionConfig, SessionContext};
use tracing::debug;

use super::record::PlantRecord;

/// Raw CSV table: every column is Utf8, exactly as found on disk.
pub const RAW_TABLE: &str = "power_plant_raw";

/// Typed view over [`RAW_TABLE`] with all columns cast to double.
pub const TABLE: &str = "power_plant";

/// CSV header names, in file order.
const CSV_COLUMNS: [&str; 5] = ["AT", "V", "AP", "RH", "PE"];

/// A loaded dataset, queryable with SQL.
pub struct PlantDataSource {
    ctx: SessionContext,
}

impl std::fmt::Debug for PlantDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantDataSource").finish_non_exhaustive()
    }
}

impl PlantDataSource {
    /// Register the CSV at `path` and build the typed view over it.
    ///
    /// Fails if the file is missing or malformed. The session runs with a
    /// single target partition so the scan order is stable across runs.
    pub async fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("dataset not found: {}", path.display());
        }
        let path_str = path
            .to_str()
            .with_context(|| format!("non-UTF-8 dataset path: {}", path.display()))?;

        let config = SessionConfig::new()
            .with_target_partitions(1)
            .with_information_schema(true);
        let ctx = SessionContext::new_with_config(config);

        let schema = raw_schema();
        ctx.register_csv(
            RAW_TABLE,
            path_str,
            CsvReadOptions::new().has_header(true).schema(&schema),
        )
        .await
        .with_context(|| format!("failed to register CSV at {}", path.display()))?;

        let casts = CSV_COLUMNS
            .iter()
            .zip(super::record::COLUMNS.iter())
            .map(|(raw, typed)| format!("TRY_CAST(\"{raw}\" AS DOUBLE) AS {typed}"))
            .collect::<Vec<_>>()
            .join(", ");
        let ddl = format!("CREATE VIEW {TABLE} AS SELECT {casts} FROM {RAW_TABLE}");
        debug!(%ddl, "creating typed view");
        ctx.sql(&ddl)
            .await
            .context("failed to create the typed view")?;

        Ok(Self { ctx })
    }

    /// Execute a read-only query and collect its result batches.
    pub async fn sql(&self, query: &str) -> Result<Vec<RecordBatch>> {
        let df = self
            .ctx
            .sql(query)
            .await
            .with_context(|| format!("query failed: {query}"))?;
        df.collect().await.context("failed to collect query results")
    }

    /// Number of rows in the raw CSV.
    pub async fn raw_count(&self) -> Result<usize> {
        let batches = self.sql(&format!("SELECT COUNT(*) FROM {RAW_TABLE}")).await?;
        scalar_count(&batches)
    }

    /// Number of rows with all five columns parseable as numbers.
    pub async fn clean_count(&self) -> Result<usize> {
        let batches = self
            .sql(&format!(
                "SELECT COUNT(*) FROM {TABLE} WHERE {}",
                not_null_predicate()
            ))
            .await?;
        scalar_count(&batches)
    }

    /// Materialize the cleaned dataset: rows of the typed view where every
    /// column is non-NULL.
    pub async fn clean_records(&self) -> Result<Vec<PlantRecord>> {
        let query = format!(
            "SELECT temperature, vacuum, pressure, humidity, power FROM {TABLE} WHERE {}",
            not_null_predicate()
        );
        let batches = self.sql(&query).await?;

        let mut records = Vec::new();
        for batch in &batches {
            let columns: Vec<&Float64Array> = (0..batch.num_columns())
                .map(|i| {
                    batch
                        .column(i)
                        .as_any()
                        .downcast_ref::<Float64Array>()
                        .context("typed view column is not a double column")
                })
                .collect::<Result<_>>()?;

            for row in 0..batch.num_rows() {
                records.push(PlantRecord {
                    temperature: columns[0].value(row),
                    vacuum: columns[1].value(row),
                    pressure: columns[2].value(row),
                    humidity: columns[3].value(row),
                    power: columns[4].value(row),
                });
            }
        }

        Ok(records)
    }

    /// Column names and types of the typed view.
    pub async fn schema_fields(&self) -> Result<Vec<(String, String)>> {
        let df = self
            .ctx
            .table(TABLE)
            .await
            .context("typed view is not registered")?;
        Ok(df
            .schema()
            .fields()
            .iter()
            .map(|f| (f.name().clone(), f.data_type().to_string()))
            .collect())
    }
}

fn raw_schema() -> Schema {
    Schema::new(
        CSV_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}

fn not_null_predicate() -> String {
    super::record::COLUMNS
        .iter()
        .map(|c| format!("{c} IS NOT NULL"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn scalar_count(batches: &[RecordBatch]) -> Result<usize> {
    let batch = batches.first().context("count query returned no batches")?;
    let column = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .context("count query did not return an integer column")?;
    Ok(column.value(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plant.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        (dir, path)
    }

    const SAMPLE: &str = "AT,V,AP,RH,PE\n\
        14.96,41.76,1024.07,73.17,463.26\n\
        25.18,62.96,1020.04,59.08,444.37\n\
        not-a-number,39.4,1012.16,92.14,488.56\n";

    #[tokio::test]
    async fn test_counts_distinguish_raw_and_clean_rows() {
        let (_dir, path) = write_csv(SAMPLE);
        let source = PlantDataSource::from_csv(&path).await.unwrap();

        assert_eq!(source.raw_count().await.unwrap(), 3);
        assert_eq!(source.clean_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clean_records_drop_unparseable_rows() {
        let (_dir, path) = write_csv(SAMPLE);
        let source = PlantDataSource::from_csv(&path).await.unwrap();

        let records = source.clean_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].temperature, 14.96);
        assert_eq!(records[1].power, 444.37);
        assert!(records.iter().all(PlantRecord::is_clean));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        let err = PlantDataSource::from_csv(&missing).await.unwrap_err();
        assert!(err.to_string().contains("dataset not found"));
    }

    #[tokio::test]
    async fn test_schema_fields_are_all_double() {
        let (_dir, path) = write_csv(SAMPLE);
        let source = PlantDataSource::from_csv(&path).await.unwrap();

        let fields = source.schema_fields().await.unwrap();
        assert_eq!(fields.len(), 5);
        assert!(fields.iter().all(|(_, ty)| ty == "Float64"));
    }
}
