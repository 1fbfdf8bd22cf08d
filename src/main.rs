//! Power plant output regression CLI
//!
//! Subcommands:
//! ```bash
//! powerplant-ml generate --output data/power_plant.csv
//! powerplant-ml explore --data data/power_plant.csv
//! powerplant-ml sql --data data/power_plant.csv "SELECT COUNT(*) FROM power_plant"
//! powerplant-ml train --data data/power_plant.csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use datafusion::arrow::util::pretty::pretty_format_batches;
use powerplant_ml::data::explore;
use powerplant_ml::data::generator::write_sample_csv;
use powerplant_ml::data::source::PlantDataSource;
use powerplant_ml::pipeline::{self, PipelineConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "powerplant-ml")]
#[command(about = "Linear regression over the combined cycle power plant dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic sample dataset
    Generate {
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of rows to generate
        #[arg(short, long, default_value = "9568")]
        rows: usize,

        /// Generator seed
        #[arg(short, long, default_value = "12345")]
        seed: u64,
    },

    /// Print schema, preview rows and descriptive statistics
    Explore {
        /// Path to the power plant CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Number of rows to preview
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Run one SQL query against the dataset
    Sql {
        /// Path to the power plant CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Query over the power_plant (typed) or power_plant_raw table
        query: String,
    },

    /// Train the regression model and report RMSE on held-out rows
    Train {
        /// Path to the power plant CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Split seed
        #[arg(short, long, default_value = "12345")]
        seed: u64,

        /// Fraction of cleaned rows used for training
        #[arg(long, default_value = "0.8")]
        train_fraction: f64,

        /// Gradient-descent epochs
        #[arg(long, default_value = "10")]
        max_iter: usize,

        /// L2 regularization strength
        #[arg(long, default_value = "0.3")]
        reg_param: f64,

        /// Gradient-descent step size
        #[arg(long, default_value = "0.1")]
        learning_rate: f64,

        /// Number of sample predictions to print
        #[arg(long, default_value = "10")]
        show_predictions: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, rows, seed } => {
            write_sample_csv(&output, rows, seed)?;
            info!(rows, seed, "sample dataset written");
            println!("Wrote {} rows to {}", rows, output.display());
        }

        Commands::Explore { data, limit } => {
            let source = PlantDataSource::from_csv(&data).await?;

            println!("{}", "Dataset Summary".bold());
            println!("===============");
            println!("File:       {}", data.display());
            println!("Raw rows:   {}", source.raw_count().await?);
            println!("Clean rows: {}", source.clean_count().await?);

            println!("\n{}", "Schema".bold());
            for (name, ty) in source.schema_fields().await? {
                println!("  {:<12} {}", name, ty);
            }

            println!("\n{}", "Preview".bold());
            println!("{}", explore::preview(&source, limit).await?);

            println!("\n{}", "Column Statistics".bold());
            println!(
                "{:>12} {:>8} {:>10} {:>10} {:>10} {:>10}",
                "column", "count", "mean", "stddev", "min", "max"
            );
            for s in explore::describe(&source).await? {
                println!(
                    "{:>12} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    s.column, s.count, s.mean, s.stddev, s.min, s.max
                );
            }

            println!("\n{}", "Correlation with power".bold());
            for (feature, r) in explore::label_correlations(&source).await? {
                println!("  {:<12} {:>8.4}", feature, r);
            }
        }

        Commands::Sql { data, query } => {
            let source = PlantDataSource::from_csv(&data).await?;
            let batches = source.sql(&query).await?;
            println!("{}", pretty_format_batches(&batches)?);
        }

        Commands::Train {
            data,
            seed,
            train_fraction,
            max_iter,
            reg_param,
            learning_rate,
            show_predictions,
        } => {
            let config = PipelineConfig {
                data_path: data,
                seed,
                train_fraction,
                max_iter,
                reg_param,
                learning_rate,
            };
            let report = pipeline::run(&config).await?;

            println!("{}", "Pipeline Summary".bold());
            println!("================");
            println!("Raw rows:   {}", report.raw_rows);
            println!("Clean rows: {}", report.clean_rows);
            println!("Train rows: {}", report.train_rows);
            println!("Test rows:  {}", report.test_rows);

            println!("\n{}", report.model_summary);

            println!("{}", "Model Performance".bold());
            println!("=================");
            println!(
                "RMSE: {}",
                format!("{:.4}", report.metrics.rmse).green().bold()
            );
            println!("MSE:  {:.4}", report.metrics.mse);
            println!("MAE:  {:.4}", report.metrics.mae);
            println!("R²:   {:.4}", report.metrics.r2);

            if show_predictions > 0 {
                println!("\n{}", "Sample Predictions".bold());
                println!(
                    "{:>8} {:>8} {:>10} {:>10} {:>11} {:>10}",
                    "temp", "vacuum", "pressure", "humidity", "predicted", "actual"
                );
                for p in report.predictions.iter().take(show_predictions) {
                    println!(
                        "{:>8.2} {:>8.2} {:>10.2} {:>10.2} {:>11.2} {:>10.2}",
                        p.features[0],
                        p.features[1],
                        p.features[2],
                        p.features[3],
                        p.prediction,
                        p.true_label
                    );
                }
            }
        }
    }

    Ok(())
}
