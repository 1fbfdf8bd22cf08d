//! # Power Plant ML - Predicting Plant Output from Ambient Conditions
//!
//! This library implements a batch regression pipeline over the combined
//! cycle power plant dataset:
//!
//! - SQL-backed CSV loading and exploration (DataFusion)
//! - Seeded train/test splitting
//! - Fixed-order feature vector assembly
//! - Gradient-descent linear regression with L2 regularization
//! - RMSE evaluation on held-out rows

pub mod data;
pub mod features;
pub mod metrics;
pub mod models;
pub mod pipeline;

pub use data::record::PlantRecord;
pub use data::source::PlantDataSource;
pub use features::assembler::VectorAssembler;
pub use metrics::regression::RegressionMetrics;
pub use models::linear::{LinearRegression, LinearRegressionModel};
pub use pipeline::{PipelineConfig, PipelineReport};
