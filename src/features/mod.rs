//! Feature engineering for the regression pipeline

pub mod assembler;

pub use assembler::{labels, InvalidPolicy, VectorAssembler};
