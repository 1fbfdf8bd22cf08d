//! Dataset access: typed rows, SQL-backed source, exploration, splitting

pub mod explore;
pub mod generator;
pub mod record;
pub mod source;
pub mod split;

pub use record::{PlantRecord, COLUMNS, FEATURE_COLUMNS, LABEL_COLUMN};
pub use source::PlantDataSource;
pub use split::train_test_split;
