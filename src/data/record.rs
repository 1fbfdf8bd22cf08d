//! Core row type for the power plant dataset
//!
//! The CSV on disk uses the abbreviated sensor column names (`AT`, `V`,
//! `AP`, `RH`, `PE`); everywhere else the descriptive names below are used.

use serde::{Deserialize, Serialize};

/// Columns of the typed table, in CSV order.
pub const COLUMNS: [&str; 5] = ["temperature", "vacuum", "pressure", "humidity", "power"];

/// Feature columns, in the fixed order used to assemble vectors.
pub const FEATURE_COLUMNS: [&str; 4] = ["temperature", "vacuum", "pressure", "humidity"];

/// Label column: net hourly electrical output.
pub const LABEL_COLUMN: &str = "power";

/// One hourly observation of the plant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    /// Ambient temperature, degrees Celsius
    #[serde(rename = "AT")]
    pub temperature: f64,
    /// Exhaust vacuum, cm Hg
    #[serde(rename = "V")]
    pub vacuum: f64,
    /// Ambient pressure, millibar
    #[serde(rename = "AP")]
    pub pressure: f64,
    /// Relative humidity, percent
    #[serde(rename = "RH")]
    pub humidity: f64,
    /// Net hourly electrical output, MW
    #[serde(rename = "PE")]
    pub power: f64,
}

impl PlantRecord {
    /// Look up an attribute by typed-table column name.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "temperature" => Some(self.temperature),
            "vacuum" => Some(self.vacuum),
            "pressure" => Some(self.pressure),
            "humidity" => Some(self.humidity),
            "power" => Some(self.power),
            _ => None,
        }
    }

    /// True when every attribute is a finite number.
    pub fn is_clean(&self) -> bool {
        COLUMNS
            .iter()
            .filter_map(|name| self.field(name))
            .all(f64::is_finite)
    }
}
