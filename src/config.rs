use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZONE: &str = "Default";
pub const DEFAULT_CONTIGUITY_TOLERANCE: f64 = 0.01;
pub const DEFAULT_MIN_ZONE_ROWS: usize = 3;

/// Knobs for the layout stage. The CPM solver itself takes no configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Day tolerance when deciding that a finish and a start touch.
    pub contiguity_tolerance: f64,
    /// Rows reserved per zone even when fewer lanes are used.
    pub min_zone_rows: usize,
    /// Zone label given to activities without one.
    pub default_zone: String,
    /// Keep a chain on its predecessor's lane when timing allows. When off,
    /// lanes are assigned by plain first-fit.
    pub align_with_predecessors: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            contiguity_tolerance: DEFAULT_CONTIGUITY_TOLERANCE,
            min_zone_rows: DEFAULT_MIN_ZONE_ROWS,
            default_zone: DEFAULT_ZONE.to_string(),
            align_with_predecessors: true,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> AnalysisResult<()> {
        if !self.contiguity_tolerance.is_finite() || self.contiguity_tolerance < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "contiguity_tolerance must be a finite value >= 0 (got {})",
                self.contiguity_tolerance
            )));
        }
        Ok(())
    }

    pub fn zone_for<'a>(&'a self, zone: Option<&'a str>) -> &'a str {
        zone.unwrap_or(self.default_zone.as_str())
    }
}
