//! Lane packing layout for a time-scaled network diagram.
//!
//! Solved activities are grouped into zones, each zone is packed into
//! non-overlapping lanes, and every predecessor edge is classified so the
//! renderer knows whether to draw a direct turn or a wait connector.

pub mod dependencies;
pub mod lanes;
pub mod zones;

pub use dependencies::{DependencyKind, DependencyLink, classify_dependencies};
pub use lanes::{LanePlan, RowAssignment, ZoneMetadata, pack_lanes};
pub use zones::{ZoneGroup, partition_zones};

use crate::config::LayoutConfig;
use crate::error::AnalysisResult;
use crate::solver::CpmSolution;
use serde::{Deserialize, Serialize};

/// Everything the renderer consumes for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleLayout {
    pub solution: CpmSolution,
    pub zones: Vec<ZoneMetadata>,
    pub rows: Vec<RowAssignment>,
    pub dependencies: Vec<DependencyLink>,
}

impl ScheduleLayout {
    pub fn row_of(&self, activity_id: &str) -> Option<&RowAssignment> {
        self.rows.iter().find(|row| row.activity_id == activity_id)
    }

    pub fn zone(&self, name: &str) -> Option<&ZoneMetadata> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    pub fn total_rows(&self) -> usize {
        self.zones.last().map(ZoneMetadata::end_row).unwrap_or(0)
    }

    pub fn project_duration(&self) -> f64 {
        self.solution.project_duration
    }
}

pub fn build_layout(solution: CpmSolution, config: &LayoutConfig) -> AnalysisResult<ScheduleLayout> {
    config.validate()?;
    let zones = partition_zones(&solution, config);
    let plan = pack_lanes(&solution, &zones, config);
    let dependencies = classify_dependencies(&solution, &plan, config);

    Ok(ScheduleLayout {
        solution,
        zones: plan.zones,
        rows: plan.rows,
        dependencies,
    })
}
