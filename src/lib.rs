//! Schedule analysis for time-scaled activity-on-arrow network diagrams.
//!
//! [`solve`] runs the Critical Path Method over a batch of activities and
//! [`analyze`] additionally lays the solved activities out into zones and
//! lanes, classifying every dependency for the renderer. Both are pure
//! functions of their input.

pub mod activity;
pub(crate) mod activity_validation;
pub mod calculations;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod metadata;
pub mod persistence;
pub mod report;
pub mod schedule;
pub mod solver;

pub use activity::{Activity, ActivityKind, CpmTiming, SolvedActivity};
pub use config::LayoutConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use layout::{
    DependencyKind, DependencyLink, RowAssignment, ScheduleLayout, ZoneMetadata,
    classify_dependencies, pack_lanes, partition_zones,
};
pub use metadata::ScheduleMetadata;
pub use persistence::{
    PersistenceError, load_schedule_from_csv, load_schedule_from_json, save_layout_to_json,
    save_schedule_to_csv, save_schedule_to_json, validate_activities,
};
pub use schedule::{RefreshSummary, Schedule};
pub use solver::{CpmSolution, solve};

/// Solves the batch and computes the full diagram layout.
pub fn analyze(activities: &[Activity], config: &LayoutConfig) -> AnalysisResult<ScheduleLayout> {
    config.validate()?;
    let solution = solve(activities)?;
    layout::build_layout(solution, config)
}
