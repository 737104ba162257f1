use crate::activity::{Activity, ActivityKind};
use crate::activity_validation;
use crate::config::LayoutConfig;
use crate::error::AnalysisResult;
use crate::layout::ScheduleLayout;
use crate::metadata::ScheduleMetadata;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub activity_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<String>,
    pub project_duration: f64,
    pub finish_date: Option<NaiveDate>,
    pub zone_count: usize,
    pub total_rows: usize,
    pub free_float_links: usize,
}

impl RefreshSummary {
    pub fn from_layout(layout: &ScheduleLayout, metadata: &ScheduleMetadata) -> Self {
        let solution = &layout.solution;
        let finish_date = if solution.activities.is_empty() {
            None
        } else {
            metadata.date_for_offset(solution.project_duration)
        };
        Self {
            activity_count: solution.activities.len(),
            critical_count: solution.critical_count(),
            critical_path: solution.critical_path.clone(),
            project_duration: solution.project_duration,
            finish_date,
            zone_count: layout.zones.len(),
            total_rows: layout.total_rows(),
            free_float_links: layout
                .dependencies
                .iter()
                .filter(|link| link.is_free_float())
                .count(),
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("activities={}", self.activity_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}", self.project_duration));
        if let Some(date) = self.finish_date {
            parts.push(format!("finish={}", date));
        }
        parts.push(format!("zones={}", self.zone_count));
        parts.push(format!("rows={}", self.total_rows));
        if self.free_float_links > 0 {
            parts.push(format!("waits={}", self.free_float_links));
        }
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}

/// Mutable working copy used by the editing layer. Analysis always runs over
/// a borrowed snapshot of the activities and keeps no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    metadata: ScheduleMetadata,
    config: LayoutConfig,
    activities: Vec<Activity>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_metadata(metadata: ScheduleMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        metadata: ScheduleMetadata,
        config: LayoutConfig,
        activities: Vec<Activity>,
    ) -> Self {
        Self {
            metadata,
            config,
            activities,
        }
    }

    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: ScheduleMetadata) {
        self.metadata = metadata;
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.metadata.project_name = name.into();
    }

    pub fn set_project_description(&mut self, description: impl Into<String>) {
        self.metadata.project_description = description.into();
    }

    pub fn set_project_start_date(&mut self, date: NaiveDate) {
        self.metadata.project_start_date = date;
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> AnalysisResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn find_activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    fn find_activity_mut(&mut self, id: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|activity| activity.id == id)
    }

    /// Inserts or updates name, duration and (when given) predecessors.
    /// Zone and kind of an existing activity are kept.
    pub fn upsert_activity(
        &mut self,
        id: &str,
        name: &str,
        duration: f64,
        predecessors: Option<Vec<String>>,
    ) -> AnalysisResult<()> {
        let mut activity = self
            .find_activity(id)
            .cloned()
            .unwrap_or_else(|| Activity::new(id, name, duration));
        activity.name = name.to_string();
        activity.duration = duration;
        if let Some(predecessors) = predecessors {
            activity.predecessors = predecessors;
        }
        self.upsert_activity_record(activity)
    }

    /// Replaces the activity with the same id, or appends it.
    pub fn upsert_activity_record(&mut self, activity: Activity) -> AnalysisResult<()> {
        activity_validation::validate_activity(&activity)?;
        match self.find_activity_mut(&activity.id) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
        Ok(())
    }

    /// Returns `false` when no such activity exists.
    pub fn set_zone(&mut self, id: &str, zone: Option<String>) -> bool {
        match self.find_activity_mut(id) {
            Some(activity) => {
                activity.zone = zone;
                true
            }
            None => false,
        }
    }

    pub fn set_kind(&mut self, id: &str, kind: ActivityKind) -> bool {
        match self.find_activity_mut(id) {
            Some(activity) => {
                activity.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Removes the activity and strips it from every predecessor list.
    pub fn delete_activity(&mut self, id: &str) -> bool {
        let before = self.activities.len();
        self.activities.retain(|activity| activity.id != id);
        if self.activities.len() == before {
            return false;
        }
        for activity in &mut self.activities {
            activity.predecessors.retain(|pred| pred != id);
        }
        true
    }

    pub fn next_id(&self) -> String {
        let next = self
            .activities
            .iter()
            .filter_map(|activity| activity.id.parse::<u64>().ok())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
        next.to_string()
    }

    pub fn analyze(&self) -> AnalysisResult<ScheduleLayout> {
        crate::analyze(&self.activities, &self.config)
    }

    pub fn refresh(&self) -> AnalysisResult<(ScheduleLayout, RefreshSummary)> {
        let layout = self.analyze()?;
        let summary = RefreshSummary::from_layout(&layout, &self.metadata);
        info!(summary = %summary.to_cli_summary(), "schedule refreshed");
        Ok((layout, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_inserts_and_updates() {
        let mut s = Schedule::new();
        s.upsert_activity("1", "Task A", 5.0, None).unwrap();
        assert_eq!(s.len(), 1);

        s.set_zone("1", Some("North".into()));
        s.upsert_activity("1", "Task A1", 7.0, Some(vec!["2".into()]))
            .unwrap();

        let a = s.find_activity("1").unwrap();
        assert_eq!(a.name, "Task A1");
        assert_eq!(a.duration, 7.0);
        assert_eq!(a.predecessors, vec!["2".to_string()]);
        assert_eq!(a.zone.as_deref(), Some("North"));
    }

    #[test]
    fn negative_duration_is_rejected_at_upsert() {
        let mut s = Schedule::new();
        assert!(s.upsert_activity("1", "Bad", -2.0, None).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn next_id_follows_numeric_ids() {
        let mut s = Schedule::new();
        assert_eq!(s.next_id(), "1");
        s.upsert_activity("7", "", 1.0, None).unwrap();
        s.upsert_activity("pour", "", 1.0, None).unwrap();
        assert_eq!(s.next_id(), "8");
    }
}
