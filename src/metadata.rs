use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub project_name: String,
    pub project_description: String,
    pub project_start_date: NaiveDate,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: "No description".to_string(),
            project_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        }
    }
}

impl ScheduleMetadata {
    /// Calendar date reached after `days` plain calendar days. Fractional days
    /// land on the day they fall within. `None` when the date is outside the
    /// range chrono can represent.
    pub fn date_for_offset(&self, days: f64) -> Option<NaiveDate> {
        if !days.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_days(days.floor() as i64)?;
        self.project_start_date.checked_add_signed(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_onto_calendar_days() {
        let metadata = ScheduleMetadata {
            project_start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            ..ScheduleMetadata::default()
        };
        assert_eq!(
            metadata.date_for_offset(0.0),
            Some(metadata.project_start_date)
        );
        assert_eq!(
            metadata.date_for_offset(30.5),
            NaiveDate::from_ymd_opt(2025, 3, 31)
        );
    }

    #[test]
    fn out_of_range_offsets_have_no_date() {
        let metadata = ScheduleMetadata::default();
        assert_eq!(metadata.date_for_offset(1.0e12), None);
        assert_eq!(metadata.date_for_offset(1.0e300), None);
        assert_eq!(metadata.date_for_offset(f64::INFINITY), None);
    }
}
