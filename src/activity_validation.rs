use crate::activity::Activity;
use crate::error::{AnalysisError, AnalysisResult};
use std::collections::HashSet;
use tracing::warn;

pub fn validate_activity(activity: &Activity) -> AnalysisResult<()> {
    if !activity.duration.is_finite() || activity.duration < 0.0 {
        warn!(activity = %activity.id, duration = activity.duration, "rejecting duration");
        return Err(AnalysisError::InvalidDuration {
            activity: activity.id.clone(),
            duration: activity.duration,
        });
    }

    if activity.predecessors.iter().any(|pred| *pred == activity.id) {
        warn!(activity = %activity.id, "activity lists itself as a predecessor");
        return Err(AnalysisError::Cycle {
            activity: activity.id.clone(),
        });
    }

    Ok(())
}

/// Checks a whole batch before any timing is computed.
///
/// Ids must be unique, every duration must be valid and every predecessor must
/// name an activity in the same batch. Cycles spanning more than one activity
/// are left to the topological sort.
pub fn validate_activity_collection(activities: &[Activity]) -> AnalysisResult<()> {
    let mut seen_ids = HashSet::with_capacity(activities.len());
    for activity in activities {
        if !seen_ids.insert(activity.id.as_str()) {
            return Err(AnalysisError::DuplicateId(activity.id.clone()));
        }
        validate_activity(activity)?;
    }

    for activity in activities {
        for pred in &activity.predecessors {
            if !seen_ids.contains(pred.as_str()) {
                warn!(activity = %activity.id, predecessor = %pred, "unknown predecessor");
                return Err(AnalysisError::InvalidReference {
                    activity: activity.id.clone(),
                    predecessor: pred.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_accepted() {
        let milestone = Activity::new("M", "Handover", 0.0);
        assert!(validate_activity(&milestone).is_ok());
    }

    #[test]
    fn negative_and_nan_durations_are_rejected() {
        for duration in [-1.0, f64::NAN, f64::INFINITY] {
            let activity = Activity::new("A", "Bad", duration);
            assert!(matches!(
                validate_activity(&activity),
                Err(AnalysisError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let activity = Activity::new("A", "Loop", 1.0).with_predecessors(["A"]);
        assert_eq!(
            validate_activity(&activity),
            Err(AnalysisError::Cycle {
                activity: "A".into()
            })
        );
    }

    #[test]
    fn unknown_predecessor_is_reported() {
        let activities = vec![
            Activity::new("A", "Dig", 1.0),
            Activity::new("B", "Pour", 2.0).with_predecessors(["A", "Z"]),
        ];
        assert_eq!(
            validate_activity_collection(&activities),
            Err(AnalysisError::InvalidReference {
                activity: "B".into(),
                predecessor: "Z".into(),
            })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let activities = vec![Activity::new("A", "One", 1.0), Activity::new("A", "Two", 2.0)];
        assert_eq!(
            validate_activity_collection(&activities),
            Err(AnalysisError::DuplicateId("A".into()))
        );
    }
}
