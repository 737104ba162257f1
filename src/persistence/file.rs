use super::{PersistenceError, PersistenceResult};
use crate::activity::{Activity, ActivityKind};
use crate::config::LayoutConfig;
use crate::layout::ScheduleLayout;
use crate::metadata::ScheduleMetadata;
use crate::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

const METADATA_ROW_MARKER: &str = "__metadata__";

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    metadata: ScheduleMetadata,
    #[serde(default)]
    config: LayoutConfig,
    activities: Vec<Activity>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &Schedule) -> PersistenceResult<Self> {
        super::validate_activities(schedule.activities())?;
        Ok(Self {
            metadata: schedule.metadata().clone(),
            config: schedule.config().clone(),
            activities: schedule.activities().to_vec(),
        })
    }

    fn into_schedule(self) -> PersistenceResult<Schedule> {
        super::validate_activities(&self.activities)?;
        self.config.validate()?;
        Ok(Schedule::from_parts(self.metadata, self.config, self.activities))
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(file)?;
    debug!(activities = snapshot.activities.len(), "loaded json snapshot");
    snapshot.into_schedule()
}

/// Writes the full renderer-facing layout.
pub fn save_layout_to_json<P: AsRef<Path>>(
    layout: &ScheduleLayout,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, layout)?;
    Ok(())
}

#[derive(Default, Serialize, Deserialize)]
struct ActivityCsvRecord {
    id: String,
    name: String,
    duration: f64,
    predecessors: String,
    kind: String,
    zone: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    config_json: String,
}

impl From<&Activity> for ActivityCsvRecord {
    fn from(activity: &Activity) -> Self {
        ActivityCsvRecord {
            id: activity.id.clone(),
            name: activity.name.clone(),
            duration: activity.duration,
            predecessors: activity.predecessors.join(";"),
            kind: activity.kind.as_str().to_string(),
            zone: activity.zone.clone().unwrap_or_default(),
            ..ActivityCsvRecord::default()
        }
    }
}

impl ActivityCsvRecord {
    fn metadata_row(schedule: &Schedule) -> PersistenceResult<Self> {
        Ok(ActivityCsvRecord {
            id: METADATA_ROW_MARKER.to_string(),
            metadata_json: serde_json::to_string(schedule.metadata())?,
            config_json: serde_json::to_string(schedule.config())?,
            ..ActivityCsvRecord::default()
        })
    }

    fn is_metadata_row(&self) -> bool {
        self.id == METADATA_ROW_MARKER
    }

    fn into_activity(self) -> PersistenceResult<Activity> {
        if self.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData(
                "activity row is missing an id".into(),
            ));
        }
        let kind = self
            .kind
            .parse::<ActivityKind>()
            .map_err(PersistenceError::InvalidData)?;
        let mut activity = Activity::new(self.id.trim(), self.name, self.duration).with_kind(kind);
        activity.predecessors = split_ids(&self.predecessors);
        activity.zone = parse_string_option(self.zone);
        Ok(activity)
    }
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(schedule: &Schedule, path: P) -> PersistenceResult<()> {
    super::validate_activities(schedule.activities())?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(ActivityCsvRecord::metadata_row(schedule)?)?;
    for activity in schedule.activities() {
        writer.serialize(ActivityCsvRecord::from(activity))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a CSV batch. The metadata row is optional, so plain spreadsheets
/// with just the activity columns load too.
pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut activities = Vec::new();
    let mut metadata: Option<ScheduleMetadata> = None;
    let mut config: Option<LayoutConfig> = None;

    for record in reader.deserialize::<ActivityCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            if metadata.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple metadata rows".into(),
                ));
            }
            metadata = Some(serde_json::from_str(&record.metadata_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid metadata json: {err}"))
            })?);
            if !record.config_json.trim().is_empty() {
                config = Some(serde_json::from_str(&record.config_json).map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid config json: {err}"))
                })?);
            }
            continue;
        }
        activities.push(record.into_activity()?);
    }

    super::validate_activities(&activities)?;
    let config = config.unwrap_or_default();
    config.validate()?;
    debug!(activities = activities.len(), "loaded csv batch");
    Ok(Schedule::from_parts(
        metadata.unwrap_or_default(),
        config,
        activities,
    ))
}

fn split_ids(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
