//! Tabular views of a computed layout, used by the CLI and by callers that
//! want to hand the result to DataFrame tooling.

use crate::layout::{RowAssignment, ScheduleLayout};
use crate::metadata::ScheduleMetadata;
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::collections::HashMap;

pub const LAYOUT_COLUMNS: [&str; 16] = [
    "id",
    "name",
    "kind",
    "zone",
    "duration",
    "early_start",
    "early_finish",
    "late_start",
    "late_finish",
    "total_float",
    "is_critical",
    "lane",
    "row",
    "predecessors",
    "start_date",
    "finish_date",
];

/// One row per activity, in input order.
pub fn layout_dataframe(
    layout: &ScheduleLayout,
    metadata: &ScheduleMetadata,
) -> PolarsResult<DataFrame> {
    let activities = &layout.solution.activities;
    let rows: HashMap<&str, &RowAssignment> = layout
        .rows
        .iter()
        .map(|row| (row.activity_id.as_str(), row))
        .collect();

    let height = activities.len();
    let mut ids: Vec<&str> = Vec::with_capacity(height);
    let mut names: Vec<&str> = Vec::with_capacity(height);
    let mut kinds: Vec<&str> = Vec::with_capacity(height);
    let mut zones: Vec<Option<&str>> = Vec::with_capacity(height);
    let mut durations: Vec<f64> = Vec::with_capacity(height);
    let mut early_start: Vec<f64> = Vec::with_capacity(height);
    let mut early_finish: Vec<f64> = Vec::with_capacity(height);
    let mut late_start: Vec<f64> = Vec::with_capacity(height);
    let mut late_finish: Vec<f64> = Vec::with_capacity(height);
    let mut total_float: Vec<f64> = Vec::with_capacity(height);
    let mut is_critical: Vec<bool> = Vec::with_capacity(height);
    let mut lanes: Vec<Option<u32>> = Vec::with_capacity(height);
    let mut global_rows: Vec<Option<u32>> = Vec::with_capacity(height);
    let mut predecessors: Vec<String> = Vec::with_capacity(height);
    let mut start_dates: Vec<Option<i32>> = Vec::with_capacity(height);
    let mut finish_dates: Vec<Option<i32>> = Vec::with_capacity(height);

    for solved in activities {
        let activity = &solved.activity;
        let timing = &solved.timing;
        let row = rows.get(activity.id.as_str());

        ids.push(activity.id.as_str());
        names.push(activity.name.as_str());
        kinds.push(activity.kind.as_str());
        zones.push(row.map(|r| r.zone.as_str()));
        durations.push(activity.duration);
        early_start.push(timing.early_start);
        early_finish.push(timing.early_finish);
        late_start.push(timing.late_start);
        late_finish.push(timing.late_finish);
        total_float.push(timing.total_float);
        is_critical.push(timing.is_critical);
        lanes.push(row.map(|r| r.lane_index as u32));
        global_rows.push(row.map(|r| r.global_row as u32));
        predecessors.push(activity.predecessors.join(","));
        start_dates.push(metadata.date_for_offset(timing.early_start).map(date_to_i32));
        finish_dates.push(metadata.date_for_offset(timing.early_finish).map(date_to_i32));
    }

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("zone"), zones).into_column(),
        Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
        Series::new(PlSmallStr::from_static("early_start"), early_start).into_column(),
        Series::new(PlSmallStr::from_static("early_finish"), early_finish).into_column(),
        Series::new(PlSmallStr::from_static("late_start"), late_start).into_column(),
        Series::new(PlSmallStr::from_static("late_finish"), late_finish).into_column(),
        Series::new(PlSmallStr::from_static("total_float"), total_float).into_column(),
        Series::new(PlSmallStr::from_static("is_critical"), is_critical).into_column(),
        Series::new(PlSmallStr::from_static("lane"), lanes).into_column(),
        Series::new(PlSmallStr::from_static("row"), global_rows).into_column(),
        Series::new(PlSmallStr::from_static("predecessors"), predecessors).into_column(),
        Series::new(PlSmallStr::from_static("start_date"), start_dates)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("finish_date"), finish_dates)
            .cast(&DataType::Date)?
            .into_column(),
    ];

    DataFrame::new(columns)
}

/// One row per classified predecessor edge.
pub fn dependency_dataframe(layout: &ScheduleLayout) -> PolarsResult<DataFrame> {
    let links = &layout.dependencies;
    let from: Vec<&str> = links.iter().map(|l| l.from.as_str()).collect();
    let to: Vec<&str> = links.iter().map(|l| l.to.as_str()).collect();
    let gap: Vec<f64> = links.iter().map(|l| l.gap).collect();
    let from_row: Vec<u32> = links.iter().map(|l| l.from_row as u32).collect();
    let to_row: Vec<u32> = links.iter().map(|l| l.to_row as u32).collect();
    let kind: Vec<&str> = links
        .iter()
        .map(|l| if l.is_free_float() { "free_float" } else { "contiguous" })
        .collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("from"), from).into_column(),
        Series::new(PlSmallStr::from_static("to"), to).into_column(),
        Series::new(PlSmallStr::from_static("gap"), gap).into_column(),
        Series::new(PlSmallStr::from_static("from_row"), from_row).into_column(),
        Series::new(PlSmallStr::from_static("to_row"), to_row).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kind).into_column(),
    ])
}

fn date_to_i32(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}
