use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use schedule_layout::report::{dependency_dataframe, layout_dataframe};
use schedule_layout::{
    ActivityKind, Schedule, ScheduleLayout, load_schedule_from_csv, load_schedule_from_json,
    logging, save_layout_to_json, save_schedule_to_csv, save_schedule_to_json,
};
use std::io::{self, Write};

fn parse_pred_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect::<Vec<_>>();
        cells.push(row);
    }

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(value.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn activities_dataframe(schedule: &Schedule) -> PolarsResult<DataFrame> {
    let activities = schedule.activities();
    let ids: Vec<&str> = activities.iter().map(|a| a.id.as_str()).collect();
    let names: Vec<&str> = activities.iter().map(|a| a.name.as_str()).collect();
    let durations: Vec<f64> = activities.iter().map(|a| a.duration).collect();
    let preds: Vec<String> = activities.iter().map(|a| a.predecessors.join(",")).collect();
    let kinds: Vec<&str> = activities.iter().map(|a| a.kind.as_str()).collect();
    let zones: Vec<Option<&str>> = activities.iter().map(|a| a.zone_label()).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
        Series::new(PlSmallStr::from_static("predecessors"), preds).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("zone"), zones).into_column(),
    ])
}

fn zones_dataframe(layout: &ScheduleLayout) -> PolarsResult<DataFrame> {
    let names: Vec<&str> = layout.zones.iter().map(|z| z.name.as_str()).collect();
    let start: Vec<u32> = layout.zones.iter().map(|z| z.start_row as u32).collect();
    let count: Vec<u32> = layout.zones.iter().map(|z| z.row_count as u32).collect();
    let used: Vec<u32> = layout.zones.iter().map(|z| z.lanes_used as u32).collect();
    let end: Vec<u32> = layout.zones.iter().map(|z| z.end_row() as u32).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("zone"), names).into_column(),
        Series::new(PlSmallStr::from_static("start_row"), start).into_column(),
        Series::new(PlSmallStr::from_static("row_count"), count).into_column(),
        Series::new(PlSmallStr::from_static("lanes_used"), used).into_column(),
        Series::new(PlSmallStr::from_static("end_row"), end).into_column(),
    ])
}

fn print_frame(frame: PolarsResult<DataFrame>) {
    match frame {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Table error: {}", e),
    }
}

fn print_activities(schedule: &Schedule) {
    print_frame(activities_dataframe(schedule));
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current activities\n  new                                Append empty activity with next id\n  add <id> <name> <duration> [preds_csv]\n                                     Upsert an activity (preds like A,B)\n  zone <id> <zone|->                 Set or clear the zone of an activity\n  kind <id> <real|virtual|milestone> Set the activity kind\n  delete <id>                        Delete an activity and clean up dependencies\n  compute                            Solve CPM and lay out lanes\n  layout                             Show zone rows\n  links                              Show dependency classification\n  meta show                          Show project metadata\n  meta name <text...>                Update project name\n  meta desc <text...>                Update project description\n  meta start <YYYY-MM-DD>            Update project start date\n  save <json|csv> <path>             Persist activities to disk\n  load <json|csv> <path>             Load activities from disk\n  export <path>                      Write the computed layout as JSON\n  quit|exit                          Exit"
    );
}

fn print_metadata(schedule: &Schedule) {
    let metadata = schedule.metadata();
    println!("Project name       : {}", metadata.project_name);
    println!("Project description: {}", metadata.project_description);
    println!("Project start date : {}", metadata.project_start_date);
}

fn rest_of_line<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn main() {
    logging::init_logging();
    let mut schedule = Schedule::new();

    println!("Schedule Layout (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_activities(&schedule),
            "new" => {
                let id = schedule.next_id();
                match schedule.upsert_activity(&id, "", 0.0, None) {
                    Ok(()) => {
                        println!("Added empty activity id={}", id);
                        print_activities(&schedule);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "add" => {
                let id_s = parts.next();
                let name_s = parts.next();
                let dur_s = parts.next();
                let preds_s = parts.next();
                match (id_s, name_s, dur_s) {
                    (Some(id), Some(name), Some(dur_s)) => {
                        let duration: f64 = match dur_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid duration");
                                continue;
                            }
                        };
                        let preds = preds_s.map(parse_pred_list);
                        match schedule.upsert_activity(id, name, duration, preds) {
                            Ok(()) => {
                                println!("Activity upserted.");
                                print_activities(&schedule);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: add <id> <name> <duration> [preds_csv]"),
                }
            }
            "zone" => match (parts.next(), parts.next()) {
                (Some(id), Some(zone)) => {
                    let zone = if zone == "-" {
                        None
                    } else {
                        Some(zone.to_string())
                    };
                    if schedule.set_zone(id, zone) {
                        println!("Zone updated for {id}.");
                    } else {
                        println!("Activity {id} not found.");
                    }
                }
                _ => println!("Usage: zone <id> <zone|->"),
            },
            "kind" => match (parts.next(), parts.next()) {
                (Some(id), Some(kind_s)) => match kind_s.parse::<ActivityKind>() {
                    Ok(kind) => {
                        if schedule.set_kind(id, kind) {
                            println!("Kind of {id} set to {kind}.");
                        } else {
                            println!("Activity {id} not found.");
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: kind <id> <real|virtual|milestone>"),
            },
            "delete" => match parts.next() {
                Some(id) => {
                    if schedule.delete_activity(id) {
                        println!("Deleted activity {id}.");
                        print_activities(&schedule);
                    } else {
                        println!("Activity {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "compute" => match schedule.refresh() {
                Ok((layout, summary)) => {
                    println!("Refreshed ({})", summary.to_cli_summary());
                    print_frame(layout_dataframe(&layout, schedule.metadata()));
                }
                Err(e) => println!("Analysis error: {}", e),
            },
            "layout" => match schedule.analyze() {
                Ok(layout) => print_frame(zones_dataframe(&layout)),
                Err(e) => println!("Analysis error: {}", e),
            },
            "links" => match schedule.analyze() {
                Ok(layout) => print_frame(dependency_dataframe(&layout)),
                Err(e) => println!("Analysis error: {}", e),
            },
            "meta" => match parts.next() {
                Some("show") => print_metadata(&schedule),
                Some("name") => {
                    schedule.set_project_name(rest_of_line(parts));
                    println!("Project name updated.");
                }
                Some("desc") => {
                    schedule.set_project_description(rest_of_line(parts));
                    println!("Project description updated.");
                }
                Some("start") => match parts.next().map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
                    Some(Ok(date)) => {
                        schedule.set_project_start_date(date);
                        println!("Project start date set to {date}.");
                    }
                    Some(Err(_)) => println!("Invalid date (YYYY-MM-DD)"),
                    None => println!("Usage: meta start <YYYY-MM-DD>"),
                },
                _ => println!("Usage: meta <show|name|desc|start> ..."),
            },
            "save" => match (parts.next(), parts.next()) {
                (Some(format), Some(path)) => {
                    let result = match format {
                        "json" => save_schedule_to_json(&schedule, path),
                        "csv" => save_schedule_to_csv(&schedule, path),
                        _ => {
                            println!("Unknown format '{format}' (expected json or csv)");
                            continue;
                        }
                    };
                    match result {
                        Ok(()) => println!("Schedule saved to {path}."),
                        Err(e) => println!("Save error: {}", e),
                    }
                }
                _ => println!("Usage: save <json|csv> <path>"),
            },
            "load" => match (parts.next(), parts.next()) {
                (Some(format), Some(path)) => {
                    let result = match format {
                        "json" => load_schedule_from_json(path),
                        "csv" => load_schedule_from_csv(path),
                        _ => {
                            println!("Unknown format '{format}' (expected json or csv)");
                            continue;
                        }
                    };
                    match result {
                        Ok(loaded) => {
                            schedule = loaded;
                            println!("Schedule loaded from {path}.");
                        }
                        Err(e) => println!("Load error: {}", e),
                    }
                }
                _ => println!("Usage: load <json|csv> <path>"),
            },
            "export" => match parts.next() {
                Some(path) => match schedule.analyze() {
                    Ok(layout) => match save_layout_to_json(&layout, path) {
                        Ok(()) => println!("Layout exported to {path}."),
                        Err(e) => println!("Export error: {}", e),
                    },
                    Err(e) => println!("Analysis error: {}", e),
                },
                None => println!("Usage: export <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
