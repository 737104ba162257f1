//! Critical Path Method solver.
//!
//! The batch is validated, topologically sorted, then timed with one linear
//! forward pass and one linear backward pass. A cycle is reported before any
//! timing is produced, so a failed solve never yields partial results.

use crate::activity::{Activity, CpmTiming, SolvedActivity};
use crate::calculations::critical_path::{total_floats, trace_critical_path};
use crate::calculations::{BackwardPass, ForwardPass};
use crate::error::AnalysisResult;
use crate::graph::ActivityDag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmSolution {
    /// Solved activities in input order.
    pub activities: Vec<SolvedActivity>,
    pub project_duration: f64,
    /// Every zero-float activity, ordered by `(early_start, id)`.
    pub critical_ids: Vec<String>,
    /// One contiguous critical chain from project start to finish.
    pub critical_path: Vec<String>,
}

impl CpmSolution {
    pub fn get(&self, id: &str) -> Option<&SolvedActivity> {
        self.activities.iter().find(|solved| solved.activity.id == id)
    }

    /// Lookup table from id to position in [`CpmSolution::activities`].
    pub fn index_by_id(&self) -> HashMap<&str, usize> {
        self.activities
            .iter()
            .enumerate()
            .map(|(idx, solved)| (solved.activity.id.as_str(), idx))
            .collect()
    }

    pub fn critical_count(&self) -> usize {
        self.critical_ids.len()
    }
}

pub fn solve(activities: &[Activity]) -> AnalysisResult<CpmSolution> {
    let dag = ActivityDag::build(activities)?;

    let early = ForwardPass::new(&dag).execute();
    let late = BackwardPass::new(&dag).execute(early.project_duration);
    let floats = total_floats(&early, &late);
    let critical_path = trace_critical_path(&dag, &early, &floats);

    let solved: Vec<SolvedActivity> = activities
        .iter()
        .enumerate()
        .map(|(idx, activity)| {
            // Late times are restated from the snapped float so residue never
            // puts a late start ahead of its early start.
            let (early_start, early_finish, total_float) =
                (early.early_start[idx], early.early_finish[idx], floats[idx]);
            SolvedActivity {
                activity: activity.clone(),
                timing: CpmTiming {
                    early_start,
                    early_finish,
                    late_start: early_start + total_float,
                    late_finish: early_finish + total_float,
                    total_float,
                    is_critical: total_float == 0.0,
                },
            }
        })
        .collect();

    let mut critical: Vec<(f64, &str)> = solved
        .iter()
        .filter(|s| s.timing.is_critical)
        .map(|s| (s.timing.early_start, s.activity.id.as_str()))
        .collect();
    critical.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    let critical_ids = critical.into_iter().map(|(_, id)| id.to_string()).collect::<Vec<_>>();

    debug!(
        activities = solved.len(),
        critical = critical_ids.len(),
        project_duration = early.project_duration,
        "cpm solve complete"
    );

    Ok(CpmSolution {
        activities: solved,
        project_duration: early.project_duration,
        critical_ids,
        critical_path,
    })
}
