use crate::calculations::critical_path::snap_to_zero;
use crate::config::LayoutConfig;
use crate::layout::lanes::LanePlan;
use crate::solver::CpmSolution;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Successor starts as the predecessor finishes; drawn as a direct turn.
    Contiguous,
    /// Successor waits; drawn as a wait connector across the gap.
    FreeFloat,
}

/// One predecessor edge with what a renderer needs to route it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyLink {
    pub from: String,
    pub to: String,
    /// Days between the predecessor's early finish and the successor's early start.
    pub gap: f64,
    pub from_row: usize,
    pub to_row: usize,
    pub kind: DependencyKind,
}

impl DependencyLink {
    /// A contiguous link on a single row needs no connector at all.
    pub fn same_row(&self) -> bool {
        self.from_row == self.to_row
    }

    pub fn is_free_float(&self) -> bool {
        self.kind == DependencyKind::FreeFloat
    }
}

/// Classifies every distinct predecessor edge, in activity order and then
/// predecessor order.
pub fn classify_dependencies(
    solution: &CpmSolution,
    plan: &LanePlan,
    config: &LayoutConfig,
) -> Vec<DependencyLink> {
    let index = solution.index_by_id();
    let rows: HashMap<&str, usize> = plan
        .rows
        .iter()
        .map(|row| (row.activity_id.as_str(), row.global_row))
        .collect();

    let mut links = Vec::new();
    for solved in &solution.activities {
        let to_id = solved.activity.id.as_str();
        for pred_id in solved.activity.distinct_predecessors() {
            let (Some(&pred_idx), Some(&from_row), Some(&to_row)) =
                (index.get(pred_id), rows.get(pred_id), rows.get(to_id))
            else {
                continue;
            };
            let pred = &solution.activities[pred_idx];
            let gap = snap_to_zero(
                solved.timing.early_start - pred.timing.early_finish,
                solution.project_duration,
            )
            .max(0.0);
            let kind = if gap <= config.contiguity_tolerance {
                DependencyKind::Contiguous
            } else {
                DependencyKind::FreeFloat
            };
            links.push(DependencyLink {
                from: pred_id.to_string(),
                to: to_id.to_string(),
                gap,
                from_row,
                to_row,
                kind,
            });
        }
    }
    links
}
