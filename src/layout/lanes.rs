use crate::config::LayoutConfig;
use crate::layout::zones::ZoneGroup;
use crate::solver::CpmSolution;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Where one activity is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAssignment {
    pub activity_id: String,
    pub zone: String,
    pub lane_index: usize,
    /// Unique across all zones.
    pub global_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMetadata {
    pub name: String,
    pub start_row: usize,
    /// Never below the configured minimum, even when fewer lanes are used.
    pub row_count: usize,
    pub lanes_used: usize,
}

impl ZoneMetadata {
    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanePlan {
    pub zones: Vec<ZoneMetadata>,
    /// Zone by zone, each zone in packing order.
    pub rows: Vec<RowAssignment>,
}

impl LanePlan {
    pub fn row_of(&self, activity_id: &str) -> Option<&RowAssignment> {
        self.rows.iter().find(|row| row.activity_id == activity_id)
    }

    pub fn total_rows(&self) -> usize {
        self.zones.last().map(ZoneMetadata::end_row).unwrap_or(0)
    }
}

/// Packs every zone into lanes and stacks the zones into global rows.
pub fn pack_lanes(solution: &CpmSolution, zones: &[ZoneGroup], config: &LayoutConfig) -> LanePlan {
    let mut plan = LanePlan::default();
    let mut start_row = 0usize;

    for zone in zones {
        let lanes = pack_zone(solution, zone, config);
        let lanes_used = lanes.iter().map(|(_, lane)| lane + 1).max().unwrap_or(0);
        let row_count = lanes_used.max(config.min_zone_rows);

        for (idx, lane_index) in lanes {
            plan.rows.push(RowAssignment {
                activity_id: solution.activities[idx].activity.id.clone(),
                zone: zone.name.clone(),
                lane_index,
                global_row: start_row + lane_index,
            });
        }

        debug!(zone = %zone.name, lanes_used, row_count, start_row, "zone packed");
        plan.zones.push(ZoneMetadata {
            name: zone.name.clone(),
            start_row,
            row_count,
            lanes_used,
        });
        start_row += row_count;
    }

    plan
}

/// Lane index per member, in packing order.
fn pack_zone(solution: &CpmSolution, zone: &ZoneGroup, config: &LayoutConfig) -> Vec<(usize, usize)> {
    let tolerance = config.contiguity_tolerance;
    let activities = &solution.activities;

    let mut order = zone.members.clone();
    order.sort_by(|&a, &b| {
        let (a, b) = (&activities[a], &activities[b]);
        a.timing
            .early_start
            .total_cmp(&b.timing.early_start)
            .then_with(|| a.activity.id.cmp(&b.activity.id))
    });

    // Latest early finish of each lane's occupant
    let mut lane_finish: Vec<f64> = Vec::new();
    let mut placed: HashMap<&str, (usize, f64)> = HashMap::with_capacity(order.len());
    let mut result = Vec::with_capacity(order.len());

    for idx in order {
        let solved = &activities[idx];
        let start = solved.timing.early_start;
        let is_free = |lane: usize| lane_finish[lane] <= start + tolerance;

        let aligned = if config.align_with_predecessors {
            solved
                .activity
                .distinct_predecessors()
                .into_iter()
                .filter_map(|pred| placed.get(pred).copied())
                .filter(|&(_, pred_finish)| (pred_finish - start).abs() <= tolerance)
                .map(|(lane, _)| lane)
                .find(|&lane| is_free(lane))
        } else {
            None
        };

        let fitted = aligned.or_else(|| (0..lane_finish.len()).find(|&lane| is_free(lane)));
        let lane = match fitted {
            Some(lane) => lane,
            None => {
                lane_finish.push(0.0);
                lane_finish.len() - 1
            }
        };

        lane_finish[lane] = solved.timing.early_finish;
        placed.insert(solved.activity.id.as_str(), (lane, solved.timing.early_finish));
        result.push((idx, lane));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;
    use crate::layout::zones::partition_zones;
    use crate::solver::solve;

    fn plan_for(activities: &[Activity], config: &LayoutConfig) -> LanePlan {
        let solution = solve(activities).unwrap();
        let zones = partition_zones(&solution, config);
        pack_lanes(&solution, &zones, config)
    }

    #[test]
    fn alignment_keeps_chain_on_predecessor_lane() {
        let activities = vec![
            Activity::new("A", "", 2.0),
            Activity::new("B", "", 3.0).with_predecessors(["A"]),
            Activity::new("W", "", 2.0),
        ];
        let plan = plan_for(&activities, &LayoutConfig::default());

        // Packing order: A(0), W(0), B(2). A -> lane 0, W -> lane 1.
        // At t=2 both lanes are free; B follows A onto lane 0.
        assert_eq!(plan.row_of("A").unwrap().lane_index, 0);
        assert_eq!(plan.row_of("W").unwrap().lane_index, 1);
        assert_eq!(plan.row_of("B").unwrap().lane_index, 0);
    }

    #[test]
    fn alignment_prefers_predecessor_over_lower_free_lane() {
        let activities = vec![
            Activity::new("A", "", 1.0),
            Activity::new("W", "", 2.0),
            Activity::new("B", "", 1.0).with_predecessors(["W"]),
        ];
        // A -> lane 0 (0..1), W -> lane 1 (0..2); at t=2 lane 0 is free but
        // B is contiguous with W, so it stays on lane 1.
        let plan = plan_for(&activities, &LayoutConfig::default());
        assert_eq!(plan.row_of("B").unwrap().lane_index, 1);

        let first_fit = LayoutConfig {
            align_with_predecessors: false,
            ..LayoutConfig::default()
        };
        let plan = plan_for(&activities, &first_fit);
        assert_eq!(plan.row_of("B").unwrap().lane_index, 0);
    }

    #[test]
    fn zone_reserves_minimum_rows() {
        let activities = vec![
            Activity::new("A", "", 1.0).with_zone("Z1"),
            Activity::new("B", "", 1.0).with_zone("Z2"),
        ];
        let plan = plan_for(&activities, &LayoutConfig::default());
        assert_eq!(plan.zones[0].row_count, 3);
        assert_eq!(plan.zones[0].lanes_used, 1);
        assert_eq!(plan.zones[1].start_row, 3);
        assert_eq!(plan.row_of("B").unwrap().global_row, 3);
        assert_eq!(plan.total_rows(), 6);
    }
}
