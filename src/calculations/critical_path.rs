use crate::calculations::backward_pass::LateTimes;
use crate::calculations::forward_pass::EarlyTimes;
use crate::graph::ActivityDag;
use petgraph::graph::NodeIndex;

/// Residue below this many days is treated as exact zero.
pub const FLOAT_EPSILON: f64 = 1e-9;

/// Share of the timing magnitude treated as rounding residue once day counts
/// grow past the point where [`FLOAT_EPSILON`] is below one ulp.
pub const RELATIVE_EPSILON: f64 = 1e-12;

/// Residue tolerance for differences between times of up to `magnitude` days.
pub fn tolerance_for(magnitude: f64) -> f64 {
    FLOAT_EPSILON.max(magnitude.abs() * RELATIVE_EPSILON)
}

/// Snaps `value` to zero when it lies within the residue tolerance for
/// `magnitude`.
pub(crate) fn snap_to_zero(value: f64, magnitude: f64) -> f64 {
    if value.abs() < tolerance_for(magnitude) { 0.0 } else { value }
}

fn approx_equal(a: f64, b: f64, magnitude: f64) -> bool {
    (a - b).abs() < tolerance_for(magnitude)
}

/// Total float per activity (input position order). Never negative.
///
/// Late times are accumulated backwards from the project finish, so their
/// rounding error scales with the project duration rather than with the
/// activity's own times.
pub fn total_floats(early: &EarlyTimes, late: &LateTimes) -> Vec<f64> {
    let magnitude = early.project_duration;
    late.late_start
        .iter()
        .zip(&early.early_start)
        .map(|(ls, es)| snap_to_zero(ls - es, magnitude).max(0.0))
        .collect()
}

/// Walks one critical chain from the end of the project back to its start and
/// returns the ids in start-to-finish order.
///
/// The walk begins at the critical terminal activity with the lowest id and
/// only steps to critical predecessors that drive the current start, so every
/// consecutive pair in the result is a zero-gap edge.
pub fn trace_critical_path(dag: &ActivityDag<'_>, early: &EarlyTimes, floats: &[f64]) -> Vec<String> {
    let is_critical = |node_ix: NodeIndex| floats[dag.position(node_ix)] == 0.0;
    let magnitude = early.project_duration;

    let terminal = dag
        .graph
        .node_indices()
        .filter(|&node_ix| is_critical(node_ix) && !dag.has_successors(node_ix))
        .filter(|&node_ix| {
            approx_equal(
                early.early_finish[dag.position(node_ix)],
                early.project_duration,
                magnitude,
            )
        })
        .min_by(|&a, &b| dag.activity(a).id.cmp(&dag.activity(b).id));

    let Some(mut current) = terminal else {
        return Vec::new();
    };

    let mut path = vec![dag.activity(current).id.clone()];
    loop {
        let start = early.early_start[dag.position(current)];
        let next = dag
            .predecessors(current)
            .filter(|&pred_ix| is_critical(pred_ix))
            .filter(|&pred_ix| {
                approx_equal(early.early_finish[dag.position(pred_ix)], start, magnitude)
            })
            .min_by(|&a, &b| dag.activity(a).id.cmp(&dag.activity(b).id));
        match next {
            Some(pred_ix) => {
                path.push(dag.activity(pred_ix).id.clone());
                current = pred_ix;
            }
            None => break,
        }
    }

    path.reverse();
    path
}
