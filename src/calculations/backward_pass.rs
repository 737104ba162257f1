use crate::graph::ActivityDag;
use tracing::debug;

/// Late start / late finish per activity, indexed by input position.
#[derive(Debug, Clone, PartialEq)]
pub struct LateTimes {
    pub late_start: Vec<f64>,
    pub late_finish: Vec<f64>,
}

pub struct BackwardPass<'d, 'a> {
    dag: &'d ActivityDag<'a>,
}

impl<'d, 'a> BackwardPass<'d, 'a> {
    pub fn new(dag: &'d ActivityDag<'a>) -> Self {
        Self { dag }
    }

    pub fn execute(&self, project_duration: f64) -> LateTimes {
        let count = self.dag.len();
        let mut late_start = vec![0.0_f64; count];
        let mut late_finish = vec![project_duration; count];

        // Reverse topological order
        for &node_ix in self.dag.order.iter().rev() {
            let position = self.dag.position(node_ix);

            // Terminal activities stay pinned to the project finish
            let lf = self
                .dag
                .successors(node_ix)
                .map(|succ_ix| late_start[self.dag.position(succ_ix)])
                .reduce(f64::min)
                .unwrap_or(project_duration);

            late_finish[position] = lf;
            late_start[position] = lf - self.dag.activity(node_ix).duration;
        }

        debug!(activities = count, "backward pass complete");
        LateTimes {
            late_start,
            late_finish,
        }
    }
}
