use crate::graph::ActivityDag;
use tracing::debug;

/// Early start / early finish per activity, indexed by input position.
#[derive(Debug, Clone, PartialEq)]
pub struct EarlyTimes {
    pub early_start: Vec<f64>,
    pub early_finish: Vec<f64>,
    pub project_duration: f64,
}

pub struct ForwardPass<'d, 'a> {
    dag: &'d ActivityDag<'a>,
}

impl<'d, 'a> ForwardPass<'d, 'a> {
    pub fn new(dag: &'d ActivityDag<'a>) -> Self {
        Self { dag }
    }

    pub fn execute(&self) -> EarlyTimes {
        let count = self.dag.len();
        let mut early_start = vec![0.0_f64; count];
        let mut early_finish = vec![0.0_f64; count];

        // Every predecessor is finalised before its dependents in topo order
        for &node_ix in &self.dag.order {
            let position = self.dag.position(node_ix);
            let start = self
                .dag
                .predecessors(node_ix)
                .map(|pred_ix| early_finish[self.dag.position(pred_ix)])
                .fold(0.0_f64, f64::max);
            early_start[position] = start;
            early_finish[position] = start + self.dag.activity(node_ix).duration;
        }

        let project_duration = early_finish.iter().copied().fold(0.0_f64, f64::max);
        debug!(activities = count, project_duration, "forward pass complete");

        EarlyTimes {
            early_start,
            early_finish,
            project_duration,
        }
    }
}
