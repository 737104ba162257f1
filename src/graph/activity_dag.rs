use crate::activity::Activity;
use crate::activity_validation;
use crate::error::{AnalysisError, AnalysisResult};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Predecessor graph over a validated batch. Node weights are positions in the
/// input slice; an edge `p -> a` means `a` lists `p` as a predecessor.
pub struct ActivityDag<'a> {
    pub activities: &'a [Activity],
    pub graph: DiGraph<usize, ()>,
    pub id_to_index: HashMap<&'a str, NodeIndex>,
    /// Topological order of the nodes.
    pub order: Vec<NodeIndex>,
}

impl<'a> ActivityDag<'a> {
    pub fn build(activities: &'a [Activity]) -> AnalysisResult<Self> {
        activity_validation::validate_activity_collection(activities)?;

        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(activities.len(), 0);
        let mut id_to_index: HashMap<&'a str, NodeIndex> =
            HashMap::with_capacity(activities.len());

        // Add nodes first
        for (position, activity) in activities.iter().enumerate() {
            let node_ix = graph.add_node(position);
            id_to_index.insert(activity.id.as_str(), node_ix);
        }

        // Add edges: pred -> activity, repeats collapse to one edge
        for activity in activities {
            let v = id_to_index[activity.id.as_str()];
            for pred_id in activity.distinct_predecessors() {
                let u = id_to_index.get(pred_id).copied().ok_or_else(|| {
                    AnalysisError::InvalidReference {
                        activity: activity.id.clone(),
                        predecessor: pred_id.to_string(),
                    }
                })?;
                graph.add_edge(u, v, ());
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| AnalysisError::Cycle {
            activity: activities[graph[cycle.node_id()]].id.clone(),
        })?;

        Ok(Self {
            activities,
            graph,
            id_to_index,
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activity(&self, node_ix: NodeIndex) -> &'a Activity {
        &self.activities[self.graph[node_ix]]
    }

    pub fn position(&self, node_ix: NodeIndex) -> usize {
        self.graph[node_ix]
    }

    pub fn predecessors(&self, node_ix: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node_ix, Direction::Incoming)
    }

    pub fn successors(&self, node_ix: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node_ix, Direction::Outgoing)
    }

    pub fn has_successors(&self, node_ix: NodeIndex) -> bool {
        self.successors(node_ix).next().is_some()
    }
}
