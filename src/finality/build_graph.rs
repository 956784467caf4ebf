use std::collections::VecDeque;

use tracing::debug;

use crate::error::FinalityError;

use super::graph::ReachabilityGraph;
use super::vector::IntVector;

/// Explores every marking reachable from `initial` by adding generators,
/// oldest unexplored marking first.
///
/// A successor with a negative slot (rule not enabled) or with no tokens at
/// all is dropped. Fails once more than `max_markings` markings exist.
pub fn build_reachability_graph(
    generators: &[IntVector],
    initial: IntVector,
    max_markings: usize,
) -> Result<ReachabilityGraph, FinalityError> {
    let mut graph = ReachabilityGraph::new(initial);
    let mut to_explore = VecDeque::from([graph.root()]);

    while let Some(u_id) = to_explore.pop_front() {
        let u = graph.marking(u_id).clone();
        for g in generators {
            let candidate = u.add(g);
            if candidate.has_negative() || candidate.is_zero() {
                continue;
            }

            // fold into an existing marking if there is one
            if let Some(m_id) = graph.contains_marking(&candidate) {
                graph.add_edge(u_id, m_id);
                continue;
            }
            if graph.len() >= max_markings {
                return Err(FinalityError::AnalysisTooLarge {
                    limit: max_markings,
                });
            }
            let c_id = graph.insert(candidate);
            graph.add_edge(u_id, c_id);
            to_explore.push_back(c_id);
        }
        debug!(
            marking = %u,
            successors = graph.successors(u_id).len(),
            pending = to_explore.len(),
            "explored marking"
        );
    }

    Ok(graph)
}
