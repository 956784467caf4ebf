use crate::process_model::TransitionIdx;

use super::graph::{MarkingId, ReachabilityGraph};

/// A reachable marking that still holds tokens but has nothing left to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StuckMarking {
    pub marking: MarkingId,
    /// Markings from the root down to `marking`, as walked by the search.
    pub path: Vec<MarkingId>,
    /// Transitions still carrying a token, in index order.
    pub transitions: Vec<TransitionIdx>,
}

struct Frame {
    marking: MarkingId,
    next_successor: usize,
}

/// Depth-first walk from the root, successors in discovery order. Returns
/// the first stuck marking met, or `None` when every branch ends in a
/// marking without positive slots or runs into visited markings.
pub fn find_stuck_marking(graph: &ReachabilityGraph) -> Option<StuckMarking> {
    let mut visited = vec![false; graph.len()];
    let mut stack: Vec<Frame> = vec![];

    if let Some(stuck) = enter(graph, graph.root(), &mut visited, &mut stack) {
        return Some(stuck);
    }

    while let Some(frame) = stack.last_mut() {
        let successors = graph.successors(frame.marking);
        let next = successors[frame.next_successor..]
            .iter()
            .position(|&s| !visited[s]);

        match next {
            Some(offset) => {
                let s = successors[frame.next_successor + offset];
                frame.next_successor += offset + 1;
                if let Some(stuck) = enter(graph, s, &mut visited, &mut stack) {
                    return Some(stuck);
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    None
}

/// Visits `u`: either settles it right away or pushes it to be expanded.
fn enter(
    graph: &ReachabilityGraph,
    u: MarkingId,
    visited: &mut [bool],
    stack: &mut Vec<Frame>,
) -> Option<StuckMarking> {
    visited[u] = true;
    let marking = graph.marking(u);

    // nothing left to finish on this branch
    if !marking.has_positive() {
        return None;
    }

    if graph.successors(u).is_empty() {
        let mut path: Vec<MarkingId> = stack.iter().map(|f| f.marking).collect();
        path.push(u);
        return Some(StuckMarking {
            marking: u,
            path,
            transitions: marking.positive_slots().map(|i| i - 1).collect(),
        });
    }

    stack.push(Frame {
        marking: u,
        next_successor: 0,
    });
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finality::vector::IntVector;

    fn v(elements: Vec<i32>) -> IntVector {
        IntVector::from(elements)
    }

    #[test]
    fn test_stuck_leaf_reports_positive_transitions() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(3));
        let a = graph.insert(v(vec![0, 1, 0, 0]));
        let b = graph.insert(v(vec![0, 0, 1, 1]));
        graph.add_edge(0, a);
        graph.add_edge(a, b);

        let stuck = find_stuck_marking(&graph).unwrap();
        assert_eq!(stuck.marking, b);
        assert_eq!(stuck.path, vec![0, a, b]);
        assert_eq!(stuck.transitions, vec![1, 2]);
    }

    #[test]
    fn test_root_without_tokens_is_terminal() {
        let graph = ReachabilityGraph::new(IntVector::zeroed(3));
        assert_eq!(find_stuck_marking(&graph), None);
    }

    #[test]
    fn test_root_without_successors_has_no_transitions() {
        let graph = ReachabilityGraph::new(IntVector::initial(0));
        let stuck = find_stuck_marking(&graph).unwrap();
        assert_eq!(stuck.marking, 0);
        assert!(stuck.transitions.is_empty());
    }

    #[test]
    fn test_cycle_without_exit_is_not_stuck() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(2));
        let a = graph.insert(v(vec![0, 1, 0]));
        let b = graph.insert(v(vec![0, 0, 1]));
        graph.add_edge(0, a);
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        assert_eq!(find_stuck_marking(&graph), None);
    }

    #[test]
    fn test_first_stuck_in_discovery_order_wins() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(3));
        let a = graph.insert(v(vec![0, 1, 0, 0]));
        let b = graph.insert(v(vec![0, 0, 1, 0]));
        let c = graph.insert(v(vec![0, 0, 0, 1]));
        // a loops back to the root, b dead-ends, c is never reached
        graph.add_edge(0, a);
        graph.add_edge(0, b);
        graph.add_edge(0, c);
        graph.add_edge(a, 0);

        let stuck = find_stuck_marking(&graph).unwrap();
        assert_eq!(stuck.marking, b);
        assert_eq!(stuck.path, vec![0, b]);
        assert_eq!(stuck.transitions, vec![1]);
    }

    #[test]
    fn test_visited_marking_not_reentered() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(3));
        let a = graph.insert(v(vec![0, 1, 0, 0]));
        let b = graph.insert(v(vec![0, 0, 1, 0]));
        let c = graph.insert(v(vec![0, 0, 0, 1]));
        graph.add_edge(0, a);
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(0, c);
        graph.add_edge(c, b);

        // c only leads to b, which was already explored from a
        assert_eq!(find_stuck_marking(&graph), None);
    }
}
