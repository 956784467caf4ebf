use std::collections::HashMap;
use std::fmt::Write;

use super::vector::IntVector;

pub type MarkingId = usize;

#[derive(Debug, Clone)]
pub struct GraphMarking {
    pub id: MarkingId,
    pub marking: IntVector,
    pub successors: Vec<MarkingId>,
}

/// Reachable markings, each stored once, with successor lists and the edge
/// list in discovery order. The first marking is the root.
#[derive(Debug)]
pub struct ReachabilityGraph {
    markings: Vec<GraphMarking>,
    index: HashMap<IntVector, MarkingId>,
    edges: Vec<(MarkingId, MarkingId)>,
}

impl ReachabilityGraph {
    pub fn new(root: IntVector) -> Self {
        let mut graph = ReachabilityGraph {
            markings: vec![],
            index: HashMap::new(),
            edges: vec![],
        };
        graph.insert(root);
        graph
    }

    pub fn root(&self) -> MarkingId {
        0
    }

    pub fn contains_marking(&self, marking: &IntVector) -> Option<MarkingId> {
        self.index.get(marking).copied()
    }

    /// Stores a marking not yet in the graph and returns its id.
    pub fn insert(&mut self, marking: IntVector) -> MarkingId {
        debug_assert!(!self.index.contains_key(&marking));
        let id = self.markings.len();
        self.index.insert(marking.clone(), id);
        self.markings.push(GraphMarking {
            id,
            marking,
            successors: vec![],
        });
        id
    }

    pub fn add_edge(&mut self, from: MarkingId, to: MarkingId) {
        self.markings[from].successors.push(to);
        self.edges.push((from, to));
    }

    pub fn marking(&self, id: MarkingId) -> &IntVector {
        &self.markings[id].marking
    }

    pub fn successors(&self, id: MarkingId) -> &[MarkingId] {
        &self.markings[id].successors
    }

    pub fn edges(&self) -> &[(MarkingId, MarkingId)] {
        &self.edges
    }

    pub fn markings(&self) -> &[GraphMarking] {
        &self.markings
    }

    pub fn len(&self) -> usize {
        self.markings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markings.is_empty()
    }

    /// Adjacency listing, one marking per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for m in &self.markings {
            let _ = write!(out, "{}: {}", m.id, m.marking);
            for s in &m.successors {
                let _ = write!(out, " -> {}", s);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_marking_found_by_value() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(2));
        let id = graph.insert(IntVector::from(vec![0, 1, 0]));

        let rebuilt = IntVector::initial(2).add(&IntVector::from(vec![-1, 1, 0]));
        assert_eq!(graph.contains_marking(&rebuilt), Some(id));
        assert_eq!(graph.contains_marking(&IntVector::from(vec![0, 0, 1])), None);
    }

    #[test]
    fn test_edges_keep_discovery_order() {
        let mut graph = ReachabilityGraph::new(IntVector::initial(1));
        let a = graph.insert(IntVector::from(vec![0, 1]));
        let b = graph.insert(IntVector::from(vec![0, 2]));
        graph.add_edge(0, b);
        graph.add_edge(0, a);
        graph.add_edge(a, b);

        assert_eq!(graph.successors(0), &[b, a]);
        assert_eq!(graph.edges(), &[(0, b), (0, a), (a, b)]);
        assert!(graph.successors(b).is_empty());
        assert_eq!(graph.dump(), "0: [1, 0] -> 2 -> 1\n1: [0, 1] -> 2\n2: [0, 2]\n");
    }
}
