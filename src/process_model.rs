use std::collections::HashMap;

use crate::error::ModelError;

pub type NodeIdx = usize;
pub type TransitionIdx = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    End,
    Fork,
    Join,
    ParallelGateway,
    Timer,
    /// Any activity without a token rule of its own (task, decision, subprocess ...).
    Other(String),
}

impl NodeKind {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "start" => NodeKind::Start,
            "end" => NodeKind::End,
            "fork" => NodeKind::Fork,
            "join" => NodeKind::Join,
            "parallel_gateway" => NodeKind::ParallelGateway,
            "timer" => NodeKind::Timer,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Fork, Join and ParallelGateway combine or split tokens in one firing.
    pub fn is_synchronization(&self) -> bool {
        matches!(self, NodeKind::Fork | NodeKind::Join | NodeKind::ParallelGateway)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub parent: Option<NodeIdx>,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub id: String,
    pub source: NodeIdx,
    pub target: NodeIdx,
}

/// Read-only node/transition graph handed to the finality check.
///
/// Only [`ProcessModelBuilder`] creates one, so every transition endpoint and
/// every parent reference points at an existing node.
#[derive(Debug, Clone, Default)]
pub struct ProcessModel {
    nodes: Vec<Node>,
    transitions: Vec<Transition>,
}

impl ProcessModel {
    pub fn builder() -> ProcessModelBuilder {
        ProcessModelBuilder::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    pub fn transition(&self, idx: TransitionIdx) -> &Transition {
        &self.transitions[idx]
    }

    /// Node a transition continues the flow from: a timer attached to an
    /// activity hands its outgoing arc to that activity.
    pub fn flow_source(&self, idx: TransitionIdx) -> NodeIdx {
        let source = self.transitions[idx].source;
        match (&self.nodes[source].kind, self.nodes[source].parent) {
            (NodeKind::Timer, Some(parent)) => parent,
            _ => source,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProcessModelBuilder {
    nodes: Vec<(String, NodeKind, Option<String>)>,
    transitions: Vec<(String, String, String)>,
}

impl ProcessModelBuilder {
    pub fn node(mut self, id: &str, kind: NodeKind) -> Self {
        self.nodes.push((id.to_string(), kind, None));
        self
    }

    /// Node owned by `parent`, e.g. a boundary timer on an activity.
    pub fn child_node(mut self, id: &str, kind: NodeKind, parent: &str) -> Self {
        self.nodes
            .push((id.to_string(), kind, Some(parent.to_string())));
        self
    }

    pub fn transition(mut self, id: &str, source: &str, target: &str) -> Self {
        self.transitions
            .push((id.to_string(), source.to_string(), target.to_string()));
        self
    }

    pub fn build(self) -> Result<ProcessModel, ModelError> {
        // node id -> index
        let mut node_ids = HashMap::with_capacity(self.nodes.len());
        for (idx, (id, _, _)) in self.nodes.iter().enumerate() {
            if node_ids.insert(id.clone(), idx).is_some() {
                return Err(ModelError::DuplicateNode(id.clone()));
            }
        }
        let lookup = |id: &String| {
            node_ids
                .get(id)
                .copied()
                .ok_or_else(|| ModelError::UnknownNode(id.clone()))
        };

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (id, kind, parent) in self.nodes.iter() {
            let parent = match parent {
                Some(p) => Some(lookup(p)?),
                None => None,
            };
            nodes.push(Node {
                id: id.clone(),
                kind: kind.clone(),
                parent,
            });
        }

        let mut seen = HashMap::with_capacity(self.transitions.len());
        let mut transitions = Vec::with_capacity(self.transitions.len());
        for (idx, (id, source, target)) in self.transitions.iter().enumerate() {
            if seen.insert(id.clone(), idx).is_some() {
                return Err(ModelError::DuplicateTransition(id.clone()));
            }
            transitions.push(Transition {
                id: id.clone(),
                source: lookup(source)?,
                target: lookup(target)?,
            });
        }

        Ok(ProcessModel { nodes, transitions })
    }
}
