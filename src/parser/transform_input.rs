use crate::{
    error::ModelError,
    process_model::{NodeKind, ProcessModel},
};

use super::parse_input::{parse_process, RawProcess};

pub fn transform(input: RawProcess) -> Result<ProcessModel, ModelError> {
    let mut builder = ProcessModel::builder();

    for node in input.nodes.iter() {
        let kind = NodeKind::from_keyword(&node.kind);
        builder = match &node.parent {
            Some(parent) => builder.child_node(&node.id, kind, parent),
            None => builder.node(&node.id, kind),
        };
    }

    // file order is transition index order
    for transition in input.transitions.iter() {
        builder = builder.transition(&transition.id, &transition.source, &transition.target);
    }

    builder.build()
}

/// Text definition to validated model in one step.
pub fn load(input: &str) -> Result<ProcessModel, ModelError> {
    transform(parse_process(input)?)
}
