use crate::process_model::{NodeIdx, NodeKind, ProcessModel, TransitionIdx};

use super::vector::IntVector;

/// Builds the firing rules of a model: start rules first, then one rule per
/// synchronization node, then the pass-through rules of plain activities.
/// End nodes contribute nothing.
pub fn derive_generators(model: &ProcessModel) -> Vec<IntVector> {
    let mut generators = vec![];
    start_generators(model, &mut generators);
    synchronization_generators(model, &mut generators);
    pass_through_generators(model, &mut generators);
    generators
}

fn slot(t: TransitionIdx) -> usize {
    t + 1
}

fn start_generators(model: &ProcessModel, generators: &mut Vec<IntVector>) {
    let len = model.transitions().len() + 1;
    for (n_id, node) in model.nodes().iter().enumerate() {
        if node.kind != NodeKind::Start {
            continue;
        }
        for (t_id, transition) in model.transitions().iter().enumerate() {
            if transition.source == n_id {
                let mut v = IntVector::zeroed(len);
                v.set(0, -1);
                v.set(slot(t_id), 1);
                generators.push(v);
            }
        }
    }
}

fn synchronization_generators(model: &ProcessModel, generators: &mut Vec<IntVector>) {
    let len = model.transitions().len() + 1;
    for (n_id, node) in model.nodes().iter().enumerate() {
        if !node.kind.is_synchronization() {
            continue;
        }
        let mut v = IntVector::zeroed(len);
        for (t_id, transition) in model.transitions().iter().enumerate() {
            if transition.source == n_id {
                v.set(slot(t_id), 1);
            }
            // a self-loop ends up consuming
            if transition.target == n_id {
                v.set(slot(t_id), -1);
            }
        }
        generators.push(v);
    }
}

fn pass_through_generators(model: &ProcessModel, generators: &mut Vec<IntVector>) {
    let len = model.transitions().len() + 1;
    for (n_id, node) in model.nodes().iter().enumerate() {
        if !passes_through(&node.kind) {
            continue;
        }
        for (in_id, incoming) in model.transitions().iter().enumerate() {
            if incoming.target != n_id {
                continue;
            }
            let mut paired: Vec<TransitionIdx> = vec![];
            for out_id in outgoing(model, n_id) {
                if paired.contains(&out_id) {
                    continue;
                }
                let mut v = IntVector::zeroed(len);
                v.set(slot(in_id), -1);
                v.set(slot(out_id), 1);
                generators.push(v);
                paired.push(out_id);
            }
        }
    }
}

fn passes_through(kind: &NodeKind) -> bool {
    !(kind.is_synchronization() || matches!(kind, NodeKind::Start | NodeKind::End))
}

/// Transitions continuing the flow of `node`, timers resolved to their parent.
fn outgoing(model: &ProcessModel, node: NodeIdx) -> impl Iterator<Item = TransitionIdx> + '_ {
    (0..model.transitions().len()).filter(move |&t| model.flow_source(t) == node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> NodeKind {
        NodeKind::Other("task".to_string())
    }

    fn v(elements: Vec<i32>) -> IntVector {
        IntVector::from(elements)
    }

    #[test]
    fn test_minimal_model() {
        let model = ProcessModel::builder()
            .node("s", NodeKind::Start)
            .node("e", NodeKind::End)
            .transition("t0", "s", "e")
            .build()
            .unwrap();

        assert_eq!(derive_generators(&model), vec![v(vec![-1, 1])]);
    }

    #[test]
    fn test_synchronization_couples_all_arcs() {
        let model = ProcessModel::builder()
            .node("s", NodeKind::Start)
            .node("f", NodeKind::Fork)
            .node("a", task())
            .node("b", task())
            .transition("t0", "s", "f")
            .transition("t1", "f", "a")
            .transition("t2", "f", "b")
            .build()
            .unwrap();

        let generators = derive_generators(&model);
        assert_eq!(
            generators,
            vec![v(vec![-1, 1, 0, 0]), v(vec![0, -1, 1, 1])]
        );
    }

    #[test]
    fn test_join_and_gateway_each_get_one_generator() {
        let model = ProcessModel::builder()
            .node("a", task())
            .node("j", NodeKind::Join)
            .node("g", NodeKind::ParallelGateway)
            .node("e", NodeKind::End)
            .transition("t0", "a", "j")
            .transition("t1", "a", "j")
            .transition("t2", "j", "g")
            .transition("t3", "g", "e")
            .build()
            .unwrap();

        let generators = derive_generators(&model);
        assert_eq!(generators[0], v(vec![0, -1, -1, 1, 0]));
        assert_eq!(generators[1], v(vec![0, 0, 0, -1, 1]));
        // node a has no incoming arc, so no pass-through rules
        assert_eq!(generators.len(), 2);
    }

    #[test]
    fn test_pass_through_pairs_every_in_with_every_out() {
        let model = ProcessModel::builder()
            .node("s1", NodeKind::Start)
            .node("s2", NodeKind::Start)
            .node("a", task())
            .node("e1", NodeKind::End)
            .node("e2", NodeKind::End)
            .transition("t0", "s1", "a")
            .transition("t1", "s2", "a")
            .transition("t2", "a", "e1")
            .transition("t3", "a", "e2")
            .build()
            .unwrap();

        let generators = derive_generators(&model);
        assert_eq!(
            generators,
            vec![
                v(vec![-1, 1, 0, 0, 0]),
                v(vec![-1, 0, 1, 0, 0]),
                v(vec![0, -1, 0, 1, 0]),
                v(vec![0, -1, 0, 0, 1]),
                v(vec![0, 0, -1, 1, 0]),
                v(vec![0, 0, -1, 0, 1]),
            ]
        );
    }

    #[test]
    fn test_timer_arc_belongs_to_parent_activity() {
        let model = ProcessModel::builder()
            .node("s", NodeKind::Start)
            .node("review", task())
            .child_node("reminder", NodeKind::Timer, "review")
            .node("e", NodeKind::End)
            .transition("t0", "s", "review")
            .transition("t1", "review", "e")
            .transition("t2", "reminder", "e")
            .build()
            .unwrap();

        let generators = derive_generators(&model);
        assert_eq!(
            generators,
            vec![
                v(vec![-1, 1, 0, 0]),
                v(vec![0, -1, 1, 0]),
                v(vec![0, -1, 0, 1]),
            ]
        );
    }

    #[test]
    fn test_self_loop_leaves_producing_rule() {
        let model = ProcessModel::builder()
            .node("s", NodeKind::Start)
            .node("a", task())
            .transition("t0", "s", "a")
            .transition("t1", "a", "a")
            .build()
            .unwrap();

        let generators = derive_generators(&model);
        assert_eq!(
            generators,
            vec![v(vec![-1, 1, 0]), v(vec![0, -1, 1]), v(vec![0, 0, 1])]
        );
    }

    #[test]
    fn test_rebuild_is_identical() {
        let model = ProcessModel::builder()
            .node("s", NodeKind::Start)
            .node("f", NodeKind::Fork)
            .node("a", task())
            .node("j", NodeKind::Join)
            .node("e", NodeKind::End)
            .transition("t0", "s", "f")
            .transition("t1", "f", "a")
            .transition("t2", "f", "j")
            .transition("t3", "a", "j")
            .transition("t4", "j", "e")
            .build()
            .unwrap();

        assert_eq!(derive_generators(&model), derive_generators(&model));
    }
}
