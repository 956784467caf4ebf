//! Incorrect-finality check for process graphs.
//!
//! Every node kind gets a token-flow rule (a generator vector). Starting from
//! a single token on the start resource, all markings reachable by firing
//! those rules are collected into a graph, which is then searched for a
//! marking that still holds tokens but cannot fire anything.

pub mod build_graph;
pub mod generators;
pub mod graph;
pub mod search;
pub mod vector;

use tracing::{debug, info};

use crate::error::FinalityError;
use crate::process_model::{ProcessModel, Transition};

use self::build_graph::build_reachability_graph;
use self::generators::derive_generators;
use self::search::{find_stuck_marking, StuckMarking};
use self::vector::IntVector;

pub const DEFAULT_MAX_MARKINGS: usize = 100_000;

#[derive(Debug, Clone)]
pub struct FinalityConfig {
    /// Upper bound on reachable markings before the analysis gives up.
    pub max_markings: usize,
    /// Log the generator set and the full reachability graph at debug level.
    pub verbose: bool,
}

impl Default for FinalityConfig {
    fn default() -> Self {
        FinalityConfig {
            max_markings: DEFAULT_MAX_MARKINGS,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub markings: usize,
    pub edges: usize,
}

#[derive(Debug)]
struct Outcome {
    stuck: Option<StuckMarking>,
    witness: Vec<IntVector>,
}

pub struct CheckCorrectFinality<'a> {
    model: &'a ProcessModel,
    config: FinalityConfig,
    generators: Vec<IntVector>,
    stats: GraphStats,
    outcome: Option<Outcome>,
}

impl<'a> CheckCorrectFinality<'a> {
    pub fn new(model: &'a ProcessModel, config: FinalityConfig) -> Self {
        CheckCorrectFinality {
            model,
            config,
            generators: derive_generators(model),
            stats: GraphStats::default(),
            outcome: None,
        }
    }

    pub fn run(&mut self) -> Result<(), FinalityError> {
        info!(
            nodes = self.model.nodes().len(),
            transitions = self.model.transitions().len(),
            generators = self.generators.len(),
            "finality check started"
        );
        if self.config.verbose {
            for g in &self.generators {
                debug!(generator = %g);
            }
        }

        let initial = IntVector::initial(self.model.transitions().len());
        let graph = build_reachability_graph(&self.generators, initial, self.config.max_markings)?;
        self.stats = GraphStats {
            markings: graph.len(),
            edges: graph.edges().len(),
        };
        if self.config.verbose {
            debug!("reachability graph:\n{}", graph.dump());
        }

        let stuck = find_stuck_marking(&graph);
        let witness = stuck
            .as_ref()
            .map(|s| s.path.iter().map(|&m| graph.marking(m).clone()).collect())
            .unwrap_or_default();
        self.outcome = Some(Outcome { stuck, witness });

        info!(
            markings = self.stats.markings,
            edges = self.stats.edges,
            incorrect = self.has_incorrect_final_state(),
            "finality check finished"
        );
        Ok(())
    }

    /// True once `run` found a stuck marking with tokens left on transitions.
    pub fn has_incorrect_final_state(&self) -> bool {
        !self.dangerous_transitions().is_empty()
    }

    /// Transitions left holding a token, in the order the search found them.
    pub fn dangerous_transitions(&self) -> Vec<&'a Transition> {
        let model = self.model;
        match self.outcome.as_ref().and_then(|o| o.stuck.as_ref()) {
            Some(stuck) => stuck
                .transitions
                .iter()
                .map(|&t| model.transition(t))
                .collect(),
            None => vec![],
        }
    }

    /// Source node ids of the dangerous transitions, comma separated.
    pub fn offending_ids(&self) -> String {
        self.dangerous_transitions()
            .iter()
            .map(|t| self.model.node(t.source).id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Markings from the initial one to the stuck one; empty when sound.
    pub fn witness(&self) -> &[IntVector] {
        match &self.outcome {
            Some(outcome) if self.has_incorrect_final_state() => &outcome.witness,
            _ => &[],
        }
    }

    pub fn generators(&self) -> &[IntVector] {
        &self.generators
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }
}
