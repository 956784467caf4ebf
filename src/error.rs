use thiserror::Error;

/// Errors raised while reading a process definition into a [`ProcessModel`].
///
/// [`ProcessModel`]: crate::process_model::ProcessModel
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("duplicate transition id: {0}")]
    DuplicateTransition(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinalityError {
    #[error("analysis too large: more than {limit} reachable markings")]
    AnalysisTooLarge { limit: usize },
}
