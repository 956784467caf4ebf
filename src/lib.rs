pub mod error;
pub mod finality;
pub mod parser;
pub mod process_model;

pub use error::{FinalityError, ModelError};
pub use finality::{CheckCorrectFinality, FinalityConfig};
pub use process_model::{Node, NodeKind, ProcessModel, ProcessModelBuilder, Transition};
