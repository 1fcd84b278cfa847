//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors represent misuse of the node graph.
/// Linking operations that fail are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("nil receiver")]
    NilReceiver,

    #[error("invalid node handle: {0:?}")]
    InvalidNode(NodeId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
