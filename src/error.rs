//! Error types shared by the graph engine, conversion layers and algorithm worker

use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    /// Referenced node or edge is not present
    #[error("{entity} {index} not found")]
    EntityNotFound {
        entity: &'static str,
        index: String,
    },

    /// Add operation targeting an index or edge key already in use
    #[error("{entity} {index} already exists")]
    DuplicateEntity {
        entity: &'static str,
        index: String,
    },

    /// Malformed input (matrix, set token, options, discriminator)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Dijkstra exhausted the queue without reaching the target
    #[error("No path found from node {start} to node {end}")]
    NoPathFound { start: u64, end: u64 },

    /// Declared but unimplemented branch
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Algorithm job was cancelled or timed out
    #[error("Computation cancelled")]
    Cancelled,

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GraphError {
    pub fn node_not_found(index: impl ToString) -> Self {
        GraphError::EntityNotFound {
            entity: "Node",
            index: index.to_string(),
        }
    }

    pub fn edge_not_found(index: impl ToString) -> Self {
        GraphError::EntityNotFound {
            entity: "Edge",
            index: index.to_string(),
        }
    }

    pub fn duplicate_node(index: impl ToString) -> Self {
        GraphError::DuplicateEntity {
            entity: "Node",
            index: index.to_string(),
        }
    }

    pub fn duplicate_edge(index: impl ToString) -> Self {
        GraphError::DuplicateEntity {
            entity: "Edge",
            index: index.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        GraphError::ValidationError(message.into())
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
