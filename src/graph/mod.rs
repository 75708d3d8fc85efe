//! Graph data model
//!
//! - Nodes with 1-based indices and optional labels
//! - Edges keyed by direction-sensitive `"<from>-<to>"` indices
//! - A graph aggregate acting as the arena for both
//! - The mutation/query engine that keeps them consistent

pub mod edge;
pub mod json;
pub mod node;
pub mod service;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{Edge, DEFAULT_WEIGHT};
pub use json::{EdgeAttributes, EdgeJson, GraphFullJson, GraphJson, NodeJson};
pub use node::{Node, Position};
pub use service::GraphService;
pub use store::{derive_orientation, Graph};
pub use types::{EdgeIndex, EdgeOrientation, GraphOrientation, GraphType, NodeIndex};
