//! Domain layer: nodes, linking, the tree aggregate and its traversal views
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod info;
pub mod node;
pub mod tree;
pub mod views;

pub use arena::{NodeArena, Siblings};
pub use error::{DomainError, DomainResult};
pub use info::Info;
pub use node::{Node, NodeId};
pub use tree::Tree;
pub use views::VisitResult;
