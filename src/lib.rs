//! Sibling-threaded n-ary trees.
//!
//! Nodes live in a [`NodeArena`] and are linked with O(1)
//! [`append_children`](NodeArena::append_children) /
//! [`prepend_children`](NodeArena::prepend_children). A [`Tree`] takes the
//! arena and a root, caches its size and leaves, and can be walked in
//! preorder, postorder, n-ary inorder or breadth-first order through
//! [`views`], compared structurally, and rendered with box-drawing
//! connectors through [`render`].
//!
//! ```
//! use arbor::{NodeArena, Tree};
//!
//! let mut arena = NodeArena::new();
//! let a = arena.new_node("A");
//! let b = arena.new_node("B");
//! let c = arena.new_node("C");
//! let d = arena.new_node("D");
//! arena.append_children(a, [b, c]).unwrap();
//! arena.append_children(c, [d]).unwrap();
//!
//! let tree = Tree::new(arena, a).unwrap();
//! assert_eq!(tree.size(), 4);
//! assert_eq!(tree.to_string(), "A\n├── B\n└── C\n    └── D");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exitcode;
pub mod outline;
pub mod render;
pub mod tree_traits;
pub mod util;

pub use domain::views;
pub use domain::{DomainError, Info, Node, NodeArena, NodeId, Tree, VisitResult};
pub use errors::{ArborError, ArborResult};
pub use render::RenderStyle;
