use std::fmt;

use generational_arena::Index;

use crate::domain::Info;

/// Stable handle to a node stored in a [`NodeArena`](crate::domain::NodeArena).
///
/// A handle remembers which arena issued it, so a handle from another arena
/// never resolves, even when its slot and generation happen to exist there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    arena: u64,
    index: Index,
}

impl NodeId {
    pub(crate) fn new(arena: u64, index: Index) -> Self {
        Self { arena, index }
    }

    pub(crate) fn arena(self) -> u64 {
        self.arena
    }

    pub(crate) fn index(self) -> Index {
        self.index
    }
}

/// Tree node in the arena-based, sibling-threaded structure.
///
/// Ownership flows from parent to children; every relation is an arena
/// handle so the graph carries no back references.
#[derive(Debug, Clone)]
pub struct Node<I> {
    /// Payload of this node
    pub(crate) info: I,
    /// Parent handle, None for unlinked nodes and roots
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
}

impl<I> Node<I> {
    pub(crate) fn new(info: I) -> Self {
        Self {
            info,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
        }
    }

    pub fn info(&self) -> &I {
        &self.info
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    /// A leaf has no children.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

impl<I: Info> Node<I> {
    /// Two nodes are equal when their payloads are; links are ignored.
    pub fn equals(&self, other: &Node<I>) -> bool {
        self.info.equals(&other.info)
    }
}

impl<I: fmt::Display> fmt::Display for Node<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node[{}]", self.info)
    }
}
