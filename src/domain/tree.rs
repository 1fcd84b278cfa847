use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::views::{BfsIter, InorderIter, PostorderIter, PreorderIter};
use crate::domain::{DomainResult, Node, NodeArena, NodeId, Siblings};

/// A rooted tree over a [`NodeArena`], with cached size and leaves.
///
/// `size` and `leaves` are a snapshot taken by [`Tree::new`]. Linking more
/// nodes through [`append_children`](Self::append_children) or
/// [`prepend_children`](Self::prepend_children) does not update them; call
/// [`refresh`](Self::refresh) to recompute.
#[derive(Debug, Clone)]
pub struct Tree<I> {
    arena: NodeArena<I>,
    root: NodeId,
    /// Leaf nodes, left to right
    leaves: Vec<NodeId>,
    size: usize,
}

impl<I> Tree<I> {
    /// Builds a tree rooted at `root`, taking ownership of `arena`.
    ///
    /// Returns `None` if `root` is absent or unknown to the arena.
    #[instrument(level = "debug", skip_all)]
    pub fn new(arena: NodeArena<I>, root: impl Into<Option<NodeId>>) -> Option<Self> {
        let root = root.into().filter(|id| arena.contains(*id))?;
        let (size, leaves) = snapshot(&arena, root);
        debug!(size, leaves = leaves.len(), "tree built");
        Some(Self {
            arena,
            root,
            leaves,
            size,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes reachable from the root at the last snapshot.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Leaf nodes at the last snapshot, left to right.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    pub fn arena(&self) -> &NodeArena<I> {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena<I> {
        self.arena
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<I>> {
        self.arena.node(id)
    }

    pub fn get(&self, id: NodeId) -> DomainResult<&I> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> DomainResult<&mut I> {
        self.arena.get_mut(id)
    }

    pub fn children(&self, id: NodeId) -> Siblings<'_, I> {
        self.arena.children(id)
    }

    /// Creates an unlinked node in the tree's arena, ready to be linked.
    pub fn new_node(&mut self, info: I) -> NodeId {
        self.arena.new_node(info)
    }

    /// See [`NodeArena::append_children`]. Cached size and leaves go stale.
    pub fn append_children<N, C>(&mut self, node: N, children: C) -> DomainResult<()>
    where
        N: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<NodeId>>,
    {
        self.arena.append_children(node, children)
    }

    /// See [`NodeArena::prepend_children`]. Cached size and leaves go stale.
    pub fn prepend_children<N, C>(&mut self, node: N, children: C) -> DomainResult<()>
    where
        N: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<NodeId>>,
    {
        self.arena.prepend_children(node, children)
    }

    /// Recomputes the cached size and leaves from the current node graph.
    #[instrument(level = "debug", skip(self))]
    pub fn refresh(&mut self) {
        let (size, leaves) = snapshot(&self.arena, self.root);
        debug!(old = self.size, new = size, "tree caches refreshed");
        self.size = size;
        self.leaves = leaves;
    }

    /// Number of levels; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        queue.push_back((self.root, 1)); // (node, depth)

        while let Some((node, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            for child in self.arena.children(node) {
                queue.push_back((child, depth + 1));
            }
        }

        max_depth
    }

    pub fn iter_preorder(&self) -> PreorderIter<'_, I> {
        PreorderIter::new(self)
    }

    pub fn iter_postorder(&self) -> PostorderIter<'_, I> {
        PostorderIter::new(self)
    }

    pub fn iter_inorder(&self) -> InorderIter<'_, I> {
        InorderIter::new(self)
    }

    pub fn iter_bfs(&self) -> BfsIter<'_, I> {
        BfsIter::new(self)
    }
}

/// Counts the nodes under `root` and collects its leaves, without recursion.
fn snapshot<I>(arena: &NodeArena<I>, root: NodeId) -> (usize, Vec<NodeId>) {
    let mut leaves = Vec::new();
    let mut size = 0;
    let mut stack = vec![root];

    while let Some(top) = stack.pop() {
        size += 1;
        let Some(node) = arena.node(top) else {
            continue;
        };
        if node.is_leaf() {
            leaves.push(top);
            continue;
        }
        // Push children in reverse order for left-to-right traversal
        stack.extend(arena.children_rev(top));
    }

    (size, leaves)
}
