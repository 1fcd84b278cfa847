use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::{DomainError, DomainResult, Node, NodeId};

/// Arena storage for every node of a tree under construction.
///
/// Nodes are created unlinked with [`new_node`](Self::new_node) and then
/// wired together with [`append_children`](Self::append_children) /
/// [`prepend_children`](Self::prepend_children). Nodes are never removed
/// individually; dropping the arena drops the whole graph.
///
/// Handles are only valid for the arena that issued them. A clone keeps the
/// identity of its source, so existing handles address the copied nodes.
#[derive(Debug, Clone)]
pub struct NodeArena<I> {
    id: u64,
    arena: Arena<Node<I>>,
}

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

fn next_arena_id() -> u64 {
    NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)
}

impl<I> Default for NodeArena<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> NodeArena<I> {
    pub fn new() -> Self {
        Self {
            id: next_arena_id(),
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: next_arena_id(),
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Creates an unlinked node holding `info`.
    pub fn new_node(&mut self, info: I) -> NodeId {
        let idx = NodeId::new(self.id, self.arena.insert(Node::new(info)));
        trace!(?idx, "node created");
        idx
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// True when `id` was issued by this arena and still resolves.
    pub fn contains(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<I>> {
        self.arena.get(self.resolve(id)?)
    }

    /// Returns the payload of `id`, failing for a handle that does not resolve.
    pub fn get(&self, id: NodeId) -> DomainResult<&I> {
        self.node(id)
            .map(|node| &node.info)
            .ok_or(DomainError::InvalidNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> DomainResult<&mut I> {
        self.resolve(id)
            .and_then(|index| self.arena.get_mut(index))
            .map(|node| &mut node.info)
            .ok_or(DomainError::InvalidNode(id))
    }

    /// Replaces the payload of `id` and returns the previous one.
    pub fn set_info(&mut self, id: NodeId, info: I) -> DomainResult<I> {
        let slot = self.get_mut(id)?;
        Ok(std::mem::replace(slot, info))
    }

    /// Children of `id`, first to last. Empty for leaves and unknown handles.
    pub fn children(&self, id: NodeId) -> Siblings<'_, I> {
        Siblings {
            arena: self,
            cursor: self.node(id).and_then(Node::first_child),
            forward: true,
        }
    }

    /// Children of `id`, last to first.
    pub fn children_rev(&self, id: NodeId) -> Siblings<'_, I> {
        Siblings {
            arena: self,
            cursor: self.node(id).and_then(Node::last_child),
            forward: false,
        }
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Appends `children` after the current last child of `node`.
    ///
    /// Absent entries (`None`, or handles unknown to this arena) are dropped
    /// first; if nothing remains this is a successful no-op, whatever `node`
    /// is. Otherwise an absent `node` fails with [`DomainError::NilReceiver`].
    ///
    /// No duplicate detection is performed: linking a node that is already
    /// linked somewhere corrupts the sibling chains.
    #[instrument(level = "trace", skip_all)]
    pub fn append_children<N, C>(&mut self, node: N, children: C) -> DomainResult<()>
    where
        N: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<NodeId>>,
    {
        let children = self.reject_absent(children);
        if children.is_empty() {
            return Ok(());
        }
        let parent = self.receiver(node)?;

        let (first, last) = self.link_nodes(parent, &children);

        match self.slot(parent).last_child {
            None => self.slot(parent).first_child = Some(first),
            Some(previous_last) => {
                self.slot(previous_last).next_sibling = Some(first);
                self.slot(first).prev_sibling = Some(previous_last);
            }
        }
        self.slot(parent).last_child = Some(last);

        trace!(?parent, count = children.len(), "children appended");
        Ok(())
    }

    /// Prepends `children` before the current first child of `node`.
    ///
    /// Same absent-entry and receiver rules as
    /// [`append_children`](Self::append_children).
    #[instrument(level = "trace", skip_all)]
    pub fn prepend_children<N, C>(&mut self, node: N, children: C) -> DomainResult<()>
    where
        N: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<NodeId>>,
    {
        let children = self.reject_absent(children);
        if children.is_empty() {
            return Ok(());
        }
        let parent = self.receiver(node)?;

        let (first, last) = self.link_nodes(parent, &children);

        match self.slot(parent).first_child {
            None => self.slot(parent).last_child = Some(last),
            Some(previous_first) => {
                self.slot(previous_first).prev_sibling = Some(last);
                self.slot(last).next_sibling = Some(previous_first);
            }
        }
        self.slot(parent).first_child = Some(first);

        trace!(?parent, count = children.len(), "children prepended");
        Ok(())
    }

    fn reject_absent<C>(&self, children: C) -> Vec<NodeId>
    where
        C: IntoIterator,
        C::Item: Into<Option<NodeId>>,
    {
        children
            .into_iter()
            .filter_map(|child| -> Option<NodeId> { child.into() })
            .filter(|id| self.contains(*id))
            .collect()
    }

    fn receiver<N: Into<Option<NodeId>>>(&self, node: N) -> DomainResult<NodeId> {
        node.into()
            .filter(|id| self.contains(*id))
            .ok_or(DomainError::NilReceiver)
    }

    /// Sets the parent of every child and threads them into one sibling chain.
    /// `children` must be non-empty and every handle must resolve.
    fn link_nodes(&mut self, parent: NodeId, children: &[NodeId]) -> (NodeId, NodeId) {
        for &child in children {
            self.slot(child).parent = Some(parent);
        }
        for pair in children.windows(2) {
            self.slot(pair[0]).next_sibling = Some(pair[1]);
            self.slot(pair[1]).prev_sibling = Some(pair[0]);
        }
        (children[0], children[children.len() - 1])
    }

    fn resolve(&self, id: NodeId) -> Option<Index> {
        (id.arena() == self.id).then(|| id.index())
    }

    // Only called with handles validated by `receiver` / `reject_absent`.
    fn slot(&mut self, id: NodeId) -> &mut Node<I> {
        &mut self.arena[id.index()]
    }
}

/// Walks a sibling chain in either direction, yielding node handles.
pub struct Siblings<'a, I> {
    arena: &'a NodeArena<I>,
    cursor: Option<NodeId>,
    forward: bool,
}

impl<'a, I> Iterator for Siblings<'a, I> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        let node = self.arena.node(current)?;
        self.cursor = if self.forward {
            node.next_sibling
        } else {
            node.prev_sibling
        };
        Some(current)
    }
}
