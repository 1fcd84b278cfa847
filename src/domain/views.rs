//! Traversal views over a [`Tree`].
//!
//! Every order exists twice: as a borrowing iterator (`Tree::iter_*`) and as a
//! callback driver (`preorder`, `postorder`, ...). Callbacks return
//! [`VisitResult`]: `Ok(ControlFlow::Continue(()))` keeps going,
//! `Ok(ControlFlow::Break(()))` stops early and is reported as success, and
//! `Err(e)` stops and is handed back to the caller unchanged.
//!
//! None of the traversals recurse, so tree depth is not bounded by the call
//! stack. Handing in an absent tree visits nothing and succeeds.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use tracing::{instrument, trace};

use crate::domain::{Info, Node, NodeId, Tree};

/// Return type of a visit callback.
pub type VisitResult<E> = Result<ControlFlow<()>, E>;

/// Node first, then its children left to right.
pub struct PreorderIter<'a, I> {
    tree: &'a Tree<I>,
    stack: Vec<NodeId>,
}

impl<'a, I> PreorderIter<'a, I> {
    pub(crate) fn new(tree: &'a Tree<I>) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a, I> Iterator for PreorderIter<'a, I> {
    type Item = (NodeId, &'a Node<I>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(self.tree.arena().children_rev(current_idx));
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Children left to right, then the node.
pub struct PostorderIter<'a, I> {
    tree: &'a Tree<I>,
    /// (node, children already pushed)
    stack: Vec<(NodeId, bool)>,
}

impl<'a, I> PostorderIter<'a, I> {
    pub(crate) fn new(tree: &'a Tree<I>) -> Self {
        Self {
            tree,
            stack: vec![(tree.root(), false)],
        }
    }
}

impl<'a, I> Iterator for PostorderIter<'a, I> {
    type Item = (NodeId, &'a Node<I>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, seen)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if seen {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for child in self.tree.arena().children_rev(current_idx) {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

enum InorderFrame {
    Expand(NodeId),
    Emit(NodeId),
}

/// n-ary in-order: the first `k / 2` child subtrees, the node, then the rest.
/// A leaf is emitted directly.
pub struct InorderIter<'a, I> {
    tree: &'a Tree<I>,
    stack: Vec<InorderFrame>,
}

impl<'a, I> InorderIter<'a, I> {
    pub(crate) fn new(tree: &'a Tree<I>) -> Self {
        Self {
            tree,
            stack: vec![InorderFrame::Expand(tree.root())],
        }
    }
}

impl<'a, I> Iterator for InorderIter<'a, I> {
    type Item = (NodeId, &'a Node<I>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let current_idx = match frame {
                InorderFrame::Emit(idx) => idx,
                InorderFrame::Expand(idx) => {
                    let children: Vec<NodeId> = self.tree.children(idx).collect();
                    if !children.is_empty() {
                        let (left, right) = children.split_at(children.len() / 2);
                        self.stack
                            .extend(right.iter().rev().map(|&c| InorderFrame::Expand(c)));
                        self.stack.push(InorderFrame::Emit(idx));
                        self.stack
                            .extend(left.iter().rev().map(|&c| InorderFrame::Expand(c)));
                        continue;
                    }
                    idx
                }
            };
            if let Some(node) = self.tree.node(current_idx) {
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Level order, left to right within a level.
pub struct BfsIter<'a, I> {
    tree: &'a Tree<I>,
    queue: VecDeque<NodeId>,
}

impl<'a, I> BfsIter<'a, I> {
    pub(crate) fn new(tree: &'a Tree<I>) -> Self {
        Self {
            tree,
            queue: VecDeque::from([tree.root()]),
        }
    }
}

impl<'a, I> Iterator for BfsIter<'a, I> {
    type Item = (NodeId, &'a Node<I>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.node(current_idx) {
                self.queue.extend(self.tree.children(current_idx));
                return Some((current_idx, node));
            }
        }
        None
    }
}

fn drive<'a, I, E, F>(
    nodes: impl Iterator<Item = (NodeId, &'a Node<I>)>,
    mut visit: F,
) -> Result<(), E>
where
    I: 'a,
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    for (idx, node) in nodes {
        if visit(idx, node)?.is_break() {
            trace!(?idx, "traversal stopped early");
            break;
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip_all)]
pub fn preorder<I, E, F>(tree: Option<&Tree<I>>, visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    match tree {
        Some(tree) => drive(tree.iter_preorder(), visit),
        None => Ok(()),
    }
}

#[instrument(level = "debug", skip_all)]
pub fn postorder<I, E, F>(tree: Option<&Tree<I>>, visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    match tree {
        Some(tree) => drive(tree.iter_postorder(), visit),
        None => Ok(()),
    }
}

/// Depth-first walk that visits a node after all its descendants.
/// Same order as [`postorder`].
pub fn dfs<I, E, F>(tree: Option<&Tree<I>>, visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    postorder(tree, visit)
}

#[instrument(level = "debug", skip_all)]
pub fn inorder<I, E, F>(tree: Option<&Tree<I>>, visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    match tree {
        Some(tree) => drive(tree.iter_inorder(), visit),
        None => Ok(()),
    }
}

#[instrument(level = "debug", skip_all)]
pub fn bfs<I, E, F>(tree: Option<&Tree<I>>, visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, &Node<I>) -> VisitResult<E>,
{
    match tree {
        Some(tree) => drive(tree.iter_bfs(), visit),
        None => Ok(()),
    }
}

/// Structural equality.
///
/// Trees are equal when their cached sizes match and, pairing nodes level by
/// level from the roots, every pair has equal payloads and the same number
/// of children. An absent tree on either side is never equal.
#[instrument(level = "debug", skip_all)]
pub fn equals<I: Info>(tree: Option<&Tree<I>>, other: Option<&Tree<I>>) -> bool {
    let (Some(tree), Some(other)) = (tree, other) else {
        return false;
    };
    if tree.size() != other.size() {
        return false;
    }

    let mut queue = VecDeque::from([(tree.root(), other.root())]);

    while let Some((left, right)) = queue.pop_front() {
        let (Some(left_node), Some(right_node)) = (tree.node(left), other.node(right)) else {
            return false;
        };
        if !left_node.equals(right_node) {
            trace!(%left_node, %right_node, "payload mismatch");
            return false;
        }

        let left_children: Vec<NodeId> = tree.children(left).collect();
        let right_children: Vec<NodeId> = other.children(right).collect();
        if left_children.len() != right_children.len() {
            return false;
        }
        queue.extend(left_children.into_iter().zip(right_children));
    }

    true
}

impl<I: Info> PartialEq for Tree<I> {
    fn eq(&self, other: &Self) -> bool {
        equals(Some(self), Some(other))
    }
}
