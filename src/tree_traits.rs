use std::collections::HashMap;
use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::{NodeId, Tree};

/// Conversion into a `termtree::Tree<String>` for display.
pub trait TreeConvert {
    fn to_termtree(&self) -> TermTree<String>;
}

impl<I: fmt::Display> TreeConvert for Tree<I> {
    /// Builds the termtree bottom-up from a postorder walk, so deep trees do
    /// not recurse.
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> TermTree<String> {
        let mut built: HashMap<NodeId, TermTree<String>> = HashMap::new();

        for (idx, node) in self.iter_postorder() {
            let leaves: Vec<TermTree<String>> = self
                .children(idx)
                .filter_map(|child| built.remove(&child))
                .collect();
            built.insert(idx, TermTree::new(node.info().to_string()).with_leaves(leaves));
        }

        built
            .remove(&self.root())
            .unwrap_or_else(|| TermTree::new(String::new()))
    }
}
