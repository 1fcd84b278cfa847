//! Box-drawing rendering of a [`Tree`].
//!
//! ```text
//! A
//! ├── B
//! └── C
//!     └── D
//! ```
//!
//! The root is printed bare; every other node starts a new line with the
//! indentation inherited from its ancestors and a branch connector. There is
//! no trailing newline.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{views, NodeId, Tree};
use crate::errors::{ArborError, ArborResult};

/// Connector glyphs used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Connector for a node that has a following sibling
    pub branch: String,
    /// Connector for the last child of its parent
    pub last_branch: String,
    /// Indentation below an ancestor that has a following sibling
    pub pipe: String,
    /// Indentation below an ancestor that is a last child
    pub blank: String,
}

impl RenderStyle {
    pub fn unicode() -> Self {
        Self {
            branch: "├── ".into(),
            last_branch: "└── ".into(),
            pipe: "│   ".into(),
            blank: "    ".into(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            branch: "|-- ".into(),
            last_branch: "`-- ".into(),
            pipe: "|   ".into(),
            blank: "    ".into(),
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Per-node layout, registered by the parent before the node is visited.
struct LineInfo {
    indent: String,
    has_next: bool,
    is_root: bool,
}

/// Writes the rendered tree to `w`.
///
/// Fails with [`ArborError::Write`] if the sink reports an error and with
/// [`ArborError::ShortWrite`] if it accepts fewer bytes than offered.
#[instrument(level = "debug", skip_all)]
pub fn write_tree<I, W>(tree: &Tree<I>, w: &mut W, style: &RenderStyle) -> ArborResult<()>
where
    I: fmt::Display,
    W: Write,
{
    let mut table: HashMap<NodeId, LineInfo> = HashMap::new();
    table.insert(
        tree.root(),
        LineInfo {
            indent: String::new(),
            has_next: false,
            is_root: true,
        },
    );

    views::preorder::<_, ArborError, _>(Some(tree), |idx, node| {
        // Preorder visits parents first, so every node has been registered.
        let Some(info) = table.remove(&idx) else {
            return Ok(ControlFlow::Continue(()));
        };

        if !info.is_root {
            let connector = if info.has_next {
                &style.branch
            } else {
                &style.last_branch
            };
            let prefix = format!("\n{}{}", info.indent, connector);
            write_exact(w, prefix.as_bytes())?;
        }
        write_exact(w, node.info().to_string().as_bytes())?;

        if node.is_leaf() {
            return Ok(ControlFlow::Continue(()));
        }

        let child_indent = if info.is_root {
            String::new()
        } else if info.has_next {
            format!("{}{}", info.indent, style.pipe)
        } else {
            format!("{}{}", info.indent, style.blank)
        };
        let last = node.last_child();
        for child in tree.children(idx) {
            table.insert(
                child,
                LineInfo {
                    indent: child_indent.clone(),
                    has_next: Some(child) != last,
                    is_root: false,
                },
            );
        }
        Ok(ControlFlow::Continue(()))
    })
}

/// Renders the tree into a `String`.
pub fn to_string<I: fmt::Display>(tree: &Tree<I>, style: &RenderStyle) -> ArborResult<String> {
    let mut buffer = Vec::new();
    write_tree(tree, &mut buffer, style)?;
    String::from_utf8(buffer)
        .map_err(|e| ArborError::io("render buffer", io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_exact<W: Write>(w: &mut W, data: &[u8]) -> ArborResult<()> {
    let written = w.write(data).map_err(ArborError::Write)?;
    if written != data.len() {
        return Err(ArborError::ShortWrite {
            expected: data.len(),
            written,
        });
    }
    Ok(())
}

impl<I: fmt::Display> fmt::Display for Tree<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = to_string(self, &RenderStyle::default()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
