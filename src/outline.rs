//! Indented outline text → [`Tree<String>`].
//!
//! One node per non-blank line, depth given by leading whitespace:
//!
//! ```text
//! A
//!   B
//!   C
//!     D
//! ```
//!
//! Lines whose first non-blank character is `#` are comments. The first
//! node is the root and every later node must be indented deeper than it.
//! A dedent must land exactly on the indentation of an earlier sibling.

use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::{NodeArena, NodeId, Tree};
use crate::errors::{ArborError, ArborResult};

/// Parses outline text. Tabs count as `tab_width` columns.
#[instrument(level = "debug", skip(content))]
pub fn parse(content: &str, tab_width: usize) -> ArborResult<Tree<String>> {
    let mut arena = NodeArena::new();
    // Path from the root to the previous line: (indent, node)
    let mut stack: Vec<(usize, NodeId)> = Vec::new();

    for (n, line) in content.lines().enumerate() {
        let line_no = n + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = indent_width(line, tab_width);
        let id = arena.new_node(trimmed.to_string());

        let Some(&(root_indent, _)) = stack.first() else {
            stack.push((indent, id));
            continue;
        };
        if indent == root_indent {
            return Err(ArborError::outline(line_no, "multiple roots"));
        }
        if indent < root_indent {
            return Err(ArborError::outline(line_no, "dedent past the root"));
        }

        let mut last_popped = None;
        while let Some(&(top_indent, _)) = stack.last() {
            if top_indent < indent {
                break;
            }
            last_popped = Some(top_indent);
            stack.pop();
        }
        if matches!(last_popped, Some(sibling_indent) if sibling_indent != indent) {
            return Err(ArborError::outline(
                line_no,
                "dedent does not match any outer indentation level",
            ));
        }

        let Some(&(_, parent)) = stack.last() else {
            return Err(ArborError::outline(line_no, "dedent past the root"));
        };
        arena.append_children(parent, [id])?;
        stack.push((indent, id));
    }

    let root = stack
        .first()
        .map(|&(_, id)| id)
        .ok_or_else(|| ArborError::outline(0, "empty outline"))?;
    debug!(nodes = arena.len(), "outline parsed");
    Tree::new(arena, root).ok_or_else(|| ArborError::outline(0, "empty outline"))
}

/// Reads and parses an outline file; `-` reads standard input.
#[instrument(level = "debug")]
pub fn read(path: &Path, tab_width: usize) -> ArborResult<Tree<String>> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| ArborError::io("read stdin", e))?;
        buffer
    } else {
        if !path.exists() {
            return Err(ArborError::FileNotFound(path.to_path_buf()));
        }
        std::fs::read_to_string(path)
            .map_err(|e| ArborError::io(format!("read {}", path.display()), e))?
    };
    parse(&content, tab_width)
}

fn indent_width(line: &str, tab_width: usize) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}
