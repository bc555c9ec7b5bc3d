use crate::rbt::{Color, NIL, NodeId, RBTree};
use std::fmt;

/// Widest indentation step a recessed dump uses per level.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Layout of the human-readable structure dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DumpStyle {
    /// Tree read sideways: right subtree first, indentation by depth.
    #[default]
    Recessed,
    /// Pre-order, one line stating each node's relation to its parent.
    Relations,
}

/// Where a node hangs relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Root,
    Left { parent: i32 },
    Right { parent: i32 },
}

/// One line of a structure dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpRow {
    pub depth: usize,
    pub key: i32,
    pub color: Color,
    pub position: Position,
}

impl DumpRow {
    /// Text of the row without indentation.
    pub fn label(&self, style: DumpStyle) -> String {
        match style {
            DumpStyle::Recessed => format!("[{}({})]", self.key, self.color.short()),
            DumpStyle::Relations => match self.position {
                Position::Root => format!("[{}] ({}) is the root", self.key, self.color),
                Position::Left { parent } => {
                    format!("[{}] ({}) is the left child of [{}]", self.key, self.color, parent)
                }
                Position::Right { parent } => {
                    format!("[{}] ({}) is the right child of [{}]", self.key, self.color, parent)
                }
            },
        }
    }

    /// Leading spaces for the row; `width` is clamped to [`MAX_INDENT_WIDTH`].
    pub fn indent(&self, style: DumpStyle, width: usize) -> String {
        match style {
            DumpStyle::Recessed => {
                " ".repeat(self.depth.saturating_mul(width.min(MAX_INDENT_WIDTH)))
            }
            DumpStyle::Relations => String::new(),
        }
    }
}

impl RBTree {
    /// Rows of the structure dump in display order.
    pub fn rows(&self, style: DumpStyle) -> Vec<DumpRow> {
        let mut rows = Vec::with_capacity(self.len());
        if self.root == NIL {
            return rows;
        }

        match style {
            DumpStyle::Recessed => {
                // Reverse in-order so the largest key is printed first.
                let mut stack: Vec<(NodeId, usize)> = Vec::new();
                let mut current = (self.root, 0);
                loop {
                    while current.0 != NIL {
                        stack.push(current);
                        current = (self.nodes[current.0 as usize].right, current.1 + 1);
                    }
                    let Some((node_id, depth)) = stack.pop() else {
                        break;
                    };
                    rows.push(self.row(node_id, depth));
                    current = (self.nodes[node_id as usize].left, depth + 1);
                }
            }
            DumpStyle::Relations => {
                let mut stack = vec![(self.root, 0)];
                while let Some((node_id, depth)) = stack.pop() {
                    rows.push(self.row(node_id, depth));
                    let node = &self.nodes[node_id as usize];
                    if node.right != NIL {
                        stack.push((node.right, depth + 1));
                    }
                    if node.left != NIL {
                        stack.push((node.left, depth + 1));
                    }
                }
            }
        }

        rows
    }

    fn row(&self, node_id: NodeId, depth: usize) -> DumpRow {
        let node = &self.nodes[node_id as usize];
        let position = if node.parent == NIL {
            Position::Root
        } else {
            let parent = &self.nodes[node.parent as usize];
            if parent.left == node_id {
                Position::Left { parent: parent.key }
            } else {
                Position::Right { parent: parent.key }
            }
        };

        DumpRow {
            depth,
            key: node.key,
            color: node.color,
            position,
        }
    }

    /// Multi-line structure dump, four spaces per level.
    pub fn dump(&self, style: DumpStyle) -> String {
        let mut out = String::new();
        for row in self.rows(style) {
            out.push_str(&row.indent(style, 4));
            out.push_str(&row.label(style));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for RBTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty tree");
        }
        write!(f, "{}", self.dump(DumpStyle::Recessed))
    }
}
