use crate::error::{TreeError, TreeResult};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Handle of a node slot in the tree arena.
///
/// Handles stay valid until the node is deleted; a deleted slot may be
/// handed out again by a later insert.
pub type NodeId = u32;
pub(crate) const NIL: NodeId = u32::MAX;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn short(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Black => 'B',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) color: Color,
    pub(crate) key: i32,
}

impl Node {
    fn new(key: i32, parent: NodeId) -> Self {
        Self {
            left: NIL,
            right: NIL,
            parent,
            color: Color::Red,
            key,
        }
    }
}

/// Red-black tree of unique `i32` keys.
///
/// Nodes live in a `Vec` and refer to each other by [`NodeId`]. Parent
/// handles are back-references only; dropping the tree drops the arena.
#[derive(Debug, Clone)]
pub struct RBTree {
    pub(crate) root: NodeId,
    pub(crate) nodes: Vec<Node>,
    free: Vec<NodeId>,
    len: usize,
}

impl Default for RBTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RBTree {
    pub fn new() -> Self {
        Self {
            root: NIL,
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Drop every node at once.
    pub fn clear(&mut self) {
        self.root = NIL;
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
    }

    pub fn insert(&mut self, key: i32) -> TreeResult<()> {
        let mut current = self.root;
        let mut parent = NIL;
        let mut is_left_child = false;

        while current != NIL {
            parent = current;
            let node = &self.nodes[current as usize];

            match key.cmp(&node.key) {
                Ordering::Less => {
                    current = node.left;
                    is_left_child = true;
                }
                Ordering::Greater => {
                    current = node.right;
                    is_left_child = false;
                }
                Ordering::Equal => {
                    debug!(key, "insert rejected, key already present");
                    return Err(TreeError::AlreadyExists(key));
                }
            }
        }

        let new_id = self.allocate(key, parent)?;

        if parent == NIL {
            self.root = new_id;
        } else if is_left_child {
            self.nodes[parent as usize].left = new_id;
        } else {
            self.nodes[parent as usize].right = new_id;
        }
        self.len += 1;

        self.insert_fixup(new_id);
        Ok(())
    }

    fn allocate(&mut self, key: i32, parent: NodeId) -> TreeResult<NodeId> {
        let node = Node::new(key, parent);

        if let Some(id) = self.free.pop() {
            self.nodes[id as usize] = node;
            return Ok(id);
        }

        if self.nodes.len() >= NIL as usize {
            return Err(TreeError::TreeFull);
        }
        self.nodes.try_reserve(1)?;

        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        Ok(id)
    }

    fn release(&mut self, id: NodeId) {
        self.len -= 1;
        if self.len == 0 {
            // Nothing is linked any more, reclaim the whole arena.
            self.nodes.clear();
            self.free.clear();
            return;
        }

        let node = &mut self.nodes[id as usize];
        node.left = NIL;
        node.right = NIL;
        node.parent = NIL;
        self.free.push(id);
    }

    fn insert_fixup(&mut self, mut node_id: NodeId) {
        while self.is_red(self.nodes[node_id as usize].parent) {
            let parent_id = self.nodes[node_id as usize].parent;
            // A red parent is never the root, so the grandparent exists.
            let grandparent_id = self.nodes[parent_id as usize].parent;

            if parent_id == self.nodes[grandparent_id as usize].left {
                let uncle_id = self.nodes[grandparent_id as usize].right;

                if self.is_red(uncle_id) {
                    trace!(key = self.nodes[node_id as usize].key, "insert fixup: red uncle");
                    self.nodes[parent_id as usize].color = Color::Black;
                    self.nodes[uncle_id as usize].color = Color::Black;
                    self.nodes[grandparent_id as usize].color = Color::Red;
                    node_id = grandparent_id;
                } else {
                    if node_id == self.nodes[parent_id as usize].right {
                        trace!(key = self.nodes[node_id as usize].key, "insert fixup: inner child");
                        self.rotate_left(parent_id);
                        node_id = parent_id;
                    }
                    // Re-read after a possible rotation: node_id and its parent swapped roles.
                    let parent_id = self.nodes[node_id as usize].parent;
                    let grandparent_id = self.nodes[parent_id as usize].parent;
                    trace!(key = self.nodes[node_id as usize].key, "insert fixup: outer child");
                    self.nodes[parent_id as usize].color = Color::Black;
                    self.nodes[grandparent_id as usize].color = Color::Red;
                    self.rotate_right(grandparent_id);
                }
            } else {
                let uncle_id = self.nodes[grandparent_id as usize].left;

                if self.is_red(uncle_id) {
                    trace!(key = self.nodes[node_id as usize].key, "insert fixup: red uncle");
                    self.nodes[parent_id as usize].color = Color::Black;
                    self.nodes[uncle_id as usize].color = Color::Black;
                    self.nodes[grandparent_id as usize].color = Color::Red;
                    node_id = grandparent_id;
                } else {
                    if node_id == self.nodes[parent_id as usize].left {
                        trace!(key = self.nodes[node_id as usize].key, "insert fixup: inner child");
                        self.rotate_right(parent_id);
                        node_id = parent_id;
                    }
                    let parent_id = self.nodes[node_id as usize].parent;
                    let grandparent_id = self.nodes[parent_id as usize].parent;
                    trace!(key = self.nodes[node_id as usize].key, "insert fixup: outer child");
                    self.nodes[parent_id as usize].color = Color::Black;
                    self.nodes[grandparent_id as usize].color = Color::Red;
                    self.rotate_left(grandparent_id);
                }
            }
        }

        self.nodes[self.root as usize].color = Color::Black;
    }

    pub fn delete(&mut self, key: i32) -> TreeResult<()> {
        let Some(z) = self.search(key) else {
            debug!(key, "delete rejected, key not present");
            return Err(TreeError::NotFound(key));
        };

        let z_left = self.nodes[z as usize].left;
        let z_right = self.nodes[z as usize].right;

        // `x` is the node that moves into the vacated position (possibly NIL),
        // `x_parent` tracks its parent since NIL carries no parent handle.
        let removed_color;
        let x;
        let x_parent;

        if z_left == NIL {
            removed_color = self.nodes[z as usize].color;
            x = z_right;
            x_parent = self.nodes[z as usize].parent;
            self.transplant(z, z_right);
        } else if z_right == NIL {
            removed_color = self.nodes[z as usize].color;
            x = z_left;
            x_parent = self.nodes[z as usize].parent;
            self.transplant(z, z_left);
        } else {
            let successor = self.minimum(z_right);
            removed_color = self.nodes[successor as usize].color;
            x = self.nodes[successor as usize].right;

            if self.nodes[successor as usize].parent == z {
                x_parent = successor;
            } else {
                x_parent = self.nodes[successor as usize].parent;
                self.transplant(successor, x);
                self.nodes[successor as usize].right = z_right;
                self.nodes[z_right as usize].parent = successor;
            }

            self.transplant(z, successor);
            self.nodes[successor as usize].left = z_left;
            self.nodes[z_left as usize].parent = successor;
            self.nodes[successor as usize].color = self.nodes[z as usize].color;
        }

        self.release(z);

        if removed_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }
        Ok(())
    }

    /// Put `v` where `u` hangs under its parent (or at the root).
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let u_parent = self.nodes[u as usize].parent;

        if u_parent == NIL {
            self.root = v;
        } else if u == self.nodes[u_parent as usize].left {
            self.nodes[u_parent as usize].left = v;
        } else {
            self.nodes[u_parent as usize].right = v;
        }

        if v != NIL {
            self.nodes[v as usize].parent = u_parent;
        }
    }

    fn delete_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.is_black(x) {
            if x == self.nodes[parent as usize].left {
                let mut sibling = self.nodes[parent as usize].right;
                debug_assert_ne!(sibling, NIL, "double-black node without sibling");

                if self.is_red(sibling) {
                    trace!("delete fixup: red sibling");
                    self.nodes[sibling as usize].color = Color::Black;
                    self.nodes[parent as usize].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.nodes[parent as usize].right;
                }

                let near = self.nodes[sibling as usize].left;
                let far = self.nodes[sibling as usize].right;

                if self.is_black(near) && self.is_black(far) {
                    trace!("delete fixup: black sibling, black children");
                    self.nodes[sibling as usize].color = Color::Red;
                    x = parent;
                    parent = self.nodes[x as usize].parent;
                } else {
                    if self.is_black(far) {
                        trace!("delete fixup: near child red");
                        self.nodes[near as usize].color = Color::Black;
                        self.nodes[sibling as usize].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.nodes[parent as usize].right;
                    }

                    trace!("delete fixup: far child red");
                    let far = self.nodes[sibling as usize].right;
                    self.nodes[sibling as usize].color = self.nodes[parent as usize].color;
                    self.nodes[parent as usize].color = Color::Black;
                    self.nodes[far as usize].color = Color::Black;
                    self.rotate_left(parent);
                    x = self.root;
                    parent = NIL;
                }
            } else {
                let mut sibling = self.nodes[parent as usize].left;
                debug_assert_ne!(sibling, NIL, "double-black node without sibling");

                if self.is_red(sibling) {
                    trace!("delete fixup: red sibling");
                    self.nodes[sibling as usize].color = Color::Black;
                    self.nodes[parent as usize].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.nodes[parent as usize].left;
                }

                let near = self.nodes[sibling as usize].right;
                let far = self.nodes[sibling as usize].left;

                if self.is_black(near) && self.is_black(far) {
                    trace!("delete fixup: black sibling, black children");
                    self.nodes[sibling as usize].color = Color::Red;
                    x = parent;
                    parent = self.nodes[x as usize].parent;
                } else {
                    if self.is_black(far) {
                        trace!("delete fixup: near child red");
                        self.nodes[near as usize].color = Color::Black;
                        self.nodes[sibling as usize].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.nodes[parent as usize].left;
                    }

                    trace!("delete fixup: far child red");
                    let far = self.nodes[sibling as usize].left;
                    self.nodes[sibling as usize].color = self.nodes[parent as usize].color;
                    self.nodes[parent as usize].color = Color::Black;
                    self.nodes[far as usize].color = Color::Black;
                    self.rotate_right(parent);
                    x = self.root;
                    parent = NIL;
                }
            }
        }

        if x != NIL {
            self.nodes[x as usize].color = Color::Black;
        }
    }

    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.nodes[x as usize].right;
        debug_assert_ne!(y, NIL, "left rotation needs a right child");
        let y_left = self.nodes[y as usize].left;
        let x_parent = self.nodes[x as usize].parent;

        self.nodes[x as usize].right = y_left;
        if y_left != NIL {
            self.nodes[y_left as usize].parent = x;
        }

        self.nodes[y as usize].parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.nodes[x_parent as usize].left {
            self.nodes[x_parent as usize].left = y;
        } else {
            self.nodes[x_parent as usize].right = y;
        }

        self.nodes[y as usize].left = x;
        self.nodes[x as usize].parent = y;
    }

    pub(crate) fn rotate_right(&mut self, y: NodeId) {
        let x = self.nodes[y as usize].left;
        debug_assert_ne!(x, NIL, "right rotation needs a left child");
        let x_right = self.nodes[x as usize].right;
        let y_parent = self.nodes[y as usize].parent;

        self.nodes[y as usize].left = x_right;
        if x_right != NIL {
            self.nodes[x_right as usize].parent = y;
        }

        self.nodes[x as usize].parent = y_parent;
        if y_parent == NIL {
            self.root = x;
        } else if y == self.nodes[y_parent as usize].right {
            self.nodes[y_parent as usize].right = x;
        } else {
            self.nodes[y_parent as usize].left = x;
        }

        self.nodes[x as usize].right = y;
        self.nodes[y as usize].parent = x;
    }

    pub fn search(&self, key: i32) -> Option<NodeId> {
        let mut current = self.root;

        while current != NIL {
            let node = &self.nodes[current as usize];
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }

        None
    }

    pub fn contains(&self, key: i32) -> bool {
        self.search(key).is_some()
    }

    pub fn min(&self) -> TreeResult<i32> {
        if self.root == NIL {
            return Err(TreeError::EmptyTree);
        }
        Ok(self.nodes[self.minimum(self.root) as usize].key)
    }

    pub fn max(&self) -> TreeResult<i32> {
        if self.root == NIL {
            return Err(TreeError::EmptyTree);
        }
        Ok(self.nodes[self.maximum(self.root) as usize].key)
    }

    /// Leftmost node of a non-empty subtree.
    pub(crate) fn minimum(&self, mut node_id: NodeId) -> NodeId {
        while self.nodes[node_id as usize].left != NIL {
            node_id = self.nodes[node_id as usize].left;
        }
        node_id
    }

    /// Rightmost node of a non-empty subtree.
    pub(crate) fn maximum(&self, mut node_id: NodeId) -> NodeId {
        while self.nodes[node_id as usize].right != NIL {
            node_id = self.nodes[node_id as usize].right;
        }
        node_id
    }

    /// In-order successor of `node_id`, `None` for the largest key or a
    /// stale handle.
    pub fn successor(&self, node_id: NodeId) -> Option<NodeId> {
        let right = self.node(node_id)?.right;
        if right != NIL {
            return Some(self.minimum(right));
        }

        let mut child = node_id;
        let mut parent = self.nodes[node_id as usize].parent;
        while parent != NIL && child == self.nodes[parent as usize].right {
            child = parent;
            parent = self.nodes[parent as usize].parent;
        }
        link(parent)
    }

    /// In-order predecessor of `node_id`, `None` for the smallest key or a
    /// stale handle.
    pub fn predecessor(&self, node_id: NodeId) -> Option<NodeId> {
        let left = self.node(node_id)?.left;
        if left != NIL {
            return Some(self.maximum(left));
        }

        let mut child = node_id;
        let mut parent = self.nodes[node_id as usize].parent;
        while parent != NIL && child == self.nodes[parent as usize].left {
            child = parent;
            parent = self.nodes[parent as usize].parent;
        }
        link(parent)
    }

    pub fn root(&self) -> Option<NodeId> {
        link(self.root)
    }

    /// Linked node behind `node_id`; `None` once the node was deleted.
    ///
    /// A free slot is unlinked (no parent) and is never the root.
    fn node(&self, node_id: NodeId) -> Option<&Node> {
        let node = self.nodes.get(node_id as usize)?;
        (node_id == self.root || node.parent != NIL).then_some(node)
    }

    pub fn key(&self, node_id: NodeId) -> Option<i32> {
        self.node(node_id).map(|node| node.key)
    }

    pub fn color(&self, node_id: NodeId) -> Option<Color> {
        self.node(node_id).map(|node| node.color)
    }

    pub fn left(&self, node_id: NodeId) -> Option<NodeId> {
        self.node(node_id).and_then(|node| link(node.left))
    }

    pub fn right(&self, node_id: NodeId) -> Option<NodeId> {
        self.node(node_id).and_then(|node| link(node.right))
    }

    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.node(node_id).and_then(|node| link(node.parent))
    }

    /// NIL counts as black.
    pub(crate) fn is_black(&self, node_id: NodeId) -> bool {
        node_id == NIL || self.nodes[node_id as usize].color == Color::Black
    }

    pub(crate) fn is_red(&self, node_id: NodeId) -> bool {
        !self.is_black(node_id)
    }
}

fn link(node_id: NodeId) -> Option<NodeId> {
    (node_id != NIL).then_some(node_id)
}
