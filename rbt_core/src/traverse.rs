use crate::rbt::{NIL, NodeId, RBTree};

impl RBTree {
    /// Keys in node, left, right order.
    pub fn preorder(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push(self.root);
        }

        while let Some(node_id) = stack.pop() {
            let node = &self.nodes[node_id as usize];
            keys.push(node.key);
            if node.right != NIL {
                stack.push(node.right);
            }
            if node.left != NIL {
                stack.push(node.left);
            }
        }

        keys
    }

    /// Keys in ascending order.
    pub fn inorder(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;

        while current != NIL || !stack.is_empty() {
            while current != NIL {
                stack.push(current);
                current = self.nodes[current as usize].left;
            }
            if let Some(node_id) = stack.pop() {
                keys.push(self.nodes[node_id as usize].key);
                current = self.nodes[node_id as usize].right;
            }
        }

        keys
    }

    /// Keys in left, right, node order.
    pub fn postorder(&self) -> Vec<i32> {
        // Node, right, left reversed.
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push(self.root);
        }

        while let Some(node_id) = stack.pop() {
            let node = &self.nodes[node_id as usize];
            keys.push(node.key);
            if node.left != NIL {
                stack.push(node.left);
            }
            if node.right != NIL {
                stack.push(node.right);
            }
        }

        keys.reverse();
        keys
    }

    /// Lazy ascending iterator over the keys.
    pub fn iter(&self) -> Iter<'_> {
        let next = if self.root == NIL {
            NIL
        } else {
            self.minimum(self.root)
        };

        Iter {
            tree: self,
            next,
            remaining: self.len(),
        }
    }
}

/// Ascending key iterator returned by [`RBTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    tree: &'a RBTree,
    next: NodeId,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.next == NIL {
            return None;
        }

        let key = self.tree.nodes[self.next as usize].key;
        self.next = self.tree.successor(self.next).unwrap_or(NIL);
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RBTree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RBTree {
        let mut tree = RBTree::new();
        for key in [40, 20, 60, 10, 30, 50, 70] {
            assert!(tree.insert(key).is_ok());
        }
        tree
    }

    #[test]
    fn test_orders_on_balanced_tree() {
        let tree = sample();
        assert_eq!(tree.preorder(), vec![40, 20, 10, 30, 60, 50, 70]);
        assert_eq!(tree.inorder(), vec![10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(tree.postorder(), vec![10, 30, 20, 50, 70, 60, 40]);
    }

    #[test]
    fn test_orders_are_recomputed() {
        let mut tree = sample();
        let first = tree.inorder();
        assert_eq!(tree.inorder(), first);

        assert!(tree.delete(40).is_ok());
        assert_eq!(tree.inorder(), vec![10, 20, 30, 50, 60, 70]);
        assert_eq!(tree.preorder().len(), 6);
        assert_eq!(tree.postorder().len(), 6);
    }

    #[test]
    fn test_empty_orders() {
        let tree = RBTree::new();
        assert!(tree.preorder().is_empty());
        assert!(tree.inorder().is_empty());
        assert!(tree.postorder().is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_iter_matches_inorder() {
        let mut tree = RBTree::new();
        for key in [5, -1, 9, 3, 3, 12, 0] {
            let _ = tree.insert(key);
        }

        let iter = tree.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<_>>(), tree.inorder());

        let mut via_ref = Vec::new();
        for key in &tree {
            via_ref.push(key);
        }
        assert_eq!(via_ref, vec![-1, 0, 3, 5, 9, 12]);
    }
}
