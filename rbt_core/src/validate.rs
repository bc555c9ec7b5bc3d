use crate::error::InvariantViolation;
use crate::rbt::{Color, NIL, NodeId, RBTree};

impl RBTree {
    /// Check every structural and colouring invariant.
    ///
    /// Returns the black-height of the root (NIL leaves excluded) or the first
    /// violation found.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.root == NIL {
            return match self.len() {
                0 => Ok(0),
                expected => Err(InvariantViolation::LengthMismatch { expected, found: 0 }),
            };
        }

        let root = &self.nodes[self.root as usize];
        if root.color != Color::Black {
            return Err(InvariantViolation::RedRoot { key: root.key });
        }
        if root.parent != NIL {
            return Err(InvariantViolation::RootHasParent { key: root.key });
        }

        let keys = self.inorder();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(InvariantViolation::OrderViolation {
                prev: pair[0],
                next: pair[1],
            });
        }
        if keys.len() != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len(),
                found: keys.len(),
            });
        }

        self.check_subtree(self.root)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Black nodes from the root down to any NIL leaf.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;

        while current != NIL {
            if self.nodes[current as usize].color == Color::Black {
                height += 1;
            }
            current = self.nodes[current as usize].left;
        }

        height
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }

        while let Some((node_id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[node_id as usize];
            if node.left != NIL {
                stack.push((node.left, depth + 1));
            }
            if node.right != NIL {
                stack.push((node.right, depth + 1));
            }
        }

        deepest
    }

    // Recursion depth is bounded by the height, which is what is being checked.
    fn check_subtree(&self, node_id: NodeId) -> Result<usize, InvariantViolation> {
        if node_id == NIL {
            return Ok(0);
        }

        let node = &self.nodes[node_id as usize];
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            let child_node = &self.nodes[child as usize];
            if child_node.parent != node_id {
                return Err(InvariantViolation::BrokenParentLink { key: child_node.key });
            }
            if node.color == Color::Red && child_node.color == Color::Red {
                return Err(InvariantViolation::RedRedEdge {
                    parent: node.key,
                    child: child_node.key,
                });
            }
        }

        let left = self.check_subtree(node.left)?;
        let right = self.check_subtree(node.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                key: node.key,
                left,
                right,
            });
        }

        Ok(left + usize::from(node.color == Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(keys: &[i32]) -> RBTree {
        let mut tree = RBTree::new();
        for &key in keys {
            assert!(tree.insert(key).is_ok());
        }
        tree
    }

    #[test]
    fn test_valid_tree_reports_black_height() {
        let tree = tree_from(&[40, 20, 60, 10, 30, 50, 70]);
        assert_eq!(tree.validate(), Ok(2));
        assert_eq!(tree.black_height(), 2);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree = RBTree::new();
        assert_eq!(tree.validate(), Ok(0));
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = tree_from(&[1, 2]);
        tree.nodes[tree.root as usize].color = Color::Red;
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot { key: 1 }));
    }

    #[test]
    fn test_detects_red_red_edge() {
        let mut tree = tree_from(&[2, 1, 3, 0]);
        let one = tree.search(1).expect("1");
        tree.nodes[one as usize].color = Color::Red;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRedEdge { parent: 1, child: 0 })
        );
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_from(&[2, 1, 3]);
        let three = tree.search(3).expect("3");
        tree.nodes[three as usize].color = Color::Black;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch { key: 2, left: 0, right: 1 })
        );
    }

    #[test]
    fn test_detects_order_violation() {
        let mut tree = tree_from(&[2, 1, 3]);
        let one = tree.search(1).expect("1");
        tree.nodes[one as usize].key = 5;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OrderViolation { prev: 5, next: 2 })
        );
    }

    #[test]
    fn test_height_stays_logarithmic_for_sorted_input() {
        let keys: Vec<i32> = (0..1024).collect();
        let tree = tree_from(&keys);
        let bound = (2.0 * ((tree.len() + 1) as f64).log2()).floor() as usize;
        assert!(tree.height() <= bound);
        assert!(tree.is_valid());
    }
}
