use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by tree operations.
///
/// Every variant except `Alloc` and `TreeFull` is a rejection: the tree is
/// left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("key {0} already exists")]
    AlreadyExists(i32),
    #[error("key {0} not found")]
    NotFound(i32),
    #[error("tree is empty")]
    EmptyTree,
    /// Every `NodeId` below the sentinel is in use.
    #[error("tree is full")]
    TreeFull,
    #[error("node allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// First broken invariant found by [`RBTree::validate`](crate::RBTree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root {key} is red")]
    RedRoot { key: i32 },
    #[error("root {key} has a parent")]
    RootHasParent { key: i32 },
    #[error("red node {parent} has red child {child}")]
    RedRedEdge { parent: i32, child: i32 },
    #[error("black height differs below {key}: left {left}, right {right}")]
    BlackHeightMismatch { key: i32, left: usize, right: usize },
    #[error("keys out of order: {prev} before {next}")]
    OrderViolation { prev: i32, next: i32 },
    #[error("child {key} does not point back to its parent")]
    BrokenParentLink { key: i32 },
    #[error("tree reports {expected} nodes but {found} are reachable")]
    LengthMismatch { expected: usize, found: usize },
}
