//! Red-black tree over `i32` keys backed by a node arena.

mod dump;
mod error;
mod rbt;
mod traverse;
mod validate;

pub use dump::{DumpRow, DumpStyle, MAX_INDENT_WIDTH, Position};
pub use error::{InvariantViolation, TreeError, TreeResult};
pub use rbt::{Color, NodeId, RBTree};
pub use traverse::Iter;
