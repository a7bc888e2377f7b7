//! Scene graph: node storage, parent/child structure, traversal.

pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Caps, ChangeFn, DestroyFn, DrawFn, EventFn, HitTestFn, NodeData, NodeId, NodeKind, Payload};
pub use tree::{Children, ChildrenRev, Tree};
