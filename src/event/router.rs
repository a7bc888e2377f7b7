//! Pointer routing: hit-testing and bubbling dispatch.
//!
//! Routing is a two-phase walk. [`hit_test`] finds the deepest node under a
//! point, preferring later-painted (topmost) siblings; [`dispatch`] then
//! bubbles the event from that node toward the root until some node's
//! `on_event` capability consumes it.

use crate::dirty::DirtyTracker;
use crate::geometry::Point;
use crate::tree::{NodeId, Tree};

use super::input::PointerEvent;

/// Find the deepest node under `point`, starting the search at `root`.
///
/// Descends depth-first, visiting children in reverse insertion order so the
/// topmost-painted sibling wins when rects overlap. Hidden subtrees are
/// pruned wholesale; invisible nodes are skipped but their children are
/// still considered. A node matches when its `hit_test` capability says so,
/// or, absent that capability, when its absolute rect contains the point.
pub fn hit_test(tree: &Tree, root: NodeId, point: Point) -> Option<NodeId> {
    let node = tree.node(root)?;
    if node.hidden {
        return None;
    }

    let abs = tree.abs_rect(root)?;

    // Children first: a deeper match shadows this node.
    for child in tree.children_rev(root) {
        if let Some(hit) = hit_test(tree, child, point) {
            return Some(hit);
        }
    }

    if !node.visible {
        return None;
    }
    let matches = match node.caps.hit_test {
        Some(f) => f(tree, root, abs, point),
        None => abs.contains(point),
    };
    matches.then_some(root)
}

/// Deliver a pointer event to `target`, bubbling toward the root.
///
/// Walks from `target` through its ancestors, invoking each node's
/// `on_event` capability until one returns `true`. Returns the id of the
/// consuming node, or `None` if the event fell through unconsumed. Nodes
/// without the capability are transparent.
pub fn dispatch(
    tree: &mut Tree,
    dirty: &mut DirtyTracker,
    target: NodeId,
    event: &PointerEvent,
) -> Option<NodeId> {
    let mut chain = vec![target];
    chain.extend(tree.ancestors(target));

    for id in chain {
        // Copy the fn pointer out so the handler can mutate the tree.
        let handler = tree.node(id).and_then(|n| n.caps.on_event);
        if let Some(handler) = handler {
            if handler(tree, dirty, id, event) {
                tracing::trace!(?id, ?target, "pointer event consumed");
                return Some(id);
            }
        }
    }
    tracing::trace!(?target, "pointer event unconsumed");
    None
}

/// Hit-test then dispatch in one step. Returns the consuming node, if any.
pub fn route(
    tree: &mut Tree,
    dirty: &mut DirtyTracker,
    root: NodeId,
    event: &PointerEvent,
) -> Option<NodeId> {
    let target = hit_test(tree, root, event.pos)?;
    dispatch(tree, dirty, target, event)
}

// ===========================================================================
// Tests
// ===========================================================================
