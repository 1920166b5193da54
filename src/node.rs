//! Arena nodes for the level ladder.
//!
//! Nodes never own each other. Every neighbor relation is an index into the
//! list's node arena, so the cyclic `left`/`right` links and the `down` tower
//! links need no reference counting.

use std::cmp::Ordering;

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// Null index marker.
pub(crate) const NULL: Idx = Idx::MAX;

/// Position of a node within its level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Left sentinel, ordered before every key.
    Head,
    /// Ordinary value node.
    Middle,
    /// Right sentinel, ordered after every key.
    Tail,
}

/// A node in one level of the ladder.
///
/// Only level-0 nodes hold the value itself. A tower node on a higher level
/// points at its level-0 node through `base` and compares through it, so a
/// value is stored once no matter how tall its tower grows.
pub(crate) struct Node<T> {
    /// `Some` for level-0 middle nodes until they are released.
    pub(crate) value: Option<T>,
    pub(crate) kind: NodeKind,
    /// Same-level neighbor towards the head. A head points at itself.
    pub(crate) left: Idx,
    /// Same-level neighbor towards the tail. `NULL` only for tails.
    pub(crate) right: Idx,
    /// Same-key node one level closer to the base. `NULL` on level 0.
    pub(crate) down: Idx,
    /// The level-0 node of this tower. `NULL` for sentinels.
    pub(crate) base: Idx,
}

impl<T> Node<T> {
    pub(crate) fn head() -> Self {
        Node::sentinel(NodeKind::Head)
    }

    pub(crate) fn tail() -> Self {
        Node::sentinel(NodeKind::Tail)
    }

    fn sentinel(kind: NodeKind) -> Self {
        Node {
            value: None,
            kind,
            left: NULL,
            right: NULL,
            down: NULL,
            base: NULL,
        }
    }

    /// A level-0 node. Its `base` is set to its own index once allocated.
    pub(crate) fn value(value: T) -> Self {
        Node {
            value: Some(value),
            kind: NodeKind::Middle,
            left: NULL,
            right: NULL,
            down: NULL,
            base: NULL,
        }
    }

    /// A tower node stacked on top of `down`, sharing the value held at `base`.
    pub(crate) fn tower(base: Idx, down: Idx) -> Self {
        Node {
            value: None,
            kind: NodeKind::Middle,
            left: NULL,
            right: NULL,
            down,
            base,
        }
    }

    pub(crate) fn is_head(&self) -> bool {
        self.kind == NodeKind::Head
    }

    pub(crate) fn is_tail(&self) -> bool {
        self.kind == NodeKind::Tail
    }

    /// Fixed order of a sentinel against any key: HEAD is -inf, TAIL is +inf.
    /// `None` for middle nodes, which compare through the list's comparator.
    pub(crate) fn sentinel_order(&self) -> Option<Ordering> {
        match self.kind {
            NodeKind::Head => Some(Ordering::Less),
            NodeKind::Tail => Some(Ordering::Greater),
            NodeKind::Middle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_bound_every_key() {
        assert_eq!(Node::<i32>::head().sentinel_order(), Some(Ordering::Less));
        assert_eq!(Node::<i32>::tail().sentinel_order(), Some(Ordering::Greater));
        assert_eq!(Node::value(5).sentinel_order(), None);
        assert_eq!(Node::<i32>::tower(0, 0).sentinel_order(), None);
    }

    #[test]
    fn tower_nodes_hold_no_value() {
        let node: Node<String> = Node::tower(3, 7);
        assert!(node.value.is_none());
        assert_eq!(node.base, 3);
        assert_eq!(node.down, 7);
        assert_eq!(node.kind, NodeKind::Middle);
    }

    #[test]
    fn kinds() {
        assert!(Node::<u8>::tail().is_tail());
        assert!(Node::<u8>::head().is_head());
        assert!(!Node::<u8>::head().is_tail());
        assert!(!Node::value(1u8).is_head());
        assert!(!Node::value(1u8).is_tail());
    }
}
