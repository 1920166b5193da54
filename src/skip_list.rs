//! Skip List
//!
//! A sorted multiset built from a fixed ladder of doubly linked levels.
//!
//! # Structure
//!
//! Every level is bounded by a HEAD and a TAIL sentinel. Level 0 holds every
//! value; each level above holds a coin-flip subset of the level below. The
//! HEAD of level `i` links down to the HEAD of level `i - 1`, and each tower
//! node links down to the node for the same value one level lower.
//!
//! ```text
//! Level 2: HEAD ----------------> 5 ---------------> TAIL
//! Level 1: HEAD ------> 3 ------> 5 ------> 8 -----> TAIL
//! Level 0: HEAD -> 3 -> 3 -> 4 -> 5 -> 7 -> 8 -> 9 -> TAIL
//! ```
//!
//! # Operations
//!
//! - `find(value)`: O(log n) expected - membership
//! - `add(value)`: O(log n) expected - insert, duplicates allowed
//! - `erase(value)`: O(log n + k) - remove every copy of a value
//! - `erase_less_than_or_equal_to(value)`: O(log n + k) - cut a sorted prefix
//! - `get_all()` / `iter()`: O(n) - ascending walk of level 0
//! - `size()`: O(1)
//!
//! # Descent
//!
//! All operations share one traversal. Starting from the HEAD of the sparsest
//! level, walk right until the boundary is reached (the current node is below
//! the target and its right neighbor is not), then drop through `down` and
//! continue on the denser level. Operations differ only in what they do with
//! the boundary at each level.

use std::cmp::Ordering;
use std::fmt;

use rand::rngs::SmallRng;
use rand_core::RngCore;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::config::{self, Config};
use crate::error::Result;
use crate::node::{Idx, NULL, Node};

/// Boundary node per level, indexed by level (0 = base).
type Path = SmallVec<[Idx; 16]>;

/// Which boundary a descent looks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    /// `current < target <= current.right`: the insertion point before any equal keys.
    Below,
    /// `current <= target < current.right`: the last node not above the target.
    AtOrBelow,
}

/// A skip list ordered by a caller-supplied comparator.
///
/// The comparator must be a total order. Promotion coins are drawn from `R`,
/// which can be any [`RngCore`], so tests can pin tower heights.
pub struct SkipList<T, C, R = SmallRng> {
    /// Arena of nodes. Sentinels are allocated first and never released.
    nodes: Vec<Node<T>>,
    /// HEAD sentinel of each level, index 0 = base.
    heads: Vec<Idx>,
    /// Released node slots, reused by later insertions.
    free_list: Vec<Idx>,
    /// Number of values on level 0.
    size: u64,
    cmp: C,
    rng: R,
}

/// A skip list over the natural ordering of `T`.
pub type OrdSkipList<T, R = SmallRng> = SkipList<T, fn(&T, &T) -> Ordering, R>;

impl<T, C> SkipList<T, C, SmallRng>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty list with `levels` levels and an entropy-seeded coin.
    pub fn new(levels: usize, cmp: C) -> Result<Self> {
        Self::from_config(&Config::new(levels), cmp)
    }

    pub fn from_config(config: &Config, cmp: C) -> Result<Self> {
        config.validate()?;
        Self::with_rng(config.levels, cmp, config.rng())
    }
}

impl<T: Ord> OrdSkipList<T> {
    /// Create an empty list ordered by `T`'s `Ord` impl.
    pub fn ordered(levels: usize) -> Result<Self> {
        Self::new(levels, <T as Ord>::cmp)
    }
}

impl<T, C, R> SkipList<T, C, R> {
    /// Number of levels, fixed at construction.
    pub fn levels(&self) -> usize {
        self.heads.len()
    }

    /// Number of values stored.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Iterate over all values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        SkipListIter {
            list: self,
            current: self.node(self.heads[0]).right,
        }
    }

    /// All values in ascending order.
    pub fn get_all(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Number of value nodes on one level, or `None` if the level does not exist.
    pub fn level_len(&self, level: usize) -> Option<usize> {
        let head = *self.heads.get(level)?;
        let mut count = 0;
        let mut idx = self.node(head).right;
        while !self.node(idx).is_tail() {
            count += 1;
            idx = self.node(idx).right;
        }
        Some(count)
    }

    // --- Node access helpers ---

    fn node(&self, idx: Idx) -> &Node<T> {
        &self.nodes[idx as usize]
    }

    fn node_mut(&mut self, idx: Idx) -> &mut Node<T> {
        &mut self.nodes[idx as usize]
    }

    /// The value a middle node stands for, read from the bottom of its tower.
    fn value_at(&self, idx: Idx) -> &T {
        let base = self.node(idx).base;
        match &self.node(base).value {
            Some(value) => value,
            None => unreachable!("node {idx} is linked but its value was released"),
        }
    }

    fn top_head(&self) -> Idx {
        self.heads[self.heads.len() - 1]
    }

    fn alloc(&mut self, node: Node<T>) -> Idx {
        if let Some(idx) = self.free_list.pop() {
            *self.node_mut(idx) = node;
            idx
        } else {
            assert!(self.nodes.len() < NULL as usize, "node arena exhausted");
            let idx = self.nodes.len() as Idx;
            self.nodes.push(node);
            idx
        }
    }

    /// Return a node's slot to the free list, handing back its value if it held one.
    fn release(&mut self, idx: Idx) -> Option<T> {
        let node = self.node_mut(idx);
        node.left = NULL;
        node.right = NULL;
        node.down = NULL;
        node.base = NULL;
        let value = node.value.take();
        self.free_list.push(idx);
        value
    }

    /// Link `idx` in between `prev` and its right neighbor.
    fn splice_after(&mut self, prev: Idx, idx: Idx) {
        let next = self.node(prev).right;
        let node = self.node_mut(idx);
        node.left = prev;
        node.right = next;
        self.node_mut(next).left = idx;
        self.node_mut(prev).right = idx;
    }

    /// Unlink `idx` from its level and release it.
    fn unlink(&mut self, idx: Idx) -> Option<T> {
        let (prev, next) = {
            let node = self.node(idx);
            (node.left, node.right)
        };
        self.node_mut(prev).right = next;
        self.node_mut(next).left = prev;
        self.release(idx)
    }

    /// Allocate the sentinel pair of every level and chain the heads downwards.
    fn build_ladder(&mut self, levels: usize) {
        for level in 0..levels {
            let head = self.alloc(Node::head());
            let tail = self.alloc(Node::tail());
            let below = if level == 0 { NULL } else { self.heads[level - 1] };

            let head_node = self.node_mut(head);
            head_node.left = head;
            head_node.right = tail;
            head_node.down = below;
            self.node_mut(tail).left = head;

            self.heads.push(head);
        }
    }
}

impl<T, C, R> SkipList<T, C, R>
where
    C: Fn(&T, &T) -> Ordering,
    R: RngCore,
{
    /// Create an empty list drawing promotion coins from `rng`.
    ///
    /// Fails with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// when `levels` is zero or above [`MAX_LEVELS`](crate::MAX_LEVELS).
    pub fn with_rng(levels: usize, cmp: C, rng: R) -> Result<Self> {
        config::validate_levels(levels)?;

        let mut list = SkipList {
            nodes: Vec::with_capacity(levels * 2),
            heads: Vec::with_capacity(levels),
            free_list: Vec::new(),
            size: 0,
            cmp,
            rng,
        };
        list.build_ladder(levels);

        debug!(levels, "created skip list");
        Ok(list)
    }

    /// Whether at least one copy of `target` is stored.
    pub fn find(&self, target: &T) -> bool {
        let mut current = self.top_head();
        while current != NULL {
            current = self.locate(current, target, Bound::Below);
            let next = self.node(current).right;
            if self.compare(next, target) == Ordering::Equal {
                return true;
            }
            current = self.node(current).down;
        }
        false
    }

    /// Insert a value. Equal values are kept side by side.
    pub fn add(&mut self, value: T) {
        let path = self.search_path(&value, Bound::Below);

        let base = self.alloc(Node::value(value));
        self.node_mut(base).base = base;
        self.splice_after(path[0], base);

        // Grow the tower one level per winning flip.
        let mut below = base;
        let mut height = 1;
        while height < path.len() && self.flip() {
            let node = self.alloc(Node::tower(base, below));
            self.splice_after(path[height], node);
            below = node;
            height += 1;
        }

        self.size += 1;
        trace!(height, size = self.size, "added value");
        self.check_invariants();
    }

    /// Remove every copy of `target`. Returns how many values were removed.
    pub fn erase(&mut self, target: &T) -> usize {
        let path = self.search_path(target, Bound::Below);
        let mut removed = 0;

        // Top down: tower nodes compare through the level-0 node beneath them.
        for level in (0..path.len()).rev() {
            let boundary = path[level];
            loop {
                let next = self.node(boundary).right;
                if self.compare(next, target) != Ordering::Equal {
                    break;
                }
                self.unlink(next);
                if level == 0 {
                    removed += 1;
                }
            }
        }

        self.size -= removed as u64;
        trace!(removed, size = self.size, "erased value");
        self.check_invariants();
        removed
    }

    /// Remove every value `<= target`, returning them in ascending order.
    pub fn erase_less_than_or_equal_to(&mut self, target: &T) -> Vec<T> {
        let path = self.search_path(target, Bound::AtOrBelow);
        let mut removed = Vec::new();

        for level in (0..path.len()).rev() {
            let head = self.heads[level];
            let boundary = path[level];
            if boundary == head {
                continue;
            }

            // Cut HEAD.right ..= boundary out of the level in one splice.
            let first = self.node(head).right;
            let rest = self.node(boundary).right;
            self.node_mut(head).right = rest;
            self.node_mut(rest).left = head;

            // Level 0 is cut last, after every tower node resting on it is gone.
            let mut idx = first;
            loop {
                let next = self.node(idx).right;
                let value = self.release(idx);
                if level == 0 {
                    removed.extend(value);
                }
                if idx == boundary {
                    break;
                }
                idx = next;
            }
        }

        self.size -= removed.len() as u64;
        trace!(removed = removed.len(), size = self.size, "erased prefix");
        self.check_invariants();
        removed
    }

    /// Drop every value, keeping the level count.
    pub fn clear(&mut self) {
        let levels = self.levels();
        self.nodes.clear();
        self.heads.clear();
        self.free_list.clear();
        self.size = 0;
        self.build_ladder(levels);
        trace!(levels, "cleared skip list");
    }

    // --- Descent ---

    /// Order a node against `target`, sentinels included.
    fn compare(&self, idx: Idx, target: &T) -> Ordering {
        match self.node(idx).sentinel_order() {
            Some(order) => order,
            None => (self.cmp)(self.value_at(idx), target),
        }
    }

    /// Walk right along one level from `current` until the boundary for `target`.
    ///
    /// `current` must already be on the near side of the boundary. The TAIL
    /// compares above every key, so the walk always stops before it.
    fn locate(&self, mut current: Idx, target: &T, bound: Bound) -> Idx {
        loop {
            let next = self.node(current).right;
            let here = self.compare(current, target);
            let there = self.compare(next, target);
            let found = match bound {
                Bound::Below => here.is_lt() && there.is_ge(),
                Bound::AtOrBelow => here.is_le() && there.is_gt(),
            };
            if found {
                return current;
            }
            current = next;
        }
    }

    /// Descend from the top level, recording the boundary on every level.
    fn search_path(&self, target: &T, bound: Bound) -> Path {
        let mut path: Path = smallvec![NULL; self.levels()];
        let mut current = self.top_head();
        for level in (0..self.levels()).rev() {
            current = self.locate(current, target, bound);
            path[level] = current;
            current = self.node(current).down;
        }
        path
    }

    fn flip(&mut self) -> bool {
        self.rng.next_u32() & 1 == 1
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        // Membership of the level below, for checking `down` links.
        let mut below = vec![false; self.nodes.len()];

        for (level, &head) in self.heads.iter().enumerate() {
            let head_node = self.node(head);
            assert!(head_node.is_head(), "INVARIANT VIOLATED: level {} has no head", level);
            assert_eq!(
                head_node.left, head,
                "INVARIANT VIOLATED: head of level {} does not loop to itself",
                level
            );
            let expected_down = if level == 0 { NULL } else { self.heads[level - 1] };
            assert_eq!(
                head_node.down, expected_down,
                "INVARIANT VIOLATED: head of level {} is not above the next head",
                level
            );

            let mut here = vec![false; self.nodes.len()];
            let mut count = 0u64;
            let mut prev = head;
            let mut idx = head_node.right;
            loop {
                let node = self.node(idx);
                assert_eq!(
                    node.left, prev,
                    "INVARIANT VIOLATED: left/right mismatch at level {}",
                    level
                );
                if node.is_tail() {
                    break;
                }
                assert!(!node.is_head(), "INVARIANT VIOLATED: stray head at level {}", level);
                if prev != head {
                    assert!(
                        (self.cmp)(self.value_at(prev), self.value_at(idx)) != Ordering::Greater,
                        "INVARIANT VIOLATED: level {} is out of order",
                        level
                    );
                }
                if level == 0 {
                    assert_eq!(node.base, idx, "INVARIANT VIOLATED: base node not its own base");
                    assert!(node.value.is_some(), "INVARIANT VIOLATED: base node lost its value");
                } else {
                    assert!(
                        node.down != NULL && below[node.down as usize],
                        "INVARIANT VIOLATED: tower at level {} does not land on level {}",
                        level,
                        level - 1
                    );
                    assert_eq!(
                        self.node(node.down).base,
                        node.base,
                        "INVARIANT VIOLATED: tower at level {} mixes values",
                        level
                    );
                }
                here[idx as usize] = true;
                count += 1;
                prev = idx;
                idx = node.right;
            }

            if level == 0 {
                assert_eq!(
                    count, self.size,
                    "INVARIANT VIOLATED: level 0 holds {} values but size()={}",
                    count, self.size
                );
            }
            below = here;
        }
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}

impl<T: fmt::Debug, C, R> fmt::Debug for SkipList<T, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One line per level, sparsest first: `HEAD -> 3 -> 5 -> TAIL`.
impl<T: fmt::Display, C, R> fmt::Display for SkipList<T, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for &head in self.heads.iter().rev() {
            let mut idx = head;
            loop {
                let node = self.node(idx);
                if node.is_head() {
                    write!(f, "HEAD -> ")?;
                } else if node.is_tail() {
                    writeln!(f, "TAIL")?;
                    break;
                } else {
                    write!(f, "{} -> ", self.value_at(idx))?;
                }
                idx = node.right;
            }
        }
        Ok(())
    }
}

struct SkipListIter<'a, T, C, R> {
    list: &'a SkipList<T, C, R>,
    current: Idx,
}

impl<'a, T, C, R> Iterator for SkipListIter<'a, T, C, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current);
        if node.is_tail() {
            return None;
        }
        let value = self.list.value_at(self.current);
        self.current = node.right;
        Some(value)
    }
}
