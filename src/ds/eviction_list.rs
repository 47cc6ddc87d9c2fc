//! Recency list with permanent sentinel nodes, backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`], so a
//! shard can hold a stable handle to its entry and splice it in O(1) without
//! pointer chasing or reallocation.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                       │
//!   ├────────┼──────────────────────────────────────────────────┤
//!   │ 0      │ HEAD { value: None, prev: 0, next: 2 }           │
//!   │ 1      │ TAIL { value: None, prev: 3, next: 1 }           │
//!   │ 2      │ { value: Some(A), prev: 0, next: 3 }             │
//!   │ 3      │ { value: Some(B), prev: 2, next: 1 }             │
//!   └────────┴──────────────────────────────────────────────────┘
//!
//!   HEAD ─► [A] ◄──► [B] ◄── TAIL
//!           MRU      LRU
//! ```
//!
//! The two sentinels occupy slots 0 and 1 for the lifetime of the list. They
//! never carry a value and can never be removed, so every data node always
//! has a live `prev` and `next` and splicing needs no boundary cases.
//!
//! ## Operations
//! - `push_front(value)`: allocate + attach after HEAD
//! - `move_to_front(id)`: detach + attach after HEAD, same slot
//! - `remove(id)`: detach + free slot in arena
//! - `back()`: node before TAIL (the LRU entry)
//!
//! ## Performance
//! - `push_front` / `move_to_front` / `remove` / `back`: O(1)
//! - `iter`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

const HEAD: SlotId = SlotId(0);
const TAIL: SlotId = SlotId(1);
const SENTINELS: usize = 2;

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// Doubly linked recency list: front is most recently used, back is least.
#[derive(Debug)]
pub struct EvictionList<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> EvictionList<T> {
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` data nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(SENTINELS));
        let head = arena.insert(Node::sentinel());
        let tail = arena.insert(Node::sentinel());
        debug_assert_eq!((head, tail), (HEAD, TAIL));
        Self { arena }
    }

    /// Returns the number of data nodes (sentinels excluded).
    pub fn len(&self) -> usize {
        self.arena.len() - SENTINELS
    }

    /// Returns `true` if no data node is linked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` is a live data node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        Self::is_data_slot(id) && self.arena.contains(id)
    }

    /// Returns the value at the front (MRU) of the list.
    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    /// Returns the SlotId at the front (MRU) of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        let first = self.next_of(HEAD)?;
        (first != TAIL).then_some(first)
    }

    /// Returns the value at the back (LRU) of the list.
    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    /// Returns the SlotId at the back (LRU) of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        let last = self.prev_of(TAIL)?;
        (last != HEAD).then_some(last)
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Inserts a new node right after HEAD and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let first = self.next_of(HEAD).unwrap_or(TAIL);
        let id = self.arena.insert(Node {
            value: Some(value),
            prev: HEAD,
            next: first,
        });
        self.set_next(HEAD, id);
        self.set_prev(first, id);
        id
    }

    /// Moves an existing node to the front; returns `false` if `id` is not a
    /// live data node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.next_of(HEAD) == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Unlinks node `id`, frees its slot and returns its value.
    ///
    /// Sentinel ids and stale ids yield `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Removes and returns the back (LRU) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Drops every data node, keeping the sentinels.
    pub fn clear(&mut self) {
        self.arena.truncate(SENTINELS);
        self.set_next(HEAD, TAIL);
        self.set_prev(TAIL, HEAD);
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub(crate) fn iter(&self) -> EvictionListIter<'_, T> {
        EvictionListIter {
            list: self,
            current: self.next_of(HEAD).unwrap_or(TAIL),
        }
    }

    fn is_data_slot(id: SlotId) -> bool {
        id != HEAD && id != TAIL
    }

    fn next_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.next)
    }

    fn prev_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.prev)
    }

    fn set_next(&mut self, id: SlotId, next: SlotId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, id: SlotId, prev: SlotId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
        }
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|node| (node.prev, node.next)) else {
            return;
        };
        self.set_next(prev, next);
        self.set_prev(next, prev);
    }

    fn attach_front(&mut self, id: SlotId) {
        let first = self.next_of(HEAD).unwrap_or(TAIL);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = HEAD;
            node.next = first;
        } else {
            return;
        }
        self.set_next(HEAD, id);
        self.set_prev(first, id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let head = self.arena.get(HEAD).expect("head sentinel missing");
        let tail = self.arena.get(TAIL).expect("tail sentinel missing");
        assert!(head.value.is_none());
        assert!(tail.value.is_none());

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = head.next;

        while current != TAIL {
            assert!(seen.insert(current));
            let node = self.arena.get(current).expect("node missing");
            assert!(node.value.is_some());
            assert_eq!(node.prev, prev);
            prev = current;
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(tail.prev, prev);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for EvictionList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from front to back.
pub(crate) struct EvictionListIter<'a, T> {
    list: &'a EvictionList<T>,
    current: SlotId,
}

impl<'a, T> Iterator for EvictionListIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let id = self.current;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        node.value.as_ref().map(|value| (id, value))
    }
}
