//! Recency List Module
//!
//! Arena-backed circular doubly-linked list used to keep cache entries in
//! recency order. Slot 0 of the arena is a sentinel that sits between the
//! back (least recently used) and the front (most recently used).

use std::sync::atomic::{AtomicU64, Ordering};

/// Arena slot reserved for the sentinel node.
const SENTINEL: usize = 0;

/// Source of unique list identities, so a reference minted by one list is
/// never honoured by another.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

// == Entry Reference ==
/// Handle to a node living in a [`RecencyList`].
///
/// Handles are plain copies; they never borrow the list. A handle whose node
/// has been removed, or that belongs to another list, is simply ignored by
/// every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef {
    list: u64,
    slot: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<T> {
    prev: usize,
    next: usize,
    generation: u64,
    item: Option<T>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            prev: SENTINEL,
            next: SENTINEL,
            generation: 0,
            item: None,
        }
    }
}

// == Recency List ==
/// Circular doubly-linked list with O(1) push, move-to-front and removal.
///
/// Following `next` links from the sentinel visits items from most to least
/// recently used; `prev` links walk the other way.
#[derive(Debug)]
pub struct RecencyList<T> {
    id: u64,
    nodes: Vec<Node<T>>,
    /// Vacant arena slots available for reuse
    free: Vec<usize>,
    len: usize,
    /// Stamp handed to the next pushed node
    next_generation: u64,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list holding only the sentinel.
    pub fn new() -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            len: 0,
            next_generation: 1,
        }
    }

    // == Init ==
    /// Resets the list to empty.
    ///
    /// The sentinel is re-linked to itself and the arena is dropped in one
    /// go instead of unlinking nodes one at a time. Every outstanding
    /// [`EntryRef`] becomes stale.
    pub fn init(&mut self) {
        self.nodes.truncate(1);
        self.nodes[SENTINEL].prev = SENTINEL;
        self.nodes[SENTINEL].next = SENTINEL;
        self.free.clear();
        self.len = 0;
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Push Front ==
    /// Inserts `item` as the most recently used node.
    ///
    /// No capacity check happens here; bounding the list is the caller's job.
    pub fn push_front(&mut self, item: T) -> EntryRef {
        let generation = self.next_generation;
        self.next_generation += 1;

        let slot = match self.free.pop() {
            Some(slot) => {
                let node = &mut self.nodes[slot];
                node.generation = generation;
                node.item = Some(item);
                slot
            }
            None => {
                self.nodes.push(Node {
                    prev: SENTINEL,
                    next: SENTINEL,
                    generation,
                    item: Some(item),
                });
                self.nodes.len() - 1
            }
        };

        self.link_after(slot, SENTINEL);
        self.len += 1;

        EntryRef {
            list: self.id,
            slot,
            generation,
        }
    }

    // == Move To Front ==
    /// Marks `entry` as the most recently used node.
    ///
    /// Does nothing if `entry` is already the front, stale, or from another
    /// list.
    pub fn move_to_front(&mut self, entry: EntryRef) {
        let Some(slot) = self.resolve(entry) else {
            return;
        };
        if self.nodes[SENTINEL].next == slot {
            return;
        }

        self.unlink(slot);
        self.link_after(slot, SENTINEL);
    }

    // == Remove ==
    /// Unlinks `entry` and hands back its item.
    ///
    /// The handle is invalidated, so removing it a second time returns `None`.
    pub fn remove(&mut self, entry: EntryRef) -> Option<T> {
        let slot = self.resolve(entry)?;

        self.unlink(slot);
        let node = &mut self.nodes[slot];
        node.prev = SENTINEL;
        node.next = SENTINEL;
        node.generation = 0;
        let item = node.item.take();

        self.free.push(slot);
        self.len -= 1;
        item
    }

    // == Back / Front ==
    /// Returns the least recently used node, if any.
    pub fn back(&self) -> Option<EntryRef> {
        self.entry_at(self.nodes[SENTINEL].prev)
    }

    /// Returns the most recently used node, if any.
    #[cfg(test)]
    pub(crate) fn front(&self) -> Option<EntryRef> {
        self.entry_at(self.nodes[SENTINEL].next)
    }

    // == Newer ==
    /// Returns the neighbour one step closer to the front.
    ///
    /// `None` once `entry` is the front; the sentinel is never yielded.
    pub fn newer(&self, entry: EntryRef) -> Option<EntryRef> {
        let slot = self.resolve(entry)?;
        self.entry_at(self.nodes[slot].prev)
    }

    // == Item Access ==
    pub fn get(&self, entry: EntryRef) -> Option<&T> {
        let slot = self.resolve(entry)?;
        self.nodes[slot].item.as_ref()
    }

    pub fn get_mut(&mut self, entry: EntryRef) -> Option<&mut T> {
        let slot = self.resolve(entry)?;
        self.nodes[slot].item.as_mut()
    }

    /// Returns true if `entry` refers to a live node of this list.
    #[cfg(test)]
    pub(crate) fn contains(&self, entry: EntryRef) -> bool {
        self.resolve(entry).is_some()
    }

    // == Iteration ==
    /// Iterates items from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            slot: self.nodes[SENTINEL].prev,
            remaining: self.len,
        }
    }

    // == Internal Helpers ==
    fn resolve(&self, entry: EntryRef) -> Option<usize> {
        if entry.list != self.id || entry.slot == SENTINEL {
            return None;
        }
        let node = self.nodes.get(entry.slot)?;
        (node.item.is_some() && node.generation == entry.generation).then_some(entry.slot)
    }

    fn entry_at(&self, slot: usize) -> Option<EntryRef> {
        if slot == SENTINEL {
            return None;
        }
        Some(EntryRef {
            list: self.id,
            slot,
            generation: self.nodes[slot].generation,
        })
    }

    fn link_after(&mut self, slot: usize, at: usize) {
        let next = self.nodes[at].next;
        self.nodes[slot].prev = at;
        self.nodes[slot].next = next;
        self.nodes[at].next = slot;
        self.nodes[next].prev = slot;
    }

    fn unlink(&mut self, slot: usize) {
        let prev = self.nodes[slot].prev;
        let next = self.nodes[slot].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}

// == Iterator ==
/// Back-to-front iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    slot: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.slot == SENTINEL {
            return None;
        }
        let node = &self.list.nodes[self.slot];
        self.slot = node.prev;
        self.remaining -= 1;
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
        assert!(list.front().is_none());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.len(), 3);
        assert_eq!(list.back(), Some(a));
        assert_eq!(list.front(), Some(c));
        // Back to front: oldest first
        assert_eq!(collect(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        list.move_to_front(a);

        assert_eq!(list.front(), Some(a));
        assert_eq!(collect(&list), vec!["b", "c", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front_when_already_front() {
        let mut list = RecencyList::new();

        list.push_front("a");
        let b = list.push_front("b");

        list.move_to_front(b);

        assert_eq!(collect(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_move_to_front_foreign_entry_is_noop() {
        let mut list = RecencyList::new();
        let mut other = RecencyList::new();

        list.push_front("a");
        list.push_front("b");
        let foreign = other.push_front("x");

        list.move_to_front(foreign);

        assert_eq!(collect(&list), vec!["a", "b"]);
        assert!(list.get(foreign).is_none());
    }

    #[test]
    fn test_remove_returns_item() {
        let mut list = RecencyList::new();

        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.len(), 2);
        assert_eq!(collect(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_stale_entry_is_noop() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.remove(a), None);
        list.move_to_front(a);

        assert_eq!(list.len(), 1);
        assert_eq!(collect(&list), vec!["b"]);
    }

    #[test]
    fn test_reused_slot_does_not_revive_stale_ref() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.remove(a);
        let b = list.push_front("b");

        assert_ne!(a, b);
        assert!(list.get(a).is_none());
        assert_eq!(list.get(b), Some(&"b"));
    }

    #[test]
    fn test_newer_walks_toward_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.newer(a), Some(b));
        assert_eq!(list.newer(b), Some(c));
        // Front has no newer neighbour; the sentinel is never exposed
        assert_eq!(list.newer(c), None);
    }

    #[test]
    fn test_init_resets_list() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");

        list.init();

        assert!(list.is_empty());
        assert!(list.back().is_none());
        assert!(!list.contains(a));

        list.push_front("c");
        assert_eq!(collect(&list), vec!["c"]);
        assert!(list.get(a).is_none());
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = RecencyList::new();

        let a = list.push_front(1);
        if let Some(item) = list.get_mut(a) {
            *item = 42;
        }

        assert_eq!(list.get(a), Some(&42));
    }

    #[test]
    fn test_iter_size_hint() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);

        assert_eq!(list.iter().size_hint(), (2, Some(2)));
        assert_eq!(list.iter().count(), 2);
    }
}
