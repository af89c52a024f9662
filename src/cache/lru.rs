//! LRU List Module
//!
//! Implements the recency ordering used for cache eviction.

/// Null link marker.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<T> {
    /// None while the slot sits on the free list
    value: Option<T>,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Arena-backed doubly-linked list tracking access order.
///
/// Items live in a `Vec` and link to each other by slot index, so every
/// operation is O(1) without raw pointers:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Slot indices returned by [`LruList::push_front`] stay valid until the item
/// is removed. Freed slots are recycled by later pushes.
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
    /// First recycled slot, chained through `next`
    free: usize,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item as most recently used and returns its slot.
    pub fn push_front(&mut self, value: T) -> usize {
        let node = Node {
            value: Some(value),
            prev: NIL,
            next: NIL,
        };

        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.nodes[idx].next;
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        };

        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Touch ==
    /// Marks the item in `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if !self.is_occupied(idx) || self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Removes the item in `idx`, returning it if the slot was occupied.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.is_occupied(idx) {
            return None;
        }
        self.unlink(idx);

        let node = &mut self.nodes[idx];
        let value = node.value.take();
        node.next = self.free;
        self.free = idx;
        self.len -= 1;
        value
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used item without removing it.
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail)
    }

    /// Returns the most recently used item.
    pub fn front(&self) -> Option<&T> {
        self.get(self.head)
    }

    // == Slot Access ==
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.nodes.get(idx).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.nodes.get_mut(idx).and_then(|node| node.value.as_mut())
    }

    // == Length ==
    /// Returns the number of tracked items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every item and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Link Maintenance ==
    fn is_occupied(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|node| node.value.is_some())
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;

        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

// == Iterator ==
/// Iterator over list items from most to least recently used.
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_lru_new() {
        let lru: LruList<&str> = LruList::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.back(), None);
        assert_eq!(lru.front(), None);
    }

    #[test]
    fn test_lru_push_front() {
        let mut lru = LruList::new();

        lru.push_front("key1");
        lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.back(), Some(&"key1"));
        assert_eq!(lru.front(), Some(&"key3"));
        assert_eq!(order(&lru), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_lru_move_to_front() {
        let mut lru = LruList::new();

        let a = lru.push_front("a");
        lru.push_front("b");
        lru.push_front("c");

        lru.move_to_front(a);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.back(), Some(&"b"));
        assert_eq!(order(&lru), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_move_middle_and_head() {
        let mut lru = LruList::new();

        lru.push_front("a");
        let b = lru.push_front("b");
        let c = lru.push_front("c");

        // Head stays put
        lru.move_to_front(c);
        assert_eq!(order(&lru), vec!["c", "b", "a"]);

        lru.move_to_front(b);
        assert_eq!(order(&lru), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_lru_pop_back() {
        let mut lru = LruList::new();

        lru.push_front("key1");
        lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.pop_back(), Some("key1"));
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.pop_back(), Some("key2"));
        assert_eq!(lru.pop_back(), Some("key3"));
        assert_eq!(lru.pop_back(), None);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruList::new();

        lru.push_front("key1");
        let k2 = lru.push_front("key2");
        lru.push_front("key3");

        assert_eq!(lru.remove(k2), Some("key2"));
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.get(k2), None);
        assert_eq!(order(&lru), vec!["key3", "key1"]);

        // Removing a free slot is a no-op
        assert_eq!(lru.remove(k2), None);
        assert_eq!(lru.remove(999), None);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_remove_only_item() {
        let mut lru = LruList::new();
        let idx = lru.push_front("only");

        assert_eq!(lru.remove(idx), Some("only"));
        assert!(lru.is_empty());
        assert_eq!(lru.front(), None);
        assert_eq!(lru.back(), None);
    }

    #[test]
    fn test_lru_slots_are_recycled() {
        let mut lru = LruList::new();

        let a = lru.push_front("a");
        lru.push_front("b");
        lru.remove(a);

        let c = lru.push_front("c");
        assert_eq!(c, a, "freed slot should be reused");
        assert_eq!(order(&lru), vec!["c", "b"]);
    }

    #[test]
    fn test_lru_get_mut() {
        let mut lru = LruList::new();
        let idx = lru.push_front(1);

        if let Some(v) = lru.get_mut(idx) {
            *v = 5;
        }
        assert_eq!(lru.get(idx), Some(&5));
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruList::new();
        lru.push_front("a");
        lru.push_front("b");

        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.iter().count(), 0);
        lru.push_front("c");
        assert_eq!(order(&lru), vec!["c"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruList::new();

        let a = lru.push_front("a");
        let b = lru.push_front("b");
        let c = lru.push_front("c");

        lru.move_to_front(a);
        lru.move_to_front(c);
        lru.move_to_front(b);

        // front=[b, c, a]=back
        assert_eq!(lru.pop_back(), Some("a"));
        assert_eq!(lru.pop_back(), Some("c"));
        assert_eq!(lru.pop_back(), Some("b"));
    }

    #[test]
    fn test_lru_iter_len() {
        let mut lru = LruList::new();
        lru.push_front(1);
        lru.push_front(2);

        assert_eq!(lru.iter().len(), 2);
    }
}
