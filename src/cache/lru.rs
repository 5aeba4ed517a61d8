//! Recency List Module
//!
//! Doubly-linked list used to track usage order for LRU eviction.
//!
//! Nodes live in a slot arena and are linked by index, so moving a node to
//! the front or unlinking it is O(1) and needs no unsafe code. Freed slots
//! are recycled by later insertions.

use std::ops::{Index, IndexMut};

// == Node Handle ==
/// Stable reference to a node for as long as that node stays in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Usage-ordered list of values.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Back ==
    /// Handle of the least recently used node, the next eviction candidate.
    pub fn back(&self) -> Option<NodeHandle> {
        self.tail.map(NodeHandle)
    }

    // == Push Front ==
    /// Inserts `value` as the most recently used node.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        NodeHandle(idx)
    }

    // == Move To Front ==
    /// Marks the node as most recently used.
    pub fn move_to_front(&mut self, handle: NodeHandle) {
        if self.head == Some(handle.0) {
            return;
        }
        self.unlink(handle.0);
        self.link_front(handle.0);
    }

    // == Remove ==
    /// Detaches the node and returns its value. The handle becomes invalid.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        self.unlink(handle.0);
        let node = self.slots[handle.0]
            .take()
            .expect("recency list handle refers to a vacant slot");
        self.free.push(handle.0);
        self.len -= 1;
        node.value
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Linking ==
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old) => self.node_mut(old).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn node(&self, idx: usize) -> &Node<T> {
        self.slots[idx]
            .as_ref()
            .expect("recency list handle refers to a vacant slot")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.slots[idx]
            .as_mut()
            .expect("recency list handle refers to a vacant slot")
    }
}

/// Panics if the handle's node has been removed.
impl<T> Index<NodeHandle> for RecencyList<T> {
    type Output = T;

    fn index(&self, handle: NodeHandle) -> &T {
        &self.node(handle.0).value
    }
}

impl<T> IndexMut<NodeHandle> for RecencyList<T> {
    fn index_mut(&mut self, handle: NodeHandle) -> &mut T {
        &mut self.node_mut(handle.0).value
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.cursor?;
        let node = self.list.node(idx);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
