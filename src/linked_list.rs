//! A singly-linked list of key/value entries that flattens all its nodes onto
//! a Vec for storage, gaining data locality at the cost of never handing
//! memory back until it's cleared.

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// A node that lives in a linked list.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// The index of the next node in the list.
    next: Option<NodeHandle>,
}

/// Nodes live in a single contiguous Vec and are addressed by their position
/// in it. Removed slots are freelisted and reused by later pushes; there is
/// no compaction.
///
/// Links only ever point forward, and each slot is pointed at by at most one
/// predecessor (or the head), so ownership stays chain shaped even though it
/// is expressed with indices rather than boxes.
pub(crate) struct LinkedList<K, V> {
    /// The nodes in the list. `None` marks a slot on the freelist.
    store: Vec<Option<Node<K, V>>>,

    /// Slots in the list which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,
}

impl<K, V> LinkedList<K, V> {
    /// Creates a new linked list with a specific capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
        }
    }

    /// The length of this linked list.
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    /// Gets a node from the list.
    pub(crate) fn get(&self, node: NodeHandle) -> Option<&Node<K, V>> {
        self.store.get(node.0).and_then(Option::as_ref)
    }

    /// Gets a node from the list, mutably. Only the value should be changed
    /// through this; keys are fixed once they're in.
    pub(crate) fn get_mut(&mut self, node: NodeHandle) -> Option<&mut Node<K, V>> {
        self.store.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Pushes an entry onto the front of the list and returns a handle to
    /// its node.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> NodeHandle {
        let n = Node {
            key,
            value,
            next: self.head,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        match self.free.pop() {
            Some(idx) => {
                self.store[idx.0] = Some(n);
                self.head = Some(idx);
                idx
            }
            None => {
                let idx = NodeHandle(self.store.len());
                self.store.push(Some(n));
                self.head = Some(idx);
                idx
            }
        }
    }

    /// Walks the list from the head and returns the first node matching
    /// `pred`, along with the node before it (`None` when the match is the
    /// head).
    pub(crate) fn find<F>(&self, mut pred: F) -> Option<(Option<NodeHandle>, NodeHandle)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(handle) = cursor {
            let node = self.get(handle)?;
            if pred(&node.key, &node.value) {
                return Some((prev, handle));
            }
            prev = Some(handle);
            cursor = node.next;
        }

        None
    }

    /// Takes `node` out of the chain. `prev` must be the node before it, as
    /// returned by [`LinkedList::find`].
    pub(crate) fn unlink(&mut self, prev: Option<NodeHandle>, node: NodeHandle) -> Option<Node<K, V>> {
        let removed = self.store.get_mut(node.0)?.take()?;

        match prev {
            // removing the head is just a matter of moving it along
            None => {
                debug_assert_eq!(Some(node), self.head);
                self.head = removed.next;
            }
            Some(prev) => {
                if let Some(prev_node) = self.get_mut(prev) {
                    debug_assert_eq!(Some(node), prev_node.next);
                    prev_node.next = removed.next;
                }
            }
        }

        // it'll get overwritten at some later push by placing its handle on
        // the freelist
        self.free.push(node);
        Some(removed)
    }

    /// Iterates the entries from head to tail.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
    }
}

/// Follows the `next` handles from the head of a [`LinkedList`].
pub(crate) struct Iter<'a, K, V> {
    list: &'a LinkedList<K, V>,
    cursor: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
