//! A plain binary search tree. Nothing keeps it balanced, so feeding it keys
//! in sorted order gets you a very expensive linked list. That's accepted;
//! the point is the shape of the algorithms, not the worst case.

use std::{cmp::Ordering, fmt, iter::FusedIterator, mem};

use crate::map::{Keys as BoxedKeys, Map};

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// A map kept as an unbalanced binary search tree. Keys come out of the
/// iterators in ascending order.
pub struct OrderedTreeMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> OrderedTreeMap<K, V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The height of the tree, counting nodes. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            pending.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            pending.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        tallest
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Frees every node without recursing, so a tree that degenerated into a
    /// long spine can't blow the stack on the way out.
    fn dismantle(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }

        self.len = 0;
    }
}

impl<K, V> OrderedTreeMap<K, V>
where
    K: Ord,
{
    /// Makes a tree holding a single entry.
    pub fn singleton(key: K, value: V) -> Self {
        Self {
            root: Some(Node::leaf(key, value)),
            len: 1,
        }
    }

    // The descents below loop rather than recurse. A tree fed sorted keys is
    // as tall as it is long, and the call stack is much shorter than that.

    fn find<'a>(mut link: &'a Link<K, V>, key: &K) -> Option<&'a Node<K, V>> {
        while let Some(node) = link.as_deref() {
            match key.cmp(&node.key) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(node),
            }
        }

        None
    }

    fn find_mut<'a>(mut link: &'a mut Link<K, V>, key: &K) -> Option<&'a mut Node<K, V>> {
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(&mut **node),
            }
        }

        None
    }

    /// Returns the replaced value, or `None` if a new leaf was hung off the
    /// tree.
    fn put_into(mut link: &mut Link<K, V>, key: K, value: V) -> Option<V> {
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            }
        }

        *link = Some(Node::leaf(key, value));
        None
    }

    fn remove_from(mut link: &mut Link<K, V>, key: &K) -> Option<V> {
        loop {
            match key.cmp(&link.as_ref()?.key) {
                Ordering::Less => link = &mut link.as_mut()?.left,
                Ordering::Greater => link = &mut link.as_mut()?.right,
                Ordering::Equal => return Self::unlink(link),
            }
        }
    }

    /// Removes the node `link` points at, splicing its children back in.
    fn unlink(link: &mut Link<K, V>) -> Option<V> {
        let node = link.as_mut()?;

        if node.left.is_some() && node.right.is_some() {
            // the in-order successor takes this node's place
            let successor = Self::detach_min(&mut node.right)?;
            let Node { key, value, .. } = *successor;
            node.key = key;
            return Some(mem::replace(&mut node.value, value));
        }

        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        Some(node.value)
    }

    /// Cuts the minimum node out of the subtree at `link` and hangs its right
    /// child where it used to be. The minimum never has a left child.
    fn detach_min(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }

        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;
        let mut previous: Option<&K> = None;

        for key in self.keys() {
            if let Some(previous) = previous {
                assert!(*previous < *key, "keys out of order");
            }
            previous = Some(key);
            count += 1;
        }

        assert_eq!(self.len, count);
    }
}

impl<K, V> Map<K, V> for OrderedTreeMap<K, V>
where
    K: Ord,
{
    fn clear(&mut self) {
        tracing::trace!(entries = self.len, "clearing tree map");
        self.dismantle();
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::find(&self.root, key).map(|node| &node.value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        Self::find_mut(&mut self.root, key).map(|node| &mut node.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let replaced = Self::put_into(&mut self.root, key, value);
        if replaced.is_none() {
            self.len += 1;
        }

        #[cfg(test)]
        self.continuity_test();

        replaced
    }

    fn len(&self) -> usize {
        self.len
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let removed = Self::remove_from(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }

        #[cfg(test)]
        self.continuity_test();

        removed
    }

    fn remove_if_eq(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let matches = Self::find(&self.root, key).is_some_and(|node| node.value == *value);
        if matches {
            self.remove(key)
        } else {
            None
        }
    }

    fn iter_keys(&self) -> BoxedKeys<'_, K> {
        Box::new(self.keys())
    }
}

impl<K, V> Default for OrderedTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedTreeMap<K, V> {
    fn drop(&mut self) {
        self.dismantle();
    }
}

impl<K, V> fmt::Debug for OrderedTreeMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedTreeMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedTreeMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTreeMap<K, V> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// In-order walk over an [`OrderedTreeMap`], driven by an explicit stack
/// holding the left spine of whatever is still to come.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root.as_deref());
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// The keys of an [`OrderedTreeMap`], ascending.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::OrderedTreeMap;
    use crate::map::Map;

    fn sample() -> OrderedTreeMap<i32, &'static str> {
        [(5, "A"), (3, "B"), (7, "C"), (2, "D"), (4, "E")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_put_and_get() {
        let tree = sample();

        assert_eq!(Some(&"A"), tree.get(&5));
        assert_eq!(Some(&"B"), tree.get(&3));
        assert_eq!(Some(&"C"), tree.get(&7));
        assert_eq!(Some(&"D"), tree.get(&2));
        assert_eq!(Some(&"E"), tree.get(&4));
        assert_eq!(None, tree.get(&10));
    }

    #[test]
    fn overwriting_keeps_the_size() {
        let mut tree = sample();

        assert_eq!(Some("B"), tree.put(3, "Z"));
        assert_eq!(5, tree.len());
        assert_eq!(Some(&"Z"), tree.get(&3));
    }

    #[test]
    fn iterates_in_order() {
        let tree = sample();

        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(vec![2, 3, 4, 5, 7], keys);
        assert_eq!(5, tree.keys().len());
    }

    #[test]
    fn test_remove() {
        let mut tree = sample();

        assert_eq!(Some("B"), tree.remove(&3));
        assert_eq!(None, tree.get(&3));
        assert_eq!(4, tree.len());

        assert_eq!(None, tree.remove(&10));
        assert_eq!(4, tree.len());
    }

    #[test]
    fn removing_a_leaf() {
        let mut tree = sample();

        assert_eq!(Some("D"), tree.remove(&2));
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(vec![3, 4, 5, 7], keys);
    }

    #[test]
    fn removing_a_node_with_one_child() {
        let mut tree = sample();
        tree.put(8, "F");

        // 7 only has 8 hanging off it
        assert_eq!(Some("C"), tree.remove(&7));
        assert_eq!(Some(&"F"), tree.get(&8));
        assert_eq!(5, tree.len());
    }

    #[test]
    fn removing_the_root_promotes_its_successor() {
        let mut tree = sample();
        tree.put(6, "F");

        assert_eq!(Some("A"), tree.remove(&5));

        // 6 was the smallest thing right of 5, so it's the new root
        assert_eq!(6, tree.root.as_ref().unwrap().key);
        assert_eq!(Some(&"F"), tree.get(&6));
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(vec![2, 3, 4, 6, 7], keys);
    }

    #[test]
    fn a_successor_with_a_right_child_leaves_it_behind() {
        let mut tree: OrderedTreeMap<i32, ()> =
            [5, 3, 10, 7, 8].iter().map(|&k| (k, ())).collect();

        assert_eq!(Some(()), tree.remove(&5));

        // 7 moved up to the root, 8 took its old spot under 10
        assert_eq!(7, tree.root.as_ref().unwrap().key);
        let ten = tree.root.as_ref().unwrap().right.as_ref().unwrap();
        assert_eq!(8, ten.left.as_ref().unwrap().key);
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(vec![3, 7, 8, 10], keys);
    }

    #[test]
    fn root_edge_cases() {
        let mut right_child = OrderedTreeMap::new();
        right_child.put('A', 1);
        right_child.put('B', 2);
        assert_eq!(Some(1), right_child.remove(&'A'));
        for i in 0..10u8 {
            right_child.put((b'C' + i) as char, 3 + i as i32);
        }
        right_child.put('A', 100);
        assert_eq!(Some(4), right_child.remove(&'D'));
        assert_eq!(Some(7), right_child.remove(&'G'));
        assert_eq!(Some(100), right_child.remove(&'A'));
        assert_eq!(9, right_child.len());

        let mut left_child = OrderedTreeMap::new();
        left_child.put('B', 1);
        left_child.put('A', 2);
        assert_eq!(Some(1), left_child.remove(&'B'));
        assert_eq!(1, left_child.len());
        assert_eq!(None, left_child.get(&'B'));

        let mut no_child = OrderedTreeMap::singleton('Z', 15);
        assert_eq!(Some(15), no_child.remove(&'Z'));
        assert_eq!(0, no_child.len());
        assert!(no_child.root.is_none());
    }

    #[test]
    fn conditional_remove_checks_the_value() {
        let mut tree = OrderedTreeMap::new();
        tree.put(5, "A");
        tree.put(3, "B");

        assert_eq!(None, tree.remove_if_eq(&3, &"X"));
        assert_eq!(2, tree.len());

        assert_eq!(Some("B"), tree.remove_if_eq(&3, &"B"));
        assert_eq!(None, tree.get(&3));
        assert_eq!(1, tree.len());
    }

    #[test]
    fn sorted_input_degenerates() {
        let tree: OrderedTreeMap<u32, u32> = (0..64).map(|i| (i, i)).collect();
        assert_eq!(64, tree.height());

        let balanced: OrderedTreeMap<u32, u32> =
            [4, 2, 6, 1, 3, 5, 7].iter().map(|&i| (i, i)).collect();
        assert_eq!(3, balanced.height());
    }

    #[test]
    fn a_long_spine_drops_quietly() {
        let mut tree = OrderedTreeMap::new();
        for i in 0..1_000u32 {
            tree.put(i, ());
        }
        assert_eq!(1_000, tree.height());
        tree.clear();
        assert_eq!(0, tree.len());
        assert!(tree.is_empty());
    }

    #[test]
    fn debug_prints_in_order() {
        let tree = sample();
        assert_eq!(
            r#"{2: "D", 3: "B", 4: "E", 5: "A", 7: "C"}"#,
            format!("{:?}", tree)
        );
    }
}
