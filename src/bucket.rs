use alloc::{boxed::Box, vec::Vec};

use core::{
    cell::Cell,
    fmt::{self, Debug, Formatter},
};

pub use iters::{Drain, IntoIter, Iter};

type Link<K, V> = Option<Box<Node<K, V>>>;

/// One entry on the chain. Each node exclusively owns the rest of the chain
/// behind it.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

/// The chain of key/value entries stored at one slot of a separate-chaining
/// hash table.
///
/// Insertion prepends, so the most recently added entry is always reached
/// first. Keys are compared with `Eq` only; nothing enforces uniqueness, and
/// a duplicate key shadows older entries until it is removed.
///
/// Every lookup made through [`find`](Bucket::find) bumps a per-bucket probe
/// counter by one for each node it visits. The owning table resets and reads
/// the counter to measure probes per operation in isolation.
#[derive(Clone)]
pub struct Bucket<K, V> {
    head: Link<K, V>,
    len: usize,
    probes: Cell<usize>,
}

impl<K, V> Bucket<K, V> {
    /// Creates an empty bucket. Allocates nothing until the first push.
    pub fn new() -> Self {
        Self {
            head: None,
            len: 0,
            probes: Cell::new(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of entries on the chain, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts an entry at the front of the chain.
    ///
    /// The chain is not scanned first: pushing an already-present key adds a
    /// second node for it, and the newer one shadows the older on lookup.
    pub fn push(&mut self, key: K, value: V) {
        let node = Node {
            key,
            value,
            next: self.head.take(),
        };
        self.head = Some(Box::new(node));
        self.len += 1;
    }

    /// Key comparisons made by `find` since the last reset.
    pub fn probes(&self) -> usize {
        self.probes.get()
    }

    /// Resets the probe counter to zero.
    pub fn reset_probes(&self) {
        self.probes.set(0);
    }

    /// Value at `index` links from the head, or `None` past the end of the
    /// chain. Does not count as a probe.
    pub fn get(&self, index: usize) -> Option<&V> {
        self.iter().nth(index).map(|(_, value)| value)
    }

    /// Values in head-to-tail order, or `None` if the bucket is empty.
    ///
    /// An empty bucket yields `None` rather than an empty vector, so callers
    /// can tell a never-used slot from one they have already drained.
    pub fn to_vec(&self) -> Option<Vec<V>>
    where
        V: Clone,
    {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().map(|(_, value)| value.clone()).collect())
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { node: &self.head }
    }

    /// Removes and yields every entry in head-to-tail order. Dropping the
    /// iterator early relinks the unconsumed tail.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        let item = self.head.take();
        Drain {
            head_ref: &mut self.head,
            item,
            len: &mut self.len,
        }
    }

    /// Drops every entry. The probe counter is left as is.
    pub fn clear(&mut self) {
        let mut head = self.head.take();
        while let Some(mut node) = head {
            head = node.next.take();
        }
        self.len = 0;
    }
}

impl<K: Eq, V> Bucket<K, V> {
    /// Finds the first entry whose key equals `key`, scanning from the head.
    ///
    /// Every node visited counts as one probe, the matching node included.
    /// With duplicate keys this returns the most recently pushed value.
    pub fn find(&self, key: &K) -> Option<&V> {
        let mut current = &self.head;
        while let Some(node) = current {
            self.probes.set(self.probes.get() + 1);
            if node.key == *key {
                return Some(&node.value);
            }
            current = &node.next;
        }
        None
    }

    /// Unlinks the first entry whose key equals `key` and returns its value.
    ///
    /// Returns `None` and leaves the chain untouched when the key is absent.
    /// Does not count probes.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut current = &mut self.head;
        loop {
            match current {
                None => return None,
                Some(node) if node.key == *key => {
                    let node = current.take()?;
                    let Node { value, next, .. } = *node;
                    *current = next;
                    self.len -= 1;
                    return Some(value);
                }
                Some(node) => current = &mut node.next,
            }
        }
    }
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Bucket<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Debug, V: Debug> Debug for Bucket<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket {{ len: {}, entries: {{", self.len)?;
        let mut iter = self.iter();
        if let Some((key, value)) = iter.next() {
            write!(f, "({key:?}, {value:?})")?;
        }
        for (key, value) in iter {
            write!(f, ", ({key:?}, {value:?})")?;
        }
        write!(f, "}} }}")
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Bucket<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // the probe counter is diagnostic state, not part of the contents
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Bucket<K, V> {}

impl<K, V> FromIterator<(K, V)> for Bucket<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bucket = Bucket::new();
        bucket.extend(iter);
        bucket
    }
}

impl<K, V> Extend<(K, V)> for Bucket<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

mod iters {
    use super::{Link, Node};

    impl<K, V> IntoIterator for super::Bucket<K, V> {
        type Item = (K, V);
        type IntoIter = IntoIter<K, V>;
        fn into_iter(mut self) -> Self::IntoIter {
            IntoIter {
                head: self.head.take(),
            }
        }
    }

    impl<'a, K, V> IntoIterator for &'a super::Bucket<K, V> {
        type Item = (&'a K, &'a V);
        type IntoIter = Iter<'a, K, V>;
        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    }

    pub struct IntoIter<K, V> {
        pub(crate) head: Link<K, V>,
    }

    impl<K, V> Iterator for IntoIter<K, V> {
        type Item = (K, V);
        fn next(&mut self) -> Option<Self::Item> {
            let node = self.head.take()?;
            let Node { key, value, next } = *node;
            self.head = next;
            Some((key, value))
        }
    }

    impl<K, V> Drop for IntoIter<K, V> {
        fn drop(&mut self) {
            // unlink node by node so a long chain cannot recurse on drop
            while self.next().is_some() {}
        }
    }

    pub struct Iter<'a, K, V> {
        pub(crate) node: &'a Link<K, V>,
    }

    impl<'a, K, V> Iterator for Iter<'a, K, V> {
        type Item = (&'a K, &'a V);
        fn next(&mut self) -> Option<Self::Item> {
            if let Some(node) = self.node {
                self.node = &node.next;
                Some((&node.key, &node.value))
            } else {
                None
            }
        }
    }

    pub struct Drain<'a, K, V> {
        pub(crate) head_ref: &'a mut Link<K, V>,
        pub(crate) item: Link<K, V>,
        pub(crate) len: &'a mut usize,
    }

    impl<'a, K, V> Iterator for Drain<'a, K, V> {
        type Item = (K, V);
        fn next(&mut self) -> Option<Self::Item> {
            let node = self.item.take()?;
            let Node { key, value, next } = *node;
            self.item = next;
            *self.len -= 1;
            Some((key, value))
        }
    }

    impl<'a, K, V> Drop for Drain<'a, K, V> {
        fn drop(&mut self) {
            *self.head_ref = self.item.take();
        }
    }
}
