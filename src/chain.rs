//! Singly linked bucket used by [`ChainedHashMap`](crate::ChainedHashMap)

use std::fmt;

/// Owned link to the next node
type Link<V> = Option<Box<Node<V>>>;

/// A key-value record in a chain
struct Node<V> {
    /// The key of the record
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Link<V>,
}

/// A singly linked list of key-value records.
///
/// Every node is owned by exactly one parent: the chain owns its head and each node
/// owns its successor. New records go to the front.
pub(crate) struct Chain<V> {
    /// First node, if any
    head: Link<V>,
}

impl<V> Chain<V> {
    /// Creates an empty chain
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    /// Returns true if the chain holds no records
    pub(crate) const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of records in the chain
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    /// Prepends a record. Does not check for an existing record with the same key.
    pub(crate) fn push_front(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
    }

    /// Finds the value stored under `key`
    pub(crate) fn find(&self, key: &str) -> Option<&V> {
        self.iter().find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Finds the value stored under `key` for modification
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the record stored under `key` and returns its value
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let mut node = link.take()?;
        *link = node.next.take();
        Some(node.value)
    }

    /// Iterates over the records from the front
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink node by node; the default recursive drop can overflow on long chains
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SLL [")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({key}: {value})")?;
        }
        f.write_str("]")
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter { next: self.head.take() }
    }
}

/// Borrowing iterator over a chain
pub(crate) struct Iter<'a, V> {
    /// Node to yield next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

/// Owning iterator that takes a chain apart from the front
pub(crate) struct IntoIter<V> {
    /// Remaining nodes
    next: Link<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.next.take()?;
        self.next = node.next.take();
        let Node { key, value, .. } = *node;
        Some((key, value))
    }
}

impl<V> Drop for IntoIter<V> {
    fn drop(&mut self) {
        let mut link = self.next.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}
