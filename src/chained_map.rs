//! ChainedMap: fixed bucket array whose collision chains live in a slot arena.

use crate::index::{bucket_index, DEFAULT_CAPACITY, NULL_BUCKET};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::{DefaultKey, SlotMap};
use tracing::trace;

/// Link to a node in the arena; `None` terminates a chain.
type Link = Option<DefaultKey>;

struct Node<K, V> {
    // `None` is the absent (null) key.
    key: Option<K>,
    value: V,
    next: Link,
}

/// Position of a matched node: the link that points at it and the node itself.
#[derive(Copy, Clone)]
struct Found {
    bucket: usize,
    prev: Link,
    id: DefaultKey,
}

pub struct ChainedMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: [Link; DEFAULT_CAPACITY],
    nodes: SlotMap<DefaultKey, Node<K, V>>, // every node is owned by exactly one link
}

impl<K, V> ChainedMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainedMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for ChainedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("size", &self.nodes.len())
            .field("capacity", &DEFAULT_CAPACITY)
            .finish()
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: [None; DEFAULT_CAPACITY],
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of stored keys, the absent key included.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn capacity(&self) -> usize {
        DEFAULT_CAPACITY
    }

    /// Bucket a key is (or would be) stored in.
    pub fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        bucket_index(self.hasher.hash_one(q), DEFAULT_CAPACITY)
    }

    /// Number of nodes chained in `bucket`. Panics if `bucket >= capacity()`.
    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut n = 0;
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            n += 1;
            cursor = self.nodes[id].next;
        }
        n
    }

    /// Insert `value` under `key`, overwriting in place if the key is present.
    /// Returns the replaced value. Chains grow without bound; there is no resize.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        self.put_in(bucket, Some(key), value)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.find(q)?;
        self.nodes.get(found.id).map(|n| &n.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.find(q)?;
        self.nodes.get_mut(found.id).map(|n| &mut n.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    /// Unlink the node for `q` and return its value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.find(q)?;
        self.unlink(found)
    }

    /// Store `value` under the absent key. It always lives in bucket 0.
    pub fn put_null(&mut self, value: V) -> Option<V> {
        self.put_in(NULL_BUCKET, None, value)
    }

    pub fn get_null(&self) -> Option<&V> {
        let found = self.find_null()?;
        self.nodes.get(found.id).map(|n| &n.value)
    }

    pub fn contains_null(&self) -> bool {
        self.find_null().is_some()
    }

    pub fn remove_null(&mut self) -> Option<V> {
        let found = self.find_null()?;
        self.unlink(found)
    }

    fn find<Q>(&self, q: &Q) -> Option<Found>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_of(q);
        self.locate(bucket, |k| k.is_some_and(|k| k.borrow() == q))
    }

    fn find_null(&self) -> Option<Found> {
        self.locate(NULL_BUCKET, |k| k.is_none())
    }

    fn locate<F>(&self, bucket: usize, mut is_match: F) -> Option<Found>
    where
        F: FnMut(Option<&K>) -> bool,
    {
        let mut prev = None;
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if is_match(node.key.as_ref()) {
                return Some(Found { bucket, prev, id });
            }
            prev = Some(id);
            cursor = node.next;
        }
        None
    }

    fn put_in(&mut self, bucket: usize, key: Option<K>, value: V) -> Option<V> {
        let mut tail = None;
        let mut position = 0usize;
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let node = &mut self.nodes[id];
            if node.key == key {
                return Some(core::mem::replace(&mut node.value, value));
            }
            tail = Some(id);
            cursor = node.next;
            position += 1;
        }

        let id = self.nodes.insert(Node {
            key,
            value,
            next: None,
        });
        match tail {
            None => self.buckets[bucket] = Some(id),
            Some(t) => self.nodes[t].next = Some(id),
        }
        trace!(bucket, position, size = self.nodes.len(), "linked node");
        None
    }

    fn unlink(&mut self, found: Found) -> Option<V> {
        let node = self.nodes.remove(found.id)?;
        match found.prev {
            None => self.buckets[found.bucket] = node.next,
            Some(p) => self.nodes[p].next = node.next,
        }
        trace!(bucket = found.bucket, size = self.nodes.len(), "unlinked node");
        Some(node.value)
    }
}
