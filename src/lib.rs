//! chained-map: a single-threaded, fixed-capacity hash map that resolves
//! collisions with separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedMap<K, V, S>` owns 16 buckets. Each bucket is the head link of
//!   a singly-linked chain of nodes; a node holds one key, one value and
//!   the link to its successor.
//! - Nodes live in a generational arena (`slotmap`). Links are arena keys,
//!   so every node is owned by exactly one link and no node can be shared
//!   between buckets. Dropping the arena releases all chains without
//!   recursing down them.
//!
//! Indexing
//! - A key is hashed with the map's `BuildHasher` (default: hashbrown's
//!   `DefaultHashBuilder`). The `u64` is read as a signed hash code, its
//!   absolute value is taken, then reduced modulo the capacity.
//! - `i64::MIN` has no positive counterpart. Its magnitude is computed as
//!   `u64` (`2^63`) instead of wrapping, so every index is in range.
//!
//! Operations
//! - `put` overwrites in place when the key is present and appends at the
//!   chain tail otherwise. `get` returns `Option<&V>`; `None` only ever
//!   means "not present". `remove` splices the node out of its chain and is
//!   a no-op for absent keys. `size` is O(1).
//!
//! Null key
//! - The absent key is a separate API (`put_null`, `get_null`,
//!   `remove_null`, `contains_null`). It always lives in bucket 0 and is
//!   unique like any other key.
//!
//! Notes and non-goals
//! - No resize and no load-factor management: chains grow without bound
//!   and lookups degrade to linear time in the worst case.
//! - No iteration API, no capacity knob.
//! - Not synchronized. Mutation takes `&mut self`; wrap the map in a mutex
//!   for shared mutable access.
//! - Structural changes emit `tracing` events at trace level.

mod chained_map;
mod chained_map_proptest;
mod index;

// Public surface
pub use chained_map::ChainedMap;
pub use index::DEFAULT_CAPACITY;
