//! Rank-indexed, key-deduplicated reference storage.
//!
//! Constructors iterate over the references of earlier ranks while
//! producing new candidates; mutating the pool during that iteration
//! would invalidate it. New references therefore accumulate in a pending
//! buffer that is flushed into the rank index only at rank boundaries,
//! which also makes the first-constructor-wins rule deterministic.

use std::collections::HashSet;

use crate::refs::{Rank, RefKey};

/// Behavior the pool needs from a stored reference.
pub(crate) trait PoolItem {
    /// Bucket key, non-zero for valid items.
    fn key(&self) -> RefKey;
    /// Construction rank.
    fn rank(&self) -> Rank;
}

/// Storage for one reference family (marks or lines).
///
/// Items live in a flat arena in insertion order; handles are indices
/// into it. A per-rank index over the arena drives construction; it is
/// released once building completes, leaving only the arena for queries.
#[derive(Debug)]
pub(crate) struct RefPool<T> {
    items: Vec<T>,
    by_rank: Vec<Vec<u32>>,
    keys: HashSet<RefKey>,
    buffer: Vec<T>,
}

impl<T: PoolItem> RefPool<T> {
    /// Create a pool able to index ranks `0..=max_rank`.
    pub fn new(max_rank: Rank) -> Self {
        Self {
            items: Vec::new(),
            by_rank: vec![Vec::new(); usize::from(max_rank) + 1],
            keys: HashSet::new(),
            buffer: Vec::new(),
        }
    }

    /// Total number of references, including unflushed ones.
    pub fn total(&self) -> usize {
        self.items.len() + self.buffer.len()
    }

    /// Add a candidate to the pending buffer unless a reference with the
    /// same key already exists anywhere in the pool. Returns whether the
    /// candidate was accepted.
    pub fn add_if_new(&mut self, item: T) -> bool {
        debug_assert_ne!(item.key(), 0);
        if self.keys.insert(item.key()) {
            self.buffer.push(item);
            true
        } else {
            false
        }
    }

    /// Move the pending buffer into the arena and the rank index.
    pub fn flush(&mut self) {
        self.items.reserve(self.buffer.len());
        for item in self.buffer.drain(..) {
            let id = self.items.len() as u32;
            self.by_rank[usize::from(item.rank())].push(id);
            self.items.push(item);
        }
    }

    /// Number of flushed references of the given rank.
    pub fn rank_len(&self, rank: Rank) -> usize {
        self.by_rank
            .get(usize::from(rank))
            .map_or(0, |ids| ids.len())
    }

    /// Arena id of the `i`-th flushed reference of the given rank, in
    /// insertion order.
    pub fn rank_id(&self, rank: Rank, i: usize) -> u32 {
        self.by_rank[usize::from(rank)][i]
    }

    /// Fetch an item by arena id.
    pub fn get(&self, id: u32) -> &T {
        &self.items[id as usize]
    }

    /// All flushed items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Release the rank index and key set once building is complete.
    pub fn clear_rank_index(&mut self) {
        self.by_rank = Vec::new();
        self.keys = HashSet::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        key: RefKey,
        rank: Rank,
    }

    impl PoolItem for Item {
        fn key(&self) -> RefKey {
            self.key
        }
        fn rank(&self) -> Rank {
            self.rank
        }
    }

    #[test]
    fn test_first_key_wins() {
        let mut pool = RefPool::new(2);
        assert!(pool.add_if_new(Item { key: 7, rank: 0 }));
        assert!(!pool.add_if_new(Item { key: 7, rank: 1 }));
        assert_eq!(pool.total(), 1);

        pool.flush();
        // Still deduplicated after the flush.
        assert!(!pool.add_if_new(Item { key: 7, rank: 2 }));
        assert!(pool.add_if_new(Item { key: 8, rank: 2 }));
        assert_eq!(pool.total(), 2);
    }

    #[test]
    fn test_flush_indexes_by_rank_in_insertion_order() {
        let mut pool = RefPool::new(2);
        pool.add_if_new(Item { key: 1, rank: 1 });
        pool.add_if_new(Item { key: 2, rank: 0 });
        pool.add_if_new(Item { key: 3, rank: 1 });

        // Nothing visible to rank iteration before the flush.
        assert_eq!(pool.rank_len(1), 0);

        pool.flush();
        assert_eq!(pool.rank_len(0), 1);
        assert_eq!(pool.rank_len(1), 2);
        assert_eq!(pool.get(pool.rank_id(1, 0)).key, 1);
        assert_eq!(pool.get(pool.rank_id(1, 1)).key, 3);
        assert_eq!(pool.items().len(), 3);
    }
}
