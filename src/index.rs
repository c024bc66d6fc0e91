//! Target Indexer
//!
//! Maps every key to the ascending list of target positions holding it.
//! Built in one pass; positions are appended in increasing order, so each
//! list is sorted and duplicate-free without a sort.

use std::collections::HashMap;

use crate::key::Key;

/// Key → ascending positions. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct PositionIndex {
    lists: HashMap<Key, Vec<usize>>,
    target_len: usize,
}

impl PositionIndex {
    /// Index target keys in position order.
    ///
    /// # Complexity
    /// - Time: O(N) expected
    /// - Space: O(N)
    pub fn build<I>(target_keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        let mut lists: HashMap<Key, Vec<usize>> = HashMap::new();
        let mut target_len = 0;
        for (pos, key) in target_keys.into_iter().enumerate() {
            lists.entry(key).or_default().push(pos);
            target_len = pos + 1;
        }
        Self { lists, target_len }
    }

    /// Positions holding `key`, ascending. `None` if the key never occurs.
    #[inline]
    pub fn positions(&self, key: &Key) -> Option<&[usize]> {
        self.lists.get(key).map(Vec::as_slice)
    }

    /// Number of positions holding `key`.
    #[inline]
    pub fn count(&self, key: &Key) -> usize {
        self.lists.get(key).map_or(0, Vec::len)
    }

    /// Length of the indexed target.
    #[inline]
    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Number of distinct keys in the target.
    #[inline]
    pub fn distinct_keys(&self) -> usize {
        self.lists.len()
    }
}
