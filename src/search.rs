//! Sequence Index
//!
//! **Architecture**:
//! - Key Normalizer: one strategy per index, fixed by the [`MatchConfig`]
//! - Position Index: key → ascending positions, built in one pass
//! - Locate: binary search per key, consumed positions skipped by mask
//!
//! The index is immutable after [`SequenceIndex::build`], so one index can
//! serve any number of queries from any number of threads.

use alloc::vec::Vec;
use tracing::debug;

use crate::assemble::{assemble, Occurrence};
use crate::config::MatchConfig;
use crate::error::{Result, Sequence};
use crate::index::PositionIndex;
use crate::locate::{locate, LocateMode};
use crate::normalize::KeyNormalizer;
use crate::value::Value;

/// Normalized, indexed target sequence.
#[derive(Debug, Clone)]
pub struct SequenceIndex {
    config: MatchConfig,
    normalizer: KeyNormalizer,
    index: PositionIndex,
}

impl SequenceIndex {
    /// Normalize and index `target`.
    ///
    /// Fails if any target element cannot be normalized under `config`.
    ///
    /// # Complexity
    /// - Time: O(N) expected (one key derivation per element)
    /// - Space: O(N)
    pub fn build(target: &[Value], config: &MatchConfig) -> Result<Self> {
        let normalizer = KeyNormalizer::new(config);
        let keys = normalizer.normalize_all(target, Sequence::Target)?;
        let index = PositionIndex::build(keys);
        debug!(
            "Built sequence index: {} positions, {} distinct keys",
            index.target_len(),
            index.distinct_keys()
        );
        Ok(Self {
            config: *config,
            normalizer,
            index,
        })
    }

    /// Find all occurrences of `pattern`, in ascending anchor order.
    ///
    /// # Example
    /// ```
    /// use alice_seqmatch::{values, MatchConfig, SequenceIndex};
    ///
    /// let index = SequenceIndex::build(&values([1, 3, 2, 1, 2]), &MatchConfig::default()).unwrap();
    /// let found = index.find(&values([1, 2])).unwrap();
    /// assert_eq!(found, vec![vec![0, 2], vec![3, 4]]);
    /// ```
    pub fn find(&self, pattern: &[Value]) -> Result<Vec<Occurrence>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        let keys = self.normalizer.normalize_all(pattern, Sequence::Pattern)?;
        let occurrences = assemble(&keys, &self.index, &self.config);
        debug!(
            "Pattern of {} elements: {} occurrences in {} positions",
            keys.len(),
            occurrences.len(),
            self.index.target_len()
        );
        Ok(occurrences)
    }

    /// Number of target positions equal to `value`.
    pub fn count(&self, value: &Value) -> Result<usize> {
        let key = self.normalizer.normalize(value)?;
        Ok(self.index.count(&key))
    }

    /// Check if `value` occurs in the target.
    pub fn contains(&self, value: &Value) -> Result<bool> {
        Ok(self.count(value)? > 0)
    }

    /// Ascending positions equal to `value` (empty if none).
    pub fn positions(&self, value: &Value) -> Result<&[usize]> {
        let key = self.normalizer.normalize(value)?;
        Ok(self.index.positions(&key).unwrap_or(&[]))
    }

    /// Smallest position equal to `value`.
    pub fn first_position(&self, value: &Value) -> Result<Option<usize>> {
        let positions = self.positions(value)?;
        Ok(locate(positions, LocateMode::First, |_| true))
    }

    /// Length of the indexed target.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.target_len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.target_len() == 0
    }

    /// Number of distinct keys in the target.
    #[inline]
    pub fn distinct_keys(&self) -> usize {
        self.index.distinct_keys()
    }

    #[inline]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
