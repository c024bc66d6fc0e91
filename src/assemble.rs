//! Occurrence Assembler
//!
//! Anchors are the positions of the first pattern key, tried in ascending
//! order. From each anchor the remaining pattern keys are placed one at a
//! time, each located relative to the slot right after the previous one:
//!
//! - ordered (`element_gap = non-negative`): first free position ≥ prev + 1
//! - unordered (`element_gap = any`): free position nearest to prev + 1,
//!   ties → smaller
//!
//! A position is free if the current occurrence does not already use it
//! and, with `occurrence_gap = non-negative`, no accepted occurrence has
//! consumed it. Acceptance is greedy: an occurrence consumes its positions
//! before the next anchor is tried.

use core::fmt;
use core::ops::Deref;

use alloc::vec::Vec;
use tracing::trace;

use crate::bitvec::PositionMask;
use crate::config::MatchConfig;
use crate::index::PositionIndex;
use crate::key::Key;
use crate::locate::{locate, LocateMode};

/// One match: a target position per pattern element, in pattern order.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Occurrence {
    positions: Vec<usize>,
}

impl Occurrence {
    pub fn new(positions: Vec<usize>) -> Self {
        Self { positions }
    }

    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Position matched by the first pattern element.
    #[inline]
    pub fn anchor(&self) -> Option<usize> {
        self.positions.first().copied()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.positions
    }
}

impl Deref for Occurrence {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.positions
    }
}

impl fmt::Debug for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.positions).finish()
    }
}

impl From<Vec<usize>> for Occurrence {
    fn from(positions: Vec<usize>) -> Self {
        Self::new(positions)
    }
}

impl From<Occurrence> for Vec<usize> {
    fn from(occurrence: Occurrence) -> Self {
        occurrence.positions
    }
}

impl PartialEq<Vec<usize>> for Occurrence {
    fn eq(&self, other: &Vec<usize>) -> bool {
        &self.positions == other
    }
}

impl PartialEq<[usize]> for Occurrence {
    fn eq(&self, other: &[usize]) -> bool {
        self.positions.as_slice() == other
    }
}

/// Assemble all occurrences of `pattern_keys` in the indexed target.
///
/// # Complexity
/// O(k · m · log N) for k anchors and pattern length m, plus the positions
/// stepped over because they were already taken.
pub fn assemble(
    pattern_keys: &[Key],
    index: &PositionIndex,
    config: &MatchConfig,
) -> Vec<Occurrence> {
    let m = pattern_keys.len();
    if m == 0 || m > index.target_len() {
        return Vec::new();
    }

    // Every key must occur at least once or nothing can match.
    let Some(lists) = pattern_keys
        .iter()
        .map(|key| index.positions(key))
        .collect::<Option<Vec<&[usize]>>>()
    else {
        return Vec::new();
    };

    let ordered = config.ordered_elements();
    let mut consumed = config
        .disjoint_occurrences()
        .then(|| PositionMask::new(index.target_len()));

    let mut occurrences = Vec::new();
    let mut current: Vec<usize> = Vec::with_capacity(m);
    let mut cursor = 0;

    'anchors: while let Some(anchor) = locate(lists[0], LocateMode::AtOrAfter(cursor), |p| {
        !is_consumed(&consumed, p)
    }) {
        cursor = anchor + 1;
        current.clear();
        current.push(anchor);

        for list in &lists[1..] {
            let reference = current[current.len() - 1] + 1;
            let mode = if ordered {
                LocateMode::AtOrAfter(reference)
            } else {
                LocateMode::Nearest(reference)
            };
            let found = locate(list, mode, |p| {
                !is_consumed(&consumed, p) && !current.contains(&p)
            });
            match found {
                Some(pos) => current.push(pos),
                None => {
                    trace!("Anchor {} failed at pattern element {}", anchor, current.len());
                    continue 'anchors;
                }
            }
        }

        if let Some(mask) = consumed.as_mut() {
            for &pos in &current {
                mask.insert(pos);
            }
        }
        occurrences.push(Occurrence::new(current.clone()));
    }

    occurrences
}

#[inline]
fn is_consumed(consumed: &Option<PositionMask>, pos: usize) -> bool {
    consumed.as_ref().is_some_and(|mask| mask.contains(pos))
}
