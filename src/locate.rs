//! Candidate Locator
//!
//! Binary search over one key's ascending position list. Unavailable
//! positions are skipped with a predicate instead of being removed, so the
//! list stays shared and immutable.
//!
//! | Mode | Result |
//! |------|--------|
//! | `First` | smallest available position |
//! | `AtOrAfter(r)` | smallest available position ≥ r |
//! | `Nearest(r)` | available position closest to r, ties → smaller |
//!
//! Each call is O(log N + c), c = unavailable positions stepped over.

/// Position constraint for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateMode {
    First,
    AtOrAfter(usize),
    Nearest(usize),
}

/// Find a candidate in `positions` (ascending) that satisfies `mode` and
/// `is_free`. `None` if there is none.
///
/// # Example
/// ```
/// use alice_seqmatch::locate::{locate, LocateMode};
///
/// let positions = [2, 4, 9];
/// assert_eq!(locate(&positions, LocateMode::AtOrAfter(3), |_| true), Some(4));
/// assert_eq!(locate(&positions, LocateMode::Nearest(3), |_| true), Some(2));
/// assert_eq!(locate(&positions, LocateMode::Nearest(3), |p| p != 2), Some(4));
/// ```
#[inline]
pub fn locate<F>(positions: &[usize], mode: LocateMode, is_free: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    match mode {
        LocateMode::First => first_free(positions, &is_free),
        LocateMode::AtOrAfter(reference) => {
            let split = positions.partition_point(|&p| p < reference);
            first_free(&positions[split..], &is_free)
        }
        LocateMode::Nearest(reference) => {
            let split = positions.partition_point(|&p| p < reference);
            let below = positions[..split].iter().rev().copied().find(|&p| is_free(p));
            let above = first_free(&positions[split..], &is_free);
            match (below, above) {
                (Some(lo), Some(hi)) => {
                    if reference - lo <= hi - reference {
                        Some(lo)
                    } else {
                        Some(hi)
                    }
                }
                (lo, hi) => lo.or(hi),
            }
        }
    }
}

#[inline]
fn first_free<F>(positions: &[usize], is_free: &F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    positions.iter().copied().find(|&p| is_free(p))
}
