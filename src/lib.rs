//! # ALICE-SeqMatch
//!
//! **Sequence occurrence matching over a position index**
//!
//! > "Index once. Every pattern element is a binary search away."
//!
//! Given a short pattern and a long target, find every tuple of target
//! positions whose elements match the pattern, ordered or unordered,
//! overlapping or disjoint.
//!
//! ## Architecture
//!
//! - **Key Normalizer**: elements → hashable keys (containers, custom
//!   string forms, float rounding)
//! - **Position Index**: key → ascending positions, one pass over the target
//! - **Candidate Locator**: binary search with a consumed-position mask
//! - **Occurrence Assembler**: anchors ascend, one locate per pattern element
//!
//! ## Performance
//!
//! | Operation | Time | Space |
//! |-----------|------|-------|
//! | Build | **O(N)** | O(N) |
//! | Locate | **O(log N)** | O(1) |
//! | Find | O(k × m × log N) | O(k × m) |
//!
//! k = anchors, m = pattern length, N = target length.
//!
//! ## Example
//!
//! ```
//! use alice_seqmatch::{find_occurrences, values, GapPolicy, MatchConfig};
//!
//! let pattern = values([1, 2]);
//! let target = values([2, 2, 1, 2, 1]);
//!
//! // Occurrences may share positions and elements may appear in any order
//! let found = find_occurrences(&pattern, &target, &MatchConfig::default()).unwrap();
//! assert_eq!(found, vec![vec![2, 3], vec![4, 3]]);
//!
//! // Disjoint occurrences, strictly ascending positions
//! let config = MatchConfig::new()
//!     .with_occurrence_gap(GapPolicy::NonNegative)
//!     .with_element_gap(GapPolicy::NonNegative);
//! let found = find_occurrences(&pattern, &target, &config).unwrap();
//! assert_eq!(found, vec![vec![2, 3]]);
//! ```

extern crate alloc;

pub mod assemble;
pub mod bitvec;
pub mod config;
pub mod error;
pub mod index;
pub mod key;
pub mod locate;
pub mod normalize;
pub mod search;
pub mod value;

pub use assemble::Occurrence;
pub use config::{GapPolicy, MatchConfig};
pub use error::{Error, Result, Sequence};
pub use key::Key;
pub use search::SequenceIndex;
pub use value::{values, CustomElement, ObjectRef, SharedValue, Value};

/// Version
pub const VERSION: &str = "0.1.0";

/// Find all occurrences of `pattern` in `target`.
///
/// Returns one [`Occurrence`] per successful anchor, in ascending anchor
/// order. An empty pattern yields no occurrences whatever the target holds.
///
/// # Errors
/// - [`Error::Unhashable`] if an element is a list, set or map and
///   `ensure_hashable` is off
/// - [`Error::Cyclic`] if an element contains itself
/// - [`Error::TooDeep`] if an element nests deeper than
///   [`normalize::MAX_DEPTH`] levels
///
/// The target is normalized before the pattern, so when both hold a bad
/// element the target's is reported.
pub fn find_occurrences(
    pattern: &[Value],
    target: &[Value],
    config: &MatchConfig,
) -> Result<Vec<Occurrence>> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    SequenceIndex::build(target, config)?.find(pattern)
}

/// [`find_occurrences`] with options given as `(name, value)` strings.
///
/// # Errors
/// Everything [`find_occurrences`] reports, plus [`Error::InvalidGap`] and
/// [`Error::Config`] for unrecognized options or values.
pub fn find_occurrences_with<I, K, V>(
    pattern: &[Value],
    target: &[Value],
    options: I,
) -> Result<Vec<Occurrence>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let config = MatchConfig::from_options(options)?;
    find_occurrences(pattern, target, &config)
}
