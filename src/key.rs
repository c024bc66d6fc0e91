//! Normalized keys
//!
//! A [`Key`] is the sole matching authority: two elements match iff their
//! keys are equal. Keys are totally ordered so unordered collections can be
//! stored in a canonical (sorted, deduplicated) form.

use core::fmt;

use crate::value::ObjectRef;

/// Float stored by its bit pattern.
///
/// `-0.0` is folded into `0.0` and every NaN into one canonical NaN, so
/// key equality is reflexive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        let canonical = if value.is_nan() {
            f64::NAN
        } else if value == 0.0 {
            0.0
        } else {
            value
        };
        Self(canonical.to_bits())
    }

    #[inline]
    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl fmt::Debug for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())
    }
}

/// Hashable, totally ordered representation of an element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    None,
    Bool(bool),
    Int(i64),
    Float(FloatKey),
    Str(String),
    Tuple(Vec<Key>),
    /// Sorted, duplicate-free members.
    Set(Vec<Key>),
    /// Sorted, duplicate-free entries.
    Map(Vec<(Key, Key)>),
    /// Custom object compared by identity; holding it keeps it alive.
    Identity(ObjectRef),
}

impl Key {
    pub fn float(value: f64) -> Self {
        Key::Float(FloatKey::new(value))
    }

    /// Canonical set from members in any order.
    pub fn set(mut members: Vec<Key>) -> Self {
        members.sort_unstable();
        members.dedup();
        Key::Set(members)
    }

    /// Canonical map from entries in any order. A repeated key keeps the
    /// value of its last entry.
    pub fn map(mut entries: Vec<(Key, Key)>) -> Self {
        // Stable: equal keys stay in insertion order.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut unique: Vec<(Key, Key)> = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            match unique.last_mut() {
                Some(last) if last.0 == k => last.1 = v,
                _ => unique.push((k, v)),
            }
        }
        Key::Map(unique)
    }

    /// Whether a custom object compared by identity occurs in this key.
    pub fn holds_identity(&self) -> bool {
        match self {
            Key::Identity(_) => true,
            Key::Tuple(items) | Key::Set(items) => items.iter().any(Key::holds_identity),
            Key::Map(entries) => entries
                .iter()
                .any(|(k, v)| k.holds_identity() || v.holds_identity()),
            _ => false,
        }
    }

    /// Canonical string form, with top-level strings left unquoted.
    pub fn canonical_string(&self) -> String {
        match self {
            Key::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Nested rendering: strings are quoted so `"1"` and `1` stay apart inside
/// containers.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::None => f.write_str("None"),
            Key::Bool(true) => f.write_str("True"),
            Key::Bool(false) => f.write_str("False"),
            Key::Int(v) => write!(f, "{v}"),
            Key::Float(v) => write!(f, "{:?}", v.get()),
            Key::Str(s) => write!(f, "{s:?}"),
            Key::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Key::Set(members) if members.is_empty() => f.write_str("frozenset()"),
            Key::Set(members) => {
                f.write_str("frozenset({")?;
                write_joined(f, members)?;
                f.write_str("})")
            }
            Key::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Key::Identity(object) => write!(
                f,
                "<{} object at {:#x}>",
                object.get().type_name(),
                object.identity()
            ),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Key]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Round `value` to `digits` decimals, ties to even.
///
/// Non-finite values, and values whose scaled form cannot be represented,
/// are returned unchanged.
pub fn round_half_even(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exp) = i32::try_from(digits) else {
        return value;
    };
    let scale = 10f64.powi(exp);
    let scaled = value * scale;
    if !scale.is_finite() || !scaled.is_finite() {
        return value;
    }
    // Past 1e15 the scaled value keeps at most three fractional bits.
    if scaled.abs() >= 1e15 {
        return value;
    }
    scaled.round_ties_even() / scale
}
