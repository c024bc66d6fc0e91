//! Key Normalizer
//!
//! One strategy is fixed per call from the [`MatchConfig`]:
//!
//! 1. **Structure**: containers become keys. `List`/`Set`/`Map` are only
//!    accepted with `ensure_hashable`; tuples and frozensets recurse.
//!    Shared cells are transparent; re-entering a cell already on the
//!    current path is a cycle.
//! 2. **Rounding**: with `float_precision`, every float met in step 1 is
//!    rounded half-to-even, nested ones included.
//! 3. **Stringify**: with `use_custom_str`, the key becomes its canonical
//!    string.
//!
//! Rounding therefore always happens before stringification. Objects with a
//! canonical string become that string; objects without one keep their
//! identity, so the key they sit in is not stringified.
//!
//! Nesting is limited to [`MAX_DEPTH`] levels; deeper elements are rejected
//! instead of exhausting the stack.

use crate::config::MatchConfig;
use crate::error::{KeyError, Result, Sequence};
use crate::key::{round_half_even, Key};
use crate::value::Value;

/// Deepest container nesting accepted in one element.
pub const MAX_DEPTH: usize = 256;

/// Converts elements to keys under one configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyNormalizer {
    ensure_hashable: bool,
    use_custom_str: bool,
    float_precision: Option<u32>,
}

impl KeyNormalizer {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            ensure_hashable: config.ensure_hashable,
            use_custom_str: config.use_custom_str,
            float_precision: config.float_precision,
        }
    }

    /// Derive the key of one element.
    pub(crate) fn key_of(&self, value: &Value) -> core::result::Result<Key, KeyError> {
        let mut path = Vec::new();
        let key = self.structure(value, &mut path, 0)?;
        Ok(if self.use_custom_str && !key.holds_identity() {
            Key::Str(key.canonical_string())
        } else {
            key
        })
    }

    /// Derive the key of every element of `sequence`, failing on the first
    /// element that cannot be normalized.
    pub fn normalize_all(&self, values: &[Value], sequence: Sequence) -> Result<Vec<Key>> {
        values
            .iter()
            .enumerate()
            .map(|(position, value)| self.key_of(value).map_err(|e| e.at(sequence, position)))
            .collect()
    }

    /// Derive the key of a single element, reported as a pattern element.
    pub fn normalize(&self, value: &Value) -> Result<Key> {
        self.key_of(value).map_err(|e| e.at(Sequence::Pattern, 0))
    }

    fn structure(
        &self,
        value: &Value,
        path: &mut Vec<usize>,
        depth: usize,
    ) -> core::result::Result<Key, KeyError> {
        if depth > MAX_DEPTH {
            return Err(KeyError::TooDeep(MAX_DEPTH));
        }
        let inner = depth + 1;
        Ok(match value {
            Value::None => Key::None,
            Value::Bool(b) => Key::Bool(*b),
            Value::Int(i) => Key::Int(*i),
            Value::Float(x) => match self.float_precision {
                Some(digits) => Key::float(round_half_even(*x, digits)),
                None => Key::float(*x),
            },
            Value::Str(s) => Key::Str(s.clone()),
            Value::Tuple(items) => Key::Tuple(self.structure_all(items, path, inner)?),
            Value::FrozenSet(members) => Key::set(self.structure_all(members, path, inner)?),
            Value::List(items) => {
                self.require_hashable(value)?;
                Key::Tuple(self.structure_all(items, path, inner)?)
            }
            Value::Set(members) => {
                self.require_hashable(value)?;
                Key::set(self.structure_all(members, path, inner)?)
            }
            Value::Map(entries) => {
                self.require_hashable(value)?;
                let entries = entries
                    .iter()
                    .map(|(k, v)| {
                        Ok((
                            self.structure(k, path, inner)?,
                            self.structure(v, path, inner)?,
                        ))
                    })
                    .collect::<core::result::Result<Vec<_>, KeyError>>()?;
                Key::map(entries)
            }
            Value::Object(object) => {
                let canonical = if self.use_custom_str {
                    object.get().canonical_str()
                } else {
                    None
                };
                canonical.map_or_else(|| Key::Identity(object.clone()), Key::Str)
            }
            Value::Shared(cell) => {
                let id = cell.identity();
                if path.contains(&id) {
                    return Err(KeyError::Cyclic);
                }
                path.push(id);
                let key = cell.with(|cell_value| self.structure(cell_value, path, inner));
                path.pop();
                key?
            }
        })
    }

    fn structure_all(
        &self,
        values: &[Value],
        path: &mut Vec<usize>,
        depth: usize,
    ) -> core::result::Result<Vec<Key>, KeyError> {
        values
            .iter()
            .map(|v| self.structure(v, path, depth))
            .collect()
    }

    #[inline]
    fn require_hashable(&self, value: &Value) -> core::result::Result<(), KeyError> {
        if self.ensure_hashable {
            Ok(())
        } else {
            Err(KeyError::Unhashable(value.kind()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::{CustomElement, SharedValue};

    fn normalizer(config: MatchConfig) -> KeyNormalizer {
        KeyNormalizer::new(&config)
    }

    #[derive(Debug)]
    struct Point(i32, i32);

    #[derive(Debug)]
    struct Opaque;

    impl CustomElement for Opaque {}

    fn nested_lists(depth: usize) -> Value {
        let mut value = Value::Int(0);
        for _ in 0..depth {
            value = Value::list([value]);
        }
        value
    }

    impl CustomElement for Point {
        fn canonical_str(&self) -> Option<String> {
            Some(format!("Point({}, {})", self.0, self.1))
        }
    }

    #[test]
    fn test_scalars_pass_through() {
        let n = normalizer(MatchConfig::default());
        assert_eq!(n.normalize(&Value::Int(4)).unwrap(), Key::Int(4));
        assert_eq!(
            n.normalize(&Value::from("x")).unwrap(),
            Key::Str("x".into())
        );
        assert_eq!(
            n.normalize(&Value::tuple([Value::Int(1), Value::Int(2)]))
                .unwrap(),
            Key::Tuple(vec![Key::Int(1), Key::Int(2)])
        );
    }

    #[test]
    fn test_unhashable_without_flag() {
        let n = normalizer(MatchConfig::default());
        let target = vec![Value::Int(1), Value::from(vec![2, 3])];
        assert_eq!(
            n.normalize_all(&target, Sequence::Target).unwrap_err(),
            Error::Unhashable {
                sequence: Sequence::Target,
                position: 1,
                kind: "list"
            }
        );

        // A set nested in a tuple is still unhashable.
        let nested = Value::tuple([Value::set([Value::Int(1)])]);
        assert!(matches!(
            n.normalize(&nested),
            Err(Error::Unhashable { kind: "set", .. })
        ));
    }

    #[test]
    fn test_ensure_hashable_structural_equality() {
        let n = normalizer(MatchConfig::new().with_ensure_hashable(true));

        let a = Value::set([Value::Int(3), Value::Int(1)]);
        let b = Value::set([Value::Int(1), Value::Int(3), Value::Int(1)]);
        assert_eq!(n.normalize(&a).unwrap(), n.normalize(&b).unwrap());

        let m1 = Value::map([(Value::from("k"), Value::from(vec![1, 2]))]);
        let m2 = Value::map([(Value::from("k"), Value::from(vec![1, 2]))]);
        assert_eq!(n.normalize(&m1).unwrap(), n.normalize(&m2).unwrap());

        // Order matters for sequences.
        assert_ne!(
            n.normalize(&Value::from(vec![1, 2])).unwrap(),
            n.normalize(&Value::from(vec![2, 1])).unwrap()
        );

        // Converting twice gives the same key.
        let once = n.normalize(&m1).unwrap();
        assert_eq!(once, n.normalize(&m1).unwrap());
    }

    #[test]
    fn test_cycle_detected() {
        let n = normalizer(MatchConfig::new().with_ensure_hashable(true));
        let cell = SharedValue::new(Value::None);
        cell.set(Value::list([Value::Int(1), Value::Shared(cell.clone())]));

        let target = vec![Value::Int(0), Value::Shared(cell.clone())];
        assert_eq!(
            n.normalize_all(&target, Sequence::Target).unwrap_err(),
            Error::Cyclic {
                sequence: Sequence::Target,
                position: 1
            }
        );
        cell.set(Value::None);
    }

    #[test]
    fn test_shared_cell_repeated_without_cycle() {
        let n = normalizer(MatchConfig::default());
        let cell = SharedValue::new(Value::Int(5));
        let pair = Value::tuple([Value::Shared(cell.clone()), Value::Shared(cell)]);
        assert_eq!(
            n.normalize(&pair).unwrap(),
            Key::Tuple(vec![Key::Int(5), Key::Int(5)])
        );
    }

    #[test]
    fn test_float_precision() {
        let n = normalizer(MatchConfig::new().with_float_precision(Some(3)));
        assert_eq!(
            n.normalize(&Value::Float(1.1111)).unwrap(),
            n.normalize(&Value::Float(1.111)).unwrap()
        );
        assert_ne!(
            n.normalize(&Value::Float(1.1116)).unwrap(),
            n.normalize(&Value::Float(1.111)).unwrap()
        );
        // Integers are never rounded or coerced.
        assert_eq!(n.normalize(&Value::Int(7)).unwrap(), Key::Int(7));
        // Nested floats are rounded too.
        assert_eq!(
            n.normalize(&Value::tuple([Value::Float(0.12345)])).unwrap(),
            Key::Tuple(vec![Key::float(0.123)])
        );
    }

    #[test]
    fn test_custom_str() {
        let n = normalizer(MatchConfig::new().with_custom_str(true));
        assert_eq!(
            n.normalize(&Value::object(Point(1, 2))).unwrap(),
            Key::Str("Point(1, 2)".into())
        );
        assert_eq!(
            n.normalize(&Value::object(Point(1, 2))).unwrap(),
            n.normalize(&Value::object(Point(1, 2))).unwrap()
        );
        // Strings and numbers with the same text collide.
        assert_eq!(
            n.normalize(&Value::Int(1)).unwrap(),
            n.normalize(&Value::from("1")).unwrap()
        );

        // Objects without a canonical string keep their identity.
        let opaque = Value::object(Opaque);
        assert!(matches!(n.normalize(&opaque).unwrap(), Key::Identity(_)));
        assert_eq!(n.normalize(&opaque).unwrap(), n.normalize(&opaque.clone()).unwrap());
        assert_ne!(
            n.normalize(&opaque).unwrap(),
            n.normalize(&Value::object(Opaque)).unwrap()
        );
        let wrapped = Value::tuple([Value::Int(1), opaque.clone()]);
        assert!(n.normalize(&wrapped).unwrap().holds_identity());
    }

    #[test]
    fn test_map_repeated_key() {
        let n = normalizer(MatchConfig::new().with_ensure_hashable(true));
        let repeated = Value::map([
            (Value::Int(1), Value::Int(2)),
            (Value::Int(1), Value::Int(3)),
        ]);
        let single = Value::map([(Value::Int(1), Value::Int(3))]);
        assert_eq!(n.normalize(&repeated).unwrap(), n.normalize(&single).unwrap());
    }

    #[test]
    fn test_nesting_limit() {
        let n = normalizer(MatchConfig::new().with_ensure_hashable(true));
        assert!(n.normalize(&nested_lists(100)).is_ok());
        assert!(n.normalize(&nested_lists(MAX_DEPTH)).is_ok());

        let target = vec![Value::Int(1), nested_lists(1000)];
        assert_eq!(
            n.normalize_all(&target, Sequence::Target).unwrap_err(),
            Error::TooDeep {
                sequence: Sequence::Target,
                position: 1,
                limit: MAX_DEPTH
            }
        );
    }

    #[test]
    fn test_objects_by_identity() {
        let n = normalizer(MatchConfig::default());
        let p = Value::object(Point(1, 2));
        assert_eq!(n.normalize(&p).unwrap(), n.normalize(&p.clone()).unwrap());
        assert_ne!(
            n.normalize(&p).unwrap(),
            n.normalize(&Value::object(Point(1, 2))).unwrap()
        );
    }

    #[test]
    fn test_rounding_before_stringify() {
        let n = normalizer(
            MatchConfig::new()
                .with_custom_str(true)
                .with_float_precision(Some(1)),
        );
        assert_eq!(
            n.normalize(&Value::Float(2.04)).unwrap(),
            Key::Str("2.0".into())
        );
    }
}
