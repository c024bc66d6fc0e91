//! Element value model
//!
//! A small tagged-variant model for pattern and target elements:
//!
//! - scalars: `None`, `Bool`, `Int`, `Float`, `Str`
//! - hashable containers: `Tuple` (ordered), `FrozenSet` (unordered)
//! - unhashable containers: `List`, `Set`, `Map`
//! - `Object`: a caller-defined element, equal only to itself unless it
//!   offers a canonical string
//! - `Shared`: a shared mutable cell, the only way to build a cycle

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

/// A caller-defined element type.
///
/// Objects compare by identity. With `use_custom_str` they compare by
/// [`canonical_str`](CustomElement::canonical_str) instead; objects without
/// one still compare by identity.
pub trait CustomElement: fmt::Debug + Send + Sync {
    /// Canonical string form used by `use_custom_str`.
    fn canonical_str(&self) -> Option<String> {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a custom element.
///
/// Equality, ordering and hashing go by the address of the shared object.
/// A key holding an `ObjectRef` keeps the object alive, so the address
/// cannot be reused by another object while the key exists.
#[derive(Clone, Debug)]
pub struct ObjectRef(Arc<dyn CustomElement>);

impl ObjectRef {
    pub fn new<T: CustomElement + 'static>(object: T) -> Self {
        Self(Arc::new(object))
    }

    /// Address of the object, stable while any handle is alive.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn get(&self) -> &dyn CustomElement {
        self.0.as_ref()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ObjectRef {}

impl PartialOrd for ObjectRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// A shared mutable cell holding a [`Value`].
///
/// Clones share the same cell, so a cell may (indirectly) contain itself.
#[derive(Clone, Debug)]
pub struct SharedValue(Arc<RwLock<Value>>);

impl SharedValue {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Replace the contents of the cell.
    pub fn set(&self, value: Value) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Read the contents of the cell.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Address of the cell, used for cycle detection.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

/// One element of a pattern or target sequence.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    FrozenSet(Vec<Value>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Object(ObjectRef),
    Shared(SharedValue),
}

impl Value {
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Set(items.into_iter().collect())
    }

    pub fn frozen_set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::FrozenSet(items.into_iter().collect())
    }

    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    pub fn object<T: CustomElement + 'static>(object: T) -> Self {
        Value::Object(ObjectRef::new(object))
    }

    pub fn shared(value: Value) -> Self {
        Value::Shared(SharedValue::new(value))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::FrozenSet(_) => "frozenset",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Shared(_) => "shared cell",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

/// Convert anything iterable into a sequence of values.
pub fn values<I>(items: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Labelled(u32);

    impl CustomElement for Labelled {
        fn canonical_str(&self) -> Option<String> {
            Some(format!("Labelled({})", self.0))
        }
    }

    #[derive(Debug)]
    struct Plain;

    impl CustomElement for Plain {}

    #[test]
    fn test_conversions() {
        assert!(matches!(Value::from(3), Value::Int(3)));
        assert!(matches!(Value::from("a"), Value::Str(ref s) if s == "a"));
        assert!(matches!(Value::from(vec![1, 2]), Value::List(ref v) if v.len() == 2));
        assert!(matches!(Value::from(None::<i64>), Value::None));
        assert_eq!(values([1, 2, 3]).len(), 3);
    }

    #[test]
    fn test_object_identity() {
        let labelled = ObjectRef::new(Labelled(7));
        assert_eq!(labelled.get().canonical_str().as_deref(), Some("Labelled(7)"));

        let a = ObjectRef::new(Plain);
        let b = ObjectRef::new(Plain);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.identity(), a.clone().identity());
        assert!(a.get().canonical_str().is_none());
        assert!(a.get().type_name().contains("Plain"));
    }

    #[test]
    fn test_shared_cell() {
        let cell = SharedValue::new(Value::Int(1));
        let alias = cell.clone();
        alias.set(Value::Int(2));
        assert!(cell.with(|v| matches!(v, Value::Int(2))));
        assert_eq!(cell.identity(), alias.identity());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::list([]).kind(), "list");
        assert_eq!(Value::map([]).kind(), "map");
        assert_eq!(Value::object(Plain).kind(), "object");
    }
}
