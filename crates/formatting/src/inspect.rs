//! crates/formatting/src/inspect.rs
//! Conversion of Rust values into [`Value`] snapshots.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use crate::value::{SeqKind, Value};

/// Produces a [`Value`] snapshot for formatting.
///
/// Implemented for primitives, strings, the standard collections, tuples up
/// to four elements, and smart pointers. Types without a structured rendering
/// can implement it through [`Value::debug`] or [`Value::object`]:
///
/// ```
/// use formatting::{Inspect, Value};
///
/// #[derive(Debug)]
/// struct Port(u16);
///
/// impl Inspect for Port {
///     fn inspect(&self) -> Value {
///         Value::debug(self)
///     }
/// }
///
/// assert_eq!(Port(80).inspect().repr(), "Port(80)");
/// ```
pub trait Inspect {
    /// Returns the snapshot of `self`.
    fn inspect(&self) -> Value;
}

macro_rules! inspect_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::Int(i128::from(*self))
                }
            }
        )*
    };
}

inspect_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Inspect for isize {
    fn inspect(&self) -> Value {
        i128::try_from(*self).map_or_else(|_| Value::debug(self), Value::Int)
    }
}

impl Inspect for usize {
    fn inspect(&self) -> Value {
        i128::try_from(*self).map_or_else(|_| Value::debug(self), Value::Int)
    }
}

impl Inspect for u128 {
    fn inspect(&self) -> Value {
        i128::try_from(*self).map_or_else(|_| Value::debug(self), Value::Int)
    }
}

impl Inspect for f32 {
    fn inspect(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn inspect(&self) -> Value {
        Value::Float(*self)
    }
}

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Inspect for Path {
    fn inspect(&self) -> Value {
        Value::Str(self.display().to_string())
    }
}

impl Inspect for PathBuf {
    fn inspect(&self) -> Value {
        self.as_path().inspect()
    }
}

impl Inspect for () {
    fn inspect(&self) -> Value {
        Value::None
    }
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        self.as_ref().map_or(Value::None, Inspect::inspect)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Value {
        Value::Seq(SeqKind::List, self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Value {
        Value::Seq(SeqKind::List, self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        Value::Seq(SeqKind::Set, self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Value {
        let mut items: Vec<Value> = self.iter().map(Inspect::inspect).collect();
        sort_by_repr(&mut items, |item| item);
        Value::Seq(SeqKind::Set, items)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect())
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value {
        let mut entries: Vec<(Value, Value)> =
            self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        sort_by_repr(&mut entries, |(key, _)| key);
        Value::Map(entries)
    }
}

// Hash collections iterate in a per-process random order.
fn sort_by_repr<T>(items: &mut [T], key: impl Fn(&T) -> &Value) {
    items.sort_by_cached_key(|item| key(item).repr());
}

macro_rules! inspect_tuple {
    ($($name:ident),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            #[allow(non_snake_case)]
            fn inspect(&self) -> Value {
                let ($($name,)+) = self;
                Value::Seq(SeqKind::Tuple, vec![$($name.inspect()),+])
            }
        }
    };
}

inspect_tuple!(A);
inspect_tuple!(A, B);
inspect_tuple!(A, B, C);
inspect_tuple!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen() {
        assert_eq!(7u8.inspect(), Value::Int(7));
        assert_eq!((-3i64).inspect(), Value::Int(-3));
        assert_eq!(u128::MAX.inspect().repr(), u128::MAX.to_string());
    }

    #[test]
    fn strings_and_options() {
        assert_eq!("x".inspect(), Value::str("x"));
        assert_eq!(Inspect::inspect(&Some(String::from("y"))), Value::str("y"));
        assert_eq!(Inspect::inspect(&None::<i32>), Value::None);
    }

    #[test]
    fn collections_keep_shape() {
        assert_eq!(vec![1, 2].inspect().repr(), "[1, 2]");
        assert_eq!([true].inspect().repr(), "[true]");
        assert_eq!((1, "a").inspect().repr(), "(1, \"a\")");
        assert_eq!((5,).inspect().repr(), "(5,)");
    }

    #[test]
    fn hash_collections_are_sorted() {
        let set: HashSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(set.inspect().repr(), "{1, 2, 3}");

        let map: HashMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(map.inspect().repr(), "{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn pointers_are_transparent() {
        let shared = Arc::new(Rc::new(Box::new(4u16)));
        assert_eq!(shared.inspect(), Value::Int(4));
    }
}
