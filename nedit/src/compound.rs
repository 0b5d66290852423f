use std::ops::Index;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::{List, Value};

/// An NBT compound: names mapped to values, kept in insertion order.
///
/// Order is what the writer uses, so a decoded compound is written back out
/// byte for byte. Equality ignores order: two compounds are equal when they
/// hold the same names and values.
///
/// ```
/// use nedit::{Compound, Value};
///
/// let mut level = Compound::new();
/// level.insert("LevelName", "New World");
/// level.insert("SpawnX", 12);
/// level.insert("SpawnY", 64);
///
/// assert_eq!(level.get_string("LevelName"), Some("New World"));
/// assert_eq!(level.keys().collect::<Vec<_>>(), ["LevelName", "SpawnX", "SpawnY"]);
///
/// level.remove("SpawnX");
/// assert_eq!(level.keys().collect::<Vec<_>>(), ["LevelName", "SpawnY"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

pub type Iter<'a> = indexmap::map::Iter<'a, String, Value>;
pub type IterMut<'a> = indexmap::map::IterMut<'a, String, Value>;
pub type IntoIter = indexmap::map::IntoIter<String, Value>;

macro_rules! typed_get {
    ($name:ident, $variant:ident, ref $type:ty) => {
        pub fn $name(&self, key: &str) -> Option<&$type> {
            match self.entries.get(key)? {
                Value::$variant(v) => Some(v),
                _ => None,
            }
        }
    };
    ($name:ident, $variant:ident, $type:ty) => {
        pub fn $name(&self, key: &str) -> Option<$type> {
            match self.entries.get(key)? {
                Value::$variant(v) => Some(*v),
                _ => None,
            }
        }
    };
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value under the same name. A
    /// replaced entry keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an entry. Entries after it keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        self.entries.iter_mut()
    }

    typed_get!(get_byte, Byte, i8);
    typed_get!(get_short, Short, i16);
    typed_get!(get_int, Int, i32);
    typed_get!(get_long, Long, i64);
    typed_get!(get_float, Float, f32);
    typed_get!(get_double, Double, f64);
    typed_get!(get_byte_array, ByteArray, ref [i8]);
    typed_get!(get_int_array, IntArray, ref [i32]);
    typed_get!(get_long_array, LongArray, ref [i64]);
    typed_get!(get_list, List, ref List);
    typed_get!(get_compound, Compound, ref Compound);

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key)?.as_str()
    }
}

impl Index<&str> for Compound {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if there is no entry named `key`.
    fn index(&self, key: &str) -> &Value {
        match self.entries.get(key) {
            Some(v) => v,
            None => panic!("no entry named {:?} in compound", key),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Compound
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        compound.extend(iter);
        compound
    }
}

impl<K, V> Extend<(K, V)> for Compound
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}
