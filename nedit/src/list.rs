use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::{Tag, Value};

/// A homogeneous NBT list. Every element has the list's element tag, which is
/// written once in front of the elements.
///
/// An empty list still has an element tag. Lists created without one use
/// [`Tag::End`], and take on the tag of the first value pushed.
///
/// ```
/// use nedit::{List, Tag, Value};
///
/// # fn main() -> nedit::error::Result<()> {
/// let mut list = List::new(Tag::Int);
/// list.push(1)?;
/// list.push(2)?;
/// assert!(list.push("three").is_err());
///
/// assert_eq!(list.element_tag(), Tag::Int);
/// assert_eq!(list.get(1), Some(&Value::Int(2)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_tag: Tag,
    values: Vec<Value>,
}

/// Iterator over the elements of a [`List`].
pub type Iter<'a> = std::slice::Iter<'a, Value>;

impl List {
    /// An empty list that holds `element_tag` values.
    pub fn new(element_tag: Tag) -> Self {
        Self::with_capacity(element_tag, 0)
    }

    /// An empty list with no element type yet, written as a list of End.
    pub fn empty() -> Self {
        Self::new(Tag::End)
    }

    pub fn with_capacity(element_tag: Tag, capacity: usize) -> Self {
        Self {
            element_tag,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Build a list from values, taking the element tag from the first one.
    /// Fails if the values do not all share that tag.
    pub fn try_from_values(values: Vec<Value>) -> Result<Self> {
        let element_tag = values.first().map_or(Tag::End, Value::tag);

        if let Some(bad) = values.iter().find(|v| v.tag() != element_tag) {
            return Err(Error::ListTypeMismatch {
                expected: element_tag,
                found: bad.tag(),
            });
        }

        Ok(Self {
            element_tag,
            values,
        })
    }

    /// The reader has already checked every value against `element_tag`.
    pub(crate) fn from_parts(element_tag: Tag, values: Vec<Value>) -> Self {
        debug_assert!(values.iter().all(|v| v.tag() == element_tag));
        Self {
            element_tag,
            values,
        }
    }

    pub fn element_tag(&self) -> Tag {
        self.element_tag
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.values.iter()
    }

    /// Append a value. An End typed list that is still empty adopts the tag of
    /// the value.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        if self.values.is_empty() {
            self.element_tag = value.tag();
        }
        self.values.push(value);
        Ok(())
    }

    /// Replace the value at `index`, returning the old value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        if value.tag() != self.element_tag {
            return Err(self.mismatch(&value));
        }
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.values.pop()
    }

    /// Remove every element. The element tag is kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    fn check(&self, value: &Value) -> Result<()> {
        let adoptable = self.element_tag == Tag::End && self.values.is_empty();
        if adoptable || value.tag() == self.element_tag {
            Ok(())
        } else {
            Err(self.mismatch(value))
        }
    }

    fn mismatch(&self, value: &Value) -> Error {
        Error::ListTypeMismatch {
            expected: self.element_tag,
            found: value.tag(),
        }
    }
}

impl Default for List {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        Self::try_from_values(values)
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}
