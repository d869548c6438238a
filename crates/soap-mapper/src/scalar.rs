//! Scalar field values and sparse repeated collections.

use chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A value that is carried as XML text.
///
/// An empty rendered text counts as an absent value when serializing.
pub trait XmlScalar: Sized {
    /// Render the value as unescaped text.
    fn to_xml_text(&self) -> Cow<'_, str>;

    /// Parse the value from unescaped text.
    fn from_xml_text(text: &str) -> std::result::Result<Self, String>;
}

impl XmlScalar for String {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_xml_text(text: &str) -> std::result::Result<Self, String> {
        Ok(text.to_string())
    }
}

impl XmlScalar for bool {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }

    fn from_xml_text(text: &str) -> std::result::Result<Self, String> {
        match text.trim() {
            t if t.eq_ignore_ascii_case("true") || t == "1" => Ok(true),
            t if t.eq_ignore_ascii_case("false") || t == "0" => Ok(false),
            other => Err(format!("expected a boolean, found {:?}", other)),
        }
    }
}

macro_rules! impl_xml_scalar_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl XmlScalar for $ty {
                fn to_xml_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }

                fn from_xml_text(text: &str) -> std::result::Result<Self, String> {
                    text.trim().parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_xml_scalar_from_str!(i32, i64, u32, u64, usize, f64);

impl XmlScalar for DateTime<Utc> {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    fn from_xml_text(text: &str) -> std::result::Result<Self, String> {
        DateTime::parse_from_rfc3339(text.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| e.to_string())
    }
}

/// A repeated field: values addressed by integer position.
///
/// Positions may have gaps. Iteration always follows ascending position.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeated<V> {
    items: BTreeMap<usize, V>,
}

impl<V> Default for Repeated<V> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<V> Repeated<V> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value at the given position, returning any value it replaced.
    pub fn insert(&mut self, index: usize, value: V) -> Option<V> {
        self.items.insert(index, value)
    }

    /// Append a value after the highest occupied position.
    ///
    /// Returns `None`, leaving the collection unchanged, once `usize::MAX`
    /// is occupied.
    pub fn push(&mut self, value: V) -> Option<usize> {
        let index = self.next_index()?;
        self.items.insert(index, value);
        Some(index)
    }

    /// The position `push` would use next, if there is one.
    pub fn next_index(&self) -> Option<usize> {
        match self.items.keys().next_back() {
            Some(last) => last.checked_add(1),
            None => Some(0),
        }
    }

    /// The value at a position.
    pub fn get(&self, index: usize) -> Option<&V> {
        self.items.get(&index)
    }

    /// Mutable access to the value at a position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.items.get_mut(&index)
    }

    /// Remove the value at a position.
    pub fn remove(&mut self, index: usize) -> Option<V> {
        self.items.remove(&index)
    }

    /// Number of occupied positions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Values in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.items.values()
    }

    /// Occupied positions with their values, ascending.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &V)> {
        self.items.iter().map(|(index, value)| (*index, value))
    }

    /// Occupied positions, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.items.keys().copied().collect()
    }
}

impl<V> FromIterator<V> for Repeated<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().enumerate().collect(),
        }
    }
}

impl<V> From<Vec<V>> for Repeated<V> {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}
