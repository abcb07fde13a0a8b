use alloc::{string::String, vec::Vec};
use core::{fmt, ops::Deref};

/// One step of a [`Path`]: an array index or an object key.
///
/// Indices are signed so that a path built from arbitrary integers can still
/// be represented; a negative index never matches an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Position in an array.
    Index(i64),
    /// Key in an object.
    Key(String),
}

impl PathElement {
    #[must_use]
    /// Returns the index if this element is an index, otherwise `None`.
    pub fn as_index(&self) -> Option<i64> {
        if let Self::Index(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    #[must_use]
    /// Returns the key if this element is a key, otherwise `None`.
    pub fn as_key(&self) -> Option<&str> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key}]"),
        }
    }
}

// Convenient conversions so users can write `path![0, "foo"]` etc.
macro_rules! impl_from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathElement {
                fn from(i: $t) -> Self {
                    PathElement::Index(i64::from(i))
                }
            }
        )*
    };
}

impl_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

// Indices past i64::MAX cannot be in bounds anyway.
macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathElement {
                fn from(i: $t) -> Self {
                    PathElement::Index(i64::try_from(i).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_from_wide_int!(isize, u64, usize);

impl From<&str> for PathElement {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<String> for PathElement {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

/// Conversion used by the [`path!`](crate::path) macro.
#[doc(hidden)]
pub trait PathElementFrom<T> {
    /// Converts `value` into a path step.
    fn from_path_element(value: T) -> PathElement;
}

impl<T> PathElementFrom<T> for PathElement
where
    PathElement: From<T>,
{
    fn from_path_element(value: T) -> PathElement {
        PathElement::from(value)
    }
}

/// An ordered list of steps from the root of a [`Json`](crate::Json) tree to
/// one location inside it.
///
/// Build one with the [`path!`](crate::path) macro, from a `Vec`, or by
/// collecting [`PathElement`]s. It dereferences to `[PathElement]`, which is
/// what [`Json::get`](crate::Json::get) and [`Json::set`](crate::Json::set)
/// take.
///
/// `Display` renders each step in brackets and the empty path as nothing:
///
/// ```rust
/// use jsontree::{Path, PathElement, path};
///
/// assert_eq!(path!["list", 4].to_string(), "[list][4]");
/// assert_eq!(Path::new().to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathElement>);

impl Path {
    /// The empty path, which addresses the root.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps existing steps.
    #[must_use]
    pub fn from_vec(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }

    /// Appends a step.
    pub fn push(&mut self, element: impl Into<PathElement>) {
        self.0.push(element.into());
    }

    /// Removes and returns the last step.
    pub fn pop(&mut self) -> Option<PathElement> {
        self.0.pop()
    }

    /// Unwraps the steps.
    #[must_use]
    pub fn into_vec(self) -> Vec<PathElement> {
        self.0
    }
}

impl Deref for Path {
    type Target = [PathElement];

    fn deref(&self) -> &[PathElement] {
        &self.0
    }
}

impl AsRef<[PathElement]> for Path {
    fn as_ref(&self) -> &[PathElement] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|element| element.fmt(f))
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }
}

impl From<&[PathElement]> for Path {
    fn from(elements: &[PathElement]) -> Self {
        Self(elements.to_vec())
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PathElement> for Path {
    fn extend<I: IntoIterator<Item = PathElement>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = core::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathElement;
    type IntoIter = alloc::vec::IntoIter<PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Custom (de)serialization so that a `Path` becomes e.g. `["foo", 0, "bar"]`
// instead of the default tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::{string::String, vec::Vec};
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::{Path, PathElement};

    impl Serialize for PathElement {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                PathElement::Key(k) => serializer.serialize_str(k),
                PathElement::Index(i) => serializer.serialize_i64(*i),
            }
        }
    }

    struct PathElementVisitor;

    impl Visitor<'_> for PathElementVisitor {
        type Value = PathElement;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathElement::Key(value.into()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathElement::Key(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathElement::Index(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            i64::try_from(value).map(PathElement::Index).map_err(|_| {
                Error::invalid_value(Unexpected::Unsigned(value), &"an index that fits in i64")
            })
        }
    }

    impl<'de> Deserialize<'de> for PathElement {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(PathElementVisitor)
        }
    }

    impl Serialize for Path {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de> Deserialize<'de> for Path {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            Vec::<PathElement>::deserialize(deserializer).map(Path::from_vec)
        }
    }
}
