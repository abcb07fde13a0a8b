//! JSON value types.
//!
//! This module defines the [`Json`] enum, which represents any JSON value, the
//! [`Kind`] tag naming its variants, and the conversions used to build values
//! by hand.
use alloc::{collections::BTreeMap, collections::btree_map::Entry, string::String, vec::Vec};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::Index,
};

use crate::Error;

/// Object storage. Keys iterate in sorted order; JSON gives key order no
/// meaning, and sorting keeps serialized output deterministic.
pub type Map = BTreeMap<String, Json>;
/// Array storage.
pub type Array = Vec<Json>;

/// Returned by reads that miss.
pub(crate) static NULL: Json = Json::Null;

/// A JSON value as defined by [RFC 8259].
///
/// Integers and doubles are distinct variants: `Integer(1)` and `Double(1.0)`
/// compare unequal, and the deserializer only produces a `Double` for text
/// that does not parse as an `i64`.
///
/// # Examples
///
/// ```
/// use jsontree::{Json, Map};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Json::String("value".into()));
/// let v = Json::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Json {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A number whose text fits an `i64`.
    Integer(i64),
    /// Any other number.
    Double(f64),
    /// A string, escapes decoded.
    String(String),
    /// An ordered list of values.
    Array(Array),
    /// Keyed values, no key repeated.
    Object(Map),
}

/// The variant of a [`Json`] value, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`Json::Null`].
    Null,
    /// [`Json::Boolean`].
    Boolean,
    /// [`Json::Integer`].
    Integer,
    /// [`Json::Double`].
    Double,
    /// [`Json::String`].
    String,
    /// [`Json::Array`].
    Array,
    /// [`Json::Object`].
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        })
    }
}

impl Json {
    /// Builds an object, rejecting repeated keys.
    ///
    /// Unlike `collect::<Json>()` over pairs, which keeps the last value for a
    /// repeated key, this refuses to build an object that would lose data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] naming the first repeated key.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::{Error, Json};
    ///
    /// let ok = Json::object([("a", 1), ("b", 2)]).unwrap();
    /// assert_eq!(ok["b"], Json::Integer(2));
    ///
    /// let err = Json::object([("a", 1), ("a", 2)]).unwrap_err();
    /// assert_eq!(err, Error::DuplicateKey { key: "a".into() });
    /// ```
    pub fn object<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Json, Error>
    where
        K: Into<String>,
        V: Into<Json>,
    {
        let mut entries = Map::new();
        for (key, value) in pairs {
            match entries.entry(key.into()) {
                Entry::Occupied(slot) => {
                    return Err(Error::DuplicateKey {
                        key: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(value.into());
                }
            }
        }
        Ok(Json::Object(entries))
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Json::Null => Kind::Null,
            Json::Boolean(_) => Kind::Boolean,
            Json::Integer(_) => Kind::Integer,
            Json::Double(_) => Kind::Double,
            Json::String(_) => Kind::String,
            Json::Array(_) => Kind::Array,
            Json::Object(_) => Kind::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Json::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::Json;
    ///
    /// assert!(Json::Null.is_null());
    /// assert!(!Json::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Json::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Json::Integer
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Double`].
    ///
    /// [`Double`]: Json::Double
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double(..))
    }

    /// Returns `true` for either numeric variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::Json;
    ///
    /// assert!(Json::Integer(42).is_number());
    /// assert!(Json::Double(4.2).is_number());
    /// assert!(!Json::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Double(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Json::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Json::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Json::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the payload of a [`Boolean`](Json::Boolean).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the payload of an [`Integer`](Json::Integer). Doubles are not
    /// converted.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the payload of a [`Double`](Json::Double). Integers are not
    /// converted; see [`as_number`](Json::as_number) for that.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns either numeric variant as an `f64`. Integers beyond 2^53 lose
    /// precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the payload of a [`String`](Json::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items of an [`Array`](Json::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable access to the items of an [`Array`](Json::Array).
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of an [`Object`](Json::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Mutable access to the entries of an [`Object`](Json::Object).
    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Replaces the value with [`Null`](Json::Null) and returns the old one.
    pub fn take(&mut self) -> Json {
        core::mem::take(self)
    }
}

// -0.0 == 0.0, so both must hash alike.
fn canonical_bits(d: f64) -> u64 {
    if d.to_bits() == (-0.0f64).to_bits() {
        0.0f64.to_bits()
    } else {
        d.to_bits()
    }
}

impl Hash for Json {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Json::Null => {}
            Json::Boolean(b) => b.hash(state),
            Json::Integer(i) => i.hash(state),
            Json::Double(d) => canonical_bits(*d).hash(state),
            Json::String(s) => s.hash(state),
            Json::Array(items) => items.hash(state),
            Json::Object(entries) => entries.hash(state),
        }
    }
}

impl Index<usize> for Json {
    type Output = Json;

    /// Single-element subscripting: a non-array or an out-of-range index
    /// yields `Null`.
    fn index(&self, index: usize) -> &Json {
        match self {
            Json::Array(items) => items.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl Index<&str> for Json {
    type Output = Json;

    /// Single-element subscripting: a non-object or an absent key yields
    /// `Null`.
    fn index(&self, key: &str) -> &Json {
        match self {
            Json::Object(entries) => entries.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl From<bool> for Json {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

macro_rules! impl_from_integer_for_json {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Json {
                fn from(v: $t) -> Self {
                    Self::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer_for_json!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Json {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<f32> for Json {
    fn from(v: f32) -> Self {
        Self::Double(f64::from(v))
    }
}

impl From<String> for Json {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Json {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl<T: Into<Json>> From<Vec<T>> for Json {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Json {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Json>> From<Option<T>> for Json {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Json> for Json {
    fn from_iter<I: IntoIterator<Item = Json>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

/// Collects pairs into an object. A repeated key keeps its last value; use
/// [`Json::object`] to reject repeats instead.
impl<K: Into<String>, V: Into<Json>> FromIterator<(K, V)> for Json {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Maps onto serde's data model the way any self-describing format would, so a
// `Json` can be produced from or written to serde_json, YAML, etc.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::{borrow::ToOwned, string::String};
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, MapAccess, SeqAccess, Visitor},
        ser::{SerializeMap, SerializeSeq},
    };

    use super::{Array, Json, Map};

    impl Serialize for Json {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Json::Null => serializer.serialize_unit(),
                Json::Boolean(b) => serializer.serialize_bool(*b),
                Json::Integer(i) => serializer.serialize_i64(*i),
                Json::Double(d) => serializer.serialize_f64(*d),
                Json::String(s) => serializer.serialize_str(s),
                Json::Array(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                Json::Object(entries) => {
                    let mut map = serializer.serialize_map(Some(entries.len()))?;
                    for (key, value) in entries {
                        map.serialize_entry(key, value)?;
                    }
                    map.end()
                }
            }
        }
    }

    struct JsonVisitor;

    impl<'de> Visitor<'de> for JsonVisitor {
        type Value = Json;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("any JSON value")
        }

        fn visit_unit<E: Error>(self) -> Result<Json, E> {
            Ok(Json::Null)
        }

        fn visit_none<E: Error>(self) -> Result<Json, E> {
            Ok(Json::Null)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Json, D::Error>
        where
            D: Deserializer<'de>,
        {
            Json::deserialize(deserializer)
        }

        fn visit_bool<E: Error>(self, value: bool) -> Result<Json, E> {
            Ok(Json::Boolean(value))
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Json, E> {
            Ok(Json::Integer(value))
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E: Error>(self, value: u64) -> Result<Json, E> {
            Ok(i64::try_from(value).map_or(Json::Double(value as f64), Json::Integer))
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<Json, E> {
            Ok(Json::Double(value))
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Json, E> {
            Ok(Json::String(value.to_owned()))
        }

        fn visit_string<E: Error>(self, value: String) -> Result<Json, E> {
            Ok(Json::String(value))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Json, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut items = Array::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(Json::Array(items))
        }

        fn visit_map<A>(self, mut map: A) -> Result<Json, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Map::new();
            while let Some((key, value)) = map.next_entry::<String, Json>()? {
                if entries.contains_key(&key) {
                    return Err(A::Error::custom(format_args!(
                        "duplicate object key {key:?}"
                    )));
                }
                entries.insert(key, value);
            }
            Ok(Json::Object(entries))
        }
    }

    impl<'de> Deserialize<'de> for Json {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(JsonVisitor)
        }
    }
}
