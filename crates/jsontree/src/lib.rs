//! A JSON value model with a position-tracked parser, a text writer and
//! path-based addressing.
//!
//! The pieces, leaves first:
//!
//! - [`Json`], the recursive value type, and [`Path`]/[`PathElement`] for
//!   addressing nested values.
//! - [`RingBuffer`], a growable circular queue.
//! - [`Scanner`], a pull-source wrapper with resettable, unbounded lookahead.
//! - [`Deserializer`], a recursive-descent parser over a [`Scanner`] of
//!   `char`s.
//! - The serializer ([`to_string`], [`to_string_pretty`], [`write_json`]).
//! - The path engine ([`Json::get`], [`Json::set`]).
//!
//! ```rust
//! use jsontree::{Json, path};
//!
//! let mut root = jsontree::from_str(r#"{"list": [{"a": 1}]}"#).unwrap();
//! assert_eq!(root.get(&path!["list", 0, "a"]), &Json::Integer(1));
//! assert_eq!(root.get(&path!["list", 1, "a"]), &Json::Null);
//!
//! root.set(&path!["list", 0, "a"], Json::Double(2.5)).unwrap();
//! assert_eq!(root.to_string(), r#"{"list":[{"a":2.5}]}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod deserializer;
mod error;
mod escape_buffer;
mod literal_buffer;
mod options;
mod path;
mod path_engine;
pub mod ring_buffer;
mod scanner;
mod serializer;
mod value;

#[cfg(test)]
mod tests;

pub use deserializer::{Deserializer, from_chars, from_slice, from_str, from_str_with_options};
pub use error::{DeserializeError, Error, SubscriptingError};
pub use options::{DeserializerOptions, Style};
pub use path::{Path, PathElement, PathElementFrom};
pub use ring_buffer::RingBuffer;
pub use scanner::Scanner;
pub use serializer::{EscapedChars, to_string, to_string_pretty, write_json};
pub use value::{Array, Json, Kind, Map};

#[doc(hidden)]
pub use alloc::vec;

/// Macro to build a [`Path`] from a heterogeneous list of keys and indices.
///
/// ```rust
/// # use jsontree::{path, PathElement};
/// let p = path!["list", 4, "array", 0];
/// assert_eq!(p[1], PathElement::Index(4));
/// assert_eq!(p.to_string(), "[list][4][array][0]");
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::PathElementFrom;
        $crate::Path::from_vec($crate::vec![$($crate::PathElement::from_path_element($elem)),*])
    }};
}
