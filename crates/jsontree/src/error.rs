use alloc::string::String;

use thiserror::Error;

use crate::{Kind, Path};

/// Why a document failed to deserialize.
///
/// Every variant that can point at the input carries the scanner's absolute
/// scalar offset (`char`s consumed before the fault, not bytes). The one
/// exception is [`InvalidUtf8`](DeserializeError::InvalidUtf8), which is found
/// before any scalar is produced and therefore reports a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializeError {
    /// The source ran dry in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A scalar that cannot start or continue the current production.
    #[error("unexpected character {scalar:?} at position {position}")]
    UnexpectedScalar {
        /// The offending scalar.
        scalar: char,
        /// Its offset.
        position: usize,
    },
    /// An object repeated a key. `position` is the key's opening quote.
    #[error("duplicate object key {key:?} at position {position}")]
    DuplicateObjectKey {
        /// The repeated key, unescaped.
        key: String,
        /// Offset of the key's opening quote.
        position: usize,
    },
    /// A run of number characters that is neither an `i64` nor a finite
    /// `f64`. `position` is the first character of the run.
    #[error("invalid number {text:?} at position {position}")]
    InvalidNumber {
        /// The whole run of number characters.
        text: String,
        /// Offset of the run's first character.
        position: usize,
    },
    /// A `\u` escape whose digits are not hex, or that names a surrogate that
    /// does not pair up. `position` is the first digit.
    #[error("invalid unicode escape \\u{text} at position {position}")]
    InvalidHexEscape {
        /// The digits read, plus the character that cut them short if any.
        text: String,
        /// Offset of the first digit.
        position: usize,
    },
    /// A container opened deeper than [`DeserializerOptions::max_depth`].
    ///
    /// [`DeserializerOptions::max_depth`]: crate::DeserializerOptions::max_depth
    #[error("nesting depth limit of {limit} exceeded at position {position}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
        /// Offset of the bracket that went past it.
        position: usize,
    },
    /// Byte input that is not UTF-8.
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 {
        /// Length of the valid prefix in bytes.
        offset: usize,
    },
}

impl DeserializeError {
    /// The scalar offset the error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEndOfInput | Self::InvalidUtf8 { .. } => None,
            Self::UnexpectedScalar { position, .. }
            | Self::DuplicateObjectKey { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::InvalidHexEscape { position, .. }
            | Self::DepthLimitExceeded { position, .. } => Some(*position),
        }
    }
}

/// A path write that could not be carried out.
///
/// `path` is the prefix that resolved successfully before the failing step,
/// so `root{path}` in the message names the container that was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptingError {
    /// An index step met something other than an array.
    #[error("cannot index into {found} at root{path}")]
    NotAnArray {
        /// Where the step was taken.
        path: Path,
        /// What was there instead.
        found: Kind,
    },
    /// A key step met something other than an object.
    #[error("cannot look up a key in {found} at root{path}")]
    NotAnObject {
        /// Where the step was taken.
        path: Path,
        /// What was there instead.
        found: Kind,
    },
    /// An index step fell outside `0..len`.
    #[error("index {index} is out of bounds for an array of length {len} at root{path}")]
    IndexOutOfBounds {
        /// The array's path.
        path: Path,
        /// The index asked for.
        index: i64,
        /// The array's length.
        len: usize,
    },
    /// A key step before the last named a key the object lacks.
    #[error("no key {key:?} in the object at root{path}")]
    MissingKey {
        /// The object's path.
        path: Path,
        /// The absent key.
        key: String,
    },
}

impl SubscriptingError {
    /// The resolved prefix of the path that was being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotAnArray { path, .. }
            | Self::NotAnObject { path, .. }
            | Self::IndexOutOfBounds { path, .. }
            | Self::MissingKey { path, .. } => path,
        }
    }
}

/// Any error this crate produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Parsing failed.
    #[error(transparent)]
    Deserialize(#[from] DeserializeError),
    /// A path write failed.
    #[error(transparent)]
    Subscripting(#[from] SubscriptingError),
    /// Explicit object construction was handed the same key twice.
    #[error("duplicate object key {key:?}")]
    DuplicateKey {
        /// The first key seen twice.
        key: String,
    },
}
