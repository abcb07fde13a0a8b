//! Reading and writing nested values by [`Path`](crate::Path).
//!
//! Reads degrade: any step that does not resolve yields `Null`. Writes are
//! strict: every step before the last must land on an existing element of a
//! container of the right kind, and a failed write leaves the tree as it was.
use crate::{Json, PathElement, SubscriptingError, value::NULL};

fn array_slot(len: usize, index: i64) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

impl Json {
    /// The child `element` names, or `Null` if there is none.
    #[must_use]
    pub fn get_element(&self, element: &PathElement) -> &Json {
        match (self, element) {
            (Json::Array(items), PathElement::Index(index)) => {
                array_slot(items.len(), *index).map_or(&NULL, |i| &items[i])
            }
            (Json::Object(map), PathElement::Key(key)) => map.get(key.as_str()).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Follows `path` from `self`. Returns `Null` as soon as a step misses:
    /// an index out of range (negative included), an absent key, or a step
    /// into a value of the wrong kind.
    ///
    /// ```rust
    /// use jsontree::{Json, path};
    ///
    /// let doc: Json = r#"{"a": [10, 20]}"#.parse().unwrap();
    /// assert_eq!(doc.get(&path!["a", 1]), &Json::Integer(20));
    /// assert_eq!(doc.get(&path!["a", -1]), &Json::Null);
    /// assert_eq!(doc.get(&path!["a", 1, "deeper"]), &Json::Null);
    /// ```
    #[must_use]
    pub fn get(&self, path: &[PathElement]) -> &Json {
        path.iter().fold(self, Json::get_element)
    }

    /// Replaces the value at `path` with `value`.
    ///
    /// An empty path replaces `self`. The last step may add a new key to an
    /// object but may not grow an array.
    ///
    /// # Errors
    ///
    /// [`SubscriptingError`] when a step meets a value of the wrong kind, an
    /// array index out of range, or (before the last step) a missing key.
    /// `self` is unchanged when this fails.
    ///
    /// ```rust
    /// use jsontree::{Json, SubscriptingError, path};
    ///
    /// let mut doc = Json::Array(vec![Json::Integer(0)]);
    /// doc.set(&path![0], Json::Integer(9)).unwrap();
    /// assert_eq!(doc, Json::Array(vec![Json::Integer(9)]));
    ///
    /// let err = doc.set(&path![0, 0], Json::Null).unwrap_err();
    /// assert!(matches!(err, SubscriptingError::NotAnArray { .. }));
    /// ```
    pub fn set(&mut self, path: &[PathElement], value: Json) -> Result<(), SubscriptingError> {
        self.write(path, value).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected path write");
        })
    }

    /// [`set`](Json::set) for callers that hold the tree by value.
    ///
    /// # Errors
    ///
    /// As for [`set`](Json::set). The tree is dropped on error.
    pub fn with(mut self, path: &[PathElement], value: Json) -> Result<Json, SubscriptingError> {
        self.set(path, value)?;
        Ok(self)
    }

    fn write(&mut self, path: &[PathElement], value: Json) -> Result<(), SubscriptingError> {
        let Some((last, parents)) = path.split_last() else {
            *self = value;
            return Ok(());
        };
        let mut node = self;
        for (depth, element) in parents.iter().enumerate() {
            node = node.child_mut(element, &path[..depth])?;
        }
        match (node, last) {
            (Json::Object(map), PathElement::Key(key)) => {
                map.insert(key.clone(), value);
            }
            (node, last) => *node.child_mut(last, parents)? = value,
        }
        Ok(())
    }

    /// The existing child `element` names. `resolved` is the path to `self`,
    /// used only to build the error.
    fn child_mut(
        &mut self,
        element: &PathElement,
        resolved: &[PathElement],
    ) -> Result<&mut Json, SubscriptingError> {
        match (self, element) {
            (Json::Array(items), PathElement::Index(index)) => {
                let len = items.len();
                match array_slot(len, *index) {
                    Some(i) => Ok(&mut items[i]),
                    None => Err(SubscriptingError::IndexOutOfBounds {
                        path: resolved.into(),
                        index: *index,
                        len,
                    }),
                }
            }
            (Json::Object(map), PathElement::Key(key)) => {
                map.get_mut(key.as_str())
                    .ok_or_else(|| SubscriptingError::MissingKey {
                        path: resolved.into(),
                        key: key.clone(),
                    })
            }
            (other, PathElement::Index(_)) => Err(SubscriptingError::NotAnArray {
                path: resolved.into(),
                found: other.kind(),
            }),
            (other, PathElement::Key(_)) => Err(SubscriptingError::NotAnObject {
                path: resolved.into(),
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use crate::{Json, Kind, SubscriptingError, path};

    fn sample() -> Json {
        crate::from_str(r#"{"list": [{"a": 1}, [true, null]], "n": 2}"#).unwrap()
    }

    #[test]
    fn get_resolves_nested_steps() {
        let doc = sample();
        assert_eq!(doc.get(&path!["list", 0, "a"]), &Json::Integer(1));
        assert_eq!(doc.get(&path!["list", 1, 0]), &Json::Boolean(true));
        assert_eq!(doc.get(&path![]), &doc);
    }

    #[test]
    fn get_degrades_to_null() {
        let doc = sample();
        assert_eq!(doc.get(&path!["list", 5]), &Json::Null);
        assert_eq!(doc.get(&path!["list", -1]), &Json::Null);
        assert_eq!(doc.get(&path!["missing", "x"]), &Json::Null);
        assert_eq!(doc.get(&path!["n", 0]), &Json::Null);
        assert_eq!(doc.get(&path![0]), &Json::Null);
        assert_eq!(Json::Boolean(true).get(&path!["a"]), &Json::Null);
    }

    #[test]
    fn set_replaces_an_array_element() {
        let mut doc = Json::Array(vec![Json::Integer(0)]);
        doc.set(&path![0], Json::Integer(9)).unwrap();
        assert_eq!(doc, Json::Array(vec![Json::Integer(9)]));
    }

    #[test]
    fn set_inserts_a_missing_final_key() {
        let mut doc = sample();
        doc.set(&path!["list", 0, "b"], Json::from("new")).unwrap();
        assert_eq!(doc.get(&path!["list", 0, "b"]), &Json::String(String::from("new")));
        assert_eq!(doc.get(&path!["list", 0, "a"]), &Json::Integer(1));
    }

    #[test]
    fn set_on_the_empty_path_replaces_the_root() {
        let mut doc = sample();
        doc.set(&path![], Json::Boolean(false)).unwrap();
        assert_eq!(doc, Json::Boolean(false));
    }

    #[test]
    fn set_into_a_scalar_fails() {
        let mut doc = Json::Boolean(true);
        let err = doc.set(&path![0], Json::Null).unwrap_err();
        assert_eq!(
            err,
            SubscriptingError::NotAnArray {
                path: path![],
                found: Kind::Boolean,
            }
        );
        assert_eq!(doc, Json::Boolean(true));
    }

    #[test]
    fn set_does_not_grow_arrays() {
        let mut doc = sample();
        let before = doc.clone();
        let err = doc.set(&path!["list", 2], Json::Null).unwrap_err();
        assert_eq!(
            err,
            SubscriptingError::IndexOutOfBounds {
                path: path!["list"],
                index: 2,
                len: 2,
            }
        );
        let err = doc.set(&path!["list", -1], Json::Null).unwrap_err();
        assert!(matches!(err, SubscriptingError::IndexOutOfBounds { index: -1, .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn set_requires_intermediate_keys() {
        let mut doc = sample();
        let err = doc.set(&path!["nope", "x"], Json::Null).unwrap_err();
        assert_eq!(
            err,
            SubscriptingError::MissingKey {
                path: path![],
                key: "nope".into(),
            }
        );
    }

    #[test]
    fn set_reports_the_resolved_prefix() {
        let mut doc = sample();
        let err = doc.set(&path!["list", 1, "k"], Json::Null).unwrap_err();
        assert_eq!(err.path(), &path!["list", 1]);
        assert!(matches!(err, SubscriptingError::NotAnObject { found: Kind::Array, .. }));
    }

    #[test]
    fn with_returns_the_updated_tree() {
        let doc = sample().with(&path!["n"], Json::Double(0.5)).unwrap();
        assert_eq!(doc.get(&path!["n"]), &Json::Double(0.5));
        assert!(Json::Null.with(&path!["k"], Json::Null).is_err());
    }
}
