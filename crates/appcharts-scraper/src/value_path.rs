//! Best-effort lookups into loosely shaped JSON.
//!
//! Feed entries nest most values as `{"label": ...}` or
//! `{"attributes": {...}}` and omit keys freely. These helpers walk a path and
//! return a default on any missing key or type mismatch instead of failing.

use serde_json::Value;

/// One step of a lookup path: an object key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for PathSegment<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Walks `path` from `value`, returning `None` as soon as a step does not
/// apply (missing key, index out of range, or a scalar in the way).
#[must_use]
pub fn lookup<'v>(value: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, segment| match (segment, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(*key),
        (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
        _ => None,
    })
}

/// String at `keys`, or `""` when the path is missing or ends on a non-string.
#[must_use]
pub fn text_at(value: &Value, keys: &[&str]) -> String {
    let path: Vec<PathSegment<'_>> = keys.iter().copied().map(PathSegment::Key).collect();
    text_at_path(value, &path)
}

/// Like [`text_at`] for paths that index into arrays.
#[must_use]
pub fn text_at_path(value: &Value, path: &[PathSegment<'_>]) -> String {
    lookup(value, path)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_at_reads_nested_label() {
        let entry = json!({"im:name": {"label": "Alpha"}});
        assert_eq!(text_at(&entry, &["im:name", "label"]), "Alpha");
    }

    #[test]
    fn text_at_missing_key_is_empty() {
        let entry = json!({"im:name": {"label": "Alpha"}});
        assert_eq!(text_at(&entry, &["im:artist", "label"]), "");
    }

    #[test]
    fn text_at_scalar_in_the_way_is_empty() {
        let entry = json!({"category": "Games"});
        assert_eq!(text_at(&entry, &["category", "attributes", "label"]), "");
    }

    #[test]
    fn text_at_non_string_leaf_is_empty() {
        let entry = json!({"im:price": {"label": 0}});
        assert_eq!(text_at(&entry, &["im:price", "label"]), "");
        let entry = json!({"im:price": {"label": {"amount": "0"}}});
        assert_eq!(text_at(&entry, &["im:price", "label"]), "");
    }

    #[test]
    fn text_at_empty_path_on_string_returns_it() {
        assert_eq!(text_at(&json!("plain"), &[]), "plain");
    }

    #[test]
    fn text_at_path_indexes_arrays() {
        let entry = json!({"link": [{"attributes": {"href": "https://a"}}, {"attributes": {"href": "https://b"}}]});
        let path = [
            PathSegment::from("link"),
            PathSegment::from(1),
            PathSegment::from("attributes"),
            PathSegment::from("href"),
        ];
        assert_eq!(text_at_path(&entry, &path), "https://b");
    }

    #[test]
    fn lookup_index_out_of_range_is_none() {
        let value = json!([1, 2]);
        assert!(lookup(&value, &[PathSegment::Index(5)]).is_none());
    }

    #[test]
    fn lookup_key_on_array_is_none() {
        let value = json!([{"a": 1}]);
        assert!(lookup(&value, &[PathSegment::Key("a")]).is_none());
    }
}
