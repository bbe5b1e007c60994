//! Structured filter state decoded from a listing query string.

use super::{FilterPatch, SortKey, FILTER_KEYS, PRICE_MAX, PRICE_MIN, SORT};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

/// Value held by a filter key: one string, or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl FilterValue {
    /// All values, in order. A scalar is a one-element slice.
    pub fn values(&self) -> &[String] {
        match self {
            FilterValue::Scalar(value) => std::slice::from_ref(value),
            FilterValue::Multi(values) => values,
        }
    }

    /// First value, if any.
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// Accumulate a repeated occurrence of the same key.
    ///
    /// The second occurrence promotes a scalar to a two-element list; later
    /// occurrences append.
    fn accumulate(self, value: String) -> FilterValue {
        match self {
            FilterValue::Scalar(first) => FilterValue::Multi(vec![first, value]),
            FilterValue::Multi(mut values) => {
                values.push(value);
                FilterValue::Multi(values)
            }
        }
    }

    /// Drop empty strings; `None` if nothing is left.
    fn normalized(self) -> Option<FilterValue> {
        match self {
            FilterValue::Scalar(value) if value.is_empty() => None,
            FilterValue::Scalar(value) => Some(FilterValue::Scalar(value)),
            FilterValue::Multi(mut values) => {
                values.retain(|v| !v.is_empty());
                if values.is_empty() {
                    None
                } else {
                    Some(FilterValue::Multi(values))
                }
            }
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Multi(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::Multi(values.into_iter().map(String::from).collect())
    }
}

/// Mapping from filter key to value.
///
/// Keys keep their first-insertion order so encoding is deterministic.
/// A key is present only while it holds at least one non-empty value.
/// Every transformation returns a new state; nothing mutates through a
/// shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    entries: Vec<(String, FilterValue)>,
}

impl FilterState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from key/value pairs, applying the same normalization
    /// as [`FilterState::set`].
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FilterValue>,
    {
        let mut state = Self::new();
        for (key, value) in pairs {
            state.set(key, value);
        }
        state
    }

    /// Decode a query string, with or without a leading `?`.
    ///
    /// Never fails: an empty string yields an empty state, and pairs with an
    /// empty key or empty value are skipped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::new();
        if query.is_empty() {
            return state;
        }

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() || value.is_empty() {
                tracing::debug!(key = %key, "skipping empty query pair");
                continue;
            }
            let value = value.into_owned();
            match state.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => {
                    let previous =
                        std::mem::replace(&mut entry.1, FilterValue::Multi(Vec::new()));
                    entry.1 = previous.accumulate(value);
                }
                None => state.entries.push((key.into_owned(), FilterValue::Scalar(value))),
            }
        }

        state
    }

    /// Decode an optional query string; `None` yields an empty state.
    pub fn parse_optional(query: Option<&str>) -> Self {
        query.map(Self::parse).unwrap_or_default()
    }

    /// Build a state from a dynamically shaped JSON object.
    ///
    /// Accepts string, number and boolean values, arrays of those, and
    /// `null` (skipped). Anything else is rejected as invalid input.
    pub fn from_json(value: &Value) -> Result<Self, CommerceError> {
        let object = value.as_object().ok_or_else(|| {
            CommerceError::InvalidInput(format!(
                "expected an object of filter values, got {}",
                json_kind(value)
            ))
        })?;

        let mut state = Self::new();
        for (key, raw) in object {
            let value = match raw {
                Value::Null => continue,
                Value::Array(items) => FilterValue::Multi(
                    items
                        .iter()
                        .map(|item| {
                            json_scalar(item).ok_or_else(|| {
                                CommerceError::InvalidInput(format!(
                                    "filter `{}` holds a non-scalar {}",
                                    key,
                                    json_kind(item)
                                ))
                            })
                        })
                        .collect::<Result<_, _>>()?,
                ),
                other => FilterValue::Scalar(json_scalar(other).ok_or_else(|| {
                    CommerceError::InvalidInput(format!(
                        "filter `{}` holds a non-scalar {}",
                        key,
                        json_kind(other)
                    ))
                })?),
            };
            state.set(key.as_str(), value);
        }

        Ok(state)
    }

    /// Like [`FilterState::from_json`], but recovers from invalid input with
    /// an empty state.
    pub fn from_json_or_empty(value: &Value) -> Self {
        Self::from_json(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed filter state");
            Self::new()
        })
    }

    /// Encode as `key=value&key=value` without a leading `?`.
    ///
    /// List values emit one pair per element in order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            for v in value.values() {
                serializer.append_pair(key, v);
            }
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether `key` currently holds `value`.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key).is_some_and(|v| v.contains(value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace `key` in place, or append it. A value with nothing left after
    /// dropping empty strings deletes the key instead.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let Some(value) = value.into().normalized() else {
            self.remove(&key);
            return;
        };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Delete `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Shallow merge: patch values win, `None` deletes.
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        let mut next = self.clone();
        for (key, value) in patch.iter() {
            match value {
                Some(value) => next.set(key, value.clone()),
                None => {
                    next.remove(key);
                }
            }
        }
        next
    }

    /// Flip `value` under `key`.
    ///
    /// - absent key: becomes the one-element list `[value]`
    /// - list: drops `value` if present, appends it otherwise
    /// - scalar equal to `value`: key removed
    /// - other scalar: promoted to `[existing, value]`
    ///
    /// The key is deleted when the resulting list is empty.
    pub fn toggled(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        let updated = match next.remove(key) {
            None => FilterValue::Multi(vec![value.to_string()]),
            Some(FilterValue::Multi(mut values)) => {
                if values.iter().any(|v| v == value) {
                    values.retain(|v| v != value);
                } else {
                    values.push(value.to_string());
                }
                FilterValue::Multi(values)
            }
            Some(FilterValue::Scalar(existing)) if existing == value => return next,
            Some(FilterValue::Scalar(existing)) => {
                FilterValue::Multi(vec![existing, value.to_string()])
            }
        };
        next.reinsert(self, key, updated);
        next
    }

    /// Remove `value` from `key`, or the whole key when `value` is `None`.
    ///
    /// Removing something that is not there returns an equal state.
    pub fn without(&self, key: &str, value: Option<&str>) -> Self {
        let mut next = self.clone();
        let Some(value) = value else {
            if next.remove(key).is_none() {
                tracing::debug!(key, "filter already absent");
            }
            return next;
        };

        match next.remove(key) {
            Some(FilterValue::Multi(mut values)) => {
                values.retain(|v| v != value);
                next.reinsert(self, key, FilterValue::Multi(values));
            }
            Some(FilterValue::Scalar(existing)) if existing == value => {}
            Some(other) => {
                tracing::debug!(key, value, "filter value not present");
                next.reinsert(self, key, other);
            }
            None => tracing::debug!(key, "filter already absent"),
        }
        next
    }

    /// Drop the recognized filter keys, keeping everything else.
    pub fn cleared(&self) -> Self {
        let mut next = self.clone();
        next.entries
            .retain(|(k, _)| !FILTER_KEYS.contains(&k.as_str()));
        next
    }

    /// Selected categories, in order. Empty when no category filter is set.
    pub fn categories(&self) -> &[String] {
        self.get(super::CATEGORY)
            .map(FilterValue::values)
            .unwrap_or(&[])
    }

    /// Lower price bound. Unparseable bounds are treated as absent.
    pub fn price_min(&self, currency: Currency) -> Option<Money> {
        self.price_bound(PRICE_MIN, currency)
    }

    /// Upper price bound. Unparseable bounds are treated as absent.
    pub fn price_max(&self, currency: Currency) -> Option<Money> {
        self.price_bound(PRICE_MAX, currency)
    }

    /// Requested sort order; `Featured` when absent or unrecognized.
    pub fn sort(&self) -> SortKey {
        self.get(SORT)
            .and_then(FilterValue::first)
            .and_then(SortKey::parse)
            .unwrap_or_default()
    }

    /// Compare key sets and per-key value sequences, ignoring key order and
    /// whether a single value is held as a scalar or a one-element list.
    pub fn equivalent(&self, other: &FilterState) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|theirs| theirs.values() == value.values())
            })
    }

    fn price_bound(&self, key: &str, currency: Currency) -> Option<Money> {
        let raw = self.get(key)?.first()?;
        let bound = Money::parse_major(raw, currency);
        if bound.is_none() {
            tracing::debug!(key, raw, "ignoring non-numeric price bound");
        }
        bound
    }

    /// Put `key` back at the position it held in `original`.
    fn reinsert(&mut self, original: &FilterState, key: &str, value: FilterValue) {
        let Some(value) = value.normalized() else {
            return;
        };
        let position = original
            .entries
            .iter()
            .position(|(k, _)| k == key)
            .unwrap_or(self.entries.len())
            .min(self.entries.len());
        self.entries.insert(position, (key.to_string(), value));
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Serialize for FilterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_strips_prefix_and_decodes() {
        let state = FilterState::parse("?category=Home+%26+Living&price_min=100");
        assert_eq!(
            state.get("category"),
            Some(&FilterValue::Scalar("Home & Living".into()))
        );
        assert_eq!(state.get("price_min"), Some(&FilterValue::Scalar("100".into())));
    }

    #[test]
    fn test_parse_promotes_repeated_keys() {
        let state = FilterState::parse("category=A&sort=newest&category=B&category=C");
        assert_eq!(
            state.get("category"),
            Some(&FilterValue::Multi(vec!["A".into(), "B".into(), "C".into()]))
        );
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["category", "sort"]);
    }

    #[test]
    fn test_parse_skips_empty_pairs() {
        let state = FilterState::parse("category=&=x&price_max=500&&");
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["price_max"]);
    }

    #[test]
    fn test_parse_optional() {
        assert!(FilterState::parse_optional(None).is_empty());
        assert!(FilterState::parse_optional(Some("?")).is_empty());
    }

    #[test]
    fn test_encoding_uses_form_rules() {
        let state = FilterState::from_pairs([("category", "Home & Living")]);
        assert_eq!(state.to_query_string(), "category=Home+%26+Living");
    }

    #[test]
    fn test_set_keeps_position_and_drops_empty() {
        let mut state = FilterState::from_pairs([("a", "1"), ("b", "2")]);
        state.set("a", "3");
        assert_eq!(state.to_query_string(), "a=3&b=2");

        state.set("b", Vec::<String>::new());
        assert_eq!(state.to_query_string(), "a=3");

        state.set("a", vec!["", "x"]);
        assert_eq!(state.get("a"), Some(&FilterValue::Multi(vec!["x".into()])));
    }

    #[test]
    fn test_toggle_keeps_key_position() {
        let state = FilterState::from_pairs([
            ("category", FilterValue::from(vec!["A", "B"])),
            ("sort", FilterValue::from("newest")),
        ]);
        let next = state.toggled("category", "C");
        assert_eq!(next.to_query_string(), "category=A&category=B&category=C&sort=newest");

        let next = next.toggled("category", "A");
        assert_eq!(next.to_query_string(), "category=B&category=C&sort=newest");
    }

    #[test]
    fn test_toggle_does_not_touch_original() {
        let state = FilterState::from_pairs([("category", "Kitchen")]);
        let _ = state.toggled("category", "Bath");
        assert_eq!(state.to_query_string(), "category=Kitchen");
    }

    #[test]
    fn test_without_missing_value_is_noop() {
        let state = FilterState::from_pairs([("category", "Kitchen")]);
        assert_eq!(state.without("category", Some("Bath")), state);
        assert_eq!(state.without("sort", None), state);
    }

    #[test]
    fn test_typed_accessors() {
        let state = FilterState::parse("category=Kitchen&price_min=100&price_max=abc&sort=bogus");
        assert_eq!(state.categories(), ["Kitchen".to_string()]);
        assert_eq!(
            state.price_min(Currency::KES),
            Some(Money::new(10000, Currency::KES))
        );
        assert_eq!(state.price_max(Currency::KES), None);
        assert_eq!(state.sort(), SortKey::Featured);
        assert!(state.contains("category", "Kitchen"));
        assert!(!state.contains("category", "Bath"));
    }

    #[test]
    fn test_from_json_accepts_scalars_and_arrays() {
        let state = FilterState::from_json(&json!({
            "category": ["Kitchen", "Bath"],
            "price_min": 100,
            "sort": null,
        }))
        .unwrap();

        assert_eq!(
            state.get("category"),
            Some(&FilterValue::Multi(vec!["Kitchen".into(), "Bath".into()]))
        );
        assert_eq!(state.get("price_min"), Some(&FilterValue::Scalar("100".into())));
        assert!(!state.contains_key("sort"));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        let err = FilterState::from_json(&json!("category=Kitchen")).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidInput(_)));

        let err = FilterState::from_json(&json!({"category": [{"nested": true}]})).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidInput(_)));

        assert!(FilterState::from_json_or_empty(&json!(42)).is_empty());
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let state = FilterState::parse("sort=newest&category=A&category=B");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"sort":"newest","category":["A","B"]}"#);
    }

    #[test]
    fn test_equivalent_ignores_shape_of_single_values() {
        let a = FilterState::from_pairs([("x", FilterValue::from(vec!["1"])), ("y", "2".into())]);
        let b = FilterState::parse("y=2&x=1");
        assert!(a.equivalent(&b));
        assert_ne!(a, b);
    }
}
