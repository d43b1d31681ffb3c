//! Filter predicates and record ordering
//!
//! A `Where` clause is a typed mapping from field name to matcher, replacing
//! the untyped dynamic field access of the dashboard's original filter
//! contract: scalars match on strict equality, lists match on non-empty
//! intersection with the record's list field. All conditions are ANDed.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::store::Record;

// ============================================================================
// MATCHERS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Field must strictly equal the value. A missing field compares as null.
    Equals(Value),
    /// Record's list field must share at least one element with this list.
    /// A scalar record field matches when the list contains it.
    Intersects(Vec<Value>),
}

impl Matcher {
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match self {
            Matcher::Equals(expected) => field.unwrap_or(&Value::Null) == expected,
            Matcher::Intersects(values) => match field {
                Some(Value::Array(items)) => items.iter().any(|item| values.contains(item)),
                Some(scalar) => values.contains(scalar),
                None => false,
            },
        }
    }
}

/// ANDed field conditions. An empty clause matches every record.
#[derive(Debug, Clone, Default)]
pub struct Where {
    conditions: BTreeMap<String, Matcher>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .insert(field.to_string(), Matcher::Equals(value.into()));
        self
    }

    pub fn intersects(mut self, field: &str, values: Vec<Value>) -> Self {
        self.conditions
            .insert(field.to_string(), Matcher::Intersects(values));
        self
    }

    /// Build a clause from a JSON object as handed over the dispatch
    /// boundary: array values become intersection matchers, everything else
    /// strict equality. Non-object input yields the match-all clause.
    pub fn from_value(value: &Value) -> Self {
        let mut clause = Self::new();
        if let Value::Object(map) = value {
            for (field, v) in map {
                let matcher = match v {
                    Value::Array(items) => Matcher::Intersects(items.clone()),
                    other => Matcher::Equals(other.clone()),
                };
                clause.conditions.insert(field.clone(), matcher);
            }
        }
        clause
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|(field, matcher)| matcher.matches(record.get(field)))
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Sort specification: a field name, `-` prefix for descending.
#[derive(Debug, Clone, Copy)]
pub struct SortSpec<'a> {
    pub field: &'a str,
    pub descending: bool,
}

impl<'a> SortSpec<'a> {
    pub fn parse(sort: &'a str) -> Self {
        match sort.strip_prefix('-') {
            Some(field) => Self { field, descending: true },
            None => Self { field: sort, descending: false },
        }
    }
}

/// Total order over JSON values for sorting records by field.
///
/// Missing fields (and explicit nulls) sort before present values in
/// ascending order, reproducing the dashboard's lexical-comparison fallback.
/// Across kinds: Null < Bool < Number < String < Array < Object.
pub fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    fn kind_rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        // Arrays/objects have no useful field order; fall back to their
        // serialized form so the order is at least total and stable.
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_equals_matches_scalar() {
        let clause = Where::new().eq("severity", "critical");
        assert!(clause.matches(&record(json!({"severity": "critical"}))));
        assert!(!clause.matches(&record(json!({"severity": "high"}))));
        assert!(!clause.matches(&record(json!({"title": "no severity"}))));
    }

    #[test]
    fn test_intersects_matches_on_shared_element() {
        let clause = Where::new().intersects("affected_systems", vec![json!("Auth Service")]);
        assert!(clause.matches(&record(json!({
            "affected_systems": ["Auth Service", "API Gateway"]
        }))));
        assert!(!clause.matches(&record(json!({
            "affected_systems": ["Postgres Primary"]
        }))));
        assert!(!clause.matches(&record(json!({"title": "no systems"}))));
    }

    #[test]
    fn test_conditions_are_anded() {
        let clause = Where::new()
            .eq("severity", "critical")
            .eq("status", "new");
        assert!(clause.matches(&record(json!({"severity": "critical", "status": "new"}))));
        assert!(!clause.matches(&record(json!({"severity": "critical", "status": "resolved"}))));
    }

    #[test]
    fn test_empty_clause_matches_all() {
        assert!(Where::new().matches(&record(json!({"anything": 1}))));
    }

    #[test]
    fn test_from_value_arrays_become_intersections() {
        let clause = Where::from_value(&json!({
            "tags": ["auth", "sso"],
            "status": "published"
        }));
        assert!(clause.matches(&record(json!({
            "tags": ["sso", "identity"],
            "status": "published"
        }))));
        assert!(!clause.matches(&record(json!({
            "tags": ["database"],
            "status": "published"
        }))));
    }

    #[test]
    fn test_sort_spec_parse() {
        let spec = SortSpec::parse("-created_date");
        assert_eq!(spec.field, "created_date");
        assert!(spec.descending);

        let spec = SortSpec::parse("title");
        assert_eq!(spec.field, "title");
        assert!(!spec.descending);
    }

    #[test]
    fn test_missing_sorts_before_present() {
        assert_eq!(value_cmp(None, Some(&json!("a"))), Ordering::Less);
        assert_eq!(value_cmp(Some(&json!(0)), None), Ordering::Greater);
        assert_eq!(value_cmp(None, Some(&Value::Null)), Ordering::Equal);
    }

    #[test]
    fn test_value_cmp_within_kinds() {
        assert_eq!(value_cmp(Some(&json!(1)), Some(&json!(2))), Ordering::Less);
        assert_eq!(value_cmp(Some(&json!("b")), Some(&json!("a"))), Ordering::Greater);
        assert_eq!(value_cmp(Some(&json!(false)), Some(&json!(true))), Ordering::Less);
    }
}
