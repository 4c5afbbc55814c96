//! Object-level diff: walk two JSON snapshots in lock-step and collect one
//! change record per leaf-level or whole-branch difference.
//!
//! A field that flips between populated and null/absent is reported as one
//! change, never expanded. Arrays whose lengths differ are reported as one
//! whole-array change; equal-length arrays are compared per index. `_id`
//! fields are normalized to strings before comparison, since document-store
//! identifiers show up either as plain strings or as reference objects.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::equality::{scalar_equal, values_equal};
use crate::path;

/// The result of comparing two JSON snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDiff {
    /// The changes, in traversal order: object keys in map order, array
    /// indices ascending.
    pub changes: Vec<ChangeRecord>,
}

impl ObjectDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of fields absent before and present after.
    pub fn additions(&self) -> usize {
        self.changes.iter().filter(|c| c.old.is_none()).count()
    }

    /// Number of fields present before and absent after.
    pub fn removals(&self) -> usize {
        self.changes.iter().filter(|c| c.new.is_none()).count()
    }

    /// Number of fields present on both sides with different values.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.old.is_some() && c.new.is_some())
            .count()
    }
}

/// One reported difference between the two snapshots.
///
/// `old`/`new` carry the original values untransformed so the presentation
/// layer can apply its own rendering rules. `None` means the field was
/// absent on that side, which is distinct from an explicit JSON null.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Dot/bracket location of the differing field.
    pub path: String,

    #[serde(
        rename = "oldValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub old: Option<Value>,

    #[serde(
        rename = "newValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub new: Option<Value>,
}

/// Compare two snapshots and produce a diff.
///
/// Pure and read-only: the inputs are never mutated, and the same pair of
/// snapshots yields the same diff every call.
pub fn diff(before: &Value, after: &Value) -> ObjectDiff {
    let mut changes = Vec::new();
    walk(Some(before), Some(after), "", &mut changes);
    ObjectDiff { changes }
}

fn walk(
    before: Option<&Value>,
    after: Option<&Value>,
    current: &str,
    out: &mut Vec<ChangeRecord>,
) {
    // Null and absent sides terminate the branch: a field that flips
    // between populated and missing is reported as one change, never
    // expanded. Absent is not null, so null-to-missing still reports.
    let (b, a) = match (before, after) {
        (Some(b), Some(a)) if !b.is_null() && !a.is_null() => (b, a),
        _ => {
            if before != after {
                push(out, at(current, "root"), before, after);
            }
            return;
        }
    };

    match (b, a) {
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                // Whole-branch replacement: unaligned per-index diffs read
                // worse than "the list changed".
                push(out, at(current, "array"), before, after);
            } else {
                for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
                    walk(Some(x), Some(y), &path::index(current, i), out);
                }
            }
        }
        (Value::Object(bm), Value::Object(am)) => {
            let keys: BTreeSet<&str> = bm.keys().chain(am.keys()).map(String::as_str).collect();
            for key in keys {
                let bv = bm.get(key);
                let av = am.get(key);

                if key == "_id" {
                    if let (Some(bv), Some(av)) = (bv, av) {
                        if is_truthy(bv) && is_truthy(av) {
                            let old_id = id_string(bv);
                            let new_id = id_string(av);
                            if old_id != new_id {
                                out.push(ChangeRecord {
                                    path: path::child(current, key),
                                    old: Some(Value::String(old_id)),
                                    new: Some(Value::String(new_id)),
                                });
                            }
                            continue;
                        }
                    }
                }

                if let (Some(bv), Some(av)) = (bv, av) {
                    if values_equal(bv, av) {
                        continue;
                    }
                }
                walk(bv, av, &path::child(current, key), out);
            }
        }
        _ => {
            // A primitive on at least one side, or mismatched container
            // kinds: one whole-value change.
            if !scalar_equal(b, a) {
                push(out, at(current, "value"), before, after);
            }
        }
    }
}

fn push(out: &mut Vec<ChangeRecord>, path: String, old: Option<&Value>, new: Option<&Value>) {
    out.push(ChangeRecord {
        path,
        old: old.cloned(),
        new: new.cloned(),
    });
}

/// Root-level changes get a descriptive label instead of an empty path.
fn at(current: &str, label: &str) -> String {
    if current.is_empty() {
        label.to_string()
    } else {
        current.to_string()
    }
}

/// JS-style truthiness: null, false, zero, and the empty string are falsy;
/// everything else, including empty containers, is truthy.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Natural string form of an identifier: strings as-is, `{"$oid": "..."}`
/// reference objects unwrapped, anything else serialized compactly.
fn id_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Object(m) if m.len() == 1 => match m.get("$oid") {
            Some(Value::String(s)) => s.clone(),
            _ => v.to_string(),
        },
        _ => v.to_string(),
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::values_equal;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn diff_of_value_with_itself_is_empty(v in arb_value()) {
            prop_assert!(diff(&v, &v).is_empty());
        }

        #[test]
        fn equality_predicate_is_pure(a in arb_value(), b in arb_value()) {
            prop_assert_eq!(values_equal(&a, &b), values_equal(&a, &b));
        }

        #[test]
        fn equal_values_produce_empty_diffs(a in arb_value(), b in arb_value()) {
            if values_equal(&a, &b) {
                prop_assert!(diff(&a, &b).is_empty());
            }
        }

        #[test]
        fn paths_are_unique(a in arb_value(), b in arb_value()) {
            let d = diff(&a, &b);
            let mut paths: Vec<&String> = d.changes.iter().map(|c| &c.path).collect();
            paths.sort();
            paths.dedup();
            prop_assert_eq!(paths.len(), d.len());
        }
    }
}
