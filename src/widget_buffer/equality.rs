//! Structural equality.
//!
//! Alias filters are opaque JSON and two filters are the same filter when they have the same
//! shape and content. `serde_json::Value`'s own `PartialEq` is close but keeps the integer/float
//! distinction (`1 != 1.0`), which a filter written by a different client can easily trip over,
//! so the comparison is spelled out here.

use crate::model::EntityAliases;
use serde_json::{Number, Value};

/// Deep equality over JSON values. Object key order is irrelevant, numbers compare by value.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| structurally_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, l)| y.get(key).is_some_and(|r| structurally_equal(l, r)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Whether two alias collections hold the same aliases under the same ids.
///
/// Order is ignored: a collection that was cloned and left alone compares equal to its source.
pub fn aliases_equal(a: &EntityAliases, b: &EntityAliases) -> bool {
    a.len() == b.len()
        && a.iter().all(|(id, left)| {
            b.get(id).is_some_and(|right| {
                left.id == right.id
                    && left.alias == right.alias
                    && structurally_equal(&left.filter, &right.filter)
            })
        })
}
