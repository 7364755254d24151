//! Filter clause compilation.
//!
//! This module turns a filter map into SQL boolean clauses plus a named
//! parameter binding set. Filter keys carry an optional operator suffix
//! (`age__gte`, `name__like`, `id__in`, ...); the bare key means equality.
//! [`Polarity`] selects between the include and exclude halves of the
//! operator table and fixes the generated parameter-name prefix, so filter
//! bindings can never collide with unprefixed data-column bindings.

use crate::error::{SqlError, SqlResult};
use crate::guard;
use crate::params::{Params, is_truthy};
use serde_json::Value;

mod ops;

pub use ops::FilterOp;


/// Direction a filter map is applied in.
///
/// `Include` clauses assert the predicate, `Exclude` clauses assert its
/// logical negation, using a direct negated operator rather than a
/// `NOT (...)` wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Include,
    Exclude,
}

impl Polarity {
    /// Parameter-name prefix for this polarity.
    pub fn prefix(self) -> &'static str {
        match self {
            Polarity::Include => "_where_",
            Polarity::Exclude => "_exclude_",
        }
    }
}

/// Output of [`compile`]: clause fragments plus their bindings.
///
/// Clauses carry no joining `AND`s; callers join with `" AND "` when
/// serializing, and emit no `WHERE` at all when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    pub clauses: Vec<String>,
    pub bindings: Params,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Append another compiled filter's clauses and bindings.
    pub fn extend(&mut self, other: CompiledFilter) {
        self.clauses.extend(other.clauses);
        self.bindings.merge(other.bindings);
    }
}

/// Compile a filter map into clause fragments and a binding set.
///
/// Every key/value pair passes the injection guard; keys already starting
/// with a generated-name prefix are rejected rather than renamed. The
/// caller's map is not modified.
///
/// Parameter names are derived from the *original* suffixed key:
/// `_where_<key>` / `_exclude_<key>`, except `between`, which binds
/// `_<polarity>__between_1_<key>` and `_<polarity>__between_2_<key>`.
/// `isnull` binds nothing.
pub fn compile(filters: &Params, polarity: Polarity) -> SqlResult<CompiledFilter> {
    let mut out = CompiledFilter::default();

    for (key, value) in filters.iter() {
        guard::check_pair(key, value)?;
        check_reserved(key)?;

        let (field, op) = FilterOp::parse(key);
        let prefix = polarity.prefix();

        match op {
            FilterOp::Between => {
                let (lo, hi) = between_bounds(key, value)?;
                let p1 = format!("{prefix}_between_1_{key}");
                let p2 = format!("{prefix}_between_2_{key}");
                out.clauses.push(format!(
                    "{field} {} :{p1} AND :{p2}",
                    op.fragment(polarity, true)
                ));
                out.bindings.insert(p1, lo.clone());
                out.bindings.insert(p2, hi.clone());
            }
            FilterOp::IsNull => {
                out.clauses
                    .push(format!("{field} {}", op.fragment(polarity, is_truthy(value))));
            }
            _ => {
                let param = format!("{prefix}{key}");
                out.clauses
                    .push(format!("{field} {} :{param}", op.fragment(polarity, true)));
                out.bindings.insert(param, value.clone());
            }
        }
    }

    Ok(out)
}

fn check_reserved(key: &str) -> SqlResult<()> {
    for prefix in [Polarity::Include.prefix(), Polarity::Exclude.prefix()] {
        if key.starts_with(prefix) {
            return Err(SqlError::ReservedPrefix {
                key: key.to_string(),
                prefix,
            });
        }
    }
    Ok(())
}

fn between_bounds<'v>(key: &str, value: &'v Value) -> SqlResult<(&'v Value, &'v Value)> {
    match value {
        Value::Array(items) if items.len() == 2 => Ok((&items[0], &items[1])),
        _ => Err(SqlError::validation(format!(
            "between filter {key:?} requires exactly two values"
        ))),
    }
}
