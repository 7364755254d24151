//! UPDATE statement builder.

use super::{Statement, compile_filters, push_where};
use crate::error::{SqlError, SqlResult};
use crate::guard;
use crate::params::Params;

/// UPDATE builder: table, data map, and include/exclude filter maps.
///
/// Data bindings stay unprefixed; filter bindings always carry the
/// `_where_`/`_exclude_` prefix, so merging the two sets cannot collide.
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    data: Params,
    filter: Params,
    exclude: Params,
}

impl Update {
    pub fn new(table: impl Into<String>, data: Params) -> Self {
        Self {
            table: table.into(),
            data,
            filter: Params::new(),
            exclude: Params::new(),
        }
    }

    /// Set the include-filter map (`WHERE` predicates).
    pub fn filter(mut self, filter: Params) -> Self {
        self.filter = filter;
        self
    }

    /// Set the exclude-filter map (negated predicates, AND-appended).
    pub fn exclude(mut self, exclude: Params) -> Self {
        self.exclude = exclude;
        self
    }

    /// Serialize to `UPDATE t SET a = :a, ... WHERE ...` plus bindings.
    pub fn build(&self) -> SqlResult<Statement> {
        guard::check(&self.table, "table name")?;
        if self.data.is_empty() {
            return Err(SqlError::validation("UPDATE requires at least one SET column"));
        }

        let sets: Vec<String> = self.data.keys().map(|c| format!("{c} = :{c}")).collect();
        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));

        let compiled = compile_filters(&self.filter, &self.exclude)?;
        push_where(&mut sql, &compiled);

        let mut bindings = self.data.clone();
        bindings.merge(compiled.bindings);

        Ok(Statement { sql, bindings })
    }
}
