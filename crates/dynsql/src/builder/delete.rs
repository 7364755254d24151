//! DELETE statement builder, with a logical-delete variant.

use super::{Statement, compile_filters, push_where};
use crate::error::SqlResult;
use crate::guard;
use crate::params::Params;

/// DELETE builder: table plus include/exclude filter maps.
///
/// `logical(flag)` switches the statement to `UPDATE t SET <flag>=1`,
/// marking rows inactive instead of physically removing them.
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    filter: Params,
    exclude: Params,
    logical_flag: Option<String>,
}

impl Delete {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: Params::new(),
            exclude: Params::new(),
            logical_flag: None,
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

    /// Delete logically by setting `flag_column` to 1 instead of removing
    /// the row.
    pub fn logical(mut self, flag_column: impl Into<String>) -> Self {
        self.logical_flag = Some(flag_column.into());
        self
    }

    /// Serialize to `DELETE FROM t ...` (or the flag UPDATE) plus bindings.
    pub fn build(&self) -> SqlResult<Statement> {
        guard::check(&self.table, "table name")?;

        let mut sql = match &self.logical_flag {
            Some(flag) => format!("UPDATE {} SET {flag}=1", self.table),
            None => format!("DELETE FROM {}", self.table),
        };

        let compiled = compile_filters(&self.filter, &self.exclude)?;
        push_where(&mut sql, &compiled);

        Ok(Statement {
            sql,
            bindings: compiled.bindings,
        })
    }
}
