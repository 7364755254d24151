//! INSERT statement builder.

use super::Statement;
use crate::error::{SqlError, SqlResult};
use crate::guard;
use crate::params::Params;

/// INSERT builder: table plus a data map.
///
/// Columns are emitted in data-map order and each binds its raw value
/// unprefixed. The table name passes the injection guard; column names do
/// not.
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
    data: Params,
}

impl Insert {
    pub fn new(table: impl Into<String>, data: Params) -> Self {
        Self {
            table: table.into(),
            data,
        }
    }

    /// Serialize to `INSERT INTO t (a, b) VALUES (:a, :b)` plus bindings.
    pub fn build(&self) -> SqlResult<Statement> {
        guard::check(&self.table, "table name")?;
        if self.data.is_empty() {
            return Err(SqlError::validation("INSERT requires at least one column"));
        }

        let columns: Vec<&str> = self.data.keys().collect();
        let placeholders: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", "),
        );

        Ok(Statement {
            sql,
            bindings: self.data.clone(),
        })
    }
}
