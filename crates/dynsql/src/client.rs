//! Execution collaborator seam.
//!
//! The core stops at SQL text plus named bindings; an [`Executor`] carries
//! them to a relational engine. Implementations decide how `:name`
//! placeholders are bound and what connection/transaction machinery sits
//! behind the calls.

use crate::error::SqlResult;
use crate::params::Params;
use crate::row::Record;

/// Outcome of a non-SELECT statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows affected by the statement.
    pub rows_affected: u64,
    /// Identifier of the inserted row, when the engine reports one.
    pub last_insert_id: Option<i64>,
}

/// A collaborator that executes SQL text with named parameters.
///
/// Failures surface as [`crate::SqlError::Execution`]; the [`crate::Db`]
/// facade absorbs them into absence values after logging.
pub trait Executor: Send + Sync {
    /// Run a statement that produces no rows.
    fn execute(
        &self,
        sql: &str,
        params: &Params,
    ) -> impl std::future::Future<Output = SqlResult<ExecResult>> + Send;

    /// Run a query and return all rows as ordered records.
    fn fetch(
        &self,
        sql: &str,
        params: &Params,
    ) -> impl std::future::Future<Output = SqlResult<Vec<Record>>> + Send;
}
