//! High-level facade tying builders, registry, and executor together.

use crate::builder::{Delete, Insert, Statement, Update};
use crate::client::{ExecResult, Executor};
use crate::config::DbConfig;
use crate::error::SqlResult;
use crate::hook::{DiagnosticSink, TracingSink};
use crate::params::Params;
use crate::registry::StatementRegistry;
use crate::row::Record;
use std::sync::Arc;

/// Facade over an [`Executor`]: builds statements, resolves templates, and
/// applies the execution error policy.
///
/// Build-time errors (injection, reserved prefixes, malformed ids, missing
/// templates) are fatal and propagate as `Err`. Failures reported by the
/// executor are logged through the diagnostic sink and absorbed into an
/// absence value — the statement may or may not have applied, and any retry
/// policy belongs to the caller.
pub struct Db<E> {
    executor: E,
    config: DbConfig,
    registry: StatementRegistry,
    sink: Arc<dyn DiagnosticSink>,
}

impl<E: Executor> Db<E> {
    /// Create a facade; the registry is owned here, not process-global.
    pub fn new(executor: E, config: DbConfig) -> Self {
        let registry = StatementRegistry::new(&config);
        Self {
            executor,
            config,
            registry,
            sink: Arc::new(TracingSink::new()),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn registry(&self) -> &StatementRegistry {
        &self.registry
    }

    /// Insert a row; returns the engine-reported insert id, or `None` when
    /// execution failed or the engine reports no id.
    pub async fn insert(&self, table: &str, data: Params) -> SqlResult<Option<i64>> {
        let stmt = Insert::new(table, data).build()?;
        Ok(self.run(&stmt).await.and_then(|r| r.last_insert_id))
    }

    /// Update rows matching the filters; returns the affected row count, or
    /// `None` when execution failed.
    pub async fn update(
        &self,
        table: &str,
        data: Params,
        filter: Params,
        exclude: Params,
    ) -> SqlResult<Option<u64>> {
        let stmt = Update::new(table, data)
            .filter(filter)
            .exclude(exclude)
            .build()?;
        Ok(self.run(&stmt).await.map(|r| r.rows_affected))
    }

    /// Physically delete rows matching the filters.
    pub async fn delete(
        &self,
        table: &str,
        filter: Params,
        exclude: Params,
    ) -> SqlResult<Option<u64>> {
        let stmt = Delete::new(table).filter(filter).exclude(exclude).build()?;
        Ok(self.run(&stmt).await.map(|r| r.rows_affected))
    }

    /// Logically delete rows by setting the configured flag column to 1.
    pub async fn delete_logical(
        &self,
        table: &str,
        filter: Params,
        exclude: Params,
    ) -> SqlResult<Option<u64>> {
        let stmt = Delete::new(table)
            .filter(filter)
            .exclude(exclude)
            .logical(self.config.logic_delete_flag.as_str())
            .build()?;
        Ok(self.run(&stmt).await.map(|r| r.rows_affected))
    }

    /// Resolve and render a templated statement, then fetch all rows.
    ///
    /// Execution failure yields an empty row set after one sink line.
    pub async fn select_all(
        &self,
        id: &str,
        params: Params,
        options: Params,
    ) -> SqlResult<Vec<Record>> {
        let sql = self.registry.render(id, &options)?;
        match self.executor.fetch(&sql, &params).await {
            Ok(rows) => {
                self.diag(&format!("executed <{id}>, params: {params:?}"));
                Ok(rows)
            }
            Err(e) => {
                self.diag(&format!(
                    "failed to execute <{sql}>, params: {params:?}, cause: {e}"
                ));
                Ok(Vec::new())
            }
        }
    }

    /// Like [`Db::select_all`] but ignores pagination options and returns
    /// the first row, if any.
    pub async fn select_one(
        &self,
        id: &str,
        params: Params,
        mut options: Params,
    ) -> SqlResult<Option<Record>> {
        options.remove(self.config.page_param.as_str());
        options.remove(self.config.page_size_param.as_str());
        let rows = self.select_all(id, params, options).await?;
        Ok(rows.into_iter().next())
    }

    /// Resolve and render a templated non-SELECT statement and execute it;
    /// returns the affected row count, or `None` when execution failed.
    pub async fn execute(
        &self,
        id: &str,
        params: Params,
        options: Params,
    ) -> SqlResult<Option<u64>> {
        let sql = self.registry.render(id, &options)?;
        let stmt = Statement {
            sql,
            bindings: params,
        };
        Ok(self.run(&stmt).await.map(|r| r.rows_affected))
    }

    async fn run(&self, stmt: &Statement) -> Option<ExecResult> {
        match self.executor.execute(&stmt.sql, &stmt.bindings).await {
            Ok(result) => {
                self.diag(&format!(
                    "executed <{}>, params: {:?}",
                    stmt.sql, stmt.bindings
                ));
                Some(result)
            }
            Err(e) => {
                self.diag(&format!(
                    "failed to execute <{}>, params: {:?}, cause: {e}",
                    stmt.sql, stmt.bindings
                ));
                None
            }
        }
    }

    fn diag(&self, message: &str) {
        if self.config.diagnostics {
            self.sink.emit(message);
        }
    }
}
