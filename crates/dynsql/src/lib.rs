//! # dynsql
//!
//! A dynamic-SQL construction layer: declarative data/filter maps in,
//! named-parameter SQL out, plus a file-backed registry of templated
//! statements addressed by dotted ids.
//!
//! ## Features
//!
//! - **Filter maps with operator suffixes**: `age__gte`, `name__like`,
//!   `id__in`, `ts__between`, `deleted__isnull` — compiled to WHERE clauses
//!   with deterministic parameter names
//! - **Include/exclude polarity**: exclusion uses direct negated operators,
//!   never a `NOT (...)` wrapper
//! - **Collision-free bindings**: filter parameters carry a
//!   `_where_`/`_exclude_` prefix, data columns bind unprefixed
//! - **Injection guard**: table names and filter keys/values are screened
//!   against a keyword blacklist before any SQL is emitted
//! - **Statement registry**: dotted ids resolve to SQL templates stored in
//!   TOML files under a template root, cached per process, rendered with
//!   MiniJinja and automatic page/page-size → LIMIT/OFFSET rewriting
//! - **Absorbed execution errors**: build-time errors are fatal,
//!   execute-time failures log one diagnostic line and return absence
//!
//! ## Example
//!
//! ```ignore
//! use dynsql::prelude::*;
//!
//! let db = Db::new(executor, DbConfig::new("sql/").diagnostics(true));
//!
//! // UPDATE users SET status = :status
//! //   WHERE age >= :_where_age__gte AND role != :_exclude_role
//! let affected = db
//!     .update(
//!         "users",
//!         Params::new().set("status", "archived"),
//!         Params::new().set("age__gte", 65),
//!         Params::new().set("role", "admin"),
//!     )
//!     .await?;
//!
//! // Templated, paginated query from sql/reports/daily.toml
//! let rows = db
//!     .select_all(
//!         "reports.daily.totals",
//!         Params::new(),
//!         Params::new().set("page", 2).set("page_size", 10),
//!     )
//!     .await?;
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod guard;
pub mod hook;
pub mod params;
pub mod prelude;
pub mod registry;
pub mod row;

pub use builder::{Delete, Insert, Statement, Update};
pub use client::{ExecResult, Executor};
pub use config::DbConfig;
pub use db::Db;
pub use error::{SqlError, SqlResult};
pub use filter::{CompiledFilter, FilterOp, Polarity, compile};
pub use hook::{DiagnosticSink, NoopSink, TracingSink};
pub use params::Params;
pub use registry::StatementRegistry;
pub use row::Record;
