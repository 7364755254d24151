//! Convenient imports for typical `dynsql` usage.
//!
//! ```ignore
//! use dynsql::prelude::*;
//! ```

pub use crate::{
    Db, DbConfig, Delete, ExecResult, Executor, Insert, Params, Polarity, Record, SqlError,
    SqlResult, Statement, StatementRegistry, Update,
};
