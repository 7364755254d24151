//! Templated statement registry.
//!
//! Resolves dotted statement ids (`reports.daily.select_totals`) to raw SQL
//! templates stored under a template root, caches them for the process
//! lifetime, and renders them with pagination-aware option substitution.
//!
//! The registry is an explicitly owned object: construct one per template
//! root and share it by reference. Nothing here is process-global, so
//! independent configurations (and isolated tests) can coexist.

use crate::config::DbConfig;
use crate::error::{SqlError, SqlResult};
use crate::params::Params;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

mod render;
mod resolver;

#[cfg(test)]
mod tests;

/// Cache of statement templates keyed by dotted id.
///
/// Reads of populated entries take a shared lock only. A miss serializes on
/// the load mutex, re-checks the cache, then reads exactly one file —
/// concurrent first access of the same id performs a single filesystem
/// read and every caller observes the same fully-populated entry.
pub struct StatementRegistry {
    root: PathBuf,
    page_param: String,
    page_size_param: String,
    index: RwLock<Option<Arc<HashMap<String, PathBuf>>>>,
    cache: RwLock<HashMap<String, Arc<str>>>,
    load_lock: Mutex<()>,
}

impl StatementRegistry {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            root: config.template_root.clone(),
            page_param: config.page_param.clone(),
            page_size_param: config.page_size_param.clone(),
            index: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
            load_lock: Mutex::new(()),
        }
    }

    /// Eagerly load every statement under the template root.
    ///
    /// Rebuilds the namespace index and replaces the cache wholesale;
    /// calling it again is an idempotent full rebuild. Files with no
    /// statements are skipped here (they only error on direct resolution).
    pub fn preload_all(&self) -> SqlResult<()> {
        let _guard = self.load_lock.lock().unwrap();

        let index = Arc::new(resolver::build_index(&self.root)?);
        let mut entries = HashMap::new();
        for (prefix, path) in index.iter() {
            let statements = match resolver::parse_template_file(path) {
                Ok(statements) => statements,
                Err(SqlError::TemplateFileEmpty(_)) => continue,
                Err(e) => return Err(e),
            };
            for (key, text) in statements {
                entries.insert(format!("{prefix}.{key}"), Arc::from(text));
            }
        }

        *self.index.write().unwrap() = Some(index);
        *self.cache.write().unwrap() = entries;
        Ok(())
    }

    /// Raw template text for a statement id, loading its file on first
    /// access.
    pub fn statement(&self, id: &str) -> SqlResult<Arc<str>> {
        let (prefix, key) = split_id(id)?;

        if let Some(text) = self.cache.read().unwrap().get(id) {
            return Ok(text.clone());
        }

        let _guard = self.load_lock.lock().unwrap();
        if let Some(text) = self.cache.read().unwrap().get(id) {
            return Ok(text.clone());
        }

        let index = self.index_snapshot()?;
        let path = index
            .get(prefix)
            .ok_or_else(|| SqlError::TemplateFileNotFound(id.to_string()))?;
        let statements = resolver::parse_template_file(path)?;
        let text = statements
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text)
            .ok_or_else(|| SqlError::StatementNotFound(id.to_string()))?;

        let text: Arc<str> = Arc::from(text);
        self.cache
            .write()
            .unwrap()
            .insert(id.to_string(), text.clone());
        Ok(text)
    }

    /// Resolve a statement and render it with the given options.
    pub fn render(&self, id: &str, options: &Params) -> SqlResult<String> {
        let raw = self.statement(id)?;
        render::render(&raw, options, &self.page_param, &self.page_size_param)
    }

    /// Rebuild the namespace index from the filesystem on explicit request.
    ///
    /// Does not evict cached statement text.
    pub fn rebuild_index(&self) -> SqlResult<()> {
        let _guard = self.load_lock.lock().unwrap();
        let index = Arc::new(resolver::build_index(&self.root)?);
        *self.index.write().unwrap() = Some(index);
        Ok(())
    }

    /// Reserved pagination option names this registry renders with.
    pub fn page_params(&self) -> (&str, &str) {
        (&self.page_param, &self.page_size_param)
    }

    // Caller must hold `load_lock` when the index may need building.
    fn index_snapshot(&self) -> SqlResult<Arc<HashMap<String, PathBuf>>> {
        if let Some(index) = self.index.read().unwrap().as_ref() {
            return Ok(index.clone());
        }
        let index = Arc::new(resolver::build_index(&self.root)?);
        *self.index.write().unwrap() = Some(index.clone());
        Ok(index)
    }
}

fn split_id(id: &str) -> SqlResult<(&str, &str)> {
    match id.rsplit_once('.') {
        Some((prefix, key))
            if !key.is_empty() && !prefix.is_empty() && !prefix.split('.').any(str::is_empty) =>
        {
            Ok((prefix, key))
        }
        _ => Err(SqlError::MalformedStatementId(id.to_string())),
    }
}
