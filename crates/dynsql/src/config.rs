//! Configuration surface, consumed once at construction.

use std::path::PathBuf;

/// Configuration for [`crate::Db`] and [`crate::StatementRegistry`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Root directory of the statement template tree.
    pub template_root: PathBuf,
    /// Reserved option key naming the page number.
    pub page_param: String,
    /// Reserved option key naming the page size.
    pub page_size_param: String,
    /// Flag column set to 1 by logical deletes.
    pub logic_delete_flag: String,
    /// Whether execution diagnostics are emitted through the sink.
    pub diagnostics: bool,
}

impl DbConfig {
    /// Create a configuration with the default option names.
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            page_param: "page".to_string(),
            page_size_param: "page_size".to_string(),
            logic_delete_flag: "delete_flag".to_string(),
            diagnostics: false,
        }
    }

    /// Rename the reserved page-number option key.
    pub fn page_param(mut self, name: impl Into<String>) -> Self {
        self.page_param = name.into();
        self
    }

    /// Rename the reserved page-size option key.
    pub fn page_size_param(mut self, name: impl Into<String>) -> Self {
        self.page_size_param = name.into();
        self
    }

    /// Set the logical-delete flag column.
    pub fn logic_delete_flag(mut self, column: impl Into<String>) -> Self {
        self.logic_delete_flag = column.into();
        self
    }

    /// Enable or disable execution diagnostics.
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}
