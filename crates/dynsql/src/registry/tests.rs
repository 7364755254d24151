//! Unit tests for the statement registry.

use super::StatementRegistry;
use crate::config::DbConfig;
use crate::error::SqlError;
use crate::params::Params;
use std::path::{Path, PathBuf};

fn temp_root(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("dynsql-registry-{tag}-{}", std::process::id()));
    if root.exists() {
        std::fs::remove_dir_all(&root).unwrap();
    }
    std::fs::create_dir_all(&root).unwrap();
    root
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn registry(root: &Path) -> StatementRegistry {
    StatementRegistry::new(&DbConfig::new(root))
}

#[test]
fn malformed_ids_are_rejected() {
    let root = temp_root("malformed");
    let reg = registry(&root);
    for id in ["nodot", "", ".leading", "trailing.", "a..b"] {
        let err = reg.statement(id).unwrap_err();
        assert!(matches!(err, SqlError::MalformedStatementId(_)), "{id:?}");
    }
}

#[test]
fn resolves_root_level_file() {
    let root = temp_root("root-level");
    write_file(&root, "users.toml", r#"select_all = "SELECT * FROM users""#);

    let reg = registry(&root);
    let text = reg.statement("users.select_all").unwrap();
    assert_eq!(&*text, "SELECT * FROM users");
}

#[test]
fn resolves_nested_directories() {
    let root = temp_root("nested");
    write_file(
        &root,
        "reports/daily.toml",
        r#"totals = "SELECT day, SUM(amount) FROM orders GROUP BY day""#,
    );

    let reg = registry(&root);
    let text = reg.statement("reports.daily.totals").unwrap();
    assert!(text.starts_with("SELECT day"));
}

#[test]
fn unknown_prefix_is_file_not_found() {
    let root = temp_root("unknown-prefix");
    write_file(&root, "users.toml", r#"a = "SELECT 1""#);

    let reg = registry(&root);
    let err = reg.statement("missing.select_all").unwrap_err();
    assert!(matches!(err, SqlError::TemplateFileNotFound(_)));
    assert!(err.to_string().contains("missing.select_all"));
}

#[test]
fn missing_key_is_statement_not_found() {
    let root = temp_root("missing-key");
    write_file(&root, "users.toml", r#"a = "SELECT 1""#);

    let reg = registry(&root);
    let err = reg.statement("users.nope").unwrap_err();
    assert!(matches!(err, SqlError::StatementNotFound(_)));
    assert!(err.to_string().contains("users.nope"));
}

#[test]
fn empty_file_errors_on_direct_resolution() {
    let root = temp_root("empty-file");
    write_file(&root, "empty.toml", "");

    let reg = registry(&root);
    let err = reg.statement("empty.anything").unwrap_err();
    assert!(matches!(err, SqlError::TemplateFileEmpty(_)));
}

#[test]
fn second_resolution_comes_from_cache() {
    let root = temp_root("cache-hit");
    write_file(&root, "users.toml", r#"one = "SELECT 1""#);

    let reg = registry(&root);
    reg.statement("users.one").unwrap();

    // Remove the backing file; a cached entry must not touch the disk.
    std::fs::remove_file(root.join("users.toml")).unwrap();
    let text = reg.statement("users.one").unwrap();
    assert_eq!(&*text, "SELECT 1");
}

#[test]
fn preload_all_populates_everything() {
    let root = temp_root("preload");
    write_file(&root, "users.toml", r#"one = "SELECT 1""#);
    write_file(&root, "reports/daily.toml", r#"two = "SELECT 2""#);
    write_file(&root, "empty.toml", "");

    let reg = registry(&root);
    reg.preload_all().unwrap();

    std::fs::remove_dir_all(&root).unwrap();
    assert_eq!(&*reg.statement("users.one").unwrap(), "SELECT 1");
    assert_eq!(&*reg.statement("reports.daily.two").unwrap(), "SELECT 2");
}

#[test]
fn preload_all_is_an_idempotent_rebuild() {
    let root = temp_root("preload-idem");
    write_file(&root, "users.toml", r#"one = "SELECT 1""#);

    let reg = registry(&root);
    reg.preload_all().unwrap();
    reg.preload_all().unwrap();
    assert_eq!(&*reg.statement("users.one").unwrap(), "SELECT 1");
}

#[test]
fn concurrent_first_access_yields_one_coherent_entry() {
    let root = temp_root("concurrent");
    write_file(&root, "users.toml", r#"one = "SELECT 1""#);

    let reg = registry(&root);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| reg.statement("users.one").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(&*handle.join().unwrap(), "SELECT 1");
        }
    });

    // Exactly one load happened: the file is no longer needed at all.
    std::fs::remove_file(root.join("users.toml")).unwrap();
    assert_eq!(&*reg.statement("users.one").unwrap(), "SELECT 1");
}

#[test]
fn rebuild_index_picks_up_new_files() {
    let root = temp_root("rebuild");
    write_file(&root, "users.toml", r#"one = "SELECT 1""#);

    let reg = registry(&root);
    reg.statement("users.one").unwrap();

    // The index was built once; a file added afterwards is invisible.
    write_file(&root, "orders.toml", r#"two = "SELECT 2""#);
    let err = reg.statement("orders.two").unwrap_err();
    assert!(matches!(err, SqlError::TemplateFileNotFound(_)));

    reg.rebuild_index().unwrap();
    assert_eq!(&*reg.statement("orders.two").unwrap(), "SELECT 2");
}

#[test]
fn non_string_statement_is_a_parse_error() {
    let root = temp_root("non-string");
    write_file(&root, "users.toml", "one = 42");

    let reg = registry(&root);
    let err = reg.statement("users.one").unwrap_err();
    assert!(matches!(err, SqlError::Parse { .. }));
}

// ==================== rendering ====================

#[test]
fn render_without_options_is_byte_identical() {
    let root = temp_root("render-raw");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let sql = reg.render("q.all", &Params::new()).unwrap();
    assert_eq!(sql, "SELECT * FROM t");
}

#[test]
fn render_fast_path_survives_template_hostile_text() {
    let root = temp_root("render-hostile");
    write_file(&root, "q.toml", r#"odd = "SELECT '{%' FROM t""#);

    let reg = registry(&root);
    let sql = reg.render("q.odd", &Params::new()).unwrap();
    assert_eq!(sql, "SELECT '{%' FROM t");
}

#[test]
fn render_substitutes_variables() {
    let root = temp_root("render-vars");
    write_file(
        &root,
        "q.toml",
        r#"by_level = "SELECT * FROM logs WHERE level = '{{ level }}'""#,
    );

    let reg = registry(&root);
    let sql = reg
        .render("q.by_level", &Params::new().set("level", "warn"))
        .unwrap();
    assert_eq!(sql, "SELECT * FROM logs WHERE level = 'warn'");
}

#[test]
fn render_appends_offset_limit_for_later_pages() {
    let root = temp_root("render-page2");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let opts = Params::new().set("page", 2).set("page_size", 10);
    let sql = reg.render("q.all", &opts).unwrap();
    assert!(sql.contains("LIMIT 10,10"), "{sql}");
}

#[test]
fn render_first_page_emits_plain_limit() {
    let root = temp_root("render-page1");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let opts = Params::new().set("page", 1).set("page_size", 5);
    let sql = reg.render("q.all", &opts).unwrap();
    assert!(sql.contains("LIMIT 5"), "{sql}");
    assert!(!sql.contains(','), "{sql}");
}

#[test]
fn render_defaults_missing_page_and_size() {
    let root = temp_root("render-defaults");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);

    // Size only: page defaults to 1.
    let sql = reg.render("q.all", &Params::new().set("page_size", 7)).unwrap();
    assert!(sql.contains("LIMIT 7"), "{sql}");
    assert!(!sql.contains(','), "{sql}");

    // Page only: size defaults to 10.
    let sql = reg.render("q.all", &Params::new().set("page", 3)).unwrap();
    assert!(sql.contains("LIMIT 20,10"), "{sql}");
}

#[test]
fn render_clamps_non_positive_pages() {
    let root = temp_root("render-clamp");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let opts = Params::new().set("page", 0).set("page_size", 5);
    let sql = reg.render("q.all", &opts).unwrap();
    assert!(sql.contains("LIMIT 5"), "{sql}");
    assert!(!sql.contains(','), "{sql}");
}

#[test]
fn render_rejects_non_integer_pagination() {
    let root = temp_root("render-bad-page");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let opts = Params::new().set("page", "first").set("page_size", 5);
    let err = reg.render("q.all", &opts).unwrap_err();
    assert!(matches!(err, SqlError::Validation(_)));
}

#[test]
fn render_accepts_numeric_strings() {
    let root = temp_root("render-str-page");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let reg = registry(&root);
    let opts = Params::new().set("page", "2").set("page_size", "10");
    let sql = reg.render("q.all", &opts).unwrap();
    assert!(sql.contains("LIMIT 10,10"), "{sql}");
}

#[test]
fn render_uses_configured_pagination_names() {
    let root = temp_root("render-custom-names");
    write_file(&root, "q.toml", r#"all = "SELECT * FROM t""#);

    let config = DbConfig::new(&root).page_param("p").page_size_param("ps");
    let reg = StatementRegistry::new(&config);
    let sql = reg
        .render("q.all", &Params::new().set("p", 2).set("ps", 5))
        .unwrap();
    assert!(sql.contains("LIMIT 5,5"), "{sql}");
}

#[test]
fn render_is_idempotent_across_calls() {
    let root = temp_root("render-idem");
    write_file(
        &root,
        "q.toml",
        r#"all = "SELECT * FROM t WHERE k = {{ k }}""#,
    );

    let reg = registry(&root);
    let opts = Params::new().set("k", 1).set("page", 2).set("page_size", 10);
    let first = reg.render("q.all", &opts).unwrap();
    let second = reg.render("q.all", &opts).unwrap();
    assert_eq!(first, second);
}
