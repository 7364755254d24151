//! Pagination rewriting and template rendering.

use crate::error::{SqlError, SqlResult};
use crate::params::Params;
use minijinja::Environment;
use serde_json::Value;

/// Conditional block appended when pagination was requested. It renders in
/// the same substitution pass as the template body, so the LIMIT shape is
/// decided at render time.
const LIMIT_BLOCK: &str = "\n{% if limit and not offset %} LIMIT {{ limit }}\
                           {% elif limit and offset %} LIMIT {{ offset }},{{ limit }}{% endif %}";

/// Render a statement template with the given options.
///
/// The reserved page/page-size keys are removed first; if either was
/// present, the missing one defaults (page 1, size 10) and `limit`/`offset`
/// are injected into the options together with the conditional LIMIT
/// block. If no options remain and no pagination was requested, the raw
/// text is returned unchanged without a template pass — some statements
/// legitimately contain characters the template syntax would mis-parse.
pub(crate) fn render(
    template: &str,
    options: &Params,
    page_param: &str,
    page_size_param: &str,
) -> SqlResult<String> {
    let mut opts = options.clone();
    let page = take_int(&mut opts, page_param)?;
    let size = take_int(&mut opts, page_size_param)?;
    let paginated = page.is_some() || size.is_some();

    if paginated {
        let page = page.unwrap_or(1).max(1);
        let limit = size.unwrap_or(10);
        opts.insert("limit", limit);
        opts.insert("offset", (page - 1) * limit);
    }

    if opts.is_empty() {
        return Ok(template.to_string());
    }

    let mut body = String::from(template);
    if paginated {
        body.push_str(LIMIT_BLOCK);
    }

    let env = Environment::new();
    let tmpl = env.template_from_str(&body)?;
    Ok(tmpl.render(&opts)?)
}

/// Remove `key` from the options and coerce it to an integer.
///
/// An explicit null counts as absent. Anything else non-integral is a
/// caller error, not a silently-dropped option.
fn take_int(options: &mut Params, key: &str) -> SqlResult<Option<i64>> {
    let Some(value) = options.remove(key) else {
        return Ok(None);
    };
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) => Ok(Some(n)),
        None => Err(SqlError::validation(format!(
            "option {key:?} must be an integer, got {value}"
        ))),
    }
}
