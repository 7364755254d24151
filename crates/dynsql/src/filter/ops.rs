//! Operator suffix table.

use super::Polarity;

/// Recognized filter operator, parsed from a key suffix.
///
/// A key with no recognized suffix is an equality filter. At most one
/// suffix is recognized; the suffix is stripped to obtain the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
    IsNull,
    Between,
}

const SUFFIXES: [(&str, FilterOp); 8] = [
    ("__gte", FilterOp::Gte),
    ("__gt", FilterOp::Gt),
    ("__lte", FilterOp::Lte),
    ("__lt", FilterOp::Lt),
    ("__like", FilterOp::Like),
    ("__in", FilterOp::In),
    ("__isnull", FilterOp::IsNull),
    ("__between", FilterOp::Between),
];

impl FilterOp {
    /// Split a filter key into its bare field name and operator.
    pub fn parse(key: &str) -> (&str, FilterOp) {
        for (suffix, op) in SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                return (field, op);
            }
        }
        (key, FilterOp::Eq)
    }

    /// SQL comparison fragment for this operator under `polarity`.
    ///
    /// `truthy` is only consulted for `IsNull`: a truthy filter value under
    /// include polarity means `IS NULL`, and the exclude form flips the
    /// already-resolved fragment (never a double negation).
    pub fn fragment(self, polarity: Polarity, truthy: bool) -> &'static str {
        match polarity {
            Polarity::Include => match self {
                FilterOp::Eq => "=",
                FilterOp::Gt => ">",
                FilterOp::Gte => ">=",
                FilterOp::Lt => "<",
                FilterOp::Lte => "<=",
                FilterOp::Like => "LIKE",
                FilterOp::In => "IN",
                FilterOp::IsNull => {
                    if truthy {
                        "IS NULL"
                    } else {
                        "IS NOT NULL"
                    }
                }
                FilterOp::Between => "BETWEEN",
            },
            Polarity::Exclude => match self {
                FilterOp::Eq => "!=",
                FilterOp::Gt => "<=",
                FilterOp::Gte => "<",
                FilterOp::Lt => ">=",
                FilterOp::Lte => ">",
                FilterOp::Like => "NOT LIKE",
                FilterOp::In => "NOT IN",
                FilterOp::IsNull => {
                    if truthy {
                        "IS NOT NULL"
                    } else {
                        "IS NULL"
                    }
                }
                FilterOp::Between => "NOT BETWEEN",
            },
        }
    }
}
