//! Whitespace-insensitive expression equivalence.
//!
//! Two expressions are equivalent when they tokenize to the same sequence
//! of whitespace-separated tokens. No query-language semantics are applied:
//! `a>1` and `a > 1` are different expressions.

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// ```
/// use rulediff_core::normalize::normalize_expression;
///
/// assert_eq!(normalize_expression("  rate(x[5m])\n\t> 1 "), "rate(x[5m]) > 1");
/// ```
pub fn normalize_expression(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True iff `normalize_expression(a) == normalize_expression(b)`.
///
/// Compares token streams directly instead of allocating both normalized
/// strings; tokens never contain whitespace, so the two are the same test.
pub fn expressions_equivalent(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}
