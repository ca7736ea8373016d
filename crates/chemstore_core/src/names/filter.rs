//! Synonym filter applied before compounds reach storage.
//!
//! # Invariants
//! - Output never contains non-string inputs.
//! - Output never contains a run of 2+ digits or the `", "` separator.
//! - Output is duplicate-free and sorted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

// Registry numbers (CAS, EINECS, NSC ...) and composite "a, b" names.
static REJECTED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2,}|, ").expect("valid rejected name regex"));

/// Normalizes raw synonym values into a deduplicated name list.
///
/// # Contract
/// - Non-string values are dropped.
/// - Strings matching `\d{2,}` or containing `", "` are dropped.
/// - One pair of wrapping double quotes is removed.
/// - Names that end up empty are dropped.
/// - The result is deduplicated; order is lexicographic, not input order.
pub fn filter_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Value>,
{
    names
        .into_iter()
        .filter_map(Value::as_str)
        .filter(|name| !REJECTED_NAME_RE.is_match(name))
        .map(strip_wrapping_quotes)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn strip_wrapping_quotes(name: &str) -> &str {
    if !(name.starts_with('"') && name.ends_with('"')) {
        return name;
    }
    // A lone `"` both starts and ends with a quote.
    if name.len() < 2 {
        return "";
    }
    &name[1..name.len() - 1]
}
