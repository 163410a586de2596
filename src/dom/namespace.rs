//! Namespace prefix handling
//!
//! Qualified names (`schema:name`) are kept for tag matching; column names
//! use the local part only.

/// Split a qualified name into (prefix, local name)
#[inline]
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Local part of a qualified name: everything after the first ':'
#[inline]
pub fn strip_namespace(name: &str) -> &str {
    split_name(name).1
}
