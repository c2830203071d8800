//! Deterministic cache keys.

use std::fmt::Display;

/// Build the cache key for `base` called with `params`.
///
/// Returns `base` unchanged when there are no parameters, otherwise
/// `base(k1:v1,k2:v2,...)` with pairs sorted by key and then value, so the
/// caller's iteration order never changes the key.
pub fn cache_key<I, K, V>(base: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    if pairs.is_empty() {
        return base.to_string();
    }
    pairs.sort();

    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("{base}({joined})")
}
