//! Miscellaneous helper functions and aliases.

pub type TooltipHashMap<K, V> = ahash::HashMap<K, V>;
pub type TooltipHashSet<T> = ahash::HashSet<T>;

/// Quote a string for output in KeyValues syntax.
pub fn kv_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
