use std::path::{Path, MAIN_SEPARATOR};

/// Values accepted as "on" for boolean preferences.
pub const TRUTHY: [&str; 5] = ["true", "t", "y", "yes", "1"];

pub fn is_truthy(value: &str) -> bool {
    let value = value.to_lowercase();
    TRUTHY.contains(&value.as_str())
}

/// Remove `root + separator` from the front of `path` once, if present.
///
/// This is a plain string operation; neither side is normalised.
pub fn strip_root_prefix(path: &str, root: &Path) -> String {
    let prefix = format!("{}{}", root.display(), MAIN_SEPARATOR);
    match path.strip_prefix(prefix.as_str()) {
        Some(rest) => rest.to_string(),
        None => path.to_string(),
    }
}
