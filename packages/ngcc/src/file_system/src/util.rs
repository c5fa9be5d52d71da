use once_cell::sync::Lazy;
use regex::Regex;

static JS_DTS_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.d\.ts$|\.js$|\.mjs$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a `.js`, `.mjs` or `.d.ts` extension from a file name.
pub fn strip_js_extension(path: &str) -> String {
    JS_DTS_EXTENSION.replace(path, "").to_string()
}

/// Compute the path of `target` relative to the directory `base`.
///
/// Falls back to `..` segments when `target` is not below `base`.
pub fn relative_path(base: &str, target: &str) -> String {
    let base = clean_path(base);
    let target_clean = clean_path(target);
    let base_segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let target_segments: Vec<&str> = target_clean.split('/').filter(|s| !s.is_empty()).collect();

    let common = base_segments
        .iter()
        .zip(target_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..base_segments.len() {
        segments.push("..");
    }
    segments.extend(&target_segments[common..]);
    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Normalize a path to POSIX form, collapsing `.` and `..` segments.
///
/// Relative input stays relative; absolute input stays absolute.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);
    let is_absolute = normalized.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            if segments.last().is_some_and(|s| *s != "..") {
                segments.pop();
            } else if !is_absolute {
                segments.push(segment);
            }
        } else {
            segments.push(segment);
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}
