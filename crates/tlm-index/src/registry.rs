//! Enumerates known dataset ids by listing `BASE/data/full/`.
//!
//! A dataset always has a `full/` directory once any `put` has succeeded
//! (ingest always fans out to every tier), so the full-fidelity root alone
//! is sufficient to answer `datasets()`.

use std::fs;
use std::path::Path;

/// List dataset ids under `full_root` whose name contains `query` as a
/// substring, truncated to at most `max`. Returns an empty list if
/// `full_root` does not exist yet.
pub fn list_datasets(full_root: &Path, query: &str, max: usize) -> Vec<String> {
    let entries = match fs::read_dir(full_root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(|s| s.to_string()) else {
            continue;
        };
        if name.contains(query) {
            out.push(name);
        }
        if out.len() >= max {
            break;
        }
    }
    out
}
