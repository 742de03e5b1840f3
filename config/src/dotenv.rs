//! Minimal `.env` parsing: `KEY=VALUE` lines, `#` comments, optional quotes.

use std::collections::HashMap;
use std::path::Path;

/// Reads `.env` from `override_dir` (or the current directory) into a map.
/// A missing file yields an empty map; only read errors are reported.
pub(crate) fn load_env_map(
    override_dir: Option<&Path>,
) -> Result<HashMap<String, String>, std::io::Error> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let path = dir.join(".env");
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(parse(&text))
}

fn parse(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        map.insert(key.to_string(), value.to_string());
    }
    map
}
