/// Persisted top-10 leaderboard.
///
/// One JSON file holding at most `MAX_ENTRIES` `{name, score}` objects,
/// sorted descending by score.  Read-side failures (missing file, malformed
/// JSON) are treated as "no data"; write failures are propagated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub score: u32,
}

pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pigeon_patrol_scores.json")
}

/// Read the persisted list.  Missing or unparseable data yields an empty
/// list rather than an error.
pub fn load(path: &Path) -> Vec<Entry> {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

/// Append an entry, keep the list score-descending (stable sort, so ties
/// stay in submission order), truncate to the top 10, and persist.
/// Returns the list as written.
pub fn save_score(path: &Path, name: &str, score: u32) -> io::Result<Vec<Entry>> {
    let mut entries = load(path);
    entries.push(Entry { name: name.to_string(), score });
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
    let json = serde_json::to_string_pretty(&entries).map_err(io::Error::from)?;
    fs::write(path, json)?;
    Ok(entries)
}
