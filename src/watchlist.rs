//! Watchlist parsing and URL matching

/// Upper bound on the number of watchlist entries kept from the store
pub const MAX_WATCHLIST_ENTRIES: usize = 1000;

/// Split the stored newline-separated list into trimmed, non-empty, unique entries
pub fn parse_url_list(url_list: Option<&str>) -> Vec<String> {
    let Some(url_list) = url_list else {
        return Vec::new();
    };

    let mut entries: Vec<String> = Vec::new();
    for entry in url_list.lines().map(str::trim).filter(|e| !e.is_empty()) {
        if entries.len() >= MAX_WATCHLIST_ENTRIES {
            break;
        }
        if !entries.iter().any(|existing| existing == entry) {
            entries.push(entry.to_string());
        }
    }
    entries
}

/// Decide whether `current_url` is tracked.
///
/// Matching is a case-insensitive substring test. Entries that are blank after
/// trimming never match, otherwise they would match every URL.
pub fn is_tracked(current_url: &str, watchlist: &[String], enabled: bool) -> bool {
    if !enabled {
        return false;
    }

    let current_url = current_url.to_lowercase();
    watchlist
        .iter()
        .map(|entry| entry.trim().to_lowercase())
        .any(|entry| !entry.is_empty() && current_url.contains(&entry))
}
