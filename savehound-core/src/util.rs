use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Words that carry no identifying signal in a game title.
const STOPWORDS: &[&str] = &[
    "the", "and", "or", "of", "a", "an", "in", "on", "at", "to", "for", "with", "by",
];

/// Lowercase `text`, turn every non-alphanumeric character into a space and
/// collapse runs of whitespace.
///
/// `"Baldur's Gate 3: Deluxe"` becomes `"baldur s gate 3 deluxe"`.
pub fn normalize_text(text: &str) -> String {
    let mapped: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized whitespace-separated tokens of `text`.
pub fn tokens(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinctive keywords of a game title, in title order without duplicates.
///
/// Drops stopwords and tokens shorter than three characters. Titles made up
/// entirely of such tokens ("Ys", "The Go") fall back to every token so the
/// keyword set is never empty for a non-empty title.
pub fn keywords(title: &str) -> Vec<String> {
    let all = tokens(title);
    let mut out: Vec<String> = Vec::new();
    for t in &all {
        if t.chars().count() >= 3 && !STOPWORDS.contains(&t.as_str()) && !out.contains(t) {
            out.push(t.clone());
        }
    }
    if out.is_empty() {
        for t in all {
            if !out.contains(&t) {
                out.push(t);
            }
        }
    }
    out
}

/// Resolve `.` and `..` components lexically, without touching the filesystem.
///
/// Two spellings of the same directory (`/a/./b/`, `/a/c/../b`) normalize to
/// the same `PathBuf`, which is what candidate merging keys on.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Number of normal components in `path` (its depth below the filesystem root).
pub fn path_depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Human description of how long ago something was modified.
///
/// Returns `None` past 30 days, where the age stops being interesting.
pub fn format_age(age: Duration) -> Option<String> {
    let days = age.as_secs() / 86_400;
    match days {
        0 => Some("modified today".to_string()),
        1 => Some("modified 1 day ago".to_string()),
        2..30 => Some(format!("modified {days} days ago")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Cyberpunk 2077"), "cyberpunk 2077");
        assert_eq!(normalize_text("  Baldur's Gate 3: "), "baldur s gate 3");
        assert_eq!(normalize_text("DARK SOULS™ III"), "dark souls iii");
        assert_eq!(normalize_text("---"), "");
    }

    #[test]
    fn test_keywords_drop_stopwords_and_short_tokens() {
        assert_eq!(
            keywords("The Witcher 3: Wild Hunt"),
            vec!["witcher", "wild", "hunt"]
        );
        assert_eq!(keywords("Cyberpunk 2077"), vec!["cyberpunk", "2077"]);
    }

    #[test]
    fn test_keywords_fallback() {
        assert_eq!(keywords("Ys"), vec!["ys"]);
        assert_eq!(keywords("Go Go Go"), vec!["go"]);
        assert!(keywords("!!").is_empty());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize_path(Path::new("/a/c/../b")), PathBuf::from("/a/b"));
        assert_eq!(path_depth(Path::new("/a/b/c")), 3);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(60)).as_deref(), Some("modified today"));
        assert_eq!(
            format_age(Duration::from_secs(3 * 86_400)).as_deref(),
            Some("modified 3 days ago")
        );
        assert_eq!(format_age(Duration::from_secs(40 * 86_400)), None);
    }

    #[test]
    fn test_format_bytes_approx() {
        assert_eq!(format_bytes_approx(512), "512 B");
        assert_eq!(format_bytes_approx(1536), "1.5 KB");
    }
}
