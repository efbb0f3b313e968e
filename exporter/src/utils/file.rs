//! Path helpers for config file lookup

use std::path::PathBuf;

/// Expand a config path given on the command line to an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths resolve
/// against the current working directory; absolute paths pass through.
///
/// ```text
/// expand_path("~/.mongo-exporter/mongo-exporter.json") // -> /home/user/.mongo-exporter/...
/// expand_path("exporter.json")                         // -> /current/dir/exporter.json
/// expand_path("/etc/mongo-exporter.json")              // -> unchanged
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(
            expand_path("/etc/mongo-exporter.json"),
            PathBuf::from("/etc/mongo-exporter.json")
        );
    }

    #[test]
    fn test_expand_path_relative() {
        let result = expand_path("exporter.json");
        assert!(result.is_absolute());
        assert_eq!(result, std::env::current_dir().unwrap().join("exporter.json"));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /tmp/a.json "), PathBuf::from("/tmp/a.json"));
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        assert_eq!(expand_path(""), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(
                expand_path("~/.mongo-exporter/mongo-exporter.json"),
                home.join(".mongo-exporter/mongo-exporter.json")
            );
        }
    }

    #[test]
    fn test_expand_path_tilde_user_not_expanded() {
        let result = expand_path("~other/file.json");
        assert!(result.ends_with("~other/file.json"));
    }
}
