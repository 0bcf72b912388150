//! Filesystem helpers

use std::fs;
use std::path::Path;

use log::{error, info};

/// Make sure `path` is a directory, creating it (and parents) when missing.
///
/// Returns false only when the directory could not be created.
pub fn ensure_dir_exists(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }

    match fs::create_dir_all(path) {
        Ok(_) => {
            info!("Created directory: {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to create directory {}: {}", path.display(), e);
            false
        }
    }
}

/// File name component of `path` as an owned string, empty when it has none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/logs");
        assert!(ensure_dir_exists(&nested));
        assert!(nested.is_dir());
        assert!(ensure_dir_exists(&nested));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(
            file_name_of(Path::new("/var/logs/mail_log_2024-05-06.xlsx")),
            "mail_log_2024-05-06.xlsx"
        );
        assert_eq!(file_name_of(Path::new("/")), "");
    }
}
