//! Hands a file to the operating system's default application

use crate::error::{ExplorerError, Result};
use std::path::Path;

/// Launches the default application for `path` without waiting for it.
///
/// The child process is detached: its output is not captured and its exit
/// status is never collected.
pub fn open_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ExplorerError::OpenError {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }

    open::that_detached(path).map_err(|e| ExplorerError::OpenError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), "Opened with system application");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = open_file(Path::new("/nonexistent/cours.pdf")).unwrap_err();
        match err {
            ExplorerError::OpenError { path, reason } => {
                assert_eq!(path, Path::new("/nonexistent/cours.pdf"));
                assert!(reason.contains("does not exist"));
            }
            other => panic!("Expected OpenError, got {:?}", other),
        }
    }
}
