// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tokio::fs;

/// Temporary directories used for testing.
///
/// Automatically cleans up all created directories when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// State directory for database files.
    pub state_dir: PathBuf,
    /// Directory for exported bundles.
    pub export_dir: PathBuf,
}

impl TempDirs {
    /// Creates new temporary directories for testing.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();

        let state_dir = base.join("state");
        let export_dir = base.join("export");

        fs::create_dir_all(&state_dir).await?;
        fs::create_dir_all(&export_dir).await?;

        Ok(Self {
            state_dir,
            export_dir,
        })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        self.state_dir
            .parent()
            .expect("temp directories should have a parent")
            .to_path_buf()
    }
}

/// Sets up temporary directories for integration tests.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        let base = self.base();
        if let Err(e) = std::fs::remove_dir_all(&base) {
            tracing::warn!(path = %base.display(), err = %e, "failed to clean up temp directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_dirs_share_parent() {
        let dirs = TempDirs::new().await.unwrap();
        assert!(dirs.state_dir.is_dir());
        assert!(dirs.export_dir.is_dir());
        assert_eq!(dirs.state_dir.parent(), dirs.export_dir.parent());
    }

    #[tokio::test]
    async fn temp_dirs_cleanup_on_drop() {
        let base = {
            let dirs = TempDirs::new().await.unwrap();
            dirs.base()
        };
        assert!(!base.exists());
    }
}
