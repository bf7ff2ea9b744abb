//! Asset tree copy.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Copies the assets folder into the generated project.
#[cfg_attr(test, mockall::automock)]
pub trait AssetCopier {
    /// Copy the tree at `src` into `dst`, returning the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or read, or a file
    /// cannot be copied.
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<usize>;
}

/// [`AssetCopier`] backed by the real filesystem.
#[derive(Debug, Clone, Default)]
pub struct SystemAssetCopier {
    skip: Vec<String>,
}

impl SystemAssetCopier {
    /// Create a copier that skips entries with any of the given names.
    #[must_use]
    pub const fn new(skip: Vec<String>) -> Self {
        Self { skip }
    }
}

impl AssetCopier for SystemAssetCopier {
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<usize> {
        copy_dir_recursive(src, dst, &self.skip)
    }
}

/// Recursively copy a directory tree, returning the number of files copied.
///
/// Symlinks within the source tree are *followed*, so linked directories
/// are materialised in the copy.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path, skip: &[String]) -> Result<usize> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    let mut entries = std::fs::read_dir(src)
        .with_context(|| format!("reading directory {}", src.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("reading entry in {}", src.display()))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut copied = 0;
    for entry in entries {
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip.iter().any(|s| s == name))
        {
            continue;
        }
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dst_path, skip)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn copies_files_and_subdirectories() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        std::fs::write(src.path().join("a.css"), b"aaa").unwrap();
        std::fs::create_dir(src.path().join("img")).unwrap();
        std::fs::write(src.path().join("img/b.png"), b"bbb").unwrap();

        let target = dst.path().join("public/assets");
        let count = SystemAssetCopier::default()
            .copy_tree(src.path(), &target)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(std::fs::read(target.join("a.css")).unwrap(), b"aaa");
        assert_eq!(std::fs::read(target.join("img/b.png")).unwrap(), b"bbb");
    }

    #[test]
    fn skips_named_entries() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        std::fs::write(src.path().join("app.js"), b"content").unwrap();
        std::fs::create_dir(src.path().join("node_modules")).unwrap();
        std::fs::write(src.path().join("node_modules/x.js"), b"x").unwrap();

        let target = dst.path().join("out");
        let count = SystemAssetCopier::new(vec!["node_modules".to_string()])
            .copy_tree(src.path(), &target)
            .unwrap();

        assert_eq!(count, 1);
        assert!(target.join("app.js").exists());
        assert!(
            !target.join("node_modules").exists(),
            "skipped directory should not be copied"
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        let dst = tempfile::tempdir().unwrap();
        let result =
            SystemAssetCopier::default().copy_tree(&dst.path().join("nope"), &dst.path().join("out"));
        assert!(result.is_err());
    }
}
