//! Source discovery.
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::classify::{PartialRule, Role, classify, depth};
use crate::config::DiscoverSettings;
use crate::error::EmitError;

/// One HTML file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the source root; identity of the document.
    pub relative_path: PathBuf,
    /// Raw file content.
    pub content: String,
    /// Page or partial.
    pub role: Role,
    /// Number of parent directories in `relative_path`.
    pub depth: usize,
}

impl SourceDocument {
    /// Directory of the document as `/`-free segments relative to the source root.
    #[must_use]
    pub fn dir_segments(&self) -> Vec<String> {
        self.relative_path
            .parent()
            .map(|p| {
                p.iter()
                    .filter_map(|s| s.to_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Collect the relative paths of all HTML sources, sorted.
///
/// Directories listed in `exclude` (absolute, canonical) and names ignored by
/// `settings` are not descended into.
///
/// # Errors
///
/// Returns [`EmitError::SourceRead`] if a directory cannot be listed.
pub fn source_paths(
    source_root: &Path,
    settings: &DiscoverSettings,
    exclude: &[PathBuf],
) -> Result<Vec<PathBuf>, EmitError> {
    let walker = WalkDir::new(source_root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let ignored = entry
            .file_name()
            .to_str()
            .is_some_and(|name| settings.ignores(name));
        let excluded = entry.file_type().is_dir() && exclude.iter().any(|x| x == entry.path());
        !(ignored || excluded)
    });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| EmitError::SourceRead {
            path: err
                .path()
                .map_or_else(|| source_root.to_path_buf(), Path::to_path_buf),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() || !settings.accepts(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(source_root) {
            paths.push(relative.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and classify documents one at a time, in the order given.
pub fn read_documents<'a>(
    source_root: &'a Path,
    paths: Vec<PathBuf>,
    rule: &'a PartialRule,
) -> impl Iterator<Item = Result<SourceDocument, EmitError>> + 'a {
    paths.into_iter().map(move |relative_path| {
        let full = source_root.join(&relative_path);
        let content = fs::read_to_string(&full)
            .map_err(|source| EmitError::SourceRead { path: full, source })?;
        Ok(SourceDocument {
            role: classify(&relative_path, rule),
            depth: depth(&relative_path),
            relative_path,
            content,
        })
    })
}

/// Discover, read and classify every HTML source under `source_root`.
///
/// # Errors
///
/// Returns [`EmitError::SourceRead`] for the first directory or file that
/// cannot be read.
pub fn discover(
    source_root: &Path,
    settings: &DiscoverSettings,
    rule: &PartialRule,
    exclude: &[PathBuf],
) -> Result<Vec<SourceDocument>, EmitError> {
    let paths = source_paths(source_root, settings, exclude)?;
    read_documents(source_root, paths, rule).collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_html_sorted_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.html", "b");
        write(dir.path(), "a/index.html", "ai");
        write(dir.path(), "a-index.html", "a-");
        write(dir.path(), "notes.txt", "x");
        write(dir.path(), "legacy.htm", "l");

        let paths = source_paths(dir.path(), &DiscoverSettings::default(), &[]).unwrap();
        assert_eq!(
            paths,
            ["a/index.html", "a-index.html", "b.html", "legacy.htm"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn skips_ignored_and_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", "i");
        write(dir.path(), "node_modules/pkg/readme.html", "x");
        write(dir.path(), "assets/docs/guide.html", "x");

        let exclude = vec![dir.path().join("assets")];
        let paths = source_paths(dir.path(), &DiscoverSettings::default(), &exclude).unwrap();
        assert_eq!(paths, vec![PathBuf::from("index.html")]);
    }

    #[test]
    fn ignored_name_as_root_is_still_walked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist");
        write(&root, "index.html", "i");
        let paths = source_paths(&root, &DiscoverSettings::default(), &[]).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn documents_carry_role_and_depth() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pages/about.html", "<h1>About</h1>");
        write(dir.path(), "partials/header.html", "<header/>");

        let docs = discover(
            dir.path(),
            &DiscoverSettings::default(),
            &PartialRule::default(),
            &[],
        )
        .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].relative_path, PathBuf::from("pages/about.html"));
        assert_eq!(docs[0].role, Role::Page);
        assert_eq!(docs[0].depth, 1);
        assert_eq!(docs[0].content, "<h1>About</h1>");
        assert_eq!(docs[0].dir_segments(), vec!["pages".to_string()]);
        assert_eq!(docs[1].role, Role::Partial);
    }

    #[test]
    fn unreadable_file_is_a_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.html"), [0xff, 0xfe, 0x00]).unwrap();
        let err = discover(
            dir.path(),
            &DiscoverSettings::default(),
            &PartialRule::default(),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, EmitError::SourceRead { .. }));
    }
}
