// Shared helpers for integration tests.
//
// Provides a temporary HTML theme on disk and a fluent builder so each
// integration test can describe its sources without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use transpilex::cli::Cli;
use walkdir::WalkDir;

/// An isolated theme backed by a [`tempfile::TempDir`].
///
/// Layout: `<root>/html` holds the sources (with `html/assets`), and
/// `<root>/out` receives generated projects.
pub struct IntegrationTestContext {
    /// Temporary directory containing the theme and the output folder.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with an empty `html/assets` folder.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("html/assets")).expect("create assets dir");
        std::fs::create_dir_all(root.path().join("out")).expect("create out dir");
        Self { root }
    }

    /// Source folder.
    pub fn src(&self) -> PathBuf {
        self.root.path().join("html")
    }

    /// Generated project folder for `project`.
    pub fn project(&self, project: &str) -> PathBuf {
        self.root.path().join("out").join(project)
    }

    /// Parse a command line for `project` and `target` pointing at this theme.
    pub fn cli(&self, project: &str, target: &str) -> Cli {
        self.cli_with(project, target, &[])
    }

    /// Like [`Self::cli`], with extra flags appended.
    pub fn cli_with(&self, project: &str, target: &str, extra: &[&str]) -> Cli {
        let mut args: Vec<OsString> = vec![
            "transpilex".into(),
            project.into(),
            target.into(),
            "--src".into(),
            self.src().into_os_string(),
            "--out".into(),
            self.root.path().join("out").into_os_string(),
        ];
        args.extend(extra.iter().map(OsString::from));
        Cli::parse_from(args)
    }
}

/// Read every file under `root` into a map keyed by `/`-separated relative path.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.expect("walk output"))
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .expect("inside root")
                .iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (rel, std::fs::read(e.path()).expect("read output file"))
        })
        .collect()
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty theme.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `html/<path>`, creating parent folders.
    pub fn with_source(self, path: &str, content: &str) -> Self {
        let full = self.ctx.src().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&full, content).expect("write source file");
        self
    }

    /// Write `content` to `html/assets/<path>`.
    pub fn with_asset(self, path: &str, content: &str) -> Self {
        self.with_source(&format!("assets/{path}"), content)
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
