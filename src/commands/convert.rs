//! Command: convert an HTML folder into a framework project.
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Settings;
use crate::emit::{self, EmitRequest};
use crate::error::EmitError;
use crate::logging::Logger;
use crate::profiles;

/// Run a conversion from parsed command-line arguments.
///
/// # Errors
///
/// Returns an error if the target is unknown, the settings cannot be loaded,
/// the run fails, or any output file could not be written.
pub fn run(args: &Cli, log: &Logger) -> Result<()> {
    let project_name = args
        .project_name
        .as_deref()
        .ok_or_else(|| anyhow!("missing project name"))?;
    let target = args
        .target
        .as_deref()
        .ok_or_else(|| anyhow!("missing target"))?;
    let profile = profiles::lookup(target)?;
    log.debug(&format!("target: {}", profile.name));

    let source_root = args.src.clone();
    let assets_root = resolve_assets(&args.src, &args.assets);
    let output_root = args.out.join(project_name);

    let version = option_env!("TRANSPILEX_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("transpilex {version}"));
    log.debug(&format!("source: {}", source_root.display()));
    log.debug(&format!("assets: {}", assets_root.display()));
    log.debug(&format!("output: {}", output_root.display()));

    let settings = Settings::load(args.config.as_deref(), &source_root).map_err(EmitError::from)?;

    let request = EmitRequest {
        project_name: project_name.to_string(),
        source_root,
        assets_root,
        output_root,
        target: target.to_string(),
        without_gulp: args.no_gulp,
        settings,
    };

    let report = emit::emit(&request, log)?;
    log.print_summary();
    log.info(&format!(
        "{} page(s), {} partial(s), {} asset file(s), {} manifest(s) written, {} patched",
        report.pages,
        report.partials,
        report.assets_copied,
        report.manifests_written,
        report.manifests_patched
    ));

    if !report.is_complete() {
        return Err(EmitError::Incomplete {
            failed: report.failed.len(),
        }
        .into());
    }

    log.info(&format!(
        "project ready at {}",
        report.output_root.display()
    ));
    Ok(())
}

/// Resolve `--assets`: absolute paths are used as given; relative ones are
/// looked up inside the source folder first, then relative to the working
/// directory.
#[must_use]
pub fn resolve_assets(src: &Path, assets: &Path) -> PathBuf {
    if assets.is_absolute() {
        return assets.to_path_buf();
    }
    let inside_source = src.join(assets);
    if inside_source.is_dir() || !assets.is_dir() {
        inside_source
    } else {
        assets.to_path_buf()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn assets_inside_source_win() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("html");
        fs::create_dir_all(src.join("assets")).unwrap();
        assert_eq!(resolve_assets(&src, Path::new("assets")), src.join("assets"));
    }

    #[test]
    fn absolute_assets_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("html");
        let assets = dir.path().join("static");
        fs::create_dir_all(&assets).unwrap();
        assert_eq!(resolve_assets(&src, &assets), assets);
    }

    #[test]
    fn missing_assets_resolve_inside_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("html");
        assert_eq!(
            resolve_assets(&src, Path::new("does-not-exist")),
            src.join("does-not-exist")
        );
    }
}
