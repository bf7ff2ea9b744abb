//! Conversion run orchestration.
//!
//! An [`Emitter`] drives one run through [`RunState`]: resolve the target,
//! discover and plan every document, refuse colliding destinations, then
//! write views, copy assets and write or patch manifests. Fatal problems
//! return an [`EmitError`] before anything is written; per-file problems are
//! collected in the [`EmissionReport`] and the run carries on.

pub mod assets;
pub mod discover;
pub mod manifest;
pub mod plan;
pub mod report;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::classify::Role;
use crate::config::Settings;
use crate::error::{EmitError, FileWriteError, ManifestPatchError};
use crate::logging::{EntryStatus, Log};
use crate::profiles::{ManifestTemplate, TargetProfile, lookup};
use crate::rewrite::AssetRule;

pub use assets::{AssetCopier, SystemAssetCopier};
pub use discover::SourceDocument;
pub use manifest::TemplateVars;
pub use plan::EmissionPlan;
pub use report::{EmissionReport, RunState};

/// Inputs of one conversion run.
#[derive(Debug, Clone)]
pub struct EmitRequest {
    /// Name of the generated project.
    pub project_name: String,
    /// Folder holding the HTML sources.
    pub source_root: PathBuf,
    /// Folder holding the static assets.
    pub assets_root: PathBuf,
    /// Project root every output path is relative to.
    pub output_root: PathBuf,
    /// Target key as typed by the user.
    pub target: String,
    /// Leave out gulp build files.
    pub without_gulp: bool,
    /// Loaded settings.
    pub settings: Settings,
}

/// Runs a conversion and tracks its state.
pub struct Emitter<'a> {
    log: &'a dyn Log,
    copier: &'a dyn AssetCopier,
    state: RunState,
}

impl fmt::Debug for Emitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> Emitter<'a> {
    /// Create an emitter logging to `log` and copying assets with `copier`.
    #[must_use]
    pub fn new(log: &'a dyn Log, copier: &'a dyn AssetCopier) -> Self {
        Self {
            log,
            copier,
            state: RunState::Initialized,
        }
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> &RunState {
        &self.state
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// Returns an [`EmitError`] for an unknown target, a missing source or
    /// assets folder, an unreadable source file, or colliding destinations.
    /// None of these leave any output behind. Per-file write failures do not
    /// error here; they are listed in [`EmissionReport::failed`].
    pub fn run(&mut self, request: &EmitRequest) -> Result<EmissionReport, EmitError> {
        let result = self.execute(request);
        if let Err(err) = &result {
            self.transition(RunState::Failed(err.to_string()));
        }
        result
    }

    fn transition(&mut self, next: RunState) {
        self.log.debug(&format!("run state: {} -> {next}", self.state));
        self.state = next;
    }

    fn execute(&mut self, request: &EmitRequest) -> Result<EmissionReport, EmitError> {
        let profile = lookup(&request.target)?;
        self.transition(RunState::TargetResolved);
        self.log.stage(&format!(
            "Converting {} to {}",
            request.project_name, profile.name
        ));

        let source_root = canonical_dir(&request.source_root, "source")?;
        let assets_root = canonical_dir(&request.assets_root, "assets")?;
        let asset_rule = AssetRule::new(
            &assets_prefix(&source_root, &assets_root),
            profile.asset_url,
        );

        let mut exclude = vec![assets_root.clone()];
        if let Ok(output) = dunce::canonicalize(&request.output_root) {
            exclude.push(output);
        }

        let settings = &request.settings;
        let documents = discover::discover(
            &source_root,
            &settings.discover,
            &settings.classify,
            &exclude,
        )?;
        self.transition(RunState::Discovered);
        self.log.info(&format!(
            "found {} HTML file(s) in {}",
            documents.len(),
            source_root.display()
        ));

        let plans: Vec<EmissionPlan> = documents
            .iter()
            .map(|doc| plan::plan_document(doc, profile, &settings.classify, &asset_rule))
            .collect();
        self.transition(RunState::Planned);

        plan::check_collisions(&plans)?;
        self.transition(RunState::CollisionChecked);

        let mut report = EmissionReport::new(profile.key, request.output_root.clone());

        self.log.stage("Writing views");
        for plan in &plans {
            self.write_plan(plan, &mut report);
        }
        self.transition(RunState::Written);
        self.log.info(&format!(
            "{} page(s), {} partial(s)",
            report.pages, report.partials
        ));

        self.log.stage("Copying assets");
        self.copy_assets(&assets_root, profile, &mut report);

        self.log.stage("Writing manifests");
        let mut vars = TemplateVars::new(&request.project_name, profile);
        vars.without_gulp = request.without_gulp;
        let source_package = self.read_source_package(&source_root);
        for manifest in profile.manifests {
            if request.without_gulp && manifest.gulp_only {
                self.log.debug(&format!("skipping {} (--no-gulp)", manifest.path));
                continue;
            }
            self.apply_manifest(manifest, &vars, source_package.as_ref(), &mut report);
        }

        let next = if report.failed.is_empty() {
            RunState::Finalized
        } else {
            RunState::Failed(format!(
                "{} file(s) could not be written",
                report.failed.len()
            ))
        };
        self.transition(next);
        report.state = self.state.clone();
        Ok(report)
    }

    fn write_plan(&self, plan: &EmissionPlan, report: &mut EmissionReport) {
        let name = display_path(&plan.destination);
        match write_file(&report.output_root, &plan.destination, &plan.content) {
            Ok(()) => {
                self.log.debug(&format!(
                    "{} {} -> {name}",
                    plan.role.label(),
                    display_path(&plan.source)
                ));
                self.log.record_entry(&name, EntryStatus::Written, None);
                match plan.role {
                    Role::Page => report.pages += 1,
                    Role::Partial => report.partials += 1,
                }
                report.written.push(plan.destination.clone());
            }
            Err(err) => self.record_failure(&name, err, report),
        }
    }

    fn copy_assets(&self, assets_root: &Path, profile: &TargetProfile, report: &mut EmissionReport) {
        let destination = report.output_root.join(profile.static_root);
        match self.copier.copy_tree(assets_root, &destination) {
            Ok(count) => {
                report.assets_copied = count;
                self.log
                    .info(&format!("{count} asset file(s) copied to {}", profile.static_root));
            }
            Err(err) => {
                let failure = FileWriteError {
                    path: destination,
                    source: io::Error::other(format!("{err:#}")),
                };
                self.record_failure(profile.static_root, failure, report);
            }
        }
    }

    fn read_source_package(&self, source_root: &Path) -> Option<Value> {
        let path = source_root.join("package.json");
        let text = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                self.log
                    .warn(&format!("ignoring invalid {}: {e}", path.display()));
                None
            }
        }
    }

    fn apply_manifest(
        &self,
        manifest: &ManifestTemplate,
        vars: &TemplateVars,
        source_package: Option<&Value>,
        report: &mut EmissionReport,
    ) {
        let relative = Path::new(manifest.path);
        let full = report.output_root.join(relative);
        let existing = match fs::read_to_string(&full) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                let failure = FileWriteError { path: full, source };
                self.record_failure(manifest.path, failure, report);
                return;
            }
        };

        let content = match manifest::manifest_content(
            &manifest.kind,
            vars,
            source_package,
            existing.as_deref(),
        ) {
            Ok(content) => content,
            Err(reason) => {
                self.log
                    .warn(&format!("leaving {} untouched: {reason}", manifest.path));
                self.log
                    .record_entry(manifest.path, EntryStatus::Skipped, Some(&reason));
                report.skipped.push(ManifestPatchError {
                    path: relative.to_path_buf(),
                    reason,
                });
                return;
            }
        };

        match write_file(&report.output_root, relative, &content) {
            Ok(()) => {
                if existing.is_some() {
                    report.manifests_patched += 1;
                    self.log
                        .record_entry(manifest.path, EntryStatus::Patched, None);
                } else {
                    report.manifests_written += 1;
                    self.log
                        .record_entry(manifest.path, EntryStatus::Written, None);
                }
                report.written.push(relative.to_path_buf());
            }
            Err(err) => self.record_failure(manifest.path, err, report),
        }
    }

    fn record_failure(&self, name: &str, err: FileWriteError, report: &mut EmissionReport) {
        self.log.error(&err.to_string());
        let reason = err.source.to_string();
        self.log
            .record_entry(name, EntryStatus::Failed, Some(&reason));
        report.failed.push(err);
    }
}

/// Run a conversion with the filesystem asset copier.
///
/// # Errors
///
/// See [`Emitter::run`].
pub fn emit(request: &EmitRequest, log: &dyn Log) -> Result<EmissionReport, EmitError> {
    let copier = SystemAssetCopier::new(request.settings.discover.ignore.clone());
    Emitter::new(log, &copier).run(request)
}

fn canonical_dir(path: &Path, role: &'static str) -> Result<PathBuf, EmitError> {
    match dunce::canonicalize(path) {
        Ok(canonical) if canonical.is_dir() => Ok(canonical),
        _ => Err(EmitError::SourceNotFound {
            role,
            path: path.to_path_buf(),
        }),
    }
}

/// Assets root relative to the source root, or its folder name when it
/// lives elsewhere.
fn assets_prefix(source_root: &Path, assets_root: &Path) -> String {
    assets_root
        .strip_prefix(source_root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .map(display_path)
        .or_else(|| {
            assets_root
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

fn write_file(root: &Path, relative: &Path, content: &str) -> Result<(), FileWriteError> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FileWriteError {
            path: path.clone(),
            source,
        })?;
    }
    fs::write(&path, content).map_err(|source| FileWriteError { path, source })
}

/// `/`-separated rendering of a relative path.
fn display_path(path: &Path) -> String {
    path.iter()
        .filter_map(|s| s.to_str())
        .collect::<Vec<_>>()
        .join("/")
}
