//! Run settings loaded from `transpilex.toml`.
//!
//! Every key is optional; an absent file behaves like an empty one.
//!
//! ```toml
//! [classify]
//! partial_dirs = ["partials", "includes", "layouts"]
//! partial_prefixes = ["_"]
//!
//! [discover]
//! extensions = ["html", "htm"]
//! ignore = ["node_modules", ".git", "dist"]
//! ```
pub mod toml_loader;

use std::path::Path;

use serde::Deserialize;

use crate::classify::PartialRule;
use crate::error::ConfigError;

/// Name of the settings file looked up inside the source folder.
pub const SETTINGS_FILE: &str = "transpilex.toml";

/// All tunables of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Page/partial heuristic.
    pub classify: PartialRule,
    /// Source discovery.
    pub discover: DiscoverSettings,
}

/// Which files discovery picks up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverSettings {
    /// File extensions (without the dot) treated as HTML sources.
    pub extensions: Vec<String>,
    /// File or directory names skipped during the walk.
    pub ignore: Vec<String>,
}

impl Default for DiscoverSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string(), "htm".to_string()],
            ignore: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
            ],
        }
    }
}

impl DiscoverSettings {
    /// Whether `path` has one of the configured extensions (ASCII case-insensitive).
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }

    /// Whether a file or directory name is ignored.
    #[must_use]
    pub fn ignores(&self, name: &str) -> bool {
        self.ignore.iter().any(|i| i == name)
    }
}

impl Settings {
    /// Load settings.
    ///
    /// `explicit` is the `--config` argument; when it is `None` the file
    /// `<source_root>/transpilex.toml` is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if the file
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, source_root: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => toml_loader::load_config(path, true),
            None => toml_loader::load_config(&source_root.join(SETTINGS_FILE), false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(None, dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.classify.partial_dirs, ["partials", "includes"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn partial_section_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "[classify]\npartial_dirs = [\"layouts\"]\n",
        )
        .unwrap();
        let settings = Settings::load(None, dir.path()).unwrap();
        assert_eq!(settings.classify.partial_dirs, ["layouts"]);
        assert_eq!(settings.classify.partial_prefixes, ["_"]);
        assert_eq!(settings.discover, DiscoverSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[discover]\nextension = [\"html\"]\n").unwrap();
        let err = Settings::load(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[classify\n").unwrap();
        let err = Settings::load(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains(SETTINGS_FILE));
    }

    #[test]
    fn discover_matches_extensions_case_insensitively() {
        let discover = DiscoverSettings::default();
        assert!(discover.accepts(Path::new("a/INDEX.HTML")));
        assert!(discover.accepts(Path::new("b.htm")));
        assert!(!discover.accepts(Path::new("c.php")));
        assert!(!discover.accepts(Path::new("README")));
        assert!(discover.ignores("node_modules"));
        assert!(!discover.ignores("pages"));
    }
}
