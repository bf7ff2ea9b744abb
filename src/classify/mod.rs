//! Page/partial classification and destination naming.
//!
//! Both functions are pure: they only look at the relative path, the
//! [`PartialRule`] and the target profile, never at the filesystem.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::profiles::TargetProfile;

/// Role of a source document in the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A full page rendered by a route.
    Page,
    /// A fragment included by pages (header, footer, sidebar, …).
    Partial,
}

impl Role {
    /// Lower-case label used in log output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Partial => "partial",
        }
    }
}

/// Heuristic deciding which documents are partials.
///
/// A document is a partial when one of its directory components equals an
/// entry of `partial_dirs`, or its file name starts with an entry of
/// `partial_prefixes`. Everything else is a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialRule {
    /// Directory names whose contents are partials.
    pub partial_dirs: Vec<String>,
    /// File name prefixes marking a partial.
    pub partial_prefixes: Vec<String>,
}

impl Default for PartialRule {
    fn default() -> Self {
        Self {
            partial_dirs: vec!["partials".to_string(), "includes".to_string()],
            partial_prefixes: vec!["_".to_string()],
        }
    }
}

impl PartialRule {
    fn is_partial_dir(&self, name: &str) -> bool {
        self.partial_dirs.iter().any(|d| d == name)
    }

    fn matching_prefix(&self, file_name: &str) -> Option<&str> {
        self.partial_prefixes
            .iter()
            .map(String::as_str)
            .find(|p| !p.is_empty() && file_name.starts_with(p))
    }
}

/// Classify a document by its path relative to the source root.
#[must_use]
pub fn classify(relative_path: &Path, rule: &PartialRule) -> Role {
    let in_partial_dir = parent_segments(relative_path)
        .iter()
        .any(|d| rule.is_partial_dir(d));
    let prefixed = relative_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| rule.matching_prefix(n).is_some());

    if in_partial_dir || prefixed {
        Role::Partial
    } else {
        Role::Page
    }
}

/// Destination of a document relative to the project root.
///
/// The result is `<view_root or partial_root>/<sub dirs>/<stem><ext>`, with
/// the profile's naming convention applied to the stem (and, for
/// `hyphen_folders`, to the sub directories).
#[must_use]
pub fn destination(
    relative_path: &Path,
    role: Role,
    profile: &TargetProfile,
    rule: &PartialRule,
) -> PathBuf {
    let mut dirs = parent_segments(relative_path);
    let mut stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    if role == Role::Partial {
        if let Some(pos) = dirs.iter().position(|d| rule.is_partial_dir(d)) {
            dirs.remove(pos);
        }
        if let Some(rest) = rule
            .matching_prefix(&stem)
            .and_then(|prefix| stem.strip_prefix(prefix))
            .filter(|rest| !rest.is_empty())
        {
            stem = rest.to_string();
        }
    }

    let naming = profile.naming;
    if naming.underscores_to_hyphens {
        stem = stem.replace('_', "-");
    }

    match role {
        Role::Page => {
            if naming.hyphen_folders {
                let mut parts: Vec<String> = stem
                    .split('-')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect();
                if let Some(last) = parts.pop()
                    && !parts.is_empty()
                {
                    dirs.extend(parts);
                    stem = last;
                }
            }
            if naming.pascal_pages {
                dirs = dirs.iter().map(|d| pascal_case(d)).collect();
                stem = pascal_case(&stem);
            }
        }
        Role::Partial => {
            if naming.pascal_partials {
                stem = format!("_{}", pascal_case(&stem));
            }
        }
    }

    let root = match role {
        Role::Page => profile.view_root,
        Role::Partial => profile.partial_root,
    };

    let mut out: PathBuf = root.split('/').filter(|s| !s.is_empty()).collect();
    out.extend(dirs);
    out.push(format!("{stem}{}", profile.file_extension));
    out
}

/// Number of parent directories in a relative path.
#[must_use]
pub fn depth(relative_path: &Path) -> usize {
    parent_segments(relative_path).len()
}

fn parent_segments(relative_path: &Path) -> Vec<String> {
    relative_path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => s.to_str().map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `page-title` → `PageTitle`.
fn pascal_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profiles::lookup;

    fn dest(path: &str, target: &str) -> PathBuf {
        let rule = PartialRule::default();
        let rel = Path::new(path);
        destination(rel, classify(rel, &rule), lookup(target).unwrap(), &rule)
    }

    // ------------------------------------------------------------------
    // classify
    // ------------------------------------------------------------------

    #[test]
    fn plain_file_is_a_page() {
        let rule = PartialRule::default();
        assert_eq!(classify(Path::new("index.html"), &rule), Role::Page);
        assert_eq!(classify(Path::new("pages/about.html"), &rule), Role::Page);
    }

    #[test]
    fn partial_folder_marks_partial() {
        let rule = PartialRule::default();
        assert_eq!(classify(Path::new("partials/header.html"), &rule), Role::Partial);
        assert_eq!(classify(Path::new("a/includes/nav.html"), &rule), Role::Partial);
    }

    #[test]
    fn underscore_prefix_marks_partial() {
        let rule = PartialRule::default();
        assert_eq!(classify(Path::new("_footer.html"), &rule), Role::Partial);
    }

    #[test]
    fn folder_match_is_exact() {
        let rule = PartialRule::default();
        assert_eq!(classify(Path::new("my-partials/x.html"), &rule), Role::Page);
    }

    #[test]
    fn custom_rule_overrides_defaults() {
        let rule = PartialRule {
            partial_dirs: vec!["layouts".to_string()],
            partial_prefixes: vec![],
        };
        assert_eq!(classify(Path::new("layouts/main.html"), &rule), Role::Partial);
        assert_eq!(classify(Path::new("partials/header.html"), &rule), Role::Page);
        assert_eq!(classify(Path::new("_footer.html"), &rule), Role::Page);
    }

    #[test]
    fn depth_counts_parents() {
        assert_eq!(depth(Path::new("index.html")), 0);
        assert_eq!(depth(Path::new("a/b/c.html")), 2);
    }

    // ------------------------------------------------------------------
    // destination
    // ------------------------------------------------------------------

    #[test]
    fn laravel_page_keeps_sub_directory() {
        assert_eq!(
            dest("pages/about.html", "laravel"),
            PathBuf::from("resources/views/pages/about.blade.php")
        );
    }

    #[test]
    fn laravel_splits_hyphenated_pages_into_folders() {
        assert_eq!(
            dest("apps-calendar.html", "laravel"),
            PathBuf::from("resources/views/apps/calendar.blade.php")
        );
    }

    #[test]
    fn partial_folder_is_replaced_by_partial_root() {
        assert_eq!(
            dest("partials/top_bar.html", "django"),
            PathBuf::from("templates/partials/top-bar.html")
        );
    }

    #[test]
    fn partial_prefix_is_stripped() {
        assert_eq!(
            dest("_footer.html", "symfony"),
            PathBuf::from("templates/partials/footer.html.twig")
        );
    }

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(dest("user_profile.html", "php"), PathBuf::from("src/user-profile.php"));
    }

    #[test]
    fn mvc_uses_pascal_case() {
        assert_eq!(
            dest("partials/page-title.html", "mvc"),
            PathBuf::from("Views/Shared/Partials/_PageTitle.cshtml")
        );
        assert_eq!(
            dest("apps-calendar.html", "mvc"),
            PathBuf::from("Views/Apps/Calendar.cshtml")
        );
    }

    #[test]
    fn htm_extension_is_replaced() {
        assert_eq!(dest("contact.htm", "node"), PathBuf::from("views/contact.ejs"));
    }

    #[test]
    fn destination_is_deterministic() {
        assert_eq!(dest("a/b/c.html", "flask"), dest("a/b/c.html", "flask"));
    }

    #[test]
    fn pascal_case_handles_separators() {
        assert_eq!(pascal_case("page-title"), "PageTitle");
        assert_eq!(pascal_case("top_bar"), "TopBar");
        assert_eq!(pascal_case("INDEX"), "Index");
    }
}
