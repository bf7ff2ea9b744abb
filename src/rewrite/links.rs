//! `href`/`src`/`action` attribute rewriting.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{is_external, resolve, segments, split_suffix};
use crate::classify::{PartialRule, classify, destination};
use crate::profiles::{PageLinkStyle, TargetProfile};

#[allow(clippy::expect_used)]
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(href|src|action)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});

/// Location of the assets tree and how references into it are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRule {
    /// Assets root as segments relative to the source root.
    pub assets_root: Vec<String>,
    /// Reference template containing `{path}`.
    pub url_template: String,
}

impl AssetRule {
    /// Build a rule from a `/` separated assets root and a URL template.
    #[must_use]
    pub fn new(assets_root: &str, url_template: &str) -> Self {
        Self {
            assets_root: segments(assets_root),
            url_template: url_template.to_string(),
        }
    }

    /// Render `resolved` if it lies strictly inside the assets root.
    fn render(&self, resolved: &[String]) -> Option<String> {
        let rest = resolved.strip_prefix(self.assets_root.as_slice())?;
        if rest.is_empty() {
            return None;
        }
        Some(self.url_template.replace("{path}", &rest.join("/")))
    }
}

/// Target-side context for rewriting links to other pages.
#[derive(Debug, Clone)]
pub struct PageLinks<'a> {
    /// Profile whose layout and naming the linked page is written with.
    pub profile: &'a TargetProfile,
    /// Page/partial heuristic used for the linked document.
    pub rule: &'a PartialRule,
    /// Destination directory of the document being rewritten, as segments
    /// relative to the project root.
    pub from_dir: Vec<String>,
}

/// Everything the attribute pass needs for one target.
#[derive(Debug, Clone)]
pub struct LinkRules<'a> {
    /// Asset reference rewriting; `None` leaves assets alone.
    pub assets: Option<AssetRule>,
    /// Page link rewriting; `None` leaves page links alone.
    pub pages: Option<PageLinks<'a>>,
}

/// Rewrite asset references and page links in one pass.
///
/// `doc_dir` is the directory of the document being rewritten, as segments
/// relative to the source root.
#[must_use]
pub fn rewrite_links(text: &str, doc_dir: &[String], rules: &LinkRules<'_>) -> String {
    ATTRIBUTE
        .replace_all(text, |caps: &Captures<'_>| rewrite_attribute(caps, doc_dir, rules))
        .into_owned()
}

/// Rewrite only the references that resolve inside the assets root.
#[must_use]
pub fn rewrite_asset_links(text: &str, doc_dir: &[String], rule: &AssetRule) -> String {
    rewrite_links(
        text,
        doc_dir,
        &LinkRules {
            assets: Some(rule.clone()),
            pages: None,
        },
    )
}

/// Rewrite only `.html` page links, pointing them at the file the linked
/// page is written to.
#[must_use]
pub fn rewrite_page_links(text: &str, doc_dir: &[String], pages: &PageLinks<'_>) -> String {
    rewrite_links(
        text,
        doc_dir,
        &LinkRules {
            assets: None,
            pages: Some(pages.clone()),
        },
    )
}

fn rewrite_attribute(caps: &Captures<'_>, doc_dir: &[String], rules: &LinkRules<'_>) -> String {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    let attr = caps.get(1).map_or("", |m| m.as_str());
    let sep = caps.get(2).map_or("", |m| m.as_str());
    let (value, single) = match (caps.get(3), caps.get(4)) {
        (Some(v), _) => (v.as_str(), false),
        (None, Some(v)) => (v.as_str(), true),
        (None, None) => return whole.to_string(),
    };

    let Some(new_value) = rewrite_value(attr, value, doc_dir, rules) else {
        return whole.to_string();
    };

    let single = if single {
        !new_value.contains('\'')
    } else {
        new_value.contains('"') && !new_value.contains('\'')
    };
    if single {
        format!("{attr}{sep}'{new_value}'")
    } else {
        format!("{attr}{sep}\"{new_value}\"")
    }
}

fn rewrite_value(
    attr: &str,
    value: &str,
    doc_dir: &[String],
    rules: &LinkRules<'_>,
) -> Option<String> {
    if is_external(value) {
        return None;
    }
    let (path, suffix) = split_suffix(value);
    if path.is_empty() {
        return None;
    }
    let resolved = resolve(doc_dir, path);

    if let Some(url) = rules.assets.as_ref().and_then(|a| a.render(&resolved)) {
        return Some(format!("{url}{suffix}"));
    }

    let page_attr = attr.eq_ignore_ascii_case("href") || attr.eq_ignore_ascii_case("action");
    if !page_attr || !is_html(path) {
        return None;
    }
    let pages = rules.pages.as_ref()?;
    page_target(&resolved, pages).map(|target| format!("{target}{suffix}"))
}

/// Where a link to the source page `resolved` points after conversion.
fn page_target(resolved: &[String], pages: &PageLinks<'_>) -> Option<String> {
    let profile = pages.profile;
    let relative: PathBuf = resolved.iter().collect();
    let role = classify(&relative, pages.rule);
    let written = path_segments(&destination(&relative, role, profile, pages.rule));

    match profile.page_links {
        PageLinkStyle::Keep => None,
        PageLinkStyle::Extension => Some(relative_link(&pages.from_dir, &written)),
        PageLinkStyle::Route => {
            let root = segments(profile.view_root);
            let mut route: Vec<String> = written
                .strip_prefix(root.as_slice())
                .unwrap_or(written.as_slice())
                .to_vec();
            if let Some(last) = route.last_mut()
                && let Some(stem) = last.strip_suffix(profile.file_extension)
            {
                *last = stem.to_string();
            }
            if route
                .last()
                .is_some_and(|s| s.eq_ignore_ascii_case("index"))
            {
                route.pop();
            }
            Some(format!("/{}", route.join("/")))
        }
    }
}

/// Relative link from directory `from` to file `to`, both as segments.
fn relative_link(from: &[String], to: &[String]) -> String {
    let common = from.iter().zip(to).take_while(|(a, b)| a == b).count();
    let ups = from.len().saturating_sub(common);
    std::iter::repeat_n("..", ups)
        .chain(to.iter().skip(common).map(String::as_str))
        .collect::<Vec<_>>()
        .join("/")
}

fn path_segments(path: &Path) -> Vec<String> {
    path.iter()
        .filter_map(|s| s.to_str())
        .map(str::to_string)
        .collect()
}

/// Whether `path` names an HTML page.
fn is_html(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}
