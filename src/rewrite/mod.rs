//! Pure text rewriting applied to every source document.
//!
//! Nothing here touches the filesystem; all path arithmetic works on `/`
//! separated segments relative to the source root.

pub mod includes;
pub mod links;
pub mod variables;

pub use includes::translate_includes;
pub use links::{
    AssetRule, LinkRules, PageLinks, rewrite_asset_links, rewrite_links, rewrite_page_links,
};
pub use variables::translate_variables;

/// Whether an attribute value must pass through untouched.
///
/// Anchors, protocol-relative URLs, template expressions (`{{`, `{%`, `<?`,
/// `@`) and anything carrying a URI scheme are external.
#[must_use]
pub fn is_external(value: &str) -> bool {
    let value = value.trim_start();
    if value.is_empty() {
        return true;
    }
    if ["#", "//", "{{", "{%", "<?", "@", "<%", "~/"]
        .iter()
        .any(|p| value.starts_with(p))
    {
        return true;
    }
    has_scheme(value)
}

/// `scheme:` per RFC 3986: a letter followed by letters, digits, `+`, `-`, `.`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split `path?query#fragment` into the path and the untouched remainder.
#[must_use]
pub fn split_suffix(value: &str) -> (&str, &str) {
    value
        .find(['?', '#'])
        .map_or((value, ""), |pos| value.split_at(pos))
}

/// Resolve `path` against the document directory `doc_dir`.
///
/// A leading `/` starts from the source root. `..` never climbs above the
/// root; excess parent references are dropped.
#[must_use]
pub fn resolve(doc_dir: &[String], path: &str) -> Vec<String> {
    let mut segments: Vec<String> = if path.starts_with('/') {
        Vec::new()
    } else {
        doc_dir.to_vec()
    };
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

/// Split a relative path string into its non-empty segments.
#[must_use]
pub fn segments(path: &str) -> Vec<String> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn externals_are_recognised() {
        for value in [
            "#top",
            "//cdn.example.com/x.js",
            "https://example.com",
            "http://example.com",
            "mailto:a@b.c",
            "tel:+123",
            "javascript:void(0)",
            "data:image/png;base64,AAAA",
            "{{ asset('x') }}",
            "{% static 'x' %}",
            "<?= base_url() ?>",
            "@Url.Content",
            "",
        ] {
            assert!(is_external(value), "{value}");
        }
    }

    #[test]
    fn relative_paths_are_not_external() {
        for value in ["assets/css/app.css", "../img/a.png", "/assets/x.js", "about.html"] {
            assert!(!is_external(value), "{value}");
        }
    }

    #[test]
    fn colon_later_in_path_is_not_a_scheme() {
        assert!(!is_external("img/a:b.png"));
        assert!(!is_external("1x:2.png"));
    }

    #[test]
    fn suffix_split_keeps_query_and_fragment() {
        assert_eq!(split_suffix("a.css?v=1#x"), ("a.css", "?v=1#x"));
        assert_eq!(split_suffix("page.html#top"), ("page.html", "#top"));
        assert_eq!(split_suffix("plain"), ("plain", ""));
    }

    #[test]
    fn resolve_handles_parents_and_root() {
        let dir = segments("pages/blog");
        assert_eq!(resolve(&dir, "../assets/a.css"), segments("pages/assets/a.css"));
        assert_eq!(resolve(&dir, "/assets/a.css"), segments("assets/a.css"));
        assert_eq!(resolve(&dir, "./x.png"), segments("pages/blog/x.png"));
    }

    #[test]
    fn resolve_clamps_at_root() {
        assert_eq!(resolve(&[], "../../assets/a.css"), segments("assets/a.css"));
    }
}
