//! `@@include(...)` directive translation.
//!
//! HTML theme kits built with gulp-file-include compose pages from partials
//! with `@@include("partials/header.html", {"title": "Home"})`. Each
//! directive is replaced by the target's own include statement pointing at
//! the partial's destination in the generated project.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::resolve;
use crate::classify::{PartialRule, classify, destination};
use crate::profiles::{IncludeSyntax, TargetProfile};

#[allow(clippy::expect_used)]
static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)@@include\(\s*(?:"([^"]*)"|'([^']*)')\s*(?:,\s*(\{.*?\})\s*)?\)"#)
        .expect("include pattern is valid")
});

/// Replace every `@@include` directive in `text`.
///
/// Directives whose parameters are not a JSON object of scalar values are
/// left exactly as written.
#[must_use]
pub fn translate_includes(
    text: &str,
    doc_dir: &[String],
    profile: &TargetProfile,
    rule: &PartialRule,
) -> String {
    INCLUDE
        .replace_all(text, |caps: &Captures<'_>| {
            translate_one(caps, doc_dir, profile, rule)
                .unwrap_or_else(|| caps.get(0).map_or_else(String::new, |m| m.as_str().to_string()))
        })
        .into_owned()
}

fn translate_one(
    caps: &Captures<'_>,
    doc_dir: &[String],
    profile: &TargetProfile,
    rule: &PartialRule,
) -> Option<String> {
    let path = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let params = match caps.get(3) {
        Some(raw) => parse_params(raw.as_str())?,
        None => Vec::new(),
    };

    let relative: PathBuf = resolve(doc_dir, path).into_iter().collect();
    if relative.as_os_str().is_empty() {
        return None;
    }
    let target = destination(&relative, classify(&relative, rule), profile, rule);
    let full = target
        .iter()
        .filter_map(|c| c.to_str())
        .collect::<Vec<_>>()
        .join("/");
    let within_root = target
        .strip_prefix(profile.include_root)
        .unwrap_or(&target)
        .iter()
        .filter_map(|c| c.to_str())
        .collect::<Vec<_>>()
        .join("/");
    let bare = within_root
        .strip_suffix(profile.file_extension)
        .unwrap_or(&within_root);

    Some(render(profile.include, &full, &within_root, bare, &params))
}

/// Parse `{"k": scalar, ...}`; `None` for anything else.
fn parse_params(raw: &str) -> Option<Vec<(String, Value)>> {
    let map: Map<String, Value> = serde_json::from_str(raw).ok()?;
    map.into_iter()
        .map(|(k, v)| match v {
            Value::Array(_) | Value::Object(_) => None,
            scalar => Some((k, scalar)),
        })
        .collect()
}

fn render(
    syntax: IncludeSyntax,
    full: &str,
    within_root: &str,
    bare: &str,
    params: &[(String, Value)],
) -> String {
    match syntax {
        IncludeSyntax::Blade => {
            let name = bare.replace('/', ".");
            if params.is_empty() {
                format!("@include('{name}')")
            } else {
                format!("@include('{name}', {})", php_array(params))
            }
        }
        IncludeSyntax::Django => {
            if params.is_empty() {
                format!("{{% include '{within_root}' %}}")
            } else {
                format!(
                    "{{% include '{within_root}' with {} %}}",
                    assignments(params, Dialect::Python)
                )
            }
        }
        IncludeSyntax::Jinja => {
            if params.is_empty() {
                format!("{{% include '{within_root}' %}}")
            } else {
                format!(
                    "{{% with {} %}}{{% include '{within_root}' %}}{{% endwith %}}",
                    assignments_joined(params, Dialect::Python, ", ")
                )
            }
        }
        IncludeSyntax::Twig => {
            if params.is_empty() {
                format!("{{{{ include('{within_root}') }}}}")
            } else {
                format!(
                    "{{{{ include('{within_root}', {}) }}}}",
                    object_literal(params, Dialect::Js)
                )
            }
        }
        IncludeSyntax::Php => {
            let vars: String = params
                .iter()
                .map(|(k, v)| format!("${} = {}; ", php_identifier(k), literal(v, Dialect::Php)))
                .collect();
            format!("<?php {vars}include('{within_root}'); ?>")
        }
        IncludeSyntax::CodeIgniter => {
            if params.is_empty() {
                format!("<?= $this->include('{bare}') ?>")
            } else {
                format!("<?= view('{bare}', {}) ?>", php_array(params))
            }
        }
        IncludeSyntax::CakePhp => {
            if params.is_empty() {
                format!("<?= $this->element('{bare}') ?>")
            } else {
                format!("<?= $this->element('{bare}', {}) ?>", php_array(params))
            }
        }
        IncludeSyntax::Ejs => {
            if params.is_empty() {
                format!("<%- include('{bare}') %>")
            } else {
                format!(
                    "<%- include('{bare}', {}) %>",
                    object_literal(params, Dialect::Js)
                )
            }
        }
        IncludeSyntax::Razor => {
            if params.is_empty() {
                format!("@await Html.PartialAsync(\"~/{full}\")")
            } else {
                let entries = params
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{{ {}, {} }}",
                            literal(&Value::String(k.clone()), Dialect::CSharp),
                            literal(v, Dialect::CSharp)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "@await Html.PartialAsync(\"~/{full}\", new ViewDataDictionary(ViewData) {{ {entries} }})"
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Dialect {
    Php,
    Js,
    Python,
    CSharp,
}

fn literal(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::String(s) => match dialect {
            Dialect::CSharp => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            _ => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        },
        Value::Bool(b) => match (dialect, b) {
            (Dialect::Python, true) => "True".to_string(),
            (Dialect::Python, false) => "False".to_string(),
            (_, b) => b.to_string(),
        },
        Value::Null => match dialect {
            Dialect::Python => "None".to_string(),
            _ => "null".to_string(),
        },
        other => other.to_string(),
    }
}

fn php_array(params: &[(String, Value)]) -> String {
    let entries = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{} => {}",
                literal(&Value::String(k.clone()), Dialect::Php),
                literal(v, Dialect::Php)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{entries}]")
}

fn object_literal(params: &[(String, Value)], dialect: Dialect) -> String {
    let entries = params
        .iter()
        .map(|(k, v)| {
            let key = if is_identifier(k) {
                k.clone()
            } else {
                literal(&Value::String(k.clone()), dialect)
            };
            format!("{key}: {}", literal(v, dialect))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{entries}}}")
}

fn assignments(params: &[(String, Value)], dialect: Dialect) -> String {
    assignments_joined(params, dialect, " ")
}

fn assignments_joined(params: &[(String, Value)], dialect: Dialect, sep: &str) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", php_identifier(k), literal(v, dialect)))
        .collect::<Vec<_>>()
        .join(sep)
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Map a parameter name onto a variable name valid in PHP and Python.
fn php_identifier(key: &str) -> String {
    let mut out: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profiles::lookup;
    use crate::rewrite::segments;

    fn translate(text: &str, target: &str) -> String {
        translate_includes(text, &[], lookup(target).unwrap(), &PartialRule::default())
    }

    const HEADER: &str = r#"@@include("partials/header.html", {"title": "Home"})"#;

    #[test]
    fn blade_uses_dot_notation() {
        assert_eq!(
            translate(HEADER, "laravel"),
            "@include('partials.header', ['title' => 'Home'])"
        );
    }

    #[test]
    fn django_include_with() {
        assert_eq!(
            translate(HEADER, "django"),
            "{% include 'partials/header.html' with title='Home' %}"
        );
    }

    #[test]
    fn jinja_wraps_in_with_block() {
        assert_eq!(
            translate(HEADER, "flask"),
            "{% with title='Home' %}{% include 'partials/header.html' %}{% endwith %}"
        );
    }

    #[test]
    fn twig_include_function() {
        assert_eq!(
            translate(HEADER, "symfony"),
            "{{ include('partials/header.html.twig', {title: 'Home'}) }}"
        );
    }

    #[test]
    fn php_assigns_then_includes() {
        assert_eq!(
            translate(HEADER, "php"),
            "<?php $title = 'Home'; include('partials/header.php'); ?>"
        );
    }

    #[test]
    fn codeigniter_view_with_data() {
        assert_eq!(
            translate(HEADER, "codeigniter"),
            "<?= view('partials/header', ['title' => 'Home']) ?>"
        );
        assert_eq!(
            translate(r#"@@include("partials/footer.html")"#, "core"),
            "<?= $this->include('partials/footer') ?>"
        );
    }

    #[test]
    fn cakephp_element() {
        assert_eq!(
            translate(HEADER, "cakephp"),
            "<?= $this->element('header', ['title' => 'Home']) ?>"
        );
    }

    #[test]
    fn ejs_include() {
        assert_eq!(
            translate(HEADER, "node"),
            "<%- include('partials/header', {title: 'Home'}) %>"
        );
    }

    #[test]
    fn razor_partial_async() {
        assert_eq!(
            translate(r#"@@include("partials/header.html")"#, "mvc"),
            "@await Html.PartialAsync(\"~/Views/Shared/Partials/_Header.cshtml\")"
        );
    }

    #[test]
    fn include_path_resolves_against_document_directory() {
        let out = translate_includes(
            r#"@@include("../partials/top_bar.html")"#,
            &segments("pages"),
            lookup("laravel").unwrap(),
            &PartialRule::default(),
        );
        assert_eq!(out, "@include('partials.top-bar')");
    }

    #[test]
    fn single_quoted_path_and_multiline_params() {
        let text = "@@include('partials/header.html', {\n  \"title\": \"Home\",\n  \"count\": 3\n})";
        assert_eq!(
            translate(text, "laravel"),
            "@include('partials.header', ['title' => 'Home', 'count' => 3])"
        );
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let text = r#"@@include("partials/header.html", {"title": "Bob's page"})"#;
        assert_eq!(
            translate(text, "laravel"),
            r"@include('partials.header', ['title' => 'Bob\'s page'])"
        );
    }

    #[test]
    fn booleans_follow_the_template_language() {
        let text = r#"@@include("partials/header.html", {"dark": true})"#;
        assert_eq!(
            translate(text, "django"),
            "{% include 'partials/header.html' with dark=True %}"
        );
        assert_eq!(
            translate(text, "node"),
            "<%- include('partials/header', {dark: true}) %>"
        );
    }

    #[test]
    fn invalid_params_leave_directive_unchanged() {
        let text = r#"<div>@@include("partials/header.html", {title: 'Home'})</div>"#;
        assert_eq!(translate(text, "laravel"), text);
    }

    #[test]
    fn nested_params_leave_directive_unchanged() {
        let text = r#"@@include("partials/header.html", {"menu": {"a": 1}})"#;
        assert_eq!(translate(text, "laravel"), text);
    }

    #[test]
    fn surrounding_markup_is_untouched() {
        let text = "<body>\n@@include(\"partials/footer.html\")\n</body>";
        assert_eq!(
            translate(text, "symfony"),
            "<body>\n{{ include('partials/footer.html.twig') }}\n</body>"
        );
    }
}
