//! Manifest rendering and patching.
//!
//! Text manifests carry a marker region delimited by lines containing
//! `transpilex:begin <region>` and `transpilex:end <region>`. Only the lines
//! between the two markers are rewritten in an existing file; everything
//! outside belongs to the user. `package.json` is merged key by key instead.
use std::collections::BTreeMap;
use std::ops::Range;

use serde_json::{Map, Value};

use crate::profiles::{ManifestKind, TargetProfile};

/// Dev dependencies that only make sense for a gulp build.
const GULP_TOOLING: &[&str] = &[
    "@babel/core",
    "@babel/preset-env",
    "browser-sync",
    "clean-css",
    "cross-env",
    "del",
    "sass",
];

/// Values substituted into text templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    /// Project name as given on the command line.
    pub project_name: String,
    /// npm-safe package name.
    pub package_name: String,
    /// Static assets directory of the profile.
    pub static_root: String,
    /// Views directory of the profile.
    pub view_root: String,
    /// Generate manifests for a project built without gulp.
    pub without_gulp: bool,
}

impl TemplateVars {
    /// Derive the variables for `project_name` under `profile`.
    #[must_use]
    pub fn new(project_name: &str, profile: &TargetProfile) -> Self {
        Self {
            project_name: project_name.to_string(),
            package_name: package_name(project_name),
            static_root: profile.static_root.to_string(),
            view_root: profile.view_root.to_string(),
            without_gulp: false,
        }
    }
}

/// `My Shop` → `my-shop`.
#[must_use]
pub fn package_name(project_name: &str) -> String {
    project_name.trim().to_lowercase().replace(' ', "-")
}

/// Substitute `{{var}}` placeholders.
#[must_use]
pub fn render_template(template: &str, vars: &TemplateVars) -> String {
    template
        .replace("{{project_name}}", &vars.project_name)
        .replace("{{package_name}}", &vars.package_name)
        .replace("{{static_root}}", &vars.static_root)
        .replace("{{view_root}}", &vars.view_root)
}

/// Byte range of the body of `region`: from the start of the line after the
/// begin marker to the start of the end marker line.
///
/// # Errors
///
/// Returns a reason when the begin or end marker is missing, duplicated, or
/// out of order.
pub fn marker_region(text: &str, region: &str) -> Result<Range<usize>, String> {
    let begin = format!("transpilex:begin {region}");
    let end = format!("transpilex:end {region}");

    let mut body_start = None;
    let mut body_end = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_marker(line, &begin) {
            if body_start.is_some() {
                return Err(format!("duplicate '{begin}' marker"));
            }
            body_start = Some(offset + line.len());
        } else if is_marker(line, &end) {
            if body_start.is_none() {
                return Err(format!("'{end}' marker before '{begin}'"));
            }
            if body_end.is_some() {
                return Err(format!("duplicate '{end}' marker"));
            }
            body_end = Some(offset);
        }
        offset += line.len();
    }

    match (body_start, body_end) {
        (Some(start), Some(end)) => Ok(start..end),
        (None, _) => Err(format!("missing '{begin}' marker")),
        (Some(_), None) => Err(format!("missing '{end}' marker")),
    }
}

/// Marker match on a whole token so `paths` does not match `paths-extra`.
fn is_marker(line: &str, marker: &str) -> bool {
    line.find(marker).is_some_and(|pos| {
        line.get(pos + marker.len()..)
            .and_then(|rest| rest.chars().next())
            .is_none_or(|c| !(c.is_alphanumeric() || c == '-' || c == '_'))
    })
}

/// Replace the body of `region` in `existing` with the body from `rendered`.
///
/// # Errors
///
/// Returns a reason when either text lacks a well-formed marker region.
pub fn replace_marker_region(existing: &str, rendered: &str, region: &str) -> Result<String, String> {
    let target = marker_region(existing, region)?;
    let source = marker_region(rendered, region)?;
    let body = rendered.get(source).unwrap_or_default();
    let head = existing.get(..target.start).unwrap_or_default();
    let tail = existing.get(target.end..).unwrap_or_default();
    Ok(format!("{head}{body}{tail}"))
}

/// `package.json` for a fresh project, merged with the source folder's
/// `package.json` when there is one.
#[must_use]
pub fn generate_package_json(
    vars: &TemplateVars,
    kind: &ManifestKind,
    source_package: Option<&Value>,
) -> Value {
    let ManifestKind::PackageJson {
        scripts,
        dependencies,
        dev_dependencies,
        drop_gulp,
    } = kind
    else {
        return Value::Object(Map::new());
    };

    let mut deps = table(dependencies);
    let mut dev = table(dev_dependencies);
    if let Some(source) = source_package {
        merge_missing(&mut deps, source.get("dependencies"));
        merge_missing(&mut dev, source.get("devDependencies"));
    }
    if *drop_gulp || vars.without_gulp {
        dev.retain(|name, _| !is_gulp_tooling(name));
    }
    let mut scripts = table(scripts);
    if vars.without_gulp {
        scripts.retain(|_, command| !command.as_str().is_some_and(|c| c.contains("gulp")));
    }

    let mut out = Map::new();
    out.insert("name".to_string(), Value::String(vars.package_name.clone()));
    out.insert("version".to_string(), Value::String("1.0.0".to_string()));
    out.insert("private".to_string(), Value::Bool(true));
    out.insert("scripts".to_string(), sorted_object(scripts));
    out.insert("dependencies".to_string(), sorted_object(deps));
    out.insert("devDependencies".to_string(), sorted_object(dev));
    Value::Object(out)
}

/// Merge `generated` into an existing `package.json`.
///
/// Only `scripts`, `dependencies` and `devDependencies` are touched:
/// existing entries win, missing ones are added and keys end up sorted.
/// Every other field keeps its value and position.
///
/// # Errors
///
/// Returns a reason when `existing` is not a JSON object or one of the three
/// sections is present but not an object.
pub fn patch_package_json(existing: Value, generated: &Value) -> Result<Value, String> {
    let Value::Object(mut root) = existing else {
        return Err("not a JSON object".to_string());
    };

    for section in ["scripts", "dependencies", "devDependencies"] {
        let mut merged = match root.get(section) {
            None => BTreeMap::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Some(_) => return Err(format!("'{section}' is not an object")),
        };
        merge_missing(&mut merged, generated.get(section));
        match root.get_mut(section) {
            Some(slot) => *slot = sorted_object(merged),
            None => {
                root.insert(section.to_string(), sorted_object(merged));
            }
        }
    }

    Ok(Value::Object(root))
}

/// Pretty JSON with a trailing newline.
#[must_use]
pub fn to_pretty_json(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_default();
    text.push('\n');
    text
}

/// Content of a manifest: freshly rendered when `existing` is `None`,
/// otherwise `existing` with its managed part updated.
///
/// # Errors
///
/// Returns a reason when `existing` cannot be patched.
pub fn manifest_content(
    kind: &ManifestKind,
    vars: &TemplateVars,
    source_package: Option<&Value>,
    existing: Option<&str>,
) -> Result<String, String> {
    match kind {
        ManifestKind::Text { template, region } => {
            let rendered = render_template(template, vars);
            match existing {
                None => Ok(rendered),
                Some(text) => replace_marker_region(text, &rendered, region),
            }
        }
        ManifestKind::PackageJson { .. } => {
            let generated = generate_package_json(vars, kind, source_package);
            match existing {
                None => Ok(to_pretty_json(&generated)),
                Some(text) => {
                    let value: Value =
                        serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}"))?;
                    patch_package_json(value, &generated).map(|v| to_pretty_json(&v))
                }
            }
        }
    }
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}

fn merge_missing(into: &mut BTreeMap<String, Value>, from: Option<&Value>) {
    if let Some(Value::Object(map)) = from {
        for (k, v) in map {
            into.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
}

fn sorted_object(map: BTreeMap<String, Value>) -> Value {
    Value::Object(map.into_iter().collect())
}

fn is_gulp_tooling(name: &str) -> bool {
    name.contains("gulp") || GULP_TOOLING.contains(&name)
}
