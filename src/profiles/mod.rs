//! Declarative target framework profiles.
//!
//! Every supported framework is one [`TargetProfile`] record in the static
//! [`registry`]. Adding a target means adding a [`TargetKey`] variant and a
//! registry entry; the emitter never branches on the framework itself.
pub mod registry;
mod templates;

use std::fmt;

pub use registry::{lookup, profiles, supported_keys};

/// Closed set of supported target frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetKey {
    /// Plain PHP pages served from `src/`.
    Php,
    /// Laravel with Blade views and Vite.
    Laravel,
    /// `CodeIgniter` 4.
    CodeIgniter,
    /// `CakePHP` 5.
    CakePhp,
    /// Symfony with Twig templates.
    Symfony,
    /// Express with EJS views.
    Node,
    /// Django templates.
    Django,
    /// Flask with Jinja templates.
    Flask,
    /// "Core" PHP skeleton (`app/Views` layout without a framework kernel).
    Core,
    /// ASP.NET MVC with Razor views.
    Mvc,
}

impl TargetKey {
    /// Command-line identifier of this target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::Laravel => "laravel",
            Self::CodeIgniter => "codeigniter",
            Self::CakePhp => "cakephp",
            Self::Symfony => "symfony",
            Self::Node => "node",
            Self::Django => "django",
            Self::Flask => "flask",
            Self::Core => "core",
            Self::Mvc => "mvc",
        }
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory layout, naming and syntax conventions of one target framework.
#[derive(Debug)]
pub struct TargetProfile {
    /// Registry key.
    pub key: TargetKey,
    /// Human-readable framework name.
    pub name: &'static str,
    /// Destination directory for page templates, relative to the project root.
    pub view_root: &'static str,
    /// Destination directory for partials, relative to the project root.
    pub partial_root: &'static str,
    /// Directory include references are resolved from.
    pub include_root: &'static str,
    /// Extension replacing `.html`, including the leading dot.
    pub file_extension: &'static str,
    /// Asset reference template; `{path}` is the sub-path inside the assets root.
    pub asset_url: &'static str,
    /// Where the assets tree is copied, relative to the project root.
    pub static_root: &'static str,
    /// How links to other `.html` pages are rewritten.
    pub page_links: PageLinkStyle,
    /// How `@@include(...)` directives are rendered.
    pub include: IncludeSyntax,
    /// How `@@name` variables inside partials are rendered.
    pub variables: VariableSyntax,
    /// File naming convention.
    pub naming: Naming,
    /// Auxiliary files written or patched at the end of a run.
    pub manifests: &'static [ManifestTemplate],
}

impl TargetProfile {
    /// Render the asset reference for `sub_path` (relative to the assets root).
    #[must_use]
    pub fn asset_reference(&self, sub_path: &str) -> String {
        self.asset_url.replace("{path}", sub_path)
    }
}

/// Rewriting strategy for `href`/`action` values pointing at `.html` pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLinkStyle {
    /// Leave page links untouched.
    Keep,
    /// Relative link to the written file: `about.html` → `about.php`.
    Extension,
    /// Clean route from the written view path: `about.html` → `/about`,
    /// `index.html` → `/`.
    Route,
}

/// Template include syntax of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeSyntax {
    /// `@include('partials.header', [...])`
    Blade,
    /// `{% include 'partials/header.html' with k='v' %}`
    Django,
    /// `{% with k='v' %}{% include 'partials/header.html' %}{% endwith %}`
    Jinja,
    /// `{{ include('partials/header.html.twig', {k: 'v'}) }}`
    Twig,
    /// `<?php $k = 'v'; include('partials/header.php'); ?>`
    Php,
    /// `<?= $this->include('partials/header', [...]) ?>`
    CodeIgniter,
    /// `<?= $this->element('header', [...]) ?>`
    CakePhp,
    /// `<%- include('partials/header', {k: 'v'}) %>`
    Ejs,
    /// `@await Html.PartialAsync("~/Views/Shared/Partials/_Header.cshtml")`
    Razor,
}

/// Echo syntax for a partial variable `@@name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSyntax {
    /// `{{ $name }}`
    Blade,
    /// `{{ name }}`
    Jinja,
    /// `{{ name ?? '' }}`
    Twig,
    /// `<?= $name ?>`
    PhpEcho,
    /// `<%- name %>`
    Ejs,
    /// `@ViewData["name"]`
    Razor,
}

impl VariableSyntax {
    /// Render the variable `name`.
    #[must_use]
    pub fn render(self, name: &str) -> String {
        match self {
            Self::Blade => format!("{{{{ ${name} }}}}"),
            Self::Jinja => format!("{{{{ {name} }}}}"),
            Self::Twig => format!("{{{{ {name} ?? '' }}}}"),
            Self::PhpEcho => format!("<?= ${name} ?>"),
            Self::Ejs => format!("<%- {name} %>"),
            Self::Razor => format!("@ViewData[\"{name}\"]"),
        }
    }
}

/// File naming convention applied to destination file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Naming {
    /// Replace `_` with `-` in file stems.
    pub underscores_to_hyphens: bool,
    /// Split hyphenated page stems into folders: `apps-calendar` → `apps/calendar`.
    pub hyphen_folders: bool,
    /// Render partial names as `_PascalCase`.
    pub pascal_partials: bool,
    /// Render page names and their folders in `PascalCase`.
    pub pascal_pages: bool,
}

/// An auxiliary file written (or patched) into the generated project.
#[derive(Debug)]
pub struct ManifestTemplate {
    /// Path relative to the project root.
    pub path: &'static str,
    /// Only part of the gulp build; left out by `--no-gulp`.
    pub gulp_only: bool,
    /// Content model.
    pub kind: ManifestKind,
}

/// Content model of a manifest.
#[derive(Debug)]
pub enum ManifestKind {
    /// Plain text rendered from a template with `{{var}}` placeholders.
    ///
    /// The template must contain a `transpilex:begin <region>` /
    /// `transpilex:end <region>` marker pair; only that region is rewritten
    /// when the file already exists.
    Text {
        /// Template body.
        template: &'static str,
        /// Marker region identifier.
        region: &'static str,
    },
    /// An npm `package.json`, merged key by key.
    PackageJson {
        /// `scripts` entries.
        scripts: &'static [(&'static str, &'static str)],
        /// `dependencies` entries.
        dependencies: &'static [(&'static str, &'static str)],
        /// `devDependencies` entries.
        dev_dependencies: &'static [(&'static str, &'static str)],
        /// Drop gulp tooling inherited from the source `package.json`.
        drop_gulp: bool,
    },
}
