//! Static registry of target profiles and key lookup.
use super::templates::{
    DJANGO_REQUIREMENTS, EXPRESS_APP, FLASK_REQUIREMENTS, GULP_DEV_DEPENDENCIES, GULP_SCRIPTS,
    GULPFILE, LARAVEL_ROUTES, LARAVEL_ROUTING_CONTROLLER, VITE_CONFIG,
};
use super::{
    IncludeSyntax, ManifestKind, ManifestTemplate, Naming, PageLinkStyle, TargetKey, TargetProfile,
    VariableSyntax,
};
use crate::error::EmitError;

const HYPHENATED: Naming = Naming {
    underscores_to_hyphens: true,
    hyphen_folders: false,
    pascal_partials: false,
    pascal_pages: false,
};

const GULP_PACKAGE: ManifestTemplate = ManifestTemplate {
    path: "package.json",
    gulp_only: true,
    kind: ManifestKind::PackageJson {
        scripts: GULP_SCRIPTS,
        dependencies: &[],
        dev_dependencies: GULP_DEV_DEPENDENCIES,
        drop_gulp: false,
    },
};

const GULPFILE_JS: ManifestTemplate = ManifestTemplate {
    path: "gulpfile.js",
    gulp_only: true,
    kind: ManifestKind::Text {
        template: GULPFILE,
        region: "paths",
    },
};

/// Every supported target, in `--list-targets` order.
static PROFILES: [TargetProfile; 10] = [
    TargetProfile {
        key: TargetKey::Php,
        name: "PHP",
        view_root: "src",
        partial_root: "src/partials",
        include_root: "src",
        file_extension: ".php",
        asset_url: "/assets/{path}",
        static_root: "src/assets",
        page_links: PageLinkStyle::Extension,
        include: IncludeSyntax::Php,
        variables: VariableSyntax::PhpEcho,
        naming: HYPHENATED,
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
    TargetProfile {
        key: TargetKey::Laravel,
        name: "Laravel",
        view_root: "resources/views",
        partial_root: "resources/views/partials",
        include_root: "resources/views",
        file_extension: ".blade.php",
        asset_url: "{{ asset('assets/{path}') }}",
        static_root: "public/assets",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Blade,
        variables: VariableSyntax::Blade,
        naming: Naming {
            underscores_to_hyphens: true,
            hyphen_folders: true,
            pascal_partials: false,
            pascal_pages: false,
        },
        manifests: &[
            ManifestTemplate {
                path: "package.json",
                gulp_only: false,
                kind: ManifestKind::PackageJson {
                    scripts: &[("dev", "vite"), ("build", "vite build")],
                    dependencies: &[],
                    dev_dependencies: &[
                        ("axios", "^1.7.4"),
                        ("laravel-vite-plugin", "^1.0"),
                        ("vite", "^6.0"),
                    ],
                    drop_gulp: true,
                },
            },
            ManifestTemplate {
                path: "vite.config.js",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: VITE_CONFIG,
                    region: "inputs",
                },
            },
            ManifestTemplate {
                path: "routes/web.php",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: LARAVEL_ROUTES,
                    region: "routes",
                },
            },
            ManifestTemplate {
                path: "app/Http/Controllers/RoutingController.php",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: LARAVEL_ROUTING_CONTROLLER,
                    region: "actions",
                },
            },
        ],
    },
    TargetProfile {
        key: TargetKey::CodeIgniter,
        name: "CodeIgniter",
        view_root: "app/Views",
        partial_root: "app/Views/partials",
        include_root: "app/Views",
        file_extension: ".php",
        asset_url: "<?= base_url('assets/{path}') ?>",
        static_root: "public/assets",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::CodeIgniter,
        variables: VariableSyntax::PhpEcho,
        naming: HYPHENATED,
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
    TargetProfile {
        key: TargetKey::CakePhp,
        name: "CakePHP",
        view_root: "templates/Pages",
        partial_root: "templates/element",
        include_root: "templates/element",
        file_extension: ".php",
        asset_url: "<?= $this->Url->webroot('{path}') ?>",
        static_root: "webroot",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::CakePhp,
        variables: VariableSyntax::PhpEcho,
        naming: HYPHENATED,
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
    TargetProfile {
        key: TargetKey::Symfony,
        name: "Symfony",
        view_root: "templates",
        partial_root: "templates/partials",
        include_root: "templates",
        file_extension: ".html.twig",
        asset_url: "{{ asset('assets/{path}') }}",
        static_root: "public/assets",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Twig,
        variables: VariableSyntax::Twig,
        naming: HYPHENATED,
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
    TargetProfile {
        key: TargetKey::Node,
        name: "Node.js (Express + EJS)",
        view_root: "views",
        partial_root: "views/partials",
        include_root: "views",
        file_extension: ".ejs",
        asset_url: "/{path}",
        static_root: "public",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Ejs,
        variables: VariableSyntax::Ejs,
        naming: HYPHENATED,
        manifests: &[
            ManifestTemplate {
                path: "package.json",
                gulp_only: false,
                kind: ManifestKind::PackageJson {
                    scripts: &[("start", "node app.js"), ("dev", "gulp"), ("build", "gulp build")],
                    dependencies: &[
                        ("ejs", "^3.1.10"),
                        ("express", "^4.21.0"),
                        ("express-ejs-layouts", "^2.5.1"),
                    ],
                    dev_dependencies: GULP_DEV_DEPENDENCIES,
                    drop_gulp: false,
                },
            },
            ManifestTemplate {
                path: "app.js",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: EXPRESS_APP,
                    region: "app",
                },
            },
            GULPFILE_JS,
        ],
    },
    TargetProfile {
        key: TargetKey::Django,
        name: "Django",
        view_root: "templates/pages",
        partial_root: "templates/partials",
        include_root: "templates",
        file_extension: ".html",
        asset_url: "{% static '{path}' %}",
        static_root: "static",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Django,
        variables: VariableSyntax::Jinja,
        naming: HYPHENATED,
        manifests: &[
            GULP_PACKAGE,
            GULPFILE_JS,
            ManifestTemplate {
                path: "requirements.txt",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: DJANGO_REQUIREMENTS,
                    region: "requirements",
                },
            },
        ],
    },
    TargetProfile {
        key: TargetKey::Flask,
        name: "Flask",
        view_root: "apps/templates/pages",
        partial_root: "apps/templates/partials",
        include_root: "apps/templates",
        file_extension: ".html",
        asset_url: "{{ url_for('static', filename='{path}') }}",
        static_root: "apps/static",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Jinja,
        variables: VariableSyntax::Jinja,
        naming: HYPHENATED,
        manifests: &[
            GULP_PACKAGE,
            GULPFILE_JS,
            ManifestTemplate {
                path: "requirements.txt",
                gulp_only: false,
                kind: ManifestKind::Text {
                    template: FLASK_REQUIREMENTS,
                    region: "requirements",
                },
            },
        ],
    },
    TargetProfile {
        key: TargetKey::Core,
        name: "Core PHP",
        view_root: "app/Views/pages",
        partial_root: "app/Views/partials",
        include_root: "app/Views",
        file_extension: ".php",
        asset_url: "<?= base_url('assets/{path}') ?>",
        static_root: "public/assets",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::CodeIgniter,
        variables: VariableSyntax::PhpEcho,
        naming: HYPHENATED,
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
    TargetProfile {
        key: TargetKey::Mvc,
        name: "ASP.NET MVC",
        view_root: "Views",
        partial_root: "Views/Shared/Partials",
        include_root: "",
        file_extension: ".cshtml",
        asset_url: "~/{path}",
        static_root: "wwwroot",
        page_links: PageLinkStyle::Route,
        include: IncludeSyntax::Razor,
        variables: VariableSyntax::Razor,
        naming: Naming {
            underscores_to_hyphens: true,
            hyphen_folders: true,
            pascal_partials: true,
            pascal_pages: true,
        },
        manifests: &[GULP_PACKAGE, GULPFILE_JS],
    },
];

/// All registered profiles.
#[must_use]
pub fn profiles() -> &'static [TargetProfile] {
    &PROFILES
}

/// Registered target keys in registry order.
pub fn supported_keys() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.key.as_str())
}

/// Resolve a command-line target key to its profile.
///
/// Surrounding whitespace is ignored and matching is ASCII case-insensitive.
///
/// # Errors
///
/// Returns [`EmitError::UnknownTarget`] listing every supported key when
/// `key` does not name a registered target.
pub fn lookup(key: &str) -> Result<&'static TargetProfile, EmitError> {
    let wanted = key.trim();
    PROFILES
        .iter()
        .find(|p| p.key.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| EmitError::UnknownTarget {
            key: key.to_string(),
            supported: supported_keys().collect(),
        })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(lookup("Laravel").unwrap().key, TargetKey::Laravel);
        assert_eq!(lookup("  django\n").unwrap().key, TargetKey::Django);
        assert_eq!(lookup("MVC").unwrap().key, TargetKey::Mvc);
    }

    #[test]
    fn lookup_unknown_lists_every_key() {
        let err = lookup("rails").unwrap_err();
        match err {
            EmitError::UnknownTarget { key, supported } => {
                assert_eq!(key, "rails");
                assert_eq!(supported.len(), PROFILES.len());
                assert!(supported.contains(&"flask"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookup_rejects_prefixes() {
        assert!(lookup("lara").is_err());
        assert!(lookup("").is_err());
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = supported_keys().collect();
        assert_eq!(keys.len(), PROFILES.len());
    }

    #[test]
    fn every_profile_has_a_usable_layout() {
        for profile in profiles() {
            assert!(profile.file_extension.starts_with('.'), "{}", profile.key);
            assert!(profile.asset_url.contains("{path}"), "{}", profile.key);
            assert!(!profile.view_root.is_empty(), "{}", profile.key);
            assert!(!profile.static_root.is_empty(), "{}", profile.key);
            assert!(
                profile.manifests.iter().any(|m| m.path == "package.json"),
                "{} has no package.json",
                profile.key
            );
        }
    }

    #[test]
    fn text_manifests_carry_their_marker_region() {
        for profile in profiles() {
            for manifest in profile.manifests {
                if let ManifestKind::Text { template, region } = &manifest.kind {
                    assert!(
                        template.contains(&format!("transpilex:begin {region}")),
                        "{} {}",
                        profile.key,
                        manifest.path
                    );
                    assert!(template.contains(&format!("transpilex:end {region}")));
                }
            }
        }
    }

    #[test]
    fn asset_reference_substitutes_path() {
        let laravel = lookup("laravel").unwrap();
        assert_eq!(
            laravel.asset_reference("css/app.css"),
            "{{ asset('assets/css/app.css') }}"
        );
    }
}
