//! Per-document emission planning and collision detection.
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::classify::{PartialRule, Role, destination};
use crate::error::{Collision, EmitError};
use crate::profiles::TargetProfile;
use crate::rewrite::{
    AssetRule, LinkRules, PageLinks, rewrite_links, translate_includes, translate_variables,
};

use super::discover::SourceDocument;

/// One output file to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionPlan {
    /// Source path relative to the source root.
    pub source: PathBuf,
    /// Page or partial.
    pub role: Role,
    /// Destination relative to the project root.
    pub destination: PathBuf,
    /// Rewritten content.
    pub content: String,
}

/// Plan a single document: translate includes, substitute partial
/// variables, then rewrite links.
#[must_use]
pub fn plan_document(
    doc: &SourceDocument,
    profile: &TargetProfile,
    rule: &PartialRule,
    assets: &AssetRule,
) -> EmissionPlan {
    let written = destination(&doc.relative_path, doc.role, profile, rule);
    let from_dir: Vec<String> = written
        .parent()
        .map(|p| p.iter().filter_map(|s| s.to_str()).map(str::to_string).collect())
        .unwrap_or_default();

    let doc_dir = doc.dir_segments();
    let mut content = translate_includes(&doc.content, &doc_dir, profile, rule);
    if doc.role == Role::Partial {
        content = translate_variables(&content, profile.variables);
    }
    let content = rewrite_links(
        &content,
        &doc_dir,
        &LinkRules {
            assets: Some(assets.clone()),
            pages: Some(PageLinks {
                profile,
                rule,
                from_dir,
            }),
        },
    );

    EmissionPlan {
        source: doc.relative_path.clone(),
        role: doc.role,
        destination: written,
        content,
    }
}

/// Fail with every group of plans sharing a destination.
///
/// # Errors
///
/// Returns [`EmitError::DestinationCollision`] listing all conflicting groups,
/// ordered by destination, when any destination is planned more than once.
pub fn check_collisions(plans: &[EmissionPlan]) -> Result<(), EmitError> {
    let mut by_destination: BTreeMap<&PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for plan in plans {
        by_destination
            .entry(&plan.destination)
            .or_default()
            .push(plan.source.clone());
    }

    let collisions: Vec<Collision> = by_destination
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(destination, mut sources)| {
            sources.sort();
            Collision {
                destination: destination.clone(),
                sources,
            }
        })
        .collect();

    if collisions.is_empty() {
        Ok(())
    } else {
        Err(EmitError::DestinationCollision(collisions))
    }
}
