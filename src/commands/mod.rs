//! Command implementations.
pub mod convert;

use crate::logging::Logger;
use crate::profiles;

/// Print every supported target key with its framework name.
pub fn list_targets(log: &Logger) {
    log.stage("Supported targets");
    for profile in profiles::profiles() {
        log.info(&format!(
            "{:<12} {} ({}{})",
            profile.key.as_str(),
            profile.name,
            profile.view_root,
            profile.file_extension
        ));
    }
}
