//! Upward search for the template file

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::TemplateConfig;

/// Search ancestor directories of `target` for a template file.
///
/// Starting at the new file's own directory and walking up to `root`
/// inclusive, each directory is probed for
/// `<ancestor>/<config.dir>/<filename>` with the configured filenames
/// tried in order. The first existing candidate wins, so the template
/// closest to the new file shadows any further up.
///
/// Returns `None` when no candidate exists, or when `target` does not
/// live under `root` at all.
pub fn find_template_file(
    target: &Path,
    root: &Path,
    config: &TemplateConfig,
) -> Option<PathBuf> {
    let start = target.parent()?;
    for ancestor in start.ancestors() {
        if !ancestor.starts_with(root) {
            break;
        }
        for filename in &config.filenames {
            let candidate = ancestor.join(&config.dir).join(filename);
            debug!(candidate = %candidate.display(), "probing for template");
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
