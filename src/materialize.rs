//! Atomic replacement of the target file

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write new content for `target` via `write_output`, then move it into
/// place.
///
/// The output is produced into a named temp file created in the target's
/// own directory, so the final rename stays on one filesystem and the
/// replacement is atomic. On any failure the temp file is removed and
/// the target is left untouched.
pub fn replace_file_with<F>(target: &Path, write_output: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write_output(&mut writer)?;
        writer.flush()?;
    }
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
