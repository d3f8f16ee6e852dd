use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Literal content of the completion marker file.
pub const MARKER_CONTENT: &str = "Done.";

/// Create or truncate `path` and write [`MARKER_CONTENT`] to it in one write.
///
/// The handle is scoped to this call and closed on every return path.
/// Symlinks are followed and existing permissions are respected, so a
/// read-only target fails with `PermissionDenied`.
pub fn write_marker(path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(MARKER_CONTENT.as_bytes())?;
    file.flush()
}
