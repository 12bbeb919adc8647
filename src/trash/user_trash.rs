use std::path::Path;

use super::TrashDirs;
use crate::error::{Error, Result};

/// Case 2 of the freedesktop spec: `<mount>/.Trash-<uid>`, created on
/// demand. Failures here are fatal; there is no further fallback.
pub(super) fn user_trash(mount_root: &Path) -> Result<TrashDirs> {
    let uid = unsafe { libc::getuid() };
    let dirs = TrashDirs::new(mount_root.join(format!(".Trash-{uid}")));
    dirs.create().map_err(|source| Error::Mkdir {
        path: dirs.root().to_owned(),
        source,
    })?;

    log::debug!("Using user trash at {}", dirs.root().display());
    Ok(dirs)
}
