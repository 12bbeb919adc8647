use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

use super::TrashDirs;
use crate::error::{Error, Result};

/// Case 1 of the freedesktop spec: `<mount>/.Trash/<uid>`.
///
/// Only admitted when an administrator already provided `.Trash` at the
/// mount root, it is not a symlink, and it carries the sticky bit.
/// Every failure here makes the caller fall back to case 2.
pub(super) fn admin_trash(mount_root: &Path) -> Result<TrashDirs> {
    let trash_dir = mount_root.join(".Trash");
    let meta = fs::symlink_metadata(&trash_dir).map_err(|source| Error::TopDirStat {
        path: trash_dir.clone(),
        source,
    })?;

    if meta.file_type().is_symlink() {
        log::warn!(
            "Rejecting admin trash at {} because it is a symlink",
            trash_dir.display()
        );
        return Err(Error::IsSymlink(trash_dir));
    }

    if meta.permissions().mode() & 0o1000 == 0 {
        log::warn!(
            "Rejecting admin trash at {} because the sticky bit is not set",
            trash_dir.display()
        );
        return Err(Error::NotSticky(trash_dir));
    }

    let uid = unsafe { libc::getuid() };
    let dirs = TrashDirs::new(trash_dir.join(uid.to_string()));
    dirs.create().map_err(|source| Error::Mkdir {
        path: dirs.root().to_owned(),
        source,
    })?;

    log::debug!("Using admin trash at {}", dirs.root().display());
    Ok(dirs)
}
