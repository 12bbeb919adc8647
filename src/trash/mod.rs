use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::{DirBuilderExt, MetadataExt};
use std::path::{Path, PathBuf};

mod admin_trash;
mod home_trash;
mod user_trash;

pub(crate) mod operations;

/// One trash location: its root plus the `info` and `files` subdirectories.
///
/// The directories are created lazily, owner-only (mode 0700), and are
/// never removed again; re-running against an existing location leaves its
/// permissions and contents untouched apart from new entries.
#[derive(Debug)]
pub(crate) struct TrashDirs {
    root: PathBuf,
    info_dir: PathBuf,
    files_dir: PathBuf,
}

impl TrashDirs {
    pub(crate) fn new(root: PathBuf) -> Self {
        let info_dir = root.join("info");
        let files_dir = root.join("files");
        Self {
            root,
            info_dir,
            files_dir,
        }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Directory where `.trashinfo` files are stored.
    pub(crate) fn info_dir(&self) -> &Path {
        &self.info_dir
    }

    /// Directory where trashed files are stored.
    pub(crate) fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// Creates `info` and `files` (and any missing parents) with mode 0700.
    pub(crate) fn create(&self) -> io::Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true).mode(0o700);
        builder.create(&self.info_dir)?;
        builder.create(&self.files_dir)
    }
}

/// Chooses the trash location for an already-resolved source path.
///
/// Home trash when the source shares a device with the data home;
/// otherwise the top-dir cases at the source's mount point, trying the
/// administrator-provided `.Trash/<uid>` before falling back to creating
/// `.Trash-<uid>`.
pub(crate) fn locate_for(
    resolved: &crate::resolve::ResolvedPath,
) -> crate::error::Result<TrashDirs> {
    use crate::error::Error;

    let (data_home, home) = home_trash::home_trash()?;

    let mut builder = DirBuilder::new();
    builder.recursive(true).mode(0o700);
    builder.create(&data_home).map_err(|source| Error::Mkdir {
        path: data_home.clone(),
        source,
    })?;

    let data_home_meta = fs::symlink_metadata(&data_home).map_err(|source| Error::HomeStat {
        path: data_home.clone(),
        source,
    })?;

    if data_home_meta.dev() == resolved.device {
        home.create().map_err(|source| Error::Mkdir {
            path: home.root().to_owned(),
            source,
        })?;
        log::debug!("Using home trash at {}", home.root().display());
        return Ok(home);
    }

    let mount_root = crate::mounts::mount_point_of(resolved.device)?;

    match admin_trash::admin_trash(&mount_root) {
        Ok(dirs) => Ok(dirs),
        Err(reason) => {
            log::debug!("Admin trash not usable ({reason}), trying user trash");
            user_trash::user_trash(&mount_root)
        }
    }
}
