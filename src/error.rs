use std::{io, path::PathBuf};

use displaydoc::Display;
use thiserror::Error;

use crate::Status;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Internal failure detail behind the integer status surface.
///
/// Each variant maps onto exactly one [`Status`] code; the richer context
/// (paths, io sources) only ever shows up in log output.
#[derive(Debug, Display, Error)]
pub(crate) enum Error {
    /** Failed to resolve the real path of {path}: {source} */
    RealPath { path: PathBuf, source: io::Error },

    /** Neither $XDG_DATA_HOME nor $HOME is set */
    Homeless,

    /** Failed to stat the data home at {path}: {source} */
    HomeStat { path: PathBuf, source: io::Error },

    /** Failed to stat {path}: {source} */
    PathStat { path: PathBuf, source: io::Error },

    /** Failed to create trash directories under {path}: {source} */
    Mkdir { path: PathBuf, source: io::Error },

    /** The system mount table could not be read: {0} */
    MountTable(#[source] io::Error),

    /** No mount point found for device {device} */
    MountLookup { device: u64 },

    /** The trash dir at {path} is unusable: {source} */
    TopDirStat { path: PathBuf, source: io::Error },

    /** The trash dir at {0} does not have the sticky bit set */
    NotSticky(PathBuf),

    /** The trash dir at {0} is a symlink */
    IsSymlink(PathBuf),

    /** The path {0} has no final component */
    NoFileName(PathBuf),

    /** Failed to allocate a candidate name: {0} */
    NameAlloc(#[source] io::Error),

    /** Failed to write the info file at {path}: {source} */
    TrashInfo { path: PathBuf, source: io::Error },

    /** Failed to move {path} into the trash: {source} */
    Rename { path: PathBuf, source: io::Error },

    /** Exhausted unique name candidates, including random ones */
    Collision,

    /** Failed to refresh the directory size cache: {0} */
    DirCache(#[source] io::Error),
}

impl Error {
    /// The status code reported for this failure at the public boundary.
    pub(crate) fn status(&self) -> Status {
        match self {
            Error::RealPath { .. } => Status::RealPathFailed,
            Error::Homeless => Status::HomeTrashFailed,
            Error::HomeStat { .. } => Status::HomeStatFailed,
            Error::PathStat { .. } => Status::PathStatFailed,
            Error::Mkdir { .. } => Status::MkdirFailed,
            Error::MountTable(_) | Error::MountLookup { .. } => Status::TopDirFailed,
            Error::TopDirStat { .. } | Error::NotSticky(_) | Error::IsSymlink(_) => {
                Status::TopDirFailed
            }
            Error::NoFileName(_) => Status::NameFailed,
            Error::NameAlloc(_) => Status::NameAllocFailed,
            Error::TrashInfo { .. } => Status::TrashInfoFailed,
            Error::Rename { .. } => Status::RenameFailed,
            Error::Collision => Status::CollisionFailed,
            Error::DirCache(_) => Status::DirCacheFailed,
        }
    }
}
