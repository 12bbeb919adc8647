use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::names;
use crate::trash::TrashDirs;
use crate::trashinfo::TRASHINFO_EXT;

pub(crate) const CACHE_FILE_NAME: &str = "directorysizes";

/// Temp file name length, within the `_POSIX_NAME_MAX` floor of 14.
const TEMP_NAME_LEN: usize = 14;

/// Rewrites `<root>/directorysizes` from the current contents of `files/`.
///
/// Each directory entry contributes one `<size> <mtime> <name>` line, where
/// size is the recursive byte sum of its regular files and mtime comes from
/// the matching `.trashinfo`. The new cache is staged in a sibling temp
/// file and renamed into place, so concurrent readers see the old or the
/// new version, never a partial one. The temp file is unlinked on every
/// failure path.
pub(crate) fn refresh(dirs: &TrashDirs) -> Result<()> {
    let temp_name = names::random_stem(TEMP_NAME_LEN).map_err(Error::DirCache)?;
    let temp_path = dirs.root().join(temp_name);

    if let Err(source) = write_entries(dirs, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::DirCache(source));
    }

    if let Err(source) = fs::rename(&temp_path, dirs.root().join(CACHE_FILE_NAME)) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::DirCache(source));
    }

    Ok(())
}

fn write_entries(dirs: &TrashDirs, temp_path: &Path) -> io::Result<()> {
    let mut temp = File::create(temp_path)?;

    for entry in fs::read_dir(dirs.files_dir())? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let mut info_name = name.clone();
        info_name.push(TRASHINFO_EXT);
        let info_meta = match fs::symlink_metadata(dirs.info_dir().join(&info_name)) {
            Ok(meta) => meta,
            // an entry without a sidecar is not ours to report
            Err(_) => continue,
        };

        let size = dir_size(&entry.path())?;
        temp.write_all(format!("{} {} ", size, info_meta.mtime()).as_bytes())?;
        temp.write_all(name.as_bytes())?;
        temp.write_all(b"\n")?;
    }

    Ok(())
}

/// Recursive byte size of the regular files beneath `dir`.
///
/// Child directories are followed, symlinks are not; symlinks, sockets,
/// fifos and device nodes contribute nothing.
fn dir_size(dir: &Path) -> io::Result<u64> {
    let mut total = 0u64;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let meta = fs::symlink_metadata(entry.path())?;
        if meta.is_dir() {
            total += dir_size(&entry.path())?;
        } else if meta.file_type().is_file() {
            total += meta.len();
        }
    }
    Ok(total)
}
