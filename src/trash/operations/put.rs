use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::{Error, Result};
use crate::trashinfo::{TrashInfo, WriteOutcome};
use crate::{names, resolve, size_cache, trash};

/// Moves `input` into the trash location chosen for its device.
///
/// The sequence is fixed: the info file is on disk before the rename, the
/// rename completes before the size cache refresh. Candidate stems are
/// claimed through the info file's exclusive create; on a collision the
/// counter advances, and once it wraps the allocator switches to random
/// names. A second collision under random names aborts the call.
pub(crate) fn put(input: &Path) -> Result<()> {
    let resolved = resolve::resolve(input)?;
    let dirs = trash::locate_for(&resolved)?;

    // captured once: the same instant names the entry and dates the sidecar
    let deleted_at = Local::now().naive_local();
    let info = TrashInfo {
        original_path: &resolved.path,
        deleted_at,
    };

    let mut counter: u32 = 0;
    let mut force_random = false;

    loop {
        let candidate = names::allocate(&resolved.basename, &dirs, deleted_at, counter, force_random)?;

        match info.write_new(&candidate.info_path) {
            Ok(WriteOutcome::Created) => {
                if let Err(source) = fs::rename(&resolved.path, &candidate.files_path) {
                    log::error!(
                        "Failed to move {} into the trash, reverting info file",
                        resolved.path.display()
                    );
                    if fs::remove_file(&candidate.info_path).is_err() {
                        log::error!(
                            "Failed to revert info file at {}",
                            candidate.info_path.display()
                        );
                    }
                    return Err(Error::Rename {
                        path: resolved.path.clone(),
                        source,
                    });
                }

                // not part of the commit: the entry is in the trash even if
                // this fails, and the next successful delete rebuilds it
                size_cache::refresh(&dirs)?;

                log::debug!(
                    "Trashed {} as {}",
                    resolved.path.display(),
                    candidate.files_path.display()
                );
                return Ok(());
            }
            Ok(WriteOutcome::Collision) => {
                if force_random {
                    return Err(Error::Collision);
                }
                counter = counter.wrapping_add(1);
                if counter == 0 {
                    force_random = true;
                }
                log::trace!("Candidate name already taken, retrying");
            }
            Err(source) => {
                return Err(Error::TrashInfo {
                    path: candidate.info_path,
                    source,
                })
            }
        }
    }
}
