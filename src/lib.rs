//! Move files and directories to the operating system's trash, so they can
//! be restored through the native user interfaces instead of being unlinked
//! for good.
//!
//! On Linux and the BSDs this crate implements the FreeDesktop.org trash
//! specification v1.0, including the top-dir fallback cases and the
//! `directorysizes` cache, see
//! <https://specifications.freedesktop.org/trash-spec/trashspec-1.0.html>.
//! On Windows the `IFileOperation` shell interface does the work, on macOS
//! `NSFileManager`, so trashed items land in the Recycle Bin / Trash the
//! same way a file-manager delete would put them there.
//!
//! The whole surface is one call returning a stable integer-coded status:
//!
//! ```no_run
//! use trashcan::{soft_delete, status_message, Status};
//!
//! let status = soft_delete("somefile.txt");
//! if status != Status::Ok {
//!     eprintln!("could not trash: {}", status_message(status.code()));
//! }
//! ```
//!
//! ## Symlinks
//! The input path is canonicalised before anything else, final component
//! included. Trashing a symlink therefore moves its *target*; the link
//! itself stays behind, dangling.
//!
//! ## Concurrency
//! Independent calls share no process state. Racing deletions of the same
//! candidate name are serialised by the exclusive create of the
//! `.trashinfo` sidecar: exactly one writer wins a stem, the others retry
//! with a new one.
//!
//! ## What this crate does not do
//! Listing, restoring and emptying the trash are the trash browser's job.
//! There is no cross-device fallback either: when no trash directory is
//! reachable with a single `rename` on the source's device, the call fails
//! instead of silently copying.

use std::path::Path;

mod status;

pub use status::{status_message, Status};

#[cfg(all(unix, not(target_os = "macos")))]
mod error;
#[cfg(all(unix, not(target_os = "macos")))]
mod escape;
#[cfg(all(unix, not(target_os = "macos")))]
mod mounts;
#[cfg(all(unix, not(target_os = "macos")))]
mod names;
#[cfg(all(unix, not(target_os = "macos")))]
mod resolve;
#[cfg(all(unix, not(target_os = "macos")))]
mod size_cache;
#[cfg(all(unix, not(target_os = "macos")))]
mod trash;
#[cfg(all(unix, not(target_os = "macos")))]
mod trashinfo;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(windows)]
mod windows;

#[cfg(not(any(unix, windows)))]
compile_error!("no trash backend for this platform");

/// Moves the file or directory at `path` to the trash.
///
/// Returns [`Status::Ok`] on success and a negative status otherwise; the
/// matching text is available through [`status_message`]. On failure the
/// entry stays where it was, with one exception: when only the
/// `directorysizes` cache refresh fails after the move itself went through,
/// the entry is already in the trash and [`Status::DirCacheFailed`] is
/// returned.
///
/// Only `XDG_DATA_HOME` and `HOME` are consulted from the environment, and
/// only by the freedesktop backend.
pub fn soft_delete<P: AsRef<Path>>(path: P) -> Status {
    soft_delete_inner(path.as_ref())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn soft_delete_inner(path: &Path) -> Status {
    match trash::operations::put(path) {
        Ok(()) => Status::Ok,
        Err(e) => {
            log::debug!("soft delete of {} failed: {e}", path.display());
            e.status()
        }
    }
}

#[cfg(target_os = "macos")]
fn soft_delete_inner(path: &Path) -> Status {
    macos::delete(path)
}

#[cfg(windows)]
fn soft_delete_inner(path: &Path) -> Status {
    windows::delete(path, true)
}

/// Like [`soft_delete`], but lets the caller decide whether this call sets
/// up COM or runs inside an apartment the application already initialised.
///
/// Pass `init_com = false` when the process initialises COM itself; the
/// call then performs no COM setup or teardown of its own.
#[cfg(windows)]
pub fn soft_delete_com<P: AsRef<Path>>(path: P, init_com: bool) -> Status {
    windows::delete(path.as_ref(), init_com)
}
