use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::escape;

pub(crate) const TRASHINFO_EXT: &str = ".trashinfo";

/// The same format nautilus and dolphin use for `DeletionDate`.
pub(crate) const DELETION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 1:1 representation of a `.trashinfo` sidecar before it hits the disk.
#[derive(Debug)]
pub(crate) struct TrashInfo<'a> {
    pub original_path: &'a Path,
    pub deleted_at: NaiveDateTime,
}

/// How an exclusive-create attempt ended.
///
/// A collision is not an error: it is the signal that another writer owns
/// the candidate stem and the caller has to pick a new one.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    Created,
    Collision,
}

impl TrashInfo<'_> {
    fn render(&self) -> String {
        format!(
            "[Trash Info]\nPath={}\nDeletionDate={}\n",
            escape::escape_path(self.original_path.as_os_str().as_bytes()),
            self.deleted_at.format(DELETION_DATE_FORMAT),
        )
    }

    /// Claims `info_path` with an exclusive create and writes the body.
    ///
    /// When two actors race for the same stem, kernel-level `O_EXCL`
    /// atomicity guarantees exactly one sees [`WriteOutcome::Created`] and
    /// the other [`WriteOutcome::Collision`]. A file that was created but
    /// could not be fully written is removed before the error is returned,
    /// so a failed call never leaves a half-claimed stem behind.
    pub(crate) fn write_new(&self, info_path: &Path) -> io::Result<WriteOutcome> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(info_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(WriteOutcome::Collision)
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = file.write_all(self.render().as_bytes()) {
            drop(file);
            let _ = fs::remove_file(info_path);
            return Err(e);
        }

        Ok(WriteOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
    }

    #[test]
    fn body_is_bit_exact() {
        let info = TrashInfo {
            original_path: Path::new("/tmp/u/notes.txt"),
            deleted_at: sample_time(),
        };
        assert_eq!(
            info.render(),
            "[Trash Info]\nPath=/tmp/u/notes.txt\nDeletionDate=2024-05-01T12:34:56\n"
        );
    }

    #[test]
    fn body_escapes_the_original_path() {
        let info = TrashInfo {
            original_path: Path::new("/tmp/u/a file %.txt"),
            deleted_at: sample_time(),
        };
        assert_eq!(
            info.render(),
            "[Trash Info]\nPath=/tmp/u/a%20file%20%25.txt\nDeletionDate=2024-05-01T12:34:56\n"
        );
    }

    #[test]
    fn second_create_reports_collision() {
        let dir = tempfile::tempdir().unwrap();
        let info_path: PathBuf = dir.path().join("notes.txt202405011234560.trashinfo");
        let info = TrashInfo {
            original_path: Path::new("/tmp/u/notes.txt"),
            deleted_at: sample_time(),
        };

        assert_eq!(info.write_new(&info_path).unwrap(), WriteOutcome::Created);
        assert_eq!(info.write_new(&info_path).unwrap(), WriteOutcome::Collision);

        // the winner's body is intact
        let body = std::fs::read_to_string(&info_path).unwrap();
        assert!(body.ends_with('\n'));
        assert!(body.contains("Path=/tmp/u/notes.txt"));
    }
}
