use std::ffi::{CString, OsStr, OsString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};
use crate::trash::TrashDirs;
use crate::trashinfo::TRASHINFO_EXT;

/// Timestamp embedded in derived stems.
pub(crate) const STEM_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Stem length used when the filesystem reports no name limit at all.
const UNLIMITED_RANDOM_STEM_LEN: usize = 32;

/// A candidate entry: the `.trashinfo` reservation and the payload path,
/// sharing one stem.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub info_path: PathBuf,
    pub files_path: PathBuf,
}

/// Produces the next candidate pair for `basename`.
///
/// The derived stem is `<basename><%Y%m%d%H%M%S><counter-hex>`. Embedding
/// the deletion time means a burst of same-named deletions rarely has to
/// walk the counter; the counter only disambiguates within one second.
/// When the filesystem's `NAME_MAX` cannot fit the derived info-file name,
/// or when `force_random` is set, the stem is random hex instead, sized to
/// the limit.
pub(crate) fn allocate(
    basename: &OsStr,
    dirs: &TrashDirs,
    deleted_at: NaiveDateTime,
    counter: u32,
    force_random: bool,
) -> Result<Candidate> {
    let timestamp = deleted_at.format(STEM_TIMESTAMP_FORMAT).to_string();
    let counter = format!("{counter:x}");

    let name_max = name_max_for(dirs.files_dir());
    let derived_len =
        basename.as_bytes().len() + timestamp.len() + counter.len() + TRASHINFO_EXT.len();
    let fits = name_max.map_or(true, |max| derived_len <= max);

    let stem: OsString = if fits && !force_random {
        let mut stem = basename.to_os_string();
        stem.push(&timestamp);
        stem.push(&counter);
        stem
    } else {
        let budget = name_max
            .unwrap_or(UNLIMITED_RANDOM_STEM_LEN + TRASHINFO_EXT.len())
            .saturating_sub(TRASHINFO_EXT.len());
        random_stem(budget).map_err(Error::NameAlloc)?.into()
    };

    let mut info_name = stem.clone();
    info_name.push(TRASHINFO_EXT);

    Ok(Candidate {
        info_path: dirs.info_dir().join(&info_name),
        files_path: dirs.files_dir().join(&stem),
    })
}

/// Random stem of at most `len` uppercase hex chars, from the OS CSPRNG.
///
/// One byte expands to two hex chars, so an odd `len` is rounded down.
pub(crate) fn random_stem(len: usize) -> io::Result<String> {
    let len = len & !1;
    if len == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no room for a random stem",
        ));
    }

    let mut bytes = vec![0u8; len / 2];
    OsRng.try_fill_bytes(&mut bytes).map_err(io::Error::other)?;

    let mut stem = String::with_capacity(len);
    for byte in &bytes {
        stem.push_str(&format!("{byte:02X}"));
    }
    Ok(stem)
}

/// `NAME_MAX` of the filesystem holding `dir`, `None` when unset/unlimited.
fn name_max_for(dir: &Path) -> Option<usize> {
    let path = CString::new(dir.as_os_str().as_bytes()).ok()?;
    let max = unsafe { libc::pathconf(path.as_ptr(), libc::_PC_NAME_MAX) };
    usize::try_from(max).ok()
}
