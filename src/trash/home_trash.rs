use std::env;
use std::path::PathBuf;

use super::TrashDirs;
use crate::error::{Error, Result};

/// The user's home trash (`$XDG_DATA_HOME/Trash`, defaulting to
/// `$HOME/.local/share/Trash`), together with the data home it hangs off.
///
/// Nothing is created here; the caller decides whether this location
/// applies before touching the disk.
pub(super) fn home_trash() -> Result<(PathBuf, TrashDirs)> {
    let data_home = match env::var_os("XDG_DATA_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = env::var_os("HOME").ok_or(Error::Homeless)?;
            PathBuf::from(home).join(".local").join("share")
        }
    };

    let dirs = TrashDirs::new(data_home.join("Trash"));
    Ok((data_home, dirs))
}
