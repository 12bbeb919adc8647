use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonical source path plus the pieces the later stages need.
#[derive(Debug)]
pub(crate) struct ResolvedPath {
    /// Absolute, symlink-free path. A symlink input resolves to its target.
    pub path: PathBuf,
    /// Device holding the source, from `lstat` on the canonical path.
    pub device: u64,
    /// Final path component of the canonical path.
    pub basename: OsString,
}

pub(crate) fn resolve(input: &Path) -> Result<ResolvedPath> {
    let path = fs::canonicalize(input).map_err(|source| Error::RealPath {
        path: input.to_owned(),
        source,
    })?;

    let metadata = fs::symlink_metadata(&path).map_err(|source| Error::PathStat {
        path: path.clone(),
        source,
    })?;

    let basename = path
        .file_name()
        .ok_or_else(|| Error::NoFileName(path.clone()))?
        .to_owned();

    Ok(ResolvedPath {
        device: metadata.dev(),
        path,
        basename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_components_and_extracts_basename() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("notes.txt");
        std::fs::write(&file, "hello").unwrap();

        let indirect = tmp.path().join("sub").join("..").join("notes.txt");
        std::fs::create_dir(tmp.path().join("sub")).unwrap();

        let resolved = resolve(&indirect).unwrap();
        assert!(resolved.path.is_absolute());
        assert_eq!(resolved.path.file_name().unwrap(), "notes.txt");
        assert_eq!(resolved.basename, "notes.txt");
    }

    #[test]
    fn missing_path_is_a_realpath_failure() {
        let err = resolve(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::RealPath { .. }));
    }

    #[test]
    fn root_has_no_name() {
        let err = resolve(Path::new("/")).unwrap_err();
        assert!(matches!(err, Error::NoFileName(_)));
    }

    #[test]
    fn symlink_input_resolves_to_the_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("target.txt");
        std::fs::write(&target, "data").unwrap();
        let link = tmp.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let resolved = resolve(&link).unwrap();
        assert_eq!(resolved.basename, "target.txt");
    }
}
