use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Returns the mount point of the filesystem identified by `device`.
///
/// A device id uniquely identifies a mounted filesystem at a point in time,
/// so the first matching entry wins. Entries whose mount point cannot be
/// statted (say, another user's private mount namespace leftovers) are
/// skipped rather than failing the whole lookup.
pub(crate) fn mount_point_of(device: u64) -> Result<PathBuf> {
    for mount_point in mount_points()? {
        match fs::symlink_metadata(&mount_point) {
            Ok(meta) if meta.dev() == device => return Ok(mount_point),
            _ => continue,
        }
    }
    Err(Error::MountLookup { device })
}

#[cfg(target_os = "linux")]
fn mount_points() -> Result<Vec<PathBuf>> {
    let table = fs::read("/proc/mounts").map_err(Error::MountTable)?;
    Ok(parse_mount_points(&table))
}

/// Field two of every mount table line, with the octal escapes the kernel
/// applies (`\040` space, `\011` tab, `\012` newline, `\134` backslash)
/// undone.
#[cfg(target_os = "linux")]
fn parse_mount_points(table: &[u8]) -> Vec<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    table
        .split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split(|b| *b == b' ').nth(1))
        .map(|field| PathBuf::from(OsString::from_vec(unescape_mount_field(field))))
        .collect()
}

#[cfg(target_os = "linux")]
fn unescape_mount_field(field: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.len());
    let mut i = 0;
    while i < field.len() {
        if field[i] == b'\\' && i + 3 < field.len() {
            let digits = &field[i + 1..i + 4];
            if digits[0] <= b'3' && digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                out.push((digits[0] - b'0') * 64 + (digits[1] - b'0') * 8 + (digits[2] - b'0'));
                i += 4;
                continue;
            }
        }
        out.push(field[i]);
        i += 1;
    }
    out
}

#[cfg(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd",
    target_os = "netbsd"
))]
fn mount_points() -> Result<Vec<PathBuf>> {
    use std::ffi::{CStr, OsString};
    use std::os::unix::ffi::OsStringExt;

    #[cfg(not(target_os = "netbsd"))]
    type MountEntry = libc::statfs;
    #[cfg(target_os = "netbsd")]
    type MountEntry = libc::statvfs;

    let mut entries: *mut MountEntry = std::ptr::null_mut();
    let count = unsafe { libc::getmntinfo(&mut entries, libc::MNT_WAIT) };
    if count <= 0 {
        return Err(Error::MountTable(std::io::Error::last_os_error()));
    }

    // getmntinfo hands out storage owned by libc; copy out, never free.
    let entries = unsafe { std::slice::from_raw_parts(entries, count as usize) };
    Ok(entries
        .iter()
        .map(|entry| {
            let name = unsafe { CStr::from_ptr(entry.f_mntonname.as_ptr()) };
            PathBuf::from(OsString::from_vec(name.to_bytes().to_vec()))
        })
        .collect())
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_second_field_of_each_line() {
        let table = b"/dev/sda1 / ext4 rw,relatime 0 0\n\
                      tmpfs /tmp tmpfs rw,nosuid 0 0\n\
                      foo /mnt/with\\040space ext4 rw 0 0\n";
        let points = parse_mount_points(table);
        assert_eq!(
            points,
            vec![
                PathBuf::from("/"),
                PathBuf::from("/tmp"),
                PathBuf::from("/mnt/with space"),
            ]
        );
    }

    #[test]
    fn unescaping_handles_all_kernel_escapes() {
        assert_eq!(unescape_mount_field(b"a\\040b"), b"a b");
        assert_eq!(unescape_mount_field(b"a\\011b"), b"a\tb");
        assert_eq!(unescape_mount_field(b"a\\012b"), b"a\nb");
        assert_eq!(unescape_mount_field(b"a\\134b"), b"a\\b");
        // not an octal escape, left alone
        assert_eq!(unescape_mount_field(b"a\\0zb"), b"a\\0zb");
        assert_eq!(unescape_mount_field(b"trailing\\04"), b"trailing\\04");
    }

    #[test]
    fn finds_the_root_mount() {
        let device = fs::symlink_metadata(Path::new("/")).unwrap().dev();
        assert!(mount_point_of(device).is_ok());
    }

    #[test]
    fn unknown_device_fails_lookup() {
        let err = mount_point_of(u64::MAX).unwrap_err();
        assert!(matches!(err, Error::MountLookup { .. }));
    }
}
