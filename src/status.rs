use std::fmt;

/// Outcome of a soft delete, backed by a stable integer code.
///
/// `0` is success, every failure is negative. The codes are part of the API
/// contract and never change meaning between releases, so they are safe to
/// store, compare and pass across an FFI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// Successful
    Ok = 0,
    /// Canonicalising the input path failed
    RealPathFailed = -1,
    /// Neither `$XDG_DATA_HOME` nor `$HOME` is usable
    HomeTrashFailed = -2,
    /// Stat on the data-home directory failed
    HomeStatFailed = -3,
    /// Stat on the input path failed
    PathStatFailed = -4,
    /// Creating the trash directories failed
    MkdirFailed = -5,
    /// No top-dir trash could be established
    TopDirFailed = -6,
    /// The input path has no final component
    NameFailed = -7,
    /// Reading the clock failed
    TimeFailed = -8,
    /// Allocating a candidate name failed
    NameAllocFailed = -9,
    /// The info file could not be written (non-collision)
    TrashInfoFailed = -10,
    /// The move into the trash failed
    RenameFailed = -11,
    /// Retries exhausted, including random names
    CollisionFailed = -12,
    /// The directory size cache could not be refreshed
    DirCacheFailed = -13,
}

impl Status {
    /// The stable integer code of this status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// True only for [`Status::Ok`].
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// Human-readable message for this status.
    pub fn message(self) -> &'static str {
        status_message(self.code())
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> i32 {
        status.code()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Maps a status code to a human-readable message.
///
/// Codes outside the table yield `"Unknown status."`.
pub fn status_message(code: i32) -> &'static str {
    match code {
        0 => "Successful.",
        -1 => "Failed to retrieve real path.",
        -2 => "Failed to retrieve home trash path.",
        -3 => "Failed to stat home trash path.",
        -4 => "Failed to stat path.",
        -5 => "Failed to create trash directories.",
        -6 => "Failed to retrieve top dir trash path.",
        -7 => "Failed to retrieve filename or directory name from path.",
        -8 => "Failed to retrieve current time.",
        -9 => "Failed to retrieve target filenames.",
        -10 => "Failed to create and write trash info file.",
        -11 => "Failed to move files to trash.",
        -12 => "Failed to generate unique name.",
        -13 => "Failed to update directory size cache.",
        _ => "Unknown status.",
    }
}
