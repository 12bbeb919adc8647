//! Trash adapter over `NSFileManager`.
//!
//! This backend is deliberately thin: build a file URL and let Foundation
//! move the item. Placement, naming and "Put Back" metadata are the
//! system's business.

use std::path::Path;

use objc2_foundation::{NSFileManager, NSString, NSURL};

use crate::Status;

pub(crate) fn delete(path: &Path) -> Status {
    let Some(path) = path.to_str() else {
        return Status::RealPathFailed;
    };

    unsafe {
        let manager = NSFileManager::defaultManager();
        let url = NSURL::fileURLWithPath(&NSString::from_str(path));

        match manager.trashItemAtURL_resultingItemURL_error(&url, None) {
            Ok(()) => Status::Ok,
            Err(_) => Status::RenameFailed,
        }
    }
}
