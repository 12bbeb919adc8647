//! Recycle Bin adapter over the `IFileOperation` shell interface.
//!
//! This backend is deliberately thin: parse the path, hand it to the shell,
//! report ok or error. All placement, naming and restore metadata is the
//! shell's business.

use std::path::Path;

use windows::core::HSTRING;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
    COINIT_DISABLE_OLE1DDE,
};
use windows::Win32::UI::Shell::{
    FileOperation, IFileOperation, IShellItem, SHCreateItemFromParsingName, FOFX_ADDUNDORECORD,
    FOFX_EARLYFAILURE, FOFX_RECYCLEONDELETE, FOF_NOERRORUI, FOF_SILENT,
};

use crate::Status;

pub(crate) fn delete(path: &Path, init_com: bool) -> Status {
    unsafe {
        if init_com {
            let hr = CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE);
            if hr.is_err() {
                return Status::RenameFailed;
            }
        }

        let result = recycle(path);

        if init_com {
            // required after both S_OK and S_FALSE from CoInitializeEx
            CoUninitialize();
        }

        result
    }
}

unsafe fn recycle(path: &Path) -> Status {
    let operation: IFileOperation = match CoCreateInstance(&FileOperation, None, CLSCTX_ALL) {
        Ok(operation) => operation,
        Err(_) => return Status::RenameFailed,
    };

    if operation
        .SetOperationFlags(
            FOFX_ADDUNDORECORD | FOFX_RECYCLEONDELETE | FOF_SILENT | FOF_NOERRORUI
                | FOFX_EARLYFAILURE,
        )
        .is_err()
    {
        return Status::RenameFailed;
    }

    let item: IShellItem =
        match SHCreateItemFromParsingName(&HSTRING::from(path.as_os_str()), None) {
            Ok(item) => item,
            Err(_) => return Status::RealPathFailed,
        };

    if operation.DeleteItem(&item, None).is_err() {
        return Status::RenameFailed;
    }

    match operation.PerformOperations() {
        Ok(()) => Status::Ok,
        Err(_) => Status::RenameFailed,
    }
}
