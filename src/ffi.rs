//! `ffi` hidden submodule gathers conversions that every native call in `ggsdl` needs.
//!

use crate::error::{Error, Result};
use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
    path::Path,
};

/// Converts Rust string into nul-terminated C string.
///
pub(crate) fn c_string(text: &str) -> Result<CString> {
    CString::new(text).map_err(|_| {
        Error::InvalidArgument(format!("`{text}` contains an interior nul byte"))
    })
}
/// Converts path into nul-terminated C string.
///
/// SDL expects UTF-8 paths on every platform.
///
pub(crate) fn c_path(path: &Path) -> Result<CString> {
    path.to_str()
        .ok_or_else(|| {
            Error::InvalidArgument(format!("path `{}` is not valid UTF-8", path.display()))
        })
        .and_then(c_string)
}
/// Copies C string that is owned by the native library.
///
/// # Safety
/// `ptr` must be null or point to a nul-terminated string.
///
pub(crate) unsafe fn string_from(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

/// Turns SDL's negative status codes into [`Error::Native`].
///
pub(crate) fn check(operation: &'static str, code: c_int) -> Result<c_int> {
    if code < 0 {
        Err(Error::native(operation))
    } else {
        Ok(code)
    }
}
/// Converts unsigned value into `c_int`.
///
pub(crate) fn to_c_int(value: u32, what: &str) -> Result<c_int> {
    c_int::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{what} {value} exceeds `c_int::MAX`")))
}
