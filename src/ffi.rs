//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using unmd from other languages
//! such as C#, Python, and Node.js. Options are passed as a JSON object using
//! the camelCase keys accepted by [`OptionOverrides`].

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::options::OptionOverrides;
use crate::{convert, trim};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct UnmdResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `unmd_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `unmd_free_string`.
    pub error: *mut c_char,
}

impl UnmdResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

/// Read an optional C string. Null reads as `None`.
unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> Result<Option<&'a str>, String> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(Some)
        .map_err(|_| format!("Invalid UTF-8 {}", what))
}

/// Convert Markdown to plain text.
///
/// A null `markdown` converts as the empty string. A null or empty
/// `options_json` uses the defaults.
///
/// # Safety
///
/// `markdown` and `options_json` must each be null or a valid
/// null-terminated string. The returned result must be freed with
/// `unmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unmd_convert(
    markdown: *const c_char,
    options_json: *const c_char,
) -> UnmdResult {
    let markdown = match read_str(markdown, "markdown") {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => return UnmdResult::error(e),
    };

    let options_json = match read_str(options_json, "options") {
        Ok(s) => s.filter(|s| !s.trim().is_empty()),
        Err(e) => return UnmdResult::error(e),
    };

    let overrides = match options_json.map(OptionOverrides::from_json).transpose() {
        Ok(overrides) => overrides.unwrap_or_default(),
        Err(e) => return UnmdResult::error(e.to_string()),
    };

    UnmdResult::success(convert(markdown, &overrides.resolve()))
}

/// Strip whitespace and invisible characters from both ends of a string.
///
/// # Safety
///
/// `text` must be null or a valid null-terminated string.
/// The returned result must be freed with `unmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn unmd_trim(text: *const c_char) -> UnmdResult {
    match read_str(text, "text") {
        Ok(s) => UnmdResult::success(trim(s.unwrap_or_default()).to_string()),
        Err(e) => UnmdResult::error(e),
    }
}

/// Free a result returned by any unmd function.
///
/// # Safety
///
/// The `result` must have been returned by an unmd function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn unmd_free_result(result: UnmdResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by unmd.
///
/// # Safety
///
/// The `ptr` must have been allocated by unmd.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn unmd_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the unmd library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn unmd_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
