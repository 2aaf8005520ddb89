//! C-compatible FFI API for cross-language bindings.
//!
//! Options cross the boundary as JSON documents (the same format read by
//! [`ConvertOptions::from_json`]) and come back as the renderer argument
//! string, ready to be placed on the renderer's command line.
//!
//! ## Memory management
//! - Strings returned through `out_*` pointers are allocated on the Rust heap.
//! - Callers **must** free them with `pflags_free_string`.
//! - Passing a null pointer to the free function is a no-op.
//!
//! ## Error handling
//! - Functions that can fail return a `c_int`:
//!   `0` success, `1` null pointer, `2` invalid UTF-8, `3` invalid options
//!   JSON, `4` output contained a NUL byte.
//! - Error details can be retrieved via `pflags_last_error`.
//!
//! ## Thread safety
//! - `pflags_last_error` uses a thread-local, so it is safe to call from
//!   multiple threads.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

use crate::options::ConvertOptions;
use crate::serializer::{to_args, to_tokens};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Read a null-terminated UTF-8 string, recording an error on failure.
///
/// # Safety
/// `ptr` must be non-null and point to a valid null-terminated string.
unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, c_int> {
    CStr::from_ptr(ptr).to_str().map_err(|e| {
        set_last_error(&format!("Invalid UTF-8 in {what}: {e}"));
        2
    })
}

fn parse_options(json: &str) -> Result<ConvertOptions, c_int> {
    ConvertOptions::from_json(json).map_err(|e| {
        set_last_error(&e.to_string());
        3
    })
}

/// Hand `s` to the caller through `out`.
///
/// # Safety
/// `out` must be a valid pointer.
unsafe fn write_out(s: String, out: *mut *mut c_char) -> c_int {
    match CString::new(s) {
        Ok(cs) => {
            *out = cs.into_raw();
            0
        }
        Err(_) => {
            *out = ptr::null_mut();
            set_last_error("Output contained a null byte");
            4
        }
    }
}

/// Write the outcome of a serialization to `out`, or pass its error code on.
///
/// # Safety
/// `out` must be a valid pointer.
unsafe fn finish(result: Result<String, c_int>, out: *mut *mut c_char) -> c_int {
    match result {
        Ok(s) => write_out(s, out),
        Err(code) => code,
    }
}

unsafe fn serialize_json(options_json: *const c_char) -> Result<String, c_int> {
    let options = parse_options(read_str(options_json, "options JSON")?)?;
    Ok(to_args(&options))
}

unsafe fn serialize_json_with_base(
    base_json: *const c_char,
    overrides_json: *const c_char,
) -> Result<String, c_int> {
    let base = parse_options(read_str(base_json, "base JSON")?)?;
    let mut options = ConvertOptions::from_base(&base);
    if !overrides_json.is_null() {
        let overrides = read_str(overrides_json, "overrides JSON")?;
        options.apply_json_overrides(overrides).map_err(|e| {
            set_last_error(&e.to_string());
            3
        })?;
    }
    Ok(to_args(&options))
}

unsafe fn tokens_json(options_json: *const c_char) -> Result<String, c_int> {
    let options = parse_options(read_str(options_json, "options JSON")?)?;
    Ok(serde_json::to_string(&to_tokens(&options)).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Core API
// ---------------------------------------------------------------------------

/// Serialize conversion options into the renderer argument string.
///
/// # Parameters
/// - `options_json`: null-terminated UTF-8 JSON options document
/// - `out_args`: on success, receives a pointer to the null-terminated
///   argument string
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `pflags_last_error`.
///
/// # Safety
/// - `options_json` must be a valid null-terminated string.
/// - `out_args` must be a valid pointer.
/// - The caller must free `*out_args` with `pflags_free_string`.
#[no_mangle]
pub unsafe extern "C" fn pflags_serialize_json(
    options_json: *const c_char,
    out_args: *mut *mut c_char,
) -> c_int {
    if options_json.is_null() || out_args.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    finish(serialize_json(options_json), out_args)
}

/// Serialize options built from a shared base configuration.
///
/// The base's settings are copied (margins excepted, which always start
/// empty on the copy) and the top-level keys of `overrides_json` are then
/// applied on top. Pass `NULL` for `overrides_json` to serialize the copy
/// as-is.
///
/// # Safety
/// - `base_json` must be a valid null-terminated string.
/// - `overrides_json`, if non-null, must be a valid null-terminated string.
/// - `out_args` must be a valid pointer; free `*out_args` with
///   `pflags_free_string`.
#[no_mangle]
pub unsafe extern "C" fn pflags_serialize_json_with_base(
    base_json: *const c_char,
    overrides_json: *const c_char,
    out_args: *mut *mut c_char,
) -> c_int {
    if base_json.is_null() || out_args.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    finish(serialize_json_with_base(base_json, overrides_json), out_args)
}

/// Serialize conversion options into a JSON array of argument tokens.
///
/// # Safety
/// Same as `pflags_serialize_json`.
#[no_mangle]
pub unsafe extern "C" fn pflags_tokens_json(
    options_json: *const c_char,
    out_tokens_json: *mut *mut c_char,
) -> c_int {
    if options_json.is_null() || out_tokens_json.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    finish(tokens_json(options_json), out_tokens_json)
}

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free a string returned through an `out_*` pointer.
///
/// # Safety
/// `s` must have been returned by Rust's `CString::into_raw`.
#[no_mangle]
pub unsafe extern "C" fn pflags_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Retrieve the last error message. Returns a null-terminated string.
///
/// The returned pointer is valid until the next `pflags_*` call on the same
/// thread. The caller should **not** free this pointer – it is managed
/// internally.
///
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn pflags_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        let borrow = e.borrow();
        match borrow.as_ref() {
            Some(cs) => cs.as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Return the library version as a null-terminated string.
/// The caller must **not** free this pointer.
#[no_mangle]
pub extern "C" fn pflags_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
