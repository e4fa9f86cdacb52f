//! FFI bindings for hrv-insight
//!
//! This module provides C-compatible functions for calling the engine from
//! the mobile host app. All functions use C strings (null-terminated) and
//! return allocated memory that must be freed by the caller using
//! `insight_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::analyzer::analyze_json;
use crate::schema::SampleAdapter;
use crate::stress::{is_stressed, stress_level};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Parse a JSON array of sample records into samples, recording any error.
unsafe fn samples_from_ptr(json: *const c_char) -> Option<Vec<crate::types::HrvSample>> {
    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return None;
        }
    };

    let records = match SampleAdapter::parse_array(&json_str) {
        Ok(records) => records,
        Err(e) => {
            set_last_error(&e.to_string());
            return None;
        }
    };

    match SampleAdapter::to_samples(&records) {
        Ok(samples) => Some(samples),
        Err(e) => {
            set_last_error(&e.to_string());
            None
        }
    }
}

/// Analyze a JSON array of sample records and return insight report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `insight_free_string`.
/// - Returns NULL on error; call `insight_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insight_analyze_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match analyze_json(&json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the stress level label for a JSON array of sample records.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `insight_free_string`.
/// - Returns NULL on error; call `insight_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insight_stress_level_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    match samples_from_ptr(json) {
        Some(samples) => string_to_cstr(stress_level(&samples).as_str()),
        None => ptr::null_mut(),
    }
}

/// Return the boolean stress verdict for a JSON array of sample records.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns 1 when stressed, 0 when not, -1 on error.
/// - On error, call `insight_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn insight_is_stressed_json(json: *const c_char) -> i32 {
    clear_last_error();

    match samples_from_ptr(json) {
        Some(samples) => is_stressed(&samples) as i32,
        None => -1,
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by insight functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an insight function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn insight_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next insight function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn insight_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the hrv-insight library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn insight_version() -> *const c_char {
    // Use a static CString to avoid allocation
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
