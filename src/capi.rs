//! C-linkage surface.
//!
//! Opaque-handle wrappers around the engine: every function returns
//! `false`/null on any internal error and never lets a structured error
//! or a panic cross the boundary. Strings are returned as owned C
//! buffers; release them with [`iban_string_free`].

use std::ffi::{c_char, CStr, CString};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::iban::Iban;

lazy_static! {
    static ref GLOBAL_CATALOG: Mutex<Option<Arc<Catalog>>> = Mutex::new(None);
}

fn global_catalog() -> Option<Arc<Catalog>> {
    GLOBAL_CATALOG.lock().ok()?.clone()
}

fn cstr_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: the caller passes a NUL-terminated string it owns
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn string_result(value: String) -> *mut c_char {
    match CString::new(value) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn with_iban<T>(ptr: *const Iban, default: T, f: impl FnOnce(&Iban) -> T) -> T {
    if ptr.is_null() {
        return default;
    }
    // SAFETY: the pointer came out of iban_new/iban_from_bban
    f(unsafe { &*ptr })
}

/// Initializes the library with the built-in reference tables and every
/// country handler. Call once before any other function.
#[no_mangle]
pub extern "C" fn iban_kit_init() -> bool {
    let catalog = CatalogBuilder::new().build();
    match GLOBAL_CATALOG.lock() {
        Ok(mut slot) => {
            *slot = Some(catalog);
            true
        }
        Err(_) => false,
    }
}

#[no_mangle]
pub extern "C" fn iban_new(
    iban: *const c_char,
    allow_invalid: bool,
    validate_bban: bool,
) -> *mut Iban {
    let Some(catalog) = global_catalog() else {
        return std::ptr::null_mut();
    };
    let Some(text) = cstr_arg(iban) else {
        return std::ptr::null_mut();
    };

    match catalog.iban_from_str(text, allow_invalid, validate_bban) {
        Ok(iban) => Box::into_raw(Box::new(iban)),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn iban_from_bban(
    country: *const c_char,
    bban: *const c_char,
    validate_bban: bool,
) -> *mut Iban {
    let Some(catalog) = global_catalog() else {
        return std::ptr::null_mut();
    };
    let (Some(country), Some(bban)) = (cstr_arg(country), cstr_arg(bban)) else {
        return std::ptr::null_mut();
    };

    match catalog.iban_from_bban(country, bban, validate_bban) {
        Ok(iban) => Box::into_raw(Box::new(iban)),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn iban_free(iban: *mut Iban) {
    if !iban.is_null() {
        // SAFETY: the pointer came out of iban_new/iban_from_bban and is
        // dropped exactly once
        drop(unsafe { Box::from_raw(iban) });
    }
}

#[no_mangle]
pub extern "C" fn iban_is_valid(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid())
}

#[no_mangle]
pub extern "C" fn iban_is_valid_length(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid_length())
}

#[no_mangle]
pub extern "C" fn iban_is_valid_structure(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid_structure())
}

#[no_mangle]
pub extern "C" fn iban_is_valid_country_code(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid_country_code())
}

#[no_mangle]
pub extern "C" fn iban_is_valid_iban_checksum(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid_iban_checksum())
}

#[no_mangle]
pub extern "C" fn iban_is_valid_bban(iban: *const Iban) -> bool {
    with_iban(iban, false, |i| i.is_valid_bban().unwrap_or(false))
}

#[no_mangle]
pub extern "C" fn iban_get_iban(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.as_str().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_iban_f(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| string_result(i.to_string()))
}

#[no_mangle]
pub extern "C" fn iban_get_country_code(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.country_code().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_iban_checksum(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.iban_checksum().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_bankcode(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.bank_code().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_branchcode(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.branch_code().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_account(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.account_code().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_bban(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.bban().to_string())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_bban_t(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| string_result(i.bban_trimmed()))
}

#[no_mangle]
pub extern "C" fn iban_get_bban_f(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.bban_formatted())
    })
}

#[no_mangle]
pub extern "C" fn iban_get_bban_tf(iban: *const Iban) -> *mut c_char {
    with_iban(iban, std::ptr::null_mut(), |i| {
        string_result(i.bban_trimmed_formatted())
    })
}

/// Releases a string returned by any of the getters.
#[no_mangle]
pub extern "C" fn iban_string_free(s: *mut c_char) {
    if !s.is_null() {
        // SAFETY: the pointer came out of string_result
        drop(unsafe { CString::from_raw(s) });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ffi::CString;

    fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        // SAFETY: produced by string_result just above
        let value = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        iban_string_free(ptr);
        value
    }

    #[test]
    fn end_to_end_over_the_c_surface() {
        assert!(iban_kit_init());

        let text = CString::new("HU05 1176 4379 4089 2883 0000 0000").unwrap();
        let handle = iban_new(text.as_ptr(), false, false);
        assert!(!handle.is_null());

        assert!(iban_is_valid(handle));
        assert_eq!(take_string(iban_get_country_code(handle)), "HU");
        assert_eq!(
            take_string(iban_get_bban(handle)),
            "117643794089288300000000"
        );

        iban_free(handle);
    }

    #[test]
    fn errors_become_null() {
        assert!(iban_kit_init());

        let text = CString::new("HU99 1176 4379 4089 2883 0000 0000").unwrap();
        assert!(iban_new(text.as_ptr(), false, false).is_null());
        assert!(iban_new(std::ptr::null(), true, false).is_null());
        assert!(!iban_is_valid(std::ptr::null()));
        assert!(iban_get_bban(std::ptr::null()).is_null());
    }
}
