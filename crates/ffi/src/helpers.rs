use crate::error::{with_last_error_mut, DefaultFireSpreadError, FireSpreadError, FireSpreadErrorCode};
use crate::instance::FireSpreadInstance;
use fire_spread_core::SpreadSimulation;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FireSpreadError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FireSpreadError) -> FireSpreadErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, passing successes through.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultFireSpreadError>,
) -> Result<T, FireSpreadErrorCode> {
    result.map_err(|error| track_error(&error))
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireSpreadErrorCode::Ok;
    });
}

/// Run an FFI body, recording its error or clearing the previous one.
pub(crate) fn handle_ffi_result_error<F>(body: F) -> FireSpreadErrorCode
where
    F: FnOnce() -> Result<(), DefaultFireSpreadError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            FireSpreadErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow the instance behind an opaque pointer.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const FireSpreadInstance,
) -> Result<&'a FireSpreadInstance, DefaultFireSpreadError> {
    // SAFETY: the caller guarantees `ptr` is null or came from `fire_spread_new`
    // and has not been destroyed.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFireSpreadError::null_pointer("ptr"))
}

/// Read a borrowed C string argument. A null pointer yields `None`.
pub(crate) fn optional_str<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<Option<&'a str>, DefaultFireSpreadError> {
    if ptr.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and, per the caller contract, NUL-terminated.
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(Some)
        .map_err(|_| DefaultFireSpreadError::invalid_string(param_name))
}

/// Run `func` under the simulation read lock.
pub(crate) fn with_spread_sim<F, T>(
    instance: &FireSpreadInstance,
    func: F,
) -> Result<T, DefaultFireSpreadError>
where
    F: FnOnce(&SpreadSimulation) -> Result<T, DefaultFireSpreadError>,
{
    let sim = instance
        .sim
        .read()
        .map_err(|_| DefaultFireSpreadError::lock_poisoned("RwLock"))?;
    func(&sim)
}

/// Run `func` under the simulation write lock.
pub(crate) fn with_spread_sim_mut<F, T>(
    instance: &FireSpreadInstance,
    func: F,
) -> Result<T, DefaultFireSpreadError>
where
    F: FnOnce(&mut SpreadSimulation) -> Result<T, DefaultFireSpreadError>,
{
    let mut sim = instance
        .sim
        .write()
        .map_err(|_| DefaultFireSpreadError::lock_poisoned("RwLock"))?;
    func(&mut sim)
}
