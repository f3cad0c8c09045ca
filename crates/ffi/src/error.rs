use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` is what the C caller receives as the return value
/// - `msg()` is kept in thread-local storage for `fire_spread_get_last_error`
pub(crate) trait FireSpreadError {
    fn code(&self) -> FireSpreadErrorCode;

    fn msg(&self) -> &str;
}

/// Error raised by the FFI layer itself or converted from the core library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireSpreadError {
    code: FireSpreadErrorCode,
    msg: String,
}

impl DefaultFireSpreadError {
    /// Null pointer passed where a non-null one is required.
    ///
    /// # Arguments
    /// * `param_name` - The parameter that was null (e.g. `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireSpreadErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Internal lock poisoned by a panic in another thread.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FireSpreadErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// C string argument that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self::invalid_parameter(format!("Parameter '{param_name}' is not valid UTF-8"))
    }

    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireSpreadErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Perimeter index past the number of active perimeters.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            code: FireSpreadErrorCode::IndexOutOfRange,
            msg: format!("Perimeter index {index} out of range, {len} active"),
        }
    }

    /// Output buffer too small for the requested data.
    pub fn buffer_too_small(required: usize, capacity: usize) -> Self {
        Self {
            code: FireSpreadErrorCode::BufferTooSmall,
            msg: format!("Buffer holds {capacity} vertices, {required} required"),
        }
    }
}

impl FireSpreadError for DefaultFireSpreadError {
    fn code(&self) -> FireSpreadErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<fire_spread_core::Error> for DefaultFireSpreadError {
    fn from(error: fire_spread_core::Error) -> Self {
        use fire_spread_core::Error;

        let code = match &error {
            Error::InvalidConfig { .. } | Error::Json(_) | Error::Io(_) => {
                FireSpreadErrorCode::InvalidConfig
            }
            Error::InvalidFuelModel { .. }
            | Error::DuplicateFuelCode { .. }
            | Error::UnknownFuelCode { .. } => FireSpreadErrorCode::InvalidFuel,
            Error::StaleIgnition { .. } => FireSpreadErrorCode::StaleIgnition,
            Error::DegenerateTangent { .. } => FireSpreadErrorCode::StepFailed,
            Error::ConsolidationFailed { .. } => FireSpreadErrorCode::ConsolidationFailed,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by fire spread functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireSpreadErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Configuration JSON could not be parsed or failed validation.
    InvalidConfig = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,

    /// Fuel code unknown or fuel model invalid.
    InvalidFuel = 5,

    /// Ignition time earlier than the current simulation time.
    StaleIgnition = 6,

    /// Step aborted by the degenerate-tangent policy. State is unchanged.
    StepFailed = 7,

    /// Perimeter consolidation failed. State is unchanged and the step may be retried.
    ConsolidationFailed = 8,

    /// Perimeter index out of range.
    IndexOutOfRange = 9,

    /// Caller-provided buffer is too small.
    BufferTooSmall = 10,
}

impl From<DefaultFireSpreadError> for FireSpreadErrorCode {
    fn from(error: DefaultFireSpreadError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FireSpreadErrorCode)> = const { RefCell::new((None, FireSpreadErrorCode::Ok)) };
}

pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireSpreadErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireSpreadErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the message cannot be converted to a C string.
///
/// # Thread Safety
/// Error state is thread-local; each thread sees only its own errors.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that sets or
/// clears the error.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// FireSpreadInstance* sim = nullptr;
/// FireSpreadErrorCode err = fire_spread_new(config_json, "1", &sim);
/// if (err != FireSpreadErrorCode::Ok) {
///     const char* error = fire_spread_get_last_error();
///     if (error) {
///         printf("Fire spread creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_spread_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `FireSpreadErrorCode::Ok` (0) if no error has occurred on this thread.
#[no_mangle]
pub extern "C" fn fire_spread_get_last_error_code() -> FireSpreadErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_core_errors_map_to_codes() {
        let stale = fire_spread_core::Error::StaleIgnition {
            ignition_time: DateTime::default(),
            current_time: DateTime::default(),
        };
        assert_eq!(
            DefaultFireSpreadError::from(stale).code(),
            FireSpreadErrorCode::StaleIgnition
        );

        let unknown = fire_spread_core::Error::UnknownFuelCode {
            code: "99".to_string(),
        };
        let err = DefaultFireSpreadError::from(unknown);
        assert_eq!(err.code(), FireSpreadErrorCode::InvalidFuel);
        assert!(err.msg().contains("99"));

        let failed = fire_spread_core::Error::ConsolidationFailed {
            reason: "union".to_string(),
        };
        assert_eq!(
            FireSpreadErrorCode::from(DefaultFireSpreadError::from(failed)),
            FireSpreadErrorCode::ConsolidationFailed
        );
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultFireSpreadError::null_pointer("out_len");
        assert_eq!(err.code(), FireSpreadErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'out_len' cannot be null");
    }
}
