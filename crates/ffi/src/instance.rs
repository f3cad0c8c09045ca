use fire_spread_core::{FuelCatalog, SimulationConfig, SpreadSimulation};
use std::os::raw::c_char;
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{clear_last_error, optional_str, track_error, track_result};

/// The fire spread simulation context.
///
/// Opaque to C callers. The simulation sits behind an `RwLock`, so queries from
/// several threads run concurrently while `fire_spread_step` takes the write lock.
///
/// # Usage (C++)
/// ```cpp
/// FireSpreadInstance* sim = nullptr;
/// if (fire_spread_new("{\"time_step_seconds\": 60}", "1", &sim) != FireSpreadErrorCode::Ok) {
///     return;
/// }
/// fire_spread_add_ignition(sim, 0.0, 0.0, 0);
/// FireSpreadStepReport report;
/// fire_spread_step(sim, &report);
/// fire_spread_destroy(sim);
/// ```
pub struct FireSpreadInstance {
    pub(crate) sim: RwLock<SpreadSimulation>,
}

impl FireSpreadInstance {
    /// Build a simulation with one fuel everywhere and the configured default weather.
    ///
    /// A missing configuration means all defaults.
    pub(crate) fn new(
        config_json: Option<&str>,
        fuel_code: &str,
    ) -> Result<Box<Self>, DefaultFireSpreadError> {
        let config = match config_json {
            Some(json) => SimulationConfig::from_json_str(json)?,
            None => SimulationConfig::default(),
        };
        let fuel = FuelCatalog::standard().require(fuel_code)?;
        let sim = SpreadSimulation::uniform(config, fuel)?;
        Ok(Box::new(Self {
            sim: RwLock::new(sim),
        }))
    }
}

fn create_instance(
    config_json: *const c_char,
    fuel_code: *const c_char,
) -> Result<Box<FireSpreadInstance>, DefaultFireSpreadError> {
    let config_json = optional_str(config_json, "config_json")?;
    let fuel_code = optional_str(fuel_code, "fuel_code")?
        .ok_or_else(|| DefaultFireSpreadError::null_pointer("fuel_code"))?;
    FireSpreadInstance::new(config_json, fuel_code)
}

/// Create a new instance and return it via out-parameter.
///
/// Parameters
/// - `config_json`: simulation configuration as a JSON object, or null for defaults.
///   Unnamed fields keep their defaults.
/// - `fuel_code`: code of a standard fuel model (`"1"`..`"13"`, or `"NB"`). Must be non-null.
/// - `out_instance`: receives the instance on success and null on failure. Must be non-null.
///
/// Returns
/// - `FireSpreadErrorCode::Ok` (0) on success
/// - `FireSpreadErrorCode::NullPointer` if `fuel_code` or `out_instance` is null
/// - `FireSpreadErrorCode::InvalidConfig` if the JSON is malformed or out of range
/// - `FireSpreadErrorCode::InvalidFuel` if the fuel code is unknown
///
/// # Safety
///
/// - `config_json` and `fuel_code`, when non-null, must be NUL-terminated strings.
/// - `out_instance` must be a valid pointer to writable memory.
/// - The caller owns the returned instance and MUST call `fire_spread_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_new(
    config_json: *const c_char,
    fuel_code: *const c_char,
    out_instance: *mut *mut FireSpreadInstance,
) -> FireSpreadErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_instance"));
    }

    match track_result(create_instance(config_json, fuel_code)) {
        Ok(instance) => {
            clear_last_error();
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            FireSpreadErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an instance created by `fire_spread_new`.
///
/// A null pointer is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `fire_spread_new` and not destroyed already.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_destroy(ptr: *mut FireSpreadInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `fire_spread_new` and is still live.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_new_and_destroy() {
        let config = CString::new(r#"{ "initial_sampling": 12 }"#).unwrap();
        let fuel = CString::new("1").unwrap();
        let mut instance = ptr::null_mut();
        let code = unsafe { fire_spread_new(config.as_ptr(), fuel.as_ptr(), &mut instance) };
        assert_eq!(code, FireSpreadErrorCode::Ok);
        assert!(!instance.is_null());
        unsafe { fire_spread_destroy(instance) };
    }

    #[test]
    fn test_unknown_fuel_sets_last_error() {
        let fuel = CString::new("99").unwrap();
        let mut instance = ptr::null_mut();
        let code = unsafe { fire_spread_new(ptr::null(), fuel.as_ptr(), &mut instance) };
        assert_eq!(code, FireSpreadErrorCode::InvalidFuel);
        assert!(instance.is_null());
        assert_eq!(
            crate::error::fire_spread_get_last_error_code(),
            FireSpreadErrorCode::InvalidFuel
        );
    }

    #[test]
    fn test_bad_config_rejected() {
        let config = CString::new(r#"{ "time_step_seconds": 0 }"#).unwrap();
        let fuel = CString::new("1").unwrap();
        let mut instance = ptr::null_mut();
        let code = unsafe { fire_spread_new(config.as_ptr(), fuel.as_ptr(), &mut instance) };
        assert_eq!(code, FireSpreadErrorCode::InvalidConfig);
        assert!(instance.is_null());
    }
}
