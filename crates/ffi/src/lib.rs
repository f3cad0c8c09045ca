//! C ABI for the fire spread engine
//!
//! Instances are opaque heap objects created with `fire_spread_new` and released
//! with `fire_spread_destroy`. Every fallible call returns a [`FireSpreadErrorCode`];
//! the matching message is available from `fire_spread_get_last_error` on the same
//! thread. The header `FireSpreadFFI.h` is generated by cbindgen at build time.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{fire_spread_get_last_error, fire_spread_get_last_error_code, FireSpreadErrorCode};
pub use instance::{fire_spread_destroy, fire_spread_new, FireSpreadInstance};
pub use queries::{
    fire_spread_copy_hole, fire_spread_copy_perimeter, fire_spread_current_time,
    fire_spread_hole_count, fire_spread_hole_len, fire_spread_perimeter_count,
    fire_spread_perimeter_len, FireSpreadVertex,
};
pub use simulation::{
    fire_spread_add_ignition, fire_spread_reset, fire_spread_step, FireSpreadStepReport,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};
    use std::ptr;

    fn grass_instance(config: &str) -> *mut FireSpreadInstance {
        let config = CString::new(config).unwrap();
        let fuel = CString::new("1").unwrap();
        let mut instance = ptr::null_mut();
        let code = unsafe { fire_spread_new(config.as_ptr(), fuel.as_ptr(), &mut instance) };
        assert_eq!(code, FireSpreadErrorCode::Ok);
        instance
    }

    #[test]
    fn test_ignite_step_and_copy_perimeter() {
        let sim = grass_instance(r#"{ "initial_sampling": 16 }"#);

        assert_eq!(fire_spread_add_ignition(sim, 0.0, 0.0, 0), FireSpreadErrorCode::Ok);

        let mut report = FireSpreadStepReport::default();
        assert_eq!(unsafe { fire_spread_step(sim, &mut report) }, FireSpreadErrorCode::Ok);
        assert_eq!(report.window_start, 0);
        assert_eq!(report.window_end, 30);
        assert_eq!(report.ignitions_started, 1);
        assert_eq!(report.perimeters, 1);

        let mut now = 0;
        assert_eq!(unsafe { fire_spread_current_time(sim, &mut now) }, FireSpreadErrorCode::Ok);
        assert_eq!(now, 30);

        let mut count = 0;
        assert_eq!(
            unsafe { fire_spread_perimeter_count(sim, &mut count) },
            FireSpreadErrorCode::Ok
        );
        assert_eq!(count, 1);

        let mut len = 0;
        assert_eq!(
            unsafe { fire_spread_perimeter_len(sim, 0, &mut len) },
            FireSpreadErrorCode::Ok
        );
        assert!(len >= 3);

        let mut vertices = vec![FireSpreadVertex::default(); len];
        let mut written = 0;
        let code = unsafe {
            fire_spread_copy_perimeter(sim, 0, vertices.as_mut_ptr(), vertices.len(), &mut written)
        };
        assert_eq!(code, FireSpreadErrorCode::Ok);
        assert_eq!(written, len);
        assert!(vertices.iter().any(|v| v.y > 10.0));

        let mut holes = 7;
        assert_eq!(
            unsafe { fire_spread_hole_count(sim, 0, &mut holes) },
            FireSpreadErrorCode::Ok
        );
        assert_eq!(holes, 0);
        let code = unsafe { fire_spread_hole_len(sim, 0, 0, &mut len) };
        assert_eq!(code, FireSpreadErrorCode::IndexOutOfRange);
        let code = unsafe {
            fire_spread_copy_hole(sim, 0, 0, vertices.as_mut_ptr(), vertices.len(), &mut written)
        };
        assert_eq!(code, FireSpreadErrorCode::IndexOutOfRange);
        assert_eq!(written, 0);

        unsafe { fire_spread_destroy(sim) };
    }

    #[test]
    fn test_small_buffer_and_bad_index() {
        let sim = grass_instance("{}");
        fire_spread_add_ignition(sim, 0.0, 0.0, 0);
        unsafe { fire_spread_step(sim, ptr::null_mut()) };

        let mut one = [FireSpreadVertex::default(); 1];
        let mut written = 7;
        let code = unsafe { fire_spread_copy_perimeter(sim, 0, one.as_mut_ptr(), 1, &mut written) };
        assert_eq!(code, FireSpreadErrorCode::BufferTooSmall);
        assert_eq!(written, 0);

        let mut len = 0;
        let code = unsafe { fire_spread_perimeter_len(sim, 5, &mut len) };
        assert_eq!(code, FireSpreadErrorCode::IndexOutOfRange);
        let message = unsafe { CStr::from_ptr(fire_spread_get_last_error()) };
        assert!(message.to_str().unwrap().contains("out of range"));

        unsafe { fire_spread_destroy(sim) };
    }

    #[test]
    fn test_stale_ignition_and_null_instance() {
        let sim = grass_instance("{}");
        unsafe { fire_spread_step(sim, ptr::null_mut()) };
        assert_eq!(
            fire_spread_add_ignition(sim, 0.0, 0.0, 0),
            FireSpreadErrorCode::StaleIgnition
        );
        assert_eq!(
            fire_spread_add_ignition(sim, f64::NAN, 0.0, 60),
            FireSpreadErrorCode::InvalidParameter
        );
        assert_eq!(fire_spread_reset(sim), FireSpreadErrorCode::Ok);
        assert_eq!(fire_spread_get_last_error_code(), FireSpreadErrorCode::Ok);
        assert!(fire_spread_get_last_error().is_null());
        unsafe { fire_spread_destroy(sim) };

        assert_eq!(
            fire_spread_add_ignition(ptr::null(), 0.0, 0.0, 0),
            FireSpreadErrorCode::NullPointer
        );
    }
}
