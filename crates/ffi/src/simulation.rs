use chrono::DateTime;
use fire_spread_core::{IgnitionPoint, StepReport};

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_spread_sim_mut};
use crate::instance::FireSpreadInstance;

/// FFI-friendly summary of a committed step.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireSpreadStepReport {
    /// Start of the step window (Unix seconds).
    pub window_start: i64,

    /// End of the step window, now the simulation time (Unix seconds).
    pub window_end: i64,

    /// Ignitions expanded into a perimeter.
    pub ignitions_started: usize,

    /// Due ignitions that fell on non-burnable fuel.
    pub ignitions_skipped: usize,

    /// Active perimeters after consolidation.
    pub perimeters: usize,

    /// Vertices held in place because their tangent was degenerate.
    pub held_vertices: usize,

    /// Holes closed by the fire this step.
    pub collapsed_holes: usize,
}

impl From<&StepReport> for FireSpreadStepReport {
    fn from(report: &StepReport) -> Self {
        Self {
            window_start: report.window_start.timestamp(),
            window_end: report.window_end.timestamp(),
            ignitions_started: report.ignitions_started,
            ignitions_skipped: report.ignitions_skipped,
            perimeters: report.perimeters,
            held_vertices: report.held_vertices.len(),
            collapsed_holes: report.collapsed_holes,
        }
    }
}

/// Queue a point ignition at map position `(x, y)` metres, igniting at `unix_seconds`.
///
/// Returns
/// - `FireSpreadErrorCode::Ok` (0) on success
/// - `FireSpreadErrorCode::NullPointer` if `ptr` is null
/// - `FireSpreadErrorCode::InvalidParameter` if the position is not finite or the time
///   is not representable
/// - `FireSpreadErrorCode::StaleIgnition` if the time is before the simulation time
///
/// Thread-safe: acquires the `RwLock` write lock.
#[no_mangle]
pub extern "C" fn fire_spread_add_ignition(
    ptr: *const FireSpreadInstance,
    x: f64,
    y: f64,
    unix_seconds: i64,
) -> FireSpreadErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        if !x.is_finite() || !y.is_finite() {
            return Err(DefaultFireSpreadError::invalid_parameter(format!(
                "Ignition position must be finite, got ({x}, {y})"
            )));
        }
        let time = DateTime::from_timestamp(unix_seconds, 0).ok_or_else(|| {
            DefaultFireSpreadError::invalid_parameter(format!(
                "Ignition time {unix_seconds} is out of range"
            ))
        })?;
        with_spread_sim_mut(instance, |sim| {
            sim.add_ignition(IgnitionPoint::new(x, y, time))?;
            Ok(())
        })
    })
}

/// Advance the simulation by one configured time step.
///
/// On failure the simulation is left exactly as it was. A
/// `FireSpreadErrorCode::ConsolidationFailed` step may be retried.
///
/// - `out_report` (optional) receives the step summary on success. If null, ignored.
///
/// Thread-safe: acquires the `RwLock` write lock for the whole step.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_report`, if non-null, must point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_step(
    ptr: *const FireSpreadInstance,
    out_report: *mut FireSpreadStepReport,
) -> FireSpreadErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let report = with_spread_sim_mut(instance, |sim| Ok(sim.step()?))?;
        if !out_report.is_null() {
            unsafe {
                *out_report = FireSpreadStepReport::from(&report);
            }
        }
        Ok(())
    })
}

/// Clear all fire and rewind to the configured start time.
///
/// Pending ignitions at or after the start time are kept.
#[no_mangle]
pub extern "C" fn fire_spread_reset(ptr: *const FireSpreadInstance) -> FireSpreadErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_spread_sim_mut(instance, |sim| {
            sim.reset();
            Ok(())
        })
    })
}
