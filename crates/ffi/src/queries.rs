use fire_spread_core::{PerimeterPolygon, Ring};

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_spread_sim};
use crate::instance::FireSpreadInstance;

/// One perimeter vertex in map metres.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FireSpreadVertex {
    pub x: f64,
    pub y: f64,
}

fn perimeter_at(
    polygons: &[PerimeterPolygon],
    index: usize,
) -> Result<&PerimeterPolygon, DefaultFireSpreadError> {
    polygons
        .get(index)
        .ok_or_else(|| DefaultFireSpreadError::index_out_of_range(index, polygons.len()))
}

fn hole_at(polygon: &PerimeterPolygon, hole: usize) -> Result<&Ring, DefaultFireSpreadError> {
    polygon
        .holes
        .get(hole)
        .ok_or_else(|| DefaultFireSpreadError::index_out_of_range(hole, polygon.holes.len()))
}

/// Write `ring` into a caller buffer of `capacity` vertices
///
/// # Safety
/// `out_vertices` must point to at least `capacity` writable values and
/// `out_written` must be valid.
unsafe fn copy_ring(
    ring: &Ring,
    out_vertices: *mut FireSpreadVertex,
    capacity: usize,
    out_written: *mut usize,
) -> Result<(), DefaultFireSpreadError> {
    if ring.len() > capacity {
        return Err(DefaultFireSpreadError::buffer_too_small(ring.len(), capacity));
    }
    // SAFETY: the caller guarantees `capacity` writable slots.
    let buffer = unsafe { std::slice::from_raw_parts_mut(out_vertices, ring.len()) };
    for (slot, point) in buffer.iter_mut().zip(&ring.points) {
        *slot = FireSpreadVertex {
            x: point.x,
            y: point.y,
        };
    }
    unsafe {
        *out_written = ring.len();
    }
    Ok(())
}

/// Current simulation time in Unix seconds.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_unix_seconds` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_current_time(
    ptr: *const FireSpreadInstance,
    out_unix_seconds: *mut i64,
) -> FireSpreadErrorCode {
    if out_unix_seconds.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_unix_seconds"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let time = with_spread_sim(instance, |sim| Ok(sim.current_time()))?;
        unsafe {
            *out_unix_seconds = time.timestamp();
        }
        Ok(())
    })
}

/// Number of active perimeter polygons.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_perimeter_count(
    ptr: *const FireSpreadInstance,
    out_count: *mut usize,
) -> FireSpreadErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_count"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let count = with_spread_sim(instance, |sim| Ok(sim.active_perimeters().len()))?;
        unsafe {
            *out_count = count;
        }
        Ok(())
    })
}

/// Number of exterior vertices of perimeter `index`.
///
/// Use this to size the buffer passed to `fire_spread_copy_perimeter`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_len` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_perimeter_len(
    ptr: *const FireSpreadInstance,
    index: usize,
    out_len: *mut usize,
) -> FireSpreadErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let len = with_spread_sim(instance, |sim| {
            let polygons = sim.active_perimeters();
            Ok(perimeter_at(&polygons, index)?.exterior.len())
        })?;
        unsafe {
            *out_len = len;
        }
        Ok(())
    })
}

/// Copy the exterior ring of perimeter `index` into a caller-owned buffer.
///
/// Vertices are counter-clockwise; the closing vertex is not repeated. Unburned
/// holes are read separately with `fire_spread_copy_hole`.
///
/// Returns
/// - `FireSpreadErrorCode::Ok` (0) with `out_written` set to the vertex count
/// - `FireSpreadErrorCode::IndexOutOfRange` if `index` is not an active perimeter
/// - `FireSpreadErrorCode::BufferTooSmall` if `capacity` is less than the vertex count;
///   nothing is written to `out_vertices`
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_vertices` must point to at least `capacity` writable `FireSpreadVertex` values.
/// - `out_written` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_copy_perimeter(
    ptr: *const FireSpreadInstance,
    index: usize,
    out_vertices: *mut FireSpreadVertex,
    capacity: usize,
    out_written: *mut usize,
) -> FireSpreadErrorCode {
    if out_written.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_written"));
    }
    unsafe {
        *out_written = 0;
    }
    if out_vertices.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_vertices"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_spread_sim(instance, |sim| {
            let polygons = sim.active_perimeters();
            let ring = &perimeter_at(&polygons, index)?.exterior;
            unsafe { copy_ring(ring, out_vertices, capacity, out_written) }
        })
    })
}

/// Number of unburned holes inside perimeter `index`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_hole_count(
    ptr: *const FireSpreadInstance,
    index: usize,
    out_count: *mut usize,
) -> FireSpreadErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_count"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let count = with_spread_sim(instance, |sim| {
            let polygons = sim.active_perimeters();
            Ok(perimeter_at(&polygons, index)?.holes.len())
        })?;
        unsafe {
            *out_count = count;
        }
        Ok(())
    })
}

/// Number of vertices of hole `hole` in perimeter `index`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_len` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_hole_len(
    ptr: *const FireSpreadInstance,
    index: usize,
    hole: usize,
    out_len: *mut usize,
) -> FireSpreadErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let len = with_spread_sim(instance, |sim| {
            let polygons = sim.active_perimeters();
            Ok(hole_at(perimeter_at(&polygons, index)?, hole)?.len())
        })?;
        unsafe {
            *out_len = len;
        }
        Ok(())
    })
}

/// Copy hole `hole` of perimeter `index` into a caller-owned buffer.
///
/// Hole vertices are clockwise; the closing vertex is not repeated. Error codes
/// match `fire_spread_copy_perimeter`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fire_spread_new` or null.
/// - `out_vertices` must point to at least `capacity` writable `FireSpreadVertex` values.
/// - `out_written` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_copy_hole(
    ptr: *const FireSpreadInstance,
    index: usize,
    hole: usize,
    out_vertices: *mut FireSpreadVertex,
    capacity: usize,
    out_written: *mut usize,
) -> FireSpreadErrorCode {
    if out_written.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_written"));
    }
    unsafe {
        *out_written = 0;
    }
    if out_vertices.is_null() {
        return track_error(&DefaultFireSpreadError::null_pointer("out_vertices"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_spread_sim(instance, |sim| {
            let polygons = sim.active_perimeters();
            let ring = hole_at(perimeter_at(&polygons, index)?, hole)?;
            unsafe { copy_ring(ring, out_vertices, capacity, out_written) }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FireSpreadError;
    use nalgebra::Point2;

    #[test]
    fn test_copy_ring_keeps_hole_order() {
        let hole = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        let mut buffer = [FireSpreadVertex::default(); 6];
        let mut written = 0;
        unsafe { copy_ring(&hole, buffer.as_mut_ptr(), buffer.len(), &mut written) }.unwrap();
        assert_eq!(written, 4);
        assert_eq!(buffer[1], FireSpreadVertex { x: 0.0, y: 1.0 });
        assert_eq!(buffer[4], FireSpreadVertex::default());

        let mut small = [FireSpreadVertex::default(); 2];
        let err = unsafe { copy_ring(&hole, small.as_mut_ptr(), small.len(), &mut written) }
            .unwrap_err();
        assert_eq!(err.code(), FireSpreadErrorCode::BufferTooSmall);
    }

    #[test]
    fn test_hole_out_of_range() {
        let polygon = PerimeterPolygon::from_exterior(Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]));
        let err = hole_at(&polygon, 0).unwrap_err();
        assert_eq!(err.code(), FireSpreadErrorCode::IndexOutOfRange);
    }
}
