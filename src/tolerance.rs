//! Tolerance-aware floating point comparison predicates.
//!
//! Every geometric predicate in the crate routes its numeric comparisons
//! through the process-wide tolerance stored here. The default of `1e-6`
//! matches the reference behavior; it can be reconfigured with
//! [`set_tolerance`].
//!
//! The tolerance is stored in an atomic, so concurrent readers never observe
//! a torn value. Changing it while a computation is in flight is still
//! unsupported: predicates evaluated before and after the change will
//! disagree about boundary cases.

use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_TOLERANCE: f64 = 1e-6;

static TOLERANCE: AtomicU64 = AtomicU64::new(DEFAULT_TOLERANCE.to_bits());

/// Sets the process-wide comparison tolerance.
///
/// Non-finite or negative values are ignored and the tolerance is reset to
/// the default.
pub fn set_tolerance(tolerance: f64) {
    let value = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_TOLERANCE
    };
    TOLERANCE.store(value.to_bits(), Ordering::Relaxed);
}

/// Returns the process-wide comparison tolerance.
#[inline]
pub fn get_tolerance() -> f64 {
    f64::from_bits(TOLERANCE.load(Ordering::Relaxed))
}

/// Returns `true` if `x` is comparable to zero.
#[inline]
pub fn eq_0(x: f64) -> bool {
    let tol = get_tolerance();
    x < tol && x > -tol
}

/// Returns `true` if `x` and `y` are equal up to the tolerance.
#[inline]
pub fn eq(x: f64, y: f64) -> bool {
    let tol = get_tolerance();
    x - y < tol && x - y > -tol
}

/// Returns `true` if `x` is greater than `y` by more than the tolerance.
#[inline]
pub fn gt(x: f64, y: f64) -> bool {
    x - y > get_tolerance()
}

/// Returns `true` if `x` is greater than or equal to `y` up to the tolerance.
#[inline]
pub fn ge(x: f64, y: f64) -> bool {
    x - y > -get_tolerance()
}

/// Returns `true` if `x` is less than `y` by more than the tolerance.
#[inline]
pub fn lt(x: f64, y: f64) -> bool {
    x - y < -get_tolerance()
}

/// Returns `true` if `x` is less than or equal to `y` up to the tolerance.
#[inline]
pub fn le(x: f64, y: f64) -> bool {
    x - y < get_tolerance()
}
