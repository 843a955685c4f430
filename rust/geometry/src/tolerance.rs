// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared absolute float tolerance.

/// Absolute tolerance for every point, slope and intercept comparison.
pub const EPSILON: f64 = 1e-4;

/// True when `value` is within [`EPSILON`] of zero. NaN is never zero.
#[inline]
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// True when `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    is_zero(a - b)
}
