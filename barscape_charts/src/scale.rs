// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Nice number" value scales.
//!
//! The value axis shows round tick values (`1`, `2` or `5` times a power of
//! ten) rather than evenly dividing the raw data range. [`NiceScale`] picks
//! the rounded bounds and tick spacing with the classic nice-number method:
//!
//! 1. round the raw range *up* to a nice number,
//! 2. divide it into `max_ticks - 1` steps and round the step to the *nearest*
//!    nice number,
//! 3. snap the bounds outward onto multiples of that step.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{ChartError, ChartResult};

/// Rounded axis bounds and tick spacing derived from a raw numeric range.
///
/// Invariants (for any successfully computed scale):
/// - `nice_upper_bound >= upper_bound` and `nice_lower_bound <= lower_bound`,
/// - `tick_spacing > 0`,
/// - `nice_upper_bound - nice_lower_bound` is a whole number of `tick_spacing`s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NiceScale {
    lower_bound: f64,
    upper_bound: f64,
    max_ticks: usize,
    nice_lower_bound: f64,
    nice_upper_bound: f64,
    tick_spacing: f64,
}

impl NiceScale {
    /// Computes a nice scale covering `[lower_bound, upper_bound]` with at most
    /// roughly `max_ticks` ticks.
    ///
    /// Fails with [`ChartError::DegenerateRange`] when the range is empty,
    /// inverted or not finite, and with [`ChartError::TooFewTicks`] when
    /// `max_ticks < 2`. A zero-length range is never widened here; callers that
    /// want a minimum span must supply it themselves.
    pub fn compute(lower_bound: f64, upper_bound: f64, max_ticks: usize) -> ChartResult<Self> {
        if !(lower_bound.is_finite() && upper_bound.is_finite() && upper_bound > lower_bound) {
            return Err(ChartError::DegenerateRange {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        if max_ticks < 2 {
            return Err(ChartError::TooFewTicks { max_ticks });
        }

        let range = nice_num(upper_bound - lower_bound, false);
        let tick_spacing = nice_num(range / (max_ticks - 1) as f64, true);
        if !(tick_spacing.is_finite() && tick_spacing > 0.0) {
            // Only reachable for ranges at the edge of f64 (subnormal spans).
            return Err(ChartError::DegenerateRange {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        let nice_lower_bound = (lower_bound / tick_spacing).floor() * tick_spacing;
        let nice_upper_bound = (upper_bound / tick_spacing).ceil() * tick_spacing;

        Ok(Self {
            lower_bound,
            upper_bound,
            max_ticks,
            nice_lower_bound,
            nice_upper_bound,
            tick_spacing,
        })
    }

    /// Recomputes the scale with a different tick budget.
    pub fn with_max_ticks(&self, max_ticks: usize) -> ChartResult<Self> {
        Self::compute(self.lower_bound, self.upper_bound, max_ticks)
    }

    /// Recomputes the scale for a different raw range.
    pub fn with_bounds(&self, lower_bound: f64, upper_bound: f64) -> ChartResult<Self> {
        Self::compute(lower_bound, upper_bound, self.max_ticks)
    }

    /// The raw lower bound this scale was computed from.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// The raw upper bound this scale was computed from.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// The tick budget this scale was computed with.
    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    /// Lower bound snapped down onto a multiple of [`Self::tick_spacing`].
    pub fn nice_lower_bound(&self) -> f64 {
        self.nice_lower_bound
    }

    /// Upper bound snapped up onto a multiple of [`Self::tick_spacing`].
    pub fn nice_upper_bound(&self) -> f64 {
        self.nice_upper_bound
    }

    /// Distance between consecutive ticks.
    pub fn tick_spacing(&self) -> f64 {
        self.tick_spacing
    }

    /// Number of tick *intervals* between the nice bounds.
    pub fn step_count(&self) -> usize {
        let steps = ((self.nice_upper_bound - self.nice_lower_bound) / self.tick_spacing)
            .round()
            .max(0.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "a nice scale spans a small whole number of steps"
        )]
        {
            steps as usize
        }
    }

    /// Tick values from the nice lower bound to the nice upper bound, inclusive.
    ///
    /// Each tick is computed as `nice_lower_bound + i * tick_spacing` rather than
    /// by repeated addition, so the last tick lands on the upper bound.
    pub fn ticks(&self) -> Vec<f64> {
        (0..=self.step_count())
            .map(|i| self.nice_lower_bound + i as f64 * self.tick_spacing)
            .collect()
    }
}

/// Rounds `range` to a nice number: `{1, 2, 5, 10} × 10^k`.
///
/// With `round = false` the result is the smallest nice number `>= range`
/// (breakpoints 1, 2, 5); with `round = true` it is the nearest one
/// (breakpoints 1.5, 3, 7). `range` must be positive and finite.
pub fn nice_num(range: f64, round: bool) -> f64 {
    let exponent = decimal_exponent(range);
    let fraction = scale_by_pow10(range, -exponent);
    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    scale_by_pow10(nice_fraction, exponent)
}

fn decimal_exponent(v: f64) -> i32 {
    let e = v.log10().floor().clamp(-400.0, 400.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        e as i32
    }
}

/// `v × 10^exponent`, dividing for negative exponents so that exact powers of ten
/// stay exact.
fn scale_by_pow10(v: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        v * 10_f64.powi(exponent)
    } else {
        v / 10_f64.powi(-exponent)
    }
}
