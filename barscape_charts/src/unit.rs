// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display units for the value axis.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::ChartError;

/// The unit value-axis labels are written in.
///
/// Durations are always stored in milliseconds; the unit only changes how
/// ticks and the axis title read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Seconds (`"s"`).
    #[default]
    Seconds,
    /// Milliseconds (`"ms"`).
    Milliseconds,
}

impl Unit {
    /// Both units, in toggle order.
    pub const ALL: [Self; 2] = [Self::Seconds, Self::Milliseconds];

    /// The short toggle value, `"s"` or `"ms"`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
        }
    }

    /// Human-readable name for unit pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Seconds => "Seconds",
            Self::Milliseconds => "Milliseconds",
        }
    }

    /// Value-axis title for this unit.
    pub fn axis_title(self) -> String {
        match self {
            Self::Seconds => "Duration in seconds".to_string(),
            Self::Milliseconds => "Duration in milliseconds".to_string(),
        }
    }

    /// Formats a tick value given in milliseconds, on an axis whose ticks
    /// are `step_millis` apart.
    ///
    /// The value is printed with as many decimals as the step needs in this
    /// unit, so `5000` on a 5000 ms step reads `"5s"`, and `2500` on a 500 ms
    /// step reads `"2.5s"`. Accumulated float error never shows up in the
    /// label. A step that is not positive and finite falls back to the
    /// shortest round-trip representation.
    pub fn format_tick(self, millis: f64, step_millis: f64) -> String {
        let (value, step) = match self {
            Self::Seconds => (millis / 1000.0, step_millis / 1000.0),
            Self::Milliseconds => (millis, step_millis),
        };
        let symbol = self.symbol();
        match step_decimals(step) {
            Some(decimals) => format!("{value:.decimals$}{symbol}"),
            None => format!("{value}{symbol}"),
        }
    }
}

/// Fraction digits needed to tell ticks `step` apart.
fn step_decimals(step: f64) -> Option<usize> {
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    // Nice steps are exact powers of ten up to float error in `log10`.
    let digits = (-step.log10() - 1e-6).ceil().clamp(0.0, 17.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0..=17"
    )]
    {
        Some(digits as usize)
    }
}

impl FromStr for Unit {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Self::Seconds),
            "ms" => Ok(Self::Milliseconds),
            other => Err(ChartError::InvalidUnit(other.to_string())),
        }
    }
}
