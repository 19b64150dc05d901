// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for chart layout.

extern crate alloc;

use alloc::string::String;

use barscape_text::MeasureError;

/// Errors that stop a scale computation, an aggregation, or a layout build.
///
/// Dataset inconsistencies that can be recovered from are not errors; see
/// [`DatasetDiagnostic`](crate::DatasetDiagnostic).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// The numeric range is empty, inverted, or not finite.
    #[error("degenerate range: upper bound {upper} must exceed lower bound {lower}")]
    DegenerateRange {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },
    /// The dataset holds no samples, so there is nothing to scale.
    #[error("dataset is empty")]
    EmptyDataset,
    /// A nice scale needs room for at least two ticks.
    #[error("max tick count must be at least 2, got {max_ticks}")]
    TooFewTicks {
        /// Requested tick count.
        max_ticks: usize,
    },
    /// A unit toggle value other than `"s"` or `"ms"`.
    #[error("invalid unit {0:?}, expected \"s\" or \"ms\"")]
    InvalidUnit(String),
    /// A category name outside the palette.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    /// A negative or non-finite duration.
    #[error("invalid duration {0}, durations must be finite and non-negative")]
    InvalidDuration(f64),
    /// A label or title could not be measured.
    #[error("cannot lay out label {text:?}")]
    Layout {
        /// The text that failed to measure.
        text: String,
        /// What the measurer reported.
        #[source]
        source: MeasureError,
    },
}

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
