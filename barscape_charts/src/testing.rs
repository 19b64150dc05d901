// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic measurers for unit tests.

use barscape_text::{MeasureError, TextMeasurer, TextMetrics, TextStyle};

/// Every glyph advances 2 units; every line is 3 up and 1 down.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _style: TextStyle) -> Result<TextMetrics, MeasureError> {
        Ok(TextMetrics {
            advance_width: 2.0 * text.chars().count() as f64,
            ascent: 3.0,
            descent: 1.0,
            leading: 0.0,
        })
    }
}

/// Reports that text cannot be measured.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NoTextMeasurer;

impl TextMeasurer for NoTextMeasurer {
    fn measure(&self, _text: &str, _style: TextStyle) -> Result<TextMetrics, MeasureError> {
        Err(MeasureError::Unavailable)
    }
}

/// Returns a negative width, which layout must refuse.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrokenMeasurer;

impl TextMeasurer for BrokenMeasurer {
    fn measure(&self, _text: &str, _style: TextStyle) -> Result<TextMetrics, MeasureError> {
        Ok(TextMetrics {
            advance_width: -1.0,
            ascent: 3.0,
            descent: 1.0,
            leading: 0.0,
        })
    }
}

/// Measures like [`FixedMeasurer`] but cannot measure millisecond labels.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NoMillisecondsMeasurer;

impl TextMeasurer for NoMillisecondsMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> Result<TextMetrics, MeasureError> {
        if text.ends_with("ms") {
            return Err(MeasureError::Unavailable);
        }
        FixedMeasurer.measure(text, style)
    }
}
