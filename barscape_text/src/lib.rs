// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart layout.
//!
//! Barscape lays out tick labels and axis titles in chart space, so it needs
//! each label's bounding box before it can place anything. Glyph shaping and
//! drawing stay with the host renderer; chart code only depends on the tiny
//! measurement interface defined here.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (native shaping engines and web canvas measurement can
//!   both implement the same trait).
//!
//! Measurement is fallible. A host that cannot lay out text reports
//! [`MeasureError`] instead of inventing a width, and chart layout treats that
//! as fatal for the layout being built.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

/// A minimal text measurement interface used by chart layout.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine (e.g. Parley), or
/// - backed by web platform text measurement (e.g. HTML canvas).
///
/// Layout calls this synchronously; any font loading must finish before the
/// measurer is handed to the layout engine.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: TextStyle) -> Result<TextMetrics, MeasureError>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: TextStyle) -> Result<TextMetrics, MeasureError> {
        (**self).measure(text, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for alloc::boxed::Box<T> {
    fn measure(&self, text: &str, style: TextStyle) -> Result<TextMetrics, MeasureError> {
        (**self).measure(text, style)
    }
}

/// Why a [`TextMeasurer`] could not produce metrics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeasureError {
    /// The environment has no way to lay out text (no fonts, no canvas, ...).
    #[error("text measurement is unavailable in this environment")]
    Unavailable,
    /// The backend tried and failed.
    #[error("text measurement failed: {0}")]
    Failed(String),
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it’s just enough to make chart layout
/// consistent. More detailed typography belongs in the host's text system.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in chart units.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns this style with a different family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Returns this style with a different weight.
    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Droid Serif"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the height of the ink box, `ascent + descent`.
    ///
    /// Chart layout centers labels on this height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Returns `true` if every field is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.advance_width, self.ascent, self.descent, self.leading]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> Result<TextMetrics, MeasureError> {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        Ok(TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn heuristic_width_scales_with_glyph_count() {
        let m = HeuristicTextMeasurer;
        let one = m.measure("5", TextStyle::new(4.0)).unwrap();
        let three = m.measure("10s", TextStyle::new(4.0)).unwrap();
        assert!((three.advance_width - 3.0 * one.advance_width).abs() < 1e-12);
        assert!((one.height() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn metrics_validity_rejects_nan_and_negative_values() {
        let ok = TextMetrics {
            advance_width: 1.0,
            ascent: 1.0,
            descent: 0.0,
            leading: 0.0,
        };
        assert!(ok.is_valid());
        assert!(
            !TextMetrics {
                advance_width: f64::NAN,
                ..ok
            }
            .is_valid()
        );
        assert!(!TextMetrics { ascent: -1.0, ..ok }.is_valid());
    }

    #[test]
    fn measure_error_messages_are_descriptive() {
        assert_eq!(
            MeasureError::Unavailable.to_string(),
            "text measurement is unavailable in this environment"
        );
        assert_eq!(
            MeasureError::Failed("no font".into()).to_string(),
            "text measurement failed: no font"
        );
    }

    #[test]
    fn references_and_boxes_forward_to_the_inner_measurer() {
        let boxed: alloc::boxed::Box<dyn TextMeasurer> =
            alloc::boxed::Box::new(HeuristicTextMeasurer);
        let direct = HeuristicTextMeasurer.measure("abc", TextStyle::new(4.0));
        assert_eq!(boxed.measure("abc", TextStyle::new(4.0)), direct);
        let by_ref = &HeuristicTextMeasurer;
        assert_eq!(by_ref.measure("abc", TextStyle::new(4.0)), direct);
    }
}
