// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! Everything the planners need besides the data and the unit lives in one
//! [`ChartConfig`] value that is handed to the engine up front. The defaults
//! reproduce the standard chart: a 100-unit cube, size-4 serif labels and
//! hairline grids.

extern crate alloc;

use alloc::string::String;

use barscape_text::{FontFamily, FontWeight, TextStyle};
use peniko::Color;
use peniko::color::palette::css;

use crate::palette::CategoryPalette;

/// A paint, width and opacity triple for stroked lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in chart units.
    pub stroke_width: f64,
    /// Opacity in `0..=1`.
    pub opacity: f64,
}

impl StrokeStyle {
    /// An opaque black stroke.
    pub fn solid(stroke_width: f64) -> Self {
        Self {
            color: css::BLACK,
            stroke_width,
            opacity: 1.0,
        }
    }

    /// Returns this stroke with a different opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Layout constants and styling shared by every planner.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Side length of the chart cube.
    pub extent: f64,
    /// Tick budget for the value axis.
    pub max_ticks: usize,
    /// Padding between a left-facing label and the axis, and between the
    /// widest label and the axis title.
    pub label_padding: f64,
    /// Padding between a right-facing label and the axis.
    pub near_label_padding: f64,
    /// Length of the notch at each tick.
    pub main_notch_length: f64,
    /// Length of the notch between ticks.
    pub mid_notch_length: f64,
    /// Style used to measure tick labels.
    pub label_style: TextStyle,
    /// Style used to measure axis titles.
    pub title_style: TextStyle,
    /// Grid line stroke.
    pub grid_stroke: StrokeStyle,
    /// Stroke of the notch at each tick.
    pub main_notch_stroke: StrokeStyle,
    /// Stroke of the notch between ticks.
    pub mid_notch_stroke: StrokeStyle,
    /// Stroke width of the background frame edges.
    pub frame_background_width: f64,
    /// Stroke width of the frame edges the axes hang off.
    pub frame_axis_width: f64,
    /// Radius of each bar cylinder.
    pub bar_radius: f64,
    /// Title of the first lower axis.
    pub axis1_title: String,
    /// Title of the second lower axis.
    pub axis2_title: String,
    /// Category colors attached to bar segments and legend entries.
    pub palette: CategoryPalette,
}

impl ChartConfig {
    /// Creates the standard configuration.
    pub fn new() -> Self {
        let label_style = TextStyle::new(4.0).with_family(FontFamily::Serif);
        Self {
            extent: 100.0,
            max_ticks: 10,
            label_padding: 5.0,
            near_label_padding: 3.0,
            main_notch_length: 2.0,
            mid_notch_length: 1.5,
            title_style: label_style.clone().with_weight(FontWeight::BOLD),
            label_style,
            grid_stroke: StrokeStyle::solid(0.2),
            main_notch_stroke: StrokeStyle::solid(1.0).with_opacity(0.8),
            mid_notch_stroke: StrokeStyle::solid(0.8).with_opacity(0.8),
            frame_background_width: 0.4,
            frame_axis_width: 0.6,
            bar_radius: 2.0,
            axis1_title: "Users count".into(),
            axis2_title: "Products count (spaces)".into(),
            palette: CategoryPalette::STANDARD,
        }
    }

    /// Sets the chart cube side length.
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Sets the value-axis tick budget.
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Sets the label and title text styles.
    pub fn with_text_styles(mut self, label_style: TextStyle, title_style: TextStyle) -> Self {
        self.label_style = label_style;
        self.title_style = title_style;
        self
    }

    /// Sets the lower axis titles.
    pub fn with_axis_titles(
        mut self,
        axis1_title: impl Into<String>,
        axis2_title: impl Into<String>,
    ) -> Self {
        self.axis1_title = axis1_title.into();
        self.axis2_title = axis2_title.into();
        self
    }

    /// Sets the bar cylinder radius.
    pub fn with_bar_radius(mut self, bar_radius: f64) -> Self {
        self.bar_radius = bar_radius;
        self
    }

    /// Sets the category palette.
    pub fn with_palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn title_style_is_the_bold_label_style() {
        let c = ChartConfig::default();
        assert_eq!(c.label_style.font_size, 4.0);
        assert_eq!(c.label_style.font_family, FontFamily::Serif);
        assert_eq!(c.title_style.font_weight, FontWeight::BOLD);
        assert_eq!(
            c.title_style.clone().with_weight(FontWeight::NORMAL),
            c.label_style
        );
    }

    #[test]
    fn builders_replace_single_fields() {
        let c = ChartConfig::new()
            .with_extent(50.0)
            .with_max_ticks(6)
            .with_axis_titles("Rows", "Columns");
        assert_eq!(c.extent, 50.0);
        assert_eq!(c.max_ticks, 6);
        assert_eq!(c.axis1_title, "Rows");
        assert_eq!(c.axis2_title, "Columns");
        assert_eq!(c.bar_radius, ChartConfig::new().bar_radius);
    }
}
