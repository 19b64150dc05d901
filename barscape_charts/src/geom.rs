// Copyright 2025 the Barscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D points, polylines and group placement.
//!
//! Planar geometry (notches, label offsets, bar footprints) uses `kurbo`
//! directly. Only what genuinely leaves a plane lives here.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use smallvec::SmallVec;

/// A point in chart space or in a group's local space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate (up).
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Lifts a planar point into the `z = 0` plane.
    pub fn from_planar(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y, 0.0)
    }
}

/// An open polyline. Grid lines have at most three vertices.
pub type Polyline3 = SmallVec<[Point3; 3]>;

/// Placement of a group of primitives in chart space.
///
/// A local point is rotated (XYZ Euler order, angles in degrees, so the
/// Z rotation applies first) and then translated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupFrame {
    /// Translation applied after rotation.
    pub translation: Point3,
    /// Rotation about the X, Y and Z axes in degrees.
    pub rotation_deg: [f64; 3],
}

impl GroupFrame {
    /// A frame that only translates.
    pub fn translated(translation: Point3) -> Self {
        Self {
            translation,
            rotation_deg: [0.0; 3],
        }
    }

    /// Returns this frame with the given rotation.
    pub fn with_rotation_deg(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation_deg = [x, y, z];
        self
    }

    /// Maps a point from the group's local space into chart space.
    pub fn transform_point(&self, p: Point3) -> Point3 {
        let [rx, ry, rz] = self.rotation_deg.map(f64::to_radians);
        let (sx, cx) = (rx.sin(), rx.cos());
        let (sy, cy) = (ry.sin(), ry.cos());
        let (sz, cz) = (rz.sin(), rz.cos());

        // Rz, then Ry, then Rx.
        let (x, y, z) = (p.x * cz - p.y * sz, p.x * sz + p.y * cz, p.z);
        let (x, y, z) = (x * cy + z * sy, y, -x * sy + z * cy);
        let (x, y, z) = (x, y * cx - z * sx, y * sx + z * cx);

        Point3::new(
            x + self.translation.x,
            y + self.translation.y,
            z + self.translation.z,
        )
    }
}

/// Which of the chart-box edges a [`FrameLine`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameLineKind {
    /// An edge behind the bars.
    Background,
    /// A front edge that the axes hang off.
    Axis,
}

/// One fixed edge of the chart box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLine {
    /// Start point in chart space.
    pub from: Point3,
    /// End point in chart space.
    pub to: Point3,
    /// Edge role.
    pub kind: FrameLineKind,
    /// Stroke width.
    pub width: f64,
}

/// The seven edges of a chart box with side `extent`.
pub fn frame_lines(extent: f64, background_width: f64, axis_width: f64) -> [FrameLine; 7] {
    let e = extent;
    let line = |from: Point3, to: Point3, kind: FrameLineKind| FrameLine {
        from,
        to,
        kind,
        width: match kind {
            FrameLineKind::Background => background_width,
            FrameLineKind::Axis => axis_width,
        },
    };
    [
        line(Point3::ORIGIN, Point3::new(e, 0.0, 0.0), FrameLineKind::Background),
        line(Point3::ORIGIN, Point3::new(0.0, e, 0.0), FrameLineKind::Background),
        line(
            Point3::new(0.0, 0.0, e),
            Point3::new(0.0, e, e),
            FrameLineKind::Background,
        ),
        line(
            Point3::new(e, 0.0, 0.0),
            Point3::new(e, e, 0.0),
            FrameLineKind::Axis,
        ),
        line(Point3::ORIGIN, Point3::new(0.0, 0.0, e), FrameLineKind::Background),
        line(
            Point3::new(0.0, 0.0, e),
            Point3::new(e, 0.0, e),
            FrameLineKind::Axis,
        ),
        line(
            Point3::new(e, 0.0, 0.0),
            Point3::new(e, 0.0, e),
            FrameLineKind::Axis,
        ),
    ]
}
