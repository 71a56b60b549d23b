// SPDX: CC0-1.0

//! Affine mapping from data space onto the drawing surface.
//!
//! The surface origin is the top-left corner, so y grows downwards there and
//! upwards in data space.

use crate::{sample::Sample, Interval, Number, Point, Surface};

/// Spans narrower than this are too thin to place axes on.
pub const DEGENERATE_SPAN: Number = 1e-8;

pub type ProjectedPoint = Point<Number>;

/// Map `series` onto `surface`. The x extent is taken from the series itself,
/// the y extent from `y`.
///
/// Returns nothing for fewer than two samples or for a zero-width extent on
/// either axis. Values outside `y` map outside the surface and are left for
/// the caller to clip.
pub fn project(series: &[Sample], y: Interval, surface: Surface) -> Vec<ProjectedPoint> {
    let Some(x) = x_extent(series) else {
        return Vec::new();
    };
    if series.len() < 2 || !(x.span() > 0.0) || !(y.span() > 0.0) {
        return Vec::new();
    }
    series
        .iter()
        .map(|p| to_surface(*p, x, y, surface))
        .collect()
}

/// Smallest and largest x in `series`, or `None` when it is empty.
pub fn x_extent(series: &[Sample]) -> Option<Interval> {
    let first = series.first()?;
    Some(series.iter().skip(1).fold(
        Interval::new(first.x, first.x),
        |acc, p| Interval::new(acc.min.min(p.x), acc.max.max(p.x)),
    ))
}

#[inline]
pub fn to_surface(p: Sample, x: Interval, y: Interval, surface: Surface) -> ProjectedPoint {
    Point {
        x: (p.x - x.min) / x.span() * surface.width,
        y: surface.height - (p.y - y.min) / y.span() * surface.height,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisLine {
    /// Zero is outside the visible interval.
    OffSurface,
    Segment {
        start: ProjectedPoint,
        end: ProjectedPoint,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGeometry {
    /// The horizontal line at y = 0.
    pub x_axis: AxisLine,
    /// The vertical line at x = 0.
    pub y_axis: AxisLine,
}

impl Default for AxisGeometry {
    fn default() -> Self {
        Self {
            x_axis: AxisLine::OffSurface,
            y_axis: AxisLine::OffSurface,
        }
    }
}

/// Place the coordinate axes for the visible window. `None` when either span
/// is degenerate, in which case the caller keeps whatever it had.
pub fn compute_axes(x: Interval, y: Interval, surface: Surface) -> Option<AxisGeometry> {
    if x.span().abs() < DEGENERATE_SPAN || y.span().abs() < DEGENERATE_SPAN {
        return None;
    }
    let origin = to_surface(Point { x: 0.0, y: 0.0 }, x, y, surface);

    let x_axis = if y.straddles_zero() {
        AxisLine::Segment {
            start: Point {
                x: 0.0,
                y: origin.y,
            },
            end: Point {
                x: surface.width,
                y: origin.y,
            },
        }
    } else {
        AxisLine::OffSurface
    };

    let y_axis = if x.straddles_zero() {
        AxisLine::Segment {
            start: Point {
                x: origin.x,
                y: 0.0,
            },
            end: Point {
                x: origin.x,
                y: surface.height,
            },
        }
    } else {
        AxisLine::OffSurface
    };

    Some(AxisGeometry { x_axis, y_axis })
}

/// Top-left positions of the four bound labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnchors {
    pub xmin: ProjectedPoint,
    pub xmax: ProjectedPoint,
    pub ymin: ProjectedPoint,
    pub ymax: ProjectedPoint,
}

const LABEL_INSET: Number = 8.0;
const LABEL_BOTTOM: Number = 24.0;
const LABEL_RIGHT: Number = 38.0;
const LABEL_BESIDE_Y_AXIS: Number = 18.0;

/// Hang the x bound labels just under the x-axis and the y bound labels just
/// left of the y-axis; fall back to the surface edges for off-surface axes.
///
/// For hosts drawing on a pixel surface. The terminal view in [`crate::view`]
/// lays its labels out per character cell instead.
pub fn label_anchors(axes: &AxisGeometry, surface: Surface) -> LabelAnchors {
    let x_top = match axes.x_axis {
        AxisLine::Segment { start, .. } => start.y + LABEL_INSET,
        AxisLine::OffSurface => surface.height - LABEL_BOTTOM,
    };
    let y_left = match axes.y_axis {
        AxisLine::Segment { start, .. } => start.x - LABEL_BESIDE_Y_AXIS,
        AxisLine::OffSurface => LABEL_INSET,
    };
    LabelAnchors {
        xmin: Point {
            x: LABEL_INSET,
            y: x_top,
        },
        xmax: Point {
            x: surface.width - LABEL_RIGHT,
            y: x_top,
        },
        ymin: Point {
            x: y_left,
            y: surface.height - LABEL_BOTTOM,
        },
        ymax: Point {
            x: y_left,
            y: LABEL_INSET,
        },
    }
}
