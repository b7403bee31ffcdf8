// File: crates/chart-layout/src/plane.rs
// Summary: Cartesian coordinate plane; data-to-pixel transform with zoom, reversal, and log scaling.

use crate::geometry::{Boundaries, PointF, RectF};

/// Fallback span substituted for a zero-width or zero-height data range
/// so scale factors never divide by zero.
const DEFAULT_RANGE_SPAN: f64 = 0.1;

/// Floor for values entering a log10 axis.
const LOG_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisScale {
    #[default]
    Linear,
    Log10,
}

/// Maps the current data-space visible range onto a pixel-space target
/// rectangle. Created once per diagram area and mutated on
/// resize/zoom/pan; all attached diagrams read it, only the owner
/// mutates it.
#[derive(Clone, Debug)]
pub struct CartesianPlane {
    area: RectF,
    range: Boundaries,
    zoom_x: f64,
    zoom_y: f64,
    reverse_x: bool,
    reverse_y: bool,
    x_scale: AxisScale,
    y_scale: AxisScale,
}

impl Default for CartesianPlane {
    fn default() -> Self {
        Self::new(
            RectF::new(0.0, 0.0, 640.0, 480.0),
            Boundaries::new(PointF::new(0.0, 0.0), PointF::new(1.0, 1.0)),
        )
    }
}

impl CartesianPlane {
    pub fn new(area: RectF, range: Boundaries) -> Self {
        Self {
            area: area.normalized(),
            range,
            zoom_x: 1.0,
            zoom_y: 1.0,
            reverse_x: false,
            reverse_y: false,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
        }
    }

    pub fn area(&self) -> RectF {
        self.area
    }

    pub fn set_area(&mut self, area: RectF) {
        self.area = area.normalized();
    }

    pub fn set_visible_range(&mut self, range: Boundaries) {
        self.range = range;
    }

    /// Zoom factors scale the effective visible window around its
    /// center. Factors below 1 widen the window (screen-space margin);
    /// the stored data range is left untouched.
    pub fn set_zoom(&mut self, factor_x: f64, factor_y: f64) {
        self.zoom_x = if factor_x > 0.0 { factor_x } else { 1.0 };
        self.zoom_y = if factor_y > 0.0 { factor_y } else { 1.0 };
    }

    pub fn zoom_factors(&self) -> (f64, f64) {
        (self.zoom_x, self.zoom_y)
    }

    pub fn set_horizontal_range_reversed(&mut self, reversed: bool) {
        self.reverse_x = reversed;
    }

    pub fn set_vertical_range_reversed(&mut self, reversed: bool) {
        self.reverse_y = reversed;
    }

    pub fn is_horizontal_range_reversed(&self) -> bool {
        self.reverse_x
    }

    pub fn is_vertical_range_reversed(&self) -> bool {
        self.reverse_y
    }

    pub fn set_axis_scales(&mut self, x: AxisScale, y: AxisScale) {
        self.x_scale = x;
        self.y_scale = y;
    }

    /// Effective visible range after zoom adjustment, in data space.
    /// This is what merge-radius calculation and grids should use, not
    /// the stored range.
    pub fn visible_data_range(&self) -> Boundaries {
        let (x_min, x_max) = self.effective_span(self.range.min.x, self.range.max.x, self.zoom_x);
        let (y_min, y_max) = self.effective_span(self.range.min.y, self.range.max.y, self.zoom_y);
        Boundaries::new(PointF::new(x_min, y_min), PointF::new(x_max, y_max))
    }

    fn effective_span(&self, min: f64, max: f64, zoom: f64) -> (f64, f64) {
        let mut span = max - min;
        if span == 0.0 {
            span = DEFAULT_RANGE_SPAN;
        }
        let center = min + (max - min) * 0.5;
        let half = span / zoom * 0.5;
        (center - half, center + half)
    }

    fn axis_value(scale: AxisScale, v: f64) -> f64 {
        match scale {
            AxisScale::Linear => v,
            AxisScale::Log10 => v.max(LOG_EPS).log10(),
        }
    }

    fn axis_value_inv(scale: AxisScale, v: f64) -> f64 {
        match scale {
            AxisScale::Linear => v,
            AxisScale::Log10 => 10f64.powf(v),
        }
    }

    /// Data space to pixel space. Pure in the current range, area,
    /// zoom, and reversal state.
    pub fn translate(&self, p: PointF) -> PointF {
        let vis = self.visible_data_range();

        let x_min = Self::axis_value(self.x_scale, vis.min.x);
        let x_max = Self::axis_value(self.x_scale, vis.max.x);
        let y_min = Self::axis_value(self.y_scale, vis.min.y);
        let y_max = Self::axis_value(self.y_scale, vis.max.y);

        let x_span = nonzero(x_max - x_min);
        let y_span = nonzero(y_max - y_min);

        let tx = (Self::axis_value(self.x_scale, p.x) - x_min) / x_span;
        let ty = (Self::axis_value(self.y_scale, p.y) - y_min) / y_span;

        let px = if self.reverse_x {
            self.area.right() - tx * self.area.width
        } else {
            self.area.left + tx * self.area.width
        };
        // Pixel y grows downward; an unreversed value axis points up.
        let py = if self.reverse_y {
            self.area.top + ty * self.area.height
        } else {
            self.area.bottom() - ty * self.area.height
        };
        PointF::new(px, py)
    }

    /// Pixel space back to data space; inverse of `translate` up to
    /// floating-point rounding.
    pub fn translate_back(&self, p: PointF) -> PointF {
        let vis = self.visible_data_range();

        let x_min = Self::axis_value(self.x_scale, vis.min.x);
        let x_max = Self::axis_value(self.x_scale, vis.max.x);
        let y_min = Self::axis_value(self.y_scale, vis.min.y);
        let y_max = Self::axis_value(self.y_scale, vis.max.y);

        let width = nonzero(self.area.width);
        let height = nonzero(self.area.height);

        let tx = if self.reverse_x {
            (self.area.right() - p.x) / width
        } else {
            (p.x - self.area.left) / width
        };
        let ty = if self.reverse_y {
            (p.y - self.area.top) / height
        } else {
            (self.area.bottom() - p.y) / height
        };

        let x = x_min + tx * (x_max - x_min);
        let y = y_min + ty * (y_max - y_min);
        PointF::new(
            Self::axis_value_inv(self.x_scale, x),
            Self::axis_value_inv(self.y_scale, y),
        )
    }
}

#[inline]
fn nonzero(span: f64) -> f64 {
    if span.abs() < LOG_EPS {
        DEFAULT_RANGE_SPAN
    } else {
        span
    }
}
