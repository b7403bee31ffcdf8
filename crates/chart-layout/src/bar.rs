// File: crates/chart-layout/src/bar.rs
// Summary: Bar diagram; boundary calculation and bar layout for normal, stacked, and percent flavors.

use crate::attributes::{AttributeMap, BarAttributes, DataValueAttributes, ThreeDAttributes};
use crate::compressor::{CachePosition, CompressedGrid, DataCompressor};
use crate::diagram::{has_negative_values, percent_value, row_totals, BoundaryCache, DiagramFlavor};
use crate::draw::{DrawCommand, DrawList};
use crate::geometry::{clamp, Boundaries, PointF, RectF};
use crate::labels::{LabelAlignment, LabelPaintCache, LabelRequest};
use crate::model::{CellRef, TableModel};
use crate::plane::CartesianPlane;

/// Bar chart over a row/column model: rows are categories, columns are
/// datasets. Owns its compressed grid and boundary cache.
#[derive(Debug)]
pub struct BarDiagram {
    flavor: DiagramFlavor,
    bar_attributes: AttributeMap<BarAttributes>,
    three_d_attributes: AttributeMap<ThreeDAttributes>,
    data_value_attributes: AttributeMap<DataValueAttributes>,
    compressor: DataCompressor,
    boundaries: BoundaryCache,
}

impl Default for BarDiagram {
    fn default() -> Self {
        Self::new(DiagramFlavor::Normal)
    }
}

// Cloning copies configuration and drops cached geometry; the new
// instance recomputes lazily.
impl Clone for BarDiagram {
    fn clone(&self) -> Self {
        let mut compressor = self.compressor.clone();
        compressor.mark_dirty();
        Self {
            flavor: self.flavor,
            bar_attributes: self.bar_attributes.clone(),
            three_d_attributes: self.three_d_attributes.clone(),
            data_value_attributes: self.data_value_attributes.clone(),
            compressor,
            boundaries: BoundaryCache::default(),
        }
    }
}

impl BarDiagram {
    pub fn new(flavor: DiagramFlavor) -> Self {
        Self {
            flavor,
            bar_attributes: AttributeMap::default(),
            three_d_attributes: AttributeMap::default(),
            data_value_attributes: AttributeMap::default(),
            compressor: DataCompressor::new(),
            boundaries: BoundaryCache::default(),
        }
    }

    pub fn flavor(&self) -> DiagramFlavor {
        self.flavor
    }

    pub fn set_flavor(&mut self, flavor: DiagramFlavor) {
        if self.flavor != flavor {
            self.flavor = flavor;
            self.boundaries.invalidate();
        }
    }

    pub fn set_bar_attributes(&mut self, attributes: BarAttributes) {
        self.bar_attributes.set_default(attributes);
    }

    pub fn set_bar_attributes_for_column(&mut self, column: usize, attributes: BarAttributes) {
        self.bar_attributes.set_for_column(column, attributes);
    }

    pub fn bar_attributes(&self) -> &BarAttributes {
        self.bar_attributes.default_value()
    }

    pub fn set_three_d_attributes(&mut self, attributes: ThreeDAttributes) {
        self.three_d_attributes.set_default(attributes);
        self.boundaries.invalidate();
    }

    pub fn three_d_attributes(&self) -> &ThreeDAttributes {
        self.three_d_attributes.default_value()
    }

    pub fn set_data_value_attributes(&mut self, attributes: DataValueAttributes) {
        self.data_value_attributes.set_default(attributes);
    }

    pub fn set_data_value_attributes_for_cell(&mut self, cell: CellRef, attributes: DataValueAttributes) {
        self.data_value_attributes.set_for_cell(cell, attributes);
    }

    pub fn set_compression_resolution(&mut self, width_px: usize, height_px: usize) {
        if self.compressor.resolution() != (width_px, height_px) {
            self.compressor.set_resolution(width_px, height_px);
            self.boundaries.invalidate();
        }
    }

    /// Data-space bounding box for the current flavor. Cached until the
    /// model revision advances or the configuration changes.
    pub fn data_boundaries(&mut self, model: &dyn TableModel) -> Boundaries {
        let flavor = self.flavor;
        let grid = self.compressor.grid(model);
        self.boundaries.get_or_compute(model.revision(), || match flavor {
            DiagramFlavor::Normal => normal_boundaries(grid),
            DiagramFlavor::Stacked => stacked_boundaries(grid),
            DiagramFlavor::Percent => percent_boundaries(grid),
        })
    }

    /// Compute bar geometry and value labels into `out`. An empty model
    /// short-circuits: nothing to draw is not an error.
    pub fn paint(&mut self, plane: &CartesianPlane, model: &dyn TableModel, out: &mut DrawList) {
        let area = plane.area();
        self.set_compression_resolution(area.width as usize, area.height as usize);

        let boundaries = self.data_boundaries(model);
        if !boundaries.is_valid() {
            return;
        }

        let Self {
            flavor,
            ref bar_attributes,
            ref mut three_d_attributes,
            ref data_value_attributes,
            ref mut compressor,
            ..
        } = *self;
        let grid = compressor.grid(model);
        if grid.is_empty() {
            return;
        }

        let mut lpc = LabelPaintCache::new();
        match flavor {
            DiagramFlavor::Normal => paint_normal(
                grid,
                plane,
                boundaries,
                bar_attributes,
                three_d_attributes,
                data_value_attributes,
                &mut lpc,
                out,
            ),
            DiagramFlavor::Stacked | DiagramFlavor::Percent => paint_stacked(
                flavor,
                grid,
                plane,
                boundaries,
                bar_attributes,
                three_d_attributes,
                data_value_attributes,
                &mut lpc,
                out,
            ),
        }
        lpc.finalize(out);
    }
}

// ---- boundaries -------------------------------------------------------------

fn normal_boundaries(grid: &CompressedGrid) -> Boundaries {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let value = grid.data(CachePosition::new(row, column)).value;
            if value.is_finite() {
                y_min = y_min.min(value);
                y_max = y_max.max(value);
            }
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 0.0;
    }
    Boundaries::new(
        PointF::new(0.0, y_min),
        PointF::new(grid.rows() as f64, y_max),
    )
    .corrected()
}

fn stacked_boundaries(grid: &CompressedGrid) -> Boundaries {
    let mut y_min = 0.0f64;
    let mut y_max = 0.0f64;
    let mut is_first = true;

    for row in 0..grid.rows() {
        // Running sums per row: positive and negative values stack
        // separately.
        let mut stacked = 0.0;
        let mut negative_stacked = 0.0;
        for column in 0..grid.columns() {
            let point = grid.data(CachePosition::new(row, column));
            let value = if point.value.is_nan() { 0.0 } else { point.value };
            if value > 0.0 {
                stacked += value;
            } else {
                negative_stacked += value;
            }
            if is_first {
                y_min = if negative_stacked < 0.0 { negative_stacked } else { stacked };
                y_max = if stacked > 0.0 { stacked } else { negative_stacked };
                is_first = false;
            } else {
                y_min = y_min.min(stacked).min(negative_stacked);
                y_max = y_max.max(stacked).max(negative_stacked);
            }
        }
    }

    Boundaries::new(
        PointF::new(0.0, y_min),
        PointF::new(grid.rows() as f64, y_max),
    )
    .corrected()
}

fn percent_boundaries(grid: &CompressedGrid) -> Boundaries {
    let y_min = if has_negative_values(grid) { -100.0 } else { 0.0 };
    Boundaries::new(
        PointF::new(0.0, y_min),
        PointF::new(grid.rows() as f64, 100.0),
    )
}

// ---- layout -----------------------------------------------------------------

/// Pixel sizing for one paint pass, derived from the boundary span.
struct BarSizing {
    width: f64,
    bar_width: f64,
    space_between_bars: f64,
    space_between_groups: f64,
}

fn compute_sizing(
    flavor: DiagramFlavor,
    ba: &BarAttributes,
    plane: &CartesianPlane,
    boundaries: Boundaries,
    row_count: usize,
    col_count: usize,
) -> BarSizing {
    let bound_left = plane.translate(boundaries.min);
    let bound_right = plane.translate(boundaries.max);

    // Negative under a reversed horizontal range; layout math carries
    // the sign through so bars still hug their axis origin.
    let width = bound_right.x - bound_left.x;
    let rows = row_count as f64;
    let cols = col_count as f64;

    let mut bar_width = 0.0;
    let mut group_width = width / rows;
    let mut space_between_bars = 0.0;
    let mut space_between_groups = 0.0;

    if let Some(fixed) = ba.fixed_bar_width {
        bar_width = fixed;
        group_width += bar_width;
        if group_width < 0.0 {
            group_width = 0.0;
        }
        if group_width * rows > width {
            group_width = width / rows;
        }
    }

    // The configured gap may only apply while the groups still fit the
    // available width; otherwise fall back to proportional division.
    let max_limit = rows * (group_width + (cols - 1.0) * ba.fixed_data_value_gap.unwrap_or(0.0));
    if let Some(gap) = ba.fixed_data_value_gap {
        if width > max_limit {
            space_between_bars += gap;
        } else if col_count > 1 {
            space_between_bars = (width / rows - group_width) / (cols - 1.0);
        }
    }

    if let Some(gap) = ba.fixed_value_block_gap {
        space_between_groups += gap;
    }

    // Proportional division: one bar is one relative unit, gaps are
    // fractions of it.
    let units = match flavor {
        DiagramFlavor::Normal => cols + (cols - 1.0) * ba.bar_gap_factor + ba.group_gap_factor,
        DiagramFlavor::Stacked | DiagramFlavor::Percent => 1.0 + ba.group_gap_factor,
    };
    let unit_width = group_width / units;
    if ba.fixed_bar_width.is_none() {
        bar_width = unit_width;
    }
    if ba.fixed_data_value_gap.is_none() {
        space_between_bars = unit_width * ba.bar_gap_factor;
    }
    if matches!(flavor, DiagramFlavor::Stacked | DiagramFlavor::Percent) {
        space_between_bars = 0.0;
    }
    if ba.fixed_value_block_gap.is_none() {
        space_between_groups = unit_width * ba.group_gap_factor;
    }

    BarSizing { width, bar_width, space_between_bars, space_between_groups }
}

/// Clamp a layout offset toward the axis origin. The usual rule keeps
/// offsets non-negative; under a reversed horizontal range the sign
/// convention flips.
fn clamp_offset(plane: &CartesianPlane, offset: f64) -> f64 {
    if plane.is_horizontal_range_reversed() {
        if offset > 0.0 {
            0.0
        } else {
            offset
        }
    } else if offset < 0.0 {
        0.0
    } else {
        offset
    }
}

/// Cap the 3-D depth so the extruded top never rises above the pixel
/// origin (`point.y - depth` stays >= 0). The reduced depth is written
/// back to the diagram default, as later bars must not invert either.
fn cap_depth(
    three_d_attributes: &mut AttributeMap<ThreeDAttributes>,
    mut threed: ThreeDAttributes,
    point_y: f64,
) {
    if threed.enabled && point_y - threed.valid_depth() < 0.0 {
        threed.depth = point_y - 1.0;
        three_d_attributes.set_default(threed);
    }
}

fn label_alignment(attrs: &DataValueAttributes, value: f64) -> LabelAlignment {
    match attrs.alignment {
        LabelAlignment::North if value < 0.0 => LabelAlignment::South,
        LabelAlignment::South if value < 0.0 => LabelAlignment::North,
        other => other,
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_normal(
    grid: &CompressedGrid,
    plane: &CartesianPlane,
    boundaries: Boundaries,
    bar_attributes: &AttributeMap<BarAttributes>,
    three_d_attributes: &mut AttributeMap<ThreeDAttributes>,
    data_value_attributes: &AttributeMap<DataValueAttributes>,
    lpc: &mut LabelPaintCache,
    out: &mut DrawList,
) {
    let row_count = grid.rows();
    let col_count = grid.columns();
    let ba = *bar_attributes.default_value();
    let sizing = compute_sizing(DiagramFlavor::Normal, &ba, plane, boundaries, row_count, col_count);

    // Bars grow from the zero line when it is inside the visible range,
    // else from the nearest boundary edge.
    let base_value = clamp(0.0, boundaries.min.y, boundaries.max.y);

    for row in 0..row_count {
        for col in 0..col_count {
            let point = grid.data(CachePosition::new(row, col));
            if point.is_missing() {
                continue;
            }
            let cell = point.source.first().copied().unwrap_or(CellRef::new(row, col));
            let value = point.value;

            let offset = clamp_offset(plane, sizing.space_between_groups * 0.5);

            let top = plane.translate(PointF::new(point.key, value));
            let base = plane.translate(PointF::new(point.key, base_value));

            let threed = *three_d_attributes.for_cell(cell);
            cap_depth(three_d_attributes, threed, top.y);

            let x = base.x + offset + col as f64 * (sizing.bar_width + sizing.space_between_bars);
            let rect = RectF::new(x, top.y, sizing.bar_width, base.y - top.y).normalized();

            let dva = data_value_attributes.for_cell(cell);
            if dva.visible {
                lpc.add(LabelRequest {
                    anchor: rect,
                    cell,
                    alignment: label_alignment(dva, value),
                    value,
                });
            }
            out.push(DrawCommand::FilledRect { rect, cell });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_stacked(
    flavor: DiagramFlavor,
    grid: &CompressedGrid,
    plane: &CartesianPlane,
    boundaries: Boundaries,
    bar_attributes: &AttributeMap<BarAttributes>,
    three_d_attributes: &mut AttributeMap<ThreeDAttributes>,
    data_value_attributes: &AttributeMap<DataValueAttributes>,
    lpc: &mut LabelPaintCache,
    out: &mut DrawList,
) {
    let row_count = grid.rows();
    let col_count = grid.columns();
    let ba = *bar_attributes.default_value();
    let sizing = compute_sizing(flavor, &ba, plane, boundaries, row_count, col_count);
    let rows = row_count as f64;

    for col in 0..col_count {
        let mut offset = sizing.space_between_groups;
        if let Some(fixed) = ba.fixed_bar_width {
            offset -= fixed;
        }
        offset = clamp_offset(plane, offset);

        for row in 0..row_count {
            let point = grid.data(CachePosition::new(row, col));
            let cell = point.source.first().copied().unwrap_or(CellRef::new(row, col));
            let totals = row_totals(grid, row);
            let value = match flavor {
                DiagramFlavor::Percent => percent_value(point.value, totals),
                _ => point.value,
            };

            let threed = *three_d_attributes.for_cell(cell);
            let bar_width = if threed.enabled {
                let mut w = sizing.bar_width;
                if w > 0.0 {
                    w = (sizing.width - (offset + threed.depth) * rows) / rows;
                }
                if w <= 0.0 {
                    w = 0.0;
                }
                w
            } else {
                (sizing.width - offset * rows) / rows
            };

            // One stack segment: accumulate same-sign values from the
            // first dataset through this one.
            let mut stacked = 0.0;
            let mut key = 0.0;
            for k in (0..=col).rev() {
                let prev = grid.data(CachePosition::new(row, k));
                let pv = match flavor {
                    DiagramFlavor::Percent => percent_value(prev.value, totals),
                    _ => prev.value,
                };
                if !pv.is_nan() && ((value >= 0.0 && pv >= 0.0) || (value < 0.0 && pv < 0.0)) {
                    stacked += pv;
                }
                key = prev.key;
            }

            if value.is_nan() {
                continue;
            }

            let mut top = plane.translate(PointF::new(key, stacked));
            cap_depth(three_d_attributes, threed, top.y);
            top.x += offset / 2.0;

            let previous = plane.translate(PointF::new(key, stacked - value));
            let bar_height = previous.y - top.y;
            let rect = RectF::new(top.x, top.y, bar_width, bar_height).normalized();

            let dva = data_value_attributes.for_cell(cell);
            if dva.visible {
                lpc.add(LabelRequest {
                    anchor: rect,
                    cell,
                    alignment: label_alignment(dva, value),
                    value,
                });
            }
            out.push(DrawCommand::FilledRect { rect, cell });
        }
    }
}
