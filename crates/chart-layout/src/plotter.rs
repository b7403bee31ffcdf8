// File: crates/chart-layout/src/plotter.rs
// Summary: Line (plotter) diagram; polyline layout for normal, stacked, and percent flavors.

use crate::attributes::{
    AttributeMap, DataValueAttributes, LineAttributes, MarkerAttributes, MissingValuePolicy,
};
use crate::compressor::{
    CachePosition, CompressedGrid, CompressionMode, DataCompressor, DataPoint,
};
use crate::diagram::{has_negative_values, percent_value, row_totals, BoundaryCache, DiagramFlavor};
use crate::draw::{DrawCommand, DrawList};
use crate::error::ChartError;
use crate::geometry::{Boundaries, PointF, RectF};
use crate::labels::{LabelPaintCache, LabelRequest};
use crate::model::{CellRef, TableModel};
use crate::plane::CartesianPlane;

/// Nominal label box for point labels; real text metrics belong to the
/// drawing collaborator.
const LABEL_WIDTH: f64 = 24.0;
const LABEL_HEIGHT: f64 = 12.0;

/// XY line chart over (key, value) pairs; one polyline per dataset
/// column. Dense series can be thinned via distance/slope merging.
#[derive(Debug)]
pub struct Plotter {
    flavor: DiagramFlavor,
    dataset_dimension: usize,
    line_attributes: AttributeMap<LineAttributes>,
    marker_attributes: AttributeMap<MarkerAttributes>,
    data_value_attributes: AttributeMap<DataValueAttributes>,
    merge_radius_percentage: f64,
    compressor: DataCompressor,
    boundaries: BoundaryCache,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}

// Cloning copies configuration and drops cached geometry.
impl Clone for Plotter {
    fn clone(&self) -> Self {
        let mut compressor = self.compressor.clone();
        compressor.mark_dirty();
        Self {
            flavor: self.flavor,
            dataset_dimension: self.dataset_dimension,
            line_attributes: self.line_attributes.clone(),
            marker_attributes: self.marker_attributes.clone(),
            data_value_attributes: self.data_value_attributes.clone(),
            merge_radius_percentage: self.merge_radius_percentage,
            compressor,
            boundaries: BoundaryCache::default(),
        }
    }
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            flavor: DiagramFlavor::Normal,
            dataset_dimension: 2,
            line_attributes: AttributeMap::default(),
            marker_attributes: AttributeMap::default(),
            data_value_attributes: AttributeMap::default(),
            merge_radius_percentage: 0.0,
            compressor: DataCompressor::new(),
            boundaries: BoundaryCache::default(),
        }
    }

    pub fn flavor(&self) -> DiagramFlavor {
        self.flavor
    }

    /// Switch the layout flavor. Line chart flavors require
    /// two-dimensional datasets; violating that is a caller error.
    pub fn set_flavor(&mut self, flavor: DiagramFlavor) -> Result<(), ChartError> {
        if self.dataset_dimension != 2 {
            return Err(ChartError::DatasetDimension {
                expected: 2,
                actual: self.dataset_dimension,
            });
        }
        if self.flavor != flavor {
            self.flavor = flavor;
            self.boundaries.invalidate();
        }
        Ok(())
    }

    pub fn dataset_dimension(&self) -> usize {
        self.dataset_dimension
    }

    pub fn set_dataset_dimension(&mut self, dimension: usize) {
        self.dataset_dimension = dimension;
    }

    pub fn set_use_data_compression(&mut self, mode: CompressionMode) {
        if self.compressor.compression_mode() != mode {
            self.compressor.set_compression_mode(mode);
            self.boundaries.invalidate();
        }
    }

    pub fn use_data_compression(&self) -> CompressionMode {
        self.compressor.compression_mode()
    }

    /// Fraction of the visible-range diagonal below which adjacent
    /// points merge in `Distance`/`Both` mode.
    pub fn set_merge_radius_percentage(&mut self, value: f64) {
        self.merge_radius_percentage = value.max(0.0);
    }

    pub fn set_max_slope_change(&mut self, value: f64) {
        self.compressor.set_max_slope_change(value);
    }

    pub fn set_line_attributes(&mut self, attributes: LineAttributes) {
        self.line_attributes.set_default(attributes);
    }

    pub fn set_line_attributes_for_column(&mut self, column: usize, attributes: LineAttributes) {
        self.line_attributes.set_for_column(column, attributes);
    }

    pub fn set_marker_attributes(&mut self, attributes: MarkerAttributes) {
        self.marker_attributes.set_default(attributes);
    }

    pub fn set_data_value_attributes(&mut self, attributes: DataValueAttributes) {
        self.data_value_attributes.set_default(attributes);
    }

    pub fn set_compression_resolution(&mut self, width_px: usize, height_px: usize) {
        if self.compressor.resolution() != (width_px, height_px) {
            self.compressor.set_resolution(width_px, height_px);
            self.boundaries.invalidate();
        }
    }

    /// Derive the data-space merge radius from the plane's effective
    /// visible range.
    fn calc_merge_radius(&mut self, plane: &CartesianPlane) {
        let range = plane.visible_data_range();
        let radius = (range.max.x * range.max.y).abs().sqrt();
        self.compressor.set_merge_radius(radius * self.merge_radius_percentage);
    }

    pub fn data_boundaries(&mut self, model: &dyn TableModel) -> Boundaries {
        let flavor = self.flavor;
        let grid = self.compressor.grid(model);
        self.boundaries.get_or_compute(model.revision(), || match flavor {
            DiagramFlavor::Normal => normal_boundaries(grid),
            DiagramFlavor::Stacked => stacked_boundaries(grid),
            DiagramFlavor::Percent => percent_boundaries(grid),
        })
    }

    /// Compute polyline geometry, markers, and labels into `out`.
    pub fn paint(&mut self, plane: &CartesianPlane, model: &dyn TableModel, out: &mut DrawList) {
        let area = plane.area();
        self.set_compression_resolution(area.width as usize, area.height as usize);

        let boundaries = self.data_boundaries(model);
        if !boundaries.is_valid() {
            return;
        }
        if matches!(
            self.compressor.compression_mode(),
            CompressionMode::Distance | CompressionMode::Both
        ) {
            self.calc_merge_radius(plane);
        }

        if self.compressor.grid(model).is_empty() {
            return;
        }

        let columns = self.compressor.model_data_columns(model);
        let mut lpc = LabelPaintCache::new();
        for col in 0..columns {
            let points = self.column_points(model, col);
            self.paint_polyline(plane, col, &points, &mut lpc, out);
        }
        lpc.finalize(out);
    }

    /// One dataset as (key, value) points in the active flavor.
    /// Merge-based thinning only applies to the normal flavor; stacking
    /// needs every cache row of every column.
    fn column_points(&mut self, model: &dyn TableModel, col: usize) -> Vec<DataPoint> {
        match self.flavor {
            DiagramFlavor::Normal => self.compressor.merged_column(model, col),
            DiagramFlavor::Stacked => {
                let grid = self.compressor.grid(model);
                (0..grid.rows()).map(|row| stacked_point(grid, row, col)).collect()
            }
            DiagramFlavor::Percent => {
                let grid = self.compressor.grid(model);
                (0..grid.rows())
                    .map(|row| {
                        let totals = row_totals(grid, row);
                        let mut p = stacked_percent_point(grid, row, col, totals);
                        let raw = grid.data(CachePosition::new(row, col));
                        if raw.is_missing() {
                            p.value = f64::NAN;
                        }
                        p
                    })
                    .collect()
            }
        }
    }

    fn paint_polyline(
        &self,
        plane: &CartesianPlane,
        col: usize,
        points: &[DataPoint],
        lpc: &mut LabelPaintCache,
        out: &mut DrawList,
    ) {
        let la = self.line_attributes.for_column(col);
        let ma = self.marker_attributes.for_column(col);
        let mut previous: Option<PointF> = None;

        for (row, point) in points.iter().enumerate() {
            if point.is_missing() {
                if la.missing_value_policy == MissingValuePolicy::Gap {
                    previous = None;
                }
                continue;
            }
            let cell = point.source.first().copied().unwrap_or(CellRef::new(row, col));
            let pix = plane.translate(PointF::new(point.key, point.value));
            if let Some(prev) = previous {
                out.push(DrawCommand::LineSegment { from: prev, to: pix, column: col });
            }
            if ma.visible {
                out.push(DrawCommand::Marker { at: pix, size: ma.size, cell });
            }
            let dva = self.data_value_attributes.for_cell(cell);
            if dva.visible {
                lpc.add(LabelRequest {
                    anchor: RectF::new(
                        pix.x - LABEL_WIDTH * 0.5,
                        pix.y - LABEL_HEIGHT * 0.5,
                        LABEL_WIDTH,
                        LABEL_HEIGHT,
                    ),
                    cell,
                    alignment: dva.alignment,
                    value: point.value,
                });
            }
            previous = Some(pix);
        }
    }
}

// ---- boundaries -------------------------------------------------------------

fn key_range(grid: &CompressedGrid) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in 0..grid.rows() {
        let key = grid.data(CachePosition::new(row, 0)).key;
        if key.is_finite() {
            min = min.min(key);
            max = max.max(key);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn normal_boundaries(grid: &CompressedGrid) -> Boundaries {
    let (x_min, x_max) = key_range(grid);
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
    Boundaries::new(PointF::new(x_min, y_min), PointF::new(x_max, y_max)).corrected()
}

fn stacked_boundaries(grid: &CompressedGrid) -> Boundaries {
    let (x_min, x_max) = key_range(grid);
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for row in 0..grid.rows() {
        let mut sum = 0.0;
        for column in 0..grid.columns() {
            let value = grid.data(CachePosition::new(row, column)).value;
            if !value.is_nan() {
                sum += value;
            }
            y_min = y_min.min(sum);
            y_max = y_max.max(sum);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 0.0;
    }
    Boundaries::new(PointF::new(x_min, y_min), PointF::new(x_max, y_max)).corrected()
}

fn percent_boundaries(grid: &CompressedGrid) -> Boundaries {
    let (x_min, x_max) = key_range(grid);
    let y_min = if has_negative_values(grid) { -100.0 } else { 0.0 };
    Boundaries::new(PointF::new(x_min, y_min), PointF::new(x_max, 100.0))
}

// ---- stacking ---------------------------------------------------------------

/// Cumulative value of one row through `col`; NaN members add nothing
/// but a NaN cell at `col` itself keeps the point missing.
fn stacked_point(grid: &CompressedGrid, row: usize, col: usize) -> DataPoint {
    let raw = grid.data(CachePosition::new(row, col));
    let mut sum = 0.0;
    for k in 0..=col {
        let v = grid.data(CachePosition::new(row, k)).value;
        if !v.is_nan() {
            sum += v;
        }
    }
    DataPoint {
        value: if raw.is_missing() { f64::NAN } else { sum },
        key: raw.key,
        source: raw.source.clone(),
    }
}

fn stacked_percent_point(
    grid: &CompressedGrid,
    row: usize,
    col: usize,
    totals: crate::diagram::RowTotals,
) -> DataPoint {
    let raw = grid.data(CachePosition::new(row, col));
    let mut sum = 0.0;
    for k in 0..=col {
        let v = grid.data(CachePosition::new(row, k)).value;
        let pv = percent_value(v, totals);
        if !pv.is_nan() {
            sum += pv;
        }
    }
    DataPoint { value: sum, key: raw.key, source: raw.source.clone() }
}
