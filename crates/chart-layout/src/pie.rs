// File: crates/chart-layout/src/pie.rs
// Summary: Pie diagram; per-slice start angles and spans over one dataset column.

use crate::attributes::{AttributeMap, DataValueAttributes};
use crate::compressor::{CachePosition, DataCompressor};
use crate::draw::{DrawCommand, DrawList};
use crate::error::ChartError;
use crate::geometry::{PointF, RectF};
use crate::labels::{LabelAlignment, LabelPaintCache, LabelRequest};
use crate::model::{CellRef, TableModel};

const LABEL_WIDTH: f64 = 24.0;
const LABEL_HEIGHT: f64 = 12.0;

/// Single-ring pie over the rows of one dataset column. Angles are in
/// degrees, counter-clockwise from 3 o'clock. NaN and non-positive
/// values produce no slice.
#[derive(Debug)]
pub struct PieDiagram {
    column: usize,
    start_position: f64,
    data_value_attributes: AttributeMap<DataValueAttributes>,
    collision_avoidance: bool,
    compressor: DataCompressor,
    // per-slice layout of the last paint pass, for hit tests
    start_angles: Vec<f64>,
    angle_lens: Vec<f64>,
}

impl Clone for PieDiagram {
    fn clone(&self) -> Self {
        let mut compressor = self.compressor.clone();
        compressor.mark_dirty();
        Self {
            column: self.column,
            start_position: self.start_position,
            data_value_attributes: self.data_value_attributes.clone(),
            collision_avoidance: self.collision_avoidance,
            compressor,
            start_angles: Vec::new(),
            angle_lens: Vec::new(),
        }
    }
}

impl PieDiagram {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            start_position: 0.0,
            data_value_attributes: AttributeMap::default(),
            collision_avoidance: true,
            compressor: DataCompressor::new(),
            start_angles: Vec::new(),
            angle_lens: Vec::new(),
        }
    }

    /// Angle of the first slice's leading edge, in degrees.
    pub fn set_start_position(&mut self, degrees: f64) {
        self.start_position = degrees;
    }

    pub fn set_label_collision_avoidance(&mut self, enabled: bool) {
        self.collision_avoidance = enabled;
    }

    pub fn set_data_value_attributes(&mut self, attributes: DataValueAttributes) {
        self.data_value_attributes.set_default(attributes);
    }

    /// Slice layout of the last paint pass: (start angle, span) per
    /// compressed row, zero span for skipped rows.
    pub fn slice_angles(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.start_angles.iter().copied().zip(self.angle_lens.iter().copied())
    }

    /// Lay the pie out inside `area`. Fails when the model has no
    /// column to draw from; an empty row set just paints nothing.
    pub fn paint(
        &mut self,
        area: RectF,
        model: &dyn TableModel,
        out: &mut DrawList,
    ) -> Result<(), ChartError> {
        if model.column_count() <= self.column {
            return Err(ChartError::DatasetDimension {
                expected: self.column + 1,
                actual: model.column_count(),
            });
        }

        let area = area.normalized();
        self.compressor.set_resolution(area.width as usize, area.height as usize);
        let grid = self.compressor.grid(model);

        self.start_angles.clear();
        self.angle_lens.clear();
        if grid.is_empty() {
            return Ok(());
        }

        let mut total = 0.0;
        for row in 0..grid.rows() {
            let value = grid.data(CachePosition::new(row, self.column)).value;
            if value.is_finite() && value > 0.0 {
                total += value;
            }
        }
        if total <= 0.0 {
            return Ok(());
        }

        let center = area.center();
        let radius = area.width.min(area.height) * 0.5;
        let mut lpc = LabelPaintCache::new();
        let mut angle = self.start_position;

        for row in 0..grid.rows() {
            let point = grid.data(CachePosition::new(row, self.column));
            let value = point.value;
            if !value.is_finite() || value <= 0.0 {
                self.start_angles.push(angle);
                self.angle_lens.push(0.0);
                continue;
            }
            let span = value / total * 360.0;
            let cell = point.source.first().copied().unwrap_or(CellRef::new(row, self.column));

            out.push(DrawCommand::Slice {
                center,
                radius,
                start_angle: angle,
                span_angle: span,
                cell,
            });

            let dva = self.data_value_attributes.for_cell(cell);
            if dva.visible {
                let mid = (angle + span * 0.5).to_radians();
                let at = PointF::new(
                    center.x + mid.cos() * radius,
                    center.y - mid.sin() * radius,
                );
                lpc.add(LabelRequest {
                    anchor: RectF::new(
                        at.x - LABEL_WIDTH * 0.5,
                        at.y - LABEL_HEIGHT * 0.5,
                        LABEL_WIDTH,
                        LABEL_HEIGHT,
                    ),
                    cell,
                    alignment: LabelAlignment::Center,
                    value,
                });
            }

            self.start_angles.push(angle);
            self.angle_lens.push(span);
            angle += span;
        }

        if self.collision_avoidance {
            lpc.finalize(out);
        } else {
            lpc.emit_unresolved(out);
        }
        Ok(())
    }
}
