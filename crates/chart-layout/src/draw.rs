// File: crates/chart-layout/src/draw.rs
// Summary: Geometric draw commands handed to the rendering collaborator; the core never rasterizes.

use crate::geometry::{PointF, RectF};
use crate::model::CellRef;

/// One drawing primitive with its data-source provenance so renderers
/// can apply per-cell styling (and hit-test back to the model).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FilledRect {
        rect: RectF,
        cell: CellRef,
    },
    LineSegment {
        from: PointF,
        to: PointF,
        column: usize,
    },
    Marker {
        at: PointF,
        size: f64,
        cell: CellRef,
    },
    /// Pie slice; angles in degrees, counter-clockwise from 3 o'clock.
    Slice {
        center: PointF,
        radius: f64,
        start_angle: f64,
        span_angle: f64,
        cell: CellRef,
    },
    Text {
        at: PointF,
        value: f64,
        cell: CellRef,
    },
}

/// Accumulator for one paint pass; cleared by the caller between
/// passes.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
