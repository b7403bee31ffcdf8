// File: crates/chart-layout/src/labels.rs
// Summary: Value-label collection and one-shot overlap avoidance for a single paint pass.

use crate::draw::{DrawCommand, DrawList};
use crate::geometry::RectF;
use crate::model::CellRef;

/// Where a label sits relative to its anchor; doubles as the nudge
/// direction during overlap resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelAlignment {
    #[default]
    North,
    South,
    East,
    West,
    Center,
}

/// Candidate label position, consumed within one paint pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRequest {
    pub anchor: RectF,
    pub cell: CellRef,
    pub alignment: LabelAlignment,
    pub value: f64,
}

/// Collects label requests in paint order and resolves overlaps in a
/// single pass: each request is nudged along its alignment direction
/// until it no longer intersects an earlier-placed label. Submission
/// order decides ties; the first request keeps its preferred position.
/// No backtracking, deterministic for identical input order.
#[derive(Clone, Debug, Default)]
pub struct LabelPaintCache {
    requests: Vec<LabelRequest>,
}

impl LabelPaintCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: LabelRequest) {
        self.requests.push(request);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Resolve overlaps and emit one text command per request. Drains
    /// the cache.
    pub fn finalize(&mut self, out: &mut DrawList) {
        let mut placed: Vec<RectF> = Vec::with_capacity(self.requests.len());
        for request in self.requests.drain(..) {
            let mut rect = request.anchor.normalized();
            let (dx, dy) = nudge_step(request.alignment, &rect);
            while placed.iter().any(|p| p.intersects(&rect)) {
                rect = rect.translated(dx, dy);
            }
            out.push(DrawCommand::Text {
                at: rect.center(),
                value: request.value,
                cell: request.cell,
            });
            placed.push(rect);
        }
    }

    /// Emit every request at its preferred position, skipping overlap
    /// resolution. Drains the cache.
    pub fn emit_unresolved(&mut self, out: &mut DrawList) {
        for request in self.requests.drain(..) {
            let rect = request.anchor.normalized();
            out.push(DrawCommand::Text {
                at: rect.center(),
                value: request.value,
                cell: request.cell,
            });
        }
    }
}

fn nudge_step(alignment: LabelAlignment, rect: &RectF) -> (f64, f64) {
    let h = rect.height.max(1.0);
    let w = rect.width.max(1.0);
    match alignment {
        LabelAlignment::North => (0.0, -h),
        // Center has no preferred side; fall through to a downward nudge.
        LabelAlignment::South | LabelAlignment::Center => (0.0, h),
        LabelAlignment::East => (w, 0.0),
        LabelAlignment::West => (-w, 0.0),
    }
}
