// File: crates/chart-layout/src/diagram.rs
// Summary: Diagram flavor selection and the lazily recomputed boundary cache.

use tracing::trace;

use crate::compressor::{CachePosition, CompressedGrid};
use crate::geometry::Boundaries;

/// Layout algorithm selected at runtime. Switching the flavor swaps
/// the active boundary/paint strategy without reallocating the
/// diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiagramFlavor {
    #[default]
    Normal,
    Stacked,
    Percent,
}

/// Cached data boundaries, keyed on the model revision. Reads after an
/// invalidation (or a revision bump) recompute once; repeated reads
/// without intervening change return the identical cached value.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BoundaryCache {
    value: Option<Boundaries>,
    revision: Option<u64>,
}

impl BoundaryCache {
    pub(crate) fn invalidate(&mut self) {
        self.value = None;
        self.revision = None;
    }

    pub(crate) fn get_or_compute(
        &mut self,
        revision: u64,
        compute: impl FnOnce() -> Boundaries,
    ) -> Boundaries {
        if self.revision == Some(revision) {
            if let Some(value) = self.value {
                return value;
            }
        }
        let value = compute();
        trace!(?value, revision, "recomputed data boundaries");
        self.value = Some(value);
        self.revision = Some(revision);
        value
    }
}

/// Signed per-row totals used by the percent flavor. Positive and
/// negative values are normalized against separate totals.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RowTotals {
    pub positive: f64,
    pub negative: f64,
}

pub(crate) fn row_totals(grid: &CompressedGrid, row: usize) -> RowTotals {
    let mut totals = RowTotals::default();
    for column in 0..grid.columns() {
        let value = grid.data(CachePosition::new(row, column)).value;
        if value.is_nan() {
            continue;
        }
        if value >= 0.0 {
            totals.positive += value;
        } else {
            totals.negative += value;
        }
    }
    totals
}

/// Normalize one cell value to its row total, positive and negative
/// sides tracked separately, yielding a percentage in [-100, 100].
pub(crate) fn percent_value(value: f64, totals: RowTotals) -> f64 {
    if value.is_nan() {
        return f64::NAN;
    }
    if value >= 0.0 {
        if totals.positive > 0.0 {
            value / totals.positive * 100.0
        } else {
            0.0
        }
    } else if totals.negative < 0.0 {
        value / -totals.negative * 100.0
    } else {
        0.0
    }
}

/// True when the grid holds at least one finite negative value.
pub(crate) fn has_negative_values(grid: &CompressedGrid) -> bool {
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let value = grid.data(CachePosition::new(row, column)).value;
            if value.is_finite() && value < 0.0 {
                return true;
            }
        }
    }
    false
}
