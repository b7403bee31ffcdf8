// File: crates/chart-layout/src/compressor.rs
// Summary: Reduces the raw data matrix to a resolution-bounded grid of aggregated points.

use tracing::debug;

use crate::model::{CellRef, TableModel};

/// Position in the compressed grid. Unique key; insertion order is
/// irrelevant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CachePosition {
    pub row: usize,
    pub column: usize,
}

impl CachePosition {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// One aggregated cell: summed value, abscissa key, and the raw cells
/// it was built from (for recovering the original rows on
/// hover/selection). `value` is NaN when every member was absent.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub value: f64,
    pub key: f64,
    pub source: Vec<CellRef>,
}

impl DataPoint {
    pub fn is_missing(&self) -> bool {
        self.value.is_nan()
    }
}

static MISSING_POINT: DataPoint = DataPoint { value: f64::NAN, key: f64::NAN, source: Vec::new() };

/// Point-merging mode for dense line plots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionMode {
    #[default]
    None,
    /// Coalesce consecutive points closer than the merge radius.
    Distance,
    /// Drop points whose removal changes the local slope less than the
    /// configured threshold.
    Slope,
    Both,
}

/// The compressed data matrix. Rebuilt wholesale, never mutated in
/// place; owned by the diagram that produced it.
#[derive(Clone, Debug, Default)]
pub struct CompressedGrid {
    rows: usize,
    columns: usize,
    cells: Vec<DataPoint>,
}

impl CompressedGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Aggregated point at a cache position; a missing point for
    /// positions outside the grid.
    pub fn data(&self, position: CachePosition) -> &DataPoint {
        if position.row < self.rows && position.column < self.columns {
            &self.cells[position.row * self.columns + position.column]
        } else {
            &MISSING_POINT
        }
    }
}

/// Aggregates the raw model into a `CompressedGrid` bounded by the
/// display resolution, so paint cost stays independent of the raw row
/// count. Queries observe the model revision and rebuild lazily when
/// it advanced.
#[derive(Clone, Debug)]
pub struct DataCompressor {
    x_resolution: usize,
    y_resolution: usize,
    mode: CompressionMode,
    merge_radius: f64,
    max_slope_change: f64,
    grid: CompressedGrid,
    seen_revision: Option<u64>,
}

impl Default for DataCompressor {
    fn default() -> Self {
        Self {
            x_resolution: 0,
            y_resolution: 0,
            mode: CompressionMode::None,
            merge_radius: 0.0,
            max_slope_change: 0.0,
            grid: CompressedGrid::default(),
            seen_revision: None,
        }
    }
}

impl DataCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display resolution in pixels; the compressed row count never
    /// exceeds the horizontal resolution. Zero means uncompressed.
    pub fn set_resolution(&mut self, width_px: usize, height_px: usize) {
        if self.x_resolution != width_px || self.y_resolution != height_px {
            self.x_resolution = width_px;
            self.y_resolution = height_px;
            self.mark_dirty();
        }
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.x_resolution, self.y_resolution)
    }

    pub fn set_compression_mode(&mut self, mode: CompressionMode) {
        self.mode = mode;
    }

    pub fn compression_mode(&self) -> CompressionMode {
        self.mode
    }

    /// Data-space distance below which adjacent line points coalesce.
    pub fn set_merge_radius(&mut self, radius: f64) {
        self.merge_radius = radius.max(0.0);
    }

    pub fn set_max_slope_change(&mut self, slope: f64) {
        self.max_slope_change = slope.max(0.0);
    }

    pub fn mark_dirty(&mut self) {
        self.seen_revision = None;
    }

    /// Borrow the current grid, rebuilding first if the model revision
    /// advanced since the last query.
    pub fn grid(&mut self, model: &dyn TableModel) -> &CompressedGrid {
        if self.seen_revision != Some(model.revision()) {
            self.rebuild(model);
        }
        &self.grid
    }

    /// Compressed row count for the current model state.
    pub fn model_data_rows(&mut self, model: &dyn TableModel) -> usize {
        self.grid(model).rows()
    }

    /// Compressed column count (datasets map 1:1).
    pub fn model_data_columns(&mut self, model: &dyn TableModel) -> usize {
        self.grid(model).columns()
    }

    /// Convenience single-cell query; clones the aggregated point.
    pub fn data(&mut self, model: &dyn TableModel, position: CachePosition) -> DataPoint {
        self.grid(model).data(position).clone()
    }

    /// One dataset as an ordered point sequence with the configured
    /// merge mode applied. Missing points survive as run breaks so
    /// gap policies still see them.
    pub fn merged_column(&mut self, model: &dyn TableModel, column: usize) -> Vec<DataPoint> {
        let mode = self.mode;
        let merge_radius = self.merge_radius;
        let max_slope = self.max_slope_change;
        let grid = self.grid(model);
        let mut points: Vec<DataPoint> = (0..grid.rows())
            .map(|row| grid.data(CachePosition::new(row, column)).clone())
            .collect();
        match mode {
            CompressionMode::None => {}
            CompressionMode::Distance => points = merge_by_distance(points, merge_radius),
            CompressionMode::Slope => points = merge_by_slope(points, max_slope),
            CompressionMode::Both => {
                points = merge_by_distance(points, merge_radius);
                points = merge_by_slope(points, max_slope);
            }
        }
        points
    }

    fn rebuild(&mut self, model: &dyn TableModel) {
        let raw_rows = model.row_count();
        let columns = model.column_count();
        let rows = if self.x_resolution == 0 {
            raw_rows
        } else {
            raw_rows.min(self.x_resolution)
        };

        let mut cells = Vec::with_capacity(rows * columns);
        for bucket in 0..rows {
            // Identity mapping when raw rows fit the resolution,
            // contiguous buckets otherwise.
            let start = bucket * raw_rows / rows;
            let end = ((bucket + 1) * raw_rows / rows).max(start + 1);
            let key = model.key_at(start);
            for column in 0..columns {
                let mut sum = 0.0;
                let mut any_finite = false;
                let mut source = Vec::with_capacity(end - start);
                for row in start..end {
                    let v = model.value_at(row, column);
                    if v.is_finite() {
                        sum += v;
                        any_finite = true;
                    }
                    source.push(CellRef::new(row, column));
                }
                let value = if any_finite { sum } else { f64::NAN };
                cells.push(DataPoint { value, key, source });
            }
        }

        debug!(raw_rows, rows, columns, "rebuilt compressed grid");
        self.grid = CompressedGrid { rows, columns, cells };
        self.seen_revision = Some(model.revision());
    }
}

/// Coalesce consecutive points whose data-space distance from the head
/// of the current run stays below `radius`. Merged points average key
/// and value and union their source cells.
fn merge_by_distance(points: Vec<DataPoint>, radius: f64) -> Vec<DataPoint> {
    if radius <= 0.0 || points.len() < 2 {
        return points;
    }
    let mut out: Vec<DataPoint> = Vec::with_capacity(points.len());
    let mut run: Vec<DataPoint> = Vec::new();
    for p in points {
        if p.is_missing() {
            flush_run(&mut out, &mut run);
            out.push(p);
            continue;
        }
        match run.first() {
            Some(head) => {
                let dx = p.key - head.key;
                let dy = p.value - head.value;
                if (dx * dx + dy * dy).sqrt() < radius {
                    run.push(p);
                } else {
                    flush_run(&mut out, &mut run);
                    run.push(p);
                }
            }
            None => run.push(p),
        }
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut Vec<DataPoint>, run: &mut Vec<DataPoint>) {
    if run.is_empty() {
        return;
    }
    let n = run.len() as f64;
    let key = run.iter().map(|p| p.key).sum::<f64>() / n;
    let value = run.iter().map(|p| p.value).sum::<f64>() / n;
    let source = run.drain(..).flat_map(|p| p.source).collect();
    out.push(DataPoint { value, key, source });
}

/// Drop interior points while the slope change across them stays below
/// `max_slope_change`; dropped sources accumulate on the surviving
/// endpoint.
fn merge_by_slope(points: Vec<DataPoint>, max_slope_change: f64) -> Vec<DataPoint> {
    if max_slope_change <= 0.0 || points.len() < 3 {
        return points;
    }
    let mut out: Vec<DataPoint> = Vec::with_capacity(points.len());
    for p in points {
        if p.is_missing() {
            out.push(p);
            continue;
        }
        loop {
            let n = out.len();
            if n < 2 || out[n - 1].is_missing() || out[n - 2].is_missing() {
                break;
            }
            let s_prev = slope(&out[n - 2], &out[n - 1]);
            let s_next = slope(&out[n - 1], &p);
            if (s_next - s_prev).abs() >= max_slope_change {
                break;
            }
            // The middle point is redundant; fold its sources forward.
            let dropped = out.remove(n - 1);
            if let Some(tail) = out.last_mut() {
                tail.source.extend(dropped.source);
            }
        }
        out.push(p);
    }
    out
}

fn slope(a: &DataPoint, b: &DataPoint) -> f64 {
    let dx = b.key - a.key;
    if dx.abs() < f64::EPSILON {
        f64::INFINITY
    } else {
        (b.value - a.value) / dx
    }
}
