// File: crates/chart-layout/src/model.rs
// Summary: Tabular data source trait with revision-based change tracking, plus an in-memory impl.

/// Stable handle into the raw data source. Kept as plain indices rather
/// than a live reference; validity is checked lazily against the current
/// source bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn is_valid_for(&self, model: &dyn TableModel) -> bool {
        self.row < model.row_count() && self.column < model.column_count()
    }
}

/// Row/column value source consumed by diagrams. Rows are categories
/// (abscissa), columns are datasets. Absent samples are NaN.
///
/// Change notification is a monotonic revision counter: every mutation
/// advances it, and caches compare their last-seen revision instead of
/// subscribing to per-cell signals.
pub trait TableModel {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    /// Value of one cell; NaN when the sample is missing.
    fn value_at(&self, row: usize, column: usize) -> f64;
    /// Abscissa key of a row (defaults to the row index for category charts).
    fn key_at(&self, row: usize) -> f64 {
        row as f64
    }
    fn revision(&self) -> u64;
}

/// Vec-backed model for tests, demos, and small data sets.
#[derive(Clone, Debug, Default)]
pub struct MemoryModel {
    rows: Vec<Vec<f64>>,
    keys: Vec<f64>,
    columns: usize,
    revision: u64,
}

impl MemoryModel {
    pub fn new(columns: usize) -> Self {
        Self { rows: Vec::new(), keys: Vec::new(), columns, revision: 0 }
    }

    /// Build from row-major data; the column count is taken from the
    /// widest row, shorter rows read as NaN.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let keys = (0..rows.len()).map(|r| r as f64).collect();
        Self { rows, keys, columns, revision: 0 }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn push_row(&mut self, values: Vec<f64>) {
        self.keys.push(self.rows.len() as f64);
        self.rows.push(values);
        self.touch();
    }

    pub fn insert_row(&mut self, at: usize, values: Vec<f64>) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, values);
        self.keys.insert(at, at as f64);
        self.touch();
    }

    pub fn remove_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rows.remove(at);
            self.keys.remove(at);
            self.touch();
        }
    }

    pub fn insert_column(&mut self, at: usize) {
        let at = at.min(self.columns);
        for row in &mut self.rows {
            while row.len() < at {
                row.push(f64::NAN);
            }
            row.insert(at, f64::NAN);
        }
        self.columns += 1;
        self.touch();
    }

    pub fn remove_column(&mut self, at: usize) {
        if at < self.columns {
            for row in &mut self.rows {
                if at < row.len() {
                    row.remove(at);
                }
            }
            self.columns -= 1;
            self.touch();
        }
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: f64) {
        if row < self.rows.len() && column < self.columns {
            let r = &mut self.rows[row];
            while r.len() <= column {
                r.push(f64::NAN);
            }
            r[column] = value;
            self.touch();
        }
    }

    pub fn set_key(&mut self, row: usize, key: f64) {
        if row < self.keys.len() {
            self.keys[row] = key;
            self.touch();
        }
    }
}

impl TableModel for MemoryModel {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn value_at(&self, row: usize, column: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn key_at(&self, row: usize) -> f64 {
        self.keys.get(row).copied().unwrap_or(row as f64)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
