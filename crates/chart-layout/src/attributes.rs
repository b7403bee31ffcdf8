// File: crates/chart-layout/src/attributes.rs
// Summary: Per-diagram, per-dataset and per-cell visual attribute storage with default fallback.

use std::collections::HashMap;

use crate::labels::LabelAlignment;
use crate::model::CellRef;

/// Bar sizing attributes. Fixed values override the proportional layout;
/// unset fields fall back to gap factors relative to one bar width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarAttributes {
    pub fixed_bar_width: Option<f64>,
    /// Fixed pixel gap between bars of one group.
    pub fixed_data_value_gap: Option<f64>,
    /// Fixed pixel gap between groups.
    pub fixed_value_block_gap: Option<f64>,
    pub bar_gap_factor: f64,
    pub group_gap_factor: f64,
}

impl Default for BarAttributes {
    fn default() -> Self {
        Self {
            fixed_bar_width: None,
            fixed_data_value_gap: None,
            fixed_value_block_gap: None,
            bar_gap_factor: 0.5,
            group_gap_factor: 0.5,
        }
    }
}

/// Pseudo-3-D extrusion settings; `valid_depth` is zero while disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThreeDAttributes {
    pub enabled: bool,
    pub depth: f64,
}

impl ThreeDAttributes {
    pub fn valid_depth(&self) -> f64 {
        if self.enabled {
            self.depth
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataValueAttributes {
    pub visible: bool,
    pub alignment: LabelAlignment,
}

impl Default for DataValueAttributes {
    fn default() -> Self {
        Self { visible: false, alignment: LabelAlignment::North }
    }
}

/// How a polyline treats NaN samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingValuePolicy {
    /// Break the polyline at the missing sample.
    #[default]
    Gap,
    /// Bridge over the missing sample to the next finite one.
    Continue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineAttributes {
    pub missing_value_policy: MissingValuePolicy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerAttributes {
    pub visible: bool,
    pub size: f64,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self { visible: false, size: 4.0 }
    }
}

/// Attribute lookup with three-level fallback: cell override, then
/// dataset (column) override, then the diagram-wide default.
#[derive(Clone, Debug)]
pub struct AttributeMap<T: Clone> {
    default: T,
    per_column: HashMap<usize, T>,
    per_cell: HashMap<CellRef, T>,
}

impl<T: Clone + Default> Default for AttributeMap<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> AttributeMap<T> {
    pub fn new(default: T) -> Self {
        Self { default, per_column: HashMap::new(), per_cell: HashMap::new() }
    }

    pub fn set_default(&mut self, value: T) {
        self.default = value;
    }

    pub fn set_for_column(&mut self, column: usize, value: T) {
        self.per_column.insert(column, value);
    }

    pub fn reset_column(&mut self, column: usize) {
        self.per_column.remove(&column);
    }

    pub fn set_for_cell(&mut self, cell: CellRef, value: T) {
        self.per_cell.insert(cell, value);
    }

    pub fn reset_cell(&mut self, cell: CellRef) {
        self.per_cell.remove(&cell);
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn for_column(&self, column: usize) -> &T {
        self.per_column.get(&column).unwrap_or(&self.default)
    }

    pub fn for_cell(&self, cell: CellRef) -> &T {
        self.per_cell
            .get(&cell)
            .or_else(|| self.per_column.get(&cell.column))
            .unwrap_or(&self.default)
    }
}
