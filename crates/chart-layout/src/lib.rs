// File: crates/chart-layout/src/lib.rs
// Summary: Core library entry point; exports the diagram layout and data-compression API.

pub mod attributes;
pub mod bar;
pub mod compressor;
pub mod diagram;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod model;
pub mod pie;
pub mod plane;
pub mod plotter;

pub use attributes::{
    AttributeMap, BarAttributes, DataValueAttributes, LineAttributes, MarkerAttributes,
    MissingValuePolicy, ThreeDAttributes,
};
pub use bar::BarDiagram;
pub use compressor::{CachePosition, CompressedGrid, CompressionMode, DataCompressor, DataPoint};
pub use diagram::DiagramFlavor;
pub use draw::{DrawCommand, DrawList};
pub use error::ChartError;
pub use geometry::{Boundaries, PointF, RectF};
pub use labels::{LabelAlignment, LabelPaintCache, LabelRequest};
pub use model::{CellRef, MemoryModel, TableModel};
pub use pie::PieDiagram;
pub use plane::{AxisScale, CartesianPlane};
pub use plotter::Plotter;
