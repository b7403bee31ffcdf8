// File: crates/chart-layout/tests/paint.rs
// Purpose: Validate layout geometry emitted by bar, plotter, and pie paint passes.

use chart_layout::{
    BarDiagram, Boundaries, CartesianPlane, ChartError, DataValueAttributes, DiagramFlavor,
    DrawCommand, DrawList, LabelAlignment, LineAttributes, MemoryModel, MissingValuePolicy,
    PieDiagram, Plotter, RectF, ThreeDAttributes,
};

fn plane_for_bar(diagram: &mut BarDiagram, model: &MemoryModel) -> CartesianPlane {
    let mut plane = CartesianPlane::new(RectF::new(0.0, 0.0, 100.0, 100.0), Boundaries::default());
    plane.set_visible_range(diagram.data_boundaries(model));
    plane
}

fn rects(out: &DrawList) -> Vec<RectF> {
    out.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FilledRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

fn segment_count(out: &DrawList) -> usize {
    out.commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::LineSegment { .. }))
        .count()
}

#[test]
fn empty_model_paints_nothing() {
    let model = MemoryModel::new(3);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);
    assert!(out.is_empty());
}

#[test]
fn zero_column_model_paints_nothing() {
    let model = MemoryModel::from_rows(vec![vec![], vec![]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);
    assert!(out.is_empty());
}

#[test]
fn nan_cells_emit_no_geometry() {
    let model = MemoryModel::from_rows(vec![vec![f64::NAN], vec![5.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);
    assert_eq!(rects(&out).len(), 1);
}

#[test]
fn stacked_bars_stack_segments_by_translated_deltas() {
    let model = MemoryModel::from_rows(vec![vec![3.0, 1.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);

    let rects = rects(&out);
    assert_eq!(rects.len(), 2);

    // y-range is [0,4] over 100px: the 3-value segment spans 75px from
    // the baseline, the 1-value segment the 25px above it.
    let first = rects[0];
    let second = rects[1];
    assert!((first.top - 25.0).abs() < 1e-9);
    assert!((first.height - 75.0).abs() < 1e-9);
    assert!((second.top - 0.0).abs() < 1e-9);
    assert!((second.height - 25.0).abs() < 1e-9);
    // Segments of one stack share their x extent.
    assert!((first.left - second.left).abs() < 1e-9);
    assert!((first.width - second.width).abs() < 1e-9);
}

#[test]
fn percent_bars_normalize_each_row_to_one_hundred() {
    let model = MemoryModel::from_rows(vec![vec![1.0, 3.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Percent);
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);

    let rects = rects(&out);
    assert_eq!(rects.len(), 2);
    // 1 of 4 is 25%, 3 of 4 the remaining 75%.
    assert!((rects[0].height - 25.0).abs() < 1e-9);
    assert!((rects[1].height - 75.0).abs() < 1e-9);
}

#[test]
fn bar_labels_go_through_the_overlap_pass() {
    let model = MemoryModel::from_rows(vec![vec![3.0, 1.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    diagram.set_data_value_attributes(DataValueAttributes {
        visible: true,
        alignment: LabelAlignment::North,
    });
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);

    let texts = out
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count();
    assert_eq!(texts, 2);
}

#[test]
fn plotter_missing_values_split_the_polyline() {
    let model = MemoryModel::from_rows(vec![
        vec![1.0],
        vec![f64::NAN],
        vec![2.0],
        vec![3.0],
    ]);
    let mut plotter = Plotter::new();
    let mut plane = CartesianPlane::new(RectF::new(0.0, 0.0, 100.0, 100.0), Boundaries::default());
    plane.set_visible_range(plotter.data_boundaries(&model));

    let mut out = DrawList::new();
    plotter.paint(&plane, &model, &mut out);
    // Gap policy: only rows 2 and 3 connect.
    assert_eq!(segment_count(&out), 1);

    plotter.set_line_attributes(LineAttributes {
        missing_value_policy: MissingValuePolicy::Continue,
    });
    let mut out = DrawList::new();
    plotter.paint(&plane, &model, &mut out);
    // Bridging reconnects across the missing sample.
    assert_eq!(segment_count(&out), 2);
}

#[test]
fn stacked_plotter_boundaries_accumulate_columns() {
    let model = MemoryModel::from_rows(vec![vec![1.0, 2.0], vec![2.0, 3.0]]);
    let mut plotter = Plotter::new();
    plotter.set_flavor(DiagramFlavor::Stacked).unwrap();

    let b = plotter.data_boundaries(&model);
    assert_eq!(b.min.x, 0.0);
    assert_eq!(b.max.x, 1.0);
    assert_eq!(b.min.y, 1.0);
    assert_eq!(b.max.y, 5.0);
}

#[test]
fn plotter_flavor_requires_two_dimensional_datasets() {
    let mut plotter = Plotter::new();
    plotter.set_dataset_dimension(1);
    assert_eq!(
        plotter.set_flavor(DiagramFlavor::Percent),
        Err(ChartError::DatasetDimension { expected: 2, actual: 1 })
    );
}

#[test]
fn pie_slices_partition_the_full_circle() {
    let model = MemoryModel::from_rows(vec![vec![1.0], vec![1.0], vec![2.0]]);
    let mut pie = PieDiagram::new(0);

    let mut out = DrawList::new();
    pie.paint(RectF::new(0.0, 0.0, 100.0, 100.0), &model, &mut out)
        .unwrap();

    let angles: Vec<(f64, f64)> = pie.slice_angles().collect();
    assert_eq!(angles.len(), 3);
    assert_eq!(angles[0], (0.0, 90.0));
    assert_eq!(angles[1], (90.0, 90.0));
    assert_eq!(angles[2], (180.0, 180.0));
    assert_eq!(out.len(), 3);
}

#[test]
fn pie_rejects_models_without_the_configured_column() {
    let model = MemoryModel::new(0);
    let mut pie = PieDiagram::new(0);
    let mut out = DrawList::new();
    assert_eq!(
        pie.paint(RectF::new(0.0, 0.0, 10.0, 10.0), &model, &mut out),
        Err(ChartError::DatasetDimension { expected: 1, actual: 0 })
    );
}

#[test]
fn pie_with_no_rows_paints_nothing() {
    let model = MemoryModel::new(1);
    let mut pie = PieDiagram::new(0);
    let mut out = DrawList::new();
    pie.paint(RectF::new(0.0, 0.0, 10.0, 10.0), &model, &mut out)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn excessive_three_d_depth_is_capped_during_paint() {
    let model = MemoryModel::from_rows(vec![vec![2.0], vec![3.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    diagram.set_three_d_attributes(ThreeDAttributes { enabled: true, depth: 10.0 });
    let plane = plane_for_bar(&mut diagram, &model);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);

    // The taller stack tops out at pixel y 0; a 10px extrusion would
    // invert it, so the stored depth is reduced to fit.
    assert!(diagram.three_d_attributes().depth < 10.0);
    assert_eq!(diagram.three_d_attributes().depth, -1.0);
}

#[test]
fn reversed_horizontal_range_keeps_bars_against_the_origin() {
    let model = MemoryModel::from_rows(vec![vec![2.0], vec![4.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    let mut plane = plane_for_bar(&mut diagram, &model);
    plane.set_horizontal_range_reversed(true);

    let mut out = DrawList::new();
    diagram.paint(&plane, &model, &mut out);

    let rects = rects(&out);
    assert_eq!(rects.len(), 2);
    for rect in rects {
        assert!(rect.width > 0.0);
        assert!(rect.left >= -1e-9);
        assert!(rect.right() <= 100.0 + 1e-9);
    }
}
