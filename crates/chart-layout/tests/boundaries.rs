// File: crates/chart-layout/tests/boundaries.rs
// Purpose: Validate boundary calculation per flavor, NaN handling, and degenerate-range widening.

use chart_layout::{BarDiagram, DiagramFlavor, MemoryModel};

#[test]
fn normal_boundaries_span_finite_values() {
    let model = MemoryModel::from_rows(vec![
        vec![3.0, -1.0],
        vec![f64::NAN, 7.0],
        vec![2.0, 2.0],
    ]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let b = diagram.data_boundaries(&model);

    assert_eq!(b.min.x, 0.0);
    assert_eq!(b.max.x, 3.0);
    assert_eq!(b.min.y, -1.0);
    assert_eq!(b.max.y, 7.0);
}

#[test]
fn stacked_boundaries_track_signed_running_sums() {
    // row0: pos sum 3, neg sum -1; row1: pos sum 4
    let model = MemoryModel::from_rows(vec![vec![3.0, -1.0], vec![2.0, 2.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    let b = diagram.data_boundaries(&model);

    assert_eq!(b.min.x, 0.0);
    assert_eq!(b.max.x, 2.0);
    assert_eq!(b.min.y, -1.0);
    assert_eq!(b.max.y, 4.0);
}

#[test]
fn stacked_boundaries_treat_nan_as_zero_contribution() {
    let model = MemoryModel::from_rows(vec![vec![3.0, f64::NAN], vec![2.0, 2.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);
    let b = diagram.data_boundaries(&model);

    assert_eq!(b.max.y, 4.0);
    assert!(b.min.y <= b.max.y);
}

#[test]
fn percent_boundaries_pin_the_range() {
    let positive = MemoryModel::from_rows(vec![vec![1.0, 3.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Percent);
    let b = diagram.data_boundaries(&positive);
    assert_eq!(b.min.y, 0.0);
    assert_eq!(b.max.y, 100.0);

    let mixed = MemoryModel::from_rows(vec![vec![-2.0, 2.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Percent);
    let b = diagram.data_boundaries(&mixed);
    assert_eq!(b.min.y, -100.0);
    assert_eq!(b.max.y, 100.0);
}

#[test]
fn degenerate_range_is_widened() {
    // All values equal: the range must not collapse to zero height.
    let model = MemoryModel::from_rows(vec![vec![5.0], vec![5.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let b = diagram.data_boundaries(&model);
    assert_eq!(b.min.y, 0.0);
    assert_eq!(b.max.y, 5.0);

    // A single strictly negative value extends up to zero.
    let negative = MemoryModel::from_rows(vec![vec![-4.0], vec![-4.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let b = diagram.data_boundaries(&negative);
    assert_eq!(b.min.y, -4.0);
    assert_eq!(b.max.y, 0.0);

    // All zeros get the minimal 0.1 span.
    let zero = MemoryModel::from_rows(vec![vec![0.0], vec![0.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let b = diagram.data_boundaries(&zero);
    assert_eq!(b.min.y, 0.0);
    assert_eq!(b.max.y, 0.1);
}

#[test]
fn boundaries_are_ordered_for_any_finite_grid() {
    let model = MemoryModel::from_rows(vec![
        vec![5.0, f64::NAN, -3.0],
        vec![f64::NAN, 0.0, 8.0],
    ]);
    for flavor in [DiagramFlavor::Normal, DiagramFlavor::Stacked, DiagramFlavor::Percent] {
        let mut diagram = BarDiagram::new(flavor);
        let b = diagram.data_boundaries(&model);
        assert!(b.min.x <= b.max.x, "{flavor:?}");
        assert!(b.min.y <= b.max.y, "{flavor:?}");
    }
}

#[test]
fn boundaries_are_cached_and_idempotent() {
    let mut model = MemoryModel::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Stacked);

    let first = diagram.data_boundaries(&model);
    let second = diagram.data_boundaries(&model);
    assert_eq!(first, second);

    // A model edit advances the revision and invalidates the cache.
    model.set_value(1, 1, 10.0);
    let third = diagram.data_boundaries(&model);
    assert_eq!(third.max.y, 13.0);
}

#[test]
fn flavor_switch_invalidates_cached_boundaries() {
    let model = MemoryModel::from_rows(vec![vec![3.0, -1.0], vec![2.0, 2.0]]);
    let mut diagram = BarDiagram::new(DiagramFlavor::Normal);
    let normal = diagram.data_boundaries(&model);
    assert_eq!(normal.max.y, 3.0);

    diagram.set_flavor(DiagramFlavor::Stacked);
    let stacked = diagram.data_boundaries(&model);
    assert_eq!(stacked.max.y, 4.0);
}

#[test]
fn clone_copies_configuration_and_recomputes() {
    let model = MemoryModel::from_rows(vec![vec![3.0, -1.0], vec![2.0, 2.0]]);
    let mut original = BarDiagram::new(DiagramFlavor::Stacked);
    let warm = original.data_boundaries(&model);

    let mut copy = original.clone();
    assert_eq!(copy.flavor(), DiagramFlavor::Stacked);
    assert_eq!(copy.data_boundaries(&model), warm);
}
