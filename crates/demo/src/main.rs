// File: crates/demo/src/main.rs
// Summary: Demo builds an in-memory model and prints the draw commands of each diagram flavor.

use anyhow::Result;
use chart_layout::{
    BarDiagram, Boundaries, CartesianPlane, DataValueAttributes, DiagramFlavor, DrawCommand,
    DrawList, LabelAlignment, MemoryModel, PieDiagram, Plotter, RectF,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Quarterly revenue per product line; one NaN to show gap handling.
    let model = MemoryModel::from_rows(vec![
        vec![12.0, 8.0, 3.0],
        vec![15.0, f64::NAN, 4.0],
        vec![9.0, 11.0, 6.0],
        vec![14.0, 10.0, 5.0],
    ]);

    let area = RectF::new(0.0, 0.0, 640.0, 480.0);

    for flavor in [DiagramFlavor::Normal, DiagramFlavor::Stacked, DiagramFlavor::Percent] {
        let mut diagram = BarDiagram::new(flavor);
        diagram.set_data_value_attributes(DataValueAttributes {
            visible: true,
            alignment: LabelAlignment::North,
        });

        let mut plane = CartesianPlane::new(area, Boundaries::default());
        plane.set_visible_range(diagram.data_boundaries(&model));

        let mut out = DrawList::new();
        diagram.paint(&plane, &model, &mut out);
        println!("== bar / {flavor:?}: {} commands", out.len());
        dump(&out);
    }

    let mut plotter = Plotter::new();
    plotter.set_flavor(DiagramFlavor::Stacked)?;
    let mut plane = CartesianPlane::new(area, Boundaries::default());
    plane.set_visible_range(plotter.data_boundaries(&model));
    let mut out = DrawList::new();
    plotter.paint(&plane, &model, &mut out);
    println!("== plotter / Stacked: {} commands", out.len());
    dump(&out);

    let mut pie = PieDiagram::new(0);
    let mut out = DrawList::new();
    pie.paint(area, &model, &mut out)?;
    println!("== pie: {} commands", out.len());
    dump(&out);

    Ok(())
}

fn dump(out: &DrawList) {
    for command in out.commands() {
        match command {
            DrawCommand::FilledRect { rect, cell } => println!(
                "  rect ({:.1},{:.1}) {:.1}x{:.1} <- r{}c{}",
                rect.left, rect.top, rect.width, rect.height, cell.row, cell.column
            ),
            DrawCommand::LineSegment { from, to, column } => println!(
                "  line ({:.1},{:.1}) -> ({:.1},{:.1}) col {column}",
                from.x, from.y, to.x, to.y
            ),
            DrawCommand::Marker { at, size, cell } => println!(
                "  marker ({:.1},{:.1}) size {size:.1} <- r{}c{}",
                at.x, at.y, cell.row, cell.column
            ),
            DrawCommand::Slice { start_angle, span_angle, cell, .. } => println!(
                "  slice {start_angle:.1}deg +{span_angle:.1}deg <- r{}c{}",
                cell.row, cell.column
            ),
            DrawCommand::Text { at, value, cell } => println!(
                "  text {value:.2} at ({:.1},{:.1}) <- r{}c{}",
                at.x, at.y, cell.row, cell.column
            ),
        }
    }
}
