use kdthree::{BoundingBox, KdTree};
use plotters::prelude::*;
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new("nearest_query.svg", (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    // 1000 random points in the plane; the same tree type handles any fixed
    // dimension.
    let mut rng = rand::thread_rng();
    let mut tree = KdTree::<2>::new();
    for _ in 0..1000 {
        tree.insert([rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)]);
    }
    tree.balance();

    chart.draw_series(
        tree.points()
            .into_iter()
            .map(|p| Circle::new((p[0], p[1]), 2, BLACK.filled())),
    )?;

    // Highlight the 25 nearest neighbors of the center.
    let query = [50.0, 50.0];
    let nearest = tree.nearest(&query, 25);
    chart.draw_series(
        nearest
            .into_iter()
            .map(|p| Circle::new((p[0], p[1]), 4, RED.filled())),
    )?;
    chart.draw_series(std::iter::once(Circle::new(
        (query[0], query[1]),
        5,
        BLUE.filled(),
    )))?;

    // Draw a range query box and mark its matches.
    let bounds = BoundingBox::new([10.0, 60.0], [35.0, 90.0]);
    let mut in_range = Vec::new();
    tree.points_in_range(&bounds, &mut in_range);
    chart.draw_series(
        in_range
            .into_iter()
            .map(|p| Circle::new((p[0], p[1]), 4, GREEN.filled())),
    )?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (bounds.min[0], bounds.min[1]),
            (bounds.max[0], bounds.min[1]),
            (bounds.max[0], bounds.max[1]),
            (bounds.min[0], bounds.max[1]),
            (bounds.min[0], bounds.min[1]),
        ],
        GREEN.stroke_width(2),
    )))?;

    root.present()?;
    println!("wrote nearest_query.svg, balance factor {}", tree.balance_factor());

    Ok(())
}
