use kdthree::KdTree;

/// Parses a `"x, y, z"` coordinate line, the format the display layer's input
/// field uses.
fn parse_point(raw: &str) -> Result<[f64; 3], Box<dyn std::error::Error>> {
    let mut parts = raw.split(',');
    let mut point = [0.0; 3];
    for coordinate in point.iter_mut() {
        *coordinate = parts.next().ok_or("expected three coordinates")?.trim().parse()?;
    }
    Ok(point)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = KdTree::<3>::new();

    for raw in ["1, 2, 3", "1, 3, 4", "1, 3, 5", "2, 2, 3", "2, 3, 4", "2, 3, 5"] {
        tree.insert(parse_point(raw)?);
        println!("inserted ({raw}) -> balance factor {}", tree.balance_factor());
    }

    println!("\ntree as JSON:");
    println!("{}", serde_json::to_string_pretty(&tree.to_representation())?);

    tree.balance();
    println!("\nafter balance() -> balance factor {}", tree.balance_factor());
    println!("{}", serde_json::to_string_pretty(&tree.to_representation())?);

    Ok(())
}
