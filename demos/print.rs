//! Spatially sorted points in your terminal!
//!
//! Sorts every cell of a small grid along the Hilbert or Morton curve, then
//! draws the path that the sorted sequence follows. Pass `morton` as the first
//! argument to see the Z-order curve, which is drawn with the index of each
//! cell as it jumps around too much for box-drawing characters.

use spatial_sort::{AxisSelection, Bounds, CurveKind, SpatialComparator, Vec3};

type Cell = [usize; 2];

// Sort the cells of a grid of specified order along a curve
fn sorted_cells(curve: CurveKind, order: u32) -> Vec<Cell> {
    let side = 1usize << order;
    let max = (side - 1) as f32;
    let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::new(max, max, 0.0));
    let comparator = SpatialComparator::with_bits(
        AxisSelection::Xy,
        curve,
        bounds,
        order,
        |cell: &Cell| Vec3::new(cell[0] as f32, cell[1] as f32, 0.0),
    );
    let mut cells = (0..side * side)
        .map(|idx| [idx % side, idx / side])
        .collect::<Vec<_>>();
    cells.sort_by(|a, b| comparator.compare(a, b));
    cells
}

// Display a Hilbert curve of specified order
fn print_hilbert(order: u32) {
    println!("--- At order {order} ---\n");
    let coordinates = sorted_cells(CurveKind::Hilbert, order);
    let coord_range = 1usize << order;
    let num_points = coordinates.len();

    // Set up a 2D character-based display
    let mut display = (0..(num_points + coord_range))
        .map(|idx| {
            if idx % (coord_range + 1) == coord_range {
                '\n'
            } else {
                // This character is a placeholder that should not persist in
                // the final program output.
                '@'
            }
        })
        .collect::<Vec<_>>();
    let to_index = |coords: Cell| coords[1] * (coord_range + 1) + coords[0];
    let to_dir = |src: Cell, dst: Cell| {
        [
            dst[0] as isize - src[0] as isize,
            dst[1] as isize - src[1] as isize,
        ]
    };

    // Draw the start of the curve
    let start = coordinates[0];
    let next = coordinates[1];
    display[to_index(start)] = match to_dir(start, next) {
        [0, -1] => '┴',
        [1, 0] => '├',
        [0, 1] => '┬',
        [-1, 0] => '┤',
        _ => unreachable!("Hilbert curve moves by single-coordinate steps"),
    };

    // Draw the end of the curve
    let end = coordinates[num_points - 1];
    let prev = coordinates[num_points - 2];
    display[to_index(end)] = match to_dir(prev, end) {
        [0, -1] => '^',
        [1, 0] => '>',
        [0, 1] => 'v',
        [-1, 0] => '<',
        _ => unreachable!("Hilbert curve moves by single-coordinate steps"),
    };

    // Draw the middle of the curve
    for window in coordinates.windows(3) {
        let path = match (to_dir(window[0], window[1]), to_dir(window[1], window[2])) {
            ([-1, 0], [0, -1]) | ([0, 1], [1, 0]) => '└',
            ([-1, 0], [0, 1]) | ([0, -1], [1, 0]) => '┌',
            ([1, 0], [1, 0]) | ([-1, 0], [-1, 0]) => '─',
            ([1, 0], [0, -1]) | ([0, 1], [-1, 0]) => '┘',
            ([0, 1], [0, 1]) | ([0, -1], [0, -1]) => '│',
            ([1, 0], [0, 1]) | ([0, -1], [-1, 0]) => '┐',
            _ => unreachable!("Hilbert curve moves by single-coordinate steps and doesn't go back"),
        };
        display[to_index(window[1])] = path;
    }

    let display_string = display.into_iter().collect::<String>();
    println!("{display_string}");
}

// Display the rank of each cell along a Morton curve of specified order
fn print_morton(order: u32) {
    println!("--- At order {order} ---\n");
    let coord_range = 1usize << order;
    let mut ranks = vec![0; coord_range * coord_range];
    for (rank, cell) in sorted_cells(CurveKind::Morton, order).into_iter().enumerate() {
        ranks[cell[1] * coord_range + cell[0]] = rank;
    }
    let width = (ranks.len() - 1).to_string().len();
    for row in ranks.chunks(coord_range) {
        let line = row
            .iter()
            .map(|rank| format!("{rank:>width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
    println!();
}

fn main() {
    let curve = match std::env::args().nth(1) {
        Some(name) => name.parse().unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1)
        }),
        None => CurveKind::Hilbert,
    };
    println!();
    for order in 1..=5 {
        match curve {
            CurveKind::Hilbert => print_hilbert(order),
            CurveKind::Morton => print_morton(order),
        }
    }
}
