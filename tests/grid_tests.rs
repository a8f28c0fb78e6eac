use broadside::{Coordinate, Grid, Orientation};

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

#[test]
fn test_in_bounds() {
    let grid = Grid::new(8);
    assert!(grid.in_bounds(c(0, 0)));
    assert!(grid.in_bounds(c(7, 7)));
    assert!(!grid.in_bounds(c(8, 0)));
    assert!(!grid.in_bounds(c(0, 8)));
}

#[test]
fn test_neighbors4_filters_edges() {
    let grid = Grid::new(8);
    let corner = grid.neighbors4(c(0, 0));
    assert_eq!(corner, vec![c(1, 0), c(0, 1)]);

    let middle = grid.neighbors4(c(3, 3));
    assert_eq!(middle.len(), 4);
    assert!(middle.contains(&c(2, 3)));
    assert!(middle.contains(&c(4, 3)));
    assert!(middle.contains(&c(3, 2)));
    assert!(middle.contains(&c(3, 4)));

    let far = grid.neighbors4(c(7, 7));
    assert_eq!(far, vec![c(6, 7), c(7, 6)]);
}

#[test]
fn test_line_extension() {
    let grid = Grid::new(8);
    let ext = grid.line_extension(&[c(2, 4), c(2, 3)], Orientation::Horizontal);
    assert_eq!(ext, vec![c(2, 2), c(2, 5)]);

    let ext = grid.line_extension(&[c(0, 5), c(1, 5)], Orientation::Vertical);
    assert_eq!(ext, vec![c(2, 5)]);

    let ext = grid.line_extension(&[c(6, 0), c(7, 0)], Orientation::Vertical);
    assert_eq!(ext, vec![c(5, 0)]);

    assert!(grid.line_extension(&[], Orientation::Vertical).is_empty());
}

#[test]
fn test_segment() {
    let grid = Grid::new(8);
    assert_eq!(
        grid.segment(c(1, 5), Orientation::Horizontal, 3),
        Some(vec![c(1, 5), c(1, 6), c(1, 7)])
    );
    assert_eq!(grid.segment(c(1, 6), Orientation::Horizontal, 3), None);
    assert_eq!(grid.segment(c(6, 0), Orientation::Vertical, 3), None);
}

#[test]
fn test_block_is_clipped() {
    let grid = Grid::new(8);
    assert_eq!(grid.block(c(2, 2), 2, 2), vec![c(2, 2), c(2, 3), c(3, 2), c(3, 3)]);
    assert_eq!(grid.block(c(7, 7), 2, 2), vec![c(7, 7)]);
}

#[test]
fn test_column_and_cells() {
    let grid = Grid::new(4);
    let col: Vec<_> = grid.column(2).collect();
    assert_eq!(col, vec![c(0, 2), c(1, 2), c(2, 2), c(3, 2)]);
    assert_eq!(grid.column(4).count(), 0);
    assert_eq!(grid.cells().count(), 16);
    assert_eq!(grid.cells().nth(5), Some(c(1, 1)));
}

#[test]
fn test_coordinate_display() {
    assert_eq!(c(3, 1).to_string(), "B4");
    assert_eq!(c(0, 0).to_string(), "A1");
    assert_eq!(Coordinate::from((7, 7)), c(7, 7));
}

#[test]
fn test_geometry_near_usize_max() {
    let grid = Grid::new(8);
    assert_eq!(c(0, usize::MAX).offset(Orientation::Horizontal, 1), None);
    assert_eq!(c(3, 3).offset(Orientation::Vertical, 2), Some(c(5, 3)));
    assert_eq!(grid.segment(c(usize::MAX - 1, 0), Orientation::Vertical, 3), None);
    assert!(grid.block(c(usize::MAX, usize::MAX), 2, 2).is_empty());
    assert_eq!(c(usize::MAX, 0).to_string(), format!("({}, 0)", usize::MAX));
}
