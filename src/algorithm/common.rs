use crate::Grid;

// Moore neighbourhood, row by row.
pub const MOORE_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// Interior cells (everything but the outer ring), x outer and y inner.
pub fn interior_cells(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..width.saturating_sub(1))
        .flat_map(move |x| (1..height.saturating_sub(1)).map(move |y| (x, y)))
}

// Count walls in the 8-neighbourhood, where cells outside the grid count as walls.
pub fn count_wall_neighbours(grid: &Grid, x: usize, y: usize) -> usize {
    MOORE_DELTAS
        .iter()
        .filter(|&&(dx, dy)| match grid.offset(x, y, dx, dy) {
            Some((nx, ny)) => grid.is_wall(nx, ny),
            None => true,
        })
        .count()
}

/// Turns every interior wall with at least three floor neighbours into floor at `floor_height`.
///
/// Neighbours are read from the grid as it was before the call, so converted cells never
/// trigger further conversions. Returns the number of cells converted.
pub fn smooth_edges(grid: &mut Grid, floor_height: f32) -> usize {
    let original = grid.clone();
    let (width, height) = original.size();

    let mut filled = 0;
    for (x, y) in interior_cells(width, height) {
        if original.is_wall(x, y) && original.floor_neighbours(x, y) >= 3 {
            grid.set(x, y, floor_height);
            filled += 1;
        }
    }

    log::debug!("Edge smoothing filled {filled} cells");
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_cells_skip_the_border() {
        let cells: Vec<_> = interior_cells(4, 3).collect();
        assert_eq!(cells, vec![(1, 1), (2, 1)]);
        assert_eq!(interior_cells(2, 9).count(), 0);
        assert_eq!(interior_cells(0, 0).count(), 0);
    }

    #[test]
    fn test_out_of_bounds_counts_as_wall() {
        let grid = Grid::from_ascii("...\n...\n...\n", 1.0).unwrap();
        assert_eq!(count_wall_neighbours(&grid, 1, 1), 0);
        assert_eq!(count_wall_neighbours(&grid, 0, 0), 5);
        assert_eq!(count_wall_neighbours(&grid, 1, 0), 3);
    }

    #[test]
    fn test_smoothing_fills_notches() {
        let mut grid = Grid::from_ascii(
            "
            #####
            #...#
            #.#.#
            #...#
            #####
            ",
            1.0,
        )
        .unwrap();
        assert_eq!(smooth_edges(&mut grid, 1.0), 1);
        assert!(grid.is_floor(2, 2));
        assert!(grid.border_is_wall());
    }

    #[test]
    fn test_smoothing_does_not_cascade() {
        // Filling (2, 2) gives (2, 3) a third floor neighbour, but only the grid as it
        // was before the pass counts.
        let mut grid = Grid::from_ascii(
            "
            #####
            #...#
            #.#.#
            #.#.#
            #####
            ",
            1.0,
        )
        .unwrap();
        assert_eq!(smooth_edges(&mut grid, 3.0), 1);
        assert_eq!(grid[(2, 2)], 3.0);
        assert!(grid.is_wall(2, 3));
    }

    #[test]
    fn test_smoothing_leaves_border_alone() {
        let mut grid = Grid::from_ascii("#.#\n...\n#.#\n", 1.0).unwrap();
        assert_eq!(smooth_edges(&mut grid, 1.0), 0);
        assert!(grid.is_wall(0, 0));
    }
}
