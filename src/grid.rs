use ndarray::Array2;
use std::{
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
};

use crate::{Area, LayoutError, error::check_dimensions};

/// Cells at or above this value are floor, anything below is wall.
pub const FLOOR_THRESHOLD: f32 = 0.5;
/// Value stored in wall cells.
pub const WALL: f32 = 0.0;

const WALL_SYMBOL: char = '#';
const FLOOR_SYMBOL: char = '.';
const COMMENT_PREFIX: &str = "//";

/// Offsets of the four orthogonal neighbours: north, east, south, west.
pub const ORTHOGONAL_DELTAS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A fixed-size height map indexed by `(x, y)`.
///
/// Values below [`FLOOR_THRESHOLD`] are walls; all other values are floor cells whose value is
/// the floor height.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<f32>,
}

impl Grid {
    /// Creates a grid of the given size filled with walls.
    pub fn new(width: usize, height: usize) -> Result<Self, LayoutError> {
        check_dimensions(width, height, 1)?;
        Ok(Self::walls(width, height))
    }

    /// Wraps an existing `(width, height)` shaped array.
    pub fn from_array(cells: Array2<f32>) -> Result<Self, LayoutError> {
        let (width, height) = cells.dim();
        check_dimensions(width, height, 1)?;
        Ok(Self { cells })
    }

    // Callers have already checked the dimensions.
    pub(crate) fn walls(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "Grid must contain at least one cell");
        Self {
            cells: Array2::from_elem((width, height), WALL),
        }
    }

    /// Parses an ASCII picture where `#` is a wall and `.` is floor at `floor_height`.
    ///
    /// Each line is one row, top row first. Blank lines and lines starting with `//` are skipped.
    pub fn from_ascii(text: &str, floor_height: f32) -> Result<Self, LayoutError> {
        let mut rows: Vec<Vec<f32>> = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let row = line
                .chars()
                .map(|symbol| match symbol {
                    WALL_SYMBOL => Ok(WALL),
                    FLOOR_SYMBOL => Ok(floor_height),
                    other => Err(LayoutError::Parse {
                        line: number + 1,
                        reason: format!("unexpected symbol {other:?}"),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LayoutError::Parse {
                        line: number + 1,
                        reason: format!("expected {} cells, found {}", first.len(), row.len()),
                    });
                }
            }
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(LayoutError::Parse {
                line: 0,
                reason: "grid contains no cells".to_string(),
            });
        }

        let cells = Array2::from_shape_fn((width, height), |(x, y)| rows[y][x]);
        Ok(Self { cells })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.dim().0
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.dim().1
    }

    /// `(width, height)` of the grid.
    pub fn size(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Value at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.cells.get((x, y)).copied()
    }

    /// Overwrites the value at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        debug_assert!(x < self.width(), "Index out of bounds for grid width");
        debug_assert!(y < self.height(), "Index out of bounds for grid height");
        self.cells[(x, y)] = value;
    }

    /// Whether `(x, y)` is a floor cell. Out of bounds cells are never floor.
    pub fn is_floor(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|value| value >= FLOOR_THRESHOLD)
    }

    /// Whether `(x, y)` is a wall cell. Out of bounds cells count as walls.
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        !self.is_floor(x, y)
    }

    /// Whether `(x, y)` lies on the outermost ring of the grid.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width() || y + 1 == self.height()
    }

    /// The cell at `(x + dx, y + dy)`, if it lies inside the grid.
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.width())?;
        let ny = y.checked_add_signed(dy).filter(|&ny| ny < self.height())?;
        Some((nx, ny))
    }

    /// Number of floor cells among the four orthogonal neighbours of `(x, y)`.
    pub fn floor_neighbours(&self, x: usize, y: usize) -> usize {
        ORTHOGONAL_DELTAS
            .iter()
            .filter_map(|&(dx, dy)| self.offset(x, y, dx, dy))
            .filter(|&(nx, ny)| self.is_floor(nx, ny))
            .count()
    }

    /// A floor cell with exactly one floor neighbour.
    pub fn is_dead_end(&self, x: usize, y: usize) -> bool {
        self.is_floor(x, y) && self.floor_neighbours(x, y) == 1
    }

    /// All dead ends, in column-major scan order.
    pub fn dead_ends(&self) -> Vec<(usize, usize)> {
        self.positions()
            .filter(|&(x, y)| self.is_dead_end(x, y))
            .collect()
    }

    /// Number of floor cells.
    pub fn floor_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&value| value >= FLOOR_THRESHOLD)
            .count()
    }

    /// Whether every cell of the outer ring is a wall.
    pub fn border_is_wall(&self) -> bool {
        self.positions()
            .filter(|&(x, y)| self.is_border(x, y))
            .all(|(x, y)| self.is_wall(x, y))
    }

    /// Disjoint 4-connected floor regions, in the order their first cell is met by a
    /// column-major scan.
    pub fn regions(&self) -> Vec<Area> {
        Area::discover_all(self)
    }

    /// Every `(x, y)` position, `x` outer and `y` inner.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Borrows the underlying `(width, height)` array.
    pub fn as_array(&self) -> &Array2<f32> {
        &self.cells
    }

    /// Consumes the grid and returns the underlying `(width, height)` array.
    pub fn into_array(self) -> Array2<f32> {
        self.cells
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.cells[index]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let symbol = if self.is_floor(x, y) {
                    FLOOR_SYMBOL
                } else {
                    WALL_SYMBOL
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
        // two rooms joined by a corridor
        #######
        #..#..#
        #.....#
        #######
    ";

    #[test]
    fn test_ascii_round_trip_keeps_layout() {
        let grid = Grid::from_ascii(SAMPLE, 2.0).unwrap();
        assert_eq!(grid.size(), (7, 4));
        assert_eq!(grid[(1, 1)], 2.0);
        assert_eq!(grid[(3, 1)], WALL);

        let reparsed = Grid::from_ascii(&grid.to_string(), 2.0).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = Grid::from_ascii("###\n##\n", 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = Grid::from_ascii("#x#\n", 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(Grid::from_ascii("\n  \n// nothing\n", 1.0).is_err());
    }

    #[test]
    fn test_empty_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(LayoutError::InvalidParameter { name: "width", .. })
        ));
        assert!(matches!(
            Grid::new(4, 0),
            Err(LayoutError::InvalidParameter { name: "height", .. })
        ));
        assert!(Grid::from_array(Array2::zeros((3, 0))).is_err());
        assert_eq!(Grid::from_array(Array2::zeros((3, 2))).unwrap().size(), (3, 2));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = Grid::from_ascii("...\n...\n", 1.0).unwrap();
        assert!(grid.is_floor(0, 0));
        assert!(grid.is_wall(3, 0));
        assert!(grid.is_wall(0, 2));
        assert_eq!(grid.offset(0, 0, -1, 0), None);
        assert_eq!(grid.offset(2, 1, 1, 0), None);
        assert_eq!(grid.offset(1, 1, -1, -1), Some((0, 0)));
    }

    #[test]
    fn test_threshold_classifies_low_heights_as_wall() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, 0.49);
        assert!(grid.is_wall(1, 1));
        grid.set(1, 1, FLOOR_THRESHOLD);
        assert!(grid.is_floor(1, 1));
        assert_eq!(grid.floor_count(), 1);
    }

    #[test]
    fn test_dead_ends_and_neighbours() {
        let grid = Grid::from_ascii(
            "
            #####
            #...#
            #.###
            #####
            ",
            1.0,
        )
        .unwrap();
        assert_eq!(grid.floor_neighbours(1, 1), 2);
        assert_eq!(grid.dead_ends(), vec![(1, 2), (3, 1)]);
        assert!(grid.border_is_wall());
    }

    #[test]
    fn test_border_detection() {
        let grid = Grid::from_ascii(".##\n###\n###\n", 1.0).unwrap();
        assert!(!grid.border_is_wall());
        assert!(grid.is_border(2, 1));
        assert!(!grid.is_border(1, 1));
    }
}
