use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)>;

    fn iter_neighbor_cells(&self, index: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbor_cells_with_index(index)
            .map(|(_, cell)| cell)
    }
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)> {
        self.iter_neighbors(index)
            .map(|index| (index, self[index.to_nd_index()]))
    }
}

/// Walks the up-to-8 Moore neighbors of a cell in row-major order, clipped
/// to the grid, no wraparound.
///
/// The neighborhood is scanned as the intersection of the 3x3 box around
/// the center with the grid rectangle, skipping the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    cursor: Coord2,
    col_start: Coord,
    box_end: Coord2,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;

        let row_start = row.saturating_sub(1);
        let col_start = col.saturating_sub(1);
        let mut row_end = rows.min(row.saturating_add(2));
        let col_end = cols.min(col.saturating_add(2));

        // a center outside the grid has no neighbors at all
        if row >= rows || col >= cols {
            row_end = row_start;
        }

        Self {
            center,
            cursor: (row_start, col_start),
            col_start,
            box_end: (row_end, col_end),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor.0 < self.box_end.0 {
            let item = self.cursor;

            self.cursor.1 += 1;
            if self.cursor.1 >= self.box_end.1 {
                self.cursor.1 = self.col_start;
                self.cursor.0 += 1;
            }

            if item != self.center {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(bounds: Coord2, center: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(neighbors_of((3, 3), (1, 1)).len(), 8);
    }

    #[test]
    fn corner_cell_is_clipped_to_three_neighbors() {
        let mut found = neighbors_of((3, 3), (0, 0));
        found.sort_unstable();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edges_do_not_wrap_around() {
        // bottom-left corner keeps 3 neighbors, none out of bounds
        let mut corner = neighbors_of((4, 4), (3, 0));
        corner.sort_unstable();
        assert_eq!(corner, vec![(2, 0), (2, 1), (3, 1)]);

        // a mid-edge cell keeps 5
        let edge = neighbors_of((4, 4), (2, 0));
        assert!(edge.iter().all(|&(r, c)| r < 4 && c < 4));
        assert_eq!(edge.len(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors_of((1, 1), (0, 0)).is_empty());
    }

    #[test]
    fn out_of_bounds_center_yields_nothing() {
        assert!(neighbors_of((3, 3), (99, 99)).is_empty());
        assert!(neighbors_of((3, 3), (0, 3)).is_empty());
    }
}
