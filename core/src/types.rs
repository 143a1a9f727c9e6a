/// Single board axis, used for width, height and positions.
pub type Coord = u8;

/// Count type for mines, flags and cells.
pub type CellCount = u16;

/// Board position or size as `(x, y)`.
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

/// Number of cells on a board of the given size, the largest board is 255x255 so this always fits.
pub const fn cell_count((width, height): Coord2) -> CellCount {
    (width as CellCount) * (height as CellCount)
}

pub const fn in_bounds((x, y): Coord2, (width, height): Coord2) -> bool {
    x < width && y < height
}

/// Iterates the up-to-8 positions at Chebyshev distance 1 from `center` that lie inside `bounds`.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    // position in the 3x3 window, row-major, 4 is the center
    slot: u8,
}

impl Neighbors {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            slot: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < 9 {
            let slot = self.slot;
            self.slot += 1;
            if slot == 4 {
                continue;
            }

            // shifted by one so the window never goes below zero
            let x = u16::from(self.center.0) + u16::from(slot % 3);
            let y = u16::from(self.center.1) + u16::from(slot / 3);
            if x == 0 || y == 0 {
                continue;
            }

            let (x, y) = (x - 1, y - 1);
            if x < u16::from(self.bounds.0) && y < u16::from(self.bounds.1) {
                return Some((x as Coord, y as Coord));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<_> = Neighbors::new((0, 0), (4, 4)).collect();
        assert_eq!(found, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let found: Vec<_> = Neighbors::new((1, 1), (3, 3)).collect();
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn cell_count_multiplies_sides() {
        assert_eq!(cell_count((16, 16)), 256);
        assert_eq!(cell_count((Coord::MAX, Coord::MAX)), 65025);
        assert_eq!(cell_count((0, 9)), 0);
    }
}
