use grid_util::point::Point;

/// Maps between window pixels and cells for a square window showing a square grid. Drawing and
/// input handling live outside this crate; this only does the arithmetic a rendering shell needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Side length of the window in pixels.
    pub size_px: u32,
    /// Number of cells per side.
    pub rows: usize,
}

impl GridLayout {
    pub fn new(size_px: u32, rows: usize) -> GridLayout {
        GridLayout { size_px, rows }
    }
    /// Side length of one cell in pixels. Leftover pixels at the right and bottom edge belong to
    /// no cell.
    pub fn cell_size(&self) -> u32 {
        if self.rows == 0 {
            0
        } else {
            self.size_px / self.rows as u32
        }
    }
    /// Cell under the pixel (`px`, `py`), if any.
    pub fn cell_at(&self, px: u32, py: u32) -> Option<Point> {
        let size = self.cell_size();
        if size == 0 {
            return None;
        }
        let (col, row) = ((px / size) as usize, (py / size) as usize);
        if col < self.rows && row < self.rows {
            Some(Point::new(col as i32, row as i32))
        } else {
            None
        }
    }
    /// Top-left pixel of a cell, or [None] if the cell is not on the grid.
    pub fn cell_origin(&self, p: Point) -> Option<(u32, u32)> {
        let (col, row) = (usize::try_from(p.x).ok()?, usize::try_from(p.y).ok()?);
        if col >= self.rows || row >= self.rows {
            return None;
        }
        let size = self.cell_size();
        Some((col as u32 * size, row as u32 * size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_pixels_to_cells() {
        let layout = GridLayout::new(800, 50);
        assert_eq!(layout.cell_size(), 16);
        assert_eq!(layout.cell_at(0, 0), Some(Point::new(0, 0)));
        assert_eq!(layout.cell_at(17, 40), Some(Point::new(1, 2)));
        assert_eq!(layout.cell_at(799, 799), Some(Point::new(49, 49)));
        assert_eq!(layout.cell_origin(Point::new(1, 2)), Some((16, 32)));
    }

    #[test]
    fn origin_of_cell_off_the_grid() {
        let layout = GridLayout::new(800, 50);
        assert_eq!(layout.cell_origin(Point::new(-1, 0)), None);
        assert_eq!(layout.cell_origin(Point::new(0, -3)), None);
        assert_eq!(layout.cell_origin(Point::new(50, 0)), None);
        assert_eq!(layout.cell_origin(Point::new(49, 49)), Some((784, 784)));
    }

    #[test]
    fn leftover_pixels_belong_to_no_cell() {
        let layout = GridLayout::new(100, 3);
        assert_eq!(layout.cell_size(), 33);
        assert_eq!(layout.cell_at(98, 10), None);
        assert_eq!(GridLayout::new(100, 0).cell_at(1, 1), None);
    }
}
