//! Life Grid Engine
//!
//! Cell storage for a single generation: neighbor counting, the
//! survival/birth rule, double-buffered generation advance, stochastic
//! density seeding, and textual rendering.

use rand::Rng;
use thiserror::Error;

/// Glyph rendered for a live cell (green square).
pub const ALIVE_GLYPH: &str = "\u{1F7E9}";
/// Glyph rendered for a dead cell (brown square).
pub const DEAD_GLYPH: &str = "\u{1F7EB}";

/// Relative offsets of the 8 positions adjacent to a cell.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimension { height: i64, width: i64 },

    #[error("grid dimensions differ: {source_height}x{source_width} vs {dest_height}x{dest_width}")]
    DimensionMismatch {
        source_height: usize,
        source_width: usize,
        dest_height: usize,
        dest_width: usize,
    },
}

/// One generation's cell states.
///
/// Dimensions are fixed at construction. `density` is advisory metadata:
/// the last density requested from [`Grid::seed`], or the live fraction
/// computed by the most recent [`advance`] into this grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    density: i64,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Create an all-dead grid with the given dimensions.
    pub fn new(height: i64, width: i64) -> Result<Self, GridError> {
        if height <= 0 || width <= 0 {
            return Err(GridError::InvalidDimension { height, width });
        }

        let (height, width) = (height as usize, width as usize);
        Ok(Self {
            height,
            width,
            density: 0,
            cells: vec![vec![false; width]; height],
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Density metadata, as an integer percentage.
    pub fn density(&self) -> i64 {
        self.density
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row][col] = alive;
    }

    /// Number of live cells in the grid.
    pub fn live_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count())
            .sum()
    }

    /// Count live cells among the 8 adjacent positions.
    ///
    /// A neighbor position contributes only if its row and column are both
    /// strictly greater than 0 and strictly less than the grid's height and
    /// width. Cells on row 0 or column 0 are therefore never counted as
    /// neighbors of anything. The grid does not wrap.
    pub fn neighbor_count(&self, row: usize, col: usize) -> usize {
        let (row, col) = (row as i64, col as i64);
        let (height, width) = (self.height as i64, self.width as i64);
        let mut count = 0;

        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (nr, nc) = (row + dr, col + dc);
            if nr > 0 && nr < height && nc > 0 && nc < width && self.cells[nr as usize][nc as usize]
            {
                count += 1;
            }
        }

        count
    }

    /// The cell's state in the next generation.
    ///
    /// A live cell with 2 or 3 live neighbors survives; a dead cell with
    /// exactly 3 live neighbors is born; everything else dies.
    pub fn next_cell_state(&self, row: usize, col: usize) -> bool {
        let neighbors = self.neighbor_count(row, col);
        let alive = self.cells[row][col];

        if alive && (neighbors == 2 || neighbors == 3) {
            return true;
        }

        !alive && neighbors == 3
    }

    /// Seed the grid toward the given density percentage.
    ///
    /// Each cell is independently set alive when `draw(0..=9) < density / 10`
    /// with integer division, so the effective probability only changes at
    /// multiples of 10 (21 through 29 behave exactly like 20). Values of 100
    /// or more fill every cell; values of 0 or less set none. `density` is
    /// recorded as metadata regardless of the realized live fraction.
    pub fn seed(&mut self, density: i64, rng: &mut impl Rng) {
        let bucket = density / 10;
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if rng.gen_range(0..10) < bucket {
                    *cell = true;
                }
            }
        }
        self.density = density;
    }

    /// Render the grid as text: one line per row, one glyph per column,
    /// every row newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width * 4 + 1));
        for row in &self.cells {
            for &cell in row {
                out.push_str(if cell { ALIVE_GLYPH } else { DEAD_GLYPH });
            }
            out.push('\n');
        }
        out
    }
}

/// Compute the next generation of `source` into `destination`.
///
/// `source` is left unmodified. `destination.density` is recomputed as the
/// new generation's live percentage (truncating integer division). The two
/// grids must share dimensions.
pub fn advance(source: &Grid, destination: &mut Grid) -> Result<(), GridError> {
    if source.height != destination.height || source.width != destination.width {
        return Err(GridError::DimensionMismatch {
            source_height: source.height,
            source_width: source.width,
            dest_height: destination.height,
            dest_width: destination.width,
        });
    }

    for row in 0..source.height {
        for col in 0..source.width {
            destination.cells[row][col] = source.next_cell_state(row, col);
        }
    }

    let total = (source.height * source.width) as i64;
    destination.density = destination.live_count() as i64 * 100 / total;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_grid_is_all_dead() {
        let grid = Grid::new(4, 7).unwrap();
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.density(), 0);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_new_rejects_non_positive_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(-3, 4),
            Err(GridError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(4, -1),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_low_edge_cells_are_never_counted() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_alive(0, 1, true);
        grid.set_alive(1, 0, true);
        grid.set_alive(2, 2, true);

        // (0,1) sits on row 0 and (1,0) on column 0, so neither contributes.
        assert_eq!(grid.neighbor_count(1, 1), 1);
    }

    #[test]
    fn test_high_edge_cells_do_contribute() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_alive(3, 3, true);
        assert_eq!(grid.neighbor_count(2, 2), 1);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut current = Grid::new(5, 5).unwrap();
        let mut next = Grid::new(5, 5).unwrap();

        // Horizontal blinker on row 2.
        current.set_alive(2, 1, true);
        current.set_alive(2, 2, true);
        current.set_alive(2, 3, true);

        advance(&current, &mut next).unwrap();

        // One step yields the perpendicular blinker on column 2.
        assert_eq!(next.live_count(), 3);
        assert!(next.is_alive(1, 2));
        assert!(next.is_alive(2, 2));
        assert!(next.is_alive(3, 2));

        // Source is untouched.
        assert!(current.is_alive(2, 1));
        assert!(current.is_alive(2, 3));
        assert_eq!(current.live_count(), 3);

        // A second step restores the horizontal blinker.
        let mut third = Grid::new(5, 5).unwrap();
        advance(&next, &mut third).unwrap();
        assert!(third.is_alive(2, 1));
        assert!(third.is_alive(2, 2));
        assert!(third.is_alive(2, 3));
        assert_eq!(third.live_count(), 3);
    }

    #[test]
    fn test_advance_recomputes_density() {
        let mut current = Grid::new(5, 5).unwrap();
        let mut next = Grid::new(5, 5).unwrap();
        current.set_alive(2, 1, true);
        current.set_alive(2, 2, true);
        current.set_alive(2, 3, true);

        advance(&current, &mut next).unwrap();

        // 3 live cells out of 25, truncated to an integer percentage.
        assert_eq!(next.density(), 12);
    }

    #[test]
    fn test_advance_rejects_mismatched_dimensions() {
        let source = Grid::new(5, 5).unwrap();
        let mut destination = Grid::new(5, 6).unwrap();
        assert!(matches!(
            advance(&source, &mut destination),
            Err(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_advance_writes_in_place() {
        let source = Grid::new(8, 8).unwrap();
        let mut destination = Grid::new(8, 8).unwrap();
        let storage = destination.cells.as_ptr();

        advance(&source, &mut destination).unwrap();
        assert_eq!(storage, destination.cells.as_ptr());
    }

    #[test]
    fn test_seed_buckets_density_by_tens() {
        let mut low = Grid::new(100, 100).unwrap();
        let mut same_bucket = Grid::new(100, 100).unwrap();
        let mut higher = Grid::new(100, 100).unwrap();

        low.seed(20, &mut StdRng::seed_from_u64(42));
        same_bucket.seed(29, &mut StdRng::seed_from_u64(42));
        higher.seed(30, &mut StdRng::seed_from_u64(42));

        // 20 and 29 share a bucket: identical draws give identical cells.
        assert_eq!(low.live_count(), same_bucket.live_count());
        assert!(higher.live_count() > low.live_count());
    }

    #[test]
    fn test_seed_extremes() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut full = Grid::new(10, 10).unwrap();
        full.seed(100, &mut rng);
        assert_eq!(full.live_count(), 100);

        let mut overfull = Grid::new(10, 10).unwrap();
        overfull.seed(250, &mut rng);
        assert_eq!(overfull.live_count(), 100);

        let mut empty = Grid::new(10, 10).unwrap();
        empty.seed(0, &mut rng);
        assert_eq!(empty.live_count(), 0);

        let mut negative = Grid::new(10, 10).unwrap();
        negative.seed(-40, &mut rng);
        assert_eq!(negative.live_count(), 0);
    }

    #[test]
    fn test_seed_records_density_metadata() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.seed(29, &mut StdRng::seed_from_u64(1));
        assert_eq!(grid.density(), 29);
    }

    #[test]
    fn test_render_all_dead_grid() {
        let grid = Grid::new(2, 2).unwrap();
        let expected = format!(
            "{d}{d}\n{d}{d}\n",
            d = DEAD_GLYPH
        );
        assert_eq!(grid.render(), expected);
    }

    #[test]
    fn test_render_marks_live_cells() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.set_alive(0, 1, true);
        let expected = format!("{}{}{}\n", DEAD_GLYPH, ALIVE_GLYPH, DEAD_GLYPH);
        assert_eq!(grid.render(), expected);
    }
}
