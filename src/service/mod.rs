//! Generation Service
//!
//! Owns the double-buffered pair of grids for one simulation session.
//! Generations are advanced by computing into the non-current slot and
//! flipping a slot index; the two storage slots are reused for the
//! lifetime of the session, so advancing does not allocate.

use rand::rngs::StdRng;

use crate::life::{self, Grid, GridError};

/// A running simulation session.
///
/// Holds exactly two grids of identical dimensions in fixed storage slots.
/// Not safe for concurrent mutation: callers must serialize access to
/// [`LifeService::advance_generation`] and [`LifeService::set_density`].
pub struct LifeService {
    slots: [Grid; 2],
    current: usize,
    rng: StdRng,
}

impl LifeService {
    /// Build a session: seed the first grid with `fill`, designate it
    /// current, and compute one generation ahead into the second, so a
    /// fresh session already holds a valid next buffer.
    ///
    /// The session owns its random source; every seeding operation draws
    /// from it, which makes sessions deterministic under a seeded `rng`.
    pub fn new(height: i64, width: i64, fill: i64, mut rng: StdRng) -> Result<Self, GridError> {
        let mut first = Grid::new(height, width)?;
        first.seed(fill, &mut rng);

        let mut second = Grid::new(height, width)?;
        life::advance(&first, &mut second)?;

        Ok(Self {
            slots: [first, second],
            current: 0,
            rng,
        })
    }

    /// Read-only view of the grid currently designated current.
    pub fn current(&self) -> &Grid {
        &self.slots[self.current]
    }

    /// Advance one generation.
    ///
    /// Computes the next generation into the non-current slot, flips the
    /// slot index, and returns a snapshot of the newly current grid. Only
    /// the index moves; no cell storage is copied or reallocated.
    pub fn advance_generation(&mut self) -> Result<Grid, GridError> {
        let next = 1 - self.current;

        let (left, right) = self.slots.split_at_mut(1);
        let (source, destination) = if self.current == 0 {
            (&left[0], &mut right[0])
        } else {
            (&right[0], &mut left[0])
        };
        life::advance(source, destination)?;

        self.current = next;
        Ok(self.slots[self.current].clone())
    }

    /// Reseed the current grid to the given density.
    ///
    /// The current slot's grid is replaced by a fresh all-dead grid of the
    /// same dimensions before seeding; the non-current slot is untouched.
    /// Returns a snapshot of the reseeded grid.
    pub fn set_density(&mut self, fill: i64) -> Result<Grid, GridError> {
        let (height, width) = {
            let grid = self.current();
            (grid.height() as i64, grid.width() as i64)
        };

        self.slots[self.current] = Grid::new(height, width)?;
        self.slots[self.current].seed(fill, &mut self.rng);

        Ok(self.slots[self.current].clone())
    }
}
