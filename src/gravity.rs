/*!
This module handles the gravity pass that removes all vertical gaps in a grid.
*/

use crate::Grid;

/// Compacts the grid downward until stable.
///
/// Repeatedly, for every column, moves each block down one cell into an empty
/// slot beneath it, scanning bottom-to-top per pass, iterating full passes
/// until no block moved in an entire pass. A single sweep is insufficient when
/// multiple blocks in the same column must fall past each other's vacated
/// slots; empirically this converges in at most `rows` passes.
///
/// Returns whether any block moved at all. Pure grid mutation, never fails.
pub fn settle(grid: &mut Grid) -> bool {
    let rows = grid.rows();
    let cols = grid.columns();
    let mut any_moved = false;
    loop {
        let mut moved = false;
        for row in (0..rows.saturating_sub(1)).rev() {
            for col in 0..cols {
                if grid.get(row, col).is_some() && grid.get(row + 1, col).is_none() {
                    let block = grid.take(row, col);
                    grid.set(row + 1, col, block);
                    moved = true;
                }
            }
        }
        if !moved {
            break;
        }
        any_moved = true;
    }
    any_moved
}
