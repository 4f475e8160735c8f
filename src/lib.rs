/*!
# Merge Drop Engine

`merge_drop_engine` is an implementation of a falling-block merge puzzle engine:
blocks carrying power-of-two values are dropped into columns of a grid, fall
under gravity, and combine with equal-valued orthogonal neighbors in chained
cascades. Every move can be undone from a bounded in-memory history.

# Examples

```
use merge_drop_engine::Session;

// Starting up a session with a fixed seed for reproducible spawn values.
let mut session = Session::builder()
    .seed(42)
    /* ...Further optional configuration possible... */
    .build();

// The value of the block that the next placement will drop;
// This is how a UI can render a preview.
let preview = session.next_value();

// Dropping a block into column 3. The returned events describe where the
// block settled and any merges it caused, in order.
let events = session.place(3);

// Taking the move back. A no-op when there is nothing to undo.
session.undo();

// Read the current grid contents;
// This is how a UI can know how to render the board.
for block in session.grid().blocks() {
    println!("{} at ({}, {})", block.value, block.row, block.col);
}
# let _ = (preview, events);
```
*/

#![warn(missing_docs)]

pub mod gravity;
pub mod history;
pub mod merge;
mod session_builder;
mod session_update;
pub mod spawn_generator;

use rand_chacha::{rand_core::SeedableRng, ChaCha12Rng};

pub use history::History;
pub use session_builder::SessionBuilder;
pub use spawn_generator::SpawnGenerator;

/// The type of value carried by a block (a power of two, `2` or greater).
pub type BlockValue = u32;
/// Coordinates conventionally used to index into the [`Grid`], as `(row, column)`
/// starting in the top left.
pub type Coord = (usize, usize);
/// Coordinate offsets that can be [`add`]ed to [`Coord`]inates.
pub type Offset = (isize, isize);
/// The internal RNG used by a session.
pub type SessionRng = ChaCha12Rng;

/// A single grid cell's occupant, carrying a power-of-two value.
///
/// A block is owned exclusively by the cell it occupies; its `row` and `col`
/// fields always equal its cell's coordinates ([`Grid::set`] rewrites them on
/// assignment).
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// The power-of-two value displayed on the block.
    pub value: BlockValue,
    /// The row of the cell this block occupies.
    pub row: usize,
    /// The column of the cell this block occupies.
    pub col: usize,
    /// Whether this block is the one placed by the move currently resolving.
    ///
    /// The flag is set on placement, used to re-locate the block across
    /// gravity passes during merge resolution, and cleared once resolution
    /// completes. At most one block on a grid carries it.
    pub newly_placed: bool,
}

/// The playing grid: a fixed `rows × columns` field of cells, each empty or
/// holding one [`Block`].
///
/// Dimensions are decided once at construction and constant afterwards.
/// Out-of-bounds coordinates are a normal query case answered with "no block
/// there", never an error.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat row-major cell storage (`row * cols + col`).
    cells: Vec<Option<Block>>,
}

impl Grid {
    /// Creates an empty grid of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero; a dimensionless grid breaks every
    /// subsequent invariant.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// The number of rows of the grid.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of the grid.
    pub const fn columns(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Returns the block at `(row, col)`, or `None` if the cell is empty or
    /// the coordinates lie outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Block> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Block> {
        self.index(row, col).and_then(|i| self.cells[i].as_mut())
    }

    /// Assigns or clears the cell at `(row, col)`.
    ///
    /// An assigned block's `row`/`col` fields are rewritten to match the
    /// destination cell. Returns `false` (and changes nothing) when the
    /// coordinates lie outside the grid.
    pub fn set(&mut self, row: usize, col: usize, block: Option<Block>) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };
        self.cells[i] = block.map(|mut b| {
            b.row = row;
            b.col = col;
            b
        });
        true
    }

    /// Removes and returns the block at `(row, col)`, leaving the cell empty.
    pub fn take(&mut self, row: usize, col: usize) -> Option<Block> {
        self.index(row, col).and_then(|i| self.cells[i].take())
    }

    /// Returns the value of the block at `(row, col)`, or `None` if the cell
    /// is empty or out of bounds.
    pub fn value_at(&self, row: usize, col: usize) -> Option<BlockValue> {
        self.get(row, col).map(|block| block.value)
    }

    /// The occupied cells directly above, below, left and right of
    /// `(row, col)`, in that order, skipping out-of-bounds directions.
    pub fn neighbors4(&self, row: usize, col: usize) -> Vec<&Block> {
        const DIRECTIONS: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DIRECTIONS
            .iter()
            .filter_map(|&offset| {
                let (r, c) = add((row, col), offset)?;
                self.get(r, c)
            })
            .collect()
    }

    /// Iterates over all blocks on the grid, in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.cells.iter().filter_map(|cell| cell.as_ref())
    }

    /// The number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.blocks().count()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Locates the block carrying the [`Block::newly_placed`] flag, if any.
    pub(crate) fn newly_placed(&self) -> Option<Coord> {
        self.blocks()
            .find(|block| block.newly_placed)
            .map(|block| (block.row, block.col))
    }
}

/// An immutable full copy of grid contents plus the pending next-spawn value,
/// used for undo.
///
/// Cell values are copied into a flat buffer (`0` marking empty cells); a
/// snapshot holds no live [`Block`]s and no references back into the session
/// it was captured from.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    cells: Vec<BlockValue>,
    next_value: BlockValue,
}

impl Snapshot {
    /// Captures the full state of `grid` together with the pending
    /// `next_value`.
    pub fn capture(grid: &Grid, next_value: BlockValue) -> Self {
        let cells = (0..grid.rows())
            .flat_map(|row| (0..grid.columns()).map(move |col| (row, col)))
            .map(|(row, col)| grid.value_at(row, col).unwrap_or(0))
            .collect();
        Self {
            rows: grid.rows(),
            cols: grid.columns(),
            cells,
            next_value,
        }
    }

    /// Rebuilds a grid identical to the one this snapshot was captured from.
    pub fn restore_grid(&self) -> Grid {
        let mut grid = Grid::new(self.rows, self.cols);
        for (i, &value) in self.cells.iter().enumerate() {
            if value != 0 {
                let (row, col) = (i / self.cols, i % self.cols);
                grid.set(
                    row,
                    col,
                    Some(Block {
                        value,
                        row,
                        col,
                        newly_placed: false,
                    }),
                );
            }
        }
        grid
    }

    /// The next-spawn value pending at the time of capture.
    pub const fn next_value(&self) -> BlockValue {
        self.next_value
    }
}

/// Configuration options of a session, decided at construction via
/// [`SessionBuilder`].
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// The number of grid rows.
    pub rows: usize,
    /// The number of grid columns.
    pub columns: usize,
    /// How many snapshots the undo history retains before evicting the
    /// oldest. A depth of `0` disables undo.
    pub history_depth: usize,
    /// The method of next-spawn-value generation used.
    pub spawn_generator: SpawnGenerator,
}

impl Configuration {
    /// Default number of grid rows.
    pub const DEFAULT_ROWS: usize = 6;
    /// Default number of grid columns.
    pub const DEFAULT_COLUMNS: usize = 7;
    /// Default undo history depth.
    pub const DEFAULT_HISTORY_DEPTH: usize = 20;
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            columns: Self::DEFAULT_COLUMNS,
            history_depth: Self::DEFAULT_HISTORY_DEPTH,
            spawn_generator: SpawnGenerator::uniform(),
        }
    }
}

/// An event reported by [`Session::place`] describing what a move did.
///
/// These can be used to render visual feedback to the player without
/// diffing grid states.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A block was dropped and came to rest.
    BlockPlaced {
        /// The value of the placed block.
        value: BlockValue,
        /// Where the block settled after gravity.
        at: Coord,
    },
    /// The placed block absorbed equal-valued orthogonal neighbors.
    ///
    /// One such event is reported per cascade round.
    Merged {
        /// Where the merged block came to rest after the round's gravity pass.
        at: Coord,
        /// The block's value after the merge (`old value × 2^absorbed`).
        new_value: BlockValue,
        /// How many equal neighbors were absorbed this round.
        absorbed: u32,
    },
}

/// Main struct representing a round of play: the grid, the pending
/// next-spawn value, the undo history and the session PRNG.
///
/// A session is single-threaded and synchronous; [`Session::place`] and
/// [`Session::undo`] run to completion before returning. Error-like
/// conditions (out-of-range column, full column, empty history) are defined
/// no-ops rather than faults.
#[derive(Eq, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    /// The configuration options of the session.
    ///
    /// Mutating the spawn generator mid-session is possible and takes effect
    /// from the next draw; dimensions and history depth are fixed at
    /// construction and only read from here.
    pub config: Configuration,
    seed: u64,
    rng: SessionRng,
    grid: Grid,
    next_value: BlockValue,
    history: History,
}

impl Session {
    /// Creates a blank new template representing a yet-to-be-started
    /// [`Session`] ready for configuration.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Read accessor for the current grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read accessor for the undo history.
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The seed the session PRNG was initialized with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The number of grid rows.
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// The number of grid columns.
    pub const fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// The value the next placed block will carry, precomputed so a UI can
    /// preview it.
    pub const fn next_value(&self) -> BlockValue {
        self.next_value
    }

    /// The value of the block at `(row, col)`, or `None` if the cell is
    /// empty or out of bounds. Read-only accessor for drawing.
    pub fn cell(&self, row: usize, col: usize) -> Option<BlockValue> {
        self.grid.value_at(row, col)
    }

    /// Whether at least one move can be undone.
    pub fn has_history(&self) -> bool {
        self.history.has_history()
    }

    /// Whether a block can currently be dropped into `column`: the column
    /// index is in range and the column's top cell is free.
    pub fn can_place(&self, column: usize) -> bool {
        column < self.columns() && self.grid.get(0, column).is_none()
    }

    /// Whether every column is full.
    ///
    /// The engine never ends a session on its own; whether a full grid means
    /// "game over" is the caller's policy.
    pub fn is_full(&self) -> bool {
        (0..self.columns()).all(|column| !self.can_place(column))
    }
}

/// Adds an offset to a grid coordinate, failing if the result is negative or
/// overflows in either direction.
pub fn add((row, col): Coord, (dr, dc): Offset) -> Option<Coord> {
    Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(value: BlockValue, row: usize, col: usize) -> Block {
        Block {
            value,
            row,
            col,
            newly_placed: false,
        }
    }

    #[test]
    fn grid_starts_empty() {
        let grid = Grid::new(6, 7);
        assert_eq!(grid.rows(), 6);
        assert_eq!(grid.columns(), 7);
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn grid_rejects_zero_dimensions() {
        let _ = Grid::new(0, 7);
    }

    #[test]
    fn out_of_bounds_is_just_empty() {
        let mut grid = Grid::new(6, 7);
        assert!(grid.get(6, 0).is_none());
        assert!(grid.get(0, 7).is_none());
        assert!(grid.value_at(100, 100).is_none());
        assert!(!grid.set(6, 0, Some(block(2, 6, 0))));
        assert!(grid.take(6, 0).is_none());
    }

    #[test]
    fn set_rewrites_block_coordinates() {
        let mut grid = Grid::new(6, 7);
        // Deliberately wrong coordinates in the block itself.
        assert!(grid.set(3, 4, Some(block(8, 0, 0))));
        let stored = grid.get(3, 4).unwrap();
        assert_eq!((stored.row, stored.col), (3, 4));
        assert_eq!(stored.value, 8);
    }

    #[test]
    fn neighbors4_skips_bounds_and_empties() {
        let mut grid = Grid::new(6, 7);
        grid.set(0, 0, Some(block(2, 0, 0)));
        grid.set(0, 1, Some(block(4, 0, 1)));
        grid.set(1, 0, Some(block(8, 1, 0)));
        // Corner cell: up and left are out of bounds.
        let neighbors = grid.neighbors4(0, 0);
        let values: Vec<_> = neighbors.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![8, 4]); // down, then right

        // Lone middle cell with all-empty surroundings.
        assert!(grid.neighbors4(3, 3).is_empty());
    }

    #[test]
    fn snapshot_round_trips_grid() {
        let mut grid = Grid::new(6, 7);
        grid.set(5, 0, Some(block(2, 5, 0)));
        grid.set(4, 0, Some(block(16, 4, 0)));
        grid.set(5, 6, Some(block(8, 5, 6)));

        let snapshot = Snapshot::capture(&grid, 4);
        let restored = snapshot.restore_grid();
        assert_eq!(restored, grid);
        assert_eq!(snapshot.next_value(), 4);
    }

    #[test]
    fn snapshot_drops_newly_placed_flag() {
        let mut grid = Grid::new(6, 7);
        grid.set(
            5,
            0,
            Some(Block {
                value: 2,
                row: 5,
                col: 0,
                newly_placed: true,
            }),
        );
        let restored = Snapshot::capture(&grid, 2).restore_grid();
        assert!(!restored.get(5, 0).unwrap().newly_placed);
    }

    #[test]
    fn add_checks_both_directions() {
        assert_eq!(add((1, 2), (3, 4)), Some((4, 6)));
        assert_eq!(add((0, 0), (-1, 0)), None);
        assert_eq!(add((0, 0), (0, -1)), None);
    }
}
