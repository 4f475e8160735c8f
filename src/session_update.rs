/*!
This module handles what happens when [`Session::place`] or [`Session::undo`]
is called.
*/

use super::*;

impl Session {
    /// The main function used to advance the session: drops a block carrying
    /// the precomputed next-spawn value into `column`.
    ///
    /// The move runs to completion synchronously: the current state is
    /// snapshotted into the undo history, the block is inserted at the top of
    /// the column, gravity settles it, merges (including cascades) resolve,
    /// and a fresh next-spawn value is drawn.
    ///
    /// Returns the events of the move in order: one [`Event::BlockPlaced`]
    /// with the settled position, then zero or more [`Event::Merged`], one
    /// per cascade round.
    ///
    /// A no-op returning an empty event list when `column` is out of range or
    /// the column's top cell is occupied. The engine attaches no game-over
    /// meaning to a full column; that policy belongs to the caller (see
    /// [`Session::is_full`]).
    pub fn place(&mut self, column: usize) -> Vec<Event> {
        if !self.can_place(column) {
            return Vec::new();
        }

        self.history
            .save(Snapshot::capture(&self.grid, self.next_value));

        let value = self.next_value;
        self.grid.set(
            0,
            column,
            Some(Block {
                value,
                row: 0,
                col: column,
                newly_placed: true,
            }),
        );
        gravity::settle(&mut self.grid);
        // SAFETY: the block was placed above and gravity only moves blocks.
        let settled = self.grid.newly_placed().unwrap();

        let mut events = vec![Event::BlockPlaced { value, at: settled }];
        events.extend(merge::resolve(&mut self.grid, settled));

        self.next_value = self.config.spawn_generator.generate(&mut self.rng);
        events
    }

    /// Takes back the most recent move, replacing grid and next-spawn value
    /// wholesale from the popped snapshot.
    ///
    /// Returns whether a move was undone; a no-op returning `false` when the
    /// history is empty.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.grid = snapshot.restore_grid();
        self.next_value = snapshot.next_value();
        true
    }

    /// Clears the grid and the undo history and draws a fresh next-spawn
    /// value, as if the session had just been built.
    ///
    /// The session PRNG keeps its current position, so a reset round does not
    /// replay the previous round's spawn sequence.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.rows, self.config.columns);
        self.history.clear();
        self.next_value = self.config.spawn_generator.generate(&mut self.rng);
    }
}
