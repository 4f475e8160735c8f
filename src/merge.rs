/*!
This module handles merge detection and chained resolution for a newly placed
block.

Resolution is a direct, synchronous query-then-mutate pass over the grid:
collect the equal-valued orthogonal neighbors of the placed block, absorb
them, re-settle gravity and repeat until no equal neighbor remains. Cascades
are deliberately biased toward the single placed block rather than a
board-wide equalization pass, matching the "drop one piece, watch it cascade"
feel of the game.
*/

use crate::{gravity, BlockValue, Coord, Event, Grid};

/// The merge multiplier for a block with `equal_neighbors` same-valued
/// orthogonal neighbors: `2^k`.
///
/// One neighbor doubles the value, two quadruple it, three octuple it — an
/// exponential reward for simultaneous multi-way merges rather than simple
/// pairwise doubling. Placement geometry yields at most three equal neighbors
/// in practice; the formula extends uniformly beyond that.
pub const fn multiplier(equal_neighbors: usize) -> BlockValue {
    1 << equal_neighbors
}

/// Resolves all merges triggered by the just-settled block at `start`,
/// including chain reactions, and reports one [`Event::Merged`] per round.
///
/// Each round absorbs every equal-valued orthogonal neighbor of the tracked
/// block, multiplies the block's value by [`multiplier`], re-settles gravity
/// to close the gaps and re-locates the block before checking again.
/// Terminates because each round strictly increases the tracked block's
/// value. On completion the block's [`newly_placed`](crate::Block::newly_placed)
/// flag is cleared.
///
/// A no-op (empty event list) when `start` holds no block.
pub fn resolve(grid: &mut Grid, start: Coord) -> Vec<Event> {
    let mut events = Vec::new();
    let (mut row, mut col) = start;
    // Tag the tracked block so it can be re-located after each gravity pass.
    match grid.get_mut(row, col) {
        Some(block) => block.newly_placed = true,
        None => return events,
    }
    loop {
        // SAFETY: the tracked block is never removed, only re-located.
        let value = grid.value_at(row, col).unwrap();

        let equal: Vec<Coord> = grid
            .neighbors4(row, col)
            .into_iter()
            .filter(|neighbor| neighbor.value == value)
            .map(|neighbor| (neighbor.row, neighbor.col))
            .collect();
        if equal.is_empty() {
            break;
        }

        let new_value = value * multiplier(equal.len());
        for &(r, c) in &equal {
            grid.set(r, c, None);
        }
        // SAFETY: `value_at` above proved the cell is occupied.
        grid.get_mut(row, col).unwrap().value = new_value;

        gravity::settle(grid);
        // SAFETY: only neighbors are removed, so the tracked block survives
        // the round and still carries its flag.
        (row, col) = grid.newly_placed().unwrap();

        events.push(Event::Merged {
            at: (row, col),
            new_value,
            absorbed: equal.len() as u32,
        });
    }

    if let Some(block) = grid.get_mut(row, col) {
        block.newly_placed = false;
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Block;

    fn block(value: BlockValue) -> Block {
        Block {
            value,
            row: 0,
            col: 0,
            newly_placed: false,
        }
    }

    fn placed(value: BlockValue) -> Block {
        Block {
            newly_placed: true,
            ..block(value)
        }
    }

    #[test]
    fn multiplier_doubles_per_neighbor() {
        assert_eq!(multiplier(1), 2);
        assert_eq!(multiplier(2), 4);
        assert_eq!(multiplier(3), 8);
        assert_eq!(multiplier(4), 16);
    }

    #[test]
    fn no_equal_neighbor_finalizes_block() {
        let mut grid = Grid::new(6, 7);
        grid.set(5, 0, Some(block(4)));
        grid.set(5, 1, Some(placed(2)));
        let events = resolve(&mut grid, (5, 1));
        assert!(events.is_empty());
        assert_eq!(grid.value_at(5, 1), Some(2));
        assert!(!grid.get(5, 1).unwrap().newly_placed);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn one_neighbor_doubles_and_removes_it() {
        let mut grid = Grid::new(6, 7);
        grid.set(5, 0, Some(block(2)));
        grid.set(4, 0, Some(placed(2)));
        let events = resolve(&mut grid, (4, 0));
        // The absorbed block below vacates, the merged one drops into its place.
        assert_eq!(
            events,
            vec![Event::Merged {
                at: (5, 0),
                new_value: 4,
                absorbed: 1
            }]
        );
        assert_eq!(grid.value_at(5, 0), Some(4));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn three_neighbors_octuple_the_value() {
        // Equal neighbors left, right and above; all gravity-stable.
        let mut grid = Grid::new(6, 7);
        grid.set(5, 0, Some(block(2)));
        grid.set(5, 2, Some(block(2)));
        grid.set(4, 1, Some(block(2)));
        grid.set(5, 1, Some(placed(2)));
        let before = grid.occupied_count();

        let events = resolve(&mut grid, (5, 1));
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            Event::Merged {
                at: (5, 1),
                new_value: 16,
                absorbed: 3
            }
        );
        assert_eq!(grid.value_at(5, 1), Some(16));
        assert_eq!(grid.occupied_count(), before - 3);
    }

    #[test]
    fn cascade_merges_through_gravity() {
        // 2 placed on a 2 forms a 4, which drops onto an equal 4 below a gap
        // and merges again.
        let mut grid = Grid::new(6, 7);
        grid.set(5, 0, Some(block(4)));
        grid.set(4, 0, Some(block(2)));
        grid.set(3, 0, Some(placed(2)));

        let events = resolve(&mut grid, (3, 0));
        assert_eq!(
            events,
            vec![
                Event::Merged {
                    at: (4, 0),
                    new_value: 4,
                    absorbed: 1
                },
                Event::Merged {
                    at: (5, 0),
                    new_value: 8,
                    absorbed: 1
                },
            ]
        );
        assert_eq!(grid.value_at(5, 0), Some(8));
        assert_eq!(grid.occupied_count(), 1);
        assert!(!grid.get(5, 0).unwrap().newly_placed);
    }

    #[test]
    fn resolve_on_empty_cell_is_a_no_op() {
        let mut grid = Grid::new(6, 7);
        assert!(resolve(&mut grid, (5, 3)).is_empty());
        assert!(grid.is_empty());
    }
}
