//! Board sampling and display-id disambiguation.
//!
//! A board is an ordered list of display ids. Sampling draws with
//! replacement, so one board can hold the same scenario several times;
//! [`assign_unique_ids`] rewrites later duplicates by stacking
//! [`UNIQUE_ID_OFFSET`](crate::constants::UNIQUE_ID_OFFSET) so every
//! cell id is unique while [`canonical_id`] can always recover the
//! catalog entry.

use rand::Rng;

use crate::constants::{FREE_SCENARIO_ID, MAX_DRAWN_ID, MIN_DRAWN_ID, UNIQUE_ID_OFFSET};

/// Draw `size` raw scenario ids for a board: `size / 2` uniform draws
/// from the catalog, the free square, then `size / 2` more draws.
/// `size` must be odd so the free square lands on the middle cell;
/// callers validate before sampling.
pub fn sample_board_ids<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    let half = size / 2;
    let mut board = Vec::with_capacity(size);
    for _ in 0..half {
        board.push(rng.random_range(MIN_DRAWN_ID..=MAX_DRAWN_ID));
    }
    board.push(FREE_SCENARIO_ID);
    for _ in 0..half {
        board.push(rng.random_range(MIN_DRAWN_ID..=MAX_DRAWN_ID));
    }
    board
}

/// Rewrite duplicate ids so every element is unique.
///
/// Exhaustive pairwise scan: position `i` keeps its value as the
/// canonical occurrence; the k-th later position still equal to that
/// *original* value becomes `id + k * UNIQUE_ID_OFFSET`. Comparing
/// against the original value (not the rewritten one) gives strictly
/// increasing offsets when an id appears three or more times.
/// O(n²), fine at bingo-board sizes.
pub fn assign_unique_ids(ids: &mut [i64]) {
    for i in 0..ids.len() {
        let id = ids[i];
        let mut count = 0;
        for j in (i + 1)..ids.len() {
            if ids[j] == id {
                count += 1;
                ids[j] += UNIQUE_ID_OFFSET * count;
            }
        }
    }
}

/// Recover the catalog id behind a display id.
///
/// Subtracts the offset until the value falls back into catalog range.
/// Identity on values that are already canonical.
pub fn canonical_id(display_id: i64) -> i64 {
    let mut id = display_id;
    while id > UNIQUE_ID_OFFSET {
        id -= UNIQUE_ID_OFFSET;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_board_shape() {
        let mut rng = SmallRng::seed_from_u64(7);
        for size in [1usize, 5, 9, 25] {
            let board = sample_board_ids(size, &mut rng);
            assert_eq!(board.len(), size);
            assert_eq!(board[size / 2], FREE_SCENARIO_ID);
            for (i, &id) in board.iter().enumerate() {
                if i != size / 2 {
                    assert!((MIN_DRAWN_ID..=MAX_DRAWN_ID).contains(&id), "id={id} at {i}");
                }
            }
        }
    }

    #[test]
    fn test_assign_unique_ids_stacks_offsets() {
        // Free square at index 3; three later duplicates of 5.
        let mut ids = vec![5, 5, 5, 1, 5];
        assign_unique_ids(&mut ids);
        assert_eq!(ids, vec![5, 105, 205, 1, 305]);

        let recovered: Vec<i64> = ids.iter().map(|&id| canonical_id(id)).collect();
        assert_eq!(recovered, vec![5, 5, 5, 1, 5]);
    }

    #[test]
    fn test_assign_unique_ids_no_duplicates_untouched() {
        let mut ids = vec![2, 9, 17, 1, 30];
        assign_unique_ids(&mut ids);
        assert_eq!(ids, vec![2, 9, 17, 1, 30]);
    }

    #[test]
    fn test_assign_unique_ids_all_distinct() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut board = sample_board_ids(25, &mut rng);
            assign_unique_ids(&mut board);
            let mut seen = board.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), board.len(), "collision in {board:?}");
        }
    }

    #[test]
    fn test_canonical_id_identity_on_canonical() {
        for id in 1..=MAX_DRAWN_ID {
            assert_eq!(canonical_id(id), id);
        }
    }

    #[test]
    fn test_canonical_id_strips_offsets() {
        assert_eq!(canonical_id(105), 5);
        assert_eq!(canonical_id(205), 5);
        assert_eq!(canonical_id(101), 1);
        assert_eq!(canonical_id(238), 38);
    }
}
