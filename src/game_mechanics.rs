//! Win evaluation.
//!
//! The win rule is a count threshold, not a line check: any
//! `sqrt(board_size)` selections anywhere on the board win (one row's
//! worth of squares on a square board). A game's winner is recorded
//! once and never changes; an evaluation against a game that already
//! has a winner short-circuits.

/// Outcome of evaluating a bingo claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinDecision {
    /// A winner is already recorded; report it without re-evaluating.
    AlreadyWon,
    /// Not enough selections yet.
    NotYet,
    /// Threshold met; the caller records the acting player as winner.
    Winner,
}

/// Whether `selected_count` selections meet the win threshold for a
/// board of `board_size` cells.
pub fn win_reached(board_size: usize, selected_count: usize) -> bool {
    selected_count as f64 >= (board_size as f64).sqrt()
}

/// Evaluate a bingo claim against the game's current winner state.
pub fn evaluate_win(
    board_size: usize,
    selected_count: usize,
    winner: Option<&str>,
) -> WinDecision {
    if winner.is_some() {
        WinDecision::AlreadyWon
    } else if win_reached(board_size, selected_count) {
        WinDecision::Winner
    } else {
        WinDecision::NotYet
    }
}
