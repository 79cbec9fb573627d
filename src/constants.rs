//! Game constants and the seeded scenario catalog.
//!
//! Board cells carry *display ids*: either a canonical catalog id, or a
//! canonical id plus a multiple of [`UNIQUE_ID_OFFSET`] when the same
//! scenario was drawn more than once for one board. The offset exceeds
//! the largest catalog id, so recovery (subtracting the offset until
//! the value falls back into catalog range) is unambiguous.

/// Number of drawable (non-free) scenarios in the catalog.
pub const SCENARIO_POOL_SIZE: i64 = 37;

/// Catalog id of the free square, pinned to the middle board cell.
pub const FREE_SCENARIO_ID: i64 = 1;

/// Smallest id a random draw can produce (the free square is excluded).
pub const MIN_DRAWN_ID: i64 = 2;

/// Largest id a random draw can produce: free square + pool size.
pub const MAX_DRAWN_ID: i64 = FREE_SCENARIO_ID + SCENARIO_POOL_SIZE;

/// Offset added to duplicate ids to keep board cells unique.
/// Must stay greater than [`MAX_DRAWN_ID`].
pub const UNIQUE_ID_OFFSET: i64 = 100;

/// Seeded catalog texts. Index 0 is catalog id 1 (the free square);
/// index k is catalog id k + 1.
pub const SCENARIO_CATALOG: [&str; (SCENARIO_POOL_SIZE + 1) as usize] = [
    "FREE",
    "\"Sorry, I was on mute\"",
    "\"Can everyone see my screen?\"",
    "Someone joins five minutes late",
    "Pet appears on camera",
    "Child interrupts the call",
    "Doorbell rings mid-sentence",
    "Someone eats on camera",
    "\"Can you hear me?\"",
    "Awkward silence after a question",
    "Two people talk at the same time",
    "Someone forgets to unmute and keeps talking",
    "Virtual background glitches",
    "Someone is clearly still in pajamas",
    "\"Let's take this offline\"",
    "Echo or feedback loop",
    "Someone's video freezes mid-gesture",
    "Host asks \"who just joined?\"",
    "Someone leaves without saying goodbye",
    "Meeting runs over time",
    "\"Next slide, please\"",
    "Someone apologizes for their internet",
    "Lawnmower or construction noise outside",
    "Someone types loudly while unmuted",
    "\"I'll share the deck afterwards\"",
    "Camera pointed at the ceiling",
    "Someone waves at the end of the call",
    "Phone rings in the background",
    "\"We lost you for a second there\"",
    "Someone drinks from a novelty mug",
    "Screen share shows a messy desktop",
    "\"Is everyone here? Let's get started\"",
    "Someone reads another screen while nodding",
    "Dramatic sigh while unmuted",
    "\"Let's circle back to that\"",
    "Someone's alarm or notification goes off",
    "Host struggles to end the meeting",
    "\"You're still sharing your screen\"",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_drawable_range() {
        assert_eq!(SCENARIO_CATALOG.len() as i64, MAX_DRAWN_ID);
        assert_eq!(SCENARIO_CATALOG[0], "FREE");
    }

    #[test]
    fn test_offset_exceeds_catalog() {
        assert!(UNIQUE_ID_OFFSET > MAX_DRAWN_ID);
    }
}
