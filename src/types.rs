//! Row structs and response DTOs.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `players` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
}

/// A row from the `game_state` table, id lists still JSON-encoded.
/// Decode with [`GameStateRow::decode`] — the encode/decode boundary
/// for the TEXT columns lives at the storage interface.
#[derive(Debug, Clone, FromRow)]
pub struct GameStateRow {
    pub game_id: i64,
    pub player_id: i64,
    pub given_scenario_ids: String,
    pub selected_scenario_ids: String,
}

impl GameStateRow {
    /// Decode the JSON id-list columns into a [`GameState`].
    pub fn decode(self) -> Result<GameState, serde_json::Error> {
        Ok(GameState {
            game_id: self.game_id,
            player_id: self.player_id,
            given: serde_json::from_str(&self.given_scenario_ids)?,
            selected: serde_json::from_str(&self.selected_scenario_ids)?,
        })
    }
}

/// Decoded per-game state: the board the player was given and the
/// display ids they have selected so far (always a subset of `given`).
#[derive(Debug, Clone)]
pub struct GameState {
    pub game_id: i64,
    pub player_id: i64,
    pub given: Vec<i64>,
    pub selected: Vec<i64>,
}

/// One board cell as returned to the client: the display id (unique on
/// the board) and the catalog text of the underlying scenario.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoardCell {
    pub id: i64,
    pub text: String,
}
