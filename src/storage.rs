//! SQLite persistence for players, games, and per-game board state.
//!
//! All access goes through [`Store`], a thin wrapper over a
//! `sqlx::SqlitePool`. Handlers borrow a pooled connection for the
//! duration of one statement or transaction; nothing long-lived is
//! held in process.
//!
//! Board id lists persist as JSON arrays in TEXT columns. The
//! encode/decode boundary is [`encode_ids`] / [`GameStateRow::decode`]
//! and stays inside this module's public API: callers only ever see
//! `Vec<i64>`.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::board_mechanics::canonical_id;
use crate::constants::SCENARIO_CATALOG;
use crate::types::{BoardCell, GameState, GameStateRow, Player};

/// Storage failure taxonomy. The first three variants are client
/// mistakes (bad ids from the caller); the rest are server-side.
#[derive(Debug)]
pub enum StoreError {
    /// The referenced game does not exist.
    GameNotFound(i64),
    /// The display id was never offered on this game's board.
    NotOffered(i64),
    /// The display id has already been selected in this game.
    AlreadySelected(i64),
    /// Underlying database failure.
    Db(sqlx::Error),
    /// A persisted id-list column failed to decode.
    Corrupt(serde_json::Error),
}

impl StoreError {
    /// True for errors caused by the caller's input rather than the
    /// server or store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::GameNotFound(_)
                | StoreError::NotOffered(_)
                | StoreError::AlreadySelected(_)
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::GameNotFound(id) => write!(f, "game {id} not found"),
            StoreError::NotOffered(id) => write!(f, "scenario {id} is not on the board"),
            StoreError::AlreadySelected(id) => write!(f, "scenario {id} is already selected"),
            StoreError::Db(e) => write!(f, "database error: {e}"),
            StoreError::Corrupt(e) => write!(f, "corrupt id list: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Db(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e)
    }
}

/// Encode a display-id list for a TEXT column.
pub fn encode_ids(ids: &[i64]) -> Result<String, serde_json::Error> {
    serde_json::to_string(ids)
}

/// Game/player store over a pooled SQLite database.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database file, install the
    /// schema, and seed the scenario catalog.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Store, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Store { pool };
        store.init().await?;
        Ok(store)
    }

    /// In-memory store for tests. A single pooled connection that is
    /// never reaped, so the database lives as long as the pool.
    pub async fn open_in_memory() -> Result<Store, StoreError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Store { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StoreError> {
        self.create_schema().await?;
        let seeded = self.seed_catalog().await?;
        if seeded > 0 {
            log::info!("seeded {seeded} catalog scenarios");
        }
        Ok(())
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS players (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 name TEXT NOT NULL UNIQUE
             )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS games (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 winner TEXT
             )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS game_state (
                 game_id INTEGER NOT NULL,
                 player_id INTEGER NOT NULL,
                 given_scenario_ids TEXT NOT NULL,
                 selected_scenario_ids TEXT NOT NULL DEFAULT '[]'
             )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS scenarios (
                 id INTEGER PRIMARY KEY,
                 text TEXT NOT NULL
             )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Install any catalog rows that are missing. Returns how many
    /// rows were inserted (0 on an already-seeded database).
    async fn seed_catalog(&self) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for (index, text) in SCENARIO_CATALOG.iter().enumerate() {
            let result = sqlx::query("INSERT OR IGNORE INTO scenarios (id, text) VALUES (?, ?)")
                .bind(index as i64 + 1)
                .bind(text)
                .execute(&self.pool)
                .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Look a player up by name, inserting a new row if absent.
    pub async fn find_or_create_player(&self, name: &str) -> Result<Player, StoreError> {
        sqlx::query("INSERT OR IGNORE INTO players (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        let player = sqlx::query_as::<_, Player>("SELECT id, name FROM players WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(player)
    }

    /// Create a game with its board state in one transaction and
    /// return the new game id.
    pub async fn create_game(&self, player_id: i64, board: &[i64]) -> Result<i64, StoreError> {
        let encoded = encode_ids(board)?;
        let mut tx = self.pool.begin().await?;
        let game_id = sqlx::query("INSERT INTO games (winner) VALUES (NULL)")
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        sqlx::query(
            "INSERT INTO game_state (game_id, player_id, given_scenario_ids, selected_scenario_ids)
             VALUES (?, ?, ?, '[]')",
        )
        .bind(game_id)
        .bind(player_id)
        .bind(encoded)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(game_id)
    }

    /// Load and decode a game's board state.
    pub async fn game_state(&self, game_id: i64) -> Result<GameState, StoreError> {
        let row = sqlx::query_as::<_, GameStateRow>(
            "SELECT game_id, player_id, given_scenario_ids, selected_scenario_ids
             FROM game_state WHERE game_id = ?",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::GameNotFound(game_id))?;
        Ok(row.decode()?)
    }

    /// Append a display id to a game's selection list.
    ///
    /// The read-validate-append sequence runs in one transaction so a
    /// concurrent selection cannot be lost; the loser of a race sees
    /// the winner's committed list and re-validates against it.
    pub async fn select_scenario(&self, game_id: i64, display_id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, GameStateRow>(
            "SELECT game_id, player_id, given_scenario_ids, selected_scenario_ids
             FROM game_state WHERE game_id = ?",
        )
        .bind(game_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::GameNotFound(game_id))?;
        let mut state = row.decode()?;

        if !state.given.contains(&display_id) {
            return Err(StoreError::NotOffered(display_id));
        }
        if state.selected.contains(&display_id) {
            return Err(StoreError::AlreadySelected(display_id));
        }
        state.selected.push(display_id);

        sqlx::query("UPDATE game_state SET selected_scenario_ids = ? WHERE game_id = ?")
            .bind(encode_ids(&state.selected)?)
            .bind(game_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Current winner of a game (`None` while unwon).
    pub async fn winner(&self, game_id: i64) -> Result<Option<String>, StoreError> {
        let row = sqlx::query_as::<_, (Option<String>,)>("SELECT winner FROM games WHERE id = ?")
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::GameNotFound(game_id))?;
        Ok(row.0)
    }

    /// Record a winner if none exists yet. The conditional update makes
    /// the `NULL -> name` transition atomic: returns true if this call
    /// recorded the winner, false if one was already present.
    pub async fn record_winner(&self, game_id: i64, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE games SET winner = ? WHERE id = ? AND winner IS NULL")
            .bind(name)
            .bind(game_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Player name lookup.
    pub async fn player_name(&self, player_id: i64) -> Result<String, StoreError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT name FROM players WHERE id = ?")
            .bind(player_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Resolve display ids to board cells, looking each text up by the
    /// recovered canonical id. Order is preserved.
    pub async fn resolve_board(&self, display_ids: &[i64]) -> Result<Vec<BoardCell>, StoreError> {
        let mut cells = Vec::with_capacity(display_ids.len());
        for &display_id in display_ids {
            let row = sqlx::query_as::<_, (String,)>("SELECT text FROM scenarios WHERE id = ?")
                .bind(canonical_id(display_id))
                .fetch_one(&self.pool)
                .await?;
            cells.push(BoardCell {
                id: display_id,
                text: row.0,
            });
        }
        Ok(cells)
    }
}
