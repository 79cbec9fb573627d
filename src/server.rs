//! Axum HTTP server: the game endpoints for the Zoomingo frontend.
//!
//! Every endpoint is a short read/write against the shared [`Store`];
//! no state lives in the process between requests.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/newGame` | Create a player (by name) and a fresh board |
//! | POST | `/selectScenario` | Mark one board square as completed |
//! | POST | `/bingo` | Check the win condition, recording a winner once |
//! | GET | `/resumeGame` | Reload an existing game's board and selections |

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::board_mechanics::{assign_unique_ids, sample_board_ids};
use crate::game_mechanics::{evaluate_win, WinDecision};
use crate::storage::{Store, StoreError};

pub type AppState = Store;

pub fn create_router(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/newGame", get(handle_new_game))
        .route("/selectScenario", post(handle_select_scenario))
        .route("/bingo", post(handle_bingo))
        .route("/resumeGame", get(handle_resume_game))
        .layer(cors)
        .with_state(store)
}

// ── Request types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct NewGameQuery {
    name: String,
    size: usize,
}

#[derive(Deserialize)]
struct SelectRequest {
    game_id: i64,
    // Field name kept verbatim from the original client.
    #[serde(rename = "scenario-id")]
    scenario_id: i64,
}

#[derive(Deserialize)]
struct BingoRequest {
    game_id: i64,
}

#[derive(Deserialize)]
struct ResumeQuery {
    game_id: i64,
    player_id: i64,
}

// ── Error helpers ───────────────────────────────────────────────────

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

/// Map a store failure onto the response taxonomy: bad caller input is
/// a 400 with the specific reason, anything else a generic 500.
fn store_error(err: StoreError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is_client_error() {
        error_response(StatusCode::BAD_REQUEST, &err.to_string())
    } else {
        log::error!("store failure: {err}");
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("There was an issue with the server. Error: {err}"),
        )
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_new_game(
    State(store): State<AppState>,
    Query(params): Query<NewGameQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if params.name.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Missing name"));
    }
    if params.size % 2 == 0 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Board size must be a positive odd integer",
        ));
    }

    let player = store
        .find_or_create_player(&params.name)
        .await
        .map_err(store_error)?;

    // The rng is dropped before the next await point.
    let mut board = {
        let mut rng = SmallRng::from_os_rng();
        sample_board_ids(params.size, &mut rng)
    };
    assign_unique_ids(&mut board);

    let cells = store.resolve_board(&board).await.map_err(store_error)?;
    let game_id = store
        .create_game(player.id, &board)
        .await
        .map_err(store_error)?;

    Ok(Json(serde_json::json!({
        "game_id": game_id,
        "player": {
            "id": player.id,
            "name": player.name,
            "board": cells,
        },
    })))
}

async fn handle_select_scenario(
    State(store): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match store.select_scenario(req.game_id, req.scenario_id).await {
        Ok(()) => Ok(Json(serde_json::json!({
            "game_id": req.game_id,
            "scenario_id": req.scenario_id,
        }))),
        Err(err) if err.is_client_error() => Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!("Could not select scenario ID: {}", req.scenario_id),
        )),
        Err(err) => Err(store_error(err)),
    }
}

async fn handle_bingo(
    State(store): State<AppState>,
    Json(req): Json<BingoRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let state = store.game_state(req.game_id).await.map_err(store_error)?;
    let winner = store.winner(req.game_id).await.map_err(store_error)?;

    match evaluate_win(state.given.len(), state.selected.len(), winner.as_deref()) {
        WinDecision::AlreadyWon => Ok(Json(serde_json::json!({
            "error": "Game has already been won.",
        }))),
        WinDecision::NotYet => Ok(Json(serde_json::json!({
            "game_id": req.game_id,
            "winner": null,
        }))),
        WinDecision::Winner => {
            let name = store
                .player_name(state.player_id)
                .await
                .map_err(store_error)?;
            let recorded = store
                .record_winner(req.game_id, &name)
                .await
                .map_err(store_error)?;
            if recorded {
                Ok(Json(serde_json::json!({
                    "game_id": req.game_id,
                    "winner": name,
                })))
            } else {
                // Lost a race against a concurrent bingo call.
                Ok(Json(serde_json::json!({
                    "error": "Game has already been won.",
                })))
            }
        }
    }
}

async fn handle_resume_game(
    State(store): State<AppState>,
    Query(params): Query<ResumeQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let state = store.game_state(params.game_id).await.map_err(store_error)?;
    if state.player_id != params.player_id {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!(
                "Cannot resume game: Player {} was not part of game {}",
                params.player_id, params.game_id
            ),
        ));
    }

    let name = store
        .player_name(state.player_id)
        .await
        .map_err(store_error)?;
    let board = store.resolve_board(&state.given).await.map_err(store_error)?;

    Ok(Json(serde_json::json!({
        "game_id": params.game_id,
        "player": {
            "id": params.player_id,
            "name": name,
            "board": board,
            "selected_scenarios": state.selected,
        },
    })))
}
