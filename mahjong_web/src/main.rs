use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use hk_mahjong_core::{
    is_winning_shape, is_winning_shape_with_claim, parse_tiles, score as calc_score, ScoreRequest,
    ScoreResult, Tile,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hk-mahjong", about = "Hong Kong sixteen-tile mahjong scoring server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "HK_MAHJONG_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[derive(Clone, Default)]
struct AppState {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let app = router(Arc::new(AppState::default()));

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/score", post(score))
        .route("/api/win", post(win))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn score(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, ApiError> {
    let result = calc_score(&req).map_err(|e| {
        warn!(error = %e, "score rejected");
        ApiError(e.to_string())
    })?;
    info!(score = result.score, categories = result.categories.len(), "scored");
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct WinRequest {
    tiles: Vec<String>,
    /// 他家の捨て牌（ロン判定）
    #[serde(default)]
    claimed: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct WinResponse {
    winning: bool,
}

async fn win(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<WinRequest>,
) -> Result<Json<WinResponse>, ApiError> {
    let tiles = parse_tiles(&req.tiles).map_err(ApiError)?;
    let winning = match req.claimed.as_deref() {
        Some(code) => {
            let claimed = Tile::from_code(code).map_err(ApiError)?;
            is_winning_shape_with_claim(&tiles, claimed)
        }
        None => is_winning_shape(&tiles),
    };
    Ok(Json(WinResponse { winning }))
}

struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0).into_response()
    }
}
