use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tile_solver::solver::Solver;
use tile_solver::types::{PieceKind, Placement, Rect, deserialize_u32_from_number};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct SolveRequest {
    board: Rect,
    pieces: Vec<PieceRequest>,
    #[serde(default = "default_true")]
    stop_after_first: bool,
}

#[derive(Deserialize, Serialize)]
struct PieceRequest {
    rect: Rect,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    qty: u32,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
struct SolveResponse {
    solved: bool,
    solution_count: usize,
    placements: Vec<Placement>,
    backtracks: u64,
}

async fn solve(
    Json(req): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /solve"
    );

    let kinds = req
        .pieces
        .into_iter()
        .map(|p| PieceKind {
            rect: p.rect,
            count: p.qty,
        })
        .collect();

    let solver = Solver::new(req.board, kinds, req.stop_after_first)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let outcome = solver.solve();

    let response = SolveResponse {
        solved: outcome.solved(),
        solution_count: outcome.solutions.len(),
        placements: outcome
            .first()
            .map(|s| s.placements.clone())
            .unwrap_or_default(),
        backtracks: outcome.backtracks,
    };

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/solve", post(solve))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"board":{"w":56,"h":56},"pieces":[{"rect":{"w":14,"h":28},"qty":1}]}"#,
        )
        .unwrap();
        assert_eq!(req.board, Rect::new(56, 56));
        assert_eq!(req.pieces[0].rect, Rect::new(14, 28));
        assert_eq!(req.pieces[0].qty, 1);
        assert!(req.stop_after_first);
    }

    #[test]
    fn test_request_accepts_whole_float_quantities() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"board":{"w":10,"h":10},"pieces":[{"rect":{"w":5,"h":5},"qty":4.0}],"stop_after_first":false}"#,
        )
        .unwrap();
        assert_eq!(req.pieces[0].qty, 4);
        assert!(!req.stop_after_first);
    }
}
