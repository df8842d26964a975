//! Request Handlers
//!
//! One handler per endpoint. Errors are reported synchronously as a
//! status code plus message; nothing is retried.

use std::fmt::Display;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRequest {
    pub fill: i64,
}

#[derive(Debug, Deserialize)]
pub struct FillQuery {
    pub fill: i64,
}

/// Advance one generation and respond with the rendered grid.
pub async fn next_state(
    State(state): State<Arc<AppState>>,
) -> Result<String, (StatusCode, String)> {
    let grid = {
        let mut service = state.service.lock().await;
        service.advance_generation().map_err(internal)?
    };

    let text = grid.render();
    if text.is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "life is empty".to_string(),
        ));
    }

    info!(density = grid.density(), "advanced one generation");
    Ok(text)
}

/// Reseed the current grid to the requested density.
///
/// The density comes from a `fill` query parameter or a JSON body
/// `{"fill": <int>}`; the query parameter takes precedence. Each accepted
/// density is appended to the density log.
pub async fn set_state(
    State(state): State<Arc<AppState>>,
    query: Option<Query<FillQuery>>,
    body: Option<Json<SetRequest>>,
) -> Result<String, (StatusCode, String)> {
    let fill = match (query, body) {
        (Some(Query(query)), _) => query.fill,
        (None, Some(Json(body))) => body.fill,
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "missing fill: supply a ?fill= parameter or a JSON body".to_string(),
            ))
        }
    };

    let grid = {
        let mut service = state.service.lock().await;
        service.set_density(fill).map_err(internal)?
    };

    state.sink.append(fill).await.map_err(internal)?;

    info!(fill, "grid reseeded");
    Ok(format!("Fill: {}\n{}", fill, grid.render()))
}

/// Reseed the current grid to the most recently logged density.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<String, (StatusCode, String)> {
    let fill = state
        .sink
        .last()
        .await
        .map_err(internal)?
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "density log is empty".to_string()))?;

    let grid = {
        let mut service = state.service.lock().await;
        service.set_density(fill).map_err(internal)?
    };

    info!(fill, "grid reset to last logged density");
    Ok(format!("New fill: {}\n{}", fill, grid.render()))
}

fn internal(e: impl Display) -> (StatusCode, String) {
    error!("request failed: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::LifeService;
    use crate::state::DensitySink;
    use anyhow::Result;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;

    /// In-memory sink standing in for the file-backed density log.
    #[derive(Default)]
    struct MemorySink {
        entries: StdMutex<Vec<i64>>,
    }

    #[async_trait]
    impl DensitySink for MemorySink {
        async fn append(&self, density: i64) -> Result<()> {
            self.entries.lock().unwrap().push(density);
            Ok(())
        }

        async fn last(&self) -> Result<Option<i64>> {
            Ok(self.entries.lock().unwrap().last().copied())
        }
    }

    fn app_state() -> Arc<AppState> {
        let service =
            LifeService::new(5, 5, 40, StdRng::seed_from_u64(42)).unwrap();
        Arc::new(AppState {
            service: Mutex::new(service),
            sink: Box::new(MemorySink::default()),
        })
    }

    #[tokio::test]
    async fn test_next_state_renders_every_row() {
        let state = app_state();
        let text = next_state(State(state)).await.unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_set_state_from_body_appends_to_log() {
        let state = app_state();

        let response = set_state(
            State(Arc::clone(&state)),
            None,
            Some(Json(SetRequest { fill: 70 })),
        )
        .await
        .unwrap();

        assert!(response.starts_with("Fill: 70\n"));
        assert_eq!(state.sink.last().await.unwrap(), Some(70));
    }

    #[tokio::test]
    async fn test_set_state_query_takes_precedence() {
        let state = app_state();

        let response = set_state(
            State(Arc::clone(&state)),
            Some(Query(FillQuery { fill: 90 })),
            Some(Json(SetRequest { fill: 10 })),
        )
        .await
        .unwrap();

        assert!(response.starts_with("Fill: 90\n"));
        assert_eq!(state.sink.last().await.unwrap(), Some(90));
    }

    #[tokio::test]
    async fn test_set_state_without_fill_is_rejected() {
        let state = app_state();

        let err = set_state(State(state), None, None).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_requires_a_logged_density() {
        let state = app_state();

        let err = reset(State(Arc::clone(&state))).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_reuses_last_logged_density() {
        let state = app_state();

        set_state(
            State(Arc::clone(&state)),
            Some(Query(FillQuery { fill: 100 })),
            None,
        )
        .await
        .unwrap();

        let response = reset(State(Arc::clone(&state))).await.unwrap();
        assert!(response.starts_with("New fill: 100\n"));

        // Fill 100 makes every cell alive, so the render has no dead glyphs.
        assert!(!response.contains(crate::life::DEAD_GLYPH));
    }
}
