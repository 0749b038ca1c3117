use super::AppState;
use axum::extract::State;
use axum::Json;

pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": "perpwatch",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_healthy() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_status_reports_uptime() {
        let Json(body) = status(State(AppState::new())).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["service"], "perpwatch");
        assert!(body["uptime_seconds"].is_u64());
    }
}
