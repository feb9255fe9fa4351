//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.db {
        Some(db) => match db.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                "unreachable"
            }
        },
        None => "in-memory",
    };

    let response = HealthResponse {
        status: if database == "unreachable" { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use crate::state::test_support::in_memory_state;

    #[actix_web::test]
    async fn test_health_reports_in_memory_mode() {
        let app = test_app!(in_memory_state());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");
    }
}
