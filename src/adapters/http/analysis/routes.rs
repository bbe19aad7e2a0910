//! Route configuration for analysis endpoints.
//!
//! Configures Axum router with dataset analysis routes.

use axum::routing::post;
use axum::Router;

use super::handlers::{analyze_anova, export_anova, preview_dataset, AnalysisAppState};

/// Creates the analysis router with all endpoints.
///
/// Routes:
/// - `POST /api/preview` - Detect layout and propose class columns
/// - `POST /api/analyze/anova` - Run the one-way ANOVA sweep
/// - `POST /api/export/anova` - Re-render echoed results as a workbook
pub fn analysis_routes() -> Router<AnalysisAppState> {
    Router::new()
        .route("/api/preview", post(preview_dataset))
        .route("/api/analyze/anova", post(analyze_anova))
        .route("/api/export/anova", post(export_anova))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        analysis_routes().with_state(AnalysisAppState::default())
    }

    #[tokio::test]
    async fn preview_route_is_mounted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/preview")
                    .header("content-type", "multipart/form-data; boundary=x")
                    .body(Body::from("--x--\r\n"))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Empty form reaches the handler and fails validation, not routing.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_route_is_mounted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/export/anova")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze/manova")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
