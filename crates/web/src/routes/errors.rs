//! Fallback pages: 404 and the generic recovery page.

use std::any::Any;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::filters;
use crate::middleware::RequestId;
use crate::models::Flash;

/// 404 page template.
#[derive(Template, WebTemplate, Default)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub flashes: Vec<Flash>,
}

/// Generic recovery page ("Try again" / "Go home").
#[derive(Template, WebTemplate, Default)]
#[template(path = "errors/server_error.html")]
pub struct ServerErrorTemplate {
    pub flashes: Vec<Flash>,
}

/// Router fallback.
pub async fn not_found(uri: Uri, request_id: Option<Extension<RequestId>>) -> impl IntoResponse {
    tracing::debug!(
        path = %uri.path(),
        request_id = request_id.as_ref().map_or("-", |Extension(id)| id.0.as_str()),
        "No route"
    );
    (StatusCode::NOT_FOUND, NotFoundTemplate::default())
}

/// Panic handler for `CatchPanicLayer`.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ServerErrorTemplate::default(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_renders_recovery_page() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_recovery_page_offers_both_ways_out() {
        let html = ServerErrorTemplate::default().render().unwrap_or_default();
        assert!(html.contains("Try again"));
        assert!(html.contains("Go home"));
    }
}
