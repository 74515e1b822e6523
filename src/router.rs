use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::handlers::{admin, site};
use crate::service::ContentService;

/// URL prefix stored images are served under.
pub const UPLOADS_ROUTE: &str = "/static/uploads";

#[derive(Clone)]
pub struct VitrineState {
    pub content: ContentService,
}

impl VitrineState {
    pub fn new(content: ContentService) -> Self {
        Self { content }
    }
}

/// Build the public site and admin routes. `max_upload_bytes` caps every request body.
pub fn vitrine_router(state: VitrineState, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.content.normalizer().uploads_dir());

    Router::new()
        .route("/", get(site::landing_page))
        .route("/contact", post(site::contact))
        .route("/subscribe", post(site::subscribe))
        .route("/admin", get(admin::dashboard))
        .route("/admin/add_project", post(admin::add_project))
        .route("/admin/add_client", post(admin::add_client))
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
