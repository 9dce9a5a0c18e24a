use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState, app_url: &str) -> Router<()> {
    let base_app = Router::new()
        .route("/", get(|| async { "Hourbook is up" }))
        .nest("/reports", routes::reports::router())
        .nest("/time-entries", routes::time_entries::router())
        .nest("/companies", routes::companies::router())
        .nest("/projects", routes::projects::router())
        .nest("/users", routes::users::router())
        .nest("/preferences", routes::preferences::router());

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, app_state.auth.user_header.clone()])
        .allow_credentials(true);
    match HeaderValue::from_str(app_url) {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!("app_url '{}' is not a valid origin, CORS disabled", app_url),
    }

    base_app
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
