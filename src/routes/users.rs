use crate::handlers::users::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};

/// `/v1/users` collection and `/v1/users/:id` item routes, with the body cap applied.
pub fn user_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/v1/users", get(list).post(create))
        .route(
            "/v1/users/:id",
            get(read).patch(update).put(update).delete(delete_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
