// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;
pub mod flash;
pub mod handlers;
pub mod render;
pub mod session;
pub mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

/// Build the full route table. Static files live under `/static`, which
/// covers both upload areas.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::movies::index))
        .route(
            "/register",
            get(handlers::account::register_form).post(handlers::account::register),
        )
        .route(
            "/login",
            get(handlers::account::login_form).post(handlers::account::login),
        )
        .route("/logout", get(handlers::account::logout))
        .route("/movie/{id}", get(handlers::movies::movie_detail))
        .route("/movie/{id}/delete", post(handlers::movies::delete_movie))
        .route("/movie/{id}/rate", post(handlers::movies::rate_movie))
        .route("/movie/{id}/favorite", post(handlers::movies::toggle_favorite))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
