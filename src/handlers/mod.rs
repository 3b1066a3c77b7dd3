pub mod account;
pub mod movies;

use crate::error::AppResult;
use crate::flash;
use crate::state::AppState;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::SignedCookieJar;
use catalog::CatalogController;
use serde_json::Value;

/// Every request works on a connection of its own, dropped when the
/// handler returns.
fn open_catalog(state: &AppState) -> AppResult<CatalogController> {
    Ok(CatalogController::with_path(&state.config.database.path)?)
}

/// Drain the flash queue into the context and hand everything to the
/// renderer.
fn render_page(
    state: &AppState,
    jar: SignedCookieJar,
    template: &str,
    mut context: Value,
) -> AppResult<Response> {
    let (jar, flashes) = flash::take(jar);

    if let Some(map) = context.as_object_mut() {
        map.insert("flashes".to_string(), serde_json::to_value(&flashes)?);
    }

    let html = state.renderer.render(template, &context)?;
    Ok((jar, Html(html)).into_response())
}
