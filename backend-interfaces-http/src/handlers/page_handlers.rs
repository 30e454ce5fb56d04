use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use backend_application::AppState;

use crate::middleware::{clear_flash_cookie, read_flash, FlashNotice};
use crate::views;

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_with_flash(&state, &headers, views::index_page)
}

pub async fn training(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_with_flash(&state, &headers, views::training_page)
}

pub async fn report_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_with_flash(&state, &headers, views::report_page)
}

/// Renders a page with any pending notice and consumes the notice cookie.
pub(crate) fn render_with_flash(
    state: &AppState,
    headers: &HeaderMap,
    render: impl FnOnce(Option<FlashNotice>) -> String,
) -> Response {
    let flash = read_flash(&state.config.session_secret, headers);
    let mut response = Html(render(flash)).into_response();
    if flash.is_some() {
        response
            .headers_mut()
            .append(SET_COOKIE, clear_flash_cookie());
    }
    response
}
