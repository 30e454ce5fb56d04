use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::debug;

use backend_application::commands::event_commands;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::{set_flash_cookie, FlashNotice};
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct TrainingCompleteForm {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportForm {
    pub email: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulatedLinkQuery {
    pub email: Option<String>,
}

pub async fn training_complete(
    State(state): State<AppState>,
    form: Result<Form<TrainingCompleteForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let form = form_or_default(form)?;
    event_commands::record_training_completion(&state, form.email).await?;
    redirect_with_notice(&state, "/", FlashNotice::TrainingRecorded)
}

pub async fn submit_report(
    State(state): State<AppState>,
    form: Result<Form<ReportForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let form = form_or_default(form)?;
    event_commands::record_report(&state, form.email, form.details).await?;
    redirect_with_notice(&state, "/", FlashNotice::ReportReceived)
}

pub async fn simulated_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
    query: Option<Query<SimulatedLinkQuery>>,
) -> Result<Html<String>, HttpError> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let entry = event_commands::record_simulated_click(&state, &token, query.email).await?;
    Ok(Html(views::simulated_result_page(
        &token,
        entry.participant_email.as_deref(),
    )))
}

/// Missing or unparseable fields read as absent. A body that could not be
/// read at all fails the request so nothing is recorded on its behalf.
pub(crate) fn form_or_default<T: Default>(
    form: Result<Form<T>, FormRejection>,
) -> Result<T, HttpError> {
    match form {
        Ok(Form(form)) => Ok(form),
        Err(FormRejection::BytesRejection(rejection)) => Err(HttpError::Rejected(
            rejection.status(),
            rejection.body_text(),
        )),
        Err(rejection) => {
            debug!("form fields unreadable, using defaults: {}", rejection.body_text());
            Ok(T::default())
        }
    }
}

pub(crate) fn redirect_with_notice(
    state: &AppState,
    to: &str,
    notice: FlashNotice,
) -> Result<Response, HttpError> {
    let cookie = set_flash_cookie(&state.config.session_secret, notice)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(to)).into_response())
}
