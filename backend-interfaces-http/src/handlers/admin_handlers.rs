use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use backend_application::commands::participant_commands;
use backend_application::queries::{admin_queries, export_queries};
use backend_application::AppState;
use backend_domain::RegistrationOutcome;

use crate::csv_export::{self, EXPORT_FILENAME};
use crate::error::HttpError;
use crate::handlers::action_handlers::{form_or_default, redirect_with_notice};
use crate::handlers::page_handlers::render_with_flash;
use crate::middleware::FlashNotice;
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct ParticipantForm {
    pub email: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
}

pub async fn admin_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let summary = admin_queries::load_summary(&state).await?;
    Ok(render_with_flash(&state, &headers, |flash| {
        views::admin_page(&summary, flash)
    }))
}

pub async fn export_events(State(state): State<AppState>) -> Result<Response, HttpError> {
    let events = export_queries::list_all_events(&state).await?;
    let body = csv_export::render_events(&events)
        .map_err(|err| HttpError::Internal(format!("csv export failed: {err}")))?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// A blank email is ignored without a notice; a duplicate is reported on the
/// dashboard and never fails the request.
pub async fn add_participant(
    State(state): State<AppState>,
    form: Result<Form<ParticipantForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let form = form_or_default(form)?;
    let outcome =
        participant_commands::add_participant(&state, form.email, form.name, form.department)
            .await?;
    match outcome {
        Some(RegistrationOutcome::Registered(_)) => {
            redirect_with_notice(&state, "/admin", FlashNotice::ParticipantAdded)
        }
        Some(RegistrationOutcome::DuplicateEmail) => {
            redirect_with_notice(&state, "/admin", FlashNotice::ParticipantExists)
        }
        None => Ok(Redirect::to("/admin").into_response()),
    }
}
