//! Dashboard and notes actions
//!
//! Note actions follow post/redirect/get: each one mutates the session's
//! notes controller and sends the browser back to `/dashboard`.

use crate::{state::AppState, views::dashboard::dashboard_page};
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use sellcord_core::{
    Destination, NoteId, NotesController, SessionToken,
    notes::{NoteDraft, SubmitOutcome},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Fields of the note form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    /// Note title
    #[serde(default)]
    pub title: String,
    /// Note description
    #[serde(default)]
    pub description: String,
}

fn back_to_dashboard() -> Redirect {
    Redirect::to(Destination::Dashboard.path())
}

/// `GET /dashboard`
pub async fn show(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Html<String> {
    Html(state.read_notes(&token, dashboard_page))
}

/// `POST /dashboard/notes`: add a note, or update the one being edited
pub async fn submit_note(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Form(form): Form<NoteForm>,
) -> Redirect {
    let draft = NoteDraft::new(form.title, form.description);
    let outcome = state.with_notes(&token, |notes| notes.submit(&draft, Utc::now()));

    match outcome {
        SubmitOutcome::Added(id) => debug!(id, "note added"),
        SubmitOutcome::Updated(id) => debug!(id, "note updated"),
        SubmitOutcome::Rejected => debug!("blank note ignored"),
        SubmitOutcome::Unchanged => debug!("note submit changed nothing"),
    }

    back_to_dashboard()
}

/// `POST /dashboard/notes/:id/edit`
pub async fn edit_note(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<NoteId>,
) -> Redirect {
    let found = state
        .with_existing_notes(&token, |notes| notes.begin_edit(id).is_some())
        .unwrap_or(false);
    if !found {
        debug!(id, "edit requested for unknown note");
    }
    back_to_dashboard()
}

/// `POST /dashboard/notes/cancel`
pub async fn cancel_edit(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Redirect {
    state.with_existing_notes(&token, NotesController::cancel_edit);
    back_to_dashboard()
}

/// `POST /dashboard/notes/:id/delete`
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<NoteId>,
) -> Redirect {
    let applied = state
        .with_existing_notes(&token, |notes| notes.remove(id).is_applied())
        .unwrap_or(false);
    debug!(id, applied, "note delete");
    back_to_dashboard()
}
