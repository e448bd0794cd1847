//! Favorite songs: onboarding step 2 and the `/favorites` page.
//!
//! Songs are edited on a draft kept in the session next to the app state.
//! A full page load re-initializes the draft from the committed songs; the
//! add/remove endpoints return the list fragment for HTMX.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use clarity_core::onboarding::FavoriteSong;
use clarity_core::{Action, SongDraft, SongId, Step, StepData};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{Authenticated, Flashes, InOnboarding, Onboarded, StateHandle, push_flash};
use crate::models::views::StepIndicator;
use crate::models::{Flash, session_keys};

/// Add song form data.
#[derive(Debug, Deserialize)]
pub struct AddSongForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

/// Remove song form data.
#[derive(Debug, Deserialize)]
pub struct RemoveSongForm {
    pub id: String,
}

/// Onboarding step 2 template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/favorite_songs.html")]
pub struct SongsStepTemplate {
    pub indicator: StepIndicator,
    pub songs: Vec<FavoriteSong>,
    pub error: Option<String>,
    pub toast: Option<Flash>,
    pub flashes: Vec<Flash>,
}

/// `/favorites` page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/favorites.html")]
pub struct FavoritesPageTemplate {
    pub active_page: &'static str,
    pub songs: Vec<FavoriteSong>,
    pub error: Option<String>,
    pub toast: Option<Flash>,
    pub flashes: Vec<Flash>,
}

/// Song list fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/song_list.html")]
pub struct SongListTemplate {
    pub songs: Vec<FavoriteSong>,
    pub error: Option<String>,
    /// Toast swapped out-of-band into the toast stack.
    pub toast: Option<Flash>,
}

// =============================================================================
// Draft Helpers
// =============================================================================

/// The session draft, or a fresh one from the committed songs.
async fn load_draft(handle: &StateHandle) -> SongDraft {
    match handle
        .session()
        .get::<SongDraft>(session_keys::SONGS_DRAFT)
        .await
    {
        Ok(Some(draft)) => draft,
        Ok(None) => SongDraft::from_committed(handle.state().onboarding().favorite_songs()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read song draft");
            SongDraft::from_committed(handle.state().onboarding().favorite_songs())
        }
    }
}

async fn store_draft(session: &Session, draft: &SongDraft) {
    if let Err(e) = session.insert(session_keys::SONGS_DRAFT, draft).await {
        tracing::warn!(error = %e, "Failed to save song draft");
    }
}

/// Re-initialize the draft from the committed songs.
async fn mount_draft(handle: &StateHandle) -> SongDraft {
    let draft = SongDraft::from_committed(handle.state().onboarding().favorite_songs());
    store_draft(handle.session(), &draft).await;
    draft
}

// =============================================================================
// Onboarding Step
// =============================================================================

/// Render step 2 with a freshly mounted draft.
pub async fn step_page(handle: &StateHandle, flashes: Vec<Flash>) -> Response {
    let draft = mount_draft(handle).await;
    SongsStepTemplate {
        indicator: StepIndicator::new(handle.state().onboarding(), Step::Songs),
        songs: draft.songs().to_vec(),
        error: None,
        toast: None,
        flashes,
    }
    .into_response()
}

/// `POST /onboarding/favorite-songs`: commit the draft.
#[instrument(skip_all)]
pub async fn commit_step(InOnboarding(mut handle): InOnboarding) -> Result<Response> {
    let draft = load_draft(&handle).await;

    match draft.commit() {
        Ok(data) => {
            let next = Step::Songs.next();
            handle
                .dispatch(Action::CommitStep(StepData::Songs(data)))
                .await?;
            handle.dispatch(Action::SetCurrentStep(next)).await?;
            push_flash(
                handle.session(),
                Flash::success("Your music library has been saved!"),
            )
            .await;
            Ok(Redirect::to(&next.path()).into_response())
        }
        Err(err) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            SongsStepTemplate {
                indicator: StepIndicator::new(handle.state().onboarding(), Step::Songs),
                songs: draft.songs().to_vec(),
                error: Some(err.to_string()),
                toast: None,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}

// =============================================================================
// Draft Fragments (HTMX)
// =============================================================================

/// `POST /onboarding/favorite-songs/add`.
#[instrument(skip_all)]
pub async fn add(
    Authenticated(handle): Authenticated,
    Form(form): Form<AddSongForm>,
) -> impl IntoResponse {
    let mut draft = load_draft(&handle).await;

    let (error, toast) = match draft.add_song(&form.title, &form.artist) {
        Ok(song) => {
            tracing::debug!(id = %song.id, "Added song to draft");
            (
                None,
                Some(Flash::success(format!(
                    "Added \"{}\" to your favorites!",
                    song.title
                ))),
            )
        }
        Err(err) => (Some(err.to_string()), None),
    };

    store_draft(handle.session(), &draft).await;

    SongListTemplate {
        songs: draft.songs().to_vec(),
        error,
        toast,
    }
}

/// `POST /onboarding/favorite-songs/remove`.
#[instrument(skip_all, fields(id = %form.id))]
pub async fn remove(
    Authenticated(handle): Authenticated,
    Form(form): Form<RemoveSongForm>,
) -> impl IntoResponse {
    let mut draft = load_draft(&handle).await;

    if draft.remove_song(&SongId::from(form.id)) {
        store_draft(handle.session(), &draft).await;
    }

    SongListTemplate {
        songs: draft.songs().to_vec(),
        error: None,
        toast: None,
    }
}

// =============================================================================
// Favorites Page
// =============================================================================

/// `GET /favorites`.
#[instrument(skip_all)]
pub async fn page(Onboarded(handle): Onboarded, Flashes(flashes): Flashes) -> impl IntoResponse {
    let draft = mount_draft(&handle).await;
    FavoritesPageTemplate {
        active_page: "favorites",
        songs: draft.songs().to_vec(),
        error: None,
        toast: None,
        flashes,
    }
}

/// `POST /favorites`: commit the edited draft.
#[instrument(skip_all)]
pub async fn save(Onboarded(mut handle): Onboarded) -> Result<Response> {
    let draft = load_draft(&handle).await;

    match draft.commit() {
        Ok(data) => {
            handle
                .dispatch(Action::CommitStep(StepData::Songs(data)))
                .await?;
            push_flash(
                handle.session(),
                Flash::success("Your music library has been saved!"),
            )
            .await;
            Ok(Redirect::to("/favorites").into_response())
        }
        Err(err) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            FavoritesPageTemplate {
                active_page: "favorites",
                songs: draft.songs().to_vec(),
                error: Some(err.to_string()),
                toast: None,
                flashes: Vec::new(),
            },
        )
            .into_response()),
    }
}
