//! Root dispatcher and the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect};
use clarity_core::Destination;
use tracing::instrument;

use crate::filters;
use crate::middleware::{Flashes, Onboarded, StateHandle};
use crate::models::Flash;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub active_page: &'static str,
    pub first_name: String,
    pub picture: Option<String>,
    pub initial: Option<char>,
    pub flashes: Vec<Flash>,
}

/// `GET /`: send the visitor to login, onboarding or home.
#[instrument(skip_all)]
pub async fn index(handle: StateHandle) -> Redirect {
    Redirect::to(&Destination::for_visitor(handle.state()).path())
}

/// `GET /home`.
#[instrument(skip_all)]
pub async fn home(Onboarded(handle): Onboarded, Flashes(flashes): Flashes) -> impl IntoResponse {
    let profile = handle.state().onboarding().personal_profile();

    HomeTemplate {
        active_page: "home",
        first_name: profile.first_name().unwrap_or("User").to_string(),
        picture: profile.profile_picture.clone(),
        initial: profile.initial(),
        flashes,
    }
}
