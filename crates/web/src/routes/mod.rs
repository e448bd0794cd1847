//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dispatcher (login | onboarding | home)
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /login                    - Login page
//! POST /login                    - Login action
//! POST /logout                   - Logout action
//!
//! # Onboarding (signed in, not finished)
//! GET  /onboarding                         - Mount: redirect to the resume step
//! GET  /onboarding/{slug}                  - Step page (personal-profile,
//!                                            favorite-songs, payment-information,
//!                                            success); other slugs are 404
//! POST /onboarding/personal-profile        - Commit profile (multipart)
//! POST /onboarding/favorite-songs          - Commit song draft
//! POST /onboarding/favorite-songs/add      - Add to draft (song_list fragment)
//! POST /onboarding/favorite-songs/remove   - Remove from draft (song_list fragment)
//! POST /onboarding/payment-information     - Commit payment
//! POST /onboarding/payment-information/preview - Card preview fragment
//!                                            (signed in; also used by /payments)
//! POST /onboarding/navigate                - next | back | skip
//! POST /onboarding/success/tick            - Countdown tick (countdown fragment)
//! POST /onboarding/complete                - Finish onboarding
//!
//! # App (signed in, onboarded)
//! GET  /home                     - Home page
//! GET  /profile                  - Profile form
//! POST /profile                  - Save profile (multipart)
//! GET  /favorites                - Favorite songs
//! POST /favorites                - Save songs
//! GET  /payments                 - Payment form
//! POST /payments                 - Save payment
//! ```

pub mod auth;
pub mod errors;
pub mod home;
pub mod onboarding;
pub mod payment;
pub mod profile;
pub mod songs;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the onboarding routes router.
pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(onboarding::mount))
        .route("/navigate", post(onboarding::navigate))
        .route(
            "/personal-profile",
            get(onboarding::personal_profile)
                .post(profile::commit_step)
                .layer(DefaultBodyLimit::max(profile::PROFILE_BODY_LIMIT)),
        )
        .route(
            "/favorite-songs",
            get(onboarding::favorite_songs).post(songs::commit_step),
        )
        .route("/favorite-songs/add", post(songs::add))
        .route("/favorite-songs/remove", post(songs::remove))
        .route(
            "/payment-information",
            get(onboarding::payment_information).post(payment::commit_step),
        )
        .route("/payment-information/preview", post(payment::preview))
        .route("/success", get(onboarding::success))
        .route("/success/tick", post(onboarding::tick))
        .route("/complete", post(onboarding::complete))
        .route("/{slug}", get(onboarding::unknown_step))
}

/// Create the post-onboarding app routes router.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home::home))
        .route(
            "/profile",
            get(profile::page)
                .post(profile::save)
                .layer(DefaultBodyLimit::max(profile::PROFILE_BODY_LIMIT)),
        )
        .route("/favorites", get(songs::page).post(songs::save))
        .route("/payments", get(payment::page).post(payment::save))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/onboarding", onboarding_routes())
        .merge(app_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
