//! Integration tests for Premium Clarity.
//!
//! Each test spawns the full application on an ephemeral port with an
//! in-memory session store and drives it over HTTP with a cookie-keeping
//! client, so one [`TestContext`] is one browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clarity-integration-tests
//! ```

use std::time::Duration;

use clarity_web::config::ClarityConfig;
use clarity_web::state::AppState;
use reqwest::multipart;
use reqwest::{Client, Response};
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

/// Username accepted by the default configuration.
pub const USERNAME: &str = "user123";

/// Password accepted by the default configuration.
pub const PASSWORD: &str = "password123";

/// A running server plus one browser-like client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Spawn the application with the default credentials and no login delay.
    pub async fn spawn() -> Self {
        Self::spawn_with(ClarityConfig {
            login_delay: Duration::ZERO,
            ..ClarityConfig::default()
        })
        .await
    }

    /// Spawn the application with `config`.
    pub async fn spawn_with(config: ClarityConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = clarity_web::app(AppState::new(config), MemoryStore::default());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// POST as HTMX does, without a body.
    pub async fn htmx_post(&self, path: &str) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("HTMX POST failed")
    }

    /// Sign in with the default credentials.
    pub async fn login(&self) -> Response {
        self.post_form("/login", &[("username", USERNAME), ("password", PASSWORD)])
            .await
    }

    /// Submit the personal profile step.
    pub async fn submit_profile(&self, name: &str, age: &str, email: &str) -> Response {
        let form = multipart::Form::new()
            .text("name", name.to_string())
            .text("age", age.to_string())
            .text("email", email.to_string())
            .text("location", "Lisbon");
        self.client
            .post(self.url("/onboarding/personal-profile"))
            .multipart(form)
            .send()
            .await
            .expect("Profile POST failed")
    }

    /// Add a song to the draft.
    pub async fn add_song(&self, title: &str, artist: &str) -> Response {
        self.post_form(
            "/onboarding/favorite-songs/add",
            &[("title", title), ("artist", artist)],
        )
        .await
    }

    /// Submit valid payment details.
    pub async fn submit_payment(&self) -> Response {
        self.post_form(
            "/onboarding/payment-information",
            &[
                ("card_number", "4111 1111 1111 1111"),
                ("expiry_date", "12/29"),
                ("cvv", "123"),
                ("cardholder_name", "Jane Doe"),
            ],
        )
        .await
    }
}
