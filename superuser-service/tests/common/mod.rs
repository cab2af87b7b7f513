use std::sync::Arc;

use auth::TokenBackend;
use auth::TokenConfig;
use auth::TokenManager;
use chrono::Duration;
use superuser_service::domain::superuser::service::SuperuserService;
use superuser_service::inbound::http::middleware::AUTH_COOKIE;
use superuser_service::inbound::http::router::create_router;
use superuser_service::outbound::repositories::InMemorySuperuserRepository;

/// Symmetric key shared by the server under test and any tokens the
/// tests mint themselves. 32 bytes, so it works for both backends.
pub const TEST_KEY: &str = "test_symmetric_key_of_32_bytes!!";

/// Test application that spawns a real server backed by the in-memory
/// store.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Direct handle on the store, for reading reset tokens and
    /// two-factor codes the API deliberately never returns.
    pub repository: Arc<InMemorySuperuserRepository>,
    /// The exact manager the server verifies with.
    pub token_manager: Arc<TokenManager>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_backend(TokenBackend::Jwt).await
    }

    pub async fn spawn_with_backend(backend: TokenBackend) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemorySuperuserRepository::new());
        let superuser_service = Arc::new(SuperuserService::new(Arc::clone(&repository)));

        let token_manager = Arc::new(
            TokenManager::from_config(&TokenConfig {
                backend,
                symmetric_key: TEST_KEY.to_string(),
                access_token_lifetime: Duration::hours(24),
            })
            .expect("Failed to build token manager"),
        );

        let router = create_router(superuser_service, Arc::clone(&token_manager));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            repository,
            token_manager,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying an explicit session cookie,
    /// bypassing the client's cookie store. Used to present crafted
    /// tokens (expired, garbage) to the authorization gate.
    pub fn get_with_cookie(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header(reqwest::header::COOKIE, format!("{}={}", AUTH_COOKIE, token))
    }

    /// Register a superuser and return the response body.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/superuser/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in; on success the client's cookie store picks up the
    /// session cookie, so subsequent requests are authenticated.
    pub async fn login(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/superuser/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }
}
