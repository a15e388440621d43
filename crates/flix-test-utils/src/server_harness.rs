//! Test server harness for E2E testing
//!
//! Provides TestServer for spawning real myFlix API instances in tests.
//! The server runs against the in-memory store, so no database is needed
//! and storage faults can be injected through [`TestServer::store`].

use crate::catalog_fixtures::sample_movies;
use crate::crypto_fixtures::test_keyring;
use crate::token_builders::TestTokenBuilder;
use flix_service::config::{Config, DEFAULT_TOKEN_TTL_SECS, MIN_BCRYPT_COST};
use flix_service::models::{LoginResponse, UserResponse};
use flix_service::observability::metrics::init_metrics_recorder;
use flix_service::routes::{build_routes, AppState};
use flix_service::store::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Test harness for spawning the myFlix API in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_flow_e2e() -> Result<(), anyhow::Error> {
///     let server = TestServer::spawn().await?;
///
///     server.register_user("aliceflix", "hunter2pass", "alice@example.com").await?;
///     let token = server.login_token("aliceflix", "hunter2pass").await?;
///
///     let response = server.get_authed("/movies", &token).await?;
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestServer {
    addr: SocketAddr,
    config: Config,
    store: Arc<MemoryStore>,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a new test server instance with an isolated in-memory store
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Use a two-key test keyring (one active, one retired)
    /// - Pre-seed the catalog with [`sample_movies`]
    /// - Run bcrypt at the minimum cost so registration and login stay fast
    ///
    /// # Returns
    /// * `Ok(TestServer)` - Running server instance
    /// * `Err(anyhow::Error)` - If server spawn fails
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let config = Config {
            database_url: String::new(), // In-memory store, never dialed
            bind_address: "127.0.0.1:0".to_string(),
            keyring: test_keyring(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            jwt_clock_skew: Duration::from_secs(300),
            bcrypt_cost: MIN_BCRYPT_COST,
        };

        let store = Arc::new(MemoryStore::with_movies(sample_movies()));

        // Create application state
        let state = Arc::new(AppState {
            users: store.clone(),
            movies: store.clone(),
            config: config.clone(),
        });

        // Initialize metrics recorder for test server
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                // If metrics recorder already installed globally, create a standalone recorder
                // without installing it. This allows each test to have its own metrics.
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        // Build routes using flix-service's real route builder
        let app = build_routes(state, metrics_handle);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            // Use into_make_service_with_connect_info to support SocketAddr extraction
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            store,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the backing store, for seeding records and injecting faults
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Get the shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a registration request and return the raw response
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/users", self.url()))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "email": email,
            }))
            .send()
            .await?;
        Ok(response)
    }

    /// Register an account and parse the created record
    ///
    /// Fails the calling test if registration does not return 201.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<UserResponse, anyhow::Error> {
        let response = self.register(username, password, email).await?;
        if response.status() != 201 {
            anyhow::bail!("Registration returned {}", response.status());
        }
        Ok(response.json().await?)
    }

    /// POST a login request and return the raw response
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/login", self.url()))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;
        Ok(response)
    }

    /// Log in and return the issued session token
    ///
    /// Fails the calling test if login does not return 200.
    pub async fn login_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, anyhow::Error> {
        let response = self.login(username, password).await?;
        if response.status() != 200 {
            anyhow::bail!("Login returned {}", response.status());
        }
        let grant: LoginResponse = response.json().await?;
        Ok(grant.token)
    }

    /// GET a path with a Bearer token attached
    pub async fn get_authed(
        &self,
        path: &str,
        token: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = self
            .client
            .get(format!("{}{}", self.url(), path))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response)
    }

    /// Create a session token for `subject` that expired `expired_seconds_ago`
    /// seconds ago, signed with the server's active key
    ///
    /// Useful for testing token expiration validation.
    pub fn create_expired_token(&self, subject: &str, expired_seconds_ago: i64) -> String {
        TestTokenBuilder::new()
            .for_subject(subject)
            .expired_since(expired_seconds_ago)
            .sign_with(self.config.keyring.active())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Explicitly abort the HTTP server task to ensure immediate cleanup
        // when the test completes. This stops the server gracefully.
        self._handle.abort();
    }
}
