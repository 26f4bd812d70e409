#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]
use relaydesk::config::Config;
use relaydesk::storage::InMemoryStore;
use std::sync::Arc;
use std::sync::Once;
use time::OffsetDateTime;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("relaydesk=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config
}

pub struct TestApp {
    pub server_url: String,
    pub client: reqwest::Client,
    pub store: InMemoryStore,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Serves a store seeded with the demo data.
    pub async fn spawn() -> Self {
        let config = get_test_config();
        let store = InMemoryStore::seeded(&config.user_id, OffsetDateTime::now_utc());
        Self::spawn_with(config, store).await
    }

    pub async fn spawn_empty() -> Self {
        Self::spawn_with(get_test_config(), InMemoryStore::new()).await
    }

    pub async fn spawn_with(config: Config, store: InMemoryStore) -> Self {
        setup_tracing();

        let app = relaydesk::build_router(config.clone(), &store);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { server_url: format!("http://{addr}"), client: reqwest::Client::new(), store, config: Arc::new(config) }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.server_url)
    }
}
