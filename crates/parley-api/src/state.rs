//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/hasher/client traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use parley_core::auth::authenticator::PasswordAuthenticator;
use parley_core::auth::service::AuthService;
use parley_core::chat::service::ChatService;
use parley_infra::config::{load_server_config, resolve_data_dir};
use parley_infra::crypto::password::Argon2PasswordHasher;
use parley_infra::inference::HttpInferenceClient;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::DatabasePool;
use parley_infra::sqlite::session::SqliteSessionStore;
use parley_infra::sqlite::user::SqliteUserRepository;
use parley_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthenticator =
    PasswordAuthenticator<SqliteUserRepository, SqliteSessionStore, Argon2PasswordHasher>;

pub type ConcreteAuthService =
    AuthService<SqliteUserRepository, Argon2PasswordHasher, ConcreteAuthenticator>;

pub type ConcreteChatService = ChatService<SqliteChatRepository, HttpInferenceClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    /// Resolves request tokens into sessions for the session extractor.
    pub sessions: Arc<SqliteSessionStore>,
    pub config: Arc<ServerConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let db_pool = DatabasePool::open(&data_dir).await?;
        let config = load_server_config(&data_dir).await;

        Self::from_parts(data_dir, config, db_pool)
    }

    /// Wire services over an already-open pool.
    pub fn from_parts(
        data_dir: PathBuf,
        config: ServerConfig,
        db_pool: DatabasePool,
    ) -> anyhow::Result<Self> {
        let users = SqliteUserRepository::new(db_pool.clone());
        let sessions = SqliteSessionStore::new(db_pool.clone());

        let session_ttl = chrono::Duration::try_hours(config.session.ttl_hours)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| {
                anyhow::anyhow!("invalid session.ttl_hours: {}", config.session.ttl_hours)
            })?;

        let authenticator = PasswordAuthenticator::new(
            users.clone(),
            sessions.clone(),
            Argon2PasswordHasher::new(),
            session_ttl,
        );
        let auth_service = AuthService::new(users, Argon2PasswordHasher::new(), authenticator);

        let inference = HttpInferenceClient::new(&config.inference)?;
        tracing::debug!(url = %inference.url(), "inference client ready");
        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            inference,
            config.inference.enable_search,
        );

        Ok(Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}
