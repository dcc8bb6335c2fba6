//! In-memory collaborators for service tests.
//!
//! Each mock is `Clone` with shared state, so a test can keep a handle for
//! assertions after moving a copy into the service under test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use parley_types::auth::{Credentials, IssuedSession, Session};
use parley_types::chat::Conversation;
use parley_types::error::{AuthError, InferenceError, RepositoryError};
use parley_types::user::{User, UserId};
use secrecy::SecretString;
use uuid::Uuid;

use crate::auth::authenticator::Authenticator;
use crate::auth::hash::PasswordHasher;
use crate::chat::inference::{InferenceClient, InferenceRequest};
use crate::chat::repository::ChatRepository;
use crate::repository::session::SessionStore;
use crate::repository::user::UserRepository;

/// Reversible "hash" so tests can assert on stored values.
pub struct PlainHasher;

impl PlainHasher {
    pub fn hashed(password: &str) -> String {
        format!("plain:{password}")
    }
}

impl PasswordHasher for PlainHasher {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(Self::hashed(password))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        Self::hashed(password) == hash
    }
}

pub fn user_with_password(email: &str, password: &str) -> User {
    User {
        id: UserId::new(),
        email: email.to_string(),
        password_hash: PlainHasher::hashed(password),
        created_at: Utc::now(),
    }
}

pub fn session_for(user_id: Option<UserId>) -> Session {
    let now = Utc::now();
    Session {
        id: Uuid::now_v7(),
        user_id,
        email: None,
        created_at: now,
        expires_at: now + Duration::hours(1),
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Query("store unavailable".to_string())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
    lookups: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
    failing: bool,
    blind_lookup: bool,
}

impl MemoryUserRepository {
    /// A repository whose every call errors.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// A repository whose lookups miss stored users while inserts still
    /// hit the unique email constraint, as when a concurrent registration
    /// lands between the two calls.
    pub fn racing() -> Self {
        Self {
            blind_lookup: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.email.clone(), user);
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

impl UserRepository for MemoryUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable());
        }
        if self.blind_lookup {
            return Ok(None);
        }
        Ok(self.get(email))
    }

    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable());
        }
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(RepositoryError::Conflict(user.email.clone()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, user: &User, ttl: Duration) -> Result<IssuedSession, RepositoryError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: Some(user.id),
            email: Some(user.email.clone()),
            created_at: now,
            expires_at: now + ttl,
        };
        let token = format!("prl_{}", Uuid::now_v7().simple());
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), session.clone());
        Ok(IssuedSession {
            token: SecretString::from(token),
            session,
        })
    }

    async fn resolve(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(token)
            .filter(|s| !s.is_expired_at(now))
            .cloned())
    }

    async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum SignInMode {
    Accept,
    Reject,
    Broken,
}

/// Authenticator with a fixed answer that records what it was asked.
#[derive(Clone)]
pub struct ScriptedAuthenticator {
    mode: SignInMode,
    sign_ins: Arc<AtomicUsize>,
    sign_outs: Arc<AtomicUsize>,
    last_email: Arc<Mutex<Option<String>>>,
}

impl ScriptedAuthenticator {
    fn with_mode(mode: SignInMode) -> Self {
        Self {
            mode,
            sign_ins: Arc::default(),
            sign_outs: Arc::default(),
            last_email: Arc::default(),
        }
    }

    pub fn accepting() -> Self {
        Self::with_mode(SignInMode::Accept)
    }

    /// Reports invalid credentials.
    pub fn rejecting() -> Self {
        Self::with_mode(SignInMode::Reject)
    }

    /// Fails with a storage error.
    pub fn broken() -> Self {
        Self::with_mode(SignInMode::Broken)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    pub fn last_email(&self) -> Option<String> {
        self.last_email.lock().unwrap().clone()
    }
}

impl Authenticator for ScriptedAuthenticator {
    async fn sign_in(&self, credentials: &Credentials) -> Result<IssuedSession, AuthError> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        *self.last_email.lock().unwrap() = Some(credentials.email.clone());
        match self.mode {
            SignInMode::Accept => {
                let user = user_with_password(&credentials.email, "unused");
                let session = session_for(Some(user.id));
                Ok(IssuedSession {
                    token: SecretString::from(format!("prl_{}", session.id.simple())),
                    session,
                })
            }
            SignInMode::Reject => Err(AuthError::InvalidCredentials),
            SignInMode::Broken => Err(AuthError::Repository(unavailable())),
        }
    }

    async fn sign_out(&self, _token: &str) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryChatRepository {
    chats: Arc<Mutex<HashMap<String, Conversation>>>,
    saves: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
    failing: bool,
}

impl MemoryChatRepository {
    /// A repository whose every call errors.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.chats.lock().unwrap().get(id).cloned()
    }

    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Reads of any kind (`get_by_id`, `list_by_user`).
    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable());
        }
        let mut chats = self.chats.lock().unwrap();
        match chats.get_mut(&conversation.id) {
            Some(existing) if existing.user_id != conversation.user_id => Err(
                RepositoryError::Conflict(format!("chat '{}' has another owner", conversation.id)),
            ),
            Some(existing) => {
                existing.messages = conversation.messages.clone();
                Ok(())
            }
            None => {
                chats.insert(conversation.id.clone(), conversation.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Conversation>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.get(id))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        if self.failing {
            return Err(unavailable());
        }
        self.chats.lock().unwrap().remove(id);
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Conversation>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable());
        }
        let mut chats: Vec<_> = self
            .chats
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.user_id == *user_id)
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(chats)
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Inference client returning a canned reply (or a one-shot error).
#[derive(Clone)]
pub struct ScriptedInference {
    reply: Option<String>,
    error: Arc<Mutex<Option<InferenceError>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl ScriptedInference {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            error: Arc::default(),
            requests: Arc::default(),
        }
    }

    pub fn failing(error: InferenceError) -> Self {
        Self {
            reply: None,
            error: Arc::new(Mutex::new(Some(error))),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl InferenceClient for ScriptedInference {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(self
                .error
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| InferenceError::Transport("no scripted reply".to_string()))),
        }
    }
}
