//! User repository trait definition.

use parley_types::error::RepositoryError;
use parley_types::user::User;

/// Repository trait for user account persistence.
///
/// Implementations live in parley-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Look up a user by lowercase email.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Create a new user. Returns `RepositoryError::Conflict` when the email is taken.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// List all users, oldest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;
}
