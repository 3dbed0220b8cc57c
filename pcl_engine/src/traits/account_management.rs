use thiserror::Error;

use crate::db_types::{Club, NewUser, User, UserId};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User {0} does not exist")]
    UserNotFound(UserId),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// The `AccountManagement` trait defines behaviour for looking up the people behind an access token.
///
/// Every other backend trait that needs to know who the caller is builds on top of this one.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches the `users` row for the given id. If the user has not completed sign-up, `None` is returned.
    async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError>;

    /// Creates the user row, or updates the profile fields of an existing one. Fields that are `None` in the profile
    /// are left unchanged.
    async fn upsert_user(&self, user: NewUser) -> Result<User, AccountApiError>;

    /// Fetches the club owned by the given user. An owner holds at most one club.
    async fn fetch_owned_club(&self, owner_id: &UserId) -> Result<Option<Club>, AccountApiError>;

    /// Activates or deactivates the user's account. Returns `UserNotFound` if there is no such user.
    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError>;
}
