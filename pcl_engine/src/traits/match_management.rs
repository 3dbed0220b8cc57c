use thiserror::Error;

use crate::{
    db_types::{Match, MatchParties, NewMatch, Payment, UserId},
    traits::{AccountApiError, AccountManagement, LeagueApiError, NotificationApiError, NotificationManagement},
};

#[derive(Debug, Clone, Error)]
pub enum MatchApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
}

impl From<sqlx::Error> for MatchApiError {
    fn from(e: sqlx::Error) -> Self {
        MatchApiError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for MatchApiError {
    fn from(e: AccountApiError) -> Self {
        MatchApiError::DatabaseError(e.to_string())
    }
}

impl From<LeagueApiError> for MatchApiError {
    fn from(e: LeagueApiError) -> Self {
        MatchApiError::DatabaseError(e.to_string())
    }
}

impl From<NotificationApiError> for MatchApiError {
    fn from(e: NotificationApiError) -> Self {
        MatchApiError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait MatchManagement: AccountManagement + NotificationManagement {
    /// Stores a new `pending`, `unpaid` match along with its staff assignments.
    async fn insert_match(&self, created_by: &UserId, new_match: NewMatch) -> Result<Match, MatchApiError>;

    async fn fetch_match(&self, match_id: i64) -> Result<Option<Match>, MatchApiError>;

    /// Collects the club owners, stadium owner, squad players and staff involved in the match.
    async fn fetch_match_parties(&self, match_id: i64) -> Result<Option<MatchParties>, MatchApiError>;

    /// Marks the match as cancelled by `canceled_by`, recording the time and reason.
    async fn cancel_match(&self, match_id: i64, canceled_by: &UserId, reason: &str) -> Result<Match, MatchApiError>;

    /// The most recent payment recorded against the match, if any.
    async fn fetch_payment_for_match(&self, match_id: i64) -> Result<Option<Payment>, MatchApiError>;
}
