use thiserror::Error;

use crate::{
    db_types::{Contract, ContractParties, NewContract, UserId},
    traits::{AccountApiError, AccountManagement, LeagueApiError, NotificationApiError, NotificationManagement},
};

#[derive(Debug, Clone, Error)]
pub enum ContractApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
}

impl From<sqlx::Error> for ContractApiError {
    fn from(e: sqlx::Error) -> Self {
        ContractApiError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for ContractApiError {
    fn from(e: AccountApiError) -> Self {
        ContractApiError::DatabaseError(e.to_string())
    }
}

impl From<LeagueApiError> for ContractApiError {
    fn from(e: LeagueApiError) -> Self {
        ContractApiError::DatabaseError(e.to_string())
    }
}

impl From<NotificationApiError> for ContractApiError {
    fn from(e: NotificationApiError) -> Self {
        ContractApiError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait ContractManagement: AccountManagement + NotificationManagement {
    async fn insert_contract(&self, created_by: &UserId, contract: NewContract) -> Result<Contract, ContractApiError>;

    async fn fetch_contract(&self, contract_id: i64) -> Result<Option<Contract>, ContractApiError>;

    async fn fetch_contract_parties(&self, contract_id: i64) -> Result<Option<ContractParties>, ContractApiError>;

    /// The player profile id for the given user, if they have one.
    async fn fetch_player_id_for_user(&self, user_id: &UserId) -> Result<Option<i64>, ContractApiError>;

    async fn fetch_contracts_for_player(&self, player_id: i64) -> Result<Vec<Contract>, ContractApiError>;

    async fn fetch_contracts_for_club(&self, club_id: i64) -> Result<Vec<Contract>, ContractApiError>;

    /// In a single transaction, activates the contract with the player's signature and moves the player to the club.
    async fn sign_contract(&self, contract_id: i64, signature: &str) -> Result<Contract, ContractApiError>;

    async fn terminate_contract(
        &self,
        contract_id: i64,
        terminated_by: &UserId,
        reason: &str,
    ) -> Result<Contract, ContractApiError>;
}
