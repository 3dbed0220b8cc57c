use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    db_types::{
        AadhaarRequest,
        BankVerificationRecord,
        Club,
        NewAadhaarRequest,
        NewPayoutAccount,
        PayoutAccount,
        UploadedDocument,
        User,
        UserId,
    },
    traits::{data_objects::AadhaarVerification, AccountApiError, AccountManagement, IntegrationError},
};

#[derive(Debug, Clone, Error)]
pub enum KycApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Unauthorized")]
    UserNotFound,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Another verified player already holds the Aadhaar number.
    #[error("Aadhaar Already Registered")]
    AadhaarAlreadyRegistered,
    /// Another user of any role already holds the Aadhaar number.
    #[error("This Aadhaar number is already registered with another club")]
    DuplicateAadhaar,
    #[error("Aadhaar Verification Failed - Data Mismatch")]
    DataMismatch { name_matched: bool, dob_matched: bool },
    #[error("{0}")]
    IntegrationError(String),
}

impl From<sqlx::Error> for KycApiError {
    fn from(e: sqlx::Error) -> Self {
        KycApiError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for KycApiError {
    fn from(e: AccountApiError) -> Self {
        KycApiError::DatabaseError(e.to_string())
    }
}

impl From<IntegrationError> for KycApiError {
    fn from(e: IntegrationError) -> Self {
        KycApiError::IntegrationError(e.to_string())
    }
}

/// Behaviour for identity (Aadhaar) verification records, club document uploads and payout bank accounts.
#[allow(async_fn_in_trait)]
pub trait KycManagement: AccountManagement {
    /// Returns another verified *player* that already holds the given Aadhaar number, excluding `user_id`.
    async fn fetch_verified_player_with_aadhaar(
        &self,
        aadhaar_number: &str,
        user_id: &UserId,
    ) -> Result<Option<User>, KycApiError>;

    /// Returns any other user that already holds the given Aadhaar number, excluding `user_id`.
    async fn fetch_user_with_aadhaar(&self, aadhaar_number: &str, user_id: &UserId)
        -> Result<Option<User>, KycApiError>;

    async fn insert_aadhaar_request(&self, request: NewAadhaarRequest) -> Result<AadhaarRequest, KycApiError>;

    /// Fetches the `pending` OTP request with the given vendor request id, belonging to `user_id`.
    async fn fetch_pending_aadhaar_request(
        &self,
        user_id: &UserId,
        request_id: &str,
    ) -> Result<Option<AadhaarRequest>, KycApiError>;

    /// Stores a successful Aadhaar verification. In a single transaction the user, their player profile (for players)
    /// or their club (for club owners) are updated, a verified `kyc_documents` row is stored, and the OTP request is
    /// marked `verified`.
    async fn complete_aadhaar_verification(&self, verification: AadhaarVerification) -> Result<User, KycApiError>;

    /// Marks every `pending` OTP request created before `cutoff` as `expired` and returns them.
    async fn expire_aadhaar_requests(&self, cutoff: DateTime<Utc>) -> Result<Vec<AadhaarRequest>, KycApiError>;

    /// Records uploaded club documents. Registered clubs go to admin review. Other clubs are verified immediately.
    async fn record_club_documents(
        &self,
        club: &Club,
        documents: Vec<UploadedDocument>,
    ) -> Result<Club, KycApiError>;

    async fn insert_payout_account(
        &self,
        user_id: &UserId,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError>;
    async fn fetch_payout_account(&self, account_id: i64) -> Result<Option<PayoutAccount>, KycApiError>;
    async fn fetch_payout_accounts(&self, user_id: &UserId) -> Result<Vec<PayoutAccount>, KycApiError>;

    /// Replaces the bank details and resets verification: the account returns to `pending` and is deactivated.
    async fn update_payout_account(
        &self,
        account_id: i64,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError>;

    async fn record_bank_verification(
        &self,
        account_id: i64,
        record: BankVerificationRecord,
    ) -> Result<PayoutAccount, KycApiError>;
}
