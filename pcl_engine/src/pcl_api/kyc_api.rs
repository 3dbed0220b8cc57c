use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;

use crate::{
    db_types::{
        AadhaarRequest,
        BankVerificationRecord,
        BankVerificationStatus,
        Club,
        NewAadhaarRequest,
        NewPayoutAccount,
        PayoutAccount,
        UploadedDocument,
        User,
        UserId,
        UserRole,
    },
    helpers::{
        bank_verification_status,
        extract_aadhaar_data,
        extract_request_id,
        is_valid_otp,
        mask_aadhaar,
        match_account_holder,
        names_match,
        normalize_aadhaar,
        normalize_dob,
        AadhaarData,
    },
    pcl_api::kyc_objects::{BankCheckDetails, BankCheckOutcome, DocumentUpload, DocumentsUploadResult},
    traits::{AadhaarVerification, BankAccountCheck, IdentityVerifier, KycApiError, KycManagement, ObjectStore},
};

pub const KYC_DOCUMENTS_BUCKET: &str = "kyc-documents";
const MISSING_BANK_FIELDS: &str = "Missing required fields: accountNumber, ifscCode, accountHolder";

/// `KycApi` verifies the people behind league accounts.
///
/// Players and club owners verify their identity with an Aadhaar one-time password. Clubs upload their registration
/// documents, and anyone receiving payouts registers a bank account that is checked with the verification provider.
pub struct KycApi<B> {
    db: B,
}

impl<B> Debug for KycApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KycApi")
    }
}

impl<B> KycApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

/// Fails with `DataMismatch` when the user's profile has both a name and a date of birth, and either one disagrees
/// with the Aadhaar record. Incomplete profiles are filled from the record instead.
fn check_identity(user: &User, data: &AadhaarData) -> Result<(), KycApiError> {
    let (Some(name), Some(dob)) = (user.display_name(), user.date_of_birth.as_deref()) else {
        return Ok(());
    };
    let name_matched = names_match(&data.name, &name);
    let dob_matched = data.dob.as_deref().is_some_and(|d| normalize_dob(d) == normalize_dob(dob));
    if name_matched && dob_matched {
        Ok(())
    } else {
        Err(KycApiError::DataMismatch { name_matched, dob_matched })
    }
}

fn required<'a>(value: Option<&'a str>) -> Option<&'a str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl<B> KycApi<B>
where B: KycManagement
{
    /// Starts Aadhaar verification for a player and returns the OTP request id.
    ///
    /// An Aadhaar number may only belong to one verified player. The same person holding a different role (a player
    /// who also owns a club, say) is allowed to reuse it.
    pub async fn request_player_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        aadhaar_number: Option<&str>,
    ) -> Result<String, KycApiError> {
        let aadhaar = required(aadhaar_number)
            .ok_or_else(|| KycApiError::ValidationError("Aadhaar number is required".into()))?;
        let aadhaar = normalize_aadhaar(aadhaar).ok_or_else(|| {
            KycApiError::ValidationError("Invalid Aadhaar number format. Must be 12 digits.".into())
        })?;
        self.player(user_id).await?;
        if let Some(other) = self.db.fetch_verified_player_with_aadhaar(&aadhaar, user_id).await? {
            warn!("🪪️ Aadhaar {} is already verified for player {}", mask_aadhaar(&aadhaar), other.id);
            return Err(KycApiError::AadhaarAlreadyRegistered);
        }
        self.request_otp(verifier, user_id, None, aadhaar).await
    }

    /// Starts Aadhaar verification for a club owner on behalf of their club and returns the OTP request id.
    pub async fn request_club_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        club_id: Option<i64>,
        aadhaar_number: Option<&str>,
    ) -> Result<String, KycApiError> {
        let (Some(club_id), Some(aadhaar)) = (club_id, required(aadhaar_number)) else {
            return Err(KycApiError::ValidationError("Missing required fields".into()));
        };
        let aadhaar = normalize_aadhaar(aadhaar)
            .ok_or_else(|| KycApiError::ValidationError("Invalid Aadhaar number format".into()))?;
        self.owned_club(user_id, club_id, "Unauthorized to verify for this club").await?;
        if let Some(other) = self.db.fetch_user_with_aadhaar(&aadhaar, user_id).await? {
            warn!("🪪️ Aadhaar {} is already registered to user {}", mask_aadhaar(&aadhaar), other.id);
            return Err(KycApiError::DuplicateAadhaar);
        }
        self.request_otp(verifier, user_id, Some(club_id), aadhaar).await
    }

    /// Completes a player's Aadhaar verification. The player is verified and becomes visible to scouts.
    pub async fn verify_player_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        request_id: Option<&str>,
        otp: Option<&str>,
    ) -> Result<AadhaarData, KycApiError> {
        let (request_id, otp) = Self::otp_fields(request_id, otp)?;
        let user = self.player(user_id).await?;
        self.verify_otp(verifier, &user, request_id, otp, None).await
    }

    /// Completes a club owner's Aadhaar verification, which also verifies their club.
    pub async fn verify_club_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        request_id: Option<&str>,
        otp: Option<&str>,
        club_id: Option<i64>,
    ) -> Result<AadhaarData, KycApiError> {
        let club_id = club_id.ok_or_else(|| KycApiError::ValidationError("Missing required fields".into()))?;
        let (request_id, otp) = Self::otp_fields(request_id, otp)?;
        let user = self.db.fetch_user(user_id).await?.ok_or(KycApiError::UserNotFound)?;
        self.owned_club(user_id, club_id, "Unauthorized to verify for this club").await?;
        self.verify_otp(verifier, &user, request_id, otp, Some(club_id)).await
    }

    /// Stores the club's registration documents and records them for review.
    ///
    /// Files are stored under `{club_id}/{millis}_{file_name}` in the KYC documents bucket. The upload stops at the
    /// first file that cannot be stored, and nothing is recorded against the club in that case.
    pub async fn upload_club_documents(
        &self,
        store: &impl ObjectStore,
        user_id: &UserId,
        club_id: Option<i64>,
        documents: Vec<DocumentUpload>,
    ) -> Result<DocumentsUploadResult, KycApiError> {
        let Some(club_id) = club_id.filter(|_| !documents.is_empty()) else {
            return Err(KycApiError::ValidationError("Missing required fields".into()));
        };
        let club = self.owned_club(user_id, club_id, "Club not found or unauthorized").await?;
        let mut uploaded = Vec::with_capacity(documents.len());
        for doc in documents {
            let path = format!("{club_id}/{}_{}", Utc::now().timestamp_millis(), doc.file_name);
            let url = store.upload(KYC_DOCUMENTS_BUCKET, &path, &doc.content_type, doc.data).await.map_err(|e| {
                warn!("🪪️ Could not upload {} for club #{club_id}. {e}", doc.file_name);
                KycApiError::IntegrationError(format!("Failed to upload {}", doc.file_name))
            })?;
            uploaded.push(UploadedDocument { file_name: doc.file_name, path, url });
        }
        let club = self.db.record_club_documents(&club, uploaded.clone()).await?;
        info!("🪪️ {} documents uploaded for club #{club_id}", uploaded.len());
        Ok(DocumentsUploadResult { club, documents: uploaded })
    }

    pub async fn add_payout_account(
        &self,
        user_id: &UserId,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError> {
        if !account.is_complete() {
            return Err(KycApiError::ValidationError(MISSING_BANK_FIELDS.into()));
        }
        self.db.insert_payout_account(user_id, account.normalized()).await
    }

    pub async fn payout_accounts(&self, user_id: &UserId) -> Result<Vec<PayoutAccount>, KycApiError> {
        self.db.fetch_payout_accounts(user_id).await
    }

    /// Replaces the details of an unverified bank account. The account has to be verified again afterwards.
    pub async fn update_payout_account(
        &self,
        user_id: &UserId,
        account_id: Option<i64>,
        account: NewPayoutAccount,
    ) -> Result<PayoutAccount, KycApiError> {
        let account_id = account_id.ok_or_else(|| KycApiError::ValidationError("Account ID is required".into()))?;
        if !account.is_complete() {
            return Err(KycApiError::ValidationError(MISSING_BANK_FIELDS.into()));
        }
        let existing = self
            .db
            .fetch_payout_account(account_id)
            .await?
            .ok_or_else(|| KycApiError::NotFound("Account not found".into()))?;
        if &existing.user_id != user_id {
            return Err(KycApiError::Forbidden("Cannot edit another user's account".into()));
        }
        if existing.verification_status == BankVerificationStatus::Verified {
            return Err(KycApiError::ValidationError(
                "Cannot edit verified accounts. Please delete and create a new one.".into(),
            ));
        }
        let updated = self.db.update_payout_account(account_id, account.normalized()).await?;
        info!("🪪️ Bank account #{account_id} updated. Verification reset to pending.");
        Ok(updated)
    }

    /// Checks one of the caller's bank accounts with the verification provider and stores the result.
    ///
    /// When the provider gives no name-match result, the account holder name is compared with the name at the bank
    /// locally.
    pub async fn verify_bank_account(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        account_id: Option<i64>,
    ) -> Result<BankCheckOutcome, KycApiError> {
        let account_id = account_id.ok_or_else(|| KycApiError::ValidationError("Missing required fields".into()))?;
        let account = self
            .db
            .fetch_payout_account(account_id)
            .await?
            .filter(|a| &a.user_id == user_id)
            .ok_or_else(|| KycApiError::NotFound("Account not found".into()))?;
        let check = BankAccountCheck {
            account_number: account.account_number.clone(),
            ifsc_code: account.ifsc_code.clone(),
            account_holder: account.account_holder.clone(),
        };
        let response = verifier.verify_bank_account(&check).await?;
        let mut details = BankCheckDetails::from_response(&response);
        if details.name_match_result == "UNKNOWN" {
            if let Some(at_bank) = &details.name_at_bank {
                let result = match_account_holder(&account.account_holder, at_bank);
                debug!("🪪️ Local name match for bank account #{account_id}: {}", result.as_str());
                details.name_match_result = result.as_str().to_string();
            }
        }
        let status = bank_verification_status(&details.name_match_result, &details.account_status);
        let record =
            BankVerificationRecord { status, verification_id: details.reference_id.clone(), details: response };
        let account = self.db.record_bank_verification(account_id, record).await?;
        info!("🪪️ Bank account #{account_id} verification: {status}");
        Ok(BankCheckOutcome { account, status, details })
    }

    /// Expires OTP requests that were never completed.
    pub async fn expire_requests(&self, cutoff: DateTime<Utc>) -> Result<Vec<AadhaarRequest>, KycApiError> {
        let expired = self.db.expire_aadhaar_requests(cutoff).await?;
        if !expired.is_empty() {
            info!("🪪️ {} Aadhaar OTP requests expired", expired.len());
        }
        Ok(expired)
    }

    //------------------------------------------  Private  -----------------------------------------------------------

    fn otp_fields<'a>(request_id: Option<&'a str>, otp: Option<&'a str>) -> Result<(&'a str, &'a str), KycApiError> {
        let (Some(request_id), Some(otp)) = (required(request_id), required(otp)) else {
            return Err(KycApiError::ValidationError("Missing required fields".into()));
        };
        if !is_valid_otp(otp) {
            return Err(KycApiError::ValidationError("Invalid OTP format".into()));
        }
        Ok((request_id, otp))
    }

    async fn player(&self, user_id: &UserId) -> Result<User, KycApiError> {
        let user = self.db.fetch_user(user_id).await?.ok_or(KycApiError::UserNotFound)?;
        if user.role != UserRole::Player {
            return Err(KycApiError::Forbidden("This endpoint is only for players".into()));
        }
        Ok(user)
    }

    async fn owned_club(&self, user_id: &UserId, club_id: i64, denied: &str) -> Result<Club, KycApiError> {
        self.db
            .fetch_owned_club(user_id)
            .await?
            .filter(|c| c.id == club_id)
            .ok_or_else(|| KycApiError::Forbidden(denied.to_string()))
    }

    async fn request_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user_id: &UserId,
        club_id: Option<i64>,
        aadhaar_number: String,
    ) -> Result<String, KycApiError> {
        let response = verifier.request_aadhaar_otp(&aadhaar_number).await?;
        let request_id = extract_request_id(&response).ok_or_else(|| {
            warn!("🪪️ OTP response carried no request id: {response}");
            KycApiError::IntegrationError("Failed to generate OTP - no request ID received".into())
        })?;
        let masked = mask_aadhaar(&aadhaar_number);
        let request =
            NewAadhaarRequest { user_id: user_id.clone(), club_id, request_id: request_id.clone(), aadhaar_number };
        self.db.insert_aadhaar_request(request).await?;
        info!("🪪️ Aadhaar OTP requested for {masked} by user {user_id}. Request id {request_id}");
        Ok(request_id)
    }

    async fn verify_otp(
        &self,
        verifier: &impl IdentityVerifier,
        user: &User,
        request_id: &str,
        otp: &str,
        club_id: Option<i64>,
    ) -> Result<AadhaarData, KycApiError> {
        let request = self
            .db
            .fetch_pending_aadhaar_request(&user.id, request_id)
            .await?
            .ok_or_else(|| KycApiError::ValidationError("OTP request not found or expired".into()))?;
        let response = verifier.verify_aadhaar_otp(request_id, otp).await?;
        let data = extract_aadhaar_data(&response)
            .ok_or_else(|| KycApiError::ValidationError("OTP verification failed - no data received".into()))?;
        check_identity(user, &data).inspect_err(|e| warn!("🪪️ Aadhaar check failed for user {}: {e:?}", user.id))?;
        let verification = AadhaarVerification {
            user_id: user.id.clone(),
            request_id: request.request_id,
            aadhaar_number: request.aadhaar_number,
            club_id,
            update_player: club_id.is_none(),
            name: Some(data.name.clone()),
            date_of_birth: data.dob.as_deref().map(normalize_dob),
            address: data.parsed_address.clone(),
            verified_data: data.raw.clone(),
        };
        self.db.complete_aadhaar_verification(verification).await?;
        info!("🪪️ Aadhaar verified for user {}", user.id);
        Ok(data)
    }
}
