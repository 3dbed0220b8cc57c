//! Request and response bodies for the league API.
//!
//! Most request fields are optional here, even when the API requires them. This lets the handlers (and the engine)
//! answer with a specific message about what is missing, rather than a generic deserialization error.
use std::fmt::Display;

use pcl_engine::{
    db_types::{NewContactSubmission, NewPayoutAccount, UserId},
    pcl_api::notification_api::PushRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

//--------------------------------------------   League   -------------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for NewContactSubmission {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            subject: req.subject.unwrap_or_default(),
            message: req.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadRequest {
    pub player_id: i64,
}

//--------------------------------------------   Admin   --------------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubReviewRequest {
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusRequest {
    #[serde(rename = "isActive", alias = "is_active")]
    pub is_active: bool,
}

//--------------------------------------------   Payments   -----------------------------------------------------------
/// Fees in rupees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakdownRequest {
    #[serde(default)]
    pub stadium_fee: f64,
    #[serde(default)]
    pub referee_fee: f64,
    #[serde(default)]
    pub staff_fee: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentStatusQuery {
    pub payment_id: Option<String>,
}

//--------------------------------------------     KYC    -------------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AadhaarOtpRequest {
    #[serde(alias = "aadhaarNumber")]
    pub aadhaar_number: Option<String>,
    #[serde(alias = "clubId")]
    pub club_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtpVerificationRequest {
    #[serde(alias = "requestId")]
    pub request_id: Option<String>,
    pub otp: Option<String>,
    #[serde(alias = "clubId")]
    pub club_id: Option<i64>,
}

/// A document as sent by the web client. `data` is base64, optionally as a `data:` URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(alias = "fileName", alias = "name")]
    pub file_name: String,
    #[serde(alias = "contentType", alias = "type", default)]
    pub content_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsUploadRequest {
    #[serde(alias = "clubId")]
    pub club_id: Option<i64>,
    #[serde(default)]
    pub documents: Vec<DocumentPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountRequest {
    #[serde(alias = "account_id")]
    pub account_id: Option<i64>,
    #[serde(alias = "account_number")]
    pub account_number: Option<String>,
    #[serde(alias = "ifsc_code")]
    pub ifsc_code: Option<String>,
    #[serde(alias = "account_holder")]
    pub account_holder: Option<String>,
}

impl BankAccountRequest {
    pub fn account(&self) -> NewPayoutAccount {
        NewPayoutAccount {
            account_number: self.account_number.clone().unwrap_or_default(),
            ifsc_code: self.ifsc_code.clone().unwrap_or_default(),
            account_holder: self.account_holder.clone().unwrap_or_default(),
        }
    }
}

//--------------------------------------------  Matches & contracts  --------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelMatchRequest {
    #[serde(rename = "matchId", alias = "match_id")]
    pub match_id: Option<i64>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignContractRequest {
    #[serde(alias = "signatureData", alias = "signature_data")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminateContractRequest {
    pub reason: Option<String>,
}

//--------------------------------------------  Notifications  --------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushTokenRequest {
    pub token: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushNotificationRequest {
    pub user_id: Option<UserId>,
    pub user_ids: Option<Vec<UserId>>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub click_action: Option<String>,
}

impl From<PushNotificationRequest> for PushRequest {
    fn from(req: PushNotificationRequest) -> Self {
        let mut user_ids = req.user_ids.unwrap_or_default();
        if let Some(id) = req.user_id {
            user_ids.push(id);
        }
        user_ids.dedup();
        Self {
            user_ids,
            title: req.title.unwrap_or_default(),
            body: req.body.unwrap_or_default(),
            data: req.data.unwrap_or_default(),
            click_action: req.click_action,
        }
    }
}
