//! Contracts for the third-party services the league relies on.
//!
//! The engine only describes *what* it needs from a payment gateway, an identity verification provider, a push
//! messaging service and an object store. The server provides REST implementations and tests provide mocks.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum IntegrationError {
    #[error("Integration is not configured: {0}")]
    NotConfigured(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Vendor rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl IntegrationError {
    /// True when a push provider reports that a device token can never be delivered to again.
    pub fn is_invalid_push_token(&self) -> bool {
        match self {
            IntegrationError::Rejected { message, .. } => {
                message.contains("UNREGISTERED") ||
                    message.contains("INVALID_ARGUMENT") ||
                    message.contains("not a valid FCM registration token")
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    /// Amount in paise
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: Value,
}

/// An order as created by the payment gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountCheck {
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Extra key-value data delivered with the message. Push services only accept string values.
    pub data: serde_json::Map<String, Value>,
    pub click_action: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    async fn create_order(&self, order: GatewayOrderRequest) -> Result<GatewayOrder, IntegrationError>;
}

/// Aadhaar OTP and bank account verification. Responses are returned raw, since the useful fields move around
/// between API versions.
#[allow(async_fn_in_trait)]
pub trait IdentityVerifier {
    async fn request_aadhaar_otp(&self, aadhaar_number: &str) -> Result<Value, IntegrationError>;
    async fn verify_aadhaar_otp(&self, request_id: &str, otp: &str) -> Result<Value, IntegrationError>;
    async fn verify_bank_account(&self, account: &BankAccountCheck) -> Result<Value, IntegrationError>;
}

#[allow(async_fn_in_trait)]
pub trait PushSender {
    /// Sends a message to a single device token. Returns the provider's message id.
    async fn send(&self, token: &str, message: &PushMessage) -> Result<String, IntegrationError>;
}

#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Stores the object and returns its public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, IntegrationError>;
}
