//! REST clients for the third-party services the league depends on, and the event hooks that use them.
//!
//! * [`razorpay::RazorpayClient`] creates payment gateway orders.
//! * [`cashfree::CashfreeClient`] runs Aadhaar OTP and bank account verification.
//! * [`fcm::FcmClient`] delivers push messages through Firebase Cloud Messaging.
//! * [`storage::StorageClient`] stores KYC documents in object storage.
//!
//! Each client implements the matching vendor trait from the engine, so handlers can be tested against mocks.
use log::trace;
use pcl_engine::traits::IntegrationError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

pub mod cashfree;
pub mod fcm;
pub mod push;
pub mod razorpay;
pub mod storage;

/// Sends the request and deserializes a successful JSON response. Unsuccessful responses are returned as
/// [`IntegrationError::Rejected`], carrying the vendor's response body as the message.
pub(crate) async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, IntegrationError> {
    let response = req.send().await.map_err(|e| IntegrationError::RequestFailed(e.to_string()))?;
    if response.status().is_success() {
        trace!("REST query successful. {}", response.status());
        response.json::<T>().await.map_err(|e| IntegrationError::InvalidResponse(e.to_string()))
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.map_err(|e| IntegrationError::RequestFailed(e.to_string()))?;
        Err(IntegrationError::Rejected { status, message })
    }
}

pub(crate) fn not_configured(what: &str) -> IntegrationError {
    IntegrationError::NotConfigured(what.to_string())
}
