//! Cashfree verification API client.
//!
//! Cashfree verifies Aadhaar numbers with a one-time password sent to the holder's registered mobile number, and
//! checks that a bank account exists and belongs to the named holder.
use std::sync::Arc;

use log::*;
use pcl_engine::{
    helpers::mask_aadhaar,
    traits::{BankAccountCheck, IdentityVerifier, IntegrationError},
};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde_json::{json, Value};

use crate::{
    config::CashfreeConfig,
    integrations::{not_configured, send_json},
};

pub const CASHFREE_API_VERSION: &str = "2022-09-01";

#[derive(Clone)]
pub struct CashfreeClient {
    config: CashfreeConfig,
    client: Arc<Client>,
}

impl CashfreeClient {
    pub fn new(config: CashfreeConfig) -> Result<Self, IntegrationError> {
        let mut headers = HeaderMap::with_capacity(4);
        let client_id =
            HeaderValue::from_str(&config.client_id).map_err(|e| IntegrationError::NotConfigured(e.to_string()))?;
        let mut client_secret = HeaderValue::from_str(config.client_secret.reveal())
            .map_err(|e| IntegrationError::NotConfigured(e.to_string()))?;
        client_secret.set_sensitive(true);
        headers.insert("x-client-id", client_id);
        headers.insert("x-client-secret", client_secret);
        headers.insert("x-api-version", HeaderValue::from_static(CASHFREE_API_VERSION));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IntegrationError::NotConfigured(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, IntegrationError> {
        if self.config.client_id.is_empty() || !self.config.client_secret.is_set() {
            return Err(not_configured("Cashfree credentials are not set"));
        }
        let url = self.url(path);
        trace!("🪪️ Sending Cashfree request: {url}");
        send_json::<Value>(self.client.post(url).json(&body)).await
    }
}

impl IdentityVerifier for CashfreeClient {
    async fn request_aadhaar_otp(&self, aadhaar_number: &str) -> Result<Value, IntegrationError> {
        debug!("🪪️ Requesting an Aadhaar OTP for {}", mask_aadhaar(aadhaar_number));
        self.post("/verification/offline-aadhaar/otp", json!({ "aadhaar_number": aadhaar_number })).await
    }

    async fn verify_aadhaar_otp(&self, request_id: &str, otp: &str) -> Result<Value, IntegrationError> {
        debug!("🪪️ Verifying Aadhaar OTP for request {request_id}");
        self.post("/verification/offline-aadhaar/verify", json!({ "ref_id": request_id, "otp": otp })).await
    }

    async fn verify_bank_account(&self, account: &BankAccountCheck) -> Result<Value, IntegrationError> {
        debug!("🪪️ Verifying bank account with IFSC {}", account.ifsc_code);
        let body = json!({
            "bank_account": account.account_number,
            "ifsc": account.ifsc_code,
            "name": account.account_holder,
        });
        self.post("/verification/bank-account/sync", body).await
    }
}
