//! Firebase Cloud Messaging (HTTP v1) client.
//!
//! FCM accepts OAuth2 access tokens only. The client signs a short-lived RS256 assertion with the service account's
//! private key and exchanges it for an access token, which is cached until shortly before it expires.
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::*;
use pcl_engine::traits::{IntegrationError, PushMessage, PushSender};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::{
    config::FcmServiceAccount,
    integrations::{not_configured, send_json},
};

pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const FCM_API_URL: &str = "https://fcm.googleapis.com/v1/projects";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const DEFAULT_CLICK_ACTION: &str = "/";

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct FcmClient {
    account: Option<Arc<FcmServiceAccount>>,
    client: Arc<Client>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl FcmClient {
    /// Without a service account, every send fails with [`IntegrationError::NotConfigured`].
    pub fn new(account: Option<FcmServiceAccount>) -> Self {
        Self { account: account.map(Arc::new), client: Arc::new(Client::new()), token: Arc::new(Mutex::new(None)) }
    }

    pub fn is_configured(&self) -> bool {
        self.account.is_some()
    }

    fn account(&self) -> Result<&FcmServiceAccount, IntegrationError> {
        self.account.as_deref().ok_or_else(|| not_configured("No FCM service account has been provided"))
    }

    /// Returns the cached access token, or fetches a new one if it is missing or about to expire.
    async fn access_token(&self) -> Result<String, IntegrationError> {
        let mut cache = self.token.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > Utc::now() + Duration::seconds(60) {
                return Ok(cached.token.clone());
            }
        }
        let account = self.account()?;
        let assertion = sign_assertion(account, Utc::now())?;
        trace!("📲️ Requesting FCM access token from {}", account.token_uri);
        let req = self
            .client
            .post(&account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())]);
        let response = send_json::<TokenResponse>(req).await?;
        let lifetime = response.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        debug!("📲️ New FCM access token acquired. Valid for {lifetime}s");
        let token = response.access_token.clone();
        let expires_at = Utc::now() + Duration::seconds(lifetime);
        *cache = Some(CachedToken { token: response.access_token, expires_at });
        Ok(token)
    }
}

fn sign_assertion(account: &FcmServiceAccount, now: DateTime<Utc>) -> Result<String, IntegrationError> {
    let claims = AssertionClaims {
        iss: &account.client_email,
        scope: FCM_SCOPE,
        aud: &account.token_uri,
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
    };
    let key = EncodingKey::from_rsa_pem(account.private_key.reveal().as_bytes())
        .map_err(|e| IntegrationError::NotConfigured(format!("Invalid service account private key. {e}")))?;
    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| IntegrationError::NotConfigured(format!("Could not sign the FCM assertion. {e}")))
}

/// FCM only accepts string values in the data payload.
fn string_data(data: &Map<String, Value>) -> Map<String, Value> {
    data.iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), Value::String(v))
        })
        .collect()
}

pub fn fcm_message(token: &str, message: &PushMessage) -> Value {
    let link = message.click_action.as_deref().unwrap_or(DEFAULT_CLICK_ACTION);
    let mut data = Map::new();
    data.insert("url".into(), Value::String(link.to_string()));
    data.extend(string_data(&message.data));
    json!({
        "message": {
            "token": token,
            "notification": { "title": message.title, "body": message.body },
            "webpush": {
                "notification": { "icon": "/logo.png", "badge": "/badge.png", "tag": "pcl-notification" },
                "fcm_options": { "link": link },
            },
            "data": data,
        }
    })
}

impl PushSender for FcmClient {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<String, IntegrationError> {
        let project_id = self.account()?.project_id.clone();
        let access_token = self.access_token().await?;
        let req = self
            .client
            .post(format!("{FCM_API_URL}/{project_id}/messages:send"))
            .bearer_auth(access_token)
            .json(&fcm_message(token, message));
        let response = send_json::<SendResponse>(req).await?;
        trace!("📲️ Push message delivered: {}", response.name);
        Ok(response.name)
    }
}
