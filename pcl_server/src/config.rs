use std::{env, fs, io::Write, path::Path};

use chrono::Duration;
use log::*;
use pcl_common::{parse_boolean_flag, Secret};
use rand::{thread_rng, RngCore};
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::errors::ServerError;

const DEFAULT_PCL_HOST: &str = "127.0.0.1";
const DEFAULT_PCL_PORT: u16 = 8460;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/pcl_store.db";
const DEFAULT_CASHFREE_BASE_URL: &str = "https://api.cashfree.com";
const DEFAULT_OTP_REQUEST_TIMEOUT: Duration = Duration::minutes(30);
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub razorpay: RazorpayConfig,
    pub cashfree: CashfreeConfig,
    /// Push delivery is disabled when no service account is configured.
    pub fcm: Option<FcmServiceAccount>,
    pub storage: StorageConfig,
    /// Aadhaar OTP requests that are still pending after this long are expired by the background worker.
    pub otp_request_timeout: Duration,
    /// The channel capacity of each event hook.
    pub event_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PCL_HOST.to_string(),
            port: DEFAULT_PCL_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            auth: AuthConfig::default(),
            razorpay: RazorpayConfig::default(),
            cashfree: CashfreeConfig::default(),
            fcm: None,
            storage: StorageConfig::default(),
            otp_request_timeout: DEFAULT_OTP_REQUEST_TIMEOUT,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

fn required_env(name: &str, purpose: &str) -> String {
    env::var(name).ok().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
        error!("🪛️ {name} is not set. Please set it to {purpose}.");
        String::default()
    })
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PCL_HOST").ok().unwrap_or_else(|| DEFAULT_PCL_HOST.into());
        let port = env::var("PCL_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PCL_PORT. {e} Using the default, {DEFAULT_PCL_PORT}, instead."
                    );
                    DEFAULT_PCL_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PCL_PORT);
        let database_url = env::var("PCL_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ PCL_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let fcm = env::var("PCL_FCM_SERVICE_ACCOUNT").ok().and_then(|path| {
            FcmServiceAccount::from_file(&path)
                .map_err(|e| error!("🪛️ Could not load the FCM service account from {path}. {e}"))
                .ok()
        });
        if fcm.is_none() {
            warn!("🪛️ No FCM service account is configured. Push notifications are disabled.");
        }
        Self {
            host,
            port,
            database_url,
            auth,
            razorpay: RazorpayConfig::from_env_or_default(),
            cashfree: CashfreeConfig::from_env_or_default(),
            fcm,
            storage: StorageConfig::from_env_or_default(),
            otp_request_timeout: configure_otp_timeout(),
            event_buffer_size: configure_event_buffer_size(),
        }
    }
}

fn configure_otp_timeout() -> Duration {
    env::var("PCL_OTP_REQUEST_TIMEOUT")
        .map_err(|_| {
            info!(
                "🪛️ PCL_OTP_REQUEST_TIMEOUT is not set. Using the default value of {} minutes.",
                DEFAULT_OTP_REQUEST_TIMEOUT.num_minutes()
            )
        })
        .and_then(|s| {
            s.parse::<i64>()
                .map(Duration::minutes)
                .map_err(|e| warn!("🪛️ Invalid configuration value for PCL_OTP_REQUEST_TIMEOUT. {e}"))
        })
        .ok()
        .unwrap_or(DEFAULT_OTP_REQUEST_TIMEOUT)
}

fn configure_event_buffer_size() -> usize {
    env::var("PCL_EVENT_BUFFER_SIZE")
        .ok()
        .and_then(|s| {
            s.parse::<usize>()
                .map_err(|e| warn!("🪛️ Invalid configuration value for PCL_EVENT_BUFFER_SIZE. {e}"))
                .ok()
        })
        .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE)
}

//-------------------------------------------------  Razorpay  ---------------------------------------------------------
#[derive(Clone, Debug)]
pub struct RazorpayConfig {
    pub key_id: String,
    /// Signs the checkout callback (`order_id|payment_id`) and authenticates calls to the orders API.
    pub key_secret: Secret<String>,
    /// Signs webhook deliveries.
    pub webhook_secret: Secret<String>,
    /// If false, webhook signatures are not checked. Only ever disable this for local testing.
    pub hmac_checks: bool,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::default(),
            key_secret: Secret::default(),
            webhook_secret: Secret::default(),
            hmac_checks: true,
        }
    }
}

impl RazorpayConfig {
    pub fn from_env_or_default() -> Self {
        let key_id = required_env("PCL_RAZORPAY_KEY_ID", "the Razorpay API key id");
        let key_secret = Secret::new(required_env("PCL_RAZORPAY_KEY_SECRET", "the Razorpay API key secret"));
        let webhook_secret =
            Secret::new(required_env("PCL_RAZORPAY_WEBHOOK_SECRET", "the secret of the Razorpay webhook"));
        let hmac_checks = parse_boolean_flag(env::var("PCL_RAZORPAY_HMAC_CHECKS").ok(), true);
        if !hmac_checks {
            warn!("🚨️ Razorpay webhook signature checks are DISABLED. Never run a production server like this.");
        }
        Self { key_id, key_secret, webhook_secret, hmac_checks }
    }
}

//-------------------------------------------------  Cashfree  ---------------------------------------------------------
#[derive(Clone, Debug)]
pub struct CashfreeConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
}

impl Default for CashfreeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CASHFREE_BASE_URL.to_string(),
            client_id: String::default(),
            client_secret: Secret::default(),
        }
    }
}

impl CashfreeConfig {
    pub fn from_env_or_default() -> Self {
        let base_url = env::var("PCL_CASHFREE_BASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PCL_CASHFREE_BASE_URL is not set. Using {DEFAULT_CASHFREE_BASE_URL}.");
            DEFAULT_CASHFREE_BASE_URL.to_string()
        });
        let client_id = required_env("PCL_CASHFREE_CLIENT_ID", "the Cashfree verification client id");
        let client_secret =
            Secret::new(required_env("PCL_CASHFREE_CLIENT_SECRET", "the Cashfree verification client secret"));
        Self { base_url, client_id, client_secret }
    }
}

//-------------------------------------------------  FCM  --------------------------------------------------------------
/// The fields of a Google service account key file that are needed to send push messages.
#[derive(Clone, Debug)]
pub struct FcmServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: Secret<String>,
    pub token_uri: String,
}

#[derive(Deserialize)]
struct ServiceAccountFile {
    project_id: String,
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl FcmServiceAccount {
    pub fn from_json(json: &str) -> Result<Self, ServerError> {
        let file: ServiceAccountFile = serde_json::from_str(json)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid service account file. {e}")))?;
        Ok(Self {
            project_id: file.project_id,
            client_email: file.client_email,
            private_key: Secret::new(file.private_key),
            token_uri: file.token_uri,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

//-------------------------------------------------  Storage  ----------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    /// The base url of the storage service, e.g. `https://xyz.supabase.co`
    pub url: String,
    pub service_key: Secret<String>,
}

impl StorageConfig {
    pub fn from_env_or_default() -> Self {
        let url = required_env("PCL_STORAGE_URL", "the base url of the object storage service");
        let service_key = Secret::new(required_env("PCL_STORAGE_SERVICE_KEY", "the object storage service key"));
        Self { url, service_key }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared HS256 secret that the identity provider signs access tokens with.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut tmpfile = NamedTempFile::new().ok().and_then(|f| f.keep().ok());
        warn!(
            "🚨️🚨️🚨️ The JWT secret has not been set. I'm using a random value for this session. DO NOT operate on \
             production like this, since no access token issued by the identity provider will be accepted. 🚨️🚨️🚨️"
        );
        let mut bytes = [0u8; 32];
        thread_rng().fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);
        match &mut tmpfile {
            Some((f, p)) => match writeln!(f, "{secret}") {
                Ok(()) => warn!(
                    "🚨️🚨️🚨️ The JWT secret for this session was written to {}. If this is a production instance, you \
                     are doing it wrong! Set the PCL_JWT_SECRET environment variable instead. 🚨️🚨️🚨️",
                    p.to_str().unwrap_or("???")
                ),
                Err(e) => warn!("🪛️ Could not write the JWT secret to the temporary file. {e}"),
            },
            None => {
                warn!("🪛️ Could not create a temporary file to store the JWT secret. ");
            },
        }
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S) -> Self {
        Self { jwt_secret: Secret::new(secret.into()) }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("PCL_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [PCL_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("PCL_JWT_SECRET is empty".to_string()));
        }
        Ok(Self::new(secret))
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub push_enabled: bool,
    pub otp_request_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { push_enabled: true, otp_request_timeout: DEFAULT_OTP_REQUEST_TIMEOUT }
    }
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { push_enabled: config.fcm.is_some(), otp_request_timeout: config.otp_request_timeout }
    }
}
