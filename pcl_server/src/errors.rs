use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use pcl_engine::traits::{
    AccountApiError,
    ContractApiError,
    IntegrationError,
    KycApiError,
    LeagueApiError,
    MatchApiError,
    NotificationApiError,
    PaymentGatewayError,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("{0}")]
    IntegrationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("{0}")]
    InsufficientPermissions(String),
    /// For responses that carry more than an `error` field.
    #[error("{body}")]
    Custom { status: StatusCode, body: Value },
}

impl ServerError {
    pub fn custom(status: StatusCode, body: Value) -> Self {
        Self::Custom { status, body }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IntegrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Custom { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Custom { body, .. } => body.to_string(),
            _ => json!({ "error": self.to_string() }).to_string(),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body)
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("No access token was provided")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    InvalidToken(String),
    #[error("Access token has expired")]
    ExpiredToken,
    #[error("Missing signature")]
    MissingSignature,
    #[error("Invalid signature")]
    InvalidSignature,
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            AccountApiError::UserNotFound(_) => Self::AuthenticationError(AuthError::Unauthorized),
        }
    }
}

impl From<LeagueApiError> for ServerError {
    fn from(e: LeagueApiError) -> Self {
        match e {
            LeagueApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            LeagueApiError::ClubNotFound(_) | LeagueApiError::TeamNotFound(_) | LeagueApiError::PlayerNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            LeagueApiError::NotClubOwner(_) => Self::InsufficientPermissions(e.to_string()),
            LeagueApiError::ValidationError(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            PaymentGatewayError::PaymentNotFound(_) | PaymentGatewayError::MatchNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            PaymentGatewayError::ValidationError(msg) => Self::ValidationError(msg),
            PaymentGatewayError::ProviderError(msg) => Self::IntegrationError(msg),
        }
    }
}

const AADHAAR_REGISTERED_MESSAGE: &str = "This Aadhaar number is already verified with another player account. Each \
                                          Aadhaar can only be used by one player. If you believe this is an error, \
                                          please contact support@professionalclubleague.com";
const AADHAAR_MISMATCH_MESSAGE: &str = "The Aadhaar you entered does not belong to you. Please use your own Aadhaar \
                                        for verification. If you believe this is an error, contact support.";

impl From<KycApiError> for ServerError {
    fn from(e: KycApiError) -> Self {
        match e {
            KycApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            KycApiError::ValidationError(msg) => Self::ValidationError(msg),
            KycApiError::UserNotFound => Self::AuthenticationError(AuthError::Unauthorized),
            KycApiError::Forbidden(msg) => Self::InsufficientPermissions(msg),
            KycApiError::NotFound(msg) => Self::NoRecordFound(msg),
            KycApiError::AadhaarAlreadyRegistered => Self::custom(
                StatusCode::BAD_REQUEST,
                json!({ "error": e.to_string(), "message": AADHAAR_REGISTERED_MESSAGE }),
            ),
            KycApiError::DuplicateAadhaar => {
                Self::custom(StatusCode::BAD_REQUEST, json!({ "error": e.to_string(), "code": "DUPLICATE_AADHAAR" }))
            },
            KycApiError::DataMismatch { name_matched, dob_matched } => {
                let mut details = Vec::new();
                if !name_matched {
                    details.push("Name mismatch: Aadhaar name does not match your profile");
                }
                if !dob_matched {
                    details.push("Date of Birth mismatch: Aadhaar DOB does not match your profile");
                }
                Self::custom(
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": e.to_string(),
                        "details": details.join(". "),
                        "message": AADHAAR_MISMATCH_MESSAGE,
                    }),
                )
            },
            KycApiError::IntegrationError(msg) => Self::IntegrationError(msg),
        }
    }
}

impl From<MatchApiError> for ServerError {
    fn from(e: MatchApiError) -> Self {
        match e {
            MatchApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            MatchApiError::ValidationError(msg) => Self::ValidationError(msg),
            MatchApiError::NotFound(msg) => Self::NoRecordFound(msg),
            MatchApiError::Forbidden(msg) => Self::InsufficientPermissions(msg),
        }
    }
}

impl From<ContractApiError> for ServerError {
    fn from(e: ContractApiError) -> Self {
        match e {
            ContractApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            ContractApiError::ValidationError(msg) => Self::ValidationError(msg),
            ContractApiError::NotFound(msg) => Self::NoRecordFound(msg),
            ContractApiError::Forbidden(msg) => Self::InsufficientPermissions(msg),
        }
    }
}

impl From<NotificationApiError> for ServerError {
    fn from(e: NotificationApiError) -> Self {
        match e {
            NotificationApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            NotificationApiError::ValidationError(msg) => Self::ValidationError(msg),
            NotificationApiError::NotificationNotFound(_) => Self::NoRecordFound(e.to_string()),
            NotificationApiError::PushUnavailable(_) => Self::ConfigurationError(e.to_string()),
        }
    }
}

impl From<IntegrationError> for ServerError {
    fn from(e: IntegrationError) -> Self {
        match e {
            IntegrationError::NotConfigured(_) => Self::ConfigurationError(e.to_string()),
            _ => Self::IntegrationError(e.to_string()),
        }
    }
}
